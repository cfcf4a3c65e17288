//! Tests for distributions and the mixed-radix enumerator.

use std::collections::HashSet;

use super::*;
use crate::error::DishesError;
use crate::preferences::Preferences;

#[test]
fn test_total_is_people_pow_dishes() {
    assert_eq!(MixedRadix::new(2, 2).unwrap().total(), 4);
    assert_eq!(MixedRadix::new(3, 4).unwrap().total(), 81);
    assert_eq!(MixedRadix::new(1, 50).unwrap().total(), 1);
    assert_eq!(MixedRadix::new(7, 0).unwrap().total(), 1);
}

#[test]
fn test_overflow_is_reported() {
    let err = MixedRadix::new(2, 64).unwrap_err();
    assert!(matches!(
        err,
        DishesError::SearchSpaceTooLarge {
            people: 2,
            dishes: 64
        }
    ));

    // largest power of two that still fits
    assert_eq!(MixedRadix::new(2, 63).unwrap().total(), 1 << 63);
    assert!(MixedRadix::new(10, 19).is_ok());
    assert!(MixedRadix::new(10, 20).is_err());
}

#[test]
fn test_decode_most_significant_digit_first() {
    let radix = MixedRadix::new(3, 4).unwrap();

    assert_eq!(radix.decode(0).as_slice(), &[0, 0, 0, 0]);
    assert_eq!(radix.decode(1).as_slice(), &[0, 0, 0, 1]);
    assert_eq!(radix.decode(3).as_slice(), &[0, 0, 1, 0]);
    // 2*27 + 1*9 + 0*3 + 2
    assert_eq!(radix.decode(65).as_slice(), &[2, 1, 0, 2]);
    assert_eq!(radix.decode(80).as_slice(), &[2, 2, 2, 2]);
}

#[test]
fn test_decode_encode_bijection() {
    for (people, dishes) in [(1, 3), (2, 5), (3, 4), (5, 3), (4, 1)] {
        let radix = MixedRadix::new(people, dishes).unwrap();
        let mut seen = HashSet::new();

        for i in 0..radix.total() {
            let d = radix.decode(i);
            assert_eq!(d.len(), dishes);
            assert!(d.fits(people, dishes));
            assert_eq!(radix.encode(&d), i);
            assert!(seen.insert(d), "ordinal {i} decoded to a duplicate");
        }
        assert_eq!(seen.len() as u64, radix.total());
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn test_decode_past_end_panics() {
    let radix = MixedRadix::new(2, 2).unwrap();
    radix.decode(4);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_encode_invalid_digit_panics() {
    let radix = MixedRadix::new(2, 2).unwrap();
    radix.encode(&Distribution::new(vec![0, 2]));
}

#[test]
#[should_panic(expected = "wrong length")]
fn test_encode_wrong_length_panics() {
    let radix = MixedRadix::new(2, 2).unwrap();
    radix.encode(&Distribution::new(vec![0, 1, 1]));
}

#[test]
fn test_enumerator_matches_decode() {
    let radix = MixedRadix::new(3, 5).unwrap();
    let mut count = 0u64;

    for (ordinal, distribution) in radix.enumerate() {
        assert_eq!(ordinal, count);
        assert_eq!(distribution, radix.decode(ordinal));
        count += 1;
    }
    assert_eq!(count, 243);
}

#[test]
fn test_enumerator_range() {
    let radix = MixedRadix::new(2, 4).unwrap();
    let ordinals: Vec<u64> = radix.enumerate_range(5..9).map(|(i, _)| i).collect();
    assert_eq!(ordinals, vec![5, 6, 7, 8]);

    let mut it = radix.enumerate_range(14..100);
    assert_eq!(it.size_hint(), (2, Some(2)));
    assert_eq!(it.next().unwrap().1.as_slice(), &[1, 1, 1, 0]);
    assert_eq!(it.next().unwrap().1.as_slice(), &[1, 1, 1, 1]);
    assert!(it.next().is_none());
    assert!(it.next().is_none());

    assert_eq!(radix.enumerate_range(20..30).count(), 0);
}

#[test]
fn test_zero_dishes_yields_one_empty_distribution() {
    let radix = MixedRadix::new(3, 0).unwrap();
    let all: Vec<_> = radix.enumerate().collect();
    assert_eq!(all.len(), 1);
    assert!(all[0].1.is_empty());
}

#[test]
fn test_group_by_person() {
    let prefs = Preferences::from_json_str(
        r#"{"Alice": {"Pizza": 5, "Salad": 1, "Soup": 0}, "Bob": {}, "Carol": {}}"#,
    )
    .unwrap();
    let index = PreferenceIndex::build(&prefs).unwrap();

    // Pizza → Carol, Salad → Alice, Soup → Carol
    let d = Distribution::new(vec![2, 0, 2]);
    let groups = d.group_by_person(&index);

    assert_eq!(
        groups,
        vec![
            ("Alice", vec!["Salad"]),
            ("Bob", vec![]),
            ("Carol", vec!["Pizza", "Soup"]),
        ]
    );
    assert_eq!(d.dishes_of(2).collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(d.person_of(1), 0);
}

#[test]
#[should_panic(expected = "does not fit")]
fn test_group_by_person_rejects_mismatched_distribution() {
    let prefs = Preferences::from_json_str(r#"{"Alice": {"Pizza": 5}}"#).unwrap();
    let index = PreferenceIndex::build(&prefs).unwrap();
    Distribution::new(vec![1]).group_by_person(&index);
}
