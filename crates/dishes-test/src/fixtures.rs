//! Preference fixtures.

use dishes_core::Preferences;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Two people, two dishes, one clearly best split.
///
/// Alice rates Pizza 5 and Salad 1, Bob rates Pizza 2 and Salad 4. The
/// best distribution gives Alice the pizza and Bob the salad, score 8.
pub fn alice_bob() -> Preferences {
    Preferences::new()
        .with_rating("Alice", "Pizza", 5.0)
        .with_rating("Alice", "Salad", 1.0)
        .with_rating("Bob", "Pizza", 2.0)
        .with_rating("Bob", "Salad", 4.0)
}

/// Three people, five dishes, sparse ratings with negatives.
///
/// Carol never rated Soup and nobody rated Cake except Dave.
pub fn lunch_party() -> Preferences {
    Preferences::new()
        .with_rating("Alice", "Curry", 4.0)
        .with_rating("Alice", "Salad", 2.5)
        .with_rating("Alice", "Soup", -1.0)
        .with_rating("Bob", "Curry", 1.0)
        .with_rating("Bob", "Salad", -2.0)
        .with_rating("Bob", "Soup", 3.0)
        .with_rating("Bob", "Tacos", 5.0)
        .with_rating("Carol", "Curry", 3.0)
        .with_rating("Carol", "Tacos", 2.0)
        .with_rating("Carol", "Salad", 4.0)
        .with_rating("Dave", "Cake", 6.0)
}

/// Seeded random preferences where every person rates every dish.
///
/// People are named `P00`, `P01`, ... and dishes `D00`, `D01`, ... so the
/// ordinals match the generation order. Ratings are whole numbers in
/// `-5..=10`.
pub fn generated(people: usize, dishes: usize, seed: u64) -> Preferences {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut prefs = Preferences::new();
    for p in 0..people {
        let person = format!("P{:02}", p);
        prefs.insert_person(person.clone());
        for d in 0..dishes {
            let rating = rng.random_range(-5i32..=10) as f64;
            prefs.insert(person.clone(), format!("D{:02}", d), rating);
        }
    }
    prefs
}

/// Serializes preferences to the JSON input format.
pub fn to_json(prefs: &Preferences) -> String {
    serde_json::to_string_pretty(prefs).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_is_reproducible() {
        assert_eq!(generated(3, 4, 9), generated(3, 4, 9));
        assert_ne!(generated(3, 4, 9), generated(3, 4, 10));
    }

    #[test]
    fn test_generated_is_dense() {
        let prefs = generated(2, 3, 1);
        assert_eq!(prefs.person_count(), 2);
        assert_eq!(prefs.dishes_of("P01").map(|d| d.len()), Some(3));
    }

    #[test]
    fn test_json_round_trip() {
        let prefs = lunch_party();
        assert_eq!(Preferences::from_json_str(&to_json(&prefs)).unwrap(), prefs);
    }
}
