//! Human- and machine-readable rankings.
//!
//! Text output prints three lines per solution, best first:
//!
//! ```text
//! #1
//! Alice: [Pizza], Bob: [Salad]
//! score: 8
//! ```
//!
//! JSON output is an array of `{rank, distribution, score}` objects where
//! `distribution` maps every person to the dishes they receive.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use dishes_core::{PreferenceIndex, Solution};
use serde::Serialize;

/// One ranked solution with ordinals resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSolution<'a> {
    /// 1-based rank.
    pub rank: usize,
    /// Person → dishes received. Every person appears.
    pub distribution: BTreeMap<&'a str, Vec<&'a str>>,
    pub score: f64,
}

/// Resolves `solutions` (best first) against `index`.
pub fn ranked<'a>(index: &'a PreferenceIndex, solutions: &[Solution]) -> Vec<RankedSolution<'a>> {
    solutions
        .iter()
        .enumerate()
        .map(|(i, solution)| RankedSolution {
            rank: i + 1,
            distribution: solution
                .distribution()
                .group_by_person(index)
                .into_iter()
                .collect(),
            score: solution.score(),
        })
        .collect()
}

/// Formats one person → dishes mapping as `Alice: [Pizza], Bob: [Salad]`.
pub fn format_distribution(groups: &[(&str, Vec<&str>)]) -> String {
    let mut out = String::new();
    for (i, (person, dishes)) in groups.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}: [{}]", person, dishes.join(", "));
    }
    out
}

/// Renders the text report.
pub fn to_text(index: &PreferenceIndex, solutions: &[Solution]) -> String {
    let mut out = String::new();
    for (i, solution) in solutions.iter().enumerate() {
        let groups = solution.distribution().group_by_person(index);
        let _ = writeln!(out, "#{}", i + 1);
        let _ = writeln!(out, "{}", format_distribution(&groups));
        let _ = writeln!(out, "score: {}", solution.score());
    }
    out
}

/// Writes the text report to `writer`.
pub fn write_text<W: Write>(
    writer: &mut W,
    index: &PreferenceIndex,
    solutions: &[Solution],
) -> io::Result<()> {
    writer.write_all(to_text(index, solutions).as_bytes())
}

/// Writes the JSON report to `writer`, followed by a newline.
pub fn write_json<W: Write>(
    writer: &mut W,
    index: &PreferenceIndex,
    solutions: &[Solution],
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &ranked(index, solutions))?;
    writeln!(writer).map_err(serde_json::Error::io)
}
