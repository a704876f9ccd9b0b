//! Fuzzy name matching between watchlist display names and scraped
//! fundamentals keys.
//!
//! Both sides are normalized (lowercase, punctuation stripped, generic
//! suffix words dropped) and a match requires at least two overlapping
//! significant words. Below that threshold the instrument is treated as
//! unmatched rather than guessed.

use std::collections::BTreeMap;

use crate::FundamentalSnapshot;

/// Scraped whole-market snapshot keyed by normalized-ish source name.
pub type FundamentalsTable = BTreeMap<String, FundamentalSnapshot>;

/// Minimum overlapping significant words to accept a match.
pub const MIN_WORD_OVERLAP: usize = 2;

/// Words too generic to count toward an overlap.
const GENERIC_WORDS: [&str; 5] = ["reit", "trust", "ltd", "limited", "the"];

/// Lowercased significant words of a display name.
pub fn significant_words(name: &str) -> Vec<String> {
    name.to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|word| word.len() >= 2 && !GENERIC_WORDS.contains(word))
        .map(str::to_owned)
        .collect()
}

/// Finds the best fundamentals row for `display_name`.
///
/// Highest overlap wins; ties resolve to the lexicographically first key
/// (the table is a `BTreeMap`, so the scan order is deterministic).
pub fn match_fundamentals<'a>(
    display_name: &str,
    table: &'a FundamentalsTable,
) -> Option<&'a FundamentalSnapshot> {
    let name_words = significant_words(display_name);
    if name_words.is_empty() {
        return None;
    }

    let mut best: Option<(usize, &FundamentalSnapshot)> = None;
    for (key, snapshot) in table {
        let key_words = significant_words(key);
        let overlap = name_words
            .iter()
            .filter(|word| key_words.contains(word))
            .count();

        if overlap >= MIN_WORD_OVERLAP && best.map_or(true, |(count, _)| overlap > count) {
            best = Some((overlap, snapshot));
        }
    }

    best.map(|(_, snapshot)| snapshot)
}
