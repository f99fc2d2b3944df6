//! Category-name ingestion normalization.
//!
//! Raw category input arrives from two sources (caller requests and the
//! external provider) and is funneled through [`normalize_category_names`]
//! before it touches storage, so the unique-name constraint always operates
//! on canonical values.

use std::collections::HashSet;

/// Normalize raw category-name input into its canonical form.
///
/// Returns `None` when no list was supplied, or when every entry filters out
/// after trimming. Otherwise returns a trimmed, lower-cased, deduplicated
/// sequence preserving first-seen order.
///
/// An empty or all-whitespace list therefore reads as "no change requested",
/// not "clear all categories" — callers never observe an empty sequence.
/// Whether an explicit empty array should instead clear the set is
/// deliberately left open; see DESIGN.md.
pub fn normalize_category_names(names: Option<&[String]>) -> Option<Vec<String>> {
    let names = names?;
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for raw in names {
        let canonical = raw.trim().to_lowercase();
        if canonical.is_empty() {
            continue;
        }
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_none_input_is_none() {
        assert_eq!(normalize_category_names(None), None);
    }

    #[test]
    fn test_empty_list_collapses_to_none() {
        assert_eq!(normalize_category_names(Some(&[])), None);
    }

    #[test]
    fn test_whitespace_only_entries_collapse_to_none() {
        let input = strings(&["   ", "\t", ""]);
        assert_eq!(normalize_category_names(Some(&input)), None);
    }

    #[test]
    fn test_trims_and_lowercases() {
        let input = strings(&["  Grass ", "POISON"]);
        assert_eq!(
            normalize_category_names(Some(&input)),
            Some(strings(&["grass", "poison"]))
        );
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let input = strings(&["Fire", "water", "FIRE", " fire "]);
        assert_eq!(
            normalize_category_names(Some(&input)),
            Some(strings(&["fire", "water"]))
        );
    }

    #[test]
    fn test_case_variants_collapse_to_one() {
        let input = strings(&["Grass", "grass"]);
        assert_eq!(
            normalize_category_names(Some(&input)),
            Some(strings(&["grass"]))
        );
    }
}
