//! Common utilities

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates, keeping the first occurrence of each item
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Items of `items` not contained in `exclude`, in input order
pub fn difference<T: Eq + Hash + Clone>(items: &[T], exclude: &HashSet<T>) -> Vec<T> {
    items
        .iter()
        .filter(|item| !exclude.contains(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_keeps_first_order() {
        let items = vec!["b", "a", "b", "c", "a"];
        assert_eq!(unique(&items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unique_empty() {
        let items: Vec<String> = Vec::new();
        assert!(unique(&items).is_empty());
    }

    #[test]
    fn test_difference() {
        let exclude: HashSet<&str> = ["a", "c"].into_iter().collect();
        assert_eq!(difference(&["a", "b", "c", "d"], &exclude), vec!["b", "d"]);
    }

    #[test]
    fn test_difference_nothing_missing() {
        let exclude: HashSet<&str> = ["a"].into_iter().collect();
        assert!(difference(&["a", "a"], &exclude).is_empty());
    }
}
