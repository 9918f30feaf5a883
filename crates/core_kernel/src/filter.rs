//! List filtering primitives
//!
//! List pages narrow their snapshot with two predicates that are always
//! combined with AND: a free-text search and a selector that is either
//! "all" or one exact value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Case-insensitive substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A status/type selector that is either unset ("all") or one exact value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

/// A predicate over one kind of list item
pub trait ListFilter {
    type Item: Clone;

    fn matches(&self, item: &Self::Item) -> bool;

    /// True when the filter would hide anything at all
    fn is_active(&self) -> bool;

    /// Returns the matching items in their original order
    fn apply(&self, items: &[Self::Item]) -> Vec<Self::Item> {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Basement FLOOD damage", "flood"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("fire", "flood"));
    }

    #[test]
    fn test_selector_admits() {
        assert!(Selector::<u8>::All.admits(&3));
        assert!(Selector::Only(3u8).admits(&3));
        assert!(!Selector::Only(3u8).admits(&4));
    }

    #[test]
    fn test_selector_parses_all_case_insensitively() {
        assert_eq!("ALL".parse::<Selector<u8>>().unwrap(), Selector::All);
        assert_eq!("5".parse::<Selector<u8>>().unwrap(), Selector::Only(5));
        assert!("x".parse::<Selector<u8>>().is_err());
    }
}
