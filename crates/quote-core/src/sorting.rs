//! # Sort Engine
//!
//! Display order of scope items in the pricing modal and on the exported
//! quotation.
//!
//! ## Ordering Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compare(a, b)                                                          │
//! │                                                                         │
//! │  1. Both units ranked?        → priority position (SQM < PCS < KG)      │
//! │  2. Only one ranked?          → ranked item first                       │
//! │  3. Both units present?       → upper-cased unit, lexicographic         │
//! │  4. Only one has a unit?      → item with a unit first                  │
//! │  5. Still tied (incl. equal   → category, then description, then id     │
//! │     units)                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 5 makes this a total order, so the output does not depend on the
//! input order and re-sorting is a no-op.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::ScopeItem;
use crate::DEFAULT_UNIT_ORDER;

// =============================================================================
// Unit Priority
// =============================================================================

/// Ranked list of units of measure. Earlier entries sort first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UnitPriority {
    units: Vec<String>,
}

impl UnitPriority {
    /// Builds a priority list. Units are trimmed and upper-cased; blank
    /// entries are dropped.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::UnitPriority;
    ///
    /// let priority = UnitPriority::new(["sqm", "pcs"]);
    /// assert_eq!(priority.rank("SQM"), Some(0));
    /// assert_eq!(priority.rank("PCS"), Some(1));
    /// assert_eq!(priority.rank("KG"), None);
    /// ```
    pub fn new<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        UnitPriority {
            units: units
                .into_iter()
                .map(|u| u.as_ref().trim().to_uppercase())
                .filter(|u| !u.is_empty())
                .collect(),
        }
    }

    /// Position of an already normalized unit, `None` when unranked.
    pub fn rank(&self, normalized_unit: &str) -> Option<usize> {
        self.units.iter().position(|u| u == normalized_unit)
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }
}

impl Default for UnitPriority {
    fn default() -> Self {
        UnitPriority::new(DEFAULT_UNIT_ORDER)
    }
}

impl From<Vec<String>> for UnitPriority {
    fn from(units: Vec<String>) -> Self {
        UnitPriority::new(units)
    }
}

impl From<UnitPriority> for Vec<String> {
    fn from(priority: UnitPriority) -> Self {
        priority.units
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Compares two items for display. See the module docs for the rules.
pub fn compare_items(a: &ScopeItem, b: &ScopeItem, priority: &UnitPriority) -> Ordering {
    let unit_a = a.normalized_unit();
    let unit_b = b.normalized_unit();

    compare_units(unit_a.as_deref(), unit_b.as_deref(), priority)
        .then_with(|| a.category.cmp(&b.category))
        .then_with(|| a.description.cmp(&b.description))
        .then_with(|| a.id.cmp(&b.id))
}

fn compare_units(a: Option<&str>, b: Option<&str>, priority: &UnitPriority) -> Ordering {
    let rank_a = a.and_then(|u| priority.rank(u));
    let rank_b = b.and_then(|u| priority.rank(u));

    match (rank_a, rank_b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a, b) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Returns a new, display-ordered copy of `items`. The input is untouched.
///
/// ## Example
/// ```rust
/// use quote_core::{sort_items_by_unit, ScopeItem, UnitPriority};
///
/// let items = vec![
///     ScopeItem::new("1", "Bolts", "STEEL", "10", Some("kg"), "P1"),
///     ScopeItem::new("2", "Tiles", "FLOORING", "20", Some("sqm"), "P2"),
/// ];
/// let sorted = sort_items_by_unit(&items, &UnitPriority::default());
/// assert_eq!(sorted[0].id, "2");
/// assert_eq!(items[0].id, "1");
/// ```
pub fn sort_items_by_unit(items: &[ScopeItem], priority: &UnitPriority) -> Vec<ScopeItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_items(a, b, priority));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, unit: Option<&str>, category: &str, description: &str) -> ScopeItem {
        ScopeItem::new(id, description, category, "1", unit, format!("P{}", id))
    }

    fn ids(items: &[ScopeItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_priority_order() {
        let priority = UnitPriority::new(["SQM", "PCS", "KG"]);
        let items = vec![
            item("1", Some("PCS"), "A", "a"),
            item("2", Some("sqm"), "A", "a"),
            item("3", Some("Kg"), "A", "a"),
        ];
        assert_eq!(ids(&sort_items_by_unit(&items, &priority)), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_ranked_before_unranked_before_missing() {
        let priority = UnitPriority::new(["SQM"]);
        let items = vec![
            item("1", None, "A", "a"),
            item("2", Some("zone"), "A", "a"),
            item("3", Some("bag"), "A", "a"),
            item("4", Some("sqm"), "A", "a"),
            item("5", Some(""), "A", "a"),
        ];
        let sorted = sort_items_by_unit(&items, &priority);
        // BAG < ZONE lexicographically; blank unit counts as missing
        assert_eq!(ids(&sorted), vec!["4", "3", "2", "1", "5"]);
    }

    #[test]
    fn test_equal_units_fall_back_to_category_then_description() {
        let priority = UnitPriority::default();
        let items = vec![
            item("1", Some("sqm"), "PAINT", "Walls"),
            item("2", Some("SQM"), "FLOORING", "Tiles"),
            item("3", Some("Sqm"), "FLOORING", "Screed"),
        ];
        assert_eq!(ids(&sort_items_by_unit(&items, &priority)), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_identical_rows_ordered_by_id() {
        let priority = UnitPriority::default();
        let items = vec![item("b", None, "X", "same"), item("a", None, "X", "same")];
        assert_eq!(ids(&sort_items_by_unit(&items, &priority)), vec!["a", "b"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let priority = UnitPriority::default();
        let items = vec![item("1", Some("kg"), "A", "a"), item("2", Some("sqm"), "A", "a")];
        let before = items.clone();
        let _ = sort_items_by_unit(&items, &priority);
        assert_eq!(items, before);
    }

    #[test]
    fn test_priority_serde_normalizes() {
        let priority: UnitPriority = serde_json::from_str(r#"["sqm", " pcs ", ""]"#).unwrap();
        assert_eq!(priority.units(), &["SQM".to_string(), "PCS".to_string()]);
    }
}
