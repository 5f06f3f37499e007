//! # Field Sets and Filters
//!
//! Ordered attribute→value maps, created per call and discarded after the
//! statement executes. A [`FieldSet`] feeds INSERT column lists and UPDATE
//! SET clauses; a [`Filter`] feeds WHERE equality predicates.
//!
//! ## Ordering
//! Entries keep insertion order. Setting the same attribute twice replaces
//! the value in place, so the column order of the generated statement is
//! stable and matches the first time each attribute was supplied.
//!
//! ## The match-all sentinel
//! An UPDATE with an empty filter would target every row in the table.
//! That is almost never intended, so empty filters are rejected by the
//! repository layer unless the caller opts in explicitly:
//!
//! ```rust
//! use forge_core::Filter;
//!
//! let everything = Filter::match_all();
//! assert!(everything.is_match_all());
//! ```

use crate::value::FieldValue;

// =============================================================================
// Field Set
// =============================================================================

/// An ordered attribute → value mapping for INSERT/UPDATE clauses.
///
/// ## Example
/// ```rust
/// use forge_core::FieldSet;
///
/// let fields = FieldSet::new()
///     .set("amount", 1000)
///     .set("purpose", "Test");
///
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, FieldValue)>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        FieldSet {
            entries: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value in place.
    ///
    /// Attributes use the domain's camelCase vocabulary; the repository
    /// layer maps them to storage columns.
    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let attribute = attribute.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(a, _)| *a == attribute) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((attribute, value)),
        }
        self
    }

    /// Returns the value for an attribute, if supplied.
    pub fn get(&self, attribute: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(a, _)| a == attribute)
            .map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(a, v)| (a.as_str(), v))
    }

    /// Number of supplied attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no attribute was supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Filter
// =============================================================================

/// An equality-AND predicate over domain attributes.
///
/// Each entry becomes `column = $n` (or `column IS NULL` for a
/// [`FieldValue::Null`] value); entries are ANDed together.
///
/// ## Example
/// ```rust
/// use forge_core::Filter;
///
/// // WHERE tool_id = $1 AND returned_at IS NULL
/// let open = Filter::new()
///     .eq("toolId", 7)
///     .eq("returnedAt", None::<&str>);
/// assert_eq!(open.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: FieldSet,
    match_all: bool,
}

impl Filter {
    /// Creates an empty filter.
    ///
    /// For `find`/`find_count` an empty filter matches every row. For
    /// `update` it is rejected; use [`Filter::match_all`] to target the
    /// whole table on purpose.
    pub fn new() -> Self {
        Filter {
            fields: FieldSet::new(),
            match_all: false,
        }
    }

    /// The explicit whole-table sentinel.
    pub fn match_all() -> Self {
        Filter {
            fields: FieldSet::new(),
            match_all: true,
        }
    }

    /// Adds an equality predicate. `None` values compile to `IS NULL`.
    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields = self.fields.set(attribute, value);
        self
    }

    /// The underlying predicate entries.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// True when the caller explicitly opted into matching every row.
    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    /// True when no predicate was supplied (and this is not the sentinel).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.match_all
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set_keeps_insertion_order() {
        let fields = FieldSet::new()
            .set("firstName", "Ada")
            .set("lastName", "Lovelace")
            .set("email", "ada@example.com");

        let attrs: Vec<&str> = fields.iter().map(|(a, _)| a).collect();
        assert_eq!(attrs, vec!["firstName", "lastName", "email"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let fields = FieldSet::new()
            .set("amount", 100)
            .set("purpose", "Test")
            .set("amount", 500);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("amount"), Some(&FieldValue::Integer(500)));

        // Position of the replaced attribute is unchanged
        let attrs: Vec<&str> = fields.iter().map(|(a, _)| a).collect();
        assert_eq!(attrs, vec!["amount", "purpose"]);
    }

    #[test]
    fn test_empty_filter_vs_match_all() {
        let empty = Filter::new();
        assert!(empty.is_empty());
        assert!(!empty.is_match_all());

        let all = Filter::match_all();
        assert!(!all.is_empty());
        assert!(all.is_match_all());
    }

    #[test]
    fn test_filter_null_predicate() {
        let filter = Filter::new().eq("returnedAt", None::<&str>);
        assert_eq!(
            filter.fields().get("returnedAt"),
            Some(&FieldValue::Null)
        );
    }
}
