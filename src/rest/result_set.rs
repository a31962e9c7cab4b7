//! Ordered result sets with derived id cursors.

use std::ops::Deref;

/// Anything that may carry a numeric id.
pub trait Identified {
    /// Returns the id, if present.
    fn id(&self) -> Option<i64>;
}

/// An ordered list of parsed entities.
///
/// Besides the items themselves a result set exposes two cursors derived from
/// the ids present:
///
/// - `max_id`: the smallest id minus one
/// - `since_id`: the largest id
///
/// Both are `None` when no item carries an id. A cursor given explicitly at
/// construction takes precedence over the derived value.
///
/// `ResultSet` dereferences to `Vec<T>`, so slices, iteration and indexing
/// work directly.
///
/// # Example
///
/// ```rust
/// use ringplus::rest::{ApiRef, Model, ResultSet};
/// use ringplus::Account;
/// use serde_json::json;
///
/// let accounts = Account::parse_list(
///     &ApiRef::detached(),
///     &json!({"accounts": [{"id": 3}, {"id": 1}, {"id": 2}]}),
/// )
/// .unwrap();
///
/// assert_eq!(accounts.len(), 3);
/// assert_eq!(accounts.max_id(), Some(0));
/// assert_eq!(accounts.since_id(), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSet<T> {
    items: Vec<T>,
    max_id: Option<i64>,
    since_id: Option<i64>,
}

impl<T> ResultSet<T> {
    /// Creates a result set whose cursors are derived from the items.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            max_id: None,
            since_id: None,
        }
    }

    /// Creates a result set with explicit cursor overrides.
    #[must_use]
    pub const fn with_cursors(items: Vec<T>, max_id: Option<i64>, since_id: Option<i64>) -> Self {
        Self {
            items,
            max_id,
            since_id,
        }
    }

    /// Consumes the set and returns the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Maps every item, keeping order and cursor overrides.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultSet<U> {
        ResultSet {
            items: self.items.into_iter().map(f).collect(),
            max_id: self.max_id,
            since_id: self.since_id,
        }
    }

    /// Maps every item fallibly, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<ResultSet<U>, E> {
        Ok(ResultSet {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            max_id: self.max_id,
            since_id: self.since_id,
        })
    }
}

impl<T: Identified> ResultSet<T> {
    /// Returns the ids of the items that carry one, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().filter_map(Identified::id).collect()
    }

    /// Returns the explicit override, or the smallest id minus one.
    ///
    /// `None` if the smallest id is `i64::MIN`, since no older page exists.
    #[must_use]
    pub fn max_id(&self) -> Option<i64> {
        self.max_id
            .or_else(|| self.ids().into_iter().min().and_then(|id| id.checked_sub(1)))
    }

    /// Returns the explicit override, or the largest id.
    #[must_use]
    pub fn since_id(&self) -> Option<i64> {
        self.since_id.or_else(|| self.ids().into_iter().max())
    }
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Deref for ResultSet<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(Option<i64>);

    impl Identified for Item {
        fn id(&self) -> Option<i64> {
            self.0
        }
    }

    #[test]
    fn test_cursors_are_derived_from_ids() {
        let set = ResultSet::new(vec![Item(Some(3)), Item(Some(1)), Item(Some(2))]);
        assert_eq!(set.max_id(), Some(0));
        assert_eq!(set.since_id(), Some(3));
        assert_eq!(set.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_set_has_no_cursors() {
        let set: ResultSet<Item> = ResultSet::default();
        assert!(set.is_empty());
        assert_eq!(set.max_id(), None);
        assert_eq!(set.since_id(), None);
    }

    #[test]
    fn test_items_without_ids_are_skipped() {
        let set = ResultSet::new(vec![Item(None), Item(Some(10)), Item(None)]);
        assert_eq!(set.max_id(), Some(9));
        assert_eq!(set.since_id(), Some(10));

        let set = ResultSet::new(vec![Item(None)]);
        assert_eq!(set.max_id(), None);
    }

    #[test]
    fn test_max_id_at_lowest_id_does_not_overflow() {
        let set = ResultSet::new(vec![Item(Some(4)), Item(Some(i64::MIN))]);
        assert_eq!(set.max_id(), None);
        assert_eq!(set.since_id(), Some(4));

        let set = ResultSet::new(vec![Item(Some(i64::MIN + 1))]);
        assert_eq!(set.max_id(), Some(i64::MIN));
    }

    #[test]
    fn test_explicit_cursors_win() {
        let set = ResultSet::with_cursors(vec![Item(Some(5))], Some(0), Some(99));
        assert_eq!(set.max_id(), Some(0));
        assert_eq!(set.since_id(), Some(99));

        let mapped = set.map(|item| Item(item.0.map(|id| id * 2)));
        assert_eq!(mapped.max_id(), Some(0));
        assert_eq!(mapped.ids(), vec![10]);
    }

    #[test]
    fn test_try_map_stops_on_error() {
        let set = ResultSet::new(vec![Item(Some(1)), Item(None)]);
        let result: Result<ResultSet<i64>, &str> =
            set.try_map(|item| item.0.ok_or("missing"));
        assert_eq!(result.unwrap_err(), "missing");
    }
}
