//! Pure derivations over the query store's inputs.
//!
//! Every value here is a function of `(raw_users, search_text, city_filter,
//! page, page_size)` and nothing else. Results borrow from the raw list, so
//! a [`DerivedView`] never outlives the store snapshot it was computed from.

use crate::domain::UserRecord;
use std::collections::BTreeSet;

/// Snapshot of every derived value for one store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView<'a> {
    /// Unique cities across the raw list, ascending.
    pub distinct_cities: Vec<&'a str>,
    /// Raw users passing both filters, in source order.
    pub filtered_users: Vec<&'a UserRecord>,
    /// The current page of `filtered_users`.
    pub paged_users: Vec<&'a UserRecord>,
    /// `ceil(filtered_users.len() / page_size)`.
    pub page_count: usize,
    /// `filtered_users.len()`.
    pub total_matches: usize,
}

impl<'a> DerivedView<'a> {
    /// Computes the full view for the given inputs.
    #[must_use]
    pub fn compute(
        users: &'a [UserRecord],
        search_text: &str,
        city_filter: &str,
        page: usize,
        page_size: usize,
    ) -> Self {
        let _span = tracing::trace_span!(
            "derive_view",
            total_users = users.len(),
            query_len = search_text.len(),
            city = %city_filter,
            page = page
        )
        .entered();

        let filtered_users = filter_users(users, search_text, city_filter);
        let paged_users = page_slice(&filtered_users, page, page_size).to_vec();

        Self {
            distinct_cities: distinct_cities(users),
            page_count: page_count(filtered_users.len(), page_size),
            total_matches: filtered_users.len(),
            filtered_users,
            paged_users,
        }
    }
}

/// Returns the unique `address.city` values, sorted ascending.
#[must_use]
pub fn distinct_cities(users: &[UserRecord]) -> Vec<&str> {
    users
        .iter()
        .map(UserRecord::city)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keeps users whose name or email contains `search_text` (ignoring case) and
/// whose city equals `city_filter` when one is set.
#[must_use]
pub fn filter_users<'a>(
    users: &'a [UserRecord],
    search_text: &str,
    city_filter: &str,
) -> Vec<&'a UserRecord> {
    let needle = search_text.to_lowercase();

    users
        .iter()
        .filter(|user| user.matches_text(&needle))
        .filter(|user| city_filter.is_empty() || user.city() == city_filter)
        .collect()
}

/// Number of pages needed for `total` items; zero when there are none.
#[must_use]
pub const fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Returns the 1-based `page` of `items`.
///
/// Pages past the end yield an empty slice; page 0 is read as page 1.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::{user, users_in};

    #[test]
    fn cities_are_sorted_and_unique() {
        let users = users_in(&["Paris", "Oslo", "Paris", "Athens", "Oslo"]);
        assert_eq!(distinct_cities(&users), vec!["Athens", "Oslo", "Paris"]);
        assert!(distinct_cities(&[]).is_empty());
    }

    #[test]
    fn empty_search_matches_everyone() {
        let users = users_in(&["A", "B", "C"]);
        assert_eq!(filter_users(&users, "", "").len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_over_name_or_email() {
        let users = vec![
            user(1, "John Smith", "smith@x.com", "A"),
            user(2, "Alice", "a.john@x.com", "A"),
            user(3, "Bob", "bob@x.com", "A"),
        ];

        let ids: Vec<u64> = filter_users(&users, "JOHN", "").iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn city_filter_is_exact_and_combines_with_search() {
        let users = vec![
            user(1, "John", "j@x.com", "Paris"),
            user(2, "Johanna", "jo@x.com", "paris"),
            user(3, "Bob", "b@x.com", "Paris"),
        ];

        let ids: Vec<u64> = filter_users(&users, "jo", "Paris").iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn stale_city_filter_yields_nothing() {
        let users = users_in(&["A", "B"]);
        assert!(filter_users(&users, "", "Atlantis").is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(12, 5), 3);
    }

    #[test]
    fn page_slice_handles_last_and_out_of_range_pages() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(page_slice(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&items, 3, 5), &[11, 12]);
        assert!(page_slice(&items, 4, 5).is_empty());
        assert_eq!(page_slice(&items, 0, 5), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn paged_users_never_exceed_page_size() {
        let users = users_in(&["A"; 23]);
        for page in 1..=6 {
            let view = DerivedView::compute(&users, "", "", page, 5);
            assert!(view.paged_users.len() <= 5);
            if page < view.page_count {
                assert_eq!(view.paged_users.len(), 5);
            }
        }
    }
}
