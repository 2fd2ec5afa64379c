//! Client-side search, filtering and pagination over a fetched collection

use crate::mutation::{self, MirrorOutcome, Mutation};
use crate::pagination::{PageWindow, clamp_page};
use console_types::{AppResult, Record};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Label of the option that disables a filter
pub const ALL_LABEL: &str = "All";

/// Select value of the option that disables a filter
pub const ALL_CHOICE: &str = "";

/// Selected value of one filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// No restriction
    #[default]
    All,
    /// Only records whose facet equals this value
    Is(String),
}

impl FilterValue {
    /// Interpret the value of a select control, where [`ALL_CHOICE`] means
    /// "no restriction"
    ///
    /// Values are trimmed the same way [`ListView::facet_values`] trims them.
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        let choice = choice.trim();
        if choice == ALL_CHOICE {
            Self::All
        } else {
            Self::Is(choice.to_string())
        }
    }

    /// Value to show in a select control
    #[must_use]
    pub fn as_choice(&self) -> &str {
        match self {
            Self::All => ALL_CHOICE,
            Self::Is(value) => value,
        }
    }
}

/// Search term, active filters and the requested page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring matched against the record's search fields
    pub search: String,

    /// Active filters by dimension; dimensions set to `All` are not stored
    pub filters: BTreeMap<String, FilterValue>,

    /// Requested page (1-based)
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            page: 1,
        }
    }
}

impl ListQuery {
    /// Whether a record passes the search term and every filter
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.matches_search(record) && self.matches_filters(record)
    }

    fn matches_search<T: Record>(&self, record: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_filters<T: Record>(&self, record: &T) -> bool {
        self.filters.iter().all(|(dimension, value)| match value {
            FilterValue::All => true,
            FilterValue::Is(expected) => {
                record.facet(dimension).as_deref().map(str::trim) == Some(expected.trim())
            }
        })
    }

    /// Current selection of a dimension
    #[must_use]
    pub fn filter(&self, dimension: &str) -> &FilterValue {
        const ALL: &FilterValue = &FilterValue::All;
        self.filters.get(dimension).unwrap_or(ALL)
    }
}

/// State of the primary collection fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The collection reflects the last successful fetch
    Loaded,
    /// The last fetch failed; the collection is what it was before
    Failed(String),
}

/// The rows a page renders
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSlice<T> {
    /// Rows of the current page, in collection order
    pub rows: Vec<T>,
    /// Displayed page (1 when nothing matches)
    pub page: usize,
    /// Number of pages, 0 when nothing matches
    pub total_pages: usize,
    /// Number of records passing search and filters
    pub total_filtered: usize,
    /// Whether the "no records" row should be shown
    pub is_empty: bool,
}

impl<T> VisibleSlice<T> {
    /// Whether a next page exists
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// A page's list: the fetched collection plus the user's query
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    collection: Vec<T>,
    query: ListQuery,
    page_size: usize,
    status: LoadStatus,
}

impl<T: Record> ListView<T> {
    /// Empty list with a fixed page size
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            collection: Vec::new(),
            query: ListQuery::default(),
            page_size: page_size.max(1),
            status: LoadStatus::Idle,
        }
    }

    /// The fetched collection, in response order
    #[must_use]
    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    /// Current query
    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch state
    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// Whether the "no records" row is shown: nothing matches and no fetch
    /// is in flight
    #[must_use]
    pub fn shows_no_records(&self) -> bool {
        !self.is_loading() && self.filtered_len() == 0
    }

    /// Message of the last failed fetch
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Mark a fetch as started
    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Replace the collection with a successful fetch
    pub fn replace_collection(&mut self, items: Vec<T>) {
        self.collection = items;
        self.status = LoadStatus::Loaded;
        self.clamp_to_filtered();
    }

    /// Record a failed fetch, keeping the previous collection
    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed(message.into());
    }

    /// Change the search term and go back to page 1
    pub fn apply_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.query.page = 1;
    }

    /// Change one filter and go back to page 1
    pub fn apply_filter(&mut self, dimension: impl Into<String>, value: FilterValue) {
        let dimension = dimension.into();
        match value {
            FilterValue::All => {
                self.query.filters.remove(&dimension);
            }
            value @ FilterValue::Is(_) => {
                self.query.filters.insert(dimension, value);
            }
        }
        self.query.page = 1;
    }

    /// Drop the search term and every filter
    pub fn clear_filters(&mut self) {
        self.query.search.clear();
        self.query.filters.clear();
        self.query.page = 1;
    }

    /// Jump to a page, clamped to the available pages; returns the page
    /// actually selected
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total_pages = self.filtered_len().div_ceil(self.page_size);
        self.query.page = clamp_page(page, total_pages);
        self.query.page
    }

    /// Records passing search and filters, pagination ignored
    pub fn filtered(&self) -> Vec<&T> {
        self.collection
            .iter()
            .filter(|record| self.query.matches(*record))
            .collect()
    }

    fn filtered_len(&self) -> usize {
        self.collection
            .iter()
            .filter(|record| self.query.matches(*record))
            .count()
    }

    /// Rows of the current page
    #[must_use]
    pub fn visible_slice(&self) -> VisibleSlice<T> {
        let filtered = self.filtered();
        let window = PageWindow::new(self.query.page, self.page_size, filtered.len());
        let rows = filtered
            .into_iter()
            .skip(window.offset())
            .take(window.per_page)
            .cloned()
            .collect::<Vec<_>>();

        VisibleSlice {
            is_empty: rows.is_empty(),
            rows,
            page: window.page,
            total_pages: window.total_pages(),
            total_filtered: window.total_items,
        }
    }

    /// Distinct trimmed values of a dimension across the whole collection,
    /// sorted
    pub fn facet_values(&self, dimension: &str) -> Vec<String> {
        self.collection
            .iter()
            .filter_map(|record| record.facet(dimension))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Mirror a confirmed mutation into the collection
    ///
    /// # Errors
    ///
    /// Fails if the server record carries no id.
    pub fn apply_mutation(&mut self, mutation: Mutation<T>) -> AppResult<MirrorOutcome> {
        let outcome = mutation::apply(&mut self.collection, mutation)?;
        self.clamp_to_filtered();
        Ok(outcome)
    }

    fn clamp_to_filtered(&mut self) {
        let total_pages = self.filtered_len().div_ceil(self.page_size);
        self.query.page = clamp_page(self.query.page, total_pages);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use console_types::RecordId;
    use console_types::entities::User;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn user(id: usize, name: &str, role: &str) -> User {
        User {
            id: Some(RecordId::from(id as u64)),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Some(role.to_string()),
            status: Some(if id % 2 == 0 { "active" } else { "inactive" }.to_string()),
            ..User::default()
        }
    }

    fn sample(count: usize) -> Vec<User> {
        let roles = ["student", "parent", "vendor"];
        (0..count)
            .map(|i| user(i, &format!("User{i}"), roles[i % roles.len()]))
            .collect()
    }

    fn loaded(count: usize, page_size: usize) -> ListView<User> {
        let mut view = ListView::new(page_size);
        view.replace_collection(sample(count));
        view
    }

    #[test]
    fn test_first_page() {
        let view = loaded(23, 10);
        let slice = view.visible_slice();

        assert_eq!(slice.rows.len(), 10);
        assert_eq!(slice.page, 1);
        assert_eq!(slice.total_pages, 3);
        assert_eq!(slice.total_filtered, 23);
        assert!(!slice.is_empty);
        assert!(slice.has_next());
        assert!(!slice.has_prev());
        assert_eq!(slice.rows[0].name, "User0");
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut view = loaded(23, 10);
        assert_eq!(view.go_to_page(3), 3);
        assert_eq!(view.visible_slice().rows.len(), 3);
        assert_eq!(view.go_to_page(99), 3);
        assert_eq!(view.go_to_page(0), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_resets_page() {
        let mut view = loaded(30, 5);
        view.go_to_page(4);
        view.apply_search("USER1");

        let slice = view.visible_slice();
        assert_eq!(view.query().page, 1);
        // User1, User10..User19
        assert_eq!(slice.total_filtered, 11);
    }

    #[test]
    fn test_search_matches_email() {
        let mut view = loaded(5, 10);
        view.apply_search("user3@example");
        let slice = view.visible_slice();
        assert_eq!(slice.rows.len(), 1);
        assert_eq!(slice.rows[0].name, "User3");
    }

    #[test]
    fn test_filters_combine_with_search() {
        let mut view = loaded(30, 10);
        view.go_to_page(2);
        view.apply_filter("role", FilterValue::Is("student".into()));
        assert_eq!(view.query().page, 1);

        view.apply_filter("status", FilterValue::Is("active".into()));
        view.apply_search("user1");

        let names: Vec<String> = view.visible_slice().rows.into_iter().map(|u| u.name).collect();
        // students are 0,3,6,...; active are even; "user1" prefix
        assert_eq!(names, vec!["User12", "User18"]);
    }

    #[test]
    fn test_all_sentinel_removes_filter() {
        let mut view = loaded(9, 10);
        view.apply_filter("role", FilterValue::Is("vendor".into()));
        assert_eq!(view.visible_slice().total_filtered, 3);

        view.apply_filter("role", FilterValue::from_choice(ALL_CHOICE));
        assert!(view.query().filters.is_empty());
        assert_eq!(view.visible_slice().total_filtered, 9);
    }

    #[test]
    fn test_every_facet_value_selects_its_records() {
        let mut records = sample(3);
        records[0].role = Some("mentor ".to_string());
        records[1].role = Some("All".to_string());
        records[2].role = Some("student".to_string());
        let mut view = ListView::new(10);
        view.replace_collection(records);

        let choices = view.facet_values("role");
        assert_eq!(choices, vec!["All", "mentor", "student"]);
        for choice in choices {
            view.apply_filter("role", FilterValue::from_choice(&choice));
            assert_eq!(view.query().filter("role").as_choice(), choice);
            assert_eq!(view.visible_slice().total_filtered, 1, "choice {choice:?}");
        }

        view.apply_filter("role", FilterValue::from_choice(ALL_CHOICE));
        assert_eq!(view.visible_slice().total_filtered, 3);
    }

    #[test]
    fn test_no_records_row_waits_for_the_fetch() {
        let mut view: ListView<User> = ListView::new(10);
        view.begin_load();
        assert!(!view.shows_no_records());

        view.replace_collection(Vec::new());
        assert!(view.shows_no_records());

        view.replace_collection(sample(2));
        view.apply_search("nobody");
        assert!(view.shows_no_records());
    }

    #[test]
    fn test_empty_collection_shows_no_records() {
        let view: ListView<User> = ListView::new(10);
        let slice = view.visible_slice();

        assert!(slice.is_empty);
        assert!(slice.rows.is_empty());
        assert_eq!(slice.page, 1);
        assert_eq!(slice.total_pages, 0);
    }

    #[test]
    fn test_failed_load_keeps_collection() {
        let mut view = loaded(4, 10);
        view.begin_load();
        assert!(view.is_loading());

        view.fail_load("Request failed with status 500");
        assert_eq!(view.collection().len(), 4);
        assert_eq!(view.error(), Some("Request failed with status 500"));
        assert!(!view.is_loading());
    }

    #[test]
    fn test_facet_values_are_distinct_and_sorted() {
        let view = loaded(7, 10);
        assert_eq!(view.facet_values("role"), vec!["parent", "student", "vendor"]);
        assert!(view.facet_values("unknown").is_empty());
    }

    #[test]
    fn test_deleting_last_row_of_last_page_moves_back() {
        let mut view = loaded(11, 10);
        view.go_to_page(2);
        view.apply_mutation(Mutation::Deleted(RecordId::from(10u64)))
            .unwrap();

        assert_eq!(view.query().page, 1);
        assert_eq!(view.visible_slice().rows.len(), 10);
    }

    #[test]
    fn test_clear_filters() {
        let mut view = loaded(6, 2);
        view.apply_search("User5");
        view.apply_filter("role", FilterValue::Is("parent".into()));
        view.clear_filters();

        assert_eq!(view.query(), &ListQuery::default());
        assert_eq!(view.visible_slice().total_filtered, 6);
    }

    proptest! {
        #[test]
        fn prop_visible_slice_is_page_of_filtered(
            count in 0usize..80,
            page_size in 1usize..15,
            page in 0usize..20,
            term in "[uU]?[sS]?[eE]?[rR]?[0-9]?",
            role_filter in proptest::option::of(prop_oneof!["student", "parent", "vendor"]),
        ) {
            let mut view = loaded(count, page_size);
            view.apply_search(term);
            if let Some(role) = role_filter {
                view.apply_filter("role", FilterValue::Is(role));
            }
            view.go_to_page(page);

            let filtered: Vec<User> = view.filtered().into_iter().cloned().collect();
            let slice = view.visible_slice();

            prop_assert!(slice.rows.len() <= page_size);
            prop_assert!(slice.rows.iter().all(|row| filtered.contains(row)));
            prop_assert_eq!(slice.total_filtered, filtered.len());
            prop_assert_eq!(slice.total_pages, filtered.len().div_ceil(page_size));
            prop_assert!(slice.page >= 1);
            prop_assert_eq!(slice.is_empty, filtered.is_empty());

            // Same state, same slice
            prop_assert_eq!(&view.visible_slice(), &slice);
        }

        #[test]
        fn prop_query_changes_reset_page(
            count in 0usize..60,
            page in 1usize..10,
            term in "[a-z0-9]{0,4}",
        ) {
            let mut view = loaded(count, 5);
            view.go_to_page(page);
            view.apply_search(term);
            prop_assert_eq!(view.query().page, 1);

            view.go_to_page(page);
            view.apply_filter("status", FilterValue::Is("active".to_string()));
            prop_assert_eq!(view.query().page, 1);
        }
    }
}
