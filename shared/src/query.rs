//! Query specification value object
//!
//! One `QuerySpec` carries everything a listing request needs: the
//! free-text search, categorical and multi-select filters, numeric
//! ranges, sort order, and pagination. Storefront listing pages and
//! admin tables build the same object and hand it to the query engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Fixed set of sort keys
///
/// Every key maps to an explicit numeric field on the item; nothing is
/// synthesized at sort time, so re-sorting is deterministic and ties
/// keep their prior relative order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    PopularityDesc,
    DiscountDesc,
    Newest,
}

/// Inclusive numeric range filter
///
/// An item passes iff `min <= value <= max` for the bounds that are
/// present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeFilter {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<Decimal>,
}

impl RangeFilter {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// Inclusive membership test
    pub fn contains(&self, value: Decimal) -> bool {
        if let Some(min) = self.min
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max
            && value > max
        {
            return false;
        }
        true
    }
}

/// Full parameter set for one query
///
/// Immutable once constructed in spirit: handlers build it per request
/// and discard it after evaluation. Mutating helpers exist for callers
/// that refine a spec step by step (e.g. UI state), and
/// [`QuerySpec::clear_filters`] resets everything in a single
/// operation so pagination can never be left on a stale page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuerySpec {
    /// Case-insensitive free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Single-select categorical filter; selecting replaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Multi-select filters: facet key -> allowed values.
    /// An empty value set means "no filter", never "exclude all".
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected: BTreeMap<String, BTreeSet<String>>,
    /// Numeric range filters keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ranges: BTreeMap<String, RangeFilter>,
    /// Sort order; `None` keeps the collection's prior order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    /// 1-indexed page number
    pub page: u32,
    pub page_size: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            selected: BTreeMap::new(),
            ranges: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    /// Select a category, replacing any previous selection
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a value to a multi-select facet
    pub fn with_selection(mut self, facet: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected.entry(facet.into()).or_default().insert(value.into());
        self
    }

    pub fn with_range(mut self, field: impl Into<String>, range: RangeFilter) -> Self {
        self.ranges.insert(field.into(), range);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Reset search, every filter, sort, and pagination in one step.
    ///
    /// Page size is preserved; the page pointer returns to 1 so a
    /// narrowed result set can never show an out-of-range page.
    pub fn clear_filters(&mut self) {
        self.search = None;
        self.category = None;
        self.selected.clear();
        self.ranges.clear();
        self.sort = None;
        self.page = 1;
    }
}

/// One page of query results plus the unpaginated match count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    /// Filtered-but-unpaginated count; callers derive total pages
    pub total_matched: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> QueryPage<T> {
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_matched: 0,
            page,
            page_size,
            total_pages: 0,
        }
    }
}
