//! Query engine - search, filter, sort, paginate
//!
//! One engine serves every listing surface: the storefront catalog,
//! the admin transaction table, and the derived seller/customer rows.
//! Evaluation is pure and stateless per call; it takes no locks and may
//! run fully in parallel across independent requests.

use rust_decimal::Decimal;
use shared::{QueryPage, QuerySpec, SortKey};

/// A collection element the engine can evaluate a [`QuerySpec`] against.
///
/// Implementors expose their text fields for search, plus named facet
/// and numeric fields for filters and sorting. Unknown keys return
/// `None`: a range filter on an absent field excludes the item, while
/// an absent sort value compares equal (stable order preserved).
pub trait Queryable {
    /// Text fields participating in free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Value for the single-select categorical filter
    fn category(&self) -> Option<&str> {
        None
    }

    /// Value for a named multi-select facet
    fn facet(&self, _key: &str) -> Option<String> {
        None
    }

    /// Value for a named numeric range filter
    fn numeric(&self, _key: &str) -> Option<Decimal> {
        None
    }

    /// Value for a sort key
    fn sort_value(&self, _key: SortKey) -> Option<Decimal> {
        None
    }
}

/// Evaluate a spec against a collection.
///
/// Filters apply in AND; the surviving set is stably sorted and then
/// paginated. `total_matched` always reflects the filtered,
/// unpaginated count. A page past the end yields an empty page, never
/// an error.
pub fn evaluate<T: Queryable + Clone>(collection: &[T], spec: &QuerySpec) -> QueryPage<T> {
    let mut matched: Vec<&T> = collection
        .iter()
        .filter(|item| matches_spec(*item, spec))
        .collect();

    if let Some(key) = spec.sort {
        sort_stable(&mut matched, key);
    }

    paginate(matched, spec)
}

fn matches_spec<T: Queryable>(item: &T, spec: &QuerySpec) -> bool {
    if let Some(needle) = &spec.search
        && !matches_search(item, needle)
    {
        return false;
    }

    if let Some(category) = &spec.category
        && item.category() != Some(category.as_str())
    {
        return false;
    }

    // Multi-select: empty selection means "no filter"
    for (facet, allowed) in &spec.selected {
        if allowed.is_empty() {
            continue;
        }
        match item.facet(facet) {
            Some(value) if allowed.contains(&value) => {}
            _ => return false,
        }
    }

    // Numeric ranges, inclusive on both ends
    for (field, range) in &spec.ranges {
        match item.numeric(field) {
            Some(value) if range.contains(value) => {}
            _ => return false,
        }
    }

    true
}

/// Free-text match: the full query as a substring of any field, OR any
/// individual word longer than one character contained in any field.
/// The OR-of-words widening is intentional - it trades precision for
/// recall on multi-word queries.
fn matches_search<T: Queryable>(item: &T, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let fields: Vec<String> = item
        .search_fields()
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    if fields.iter().any(|f| f.contains(&needle)) {
        return true;
    }

    needle
        .split_whitespace()
        .filter(|word| word.len() > 1)
        .any(|word| fields.iter().any(|f| f.contains(word)))
}

/// Stable sort by the key's direction; `None` values compare equal so
/// items without the field keep their prior relative order.
fn sort_stable<T: Queryable>(matched: &mut [&T], key: SortKey) {
    let ascending = matches!(key, SortKey::PriceAsc);
    matched.sort_by(|a, b| {
        let ord = match (a.sort_value(key), b.sort_value(key)) {
            (Some(va), Some(vb)) => va.cmp(&vb),
            _ => std::cmp::Ordering::Equal,
        };
        if ascending { ord } else { ord.reverse() }
    });
}

fn paginate<T: Clone>(matched: Vec<&T>, spec: &QuerySpec) -> QueryPage<T> {
    let total_matched = matched.len();
    let page_size = spec.page_size.max(1);
    let page = spec.page.max(1);
    let total_pages = (total_matched as u32).div_ceil(page_size);

    // Widen before multiplying; page comes straight off the wire
    let offset = (page as usize - 1) * page_size as usize;
    let items: Vec<T> = matched
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .cloned()
        .collect();

    QueryPage {
        items,
        total_matched,
        page,
        page_size,
        total_pages,
    }
}

#[cfg(test)]
mod tests;
