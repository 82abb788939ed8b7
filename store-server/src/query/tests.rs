use super::*;
use rust_decimal_macros::dec;
use shared::RangeFilter;

// ========================================================================
// Fixture: a minimal queryable record
// ========================================================================

#[derive(Debug, Clone, PartialEq)]
struct Gadget {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    price: Decimal,
    rating: Decimal,
}

impl Queryable for Gadget {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name, self.brand]
    }

    fn category(&self) -> Option<&str> {
        Some(self.category)
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "brand" => Some(self.brand.to_string()),
            _ => None,
        }
    }

    fn numeric(&self, key: &str) -> Option<Decimal> {
        match key {
            "price" => Some(self.price),
            "rating" => Some(self.rating),
            _ => None,
        }
    }

    fn sort_value(&self, key: SortKey) -> Option<Decimal> {
        match key {
            SortKey::PriceAsc | SortKey::PriceDesc => Some(self.price),
            SortKey::RatingDesc => Some(self.rating),
            _ => None,
        }
    }
}

fn gadget(
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    price: Decimal,
    rating: Decimal,
) -> Gadget {
    Gadget {
        id,
        name,
        brand,
        category,
        price,
        rating,
    }
}

fn fixture() -> Vec<Gadget> {
    vec![
        gadget("g1", "Wireless Mouse", "Acme", "peripherals", dec!(25.00), dec!(4.5)),
        gadget("g2", "Wireless Keyboard", "Acme", "peripherals", dec!(45.00), dec!(4.2)),
        gadget("g3", "USB Hub", "Nimbus", "peripherals", dec!(25.00), dec!(3.9)),
        gadget("g4", "Desk Lamp", "Lumen", "lighting", dec!(30.00), dec!(4.8)),
        gadget("g5", "Monitor Stand", "Nimbus", "furniture", dec!(60.00), dec!(4.2)),
    ]
}

fn ids(page: &QueryPage<Gadget>) -> Vec<&'static str> {
    page.items.iter().map(|g| g.id).collect()
}

// ========================================================================
// Search
// ========================================================================

#[test]
fn search_is_case_insensitive_substring() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_search("wIRELESS"));
    assert_eq!(ids(&page), vec!["g1", "g2"]);
}

#[test]
fn search_matches_any_field() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_search("nimbus"));
    assert_eq!(ids(&page), vec!["g3", "g5"]);
}

#[test]
fn multi_word_search_widens_with_or() {
    // Neither item contains the full phrase, but each contains one word
    let page = evaluate(&fixture(), &QuerySpec::default().with_search("lamp hub"));
    assert_eq!(ids(&page), vec!["g3", "g4"]);
}

#[test]
fn single_character_words_are_ignored_in_or_pass() {
    // "x" alone matches nothing; the full phrase "x lamp" is not a
    // substring either, so only the word "lamp" can hit
    let page = evaluate(&fixture(), &QuerySpec::default().with_search("x lamp"));
    assert_eq!(ids(&page), vec!["g4"]);
}

#[test]
fn blank_search_matches_everything() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_search("   "));
    assert_eq!(page.total_matched, 5);
}

// ========================================================================
// Filters
// ========================================================================

#[test]
fn category_is_exact_single_select() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_category("lighting"));
    assert_eq!(ids(&page), vec!["g4"]);
}

#[test]
fn multi_select_is_membership() {
    let spec = QuerySpec::default()
        .with_selection("brand", "Acme")
        .with_selection("brand", "Lumen");
    let page = evaluate(&fixture(), &spec);
    assert_eq!(ids(&page), vec!["g1", "g2", "g4"]);
}

#[test]
fn empty_multi_select_means_no_filter() {
    let mut spec = QuerySpec::default();
    spec.selected.insert("brand".to_string(), Default::default());
    let page = evaluate(&fixture(), &spec);
    assert_eq!(page.total_matched, 5);
}

#[test]
fn range_bounds_are_inclusive() {
    let spec = QuerySpec::default().with_range(
        "price",
        RangeFilter {
            min: Some(dec!(25.00)),
            max: Some(dec!(30.00)),
        },
    );
    let page = evaluate(&fixture(), &spec);
    assert_eq!(ids(&page), vec!["g1", "g3", "g4"]);
}

#[test]
fn open_ended_range() {
    let spec = QuerySpec::default().with_range(
        "price",
        RangeFilter {
            min: Some(dec!(45.00)),
            max: None,
        },
    );
    let page = evaluate(&fixture(), &spec);
    assert_eq!(ids(&page), vec!["g2", "g5"]);
}

#[test]
fn range_on_unknown_field_excludes_everything() {
    let spec = QuerySpec::default().with_range(
        "weight",
        RangeFilter {
            min: Some(dec!(0)),
            max: None,
        },
    );
    let page = evaluate(&fixture(), &spec);
    assert_eq!(page.total_matched, 0);
}

#[test]
fn filters_compose_with_and() {
    let spec = QuerySpec::default()
        .with_category("peripherals")
        .with_selection("brand", "Acme")
        .with_range(
            "price",
            RangeFilter {
                min: Some(dec!(40.00)),
                max: None,
            },
        );
    let page = evaluate(&fixture(), &spec);
    assert_eq!(ids(&page), vec!["g2"]);
}

#[test]
fn adding_a_filter_never_grows_the_result() {
    let base = QuerySpec::default().with_search("wireless");
    let narrowed = base.clone().with_selection("brand", "Acme");

    let before = evaluate(&fixture(), &base).total_matched;
    let after = evaluate(&fixture(), &narrowed).total_matched;
    assert!(after <= before);
}

// ========================================================================
// Sorting
// ========================================================================

#[test]
fn price_ascending() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_sort(SortKey::PriceAsc));
    assert_eq!(ids(&page), vec!["g1", "g3", "g4", "g2", "g5"]);
}

#[test]
fn price_descending() {
    let page = evaluate(&fixture(), &QuerySpec::default().with_sort(SortKey::PriceDesc));
    assert_eq!(ids(&page), vec!["g5", "g2", "g4", "g1", "g3"]);
}

#[test]
fn ties_keep_insertion_order() {
    // g1 and g3 share a price; g2 and g5 share a rating
    let by_price = evaluate(&fixture(), &QuerySpec::default().with_sort(SortKey::PriceAsc));
    let p1 = ids(&by_price).iter().position(|&id| id == "g1").unwrap();
    let p3 = ids(&by_price).iter().position(|&id| id == "g3").unwrap();
    assert!(p1 < p3);

    let by_rating = evaluate(&fixture(), &QuerySpec::default().with_sort(SortKey::RatingDesc));
    let p2 = ids(&by_rating).iter().position(|&id| id == "g2").unwrap();
    let p5 = ids(&by_rating).iter().position(|&id| id == "g5").unwrap();
    assert!(p2 < p5);
}

#[test]
fn no_sort_preserves_collection_order() {
    let page = evaluate(&fixture(), &QuerySpec::default());
    assert_eq!(ids(&page), vec!["g1", "g2", "g3", "g4", "g5"]);
}

// ========================================================================
// Pagination
// ========================================================================

#[test]
fn pages_are_one_indexed_and_concatenate_to_the_full_result() {
    let items = fixture();
    let spec = QuerySpec::default().with_sort(SortKey::PriceAsc);

    let full = evaluate(&items, &spec);

    let mut spec = spec;
    spec.page_size = 2;
    let mut stitched = Vec::new();
    for page_no in 1..=3 {
        let page = evaluate(&items, &spec.clone().with_page(page_no));
        assert_eq!(page.page, page_no);
        assert_eq!(page.total_matched, 5);
        assert_eq!(page.total_pages, 3);
        stitched.extend(page.items);
    }

    assert_eq!(stitched, full.items);
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let mut spec = QuerySpec::default();
    spec.page_size = 2;
    let page = evaluate(&fixture(), &spec.with_page(9));

    assert!(page.items.is_empty());
    assert_eq!(page.total_matched, 5);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn maximum_page_number_is_still_an_empty_page() {
    // page * page_size does not fit in u32; the offset must not wrap
    let mut spec = QuerySpec::default();
    spec.page_size = 12;
    let page = evaluate(&fixture(), &spec.with_page(u32::MAX));

    assert!(page.items.is_empty());
    assert_eq!(page.total_matched, 5);
}

#[test]
fn empty_collection_has_zero_pages() {
    let page = evaluate(&Vec::<Gadget>::new(), &QuerySpec::default());
    assert!(page.items.is_empty());
    assert_eq!(page.total_matched, 0);
    assert_eq!(page.total_pages, 0);
}

// ========================================================================
// clear_filters
// ========================================================================

#[test]
fn clear_filters_resets_everything_in_one_step() {
    let mut spec = QuerySpec::default()
        .with_search("wireless")
        .with_category("peripherals")
        .with_selection("brand", "Acme")
        .with_range(
            "price",
            RangeFilter {
                min: Some(dec!(40.00)),
                max: None,
            },
        )
        .with_sort(SortKey::PriceDesc)
        .with_page(2);
    spec.page_size = 3;

    spec.clear_filters();

    let page = evaluate(&fixture(), &spec);
    assert_eq!(page.total_matched, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 3);
    assert_eq!(ids(&page), vec!["g1", "g2", "g3"]);
}
