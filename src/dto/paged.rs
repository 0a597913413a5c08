use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used to request the whole catalog as a single page.
///
/// `i32::MAX`: fits a SQL `LIMIT` and stays exact for JSON clients that
/// read numbers as doubles.
pub const ALL_ITEMS_PAGE_SIZE: u64 = i32::MAX as u64;

/// A bounded slice of the catalog plus the metadata needed to fetch the next one.
///
/// `total_pages` is derived from `total_count` and `page_size` at construction
/// and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    #[schema(example = 1)]
    pub page_number: u64,
    #[schema(example = 10)]
    pub page_size: u64,
    #[schema(example = 1)]
    pub total_pages: u64,
    #[schema(example = 3)]
    pub total_count: u64,
}

impl<T> PagedResult<T> {
    /// Wraps one page of items. A zero page number or size is raised to 1 and
    /// items beyond `page_size` are dropped.
    pub fn new(mut items: Vec<T>, page_number: u64, page_size: u64, total_count: u64) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        items.truncate(usize::try_from(page_size).unwrap_or(usize::MAX));

        Self {
            items,
            page_number,
            page_size,
            total_pages: total_count.div_ceil(page_size),
            total_count,
        }
    }

    /// Transforms every item while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PagedResult::new(vec![1, 2], 1, 2, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_catalog_has_zero_pages() {
        let page: PagedResult<i32> = PagedResult::new(Vec::new(), 1, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn zero_page_number_and_size_are_raised_to_one() {
        let page = PagedResult::new(vec!["a", "b"], 0, 0, 2);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec!["a"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn all_items_page_size_yields_single_page() {
        let page = PagedResult::new(vec![1, 2, 3], 1, ALL_ITEMS_PAGE_SIZE, 3);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn all_items_page_size_survives_a_double_round_trip() {
        let page = PagedResult::new(vec![1], 1, ALL_ITEMS_PAGE_SIZE, 1);
        let json = serde_json::to_value(&page).unwrap();
        let as_double = json["pageSize"].as_f64().unwrap();
        assert_eq!(as_double as u64, ALL_ITEMS_PAGE_SIZE);
        assert_eq!(json["pageSize"], 2_147_483_647u64);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let page = PagedResult::new(vec![7], 2, 1, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [7],
                "pageNumber": 2,
                "pageSize": 1,
                "totalPages": 3,
                "totalCount": 3
            })
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let page = PagedResult::new(vec![1, 2], 3, 2, 9).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.page_number, page.page_size), (3, 2));
        assert_eq!((page.total_pages, page.total_count), (5, 9));
    }

    proptest! {
        #[test]
        fn total_pages_matches_ceiling_division(
            total in 0u64..1_000_000,
            size in 0u64..500,
            number in 0u64..100,
            len in 0usize..600,
        ) {
            let page = PagedResult::new(vec![(); len], number, size, total);
            let effective = size.max(1);
            prop_assert_eq!(page.total_pages, (total + effective - 1) / effective);
            prop_assert!(page.items.len() as u64 <= page.page_size);
            prop_assert!(page.page_number >= 1);
            prop_assert!(page.page_size >= 1);
        }
    }
}
