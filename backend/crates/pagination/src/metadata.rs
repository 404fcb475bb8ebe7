//! Listing metadata returned alongside a page of records.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Summary of a paginated listing.
///
/// Zero-valued fields are omitted when serialised, so an empty collection
/// produces `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page that was requested.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub current_page: u64,
    /// Records per page.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page_size: u64,
    /// Always one when any records exist.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_page: u64,
    /// Final page number for the collection.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_page: u64,
    /// Records in the whole collection.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_records: u64,
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip predicates receive field references"
)]
const fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl Metadata {
    /// Build metadata for one listing request.
    ///
    /// `total_paginated_records` is the window count observed on the fetched
    /// page and `total_records` the independent collection count. When the
    /// page is empty but the collection is not, `last_page` falls back to the
    /// collection count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Metadata, PageRequest};
    ///
    /// let request = PageRequest::new(5, 20).expect("in range");
    /// let metadata = Metadata::compute(0, 10, request);
    /// assert_eq!(metadata.last_page, 1);
    /// assert_eq!(metadata.total_records, 10);
    /// ```
    #[must_use]
    pub fn compute(total_paginated_records: u64, total_records: u64, request: PageRequest) -> Self {
        if total_records == 0 {
            return Self::default();
        }

        let page_size = u64::from(request.page_size());
        let basis = if total_paginated_records == 0 {
            total_records
        } else {
            total_paginated_records
        };

        Self {
            current_page: u64::from(request.page()),
            page_size,
            first_page: 1,
            last_page: basis.div_ceil(page_size),
            total_records,
        }
    }

    /// True when no records exist at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn request(page: i64, page_size: i64) -> PageRequest {
        PageRequest::new(page, page_size).expect("in range")
    }

    #[rstest]
    #[case(1, 20)]
    #[case(7, 3)]
    #[case(10_000_000, 100)]
    fn empty_collection_yields_default(#[case] page: i64, #[case] page_size: i64) {
        let metadata = Metadata::compute(0, 0, request(page, page_size));
        assert_eq!(metadata, Metadata::default());
        assert!(metadata.is_empty());
    }

    #[rstest]
    #[case(10, 20, 1)]
    #[case(21, 20, 2)]
    #[case(40, 20, 2)]
    #[case(41, 20, 3)]
    fn empty_page_uses_collection_count(
        #[case] total: u64,
        #[case] page_size: i64,
        #[case] last_page: u64,
    ) {
        let metadata = Metadata::compute(0, total, request(9, page_size));
        assert_eq!(metadata.last_page, last_page);
        assert_eq!(metadata.current_page, 9);
        assert_eq!(metadata.first_page, 1);
        assert_eq!(metadata.total_records, total);
    }

    #[rstest]
    fn non_empty_page_uses_window_count() {
        let metadata = Metadata::compute(45, 50, request(2, 10));
        assert_eq!(metadata.last_page, 5);
        assert_eq!(metadata.total_records, 50);
        assert_eq!(metadata.page_size, 10);
    }

    #[rstest]
    fn zero_fields_are_omitted() {
        let value = serde_json::to_value(Metadata::default()).expect("serialise");
        assert_eq!(value, json!({}));
    }

    #[rstest]
    fn populated_fields_are_snake_case() {
        let value =
            serde_json::to_value(Metadata::compute(10, 10, request(1, 20))).expect("serialise");
        assert_eq!(
            value,
            json!({
                "current_page": 1,
                "page_size": 20,
                "first_page": 1,
                "last_page": 1,
                "total_records": 10
            })
        );
    }
}
