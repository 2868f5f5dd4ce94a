//! Shared response envelopes returned by list endpoints.

use serde::{Deserialize, Serialize};

/// One page of a larger, server-ordered collection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based index of this page, when the backend reports it.
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: None,
            size: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Number of pages needed to hold `total` elements in pages of `size`.
pub fn page_count(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size)) as u32
}
