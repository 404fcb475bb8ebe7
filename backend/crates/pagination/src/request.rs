//! Validated page selection for offset-based listings.

use std::num::NonZeroU32;

/// Page used when the client does not supply one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Highest page number a client may request.
pub const MAX_PAGE: u32 = 10_000_000;

/// Largest number of records a single page may hold.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Field-level rejection for a page request value.
///
/// The display text is the client-facing validation message and
/// [`PageRequestError::field`] names the query parameter it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `page` was zero or negative.
    #[error("must be greater than zero")]
    PageNotPositive,
    /// `page` exceeded [`MAX_PAGE`].
    #[error("must be a maximum of 10 million")]
    PageTooLarge,
    /// `page_size` was zero or negative.
    #[error("must be greater than zero")]
    PageSizeNotPositive,
    /// `page_size` exceeded [`MAX_PAGE_SIZE`].
    #[error("must be a maximum of 100")]
    PageSizeTooLarge,
}

impl PageRequestError {
    /// Query parameter the error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::PageNotPositive | Self::PageTooLarge => "page",
            Self::PageSizeNotPositive | Self::PageSizeTooLarge => "page_size",
        }
    }
}

/// A page number and page size that are both within bounds.
///
/// `page_size` is never zero, so dividing by it is always safe.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("values are in range");
/// assert_eq!(request.limit(), 20);
/// assert_eq!(request.offset(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: NonZeroU32,
    page_size: NonZeroU32,
}

impl PageRequest {
    /// Validate both values, reporting every failing field.
    ///
    /// # Errors
    ///
    /// Returns one [`PageRequestError`] per out-of-range field, `page` first.
    pub fn new(page: i64, page_size: i64) -> Result<Self, Vec<PageRequestError>> {
        match (Self::check_page(page), Self::check_page_size(page_size)) {
            (Ok(valid_page), Ok(valid_size)) => Ok(Self {
                page: valid_page,
                page_size: valid_size,
            }),
            (page_result, size_result) => Err([page_result.err(), size_result.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Validate a raw page number.
    ///
    /// # Errors
    ///
    /// Rejects values below one or above [`MAX_PAGE`].
    pub fn check_page(page: i64) -> Result<NonZeroU32, PageRequestError> {
        if page < 1 {
            return Err(PageRequestError::PageNotPositive);
        }
        u32::try_from(page)
            .ok()
            .filter(|value| *value <= MAX_PAGE)
            .and_then(NonZeroU32::new)
            .ok_or(PageRequestError::PageTooLarge)
    }

    /// Validate a raw page size.
    ///
    /// # Errors
    ///
    /// Rejects values below one or above [`MAX_PAGE_SIZE`].
    pub fn check_page_size(page_size: i64) -> Result<NonZeroU32, PageRequestError> {
        if page_size < 1 {
            return Err(PageRequestError::PageSizeNotPositive);
        }
        u32::try_from(page_size)
            .ok()
            .filter(|value| *value <= MAX_PAGE_SIZE)
            .and_then(NonZeroU32::new)
            .ok_or(PageRequestError::PageSizeTooLarge)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    /// Number of records per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Value for the SQL `LIMIT` clause.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size.get())
    }

    /// Value for the SQL `OFFSET` clause.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page.get()) - 1) * i64::from(self.page_size.get())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
        }
    }
}
