//! Zero-based page requests and the descriptors returned with each page.

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// A request for one page of a result set.
///
/// ## Invariants
/// - `page` is zero-based.
/// - `per_page` lies within `1..=MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PageRequestDto")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestDto {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(value.page, value.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PaginationError::PerPageOutOfRange`] when `per_page` is zero
    /// or above [`MAX_PER_PAGE`].
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert!(PageRequest::new(0, 25).is_ok());
    /// assert!(PageRequest::new(0, 0).is_err());
    /// ```
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PaginationError::PerPageOutOfRange {
                per_page,
                max: MAX_PER_PAGE,
            });
        }
        Ok(Self { page, per_page })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Same page size, different page.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            per_page: self.per_page,
        }
    }

    /// Number of rows preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page).saturating_mul(u64::from(self.per_page))
    }
}

/// Pagination descriptor returned alongside a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based page index that was served.
    pub page: u32,
    /// Page size that was served.
    pub per_page: u32,
    /// Total number of rows matching the query across all pages.
    pub total: u64,
}

impl PageInfo {
    /// Describe the page served for `request` out of `total` rows.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    /// Number of pages needed to show `total` rows.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// One-based inclusive row range shown on this page.
    ///
    /// Returns `(0, 0)` for an empty result set.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageInfo, PageRequest};
    ///
    /// let request = PageRequest::new(2, 10).expect("valid request");
    /// assert_eq!(PageInfo::new(request, 25).displayed_range(), (21, 25));
    /// ```
    #[must_use]
    pub fn displayed_range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let offset = u64::from(self.page).saturating_mul(u64::from(self.per_page));
        let from = offset.saturating_add(1).min(self.total);
        let to = offset
            .saturating_add(u64::from(self.per_page))
            .min(self.total);
        (from, to)
    }
}

/// One page of rows with its descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows on this page, in order.
    pub items: Vec<T>,
    /// Where this page sits in the full result set.
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Transform each row while keeping the descriptor.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

/// Slice an already filtered and sorted result set into the requested page.
///
/// A page past the end yields no rows but still reports the full total.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, paginate};
///
/// let request = PageRequest::new(3, 10).expect("valid request");
/// let page = paginate((0..25).collect::<Vec<_>>(), request);
/// assert!(page.items.is_empty());
/// assert_eq!(page.info.total, 25);
/// ```
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.per_page).unwrap_or(usize::MAX);
    Page {
        items: items.into_iter().skip(skip).take(take).collect(),
        info: PageInfo::new(request, total),
    }
}
