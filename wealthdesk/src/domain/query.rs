//! List queries shared by every paged service call.

use pagination::{PageRequest, Sort, append_page_query};
use url::Url;

use super::{CustomerFilter, InvestmentFilter, NotificationFilter};

/// Entity-specific filters that know their query-string encoding.
pub trait QueryFilter {
    /// `(name, value)` pairs for the populated filters, in a stable order.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Page cursor, optional sort, and typed filters for one list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery<F> {
    /// Requested page.
    pub page: PageRequest,
    /// Server-side sort applied before paging.
    pub sort: Option<Sort>,
    /// Entity filters applied before sorting.
    pub filter: F,
}

/// Customer list query.
pub type CustomerQuery = ListQuery<CustomerFilter>;
/// Investment list query.
pub type InvestmentQuery = ListQuery<InvestmentFilter>;
/// Notification list query.
pub type NotificationQuery = ListQuery<NotificationFilter>;

impl<F> ListQuery<F> {
    /// Query for `page` with `filter` and no sort.
    pub fn new(page: PageRequest, filter: F) -> Self {
        Self {
            page,
            sort: None,
            filter,
        }
    }

    /// Replace the sort.
    #[must_use]
    pub fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }
}

impl<F: QueryFilter> ListQuery<F> {
    /// Append paging, sort, and filter parameters to `url`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    /// use url::Url;
    /// use wealthdesk::domain::{CustomerFilter, CustomerQuery, CustomerStatus};
    ///
    /// let filter = CustomerFilter {
    ///     status: Some(CustomerStatus::Active),
    ///     ..CustomerFilter::default()
    /// };
    /// let query = CustomerQuery::new(PageRequest::default(), filter);
    /// let mut url = Url::parse("http://localhost/api/customers").expect("url");
    /// query.append_to(&mut url);
    /// assert_eq!(url.query(), Some("page=0&perPage=10&status=active"));
    /// ```
    pub fn append_to(&self, url: &mut Url) {
        append_page_query(url, self.page, self.sort.as_ref());
        let pairs = self.filter.query_pairs();
        if pairs.is_empty() {
            return;
        }
        let mut serializer = url.query_pairs_mut();
        for (name, value) in pairs {
            serializer.append_pair(name, &value);
        }
    }
}
