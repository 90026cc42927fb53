//! Query-string encoding of page and sort parameters.
//!
//! List endpoints share the `page`, `perPage`, `sortBy`, and `sortDirection`
//! parameters. The HTTP adapter writes them with [`append_page_query`] and
//! the server reads them back through [`PageQuery`].

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{PageRequest, PaginationError, Sort, SortDirection};

/// Raw page and sort parameters as they appear in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Zero-based page index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Rows per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Property to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`; ascending when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

impl PageQuery {
    /// Validate into a page request and optional sort.
    ///
    /// A blank `sortBy` means "no sort".
    ///
    /// # Errors
    /// Returns [`PaginationError`] when the page size or direction is invalid.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageQuery, SortDirection};
    ///
    /// let query = PageQuery {
    ///     page: Some(2),
    ///     per_page: Some(25),
    ///     sort_by: Some("firstName".into()),
    ///     sort_direction: Some("desc".into()),
    /// };
    /// let (request, sort) = query.into_parts().expect("valid query");
    /// assert_eq!(request.page(), 2);
    /// assert_eq!(sort.map(|s| s.direction()), Some(SortDirection::Desc));
    /// ```
    pub fn into_parts(self) -> Result<(PageRequest, Option<Sort>), PaginationError> {
        let defaults = PageRequest::default();
        let request = PageRequest::new(
            self.page.unwrap_or(defaults.page()),
            self.per_page.unwrap_or(defaults.per_page()),
        )?;
        let direction = self
            .sort_direction
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()?
            .unwrap_or_default();
        let sort = match self.sort_by {
            Some(field) if !field.trim().is_empty() => Some(Sort::new(field, direction)?),
            _ => None,
        };
        Ok((request, sort))
    }
}

/// Append page and sort parameters to `url`, keeping any existing pairs.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, Sort, append_page_query};
/// use url::Url;
///
/// let mut url = Url::parse("http://localhost/api/customers?status=active").expect("url");
/// let sort = Sort::ascending("lastName").expect("sort");
/// append_page_query(&mut url, PageRequest::default(), Some(&sort));
/// assert_eq!(
///     url.query(),
///     Some("status=active&page=0&perPage=10&sortBy=lastName&sortDirection=asc")
/// );
/// ```
pub fn append_page_query(url: &mut Url, request: PageRequest, sort: Option<&Sort>) {
    let mut pairs = url.query_pairs_mut();
    pairs.append_pair("page", &request.page().to_string());
    pairs.append_pair("perPage", &request.per_page().to_string());
    if let Some(sort) = sort {
        pairs.append_pair("sortBy", sort.field());
        pairs.append_pair("sortDirection", sort.direction().as_str());
    }
}
