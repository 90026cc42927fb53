//! Query-string decoding for the list endpoints.
//!
//! Reads back exactly what `ListQuery::append_to` writes: `page`, `perPage`,
//! `sortBy`, `sortDirection`, and each entity's filter pairs. Unknown keys are
//! ignored; malformed values are rejected with a 400.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use pagination::PageQuery;

use crate::domain::{CustomerFilter, Error, InvestmentFilter, ListQuery, NotificationFilter};

/// Raw query pairs as received.
pub type QueryParams = HashMap<String, String>;

/// Filters that can be rebuilt from query pairs.
pub trait FromQueryParams: Sized {
    /// Decode the populated filters.
    ///
    /// # Errors
    /// Returns [`Error::invalid_request`] for values that do not parse.
    fn from_params(params: &QueryParams) -> Result<Self, Error>;
}

/// Decode paging, sort, and filters.
///
/// # Errors
/// Returns [`Error::invalid_request`] for malformed paging or filter values.
pub fn list_query<F: FromQueryParams>(params: &QueryParams) -> Result<ListQuery<F>, Error> {
    let page_query = PageQuery {
        page: parsed(params, "page")?,
        per_page: parsed(params, "perPage")?,
        sort_by: text(params, "sortBy"),
        sort_direction: text(params, "sortDirection"),
    };
    let (page, sort) = page_query
        .into_parts()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(ListQuery::new(page, F::from_params(params)?).with_sort(sort))
}

fn text(params: &QueryParams, name: &str) -> Option<String> {
    params
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn parsed<T>(params: &QueryParams, name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    text(params, name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|err| Error::invalid_request(format!("Invalid {name} `{raw}`: {err}")))
        })
        .transpose()
}

impl FromQueryParams for CustomerFilter {
    fn from_params(params: &QueryParams) -> Result<Self, Error> {
        Ok(Self {
            search: text(params, "search"),
            status: parsed(params, "status")?,
            gender: parsed(params, "gender")?,
            tax_status: text(params, "taxStatus"),
        })
    }
}

impl FromQueryParams for InvestmentFilter {
    fn from_params(params: &QueryParams) -> Result<Self, Error> {
        Ok(Self {
            customer_id: text(params, "customerId"),
            investment_type: parsed(params, "investmentType")?,
            status: parsed(params, "status")?,
            search: text(params, "search"),
            start_date: parsed(params, "startDate")?,
            end_date: parsed(params, "endDate")?,
        })
    }
}

impl FromQueryParams for NotificationFilter {
    fn from_params(params: &QueryParams) -> Result<Self, Error> {
        Ok(Self {
            read: parsed(params, "read")?,
            kind: parsed(params, "type")?,
        })
    }
}
