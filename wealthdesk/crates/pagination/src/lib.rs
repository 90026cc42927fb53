//! Page, sort, and response envelope primitives shared by WealthDesk
//! services.
//!
//! Every service call in the console answers with the same envelope shape:
//! `{ success, message, data }`, with list calls adding a `pagination`
//! descriptor. This crate owns that wire contract together with the
//! zero-based [`PageRequest`] used to ask for a page, the [`Sort`] applied
//! before slicing, and the query-string encoding shared by the HTTP adapter
//! and the mock API server.
//!
//! # Examples
//! ```
//! use pagination::{ListEnvelope, PageRequest, paginate};
//!
//! let request = PageRequest::new(1, 2).expect("valid page request");
//! let page = paginate(vec!["a", "b", "c", "d", "e"], request);
//! let envelope = ListEnvelope::from_page("Letters retrieved", page);
//!
//! assert!(envelope.success);
//! assert_eq!(envelope.data, vec!["c", "d"]);
//! assert_eq!(envelope.pagination.map(|info| info.total), Some(5));
//! ```

mod envelope;
mod error;
mod page;
mod query;
mod sort;

pub use envelope::{Envelope, ListEnvelope};
pub use error::PaginationError;
pub use page::{DEFAULT_PER_PAGE, MAX_PER_PAGE, Page, PageInfo, PageRequest, paginate};
pub use query::{PageQuery, append_page_query};
pub use sort::{Sort, SortDirection};
