//! Page controllers.
//!
//! Each page owns its grid, panels, and toasts, and talks to the service
//! ports. Responses are tagged with a [`Ticket`] so an older fetch that
//! resolves late never overwrites a newer one.

pub mod customers;
pub mod dashboard;
pub mod investments;
pub mod listing;
pub mod notifications;
pub mod sequence;

pub use customers::{CUSTOMERS_EMPTY_MESSAGE, CustomersPage, customer_columns};
pub use dashboard::{AllocationSlice, DashboardPage, DashboardView, RecentCustomer, StatCard};
pub use investments::{InvestmentsPage, empty_message};
pub use listing::{FetchOutcome, Listing, ListingFollowUp};
pub use notifications::{BulkOutcome, MARK_READ_ACTION, NotificationTab, NotificationsPage};
pub use sequence::{RequestSequencer, Ticket};
