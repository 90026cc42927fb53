//! Outcome messages carried by service envelopes.
//!
//! Both adapter sets use these strings so callers see the same toast text
//! whichever backend is configured.

pub const CUSTOMERS_RETRIEVED: &str = "Customers retrieved successfully";
pub const CUSTOMER_FOUND: &str = "Customer found";
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";
pub const CUSTOMER_CREATED: &str = "Customer created successfully";
pub const CUSTOMER_UPDATED: &str = "Customer updated successfully";
pub const CUSTOMER_DELETED: &str = "Customer deleted successfully";
pub const CUSTOMER_STATS_RETRIEVED: &str = "Customer statistics retrieved successfully";
pub const FETCH_CUSTOMERS_FAILED: &str = "Failed to fetch customers";
pub const FETCH_CUSTOMER_FAILED: &str = "Failed to fetch customer";
pub const CREATE_CUSTOMER_FAILED: &str = "Failed to create customer";
pub const UPDATE_CUSTOMER_FAILED: &str = "Failed to update customer";
pub const DELETE_CUSTOMER_FAILED: &str = "Failed to delete customer";
pub const FETCH_CUSTOMER_STATS_FAILED: &str = "Failed to fetch customer statistics";

pub const INVESTMENTS_RETRIEVED: &str = "Investments retrieved successfully";
pub const INVESTMENT_FOUND: &str = "Investment found";
pub const INVESTMENT_NOT_FOUND: &str = "Investment not found";
pub const INVESTMENT_CREATED: &str = "Investment created successfully";
pub const INVESTMENT_UPDATED: &str = "Investment updated successfully";
pub const INVESTMENT_DELETED: &str = "Investment deleted successfully";
pub const INVESTMENT_STATS_RETRIEVED: &str = "Investment statistics retrieved successfully";
pub const FETCH_INVESTMENTS_FAILED: &str = "Failed to fetch investments";
pub const FETCH_INVESTMENT_FAILED: &str = "Failed to fetch investment";
pub const CREATE_INVESTMENT_FAILED: &str = "Failed to create investment";
pub const UPDATE_INVESTMENT_FAILED: &str = "Failed to update investment";
pub const DELETE_INVESTMENT_FAILED: &str = "Failed to delete investment";
pub const FETCH_INVESTMENT_STATS_FAILED: &str = "Failed to fetch investment statistics";

pub const NOTIFICATIONS_RETRIEVED: &str = "Notifications retrieved successfully";
pub const NOTIFICATION_NOT_FOUND: &str = "Notification not found";
pub const NOTIFICATION_CREATED: &str = "Notification created successfully";
pub const NOTIFICATION_MARKED_READ: &str = "Notification marked as read";
pub const NOTIFICATIONS_MARKED_READ: &str = "All notifications marked as read";
pub const NOTIFICATION_DELETED: &str = "Notification deleted successfully";
pub const UNREAD_COUNT_RETRIEVED: &str = "Unread count retrieved successfully";
pub const FETCH_NOTIFICATIONS_FAILED: &str = "Failed to fetch notifications";
pub const CREATE_NOTIFICATION_FAILED: &str = "Failed to create notification";
pub const UPDATE_NOTIFICATION_FAILED: &str = "Failed to update notification";
pub const DELETE_NOTIFICATION_FAILED: &str = "Failed to delete notification";

pub const DROPDOWNS_RETRIEVED: &str = "Dropdown options retrieved successfully";
pub const FETCH_DROPDOWNS_FAILED: &str = "Failed to fetch dropdown options";

pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const LOGIN_FAILED: &str = "An error occurred during login";
pub const USER_RETRIEVED: &str = "User retrieved successfully";
pub const SESSION_EXPIRED: &str = "Session expired";
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
