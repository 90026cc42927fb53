//! Route table for the REST surface.
//!
//! Literal segments (`statistics`, `unread-count`, `read-all`) are registered
//! before the `{id}` routes that would otherwise capture them.

use actix_web::web;

use super::error::{json_error_handler, query_error_handler};
use super::{auth, customers, dropdowns, health, investments, notifications};

/// Base path of every entity endpoint.
pub const API_BASE_PATH: &str = "/api";

/// Register `/health` and the `/api` scope.
///
/// The caller supplies `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use wealthdesk::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(health::health)
        .service(
            web::scope(API_BASE_PATH)
                .service(auth::login)
                .service(auth::current_user)
                .service(customers::list_customers)
                .service(customers::customer_statistics)
                .service(customers::get_customer)
                .service(customers::create_customer)
                .service(customers::update_customer)
                .service(customers::delete_customer)
                .service(investments::list_investments)
                .service(investments::investment_statistics)
                .service(investments::get_investment)
                .service(investments::create_investment)
                .service(investments::update_investment)
                .service(investments::delete_investment)
                .service(notifications::list_notifications)
                .service(notifications::unread_count)
                .service(notifications::create_notification)
                .service(notifications::mark_all_read)
                .service(notifications::mark_read)
                .service(notifications::delete_notification)
                .service(dropdowns::all_dropdowns)
                .service(dropdowns::dropdown_options),
        );
}
