//! Customer API handlers.
//!
//! ```text
//! GET    /api/customers?page=0&perPage=10&status=active
//! GET    /api/customers/statistics
//! GET    /api/customers/{id}
//! POST   /api/customers
//! PUT    /api/customers/{id}
//! DELETE /api/customers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Envelope, ListEnvelope};
use tracing::info;

use super::ApiResult;
use super::auth::Authenticated;
use super::params::{QueryParams, list_query};
use super::state::HttpState;
use crate::domain::messages::{
    CUSTOMER_CREATED, CUSTOMER_DELETED, CUSTOMER_FOUND, CUSTOMER_STATS_RETRIEVED,
    CUSTOMER_UPDATED, CUSTOMERS_RETRIEVED,
};
use crate::domain::{Customer, CustomerDraft, CustomerFilter, CustomerStats};

/// Filtered, sorted page of customers.
#[get("/customers")]
pub async fn list_customers(
    _user: Authenticated,
    state: web::Data<HttpState>,
    params: web::Query<QueryParams>,
) -> ApiResult<web::Json<ListEnvelope<Customer>>> {
    let query = list_query::<CustomerFilter>(&params)?;
    let page = state.customers.list(&query).await?;
    Ok(web::Json(ListEnvelope::from_page(CUSTOMERS_RETRIEVED, page)))
}

/// Headline customer counts.
#[get("/customers/statistics")]
pub async fn customer_statistics(
    _user: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<CustomerStats>>> {
    let stats = state.customers.stats().await?;
    Ok(web::Json(Envelope::ok(CUSTOMER_STATS_RETRIEVED, stats)))
}

/// One customer by `_id`.
#[get("/customers/{id}")]
pub async fn get_customer(
    _user: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Customer>>> {
    let customer = state.customers.get(&id).await?;
    Ok(web::Json(Envelope::ok(CUSTOMER_FOUND, customer)))
}

/// Create a customer from a draft.
#[post("/customers")]
pub async fn create_customer(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    draft: web::Json<CustomerDraft>,
) -> ApiResult<HttpResponse> {
    let customer = state.customers.create(&draft).await?;
    info!(customer_id = %customer.id, by = %user.id, "customer created");
    Ok(HttpResponse::Created().json(Envelope::ok(CUSTOMER_CREATED, customer)))
}

/// Replace a customer's editable fields.
#[put("/customers/{id}")]
pub async fn update_customer(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
    draft: web::Json<CustomerDraft>,
) -> ApiResult<web::Json<Envelope<Customer>>> {
    let customer = state.customers.update(&id, &draft).await?;
    info!(customer_id = %customer.id, by = %user.id, "customer updated");
    Ok(web::Json(Envelope::ok(CUSTOMER_UPDATED, customer)))
}

/// Delete a customer and their investments.
#[delete("/customers/{id}")]
pub async fn delete_customer(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.customers.delete(&id).await?;
    info!(customer_id = %id, by = %user.id, "customer deleted");
    Ok(web::Json(Envelope::done(CUSTOMER_DELETED)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use super::*;
    use crate::domain::CustomerStatus;
    use crate::domain::messages::CUSTOMER_NOT_FOUND;
    use crate::inbound::http::test_utils::{bearer, fixture_login, test_app};

    #[actix_web::test]
    async fn list_applies_status_filter_and_paging() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/customers?page=0&perPage=5&status=active")
            .insert_header(bearer(&token))
            .to_request();
        let body: ListEnvelope<Customer> = actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.success);
        assert!(body.data.len() <= 5);
        assert!(body.data.iter().all(|c| c.status == CustomerStatus::Active));
        let info = body.pagination.expect("pagination");
        assert_eq!(info.per_page, 5);
    }

    #[actix_web::test]
    async fn list_requires_a_token() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get().uri("/api/customers").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn statistics_route_is_not_captured_as_an_id() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/customers/statistics")
            .insert_header(bearer(&token))
            .to_request();
        let body: Envelope<CustomerStats> =
            actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.message, CUSTOMER_STATS_RETRIEVED);
        assert!(body.data.is_some_and(|stats| stats.total > 0));
    }

    #[actix_web::test]
    async fn unknown_ids_are_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::delete()
            .uri("/api/customers/no-such-id")
            .insert_header(bearer(&token))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some(CUSTOMER_NOT_FOUND)
        );
    }

    #[actix_web::test]
    async fn malformed_page_size_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/customers?perPage=1000")
            .insert_header(bearer(&token))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
