//! Investment API handlers.
//!
//! ```text
//! GET    /api/investments?investmentType=sip&status=active
//! GET    /api/investments/statistics
//! GET    /api/investments/{id}
//! POST   /api/investments
//! PUT    /api/investments/{id}
//! DELETE /api/investments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Envelope, ListEnvelope};
use tracing::info;

use super::ApiResult;
use super::auth::Authenticated;
use super::params::{QueryParams, list_query};
use super::state::HttpState;
use crate::domain::messages::{
    INVESTMENT_CREATED, INVESTMENT_DELETED, INVESTMENT_FOUND, INVESTMENT_STATS_RETRIEVED,
    INVESTMENT_UPDATED, INVESTMENTS_RETRIEVED,
};
use crate::domain::{Investment, InvestmentDraft, InvestmentFilter, InvestmentStats};

/// Filtered, sorted page of investments.
#[get("/investments")]
pub async fn list_investments(
    _user: Authenticated,
    state: web::Data<HttpState>,
    params: web::Query<QueryParams>,
) -> ApiResult<web::Json<ListEnvelope<Investment>>> {
    let query = list_query::<InvestmentFilter>(&params)?;
    let page = state.investments.list(&query).await?;
    Ok(web::Json(ListEnvelope::from_page(INVESTMENTS_RETRIEVED, page)))
}

/// Investment totals for the dashboard.
#[get("/investments/statistics")]
pub async fn investment_statistics(
    _user: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<InvestmentStats>>> {
    let stats = state.investments.stats().await?;
    Ok(web::Json(Envelope::ok(INVESTMENT_STATS_RETRIEVED, stats)))
}

#[get("/investments/{id}")]
pub async fn get_investment(
    _user: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Investment>>> {
    let investment = state.investments.get(&id).await?;
    Ok(web::Json(Envelope::ok(INVESTMENT_FOUND, investment)))
}

#[post("/investments")]
pub async fn create_investment(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    draft: web::Json<InvestmentDraft>,
) -> ApiResult<HttpResponse> {
    let investment = state.investments.create(&draft).await?;
    info!(investment_id = %investment.id, by = %user.id, "investment created");
    Ok(HttpResponse::Created().json(Envelope::ok(INVESTMENT_CREATED, investment)))
}

#[put("/investments/{id}")]
pub async fn update_investment(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
    draft: web::Json<InvestmentDraft>,
) -> ApiResult<web::Json<Envelope<Investment>>> {
    let investment = state.investments.update(&id, &draft).await?;
    info!(investment_id = %investment.id, by = %user.id, "investment updated");
    Ok(web::Json(Envelope::ok(INVESTMENT_UPDATED, investment)))
}

#[delete("/investments/{id}")]
pub async fn delete_investment(
    Authenticated(user): Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.investments.delete(&id).await?;
    info!(investment_id = %id, by = %user.id, "investment deleted");
    Ok(web::Json(Envelope::done(INVESTMENT_DELETED)))
}

#[cfg(test)]
mod tests {
    use actix_web::test as actix_test;

    use super::*;
    use crate::domain::InvestmentType;
    use crate::inbound::http::test_utils::{bearer, fixture_login, test_app};

    #[actix_web::test]
    async fn list_filters_by_investment_type() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/investments?investmentType=lumpsum&perPage=100")
            .insert_header(bearer(&token))
            .to_request();
        let body: ListEnvelope<Investment> =
            actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.success);
        assert!(!body.data.is_empty());
        assert!(
            body.data
                .iter()
                .all(|investment| investment.investment_type == InvestmentType::Lumpsum)
        );
    }

    #[actix_web::test]
    async fn statistics_count_every_investment() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let stats_request = actix_test::TestRequest::get()
            .uri("/api/investments/statistics")
            .insert_header(bearer(&token))
            .to_request();
        let stats: Envelope<InvestmentStats> =
            actix_test::call_and_read_body_json(&app, stats_request).await;
        let list_request = actix_test::TestRequest::get()
            .uri("/api/investments")
            .insert_header(bearer(&token))
            .to_request();
        let list: ListEnvelope<Investment> =
            actix_test::call_and_read_body_json(&app, list_request).await;
        assert_eq!(
            stats.data.map(|s| s.total_investments),
            Some(list.total())
        );
    }
}
