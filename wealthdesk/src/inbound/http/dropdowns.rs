//! Dropdown catalogue handlers.
//!
//! ```text
//! GET /api/dropdowns
//! GET /api/dropdowns/{kind}
//! ```

use actix_web::{get, web};
use pagination::Envelope;

use super::ApiResult;
use super::auth::Authenticated;
use super::state::HttpState;
use crate::domain::messages::DROPDOWNS_RETRIEVED;
use crate::domain::{DropdownCatalogue, DropdownKind, DropdownOption, Error};

/// Every choice list keyed by kind.
#[get("/dropdowns")]
pub async fn all_dropdowns(
    _user: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<DropdownCatalogue>>> {
    let catalogue = state.dropdowns.catalogue().await?;
    Ok(web::Json(Envelope::ok(DROPDOWNS_RETRIEVED, catalogue)))
}

/// One choice list; unknown kinds are 404.
#[get("/dropdowns/{kind}")]
pub async fn dropdown_options(
    _user: Authenticated,
    state: web::Data<HttpState>,
    kind: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<DropdownOption>>>> {
    let kind = kind
        .parse::<DropdownKind>()
        .map_err(|err| Error::not_found(err.to_string()))?;
    let options = state.dropdowns.options(kind).await?;
    Ok(web::Json(Envelope::ok(DROPDOWNS_RETRIEVED, options)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    use super::*;
    use crate::inbound::http::test_utils::{bearer, fixture_login, test_app};

    #[actix_web::test]
    async fn tax_status_options_are_served() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/dropdowns/taxStatus")
            .insert_header(bearer(&token))
            .to_request();
        let body: Envelope<Vec<DropdownOption>> =
            actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.data.is_some_and(|options| !options.is_empty()));
    }

    #[actix_web::test]
    async fn unknown_kinds_are_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/dropdowns/favouriteColour")
            .insert_header(bearer(&token))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
