//! Notification API handlers.
//!
//! ```text
//! GET    /api/notifications?read=false
//! GET    /api/notifications/unread-count
//! POST   /api/notifications
//! PUT    /api/notifications/read-all
//! PUT    /api/notifications/{id}/read
//! DELETE /api/notifications/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Envelope, ListEnvelope};
use tracing::info;

use super::ApiResult;
use super::auth::Authenticated;
use super::params::{QueryParams, list_query};
use super::state::HttpState;
use crate::domain::messages::{
    NOTIFICATION_CREATED, NOTIFICATION_DELETED, NOTIFICATION_MARKED_READ,
    NOTIFICATIONS_MARKED_READ, NOTIFICATIONS_RETRIEVED, UNREAD_COUNT_RETRIEVED,
};
use crate::domain::{Notification, NotificationDraft, NotificationFilter};

#[get("/notifications")]
pub async fn list_notifications(
    _user: Authenticated,
    state: web::Data<HttpState>,
    params: web::Query<QueryParams>,
) -> ApiResult<web::Json<ListEnvelope<Notification>>> {
    let query = list_query::<NotificationFilter>(&params)?;
    let page = state.notifications.list(&query).await?;
    Ok(web::Json(ListEnvelope::from_page(NOTIFICATIONS_RETRIEVED, page)))
}

/// Badge count for the notification centre.
#[get("/notifications/unread-count")]
pub async fn unread_count(
    _user: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<u64>>> {
    let count = state.notifications.unread_count().await?;
    Ok(web::Json(Envelope::ok(UNREAD_COUNT_RETRIEVED, count)))
}

#[post("/notifications")]
pub async fn create_notification(
    _user: Authenticated,
    state: web::Data<HttpState>,
    draft: web::Json<NotificationDraft>,
) -> ApiResult<HttpResponse> {
    let notification = state.notifications.create(&draft).await?;
    info!(notification_id = %notification.id, "notification created");
    Ok(HttpResponse::Created().json(Envelope::ok(NOTIFICATION_CREATED, notification)))
}

/// Mark every notification read; the payload is how many changed.
#[put("/notifications/read-all")]
pub async fn mark_all_read(
    _user: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<u64>>> {
    let changed = state.notifications.mark_all_read().await?;
    Ok(web::Json(Envelope::ok(NOTIFICATIONS_MARKED_READ, changed)))
}

#[put("/notifications/{id}/read")]
pub async fn mark_read(
    _user: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Notification>>> {
    let notification = state.notifications.mark_read(&id).await?;
    Ok(web::Json(Envelope::ok(NOTIFICATION_MARKED_READ, notification)))
}

#[delete("/notifications/{id}")]
pub async fn delete_notification(
    _user: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.notifications.delete(&id).await?;
    Ok(web::Json(Envelope::done(NOTIFICATION_DELETED)))
}

#[cfg(test)]
mod tests {
    use actix_web::test as actix_test;

    use super::*;
    use crate::inbound::http::test_utils::{bearer, fixture_login, test_app};

    async fn unread(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        token: &str,
    ) -> u64 {
        let request = actix_test::TestRequest::get()
            .uri("/api/notifications/unread-count")
            .insert_header(bearer(token))
            .to_request();
        let body: Envelope<u64> = actix_test::call_and_read_body_json(app, request).await;
        body.data.expect("count")
    }

    #[actix_web::test]
    async fn read_all_clears_the_unread_count() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let before = unread(&app, &token).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/notifications/read-all")
            .insert_header(bearer(&token))
            .to_request();
        let body: Envelope<u64> = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.data, Some(before));
        assert_eq!(unread(&app, &token).await, 0);
    }

    #[actix_web::test]
    async fn read_filter_lists_only_unread() {
        let app = actix_test::init_service(test_app()).await;
        let token = fixture_login(&app).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/notifications?read=false&perPage=100")
            .insert_header(bearer(&token))
            .to_request();
        let body: ListEnvelope<Notification> =
            actix_test::call_and_read_body_json(&app, request).await;
        assert!(body.data.iter().all(|n| !n.read));
        assert_eq!(body.total(), unread(&app, &token).await);
    }
}
