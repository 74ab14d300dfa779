//! Calendar generation endpoint

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::post,
};
use icsgen_core::decode_events;
use tracing::info;

use crate::server::AppState;
use super::AppError;

const CALENDAR_CONTENT_TYPE: &str = "text/calendar";
const CALENDAR_DISPOSITION: &str = "attachment; filename=calendar.ics";

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-ics", post(generate_ics))
}

/// POST /generate-ics - Encode a JSON array of events as an .ics download
async fn generate_ics(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let events = decode_events(&body)?;
    let ics = state.encoder().encode(&events)?;

    info!(events = events.len(), bytes = ics.len(), "Generated calendar");

    Ok((
        [
            (header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CALENDAR_DISPOSITION),
        ],
        ics,
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use icsgen_core::{Encoder, EventRecord, FixedClock};
    use tower::ServiceExt;

    use super::*;
    use crate::server::router;

    fn app() -> Router {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        router(AppState::new(Encoder::new().with_clock(FixedClock(now))))
    }

    fn post_events(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate-ics")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn error_message(body: &str) -> String {
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_generate_ics_success() {
        let body = r#"[{"id": "event1", "title": "Test Event", "start": "2023-08-01", "end": "2023-08-02", "description": "This is a test event"}]"#;

        let (status, headers, ics) = send(post_events(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/calendar");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=calendar.ics"
        );
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.contains("UID:event1@example.com"));
        assert!(ics.contains("DTSTAMP:20240501T123000Z"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20230801"));
        assert!(ics.contains("DTEND;VALUE=DATE:20230803"));
    }

    #[tokio::test]
    async fn test_generate_ics_empty_batch() {
        let (status, _, ics) = send(post_events("[]")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[tokio::test]
    async fn test_generate_ics_invalid_json_is_bad_request() {
        let (status, headers, body) = send(post_events("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let expected = serde_json::from_str::<Vec<EventRecord>>("{not json").unwrap_err();
        assert_eq!(error_message(&body), expected.to_string());
    }

    #[tokio::test]
    async fn test_generate_ics_wrong_shape_is_bad_request() {
        let (status, _, body) = send(post_events(r#"{"id": "event1"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!error_message(&body).is_empty());
    }

    #[tokio::test]
    async fn test_generate_ics_invalid_date_is_server_error() {
        let body = r#"[{"id": "broken", "title": "Broken", "start": "not-a-date", "end": "2023-08-02"}]"#;

        let (status, _, body) = send(post_events(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = error_message(&body);
        assert!(message.contains("broken"), "{message}");
        assert!(message.contains("not-a-date"), "{message}");
    }

    #[tokio::test]
    async fn test_generate_ics_rejects_get() {
        let request = Request::builder()
            .method("GET")
            .uri("/generate-ics")
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = send(request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::builder()
            .method("POST")
            .uri("/calendars")
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = send(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
