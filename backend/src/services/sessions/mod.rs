//! # Session Service Module
//!
//! One session is one user working through the form. Every session keeps its
//! own rendered scripts, suffix and timestamp, so two users generating at the
//! same time never see each other's output.
//!
//! ## Sub-modules:
//! - `open`: creates a session awaiting input.
//! - `get`: reports the phase and, once generated, the six sections.
//! - `generate`: validates the form input and renders the scripts.
//! - `download`: serves the full script as a `text/plain` attachment.
//! - `close`: discards a session.

mod close;
mod download;
mod generate;
mod get;
mod open;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all session endpoints.
const API_PATH: &str = "/api/sessions";

/// Configures the Actix `Scope` for session routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: `open::process`, returns `{ "session_id": ... }`.
/// *   **`GET /{session_id}`**: `get::process`, returns a `SessionView`.
/// *   **`POST /{session_id}/generate`**: `generate::process`, expects a
///     `DeploymentRequest` JSON body. Answers `400` with an `ErrorBody` when a
///     required field or the initials are missing; the cached output stays as is.
/// *   **`GET /{session_id}/download`**: `download::process`, `409` until the
///     session has generated once.
/// *   **`DELETE /{session_id}`**: `close::process`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(open::process))
        .route("/{session_id}", get().to(get::process))
        .route("/{session_id}", delete().to(close::process))
        .route("/{session_id}/generate", post().to(generate::process))
        .route("/{session_id}/download", get().to(download::process))
}

#[cfg(test)]
mod tests {
    use super::configure_routes;
    use crate::session_controller::state::SessionsState;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(configure_routes()),
            )
            .await
        };
    }

    macro_rules! open_session {
        ($app:expr) => {{
            let req = test::TestRequest::post().uri("/api/sessions").to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body["session_id"].as_str().unwrap().to_string()
        }};
    }

    fn customers() -> Value {
        json!({
            "user_initials": "AB",
            "source_table_name": "CUSTOMERS",
            "business_key": "CUSTOMER_ID",
            "scd2_columns": "NAME,EMAIL"
        })
    }

    #[actix_web::test]
    async fn new_session_awaits_input() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["phase"], "AwaitingInput");
        assert_eq!(body["deployment"], Value::Null);
    }

    #[actix_web::test]
    async fn generate_returns_six_sections() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(customers())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;

        let suffix = body["stamp"]["table_suffix"].as_str().unwrap().to_string();
        assert!(suffix.starts_with("ab_"));
        assert_eq!(suffix.len(), "ab_".len() + 8);

        let sections = body["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0]["title"], "1. Control Tables Backup");
        assert_eq!(sections[0]["number"], 1);
        assert_eq!(sections[5]["number"], 6);
        assert_eq!(sections[5]["step"], "Cleanup");
        assert!(sections[1]["sql"]
            .as_str()
            .unwrap()
            .contains("tgt_table_name = 'ST_CUSTOMERS'"));
        assert!(body["full_script"]
            .as_str()
            .unwrap()
            .contains(&format!("temp_control_table_job_{}", suffix)));

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", id))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["phase"], "Generated");
        assert_eq!(view["deployment"]["stamp"]["table_suffix"], suffix.as_str());
    }

    #[actix_web::test]
    async fn missing_field_is_a_bad_request_and_keeps_output() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(customers())
            .to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;

        let mut bad = customers();
        bad["scd2_columns"] = json!("");
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(bad)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "missing_field");

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", id))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["deployment"], first);
    }

    #[actix_web::test]
    async fn missing_initials_is_reported() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let mut body = customers();
        body["user_initials"] = json!("");
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "missing_initials");
        assert_eq!(err["message"], "Please enter your initials");
    }

    #[actix_web::test]
    async fn download_requires_generation() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/download", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn download_serves_plain_text_attachment() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(customers())
            .to_request();
        let generated: Value = test::call_and_read_body_json(&app, req).await;
        let suffix = generated["stamp"]["table_suffix"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/download", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains(&format!("deploy_CUSTOMERS_{}.sql", suffix)));

        let body = test::read_body(resp).await;
        assert_eq!(body, generated["full_script"].as_str().unwrap().as_bytes());
    }

    #[actix_web::test]
    async fn sessions_do_not_share_output() {
        let state = SessionsState::default();
        let app = init_app!(state.clone());
        let first = open_session!(app);
        let second = open_session!(app);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", first))
            .set_json(customers())
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", second))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["phase"], "AwaitingInput");
        assert_eq!(state.len().await, 2);
    }

    #[actix_web::test]
    async fn unknown_and_closed_sessions_are_not_found() {
        let app = init_app!(SessionsState::default());
        let id = open_session!(app);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{}", id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .set_json(customers())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "session_not_found");
    }
}
