mod config;
mod services;
mod session_controller;

use crate::config::ServerConfig;
use crate::services::error::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use log::info;
use std::time::Duration;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

async fn not_found(req: HttpRequest) -> HttpResponse {
    ApiError::new(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("No route for {} {}", req.method(), req.path()),
    )
    .into_response()
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response =
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_json", err.to_string())
                    .into_response();
            InternalError::from_response(err, response).into()
        })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env()?;

    let sessions_state = SessionsState::new(config.session_ttl, config.max_sessions);

    let sweeper = sessions_state.clone();
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sweeper.evict_idle().await;
            if evicted > 0 {
                info!("evicted {} idle sessions", evicted);
            }
        }
    });

    info!("Server running at {}", config.url());

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(json_config(json_limit))
            .app_data(web::Data::new(sessions_state.clone()))
            .service(services::deployment::configure_routes())
            .service(services::sessions::configure_routes())
            .default_service(web::route().to(not_found))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use serde_json::Value;

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(json_config(1024))
                    .app_data(web::Data::new(SessionsState::default()))
                    .service(services::sessions::configure_routes())
                    .default_service(web::route().to(not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn malformed_body_is_invalid_json() {
        let app = init_app!();
        let req = test::TestRequest::post().uri("/api/sessions").to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["session_id"].as_str().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/generate", id))
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"source_table_name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_json");
    }

    #[actix_web::test]
    async fn unknown_route_is_json_not_found() {
        let app = init_app!();
        let req = test::TestRequest::get().uri("/api/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "No route for GET /api/nowhere");
    }
}
