//! Serves the full script of a session as a plain-text attachment named
//! `deploy_<source table>_<suffix>.sql`.

use crate::services::error::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::http::header::ContentDisposition;
use actix_web::{web, HttpResponse, Responder};
use log::debug;

pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<SessionsState>,
) -> impl Responder {
    let Some(artifact) = state
        .with_session(&session_id, |session| session.artifact())
        .await
    else {
        return ApiError::session_not_found(&session_id).into_response();
    };
    let Some(artifact) = artifact else {
        return ApiError::not_generated().into_response();
    };

    debug!("session {} downloading {}", session_id, artifact.file_name);
    HttpResponse::Ok()
        .content_type(artifact.mime_type)
        .insert_header(ContentDisposition::attachment(artifact.file_name))
        .body(artifact.content)
}
