//! # Script Generation Service
//!
//! Handles `POST /api/sessions/{session_id}/generate`, the "Generate SQL
//! Script" action of the form.
//!
//! ## Workflow
//!
//! 1.  The body is deserialized into a `DeploymentRequest`; absent fields take
//!     the form defaults.
//! 2.  The session's `DeploymentSession::generate` normalizes the initials,
//!     validates the required fields and, only if that passes, fixes the table
//!     suffix and timestamp from the current local time.
//! 3.  The six sections and the full script replace the session's cached
//!     output and are returned as a `GeneratedDeployment`.
//!
//! A rejected request answers `400` and leaves the cached output untouched.

use crate::services::error::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use common::model::deployment::DeploymentRequest;
use log::{info, warn};

pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<SessionsState>,
    payload: web::Json<DeploymentRequest>,
) -> impl Responder {
    let now = Local::now().naive_local();
    let response = state
        .with_session(&session_id, |session| {
            match session.generate(payload.into_inner(), now) {
                Ok(deployment) => {
                    info!(
                        "session {} generated {} with suffix {}",
                        session_id,
                        deployment.request.source_table_name,
                        deployment.stamp.table_suffix
                    );
                    HttpResponse::Ok().json(deployment)
                }
                Err(err) => {
                    warn!("session {} generation rejected: {}", session_id, err.code());
                    ApiError::from(err).into_response()
                }
            }
        })
        .await;

    response.unwrap_or_else(|| ApiError::session_not_found(&session_id).into_response())
}
