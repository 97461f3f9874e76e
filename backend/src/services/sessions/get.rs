use crate::services::error::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SessionView;

pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<SessionsState>,
) -> impl Responder {
    let session_id = session_id.into_inner();
    let view = state
        .with_session(&session_id, |session| SessionView {
            session_id: session_id.clone(),
            phase: session.phase(),
            deployment: session.deployment().cloned(),
        })
        .await;

    match view {
        Some(view) => HttpResponse::Ok().json(view),
        None => ApiError::session_not_found(&session_id).into_response(),
    }
}
