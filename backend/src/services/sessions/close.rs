use crate::services::error::ApiError;
use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use log::info;

pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<SessionsState>,
) -> impl Responder {
    if state.close(&session_id).await {
        info!("session {} closed", session_id);
        HttpResponse::NoContent().finish()
    } else {
        ApiError::session_not_found(&session_id).into_response()
    }
}
