use crate::session_controller::state::SessionsState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SessionCreated;
use log::info;

pub(crate) async fn process(state: web::Data<SessionsState>) -> impl Responder {
    let session_id = state.open().await;
    info!("session {} opened", session_id);
    HttpResponse::Ok().json(SessionCreated { session_id })
}
