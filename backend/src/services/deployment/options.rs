use actix_web::{HttpResponse, Responder};
use common::model::deployment::FormOptions;

pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().json(FormOptions::default())
}
