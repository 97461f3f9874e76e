//! Static metadata for whoever renders the input form.

mod options;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/deployment";

/// Registers `GET /api/deployment/options`, the choice sets and pre-filled
/// defaults of every `DeploymentRequest` field.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/options", get().to(options::process))
}
