//! Domain model and SQL rendering for onboarding a source table into the
//! staging (ST) and historic-staging (HS) layers of the warehouse.

pub mod error;
pub mod model;
pub mod render;
pub mod requests;
pub mod session;
pub mod templates;
