pub mod deployment;
pub mod error;
pub mod sessions;
