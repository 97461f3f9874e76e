pub mod deployment;
pub mod script;
