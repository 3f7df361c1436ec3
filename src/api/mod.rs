//! HTTP API for driving the yield pipeline from an external UI.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
