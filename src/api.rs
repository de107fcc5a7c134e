//! HTTP client for the dashboard server's JSON endpoints.

mod client;
mod user;

pub use client::*;
pub use user::*;
