//! HTTP Layer
//!
//! Thin request plumbing over the board: JSON in, JSON out, permissive CORS
//! for the static browser page that consumes the API. No score decisions are
//! made here.

pub mod handlers;
pub mod server;

pub use server::{router, run, ApiServerError, ServerConfig};
