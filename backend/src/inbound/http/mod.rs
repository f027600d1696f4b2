//! HTTP inbound adapter exposing REST endpoints and the static front-end.

pub mod error;
pub mod evaluations;
pub mod health;
pub mod schemas;
pub mod state;
pub mod static_assets;

pub use error::ApiResult;
