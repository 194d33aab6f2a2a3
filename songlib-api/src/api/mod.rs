//! HTTP API handlers for songlib

pub mod health;
pub mod info;
pub mod songs;

pub use health::health_routes;
pub use info::info_routes;
pub use songs::song_routes;
