//! # songlib common library
//!
//! Shared code for the songlib service:
//! - Song data model and filters
//! - Verse (stanza) splitting of lyric text
//! - Database initialization and schema migrations
//! - Configuration loading
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod verse;

pub use db::models::{NewSong, Song, SongFilter, SongInfo};
pub use error::{Error, Result};
