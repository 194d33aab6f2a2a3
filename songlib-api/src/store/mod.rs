//! Song storage
//!
//! `SongStore` is the capability the HTTP layer depends on. The SQLite
//! adapter is used in production; the in-memory store backs tests and
//! local experiments.

use async_trait::async_trait;
use songlib_common::{NewSong, Result, Song, SongFilter, SongInfo};

use crate::pagination::Page;

pub mod memory;
pub mod query;
pub mod sqlite;

pub use memory::MemorySongStore;
pub use sqlite::SqliteSongStore;

/// Storage operations over the songs table
///
/// Implementations never retry; a failed store call is returned as is.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Songs matching `filter`, ordered by ascending id, windowed by `page`
    async fn list(&self, filter: &SongFilter, page: Page) -> Result<Vec<Song>>;

    /// Insert a new song
    ///
    /// # Errors
    /// `Error::Conflict` if the (group, title) pair already exists; nothing
    /// is written in that case.
    async fn create(&self, song: NewSong) -> Result<Song>;

    /// # Errors
    /// `Error::NotFound` when no song has this id
    async fn get_by_id(&self, id: i64) -> Result<Song>;

    /// Replace every mutable field of song `id`
    ///
    /// # Errors
    /// `Error::NotFound` for an unknown id, `Error::Conflict` when the new
    /// (group, title) pair belongs to another song.
    async fn update(&self, id: i64, song: NewSong) -> Result<Song>;

    /// Hard-delete song `id`
    ///
    /// # Errors
    /// `Error::NotFound` when nothing was deleted
    async fn delete(&self, id: i64) -> Result<()>;

    /// Stanza `verse` (1-based) of the song's lyric text
    ///
    /// # Errors
    /// `Error::NotFound` for an unknown id, `Error::VerseOutOfRange` when
    /// the text has fewer stanzas.
    async fn get_verse(&self, id: i64, verse: usize) -> Result<String>;

    /// Release date, text and link for an exact (group, title) match
    async fn get_info(&self, group: &str, title: &str) -> Result<SongInfo>;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<()>;

    /// Release the backing store's connections
    async fn close(&self);
}
