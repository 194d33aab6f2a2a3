//! In-memory song store
//!
//! Mirrors the SQLite adapter's semantics (uniqueness of (group, title),
//! id ordering, NotFound reporting) without a database.

use async_trait::async_trait;
use songlib_common::verse::verse_at;
use songlib_common::{Error, NewSong, Result, Song, SongFilter, SongInfo};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::SongStore;
use crate::pagination::Page;

#[derive(Default)]
struct Inner {
    songs: BTreeMap<i64, Song>,
    next_id: i64,
}

impl Inner {
    fn pair_taken(&self, group: &str, title: &str, except: Option<i64>) -> bool {
        self.songs
            .values()
            .any(|s| s.group == group && s.title == title && Some(s.id) != except)
    }
}

/// Song store kept in a `BTreeMap` keyed by id
#[derive(Default)]
pub struct MemorySongStore {
    inner: RwLock<Inner>,
}

impl MemorySongStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(song: &NewSong) -> Error {
    Error::Conflict(format!(
        "song '{}' by '{}' already exists",
        song.title, song.group
    ))
}

#[async_trait]
impl SongStore for MemorySongStore {
    async fn list(&self, filter: &SongFilter, page: Page) -> Result<Vec<Song>> {
        let inner = self.inner.read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(inner
            .songs
            .values()
            .filter(|s| filter.matches(s))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, song: NewSong) -> Result<Song> {
        let mut inner = self.inner.write().await;
        if inner.pair_taken(&song.group, &song.title, None) {
            return Err(conflict(&song));
        }

        inner.next_id += 1;
        let created = song.into_song(inner.next_id);
        inner.songs.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Song> {
        self.inner
            .read()
            .await
            .songs
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))
    }

    async fn update(&self, id: i64, song: NewSong) -> Result<Song> {
        let mut inner = self.inner.write().await;
        if !inner.songs.contains_key(&id) {
            return Err(Error::NotFound(format!("song {}", id)));
        }
        if inner.pair_taken(&song.group, &song.title, Some(id)) {
            return Err(conflict(&song));
        }

        let updated = song.into_song(id);
        inner.songs.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner
            .write()
            .await
            .songs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))
    }

    async fn get_verse(&self, id: i64, verse: usize) -> Result<String> {
        let song = self.get_by_id(id).await?;
        verse_at(song.text.as_deref().unwrap_or_default(), verse).map(str::to_string)
    }

    async fn get_info(&self, group: &str, title: &str) -> Result<SongInfo> {
        self.inner
            .read()
            .await
            .songs
            .values()
            .find(|s| s.group == group && s.title == title)
            .cloned()
            .map(SongInfo::from)
            .ok_or_else(|| Error::NotFound(format!("song '{}' by '{}'", title, group)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = MemorySongStore::new();
        let a = store.create(NewSong::new("Muse", "Uprising")).await.unwrap();
        let b = store.create(NewSong::new("Muse", "Starlight")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_duplicate_and_missing() {
        let store = MemorySongStore::new();
        store.create(NewSong::new("Muse", "Uprising")).await.unwrap();

        assert!(matches!(
            store.create(NewSong::new("Muse", "Uprising")).await,
            Err(Error::Conflict(_))
        ));
        assert!(matches!(store.get_by_id(5).await, Err(Error::NotFound(_))));
        assert!(matches!(store.delete(5).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_may_keep_its_own_pair() {
        let store = MemorySongStore::new();
        let song = store.create(NewSong::new("Muse", "Uprising")).await.unwrap();

        let updated = store
            .update(song.id, NewSong::new("Muse", "Uprising").with_link("https://muse.mu"))
            .await
            .unwrap();

        assert_eq!(updated.link.as_deref(), Some("https://muse.mu"));
    }

    #[tokio::test]
    async fn test_list_window_and_filter() {
        let store = MemorySongStore::new();
        for n in 1..=5 {
            store.create(NewSong::new("Band", format!("T{}", n))).await.unwrap();
        }
        store.create(NewSong::new("Other", "T1")).await.unwrap();

        let filter = SongFilter::from_params(Some("Band"), None, None).unwrap();
        let page = store.list(&filter, Page::new(2, 2).unwrap()).await.unwrap();

        let titles: Vec<_> = page.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["T3", "T4"]);
    }

    #[tokio::test]
    async fn test_verse() {
        let store = MemorySongStore::new();
        let song = store
            .create(NewSong::new("Band", "Song").with_text("A line\n\nB line\n\nC line"))
            .await
            .unwrap();

        assert_eq!(store.get_verse(song.id, 3).await.unwrap(), "C line");
        assert!(matches!(
            store.get_verse(song.id, 4).await,
            Err(Error::VerseOutOfRange { .. })
        ));
    }
}
