//! SQLite-backed song store

use async_trait::async_trait;
use songlib_common::db::init::init_database;
use songlib_common::verse::verse_at;
use songlib_common::{Error, NewSong, Result, Song, SongFilter, SongInfo};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::query::{SongListQuery, SONG_COLUMNS};
use super::SongStore;
use crate::pagination::Page;

/// Song store over a `songs` table in SQLite
#[derive(Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    /// Wrap a pool whose schema is already migrated
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run migrations
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool = init_database(database_url).await?;
        Ok(Self::new(pool))
    }
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        group: row.try_get("group_name")?,
        title: row.try_get("song")?,
        release_date: row.try_get("release_date")?,
        text: row.try_get("text")?,
        link: row.try_get("link")?,
    })
}

/// Map a UNIQUE (group_name, song) violation to `Error::Conflict`
fn conflict_or(err: sqlx::Error, song: &NewSong) -> Error {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => Error::Conflict(
            format!("song '{}' by '{}' already exists", song.title, song.group),
        ),
        other => Error::Database(other),
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn list(&self, filter: &SongFilter, page: Page) -> Result<Vec<Song>> {
        let mut query = SongListQuery::new().filter(filter).paginate(page);
        debug!(
            "Listing songs: filter={:?} limit={} offset={}",
            filter,
            page.limit(),
            page.offset()
        );

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(song_from_row).collect()
    }

    async fn create(&self, song: NewSong) -> Result<Song> {
        let sql = format!(
            "INSERT INTO songs (group_name, song, release_date, text, link) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (group_name, song) DO NOTHING \
             RETURNING {}",
            SONG_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&song.group)
            .bind(&song.title)
            .bind(song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or(e, &song))?;

        // No returned row means the insert was skipped by ON CONFLICT
        let Some(row) = row else {
            return Err(Error::Conflict(format!(
                "song '{}' by '{}' already exists",
                song.title, song.group
            )));
        };

        let created = song_from_row(&row)?;
        info!("Created song {} ('{}' by '{}')", created.id, created.title, created.group);
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Song> {
        let sql = format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))?;

        song_from_row(&row)
    }

    async fn update(&self, id: i64, song: NewSong) -> Result<Song> {
        let sql = format!(
            "UPDATE songs SET group_name = ?, song = ?, release_date = ?, text = ?, link = ? \
             WHERE id = ? \
             RETURNING {}",
            SONG_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&song.group)
            .bind(&song.title)
            .bind(song.release_date)
            .bind(&song.text)
            .bind(&song.link)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_or(e, &song))?
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))?;

        info!("Updated song {}", id);
        song_from_row(&row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("song {}", id)));
        }

        info!("Deleted song {}", id);
        Ok(())
    }

    async fn get_verse(&self, id: i64, verse: usize) -> Result<String> {
        let text = sqlx::query_scalar::<_, Option<String>>("SELECT text FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("song {}", id)))?;

        debug!("Extracting verse {} of song {}", verse, id);
        verse_at(text.as_deref().unwrap_or_default(), verse).map(str::to_string)
    }

    async fn get_info(&self, group: &str, title: &str) -> Result<SongInfo> {
        let row = sqlx::query(
            "SELECT release_date, text, link FROM songs WHERE group_name = ? AND song = ?",
        )
        .bind(group)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("song '{}' by '{}'", title, group)))?;

        Ok(SongInfo {
            release_date: row.try_get("release_date")?,
            text: row.try_get("text")?,
            link: row.try_get("link")?,
        })
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        debug!("Closing database pool");
        self.pool.close().await;
    }
}
