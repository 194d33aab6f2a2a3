//! List query builder
//!
//! Accumulates optional equality predicates and bind parameters, then
//! composes one parameterized statement. Only column names known at compile
//! time are written into the SQL text; every user-supplied value is bound.

use songlib_common::SongFilter;
use sqlx::{Encode, QueryBuilder, Sqlite, Type};

use crate::pagination::Page;

/// Columns selected for a full song row, in `Song` field order
pub const SONG_COLUMNS: &str = "id, group_name, song, release_date, text, link";

/// Builder for `SELECT ... FROM songs` with optional filters
pub struct SongListQuery {
    builder: QueryBuilder<'static, Sqlite>,
    predicates: usize,
}

impl SongListQuery {
    pub fn new() -> Self {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(SONG_COLUMNS).push(" FROM songs");
        Self {
            builder,
            predicates: 0,
        }
    }

    /// Add `column = ?` when `value` is present
    pub fn eq<T>(mut self, column: &'static str, value: Option<T>) -> Self
    where
        T: 'static + Encode<'static, Sqlite> + Type<Sqlite>,
    {
        if let Some(value) = value {
            let keyword = if self.predicates == 0 { " WHERE " } else { " AND " };
            self.builder.push(keyword).push(column).push(" = ").push_bind(value);
            self.predicates += 1;
        }
        self
    }

    /// Apply every set field of `filter`
    pub fn filter(self, filter: &SongFilter) -> Self {
        self.eq("group_name", filter.group.clone())
            .eq("song", filter.title.clone())
            .eq("release_date", filter.release_date)
    }

    /// Order by id and window the result; finishes the statement
    pub fn paginate(mut self, page: Page) -> QueryBuilder<'static, Sqlite> {
        self.builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        self.builder
    }
}

impl Default for SongListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(2, 10).unwrap()
    }

    #[test]
    fn test_unfiltered_query() {
        let qb = SongListQuery::new().filter(&SongFilter::default()).paginate(page());
        assert_eq!(
            qb.sql(),
            "SELECT id, group_name, song, release_date, text, link FROM songs \
             ORDER BY id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_filters_are_anded_in_order() {
        let filter = SongFilter::from_params(Some("Muse"), None, Some("2006-07-16")).unwrap();
        let qb = SongListQuery::new().filter(&filter).paginate(page());
        assert_eq!(
            qb.sql(),
            "SELECT id, group_name, song, release_date, text, link FROM songs \
             WHERE group_name = ? AND release_date = ? ORDER BY id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_all_filters() {
        let filter = SongFilter::from_params(Some("Muse"), Some("Uprising"), Some("2009-09-07")).unwrap();
        let qb = SongListQuery::new().filter(&filter).paginate(page());
        assert!(qb
            .sql()
            .contains("WHERE group_name = ? AND song = ? AND release_date = ?"));
    }

    #[test]
    fn test_user_input_never_in_sql_text() {
        let hostile = "x'; DROP TABLE songs; --";
        let filter = SongFilter::from_params(Some(hostile), Some(hostile), None).unwrap();
        let qb = SongListQuery::new().filter(&filter).paginate(page());
        assert!(!qb.sql().contains("DROP"));
        assert!(!qb.sql().contains(hostile));
    }
}
