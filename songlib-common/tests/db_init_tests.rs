//! Tests for file-backed database initialization

use songlib_common::config::PartialConfig;
use songlib_common::db::init::init_database;
use songlib_common::db::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use std::io::Write;

fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("songlib.db");

    let pool = init_database(&sqlite_url(&db_path)).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let url = sqlite_url(&dir.path().join("songlib.db"));

    let pool = init_database(&url).await.unwrap();
    sqlx::query("INSERT INTO songs (group_name, song, text) VALUES ('Muse', 'Uprising', 'Paranoia')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let reopened = init_database(&url).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&reopened)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(get_schema_version(&reopened).await.unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_config_file_round_trip_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr = \"0.0.0.0:8081\"").unwrap();
    writeln!(file, "default_verse = 2").unwrap();

    let parsed = PartialConfig::from_toml_file(file.path()).unwrap();

    assert_eq!(parsed.listen_addr.as_deref(), Some("0.0.0.0:8081"));
    assert_eq!(parsed.default_verse, Some(2));
}
