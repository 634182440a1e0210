//! Integration tests for backup and restore.
//!
//! Tests cover:
//! - Timestamped dump files and their .gz copy
//! - Partial files left behind by a failed dump
//! - Restoring from .sql, .sql.gz and .tar.gz sources

mod common;

use common::{remote, FakeDumpTool, FakeServer};
use flate2::write::GzEncoder;
use flate2::Compression;
use mysql_admin::models::request::{BackupRequest, RestoreRequest};
use mysql_admin::services::archive::{ArchiveKind, Archiver, GzArchiver};
use mysql_admin::Error;
use std::fs::{self, File};
use tempfile::TempDir;

const SCRIPT: &str = "CREATE TABLE `t` (`id` int);\nINSERT INTO `t` VALUES (1),(2);\n";
const DSN: &str = "root:adminpw@tcp(127.0.0.1:3306)/app?charset=utf8mb4&parseTime=true&loc=Asia%2FShanghai";

fn backup_request(dir: &std::path::Path) -> BackupRequest {
    BackupRequest {
        name: "app".to_string(),
        format: "utf8mb4".to_string(),
        target_dir: dir.to_path_buf(),
    }
}

fn restore_request(source: &std::path::Path) -> RestoreRequest {
    RestoreRequest {
        name: "app".to_string(),
        format: "utf8mb4".to_string(),
        source_file: source.to_path_buf(),
    }
}

// ========== BACKUP TESTS ==========

#[tokio::test]
async fn test_backup_writes_sql_and_gz() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("backups").join("mysql");
    let tool = FakeDumpTool::new(SCRIPT);
    let handle = remote(&FakeServer::new()).with_dump_tool(tool.clone());

    let file_name = handle.backup(&backup_request(&target)).await.unwrap();

    assert_eq!(file_name.parent().unwrap(), target.as_path());
    let base = file_name.file_name().unwrap().to_string_lossy().to_string();
    assert!(base.starts_with("app_"));
    assert!(base.ends_with(".sql"));
    // app_ + 14 digit timestamp + .sql
    assert_eq!(base.len(), "app_".len() + 14 + ".sql".len());
    assert!(base["app_".len().."app_".len() + 14]
        .chars()
        .all(|c| c.is_ascii_digit()));

    assert_eq!(fs::read_to_string(&file_name).unwrap(), SCRIPT);
    let archive = target.join(format!("{}.gz", base));
    assert!(archive.exists());

    assert_eq!(tool.dumped(), vec![DSN.to_string()]);
}

#[tokio::test]
async fn test_backup_failure_leaves_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let tool = FakeDumpTool::failing("CREATE TABLE `t`");
    let handle = remote(&FakeServer::new()).with_dump_tool(tool);

    let err = handle
        .backup(&backup_request(temp_dir.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ToolFailed { .. }));

    let files: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(".sql"));
}

// ========== RESTORE TESTS ==========

#[tokio::test]
async fn test_backup_then_restore_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let tool = FakeDumpTool::new(SCRIPT);
    let handle = remote(&FakeServer::new()).with_dump_tool(tool.clone());

    let file_name = handle.backup(&backup_request(temp_dir.path())).await.unwrap();
    let archive = temp_dir
        .path()
        .join(format!("{}.gz", file_name.file_name().unwrap().to_string_lossy()));
    fs::remove_file(&file_name).unwrap();

    handle.restore(&restore_request(&archive)).await.unwrap();

    assert!(file_name.exists());
    assert_eq!(
        tool.restored(),
        vec![(DSN.to_string(), SCRIPT.to_string())]
    );
}

#[tokio::test]
async fn test_restore_plain_sql() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app.sql");
    fs::write(&source, SCRIPT).unwrap();
    let tool = FakeDumpTool::new("");
    let handle = remote(&FakeServer::new()).with_dump_tool(tool.clone());

    handle.restore(&restore_request(&source)).await.unwrap();

    assert_eq!(tool.restored()[0].1, SCRIPT);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_restore_tar_gz() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app_20240101000000.tar.gz");

    let encoder = GzEncoder::new(File::create(&source).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut header = tar::Header::new_gnu();
    header.set_size(SCRIPT.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "app_20240101000000.sql", SCRIPT.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();

    let tool = FakeDumpTool::new("");
    let handle = remote(&FakeServer::new()).with_dump_tool(tool.clone());
    handle.restore(&restore_request(&source)).await.unwrap();

    assert!(temp_dir.path().join("app_20240101000000").is_file());
    assert_eq!(tool.restored()[0].1, SCRIPT);
}

#[tokio::test]
async fn test_restore_corrupt_gz_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app.sql.gz");
    fs::write(&source, "not gzip at all").unwrap();
    let tool = FakeDumpTool::new("");
    let handle = remote(&FakeServer::new()).with_dump_tool(tool.clone());

    let err = handle.restore(&restore_request(&source)).await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(tool.restored().is_empty());
}

#[tokio::test]
async fn test_restore_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let handle = remote(&FakeServer::new()).with_dump_tool(FakeDumpTool::new(""));

    let err = handle
        .restore(&restore_request(&temp_dir.path().join("missing.sql")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_archiver_gzip_sibling() {
    let temp_dir = TempDir::new().unwrap();
    let sql = temp_dir.path().join("app.sql");
    let gz = temp_dir.path().join("app.sql.gz");
    fs::write(&sql, SCRIPT).unwrap();

    GzArchiver.compress(&sql, &gz).unwrap();
    fs::remove_file(&sql).unwrap();
    GzArchiver.decompress(&gz, &sql, ArchiveKind::Gzip).unwrap();

    assert_eq!(fs::read_to_string(&sql).unwrap(), SCRIPT);
}
