//! End-to-end tests for the sync engine over a scripted remote source

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tempfile::TempDir;
use webmirror_config::{Config, ConfigBuilder};
use webmirror_sync::SyncEngine;
use webmirror_types::{Error, NullObserver, RemoteSource, Result, SyncOutcome};

/// In-memory remote source serving a listing built from entries
struct ScriptedSource {
    markup: String,
    files: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
}

impl ScriptedSource {
    fn new(entries: &[(&str, &str)]) -> Self {
        let mut markup = String::from("<html><body><pre>");
        let mut files = HashMap::new();
        for (filename, signature) in entries {
            markup.push_str(&format!(
                "{signature} <a href=\"/{filename}\">{filename}</a><br>"
            ));
            files.insert(filename.to_string(), format!("content of {filename}").into_bytes());
        }
        markup.push_str("</pre></body></html>");

        Self {
            markup,
            files,
            failing: HashSet::new(),
        }
    }

    fn failing_on(mut self, filename: &str) -> Self {
        self.failing.insert(filename.to_string());
        self
    }
}

#[async_trait]
impl RemoteSource for ScriptedSource {
    async fn fetch_listing(&self) -> Result<String> {
        Ok(self.markup.clone())
    }

    async fn fetch_file(&self, filename: &str, dest: &Path) -> Result<()> {
        if self.failing.contains(filename) {
            return Err(Error::network(format!("injected failure for {filename}")));
        }
        let body = self
            .files
            .get(filename)
            .ok_or_else(|| Error::network(format!("{filename} not in listing")))?;
        tokio::fs::write(dest, body).await?;
        Ok(())
    }
}

fn config_for(target: &TempDir, staging: &TempDir) -> Config {
    ConfigBuilder::new()
        .url("https://example.com/tools/")
        .directory(target.path())
        .cache_dir(staging.path())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_first_run_downloads_everything_listed() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let source = ScriptedSource::new(&[("a.exe", "sigA1"), ("b.exe", "sigB1")]);
    let engine = SyncEngine::new(config_for(&target, &staging), source);

    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.outcome, SyncOutcome::Synced);
    assert_eq!(report.files_new, 2);
    assert_eq!(report.files_updated, 0);
    assert!(target.path().join("a.exe").exists());
    assert!(target.path().join("b.exe").exists());
    assert!(target.path().join(".syncstatus").exists());
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let entries = [("a.exe", "sigA1"), ("b.exe", "sigB1")];

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    engine.run(&NullObserver).await.unwrap();

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.outcome, SyncOutcome::UpToDate);
    assert_eq!(report.summary.planned(), 0);
    assert_eq!(report.summary.up_to_date_count, 2);
}

#[tokio::test]
async fn test_noop_run_leaves_status_file_untouched() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let entries = [("a.exe", "sigA1")];

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    engine.run(&NullObserver).await.unwrap();
    let before = tokio::fs::read(target.path().join(".syncstatus")).await.unwrap();

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    engine.run(&NullObserver).await.unwrap();
    let after = tokio::fs::read(target.path().join(".syncstatus")).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_changed_signature_downloads_as_update() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();

    let engine = SyncEngine::new(
        config_for(&target, &staging),
        ScriptedSource::new(&[("a.exe", "sigA1")]),
    );
    engine.run(&NullObserver).await.unwrap();

    let engine = SyncEngine::new(
        config_for(&target, &staging),
        ScriptedSource::new(&[("a.exe", "sigA2")]),
    );
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.files_new, 0);
    assert_eq!(report.files_updated, 1);
    assert_eq!(report.summary.update_count, 1);
}

#[tokio::test]
async fn test_failed_transfer_is_retried_next_run() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let entries = [("a.exe", "sigA1"), ("b.exe", "sigB1")];

    let source = ScriptedSource::new(&entries).failing_on("b.exe");
    let engine = SyncEngine::new(config_for(&target, &staging), source);
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.files_new, 1);
    assert_eq!(report.failed, vec!["b.exe".to_string()]);
    assert!(!target.path().join("b.exe").exists());

    // the failed item never entered the status file, so the next run
    // plans it again as new
    let status = tokio::fs::read_to_string(target.path().join(".syncstatus"))
        .await
        .unwrap();
    assert!(status.contains("a.exe;sigA1"));
    assert!(!status.contains("b.exe"));

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.files_new, 1);
    assert_eq!(report.summary.up_to_date_count, 1);
    assert!(target.path().join("b.exe").exists());
}

#[tokio::test]
async fn test_ignored_entries_are_never_downloaded() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let entries = [("readme.txt", "sig1"), ("a.exe", "sigA1")];

    let engine = SyncEngine::new(config_for(&target, &staging), ScriptedSource::new(&entries));
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.files_new, 1);
    assert!(target.path().join("a.exe").exists());
    assert!(!target.path().join("readme.txt").exists());

    // the seeded ignore file keeps the exclusion user-editable
    assert!(target.path().join(".syncignore").exists());
}

#[tokio::test]
async fn test_successful_entries_survive_a_later_partial_run() {
    let target = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();

    let engine = SyncEngine::new(
        config_for(&target, &staging),
        ScriptedSource::new(&[("a.exe", "sigA1"), ("b.exe", "sigB1")]),
    );
    engine.run(&NullObserver).await.unwrap();

    // next listing updates only b.exe, and that download fails
    let source =
        ScriptedSource::new(&[("a.exe", "sigA1"), ("b.exe", "sigB2")]).failing_on("b.exe");
    let engine = SyncEngine::new(config_for(&target, &staging), source);
    let report = engine.run(&NullObserver).await.unwrap();

    assert_eq!(report.files_updated, 0);
    assert_eq!(report.files_failed(), 1);

    // a.exe keeps its record and b.exe keeps the old signature, so only
    // b.exe is re-planned on the following run
    let status = tokio::fs::read_to_string(target.path().join(".syncstatus"))
        .await
        .unwrap();
    assert!(status.contains("a.exe;sigA1"));
    assert!(status.contains("b.exe;sigB1"));
}
