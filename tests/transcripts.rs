use std::io::Write;

use debate_threads::config::Config;
use debate_threads::debate::{AgentId, DebateFixtures};
use debate_threads::models::{load_messages, save_messages};
use debate_threads::summary::ThreadSummary;
use debate_threads::{organize, ThreadError, ViewMode};
use pretty_assertions::assert_eq;

const TRANSCRIPT: &str = r#"[
  {"id": "demo-2", "senderId": "claude", "senderType": "ai", "senderName": "Claude",
   "content": "Subtract 5 from both sides, then divide by 2: x = 4.",
   "timestamp": "2024-05-01T10:00:05Z", "replyToId": "demo-1", "threadId": "math-help"},
  {"id": "demo-1", "senderId": "user", "senderType": "human", "senderName": "Sam",
   "content": "How do I solve 2x + 5 = 13?", "timestamp": "2024-05-01T10:00:00Z"},
  {"id": "demo-3", "senderId": "user", "senderType": "human", "senderName": "Sam",
   "content": "Can someone summarize recent work on protein folding?",
   "timestamp": "2024-05-01T10:01:00Z"},
  {"id": "demo-5", "senderId": "user", "senderType": "human", "senderName": "Sam",
   "content": "Why divide by 2 last?", "timestamp": "2024-05-01T10:02:00Z", "replyToId": "demo-2"},
  {"id": "demo-4", "senderId": "gemini", "senderType": "ai", "senderName": "Gemini",
   "content": "Here are three key papers.", "timestamp": "2024-05-01T10:01:30Z", "replyToId": "demo-3"},
  {"id": "late", "senderId": "viewer-9", "senderType": "viewer", "senderName": "Viewer",
   "content": "+1", "timestamp": "2024-05-01T10:00:30Z", "replyToId": "deleted-msg"}
]"#;

fn write_transcript() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TRANSCRIPT.as_bytes()).unwrap();
    file
}

#[test]
fn threaded_transcript_from_file() {
    let file = write_transcript();
    let messages = load_messages(file.path()).unwrap();
    let organized = organize(&messages, ViewMode::Threaded);

    let order: Vec<(&str, Option<usize>)> = organized
        .iter()
        .map(|m| (m.id.as_str(), m.thread_depth))
        .collect();
    assert_eq!(
        order,
        vec![
            ("demo-1", Some(0)),
            ("demo-2", Some(1)),
            ("demo-5", Some(2)),
            ("demo-3", Some(0)),
            ("demo-4", Some(1)),
            ("late", Some(0)),
        ]
    );

    let summary = ThreadSummary::from_organized(&organized);
    assert_eq!(summary.root_count, 2);
    assert_eq!(summary.orphan_count, 1);
    assert_eq!(summary.max_depth, 2);
    assert_eq!(summary.participation[0], ("Sam".to_string(), 3));
}

#[test]
fn chronological_transcript_from_file() {
    let file = write_transcript();
    let messages = load_messages(file.path()).unwrap();
    let organized = organize(&messages, ViewMode::Chronological);
    let ids: Vec<&str> = organized.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["demo-1", "demo-2", "late", "demo-3", "demo-4", "demo-5"]);
    assert!(organized.iter().all(|m| m.thread_depth.is_none()));
}

#[test]
fn organized_output_survives_save_and_load() {
    let file = write_transcript();
    let messages = load_messages(file.path()).unwrap();
    let organized = organize(&messages, ViewMode::Threaded);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("organized.json");
    save_messages(&out, &organized).unwrap();
    assert_eq!(load_messages(&out).unwrap(), organized);
}

#[test]
fn malformed_transcript_is_a_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[{\"id\": \"a\"}]").unwrap();
    assert!(matches!(load_messages(file.path()), Err(ThreadError::Json(_))));

    let missing = std::path::Path::new("/definitely/not/here.json");
    assert!(matches!(load_messages(missing), Err(ThreadError::Io(_))));
}

#[test]
fn config_and_fixtures_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures_path = dir.path().join("debates.toml");
    std::fs::write(
        &fixtures_path,
        r#"
[[debates]]
id = "cities"
title = "Car-free cities"
description = "Should downtowns ban private cars?"

[[debates.participants]]
agent = "4"
expertise = "Traffic engineering"
personality = "Precise"
perspective = "Throughput"
"#,
    )
    .unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("preview_chars = 20\nfixtures_path = {:?}\n", fixtures_path.display().to_string()),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    assert_eq!(config.preview_chars, 20);
    let fixtures = DebateFixtures::load(&config.fixtures_path().unwrap()).unwrap();
    let debate = fixtures.get("cities").unwrap();
    assert_eq!(debate.next_speaker(7).unwrap().agent, AgentId::Mistral);
}
