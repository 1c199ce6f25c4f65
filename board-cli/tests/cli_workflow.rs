//! End-to-end tests for the board CLI commands against a temporary data dir.

use std::path::Path;

use board_cli::{run, CliConfig, CliError, Command};
use board_core::{BoardError, BoardStore, ElementKind, Position, Viewport};

fn config_in(dir: &Path) -> CliConfig {
    CliConfig {
        data_dir: Some(dir.to_path_buf()),
        ..CliConfig::new()
    }
}

fn run_to_string(config: &CliConfig, command: &Command) -> String {
    let mut out = Vec::new();
    run(config, command, &mut out).expect("command");
    String::from_utf8(out).expect("utf8")
}

fn add_note(config: &CliConfig, x: f64, y: f64) -> String {
    run_to_string(
        config,
        &Command::AddNote {
            x,
            y,
            text: Some("Groceries".into()),
        },
    )
    .trim()
    .to_string()
}

#[test]
fn test_add_note_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    let id = add_note(&config, 120.0, 80.0);

    let mut store = BoardStore::with_data_dir(dir.path()).expect("store");
    let board = store.load(&config.slot);
    let note = board
        .elements()
        .find(|e| e.id.as_str() == id)
        .expect("note saved");
    assert_eq!(note.kind, ElementKind::Note);
    assert_eq!(note.content, "Groceries");
    assert_eq!(note.position, Position::new(120.0, 80.0));
}

#[test]
fn test_replay_drag_is_saved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    add_note(&config, 100.0, 100.0);

    let script = dir.path().join("drag.jsonl");
    std::fs::write(
        &script,
        "# drag the note\n\
         {\"phase\":\"down\",\"x\":150,\"y\":150}\n\
         {\"phase\":\"move\",\"x\":170,\"y\":140}\n\
         {\"phase\":\"move\",\"x\":190,\"y\":135}\n\
         {\"phase\":\"up\",\"x\":190,\"y\":135}\n",
    )
    .expect("write script");

    let output = run_to_string(
        &config,
        &Command::Replay {
            script,
            dry_run: false,
        },
    );
    assert_eq!(output.lines().count(), 4);
    assert!(output.lines().last().is_some_and(|l| l.contains("committed")));

    let mut store = BoardStore::with_data_dir(dir.path()).expect("store");
    let board = store.load(&config.slot);
    let note = board.elements().next().expect("note");
    assert_eq!(note.position, Position::new(140.0, 85.0));
}

#[test]
fn test_replay_pan_dry_run_does_not_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    add_note(&config, 500.0, 500.0);

    let script = dir.path().join("pan.jsonl");
    std::fs::write(
        &script,
        "{\"phase\":\"down\",\"x\":10,\"y\":10}\n\
         {\"phase\":\"move\",\"x\":15,\"y\":10}\n\
         {\"phase\":\"move\",\"x\":18,\"y\":12}\n\
         {\"phase\":\"up\",\"x\":18,\"y\":12}\n",
    )
    .expect("write script");

    let output = run_to_string(
        &config,
        &Command::Replay {
            script,
            dry_run: true,
        },
    );
    assert!(output.contains("\"x\":8.0"));

    let mut store = BoardStore::with_data_dir(dir.path()).expect("store");
    assert_eq!(store.load(&config.slot).viewport(), Viewport::default());
}

#[test]
fn test_delete_missing_element_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    let result = run(
        &config,
        &Command::Delete {
            id: "element-missing".into(),
        },
        &mut std::io::sink(),
    );
    assert!(matches!(
        result,
        Err(CliError::Board(BoardError::ElementNotFound(_)))
    ));
}

#[test]
fn test_unlock_with_wrong_secret_keeps_lock() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("memory-board.json"),
        r#"{"elements":[{"id":"vault","type":"protected","position":{"x":0,"y":0},
            "size":{"width":200,"height":120},"content":"secret note",
            "metadata":{"password":"hunter2"},"isLocked":true}]}"#,
    )
    .expect("write board");
    let config = config_in(dir.path());

    let wrong = run(
        &config,
        &Command::Unlock {
            id: "vault".into(),
            secret: "guess".into(),
        },
        &mut std::io::sink(),
    );
    assert!(matches!(
        wrong,
        Err(CliError::Board(BoardError::WrongSecret(_)))
    ));

    run_to_string(
        &config,
        &Command::Unlock {
            id: "vault".into(),
            secret: "hunter2".into(),
        },
    );
    let mut store = BoardStore::with_data_dir(dir.path()).expect("store");
    let board = store.load(&config.slot);
    assert!(!board.elements().next().expect("vault").is_locked);
}

#[test]
fn test_clear_and_show() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    add_note(&config, 0.0, 0.0);
    run_to_string(
        &config,
        &Command::AddSticker {
            x: 300.0,
            y: 40.0,
            emoji: None,
        },
    );

    let summary = run_to_string(&config, &Command::Show { json: false });
    assert!(summary.contains("note"));
    assert!(summary.contains("sticker"));

    run_to_string(&config, &Command::Clear);
    let json = run_to_string(&config, &Command::Show { json: true });
    let doc: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(doc["elements"].as_array().map(Vec::len), Some(0));
}
