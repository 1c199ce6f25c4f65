//! Subcommand implementations.

use std::io::Write;

use board_core::{
    presets, Board, BoardDocument, BoardError, BoardState, ElementId, ElementKind, Point,
};

use crate::replay::{parse_script, replay};
use crate::{CliConfig, CliError, Command};

/// Run `command` against the configured slot, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the store can't be opened, the command fails, or the
/// board can't be saved.
pub fn run<W: Write>(config: &CliConfig, command: &Command, out: &mut W) -> Result<(), CliError> {
    let mut store = config.open_store()?;
    let mut board = store.load(&config.slot);
    tracing::info!(slot = %config.slot, elements = board.len(), "board loaded");

    let changed = match command {
        Command::Replay { script, dry_run } => {
            let text = std::fs::read_to_string(script)?;
            let events = parse_script(&text)?;
            let mut state = BoardState::new(board);
            let report = replay(&mut state, &events, out)?;
            tracing::info!(
                events = report.events,
                commits = report.commits,
                ignored = report.ignored,
                "replay finished"
            );
            let changed = state.has_local_changes && !dry_run;
            board = state.board;
            changed
        }
        Command::Show { json } => {
            if *json {
                writeln!(out, "{}", BoardDocument::from_board(&board).to_json()?)?;
            } else {
                write_summary(&board, out)?;
            }
            false
        }
        Command::AddNote { x, y, text } => {
            let id = place(&mut board, ElementKind::Note, Point::new(*x, *y), text.clone());
            writeln!(out, "{id}")?;
            true
        }
        Command::AddSticker { x, y, emoji } => {
            let id = place(&mut board, ElementKind::Sticker, Point::new(*x, *y), emoji.clone());
            writeln!(out, "{id}")?;
            true
        }
        Command::Delete { id } => {
            let id = ElementId::from_string(id.as_str());
            board
                .delete(&id)
                .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
            true
        }
        Command::Unlock { id, secret } => {
            board.unlock(&ElementId::from_string(id.as_str()), secret)?;
            true
        }
        Command::Clear => {
            board.clear();
            true
        }
    };

    if changed {
        store.save(&config.slot, &board)?;
        tracing::info!(slot = %config.slot, elements = board.len(), "board saved");
    }
    Ok(())
}

fn place(board: &mut Board, kind: ElementKind, click: Point, content: Option<String>) -> ElementId {
    let viewport = board.viewport();
    let mut new = match kind {
        ElementKind::Sticker => presets::sticker(viewport.screen_to_board(click)),
        _ => presets::note(viewport.screen_to_board(click)),
    };
    if let Some(content) = content {
        new.content = content;
    }
    let element = board.create(new);
    element.id
}

fn write_summary<W: Write>(board: &Board, out: &mut W) -> std::io::Result<()> {
    let viewport = board.viewport();
    writeln!(
        out,
        "viewport x={} y={} scale={}",
        viewport.x, viewport.y, viewport.scale
    )?;
    for element in board.elements() {
        let content: String = element.content.chars().take(32).collect();
        writeln!(
            out,
            "{}  {}  at ({}, {})  {}x{}  {}°{}  {:?}",
            element.id,
            element.kind,
            element.position.x,
            element.position.y,
            element.size.width,
            element.size.height,
            element.rotation,
            if element.is_locked { "  locked" } else { "" },
            content,
        )?;
    }
    Ok(())
}
