//! Pointer script replay.
//!
//! A script is JSON lines, one [`PointerEvent`] per line. Blank lines and
//! lines starting with `#` are skipped. Every preview and commit is written
//! to the output as one JSON object per line.

use std::io::Write;

use board_core::{BoardState, Commit, EventOutcome, HitTarget, PointerEvent, Preview};
use serde::Serialize;

use crate::CliError;

/// Counts gathered while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Events processed.
    pub events: usize,
    /// Sessions started.
    pub sessions: usize,
    /// Preview frames emitted.
    pub previews: usize,
    /// Sessions committed.
    pub commits: usize,
    /// Events without effect.
    pub ignored: usize,
    /// Whether a session was still open when the script ended.
    pub unfinished: bool,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
enum Record<'a> {
    Began { line: usize, target: &'a HitTarget },
    Preview { line: usize, preview: &'a Preview },
    Committed { line: usize, commit: &'a Commit },
}

/// Parse a pointer script into `(line, event)` pairs.
///
/// # Errors
///
/// Returns [`CliError::Script`] naming the first line that isn't an event.
pub fn parse_script(script: &str) -> Result<Vec<(usize, PointerEvent)>, CliError> {
    script
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .map(|(line, text)| {
            serde_json::from_str(text)
                .map(|event| (line, event))
                .map_err(|source| CliError::Script { line, source })
        })
        .collect()
}

/// Feed parsed events through `state`, writing outcomes to `out`.
///
/// A session still open when the script ends has written nothing and is
/// reported as unfinished.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn replay<W: Write>(
    state: &mut BoardState,
    events: &[(usize, PointerEvent)],
    out: &mut W,
) -> Result<ReplayReport, CliError> {
    let mut report = ReplayReport::default();

    for (line, event) in events {
        let line = *line;
        report.events += 1;
        let outcome = state.process_event(event);
        let record = match &outcome {
            EventOutcome::Began(target) => {
                report.sessions += 1;
                Record::Began { line, target }
            }
            EventOutcome::Preview(preview) => {
                report.previews += 1;
                Record::Preview { line, preview }
            }
            EventOutcome::Committed(commit) => {
                report.commits += 1;
                Record::Committed { line, commit }
            }
            EventOutcome::Ignored => {
                tracing::debug!(line, phase = ?event.phase, "event ignored");
                report.ignored += 1;
                continue;
            }
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }

    if let Some(kind) = state.gestures.active_kind() {
        tracing::warn!(gesture = %kind, "script ended mid-gesture, nothing committed");
        report.unfinished = true;
    }

    Ok(report)
}
