//! Placement scripts for headless runs.
//!
//! One command per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! place ferriswheel 5 5
//! place coffeecup 12 5 90
//! delete 5 2
//! ```

use parkcraft_core::{Anchor, Layout, PlacementError, Rotation};
use tracing::{debug, warn};

use crate::error::ToolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Place {
        kind: String,
        anchor: Anchor,
        rotation: Rotation,
    },
    /// Deletes the object whose footprint contains the cell.
    Delete { x: i32, y: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source.
    pub line: usize,
    pub command: ScriptCommand,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ToolError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text).map_err(|message| ToolError::Script { line, message })?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

fn parse_command(text: &str) -> Result<ScriptCommand, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        ["place", kind, x, y] => Ok(ScriptCommand::Place {
            kind: kind.to_string(),
            anchor: Anchor::new(parse_coord(x)?, parse_coord(y)?),
            rotation: Rotation::Deg0,
        }),
        ["place", kind, x, y, rotation] => Ok(ScriptCommand::Place {
            kind: kind.to_string(),
            anchor: Anchor::new(parse_coord(x)?, parse_coord(y)?),
            rotation: rotation.parse::<Rotation>().map_err(|e| e.to_string())?,
        }),
        ["delete", x, y] => Ok(ScriptCommand::Delete {
            x: parse_coord(x)?,
            y: parse_coord(y)?,
        }),
        ["place", ..] => Err("expected: place <kind> <x> <y> [rotation]".to_string()),
        ["delete", ..] => Err("expected: delete <x> <y>".to_string()),
        [other, ..] => Err(format!("unknown command {other:?}")),
        [] => Err("empty command".to_string()),
    }
}

fn parse_coord(word: &str) -> Result<i32, String> {
    word.parse()
        .map_err(|_| format!("invalid coordinate {word:?}"))
}

/// Outcome of applying a script.
#[derive(Debug, Default)]
pub struct ScriptReport {
    pub placed: usize,
    pub deleted: usize,
    /// Delete commands that hit no object.
    pub missed: usize,
    pub rejected: Vec<(usize, PlacementError)>,
}

/// Applies `lines` to `layout` in order.
///
/// Failed placements are logged and collected in the report, unless `strict`
/// is set, in which case the first one stops the run.
pub fn apply(
    layout: &mut Layout,
    lines: &[ScriptLine],
    strict: bool,
) -> Result<ScriptReport, ToolError> {
    let mut report = ScriptReport::default();
    for ScriptLine { line, command } in lines {
        match command {
            ScriptCommand::Place {
                kind,
                anchor,
                rotation,
            } => match layout.try_place(*anchor, kind, *rotation) {
                Ok(_) => report.placed += 1,
                Err(source) if strict => {
                    return Err(ToolError::Placement {
                        line: *line,
                        source,
                    });
                }
                Err(err) => {
                    warn!(line, %err, "placement failed");
                    report.rejected.push((*line, err));
                }
            },
            ScriptCommand::Delete { x, y } => match layout.delete_at(*x, *y) {
                Some(_) => report.deleted += 1,
                None => {
                    debug!(line, x, y, "nothing to delete");
                    report.missed += 1;
                }
            },
        }
    }
    Ok(report)
}
