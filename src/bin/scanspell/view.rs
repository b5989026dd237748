//! Snapshot of the session handed to the writer thread.

use scanspell::scan::{OptionItem, Stage};
use scanspell::screens::{ScanSession, ScreenItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) text: String,
    pub(crate) highlighted: bool,
}

/// One drawn row: an optional label followed by inline cells (a row of keys or
/// a setting's values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) indent: u16,
    pub(crate) label: Option<String>,
    pub(crate) highlighted: bool,
    pub(crate) cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) title: String,
    pub(crate) lines: Vec<Line>,
    pub(crate) details: Vec<String>,
    pub(crate) notice: Option<String>,
    pub(crate) status: String,
}

pub(crate) fn build_frame(session: &ScanSession) -> Frame {
    let engine = session.engine();
    let mut lines = Vec::new();
    push_items(&mut lines, engine.tree().items(), Some(engine.path()), 0);
    Frame {
        title: session.screen().title().to_string(),
        lines,
        details: session.screen().detail_lines(),
        notice: session.notice().map(str::to_string),
        status: status_text(session),
    }
}

/// `rest` is the part of the highlight path below this level, `None` when the
/// parent is not on the path.
fn push_items(
    lines: &mut Vec<Line>,
    items: &[OptionItem<ScreenItem>],
    rest: Option<&[usize]>,
    indent: u16,
) {
    for (idx, item) in items.iter().enumerate() {
        let highlighted = rest == Some(&[idx][..]);
        let below = rest
            .filter(|path| path.first() == Some(&idx))
            .map(|path| &path[1..]);
        if item.is_leaf() {
            lines.push(Line {
                indent,
                label: Some(item.label.clone()),
                highlighted,
                cells: Vec::new(),
            });
        } else if item.children.iter().all(OptionItem::is_leaf) {
            let cells: Vec<Cell> = item
                .children
                .iter()
                .enumerate()
                .map(|(child, leaf)| Cell {
                    text: leaf.label.clone(),
                    highlighted: below == Some(&[child][..]),
                })
                .collect();
            let joined = item
                .children
                .iter()
                .filter(|leaf| !leaf.is_placeholder())
                .map(|leaf| leaf.label.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            // Key rows are labelled by their keys; skip the repeat.
            let label = (item.label != joined).then(|| item.label.clone());
            lines.push(Line {
                indent,
                label,
                highlighted,
                cells,
            });
        } else {
            lines.push(Line {
                indent,
                label: Some(item.label.clone()),
                highlighted,
                cells: Vec::new(),
            });
            push_items(lines, &item.children, below, indent + 2);
        }
    }
}

fn status_text(session: &ScanSession) -> String {
    if session.screen().is_capturing_key() {
        return "Press the key to use as the switch".to_string();
    }
    let hint = match session.settings().activation_key() {
        Some(' ') => "press Space or click [ Select ]".to_string(),
        Some(key) => format!("press '{key}' or click [ Select ]"),
        None => "click [ Select ]".to_string(),
    };
    match session.engine().stage() {
        Stage::Idle => format!("Idle · {hint} to scan · Ctrl+Q quits"),
        Stage::Scanning(depth) => format!(
            "Scanning level {} · {} ms · {hint} to choose",
            depth + 1,
            session.cycle_interval().as_millis()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanspell::inject::RecordingSink;
    use scanspell::predict::{BigramTable, Predictor, SharedPredictor};
    use scanspell::screens::ScreenKind;
    use scanspell::settings::{SettingsStore, UserSettings};

    fn session(kind: ScreenKind) -> ScanSession {
        ScanSession::new(
            kind,
            UserSettings::default(),
            SettingsStore::in_memory(),
            SharedPredictor::new(Predictor::new(BigramTable::new())),
            Box::new(RecordingSink::new()),
        )
    }

    #[test]
    fn main_menu_lists_entries_and_highlights_first() {
        let mut session = session(ScreenKind::MainMenu);
        let frame = build_frame(&session);
        assert_eq!(frame.title, "Main Menu");
        assert_eq!(frame.lines.len(), 4);
        assert!(frame.lines.iter().all(|line| !line.highlighted));
        assert!(frame.status.starts_with("Idle"));

        session.activate();
        let frame = build_frame(&session);
        assert!(frame.lines[0].highlighted);
        assert!(frame.status.starts_with("Scanning level 1 · 500 ms"));
    }

    #[test]
    fn key_rows_show_cells_without_repeating_the_label() {
        let mut session = session(ScreenKind::Writing);
        session.activate();
        session.activate();
        let frame = build_frame(&session);
        let first = &frame.lines[0];
        assert_eq!(first.label, None);
        assert!(first.cells[0].highlighted);
        assert!(!first.cells[1].highlighted);
        assert_eq!(frame.details[0], "> ");
    }

    #[test]
    fn settings_rows_keep_their_label() {
        let session = session(ScreenKind::Settings);
        let frame = build_frame(&session);
        assert_eq!(frame.lines[0].label.as_deref(), Some("Cycle Speed: Normal"));
        assert_eq!(frame.lines[0].cells.len(), 3);
    }
}
