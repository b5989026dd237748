use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::buttons::{Button, ButtonAction};
use crate::view::{Frame, Line};

const SELECT_LABEL: &str = "[ Select ]";
const SELECT_COLUMN: u16 = 2;
/// Bottom rows kept for the Select button and the status line.
const FOOTER_ROWS: u16 = 2;

/// Clip `text` to `width` terminal cells.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut clipped = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        clipped.push(ch);
    }
    clipped
}

/// Writes pieces of one row left to right, dropping whatever falls past `cols`.
struct RowWriter<'a, W: Write> {
    out: &'a mut W,
    used: usize,
    cols: usize,
}

impl<W: Write> RowWriter<'_, W> {
    fn put(&mut self, text: &str, attribute: Option<Attribute>) -> io::Result<()> {
        let room = self.cols.saturating_sub(self.used);
        if room == 0 || text.is_empty() {
            return Ok(());
        }
        let clipped = fit(text, room);
        self.used += clipped.width();
        match attribute {
            Some(attribute) => queue!(
                self.out,
                SetAttribute(attribute),
                Print(clipped),
                SetAttribute(Attribute::Reset)
            ),
            None => queue!(self.out, Print(clipped)),
        }
    }
}

fn highlight(on: bool) -> Option<Attribute> {
    on.then_some(Attribute::Reverse)
}

fn cell_width(frame: &Frame) -> usize {
    frame
        .lines
        .iter()
        .flat_map(|line| line.cells.iter())
        .map(|cell| cell.text.width())
        .max()
        .unwrap_or(0)
        .max(1)
}

fn draw_line<W: Write>(out: &mut W, line: &Line, width: usize, cols: u16) -> io::Result<()> {
    let mut row = RowWriter {
        out,
        used: 0,
        cols: cols as usize,
    };
    row.put(&" ".repeat(2 + line.indent as usize), None)?;
    if let Some(label) = line.label.as_deref() {
        row.put(label, highlight(line.highlighted))?;
        if !line.cells.is_empty() {
            row.put("  ", None)?;
        }
    }
    let whole_row = line.label.is_none() && line.highlighted;
    for cell in &line.cells {
        let pad = width.saturating_sub(cell.text.width());
        let text = format!(" {}{} ", cell.text, " ".repeat(pad));
        row.put(&text, highlight(cell.highlighted || whole_row))?;
    }
    Ok(())
}

/// Draw `frame` on a cleared screen. Returns the clickable regions it placed.
pub(super) fn draw_frame<W: Write>(
    out: &mut W,
    frame: &Frame,
    rows: u16,
    cols: u16,
) -> io::Result<Vec<Button>> {
    if rows == 0 || cols == 0 {
        return Ok(Vec::new());
    }
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let body_end = rows.saturating_sub(FOOTER_ROWS);
    let width = cell_width(frame);

    let mut y = 0;
    if y < body_end {
        queue!(out, MoveTo(0, y))?;
        RowWriter {
            out: &mut *out,
            used: 0,
            cols: cols as usize,
        }
        .put(&format!(" scanspell · {}", frame.title), Some(Attribute::Bold))?;
        y += 2;
    }
    for line in &frame.lines {
        if y >= body_end {
            break;
        }
        queue!(out, MoveTo(0, y))?;
        draw_line(out, line, width, cols)?;
        y += 1;
    }
    y += 1;
    for detail in &frame.details {
        if y >= body_end {
            break;
        }
        queue!(out, MoveTo(0, y))?;
        RowWriter {
            out: &mut *out,
            used: 0,
            cols: cols as usize,
        }
        .put(&format!("  {detail}"), None)?;
        y += 1;
    }

    let mut buttons = Vec::new();
    if rows >= FOOTER_ROWS {
        let button_row = rows - FOOTER_ROWS;
        queue!(out, MoveTo(0, button_row))?;
        let mut row = RowWriter {
            out: &mut *out,
            used: 0,
            cols: cols as usize,
        };
        row.put(&" ".repeat(SELECT_COLUMN as usize), None)?;
        row.put(SELECT_LABEL, Some(Attribute::Bold))?;
        if row.used >= SELECT_COLUMN as usize + SELECT_LABEL.width() {
            // Mouse reports are 1-based.
            buttons.push(Button {
                start_x: SELECT_COLUMN + 1,
                end_x: SELECT_COLUMN + SELECT_LABEL.width() as u16,
                y: button_row + 1,
                action: ButtonAction::Select,
            });
        }
        if let Some(notice) = frame.notice.as_deref() {
            row.put(&format!("  {notice}"), None)?;
        }
    }
    queue!(out, MoveTo(0, rows - 1))?;
    RowWriter {
        out: &mut *out,
        used: 0,
        cols: cols as usize,
    }
    .put(&format!(" {}", frame.status), Some(Attribute::Dim))?;
    out.flush()?;
    Ok(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Cell;

    fn frame_with_cells() -> Frame {
        Frame {
            title: "Writing".to_string(),
            lines: vec![Line {
                indent: 0,
                label: None,
                highlighted: false,
                cells: vec![
                    Cell {
                        text: "t".to_string(),
                        highlighted: true,
                    },
                    Cell {
                        text: "😊".to_string(),
                        highlighted: false,
                    },
                ],
            }],
            details: vec!["> Hello".to_string()],
            notice: Some("Settings saved".to_string()),
            status: "Idle".to_string(),
        }
    }

    #[test]
    fn fit_respects_wide_characters() {
        assert_eq!(fit("abc", 5), "abc");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("😊😊", 3), "😊");
    }

    #[test]
    fn draws_body_footer_and_select_button() {
        let mut out = Vec::new();
        let buttons = draw_frame(&mut out, &frame_with_cells(), 20, 60).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("scanspell · Writing"));
        assert!(text.contains("> Hello"));
        assert!(text.contains(SELECT_LABEL));
        assert!(text.contains("Settings saved"));
        assert_eq!(
            buttons,
            vec![Button {
                start_x: 3,
                end_x: 12,
                y: 19,
                action: ButtonAction::Select,
            }]
        );
    }

    #[test]
    fn narrow_terminal_skips_unreachable_button() {
        let mut out = Vec::new();
        let buttons = draw_frame(&mut out, &frame_with_cells(), 10, 6).unwrap();
        assert!(buttons.is_empty());
    }

    #[test]
    fn empty_terminal_draws_nothing() {
        let mut out = Vec::new();
        assert!(draw_frame(&mut out, &frame_with_cells(), 0, 0)
            .unwrap()
            .is_empty());
        assert!(out.is_empty());
    }
}
