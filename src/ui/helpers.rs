//! Shared rendering utilities.
//!
//! Components draw into a [`Frame`], an in-memory buffer of ANSI output that
//! the runtime writes to the terminal in one go. Positioning uses absolute
//! cursor moves, so components can be drawn in any order.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::ui::helpers::Frame;
//!
//! let mut frame = Frame::new();
//! frame.position_cursor(5, 1);
//! frame.put("Content at row 5");
//! assert_eq!(frame.finish(), "\u{1b}[5;1HContent at row 5");
//! ```

/// Buffer of ANSI output for one redraw.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `row`/`col` (`\u{1b}[{row};{col}H`).
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    pub fn put(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Writes `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Display width of `text` in terminal columns, counting one per char.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` chars, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Removes ANSI escape sequences; cursor moves become line breaks.
///
/// Used to assert on rendered output.
#[cfg(test)]
pub fn strip_ansi(rendered: &str) -> String {
    let mut out = String::new();
    let mut chars = rendered.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            let mut terminator = ' ';
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    terminator = n;
                    break;
                }
            }
            if terminator == 'H' {
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Van", 10), "Van");
        assert_eq!(truncate("Lieferwagen-Süd", 10), "Lieferw...");
        assert_eq!(truncate("Süd", 2), "Sü");
    }

    #[test]
    fn strip_ansi_keeps_text_and_rows() {
        let mut frame = Frame::new();
        frame.position_cursor(1, 1);
        frame.put("\u{1b}[1mTitle\u{1b}[0m");
        frame.position_cursor(2, 1);
        frame.put("row");
        assert_eq!(strip_ansi(&frame.finish()), "\nTitle\nrow");
    }
}
