//! TerminalRenderer: flushes a serialized surface frame to a real terminal.
//!
//! Frames arrive as the bytes produced by `Surface::render`: rows separated by
//! `\n`, optionally followed by a `\0` terminator. Each byte is printed as the
//! matching Latin-1 character.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        self.entered = false;
        Ok(())
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Clear the screen and draw `frame` from the top-left corner.
    pub fn present(&mut self, frame: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame_into(frame, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
/// Rows are joined with `\r\n` since raw mode does not translate bare `\n`.
pub fn encode_frame_into(frame: &[u8], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let body = match frame.iter().position(|&b| b == 0) {
        Some(end) => &frame[..end],
        None => frame,
    };
    let body = body.strip_suffix(b"\n").unwrap_or(body);

    for (row, line) in body.split(|&b| b == b'\n').enumerate() {
        if row > 0 {
            out.queue(Print("\r\n"))?;
        }
        for &b in line {
            out.queue(Print(b as char))?;
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printable(out: &[u8]) -> String {
        // Drop CSI sequences, keep the printed text.
        let s = String::from_utf8_lossy(out);
        let mut text = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                continue;
            }
            text.push(c);
        }
        text
    }

    #[test]
    fn encode_frame_joins_rows_with_crlf() {
        let mut out = Vec::new();
        encode_frame_into(b"ab\ncd\n", &mut out).unwrap();
        assert_eq!(printable(&out), "ab\r\ncd");
    }

    #[test]
    fn encode_frame_stops_at_terminator() {
        let mut out = Vec::new();
        encode_frame_into(b"ab\ncd\n\0garbage", &mut out).unwrap();
        assert_eq!(printable(&out), "ab\r\ncd");
    }

    #[test]
    fn encode_frame_starts_with_clear_and_home() {
        let mut out = Vec::new();
        encode_frame_into(b"x\n", &mut out).unwrap();

        let mut expected = Vec::new();
        expected
            .queue(terminal::Clear(terminal::ClearType::All))
            .unwrap();
        expected.queue(cursor::MoveTo(0, 0)).unwrap();
        assert!(out.starts_with(&expected));
    }

    #[test]
    fn encode_frame_prints_high_bytes_as_latin1() {
        let mut out = Vec::new();
        encode_frame_into(&[0xB0, b'\n'], &mut out).unwrap();
        assert_eq!(printable(&out), "\u{b0}");
    }
}
