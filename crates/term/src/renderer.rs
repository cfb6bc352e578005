//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Every present is a full redraw. The whole frame is encoded into one
//! buffer, wrapped in a synchronized update, and written in a single call,
//! so the terminal never shows a mix of two scenes.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        self.entered = false;
        Ok(())
    }

    /// Replace the whole terminal screen with `fb`.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::BeginSynchronizedUpdate)?;
        encode_full_into(fb, &mut self.buf)?;
        self.buf.queue(terminal::EndSynchronizedUpdate)?;
        self.flush_buf()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// Consecutive cells sharing a style are printed as one run; style escapes
/// are only emitted where the style changes.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut active: Option<CellStyle> = None;
    let mut run = String::with_capacity(usize::from(fb.width()) * 4);

    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(i32::from(x), i32::from(y)).unwrap_or_default();
            if active != Some(cell.style) {
                flush_run(out, &mut run)?;
                queue_style(out, cell.style)?;
                active = Some(cell.style);
            }
            run.push(cell.ch);
        }
        flush_run(out, &mut run)?;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn flush_run(out: &mut Vec<u8>, run: &mut String) -> Result<()> {
    if !run.is_empty() {
        out.queue(Print(run.as_str()))?;
        run.clear();
    }
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    // Bold takes precedence over dim.
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn sample() -> FrameBuffer {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        fb.set(0, 0, Cell { ch: 'A', style });
        fb.set(1, 0, Cell { ch: 'B', style });
        fb.set(0, 1, Cell { ch: 'C', style });
        fb.set(1, 1, Cell { ch: 'D', style });
        fb
    }

    #[test]
    fn rows_are_printed_as_single_runs() {
        let mut out = Vec::new();
        encode_full_into(&sample(), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        let ab = text.find("AB").unwrap();
        let cd = text.find("CD").unwrap();
        assert!(ab < cd);
    }

    #[test]
    fn present_writes_one_synchronized_frame() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        r.present(&sample()).unwrap();

        let mut begin = Vec::new();
        begin.queue(terminal::BeginSynchronizedUpdate).unwrap();
        let mut end = Vec::new();
        end.queue(terminal::EndSynchronizedUpdate).unwrap();

        let written = r.writer();
        assert!(written.starts_with(&begin));
        assert!(written.ends_with(&end));
    }

    #[test]
    fn unchanged_style_is_emitted_once() {
        let mut out = Vec::new();
        encode_full_into(&sample(), &mut out).unwrap();

        let mut one = Vec::new();
        queue_style(&mut one, CellStyle::default()).unwrap();
        let count = out.windows(one.len()).filter(|w| *w == one.as_slice()).count();
        assert_eq!(count, 1);
    }
}
