//! Rendering matched spans of a line.
//!
//! The CLI paints through the [`Painter`] trait so that the colouring
//! terminal backend and the plain text backend share one span walker.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use itertools::Itertools;

use crate::pattern::unit;

/// Sink for one highlighted line at a time.
pub trait Painter {
    /// Text outside any match.
    fn plain(&mut self, text: &str) -> Result<()>;

    /// Text of one match.
    fn matched(&mut self, text: &str) -> Result<()>;

    fn end_line(&mut self) -> Result<()>;
}

/// Paints matches in bold red using crossterm.
pub struct CrosstermPainter<W: Write> {
    out: W,
}

impl<W: Write> CrosstermPainter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Painter for CrosstermPainter<W> {
    fn plain(&mut self, text: &str) -> Result<()> {
        crossterm::queue!(self.out, Print(text))?;
        Ok(())
    }

    fn matched(&mut self, text: &str) -> Result<()> {
        crossterm::queue!(
            self.out,
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        crossterm::queue!(self.out, Print("\n"))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Brackets matches with `[` and `]`, for pipes and tests.
pub struct PlainPainter<W: Write> {
    out: W,
}

impl<W: Write> PlainPainter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Painter for PlainPainter<W> {
    fn plain(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn matched(&mut self, text: &str) -> Result<()> {
        write!(self.out, "[{text}]")?;
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Paint `line` with the code-unit `spans` highlighted. Spans must be
/// sorted and non-overlapping, as produced by a left-to-right scan.
pub fn paint_line(painter: &mut dyn Painter, line: &[u16], spans: &[Range<usize>]) -> Result<()> {
    let mut at = 0;
    for span in spans {
        let start = span.start.clamp(at, line.len());
        let end = span.end.clamp(start, line.len());
        if at < start {
            painter.plain(&unit::slice_to_string(&line[at..start]))?;
        }
        if start < end {
            painter.matched(&unit::slice_to_string(&line[start..end]))?;
        }
        at = end;
    }
    if at < line.len() {
        painter.plain(&unit::slice_to_string(&line[at..]))?;
    }
    painter.end_line()
}

/// `line:start-end` list used by `--spans`.
pub fn format_spans(line_no: usize, spans: &[Range<usize>]) -> String {
    let list = spans
        .iter()
        .map(|s| format!("{}-{}", s.start, s.end))
        .join(" ");
    format!("{line_no}: {list}")
}

/// Default painter for standard output.
pub fn stdout_painter(color: bool) -> Box<dyn Painter> {
    if color {
        Box::new(CrosstermPainter::new(io::stdout()))
    } else {
        Box::new(PlainPainter::new(io::stdout()))
    }
}
