use std::io::Write;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::geometry::Rect;

use super::cursor;

/// Last arranged rectangle of a debug-flagged node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub name: String,
    pub rect: Rect,
}

/// Painter parameters.
#[derive(Debug, Clone)]
pub struct PainterSettings {
    /// Write the node name into the top edge when it fits.
    pub labels: bool,
    /// Wrap the output in save/restore cursor sequences.
    pub preserve_cursor: bool,
}

impl Default for PainterSettings {
    fn default() -> Self {
        Self {
            labels: true,
            preserve_cursor: true,
        }
    }
}

/// Draws outlines as box-drawing characters, one terminal cell per unit.
pub struct OutlinePainter {
    settings: PainterSettings,
}

impl OutlinePainter {
    pub fn new(settings: PainterSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(PainterSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut PainterSettings {
        &mut self.settings
    }

    pub fn paint(&self, writer: &mut impl Write, outlines: &[Outline]) -> Result<()> {
        if self.settings.preserve_cursor {
            write!(writer, "{}", cursor::save_position())?;
        }
        for outline in outlines {
            self.paint_outline(writer, outline)?;
        }
        if self.settings.preserve_cursor {
            write!(writer, "{}", cursor::restore_position())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn paint_outline(&self, writer: &mut impl Write, outline: &Outline) -> Result<()> {
        let Rect {
            x,
            y,
            width,
            height,
        } = outline.rect;
        // Only cells addressable on a terminal are drawn.
        let (Ok(left), Ok(top), Ok(width), Ok(height)) = (
            u16::try_from(x),
            u16::try_from(y),
            u16::try_from(width),
            u16::try_from(height),
        ) else {
            return Ok(());
        };
        if width == 0 || height == 0 {
            return Ok(());
        }

        for row in 0..height {
            let line = edge_row(row, width, height);
            if line.is_empty() {
                continue;
            }
            if row == 0 || row + 1 == height {
                let line = if row == 0 && self.settings.labels {
                    label_top(line, &outline.name)
                } else {
                    line
                };
                write!(writer, "{}{}", cursor::move_to(top + row + 1, left + 1), line)?;
            } else {
                write!(writer, "{}│", cursor::move_to(top + row + 1, left + 1))?;
                if width > 1 {
                    write!(writer, "{}│", cursor::move_to(top + row + 1, left + width))?;
                }
            }
        }
        Ok(())
    }
}

fn edge_row(row: u16, width: u16, height: u16) -> String {
    let inner = usize::from(width.saturating_sub(2));
    match (height, width) {
        (1, 1) => "□".to_string(),
        (1, _) => "─".repeat(usize::from(width)),
        (_, 1) => "│".to_string(),
        _ if row == 0 => format!("┌{}┐", "─".repeat(inner)),
        _ if row + 1 == height => format!("└{}┘", "─".repeat(inner)),
        _ => "│".to_string(),
    }
}

fn label_top(line: String, name: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() < 3 || name.is_empty() {
        return line;
    }
    let room = chars.len() - 2;
    let label: Vec<char> = name.chars().take(room).collect();
    let mut out = String::new();
    out.push(chars[0]);
    out.extend(label.iter());
    out.extend(chars[1 + label.len()..].iter());
    out
}

/// Decides when periodic outline repaints are due.
///
/// A zero interval disables repaints.
#[derive(Debug, Clone)]
pub struct RepaintClock {
    interval: Duration,
    last: Option<Instant>,
}

impl RepaintClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when a repaint is due at `now`; records `now` as the last repaint.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return false;
        }
        let ready = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last = Some(now);
        }
        ready
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
