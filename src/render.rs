use crossterm::style::{StyledContent, Stylize};
use std::io::{self, Write};

use crate::diff::{DiffLine, LineKind};

/// Draws diff lines to an output stream
pub trait DiffRenderer {
    fn render(&self, lines: &[DiffLine], out: &mut dyn Write) -> io::Result<()>;
}

/// Plain text, one marked line per diff line
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl DiffRenderer for PlainRenderer {
    fn render(&self, lines: &[DiffLine], out: &mut dyn Write) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{}", line.marked())?;
        }
        Ok(())
    }
}

/// ANSI-coloured output: additions green, removals red
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Styled form of one line; crossterm drops the colour when `NO_COLOR` is set
    pub fn styled(line: &DiffLine) -> StyledContent<String> {
        let text = line.marked();
        match line.kind {
            LineKind::Added => text.green(),
            LineKind::Removed => text.red(),
            LineKind::Unchanged => text.stylize(),
        }
    }
}

impl DiffRenderer for TerminalRenderer {
    fn render(&self, lines: &[DiffLine], out: &mut dyn Write) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{}", Self::styled(line))?;
        }
        Ok(())
    }
}

/// Pick a renderer for stdout
pub fn for_stdout(no_color: bool) -> Box<dyn DiffRenderer> {
    use std::io::IsTerminal;

    if no_color || !io::stdout().is_terminal() {
        Box::new(PlainRenderer)
    } else {
        Box::new(TerminalRenderer)
    }
}
