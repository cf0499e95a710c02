//! Writes a checked document to a terminal: highlighted source with a
//! curly underline at the error column, then the error panel rows.

use super::theme::SyntaxTheme;
use super::workbench::Workbench;
use crate::kernel::editor::{resolve, DocumentId, HighlightKind, StyledRun};
use crate::kernel::ProblemRow;
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetForegroundColor, SetUnderlineColor,
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Emit ANSI styling; otherwise errors are marked with a caret line.
    pub color: bool,
    pub line_numbers: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            color: true,
            line_numbers: true,
        }
    }
}

pub fn write_document<W: Write>(
    out: &mut W,
    workbench: &Workbench,
    doc: DocumentId,
    theme: &SyntaxTheme,
    options: ReportOptions,
) -> io::Result<()> {
    let Some(state) = workbench.state().editor.get(doc) else {
        return Ok(());
    };
    let document = state.document();
    let gutter = document.len_lines().to_string().len();

    for (index, line) in document.lines().enumerate() {
        // ropey reports a trailing empty line after a final newline.
        if index + 1 == document.len_lines() && line.is_empty() && index > 0 {
            break;
        }
        let spans = workbench.highlight_spans(doc, index, &line);
        let runs = resolve(&line, &spans);

        let prefix = if options.line_numbers {
            format!("{:>gutter$} | ", index + 1)
        } else {
            String::new()
        };
        queue!(out, Print(&prefix))?;
        if options.color {
            write_styled_line(out, &line, &runs, theme)?;
        } else {
            queue!(out, Print(&*line), Print("\n"))?;
            if let Some(marker) = caret_marker(&line, &runs) {
                queue!(out, Print(" ".repeat(prefix.chars().count())), Print(marker), Print("\n"))?;
            }
        }
    }
    out.flush()
}

pub fn write_problems<W: Write>(out: &mut W, title: &str, rows: &[ProblemRow]) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "{title}: no problems")?;
        return Ok(());
    }
    writeln!(out, "{title}:")?;
    for row in rows {
        writeln!(out, "  {}", row.label)?;
    }
    Ok(())
}

fn write_styled_line<W: Write>(
    out: &mut W,
    line: &str,
    runs: &[StyledRun],
    theme: &SyntaxTheme,
) -> io::Result<()> {
    for run in runs {
        let Some(text) = line.get(run.start..run.end) else {
            continue;
        };
        if let Some(kind) = run.kind {
            queue!(out, SetForegroundColor(theme.color(kind)))?;
        }
        if run.underline {
            queue!(
                out,
                SetUnderlineColor(theme.color(HighlightKind::ErrorUnderline)),
                SetAttribute(Attribute::Undercurled)
            )?;
        }
        queue!(out, Print(text))?;
        if run.kind.is_some() || run.underline {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
    }
    queue!(out, Print("\n"))
}

fn caret_marker(line: &str, runs: &[StyledRun]) -> Option<String> {
    let run = runs.iter().find(|run| run.underline)?;
    let column = line.get(..run.start)?.chars().count();
    let width = line.get(run.start..run.end)?.chars().count().max(1);
    Some(format!("{}{}", " ".repeat(column), "^".repeat(width)))
}

#[cfg(test)]
#[path = "../../tests/unit/app/report.rs"]
mod tests;
