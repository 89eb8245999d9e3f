use super::common::{RowStyle, Table, tabulate};
use crate::Result;
use crate::facts::StatusClass;
use crate::sections::Report;
use core::fmt::Write;
use owo_colors::OwoColorize;

const COLUMN_GAP: &str = "  ";

pub fn generate<W: Write>(report: &Report, use_colors: bool, empty_placeholder: &str, writer: &mut W) -> Result<()> {
    let heading = format!(
        "{} rollup, generated {}",
        report.project,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if use_colors {
        writeln!(writer, "{}", heading.bold())?;
    } else {
        writeln!(writer, "{heading}")?;
    }

    for section in &report.sections {
        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", section.title.green().bold())?;
        } else {
            writeln!(writer, "{}", section.title)?;
        }

        match tabulate(&section.content) {
            Some(table) => write_table(&table, use_colors, writer)?,
            None => writeln!(writer, "  {empty_placeholder}")?,
        }
    }

    Ok(())
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (index, cell) in row.cells.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(index) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    widths
}

fn layout(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    format!("  {}", line.trim_end())
}

fn write_table<W: Write>(table: &Table, use_colors: bool, writer: &mut W) -> Result<()> {
    let widths = column_widths(table);

    let header = layout(&table.headers, &widths);
    let rule = format!("  {}", "-".repeat(header.chars().count().saturating_sub(2)));
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }
    writeln!(writer, "{rule}")?;

    for row in &table.rows {
        let line = layout(&row.cells, &widths);
        if use_colors {
            match row.style {
                RowStyle::Total => writeln!(writer, "{}", line.bold())?,
                RowStyle::Overspent => writeln!(writer, "{}", line.red())?,
                RowStyle::Status(StatusClass::Completed) => writeln!(writer, "{}", line.green())?,
                RowStyle::Status(StatusClass::Qa) => writeln!(writer, "{}", line.cyan())?,
                RowStyle::Status(StatusClass::Backlog) => writeln!(writer, "{}", line.dimmed())?,
                RowStyle::Plain | RowStyle::Status(StatusClass::NotFinished | StatusClass::Other) => {
                    writeln!(writer, "{line}")?;
                }
            }
        } else {
            writeln!(writer, "{line}")?;
        }
    }

    Ok(())
}
