use super::common::tabulate;
use crate::Result;
use crate::sections::Report;
use core::fmt::Write;
use ohno::app_err;

/// Writes one block per non-empty section: a title record, a header record, and the table rows.
///
/// Blocks have different widths, so records are not required to be the same length.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let mut csv_writer = ::csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());

    for section in &report.sections {
        let Some(table) = tabulate(&section.content) else {
            continue;
        };

        csv_writer.write_record([section.kind.to_string().as_str(), section.title.as_str()])?;
        csv_writer.write_record(&table.headers)?;
        for row in &table.rows {
            csv_writer.write_record(&row.cells)?;
        }
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| app_err!("unable to flush CSV output: {}", e.error()))?;
    writer.write_str(&String::from_utf8(bytes)?)?;

    Ok(())
}
