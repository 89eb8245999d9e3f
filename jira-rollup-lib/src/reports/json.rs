use crate::Result;
use crate::sections::Report;
use core::fmt::Write;

pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
