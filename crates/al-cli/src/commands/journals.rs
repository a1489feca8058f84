//! Journals command: days with recorded events.

use std::io::Write;

use anyhow::Result;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    for date in config.store().dates()? {
        writeln!(writer, "{date}")?;
    }
    Ok(())
}
