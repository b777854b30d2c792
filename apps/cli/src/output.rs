//! Result printing.

use serde::Serialize;
use std::io::{self, BufWriter, Write};

/// Writes `value` as pretty JSON to stdout.
///
/// The buffer is flushed before returning; on an early error it is flushed
/// when dropped.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
