//! CSV export of attendance lists.

use std::io::{self, Write};

use al_core::AttendanceList;

/// Writes `list` as CSV: the header row, then one row per visit.
///
/// Times are `HH:MM:SS`; an open visit has an empty Logout column. Errors
/// raised by `writer` are returned as they are, without retrying.
pub fn write_csv<W: Write>(writer: W, list: &AttendanceList) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(list.header()).map_err(into_io)?;
    for row in list.rows() {
        wtr.write_record(&row).map_err(into_io)?;
    }

    wtr.flush()
}

/// Unwraps the sink's own error from a `csv::Error`.
fn into_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(err) => err,
        other => io::Error::other(format!("csv: {other:?}")),
    }
}
