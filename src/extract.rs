//! Extract a time series of readings from a Kp file.

use crate::{
    dates::{DateInput, DateRange},
    errors::KpDataErr,
    reading::IndexSeries,
    record::parse_line,
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, trace, warn};

/// Extract the timestamps, Kp, and ap values from the file at `path`.
///
/// Only readings with timestamps between `begin_date` and `end_date`, inclusive, are kept. A
/// missing bound leaves that side of the window open. Files ending in `.gz` are decompressed.
///
/// The whole file is rejected with `KpDataErr::MalformedRecord` at the first line that can not be
/// decoded.
pub fn extract(
    path: &dyn AsRef<Path>,
    begin_date: Option<DateInput>,
    end_date: Option<DateInput>,
) -> Result<IndexSeries, KpDataErr> {
    extract_in(path, &DateRange::new(begin_date, end_date))
}

/// Same as `extract`, but with a window that is already built.
pub fn extract_in(path: &dyn AsRef<Path>, range: &DateRange) -> Result<IndexSeries, KpDataErr> {
    let path = path.as_ref();
    debug!(path = %path.display(), begin = %range.begin(), end = %range.end(), "extracting");

    let file = File::open(path)?;

    let series = if is_gzipped(path) {
        extract_from_reader(BufReader::new(flate2::read::GzDecoder::new(file)), range)?
    } else {
        extract_from_reader(BufReader::new(file), range)?
    };

    debug!(path = %path.display(), readings = series.len(), "extracted");
    Ok(series)
}

/// Extract readings in `range` from the lines of any buffered reader.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    range: &DateRange,
) -> Result<IndexSeries, KpDataErr> {
    let mut series = IndexSeries::new();
    let mut last_anchor = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line?;
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');

        let (anchor, readings) = parse_line(line).map_err(|cause| KpDataErr::MalformedRecord {
            line: line_num,
            cause,
        })?;

        if let Some(last) = last_anchor {
            if anchor <= last {
                warn!(line = line_num, %anchor, previous = %last, "date does not advance");
            }
        }
        last_anchor = Some(anchor);

        trace!(line = line_num, %anchor, readings = readings.len(), "decoded");

        series.extend(
            readings
                .into_iter()
                .filter(|reading| range.contains(&reading.timestamp)),
        );
    }

    Ok(series)
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
