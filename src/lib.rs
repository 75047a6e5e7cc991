#![deny(missing_docs)]
//! Package to read Kp and ap geomagnetic indices from fixed column WDC formatted files.
//!
//! ```no_run
//! use kp_data::{extract, DateInput};
//!
//! let begin: DateInput = "2016-07-01T04:00".parse()?;
//! let end: DateInput = "2016-07-01T14:00".parse()?;
//!
//! let series = extract(&"kp1607.wdc", Some(begin), Some(end))?;
//! for reading in series.iter() {
//!     println!("{} {:2} {:3}", reading.timestamp, reading.kp, reading.ap);
//! }
//! # Ok::<(), kp_data::KpDataErr>(())
//! ```

//
// Public API
//
pub use dates::{DateInput, DateRange};
pub use errors::{Field, KpDataErr, RecordErr};
pub use extract::{extract, extract_from_reader, extract_in};
pub use reading::{Column, IndexSeries, Reading};

//
// Implementation only
//
mod dates;
mod errors;
mod extract;
mod reading;
mod record;

#[cfg(feature = "pylib")]
mod py_lib;
