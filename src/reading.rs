//! Readings and the series they are collected into.

use chrono::NaiveDateTime;
use std::iter::FromIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// A single three hour reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Reading {
    /// The end of the three hour interval.
    pub timestamp: NaiveDateTime,
    /// Kp scaled by 10 and expressed in thirds, 0 to 90.
    pub kp: u8,
    /// The ap index.
    pub ap: u16,
}

/// Names of the three sequences in an `IndexSeries`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, IntoStaticStr, EnumIter, Hash)]
#[allow(missing_docs)]
pub enum Column {
    #[strum(serialize = "timestamp")]
    Timestamp,
    #[strum(serialize = "Kp")]
    Kp,
    #[strum(serialize = "ap")]
    Ap,
}

impl Column {
    /// The name of the column.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Timestamps, Kp, and ap values kept in three index aligned sequences.
///
/// The sequences always have the same length, the i-th timestamp goes with the i-th Kp and ap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSeries {
    timestamps: Vec<NaiveDateTime>,
    kp: Vec<u8>,
    ap: Vec<u16>,
}

impl IndexSeries {
    /// Create a new, empty series.
    pub fn new() -> Self {
        IndexSeries::default()
    }

    /// Append a reading to the end of the series.
    pub fn push(&mut self, reading: Reading) {
        self.timestamps.push(reading.timestamp);
        self.kp.push(reading.kp);
        self.ap.push(reading.ap);
    }

    /// The number of readings.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True if there are no readings.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get the timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Get the Kp values.
    pub fn kp(&self) -> &[u8] {
        &self.kp
    }

    /// Get the ap values.
    pub fn ap(&self) -> &[u16] {
        &self.ap
    }

    /// Get the reading at `index`.
    pub fn get(&self, index: usize) -> Option<Reading> {
        Some(Reading {
            timestamp: *self.timestamps.get(index)?,
            kp: *self.kp.get(index)?,
            ap: *self.ap.get(index)?,
        })
    }

    /// Iterate over the readings in order.
    pub fn iter(&self) -> impl Iterator<Item = Reading> + '_ {
        self.timestamps
            .iter()
            .zip(self.kp.iter())
            .zip(self.ap.iter())
            .map(|((&timestamp, &kp), &ap)| Reading { timestamp, kp, ap })
    }

    /// Break the series into its timestamps, Kp values, and ap values.
    pub fn into_parts(self) -> (Vec<NaiveDateTime>, Vec<u8>, Vec<u16>) {
        (self.timestamps, self.kp, self.ap)
    }
}

impl Extend<Reading> for IndexSeries {
    fn extend<T: IntoIterator<Item = Reading>>(&mut self, iter: T) {
        for reading in iter {
            self.push(reading);
        }
    }
}

impl FromIterator<Reading> for IndexSeries {
    fn from_iter<T: IntoIterator<Item = Reading>>(iter: T) -> Self {
        let mut series = IndexSeries::new();
        series.extend(iter);
        series
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
