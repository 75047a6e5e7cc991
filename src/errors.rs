//! Module for errors.
use std::{error::Error, fmt::Display};
use strum_macros::{EnumIter, IntoStaticStr};

/// Error from reading a Kp file.
#[derive(Debug)]
pub enum KpDataErr {
    // Inherited errors from std
    /// Error forwarded from std, the file could not be opened or read.
    IO(::std::io::Error),

    // My own errors from this crate
    /// A parameter did not have an acceptable shape.
    InvalidArgument(String),
    /// A line of the file violates the fixed column format.
    MalformedRecord {
        /// The 1-indexed line number.
        line: usize,
        /// What was wrong with it.
        cause: RecordErr,
    },
}

impl Display for KpDataErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::KpDataErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            MalformedRecord { line, cause } => write!(f, "line {} not valid: {}", line, cause),
        }
    }
}

impl Error for KpDataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KpDataErr::IO(err) => Some(err),
            KpDataErr::MalformedRecord { cause, .. } => Some(cause),
            KpDataErr::InvalidArgument(_) => None,
        }
    }
}

impl From<::std::io::Error> for KpDataErr {
    fn from(err: ::std::io::Error) -> KpDataErr {
        KpDataErr::IO(err)
    }
}

/// The fields of a record that get decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, IntoStaticStr, EnumIter, Hash)]
#[allow(missing_docs)]
pub enum Field {
    #[strum(serialize = "year")]
    Year,
    #[strum(serialize = "month")]
    Month,
    #[strum(serialize = "day")]
    Day,
    #[strum(serialize = "Kp")]
    Kp,
    #[strum(serialize = "ap")]
    Ap,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let name: &'static str = (*self).into();
        write!(f, "{}", name)
    }
}

/// The reason a single line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordErr {
    /// The field is empty or holds something other than unsigned decimal digits.
    NotANumber {
        /// Which field.
        field: Field,
        /// The sub-reading slot, only for Kp and ap.
        slot: Option<usize>,
        /// The raw text found in the columns of the field.
        text: String,
    },
    /// The year, month, and day do not make a calendar date.
    InvalidDate {
        #[allow(missing_docs)]
        year: i32,
        #[allow(missing_docs)]
        month: u32,
        #[allow(missing_docs)]
        day: u32,
    },
    /// Kp is scaled by 10 and can not exceed 90.
    KpOutOfRange {
        /// The sub-reading slot.
        slot: usize,
        /// The decoded value.
        value: u32,
    },
}

impl Display for RecordErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::RecordErr::*;

        match self {
            NotANumber {
                field,
                slot: Some(slot),
                text,
            } => write!(f, "{} in slot {} is not a number: '{}'", field, slot, text),
            NotANumber {
                field,
                slot: None,
                text,
            } => write!(f, "{} is not a number: '{}'", field, text),
            InvalidDate { year, month, day } => write!(
                f,
                "invalid date: year {}, month {}, day {}",
                year, month, day
            ),
            KpOutOfRange { slot, value } => {
                write!(f, "Kp in slot {} out of range [0, 90]: {}", slot, value)
            }
        }
    }
}

impl Error for RecordErr {}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_field_names() {
        let names: Vec<String> = Field::iter().map(|fld| fld.to_string()).collect();
        assert_eq!(names, vec!["year", "month", "day", "Kp", "ap"]);
    }

    #[test]
    fn test_malformed_record_message() {
        let err = KpDataErr::MalformedRecord {
            line: 7,
            cause: RecordErr::InvalidDate {
                year: 2016,
                month: 13,
                day: 1,
            },
        };

        assert_eq!(
            err.to_string(),
            "line 7 not valid: invalid date: year 2016, month 13, day 1"
        );
        assert!(err.source().is_some());

        let cause = RecordErr::NotANumber {
            field: Field::Ap,
            slot: Some(3),
            text: " x1".to_owned(),
        };
        assert_eq!(cause.to_string(), "ap in slot 3 is not a number: ' x1'");
    }
}
