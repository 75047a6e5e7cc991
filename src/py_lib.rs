//! Python bindings, built with the `pylib` feature.
//!
//! The argument checks in `get_values` only run inside a Python interpreter, they are exercised
//! by `python/test_kp_data.py`:
//!
//! ```text
//! cargo build --release --features pylib
//! cp target/release/libkp_data.so python/kp_data.so
//! python -m unittest discover -s python
//! ```
use crate::{
    dates::DateInput,
    errors::KpDataErr,
    extract::extract,
    reading::{Column, IndexSeries},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use pyo3::{
    exceptions,
    prelude::*,
    types::{PyDate, PyDateAccess, PyDateTime, PyDict, PyString, PyTimeAccess},
    wrap_pyfunction,
};

/// Extract timestamps, Kp and ap indices from `filename`.
///
/// Returns a dict with the keys `timestamp`, `Kp`, and `ap`, each holding a list.
#[pyfunction(begin_date = "None", end_date = "None")]
fn get_values<'p>(
    py: Python<'p>,
    filename: &PyAny,
    begin_date: Option<&PyAny>,
    end_date: Option<&PyAny>,
) -> PyResult<&'p PyDict> {
    let filename: String = filename
        .cast_as::<PyString>()
        .map_err(|_| {
            KpDataErr::InvalidArgument(format!(
                "filename must be str, not {}",
                type_name(filename)
            ))
        })?
        .to_str()?
        .to_owned();

    let begin_date = convert_to_date_input("begin_date", begin_date)?;
    let end_date = convert_to_date_input("end_date", end_date)?;

    let series = py.allow_threads(|| extract(&filename, begin_date, end_date))?;

    to_dict(py, series)
}

fn to_dict<'p>(py: Python<'p>, series: IndexSeries) -> PyResult<&'p PyDict> {
    let (timestamps, kp, ap) = series.into_parts();

    let timestamps = timestamps
        .iter()
        .map(|ts| convert_from_chrono(py, ts))
        .collect::<PyResult<Vec<&PyDateTime>>>()?;

    let dict = PyDict::new(py);
    dict.set_item(Column::Timestamp.name(), timestamps)?;
    dict.set_item(Column::Kp.name(), kp)?;
    dict.set_item(Column::Ap.name(), ap)?;

    Ok(dict)
}

fn type_name(obj: &PyAny) -> String {
    obj.get_type().to_string()
}

fn convert_to_date_input(
    arg_name: &str,
    obj: Option<&PyAny>,
) -> Result<Option<DateInput>, KpDataErr> {
    let obj = match obj {
        Some(obj) if !obj.is_none() => obj,
        _ => return Ok(None),
    };

    // datetime is a subclass of date, check it first.
    if let Ok(dt) = obj.cast_as::<PyDateTime>() {
        return convert_to_chrono(dt).map(|dt| Some(DateInput::DateTime(dt)));
    }

    if let Ok(date) = obj.cast_as::<PyDate>() {
        let year = date.get_year();
        let month: u32 = date.get_month().into();
        let day: u32 = date.get_day().into();

        return NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Some(DateInput::Date(date)))
            .ok_or_else(|| KpDataErr::InvalidArgument(format!("{} out of range", arg_name)));
    }

    Err(KpDataErr::InvalidArgument(format!(
        "{} must be date, datetime or None, not {}",
        arg_name,
        type_name(obj)
    )))
}

fn convert_to_chrono(dt: &PyDateTime) -> Result<NaiveDateTime, KpDataErr> {
    let year = dt.get_year();
    let month: u32 = dt.get_month().into();
    let day: u32 = dt.get_day().into();
    let hour: u32 = dt.get_hour().into();
    let minute: u32 = dt.get_minute().into();
    let second: u32 = dt.get_second().into();
    let micro: u32 = dt.get_microsecond();

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_micro_opt(hour, minute, second, micro))
        .ok_or_else(|| KpDataErr::InvalidArgument("datetime out of range".to_owned()))
}

fn convert_from_chrono<'p>(py: Python<'p>, dt: &NaiveDateTime) -> PyResult<&'p PyDateTime> {
    PyDateTime::new(
        py,
        dt.year(),
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        dt.nanosecond() / 1_000,
        None,
    )
}

/// Read Kp and ap indices from WDC formatted files.
#[pymodule]
fn kp_data(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_wrapped(wrap_pyfunction!(get_values))?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

impl std::convert::From<KpDataErr> for PyErr {
    fn from(err: KpDataErr) -> PyErr {
        match err {
            KpDataErr::IO(err) => err.into(),
            KpDataErr::InvalidArgument(msg) => exceptions::PyTypeError::new_err(msg),
            malformed @ KpDataErr::MalformedRecord { .. } => {
                exceptions::PyValueError::new_err(malformed.to_string())
            }
        }
    }
}
