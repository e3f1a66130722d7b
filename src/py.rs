use crate::{Error, Ratio};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyInt;
use std::string::ToString;
use std::vec::Vec;

type PyRatio<'py> = (Bound<'py, PyAny>, Bound<'py, PyAny>);

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Build a Python int from the decimal digits of the big integer.
fn to_py_int<'py>(
    py: Python<'py>,
    digits: impl ToString,
) -> PyResult<Bound<'py, PyAny>> {
    py.get_type::<PyInt>().call1((digits.to_string(),))
}

fn to_py_ratio<'py>(py: Python<'py>, ratio: &Ratio) -> PyResult<PyRatio<'py>> {
    Ok((to_py_int(py, ratio.numer())?, to_py_int(py, ratio.denom())?))
}

/// Returns the exact (numerator, denominator) pair of the float 'value'.
///
/// Args:
///     value: A finite float
///
/// Raises:
///     ValueError: If the value is NaN or infinite
#[pyfunction]
fn as_integer_ratio(py: Python<'_>, value: f64) -> PyResult<PyRatio<'_>> {
    let ratio = crate::as_integer_ratio(value)?;
    to_py_ratio(py, &ratio)
}

/// Returns the list of convergents of the continued fraction of 'value', as
/// (numerator, denominator) pairs. The last pair is exactly 'value'.
///
/// Args:
///     value: A finite float
///
/// Raises:
///     ValueError: If the value is NaN or infinite
#[pyfunction]
fn convergents(py: Python<'_>, value: f64) -> PyResult<Vec<PyRatio<'_>>> {
    crate::convergents(value)?
        .map(|ratio| to_py_ratio(py, &ratio))
        .collect()
}

#[pymodule]
fn _exact_ratio(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(as_integer_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(convergents, m)?)?;
    Ok(())
}
