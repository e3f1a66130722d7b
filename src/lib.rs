//! Exact integer ratios of binary floating point values.
//!
//! Every finite binary float is a dyadic rational. This crate expands the
//! continued fraction of that rational until the convergent equals the value,
//! and returns it as a numerator and denominator of unbounded size.
//!
//! ```
//!    use exact_ratio::as_integer_ratio;
//!
//!    let r = as_integer_ratio(0.1).unwrap();
//!    assert_eq!(r.numer().to_string(), "3602879701896397");
//!    assert_eq!(r.denom().to_string(), "36028797018963968");
//!    assert_eq!(r.as_f64(), 0.1);
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod bigint;
mod error;
mod float;
mod frac;
mod ratio;
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::bigint::{BigInt, BigUint};
pub use self::error::{Error, Result};
pub use self::float::{Category, Float, Semantics, BF16, FP16, FP32, FP64};
pub use self::frac::{
    as_integer_ratio, as_integer_ratio_f32, convergents, Convergents,
    PartialQuotients,
};
pub use self::ratio::Ratio;
