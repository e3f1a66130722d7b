//! The exact ratio of two integers, and the rounding of a ratio back into a
//! binary float.

use super::bigint::{BigInt, BigUint};
use super::float::{Semantics, FP32, FP64};
use super::utils::mask;
use core::cmp::Ordering;
use core::fmt;

/// Reports the kind of values that are lost when we shift right bits. This is
/// used as the guard and sticky bits when rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LossFraction {
    ExactlyZero,  //0000000
    LessThanHalf, //0xxxxxx
    ExactlyHalf,  //1000000
    MoreThanHalf, //1xxxxxx
}

impl LossFraction {
    /// Classify the `bits` low bits of `val` that are about to be discarded.
    /// `sticky` is set if there are non-zero bits below `val`.
    fn from_low_bits(val: u128, bits: u32, sticky: bool) -> Self {
        debug_assert!(bits > 0 && bits < 128);
        let lost = val & ((1u128 << bits) - 1);
        let half = 1u128 << (bits - 1);
        match (lost.cmp(&half), sticky) {
            (Ordering::Greater, _) | (Ordering::Equal, true) => {
                LossFraction::MoreThanHalf
            }
            (Ordering::Equal, false) => LossFraction::ExactlyHalf,
            (Ordering::Less, _) if lost == 0 && !sticky => {
                LossFraction::ExactlyZero
            }
            (Ordering::Less, _) => LossFraction::LessThanHalf,
        }
    }

    /// Returns true if the discarded part forces rounding away from zero,
    /// with ties going to the even `kept` value.
    fn round_up(&self, kept: u64) -> bool {
        match self {
            LossFraction::MoreThanHalf => true,
            LossFraction::ExactlyHalf => kept & 1 == 1,
            LossFraction::LessThanHalf | LossFraction::ExactlyZero => false,
        }
    }
}

/// An exact ratio of two integers. The denominator is always positive, and
/// the numerator carries the sign.
///
/// # Examples
///
/// ```
///    use exact_ratio::as_integer_ratio;
///
///    let r = as_integer_ratio(-0.375).unwrap();
///    assert_eq!(r.to_string(), "-3/8");
///    assert_eq!(r.as_f64(), -0.375);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratio {
    numer: BigInt,
    denom: BigUint,
}

impl Ratio {
    pub(crate) fn new(negative: bool, numer: BigUint, denom: BigUint) -> Self {
        debug_assert!(!denom.is_zero(), "zero denominator");
        Ratio {
            numer: BigInt::from_parts(negative, numer),
            denom,
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigUint {
        &self.denom
    }

    /// Returns the (numerator, denominator) pair.
    pub fn into_parts(self) -> (BigInt, BigUint) {
        (self.numer, self.denom)
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Returns true if the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// Returns the nearest fp64 value, with ties rounded to even.
    pub fn as_f64(&self) -> f64 {
        f64::from_bits(self.round_to(FP64))
    }

    /// Returns the nearest fp32 value, with ties rounded to even.
    pub fn as_f32(&self) -> f32 {
        f32::from_bits(self.round_to(FP32) as u32)
    }

    /// Divide the numerator by the denominator and round the quotient to the
    /// nearest number in the format `sem`. Returns the bit pattern.
    fn round_to(&self, sem: Semantics) -> u64 {
        let sign = (self.is_negative() as u64) << sem.sign_bit();
        let num = self.numer.magnitude();
        if num.is_zero() {
            return sign;
        }

        // Scale the division so that the quotient has 65 or 66 bits, which
        // is wider than any supported significand plus a guard bit.
        let log2 = num.msb_index() as i64 - self.denom.msb_index() as i64;
        let scale = 65 - log2;
        let mut quotient = num.clone();
        let mut divisor = self.denom.clone();
        if scale >= 0 {
            quotient.shift_left(scale as usize);
        } else {
            divisor.shift_left(scale.unsigned_abs() as usize);
        }
        let rem = quotient.inplace_div(&divisor);
        let quotient = quotient.as_u128();
        let width = (u128::BITS - quotient.leading_zeros()) as i64;
        debug_assert!(width == 65 || width == 66);

        // The exponent of the leading bit of the ratio.
        let mut exp = width - 1 - scale;
        let precision = sem.get_precision() as i64;
        let bias = sem.get_bias();
        let min_exp = 1 - bias;

        // Denormals keep fewer bits of the significand.
        let keep = if exp >= min_exp {
            precision
        } else {
            precision - (min_exp - exp)
        };
        if keep < 0 {
            // Less than half of the smallest denormal.
            return sign;
        }

        let dropped = (width - keep) as u32;
        let mut mantissa = (quotient >> dropped) as u64;
        let loss = LossFraction::from_low_bits(quotient, dropped, !rem.is_zero());
        if loss.round_up(mantissa) {
            mantissa += 1;
        }

        if exp < min_exp {
            // A carry out of a denormal lands on the implicit bit, which is
            // the encoding of the smallest normal number.
            return sign | mantissa;
        }

        if mantissa >> precision != 0 {
            mantissa >>= 1;
            exp += 1;
        }
        if exp > bias {
            return sign | sem.inf_bits();
        }
        let mantissa_len = sem.get_mantissa_len();
        let biased_exp = (exp + bias) as u64;
        sign | (biased_exp << mantissa_len) | (mantissa & mask(mantissa_len))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            return write!(f, "{}", self.numer);
        }
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

#[cfg(test)]
fn make(negative: bool, numer: u64, denom_shift: usize) -> Ratio {
    let mut denom = BigUint::one();
    denom.shift_left(denom_shift);
    Ratio::new(negative, BigUint::from_u64(numer), denom)
}

#[test]
fn test_display() {
    use alloc::string::ToString;

    assert_eq!(make(false, 1, 1).to_string(), "1/2");
    assert_eq!(make(true, 3, 3).to_string(), "-3/8");
    assert_eq!(make(false, 7, 0).to_string(), "7");
    assert_eq!(make(true, 0, 0).to_string(), "0");
    assert!(!make(true, 0, 0).is_negative());
}

#[test]
fn test_round_simple_fractions() {
    let third = Ratio::new(false, BigUint::one(), BigUint::from_u64(3));
    assert_eq!(third.as_f64(), 1.0 / 3.0);
    assert_eq!(third.as_f32(), 1.0f32 / 3.0);

    let tenth = Ratio::new(true, BigUint::one(), BigUint::from_u64(10));
    assert_eq!(tenth.as_f64(), -0.1);
    assert_eq!(tenth.as_f32(), -0.1f32);

    let big = Ratio::new(false, BigUint::from_u64(22), BigUint::from_u64(7));
    assert_eq!(big.as_f64(), 22.0 / 7.0);
    assert_eq!(make(false, 5, 0).as_f64(), 5.0);
    assert_eq!(make(false, 0, 0).as_f64().to_bits(), 0);
}

#[test]
fn test_round_ties_to_even() {
    // 2^53 + 1 is halfway between two doubles, and rounds down to even.
    assert_eq!(make(false, (1 << 53) + 1, 0).as_f64(), 9007199254740992.0);
    // 2^53 + 3 rounds up to even.
    assert_eq!(make(false, (1 << 53) + 3, 0).as_f64(), 9007199254740996.0);
    // A hair above the tie rounds up.
    let above = Ratio::new(
        false,
        BigUint::from_u64((1 << 54) + 3),
        BigUint::from_u64(2),
    );
    assert_eq!(above.as_f64(), 9007199254740994.0);
    // Large integers round like the native cast.
    let v = u64::MAX - 1234;
    assert_eq!(make(false, v, 0).as_f64(), v as f64);
    assert_eq!(make(false, v, 0).as_f32(), v as f32);
}

#[test]
fn test_round_overflow_and_underflow() {
    // (2^54 - 1) * 2^970 is halfway between f64::MAX and 2^1024, and the
    // tie goes to the even side, which overflows.
    let mut huge = BigUint::from_u64((1 << 54) - 1);
    huge.shift_left(970);
    let r = Ratio::new(true, huge, BigUint::one());
    assert_eq!(r.as_f64(), f64::NEG_INFINITY);
    assert_eq!(r.as_f32(), f32::NEG_INFINITY);

    // Exactly half of the smallest denormal rounds to zero (even).
    assert_eq!(make(false, 1, 1075).as_f64(), 0.0);
    // Three quarters of the smallest denormal rounds up.
    assert_eq!(make(false, 3, 1076).as_f64(), f64::from_bits(1));
    // Far below the denormal range.
    assert_eq!(make(true, 1, 5000).as_f64().to_bits(), 1 << 63);
    // The largest denormal and the smallest normal.
    assert_eq!(make(false, (1 << 52) - 1, 1074).as_f64(), f64::from_bits(0x000f_ffff_ffff_ffff));
    assert_eq!(make(false, 1, 1022).as_f64(), f64::MIN_POSITIVE);
    // Rounding a denormal up into the normal range.
    let almost = make(false, (1 << 53) - 1, 1075);
    assert_eq!(almost.as_f64(), f64::MIN_POSITIVE);
    // The smallest f32 denormal.
    assert_eq!(make(false, 1, 149).as_f32(), f32::from_bits(1));
}
