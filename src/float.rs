//! Decoding of fixed-width IEEE-754 binary floating point values into their
//! sign, exponent and integral significand.

use super::bigint::BigUint;
use super::utils::mask;
use core::fmt;

/// Describes an IEEE-754 binary interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semantics {
    /// The number of bits that define the range of the exponent.
    exponent: usize,
    /// The number of bits in the significand (mantissa + 1).
    precision: usize,
}

/// IEEE half precision.
pub const FP16: Semantics = Semantics::new(5, 11);
/// The bfloat16 format.
pub const BF16: Semantics = Semantics::new(8, 8);
/// IEEE single precision.
pub const FP32: Semantics = Semantics::new(8, 24);
/// IEEE double precision.
pub const FP64: Semantics = Semantics::new(11, 53);

impl Semantics {
    /// Create a new format. The encoded number (sign, exponent and mantissa)
    /// must fit in 64 bits.
    pub const fn new(exponent: usize, precision: usize) -> Self {
        assert!(exponent > 1 && precision > 1);
        assert!(exponent + precision <= 64, "format is wider than 64 bits");
        Semantics {
            exponent,
            precision,
        }
    }
    /// Returns the precision in bits.
    pub fn get_precision(&self) -> usize {
        self.precision
    }
    /// Returns the length of the mantissa in bits (precision - 1).
    pub fn get_mantissa_len(&self) -> usize {
        self.precision - 1
    }
    /// Returns the length of the exponent in bits, which defines the valid
    /// range.
    pub fn get_exponent_len(&self) -> usize {
        self.exponent
    }

    /// Returns the exponent bias for the number, as a positive number.
    /// https://en.wikipedia.org/wiki/IEEE_754#Basic_and_interchange_formats
    pub fn get_bias(&self) -> i64 {
        let e = self.get_exponent_len();
        ((1u64 << (e - 1)) - 1) as i64
    }

    /// Returns the bit pattern of positive infinity.
    pub(crate) fn inf_bits(&self) -> u64 {
        mask(self.exponent) << self.get_mantissa_len()
    }

    /// Returns the position of the sign bit.
    pub(crate) fn sign_bit(&self) -> usize {
        self.exponent + self.get_mantissa_len()
    }
}

/// Declare the different categories of the floating point number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Infinity,
    NaN,
    Normal,
    Zero,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Infinity => "infinity",
            Category::NaN => "NaN",
            Category::Normal => "a normal number",
            Category::Zero => "zero",
        };
        f.write_str(name)
    }
}

/// A decoded binary floating point value. Finite values are exactly
/// `(-1)^sign * mantissa * 2^exp`. Subnormal values are `Normal` numbers
/// without the implicit bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Float {
    // The semantics of the float (precision, exponent range).
    sem: Semantics,
    // The Sign bit.
    sign: bool,
    // The exponent of the least significant bit of the significand.
    exp: i64,
    // The significand, including the implicit bit, aligned to the right.
    mantissa: u64,
    // The kind of number this float represents.
    category: Category,
}

impl Float {
    /// Decode the bit pattern `bits` of a number in the format `sem`.
    pub fn from_bits(sem: Semantics, bits: u64) -> Self {
        let mantissa_len = sem.get_mantissa_len();
        let exponent_len = sem.get_exponent_len();

        // Extract the biased exponent (wipe the sign and mantissa).
        let biased_exp = (bits >> mantissa_len) & mask(exponent_len);
        let sign = (bits >> sem.sign_bit()) & 1 == 1;
        // Wipe the sign and exponent.
        let mut mantissa = bits & mask(mantissa_len);

        // Check for NaN/Inf
        if biased_exp == mask(exponent_len) {
            let category = if mantissa == 0 {
                Category::Infinity
            } else {
                Category::NaN
            };
            return Float {
                sem,
                sign,
                exp: 0,
                mantissa: 0,
                category,
            };
        }

        let mut exp = biased_exp as i64 - sem.get_bias() - mantissa_len as i64;

        // Add the implicit bit for normal numbers.
        if biased_exp != 0 {
            mantissa |= 1u64 << mantissa_len;
        } else {
            // Handle denormals, adjust the exponent to the legal range.
            exp += 1;
        }

        let category = if mantissa == 0 {
            Category::Zero
        } else {
            Category::Normal
        };
        Float {
            sem,
            sign,
            exp,
            mantissa,
            category,
        }
    }

    /// Loads a native fp64 value.
    pub fn from_f64(float: f64) -> Self {
        Self::from_bits(FP64, float.to_bits())
    }

    /// Loads a native fp32 value.
    pub fn from_f32(float: f32) -> Self {
        Self::from_bits(FP32, float.to_bits() as u64)
    }

    pub fn get_semantics(&self) -> Semantics {
        self.sem
    }
    /// Returns true if the sign bit is set. This includes -0 and -NaN.
    pub fn get_sign(&self) -> bool {
        self.sign
    }
    /// Returns the exponent of the lowest bit of the significand.
    pub fn get_exp(&self) -> i64 {
        self.exp
    }
    /// Returns the integral significand, including the implicit bit.
    pub fn get_mantissa(&self) -> u64 {
        self.mantissa
    }
    pub fn get_category(&self) -> Category {
        self.category
    }

    /// Returns true if the Float is negative
    pub fn is_negative(&self) -> bool {
        self.sign
    }
    /// Returns true if the Float is +-inf.
    pub fn is_inf(&self) -> bool {
        self.category == Category::Infinity
    }
    /// Returns true if the Float is a +- NaN.
    pub fn is_nan(&self) -> bool {
        self.category == Category::NaN
    }
    /// Returns true if the Float is a +- zero.
    pub fn is_zero(&self) -> bool {
        self.category == Category::Zero
    }
    /// Returns true if this number is normal (not Zero, Nan, Inf).
    pub fn is_normal(&self) -> bool {
        self.category == Category::Normal
    }

    /// Returns the magnitude of the number as the exact fraction p/q, where q
    /// is a power of two and the fraction is in lowest terms. Returns None
    /// for NaN and Inf.
    pub fn to_dyadic(&self) -> Option<(BigUint, BigUint)> {
        match self.category {
            Category::Infinity | Category::NaN => None,
            Category::Zero => Some((BigUint::zero(), BigUint::one())),
            Category::Normal => {
                // Make the significand odd, so that p and q share no factor.
                let tz = self.mantissa.trailing_zeros();
                let exp = self.exp + tz as i64;
                let mut p = BigUint::from_u64(self.mantissa >> tz);
                let mut q = BigUint::one();
                if exp >= 0 {
                    p.shift_left(exp as usize);
                } else {
                    q.shift_left(exp.unsigned_abs() as usize);
                }
                Some((p, q))
            }
        }
    }
}

#[test]
fn test_decode_f64() {
    let one = Float::from_f64(1.0);
    assert!(one.is_normal());
    assert_eq!(one.get_mantissa(), 1 << 52);
    assert_eq!(one.get_exp(), -52);

    let half = Float::from_f64(-0.5);
    assert!(half.is_negative());
    assert_eq!(half.get_mantissa(), 1 << 52);
    assert_eq!(half.get_exp(), -53);

    let max = Float::from_f64(f64::MAX);
    assert_eq!(max.get_mantissa(), (1 << 53) - 1);
    assert_eq!(max.get_exp(), 971);

    // The smallest denormal.
    let tiny = Float::from_f64(f64::from_bits(1));
    assert!(tiny.is_normal());
    assert_eq!(tiny.get_mantissa(), 1);
    assert_eq!(tiny.get_exp(), -1074);

    // The largest denormal and the smallest normal share the exponent.
    let big_denormal = Float::from_f64(f64::from_bits(0x000f_ffff_ffff_ffff));
    assert_eq!(big_denormal.get_exp(), -1074);
    assert_eq!(Float::from_f64(f64::MIN_POSITIVE).get_exp(), -1074);
}

#[test]
fn test_decode_special() {
    let z = Float::from_f64(-0.0);
    assert!(z.is_zero());
    assert!(z.get_sign());
    assert!(Float::from_f64(0.0).is_zero());

    assert!(Float::from_f64(f64::NAN).is_nan());
    assert!(!Float::from_f64(f64::NAN).is_inf());
    assert!(Float::from_f64(f64::INFINITY).is_inf());
    assert!(Float::from_f64(f64::NEG_INFINITY).is_inf());
    assert!(Float::from_f64(f64::NEG_INFINITY).is_negative());

    assert!(Float::from_f32(f32::from_bits(0xff800000)).is_inf()); // -Inf
    assert!(Float::from_f32(f32::from_bits(0xffc00000)).is_nan()); // -Nan
    assert!(Float::from_bits(FP16, 0x7c00).is_inf());
    assert!(Float::from_bits(FP16, 0x7e00).is_nan());
    assert!(Float::from_bits(BF16, 0xff80).is_inf());
}

#[test]
fn test_decode_narrow_formats() {
    // 0.1 in single precision is 13421773 * 2^-27.
    let a = Float::from_f32(0.1);
    assert_eq!(a.get_mantissa(), 13421773);
    assert_eq!(a.get_exp(), -27);

    // Half precision one and its smallest denormal.
    let one = Float::from_bits(FP16, 0x3c00);
    assert_eq!((one.get_mantissa(), one.get_exp()), (1 << 10, -10));
    let tiny = Float::from_bits(FP16, 0x0001);
    assert_eq!((tiny.get_mantissa(), tiny.get_exp()), (1, -24));

    let one = Float::from_bits(BF16, 0x3f80);
    assert_eq!((one.get_mantissa(), one.get_exp()), (1 << 7, -7));
    assert!(Float::from_bits(BF16, 0xbf80).is_negative());
}

#[test]
fn test_to_dyadic() {
    let check = |v: f64, p: u64, q_shift: usize| {
        let (num, den) = Float::from_f64(v).to_dyadic().unwrap();
        let mut q = BigUint::one();
        q.shift_left(q_shift);
        assert_eq!(num, BigUint::from_u64(p));
        assert_eq!(den, q);
    };
    check(0.0, 0, 0);
    check(0.5, 1, 1);
    check(-0.75, 3, 2);
    check(6.0, 6, 0);
    check(0.1, 3602879701896397, 55);
    check(f64::from_bits(1), 1, 1074);

    let (num, den) = Float::from_f64(f64::MAX).to_dyadic().unwrap();
    let mut max = BigUint::from_u64((1 << 53) - 1);
    max.shift_left(971);
    assert_eq!(num, max);
    assert!(den.is_one());

    assert!(Float::from_f64(f64::NAN).to_dyadic().is_none());
    assert!(Float::from_f64(f64::INFINITY).to_dyadic().is_none());
}
