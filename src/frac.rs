//! This module contains the continued fraction expansion of floats, and the
//! exact integer ratio that the expansion converges to.
//!
//! A finite binary float is the dyadic rational p/2^k, so its continued
//! fraction a0 + 1/(a1 + 1/(a2 + 1/( ... ))) is finite. The expansion runs on
//! the exact fraction and never on a rounded float, and the last convergent
//! is the value itself, in lowest terms.

use crate::bigint::BigUint;
use crate::error::{Error, Result};
use crate::float::Float;
use crate::ratio::Ratio;
use core::mem;

/// Iterates over the partial quotients a0, a1, a2 ... of the continued
/// fraction of a non-negative rational number.
#[derive(Debug, Clone)]
pub struct PartialQuotients {
    // The remaining value x is num/den. A zero den ends the expansion.
    num: BigUint,
    den: BigUint,
}

impl PartialQuotients {
    /// Expand the fraction `num/den`. The denominator must not be zero.
    pub fn new(num: BigUint, den: BigUint) -> Self {
        assert!(!den.is_zero(), "zero denominator");
        PartialQuotients { num, den }
    }
}

impl Iterator for PartialQuotients {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        if self.den.is_zero() {
            return None;
        }
        // a = floor(x) and x - a = rem/den, so the next x is den/rem.
        let rem = self.num.inplace_div(&self.den);
        let den = mem::replace(&mut self.den, rem);
        Some(mem::replace(&mut self.num, den))
    }
}

/// The current (n1/d1) and previous (n0/d0) convergents of an expansion.
#[derive(Debug, Clone)]
struct Recurrence {
    n1: BigUint,
    n0: BigUint,
    d1: BigUint,
    d0: BigUint,
}

impl Recurrence {
    /// The state before the first term. Pushing a0 produces the convergent
    /// a0/1 with the previous convergent 1/0.
    fn new() -> Self {
        Recurrence {
            n1: BigUint::one(),
            n0: BigUint::zero(),
            d1: BigUint::zero(),
            d0: BigUint::one(),
        }
    }

    /// Advance to the next convergent, using the term `a`.
    fn push(&mut self, a: &BigUint) {
        let n = &(&self.n1 * a) + &self.n0;
        self.n0 = mem::replace(&mut self.n1, n);
        let d = &(&self.d1 * a) + &self.d0;
        self.d0 = mem::replace(&mut self.d1, d);
    }

    /// Returns true if the current convergent is exactly p/q.
    fn is_exactly(&self, p: &BigUint, q: &BigUint) -> bool {
        &self.n1 * q == p * &self.d1
    }
}

/// Iterates over the convergents of the continued fraction of a float, from
/// the integral part to the exact value. The sign of the float is applied to
/// every convergent.
///
/// # Examples
///
/// ```
///    use exact_ratio::convergents;
///
///    let pi: Vec<String> = convergents(std::f64::consts::PI)
///        .unwrap()
///        .take(4)
///        .map(|r| r.to_string())
///        .collect();
///    assert_eq!(pi, ["3", "22/7", "333/106", "355/113"]);
/// ```
#[derive(Debug, Clone)]
pub struct Convergents {
    negative: bool,
    terms: PartialQuotients,
    state: Recurrence,
}

impl Iterator for Convergents {
    type Item = Ratio;

    fn next(&mut self) -> Option<Ratio> {
        let a = self.terms.next()?;
        self.state.push(&a);
        Some(Ratio::new(
            self.negative,
            self.state.n1.clone(),
            self.state.d1.clone(),
        ))
    }
}

impl Float {
    /// Returns the exact magnitude of the number, or a domain error for NaN
    /// and Inf.
    fn exact_magnitude(&self) -> Result<(BigUint, BigUint)> {
        self.to_dyadic().ok_or(Error::Domain(self.get_category()))
    }

    /// Convert the number to the ratio of two integers that is exactly equal
    /// to the number. The ratio is the last convergent of the continued
    /// fraction of the number, so it is in lowest terms. Zero (of either
    /// sign) is 0/1. NaN and Inf are rejected with a domain error.
    pub fn as_integer_ratio(&self) -> Result<Ratio> {
        let (p, q) = self.exact_magnitude()?;
        let mut terms = PartialQuotients::new(p.clone(), q.clone());
        let mut conv = Recurrence::new();

        // The first term is the integral part, and always exists.
        if let Some(a) = terms.next() {
            conv.push(&a);
        }
        while !conv.is_exactly(&p, &q) {
            let Some(a) = terms.next() else {
                break;
            };
            conv.push(&a);
        }
        debug_assert!(conv.is_exactly(&p, &q), "expansion ended early");

        // Zero is never negative, so -0.0 becomes 0/1.
        Ok(Ratio::new(self.get_sign(), conv.n1, conv.d1))
    }

    /// Returns an iterator over the convergents of the continued fraction of
    /// the number. NaN and Inf are rejected with a domain error.
    pub fn convergents(&self) -> Result<Convergents> {
        let (p, q) = self.exact_magnitude()?;
        Ok(Convergents {
            negative: self.get_sign(),
            terms: PartialQuotients::new(p, q),
            state: Recurrence::new(),
        })
    }

    /// Returns an iterator over the partial quotients of the continued
    /// fraction of the magnitude of the number.
    pub fn partial_quotients(&self) -> Result<PartialQuotients> {
        let (p, q) = self.exact_magnitude()?;
        Ok(PartialQuotients::new(p, q))
    }
}

/// Returns the ratio of two integers that is exactly equal to `value`.
///
/// # Examples
///
/// ```
///    use exact_ratio::as_integer_ratio;
///
///    let r = as_integer_ratio(0.1).unwrap();
///    assert_eq!(r.to_string(), "3602879701896397/36028797018963968");
///    assert!(as_integer_ratio(f64::NAN).is_err());
/// ```
pub fn as_integer_ratio(value: f64) -> Result<Ratio> {
    Float::from_f64(value).as_integer_ratio()
}

/// Returns the ratio of two integers that is exactly equal to the fp32
/// `value`.
pub fn as_integer_ratio_f32(value: f32) -> Result<Ratio> {
    Float::from_f32(value).as_integer_ratio()
}

/// Returns an iterator over the convergents of the continued fraction of
/// `value`.
pub fn convergents(value: f64) -> Result<Convergents> {
    Float::from_f64(value).convergents()
}

#[cfg(test)]
use alloc::string::ToString;

#[test]
fn test_known_ratios() {
    let check = |v: f64, expected: &str| {
        assert_eq!(as_integer_ratio(v).unwrap().to_string(), expected);
    };
    check(0.5, "1/2");
    check(0.0, "0");
    check(-0.5, "-1/2");
    check(0.1, "3602879701896397/36028797018963968");
    check(2.0, "2");
    check(0.3, "5404319552844595/18014398509481984");
    check(core::f64::consts::PI, "884279719003555/281474976710656");
    check(-1e22, "-10000000000000000000000");
    check(f64::from_bits(1), "1/202402253307310618352495346718917307049556649764142118356901358027430339567995346891960383701437124495187077864316811911389808737385793476867013399940738509921517424276566361364466907742093216341239767678472745068562007483424692698618103355649159556340810056512358769552333414615230502532186327508646006263307707741093494784");
}

#[test]
fn test_zero_sign() {
    let pos = as_integer_ratio(0.0).unwrap();
    let neg = as_integer_ratio(-0.0).unwrap();
    assert_eq!(pos, neg);
    assert!(!neg.is_negative());
    assert!(neg.is_zero());
    assert!(neg.denom().is_one());
}

#[test]
fn test_domain_errors() {
    use crate::float::Category;

    assert_eq!(as_integer_ratio(f64::NAN), Err(Error::Domain(Category::NaN)));
    assert_eq!(as_integer_ratio(-f64::NAN), Err(Error::Domain(Category::NaN)));
    assert_eq!(
        as_integer_ratio(f64::INFINITY),
        Err(Error::Domain(Category::Infinity))
    );
    assert_eq!(
        as_integer_ratio(f64::NEG_INFINITY),
        Err(Error::Domain(Category::Infinity))
    );
    assert!(as_integer_ratio_f32(f32::NAN).is_err());
    assert!(convergents(f64::INFINITY).is_err());
    assert!(Float::from_f64(f64::NAN).partial_quotients().is_err());
}

#[test]
fn test_integers_stop_at_first_convergent() {
    for v in [1.0, 2.0, 7.0, -3.0, 1e15, 9007199254740992.0] {
        let r = as_integer_ratio(v).unwrap();
        assert!(r.is_integer());
        assert_eq!(convergents(v).unwrap().count(), 1);
    }
    let r = as_integer_ratio(f64::MAX).unwrap();
    let mut max = BigUint::from_u64((1 << 53) - 1);
    max.shift_left(971);
    assert_eq!(r.numer().magnitude(), &max);
    assert!(r.is_integer());
}

#[test]
fn test_partial_quotients() {
    // 3/8 = [0; 2, 1, 2].
    let terms: alloc::vec::Vec<u64> = Float::from_f64(0.375)
        .partial_quotients()
        .unwrap()
        .map(|a| a.as_u64())
        .collect();
    assert_eq!(terms, [0, 2, 1, 2]);

    // The sign does not change the expansion.
    let terms: alloc::vec::Vec<u64> = Float::from_f64(-2.75)
        .partial_quotients()
        .unwrap()
        .map(|a| a.as_u64())
        .collect();
    assert_eq!(terms, [2, 1, 3]);

    // Verified with https://oeis.org/A001203.
    let terms: alloc::vec::Vec<u64> = Float::from_f64(core::f64::consts::PI)
        .partial_quotients()
        .unwrap()
        .take(6)
        .map(|a| a.as_u64())
        .collect();
    assert_eq!(terms, [3, 7, 15, 1, 292, 1]);
}

#[test]
fn test_convergents() {
    let pi: alloc::vec::Vec<_> = convergents(-core::f64::consts::PI)
        .unwrap()
        .map(|r| r.to_string())
        .collect();
    assert_eq!(&pi[..4], ["-3", "-22/7", "-333/106", "-355/113"]);
    assert_eq!(pi.last().unwrap(), "-884279719003555/281474976710656");

    // The last convergent is the exact ratio.
    let last = convergents(0.1).unwrap().last().unwrap();
    assert_eq!(last, as_integer_ratio(0.1).unwrap());
    assert_eq!(convergents(0.0).unwrap().last().unwrap().to_string(), "0");
}

#[test]
fn test_narrow_formats() {
    use crate::float::{BF16, FP16};

    let r = as_integer_ratio_f32(0.1).unwrap();
    assert_eq!(r.to_string(), "13421773/134217728");
    assert_eq!(r.as_f32(), 0.1f32);
    assert_eq!(as_integer_ratio_f32(-1.5).unwrap().to_string(), "-3/2");

    let third = Float::from_bits(FP16, 0x3555).as_integer_ratio().unwrap();
    assert_eq!(third.to_string(), "1365/4096");
    let tiny = Float::from_bits(FP16, 0x0001).as_integer_ratio().unwrap();
    assert_eq!(tiny.to_string(), "1/16777216");
    assert!(Float::from_bits(FP16, 0x7c00).as_integer_ratio().is_err());
    let one = Float::from_bits(BF16, 0xbf80).as_integer_ratio().unwrap();
    assert_eq!(one.to_string(), "-1");
}

#[test]
fn test_special_values() {
    use crate::utils::get_special_test_values;

    for v in get_special_test_values() {
        let r = as_integer_ratio(v);
        if v.is_nan() || v.is_infinite() {
            assert!(r.is_err());
            continue;
        }
        let r = r.unwrap();
        assert_eq!(r.as_f64(), v);
        assert_eq!(r.is_negative(), v < 0.0);
    }
}

#[test]
fn test_random_values() {
    use crate::utils::Lfsr;

    // Check the exactness, lowest terms, sign symmetry and round trip
    // properties on random bit patterns.
    let mut lfsr = Lfsr::new();
    for _ in 0..3000 {
        let bits = lfsr.get64();
        let v = f64::from_bits(bits);
        let float = Float::from_f64(v);
        let r = match as_integer_ratio(v) {
            Ok(r) => r,
            Err(_) => {
                assert!(v.is_nan() || v.is_infinite());
                continue;
            }
        };

        let (p, q) = float.to_dyadic().unwrap();
        assert_eq!(r.numer().magnitude() * &q, &p * r.denom());
        assert!(r.numer().magnitude().gcd(r.denom()).is_one());
        assert!(!r.denom().is_zero());
        assert_eq!(r.as_f64().to_bits(), bits);

        let flipped = as_integer_ratio(-v).unwrap();
        assert_eq!(flipped.numer(), &-r.numer().clone());
        assert_eq!(flipped.denom(), r.denom());

        // The expansion is short, regardless of the exponent.
        assert!(float.partial_quotients().unwrap().count() <= 80);
    }
}

#[test]
fn test_random_f32_values() {
    use crate::utils::Lfsr;

    let mut lfsr = Lfsr::new_with_seed(1995);
    for _ in 0..3000 {
        let bits = lfsr.get64() as u32;
        let v = f32::from_bits(bits);
        if v.is_nan() || v.is_infinite() {
            assert!(as_integer_ratio_f32(v).is_err());
            continue;
        }
        let r = as_integer_ratio_f32(v).unwrap();
        assert_eq!(r.as_f32().to_bits(), bits);
        // Widening to fp64 is exact, and so is the ratio.
        assert_eq!(r, as_integer_ratio(v as f64).unwrap());
    }
}
