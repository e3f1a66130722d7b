//! This module contains the arbitrary-precision integers that hold the
//! numerator and denominator of a ratio, and the state of the continued
//! fraction recurrence.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// This is an arbitrary-size unsigned big number. The number is backed by a
/// `Vec<u64>` of words, least significant word first, and always holds at
/// least one word. BigUint implements the handful of operations that the
/// continued fraction expansion needs: add, sub, mul, div, shifts and compare.
///
/// # Examples
///
/// ```
///    use exact_ratio::BigUint;
///
///    let x = BigUint::from_u64(1995);
///    let y = BigUint::from_u64(90210);
///
///    let z = x * y;
///    assert_eq!(z.as_decimal(), "179968950");
/// ```
///
#[derive(Debug, Clone)]
pub struct BigUint {
    parts: Vec<u64>,
}

impl BigUint {
    /// Create a new zero big int number.
    pub fn zero() -> Self {
        BigUint::from_u64(0)
    }

    /// Create a new number with the value 1.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Create a number and set the lowest 64 bits to `val`.
    pub fn from_u64(val: u64) -> Self {
        BigUint { parts: vec![val] }
    }

    /// Create a number and set the lowest 128 bits to `val`.
    pub fn from_u128(val: u128) -> Self {
        let mut x = BigUint {
            parts: vec![val as u64, (val >> 64) as u64],
        };
        x.shrink();
        x
    }

    /// Construct a bigint from the words in 'parts' (lowest word first).
    pub fn from_parts(parts: &[u64]) -> Self {
        let mut x = BigUint {
            parts: parts.to_vec(),
        };
        if x.parts.is_empty() {
            x.parts.push(0);
        }
        x.shrink();
        x
    }

    /// Create a pseudorandom number with `parts` number of words.
    /// The random number generator is initialized with `seed`.
    pub fn pseudorandom(parts: usize, seed: u32) -> Self {
        use crate::utils::Lfsr;
        let words: Vec<u64> = Lfsr::new_with_seed(seed).take(parts).collect();
        Self::from_parts(&words)
    }

    fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns the lowest 64 bits.
    pub fn as_u64(&self) -> u64 {
        debug_assert!(self.parts[1..].iter().all(|&x| x == 0));
        self.parts[0]
    }

    /// Returns the lowest 128 bits.
    pub fn as_u128(&self) -> u128 {
        let low = self.parts[0] as u128;
        if self.len() < 2 {
            return low;
        }
        debug_assert!(self.parts[2..].iter().all(|&x| x == 0));
        low | ((self.parts[1] as u128) << 64)
    }

    /// Return true if the number is equal to zero.
    pub fn is_zero(&self) -> bool {
        self.parts.iter().all(|&x| x == 0)
    }

    /// Return true if the number is equal to one.
    pub fn is_one(&self) -> bool {
        self.parts[0] == 1 && self.parts[1..].iter().all(|&x| x == 0)
    }

    /// Keep only the lowest `words` words.
    #[cfg(test)]
    fn mask_words(&mut self, words: usize) {
        self.parts.truncate(words.max(1));
        self.shrink();
    }

    /// Flip the `bit_num` bit.
    fn flip_bit(&mut self, bit_num: usize) {
        let which_word = bit_num / u64::BITS as usize;
        let bit_in_word = bit_num % u64::BITS as usize;
        self.grow(which_word + 1);
        self.parts[which_word] ^= 1 << bit_in_word;
    }

    /// Returns the index of the most significant bit (the highest '1'),
    /// using 1-based counting (the first bit is 1, and zero means no bits are
    /// set).
    pub fn msb_index(&self) -> usize {
        for i in (0..self.len()).rev() {
            let part = self.parts[i];
            if part != 0 {
                let idx = 64 - part.leading_zeros() as usize;
                return i * 64 + idx;
            }
        }
        0
    }

    /// Returns the index of the first '1' in the number, or zero if the
    /// number is zero.
    pub fn trailing_zeros(&self) -> usize {
        for (i, part) in self.parts.iter().enumerate() {
            if *part != 0 {
                return i * 64 + part.trailing_zeros() as usize;
            }
        }
        0
    }

    /// Ensure that there are at least 'size' words in the bigint.
    fn grow(&mut self, size: usize) {
        if self.len() < size {
            self.parts.resize(size, 0);
        }
    }

    /// Remove the leading zero words from the bigint.
    fn shrink(&mut self) {
        while self.len() > 1 && self.parts[self.len() - 1] == 0 {
            self.parts.pop();
        }
    }

    /// Add `rhs` to this number.
    pub fn inplace_add(&mut self, rhs: &Self) {
        self.grow(rhs.len());
        let mut carry = false;
        for i in 0..self.len() {
            let word = rhs.parts.get(i).copied().unwrap_or(0);
            if word == 0 && !carry && i >= rhs.len() {
                break;
            }
            let first = self.parts[i].overflowing_add(word);
            let second = first.0.overflowing_add(carry as u64);
            carry = first.1 || second.1;
            self.parts[i] = second.0;
        }
        if carry {
            self.parts.push(1);
        }
    }

    /// Subtract `rhs` from self, and return true if the operation
    /// overflowed (borrow).
    #[must_use]
    pub fn inplace_sub(&mut self, rhs: &Self) -> bool {
        self.inplace_sub_slice(&rhs.parts[..], 0)
    }

    /// Implements subtraction of the 'rhs' sequence of words from this
    /// number. The parameter `bottom_zeros` specifies how many lower *words*
    /// in `rhs` are zeros and can be ignored. This is used by the division
    /// algorithm that shifts the divisor.
    #[allow(clippy::needless_range_loop)]
    fn inplace_sub_slice(&mut self, rhs: &[u64], bottom_zeros: usize) -> bool {
        self.grow(rhs.len());
        let mut borrow = false;
        for i in bottom_zeros..rhs.len() {
            let first = self.parts[i].overflowing_sub(rhs[i]);
            let second = first.0.overflowing_sub(borrow as u64);
            borrow = first.1 || second.1;
            self.parts[i] = second.0;
        }
        // Propagate the borrow bit.
        for i in rhs.len()..self.len() {
            if !borrow {
                break;
            }
            let second = self.parts[i].overflowing_sub(1);
            self.parts[i] = second.0;
            borrow = second.1;
        }
        self.shrink();
        borrow
    }

    /// Multiply self by `rhs`.
    pub fn inplace_mul(&mut self, rhs: &Self) {
        let mut parts = vec![0u64; self.len() + rhs.len()];
        for (i, &a) in self.parts.iter().enumerate() {
            let mut carry: u128 = 0;
            for (j, &b) in rhs.parts.iter().enumerate() {
                // a * b + word + carry can't overflow 128 bits.
                let cur = parts[i + j] as u128 + (a as u128) * (b as u128) + carry;
                parts[i + j] = cur as u64;
                carry = cur >> 64;
            }
            parts[i + rhs.len()] = carry as u64;
        }
        self.parts = parts;
        self.shrink();
    }

    /// Divide self by `divisor`, and return the remainder.
    pub fn inplace_div(&mut self, divisor: &Self) -> Self {
        let divisor_msb = divisor.msb_index();
        assert_ne!(divisor_msb, 0, "division by zero");

        // Single word division.
        if self.len() == 1 && divisor.len() == 1 {
            let a = self.parts[0];
            let b = divisor.parts[0];
            self.parts[0] = a / b;
            return Self::from_u64(a % b);
        }

        let dividend_msb = self.msb_index();
        if divisor_msb > dividend_msb {
            return core::mem::replace(self, Self::zero());
        }

        let mut dividend = self.clone();
        let mut divisor = divisor.clone();
        let mut quotient = Self::zero();

        // Align the first bit of the divisor with the first bit of the
        // dividend.
        let bits = dividend_msb - divisor_msb;
        divisor.shift_left(bits);

        // Perform the long division.
        for i in (0..bits + 1).rev() {
            // The lower i/64 words of the shifted divisor are zeros.
            let low_zeros = i / 64;

            if dividend >= divisor {
                let overflow = dividend.inplace_sub_slice(&divisor.parts, low_zeros);
                debug_assert!(!overflow);
                quotient.flip_bit(i);
            }
            divisor.shift_right(1);
        }

        quotient.shrink();
        *self = quotient;
        dividend
    }

    /// Shift the bits in the numbers `bits` to the left.
    pub fn shift_left(&mut self, bits: usize) {
        let words_to_shift = bits / u64::BITS as usize;
        let bits_in_word = bits % u64::BITS as usize;

        self.grow(self.len() + words_to_shift + 1);

        for i in (0..self.len()).rev() {
            let left_val = if i >= words_to_shift {
                self.parts[i - words_to_shift]
            } else {
                0
            };
            let right_val = if i > words_to_shift && bits_in_word != 0 {
                self.parts[i - words_to_shift - 1]
            } else {
                0
            };
            let right = if bits_in_word == 0 {
                0
            } else {
                right_val >> (u64::BITS as usize - bits_in_word)
            };
            self.parts[i] = (left_val << bits_in_word) | right;
        }
        self.shrink();
    }

    /// Shift the bits in the numbers `bits` to the right.
    pub fn shift_right(&mut self, bits: usize) {
        let words_to_shift = bits / u64::BITS as usize;
        let bits_in_word = bits % u64::BITS as usize;

        for i in 0..self.len() {
            let left_val = if i + words_to_shift < self.len() {
                self.parts[i + words_to_shift]
            } else {
                0
            };
            let right_val = if i + 1 + words_to_shift < self.len() {
                self.parts[i + 1 + words_to_shift]
            } else {
                0
            };
            let right = if bits_in_word == 0 {
                0
            } else {
                right_val << (u64::BITS as usize - bits_in_word)
            };
            self.parts[i] = (left_val >> bits_in_word) | right;
        }
        self.shrink();
    }

    /// Returns the greatest common divisor of self and `other`.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let rem = a.inplace_div(&b);
            a = core::mem::replace(&mut b, rem);
        }
        a
    }

    /// Splits the number into base 10^19 digits, lowest digit first.
    fn decimal_words(&self) -> Vec<u64> {
        // The largest power of ten that fits in a word.
        const WORD: u64 = 10_000_000_000_000_000_000;
        let word = BigUint::from_u64(WORD);
        let mut num = self.clone();
        let mut words = Vec::new();
        loop {
            let rem = num.inplace_div(&word);
            words.push(rem.as_u64());
            if num.is_zero() {
                return words;
            }
        }
    }

    /// Returns the number in base 10.
    pub fn as_decimal(&self) -> String {
        use alloc::string::ToString;
        self.to_string()
    }

    #[cfg(feature = "std")]
    pub fn dump(&self) {
        use std::println;
        println!("[{:x?}]", self.parts);
    }
}

impl Default for BigUint {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self.decimal_words();
        let mut iter = words.iter().rev();
        if let Some(head) = iter.next() {
            write!(f, "{}", head)?;
        }
        for word in iter {
            write!(f, "{:019}", word)?;
        }
        Ok(())
    }
}

impl Eq for BigUint {}

impl PartialEq for BigUint {
    fn eq(&self, other: &BigUint) -> bool {
        self.cmp(other).is_eq()
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        // This part word is longer.
        if self.len() > other.len()
            && self.parts[other.len()..].iter().any(|&x| x != 0)
        {
            return Ordering::Greater;
        }

        // The other word is longer.
        if other.len() > self.len()
            && other.parts[self.len()..].iter().any(|&x| x != 0)
        {
            return Ordering::Less;
        }
        let same_len = other.len().min(self.len());

        // Compare all of the digits, from MSB to LSB.
        for i in (0..same_len).rev() {
            match self.parts[i].cmp(&other.parts[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        // Self + Self
        impl $trait_name for BigUint {
            type Output = Self;

            fn $func_name(self, rhs: Self) -> Self::Output {
                self.$func_name(&rhs)
            }
        }

        // Self + &Self -> Self
        impl $trait_name<&Self> for BigUint {
            type Output = Self;
            fn $func_name(self, rhs: &Self) -> Self::Output {
                let mut n = self;
                let _ = n.$func_impl_name(rhs);
                n
            }
        }

        // &Self + &Self -> Self
        impl $trait_name<Self> for &BigUint {
            type Output = BigUint;
            fn $func_name(self, rhs: Self) -> Self::Output {
                let mut n = self.clone();
                let _ = n.$func_impl_name(rhs);
                n
            }
        }

        // Self + u64 -> Self
        impl $trait_name<u64> for BigUint {
            type Output = Self;
            fn $func_name(self, rhs: u64) -> Self::Output {
                let mut n = self;
                let _ = n.$func_impl_name(&Self::from_u64(rhs));
                n
            }
        }
    };
}

declare_operator!(Add, add, inplace_add);
declare_operator!(Sub, sub, inplace_sub);
declare_operator!(Mul, mul, inplace_mul);
declare_operator!(Div, div, inplace_div);

macro_rules! declare_assign_operator {
    ($trait_name:ident,
     $func_name:ident,
     $func_impl_name:ident) => {
        impl $trait_name for BigUint {
            fn $func_name(&mut self, rhs: Self) {
                let _ = self.$func_impl_name(&rhs);
            }
        }

        impl $trait_name<&BigUint> for BigUint {
            fn $func_name(&mut self, rhs: &Self) {
                let _ = self.$func_impl_name(rhs);
            }
        }
    };
}

declare_assign_operator!(AddAssign, add_assign, inplace_add);
declare_assign_operator!(SubAssign, sub_assign, inplace_sub);
declare_assign_operator!(MulAssign, mul_assign, inplace_mul);
declare_assign_operator!(DivAssign, div_assign, inplace_div);

/// A signed big integer, stored as a sign and a magnitude. Zero is never
/// negative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BigInt {
    negative: bool,
    magnitude: BigUint,
}

impl BigInt {
    /// Create a number from a sign and a magnitude.
    pub fn from_parts(negative: bool, magnitude: BigUint) -> Self {
        let negative = negative && !magnitude.is_zero();
        BigInt {
            negative,
            magnitude,
        }
    }

    pub fn from_i64(val: i64) -> Self {
        Self::from_parts(val < 0, BigUint::from_u64(val.unsigned_abs()))
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Returns the absolute value.
    pub fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    /// Returns the sign and the magnitude.
    pub fn into_parts(self) -> (bool, BigUint) {
        (self.negative, self.magnitude)
    }
}

impl From<BigUint> for BigInt {
    fn from(magnitude: BigUint) -> Self {
        Self::from_parts(false, magnitude)
    }
}

impl Neg for BigInt {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::from_parts(!self.negative, self.magnitude)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

#[test]
fn test_shl() {
    let mut x = BigUint::from_u64(0xff00ff);
    x.shift_left(17);
    assert_eq!(x.as_u64(), 0x1fe01fe0000);
    x.shift_left(17);
    assert_eq!(x.as_u64(), 0x3fc03fc00000000);
    x.shift_left(64);
    assert_eq!(x, BigUint::from_parts(&[0, 0x3fc03fc00000000]));
    x.shift_left(128);
    assert_eq!(x, BigUint::from_parts(&[0, 0, 0, 0x3fc03fc00000000]));
}

#[test]
fn test_shr() {
    let mut x = BigUint::from_u64(0xff00ff);
    x.shift_left(128);
    assert_eq!(x, BigUint::from_parts(&[0, 0, 0xff00ff]));
    x.shift_right(17);
    assert_eq!(x, BigUint::from_parts(&[0, 0x807f800000000000, 0x7f]));
    x.shift_right(64);
    assert_eq!(x, BigUint::from_parts(&[0x807f800000000000, 0x7f]));
    x.shift_right(111);
    assert!(x.is_zero());
}

#[test]
fn test_mul_basic() {
    let mut x = BigUint::from_u64(0xffff_ffff_ffff_ffff);
    let y = BigUint::from_u64(25);
    x.inplace_mul(&x.clone());
    x.inplace_mul(&y);
    assert_eq!(x, BigUint::from_parts(&[0x19, 0xffff_ffff_ffff_ffce, 0x18]));
}

#[test]
fn test_add_basic() {
    let mut x = BigUint::from_u64(0xffffffff00000000);
    let y = BigUint::from_u64(0xffffffff);
    let z = BigUint::from_u64(0xf);
    x.inplace_add(&y);
    assert_eq!(x.as_u64(), 0xffffffffffffffff);
    x.inplace_add(&z);
    assert_eq!(x, BigUint::from_parts(&[0xe, 0x1]));
}

#[test]
fn test_sub_basic() {
    let mut x = BigUint::from_parts(&[0x0, 0x1]);
    let borrow = x.inplace_sub(&BigUint::one());
    assert!(!borrow);
    assert_eq!(x.as_u64(), 0xffffffffffffffff);

    let mut x = BigUint::from_parts(&[0x1, 0x1, 0x1]);
    let borrow = x.inplace_sub(&BigUint::from_parts(&[0x0, 0x1]));
    assert!(!borrow);
    assert_eq!(x, BigUint::from_parts(&[0x1, 0x0, 0x1]));

    let mut x = BigUint::from_u64(3);
    assert!(x.inplace_sub(&BigUint::from_u64(4)));
}

#[test]
fn test_div_basic() {
    let mut x1 = BigUint::from_u64(49);
    let mut x2 = BigUint::from_u64(703);
    let y = BigUint::from_u64(7);

    let rem = x1.inplace_div(&y);
    assert_eq!(x1.as_u64(), 7);
    assert_eq!(rem.as_u64(), 0);

    let rem = x2.inplace_div(&y);
    assert_eq!(x2.as_u64(), 100);
    assert_eq!(rem.as_u64(), 3);

    // Divisor larger than the dividend.
    let mut x3 = BigUint::from_u64(5);
    let rem = x3.inplace_div(&BigUint::from_parts(&[0, 1]));
    assert!(x3.is_zero());
    assert_eq!(rem.as_u64(), 5);
}

#[test]
fn test_basic_operations() {
    use crate::utils::Lfsr;

    // Compare add, sub, mul, div and cmp to the native u128 operations.
    let mut lfsr = Lfsr::new();
    for _ in 0..20000 {
        let a = lfsr.get64() as u128 | ((lfsr.get64() as u128) << 64);
        let b = lfsr.get64() as u128 | ((lfsr.get64() as u128) << 64);
        let b = b >> (lfsr.get64() % 128);
        let (ba, bb) = (BigUint::from_u128(a), BigUint::from_u128(b));

        assert_eq!(ba.cmp(&bb), a.cmp(&b));

        // The low half of the product matches the wrapping multiplication.
        let mut prod = &ba * &bb;
        prod.mask_words(2);
        assert_eq!(prod.as_u128(), a.wrapping_mul(b));
        if b != 0 {
            let mut q = &ba * &bb;
            let r = q.inplace_div(&bb);
            assert!(r.is_zero());
            assert_eq!(q, ba);

            let mut q = ba.clone();
            let r = q.inplace_div(&bb);
            assert_eq!(q.as_u128(), a / b);
            assert_eq!(r.as_u128(), a % b);
        }
        let (sum, carry) = a.overflowing_add(b);
        let mut expected = BigUint::from_u128(sum);
        if carry {
            expected.inplace_add(&BigUint::from_parts(&[0, 0, 1]));
        }
        assert_eq!(&ba + &bb, expected);
        if a >= b {
            assert_eq!((&ba - &bb).as_u128(), a - b);
        }
    }
}

#[test]
fn test_msb_and_trailing_zeros() {
    assert_eq!(BigUint::from_u64(0xffffffff00000000).msb_index(), 64);
    assert_eq!(BigUint::zero().msb_index(), 0);
    assert_eq!(BigUint::one().msb_index(), 1);
    assert_eq!(BigUint::from_u64(0xffffffff00000000).trailing_zeros(), 32);

    for i in 0..256 {
        let mut x = BigUint::one();
        x.shift_left(i);
        assert_eq!(x.msb_index(), i + 1);
        assert_eq!(x.trailing_zeros(), i);
    }
}

#[test]
fn test_gcd() {
    let a = BigUint::from_u64(2 * 3 * 5 * 7 * 11);
    let b = BigUint::from_u64(3 * 7 * 13);
    assert_eq!(a.gcd(&b).as_u64(), 21);
    assert_eq!(a.gcd(&BigUint::zero()), a);
    assert!(BigUint::from_u64(17).gcd(&BigUint::from_u64(64)).is_one());

    let mut big = BigUint::one();
    big.shift_left(300);
    let mut other = BigUint::from_u64(3);
    other.shift_left(120);
    let mut expected = BigUint::one();
    expected.shift_left(120);
    assert_eq!(big.gcd(&other), expected);
}

#[test]
fn test_decimal() {
    use alloc::string::ToString;

    assert_eq!(BigUint::zero().as_decimal(), "0");
    assert_eq!(BigUint::from_u64(90210).as_decimal(), "90210");
    assert_eq!(
        BigUint::from_u128(123_456_123_456_987_654_987_654u128).as_decimal(),
        "123456123456987654987654"
    );
    // 10^19 needs a zero padded low digit.
    assert_eq!(
        BigUint::from_u64(10_000_000_000_000_000_000).as_decimal(),
        "10000000000000000000"
    );
    let mut x = BigUint::one();
    x.shift_left(128);
    assert_eq!(x.as_decimal(), "340282366920938463463374607431768211456");

    assert_eq!(BigInt::from_i64(-42).to_string(), "-42");
    assert_eq!((-BigInt::from_i64(0)).to_string(), "0");
    assert!(!BigInt::from_parts(true, BigUint::zero()).is_negative());
}

#[test]
fn test_bigint_operators() {
    type BI = BigUint;
    let x = BI::from_u64(10);
    let y = BI::from_u64(1);

    let c = ((&x - &y) * x) / 2;
    assert_eq!(c.as_u64(), 45);
    assert_eq!((&y + &y).as_u64(), 2);

    let mut z = BI::from_u64(7);
    z *= BI::from_u64(6);
    z -= &BI::from_u64(2);
    z /= BI::from_u64(8);
    z += BI::one();
    assert_eq!(z.as_u64(), 6);
}
