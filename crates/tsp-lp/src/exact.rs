//! Exact rational arithmetic shared by safe Gomory cuts and the pricer's exact bound.
//!
//! Both call sites start from an `f64` read off a [`crate::Relaxation`] (a tableau row or
//! a dual value) and need it turned into an exact `BigRational` without silently carrying
//! floating-point error into a cut coefficient or a certified lower bound. `ExactNum`
//! wraps that reconstruction plus the handful of arithmetic operations both callers need.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

/// Continued-fraction denominator cap: reconstructed rationals never carry a denominator
/// past this, trading a little residual rounding for tableau rows that stay small.
const DEFAULT_MAX_DENOMINATOR: u64 = 1_000_000;

/// An exact rational value, used where the spec calls for certificate-grade arithmetic:
/// SafeGMI tableau rows and the pricer's exact lower bound.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExactNum(BigRational);

impl ExactNum {
    pub fn from_integer(n: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn zero() -> Self {
        Self(BigRational::from_integer(BigInt::from(0)))
    }

    /// Reconstructs `value` as the best rational approximation with denominator at most
    /// [`DEFAULT_MAX_DENOMINATOR`], via the standard continued-fraction expansion. This is
    /// how a simplex multiplier or tableau entry read back as `f64` gets turned into an
    /// exact value for SafeGMI's row arithmetic.
    pub fn from_f64_reconstructed(value: f64) -> Self {
        Self::from_f64_with_cap(value, DEFAULT_MAX_DENOMINATOR)
    }

    pub fn from_f64_with_cap(value: f64, max_denominator: u64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        let sign = if value < 0.0 { -1 } else { 1 };
        let mut x = value.abs();
        let (mut h_prev, mut h_curr) = (BigInt::from(0), BigInt::from(1));
        let mut k_prev = BigInt::from(1);
        let mut k_curr = BigInt::from(0);
        let cap = BigInt::from(max_denominator);

        loop {
            let a = x.floor();
            let a_int = BigInt::from(a as i64);
            let h_next = &a_int * &h_curr + &h_prev;
            let k_next = &a_int * &k_curr + &k_prev;
            if k_next > cap {
                break;
            }
            h_prev = h_curr;
            h_curr = h_next;
            k_prev = k_curr;
            k_curr = k_next;

            let frac = x - a;
            if frac.abs() < 1e-12 {
                break;
            }
            x = 1.0 / frac;
            if !x.is_finite() {
                break;
            }
        }
        if k_curr == BigInt::from(0) {
            return Self::zero();
        }
        let rational = BigRational::new(h_curr * BigInt::from(sign), k_curr);
        Self(rational)
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_negative(&self) -> bool {
        // `Ratio` always normalizes to a positive denominator, so the sign lives
        // entirely in the numerator.
        self.0.numer() < &BigInt::from(0)
    }

    /// The fractional part in `[0, 1)`, the quantity SafeGMI's cut-coefficient formula
    /// (`a_j - floor(a_j)`) needs for every tableau entry.
    pub fn fractional_part(&self) -> Self {
        let floor = self.0.floor();
        Self(&self.0 - floor)
    }

    pub fn as_rational(&self) -> &BigRational {
        &self.0
    }
}

impl std::ops::Add for ExactNum {
    type Output = ExactNum;
    fn add(self, rhs: ExactNum) -> ExactNum {
        ExactNum(self.0 + rhs.0)
    }
}

impl std::ops::Sub for ExactNum {
    type Output = ExactNum;
    fn sub(self, rhs: ExactNum) -> ExactNum {
        ExactNum(self.0 - rhs.0)
    }
}

impl std::ops::Mul for ExactNum {
    type Output = ExactNum;
    fn mul(self, rhs: ExactNum) -> ExactNum {
        ExactNum(self.0 * rhs.0)
    }
}

impl std::iter::Sum for ExactNum {
    fn sum<I: Iterator<Item = ExactNum>>(iter: I) -> Self {
        iter.fold(ExactNum::zero(), |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_simple_fractions() {
        let half = ExactNum::from_f64_reconstructed(0.5);
        assert_eq!(half.as_rational(), &BigRational::new(BigInt::from(1), BigInt::from(2)));

        let third = ExactNum::from_f64_reconstructed(1.0 / 3.0);
        assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn fractional_part_is_in_unit_interval() {
        let x = ExactNum::from_f64_reconstructed(7.0 / 3.0);
        let frac = x.fractional_part();
        assert!(!frac.is_negative());
        assert!(frac.to_f64() < 1.0);
    }

    #[test]
    fn zero_round_trips() {
        assert_eq!(ExactNum::zero().to_f64(), 0.0);
    }
}
