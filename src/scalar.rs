//! The numeric abstraction shared by the primal and dual evaluation paths.
//!
//! Generalizes `tachyon`'s "one kernel signature, many hardware backends"
//! idea from hash backends to numeric scalar types: kernel bodies in
//! [`crate::kernels`] are written once against [`Scalar`] and instantiated
//! for `f32`, `f64`, and [`crate::dual::Dual`].

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Float;

/// A scalar type a kernel can operate on: the primal floats or a forward-mode
/// dual number.
///
/// All transcendental methods mirror host math library semantics with no
/// domain clamping, per `spec.md` §4.E.
pub trait Scalar:
    Copy
    + Clone
    + Debug
    + Send
    + Sync
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Lifts a real constant into this scalar type (zero derivative part,
    /// for [`crate::dual::Dual`]).
    fn from_f64(v: f64) -> Self;

    /// The additive identity.
    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    /// The multiplicative identity.
    fn one() -> Self {
        Self::from_f64(1.0)
    }

    /// The real part, as `f64`, for output conversion.
    fn to_f64(self) -> f64;

    /// `|x|`.
    fn abs(self) -> Self;
    /// `acos(x)`.
    fn acos(self) -> Self;
    /// `asin(x)`.
    fn asin(self) -> Self;
    /// `atan(x)`.
    fn atan(self) -> Self;
    /// Real cube root.
    fn cbrt(self) -> Self;
    /// `ceil(x)`.
    fn ceil(self) -> Self;
    /// `cos(x)`.
    fn cos(self) -> Self;
    /// `cosh(x)`.
    fn cosh(self) -> Self;
    /// `exp(x)`.
    fn exp(self) -> Self;
    /// `floor(x)`.
    fn floor(self) -> Self;
    /// `ln(x)`.
    fn ln(self) -> Self;
    /// `ln(1 + x)`.
    fn ln_1p(self) -> Self;
    /// `sin(x)`.
    fn sin(self) -> Self;
    /// `sinh(x)`.
    fn sinh(self) -> Self;
    /// `sqrt(x)`.
    fn sqrt(self) -> Self;
    /// `tan(x)`.
    fn tan(self) -> Self;
    /// `tanh(x)`.
    fn tanh(self) -> Self;
    /// `pow(self, other)`.
    fn powf(self, other: Self) -> Self;
    /// IEEE `max`.
    fn fmax(self, other: Self) -> Self;
    /// IEEE `min`.
    fn fmin(self, other: Self) -> Self;
}

macro_rules! impl_scalar_for_float {
    ($t:ty) => {
        impl Scalar for $t {
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
            fn abs(self) -> Self {
                Float::abs(self)
            }
            fn acos(self) -> Self {
                Float::acos(self)
            }
            fn asin(self) -> Self {
                Float::asin(self)
            }
            fn atan(self) -> Self {
                Float::atan(self)
            }
            fn cbrt(self) -> Self {
                Float::cbrt(self)
            }
            fn ceil(self) -> Self {
                Float::ceil(self)
            }
            fn cos(self) -> Self {
                Float::cos(self)
            }
            fn cosh(self) -> Self {
                Float::cosh(self)
            }
            fn exp(self) -> Self {
                Float::exp(self)
            }
            fn floor(self) -> Self {
                Float::floor(self)
            }
            fn ln(self) -> Self {
                Float::ln(self)
            }
            fn ln_1p(self) -> Self {
                Float::ln_1p(self)
            }
            fn sin(self) -> Self {
                Float::sin(self)
            }
            fn sinh(self) -> Self {
                Float::sinh(self)
            }
            fn sqrt(self) -> Self {
                Float::sqrt(self)
            }
            fn tan(self) -> Self {
                Float::tan(self)
            }
            fn tanh(self) -> Self {
                Float::tanh(self)
            }
            fn powf(self, other: Self) -> Self {
                Float::powf(self, other)
            }
            fn fmax(self, other: Self) -> Self {
                Float::max(self, other)
            }
            fn fmin(self, other: Self) -> Self {
                Float::min(self, other)
            }
        }
    };
}

impl_scalar_for_float!(f32);

impl Scalar for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn abs(self) -> Self {
        Float::abs(self)
    }
    fn acos(self) -> Self {
        Float::acos(self)
    }
    fn asin(self) -> Self {
        Float::asin(self)
    }
    fn atan(self) -> Self {
        Float::atan(self)
    }
    fn cbrt(self) -> Self {
        Float::cbrt(self)
    }
    fn ceil(self) -> Self {
        Float::ceil(self)
    }
    fn cos(self) -> Self {
        Float::cos(self)
    }
    fn cosh(self) -> Self {
        Float::cosh(self)
    }
    fn exp(self) -> Self {
        Float::exp(self)
    }
    fn floor(self) -> Self {
        Float::floor(self)
    }
    fn ln(self) -> Self {
        Float::ln(self)
    }
    fn ln_1p(self) -> Self {
        Float::ln_1p(self)
    }
    fn sin(self) -> Self {
        Float::sin(self)
    }
    fn sinh(self) -> Self {
        Float::sinh(self)
    }
    fn sqrt(self) -> Self {
        Float::sqrt(self)
    }
    fn tan(self) -> Self {
        Float::tan(self)
    }
    fn tanh(self) -> Self {
        Float::tanh(self)
    }
    fn powf(self, other: Self) -> Self {
        Float::powf(self, other)
    }
    fn fmax(self, other: Self) -> Self {
        Float::max(self, other)
    }
    fn fmin(self, other: Self) -> Self {
        Float::min(self, other)
    }
}
