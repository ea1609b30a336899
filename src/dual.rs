//! Forward-mode dual numbers.
//!
//! A dual `{ real, deriv[D] }` carries `D` simultaneous derivative lanes.
//! Arithmetic and transcendental operations are term-by-term lifts of the
//! real operations (product rule for multiplication, quotient rule for
//! division, chain rule for unary functions), so the same kernel bodies in
//! [`crate::kernels`] serve both the primal scalar and `Dual<D>` without
//! modification (`spec.md` §9).

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::scalar::Scalar;

/// The two dual dimensions the engine supports, chosen to saturate typical
/// SIMD register width (`spec.md` §6: "4 or 8 are typical").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualDimension {
    /// 4 simultaneous derivative lanes per sweep.
    Four,
    /// 8 simultaneous derivative lanes per sweep.
    Eight,
}

impl DualDimension {
    /// The lane count as a `usize`.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// A dual number with `D` derivative lanes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<const D: usize> {
    /// The real (primal) part.
    pub real: f64,
    /// The `D` derivative lanes.
    pub deriv: [f64; D],
}

impl<const D: usize> Dual<D> {
    /// A constant: zero derivative in every lane.
    #[must_use]
    pub const fn constant(real: f64) -> Self {
        Self {
            real,
            deriv: [0.0; D],
        }
    }

    /// A seeded input: unit derivative in lane `lane`, zero elsewhere.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= D`.
    #[must_use]
    pub fn seeded(real: f64, lane: usize) -> Self {
        let mut deriv = [0.0; D];
        deriv[lane] = 1.0;
        Self { real, deriv }
    }
}

impl<const D: usize> Add for Dual<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut deriv = [0.0; D];
        for i in 0..D {
            deriv[i] = self.deriv[i] + rhs.deriv[i];
        }
        Self {
            real: self.real + rhs.real,
            deriv,
        }
    }
}

impl<const D: usize> Sub for Dual<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut deriv = [0.0; D];
        for i in 0..D {
            deriv[i] = self.deriv[i] - rhs.deriv[i];
        }
        Self {
            real: self.real - rhs.real,
            deriv,
        }
    }
}

impl<const D: usize> Mul for Dual<D> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Product rule: d(uv) = u'v + uv'.
        let mut deriv = [0.0; D];
        for i in 0..D {
            deriv[i] = self.deriv[i] * rhs.real + self.real * rhs.deriv[i];
        }
        Self {
            real: self.real * rhs.real,
            deriv,
        }
    }
}

impl<const D: usize> Div for Dual<D> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        // Quotient rule: d(u/v) = (u'v - uv') / v^2.
        let inv_v2 = 1.0 / (rhs.real * rhs.real);
        let mut deriv = [0.0; D];
        for i in 0..D {
            deriv[i] = (self.deriv[i] * rhs.real - self.real * rhs.deriv[i]) * inv_v2;
        }
        Self {
            real: self.real / rhs.real,
            deriv,
        }
    }
}

impl<const D: usize> Neg for Dual<D> {
    type Output = Self;
    fn neg(self) -> Self {
        let mut deriv = [0.0; D];
        for i in 0..D {
            deriv[i] = -self.deriv[i];
        }
        Self {
            real: -self.real,
            deriv,
        }
    }
}

/// Applies the chain rule: `f(u)` with derivative `f'(u)`.
fn chain<const D: usize>(u: Dual<D>, f: f64, df: f64) -> Dual<D> {
    let mut deriv = [0.0; D];
    for i in 0..D {
        deriv[i] = df * u.deriv[i];
    }
    Dual { real: f, deriv }
}

impl<const D: usize> Scalar for Dual<D> {
    fn from_f64(v: f64) -> Self {
        Self::constant(v)
    }

    fn to_f64(self) -> f64 {
        self.real
    }

    fn abs(self) -> Self {
        let sign = if self.real < 0.0 { -1.0 } else { 1.0 };
        chain(self, self.real.abs(), sign)
    }

    fn acos(self) -> Self {
        chain(self, self.real.acos(), -1.0 / (1.0 - self.real * self.real).sqrt())
    }

    fn asin(self) -> Self {
        chain(self, self.real.asin(), 1.0 / (1.0 - self.real * self.real).sqrt())
    }

    fn atan(self) -> Self {
        chain(self, self.real.atan(), 1.0 / (1.0 + self.real * self.real))
    }

    fn cbrt(self) -> Self {
        let f = self.real.cbrt();
        let df = if f == 0.0 { 0.0 } else { 1.0 / (3.0 * f * f) };
        chain(self, f, df)
    }

    fn ceil(self) -> Self {
        chain(self, self.real.ceil(), 0.0)
    }

    fn cos(self) -> Self {
        chain(self, self.real.cos(), -self.real.sin())
    }

    fn cosh(self) -> Self {
        chain(self, self.real.cosh(), self.real.sinh())
    }

    fn exp(self) -> Self {
        let f = self.real.exp();
        chain(self, f, f)
    }

    fn floor(self) -> Self {
        chain(self, self.real.floor(), 0.0)
    }

    fn ln(self) -> Self {
        chain(self, self.real.ln(), 1.0 / self.real)
    }

    fn ln_1p(self) -> Self {
        chain(self, self.real.ln_1p(), 1.0 / (1.0 + self.real))
    }

    fn sin(self) -> Self {
        chain(self, self.real.sin(), self.real.cos())
    }

    fn sinh(self) -> Self {
        chain(self, self.real.sinh(), self.real.cosh())
    }

    fn sqrt(self) -> Self {
        let f = self.real.sqrt();
        chain(self, f, 0.5 / f)
    }

    fn tan(self) -> Self {
        let c = self.real.cos();
        chain(self, self.real.tan(), 1.0 / (c * c))
    }

    fn tanh(self) -> Self {
        let f = self.real.tanh();
        chain(self, f, 1.0 - f * f)
    }

    fn powf(self, other: Self) -> Self {
        // General case d(u^v) = u^v * (v' * ln(u) + v * u'/u); since `other`
        // is almost always a constant exponent in this engine's trees (Pow
        // is fixed-arity), the v' term is zero whenever `other` carries no
        // derivative, collapsing to the classic power rule.
        let real = self.real.powf(other.real);
        let mut deriv = [0.0; D];
        for i in 0..D {
            let from_base = other.real * self.real.powf(other.real - 1.0) * self.deriv[i];
            let from_exp = if other.deriv[i] == 0.0 {
                0.0
            } else {
                real * other.deriv[i] * self.real.ln()
            };
            deriv[i] = from_base + from_exp;
        }
        Self { real, deriv }
    }

    fn fmax(self, other: Self) -> Self {
        if self.real >= other.real {
            self
        } else {
            other
        }
    }

    fn fmin(self, other: Self) -> Self {
        if self.real <= other.real {
            self
        } else {
            other
        }
    }
}
