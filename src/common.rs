// Copyright 2026 the Bezseg Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float math shims and the polynomial root finders used for nearest-point
//! queries.

use arrayvec::ArrayVec;

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("bezseg requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn atan2(self, other: Self) -> Self => atan2;
    fn cbrt(self) -> Self => cbrt;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn hypot(self, other: Self) -> Self => hypot;
    fn mul_add(self, a: Self, b: Self) -> Self => fma;
    fn powf(self, n: Self) -> Self => pow;
    fn powi(self, n: i32) -> Self => pow;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Real roots of `c0 + c1 x + c2 x² + c3 x³ = 0`, in no particular order.
///
/// When `c3` is zero or small enough that dividing by it overflows, the
/// equation is solved as a quadratic. Repeated roots are reported once per
/// distinct value found by the trigonometric or Cardano branch.
///
/// The method is Jim Blinn's "How to Solve a Cubic Equation", following
/// <https://momentsingraphics.de/CubicRoots.html>.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    const THIRD: f64 = 1.0 / 3.0;
    let mut roots = ArrayVec::new();
    let inv = c3.recip();
    // Normalize to x³ + 3b x² + 3c x + d.
    let b = c2 * (THIRD * inv);
    let c = c1 * (THIRD * inv);
    let d = c0 * inv;
    if !(b.is_finite() && c.is_finite() && d.is_finite()) {
        roots.extend(solve_quadratic(c0, c1, c2));
        return roots;
    }
    // Hessian coefficients.
    let h0 = (-b).mul_add(b, c);
    let h1 = (-c).mul_add(b, d);
    let h2 = b * d - c * c;
    let disc = 4.0 * h0 * h2 - h1 * h1;
    let q = (-2.0 * b).mul_add(h0, h1);
    if disc < 0.0 {
        // One real root.
        let s = (-0.25 * disc).sqrt();
        let r = -0.5 * q;
        roots.push((r + s).cbrt() + (r - s).cbrt() - b);
    } else if disc == 0.0 {
        // A double root and a simple one.
        let u = (-h0).sqrt().copysign(q);
        roots.push(u - b);
        roots.push(-2.0 * u - b);
    } else {
        // Three real roots on a circle of radius 2 sqrt(-h0).
        let (sin, cos) = (disc.sqrt().atan2(-q) * THIRD).sin_cos();
        let rot = sin * 3.0f64.sqrt();
        let scale = 2.0 * (-h0).sqrt();
        for k in [cos, 0.5 * (rot - cos), -0.5 * (rot + cos)] {
            roots.push(scale.mul_add(k, -b));
        }
    }
    roots
}

/// Real roots of `c0 + c1 x + c2 x² = 0`, in increasing order.
///
/// A negligible `c2` degrades to the linear equation. When every coefficient
/// is zero, any `x` is a solution and `0.0` is returned alone.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut roots = ArrayVec::new();
    let inv = c2.recip();
    let (p, q) = (c1 * inv, c0 * inv);
    if !(p.is_finite() && q.is_finite()) {
        let x = -c0 / c1;
        if x.is_finite() {
            roots.push(x);
        } else if c0 == 0.0 && c1 == 0.0 {
            roots.push(0.0);
        }
        return roots;
    }
    // x² + p x + q = 0
    let disc = p * p - 4.0 * q;
    let first = if disc.is_finite() {
        if disc < 0.0 {
            return roots;
        }
        if disc == 0.0 {
            roots.push(-0.5 * p);
            return roots;
        }
        // Add quantities of the same sign to avoid cancellation.
        -0.5 * (p + disc.sqrt().copysign(p))
    } else {
        // p² overflowed; the large root is close to -p.
        -p
    };
    let second = q / first;
    if second.is_finite() {
        roots.push(first.min(second));
        roots.push(first.max(second));
    } else {
        roots.push(first);
    }
    roots
}

#[cfg(test)]
mod tests {
    use arrayvec::ArrayVec;

    use super::{solve_cubic, solve_quadratic};

    fn check<const N: usize>(mut roots: ArrayVec<f64, N>, expected: &[f64]) {
        roots.sort_by(f64::total_cmp);
        assert_eq!(roots.len(), expected.len(), "roots {roots:?}, expected {expected:?}");
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).abs() < 1e-12, "roots {roots:?}, expected {expected:?}");
        }
    }

    #[test]
    fn cubic_roots() {
        check(solve_cubic(-8.0, 0.0, 0.0, 1.0), &[2.0]);
        check(solve_cubic(-5.0, -1.0, 0.0, 1.0), &[1.90416085913492]);
        // x (x - 1) (x + 1)
        check(solve_cubic(0.0, -1.0, 0.0, 1.0), &[-1.0, 0.0, 1.0]);
        // (x - 1)(x - 2)(x - 3)
        check(solve_cubic(-6.0, 11.0, -6.0, 1.0), &[1.0, 2.0, 3.0]);
        // (x + 1)² (x - 2)
        check(solve_cubic(-2.0, -3.0, 0.0, 1.0), &[-1.0, 2.0]);
        check(solve_cubic(2.0, -3.0, 0.0, 0.0), &[2.0 / 3.0]);
    }

    #[test]
    fn quadratic_roots() {
        check(solve_quadratic(-4.0, 0.0, 1.0), &[-2.0, 2.0]);
        check(solve_quadratic(5.0, 0.0, 1.0), &[]);
        check(solve_quadratic(5.0, 1.0, 0.0), &[-5.0]);
        check(solve_quadratic(1.0, 2.0, 1.0), &[-1.0]);
        check(solve_quadratic(0.0, 0.0, 0.0), &[0.0]);
        // Widely separated roots 1e-8 and 1e8.
        let roots = solve_quadratic(1.0, -(1e8 + 1e-8), 1.0);
        assert_eq!(roots.len(), 2, "{roots:?}");
        assert!((roots[0] - 1e-8).abs() < 1e-20, "{roots:?}");
        assert!((roots[1] - 1e8).abs() < 1e-4, "{roots:?}");
    }
}
