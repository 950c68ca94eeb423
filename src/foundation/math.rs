/// Largest denominator accepted when approximating a real period by a fraction.
pub(crate) const MAX_DENOMINATOR: u128 = 1_000_000;

/// Relative tolerance (scaled by `max(1, |v|)`) for accepting a fractional approximation.
pub(crate) const RATIO_TOLERANCE: f64 = 1e-9;

/// Round to the nearest integer, ties toward positive infinity.
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

pub(crate) fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Positive fraction `num / den`, always reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ratio {
    pub(crate) num: u128,
    pub(crate) den: u128,
}

impl Ratio {
    pub(crate) fn new(num: u128, den: u128) -> Option<Self> {
        if num == 0 || den == 0 {
            return None;
        }
        let g = gcd_u128(num, den);
        Some(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Best continued-fraction approximation of a positive finite `v` with
    /// denominator at most [`MAX_DENOMINATOR`], or `None` when no such fraction
    /// lies within [`RATIO_TOLERANCE`].
    pub(crate) fn approximate(v: f64) -> Option<Self> {
        Self::approximate_within(v, MAX_DENOMINATOR)
    }

    /// Like [`Ratio::approximate`] with a caller-chosen denominator bound.
    pub(crate) fn approximate_within(v: f64, max_den: u128) -> Option<Self> {
        if !v.is_finite() || v <= 0.0 || v > u64::MAX as f64 {
            return None;
        }

        // Convergents h/k of the continued fraction expansion.
        let (mut h_prev, mut h) = (1u128, v.floor() as u128);
        let (mut k_prev, mut k) = (0u128, 1u128);
        let mut frac = v - v.floor();
        let tol = RATIO_TOLERANCE * v.abs().max(1.0);

        while frac > 0.0 && (h as f64 / k as f64 - v).abs() > tol {
            let inv = 1.0 / frac;
            let a = inv.floor();
            frac = inv - a;
            let a = a as u128;

            let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
            if k_next > max_den {
                break;
            }
            let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
            (h_prev, h) = (h, h_next);
            (k_prev, k) = (k, k_next);
        }

        if (h as f64 / k as f64 - v).abs() > tol {
            return None;
        }
        Self::new(h, k)
    }

    /// Least common multiple: `lcm(a/b, c/d) = lcm(a, c) / gcd(b, d)`.
    pub(crate) fn lcm(self, other: Self) -> Option<Self> {
        let num_gcd = gcd_u128(self.num, other.num);
        let num = (self.num / num_gcd).checked_mul(other.num)?;
        let den = gcd_u128(self.den, other.den);
        Self::new(num, den)
    }

    pub(crate) fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
