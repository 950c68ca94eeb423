use crate::foundation::error::{SinescapeError, SinescapeResult};
use crate::foundation::math::{MAX_DENOMINATOR, Ratio};
use crate::wave::model::Wave;

/// Least common multiple of a list of positive periods.
///
/// Each period is first snapped to a fraction with denominator at most
/// 1_000_000 (within a relative tolerance of 1e-9), then the fractions are
/// folded left to right with `lcm(a/b, c/d) = lcm(a, c) / gcd(b, d)`. The
/// fold is exact, so the order of `periods` never changes the result. A
/// single period is returned unchanged.
pub fn loop_duration(periods: &[f64]) -> SinescapeResult<f64> {
    match periods {
        [] => Err(SinescapeError::invalid_input(
            "loop duration is undefined for an empty wave list",
        )),
        [only] => {
            validate_period(0, *only)?;
            Ok(*only)
        }
        _ => {
            let mut acc: Option<Ratio> = None;
            for (idx, &p) in periods.iter().enumerate() {
                validate_period(idx, p)?;
                let r = Ratio::approximate(p).ok_or_else(|| {
                    SinescapeError::invalid_input(format!(
                        "wave {idx}: period {p} has no fractional form with denominator <= {MAX_DENOMINATOR}"
                    ))
                })?;
                acc = Some(match acc {
                    None => r,
                    Some(prev) => prev.lcm(r).ok_or_else(|| {
                        SinescapeError::invalid_input(format!(
                            "wave {idx}: loop duration overflows when adding period {p}"
                        ))
                    })?,
                });
            }
            acc.map(Ratio::as_f64).ok_or_else(|| {
                SinescapeError::invalid_input("loop duration is undefined for an empty wave list")
            })
        }
    }
}

/// [`loop_duration`] over the periods of `waves`, in list order.
pub fn waves_loop_duration(waves: &[Wave]) -> SinescapeResult<f64> {
    let periods: Vec<f64> = waves.iter().map(Wave::period).collect();
    loop_duration(&periods)
}

fn validate_period(idx: usize, p: f64) -> SinescapeResult<()> {
    if !p.is_finite() || p <= 0.0 {
        return Err(SinescapeError::invalid_input(format!(
            "wave {idx}: period must be finite and > 0, got {p}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/duration.rs"]
mod tests;
