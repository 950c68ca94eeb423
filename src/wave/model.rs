use std::f64::consts::TAU;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SinescapeError, SinescapeResult};

/// How a wave's curve is painted onto a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// One pixel per column, on the curve.
    #[default]
    Point,
    /// Column filled from the top edge down to the curve (inclusive).
    FillAbove,
    /// Column filled from the curve (inclusive) down to the bottom edge.
    FillBelow,
}

/// A travelling sine wave: `amplitude * sin(k*x - w*t + phase) + baseline`.
///
/// Built through [`Wave::new`] or [`Wave::builder`]; both validate the
/// parameters and precompute the wavenumber `k = 2π / wavelength` and the
/// angular frequency `w = 2π / period`.
#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    amplitude: f64,
    wavelength: f64,
    period: f64,
    phase: f64,
    baseline: f64,
    fill: FillMode,
    color: Rgb8,
    wavenumber: f64,
    angular_frequency: f64,
}

impl Wave {
    /// Point-filled white wave.
    pub fn new(
        amplitude: f64,
        wavelength: f64,
        period: f64,
        phase: f64,
        baseline: f64,
    ) -> SinescapeResult<Self> {
        Self::builder(amplitude, wavelength, period)
            .phase(phase)
            .baseline(baseline)
            .build()
    }

    pub fn builder(amplitude: f64, wavelength: f64, period: f64) -> WaveBuilder {
        WaveBuilder {
            amplitude,
            wavelength,
            period,
            phase: 0.0,
            baseline: 0.0,
            fill: FillMode::default(),
            color: Rgb8::default(),
        }
    }

    /// Vertical position of the curve at column `x` and time `t`.
    pub fn displacement(&self, x: f64, t: f64) -> f64 {
        self.amplitude * (self.wavenumber * x - self.angular_frequency * t + self.phase).sin()
            + self.baseline
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn fill(&self) -> FillMode {
        self.fill
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn wavenumber(&self) -> f64 {
        self.wavenumber
    }

    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Copy of this wave with a different fill mode.
    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Copy of this wave with a different color.
    pub fn with_color(mut self, color: Rgb8) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Debug)]
pub struct WaveBuilder {
    amplitude: f64,
    wavelength: f64,
    period: f64,
    phase: f64,
    baseline: f64,
    fill: FillMode,
    color: Rgb8,
}

impl WaveBuilder {
    /// Phase offset in radians.
    pub fn phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    pub fn color(mut self, color: Rgb8) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> SinescapeResult<Wave> {
        for (name, v) in [
            ("amplitude", self.amplitude),
            ("phase", self.phase),
            ("baseline", self.baseline),
        ] {
            if !v.is_finite() {
                return Err(SinescapeError::invalid_input(format!(
                    "wave {name} must be finite, got {v}"
                )));
            }
        }
        if !self.wavelength.is_finite() || self.wavelength == 0.0 {
            return Err(SinescapeError::invalid_input(format!(
                "wave wavelength must be finite and non-zero, got {}",
                self.wavelength
            )));
        }
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(SinescapeError::invalid_input(format!(
                "wave period must be finite and > 0, got {}",
                self.period
            )));
        }

        Ok(Wave {
            amplitude: self.amplitude,
            wavelength: self.wavelength,
            period: self.period,
            phase: self.phase,
            baseline: self.baseline,
            fill: self.fill,
            color: self.color,
            wavenumber: TAU / self.wavelength,
            angular_frequency: TAU / self.period,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wave/model.rs"]
mod tests;
