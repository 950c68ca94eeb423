use crate::foundation::math::round_half_up;
use crate::render::surface::RasterSurface;
use crate::wave::model::{FillMode, Wave};

/// Paint `wave` at time `t` onto `surface`, one column at a time.
///
/// For every column `x` the curve row is `y = round(displacement(x, t))`:
/// - [`FillMode::Point`] paints `(x, y)`,
/// - [`FillMode::FillAbove`] paints rows `0..=y`,
/// - [`FillMode::FillBelow`] paints rows `y..height`.
///
/// Rows outside the surface are clipped by the surface. Returns the same
/// surface so calls can be chained.
pub fn render_wave<'a, S: RasterSurface>(wave: &Wave, surface: &'a mut S, t: f64) -> &'a mut S {
    let width = surface.width();
    let height = i64::from(surface.height());
    let color = wave.color();

    for x in 0..width {
        let y = round_half_up(wave.displacement(f64::from(x), t)) as i64;
        let x = i64::from(x);
        match wave.fill() {
            FillMode::Point => surface.fill_rect(x, y, 1, 1, color),
            FillMode::FillAbove => surface.fill_rect(x, 0, 1, y.saturating_add(1), color),
            FillMode::FillBelow => surface.fill_rect(x, y, 1, height.saturating_sub(y), color),
        }
    }

    surface
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
