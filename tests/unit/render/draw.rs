use image::RgbaImage;

use super::*;
use crate::foundation::core::Rgb8;
use crate::render::surface::solid_surface;

const BG: Rgb8 = Rgb8::new(0xee, 0xee, 0xee);
const INK: Rgb8 = Rgb8::new(0x55, 0x55, 0x55);

fn flat_wave(baseline: f64, fill: FillMode) -> Wave {
    Wave::builder(0.0, 10.0, 1.0)
        .baseline(baseline)
        .fill(fill)
        .color(INK)
        .build()
        .unwrap()
}

fn column(img: &RgbaImage, x: u32) -> Vec<bool> {
    (0..img.height())
        .map(|y| img.get_pixel(x, y).0 == INK.to_rgba())
        .collect()
}

#[test]
fn point_paints_one_pixel_per_column() {
    let mut img: RgbaImage = solid_surface(5, 6, BG);
    render_wave(&flat_wave(2.0, FillMode::Point), &mut img, 0.0);
    for x in 0..5 {
        assert_eq!(
            column(&img, x),
            vec![false, false, true, false, false, false]
        );
    }
}

#[test]
fn fill_above_includes_curve_row() {
    let mut img: RgbaImage = solid_surface(3, 6, BG);
    render_wave(&flat_wave(2.0, FillMode::FillAbove), &mut img, 0.0);
    assert_eq!(column(&img, 1), vec![true, true, true, false, false, false]);
}

#[test]
fn fill_below_runs_to_bottom_edge() {
    let mut img: RgbaImage = solid_surface(3, 6, BG);
    render_wave(&flat_wave(2.0, FillMode::FillBelow), &mut img, 0.0);
    assert_eq!(column(&img, 0), vec![false, false, true, true, true, true]);
}

#[test]
fn curve_outside_surface_is_clipped() {
    let mut above: RgbaImage = solid_surface(3, 4, BG);
    render_wave(&flat_wave(-3.0, FillMode::FillAbove), &mut above, 0.0);
    assert_eq!(column(&above, 0), vec![false; 4]);

    let mut below: RgbaImage = solid_surface(3, 4, BG);
    render_wave(&flat_wave(-3.0, FillMode::FillBelow), &mut below, 0.0);
    assert_eq!(column(&below, 2), vec![true; 4]);

    let mut point: RgbaImage = solid_surface(3, 4, BG);
    render_wave(&flat_wave(40.0, FillMode::Point), &mut point, 0.0);
    assert_eq!(column(&point, 1), vec![false; 4]);
}

#[test]
fn rows_follow_rounded_displacement() {
    let wave = Wave::builder(4.0, 60.0, 1.0)
        .baseline(20.0)
        .fill(FillMode::Point)
        .color(INK)
        .build()
        .unwrap();
    let t = 0.3;
    let mut img: RgbaImage = solid_surface(60, 30, BG);
    render_wave(&wave, &mut img, t);
    for x in 0..60u32 {
        let y = (wave.displacement(f64::from(x), t) + 0.5).floor() as u32;
        assert_eq!(img.get_pixel(x, y).0, INK.to_rgba(), "column {x}");
    }
}

#[test]
fn returns_the_same_surface_for_chaining() {
    let mut img: RgbaImage = solid_surface(2, 2, BG);
    let ptr = &img as *const RgbaImage;
    let out = render_wave(&flat_wave(0.0, FillMode::Point), &mut img, 0.0);
    assert!(std::ptr::eq(out, ptr));
}
