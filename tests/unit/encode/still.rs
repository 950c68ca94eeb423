use image::RgbaImage;

use super::*;
use crate::foundation::core::Rgb8;
use crate::render::surface::solid_surface;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_still").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn frame(index: u64) -> Frame<RgbaImage> {
    Frame {
        index,
        time: 0.0,
        delay_ms: 50.0,
        surface: solid_surface(3, 2, Rgb8::new(9, 8, 7)),
    }
}

#[test]
fn file_names_are_index_ordered() {
    assert_eq!(frame_file_name(0), "frame-0.png");
    assert_eq!(frame_file_name(42), "frame-42.png");
}

#[test]
fn create_makes_missing_directories() {
    let dir = scratch_dir("nested").join("a").join("b");
    assert!(!dir.exists());
    let sink = DirectorySink::create(&dir).unwrap();
    assert!(dir.is_dir());
    assert_eq!(sink.dir(), dir.as_path());
}

#[test]
fn accept_writes_decodable_png_per_frame() {
    let dir = scratch_dir("writes");
    let mut sink = DirectorySink::create(&dir).unwrap();
    sink.accept(frame(0)).unwrap();
    sink.accept(frame(1)).unwrap();
    let written = FrameSink::<RgbaImage>::finish(sink).unwrap();
    assert_eq!(written, 2);

    let decoded = image::open(dir.join("frame-1.png")).unwrap().to_rgba8();
    assert_eq!(decoded, frame(1).surface);
    assert!(dir.join("frame-0.png").is_file());
}

#[test]
fn create_fails_when_path_is_a_file() {
    let dir = scratch_dir("blocked");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("not_a_dir");
    std::fs::write(&file, b"x").unwrap();

    let err = DirectorySink::create(&file).unwrap_err();
    assert!(matches!(err, SinescapeError::Io { .. }));
    assert!(err.to_string().contains("not_a_dir"));
}

#[test]
fn accept_rejects_empty_surfaces_without_writing() {
    let dir = scratch_dir("empty_surface");
    let mut sink = DirectorySink::create(&dir).unwrap();
    let empty = Frame {
        index: 2,
        time: 0.0,
        delay_ms: 50.0,
        surface: RgbaImage::new(3, 0),
    };
    let err = sink.accept(empty).unwrap_err();
    assert!(matches!(err, SinescapeError::Encoding(_)));
    assert!(err.to_string().contains("frame 2"));
    assert!(!dir.join("frame-2.png").exists());
}
