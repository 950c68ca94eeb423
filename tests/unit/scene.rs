use super::*;

const SCENE: &str = r##"{
    "width": 100,
    "height": 100,
    "background": "#eee",
    "fps": 60,
    "waves": [
        { "amplitude": 4, "wavelength": 60, "period": 1, "baseline": 20,
          "fill": "fill_above", "color": "#555555" },
        { "amplitude": 3, "wavelength": 70, "period": 1.5, "phase": 0.5,
          "baseline": 30, "fill": "fill_above", "color": 8947848 }
    ]
}"##;

#[test]
fn parses_and_applies_defaults() {
    let scene = Scene::from_json_str(
        r#"{ "width": 4, "height": 4, "fps": 10,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap();
    let waves = scene.waves().unwrap();
    assert_eq!(waves[0].fill(), FillMode::Point);
    assert_eq!(waves[0].color(), Rgb8::WHITE);
    assert_eq!(waves[0].phase(), 0.0);
    assert_eq!(waves[0].baseline(), 0.0);
    assert!(scene.background.is_none());
}

#[test]
fn into_request_builds_background_and_waves() {
    let req = Scene::from_json_str(SCENE)
        .unwrap()
        .into_request(Path::new("."))
        .unwrap();
    assert_eq!(req.waves.len(), 2);
    assert_eq!(req.waves[1].color(), Rgb8::from_packed(0x888888));
    assert_eq!(req.fps.as_f64(), 60.0);
    assert_eq!(req.background.dimensions(), (100, 100));
    assert_eq!(req.background.get_pixel(50, 50).0, [0xee, 0xee, 0xee, 0xff]);
}

#[test]
fn omitted_background_is_transparent() {
    let req = Scene::from_json_str(
        r#"{ "width": 3, "height": 2, "fps": 10,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap()
    .into_request(Path::new("."))
    .unwrap();
    assert!(req.background.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn invalid_wave_is_reported_with_its_index() {
    let scene = Scene::from_json_str(
        r#"{ "width": 4, "height": 4, "fps": 10,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 },
                        { "amplitude": 1, "wavelength": 0, "period": 2 } ] }"#,
    )
    .unwrap();
    let err = scene.validate().unwrap_err();
    assert!(matches!(err, SinescapeError::InvalidInput(_)));
    assert!(err.to_string().contains("wave 1"));
}

#[test]
fn empty_waves_and_zero_size_are_rejected() {
    let no_waves =
        Scene::from_json_str(r#"{ "width": 4, "height": 4, "fps": 10, "waves": [] }"#).unwrap();
    assert!(no_waves.validate().is_err());

    let no_size = Scene::from_json_str(
        r#"{ "fps": 10, "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap();
    assert!(no_size.validate().is_err());
}

#[test]
fn bad_documents_are_serde_errors() {
    let err = Scene::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SinescapeError::Serde(_)));

    let err = Scene::from_json_str(
        r#"{ "width": 4, "height": 4, "fps": 0,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SinescapeError::Serde(_)));

    let err = Scene::from_json_str(
        r#"{ "width": 4, "height": 4, "fps": 10, "speed": 2,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("speed"));
}

#[test]
fn packed_color_out_of_range_is_rejected() {
    assert!(ColorSpec::Packed(0x0100_0000).resolve().is_err());
    assert_eq!(
        ColorSpec::Hex("#abc".to_string()).resolve().unwrap(),
        Rgb8::new(0xaa, 0xbb, 0xcc)
    );
}

#[test]
fn missing_scene_file_is_io_error() {
    let err = Scene::load("target/does/not/exist.json").unwrap_err();
    assert!(matches!(err, SinescapeError::Io { .. }));
}

#[test]
fn background_image_is_loaded_relative_to_base_dir() {
    let dir = PathBuf::from("target").join("unit_scene");
    std::fs::create_dir_all(&dir).unwrap();
    let bg: RgbaImage = solid_surface(5, 3, Rgb8::new(1, 2, 3));
    bg.save(dir.join("bg.png")).unwrap();

    let req = Scene::from_json_str(
        r#"{ "background_image": "bg.png", "fps": 10,
             "waves": [ { "amplitude": 1, "wavelength": 8, "period": 2 } ] }"#,
    )
    .unwrap()
    .into_request(&dir)
    .unwrap();
    assert_eq!(req.background, bg);
}
