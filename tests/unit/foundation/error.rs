use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SinescapeError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        SinescapeError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        SinescapeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_error_names_the_path() {
    let err = SinescapeError::io(
        "out/frames",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    let msg = err.to_string();
    assert!(msg.contains("out/frames"));
    assert!(msg.contains("denied"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SinescapeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
