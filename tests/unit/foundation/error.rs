use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QrShapeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        QrShapeError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        QrShapeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QrShapeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
