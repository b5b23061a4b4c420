use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VirtImgError::construction("x")
            .to_string()
            .contains("construction error:")
    );
    assert!(VirtImgError::bounds("x").to_string().contains("bounds error:"));
    assert!(
        VirtImgError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VirtImgError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VirtImgError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
