use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AlgoError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        AlgoError::invariant("x")
            .to_string()
            .contains("invariant violation:")
    );
    assert!(
        AlgoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AlgoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
