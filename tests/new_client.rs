use meshcapade::{MeshcapadeClient, MeshcapadeError};

#[test]
fn test_new_without_token_fails() {
    // This file is its own test binary, so clearing the variable cannot race
    // with the wiremock-based suites.
    std::env::remove_var("MESHCAPADE_API_TOKEN");

    let err = MeshcapadeClient::new(None).unwrap_err();
    assert!(matches!(err, MeshcapadeError::MissingApiToken));
}

#[test]
fn test_new_with_explicit_token() {
    assert!(MeshcapadeClient::new(Some("test_api_token".to_string())).is_ok());
}
