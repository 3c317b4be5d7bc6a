//! Stable client codes for every error variant.

use tally_core::error::{ClientCode, TallyError};

#[test]
fn every_variant_maps_to_a_stable_code() {
    let cases = [
        (TallyError::BadRequest("x".into()), "BAD_REQUEST"),
        (TallyError::UnsupportedVersion, "UNSUPPORTED_VERSION"),
        (TallyError::Unauthorized, "UNAUTHORIZED"),
        (TallyError::store("down"), "STORE_UNAVAILABLE"),
        (TallyError::NotConfigured, "NOT_CONFIGURED"),
        (TallyError::Internal("x".into()), "INTERNAL"),
    ];
    for (err, code) in cases {
        assert_eq!(err.client_code().as_str(), code, "{err}");
    }
    assert_eq!(
        TallyError::store("down").client_code(),
        ClientCode::StoreUnavailable
    );
}
