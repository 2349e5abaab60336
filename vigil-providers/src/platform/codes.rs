//! Vendor status codes
//!
//! Closed lookup from vendor code to a human-readable reason. Codes missing
//! from the table fall through to a generic message carrying the raw code.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Status code of a successful call
pub const SUCCESS: &str = "200";

/// Access token expired or otherwise not accepted
pub const ACCESS_TOKEN_INVALID: &str = "10002";

/// Codes meaning the app key / app secret pair itself is wrong
const INVALID_APP_KEY_CODES: [&str; 4] = ["10001", "10005", "10017", "10030"];

static REASONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("10001", "invalid request parameters"),
        (ACCESS_TOKEN_INVALID, "access token expired or invalid"),
        ("10005", "app key is abnormal"),
        ("10017", "app key does not exist"),
        ("10030", "app key and app secret do not match"),
        ("20002", "device does not exist"),
        ("20007", "device is offline"),
        ("20008", "device response timed out"),
        ("20018", "account does not own this device"),
        ("49999", "vendor data exception"),
        ("60019", "stream is encrypted"),
        ("60020", "unsupported recording type or command"),
        ("60060", "channel or address not available"),
    ])
});

/// Describe a vendor status code
#[must_use]
pub fn describe(code: &str) -> Cow<'static, str> {
    REASONS
        .get(code)
        .map_or_else(|| Cow::Owned(format!("unknown error ({code})")), |reason| Cow::Borrowed(*reason))
}

#[must_use]
pub fn is_success(code: &str) -> bool {
    code == SUCCESS
}

#[must_use]
pub fn is_credential_rejection(code: &str) -> bool {
    code == ACCESS_TOKEN_INVALID
}

#[must_use]
pub fn is_invalid_app_key(code: &str) -> bool {
    INVALID_APP_KEY_CODES.contains(&code)
}
