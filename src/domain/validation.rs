//! Attribute validators for service account identifiers.

use std::sync::LazyLock;

use regex::Regex;

use super::AppError;

/// Project id, optionally prefixed by a `domain:` scope.
pub const PROJECT_REGEX: &str = r"(?:(?:[-a-z0-9]{1,63}\.)*(?:[a-z](?:[-a-z0-9]{0,61}[a-z0-9])?):)?(?:[0-9]{1,19}|(?:[a-z0-9](?:[-a-z0-9]{0,61}[a-z0-9])?))";

const PROJECT_NAME_IN_DNS_FORM_REGEX: &str = r"[-a-z0-9\.]{1,63}";
const COMPUTE_SERVICE_ACCOUNT_NAME_REGEX: &str =
    r"[0-9]{1,20}-compute@developer\.gserviceaccount\.com";
const CREATED_SERVICE_ACCOUNT_ACCOUNT_REGEX: &str = r"[a-z](?:[-a-z0-9]{4,28}[a-z0-9])";

/// Pattern for a fully-qualified service account link.
pub static SERVICE_ACCOUNT_LINK_REGEX: LazyLock<String> = LazyLock::new(|| {
    let app_engine = format!(r"{}@appspot\.gserviceaccount\.com", PROJECT_REGEX);
    let created = format!(
        r"{}@{}\.iam\.gserviceaccount\.com",
        CREATED_SERVICE_ACCOUNT_ACCOUNT_REGEX, PROJECT_NAME_IN_DNS_FORM_REGEX
    );
    format!(
        r"^projects/(?:-|{})/serviceAccounts/(?:{}|{}|{})$",
        PROJECT_REGEX, app_engine, COMPUTE_SERVICE_ACCOUNT_NAME_REGEX, created
    )
});

static SERVICE_ACCOUNT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&SERVICE_ACCOUNT_LINK_REGEX).expect("service account link pattern must compile")
});

static ACCOUNT_ID: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = rfc1035_name_pattern(6, 30).expect("6..=30 are valid RFC 1035 bounds");
    Regex::new(&pattern).expect("RFC 1035 pattern must compile")
});

/// Build the pattern for an RFC 1035 label between `min` and `max` characters.
///
/// The first character is a lowercase letter, the last a lowercase letter or digit,
/// and the middle may contain hyphens.
pub fn rfc1035_name_pattern(min: usize, max: usize) -> Result<String, AppError> {
    if min < 2 || max < min {
        return Err(AppError::config_error(format!(
            "invalid RFC 1035 bounds: min {} must be >= 2 and max {} must be >= min",
            min, max
        )));
    }
    Ok(format!("^[a-z](?:[-a-z0-9]{{{},{}}}[a-z0-9])$", min - 2, max - 2))
}

/// Check `value` against `re`, producing the attribute error on mismatch.
fn validate_regexp(attribute: &str, value: &str, re: &Regex) -> Result<(), AppError> {
    if re.is_match(value) {
        return Ok(());
    }
    Err(AppError::InvalidAttribute {
        attribute: attribute.to_string(),
        value: value.to_string(),
        pattern: re.as_str().to_string(),
    })
}

/// Validate a short account id (RFC 1035, 6 to 30 characters).
pub fn validate_account_id(attribute: &str, value: &str) -> Result<(), AppError> {
    validate_regexp(attribute, value, &ACCOUNT_ID)
}

/// Validate a fully-qualified service account link.
pub fn validate_service_account_link(attribute: &str, value: &str) -> Result<(), AppError> {
    validate_regexp(attribute, value, &SERVICE_ACCOUNT_LINK)
}
