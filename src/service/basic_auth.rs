//! Basic-Auth header decoding.

use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;
use thiserror::Error as ThisError;

const BASIC_PREFIX: &str = "Basic ";

#[derive(Debug, ThisError)]
pub enum BasicAuthError {
    #[error("Authorization: can only process Basic authentication")]
    UnsupportedScheme,

    #[error("Authorization: invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Authorization: invalid format, missing colon")]
    InvalidFormat,
}

/// Email/password pair taken from a request. Lives only for that request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decode `Basic base64(email:password)`.
///
/// The prefix is case-sensitive. The payload is split on the first colon, so
/// the password may contain colons and the email may not.
pub fn decode_basic_auth(header: &str) -> Result<Credentials, BasicAuthError> {
    let encoded = header
        .strip_prefix(BASIC_PREFIX)
        .ok_or(BasicAuthError::UnsupportedScheme)?;

    let decoded = STANDARD.decode(encoded)?;
    let split = decoded
        .iter()
        .position(|b| *b == b':')
        .ok_or(BasicAuthError::InvalidFormat)?;

    let (email, password) = (&decoded[..split], &decoded[split + 1..]);
    Ok(Credentials {
        email: String::from_utf8_lossy(email).into_owned(),
        password: String::from_utf8_lossy(password).into_owned(),
    })
}

/// Build an `Authorization` header value for the given pair.
pub fn encode_basic_auth(email: &str, password: &str) -> String {
    format!("{BASIC_PREFIX}{}", STANDARD.encode(format!("{email}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_email_and_password() {
        let creds = decode_basic_auth(&encode_basic_auth("root", "admin")).unwrap();
        assert_eq!(creds.email, "root");
        assert_eq!(creds.password, "admin");
    }

    #[test]
    fn password_keeps_colons_after_the_first() {
        let creds = decode_basic_auth(&encode_basic_auth("pilot@fleet.io", "a:b::c")).unwrap();
        assert_eq!(creds.email, "pilot@fleet.io");
        assert_eq!(creds.password, "a:b::c");
    }

    #[test]
    fn empty_halves_are_allowed() {
        // ":" alone
        let creds = decode_basic_auth("Basic Og==").unwrap();
        assert_eq!(creds.email, "");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn rejects_other_schemes() {
        for header in ["Bearer abc", "basic cm9vdDphZG1pbg==", "Basic", "BasicZm9v", ""] {
            assert!(
                matches!(
                    decode_basic_auth(header),
                    Err(BasicAuthError::UnsupportedScheme)
                ),
                "{header:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed_base64() {
        for header in ["Basic !!!", "Basic cm9vdDphZG1pbg", "Basic cm9v dDph"] {
            assert!(
                matches!(decode_basic_auth(header), Err(BasicAuthError::Decode(_))),
                "{header:?}"
            );
        }
    }

    #[test]
    fn rejects_payload_without_colon() {
        let header = format!("Basic {}", STANDARD.encode("rootadmin"));
        assert!(matches!(
            decode_basic_auth(&header),
            Err(BasicAuthError::InvalidFormat)
        ));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials {
            email: "root".into(),
            password: "admin".into(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("root"));
        assert!(!shown.contains("admin"));
    }
}
