//! # Caller Identity
//!
//! The host hands the contract an opaque, transport-encoded client id
//! (standard base64 of the submitter's distinguished identity, e.g.
//! `x509::CN=alice,OU=client::CN=ca.org1`). [`CallerId::from_transport`]
//! decodes it into the plain label stored in `Asset::owner`.
//!
//! ## Security Invariant
//!
//! Every authorization decision in the contract is an equality comparison
//! between a decoded [`CallerId`] and a stored owner string. Two callers are
//! the same principal iff their decoded labels are byte-identical.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Resolved identity of the principal submitting an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallerId(String);

impl CallerId {
    /// Decode a transport-encoded client id into a caller identity.
    ///
    /// The encoded form is decoded as-is; surrounding whitespace is an
    /// encoding error. The decoded label must be non-empty UTF-8.
    pub fn from_transport(encoded: &str) -> Result<Self, IdentityError> {
        let raw = STANDARD.decode(encoded)?;
        let label = String::from_utf8(raw).map_err(|_| IdentityError::NotUtf8)?;
        Self::new(label)
    }

    /// Wrap an already-decoded identity label.
    pub fn new(label: impl Into<String>) -> Result<Self, IdentityError> {
        let label = label.into();
        if label.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(label))
    }

    /// Encode this identity the way a host transports it.
    pub fn to_transport(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }

    /// The plain identity label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this caller is the principal recorded as `owner`.
    pub fn is(&self, owner: &str) -> bool {
        self.0 == owner
    }
}

impl std::fmt::Display for CallerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CallerId {
    type Error = IdentityError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::new(label)
    }
}

impl From<CallerId> for String {
    fn from(caller: CallerId) -> Self {
        caller.0
    }
}

impl AsRef<str> for CallerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_x509_style_label() {
        let label = "x509::CN=alice,OU=client::CN=ca.org1.example.com";
        let encoded = STANDARD.encode(label);
        let caller = CallerId::from_transport(&encoded).unwrap();
        assert_eq!(caller.as_str(), label);
        assert!(caller.is(label));
        assert!(!caller.is("x509::CN=bob"));
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = CallerId::from_transport("not base64!!").unwrap_err();
        assert!(matches!(err, IdentityError::Encoding(_)));
    }

    #[test]
    fn padded_encoding_is_not_trimmed() {
        let encoded = format!(" {} ", STANDARD.encode("alice"));
        let err = CallerId::from_transport(&encoded).unwrap_err();
        assert!(matches!(err, IdentityError::Encoding(_)));
    }

    #[test]
    fn rejects_non_utf8() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        let err = CallerId::from_transport(&encoded).unwrap_err();
        assert_eq!(err, IdentityError::NotUtf8);
    }

    #[test]
    fn rejects_empty_identity() {
        assert_eq!(CallerId::from_transport("").unwrap_err(), IdentityError::Empty);
        assert_eq!(CallerId::new("").unwrap_err(), IdentityError::Empty);
    }

    #[test]
    fn serializes_as_plain_string() {
        let caller = CallerId::new("alice").unwrap();
        assert_eq!(serde_json::to_string(&caller).unwrap(), "\"alice\"");
        assert!(serde_json::from_str::<CallerId>("\"\"").is_err());
    }

    proptest! {
        #[test]
        fn decoding_arbitrary_input_never_yields_empty_identity(encoded in ".{0,96}") {
            if let Ok(caller) = CallerId::from_transport(&encoded) {
                prop_assert!(!caller.as_str().is_empty());
            }
        }
    }
}
