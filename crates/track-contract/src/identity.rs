//! # Caller Identity Provider
//!
//! The host exposes the submitter's credential as a transport-encoded client
//! id. [`resolve_caller_identity`] is the single place it gets decoded.

use track_core::{CallerId, ContractError, IdentityError};

/// Source of the submitting client's transport-encoded id.
pub trait ClientIdentity {
    /// The base64-encoded client id for the current invocation.
    fn client_id(&self) -> Result<String, IdentityError>;
}

/// Resolve the plain caller identity for the current invocation.
pub fn resolve_caller_identity<I>(identity: &I) -> Result<CallerId, ContractError>
where
    I: ClientIdentity + ?Sized,
{
    let encoded = identity.client_id()?;
    Ok(CallerId::from_transport(&encoded)?)
}

/// A fixed credential, as captured from a request header or a CLI flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    encoded: Option<String>,
}

impl StaticIdentity {
    /// Wrap an already transport-encoded client id.
    pub fn encoded(encoded: impl Into<String>) -> Self {
        Self {
            encoded: Some(encoded.into()),
        }
    }

    /// Encode a plain identity label the way a host would.
    pub fn from_label(label: &str) -> Result<Self, IdentityError> {
        Ok(Self::encoded(CallerId::new(label)?.to_transport()))
    }

    /// No credential was presented.
    pub fn anonymous() -> Self {
        Self { encoded: None }
    }
}

impl ClientIdentity for StaticIdentity {
    fn client_id(&self) -> Result<String, IdentityError> {
        self.encoded
            .clone()
            .ok_or_else(|| IdentityError::Missing("no client identity presented".to_string()))
    }
}

impl ClientIdentity for CallerId {
    fn client_id(&self) -> Result<String, IdentityError> {
        Ok(self.to_transport())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_core::ErrorKind;

    #[test]
    fn resolves_encoded_label() {
        let identity = StaticIdentity::from_label("x509::CN=alice").unwrap();
        let caller = resolve_caller_identity(&identity).unwrap();
        assert_eq!(caller.as_str(), "x509::CN=alice");
    }

    #[test]
    fn anonymous_is_identity_unavailable() {
        let err = resolve_caller_identity(&StaticIdentity::anonymous()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityUnavailable);
    }

    #[test]
    fn undecodable_credential_is_identity_unavailable() {
        let err = resolve_caller_identity(&StaticIdentity::encoded("%%%")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IdentityUnavailable);
    }

    #[test]
    fn caller_id_is_its_own_provider() {
        let bob = CallerId::new("bob").unwrap();
        assert_eq!(resolve_caller_identity(&bob).unwrap(), bob);
    }
}
