//! # Error Types — Contract Error Taxonomy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every contract error is terminal for the invocation. The contract never
//!   retries and never rolls back on its own; the host discards the write set.
//! - Every variant that concerns a record carries the asset id (or the raw
//!   store key) so the caller can tell which record failed.
//! - [`ErrorKind`] is the closed, machine-readable classification hosts map
//!   onto their own status codes. `Unauthorized` and `NotFound` are distinct
//!   kinds.

use thiserror::Error;

/// Error raised by a contract operation.
#[derive(Error, Debug)]
pub enum ContractError {
    /// No record exists at the requested id.
    #[error("the asset {id} does not exist")]
    NotFound {
        /// The requested asset id.
        id: String,
    },

    /// A record already exists at the id being created.
    #[error("the asset {id} already exists")]
    AlreadyExists {
        /// The conflicting asset id.
        id: String,
    },

    /// The caller is not the recorded owner of the asset.
    #[error("caller {caller} does not have permission to transfer asset {id}")]
    Unauthorized {
        /// The asset the caller tried to act on.
        id: String,
        /// The resolved identity of the caller.
        caller: String,
    },

    /// The request is structurally valid but asks for nothing to be done.
    #[error("invalid request for asset {id}: {reason}")]
    InvalidRequest {
        /// The target asset id.
        id: String,
        /// Why the request was rejected.
        reason: String,
    },

    /// The supplied `data` payload is not valid JSON text.
    #[error("invalid JSON encoding for asset {id}: {source}")]
    InvalidData {
        /// The target asset id.
        id: String,
        /// The JSON syntax error.
        #[source]
        source: serde_json::Error,
    },

    /// The caller identity could not be resolved.
    #[error("caller identity unavailable: {0}")]
    IdentityUnavailable(#[from] IdentityError),

    /// A stored value is not a well-formed asset record.
    #[error("failed to decode asset record at key {key}: {source}")]
    Decode {
        /// The world-state key holding the malformed value.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// An asset record could not be serialized for storage.
    #[error("failed to encode asset record {id}: {source}")]
    Encode {
        /// The asset being written.
        id: String,
        /// The underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// The underlying state store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContractError {
    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::InvalidData { .. } => ErrorKind::InvalidData,
            Self::IdentityUnavailable(_) => ErrorKind::IdentityUnavailable,
            Self::Decode { .. } => ErrorKind::DecodeError,
            Self::Encode { .. } => ErrorKind::EncodeError,
            Self::Store(_) => ErrorKind::StoreError,
        }
    }

    /// The asset id (or store key) the error refers to, if any.
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id }
            | Self::AlreadyExists { id }
            | Self::Unauthorized { id, .. }
            | Self::InvalidRequest { id, .. }
            | Self::InvalidData { id, .. }
            | Self::Encode { id, .. } => Some(id.as_str()),
            Self::Decode { key, .. } => Some(key.as_str()),
            Self::Store(err) => err.key(),
            Self::IdentityUnavailable(_) => None,
        }
    }
}

/// Closed classification of [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unauthorized,
    InvalidRequest,
    InvalidData,
    IdentityUnavailable,
    DecodeError,
    EncodeError,
    StoreError,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidData => "INVALID_DATA",
            Self::IdentityUnavailable => "IDENTITY_UNAVAILABLE",
            Self::DecodeError => "DECODE_ERROR",
            Self::EncodeError => "ENCODE_ERROR",
            Self::StoreError => "STORE_ERROR",
        }
    }

    /// Whether the error was caused by the request rather than the ledger.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DecodeError | Self::EncodeError | Self::StoreError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a keyed state store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("failed to read {key} from world state: {reason}")]
    Read { key: String, reason: String },

    /// Writing a key failed.
    #[error("failed to put {key} to world state: {reason}")]
    Write { key: String, reason: String },

    /// Deleting a key failed.
    #[error("failed to delete {key} from world state: {reason}")]
    Delete { key: String, reason: String },

    /// A range scan failed to open or advance.
    #[error("range scan [{start:?}, {end:?}) failed: {reason}")]
    Scan {
        start: String,
        end: String,
        reason: String,
    },

    /// A key read by the transaction changed before commit.
    #[error("transaction conflict on {key}: read version {read}, committed version {current}")]
    Conflict { key: String, read: u64, current: u64 },
}

impl StoreError {
    /// The key the failure concerns, if it concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Read { key, .. }
            | Self::Write { key, .. }
            | Self::Delete { key, .. }
            | Self::Conflict { key, .. } => Some(key.as_str()),
            Self::Scan { .. } => None,
        }
    }
}

/// Failure to resolve the caller identity from the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The host supplied no credential for this invocation.
    #[error("failed to read client id: {0}")]
    Missing(String),

    /// The transport encoding is not valid base64.
    #[error("failed to base64 decode client id: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded identity is not UTF-8 text.
    #[error("decoded client id is not valid UTF-8")]
    NotUtf8,

    /// The decoded identity is empty.
    #[error("decoded client id is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{oops").unwrap_err()
    }

    #[test]
    fn kinds_map_one_to_one() {
        let cases = [
            (ContractError::NotFound { id: "a".into() }, ErrorKind::NotFound),
            (
                ContractError::AlreadyExists { id: "a".into() },
                ErrorKind::AlreadyExists,
            ),
            (
                ContractError::Unauthorized {
                    id: "a".into(),
                    caller: "mallory".into(),
                },
                ErrorKind::Unauthorized,
            ),
            (
                ContractError::InvalidRequest {
                    id: "a".into(),
                    reason: "empty".into(),
                },
                ErrorKind::InvalidRequest,
            ),
            (
                ContractError::InvalidData {
                    id: "a".into(),
                    source: json_error(),
                },
                ErrorKind::InvalidData,
            ),
            (
                ContractError::IdentityUnavailable(IdentityError::Empty),
                ErrorKind::IdentityUnavailable,
            ),
            (
                ContractError::Decode {
                    key: "a".into(),
                    source: json_error(),
                },
                ErrorKind::DecodeError,
            ),
            (
                ContractError::Encode {
                    id: "a".into(),
                    source: json_error(),
                },
                ErrorKind::EncodeError,
            ),
            (
                ContractError::Store(StoreError::Read {
                    key: "a".into(),
                    reason: "io".into(),
                }),
                ErrorKind::StoreError,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn messages_carry_the_asset_id() {
        let err = ContractError::NotFound {
            id: "asset42".into(),
        };
        assert!(err.to_string().contains("asset42"));
        assert_eq!(err.asset_id(), Some("asset42"));

        let err = ContractError::Unauthorized {
            id: "asset42".into(),
            caller: "mallory".into(),
        };
        assert!(err.to_string().contains("asset42"));
        assert!(err.to_string().contains("mallory"));
    }

    #[test]
    fn store_error_key_passthrough() {
        let err = ContractError::from(StoreError::Conflict {
            key: "asset7".into(),
            read: 1,
            current: 2,
        });
        assert_eq!(err.asset_id(), Some("asset7"));
        let scan = ContractError::from(StoreError::Scan {
            start: String::new(),
            end: String::new(),
            reason: "closed".into(),
        });
        assert_eq!(scan.asset_id(), None);
    }

    #[test]
    fn client_error_classification() {
        assert!(ErrorKind::NotFound.is_client_error());
        assert!(ErrorKind::Unauthorized.is_client_error());
        assert!(!ErrorKind::DecodeError.is_client_error());
        assert!(!ErrorKind::EncodeError.is_client_error());
        assert!(!ErrorKind::StoreError.is_client_error());
        assert_eq!(ErrorKind::EncodeError.as_str(), "ENCODE_ERROR");
        assert_eq!(ErrorKind::InvalidData.to_string(), "INVALID_DATA");
    }
}
