//! # Attached Asset Data
//!
//! Opaque payload attached to an asset. The contract does not interpret the
//! payload, but it must be either empty or syntactically valid JSON text.
//! [`AssetData`] can only be constructed through that check, including when
//! a stored record is decoded.

use serde::{Deserialize, Serialize};

/// Empty or syntactically valid JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetData(String);

impl AssetData {
    /// The empty payload assigned at manufacture.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Validate `text` as JSON and wrap it unchanged.
    ///
    /// The original bytes are kept verbatim; no re-serialization happens, so
    /// key order and whitespace survive the round trip through state.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        if text.is_empty() {
            return Ok(Self::empty());
        }
        check_json(text)?;
        Ok(Self(text.to_string()))
    }

    /// Whether no payload is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

fn check_json(text: &str) -> Result<(), serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(text).map(|_| ())
}

impl TryFrom<String> for AssetData {
    type Error = serde_json::Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        if !text.is_empty() {
            check_json(&text)?;
        }
        Ok(Self(text))
    }
}

impl From<AssetData> for String {
    fn from(data: AssetData) -> Self {
        data.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_is_valid() {
        let data = AssetData::parse("").unwrap();
        assert!(data.is_empty());
        assert_eq!(data, AssetData::empty());
    }

    #[test]
    fn accepts_any_json_text() {
        for text in [r#"{"temp": 21.5}"#, "[1,2,3]", "\"label\"", "42", "true", "null"] {
            let data = AssetData::parse(text).unwrap();
            assert_eq!(data.as_str(), text);
        }
    }

    #[test]
    fn keeps_original_formatting() {
        let text = "{ \"b\": 1,   \"a\": 2 }";
        let data = AssetData::parse(text).unwrap();
        assert_eq!(data.as_bytes(), text.as_bytes());
    }

    #[test]
    fn rejects_malformed_json() {
        for text in ["{", "{\"a\":}", "not json", "[1,2", "{} trailing"] {
            assert!(AssetData::parse(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn deserialization_enforces_validity() {
        assert!(serde_json::from_str::<AssetData>("\"{\\\"ok\\\":1}\"").is_ok());
        assert!(serde_json::from_str::<AssetData>("\"{broken\"").is_err());
        assert!(serde_json::from_str::<AssetData>("\"\"").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn parse_agrees_with_serde_json(text in ".{1,48}") {
            let valid = serde_json::from_str::<serde_json::Value>(&text).is_ok();
            prop_assert_eq!(AssetData::parse(&text).is_ok(), valid);
        }
    }
}
