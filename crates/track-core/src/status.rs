//! # Asset Lifecycle Enumerations
//!
//! [`AssetStatus`] is the lifecycle state rendered into `Asset::current_state`.
//! [`AssetCondition`] grades the physical condition of an asset.
//!
//! ```text
//! Available ──▶ Inspecting ──▶ Repairing
//!     ▲                            │
//!     └────────────────────────────┘
//! ```
//!
//! The contract only ever assigns `Available`; the other states are
//! representable so that stored records written by later contract versions
//! still decode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Lifecycle status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Ready to be leased or transferred.
    #[default]
    Available,
    /// Undergoing inspection.
    Inspecting,
    /// Undergoing repair.
    Repairing,
}

impl AssetStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [AssetStatus; 3] = [Self::Available, Self::Inspecting, Self::Repairing];

    /// Wire rendering of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Inspecting => "inspecting",
            Self::Repairing => "repairing",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "asset status",
                value: s.to_string(),
            })
    }
}

/// Physical condition of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCondition {
    /// Never used.
    New,
    /// Returned to service after refurbishment.
    Refurbished,
    /// Requires repair before further use.
    NeedsRepair,
}

impl AssetCondition {
    /// All conditions.
    pub const ALL: [AssetCondition; 3] = [Self::New, Self::Refurbished, Self::NeedsRepair];

    /// Wire rendering of this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Refurbished => "refurbished",
            Self::NeedsRepair => "needs_repair",
        }
    }
}

impl std::fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCondition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "asset condition",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_lowercase() {
        assert_eq!(AssetStatus::Available.to_string(), "available");
        assert_eq!(AssetStatus::Inspecting.to_string(), "inspecting");
        assert_eq!(AssetStatus::Repairing.to_string(), "repairing");
        assert_eq!(AssetStatus::default(), AssetStatus::Available);
    }

    #[test]
    fn status_serde_matches_display() {
        for status in AssetStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            assert_eq!(status.as_str().parse::<AssetStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "unknown".parse::<AssetStatus>().unwrap_err();
        assert_eq!(err.value, "unknown");
        assert!(serde_json::from_str::<AssetStatus>("\"AVAILABLE\"").is_err());
    }

    #[test]
    fn condition_renders_snake_case() {
        assert_eq!(AssetCondition::NeedsRepair.to_string(), "needs_repair");
        assert_eq!(
            serde_json::to_string(&AssetCondition::NeedsRepair).unwrap(),
            "\"needs_repair\""
        );
        assert_eq!("new".parse::<AssetCondition>().unwrap(), AssetCondition::New);
        assert!("news".parse::<AssetCondition>().is_err());
    }
}
