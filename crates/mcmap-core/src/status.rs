//! Commercial status normalization and classification.
//!
//! The `Statut` column is free text typed by the sales team ("Client",
//! "client fidèle", "Résilié en 2023", ...). It is reduced to a key with
//! [`status_key`] and classified with [`StatusClass::classify`].

use serde::{Deserialize, Serialize};

use crate::text::fold;

/// Commercial relationship stage of an establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Client,
    Discussion,
    Refused,
    Terminated,
    Prospect,
    Unknown,
}

/// Substring tests in priority order. The first needle found in the key wins.
const CLASSIFICATION_ORDER: [(&str, StatusClass); 5] = [
    ("client", StatusClass::Client),
    ("discussion", StatusClass::Discussion),
    ("refuse", StatusClass::Refused),
    ("resilie", StatusClass::Terminated),
    ("prospect", StatusClass::Prospect),
];

/// Marker color and radius used to draw an establishment on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    /// CSS hex color.
    pub color: &'static str,
    /// Marker radius in pixels.
    pub radius: u8,
}

impl StatusClass {
    /// Every class, in classification priority order with `Unknown` last.
    pub const ALL: [StatusClass; 6] = [
        StatusClass::Client,
        StatusClass::Discussion,
        StatusClass::Refused,
        StatusClass::Terminated,
        StatusClass::Prospect,
        StatusClass::Unknown,
    ];

    /// Classify an already-normalized status key.
    ///
    /// Total: any input maps to exactly one class. Callers holding raw text
    /// should go through [`status_key`] first, or use [`StatusClass::from_raw`].
    #[must_use]
    pub fn classify(key: &str) -> Self {
        CLASSIFICATION_ORDER
            .iter()
            .find(|(needle, _)| key.contains(needle))
            .map_or(StatusClass::Unknown, |&(_, class)| class)
    }

    /// Normalize raw status text and classify it.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        Self::classify(&status_key(raw))
    }

    #[must_use]
    pub fn style(self) -> StatusStyle {
        match self {
            StatusClass::Client => StatusStyle {
                color: "#2ecc71",
                radius: 12,
            },
            StatusClass::Discussion => StatusStyle {
                color: "#f39c12",
                radius: 9,
            },
            StatusClass::Refused => StatusStyle {
                color: "#e74c3c",
                radius: 6,
            },
            StatusClass::Terminated => StatusStyle {
                color: "#7f8c8d",
                radius: 6,
            },
            StatusClass::Prospect => StatusStyle {
                color: "#3498db",
                radius: 7,
            },
            StatusClass::Unknown => StatusStyle {
                color: "#95a5a6",
                radius: 5,
            },
        }
    }

    /// Display label shown in legends and popups.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StatusClass::Client => "Client",
            StatusClass::Discussion => "En discussion",
            StatusClass::Refused => "Refusé",
            StatusClass::Terminated => "Résilié",
            StatusClass::Prospect => "Prospect",
            StatusClass::Unknown => "Inconnu",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusClass::Client => write!(f, "client"),
            StatusClass::Discussion => write!(f, "discussion"),
            StatusClass::Refused => write!(f, "refused"),
            StatusClass::Terminated => write!(f, "terminated"),
            StatusClass::Prospect => write!(f, "prospect"),
            StatusClass::Unknown => write!(f, "unknown"),
        }
    }
}

/// Reduce free-text status to its classification key.
///
/// See [`fold`]: `"  Résilié "` and `"resilie"` share the key `"resilie"`.
#[must_use]
pub fn status_key(raw: &str) -> String {
    fold(raw)
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
