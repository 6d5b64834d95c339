use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Traditional-medicine systems covered by the NAMASTE terminology.
///
/// The set is closed: mapping entries and remote suggestions outside these
/// systems are rejected at the boundary where they enter the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceSystem {
    Ayurveda,
    Siddha,
    Unani,
}

impl SourceSystem {
    /// All systems, in canonical order.
    pub const ALL: [SourceSystem; 3] = [
        SourceSystem::Ayurveda,
        SourceSystem::Siddha,
        SourceSystem::Unani,
    ];

    /// Returns the canonical system name as it appears in the NAMASTE portal.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSystem::Ayurveda => "Ayurveda",
            SourceSystem::Siddha => "Siddha",
            SourceSystem::Unani => "Unani",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceSystem {
    type Err = String;

    /// Parse a system name. Case-insensitive to tolerate remote responses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ayurveda" => Ok(SourceSystem::Ayurveda),
            "siddha" => Ok(SourceSystem::Siddha),
            "unani" => Ok(SourceSystem::Unani),
            _ => Err(format!("Unknown traditional-medicine system: {}", s)),
        }
    }
}
