//! G-Code command classification
//!
//! Only a small vocabulary matters to interpretation: `G0`/`G1` moves and
//! the `G90`/`G91` distance-mode markers. Everything else is inert and
//! passes through untouched.

use serde::{Deserialize, Serialize};

/// Kind of motion a node was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    /// G0 rapid positioning
    Rapid,
    /// G1 linear interpolation
    Linear,
}

impl MotionKind {
    /// Exact mnemonic match; `G00`/`G01` are not motion
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "G0" => Some(Self::Rapid),
            "G1" => Some(Self::Linear),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
        }
    }
}

impl std::fmt::Display for MotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Distance mode markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    /// G90
    Absolute,
    /// G91, unsupported
    Relative,
}

/// Classified command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Motion(MotionKind),
    DistanceMode(DistanceMode),
    /// Any other G/M code, or no command at all
    Other,
}

impl CommandKind {
    /// Classify an uppercased command mnemonic
    pub fn classify(mnemonic: &str) -> Self {
        if let Some(motion) = MotionKind::from_mnemonic(mnemonic) {
            return Self::Motion(motion);
        }
        match mnemonic {
            "G90" => Self::DistanceMode(DistanceMode::Absolute),
            "G91" => Self::DistanceMode(DistanceMode::Relative),
            _ => Self::Other,
        }
    }

    pub fn motion(&self) -> Option<MotionKind> {
        match self {
            Self::Motion(motion) => Some(*motion),
            _ => None,
        }
    }

    pub fn is_relative_mode(&self) -> bool {
        matches!(self, Self::DistanceMode(DistanceMode::Relative))
    }
}
