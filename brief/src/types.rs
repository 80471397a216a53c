//! Backend wire types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Brief difficulty; anything unrecognized reads as `Normal`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
    #[default]
    #[serde(other)]
    Normal,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// The task shown for the current period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    pub text: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Per-user state reported alongside the brief
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    #[serde(default)]
    pub streak: Option<u32>,
    #[serde(default)]
    pub action_completed: bool,
    #[serde(default)]
    pub last_action_type: Option<String>,
}

/// `GET /brief`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefResponse {
    pub brief: Brief,
    #[serde(default)]
    pub user_state: Option<UserState>,
}

/// `POST /action/done` and `POST /action/skip`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak: u32,
}

/// Best-effort error body on non-success responses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
