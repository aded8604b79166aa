//! Identity Model

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the Identity Provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// Who is booking
///
/// Guest and authenticated identities are mutually exclusive; switching one
/// replaces the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// Email typed in at checkout
    Guest { email: String },
    /// Identity Provider session
    Authenticated {
        user: UserProfile,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_token: Option<String>,
    },
}

impl Identity {
    pub fn email(&self) -> &str {
        match self {
            Identity::Guest { email } => email,
            Identity::Authenticated { user, .. } => &user.email,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    /// Name shown in navigation
    pub fn display_name(&self) -> &str {
        match self {
            Identity::Guest { email } => email,
            Identity::Authenticated { user, .. } if !user.display_name.is_empty() => {
                &user.display_name
            }
            Identity::Authenticated { user, .. } => &user.email,
        }
    }
}
