//! Caller identity contract.
//!
//! The core never authenticates anyone. It only reads the current identity
//! when stamping ownership fields on quizzes and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a caller is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Instructor => write!(f, "instructor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "instructor" | "teacher" => Ok(Role::Instructor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn is_instructor(&self) -> bool {
        self.role == Role::Instructor
    }
}

/// Source of the current caller identity.
pub trait IdentityProvider: Send + Sync {
    /// The current identity, or `None` when nobody is signed in.
    fn current(&self) -> Option<Identity>;
}

/// An identity provider that always returns the same identity (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<Identity>);

impl StaticIdentity {
    pub fn new(identity: Identity) -> Self {
        Self(Some(identity))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.0.clone()
    }
}

impl From<Option<Identity>> for StaticIdentity {
    fn from(identity: Option<Identity>) -> Self {
        Self(identity)
    }
}
