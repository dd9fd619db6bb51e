//! Authorization rules.
//!
//! Handlers describe what they require as a [`Rule`] and evaluate it against
//! the authenticated [`Subject`]. Rules compose with [`Rule::All`] and
//! [`Rule::Any`] instead of branching on roles inline.

use crate::{
    errors::{PortalError, PortalResult},
    models::user::Role,
};

/// The caller a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub email: String,
    pub role: Role,
}

impl Subject {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The subject holds exactly this role.
    Role(Role),
    /// The subject is the owner of the resource identified by this email.
    Owner(String),
    All(Vec<Rule>),
    Any(Vec<Rule>),
}

impl Rule {
    pub fn admin() -> Self {
        Rule::Role(Role::Admin)
    }

    pub fn owner(email: impl Into<String>) -> Self {
        Rule::Owner(email.into())
    }

    pub fn owner_or_admin(email: impl Into<String>) -> Self {
        Rule::Any(vec![Rule::owner(email), Rule::admin()])
    }

    pub fn allows(&self, subject: &Subject) -> bool {
        match self {
            Rule::Role(role) => subject.role == *role,
            Rule::Owner(email) => subject.email == *email,
            Rule::All(rules) => rules.iter().all(|rule| rule.allows(subject)),
            Rule::Any(rules) => rules.iter().any(|rule| rule.allows(subject)),
        }
    }

    pub fn check(&self, subject: &Subject) -> PortalResult<()> {
        if self.allows(subject) {
            Ok(())
        } else {
            Err(PortalError::Authorization("forbidden access".to_string()))
        }
    }
}
