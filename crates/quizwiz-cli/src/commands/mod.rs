pub mod attempts;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod results;
pub mod show;
pub mod take;
pub mod validate;

use anyhow::{Context as _, Result};

use quizwiz_core::identity::{Identity, IdentityProvider, Role, StaticIdentity};
use quizwiz_core::model::Quiz;
use quizwiz_core::repository::{quiz_key, QuizRepository, ResultRepository};
use quizwiz_core::QuizError;
use quizwiz_store::config::{load_config_from, QuizwizConfig};
use quizwiz_store::open_store;

use crate::GlobalArgs;

/// Everything a store-backed command needs.
pub struct Context {
    pub config: QuizwizConfig,
    pub identity: StaticIdentity,
    pub quizzes: QuizRepository,
    pub results: ResultRepository,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let mut config = load_config_from(global.config.as_deref())?;
        if let Some(store) = &global.store {
            config.store_path = store.clone();
        }

        let identity = resolve_identity(global, config.identity());
        let store = open_store(&config)?;
        tracing::debug!(
            store = %config.store_path.display(),
            user = identity.as_ref().map(|i| i.id.as_str()).unwrap_or("-"),
            "context loaded"
        );

        Ok(Self {
            config,
            identity: identity.into(),
            quizzes: QuizRepository::new(store.clone()),
            results: ResultRepository::new(store),
        })
    }

    /// The current caller, or an error when nobody is signed in.
    pub fn caller(&self) -> Result<Identity> {
        self.identity.current().ok_or_else(|| {
            anyhow::Error::new(QuizError::Unauthenticated)
                .context("pass --user (or set [identity] in quizwiz.toml)")
        })
    }

    /// The current caller, who must be an instructor.
    pub fn instructor(&self, action: &str) -> Result<Identity> {
        let caller = self.caller()?;
        if !caller.is_instructor() {
            return Err(QuizError::Forbidden(format!(
                "only instructors can {action} ({} is a {})",
                caller.name, caller.role
            ))
            .into());
        }
        Ok(caller)
    }

    pub fn require_quiz(&self, id: &str) -> Result<Quiz> {
        self.quizzes
            .require(&quiz_key(id))
            .with_context(|| format!("cannot load quiz {id}"))
    }
}

/// Command-line identity flags win over the configured identity.
fn resolve_identity(global: &GlobalArgs, configured: Option<Identity>) -> Option<Identity> {
    let mut identity = match (&global.user, configured) {
        (Some(user), _) => Identity::new(
            user.clone(),
            user.clone(),
            global.role.unwrap_or(Role::Student),
        ),
        (None, Some(identity)) => identity,
        (None, None) => return None,
    };

    if let Some(name) = &global.name {
        identity.name = name.clone();
    }
    if let Some(role) = global.role {
        identity.role = role;
    }
    Some(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configured_identity() {
        let configured = Some(Identity::new("i1", "Ida", Role::Instructor));

        let global = GlobalArgs {
            role: Some(Role::Student),
            ..Default::default()
        };
        let identity = resolve_identity(&global, configured.clone()).unwrap();
        assert_eq!(identity, Identity::new("i1", "Ida", Role::Student));

        let global = GlobalArgs {
            user: Some("s1".into()),
            name: Some("Sam".into()),
            ..Default::default()
        };
        let identity = resolve_identity(&global, configured).unwrap();
        assert_eq!(identity, Identity::new("s1", "Sam", Role::Student));
    }

    #[test]
    fn no_identity_without_flags_or_config() {
        assert!(resolve_identity(&GlobalArgs::default(), None).is_none());
    }
}
