//! The actor whose modifiers feed a check.

use crate::error::{LockError, LockResult};

/// Read-only access to an actor's check modifiers.
///
/// How a host resolves a statistic (aliases, older sheet layouts, ability
/// fallbacks) is up to the implementation; the engine only asks for a number.
pub trait ModifierSource {
    /// Name shown in reports.
    fn actor_name(&self) -> &str;

    /// Total check modifier for a statistic such as "thievery", if the actor
    /// has one.
    fn statistic_modifier(&self, statistic: &str) -> Option<i32>;
}

/// Look up the base modifier for a check.
///
/// Unlike bonus entries, a missing actor or statistic is an error rather than
/// a silent zero.
pub fn base_modifier(actor: Option<&dyn ModifierSource>, statistic: &str) -> LockResult<i32> {
    let actor = actor.ok_or(LockError::MissingActor)?;
    actor
        .statistic_modifier(statistic)
        .ok_or_else(|| LockError::MissingModifierSource(statistic.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::ModifierSource;

    /// Fixed-table actor for tests.
    pub struct TableActor {
        pub name: String,
        pub modifiers: HashMap<String, i32>,
    }

    impl TableActor {
        pub fn new(name: &str, modifiers: &[(&str, i32)]) -> Self {
            Self {
                name: name.to_string(),
                modifiers: modifiers
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            }
        }
    }

    impl ModifierSource for TableActor {
        fn actor_name(&self) -> &str {
            &self.name
        }

        fn statistic_modifier(&self, statistic: &str) -> Option<i32> {
            self.modifiers.get(statistic).copied()
        }
    }
}
