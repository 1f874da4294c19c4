//! Runtime Environment Module
//!
//! Production detection and the runtime-mutable cache enable flag.

use std::env;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Environment variable naming the hosting server software.
pub const SERVER_SOFTWARE_VAR: &str = "SERVER_SOFTWARE";

/// Prefix of `SERVER_SOFTWARE` that marks a development server.
const DEVELOPMENT_PREFIX: &str = "Development";

// == Environment ==
/// Reports whether the current process runs in a production context.
///
/// Implementations are consulted on every call; the answer is never cached.
pub trait Environment: Send + Sync {
    fn is_production(&self) -> bool;
}

/// Reads `SERVER_SOFTWARE` from the process environment.
///
/// An unset variable counts as development.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn is_production(&self) -> bool {
        let software =
            env::var(SERVER_SOFTWARE_VAR).unwrap_or_else(|_| DEVELOPMENT_PREFIX.to_string());
        !software.starts_with(DEVELOPMENT_PREFIX)
    }
}

/// Fixed answer, for tests and embedding.
#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment(pub bool);

impl Environment for FixedEnvironment {
    fn is_production(&self) -> bool {
        self.0
    }
}

// == Cache Flag ==
const UNSET: u8 = 0;
const FORCED_OFF: u8 = 1;
const FORCED_ON: u8 = 2;

/// Process-wide switch controlling whether cache traffic happens at all.
///
/// Defaults to "on" for production and "off" otherwise. An explicit
/// override, once set, wins over the environment.
pub struct CacheFlag {
    state: AtomicU8,
    environment: Arc<dyn Environment>,
}

impl CacheFlag {
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self {
            state: AtomicU8::new(UNSET),
            environment,
        }
    }

    /// Flag with a fixed value regardless of environment.
    pub fn fixed(enabled: bool) -> Self {
        let flag = Self::new(Arc::new(FixedEnvironment(enabled)));
        flag.set(Some(enabled));
        flag
    }

    /// Current value of the flag.
    pub fn value(&self) -> bool {
        match self.state.load(Ordering::Acquire) {
            FORCED_ON => true,
            FORCED_OFF => false,
            _ => self.environment.is_production(),
        }
    }

    /// Sets or clears the explicit override.
    pub fn set(&self, enabled: Option<bool>) {
        let state = match enabled {
            Some(true) => FORCED_ON,
            Some(false) => FORCED_OFF,
            None => UNSET,
        };
        self.state.store(state, Ordering::Release);
    }

    /// Returns the explicit override, if any.
    pub fn override_value(&self) -> Option<bool> {
        match self.state.load(Ordering::Acquire) {
            FORCED_ON => Some(true),
            FORCED_OFF => Some(false),
            _ => None,
        }
    }
}

impl std::fmt::Debug for CacheFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheFlag")
            .field("override", &self.override_value())
            .field("value", &self.value())
            .finish()
    }
}
