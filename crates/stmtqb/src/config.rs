//! Builder configuration and process-wide defaults.
//!
//! The process-wide dialect and interpolation flag are only read when a
//! builder is created. Each builder keeps its own [`BuilderConfig`] snapshot,
//! so later changes to the globals never affect an existing builder.
//!
//! # Example
//! ```ignore
//! use stmtqb::config::{self, BuilderConfig};
//! use stmtqb::dialect::MySql;
//!
//! config::set_enable_interpolation(true);
//! let cfg = BuilderConfig::current();
//! assert!(cfg.interpolate);
//!
//! let mysql = BuilderConfig::new().dialect(MySql).interpolate(false);
//! ```

use crate::dialect::{Dialect, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

static ENABLE_INTERPOLATION: AtomicBool = AtomicBool::new(false);

fn default_dialect_slot() -> &'static RwLock<Arc<dyn Dialect>> {
    static DIALECT: OnceLock<RwLock<Arc<dyn Dialect>>> = OnceLock::new();
    DIALECT.get_or_init(|| RwLock::new(Arc::new(Postgres)))
}

/// Enable or disable literal interpolation for builders created from now on.
pub fn set_enable_interpolation(enabled: bool) {
    ENABLE_INTERPOLATION.store(enabled, Ordering::SeqCst);
}

/// Current value of the process-wide interpolation flag.
pub fn interpolation_enabled() -> bool {
    ENABLE_INTERPOLATION.load(Ordering::SeqCst)
}

/// Replace the process-wide default dialect.
pub fn set_default_dialect(dialect: Arc<dyn Dialect>) {
    let mut slot = default_dialect_slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = dialect;
}

/// The process-wide default dialect.
pub fn default_dialect() -> Arc<dyn Dialect> {
    default_dialect_slot()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Per-builder configuration, fixed at construction time.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Dialect used for identifiers and placeholders.
    pub dialect: Arc<dyn Dialect>,
    /// Whether the executor should inline arguments as literals.
    pub interpolate: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dialect: Arc::new(Postgres),
            interpolate: false,
        }
    }
}

impl BuilderConfig {
    /// Create a config with `Postgres` and interpolation disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process-wide defaults.
    pub fn current() -> Self {
        Self {
            dialect: default_dialect(),
            interpolate: interpolation_enabled(),
        }
    }

    /// Override the dialect.
    pub fn dialect<D: Dialect + 'static>(mut self, dialect: D) -> Self {
        self.dialect = Arc::new(dialect);
        self
    }

    /// Override the dialect with a shared instance.
    pub fn shared_dialect(mut self, dialect: Arc<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    /// Override the interpolation flag.
    pub fn interpolate(mut self, enabled: bool) -> Self {
        self.interpolate = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySql;

    #[test]
    fn default_config_is_postgres_without_interpolation() {
        let cfg = BuilderConfig::default();
        assert_eq!(cfg.dialect.name(), "postgres");
        assert!(!cfg.interpolate);
    }

    #[test]
    fn setters_override_fields() {
        let cfg = BuilderConfig::new().dialect(MySql).interpolate(true);
        assert_eq!(cfg.dialect.name(), "mysql");
        assert!(cfg.interpolate);
    }
}
