//! Resolution of IANA zone names to their offset/DST rule sets.
//!
//! A [`TzdbRegistry`] wraps a zoneinfo database and caches resolved rules
//! per name for the registry lifetime. Registries are explicit values, so
//! tests can point independent registries at different database roots; the
//! process-wide default used by the top-level operations lives behind
//! [`global`] and can be redirected once, before first use, with
//! [`configure`].

use std::path::Path;
use std::sync::{OnceLock, RwLock};

use jiff::tz::{TimeZone, TimeZoneDatabase};
use rustc_hash::FxHashMap;

use crate::error::{TimeError, TimeResult};

/// A cache of resolved time zone rules over one zoneinfo database.
#[derive(Debug)]
pub struct TzdbRegistry {
    database: TimeZoneDatabase,
    cache: RwLock<FxHashMap<String, TimeZone>>,
}

impl TzdbRegistry {
    /// Creates a registry over the platform's default database.
    pub fn new() -> Self {
        Self::with_database(jiff::tz::db().clone())
    }

    /// Creates a registry over an explicit zoneinfo directory.
    pub fn from_dir<P: AsRef<Path>>(path: P) -> TimeResult<Self> {
        let path = path.as_ref();
        let database = TimeZoneDatabase::from_dir(path).map_err(|e| {
            TimeError::zone_not_found().with_message(format!(
                "cannot open time zone database at `{}`: {e}",
                path.display()
            ))
        })?;
        Ok(Self::with_database(database))
    }

    fn with_database(database: TimeZoneDatabase) -> Self {
        Self {
            database,
            cache: RwLock::default(),
        }
    }

    /// Resolves an IANA zone name to its rule set.
    ///
    /// Lookups are case insensitive and successful lookups are cached for
    /// the registry lifetime. Safe under concurrent first-time lookups of
    /// the same name: the first published load wins and every caller
    /// observes it.
    pub fn locate(&self, name: &str) -> TimeResult<TimeZone> {
        let key = name.to_ascii_lowercase();
        if let Some(tz) = self.cache.read().map_err(|_| lock_poisoned())?.get(&key) {
            return Ok(tz.clone());
        }
        log::debug!("loading time zone `{name}`");
        let tz = self.database.get(name).map_err(|e| {
            TimeError::zone_not_found().with_message(format!("time zone `{name}`: {e}"))
        })?;
        Ok(self
            .cache
            .write()
            .map_err(|_| lock_poisoned())?
            .entry(key)
            .or_insert(tz)
            .clone())
    }
}

impl Default for TzdbRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned() -> TimeError {
    TimeError::unknown().with_message("unable to acquire the time zone cache lock")
}

static GLOBAL: OnceLock<TzdbRegistry> = OnceLock::new();

/// Installs the process-wide registry over an explicit zoneinfo root.
///
/// Must run before the first use of [`global`]; once the default registry
/// exists, further configuration fails with `InvalidArgument` and the
/// already-cached rules stay in effect.
pub fn configure<P: AsRef<Path>>(path: P) -> TimeResult<()> {
    if GLOBAL.get().is_some() {
        return Err(already_configured());
    }
    let registry = TzdbRegistry::from_dir(path)?;
    GLOBAL.set(registry).map_err(|_| already_configured())
}

fn already_configured() -> TimeError {
    TimeError::invalid_argument()
        .with_message("the global time zone registry is already configured")
}

/// Returns the process-wide registry, creating it over the platform
/// default database on first use.
pub fn global() -> &'static TzdbRegistry {
    GLOBAL.get_or_init(TzdbRegistry::new)
}
