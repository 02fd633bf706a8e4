//! Dual-mode persistence boundary.
//!
//! # Responsibility
//! - Select exactly one persistence mode at process start and keep it fixed.
//! - Route store mutations uniformly to local storage or the remote backend.
//!
//! # Invariants
//! - Remote Mode never reads or writes local storage after selection.
//! - Local storage is cleared before Remote Mode activates, so stale
//!   on-device data cannot appear next to remote data.

use crate::db::DbError;
use crate::persist::local::LocalStore;
use crate::persist::remote::RemoteBackend;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod local;
pub mod remote;

pub type PersistResult<T> = Result<T, PersistError>;

/// Failure in the local persistence path.
#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize todo collection: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Active persistence mode for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    Local,
    Remote,
}

/// Two-variant persistence backend, selected once per session.
///
/// Mutation paths match on the variant instead of scattering mode checks;
/// a Remote→Local transition does not exist.
pub enum PersistAdapter {
    Local(LocalStore),
    Remote(Arc<dyn RemoteBackend>),
}

impl PersistAdapter {
    /// Probes the remote capability once and fixes the session mode.
    ///
    /// When the capability is present, local storage is wiped before the
    /// remote variant takes over; a wipe failure is logged and ignored
    /// because the local store is never consulted again this session.
    pub fn select_mode(local: LocalStore, remote: Option<Arc<dyn RemoteBackend>>) -> Self {
        match remote {
            Some(backend) => {
                if let Err(err) = local.clear() {
                    warn!("event=mode_select module=persist status=warn mode=remote error={err}");
                }
                info!("event=mode_select module=persist status=ok mode=remote");
                Self::Remote(backend)
            }
            None => {
                info!("event=mode_select module=persist status=ok mode=local");
                Self::Local(local)
            }
        }
    }

    /// Returns the active mode tag.
    pub fn mode(&self) -> PersistMode {
        match self {
            Self::Local(_) => PersistMode::Local,
            Self::Remote(_) => PersistMode::Remote,
        }
    }
}
