use std::path::{Path, PathBuf};

use duckdb::Connection;
use tracing::info;

use crate::cloud;
use crate::errors::Result;
use crate::session::Session;

/// Where a session connects to.
///
/// Fixed when the [`Engine`] is constructed and immutable for the lifetime
/// of every session opened from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectTarget {
    /// Transient in-memory database.
    InMemory,
    /// Database file on local disk, created on first open.
    Local(PathBuf),
    /// Named database on the managed cloud service, authenticated with a
    /// token read from the environment at connect time.
    Cloud { database: String },
}

/// Connection factory.
///
/// `connect` may be called multiple times; each call opens an independent
/// session against the same target.
#[derive(Debug, Clone)]
pub struct Engine {
    target: ConnectTarget,
}

impl Engine {
    pub fn in_memory() -> Engine {
        Engine {
            target: ConnectTarget::InMemory,
        }
    }

    pub fn local(path: impl AsRef<Path>) -> Engine {
        Engine {
            target: ConnectTarget::Local(path.as_ref().to_path_buf()),
        }
    }

    /// Target a database on the managed cloud service.
    ///
    /// No credential is taken here; the token is read from the
    /// environment when `connect` runs. See [`cloud::TOKEN_ENV_VAR`].
    pub fn cloud(database: impl Into<String>) -> Engine {
        Engine {
            target: ConnectTarget::Cloud {
                database: database.into(),
            },
        }
    }

    pub fn target(&self) -> &ConnectTarget {
        &self.target
    }

    /// Open a session against the configured target.
    ///
    /// Local targets never attempt a network call.
    pub fn connect(&self) -> Result<Session> {
        match &self.target {
            ConnectTarget::InMemory => {
                let conn = Connection::open_in_memory()?;
                info!("connected to in-memory database");
                Ok(Session::new(conn, self.target.clone()))
            }
            ConnectTarget::Local(path) => {
                let conn = Connection::open(path)?;
                info!(path = %path.display(), "connected to local database");
                Ok(Session::new(conn, self.target.clone()))
            }
            ConnectTarget::Cloud { database } => cloud::connect(database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_connects_offline() {
        let session = Engine::in_memory().connect().unwrap();
        assert_eq!(session.target(), &ConnectTarget::InMemory);
    }

    #[test]
    fn local_file_persists_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mallard.db");

        let engine = Engine::local(&path);
        {
            let session = engine.connect().unwrap();
            session
                .execute_batch("CREATE TABLE t (a INT); INSERT INTO t VALUES (1), (2)")
                .unwrap();
        }

        let session = engine.connect().unwrap();
        let out = session.query("SELECT count(*) FROM t").unwrap();
        assert_eq!(out.scalar(), Some(&serde_json::json!(2)));
    }
}
