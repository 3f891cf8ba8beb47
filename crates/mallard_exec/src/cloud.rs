//! Connecting to the managed cloud variant of the engine.

use duckdb::Connection;
use tracing::info;

use crate::engine::ConnectTarget;
use crate::errors::{config, Result};
use crate::session::Session;

/// Environment variable holding the access token for cloud connections.
///
/// The token is the only credential source; it is read once per connect
/// and never accepted as a literal argument.
pub const TOKEN_ENV_VAR: &str = "MOTHERDUCK_TOKEN";

const CONNECT_PREFIX: &str = "md:";

/// Open a session against a named cloud database.
///
/// The credential check happens before the engine is touched. The
/// database is created if it does not exist, then attached, matching the
/// service's bootstrap flow. The composed connection string carries the
/// token and must not appear in logs.
pub(crate) fn connect(database: &str) -> Result<Session> {
    ensure_identifier(database)?;
    let token = read_token(|name| std::env::var(name).ok())?;

    let conn = Connection::open(connect_string(&token))?;
    conn.execute_batch(&format!(
        "CREATE DATABASE IF NOT EXISTS {database}; USE {database};"
    ))?;

    info!(database, "connected to cloud database");
    Ok(Session::new(
        conn,
        ConnectTarget::Cloud {
            database: database.to_string(),
        },
    ))
}

fn read_token<F>(get: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match get(TOKEN_ENV_VAR) {
        Some(token) if !token.trim().is_empty() => Ok(token),
        Some(_) => Err(config!("{TOKEN_ENV_VAR} is set but empty")),
        None => Err(config!("{TOKEN_ENV_VAR} environment variable not set")),
    }
}

fn connect_string(token: &str) -> String {
    format!("{CONNECT_PREFIX}?motherduck_token={token}")
}

/// Database names are spliced into `CREATE DATABASE`/`USE` statements, so
/// only plain identifiers are accepted.
fn ensure_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(config!("invalid cloud database name: {name:?}"))
    }
}
