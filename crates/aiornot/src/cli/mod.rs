//! Command implementations.

pub mod analyze;
pub mod batch;
pub mod output;
pub mod token;

use aiornot_core::AsyncClient;

/// Build a client from the environment / credential file.
pub(crate) fn client() -> anyhow::Result<AsyncClient> {
    Ok(AsyncClient::from_env()?)
}
