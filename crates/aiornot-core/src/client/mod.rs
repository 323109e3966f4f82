//! API clients: async-first, with a blocking facade.

pub(crate) mod async_client;
pub(crate) mod sync_client;

pub use async_client::AsyncClient;
pub use sync_client::Client;
