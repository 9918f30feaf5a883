//! HTTP Infrastructure Layer
//!
//! This crate connects the portal to its REST backend and holds the state
//! that outlives a single page: the signed-in session and the current route.
//!
//! # Architecture
//!
//! - **PortalApi**: the port every page controller is written against
//! - **PortalClient**: the reqwest adapter implementing it, attaching the
//!   bearer token and tearing the session down on any 401
//! - **SessionStore**: the one owner of the token and user, hydrated from
//!   durable storage at startup
//! - **Navigator**: the current route plus the route guard
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_http::{ClientConfig, FileSessionStorage, Navigator, PortalClient, SessionStore};
//!
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::hydrate(Arc::new(FileSessionStorage::new(config.session_path())));
//! let client = PortalClient::new(&config, session.clone(), Navigator::new())?;
//! let policies = client.list_policies().await?;
//! ```

pub mod config;
pub mod error;
pub mod storage;
pub mod session;
pub mod navigation;
pub mod ports;
pub mod client;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, StorageError};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage, TOKEN_KEY, USER_KEY};
pub use session::SessionStore;
pub use navigation::{Navigator, Route};
pub use ports::PortalApi;
pub use client::PortalClient;
