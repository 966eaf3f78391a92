//! Client for the multi-tenant boarding-house ("kos") rental backend.
//!
//! Layers, leaves first: `models` and `session`, then the `api` client, the
//! per-resource `store`s, the `auth` context, and the text `pages`.

pub mod api;
pub mod auth;
pub mod models;
pub mod pages;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiConfig, ApiError, ApiResult};
pub use auth::{AuthContext, Route};
pub use session::{FileStore, MemoryStore, Session, SessionStore};
