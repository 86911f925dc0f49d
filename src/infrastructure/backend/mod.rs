//! Entity backends - Where validated drafts are persisted

mod factory;
mod http;
mod in_memory;
pub mod payload;

pub use factory::{BackendFactory, Backends};
pub use http::HttpEntityBackend;
pub use in_memory::{InMemoryEntityBackend, StoredEntity};
