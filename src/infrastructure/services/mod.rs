//! Infrastructure services

mod creation_session;

pub use creation_session::{
    CreationSession, SessionSnapshot, SessionWatcher, DEFAULT_PREVIEW_LIMIT,
};
