//! Infrastructure layer - Backends, services and process setup

pub mod backend;
pub mod logging;
pub mod services;
