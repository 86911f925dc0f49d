//! Search configuration domain - A query template paired with a target index

mod entity;
mod validation;

pub use entity::SearchConfigurationDraft;
pub use validation::{
    validate_query_body, validate_search_configuration, SearchConfigurationValidationError,
};
