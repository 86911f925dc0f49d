//! Query set domain - Drafts, validation and bulk query uploads

mod entity;
mod ndjson;
mod validation;

pub use entity::{
    CreationMode, ModeKind, QueryRecord, QuerySetDraft, SamplingMethod, DEFAULT_QUERY_SET_SIZE,
};
pub use ndjson::{parse_queries, BulkParseError, LineError, NdjsonQueries, QueryPreview};
pub use validation::{validate_query_set, QuerySetValidationError};
