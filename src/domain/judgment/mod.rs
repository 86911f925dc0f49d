//! Judgment domain - Relevance labels rated by a model or derived from user behavior

mod entity;
mod validation;

pub use entity::{
    ClickModel, JudgmentDraft, JudgmentKind, JudgmentType, LlmJudgment, UbiJudgment,
    DEFAULT_JUDGMENT_SIZE, DEFAULT_MAX_RANK, DEFAULT_TOKEN_LIMIT,
};
pub use validation::{validate_judgment, JudgmentValidationError};
