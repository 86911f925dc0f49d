//! Draft domain - The in-progress entity a creation screen owns, the field
//! collector that mutates it and the reducer that switches its shape

mod entity;
pub mod field;
mod kind;

pub use entity::{validate, Draft, DraftVariant};
pub use field::{fields, FieldValue};
pub use kind::{EntityKind, Navigation};
