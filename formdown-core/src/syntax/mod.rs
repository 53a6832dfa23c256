//! Line-level FormDown syntax
//!
//!     Everything here works on a single declaration at a time and knows nothing about
//!     document state (forms, groups, counters). The parser drives these pieces:
//!
//!     attributes  bracket interior -> typed attribute map
//!     shorthand   declaration recognition (standard + shorthand, block + inline)
//!     field       recognized declaration -> `Field`
//!     label       name -> display label

pub mod attributes;
pub mod field;
pub mod label;
pub mod shorthand;

pub use attributes::parse_attributes;
pub use field::{build_field, FieldDraft};
pub use label::smart_label;
pub use shorthand::{find_inline_fields, match_block_field, FieldSpec, SyntaxKind};
