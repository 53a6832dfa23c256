//! Parser tests: text -> ParsedDocument

mod association;
mod extraction;
mod shorthand;
