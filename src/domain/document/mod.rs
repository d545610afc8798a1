//! Parsed document domain types
//!
//! Documents arrive already parsed into titled, leveled sections. This module
//! owns their shape and the critical-section classifier.

pub mod classifier;
pub mod entity;

pub use classifier::{is_critical_text, matched_keywords, CRITICAL_KEYWORDS};
pub use entity::{DocType, ParsedDocument, ParsedSection, MAX_SECTION_LEVEL, MIN_SECTION_LEVEL};
