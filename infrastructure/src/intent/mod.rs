//! Intent parsing adapters.

pub mod pattern_parser;

pub use pattern_parser::PatternIntentParser;
