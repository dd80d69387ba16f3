//! Intent parser port.

use consilium_domain::ParsedIntent;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Directive text is empty")]
    EmptyDirective,
}

/// Extracts a structured intent from directive text.
///
/// The shipped parser is pattern matching only; any replacement
/// producing the same output shape is a valid parser.
pub trait IntentParser: Send + Sync {
    fn parse(&self, directive: &str) -> Result<ParsedIntent, ParseError>;
}
