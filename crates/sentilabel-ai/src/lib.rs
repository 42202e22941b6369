//! Oracle layer: the fixed classification prompt, the chunk classifier with
//! timeout and retry, and the lenient reply parser.

mod classifier;
mod oracle;
pub mod parser;
pub mod prompt;
mod retry;

#[cfg(feature = "http")]
pub mod groq;

pub use classifier::{Classifier, DEFAULT_TIMEOUT};
pub use oracle::{Oracle, OracleError};
pub use parser::{ParsedReply, parse_reply};
pub use prompt::SYSTEM_PROMPT;
pub use retry::RetryPolicy;

#[cfg(feature = "http")]
pub use groq::{GroqClient, GroqConfig};
