//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Completion of function names and keywords
//! - Hover information for function calls
//! - Signature help inside argument lists
//! - Semantic tokens for externally tokenized queries

mod completion;
mod context;
mod hover;
mod semantic_tokens;
mod signature_help;

pub use completion::completion_at_position;
pub use hover::hover_at_position;
pub use semantic_tokens::{legend, tokens_for_spans};
pub use signature_help::signature_help_at_position;
