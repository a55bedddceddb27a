//! Hover information for MetricsQL function calls.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use super::context::word_at;
use crate::document::LineIndex;
use crate::types::{FunctionId, FunctionSignature, OptionalArgs};

fn format_arity(signature: &FunctionSignature, policy: OptionalArgs) -> String {
    let arity = signature.arity(policy);
    match arity.max {
        Some(max) if max == arity.min => format!("Takes exactly {} argument(s).", max),
        Some(max) => format!("Takes {} to {} arguments.", arity.min, max),
        None => format!("Takes at least {} argument(s).", arity.min),
    }
}

/// Format a function signature as markdown.
fn format_signature_docs(signature: &FunctionSignature, policy: OptionalArgs) -> String {
    format!(
        "**{}** `{}`\n\n{}",
        signature.name,
        signature.label(policy),
        format_arity(signature, policy)
    )
}

fn format_bypassed_docs(id: FunctionId) -> String {
    format!(
        "**{}**\n\nArgument and return types are not modeled for this function.",
        id.name()
    )
}

/// Hover for the function name under the cursor.
///
/// Only identifiers followed by `(` are treated as calls, so a metric that
/// happens to share a function's name gets no hover.
pub fn hover_at_position(
    line_index: &LineIndex,
    position: Position,
    policy: OptionalArgs,
) -> Option<Hover> {
    let source = line_index.source();
    let offset = line_index.position_to_offset(position)?;
    let span = word_at(source, offset)?;

    if !source[span.end..].trim_start().starts_with('(') {
        return None;
    }
    let id = FunctionId::from_name(&source[span.clone()])?;

    let value = match id.signature() {
        Some(signature) => format_signature_docs(signature, policy),
        None => format_bypassed_docs(id),
    };

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(line_index.span_to_range(&span)),
    })
}
