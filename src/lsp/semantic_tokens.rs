//! Semantic tokens for MetricsQL syntax highlighting.
//!
//! The server has no tokenizer, so spans come from the caller's grammar: each is
//! a byte range with the grammar tag name that produced it.

use std::ops::Range;

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

use crate::document::LineIndex;
use crate::highlight::{classify, HighlightCategory};

/// Token type indices (must match `legend` order).
pub mod token_types {
    pub const COMMENT: u32 = 0;
    pub const PROPERTY: u32 = 1;
    pub const STRING: u32 = 2;
    pub const NUMBER: u32 = 3;
    pub const VARIABLE: u32 = 4;
    pub const FUNCTION: u32 = 5;
    pub const KEYWORD: u32 = 6;
    pub const MODIFIER: u32 = 7;
    pub const OPERATOR: u32 = 8;
    pub const PUNCTUATION: u32 = 9;
    pub const INVALID: u32 = 10;
}

/// Get the semantic tokens legend for capability declaration.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::COMMENT,
            SemanticTokenType::PROPERTY,
            SemanticTokenType::STRING,
            SemanticTokenType::NUMBER,
            SemanticTokenType::VARIABLE,
            SemanticTokenType::FUNCTION,
            SemanticTokenType::KEYWORD,
            SemanticTokenType::MODIFIER,
            SemanticTokenType::OPERATOR,
            SemanticTokenType::new("punctuation"),
            SemanticTokenType::new("invalid"),
        ],
        token_modifiers: vec![],
    }
}

/// Legend index for a highlight category.
pub fn token_type(category: HighlightCategory) -> u32 {
    match category {
        HighlightCategory::Comment => token_types::COMMENT,
        HighlightCategory::LabelName => token_types::PROPERTY,
        HighlightCategory::String => token_types::STRING,
        HighlightCategory::Number => token_types::NUMBER,
        HighlightCategory::VariableName => token_types::VARIABLE,
        HighlightCategory::Function => token_types::FUNCTION,
        HighlightCategory::OperatorKeyword | HighlightCategory::LogicOperator => {
            token_types::KEYWORD
        }
        HighlightCategory::Modifier => token_types::MODIFIER,
        HighlightCategory::Operator | HighlightCategory::ArithmeticOperator => {
            token_types::OPERATOR
        }
        HighlightCategory::Paren | HighlightCategory::SquareBracket | HighlightCategory::Brace => {
            token_types::PUNCTUATION
        }
        HighlightCategory::Invalid => token_types::INVALID,
    }
}

/// Classify grammar spans and delta-encode them.
///
/// Spans whose tag name has no category are dropped. Spans may come in any order.
pub fn tokens_for_spans(
    line_index: &LineIndex,
    spans: &[(Range<usize>, &str)],
) -> Vec<SemanticToken> {
    let mut classified: Vec<(Range<usize>, u32)> = spans
        .iter()
        .filter(|(span, _)| span.start < span.end && span.end <= line_index.source().len())
        .filter_map(|(span, tag)| classify(tag).map(|c| (span.clone(), token_type(c))))
        .collect();
    classified.sort_by_key(|(span, _)| span.start);

    let mut result = Vec::with_capacity(classified.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for (span, token_type) in classified {
        let start = line_index.offset_to_position(span.start);
        let end = line_index.offset_to_position(span.end);
        let delta_line = start.line - prev_line;
        let delta_start = if delta_line == 0 {
            start.character - prev_start
        } else {
            start.character
        };
        // Tokens may not span lines; a multi-line span keeps its first line.
        let length = if end.line == start.line {
            end.character - start.character
        } else {
            let line_end = line_index
                .line(start.line as usize)
                .map_or(span.end, |(line_start, text)| line_start + text.len());
            line_index.offset_to_position(line_end).character - start.character
        };

        result.push(SemanticToken {
            delta_line,
            delta_start,
            length,
            token_type,
            token_modifiers_bitset: 0,
        });

        prev_line = start.line;
        prev_start = start.character;
    }

    result
}
