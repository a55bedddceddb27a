//! Completion support for MetricsQL queries.
//!
//! Suggests function names from the signature registry and keywords from the
//! highlight table, filtered by the identifier typed before the cursor.

use std::collections::BTreeSet;

use tower_lsp::lsp_types::*;

use super::context::{in_string_or_comment, prefix_at};
use crate::document::LineIndex;
use crate::highlight::{keyword_name, names_in, HighlightCategory};
use crate::settings::Settings;
use crate::types::{FunctionId, FunctionSignature, OptionalArgs};

/// Highlight categories whose tokens are offered as keywords.
const KEYWORD_CATEGORIES: [(HighlightCategory, &str); 3] = [
    (HighlightCategory::OperatorKeyword, "aggregation"),
    (HighlightCategory::Modifier, "modifier"),
    (HighlightCategory::LogicOperator, "logical operator"),
];

/// Snippet that fills in the required arguments as placeholders.
fn call_snippet(signature: &FunctionSignature, policy: OptionalArgs) -> (String, InsertTextFormat) {
    let arity = signature.arity(policy);
    if arity.max == Some(0) {
        return (format!("{}()", signature.name), InsertTextFormat::PLAIN_TEXT);
    }
    let placeholders: Vec<String> = signature
        .parameters(policy)
        .iter()
        .take(arity.min)
        .enumerate()
        .map(|(i, p)| format!("${{{}:{}}}", i + 1, p))
        .collect();
    let body = if placeholders.is_empty() {
        "$1".to_string()
    } else {
        placeholders.join(", ")
    };
    (
        format!("{}({})", signature.name, body),
        InsertTextFormat::SNIPPET,
    )
}

/// Item for a function with a modeled signature.
fn typed_function_item(signature: &FunctionSignature, policy: OptionalArgs) -> CompletionItem {
    let (insert_text, format) = call_snippet(signature, policy);
    CompletionItem {
        label: signature.name.to_string(),
        kind: Some(CompletionItemKind::FUNCTION),
        detail: Some(signature.label(policy)),
        insert_text: Some(insert_text),
        insert_text_format: Some(format),
        sort_text: Some(format!("1_{}", signature.name)),
        ..Default::default()
    }
}

/// Item for a bypassed function: no types, an empty argument placeholder.
fn bypassed_function_item(id: FunctionId) -> CompletionItem {
    CompletionItem {
        label: id.name().to_string(),
        kind: Some(CompletionItemKind::FUNCTION),
        detail: Some("argument types not modeled".to_string()),
        insert_text: Some(format!("{}($1)", id.name())),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        sort_text: Some(format!("1_{}", id.name())),
        ..Default::default()
    }
}

/// Keyword items matching `prefix`.
///
/// A token name may appear in more than one category; only its first
/// occurrence is offered.
fn keyword_items(prefix: &str) -> Vec<CompletionItem> {
    let mut seen = BTreeSet::new();
    let mut items = Vec::new();
    for (category, detail) in KEYWORD_CATEGORIES {
        for token_name in names_in(category) {
            let keyword = keyword_name(token_name);
            if !keyword.starts_with(prefix) || !seen.insert(keyword.clone()) {
                continue;
            }
            items.push(CompletionItem {
                sort_text: Some(format!("2_{}", keyword)),
                label: keyword,
                kind: Some(CompletionItemKind::KEYWORD),
                detail: Some(detail.to_string()),
                ..Default::default()
            });
        }
    }
    items
}

/// Build completion items for the cursor position.
///
/// Returns `None` when the position is out of range or the cursor sits inside
/// a string literal or comment, where neither functions nor keywords apply.
pub fn completion_at_position(
    line_index: &LineIndex,
    position: Position,
    settings: &Settings,
) -> Option<CompletionResponse> {
    let offset = line_index.position_to_offset(position)?;
    if in_string_or_comment(line_index.source(), offset) {
        return None;
    }
    let prefix = prefix_at(line_index.source(), offset).to_ascii_lowercase();
    let policy = settings.optional_args();

    let mut items: Vec<CompletionItem> = FunctionId::ALL
        .iter()
        .filter(|id| id.name().starts_with(&prefix))
        .filter_map(|id| match id.signature() {
            Some(signature) => Some(typed_function_item(signature, policy)),
            None if settings.include_bypassed() => Some(bypassed_function_item(*id)),
            None => None,
        })
        .collect();

    if settings.complete_keywords() {
        items.extend(keyword_items(&prefix));
    }

    Some(CompletionResponse::Array(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CompletionSettings;

    fn get_completions(source: &str, position: Position, settings: &Settings) -> Vec<CompletionItem> {
        let line_index = LineIndex::new(source.to_string());
        match completion_at_position(&line_index, position, settings) {
            Some(CompletionResponse::Array(items)) => items,
            _ => vec![],
        }
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn prefix_filters_functions() {
        let items = get_completions("sum(ra", Position::new(0, 6), &Settings::default());
        let names = labels(&items);
        assert!(names.contains(&"rate"), "{names:?}");
        assert!(names.contains(&"range_avg"), "{names:?}");
        assert!(!names.contains(&"irate"), "{names:?}");
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let items = get_completions("RAT", Position::new(0, 3), &Settings::default());
        assert!(labels(&items).contains(&"rate"));
    }

    #[test]
    fn typed_function_has_signature_detail_and_snippet() {
        let items = get_completions("roun", Position::new(0, 4), &Settings::default());
        let round = items.iter().find(|i| i.label == "round").unwrap();
        assert_eq!(
            round.detail.as_deref(),
            Some("round(vector, scalar?) -> vector")
        );
        assert_eq!(round.insert_text.as_deref(), Some("round(${1:vector})"));
        assert_eq!(round.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }

    #[test]
    fn zero_argument_function_inserts_plain_call() {
        let items = get_completions("pi", Position::new(0, 2), &Settings::default());
        let pi = items.iter().find(|i| i.label == "pi").unwrap();
        assert_eq!(pi.insert_text.as_deref(), Some("pi()"));
        assert_eq!(pi.insert_text_format, Some(InsertTextFormat::PLAIN_TEXT));
    }

    #[test]
    fn bypassed_functions_can_be_excluded() {
        let items = get_completions("range_", Position::new(0, 6), &Settings::default());
        let range_avg = items.iter().find(|i| i.label == "range_avg").unwrap();
        assert_eq!(
            range_avg.detail.as_deref(),
            Some("argument types not modeled")
        );

        let settings = Settings {
            completion: Some(CompletionSettings {
                include_bypassed: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let items = get_completions("range_", Position::new(0, 6), &settings);
        assert!(items.is_empty(), "{:?}", labels(&items));
    }

    #[test]
    fn keywords_from_highlight_table() {
        let items = get_completions("sum(x) by", Position::new(0, 9), &Settings::default());
        let by = items.iter().find(|i| i.label == "by").unwrap();
        assert_eq!(by.kind, Some(CompletionItemKind::KEYWORD));
        assert_eq!(by.detail.as_deref(), Some("modifier"));

        let items = get_completions("group_", Position::new(0, 6), &Settings::default());
        let names = labels(&items);
        assert!(names.contains(&"group_left"), "{names:?}");
        assert!(names.contains(&"group_right"), "{names:?}");
    }

    #[test]
    fn keywords_are_not_duplicated() {
        let items = get_completions("an", Position::new(0, 2), &Settings::default());
        let any = items.iter().filter(|i| i.label == "any").count();
        assert_eq!(any, 1);
        assert!(labels(&items).contains(&"and"));
    }

    #[test]
    fn empty_prefix_offers_everything() {
        let items = get_completions("", Position::new(0, 0), &Settings::default());
        let functions = items
            .iter()
            .filter(|i| i.kind == Some(CompletionItemKind::FUNCTION))
            .count();
        assert_eq!(functions, FunctionId::ALL.len());
    }

    #[test]
    fn no_completions_in_strings_or_comments() {
        let settings = Settings::default();
        let line_index = LineIndex::new("up{job=\"ra".to_string());
        assert!(completion_at_position(&line_index, Position::new(0, 10), &settings).is_none());

        let line_index = LineIndex::new("# ra".to_string());
        assert!(completion_at_position(&line_index, Position::new(0, 4), &settings).is_none());

        let items = get_completions("# cpu\nra", Position::new(1, 2), &settings);
        assert!(labels(&items).contains(&"rate"));
    }

    #[test]
    fn out_of_range_position() {
        let line_index = LineIndex::new("abs".to_string());
        assert!(completion_at_position(&line_index, Position::new(4, 0), &Settings::default()).is_none());
    }
}
