use std::path::PathBuf;

use expect_test::expect;
use metricsql_lsp::{
    check_call, completion_at_position, discover_settings, hover_at_position, is_bypassed,
    legend, load_settings, lookup_signature, signature_by_name, signature_help_at_position,
    tokens_for_spans, FunctionId, LineIndex, OptionalArgs, Settings, ValueType,
};
use tower_lsp::lsp_types::{
    CompletionResponse, HoverContents, ParameterLabel, Position, SemanticToken,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fixture_settings(name: &str) -> Settings {
    load_settings(&fixture_dir(name).join("metricsql.toml"))
}

/// Position just past the last character of a one-line query.
fn end_of(source: &str) -> Position {
    Position::new(0, source.len() as u32)
}

/// One line per item: `label | detail | insert text`.
fn render_completions(source: &str, settings: &Settings) -> String {
    let line_index = LineIndex::new(source.to_string());
    let items = match completion_at_position(&line_index, end_of(source), settings) {
        Some(CompletionResponse::Array(items)) => items,
        _ => vec![],
    };
    if items.is_empty() {
        return "(no completions)\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        out.push_str(&item.label);
        if let Some(detail) = &item.detail {
            out.push_str(" | ");
            out.push_str(detail);
        }
        if let Some(insert) = &item.insert_text {
            out.push_str(" | ");
            out.push_str(insert);
        }
        out.push('\n');
    }
    out
}

fn render_hover(source: &str, character: u32, policy: OptionalArgs) -> String {
    let line_index = LineIndex::new(source.to_string());
    match hover_at_position(&line_index, Position::new(0, character), policy) {
        Some(hover) => match hover.contents {
            HoverContents::Markup(markup) => format!("{}\n", markup.value),
            other => format!("{:?}\n", other),
        },
        None => "(no hover)\n".to_string(),
    }
}

fn render_signature_help(source: &str, policy: OptionalArgs) -> String {
    let line_index = LineIndex::new(source.to_string());
    let Some(help) = signature_help_at_position(&line_index, end_of(source), policy) else {
        return "(no signature help)\n".to_string();
    };
    let info = &help.signatures[0];
    let active = help.active_parameter.map(|index| {
        let params = info.parameters.as_deref().unwrap_or_default();
        match &params[index as usize].label {
            ParameterLabel::LabelOffsets([start, end]) => {
                format!("{} ({})", index, &info.label[*start as usize..*end as usize])
            }
            ParameterLabel::Simple(s) => format!("{} ({})", index, s),
        }
    });
    format!(
        "{}\nactive: {}\n",
        info.label,
        active.unwrap_or_else(|| "none".to_string())
    )
}

/// Decode delta-encoded tokens to `line:col length type` lines.
fn render_tokens(tokens: &[SemanticToken]) -> String {
    let legend = legend();
    let mut out = String::new();
    let (mut line, mut col) = (0, 0);
    for token in tokens {
        if token.delta_line > 0 {
            line += token.delta_line;
            col = token.delta_start;
        } else {
            col += token.delta_start;
        }
        out.push_str(&format!(
            "{}:{} {} {}\n",
            line,
            col,
            token.length,
            legend.token_types[token.token_type as usize].as_str()
        ));
    }
    out
}

fn render_check(name: &str, args: &[ValueType], policy: OptionalArgs) -> String {
    let Some(signature) = signature_by_name(name) else {
        return format!("{name}: no signature\n");
    };
    let errors = check_call(signature, args, policy);
    if errors.is_empty() {
        return "OK\n".to_string();
    }
    errors.iter().map(|e| format!("{e}\n")).collect()
}

// ---------------------------------------------------------------------------
// Tests — registry
// ---------------------------------------------------------------------------

#[test]
fn lookup_by_token_id() {
    let label_join = lookup_signature(FunctionId::LabelJoin.token_id()).unwrap();
    assert_eq!(label_join.name, "label_join");
    assert_eq!(label_join.variadic.raw(), -1);

    assert!(lookup_signature(FunctionId::RangeAvg.token_id()).is_none());
    assert!(is_bypassed(FunctionId::RangeAvg.token_id()));
    assert!(!is_bypassed(FunctionId::Abs.token_id()));

    assert!(lookup_signature(u16::MAX).is_none());
    assert!(!is_bypassed(u16::MAX));
}

#[test]
fn every_function_token_is_typed_or_bypassed() {
    for id in FunctionId::ALL {
        let typed = lookup_signature(id.token_id()).is_some();
        assert_ne!(typed, is_bypassed(id.token_id()), "{}", id.name());
    }
}

#[test]
fn call_checking() {
    use ValueType::{Matrix, Scalar, String, Vector};

    expect![[r#"
        OK
    "#]]
    .assert_eq(&render_check("abs", &[Vector], OptionalArgs::default()));

    expect![[r#"
        abs expects at most 1 argument(s), got 2
    "#]]
    .assert_eq(&render_check("abs", &[Vector, Vector], OptionalArgs::default()));

    expect![[r#"
        argument 1 of rate must be matrix, got vector
    "#]]
    .assert_eq(&render_check("rate", &[Vector], OptionalArgs::default()));

    expect![[r#"
        OK
    "#]]
    .assert_eq(&render_check(
        "label_join",
        &[Vector, String, String, String, String, String],
        OptionalArgs::default(),
    ));

    expect![[r#"
        round expects at least 2 argument(s), got 1
    "#]]
    .assert_eq(&render_check("round", &[Vector], OptionalArgs::Appended));

    expect![[r#"
        OK
    "#]]
    .assert_eq(&render_check(
        "round",
        &[Vector, Scalar, Scalar],
        OptionalArgs::Appended,
    ));

    expect![[r#"
        clamp expects at least 3 argument(s), got 1
        argument 1 of clamp must be vector, got matrix
    "#]]
    .assert_eq(&render_check("clamp", &[Matrix], OptionalArgs::default()));
}

// ---------------------------------------------------------------------------
// Tests — completion
// ---------------------------------------------------------------------------

#[test]
fn complete_histogram_functions() {
    let actual = render_completions("sum(histogram_", &Settings::default());
    expect![[r#"
        histogram_avg | histogram_avg(vector) -> vector | histogram_avg(${1:vector})
        histogram_count | histogram_count(vector) -> vector | histogram_count(${1:vector})
        histogram_fraction | histogram_fraction(scalar, scalar, vector) -> vector | histogram_fraction(${1:scalar}, ${2:scalar}, ${3:vector})
        histogram_over_time | histogram_over_time(matrix) -> vector | histogram_over_time(${1:matrix})
        histogram_quantile | histogram_quantile(scalar, vector) -> vector | histogram_quantile(${1:scalar}, ${2:vector})
        histogram_quantiles | argument types not modeled | histogram_quantiles($1)
        histogram_share | histogram_share(scalar, vector) -> vector | histogram_share(${1:scalar}, ${2:vector})
        histogram_stddev | histogram_stddev(vector) -> vector | histogram_stddev(${1:vector})
        histogram_stdvar | histogram_stdvar(vector) -> vector | histogram_stdvar(${1:vector})
        histogram_sum | histogram_sum(vector) -> vector | histogram_sum(${1:vector})
    "#]]
    .assert_eq(&actual);
}

#[test]
fn complete_keywords() {
    let actual = render_completions("sum(x) o", &Settings::default());
    expect![[r#"
        outliers_mad | aggregation
        outliersk | aggregation
        on | modifier
        offset | modifier
        or | logical operator
    "#]]
    .assert_eq(&actual);
}

#[test]
fn no_completions_inside_label_values_or_comments() {
    expect![[r#"
        (no completions)
    "#]]
    .assert_eq(&render_completions("up{job=\"ra", &Settings::default()));

    expect![[r#"
        (no completions)
    "#]]
    .assert_eq(&render_completions("# ra", &Settings::default()));
}

#[test]
fn complete_with_minimal_settings() {
    let settings = fixture_settings("minimal");

    expect![[r#"
        rate | rate(matrix) -> vector | rate(${1:matrix})
    "#]]
    .assert_eq(&render_completions("rate", &settings));

    expect![[r#"
        (no completions)
    "#]]
    .assert_eq(&render_completions("range_", &settings));

    expect![[r#"
        (no completions)
    "#]]
    .assert_eq(&render_completions("sum(x) o", &settings));
}

#[test]
fn complete_with_appended_optional_args() {
    let settings = fixture_settings("appended");
    expect![[r#"
        round | round(vector, scalar, scalar?) -> vector | round(${1:vector}, ${2:scalar})
    "#]]
    .assert_eq(&render_completions("roun", &settings));
}

// ---------------------------------------------------------------------------
// Tests — hover
// ---------------------------------------------------------------------------

#[test]
fn hover_typed_function() {
    expect![[r#"
        **round** `round(vector, scalar?) -> vector`

        Takes 1 to 2 arguments.
    "#]]
    .assert_eq(&render_hover("round(x, 2)", 2, OptionalArgs::TrailingDeclared));

    expect![[r#"
        **round** `round(vector, scalar, scalar?) -> vector`

        Takes 2 to 3 arguments.
    "#]]
    .assert_eq(&render_hover("round(x, 2)", 2, OptionalArgs::Appended));
}

#[test]
fn hover_bypassed_and_unknown() {
    expect![[r#"
        **alias**

        Argument and return types are not modeled for this function.
    "#]]
    .assert_eq(&render_hover("alias(up, \"x\")", 1, OptionalArgs::default()));

    expect![[r#"
        (no hover)
    "#]]
    .assert_eq(&render_hover("my_metric(x)", 1, OptionalArgs::default()));
}

// ---------------------------------------------------------------------------
// Tests — signature help
// ---------------------------------------------------------------------------

#[test]
fn signature_help_tracks_argument() {
    expect![[r#"
        label_replace(vector, string, string, string, string) -> vector
        active: 2 (string)
    "#]]
    .assert_eq(&render_signature_help(
        "label_replace(up, \"dst\", ",
        OptionalArgs::default(),
    ));

    expect![[r#"
        quantile_over_time(scalar, matrix) -> vector
        active: 1 (matrix)
    "#]]
    .assert_eq(&render_signature_help(
        "sum(quantile_over_time(0.9, x{job=\"a\", env=\"b\"}",
        OptionalArgs::default(),
    ));

    expect![[r#"
        hour(vector, vector?) -> vector
        active: 0 (vector)
    "#]]
    .assert_eq(&render_signature_help("hour(", OptionalArgs::Appended));
}

#[test]
fn signature_help_outside_calls() {
    expect![[r#"
        (no signature help)
    "#]]
    .assert_eq(&render_signature_help(
        "rate(x[5m]) + ",
        OptionalArgs::default(),
    ));
}

// ---------------------------------------------------------------------------
// Tests — semantic tokens
// ---------------------------------------------------------------------------

#[test]
fn tokens_for_grammar_spans() {
    let source = "rate(x[5m]) # per second";
    let line_index = LineIndex::new(source.to_string());
    let spans = [
        (0..4, "Rate"),
        (4..5, "("),
        (5..6, "Identifier"),
        (6..7, "["),
        (7..9, "Duration"),
        (9..10, "]"),
        (10..11, ")"),
        (12..24, "LineComment"),
        (0..11, "FunctionCall"),
    ];
    let actual = render_tokens(&tokens_for_spans(&line_index, &spans));
    expect![[r#"
        0:0 4 function
        0:4 1 punctuation
        0:5 1 variable
        0:6 1 punctuation
        0:7 2 number
        0:9 1 punctuation
        0:10 1 punctuation
        0:12 12 comment
    "#]]
    .assert_eq(&actual);
}

// ---------------------------------------------------------------------------
// Tests — settings discovery
// ---------------------------------------------------------------------------

/// Discovering from a subdirectory finds the fixture's metricsql.toml above it.
#[test]
fn discover_settings_from_query_directory() {
    let fixture_path = fixture_dir("appended");
    let child = fixture_path.join("queries");
    std::fs::create_dir_all(&child).ok();

    let (settings, settings_dir) = discover_settings(&child);
    assert_eq!(settings_dir, fixture_path);
    assert_eq!(settings.optional_args(), OptionalArgs::Appended);

    let _ = std::fs::remove_dir(&child);
}
