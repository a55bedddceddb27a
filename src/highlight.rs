//! Highlighting categories for MetricsQL grammar tokens.
//!
//! Maps the tag names the grammar produces to abstract categories. Grouped rules
//! list several space-separated names for one category.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Abstract highlighting category of a grammar token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    Comment,
    LabelName,
    String,
    Number,
    VariableName,
    Function,
    /// Aggregation operators such as `sum` or `topk`.
    OperatorKeyword,
    /// `by`, `without`, `offset` and other expression modifiers.
    Modifier,
    LogicOperator,
    Operator,
    ArithmeticOperator,
    Paren,
    SquareBracket,
    Brace,
    /// Marks a token the grammar could not parse.
    Invalid,
}

impl HighlightCategory {
    pub const ALL: [HighlightCategory; 15] = [
        HighlightCategory::Comment,
        HighlightCategory::LabelName,
        HighlightCategory::String,
        HighlightCategory::Number,
        HighlightCategory::VariableName,
        HighlightCategory::Function,
        HighlightCategory::OperatorKeyword,
        HighlightCategory::Modifier,
        HighlightCategory::LogicOperator,
        HighlightCategory::Operator,
        HighlightCategory::ArithmeticOperator,
        HighlightCategory::Paren,
        HighlightCategory::SquareBracket,
        HighlightCategory::Brace,
        HighlightCategory::Invalid,
    ];
}

static RULES: &[(&str, HighlightCategory)] = &[
    ("LineComment", HighlightCategory::Comment),
    ("LabelName", HighlightCategory::LabelName),
    ("StringLiteral", HighlightCategory::String),
    ("NumberLiteral Duration", HighlightCategory::Number),
    ("Identifier", HighlightCategory::VariableName),
    (
        concat!(
            "Abs Absent AbsentOverTime Acos Acosh Alias Asin Asinh Atan Atanh AvgOverTime ",
            "Ceil Changes Clamp ClampMax ClampMin Cos Cosh CountOverTime DaysInMonth ",
            "DayOfMonth DayOfWeek DayOfYear Deg Delta Deriv Exp Floor HistogramCount ",
            "HistogramFraction HistogramQuantile HistogramSum HoltWinters Hour Idelta ",
            "Increase Irate LabelReplace LabelJoin LastOverTime Ln Log10 Log2 MaxOverTime ",
            "MinOverTime Minute Month Pi PredictLinear PresentOverTime QuantileOverTime Rad ",
            "Rate Resets Round Scalar Sgn Sin Sinh Sort SortDesc Sqrt StddevOverTime ",
            "StdvarOverTime SumOverTime Tan Tanh Time Timestamp Vector Year AggrOverTime ",
            "AscentOverTime BitmapAnd BitmapOr BitmapXor BucketsLimit ChangesPrometheus ",
            "CountEqOverTime CountGtOverTime CountLeOverTime CountNeOverTime ",
            "DecreasesOverTime DefaultRollup DeltaPrometheus DerivFast DescentOverTime ",
            "DistinctOverTime DropCommonLabels DurationOverTime FirstOverTime ",
            "GeomeanOverTime HistogramAvg HistogramOverTime HistogramQuantiles ",
            "HistogramShare HoeffdingBoundLower HoeffdingBoundUpper Ideriv ",
            "IncreasePrometheus IncreasePure IncreasesOverTime Integrate Interpolate ",
            "KeepLastValue KeepNextValue LabelCopy LabelDel LabelGraphiteGroup LabelKeep ",
            "LabelLowercase LabelMap LabelMatch LabelMismatch LabelMove LabelSet ",
            "LabelTransform LabelUppercase LabelValue Lag Lifetime LimitOffset MadOverTime ",
            "MedianOverTime ModeOverTime Now PrometheusBuckets QuantilesOverTime Rand ",
            "RandExponential RandNormal RangeAvg RangeFirst RangeLast RangeLinearRegression ",
            "RangeMad RangeMax RangeMin RangeNormalize RangeOverTime RangeQuantile ",
            "RangeStddev RangeStdvar RangeSum RangeTrimOutliers RangeTrimSpikes ",
            "RangeTrimZscore RangeZscore RateOverSum RemoveResets Rollup RollupCandlestick ",
            "RollupDelta RollupDeriv RollupIncrease RollupRate RollupScrapeInterval ",
            "RunningAvg RunningMax RunningMin RunningSum ScrapeInterval ShareEqOverTime ",
            "ShareGtOverTime ShareLeOverTime SmoothExponential SortByLabel SortByLabelDesc ",
            "SortByLabelNumeric SortByLabelNumericDesc StaleSamplesOverTime Step ",
            "Sum2OverTime TfirstOverTime TimestampWithName TimezoneOffset ",
            "TlastChangeOverTime TlastOverTime TmaxOverTime TminOverTime Union ",
            "ZscoreOverTime AvgDaily MedianDaily AvgWeekly MedianWeekly ",
            "MedianWeeklyWithTrends HistogramStdDev HistogramStdVar"
        ),
        HighlightCategory::Function,
    ),
    (
        concat!(
            "Any Avg Bottomk Count Count_values Group Max Min Quantile Stddev Stdvar Sum ",
            "Topk BottomkAvg BottomkLast BottomkMax BottomkMedian BottomkMin Distinct ",
            "Geomean Histogram Limitk Mad Median Mode OutliersMad Outliersk Quantiles Share ",
            "Sum2 TopkAvg TopkLast TopkMax TopkMedian TopkMin Zscore"
        ),
        HighlightCategory::OperatorKeyword,
    ),
    (
        "By Without Bool On Ignoring GroupLeft GroupRight Offset Start End",
        HighlightCategory::Modifier,
    ),
    ("And Unless Or", HighlightCategory::LogicOperator),
    (
        "Sub Add Mul Mod Div Atan2 Eql Neq Lte Lss Gte Gtr EqlRegex EqlSingle NeqRegex Pow At",
        HighlightCategory::Operator,
    ),
    ("UnaryOp", HighlightCategory::ArithmeticOperator),
    ("( )", HighlightCategory::Paren),
    ("[ ]", HighlightCategory::SquareBracket),
    ("{ }", HighlightCategory::Brace),
    ("⚠", HighlightCategory::Invalid),
];

static BY_NAME: LazyLock<HashMap<&'static str, HighlightCategory>> = LazyLock::new(|| {
    RULES
        .iter()
        .flat_map(|(names, category)| names.split_whitespace().map(move |n| (n, *category)))
        .collect()
});

/// Get the highlighting category for a grammar token name.
///
/// Returns `None` for names that are deliberately left unstyled.
pub fn classify(token_name: &str) -> Option<HighlightCategory> {
    BY_NAME.get(token_name).copied()
}

/// The grouped rule table, in declaration order.
pub fn rules() -> &'static [(&'static str, HighlightCategory)] {
    RULES
}

/// Every token name assigned to `category`.
pub fn names_in(category: HighlightCategory) -> impl Iterator<Item = &'static str> {
    RULES
        .iter()
        .filter(move |(_, c)| *c == category)
        .flat_map(|(names, _)| names.split_whitespace())
}

/// Source spelling of a keyword token: `GroupLeft` becomes `group_left`.
pub fn keyword_name(token_name: &str) -> String {
    let mut out = String::with_capacity(token_name.len() + 4);
    let mut prev = None;
    for c in token_name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p: char| p != '_') {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}
