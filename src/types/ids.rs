//! Function tokens of the MetricsQL grammar.
//!
//! The grammar assigns one token per recognized function name. `FunctionId`
//! mirrors that closed set; the discriminant is the token id.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Integer token identifier assigned by the grammar.
pub type TokenId = u16;

macro_rules! function_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// A function token recognized by the MetricsQL grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum FunctionId {
            $($variant,)*
        }

        impl FunctionId {
            /// Every function token, in token id order.
            pub const ALL: &'static [FunctionId] = &[$(FunctionId::$variant,)*];

            /// Grammar tag name, e.g. `LabelJoin`.
            pub fn token_name(self) -> &'static str {
                match self {
                    $(FunctionId::$variant => stringify!($variant),)*
                }
            }

            /// Function name as written in queries, e.g. `label_join`.
            pub fn name(self) -> &'static str {
                match self {
                    $(FunctionId::$variant => $name,)*
                }
            }
        }
    };
}

function_ids! {
    Abs => "abs",
    Absent => "absent",
    AbsentOverTime => "absent_over_time",
    Acos => "acos",
    Acosh => "acosh",
    AggrOverTime => "aggr_over_time",
    Alias => "alias",
    AscentOverTime => "ascent_over_time",
    Asin => "asin",
    Asinh => "asinh",
    Atan => "atan",
    Atanh => "atanh",
    AvgDaily => "avg_daily",
    AvgOverTime => "avg_over_time",
    AvgWeekly => "avg_weekly",
    BitmapAnd => "bitmap_and",
    BitmapOr => "bitmap_or",
    BitmapXor => "bitmap_xor",
    BucketsLimit => "buckets_limit",
    Ceil => "ceil",
    Changes => "changes",
    ChangesPrometheus => "changes_prometheus",
    Clamp => "clamp",
    ClampMax => "clamp_max",
    ClampMin => "clamp_min",
    Cos => "cos",
    Cosh => "cosh",
    CountEqOverTime => "count_eq_over_time",
    CountGtOverTime => "count_gt_over_time",
    CountLeOverTime => "count_le_over_time",
    CountNeOverTime => "count_ne_over_time",
    CountOverTime => "count_over_time",
    DayOfMonth => "day_of_month",
    DayOfWeek => "day_of_week",
    DayOfYear => "day_of_year",
    DaysInMonth => "days_in_month",
    DecreasesOverTime => "decreases_over_time",
    DefaultRollup => "default_rollup",
    Deg => "deg",
    Delta => "delta",
    DeltaPrometheus => "delta_prometheus",
    Deriv => "deriv",
    DerivFast => "deriv_fast",
    DescentOverTime => "descent_over_time",
    DistinctOverTime => "distinct_over_time",
    DropCommonLabels => "drop_common_labels",
    DurationOverTime => "duration_over_time",
    Exp => "exp",
    FirstOverTime => "first_over_time",
    Floor => "floor",
    GeomeanOverTime => "geomean_over_time",
    HistogramAvg => "histogram_avg",
    HistogramCount => "histogram_count",
    HistogramFraction => "histogram_fraction",
    HistogramOverTime => "histogram_over_time",
    HistogramQuantile => "histogram_quantile",
    HistogramQuantiles => "histogram_quantiles",
    HistogramShare => "histogram_share",
    HistogramStdDev => "histogram_stddev",
    HistogramStdVar => "histogram_stdvar",
    HistogramSum => "histogram_sum",
    HoeffdingBoundLower => "hoeffding_bound_lower",
    HoeffdingBoundUpper => "hoeffding_bound_upper",
    HoltWinters => "holt_winters",
    Hour => "hour",
    Idelta => "idelta",
    Ideriv => "ideriv",
    Increase => "increase",
    IncreasePrometheus => "increase_prometheus",
    IncreasePure => "increase_pure",
    IncreasesOverTime => "increases_over_time",
    Integrate => "integrate",
    Interpolate => "interpolate",
    Irate => "irate",
    KeepLastValue => "keep_last_value",
    KeepNextValue => "keep_next_value",
    LabelCopy => "label_copy",
    LabelDel => "label_del",
    LabelGraphiteGroup => "label_graphite_group",
    LabelJoin => "label_join",
    LabelKeep => "label_keep",
    LabelLowercase => "label_lowercase",
    LabelMap => "label_map",
    LabelMatch => "label_match",
    LabelMismatch => "label_mismatch",
    LabelMove => "label_move",
    LabelReplace => "label_replace",
    LabelSet => "label_set",
    LabelTransform => "label_transform",
    LabelUppercase => "label_uppercase",
    LabelValue => "label_value",
    Lag => "lag",
    LastOverTime => "last_over_time",
    Lifetime => "lifetime",
    LimitOffset => "limit_offset",
    Ln => "ln",
    Log10 => "log10",
    Log2 => "log2",
    MadOverTime => "mad_over_time",
    MaxOverTime => "max_over_time",
    MedianDaily => "median_daily",
    MedianOverTime => "median_over_time",
    MedianWeekly => "median_weekly",
    MedianWeeklyWithTrends => "median_weekly_with_trends",
    MinOverTime => "min_over_time",
    Minute => "minute",
    ModeOverTime => "mode_over_time",
    Month => "month",
    Now => "now",
    Pi => "pi",
    PredictLinear => "predict_linear",
    PresentOverTime => "present_over_time",
    PrometheusBuckets => "prometheus_buckets",
    QuantileOverTime => "quantile_over_time",
    QuantilesOverTime => "quantiles_over_time",
    Rad => "rad",
    Rand => "rand",
    RandExponential => "rand_exponential",
    RandNormal => "rand_normal",
    RangeAvg => "range_avg",
    RangeFirst => "range_first",
    RangeLast => "range_last",
    RangeLinearRegression => "range_linear_regression",
    RangeMad => "range_mad",
    RangeMax => "range_max",
    RangeMin => "range_min",
    RangeNormalize => "range_normalize",
    RangeOverTime => "range_over_time",
    RangeQuantile => "range_quantile",
    RangeStddev => "range_stddev",
    RangeStdvar => "range_stdvar",
    RangeSum => "range_sum",
    RangeTrimOutliers => "range_trim_outliers",
    RangeTrimSpikes => "range_trim_spikes",
    RangeTrimZscore => "range_trim_zscore",
    RangeZscore => "range_zscore",
    Rate => "rate",
    RateOverSum => "rate_over_sum",
    RemoveResets => "remove_resets",
    Resets => "resets",
    Rollup => "rollup",
    RollupCandlestick => "rollup_candlestick",
    RollupDelta => "rollup_delta",
    RollupDeriv => "rollup_deriv",
    RollupIncrease => "rollup_increase",
    RollupRate => "rollup_rate",
    RollupScrapeInterval => "rollup_scrape_interval",
    Round => "round",
    RunningAvg => "running_avg",
    RunningMax => "running_max",
    RunningMin => "running_min",
    RunningSum => "running_sum",
    Scalar => "scalar",
    ScrapeInterval => "scrape_interval",
    Sgn => "sgn",
    ShareEqOverTime => "share_eq_over_time",
    ShareGtOverTime => "share_gt_over_time",
    ShareLeOverTime => "share_le_over_time",
    Sin => "sin",
    Sinh => "sinh",
    SmoothExponential => "smooth_exponential",
    Sort => "sort",
    SortByLabel => "sort_by_label",
    SortByLabelDesc => "sort_by_label_desc",
    SortByLabelNumeric => "sort_by_label_numeric",
    SortByLabelNumericDesc => "sort_by_label_numeric_desc",
    SortDesc => "sort_desc",
    Sqrt => "sqrt",
    StaleSamplesOverTime => "stale_samples_over_time",
    StddevOverTime => "stddev_over_time",
    StdvarOverTime => "stdvar_over_time",
    Step => "step",
    Sum2OverTime => "sum2_over_time",
    SumOverTime => "sum_over_time",
    Tan => "tan",
    Tanh => "tanh",
    TfirstOverTime => "tfirst_over_time",
    Time => "time",
    Timestamp => "timestamp",
    TimestampWithName => "timestamp_with_name",
    TimezoneOffset => "timezone_offset",
    TlastChangeOverTime => "tlast_change_over_time",
    TlastOverTime => "tlast_over_time",
    TmaxOverTime => "tmax_over_time",
    TminOverTime => "tmin_over_time",
    Union => "union",
    Vector => "vector",
    Year => "year",
    ZscoreOverTime => "zscore_over_time",
}

static BY_TOKEN_NAME: LazyLock<HashMap<&'static str, FunctionId>> = LazyLock::new(|| {
    FunctionId::ALL
        .iter()
        .map(|id| (id.token_name(), *id))
        .collect()
});

static BY_NAME: LazyLock<HashMap<&'static str, FunctionId>> =
    LazyLock::new(|| FunctionId::ALL.iter().map(|id| (id.name(), *id)).collect());

impl FunctionId {
    /// The grammar's integer id for this token.
    pub fn token_id(self) -> TokenId {
        self as TokenId
    }

    /// Returns `None` for ids outside the function token range.
    pub fn from_token_id(id: TokenId) -> Option<FunctionId> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Look up by grammar tag name (`"LabelJoin"`). Case-sensitive.
    pub fn from_token_name(token_name: &str) -> Option<FunctionId> {
        BY_TOKEN_NAME.get(token_name).copied()
    }

    /// Look up a function by its query name. MetricsQL function names are
    /// case-insensitive.
    pub fn from_name(name: &str) -> Option<FunctionId> {
        BY_NAME.get(name.to_ascii_lowercase().as_str()).copied()
    }
}
