//! MetricsQL function signatures and the set of bypassed functions.
//!
//! Every grammar function token is either typed or bypassed. `coverage` matches
//! exhaustively on `FunctionId`, so a new token does not compile until it is
//! assigned to one of the two.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::function::FunctionSignature;
use super::function::Variadic::{self, Fixed, Optional, Unbounded};
use super::ids::{FunctionId, TokenId};
use super::value::ValueType::{self, Matrix, Scalar, String as Str, Vector};

use FunctionId as F;

enum Coverage {
    Typed(FunctionSignature),
    /// Recognized by the grammar, argument and return types not modeled.
    Bypassed,
}

fn typed(
    name: &'static str,
    arg_types: &'static [ValueType],
    variadic: Variadic,
    return_type: ValueType,
) -> Coverage {
    Coverage::Typed(FunctionSignature::new(name, arg_types, variadic, return_type))
}

fn coverage(id: FunctionId) -> Coverage {
    match id {
        F::Abs => typed("abs", &[Vector], Fixed, Vector),
        F::Absent => typed("absent", &[Vector], Fixed, Vector),
        F::AbsentOverTime => typed("absent_over_time", &[Matrix], Fixed, Vector),
        F::Acos => typed("acos", &[Vector], Fixed, Vector),
        F::Acosh => typed("acosh", &[Vector], Fixed, Vector),
        // The first argument may also name several rollups.
        F::AggrOverTime => typed("aggr_over_time", &[Str, Matrix], Unbounded, Vector),
        F::AscentOverTime => typed("ascent_over_time", &[Matrix], Fixed, Vector),
        F::Asin => typed("asin", &[Vector], Fixed, Vector),
        F::Asinh => typed("asinh", &[Vector], Fixed, Vector),
        F::Atan => typed("atan", &[Vector], Fixed, Vector),
        F::Atanh => typed("atanh", &[Vector], Fixed, Vector),
        F::AvgDaily => typed("avg_daily", &[Scalar, Vector], Fixed, Vector),
        F::AvgOverTime => typed("avg_over_time", &[Matrix], Fixed, Vector),
        F::AvgWeekly => typed("avg_weekly", &[Scalar, Vector], Fixed, Vector),
        F::BitmapAnd => typed("bitmap_and", &[Vector, Scalar], Fixed, Vector),
        F::BitmapOr => typed("bitmap_or", &[Vector, Scalar], Fixed, Vector),
        F::BitmapXor => typed("bitmap_xor", &[Vector, Scalar], Fixed, Vector),
        F::BucketsLimit => typed("buckets_limit", &[Scalar, Vector], Fixed, Vector),
        F::Ceil => typed("ceil", &[Vector], Fixed, Vector),
        F::Changes => typed("changes", &[Matrix], Fixed, Vector),
        F::ChangesPrometheus => typed("changes_prometheus", &[Matrix], Fixed, Vector),
        F::Clamp => typed("clamp", &[Vector, Scalar, Scalar], Fixed, Vector),
        F::ClampMax => typed("clamp_max", &[Vector, Scalar], Fixed, Vector),
        F::ClampMin => typed("clamp_min", &[Vector, Scalar], Fixed, Vector),
        F::Cos => typed("cos", &[Vector], Fixed, Vector),
        F::Cosh => typed("cosh", &[Vector], Fixed, Vector),
        F::CountEqOverTime => typed("count_eq_over_time", &[Matrix, Scalar], Fixed, Vector),
        F::CountGtOverTime => typed("count_gt_over_time", &[Matrix, Scalar], Fixed, Vector),
        F::CountLeOverTime => typed("count_le_over_time", &[Matrix, Scalar], Fixed, Vector),
        F::CountNeOverTime => typed("count_ne_over_time", &[Matrix, Scalar], Fixed, Vector),
        F::CountOverTime => typed("count_over_time", &[Matrix], Fixed, Vector),
        F::DayOfMonth => typed("day_of_month", &[Vector], Optional(1), Vector),
        F::DayOfWeek => typed("day_of_week", &[Vector], Optional(1), Vector),
        F::DayOfYear => typed("day_of_year", &[Vector], Optional(1), Vector),
        F::DaysInMonth => typed("days_in_month", &[Vector], Optional(1), Vector),
        F::DecreasesOverTime => typed("decreases_over_time", &[Matrix], Fixed, Vector),
        F::DefaultRollup => typed("default_rollup", &[Matrix], Fixed, Vector),
        F::Deg => typed("deg", &[Vector], Fixed, Vector),
        F::Delta => typed("delta", &[Matrix], Fixed, Vector),
        F::DeltaPrometheus => typed("delta_prometheus", &[Matrix], Fixed, Vector),
        F::Deriv => typed("deriv", &[Matrix], Fixed, Vector),
        F::DerivFast => typed("deriv_fast", &[Matrix], Fixed, Vector),
        F::DescentOverTime => typed("descent_over_time", &[Matrix], Fixed, Vector),
        F::DistinctOverTime => typed("distinct_over_time", &[Matrix], Fixed, Vector),
        F::DropCommonLabels => typed("drop_common_labels", &[Vector, Str], Unbounded, Vector),
        F::DurationOverTime => typed("duration_over_time", &[Matrix, Scalar], Fixed, Vector),
        F::Exp => typed("exp", &[Vector], Fixed, Vector),
        F::FirstOverTime => typed("first_over_time", &[Matrix], Fixed, Vector),
        F::Floor => typed("floor", &[Vector], Fixed, Vector),
        F::GeomeanOverTime => typed("geomean_over_time", &[Matrix], Fixed, Vector),
        F::HistogramAvg => typed("histogram_avg", &[Vector], Fixed, Vector),
        F::HistogramCount => typed("histogram_count", &[Vector], Fixed, Vector),
        F::HistogramFraction => typed("histogram_fraction", &[Scalar, Scalar, Vector], Fixed, Vector),
        F::HistogramOverTime => typed("histogram_over_time", &[Matrix], Fixed, Vector),
        F::HistogramQuantile => typed("histogram_quantile", &[Scalar, Vector], Fixed, Vector),
        F::HistogramShare => typed("histogram_share", &[Scalar, Vector], Fixed, Vector),
        F::HistogramStdDev => typed("histogram_stddev", &[Vector], Fixed, Vector),
        F::HistogramStdVar => typed("histogram_stdvar", &[Vector], Fixed, Vector),
        F::HistogramSum => typed("histogram_sum", &[Vector], Fixed, Vector),
        F::HoeffdingBoundLower => typed("hoeffding_bound_lower", &[Scalar, Matrix], Fixed, Vector),
        F::HoeffdingBoundUpper => typed("hoeffding_bound_upper", &[Scalar, Matrix], Fixed, Vector),
        F::HoltWinters => typed("holt_winters", &[Matrix, Scalar, Scalar], Fixed, Vector),
        F::Hour => typed("hour", &[Vector], Optional(1), Vector),
        F::Idelta => typed("idelta", &[Matrix], Fixed, Vector),
        F::Ideriv => typed("ideriv", &[Matrix], Fixed, Vector),
        F::Increase => typed("increase", &[Matrix], Fixed, Vector),
        F::IncreasePrometheus => typed("increase_prometheus", &[Matrix], Fixed, Vector),
        F::IncreasePure => typed("increase_pure", &[Matrix], Fixed, Vector),
        F::IncreasesOverTime => typed("increases_over_time", &[Matrix], Fixed, Vector),
        F::Irate => typed("irate", &[Matrix], Fixed, Vector),
        F::LabelJoin => typed("label_join", &[Vector, Str, Str, Str], Unbounded, Vector),
        F::LabelMove => typed("label_move", &[Vector, Str], Unbounded, Vector),
        F::LabelReplace => typed("label_replace", &[Vector, Str, Str, Str, Str], Fixed, Vector),
        F::LabelSet => typed("label_set", &[Vector, Str], Unbounded, Vector),
        F::LastOverTime => typed("last_over_time", &[Matrix], Fixed, Vector),
        F::Ln => typed("ln", &[Vector], Fixed, Vector),
        F::Log10 => typed("log10", &[Vector], Fixed, Vector),
        F::Log2 => typed("log2", &[Vector], Fixed, Vector),
        F::MaxOverTime => typed("max_over_time", &[Matrix], Fixed, Vector),
        F::MedianDaily => typed("median_daily", &[Scalar, Vector], Fixed, Vector),
        F::MedianWeekly => typed("median_weekly", &[Scalar, Vector], Fixed, Vector),
        F::MedianWeeklyWithTrends => typed("median_weekly_with_trends", &[Scalar, Vector], Fixed, Vector),
        F::MinOverTime => typed("min_over_time", &[Matrix], Fixed, Vector),
        F::Minute => typed("minute", &[Vector], Optional(1), Vector),
        F::Month => typed("month", &[Vector], Optional(1), Vector),
        F::Now => typed("now", &[], Fixed, Scalar),
        F::Pi => typed("pi", &[], Fixed, Vector),
        F::PredictLinear => typed("predict_linear", &[Matrix, Scalar], Fixed, Vector),
        F::PresentOverTime => typed("present_over_time", &[Matrix], Fixed, Vector),
        F::QuantileOverTime => typed("quantile_over_time", &[Scalar, Matrix], Fixed, Vector),
        F::Rad => typed("rad", &[Vector], Fixed, Vector),
        F::Rand => typed("rand", &[Scalar], Optional(1), Vector),
        F::Rate => typed("rate", &[Matrix], Fixed, Vector),
        F::Resets => typed("resets", &[Matrix], Fixed, Vector),
        F::Round => typed("round", &[Vector, Scalar], Optional(1), Vector),
        F::Scalar => typed("scalar", &[Vector], Fixed, Scalar),
        F::Sgn => typed("sgn", &[Vector], Fixed, Vector),
        F::Sin => typed("sin", &[Vector], Fixed, Vector),
        F::Sinh => typed("sinh", &[Vector], Fixed, Vector),
        F::Sort => typed("sort", &[Vector], Fixed, Vector),
        F::SortDesc => typed("sort_desc", &[Vector], Fixed, Vector),
        F::Sqrt => typed("sqrt", &[Vector], Fixed, Vector),
        F::StddevOverTime => typed("stddev_over_time", &[Matrix], Fixed, Vector),
        F::StdvarOverTime => typed("stdvar_over_time", &[Matrix], Fixed, Vector),
        F::SumOverTime => typed("sum_over_time", &[Matrix], Fixed, Vector),
        F::Tan => typed("tan", &[Vector], Fixed, Vector),
        F::Tanh => typed("tanh", &[Vector], Fixed, Vector),
        F::Time => typed("time", &[], Fixed, Vector),
        F::Timestamp => typed("timestamp", &[Vector], Fixed, Vector),
        F::Vector => typed("vector", &[Scalar], Fixed, Vector),
        F::Year => typed("year", &[Vector], Optional(1), Vector),
        F::Alias
        | F::HistogramQuantiles
        | F::Integrate
        | F::Interpolate
        | F::KeepLastValue
        | F::KeepNextValue
        | F::LabelCopy
        | F::LabelDel
        | F::LabelGraphiteGroup
        | F::LabelKeep
        | F::LabelLowercase
        | F::LabelMap
        | F::LabelMatch
        | F::LabelMismatch
        | F::LabelTransform
        | F::LabelUppercase
        | F::LabelValue
        | F::Lag
        | F::Lifetime
        | F::LimitOffset
        | F::MadOverTime
        | F::MedianOverTime
        | F::ModeOverTime
        | F::PrometheusBuckets
        | F::QuantilesOverTime
        | F::RandExponential
        | F::RandNormal
        | F::RangeAvg
        | F::RangeFirst
        | F::RangeLast
        | F::RangeLinearRegression
        | F::RangeMad
        | F::RangeMax
        | F::RangeMin
        | F::RangeNormalize
        | F::RangeOverTime
        | F::RangeQuantile
        | F::RangeStddev
        | F::RangeStdvar
        | F::RangeSum
        | F::RangeTrimOutliers
        | F::RangeTrimSpikes
        | F::RangeTrimZscore
        | F::RangeZscore
        | F::RateOverSum
        | F::RemoveResets
        | F::Rollup
        | F::RollupCandlestick
        | F::RollupDelta
        | F::RollupDeriv
        | F::RollupIncrease
        | F::RollupRate
        | F::RollupScrapeInterval
        | F::RunningAvg
        | F::RunningMax
        | F::RunningMin
        | F::RunningSum
        | F::ScrapeInterval
        | F::ShareEqOverTime
        | F::ShareGtOverTime
        | F::ShareLeOverTime
        | F::SmoothExponential
        | F::SortByLabel
        | F::SortByLabelDesc
        | F::SortByLabelNumeric
        | F::SortByLabelNumericDesc
        | F::StaleSamplesOverTime
        | F::Step
        | F::Sum2OverTime
        | F::TfirstOverTime
        | F::TimestampWithName
        | F::TimezoneOffset
        | F::TlastChangeOverTime
        | F::TlastOverTime
        | F::TmaxOverTime
        | F::TminOverTime
        | F::Union
        | F::ZscoreOverTime => Coverage::Bypassed,
    }
}

/// Typed signatures keyed by function token.
static SIGNATURES: LazyLock<HashMap<FunctionId, FunctionSignature>> = LazyLock::new(|| {
    FunctionId::ALL
        .iter()
        .filter_map(|id| match coverage(*id) {
            Coverage::Typed(sig) => Some((*id, sig)),
            Coverage::Bypassed => None,
        })
        .collect()
});

static BYPASSED: LazyLock<HashSet<FunctionId>> = LazyLock::new(|| {
    FunctionId::ALL
        .iter()
        .copied()
        .filter(|id| matches!(coverage(*id), Coverage::Bypassed))
        .collect()
});

impl FunctionId {
    /// Typed signature, or `None` for a bypassed function.
    pub fn signature(self) -> Option<&'static FunctionSignature> {
        SIGNATURES.get(&self)
    }

    pub fn is_bypassed(self) -> bool {
        BYPASSED.contains(&self)
    }
}

/// Get the signature registered for a grammar token id.
///
/// `None` means the id has no modeled signature: it is not a function token, or
/// the function is bypassed.
pub fn lookup_signature(id: TokenId) -> Option<&'static FunctionSignature> {
    FunctionId::from_token_id(id).and_then(FunctionId::signature)
}

/// Check if a grammar token id names a function excluded from typed assistance.
pub fn is_bypassed(id: TokenId) -> bool {
    FunctionId::from_token_id(id).is_some_and(FunctionId::is_bypassed)
}

/// Get a signature by function name (case-insensitive).
pub fn signature_by_name(name: &str) -> Option<&'static FunctionSignature> {
    FunctionId::from_name(name).and_then(FunctionId::signature)
}

/// All typed signatures, in token id order.
pub fn signatures() -> impl Iterator<Item = (FunctionId, &'static FunctionSignature)> {
    FunctionId::ALL
        .iter()
        .filter_map(|id| id.signature().map(|sig| (*id, sig)))
}
