//! MetricsQL expression value types.

use std::fmt;

/// Kind of value a MetricsQL expression evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    /// Instant vector: labeled series, one sample each.
    Vector,
    /// A single float with no labels.
    Scalar,
    /// Range vector: labeled series, a window of samples each.
    Matrix,
    String,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::None,
        ValueType::Vector,
        ValueType::Scalar,
        ValueType::Matrix,
        ValueType::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::None => "none",
            ValueType::Vector => "vector",
            ValueType::Scalar => "scalar",
            ValueType::Matrix => "matrix",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
