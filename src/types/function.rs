//! Function signature types for MetricsQL.
//!
//! A `FunctionSignature` only describes a function. Arity and argument checks are
//! derived from it by the caller, through `arity`, `param_type` and
//! [`check_call`](super::check_call), under an [`OptionalArgs`] policy.

use std::fmt::{self, Write as _};

use serde::Deserialize;

use super::value::ValueType;

/// Trailing-argument rule of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variadic {
    /// Exactly the declared arguments.
    Fixed,
    /// The declared arguments followed by any number of unchecked ones.
    Unbounded,
    /// Up to `n` optional trailing arguments.
    Optional(u16),
}

impl Variadic {
    /// Integer form used by the grammar tooling: `0`, `-1`, or the optional count.
    pub fn raw(self) -> i32 {
        match self {
            Variadic::Fixed => 0,
            Variadic::Unbounded => -1,
            Variadic::Optional(n) => i32::from(n),
        }
    }
}

/// A raw variadic count below `-1` or beyond `u16::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("variadic count {0} is out of range")]
pub struct InvalidVariadic(pub i32);

impl TryFrom<i32> for Variadic {
    type Error = InvalidVariadic;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Variadic::Fixed),
            -1 => Ok(Variadic::Unbounded),
            n if n > 0 => u16::try_from(n)
                .map(Variadic::Optional)
                .map_err(|_| InvalidVariadic(raw)),
            _ => Err(InvalidVariadic(raw)),
        }
    }
}

/// How `Variadic::Optional(n)` counts against the declared arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionalArgs {
    /// The last declared argument is the first optional one (`round(v)` is valid).
    #[default]
    TrailingDeclared,
    /// All declared arguments are required; `n` more may follow.
    Appended,
}

/// Accepted argument count range. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    /// Whether a call with `count` arguments satisfies this range.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

/// One rendered parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    /// `None` when the slot is not type-checked.
    pub value_type: Option<ValueType>,
    pub optional: bool,
    /// Stands for an unbounded unchecked tail.
    pub repeated: bool,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeated {
            return f.write_str("...");
        }
        match self.value_type {
            Some(t) => write!(f, "{}", t)?,
            None => f.write_str("any")?,
        }
        if self.optional {
            f.write_char('?')?;
        }
        Ok(())
    }
}

/// Type information for one MetricsQL function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Function name as written in queries (e.g., "label_join")
    pub name: &'static str,
    /// Fixed positional argument types
    pub arg_types: &'static [ValueType],
    pub variadic: Variadic,
    pub return_type: ValueType,
}

impl FunctionSignature {
    /// Build a signature; usable in const contexts.
    pub const fn new(
        name: &'static str,
        arg_types: &'static [ValueType],
        variadic: Variadic,
        return_type: ValueType,
    ) -> Self {
        Self {
            name,
            arg_types,
            variadic,
            return_type,
        }
    }

    /// Argument count range under `policy`.
    ///
    /// ```ignore
    /// let round = signature_by_name("round").unwrap();
    /// assert_eq!(round.arity(OptionalArgs::TrailingDeclared), Arity { min: 1, max: Some(2) });
    /// assert_eq!(round.arity(OptionalArgs::Appended), Arity { min: 2, max: Some(3) });
    /// ```
    pub fn arity(&self, policy: OptionalArgs) -> Arity {
        let declared = self.arg_types.len();
        match self.variadic {
            Variadic::Fixed => Arity {
                min: declared,
                max: Some(declared),
            },
            Variadic::Unbounded => Arity {
                min: declared,
                max: None,
            },
            Variadic::Optional(n) => {
                let min = match policy {
                    OptionalArgs::TrailingDeclared => declared.saturating_sub(1),
                    OptionalArgs::Appended => declared,
                };
                Arity {
                    min,
                    max: Some(min + usize::from(n)),
                }
            }
        }
    }

    /// Expected type of the argument at `index`, or `None` if it is unchecked.
    ///
    /// Optional arguments past the declared list take the last declared type.
    pub fn param_type(&self, index: usize) -> Option<ValueType> {
        if let Some(t) = self.arg_types.get(index) {
            return Some(*t);
        }
        match self.variadic {
            Variadic::Optional(_) => self.arg_types.last().copied(),
            Variadic::Fixed | Variadic::Unbounded => None,
        }
    }

    /// Parameter slots for display: one per accepted argument, plus a trailing
    /// `...` slot for an unbounded tail.
    pub fn parameters(&self, policy: OptionalArgs) -> Vec<Parameter> {
        let arity = self.arity(policy);
        let shown = arity.max.unwrap_or(arity.min);
        let mut params: Vec<Parameter> = (0..shown)
            .map(|i| Parameter {
                value_type: self.param_type(i),
                optional: i >= arity.min,
                repeated: false,
            })
            .collect();
        if arity.max.is_none() {
            params.push(Parameter {
                value_type: None,
                optional: true,
                repeated: true,
            });
        }
        params
    }

    /// Render as `name(arg, ...) -> result`.
    pub fn label(&self, policy: OptionalArgs) -> String {
        let params: Vec<String> = self
            .parameters(policy)
            .iter()
            .map(|p| p.to_string())
            .collect();
        format!("{}({}) -> {}", self.name, params.join(", "), self.return_type)
    }
}
