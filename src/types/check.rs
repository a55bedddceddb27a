//! Argument checking of function calls against a signature.

use super::function::{FunctionSignature, OptionalArgs};
use super::value::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("{function} expects at least {min} argument(s), got {found}")]
    TooFewArguments {
        function: &'static str,
        min: usize,
        found: usize,
    },
    #[error("{function} expects at most {max} argument(s), got {found}")]
    TooManyArguments {
        function: &'static str,
        max: usize,
        found: usize,
    },
    #[error("argument {} of {function} must be {expected}, got {found}", .position + 1)]
    TypeMismatch {
        function: &'static str,
        position: usize,
        expected: ValueType,
        found: ValueType,
    },
}

/// Check the argument types of a call. An empty result means the call is well-typed.
///
/// Arguments in an unbounded tail are not checked.
pub fn check_call(
    signature: &FunctionSignature,
    args: &[ValueType],
    policy: OptionalArgs,
) -> Vec<CallError> {
    let mut errors = Vec::new();
    let arity = signature.arity(policy);

    if args.len() < arity.min {
        errors.push(CallError::TooFewArguments {
            function: signature.name,
            min: arity.min,
            found: args.len(),
        });
    }
    if let Some(max) = arity.max.filter(|max| args.len() > *max) {
        errors.push(CallError::TooManyArguments {
            function: signature.name,
            max,
            found: args.len(),
        });
    }

    for (position, found) in args.iter().enumerate() {
        let Some(expected) = signature.param_type(position) else {
            continue;
        };
        if expected != *found {
            errors.push(CallError::TypeMismatch {
                function: signature.name,
                position,
                expected,
                found: *found,
            });
        }
    }

    errors
}
