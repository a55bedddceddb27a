//! MetricsQL type system and function signature registry.
//!
//! This module provides:
//! - `ValueType`, the kinds of values an expression evaluates to
//! - `FunctionId`, the grammar's function tokens
//! - `FunctionSignature` with its arity rules
//! - The signature registry, the bypass set, and call checking

mod builtins;
mod check;
mod function;
mod ids;
mod value;

pub use builtins::{is_bypassed, lookup_signature, signature_by_name, signatures};
pub use check::{check_call, CallError};
pub use function::{Arity, FunctionSignature, InvalidVariadic, OptionalArgs, Parameter, Variadic};
pub use ids::{FunctionId, TokenId};
pub use value::ValueType;
