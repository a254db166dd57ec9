//! Query parameter values accepted by `get` and `delete`.
//!
//! # Design
//! A parameter is either a scalar or a flat sequence of scalars. Keys are
//! kept in a `BTreeMap` since their order carries no meaning; order within
//! a sequence is preserved and shows up in the serialized query string.
//! The untagged serde representation lets callers load parameters straight
//! from JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single query value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Scalars render the way they appear in a query string. `Null` renders
/// as an empty value.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Str(value) => f.write_str(value),
        }
    }
}

/// A query parameter value: one scalar or a sequence of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// Query parameters keyed by name.
pub type QueryParams = BTreeMap<String, QueryValue>;

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Scalar(value.into())
                }
            }

            impl From<Vec<$ty>> for QueryValue {
                fn from(values: Vec<$ty>) -> Self {
                    QueryValue::List(values.into_iter().map(Scalar::from).collect())
                }
            }
        )*
    };
}

scalar_conversions!(
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    String => Str,
    &str => Str,
);
