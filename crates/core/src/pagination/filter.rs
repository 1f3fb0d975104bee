//! Filter and ordering AST.
//!
//! A listing describes what it wants as plain data; each storage backend
//! resolves the same description its own way (SQL in `roomly-db`, direct
//! evaluation in [`super::memory`]).

use std::cmp::Ordering;

/// A typed value a field is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Compare two values of compatible kinds. Ints and floats compare
    /// numerically; any other cross-kind comparison yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One predicate over a named field. A specification ANDs all of its filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, FieldValue),
    Ne(&'static str, FieldValue),
    Gt(&'static str, FieldValue),
    Gte(&'static str, FieldValue),
    Lt(&'static str, FieldValue),
    Lte(&'static str, FieldValue),
    /// Case-insensitive substring match on a text field.
    Contains(&'static str, String),
    In(&'static str, Vec<FieldValue>),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Eq(field, value.into())
    }

    pub fn ne(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Ne(field, value.into())
    }

    pub fn gt(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Gt(field, value.into())
    }

    pub fn gte(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Gte(field, value.into())
    }

    pub fn lt(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Lt(field, value.into())
    }

    pub fn lte(field: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::Lte(field, value.into())
    }

    pub fn contains(field: &'static str, needle: impl Into<String>) -> Self {
        Self::Contains(field, needle.into())
    }

    pub fn is_in<V: Into<FieldValue>>(
        field: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::In(field, values.into_iter().map(Into::into).collect())
    }

    /// The field this predicate reads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Eq(f, _)
            | Self::Ne(f, _)
            | Self::Gt(f, _)
            | Self::Gte(f, _)
            | Self::Lt(f, _)
            | Self::Lte(f, _)
            | Self::Contains(f, _)
            | Self::In(f, _) => f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One ordering clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}
