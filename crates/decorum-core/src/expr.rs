//! Expression values passed through criteria builders.
//!
//! Pure, schema-agnostic data. Nothing in this crate evaluates a
//! `Criterion` or renders a `Projection`; that belongs to the executor.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

///
/// Value
///
/// Row values and comparison operands.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    List(Vec<Self>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<>")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
    #[display("like")]
    Like,
    #[display("in")]
    In,
}

///
/// Criterion
///
/// Filter predicate added to a criteria builder.
/// Property names are resolved by the executor, relative to the alias of the
/// builder the criterion was added through.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Criterion {
    Compare {
        property: String,
        op: CompareOp,
        value: Value,
    },
    IsNull {
        property: String,
    },
    IsNotNull {
        property: String,
    },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    /// Raw fragment passed through to the executor verbatim.
    Sql(String),
}

impl Criterion {
    fn compare(property: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn le(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Le, value)
    }

    #[must_use]
    pub fn gt(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn ge(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(property, CompareOp::Ge, value)
    }

    #[must_use]
    pub fn like(property: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(property, CompareOp::Like, Value::Text(pattern.into()))
    }

    #[must_use]
    pub fn in_<V: Into<Value>>(property: impl Into<String>, values: Vec<V>) -> Self {
        Self::compare(property, CompareOp::In, Value::from(values))
    }

    #[must_use]
    pub fn is_null(property: impl Into<String>) -> Self {
        Self::IsNull {
            property: property.into(),
        }
    }

    #[must_use]
    pub fn is_not_null(property: impl Into<String>) -> Self {
        Self::IsNotNull {
            property: property.into(),
        }
    }

    #[must_use]
    pub fn sql(fragment: impl Into<String>) -> Self {
        Self::Sql(fragment.into())
    }
}

impl BitAnd for Criterion {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self {
            Self::And(mut children) => {
                children.push(rhs);
                Self::And(children)
            }
            lhs => Self::And(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Criterion {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self {
            Self::Or(mut children) => {
                children.push(rhs);
                Self::Or(children)
            }
            lhs => Self::Or(vec![lhs, rhs]),
        }
    }
}

impl Not for Criterion {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

///
/// Order
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[display("{property} {direction}")]
pub struct Order {
    pub property: String,
    pub direction: Direction,
    pub ignore_case: bool,
}

impl Order {
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
            ignore_case: false,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
            ignore_case: false,
        }
    }

    #[must_use]
    pub const fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

///
/// Projection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Projection {
    RowCount,
    Id,
    Property(String),
    GroupProperty(String),
    Count { property: String, distinct: bool },
    Min(String),
    Max(String),
    Sum(String),
    Avg(String),
    Distinct(Box<Self>),
    List(Vec<Self>),
    Alias { projection: Box<Self>, alias: String },
}

impl Projection {
    #[must_use]
    pub fn property(property: impl Into<String>) -> Self {
        Self::Property(property.into())
    }

    #[must_use]
    pub fn count(property: impl Into<String>) -> Self {
        Self::Count {
            property: property.into(),
            distinct: false,
        }
    }

    #[must_use]
    pub fn count_distinct(property: impl Into<String>) -> Self {
        Self::Count {
            property: property.into(),
            distinct: true,
        }
    }

    #[must_use]
    pub fn distinct(self) -> Self {
        Self::Distinct(Box::new(self))
    }

    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::Alias {
            projection: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Number of columns each result row carries under this projection.
    #[must_use]
    pub fn column_count(&self) -> usize {
        match self {
            Self::List(items) => items.iter().map(Self::column_count).sum(),
            Self::Distinct(inner) | Self::Alias {
                projection: inner, ..
            } => inner.column_count(),
            _ => 1,
        }
    }
}

///
/// ResultTransformer
/// Shape of the rows returned by execution.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[display(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResultTransformer {
    #[default]
    RootEntity,
    DistinctRootEntity,
    AliasToEntityMap,
    Projection,
}

///
/// TESTS
///
