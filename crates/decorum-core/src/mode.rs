//! Mode vocabulary handed through criteria builders untouched.
//!
//! None of these are interpreted here; they are configuration values for the
//! executor behind the root builder.

use crate::error::CriteriaError;
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// CacheMode
/// Interaction with the second-level cache.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum CacheMode {
    Get,
    Ignore,
    Normal,
    Put,
    Refresh,
}

///
/// FetchMode
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    #[default]
    Default,
    Join,
    Select,
}

///
/// FlushMode
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum FlushMode {
    Always,
    Auto,
    Commit,
    Manual,
}

///
/// LockMode
/// Ordered from weakest to strongest.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    #[default]
    None,
    Read,
    Upgrade,
    UpgradeNowait,
    Write,
    Force,
}

///
/// JoinType
///
/// Join kind used when branching into an association.
/// Legacy integer join codes convert through `TryFrom<i32>`.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    #[default]
    InnerJoin,
    LeftOuterJoin,
    RightOuterJoin,
    FullJoin,
}

impl JoinType {
    pub const INNER_JOIN_CODE: i32 = 0;
    pub const LEFT_OUTER_JOIN_CODE: i32 = 1;
    pub const RIGHT_OUTER_JOIN_CODE: i32 = 2;
    pub const FULL_JOIN_CODE: i32 = 4;

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::InnerJoin => Self::INNER_JOIN_CODE,
            Self::LeftOuterJoin => Self::LEFT_OUTER_JOIN_CODE,
            Self::RightOuterJoin => Self::RIGHT_OUTER_JOIN_CODE,
            Self::FullJoin => Self::FULL_JOIN_CODE,
        }
    }
}

impl TryFrom<i32> for JoinType {
    type Error = CriteriaError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            Self::INNER_JOIN_CODE => Ok(Self::InnerJoin),
            Self::LEFT_OUTER_JOIN_CODE => Ok(Self::LeftOuterJoin),
            Self::RIGHT_OUTER_JOIN_CODE => Ok(Self::RightOuterJoin),
            Self::FULL_JOIN_CODE => Ok(Self::FullJoin),
            _ => Err(CriteriaError::invalid_argument(format!(
                "unknown join type: {code}"
            ))),
        }
    }
}

///
/// ScrollMode
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[display(rename_all = "snake_case")]
#[from_str(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    ForwardOnly,
    ScrollSensitive,
    #[default]
    ScrollInsensitive,
}

impl ScrollMode {
    #[must_use]
    pub const fn can_move_backwards(self) -> bool {
        !matches!(self, Self::ForwardOnly)
    }
}

///
/// TESTS
///
