//! Core of decorum: the criteria builder capability, chainable decorators
//! over it, execution observability, and the `prelude` used by callers.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod criteria;
pub mod decorator;
pub mod error;
pub mod expr;
pub mod mode;
pub mod obs;
pub mod settings;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains the builder and decorator vocabulary.
/// No executors, sinks, or settings are re-exported here.
///

pub mod prelude {
    pub use crate::{
        criteria::{Criteria, CriteriaRef, RootCriteria},
        decorator::{CriteriaDecorator, Shared},
        error::CriteriaError,
        expr::{Criterion, Order, Projection, ResultTransformer, Value},
        mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
    };
}
