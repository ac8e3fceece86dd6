//! ## Crate layout
//! - `core`: criteria builders, chainable decorators, observability, and
//!   settings.
//!
//! The `prelude` module mirrors the surface used when writing a decorator;
//! `obs` and `settings` are re-exported for wiring.

pub use decorum_core as core;

pub use core::{error::CriteriaError as Error, obs, settings};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// Everything needed to build, decorate, and run a criteria chain.
///

pub mod prelude {
    pub use crate::core::{
        criteria::{
            Criteria, CriteriaExecutor, CriteriaRef, QueryState, RootCriteria, ScrollableResults,
        },
        decorator::{CriteriaDecorator, ExecutionKind, Shared},
        expr::{Criterion, Order, Projection, ResultTransformer, Value},
        mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
        obs::ObservedCriteria,
    };
}
