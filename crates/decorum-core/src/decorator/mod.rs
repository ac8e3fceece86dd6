//! Module: decorator
//! Responsibility: chainable decorators over criteria builders.
//! Does not own: builder state, query semantics, or execution.
//! Boundary: delegates every call to the decorated handle and re-wraps the
//! handle it gets back, so chains keep the decorator's own type.

mod root;
mod shared;

#[cfg(test)]
mod tests;

use crate::{
    criteria::{
        Criteria, CriteriaNode, CriteriaRef, CriteriaResult, RootCriteria, ScrollableResults,
    },
    error::CriteriaError,
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
};
use derive_more::Display;
use std::rc::Rc;

// re-exports
pub use root::{MAX_CHAIN_DEPTH, resolve_root};
pub use shared::Shared;

///
/// ExecutionKind
/// Result-producing operation a hook is bracketing.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ExecutionKind {
    #[display("list")]
    List,
    #[display("unique_result")]
    UniqueResult,
    #[display("scroll")]
    Scroll,
}

///
/// CriteriaDecorator
///
/// Decorator over a `Criteria` handle that keeps fluent chaining intact.
///
/// Implementors supply storage (`criteria`) and the re-wrap step
/// (`decorate`); every builder call is provided and returns `&mut Self`, so
/// a chain started on a concrete decorator stays on that decorator:
///
/// ```ignore
/// struct Audited { criteria: CriteriaRef }
///
/// impl CriteriaDecorator for Audited {
///     fn criteria(&self) -> &CriteriaRef {
///         &self.criteria
///     }
///
///     fn decorate(&mut self, criteria: CriteriaRef) -> &mut Self {
///         self.criteria = criteria;
///         self
///     }
/// }
/// ```
///
/// Result-producing calls run `before_executed`, delegate, then always run
/// `after_executed`, also when the delegate fails.
///

pub trait CriteriaDecorator: Sized {
    /// The decorated handle.
    fn criteria(&self) -> &CriteriaRef;

    /// Store `criteria` as the decorated handle and return `self`.
    /// Must do exactly that; chaining relies on it.
    fn decorate(&mut self, criteria: CriteriaRef) -> &mut Self;

    /// Called before a result-producing call is delegated.
    fn before_executed(&mut self, _kind: ExecutionKind) {}

    /// Called after a result-producing call returns, whatever the outcome.
    fn after_executed(&mut self, _kind: ExecutionKind) {}

    // ------------------------------------------------------------------
    // Chain root
    // ------------------------------------------------------------------

    /// Entity name of the root this chain is built on.
    fn root_entity_name(&self) -> Result<String, CriteriaError> {
        Ok(self.root_criteria()?.entity_name())
    }

    /// Walk decorator layers and sub-criteria parents up to the chain root.
    fn root_criteria(&self) -> Result<Rc<RootCriteria>, CriteriaError> {
        resolve_root(self.criteria())
    }

    /// Is the decorated handle itself the chain root?
    fn is_root_criteria(&self) -> bool {
        matches!(Rc::clone(self.criteria()).node(), CriteriaNode::Root(_))
    }

    // ------------------------------------------------------------------
    // Read-through accessors
    // ------------------------------------------------------------------

    fn alias(&self) -> Option<String> {
        self.criteria().alias()
    }

    fn is_read_only(&self) -> bool {
        self.criteria().is_read_only()
    }

    fn is_read_only_initialized(&self) -> bool {
        self.criteria().is_read_only_initialized()
    }

    // ------------------------------------------------------------------
    // Chainable builders
    // ------------------------------------------------------------------

    fn add(&mut self, criterion: Criterion) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.add(criterion))
    }

    fn add_order(&mut self, order: Order) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.add_order(order))
    }

    fn create_alias(&mut self, path: &str, alias: &str) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_alias(path, alias, JoinType::InnerJoin, None)
        })
    }

    fn create_alias_join(
        &mut self,
        path: &str,
        alias: &str,
        join_type: JoinType,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.create_alias(path, alias, join_type, None))
    }

    fn create_alias_with(
        &mut self,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Criterion,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_alias(path, alias, join_type, Some(with_clause))
        })
    }

    fn create_criteria(&mut self, path: &str) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_criteria(path, None, JoinType::InnerJoin, None)
        })
    }

    fn create_criteria_join(
        &mut self,
        path: &str,
        join_type: JoinType,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.create_criteria(path, None, join_type, None))
    }

    fn create_criteria_alias(
        &mut self,
        path: &str,
        alias: &str,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_criteria(path, Some(alias), JoinType::InnerJoin, None)
        })
    }

    fn create_criteria_alias_join(
        &mut self,
        path: &str,
        alias: &str,
        join_type: JoinType,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_criteria(path, Some(alias), join_type, None)
        })
    }

    fn create_criteria_with(
        &mut self,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Criterion,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| {
            c.create_criteria(path, Some(alias), join_type, Some(with_clause))
        })
    }

    /// General branch form: optional alias, explicit join and optional with
    /// clause, forwarded as given.
    fn create_criteria_as(
        &mut self,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.create_criteria(path, alias, join_type, with_clause))
    }

    fn set_cache_mode(&mut self, mode: CacheMode) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_cache_mode(mode))
    }

    fn set_cache_region(&mut self, region: &str) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_cache_region(region))
    }

    fn set_cacheable(&mut self, cacheable: bool) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_cacheable(cacheable))
    }

    fn set_comment(&mut self, comment: &str) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_comment(comment))
    }

    fn set_fetch_mode(&mut self, path: &str, mode: FetchMode) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_fetch_mode(path, mode))
    }

    fn set_fetch_size(&mut self, fetch_size: u32) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_fetch_size(fetch_size))
    }

    fn set_first_result(&mut self, first_result: u32) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_first_result(first_result))
    }

    fn set_max_results(&mut self, max_results: u32) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_max_results(max_results))
    }

    fn set_flush_mode(&mut self, mode: FlushMode) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_flush_mode(mode))
    }

    fn set_lock_mode(&mut self, mode: LockMode) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_lock_mode(mode))
    }

    fn set_alias_lock_mode(
        &mut self,
        alias: &str,
        mode: LockMode,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_alias_lock_mode(alias, mode))
    }

    fn set_projection(&mut self, projection: Projection) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_projection(projection))
    }

    fn set_read_only(&mut self, read_only: bool) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_read_only(read_only))
    }

    fn set_result_transformer(
        &mut self,
        transformer: ResultTransformer,
    ) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_result_transformer(transformer))
    }

    fn set_timeout(&mut self, seconds: u32) -> Result<&mut Self, CriteriaError> {
        rewrap(self, |c| c.set_timeout(seconds))
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    fn list(&mut self) -> Result<Vec<Value>, CriteriaError> {
        execute(self, ExecutionKind::List, |c| c.list())
    }

    fn unique_result(&mut self) -> Result<Option<Value>, CriteriaError> {
        execute(self, ExecutionKind::UniqueResult, |c| c.unique_result())
    }

    fn scroll(&mut self) -> Result<ScrollableResults, CriteriaError> {
        execute(self, ExecutionKind::Scroll, |c| c.scroll())
    }

    fn scroll_with(&mut self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError> {
        execute(self, ExecutionKind::Scroll, |c| c.scroll_with(mode))
    }
}

/// Delegate one builder call on a cloned handle, then re-wrap its result.
/// A failing delegate leaves the decorated handle as it was.
fn rewrap<D: CriteriaDecorator>(
    decorator: &mut D,
    call: impl FnOnce(CriteriaRef) -> CriteriaResult,
) -> Result<&mut D, CriteriaError> {
    let criteria = call(Rc::clone(decorator.criteria()))?;

    Ok(decorator.decorate(criteria))
}

/// Bracket one result-producing call with the execution hooks.
fn execute<D: CriteriaDecorator, T>(
    decorator: &mut D,
    kind: ExecutionKind,
    call: impl FnOnce(&dyn Criteria) -> Result<T, CriteriaError>,
) -> Result<T, CriteriaError> {
    let criteria = Rc::clone(decorator.criteria());
    decorator.before_executed(kind);
    let _after = AfterExecuted { decorator, kind };

    call(criteria.as_ref())
}

///
/// AfterExecuted
/// Runs `after_executed` on drop, so it also fires while unwinding.
///

struct AfterExecuted<'a, D: CriteriaDecorator> {
    decorator: &'a mut D,
    kind: ExecutionKind,
}

impl<D: CriteriaDecorator> Drop for AfterExecuted<'_, D> {
    fn drop(&mut self) {
        self.decorator.after_executed(self.kind);
    }
}
