//! Module: criteria
//! Responsibility: the fluent query-builder capability that decorators wrap.
//! Does not own: query translation, predicate semantics, or row loading.
//! Boundary: builders accumulate `QueryState`; `CriteriaExecutor` runs it.

mod executor;
mod root;
mod scroll;
mod state;
mod sub;


use crate::{
    error::CriteriaError,
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
};
use std::{fmt, rc::Rc};

// re-exports
pub use executor::CriteriaExecutor;
pub use root::RootCriteria;
pub use scroll::ScrollableResults;
pub use state::{CriterionEntry, OrderEntry, QueryState, SubcriteriaEntry};
pub use sub::Subcriteria;

///
/// CONSTANTS
///

/// Alias bound to the root builder of every chain.
pub const ROOT_ALIAS: &str = "this";

/// Shared handle to any criteria builder.
pub type CriteriaRef = Rc<dyn Criteria>;

/// Outcome of a chainable builder call: the builder to continue with.
pub type CriteriaResult = Result<CriteriaRef, CriteriaError>;

///
/// CriteriaNode
///
/// Structural shape of a builder handle, as seen by root resolution.
/// Every `Criteria` implementation must pick exactly one.
///

#[derive(Debug)]
pub enum CriteriaNode {
    /// The chain root.
    Root(Rc<RootCriteria>),

    /// An association branch; `parent` is the builder it was created from.
    Subcriteria { parent: CriteriaRef },

    /// A decorator layer around `decorated`.
    Decorator { decorated: CriteriaRef },

    /// A decorator layer that is mutably borrowed and cannot be inspected.
    InUse,

    /// A builder this crate cannot see through.
    Opaque,
}

impl CriteriaNode {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Root(_) => "root",
            Self::Subcriteria { .. } => "subcriteria",
            Self::Decorator { .. } => "decorator",
            Self::InUse => "in_use",
            Self::Opaque => "opaque",
        }
    }
}

///
/// Criteria
///
/// Fluent query-builder capability.
///
/// Chainable calls take the handle by `Rc` and return the handle to continue
/// with: usually the same builder, or a new sub-criteria for
/// `create_criteria`. Failing calls leave every handle untouched.
///
/// Handles are single-threaded and not designed for concurrent mutation.
///

pub trait Criteria {
    fn node(self: Rc<Self>) -> CriteriaNode;

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    fn alias(&self) -> Option<String>;

    fn is_read_only(&self) -> bool;

    fn is_read_only_initialized(&self) -> bool;

    // ------------------------------------------------------------------
    // Chainable builders
    // ------------------------------------------------------------------

    fn add(self: Rc<Self>, criterion: Criterion) -> CriteriaResult;

    fn add_order(self: Rc<Self>, order: Order) -> CriteriaResult;

    /// Join `path` under `alias` and keep building on this handle.
    fn create_alias(
        self: Rc<Self>,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult;

    /// Join `path` and continue on a new sub-criteria rooted at it.
    fn create_criteria(
        self: Rc<Self>,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult;

    fn set_cache_mode(self: Rc<Self>, mode: CacheMode) -> CriteriaResult;

    fn set_cache_region(self: Rc<Self>, region: &str) -> CriteriaResult;

    fn set_cacheable(self: Rc<Self>, cacheable: bool) -> CriteriaResult;

    fn set_comment(self: Rc<Self>, comment: &str) -> CriteriaResult;

    fn set_fetch_mode(self: Rc<Self>, path: &str, mode: FetchMode) -> CriteriaResult;

    fn set_fetch_size(self: Rc<Self>, fetch_size: u32) -> CriteriaResult;

    fn set_first_result(self: Rc<Self>, first_result: u32) -> CriteriaResult;

    fn set_max_results(self: Rc<Self>, max_results: u32) -> CriteriaResult;

    fn set_flush_mode(self: Rc<Self>, mode: FlushMode) -> CriteriaResult;

    fn set_lock_mode(self: Rc<Self>, mode: LockMode) -> CriteriaResult;

    fn set_alias_lock_mode(self: Rc<Self>, alias: &str, mode: LockMode) -> CriteriaResult;

    fn set_projection(self: Rc<Self>, projection: Projection) -> CriteriaResult;

    fn set_read_only(self: Rc<Self>, read_only: bool) -> CriteriaResult;

    fn set_result_transformer(self: Rc<Self>, transformer: ResultTransformer) -> CriteriaResult;

    fn set_timeout(self: Rc<Self>, seconds: u32) -> CriteriaResult;

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    fn list(&self) -> Result<Vec<Value>, CriteriaError>;

    /// Zero or one row; more than one distinct row is an error.
    fn unique_result(&self) -> Result<Option<Value>, CriteriaError>;

    fn scroll(&self) -> Result<ScrollableResults, CriteriaError>;

    fn scroll_with(&self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError>;
}

impl fmt::Debug for dyn Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criteria")
            .field("alias", &self.alias())
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------
// Shared builder helpers
// ----------------------------------------------------------------------

/// Reject association paths that are not dot-separated identifiers.
pub(crate) fn validate_path(path: &str) -> Result<(), CriteriaError> {
    if !path.is_empty() && path.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(CriteriaError::invalid_argument(format!(
            "invalid association path: '{path}'"
        )))
    }
}

pub(crate) fn validate_alias(alias: &str) -> Result<(), CriteriaError> {
    if is_identifier(alias) {
        Ok(())
    } else {
        Err(CriteriaError::invalid_argument(format!(
            "invalid alias: '{alias}'"
        )))
    }
}

/// Prefix `path` with the path of the branch it is relative to.
pub(crate) fn qualify(prefix: &str, path: &str) -> String {
    format!("{prefix}.{path}")
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Collapse listed rows into a unique result; identical repeats are allowed.
pub(crate) fn unique_element(rows: Vec<Value>) -> Result<Option<Value>, CriteriaError> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(None);
    };

    if rows.all(|row| row == first) {
        Ok(Some(first))
    } else {
        Err(CriteriaError::non_unique_result(count))
    }
}
