//! Shared fixtures for unit tests: stub executors, foreign builders, and
//! minimal decorators.

use crate::{
    criteria::{
        Criteria, CriteriaExecutor, CriteriaNode, CriteriaRef, CriteriaResult, QueryState,
        RootCriteria, ScrollableResults,
    },
    decorator::{CriteriaDecorator, ExecutionKind},
    error::CriteriaError,
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
    obs::{ExecutionEvent, ExecutionSink},
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

///
/// StubExecutor
///
/// Returns a fixed row set (or a fixed failure) and remembers the last
/// state it was asked to run.
///

#[derive(Default)]
pub(crate) struct StubExecutor {
    rows: Vec<Value>,
    failure: Option<CriteriaError>,
    read_only: bool,
    calls: Cell<usize>,
    last_state: RefCell<Option<QueryState>>,
}

impl StubExecutor {
    pub(crate) fn with_rows(rows: Vec<Value>) -> Rc<Self> {
        Rc::new(Self {
            rows,
            ..Self::default()
        })
    }

    pub(crate) fn failing(message: &str) -> Rc<Self> {
        Rc::new(Self {
            failure: Some(CriteriaError::execution(message)),
            ..Self::default()
        })
    }

    pub(crate) fn read_only_by_default() -> Rc<Self> {
        Rc::new(Self {
            read_only: true,
            ..Self::default()
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn last_state(&self) -> Option<QueryState> {
        self.last_state.borrow().clone()
    }
}

impl CriteriaExecutor for StubExecutor {
    fn list(&self, query: &QueryState) -> Result<Vec<Value>, CriteriaError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_state.borrow_mut() = Some(query.clone());

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.rows.clone()),
        }
    }

    fn default_read_only(&self) -> bool {
        self.read_only
    }
}

/// Root builder over an executor that returns no rows.
pub(crate) fn empty_root(entity: &str) -> Rc<RootCriteria> {
    RootCriteria::new(entity, StubExecutor::with_rows(Vec::new()))
}

///
/// ForeignCriteria
///
/// Builder from outside this crate's structural vocabulary.
/// Every chainable call returns the same handle; every execution fails
/// when `fail` is set.
///

#[derive(Default)]
pub(crate) struct ForeignCriteria {
    fail: bool,
}

impl ForeignCriteria {
    pub(crate) fn handle() -> CriteriaRef {
        Rc::new(Self::default())
    }

    pub(crate) fn failing() -> CriteriaRef {
        Rc::new(Self { fail: true })
    }

    fn chain(self: Rc<Self>) -> CriteriaResult {
        if self.fail {
            Err(CriteriaError::invalid_argument("foreign builder rejected call"))
        } else {
            Ok(self)
        }
    }

    fn run<T>(&self, value: T) -> Result<T, CriteriaError> {
        if self.fail {
            Err(CriteriaError::execution("foreign builder failed"))
        } else {
            Ok(value)
        }
    }
}

impl Criteria for ForeignCriteria {
    fn node(self: Rc<Self>) -> CriteriaNode {
        CriteriaNode::Opaque
    }

    fn alias(&self) -> Option<String> {
        Some("foreign".to_string())
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn is_read_only_initialized(&self) -> bool {
        false
    }

    fn add(self: Rc<Self>, _: Criterion) -> CriteriaResult {
        self.chain()
    }

    fn add_order(self: Rc<Self>, _: Order) -> CriteriaResult {
        self.chain()
    }

    fn create_alias(
        self: Rc<Self>,
        _: &str,
        _: &str,
        _: JoinType,
        _: Option<Criterion>,
    ) -> CriteriaResult {
        self.chain()
    }

    fn create_criteria(
        self: Rc<Self>,
        _: &str,
        _: Option<&str>,
        _: JoinType,
        _: Option<Criterion>,
    ) -> CriteriaResult {
        self.chain()
    }

    fn set_cache_mode(self: Rc<Self>, _: CacheMode) -> CriteriaResult {
        self.chain()
    }

    fn set_cache_region(self: Rc<Self>, _: &str) -> CriteriaResult {
        self.chain()
    }

    fn set_cacheable(self: Rc<Self>, _: bool) -> CriteriaResult {
        self.chain()
    }

    fn set_comment(self: Rc<Self>, _: &str) -> CriteriaResult {
        self.chain()
    }

    fn set_fetch_mode(self: Rc<Self>, _: &str, _: FetchMode) -> CriteriaResult {
        self.chain()
    }

    fn set_fetch_size(self: Rc<Self>, _: u32) -> CriteriaResult {
        self.chain()
    }

    fn set_first_result(self: Rc<Self>, _: u32) -> CriteriaResult {
        self.chain()
    }

    fn set_max_results(self: Rc<Self>, _: u32) -> CriteriaResult {
        self.chain()
    }

    fn set_flush_mode(self: Rc<Self>, _: FlushMode) -> CriteriaResult {
        self.chain()
    }

    fn set_lock_mode(self: Rc<Self>, _: LockMode) -> CriteriaResult {
        self.chain()
    }

    fn set_alias_lock_mode(self: Rc<Self>, _: &str, _: LockMode) -> CriteriaResult {
        self.chain()
    }

    fn set_projection(self: Rc<Self>, _: Projection) -> CriteriaResult {
        self.chain()
    }

    fn set_read_only(self: Rc<Self>, _: bool) -> CriteriaResult {
        self.chain()
    }

    fn set_result_transformer(self: Rc<Self>, _: ResultTransformer) -> CriteriaResult {
        self.chain()
    }

    fn set_timeout(self: Rc<Self>, _: u32) -> CriteriaResult {
        self.chain()
    }

    fn list(&self) -> Result<Vec<Value>, CriteriaError> {
        self.run(Vec::new())
    }

    fn unique_result(&self) -> Result<Option<Value>, CriteriaError> {
        self.run(None)
    }

    fn scroll(&self) -> Result<ScrollableResults, CriteriaError> {
        self.run(ScrollableResults::new(Vec::new(), ScrollMode::default()))
    }

    fn scroll_with(&self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError> {
        self.run(ScrollableResults::new(Vec::new(), mode))
    }
}

///
/// PlainDecorator
/// Smallest possible decorator: store and return self.
///

pub(crate) struct PlainDecorator {
    criteria: CriteriaRef,
}

impl PlainDecorator {
    pub(crate) fn new(criteria: CriteriaRef) -> Self {
        Self { criteria }
    }
}

impl CriteriaDecorator for PlainDecorator {
    fn criteria(&self) -> &CriteriaRef {
        &self.criteria
    }

    fn decorate(&mut self, criteria: CriteriaRef) -> &mut Self {
        self.criteria = criteria;
        self
    }
}

///
/// HookLog
/// Decorator that journals every hook call.
///

pub(crate) struct HookLog {
    criteria: CriteriaRef,
    pub(crate) events: Vec<String>,
}

impl HookLog {
    pub(crate) fn new(criteria: CriteriaRef) -> Self {
        Self {
            criteria,
            events: Vec::new(),
        }
    }

    /// Mark a point in the journal; used to pin down hook ordering.
    pub(crate) fn mark(&mut self, label: &str) -> &mut Self {
        self.events.push(label.to_string());
        self
    }
}

impl CriteriaDecorator for HookLog {
    fn criteria(&self) -> &CriteriaRef {
        &self.criteria
    }

    fn decorate(&mut self, criteria: CriteriaRef) -> &mut Self {
        self.criteria = criteria;
        self
    }

    fn before_executed(&mut self, kind: ExecutionKind) {
        self.events.push(format!("before:{kind}"));
    }

    fn after_executed(&mut self, kind: ExecutionKind) {
        self.events.push(format!("after:{kind}"));
    }
}

///
/// VecSink
///

#[derive(Default)]
pub(crate) struct VecSink {
    events: RefCell<Vec<ExecutionEvent>>,
}

impl VecSink {
    pub(crate) fn events(&self) -> Vec<ExecutionEvent> {
        self.events.borrow().clone()
    }
}

impl ExecutionSink for VecSink {
    fn record(&self, event: ExecutionEvent) {
        self.events.borrow_mut().push(event);
    }
}
