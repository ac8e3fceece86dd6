use crate::{
    criteria::{
        Criteria, CriteriaExecutor, CriteriaNode, CriteriaRef, CriteriaResult, ROOT_ALIAS,
        ScrollableResults, Subcriteria,
        state::{CriterionEntry, OrderEntry, QueryState, SubcriteriaEntry},
        unique_element, validate_alias, validate_path,
    },
    error::{CriteriaError, ErrorClass, ErrorOrigin},
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
};
use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

///
/// RootCriteria
///
/// Top-level builder of a criteria chain.
/// Owns the `QueryState` every branch of the chain writes into, and the
/// executor that runs it.
///

pub struct RootCriteria {
    executor: Rc<dyn CriteriaExecutor>,
    state: RefCell<QueryState>,
}

impl RootCriteria {
    #[must_use]
    pub fn new(entity_name: impl Into<String>, executor: Rc<dyn CriteriaExecutor>) -> Rc<Self> {
        Rc::new(Self {
            executor,
            state: RefCell::new(QueryState::new(entity_name)),
        })
    }

    #[must_use]
    pub fn entity_name(&self) -> String {
        self.state.borrow().entity_name.clone()
    }

    /// Borrow the accumulated query state.
    #[must_use]
    pub fn state(&self) -> Ref<'_, QueryState> {
        self.state.borrow()
    }

    #[must_use]
    pub fn executor(&self) -> &Rc<dyn CriteriaExecutor> {
        &self.executor
    }

    // ------------------------------------------------------------------
    // State updates shared with sub-criteria
    // ------------------------------------------------------------------

    pub(crate) fn update(&self, f: impl FnOnce(&mut QueryState)) -> Result<(), CriteriaError> {
        let mut state = self.state.try_borrow_mut().map_err(|_| busy())?;
        f(&mut state);

        Ok(())
    }

    /// Register an association branch and return its slot.
    pub(crate) fn register(
        &self,
        path: String,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> Result<usize, CriteriaError> {
        validate_path(&path)?;
        if let Some(alias) = alias {
            validate_alias(alias)?;
        }

        let mut state = self.state.try_borrow_mut().map_err(|_| busy())?;
        if let Some(alias) = alias
            && state.has_alias(alias)
        {
            return Err(CriteriaError::invalid_argument(format!(
                "duplicate alias: '{alias}'"
            )));
        }

        state.subcriteria.push(SubcriteriaEntry {
            path,
            alias: alias.map(str::to_string),
            join_type,
            with_clause,
            lock_mode: LockMode::None,
        });

        Ok(state.subcriteria.len() - 1)
    }

    pub(crate) fn add_entry(
        &self,
        criterion: Criterion,
        alias: Option<String>,
    ) -> Result<(), CriteriaError> {
        self.update(|state| {
            state
                .criterion_entries
                .push(CriterionEntry { criterion, alias });
        })
    }

    pub(crate) fn add_order_entry(
        &self,
        order: Order,
        alias: Option<String>,
    ) -> Result<(), CriteriaError> {
        self.update(|state| state.order_entries.push(OrderEntry { order, alias }))
    }

    pub(crate) fn project(
        &self,
        projection: Projection,
        alias: Option<String>,
    ) -> Result<(), CriteriaError> {
        self.update(|state| {
            state.projection = Some(projection);
            state.projection_alias = alias;
            state.result_transformer = ResultTransformer::Projection;
        })
    }

    // ------------------------------------------------------------------
    // Execution shared with sub-criteria
    // ------------------------------------------------------------------

    pub(crate) fn execute_list(&self) -> Result<Vec<Value>, CriteriaError> {
        let state = self.state.try_borrow().map_err(|_| busy())?;

        self.executor.list(&state)
    }

    pub(crate) fn execute_scroll(
        &self,
        mode: ScrollMode,
    ) -> Result<ScrollableResults, CriteriaError> {
        let state = self.state.try_borrow().map_err(|_| busy())?;

        self.executor.scroll(&state, mode)
    }

    pub(crate) fn read_only(&self) -> bool {
        self.state
            .borrow()
            .read_only
            .unwrap_or_else(|| self.executor.default_read_only())
    }

    pub(crate) fn read_only_initialized(&self) -> bool {
        self.state.borrow().read_only.is_some()
    }
}

fn busy() -> CriteriaError {
    CriteriaError::new(
        ErrorClass::InvalidState,
        ErrorOrigin::Criteria,
        "criteria state is in use by a running query",
    )
}

impl fmt::Debug for RootCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootCriteria")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Criteria for RootCriteria {
    fn node(self: Rc<Self>) -> CriteriaNode {
        CriteriaNode::Root(self)
    }

    fn alias(&self) -> Option<String> {
        Some(ROOT_ALIAS.to_string())
    }

    fn is_read_only(&self) -> bool {
        self.read_only()
    }

    fn is_read_only_initialized(&self) -> bool {
        self.read_only_initialized()
    }

    fn add(self: Rc<Self>, criterion: Criterion) -> CriteriaResult {
        self.add_entry(criterion, Some(ROOT_ALIAS.to_string()))?;

        Ok(self)
    }

    fn add_order(self: Rc<Self>, order: Order) -> CriteriaResult {
        self.add_order_entry(order, Some(ROOT_ALIAS.to_string()))?;

        Ok(self)
    }

    fn create_alias(
        self: Rc<Self>,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        self.register(path.to_string(), Some(alias), join_type, with_clause)?;

        Ok(self)
    }

    fn create_criteria(
        self: Rc<Self>,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        let slot = self.register(path.to_string(), alias, join_type, with_clause)?;
        let root = Rc::clone(&self);
        let parent: CriteriaRef = self;

        Ok(Rc::new(Subcriteria::new(
            root,
            parent,
            path.to_string(),
            alias.map(str::to_string),
            slot,
        )))
    }

    fn set_cache_mode(self: Rc<Self>, mode: CacheMode) -> CriteriaResult {
        self.update(|state| state.cache_mode = Some(mode))?;

        Ok(self)
    }

    fn set_cache_region(self: Rc<Self>, region: &str) -> CriteriaResult {
        self.update(|state| state.cache_region = Some(region.to_string()))?;

        Ok(self)
    }

    fn set_cacheable(self: Rc<Self>, cacheable: bool) -> CriteriaResult {
        self.update(|state| state.cacheable = cacheable)?;

        Ok(self)
    }

    fn set_comment(self: Rc<Self>, comment: &str) -> CriteriaResult {
        self.update(|state| state.comment = Some(comment.to_string()))?;

        Ok(self)
    }

    fn set_fetch_mode(self: Rc<Self>, path: &str, mode: FetchMode) -> CriteriaResult {
        validate_path(path)?;
        self.update(|state| {
            state.fetch_modes.insert(path.to_string(), mode);
        })?;

        Ok(self)
    }

    fn set_fetch_size(self: Rc<Self>, fetch_size: u32) -> CriteriaResult {
        self.update(|state| state.fetch_size = Some(fetch_size))?;

        Ok(self)
    }

    fn set_first_result(self: Rc<Self>, first_result: u32) -> CriteriaResult {
        self.update(|state| state.first_result = Some(first_result))?;

        Ok(self)
    }

    fn set_max_results(self: Rc<Self>, max_results: u32) -> CriteriaResult {
        self.update(|state| state.max_results = Some(max_results))?;

        Ok(self)
    }

    fn set_flush_mode(self: Rc<Self>, mode: FlushMode) -> CriteriaResult {
        self.update(|state| state.flush_mode = Some(mode))?;

        Ok(self)
    }

    fn set_lock_mode(self: Rc<Self>, mode: LockMode) -> CriteriaResult {
        self.update(|state| state.lock_mode = mode)?;

        Ok(self)
    }

    fn set_alias_lock_mode(self: Rc<Self>, alias: &str, mode: LockMode) -> CriteriaResult {
        validate_alias(alias)?;
        self.update(|state| {
            state.lock_modes.insert(alias.to_string(), mode);
        })?;

        Ok(self)
    }

    fn set_projection(self: Rc<Self>, projection: Projection) -> CriteriaResult {
        self.project(projection, None)?;

        Ok(self)
    }

    fn set_read_only(self: Rc<Self>, read_only: bool) -> CriteriaResult {
        self.update(|state| state.read_only = Some(read_only))?;

        Ok(self)
    }

    fn set_result_transformer(self: Rc<Self>, transformer: ResultTransformer) -> CriteriaResult {
        self.update(|state| state.result_transformer = transformer)?;

        Ok(self)
    }

    fn set_timeout(self: Rc<Self>, seconds: u32) -> CriteriaResult {
        self.update(|state| state.timeout = Some(seconds))?;

        Ok(self)
    }

    fn list(&self) -> Result<Vec<Value>, CriteriaError> {
        self.execute_list()
    }

    fn unique_result(&self) -> Result<Option<Value>, CriteriaError> {
        unique_element(self.execute_list()?)
    }

    fn scroll(&self) -> Result<ScrollableResults, CriteriaError> {
        self.execute_scroll(ScrollMode::default())
    }

    fn scroll_with(&self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError> {
        self.execute_scroll(mode)
    }
}
