use crate::{
    criteria::{
        Criteria, CriteriaNode, CriteriaRef, CriteriaResult, RootCriteria, ScrollableResults,
        qualify, unique_element, validate_path,
    },
    error::CriteriaError,
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
};
use std::{fmt, rc::Rc};

///
/// Subcriteria
///
/// Builder scoped to one association of its parent.
///
/// Filters and orders added here are recorded on the root under this
/// branch's alias. Fetch modes are qualified with the branch path. Paging,
/// caching and execution always act on the whole chain.
///

pub struct Subcriteria {
    root: Rc<RootCriteria>,
    parent: CriteriaRef,
    path: String,
    alias: Option<String>,
    slot: usize,
}

impl Subcriteria {
    pub(crate) fn new(
        root: Rc<RootCriteria>,
        parent: CriteriaRef,
        path: String,
        alias: Option<String>,
        slot: usize,
    ) -> Self {
        Self {
            root,
            parent,
            path,
            alias,
            slot,
        }
    }

    /// The builder this branch was created from.
    #[must_use]
    pub const fn parent(&self) -> &CriteriaRef {
        &self.parent
    }

    /// Association path, qualified from the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn root(&self) -> &Rc<RootCriteria> {
        &self.root
    }

    fn branch(
        &self,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> Result<usize, CriteriaError> {
        validate_path(path)?;

        self.root
            .register(qualify(&self.path, path), alias, join_type, with_clause)
    }
}

impl fmt::Debug for Subcriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcriteria")
            .field("path", &self.path)
            .field("alias", &self.alias)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl Criteria for Subcriteria {
    fn node(self: Rc<Self>) -> CriteriaNode {
        CriteriaNode::Subcriteria {
            parent: Rc::clone(&self.parent),
        }
    }

    fn alias(&self) -> Option<String> {
        self.alias.clone()
    }

    fn is_read_only(&self) -> bool {
        self.root.read_only()
    }

    fn is_read_only_initialized(&self) -> bool {
        self.root.read_only_initialized()
    }

    fn add(self: Rc<Self>, criterion: Criterion) -> CriteriaResult {
        self.root.add_entry(criterion, self.alias.clone())?;

        Ok(self)
    }

    fn add_order(self: Rc<Self>, order: Order) -> CriteriaResult {
        self.root.add_order_entry(order, self.alias.clone())?;

        Ok(self)
    }

    fn create_alias(
        self: Rc<Self>,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        self.branch(path, Some(alias), join_type, with_clause)?;

        Ok(self)
    }

    fn create_criteria(
        self: Rc<Self>,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        let slot = self.branch(path, alias, join_type, with_clause)?;
        let root = Rc::clone(&self.root);
        let qualified = qualify(&self.path, path);
        let parent: CriteriaRef = self;

        Ok(Rc::new(Self::new(
            root,
            parent,
            qualified,
            alias.map(str::to_string),
            slot,
        )))
    }

    fn set_cache_mode(self: Rc<Self>, mode: CacheMode) -> CriteriaResult {
        self.root.update(|state| state.cache_mode = Some(mode))?;

        Ok(self)
    }

    fn set_cache_region(self: Rc<Self>, region: &str) -> CriteriaResult {
        self.root
            .update(|state| state.cache_region = Some(region.to_string()))?;

        Ok(self)
    }

    fn set_cacheable(self: Rc<Self>, cacheable: bool) -> CriteriaResult {
        self.root.update(|state| state.cacheable = cacheable)?;

        Ok(self)
    }

    fn set_comment(self: Rc<Self>, comment: &str) -> CriteriaResult {
        self.root
            .update(|state| state.comment = Some(comment.to_string()))?;

        Ok(self)
    }

    fn set_fetch_mode(self: Rc<Self>, path: &str, mode: FetchMode) -> CriteriaResult {
        validate_path(path)?;
        let qualified = qualify(&self.path, path);
        self.root.update(|state| {
            state.fetch_modes.insert(qualified, mode);
        })?;

        Ok(self)
    }

    fn set_fetch_size(self: Rc<Self>, fetch_size: u32) -> CriteriaResult {
        self.root.update(|state| state.fetch_size = Some(fetch_size))?;

        Ok(self)
    }

    fn set_first_result(self: Rc<Self>, first_result: u32) -> CriteriaResult {
        self.root
            .update(|state| state.first_result = Some(first_result))?;

        Ok(self)
    }

    fn set_max_results(self: Rc<Self>, max_results: u32) -> CriteriaResult {
        self.root
            .update(|state| state.max_results = Some(max_results))?;

        Ok(self)
    }

    fn set_flush_mode(self: Rc<Self>, mode: FlushMode) -> CriteriaResult {
        self.root.update(|state| state.flush_mode = Some(mode))?;

        Ok(self)
    }

    /// Lock mode of this branch only.
    fn set_lock_mode(self: Rc<Self>, mode: LockMode) -> CriteriaResult {
        let slot = self.slot;
        self.root.update(|state| {
            if let Some(entry) = state.subcriteria.get_mut(slot) {
                entry.lock_mode = mode;
            }
        })?;

        Ok(self)
    }

    fn set_alias_lock_mode(self: Rc<Self>, alias: &str, mode: LockMode) -> CriteriaResult {
        Rc::clone(&self.root).set_alias_lock_mode(alias, mode)?;

        Ok(self)
    }

    fn set_projection(self: Rc<Self>, projection: Projection) -> CriteriaResult {
        self.root.project(projection, self.alias.clone())?;

        Ok(self)
    }

    fn set_read_only(self: Rc<Self>, read_only: bool) -> CriteriaResult {
        self.root.update(|state| state.read_only = Some(read_only))?;

        Ok(self)
    }

    fn set_result_transformer(self: Rc<Self>, transformer: ResultTransformer) -> CriteriaResult {
        self.root
            .update(|state| state.result_transformer = transformer)?;

        Ok(self)
    }

    fn set_timeout(self: Rc<Self>, seconds: u32) -> CriteriaResult {
        self.root.update(|state| state.timeout = Some(seconds))?;

        Ok(self)
    }

    fn list(&self) -> Result<Vec<Value>, CriteriaError> {
        self.root.execute_list()
    }

    fn unique_result(&self) -> Result<Option<Value>, CriteriaError> {
        unique_element(self.root.execute_list()?)
    }

    fn scroll(&self) -> Result<ScrollableResults, CriteriaError> {
        self.root.execute_scroll(ScrollMode::default())
    }

    fn scroll_with(&self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError> {
        self.root.execute_scroll(mode)
    }
}
