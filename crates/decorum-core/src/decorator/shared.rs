use crate::{
    criteria::{Criteria, CriteriaNode, CriteriaResult, ScrollableResults},
    decorator::CriteriaDecorator,
    error::CriteriaError,
    expr::{Criterion, Order, Projection, ResultTransformer, Value},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode, ScrollMode},
};
use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

///
/// Shared
///
/// A decorator usable as a `Criteria` handle.
///
/// Lets decorators stack (a decorator decorating a decorator) and lets a
/// decorator be the parent of sub-criteria. Builder calls delegate to the
/// wrapped decorator, hooks included, and hand back this same handle.
///

pub struct Shared<D>(RefCell<D>);

impl<D: CriteriaDecorator> Shared<D> {
    #[must_use]
    pub fn new(decorator: D) -> Rc<Self> {
        Rc::new(Self(RefCell::new(decorator)))
    }

    #[must_use]
    pub fn borrow(&self) -> Ref<'_, D> {
        self.0.borrow()
    }

    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, D> {
        self.0.borrow_mut()
    }

    #[must_use]
    pub fn into_inner(self) -> D {
        self.0.into_inner()
    }

    fn with_mut<R>(
        &self,
        f: impl FnOnce(&mut D) -> Result<R, CriteriaError>,
    ) -> Result<R, CriteriaError> {
        let mut decorator = self
            .0
            .try_borrow_mut()
            .map_err(|_| CriteriaError::decorator_state("decorator is already in use"))?;

        f(&mut decorator)
    }

    fn chain(
        self: Rc<Self>,
        f: impl FnOnce(&mut D) -> Result<&mut D, CriteriaError>,
    ) -> Result<Rc<Self>, CriteriaError> {
        self.with_mut(|decorator| f(decorator).map(|_| ()))?;

        Ok(self)
    }
}

impl<D: CriteriaDecorator> fmt::Debug for Shared<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = self.0.try_borrow().ok().and_then(|d| d.alias());

        f.debug_struct("Shared")
            .field("alias", &alias)
            .finish_non_exhaustive()
    }
}

impl<D: CriteriaDecorator + 'static> Criteria for Shared<D> {
    fn node(self: Rc<Self>) -> CriteriaNode {
        let decorated = self.0.try_borrow().map(|d| Rc::clone(d.criteria()));

        match decorated {
            Ok(decorated) => CriteriaNode::Decorator { decorated },
            Err(_) => CriteriaNode::InUse,
        }
    }

    // accessors report nothing while the decorator is mutably borrowed

    fn alias(&self) -> Option<String> {
        self.0.try_borrow().ok().and_then(|d| d.alias())
    }

    fn is_read_only(&self) -> bool {
        self.0.try_borrow().is_ok_and(|d| d.is_read_only())
    }

    fn is_read_only_initialized(&self) -> bool {
        self.0
            .try_borrow()
            .is_ok_and(|d| d.is_read_only_initialized())
    }

    fn add(self: Rc<Self>, criterion: Criterion) -> CriteriaResult {
        Ok(self.chain(|d| d.add(criterion))?)
    }

    fn add_order(self: Rc<Self>, order: Order) -> CriteriaResult {
        Ok(self.chain(|d| d.add_order(order))?)
    }

    fn create_alias(
        self: Rc<Self>,
        path: &str,
        alias: &str,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        Ok(self.chain(|d| match with_clause {
            Some(with_clause) => d.create_alias_with(path, alias, join_type, with_clause),
            None => d.create_alias_join(path, alias, join_type),
        })?)
    }

    fn create_criteria(
        self: Rc<Self>,
        path: &str,
        alias: Option<&str>,
        join_type: JoinType,
        with_clause: Option<Criterion>,
    ) -> CriteriaResult {
        Ok(self.chain(|d| d.create_criteria_as(path, alias, join_type, with_clause))?)
    }

    fn set_cache_mode(self: Rc<Self>, mode: CacheMode) -> CriteriaResult {
        Ok(self.chain(|d| d.set_cache_mode(mode))?)
    }

    fn set_cache_region(self: Rc<Self>, region: &str) -> CriteriaResult {
        Ok(self.chain(|d| d.set_cache_region(region))?)
    }

    fn set_cacheable(self: Rc<Self>, cacheable: bool) -> CriteriaResult {
        Ok(self.chain(|d| d.set_cacheable(cacheable))?)
    }

    fn set_comment(self: Rc<Self>, comment: &str) -> CriteriaResult {
        Ok(self.chain(|d| d.set_comment(comment))?)
    }

    fn set_fetch_mode(self: Rc<Self>, path: &str, mode: FetchMode) -> CriteriaResult {
        Ok(self.chain(|d| d.set_fetch_mode(path, mode))?)
    }

    fn set_fetch_size(self: Rc<Self>, fetch_size: u32) -> CriteriaResult {
        Ok(self.chain(|d| d.set_fetch_size(fetch_size))?)
    }

    fn set_first_result(self: Rc<Self>, first_result: u32) -> CriteriaResult {
        Ok(self.chain(|d| d.set_first_result(first_result))?)
    }

    fn set_max_results(self: Rc<Self>, max_results: u32) -> CriteriaResult {
        Ok(self.chain(|d| d.set_max_results(max_results))?)
    }

    fn set_flush_mode(self: Rc<Self>, mode: FlushMode) -> CriteriaResult {
        Ok(self.chain(|d| d.set_flush_mode(mode))?)
    }

    fn set_lock_mode(self: Rc<Self>, mode: LockMode) -> CriteriaResult {
        Ok(self.chain(|d| d.set_lock_mode(mode))?)
    }

    fn set_alias_lock_mode(self: Rc<Self>, alias: &str, mode: LockMode) -> CriteriaResult {
        Ok(self.chain(|d| d.set_alias_lock_mode(alias, mode))?)
    }

    fn set_projection(self: Rc<Self>, projection: Projection) -> CriteriaResult {
        Ok(self.chain(|d| d.set_projection(projection))?)
    }

    fn set_read_only(self: Rc<Self>, read_only: bool) -> CriteriaResult {
        Ok(self.chain(|d| d.set_read_only(read_only))?)
    }

    fn set_result_transformer(self: Rc<Self>, transformer: ResultTransformer) -> CriteriaResult {
        Ok(self.chain(|d| d.set_result_transformer(transformer))?)
    }

    fn set_timeout(self: Rc<Self>, seconds: u32) -> CriteriaResult {
        Ok(self.chain(|d| d.set_timeout(seconds))?)
    }

    fn list(&self) -> Result<Vec<Value>, CriteriaError> {
        self.with_mut(CriteriaDecorator::list)
    }

    fn unique_result(&self) -> Result<Option<Value>, CriteriaError> {
        self.with_mut(CriteriaDecorator::unique_result)
    }

    fn scroll(&self) -> Result<ScrollableResults, CriteriaError> {
        self.with_mut(CriteriaDecorator::scroll)
    }

    fn scroll_with(&self, mode: ScrollMode) -> Result<ScrollableResults, CriteriaError> {
        self.with_mut(|d| d.scroll_with(mode))
    }
}
