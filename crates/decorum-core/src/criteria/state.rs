use crate::{
    expr::{Criterion, Order, Projection, ResultTransformer},
    mode::{CacheMode, FetchMode, FlushMode, JoinType, LockMode},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// CriterionEntry
/// One filter predicate plus the alias of the builder that added it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CriterionEntry {
    pub criterion: Criterion,
    pub alias: Option<String>,
}

///
/// OrderEntry
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderEntry {
    pub order: Order,
    pub alias: Option<String>,
}

///
/// SubcriteriaEntry
///
/// Registration of one association branch (alias or sub-criteria).
/// `path` is qualified with the path of the sub-criteria it was created from.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SubcriteriaEntry {
    pub path: String,
    pub alias: Option<String>,
    pub join_type: JoinType,
    pub with_clause: Option<Criterion>,
    pub lock_mode: LockMode,
}

///
/// QueryState
///
/// Everything a criteria chain has accumulated so far.
/// Owned by the root builder; executors receive it by reference.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryState {
    pub entity_name: String,
    pub criterion_entries: Vec<CriterionEntry>,
    pub order_entries: Vec<OrderEntry>,
    pub subcriteria: Vec<SubcriteriaEntry>,
    pub fetch_modes: BTreeMap<String, FetchMode>,
    pub lock_modes: BTreeMap<String, LockMode>,
    pub lock_mode: LockMode,
    pub projection: Option<Projection>,
    pub projection_alias: Option<String>,
    pub result_transformer: ResultTransformer,
    pub first_result: Option<u32>,
    pub max_results: Option<u32>,
    pub fetch_size: Option<u32>,
    pub timeout: Option<u32>,
    pub cacheable: bool,
    pub cache_region: Option<String>,
    pub cache_mode: Option<CacheMode>,
    pub flush_mode: Option<FlushMode>,
    pub comment: Option<String>,
    pub read_only: Option<bool>,
}

impl QueryState {
    #[must_use]
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            ..Self::default()
        }
    }

    /// Return true when `alias` is already bound somewhere in the chain.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        alias == super::ROOT_ALIAS
            || self
                .subcriteria
                .iter()
                .any(|entry| entry.alias.as_deref() == Some(alias))
    }

    /// Find the registered branch bound to `alias`.
    #[must_use]
    pub fn subcriteria_by_alias(&self, alias: &str) -> Option<&SubcriteriaEntry> {
        self.subcriteria
            .iter()
            .find(|entry| entry.alias.as_deref() == Some(alias))
    }

    /// Return true when rows are shaped by a projection rather than entities.
    #[must_use]
    pub const fn has_projection(&self) -> bool {
        self.projection.is_some()
    }
}
