use crate::{
    criteria::{CriteriaNode, CriteriaRef, RootCriteria},
    error::CriteriaError,
};
use std::rc::Rc;

/// Upper bound on decorator and sub-criteria layers walked during root
/// resolution. Anything deeper is treated as a cycle.
pub const MAX_CHAIN_DEPTH: usize = 1024;

/// Resolve the root builder of the chain `criteria` belongs to.
///
/// Decorator layers are unwrapped and sub-criteria are replaced by their
/// parent, in whatever order they are stacked, until a root is reached.
/// A handle that is none of root, sub-criteria, or decorator is a misuse of
/// the decoration contract and fails with `InvalidState`, as does a decorator
/// layer that is borrowed for the duration of the call.
pub fn resolve_root(criteria: &CriteriaRef) -> Result<Rc<RootCriteria>, CriteriaError> {
    let mut current = Rc::clone(criteria);

    for _ in 0..MAX_CHAIN_DEPTH {
        current = match current.node() {
            CriteriaNode::Root(root) => return Ok(root),
            CriteriaNode::Decorator { decorated } => decorated,
            CriteriaNode::Subcriteria { parent } => parent,
            CriteriaNode::InUse => {
                return Err(CriteriaError::decorator_state("decorator is already in use"));
            }
            CriteriaNode::Opaque => {
                return Err(CriteriaError::decorator_state(
                    "decorated criteria must be a root criteria, a subcriteria, or a decorator",
                ));
            }
        };
    }

    Err(CriteriaError::decorator_state(format!(
        "criteria chain exceeds {MAX_CHAIN_DEPTH} layers without reaching a root"
    )))
}
