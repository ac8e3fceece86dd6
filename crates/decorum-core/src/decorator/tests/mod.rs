mod resolution;

use crate::{
    criteria::{CriteriaNode, CriteriaRef, RootCriteria, Subcriteria},
    decorator::Shared,
    test_support::{PlainDecorator, empty_root},
};
use std::rc::Rc;

/// Build `decorator -> sub -> decorator -> sub -> ... -> root` with `depth`
/// decorator/sub-criteria pairs above the root.
fn layered_chain(depth: usize) -> (Rc<RootCriteria>, CriteriaRef) {
    let root = empty_root("Order");
    let mut top: CriteriaRef = root.clone();

    for level in 0..depth {
        let sub: CriteriaRef = Rc::new(Subcriteria::new(
            Rc::clone(&root),
            top,
            format!("level{level}"),
            Some(format!("l{level}")),
            level,
        ));
        let decorated: CriteriaRef = Shared::new(PlainDecorator::new(sub));
        top = decorated;
    }

    (root, top)
}

fn node_label(handle: &CriteriaRef) -> &'static str {
    let node: CriteriaNode = Rc::clone(handle).node();

    node.label()
}

#[test]
fn layered_chain_alternates_node_kinds() {
    let (_, top) = layered_chain(2);

    assert_eq!(node_label(&top), "decorator");
    let CriteriaNode::Decorator { decorated } = Rc::clone(&top).node() else {
        panic!("expected decorator");
    };
    assert_eq!(node_label(&decorated), "subcriteria");
    let CriteriaNode::Subcriteria { parent } = decorated.node() else {
        panic!("expected subcriteria");
    };
    assert_eq!(node_label(&parent), "decorator");
}
