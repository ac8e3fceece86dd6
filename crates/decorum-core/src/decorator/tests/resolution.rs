use super::layered_chain;
use crate::{
    criteria::{Criteria, CriteriaRef},
    decorator::{CriteriaDecorator, MAX_CHAIN_DEPTH, Shared, resolve_root},
    error::{ErrorClass, ErrorOrigin},
    mode::JoinType,
    test_support::{ForeignCriteria, PlainDecorator, empty_root},
};
use std::rc::Rc;

#[test]
fn root_resolves_through_alternating_layers() {
    for depth in [0, 1, 3] {
        let (root, top) = layered_chain(depth);
        let decorator = PlainDecorator::new(top);

        let resolved = decorator.root_criteria().expect("chain has a root");

        assert!(Rc::ptr_eq(&resolved, &root), "depth {depth}");
        assert_eq!(decorator.root_entity_name().as_deref(), Ok("Order"));
    }
}

#[test]
fn root_resolves_through_deep_chains() {
    let (root, top) = layered_chain(200);

    let resolved = resolve_root(&top).expect("deep chain still resolves");

    assert!(Rc::ptr_eq(&resolved, &root));
}

#[test]
fn is_root_criteria_only_looks_at_the_decorated_handle() {
    let root = empty_root("Order");
    let over_root = PlainDecorator::new(root.clone());

    let sub = Rc::clone(&root)
        .create_criteria("items", Some("i"), JoinType::InnerJoin, None)
        .expect("sub");
    let over_sub = PlainDecorator::new(sub);

    let inner: CriteriaRef = Shared::new(PlainDecorator::new(root));
    let over_decorator = PlainDecorator::new(inner);

    assert!(over_root.is_root_criteria());
    assert!(!over_sub.is_root_criteria());
    assert!(!over_decorator.is_root_criteria());
    assert!(over_decorator.root_criteria().is_ok());
}

#[test]
fn root_entity_name_comes_from_the_root_not_the_branch() {
    let root = empty_root("Invoice");
    let mut decorator = PlainDecorator::new(root);

    decorator
        .create_criteria_alias("lines", "l")
        .and_then(|d| d.create_criteria_alias("product", "p"))
        .expect("branches");

    assert_eq!(decorator.alias().as_deref(), Some("p"));
    assert_eq!(decorator.root_entity_name().as_deref(), Ok("Invoice"));
}

#[test]
fn foreign_handle_is_invalid_state() {
    let decorator = PlainDecorator::new(ForeignCriteria::handle());

    let err = decorator.root_criteria().expect_err("foreign handle has no root");

    assert_eq!(err.class, ErrorClass::InvalidState);
    assert_eq!(err.origin, ErrorOrigin::Decorator);
    assert!(!decorator.is_root_criteria());
    assert!(decorator.root_entity_name().is_err());
}

#[test]
fn foreign_handle_below_a_decorator_is_invalid_state() {
    let inner: CriteriaRef = Shared::new(PlainDecorator::new(ForeignCriteria::handle()));
    let decorator = PlainDecorator::new(inner);

    let err = decorator.root_criteria().expect_err("foreign handle has no root");

    assert!(err.is_invalid_state());
}

#[test]
fn self_decorating_cycle_is_cut_off() {
    let shared = Shared::new(PlainDecorator::new(empty_root("Order")));
    let handle: CriteriaRef = shared.clone();
    shared.borrow_mut().decorate(Rc::clone(&handle));

    let err = resolve_root(&handle).expect_err("cycle never reaches a root");

    assert!(err.is_invalid_state());
    assert!(err.message.contains(&MAX_CHAIN_DEPTH.to_string()));
}

#[test]
fn subcriteria_created_through_a_decorator_point_at_its_inner_handle() {
    let root = empty_root("Order");
    let mut decorator = PlainDecorator::new(root.clone());

    decorator.create_criteria_alias("items", "i").expect("branch");

    let sub = Rc::clone(decorator.criteria());
    let crate::criteria::CriteriaNode::Subcriteria { parent } = sub.node() else {
        panic!("expected subcriteria");
    };
    let root_handle: CriteriaRef = root;
    assert!(Rc::ptr_eq(&parent, &root_handle));
}

#[test]
fn shared_decorator_reports_the_wrapped_alias() {
    let root = empty_root("Order");
    let sub = root
        .create_criteria("items", Some("i"), JoinType::InnerJoin, None)
        .expect("sub");
    let shared: CriteriaRef = Shared::new(PlainDecorator::new(sub));

    assert_eq!(shared.alias().as_deref(), Some("i"));
    assert!(!shared.is_read_only_initialized());
}

#[test]
fn borrowed_decorator_layer_reports_in_use() {
    let shared = Shared::new(PlainDecorator::new(empty_root("Order")));
    let handle: CriteriaRef = shared.clone();
    let decorator = PlainDecorator::new(Rc::clone(&handle));
    let guard = shared.borrow_mut();

    assert_eq!(super::node_label(&handle), "in_use");
    let err = decorator.root_criteria().expect_err("layer is borrowed");

    assert!(err.is_invalid_state());
    assert_eq!(err.message, "decorator is already in use");

    drop(guard);
    assert!(decorator.root_criteria().is_ok());
}
