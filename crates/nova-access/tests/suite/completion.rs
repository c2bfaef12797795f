use nova_access::{
    AccessChange, AccessTransform, AccessTransformSet, ClassHierarchy, ClassNode,
    InheritanceProvider, MethodSignature, ModifierChange, ACC_PRIVATE, ACC_PROTECTED,
    ACC_PUBLIC,
};
use pretty_assertions::assert_eq;

fn sig(text: &str) -> MethodSignature {
    MethodSignature::parse(text).expect("valid signature")
}

/// `a/A <- a/B <- a/C`, plus `a/I` implemented by `a/C`. Every class declares `run()V`.
fn hierarchy() -> ClassHierarchy {
    [
        ClassNode::new("a/A")
            .with_method(sig("run()V"), ACC_PUBLIC)
            .with_method(sig("hidden()V"), ACC_PROTECTED),
        ClassNode::new("a/B")
            .with_super_class("a/A")
            .with_method(sig("run()V"), ACC_PUBLIC),
        ClassNode::new("a/I").with_method(sig("call()V"), ACC_PUBLIC),
        ClassNode::new("a/C")
            .with_super_class("a/B")
            .with_interface("a/I")
            .with_method(sig("run()V"), ACC_PUBLIC)
            .with_method(sig("call()V"), ACC_PUBLIC)
            .with_method(sig("hidden()V"), ACC_PROTECTED),
    ]
    .into_iter()
    .collect()
}

fn complete(set: &mut AccessTransformSet, hierarchy: &ClassHierarchy, name: &str) {
    let info = hierarchy.provide(name).expect("class in hierarchy");
    set.complete(hierarchy, &info);
}

#[test]
fn explicit_parent_entry_propagates_to_override() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    {
        let a = set.get_or_create_class("a/A");
        a.merge_all_methods(AccessTransform::PUBLIC);
        let run = a.method(&sig("run()V"));
        a.merge_method(&sig("run()V"), run);
    }
    assert_eq!(
        set.class("a/A").unwrap().methods().get(&sig("run()V")),
        Some(&AccessTransform::PUBLIC)
    );

    complete(&mut set, &hierarchy, "a/B");

    let b = set.class("a/B").expect("completion creates the class entry");
    assert!(b.is_complete());
    assert!(set.class("a/A").unwrap().is_complete());
    assert_eq!(b.method(&sig("run()V")), AccessTransform::PUBLIC);
}

#[test]
fn wildcard_defaults_are_not_inherited() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("a/A")
        .merge_all_methods(AccessTransform::PUBLIC);

    complete(&mut set, &hierarchy, "a/B");

    let b = set.class("a/B").unwrap();
    assert!(b.methods().is_empty());
    assert_eq!(b.method(&sig("run()V")), AccessTransform::EMPTY);
}

#[test]
fn transforms_travel_through_the_whole_chain_and_interfaces() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("a/A").merge_method(
        &sig("run()V"),
        AccessTransform::of_final(ModifierChange::Remove),
    );
    set.get_or_create_class("a/A")
        .merge_method(&sig("hidden()V"), AccessTransform::PUBLIC);
    set.get_or_create_class("a/I")
        .merge_method(&sig("call()V"), AccessTransform::PUBLIC);

    complete(&mut set, &hierarchy, "a/C");

    let c = set.class("a/C").unwrap();
    assert_eq!(
        c.method(&sig("run()V")),
        AccessTransform::of_final(ModifierChange::Remove)
    );
    assert_eq!(c.method(&sig("call()V")), AccessTransform::PUBLIC);
    // `a/B` does not declare `hidden()V`, so nothing reaches `a/C` through it.
    assert_eq!(c.method(&sig("hidden()V")), AccessTransform::EMPTY);
}

#[test]
fn completion_only_widens() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("a/A").merge_method(
        &sig("run()V"),
        AccessTransform::of_access(AccessChange::Protected),
    );
    set.get_or_create_class("a/B")
        .merge_method(&sig("run()V"), AccessTransform::PUBLIC);

    complete(&mut set, &hierarchy, "a/B");

    assert_eq!(
        set.class("a/B").unwrap().method(&sig("run()V")),
        AccessTransform::PUBLIC
    );
}

#[test]
fn completion_is_idempotent() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("a/A")
        .merge_method(&sig("run()V"), AccessTransform::PUBLIC);

    complete(&mut set, &hierarchy, "a/C");
    let once = set.clone();
    complete(&mut set, &hierarchy, "a/C");

    assert_eq!(set, once);
}

#[test]
fn completion_is_confluent_across_traversal_orders() {
    let hierarchy = hierarchy();
    let mut seed = AccessTransformSet::new();
    seed.get_or_create_class("a/A")
        .merge_method(&sig("run()V"), AccessTransform::of_access(AccessChange::Protected));
    seed.get_or_create_class("a/B").merge_method(
        &sig("run()V"),
        AccessTransform::of_final(ModifierChange::Add),
    );
    seed.get_or_create_class("a/I")
        .merge_method(&sig("call()V"), AccessTransform::PUBLIC);

    let mut child_first = seed.clone();
    complete(&mut child_first, &hierarchy, "a/C");

    let mut parent_first = seed.clone();
    for name in ["a/A", "a/I", "a/B", "a/C"] {
        complete(&mut parent_first, &hierarchy, name);
    }

    let mut all = seed;
    all.complete_all(&hierarchy);
    complete(&mut all, &hierarchy, "a/C");

    assert_eq!(child_first, parent_first);
    assert_eq!(child_first, all);
    assert_eq!(
        child_first.class("a/C").unwrap().method(&sig("run()V")),
        AccessTransform::new(AccessChange::Protected, ModifierChange::Add)
    );
}

#[test]
fn complete_all_skips_classes_unknown_to_the_provider() {
    let hierarchy = hierarchy();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("x/Unknown")
        .merge(AccessTransform::PUBLIC);
    set.get_or_create_class("a/B");

    set.complete_all(&hierarchy);

    assert!(!set.class("x/Unknown").unwrap().is_complete());
    assert!(set.class("a/B").unwrap().is_complete());
}

#[test]
fn private_child_methods_do_not_inherit_parent_entries() {
    let hierarchy: ClassHierarchy = [
        ClassNode::new("a/A").with_method(sig("run()V"), ACC_PUBLIC),
        ClassNode::new("a/B")
            .with_super_class("a/A")
            .with_method(sig("run()V"), ACC_PRIVATE),
    ]
    .into_iter()
    .collect();
    let mut set = AccessTransformSet::new();
    set.get_or_create_class("a/A")
        .merge_method(&sig("run()V"), AccessTransform::of_final(ModifierChange::Remove));

    complete(&mut set, &hierarchy, "a/B");

    let b = set.class("a/B").unwrap();
    assert!(b.is_complete());
    assert_eq!(b.method(&sig("run()V")), AccessTransform::EMPTY);
}
