use nova_access::{AccessChange, AccessTransform, AccessTransformSet, ModifierChange};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;

fn arb_access() -> impl Strategy<Value = AccessChange> {
    prop::sample::select(AccessChange::ALL.to_vec())
}

fn arb_modifier() -> impl Strategy<Value = ModifierChange> {
    prop::sample::select(ModifierChange::ALL.to_vec())
}

fn arb_transform() -> impl Strategy<Value = AccessTransform> {
    (arb_access(), arb_modifier())
        .prop_map(|(access, modifier)| AccessTransform::new(access, modifier))
}

/// Merge operations applied to a fresh set: `(class, member, transform)`.
fn arb_operations() -> impl Strategy<Value = Vec<(u8, u8, AccessTransform)>> {
    prop::collection::vec((0u8..3, 0u8..4, arb_transform()), 0..24)
}

fn build(operations: &[(u8, u8, AccessTransform)]) -> AccessTransformSet {
    let mut set = AccessTransformSet::new();
    for (class, member, transform) in operations {
        let class = set.get_or_create_class(&format!("pkg/C{class}"));
        match member {
            0 => {
                class.merge(*transform);
            }
            1 => {
                class.merge_all_fields(*transform);
            }
            _ => {
                class.merge_field(&format!("f{member}"), *transform);
            }
        }
    }
    set
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: PROPTEST_CASES,
        ..ProptestConfig::default()
    })]

    #[test]
    fn access_merge_is_a_join(a in arb_access(), b in arb_access(), c in arb_access()) {
        prop_assert_eq!(a.merge(b), b.merge(a));
        prop_assert_eq!(a.merge(a), a);
        prop_assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        prop_assert_eq!(AccessChange::None.merge(a), a);
        prop_assert!(a.merge(b) >= a && a.merge(b) >= b);
    }

    #[test]
    fn modifier_merge_is_a_join(a in arb_modifier(), b in arb_modifier(), c in arb_modifier()) {
        prop_assert_eq!(a.merge(b), b.merge(a));
        prop_assert_eq!(a.merge(a), a);
        prop_assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        prop_assert_eq!(ModifierChange::None.merge(a), a);
    }

    #[test]
    fn transform_merge_is_a_join(a in arb_transform(), b in arb_transform(), c in arb_transform()) {
        prop_assert_eq!(a.merge(b), b.merge(a));
        prop_assert_eq!(a.merge(a), a);
        prop_assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        prop_assert_eq!(AccessTransform::EMPTY.merge(a), a);
        prop_assert_eq!(a.merge(AccessTransform::EMPTY), a);
        prop_assert_eq!(a.is_empty(), a == AccessTransform::EMPTY);
    }

    #[test]
    fn set_merge_is_order_independent(left in arb_operations(), right in arb_operations()) {
        let mut forward = build(&left);
        forward.merge(&build(&right));

        let mut backward = build(&right);
        backward.merge(&build(&left));

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn set_merge_is_idempotent(operations in arb_operations()) {
        let set = build(&operations);
        let mut merged = set.clone();
        merged.merge(&set);
        prop_assert_eq!(merged, set);
    }
}

#[test]
fn empty_is_the_only_empty_transform() {
    assert!(AccessTransform::EMPTY.is_empty());
    for access in AccessChange::ALL {
        for modifier in ModifierChange::ALL {
            let transform = AccessTransform::new(access, modifier);
            assert_eq!(
                transform.is_empty(),
                access == AccessChange::None && modifier == ModifierChange::None
            );
        }
    }
}

#[test]
fn conflicting_final_changes_resolve_to_remove_in_either_order() {
    let add = AccessTransform::new(AccessChange::Protected, ModifierChange::Add);
    let remove = AccessTransform::new(AccessChange::Private, ModifierChange::Remove);
    let expected = AccessTransform::new(AccessChange::Protected, ModifierChange::Remove);

    assert_eq!(add.merge(remove), expected);
    assert_eq!(remove.merge(add), expected);
}
