//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use scopecfg::param::{full_name, param_hash};
use scopecfg::populate::collect_params;
use scopecfg::{ParamValue, Scope};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Test that a scope's path is its parent's path plus its own name
#[test]
fn test_path_derivation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(segment(), 0..6), |names| {
            let root = Scope::new();
            let mut scope = root.clone();
            for name in &names {
                let parent = scope.clone();
                scope = scope.child_of(name);
                let mut expected = parent.path().to_vec();
                expected.push(name.clone());
                assert_eq!(scope.path(), expected.as_slice());
                assert_eq!(scope.root(), root);
            }
            assert_eq!(scope.path(), names.as_slice());
            Ok(())
        })
        .unwrap();
}

/// Test that param identity depends only on path and name
#[test]
fn test_param_hash_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(segment(), 0..4), segment(), segment()),
            |(path, name1, name2)| {
                let root = Scope::new();
                let mut scope = root.clone();
                for seg in &path {
                    scope = scope.child_of(seg);
                }
                scope.with_int(&name1, 0, "");
                let param = scope.local_params().remove(0);

                // declared params and parsed values agree on identity
                let refs: Vec<&str> = path.iter().map(String::as_str).collect();
                let value = ParamValue::new(&refs, &name1, "1");
                assert_eq!(param.hash(), value.hash());
                assert_eq!(param.hash(), param_hash(path.as_slice(), &name1));
                assert!(param.hash().as_str().starts_with(&full_name(path.as_slice(), &name1)));

                if name1 != name2 {
                    prop_assert_ne!(
                        param_hash(path.as_slice(), &name1),
                        param_hash(path.as_slice(), &name2)
                    );
                }
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    /// Test that collection order is independent of declaration order
    #[test]
    fn test_collect_order_property(
        decls in prop::collection::btree_set((prop::collection::vec(segment(), 0..3), segment()), 1..12),
        seed in any::<u64>(),
    ) {
        let decls: Vec<_> = decls.into_iter().collect();
        let mut shuffled = decls.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed % len as u64) as usize);
        if seed & 1 == 1 {
            shuffled.reverse();
        }

        let collect = |order: &[(Vec<String>, String)]| {
            let root = Scope::new();
            for (path, name) in order {
                let mut scope = root.clone();
                for seg in path {
                    scope = scope.child_of(seg);
                }
                scope.with_bool(name, "");
            }
            collect_params(&root)
                .iter()
                .map(|p| (p.path().to_vec(), p.name().to_string()))
                .collect::<Vec<_>>()
        };

        let first = collect(&decls);
        let second = collect(&shuffled);
        prop_assert_eq!(&first, &second);

        let mut sorted = first.clone();
        sorted.sort();
        prop_assert_eq!(first, sorted);
    }
}
