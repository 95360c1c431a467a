//! Integration tests for scope tree structure

use scopecfg::Scope;
use std::collections::HashMap;

#[test]
fn test_inheritance() {
    let root = Scope::new();
    let one = root.child_of("1");
    let one_a = one.child_of("a");
    let one_b = one.child_of("b");
    let two = root.child_of("2");

    assert!(root.path().is_empty());
    assert_eq!(one.path(), ["1"]);
    assert_eq!(one_a.path(), ["1", "a"]);
    assert_eq!(one_b.path(), ["1", "b"]);
    assert_eq!(two.path(), ["2"]);

    let expected: HashMap<String, Scope> =
        [("1".to_string(), one.clone()), ("2".to_string(), two.clone())].into();
    assert_eq!(root.children(), expected);
    let expected: HashMap<String, Scope> =
        [("a".to_string(), one_a.clone()), ("b".to_string(), one_b.clone())].into();
    assert_eq!(one.children(), expected);
    assert!(two.children().is_empty());

    assert!(root.parent().is_none());
    assert_eq!(one.parent(), Some(root.clone()));
    assert_eq!(one_a.parent(), Some(one.clone()));
    assert_eq!(one_b.parent(), Some(one.clone()));
    assert_eq!(two.parent(), Some(root.clone()));

    for scope in [&root, &one, &one_a, &one_b, &two] {
        assert_eq!(scope.root(), root);
    }
}

#[test]
fn test_breadth_first_visit_order() {
    let root = Scope::new();
    let one = root.child_of("1");
    let one_a = one.child_of("a");
    let one_b = one.child_of("b");
    let two = root.child_of("2");

    let mut got = Vec::new();
    root.breadth_first_visit(|scope| {
        got.push(scope.clone());
        true
    });

    // children live in a map, so sibling order is not fixed
    let valid = [
        vec![&root, &one, &two, &one_a, &one_b],
        vec![&root, &one, &two, &one_b, &one_a],
        vec![&root, &two, &one, &one_a, &one_b],
        vec![&root, &two, &one, &one_b, &one_a],
    ];
    let got_refs: Vec<&Scope> = got.iter().collect();
    assert!(valid.contains(&got_refs), "unexpected order: {:?}", got);
}

#[test]
fn test_breadth_first_visit_prune() {
    let root = Scope::new();
    let one = root.child_of("1");
    one.child_of("a");
    one.child_of("b");
    let two = root.child_of("2");

    let mut got = Vec::new();
    root.breadth_first_visit(|scope| {
        if scope.path().len() > 1 {
            return false;
        }
        got.push(scope.clone());
        true
    });

    assert!(got == [root.clone(), one.clone(), two.clone()] || got == [root, two, one]);
}

#[test]
fn test_scopes_shared_across_threads() {
    let root = Scope::new();
    let child = root.child_of("worker");

    let handle = std::thread::spawn(move || child.path().to_vec());
    assert_eq!(handle.join().unwrap(), ["worker"]);
}
