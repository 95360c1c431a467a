//! Integration tests for populating params from the command line

use scopecfg::{populate, CliSource, ConfigError, ParamValue, ParamValues, Scope, Value};
use std::collections::BTreeMap;
use std::time::Duration;

struct Params {
    foo: Value<i64>,
    bar: Value<bool>,
    baz: Value<String>,
    baz2: Value<String>,
    baz3: Value<String>,
}

fn declare(root: &Scope) -> Params {
    Params {
        foo: root.with_int("foo", 5, "Test int param  "),
        bar: root.with_bool("bar", "Test bool param."),
        baz: root.with_string("baz", "baz", "Test string param"),
        baz2: root.with_required_string("baz2", ""),
        baz3: root.with_required_string("baz3", ""),
    }
}

fn cli(args: &[&str]) -> CliSource {
    CliSource::with_args(args.iter().copied())
}

#[test]
fn test_populate_required_and_defaults() {
    let root = Scope::new();
    let p = declare(&root);

    populate(&root, Some(&cli(&["--baz2=x", "--baz3=y"]))).unwrap();
    assert_eq!(p.foo.get(), 5);
    assert!(!p.bar.get());
    assert_eq!(p.baz.get(), "baz");
    assert_eq!(p.baz2.get(), "x");
    assert_eq!(p.baz3.get(), "y");
}

#[test]
fn test_populate_missing_required() {
    let root = Scope::new();
    declare(&root);

    let err = populate(&root, Some(&cli(&["--baz2=x"]))).unwrap_err();
    assert!(matches!(err, ConfigError::RequiredNotSet(_)));
    assert_eq!(err.param(), Some("baz3"));
}

#[test]
fn test_populate_all_forms() {
    let root = Scope::new();
    let p = declare(&root);

    populate(
        &root,
        Some(&cli(&["--foo", "-3", "--bar", "--baz=a=b", "--baz2", "x", "--baz3=y"])),
    )
    .unwrap();
    assert_eq!(p.foo.get(), -3);
    assert!(p.bar.get());
    assert_eq!(p.baz.get(), "a=b");
    assert_eq!(p.baz2.get(), "x");
    assert_eq!(p.baz3.get(), "y");
}

#[test]
fn test_nested_scopes_join_flags() {
    let root = Scope::new();
    let http = root.child_of("http");
    let addr = http.with_string("addr", ":8080", "");
    let tls = http.child_of("tls").with_bool("enabled", "");
    let timeout = http.with_duration("timeout", Duration::from_secs(5), "");

    populate(
        &root,
        Some(&cli(&["--http-addr=:9090", "--http-tls-enabled", "--http-timeout", "1m 30s"])),
    )
    .unwrap();
    assert_eq!(addr.get(), ":9090");
    assert!(tls.get());
    assert_eq!(timeout.get(), Duration::from_secs(90));
}

#[test]
fn test_json_values() {
    let root = Scope::new();
    let users: Value<BTreeMap<String, u32>> = root.with_json("users", BTreeMap::new(), "");
    let peers: Value<Vec<String>> = root.with_json("peers", Vec::new(), "");

    populate(
        &root,
        Some(&cli(&[r#"--users={"alice":1,"bob":2}"#, "--peers", r#"["a:1","b:2"]"#])),
    )
    .unwrap();
    assert_eq!(users.get()["bob"], 2);
    assert_eq!(peers.get(), ["a:1", "b:2"]);
}

#[test]
fn test_invalid_value() {
    let root = Scope::new();
    root.child_of("db").with_int("port", 5432, "");

    let err = populate(&root, Some(&cli(&["--db-port=lots"]))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(err.param(), Some("db/port"));
}

#[test]
fn test_repeated_populate_touches_only_supplied() {
    let root = Scope::new();
    let foo = root.with_int("foo", 5, "");
    let baz = root.with_string("baz", "baz", "");

    populate(&root, Some(&cli(&["--foo=1", "--baz=first"]))).unwrap();
    assert_eq!(foo.get(), 1);
    assert_eq!(baz.get(), "first");

    let values = ParamValues(vec![ParamValue::new(&[], "baz", "\"second\"")]);
    populate(&root, Some(&values)).unwrap();
    assert_eq!(foo.get(), 1);
    assert_eq!(baz.get(), "second");
}

#[test]
fn test_last_flag_wins() {
    let root = Scope::new();
    let foo = root.with_int("foo", 5, "");

    populate(&root, Some(&cli(&["--foo=1", "--foo", "2"]))).unwrap();
    assert_eq!(foo.get(), 2);
}

#[test]
fn test_bool_flag_rejects_separate_value() {
    let root = Scope::new();
    let bar = root.with_bool("bar", "");

    let err = populate(&root, Some(&cli(&["--bar", "false"]))).unwrap_err();
    assert!(matches!(err, ConfigError::BoolWithValue { .. }), "{}", err);
    assert_eq!(err.param(), Some("--bar"));
    assert!(!bar.get());

    let tail = root.with_cli_tail();
    populate(&root, Some(&cli(&["--bar", "false"]))).unwrap();
    assert!(bar.get());
    assert_eq!(tail.get(), ["false"]);
}
