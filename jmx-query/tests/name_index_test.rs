//! Name index integration tests

use jmx_core::ObjectName;
use jmx_query::{NameFilter, NameIndex, Query, QueryExp};

fn name(s: &str) -> ObjectName {
    ObjectName::parse(s).unwrap()
}

fn populated() -> NameIndex {
    let mut index = NameIndex::new();
    for n in [
        "java.lang:type=Memory",
        "java.lang:type=GarbageCollector,name=G1 Young Generation",
        "java.lang:type=GarbageCollector,name=G1 Old Generation",
        "java.lang:type=MemoryPool,name=G1 Eden Space",
        "com.example:type=Cache,name=users,region=eu",
        "com.example:type=Cache,name=users,region=us",
        "com.example:type=Pool,name=db",
    ] {
        index.insert(name(n)).unwrap();
    }
    index
}

#[test]
fn test_results_are_sorted_by_domain_then_type() {
    let index = populated();
    let found = index.query_names(None, None);

    assert_eq!(found.len(), 7);
    let mut sorted = found.clone();
    sorted.sort();
    assert_eq!(found, sorted);
    assert_eq!(found[0].domain(), "com.example");
    assert_eq!(found.last().unwrap().key_property("type"), Some("MemoryPool"));
}

#[test]
fn test_value_pattern_requires_exact_arity() {
    let index = populated();

    let found = index.query_names(Some(&name("com.example:type=Cache,name=u*")), None);
    assert!(found.is_empty());

    let found = index.query_names(Some(&name("com.example:type=Cache,name=u*,*")), None);
    assert_eq!(found.len(), 2);
}

#[test]
fn test_pattern_and_expression_combined() {
    let index = populated();
    let gc = name("java.lang:type=GarbageCollector,*");
    let old = Query::matches("*:name=*Old*,*").unwrap();

    let found = index.query_names(Some(&gc), Some(&old));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].key_property("name"), Some("G1 Old Generation"));
}

#[test]
fn test_filters_as_expressions() {
    let index = populated();
    let filters = Query::or(
        NameFilter::new("*:type=Pool,*").unwrap(),
        NameFilter::new("java.lang:type=Memory").unwrap(),
    );

    let found = index.query_names(None, Some(&filters));
    let names: Vec<String> = found.iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["com.example:type=Pool,name=db", "java.lang:type=Memory"]);

    for n in &found {
        assert!(filters.apply(n));
    }
}

#[test]
fn test_removal_is_reflected_in_queries() {
    let mut index = populated();
    let pattern = name("com.example:type=Cache,*");

    assert_eq!(index.query_names(Some(&pattern), None).len(), 2);
    assert!(index.remove(&name("com.example:region=eu,name=users,type=Cache")));
    assert_eq!(index.query_names(Some(&pattern), None).len(), 1);
}
