use interactor_rail::Value;
use std::collections::BTreeMap;

#[derive(Debug, PartialEq)]
struct Session {
    id: u32,
}

#[test]
fn scalar_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(3), Value::Int(3));
    assert_eq!(Value::from(3u32), Value::Int(3));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from("x"), Value::Str("x".to_owned()));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(2i64)), Value::Int(2));
}

#[test]
fn accessors_match_variants() {
    assert_eq!(Value::Int(4).as_f64(), Some(4.0));
    assert_eq!(Value::Str("4".to_owned()).as_i64(), None);
    assert_eq!(Value::Bool(false).as_bool(), Some(false));
    assert!(Value::default().is_null());

    let list = Value::from(vec![1, 2]);
    assert_eq!(list.as_list(), Some(&[Value::Int(1), Value::Int(2)][..]));

    let mut map = BTreeMap::new();
    map.insert("k".to_owned(), Value::from("v"));
    let map = Value::from(map);
    assert_eq!(map.as_map().map(BTreeMap::len), Some(1));
    assert_eq!(map.type_name(), "map");
}

#[test]
fn opaque_values_downcast_and_compare_by_identity() {
    let session = Value::opaque(Session { id: 9 });
    let same = session.clone();
    let other = Value::opaque(Session { id: 9 });

    assert_eq!(session.downcast_ref::<Session>(), Some(&Session { id: 9 }));
    assert_eq!(session.downcast_ref::<String>(), None);
    assert_eq!(session, same);
    assert_ne!(session, other);
    assert_eq!(format!("{:?}", session), "Opaque(..)");
    assert_eq!(session.type_name(), "opaque");
    assert_eq!(Value::Null.type_name(), "null");
}

#[test]
fn display_renders_nested_values() {
    let mut map = BTreeMap::new();
    map.insert("tags".to_owned(), Value::from(vec!["a", "b"]));
    map.insert("n".to_owned(), Value::Null);

    assert_eq!(Value::from(map).to_string(), "{n: null, tags: [a, b]}");
}
