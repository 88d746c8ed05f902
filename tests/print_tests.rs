use assay::{render, render_with, PrintConfig};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Serialize)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct Meters(f64);

#[derive(Serialize)]
struct Marker;

#[derive(Serialize)]
struct Pair(u8, char);

#[derive(Serialize)]
enum Shape {
    Empty,
    Circle { radius: f32 },
    Square(u32),
    Line(i8, i8),
}

#[test]
fn test_render_string() {
    assert_eq!(render("hi").unwrap(), "(string) (len=2) \"hi\"\n");
    assert_eq!(
        render(&"tab\there".to_string()).unwrap(),
        "(string) (len=8) \"tab\\there\"\n"
    );
}

#[test]
fn test_render_multiline_string() {
    assert_eq!(
        render("a\nb").unwrap(),
        "(string) (len=3) \"\"\"\n  a\n  b\n\"\"\"\n"
    );
}

#[test]
fn test_multiline_and_escaped_newline_differ() {
    assert_ne!(render("a\nb").unwrap(), render("a\\nb").unwrap());
    assert_ne!(render("a\n").unwrap(), render("a").unwrap());
}

#[test]
fn test_render_struct() {
    assert_eq!(
        render(&Point { x: 1, y: -2 }).unwrap(),
        "(Point) {\n  x: (i32) 1\n  y: (i32) -2\n}\n"
    );
}

#[test]
fn test_render_newtype_and_unit_structs() {
    assert_eq!(render(&Meters(1.5)).unwrap(), "(Meters) (f64) 1.5\n");
    assert_eq!(render(&Marker).unwrap(), "(Marker) Marker\n");
    assert_eq!(
        render(&Pair(7, 'z')).unwrap(),
        "(Pair) {\n  (u8) 7\n  (char) 'z'\n}\n"
    );
}

#[test]
fn test_render_enum_variants() {
    assert_eq!(render(&Shape::Empty).unwrap(), "(Shape) Empty\n");
    assert_eq!(
        render(&Shape::Circle { radius: 2.0 }).unwrap(),
        "(Shape::Circle) {\n  radius: (f32) 2.0\n}\n"
    );
    assert_eq!(
        render(&Shape::Square(4)).unwrap(),
        "(Shape::Square) (u32) 4\n"
    );
    assert_eq!(
        render(&Shape::Line(1, -1)).unwrap(),
        "(Shape::Line) {\n  (i8) 1\n  (i8) -1\n}\n"
    );
}

#[test]
fn test_render_nested_sequences() {
    let nested = vec![vec![1u8], vec![]];
    assert_eq!(
        render(&nested).unwrap(),
        "(Vec<Vec<u8>>) (len=2) {\n  (Vec<u8>) (len=1) {\n    (u8) 1\n  }\n  (Vec<u8>) (len=0) {}\n}\n"
    );
}

#[test]
fn test_render_tuple() {
    assert_eq!(
        render(&(1u8, "a")).unwrap(),
        "((u8, &str)) {\n  (u8) 1\n  (string) (len=1) \"a\"\n}\n"
    );
}

#[test]
fn test_render_map_sorts_keys() {
    let map: HashMap<&str, bool> = [("zeta", true), ("alpha", false), ("mid", true)]
        .into_iter()
        .collect();
    assert_eq!(
        render(&map).unwrap(),
        concat!(
            "(HashMap<&str, bool>) (len=3) {\n",
            "  (string) (len=5) \"alpha\": (bool) false\n",
            "  (string) (len=3) \"mid\": (bool) true\n",
            "  (string) (len=4) \"zeta\": (bool) true\n",
            "}\n",
        )
    );
}

#[test]
fn test_render_map_with_composite_values() {
    let mut map = BTreeMap::new();
    map.insert(1u16, vec!['a']);
    assert_eq!(
        render(&map).unwrap(),
        "(BTreeMap<u16, Vec<char>>) (len=1) {\n  (u16) 1: (Vec<char>) (len=1) {\n    (char) 'a'\n  }\n}\n"
    );
}

#[test]
fn test_render_hash_set_is_sorted() {
    let set: HashSet<u32> = (0..20).rev().collect();
    let text = render(&set).unwrap();
    let values: Vec<&str> = text.lines().skip(1).take(20).map(str::trim).collect();
    let expected: Vec<String> = (0..20).map(|i| format!("(u32) {i}")).collect();
    assert_eq!(values, expected);
}

struct Ordered(Vec<(&'static str, u8)>);

impl Serialize for Ordered {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[test]
fn test_unsorted_config_keeps_serialization_order() {
    let value = Ordered(vec![("b", 1), ("a", 2)]);

    let sorted = render(&value).unwrap();
    assert!(sorted.find("\"a\"").unwrap() < sorted.find("\"b\"").unwrap());

    let config = PrintConfig {
        sort_keys: false,
        ..Default::default()
    };
    let unsorted = render_with(&value, &config).unwrap();
    assert_eq!(
        unsorted,
        "(Ordered) (len=2) {\n  (string) (len=1) \"b\": (u8) 1\n  (string) (len=1) \"a\": (u8) 2\n}\n"
    );
}

#[test]
fn test_numeric_keys_sort_numerically() {
    let map: HashMap<i32, ()> = [(10, ()), (9, ()), (-3, ())].into_iter().collect();
    let text = render(&map).unwrap();
    let keys: Vec<&str> = text
        .lines()
        .skip(1)
        .take(3)
        .map(|line| line.trim().split(':').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["(i32) -3", "(i32) 9", "(i32) 10"]);
}

#[test]
fn test_render_bytes() {
    #[derive(Serialize)]
    struct Blob<'a> {
        #[serde(with = "bytes_as_bytes")]
        data: &'a [u8],
    }

    mod bytes_as_bytes {
        pub fn serialize<S: serde::Serializer>(data: &&[u8], s: S) -> Result<S::Ok, S::Error> {
            s.serialize_bytes(data)
        }
    }

    assert_eq!(
        render(&Blob { data: &[0x0a, 0xff] }).unwrap(),
        "(Blob) {\n  data: (bytes) (len=2) 0a ff\n}\n"
    );
}

#[test]
fn test_render_is_deterministic() {
    let map: HashMap<String, Vec<i64>> = (0..30).map(|i| (format!("k{i}"), vec![i, -i])).collect();
    let first = render(&map).unwrap();
    for _ in 0..5 {
        let copy: HashMap<String, Vec<i64>> = map.clone().into_iter().collect();
        assert_eq!(render(&copy).unwrap(), first);
    }
}

#[test]
fn test_nested_hash_set_labels_and_order() {
    let sets: Vec<HashSet<u8>> = vec![[3, 1, 2].into_iter().collect()];
    assert_eq!(
        render(&sets).unwrap(),
        "(Vec<HashSet<u8>>) (len=1) {\n  (HashSet<u8>) (len=3) {\n    (u8) 1\n    (u8) 2\n    (u8) 3\n  }\n}\n"
    );
}

#[test]
fn test_nested_hash_set_render_is_deterministic() {
    let first = render(&vec![(0..16).collect::<HashSet<u32>>()]).unwrap();
    for _ in 0..20 {
        let fresh = vec![(0..16).collect::<HashSet<u32>>()];
        assert_eq!(render(&fresh).unwrap(), first);
    }
}

#[test]
fn test_hash_set_in_map_value_is_sorted() {
    let mut map = BTreeMap::new();
    map.insert("ids", (0..10).rev().collect::<HashSet<i64>>());
    let text = render(&map).unwrap();
    let values: Vec<&str> = text.lines().skip(2).take(10).map(str::trim).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("(i64) {i}")).collect();
    assert_eq!(values, expected);
}
