use std::collections::{BTreeMap, HashMap};

use ferry::http::{headers, merge_headers, HeaderMap, HeaderSource, HeaderValue};

#[test]
fn later_sources_win() {
    let mut native = HeaderMap::new();
    native.insert(headers::ACCEPT, HeaderValue::from_static("text/html"));
    native.insert(headers::USER_AGENT, HeaderValue::from_static("ferry"));

    let map = BTreeMap::from([
        ("Accept".to_owned(), "application/json".to_owned()),
        ("X-Request-Id".to_owned(), "1".to_owned()),
    ]);

    let pairs: &[(&str, &str)] = &[("x-request-id", "2")];

    let merged = merge_headers([
        Some(HeaderSource::Headers(&native)),
        None,
        Some(HeaderSource::Map(&map)),
        Some(HeaderSource::Pairs(pairs)),
    ])
    .unwrap();

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[headers::ACCEPT], "application/json");
    assert_eq!(merged[headers::USER_AGENT], "ferry");
    assert_eq!(merged["x-request-id"], "2");

    // sources are untouched
    assert_eq!(native.len(), 2);
    assert_eq!(native[headers::ACCEPT], "text/html");
    assert_eq!(map["X-Request-Id"], "1");
}

#[test]
fn hash_map_source() {
    let mut native = HeaderMap::new();
    native.insert(headers::ACCEPT, HeaderValue::from_static("text/html"));

    let map = HashMap::from([
        ("accept".to_owned(), "application/json".to_owned()),
        ("X-Trace".to_owned(), "abc".to_owned()),
    ]);

    let merged = merge_headers([
        Some(HeaderSource::from(&native)),
        Some(HeaderSource::from(&map)),
    ])
    .unwrap();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[headers::ACCEPT], "application/json");
    assert_eq!(merged["x-trace"], "abc");

    let bad = HashMap::from([("x-ok".to_owned(), "line\nbreak".to_owned())]);
    assert!(merge_headers([Some(HeaderSource::HashMap(&bad))]).is_err());
}

#[test]
fn case_insensitive() {
    let first: &[(&str, &str)] = &[("CONTENT-TYPE", "text/plain")];
    let second: &[(&str, &str)] = &[("content-type", "application/json")];

    let merged = merge_headers([
        Some(HeaderSource::Pairs(first)),
        Some(HeaderSource::Pairs(second)),
    ])
    .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[headers::CONTENT_TYPE], "application/json");
}

#[test]
fn replaces_every_value() {
    let mut first = HeaderMap::new();
    first.append(headers::ACCEPT, HeaderValue::from_static("text/html"));
    first.append(headers::ACCEPT, HeaderValue::from_static("text/plain"));

    let mut second = HeaderMap::new();
    second.append(headers::ACCEPT, HeaderValue::from_static("application/json"));
    second.append(headers::ACCEPT, HeaderValue::from_static("application/xml"));

    let merged = merge_headers([
        Some(HeaderSource::from(&first)),
        Some(HeaderSource::from(&second)),
    ])
    .unwrap();

    let accept = merged
        .get_all(headers::ACCEPT)
        .iter()
        .map(|value| value.to_str().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(accept, ["application/json", "application/xml"]);
}

#[test]
fn no_sources() {
    let merged = merge_headers(Vec::<Option<HeaderSource<'_>>>::new()).unwrap();
    assert!(merged.is_empty());

    let merged = merge_headers([None, None]).unwrap();
    assert!(merged.is_empty());
}

#[test]
fn invalid_header() {
    let pairs: &[(&str, &str)] = &[("bad header", "value")];
    assert!(merge_headers([Some(HeaderSource::Pairs(pairs))]).is_err());

    let pairs: &[(&str, &str)] = &[("x-ok", "line\nbreak")];
    assert!(merge_headers([Some(HeaderSource::Pairs(pairs))]).is_err());
}
