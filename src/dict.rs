//! `filter` and `map` for string-keyed dictionaries.
//!
//! Both functions read the source through a shared reference and collect
//! into any map type, so `HashMap`, `BTreeMap` and friends all work as
//! either side.

/// Like [`Iterator::filter`] but for dictionaries.
///
/// Keeps the entries for which `predicate(value, key)` returns `true`, in
/// the iteration order of `dict`.
///
/// ```
/// use std::collections::BTreeMap;
/// use ferry::dict::filter_dictionary;
///
/// let dict = BTreeMap::from([("a".to_owned(), 1), ("b".to_owned(), 2)]);
/// let filtered: BTreeMap<_, _> = filter_dictionary(&dict, |value, _| *value > 1);
///
/// assert_eq!(filtered, BTreeMap::from([("b".to_owned(), 2)]));
/// ```
pub fn filter_dictionary<'a, I, V, P, D>(dict: I, mut predicate: P) -> D
where
    I: IntoIterator<Item = (&'a String, &'a V)>,
    V: Clone + 'a,
    P: FnMut(&V, &str) -> bool,
    D: FromIterator<(String, V)>,
{
    dict.into_iter()
        .filter(|(key, value)| predicate(value, key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Like [`Iterator::map`] but for dictionaries.
///
/// `iteratee(value, key)` returns the new value and the new key for every
/// entry. When two entries are given the same new key the one visited
/// last wins, without any notice.
///
/// ```
/// use std::collections::BTreeMap;
/// use ferry::dict::map_dictionary;
///
/// let dict = BTreeMap::from([("a".to_owned(), 1), ("b".to_owned(), 2)]);
/// let mapped: BTreeMap<_, _> =
///     map_dictionary(&dict, |value, key| (value * 10, format!("{}_x", key)));
///
/// assert_eq!(
///     mapped,
///     BTreeMap::from([("a_x".to_owned(), 10), ("b_x".to_owned(), 20)])
/// );
/// ```
pub fn map_dictionary<'a, I, V, N, F, D>(dict: I, mut iteratee: F) -> D
where
    I: IntoIterator<Item = (&'a String, &'a V)>,
    V: 'a,
    F: FnMut(&V, &str) -> (N, String),
    D: FromIterator<(String, N)>,
{
    dict.into_iter()
        .map(|(key, value)| {
            let (value, key) = iteratee(value, key);
            (key, value)
        })
        .collect()
}
