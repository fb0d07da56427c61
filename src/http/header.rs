use crate::Error;

use std::collections::{BTreeMap, HashMap};

use http::header::{HeaderMap, HeaderName, HeaderValue};

/// A source of headers for [`merge_headers`].
#[derive(Debug, Clone, Copy)]
pub enum HeaderSource<'a> {
    /// A native header collection.
    Headers(&'a HeaderMap),
    /// A plain string-keyed mapping.
    Map(&'a BTreeMap<String, String>),
    /// A plain string-keyed hash map. Entries are applied in the map's
    /// iteration order.
    HashMap(&'a HashMap<String, String>),
    /// Plain name/value pairs.
    Pairs(&'a [(&'a str, &'a str)]),
}

impl<'a> From<&'a HeaderMap> for HeaderSource<'a> {
    fn from(headers: &'a HeaderMap) -> Self {
        HeaderSource::Headers(headers)
    }
}

impl<'a> From<&'a BTreeMap<String, String>> for HeaderSource<'a> {
    fn from(map: &'a BTreeMap<String, String>) -> Self {
        HeaderSource::Map(map)
    }
}

impl<'a> From<&'a HashMap<String, String>> for HeaderSource<'a> {
    fn from(map: &'a HashMap<String, String>) -> Self {
        HeaderSource::HashMap(map)
    }
}

impl<'a> From<&'a [(&'a str, &'a str)]> for HeaderSource<'a> {
    fn from(pairs: &'a [(&'a str, &'a str)]) -> Self {
        HeaderSource::Pairs(pairs)
    }
}

/// Merge header collections into a new header collection.
///
/// Sources are applied in order and a header set by a later source
/// replaces every value an earlier source set for the same name. Header
/// names are case-insensitive. `None` sources are skipped and no source
/// is modified.
///
/// ```
/// use ferry::http::{merge_headers, HeaderSource};
///
/// let defaults: &[(&str, &str)] = &[("accept", "text/plain"), ("x-trace", "1")];
/// let overrides: &[(&str, &str)] = &[("Accept", "application/json")];
///
/// let merged = merge_headers([
///     Some(HeaderSource::Pairs(defaults)),
///     None,
///     Some(HeaderSource::Pairs(overrides)),
/// ])?;
///
/// assert_eq!(merged["accept"], "application/json");
/// assert_eq!(merged["x-trace"], "1");
/// # Ok::<(), ferry::Error>(())
/// ```
///
/// Plain mappings can contain strings that are not valid header names or
/// values, in which case an error is returned.
pub fn merge_headers<'a, I>(sources: I) -> Result<HeaderMap, Error>
where
    I: IntoIterator<Item = Option<HeaderSource<'a>>>,
{
    let mut result = HeaderMap::new();

    for source in sources.into_iter().flatten() {
        match source {
            HeaderSource::Headers(headers) => {
                for name in headers.keys() {
                    let mut values = headers.get_all(name).iter();

                    if let Some(first) = values.next() {
                        result.insert(name.clone(), first.clone());
                    }

                    for value in values {
                        result.append(name.clone(), value.clone());
                    }
                }
            }
            HeaderSource::Map(map) => {
                for (name, value) in map {
                    set(&mut result, name, value)?;
                }
            }
            HeaderSource::HashMap(map) => {
                for (name, value) in map {
                    set(&mut result, name, value)?;
                }
            }
            HeaderSource::Pairs(pairs) => {
                for (name, value) in pairs {
                    set(&mut result, name, value)?;
                }
            }
        }
    }

    log::trace!("merged {} headers", result.len());
    Ok(result)
}

fn set(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), Error> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(Error::invalid_header)?;
    let value = HeaderValue::from_str(value).map_err(Error::invalid_header)?;
    headers.insert(name, value);
    Ok(())
}
