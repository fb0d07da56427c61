use crate::Error;

use std::fmt::{self, Display};
use std::str::FromStr;

use http::uri::{PathAndQuery, Uri};

/// An ordered collection of query parameters.
///
/// A name may appear more than once. Appending never replaces an earlier
/// entry, and entries are encoded in the order they were added, which
/// servers rely on to rebuild array parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Create an empty `Query`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Result<Self, Error> {
        let params = serde_urlencoded::from_str(query).map_err(Error::query)?;
        Ok(Self { params })
    }

    /// Add a parameter.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Add one `name` parameter for every value, in order.
    ///
    /// Numbers are added in their decimal form.
    pub fn append_array<I>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.params.push((name.to_owned(), value.to_string()));
        }
        self
    }

    /// Returns the first value of the parameter `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value of the parameter `name` in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encode the parameters as an `application/x-www-form-urlencoded` string.
    pub fn encode(&self) -> String {
        form_urlencoded(&self.params)
    }

    /// Returns `uri` with its query string replaced by these parameters.
    ///
    /// An empty `Query` removes the query string.
    pub fn apply(&self, uri: &Uri) -> Result<Uri, Error> {
        let mut parts = uri.clone().into_parts();
        let path = uri.path();

        let path_and_query = if self.is_empty() {
            PathAndQuery::from_str(path)
        } else {
            PathAndQuery::from_str(&format!("{}?{}", path, self.encode()))
        };

        parts.path_and_query = Some(path_and_query.map_err(Error::invalid_uri)?);
        Uri::from_parts(parts).map_err(Error::invalid_uri)
    }
}

// serializing string pairs cannot fail, the serializer only rejects
// values that are not key/value sequences
fn form_urlencoded(params: &[(String, String)]) -> String {
    serde_urlencoded::to_string(params).unwrap_or_default()
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(query: &str) -> Result<Self, Self::Err> {
        Query::parse(query)
    }
}

impl<N, V> FromIterator<(N, V)> for Query
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Add array-style query parameters to `target`, creating it if needed.
///
/// One `name` entry is added for every value, in order. Most servers
/// expect array parameters to be postfixed with `[]`, e.g. `ids[]`.
///
/// ```
/// use ferry::http::add_array;
///
/// let query = add_array("ids[]", [1, 2, 3], None);
/// assert_eq!(query.to_string(), "ids%5B%5D=1&ids%5B%5D=2&ids%5B%5D=3");
/// ```
pub fn add_array<I>(name: &str, values: I, target: Option<Query>) -> Query
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut query = target.unwrap_or_default();
    query.append_array(name, values);
    query
}
