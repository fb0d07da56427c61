use super::{merge_headers, Body, HeaderSource, Request};
use crate::Error;

use std::str::FromStr;

use http::{HeaderMap, Method, Uri};

/// What a transport is asked to fetch.
#[derive(Debug)]
pub enum Target {
    /// A bare URI, fetched with the method and headers of the [`RequestInit`].
    Uri(Uri),
    /// A complete request. A [`RequestInit`] passed alongside overrides it.
    Request(Request),
}

impl Target {
    /// The URI being fetched.
    pub fn uri(&self) -> &Uri {
        match self {
            Target::Uri(uri) => uri,
            Target::Request(req) => req.uri(),
        }
    }

    /// Resolve the target and the optional request options into a request.
    ///
    /// The method and body of `init` replace those of the target when
    /// they are set. Its headers are merged over the target's headers.
    pub fn into_request(self, init: Option<RequestInit>) -> Result<Request, Error> {
        let mut req = match self {
            Target::Uri(uri) => {
                let mut req = Request::new(Body::empty());
                *req.uri_mut() = uri;
                req
            }
            Target::Request(req) => req,
        };

        if let Some(init) = init {
            if let Some(method) = init.method {
                *req.method_mut() = method;
            }

            if !init.headers.is_empty() {
                let headers = merge_headers([
                    Some(HeaderSource::Headers(req.headers())),
                    Some(HeaderSource::Headers(&init.headers)),
                ])?;
                *req.headers_mut() = headers;
            }

            if let Some(body) = init.body {
                *req.body_mut() = body;
            }
        }

        Ok(req)
    }
}

impl From<Uri> for Target {
    fn from(uri: Uri) -> Self {
        Target::Uri(uri)
    }
}

impl From<Request> for Target {
    fn from(req: Request) -> Self {
        Target::Request(req)
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        Uri::from_str(uri).map(Target::Uri).map_err(Error::invalid_uri)
    }
}

/// Options for a single request.
#[derive(Debug, Default)]
pub struct RequestInit {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<Body>,
}

impl RequestInit {
    /// Create an empty `RequestInit`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }
}
