//! A [`ferry::Transport`] backed by a hyper client.

use std::pin::Pin;
use std::task::{Context, Poll};

use ferry::bounded::{BoxError, BoxFuture};
use ferry::http::{Body, Bytes, RequestInit, Response, Target};
use ferry::transport::SuccessStatus;
use ferry::{Error, Transport, Validated};
use futures_core::Stream;
use hyper::client::connect::Connect;
use hyper::client::HttpConnector;
use hyper::Client;

/// Sends requests with a [`hyper::Client`].
pub struct HyperTransport<C = HttpConnector> {
    client: Client<C, HyperBody>,
}

impl HyperTransport {
    /// Create a transport with a plain HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::builder().build_http(),
        }
    }
}

impl<C> HyperTransport<C> {
    /// Create a transport that sends requests through `client`.
    pub fn with_client(client: Client<C, HyperBody>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client<C, HyperBody> {
        &self.client
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for HyperTransport<C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C> Transport for HyperTransport<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(async move {
            let (parts, body) = target.into_request(init)?.into_parts();
            log::debug!("{} {}", parts.method, parts.uri);

            let req = hyper::Request::from_parts(parts, HyperBody::from(body));
            let res = self.client.request(req).await.map_err(Error::transport)?;

            let (parts, body) = res.into_parts();
            Ok(Response::from_parts(parts, Body::stream(body)))
        })
    }
}

/// A transport that fails unless the response status is in `200..=299`.
pub fn successful_fetch() -> Validated<SuccessStatus, HyperTransport> {
    ferry::successful(HyperTransport::new())
}

/// A [`ferry::http::Body`] sent as a hyper request body.
pub struct HyperBody {
    inner: Body,
}

impl From<Body> for HyperBody {
    fn from(inner: Body) -> Self {
        Self { inner }
    }
}

impl http_body::Body for HyperBody {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_data(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Self::Data, Self::Error>>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    fn poll_trailers(
        self: Pin<&mut Self>,
        _: &mut Context<'_>,
    ) -> Poll<Result<Option<hyper::HeaderMap>, Self::Error>> {
        Poll::Ready(Ok(None))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.size_hint() == (0, Some(0))
    }

    // exact for buffered bodies and fully received teed bodies
    fn size_hint(&self) -> http_body::SizeHint {
        match self.inner.size_hint() {
            (lower, Some(upper)) if lower == upper => {
                http_body::SizeHint::with_exact(lower as u64)
            }
            (lower, upper) => {
                let mut hint = http_body::SizeHint::new();
                hint.set_lower(lower as u64);
                if let Some(upper) = upper {
                    hint.set_upper(upper as u64);
                }
                hint
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use http_body::Body as _;

    #[test]
    fn size_hint() {
        let body = HyperBody::from(Body::from("abc"));
        assert_eq!(body.size_hint().exact(), Some(3));
        assert!(!body.is_end_stream());

        let body = HyperBody::from(Body::empty());
        assert_eq!(body.size_hint().exact(), Some(0));
        assert!(body.is_end_stream());

        let chunks = ["a", "b"].map(|chunk| Ok::<_, std::io::Error>(Bytes::from(chunk)));
        let body = HyperBody::from(Body::stream(stream::iter(chunks)));
        assert_eq!(body.size_hint().lower(), 0);
        assert_eq!(body.size_hint().upper(), None);
    }

    #[tokio::test]
    async fn size_hint_of_teed_body() {
        let chunks = ["ab", "cde"].map(|chunk| Ok::<_, std::io::Error>(Bytes::from(chunk)));
        let mut body = Body::stream(stream::iter(chunks));
        let mut copy = body.tee();

        assert_eq!(body.size_hint(), (0, None));

        while let Some(chunk) = copy.chunk().await {
            chunk.unwrap();
        }

        let body = HyperBody::from(body);
        assert_eq!(body.size_hint().exact(), Some(5));
    }
}
