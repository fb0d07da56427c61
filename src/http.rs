//! HTTP types shared by transports and the helpers that prepare their input.

mod body;
mod header;
mod query;
mod request;

pub use body::Body;
pub use bytes::Bytes;
pub use header::{merge_headers, HeaderSource};
pub use http::{header as headers, HeaderMap, HeaderValue, Method, StatusCode, Uri};
pub use query::{add_array, Query};
pub use request::{RequestInit, Target};

pub type Request = http::Request<Body>;
pub type Response = http::Response<Body>;

/// Create an independently readable copy of `response`.
///
/// The copy shares the status, version and headers of the original. Its
/// body is split off with [`Body::tee`], so nothing is read until one of
/// the two bodies is polled and the original stays fully readable.
/// Extensions are not copied.
pub fn duplicate(response: &mut Response) -> Response {
    let mut copy = Response::new(response.body_mut().tee());
    *copy.status_mut() = response.status();
    *copy.version_mut() = response.version();
    *copy.headers_mut() = response.headers().clone();
    copy
}
