use crate::http::{headers, HeaderMap, HeaderValue, Method, RequestInit, Response, Target};
use crate::{Error, Transport};

use serde::Serialize;

/// POST `data` as JSON to `target` through `transport`.
///
/// The body is encoded with `serde_json` and sent with `Accept` and
/// `Content-Type` set to `application/json`. The transport's result is
/// returned unchanged. Values that fail to serialize, such as maps with
/// non-string keys, produce an error without calling the transport.
///
/// ```rust
/// # async fn run(transport: impl ferry::Transport) -> Result<(), ferry::Error> {
/// use ferry::post_json;
///
/// let target = "https://example.com/api/items".parse::<ferry::http::Target>()?;
/// let _response = post_json(target, &["a", "b"], &transport).await?;
/// # Ok(())
/// # }
/// ```
pub async fn post_json<D, T>(
    target: impl Into<Target>,
    data: &D,
    transport: &T,
) -> Result<Response, Error>
where
    D: Serialize + ?Sized,
    T: Transport + ?Sized,
{
    let body = serde_json::to_vec(data)?;

    let json = HeaderValue::from_str(mime::APPLICATION_JSON.as_ref())
        .map_err(Error::invalid_header)?;
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(headers::ACCEPT, json.clone());
    headers.insert(headers::CONTENT_TYPE, json);

    let init = RequestInit::new()
        .method(Method::POST)
        .headers(headers)
        .body(body);

    transport.fetch(target.into(), Some(init)).await
}
