use super::Transport;
use crate::bounded::{BoxFuture, Send, Sync};
use crate::http::{self, RequestInit, Response, Target};
use crate::Error;

use std::borrow::Cow;
use std::fmt;
use std::future::{ready, Future};

/// The message carried by a [`FailedRequest`] unless configured otherwise.
pub const DEFAULT_MESSAGE: &str = "Fetch error";

/// Decides whether a response counts as successful.
///
/// The predicate receives a duplicate of the response, so it may read the
/// body without consuming the one handed back to the caller.
pub trait Predicate: Send + Sync {
    fn test(&self, response: Response) -> BoxFuture<'_, bool>;
}

impl<P> Predicate for &P
where
    P: Predicate + ?Sized,
{
    fn test(&self, response: Response) -> BoxFuture<'_, bool> {
        P::test(self, response)
    }
}

/// Accepts responses with a status in `200..=299`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuccessStatus;

impl Predicate for SuccessStatus {
    fn test(&self, response: Response) -> BoxFuture<'_, bool> {
        Box::pin(ready(response.status().is_success()))
    }
}

/// Create a predicate from a synchronous closure.
pub fn predicate_fn<F>(f: F) -> PredicateFn<F>
where
    F: Fn(&Response) -> bool + Send + Sync,
{
    PredicateFn(f)
}

/// A predicate created with [`predicate_fn`].
#[derive(Clone)]
pub struct PredicateFn<F>(F);

impl<F> Predicate for PredicateFn<F>
where
    F: Fn(&Response) -> bool + Send + Sync,
{
    fn test(&self, response: Response) -> BoxFuture<'_, bool> {
        Box::pin(ready((self.0)(&response)))
    }
}

/// Create a predicate from an asynchronous closure, for example one that
/// needs to inspect the response body.
pub fn async_predicate<F, O>(f: F) -> AsyncPredicate<F>
where
    F: Fn(Response) -> O + Send + Sync,
    O: Future<Output = bool> + Send + 'static,
{
    AsyncPredicate(f)
}

/// A predicate created with [`async_predicate`].
#[derive(Clone)]
pub struct AsyncPredicate<F>(F);

impl<F, O> Predicate for AsyncPredicate<F>
where
    F: Fn(Response) -> O + Send + Sync,
    O: Future<Output = bool> + Send + 'static,
{
    fn test(&self, response: Response) -> BoxFuture<'_, bool> {
        Box::pin((self.0)(response))
    }
}

/// Wrap `transport` so it fails with a [`FailedRequest`] whenever the
/// response does not satisfy `predicate`.
///
/// Every call creates exactly one duplicate of the response for the
/// predicate. The body is only read as far as the predicate reads it,
/// so checks that look at the status return as soon as the headers
/// arrive. When the predicate accepts, the original response is returned
/// untouched.
///
/// ```rust
/// use ferry::http::{Response, StatusCode};
/// use ferry::{predicate_fn, transport_fn, validated};
///
/// let transport = transport_fn(|_, _| async {
///     let mut response = Response::new("gone".into());
///     *response.status_mut() = StatusCode::GONE;
///     Ok::<_, ferry::Error>(response)
/// });
///
/// let transport = validated(
///     predicate_fn(|res: &Response| res.status() != StatusCode::GONE),
///     transport,
/// );
/// ```
pub fn validated<P, T>(predicate: P, transport: T) -> Validated<P, T>
where
    P: Predicate,
    T: Transport,
{
    Validated::new(predicate, transport)
}

/// Wrap `transport` so it fails unless the response status is in `200..=299`.
pub fn successful<T>(transport: T) -> Validated<SuccessStatus, T>
where
    T: Transport,
{
    Validated::new(SuccessStatus, transport)
}

/// A transport created with [`validated`].
#[derive(Clone)]
pub struct Validated<P, T> {
    predicate: P,
    inner: T,
    message: Cow<'static, str>,
}

impl<P, T> Validated<P, T>
where
    P: Predicate,
    T: Transport,
{
    pub fn new(predicate: P, inner: T) -> Self {
        Self {
            predicate,
            inner,
            message: Cow::Borrowed(DEFAULT_MESSAGE),
        }
    }

    /// Set the message carried by rejections.
    ///
    /// By default the message is `"Fetch error"`.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns a reference to the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<P, T> Transport for Validated<P, T>
where
    P: Predicate,
    T: Transport,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(async move {
            let uri = target.uri().clone();
            let mut response = self.inner.fetch(target, init).await?;
            let copy = http::duplicate(&mut response);

            if self.predicate.test(copy).await {
                log::debug!("{} accepted with status {}", uri, response.status());
                return Ok(response);
            }

            log::debug!("{} rejected with status {}", uri, response.status());
            Err(FailedRequest::new(response, Some(self.message.clone())).into())
        })
    }
}

/// The error returned by a [`Validated`] transport when its predicate
/// rejects a response.
///
/// The response is handed back unread.
#[derive(Debug)]
pub struct FailedRequest {
    response: Response,
    message: Option<Cow<'static, str>>,
}

impl FailedRequest {
    pub fn new(response: Response, message: Option<Cow<'static, str>>) -> Self {
        Self { response, message }
    }

    /// The rejected response.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    pub fn into_response(self) -> Response {
        self.response
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for FailedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} (status {})", message, self.response.status()),
            None => write!(f, "request failed with status {}", self.response.status()),
        }
    }
}

impl std::error::Error for FailedRequest {}
