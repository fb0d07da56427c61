//! The transport seam.
//!
//! A [`Transport`] sends a request somewhere and hands back the response.
//! This crate never implements one itself. Callers inject a transport
//! (for example the hyper client from `ferry-hyper`) and decorate it, most
//! commonly with [`validated`].

mod validate;

pub use validate::{
    async_predicate, predicate_fn, successful, validated, AsyncPredicate, FailedRequest, Predicate,
    PredicateFn, SuccessStatus, Validated, DEFAULT_MESSAGE,
};

use crate::bounded::{BoxFuture, Send, Sync};
use crate::http::{RequestInit, Response, Target};
use crate::Error;

use std::future::Future;
use std::sync::Arc;

/// A function from a target and optional request options to a pending response.
///
/// ```rust
/// use ferry::bounded::BoxFuture;
/// use ferry::http::{Body, RequestInit, Response, Target};
/// use ferry::{Error, Transport};
///
/// struct Echo;
///
/// impl Transport for Echo {
///     fn fetch(
///         &self,
///         target: Target,
///         init: Option<RequestInit>,
///     ) -> BoxFuture<'_, Result<Response, Error>> {
///         Box::pin(async move {
///             let req = target.into_request(init)?;
///             Ok(Response::new(req.into_body()))
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send a request.
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>>;

    /// Reject responses that do not satisfy `predicate`.
    ///
    /// See [`validated`].
    fn validate<P>(self, predicate: P) -> Validated<P, Self>
    where
        P: Predicate,
        Self: Sized,
    {
        Validated::new(predicate, self)
    }
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        T::fetch(self, target, init)
    }
}

impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        (**self).fetch(target, init)
    }
}

impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        (**self).fetch(target, init)
    }
}

/// Create a transport from a closure.
///
/// ```rust
/// use ferry::http::Response;
/// use ferry::transport_fn;
///
/// let transport = transport_fn(|_target, _init| async {
///     Ok::<_, ferry::Error>(Response::new("pong".into()))
/// });
/// ```
pub fn transport_fn<F, O>(f: F) -> TransportFn<F>
where
    F: Fn(Target, Option<RequestInit>) -> O + Send + Sync,
    O: Future<Output = Result<Response, Error>> + Send + 'static,
{
    TransportFn(f)
}

/// A transport created with [`transport_fn`].
#[derive(Clone)]
pub struct TransportFn<F>(F);

impl<F, O> Transport for TransportFn<F>
where
    F: Fn(Target, Option<RequestInit>) -> O + Send + Sync,
    O: Future<Output = Result<Response, Error>> + Send + 'static,
{
    fn fetch(
        &self,
        target: Target,
        init: Option<RequestInit>,
    ) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin((self.0)(target, init))
    }
}
