//! Client-side data transfer helpers.
//!
//! - [`transport`]: decorate an injected HTTP transport so unsuccessful
//!   responses become errors, and [`post_json`] to send JSON through it.
//! - [`http`]: header merging, array-style query parameters and the body
//!   and request types transports work with.
//! - [`blob`]: split binary payloads into chunks for incremental upload.
//! - [`lazy`]: values computed once, synchronously or asynchronously.
//! - [`dict`]: `filter` and `map` over string-keyed dictionaries.

pub mod blob;
pub mod bounded;
pub mod dict;
pub mod http;
pub mod lazy;
pub mod transport;

mod error;
#[cfg(feature = "json")]
mod json;

pub use error::Error;
#[cfg(feature = "json")]
pub use json::post_json;
pub use transport::{
    async_predicate, predicate_fn, successful, transport_fn, validated, FailedRequest, Predicate,
    Transport, Validated,
};
