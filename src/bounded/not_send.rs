use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use futures_core::Stream;

pub use once_cell::unsync::OnceCell;

pub trait Send {}

impl<T: ?Sized> Send for T {}

pub trait Sync {}

impl<T: ?Sized> Sync for T {}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + 'a>>;
pub type BoxError = Box<dyn Error>;
