//! Deferred values that are computed once, on first use.

use crate::bounded::OnceCell;

use std::fmt;
use std::future::Future;

use futures_util::lock::Mutex;

/// A value computed by `create` the first time it is requested.
///
/// ```
/// use ferry::lazy::lazy;
///
/// let config = lazy(|| std::env::var("HOME").unwrap_or_default());
/// assert_eq!(config.get(), config.get());
/// ```
pub struct Lazy<T, F = fn() -> T> {
    cell: OnceCell<T>,
    create: F,
}

impl<T, F> Lazy<T, F>
where
    F: Fn() -> T,
{
    pub const fn new(create: F) -> Self {
        Self {
            cell: OnceCell::new(),
            create,
        }
    }

    /// Returns the value, computing it if this is the first call.
    ///
    /// `create` is never called again once a value is stored.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| {
            log::debug!("populating lazy cell");
            (self.create)()
        })
    }

    /// Returns the value if it has already been computed.
    pub fn get_if_populated(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T, F> fmt::Debug for Lazy<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy").field("value", &self.cell.get()).finish()
    }
}

/// Create a [`Lazy`] value.
pub fn lazy<T, F>(create: F) -> Lazy<T, F>
where
    F: Fn() -> T,
{
    Lazy::new(create)
}

/// How a [`LazyAsync`] behaves when it is requested again while the
/// first value is still being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every caller that finds the cell empty runs the producer itself.
    ///
    /// The first value to complete is stored and all callers return it.
    /// The producer may therefore run more than once.
    Concurrent,
    /// Callers that find a producer running wait for it to complete. The
    /// producer runs at most once.
    SingleFlight,
}

/// A value produced asynchronously by `create` the first time it is requested.
pub struct LazyAsync<T, F> {
    cell: OnceCell<T>,
    create: F,
    mode: Mode,
    pending: Mutex<()>,
}

impl<T, F, O> LazyAsync<T, F>
where
    F: Fn() -> O,
    O: Future<Output = T>,
{
    /// Create a cell in [`Mode::Concurrent`].
    pub fn new(create: F) -> Self {
        Self::with_mode(create, Mode::Concurrent)
    }

    /// Create a cell in [`Mode::SingleFlight`].
    pub fn single_flight(create: F) -> Self {
        Self::with_mode(create, Mode::SingleFlight)
    }

    pub fn with_mode(create: F, mode: Mode) -> Self {
        Self {
            cell: OnceCell::new(),
            create,
            mode,
            pending: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the value, producing it if none has been stored yet.
    ///
    /// Once a value is stored `create` is never called again.
    pub async fn get(&self) -> &T {
        if let Some(value) = self.cell.get() {
            return value;
        }

        match self.mode {
            Mode::Concurrent => self.populate().await,
            Mode::SingleFlight => {
                let _pending = self.pending.lock().await;

                match self.cell.get() {
                    Some(value) => value,
                    None => self.populate().await,
                }
            }
        }
    }

    /// Returns the value if it has already been produced.
    pub fn get_if_populated(&self) -> Option<&T> {
        self.cell.get()
    }

    async fn populate(&self) -> &T {
        let value = (self.create)().await;

        match self.cell.try_insert(value) {
            Ok(value) => {
                log::debug!("populated lazy async cell");
                value
            }
            Err((value, _)) => {
                log::warn!("lazy async cell was populated concurrently, discarding value");
                value
            }
        }
    }
}

impl<T, F> fmt::Debug for LazyAsync<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyAsync")
            .field("value", &self.cell.get())
            .field("mode", &self.mode)
            .finish()
    }
}

/// Create a [`LazyAsync`] value in [`Mode::Concurrent`].
///
/// ```
/// # async fn run() {
/// use ferry::lazy::lazy_async;
///
/// let token = lazy_async(|| async { String::from("secret") });
/// assert_eq!(token.get().await, "secret");
/// # }
/// ```
pub fn lazy_async<T, F, O>(create: F) -> LazyAsync<T, F>
where
    F: Fn() -> O,
    O: Future<Output = T>,
{
    LazyAsync::new(create)
}
