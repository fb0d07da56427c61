//! Thread-safety bounds that can be relaxed with the `not-send` feature.
//!
//! Transports driven by a single-threaded event loop rarely produce `Send`
//! futures. Enabling `not-send` drops the bounds from every boxed future,
//! stream and error, and swaps the lazy cells to their unsynchronized
//! versions.

macro_rules! cfg_send {
    ($($x:item)*) => {$(
        #[cfg(not(feature = "not-send"))]
        $x
    )*}
}

macro_rules! cfg_not_send {
    ($($x:item)*) => {$(
        #[cfg(feature = "not-send")]
        $x
    )*}
}

cfg_not_send! {
    mod not_send;
    pub use not_send::*;
}

cfg_send! {
    mod send;
    pub use send::*;
}
