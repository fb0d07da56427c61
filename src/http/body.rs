use crate::bounded::{BoxError, BoxStream, Send, Sync};

use std::pin::Pin;
use std::task::{Context, Poll};
use std::{fmt, mem};

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use pin_project_lite::pin_project;

mod tee;

/// Respresents the body of an HTTP message.
///
/// A body is either empty, a single buffered chunk, or a stream of
/// chunks. Buffered bodies can be cloned cheaply. Streamed bodies are
/// read once, but can be [`tee`](Body::tee)d into two readers.
pub struct Body {
    kind: BodyKind,
}

enum BodyKind {
    Stream(BoxStream<'static, Result<Bytes, BoxError>>),
    Shared(tee::Half),
    Once(Bytes),
    Empty,
}

impl Body {
    /// Create a `Body` from a stream of bytes.
    pub fn stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        pin_project! {
            struct MapErr<S> {
                #[pin]
                inner: S,
            }
        }

        impl<T, E, S> Stream for MapErr<S>
        where
            E: Into<BoxError>,
            S: Stream<Item = Result<T, E>>,
        {
            type Item = Result<T, BoxError>;

            fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
                self.project()
                    .inner
                    .poll_next(cx)
                    .map(|item| item.map(|chunk| chunk.map_err(Into::into)))
            }
        }

        Body {
            kind: BodyKind::Stream(Box::pin(MapErr { inner: stream })),
        }
    }

    /// Create a body directly from bytes.
    pub fn once(bytes: impl Into<Bytes>) -> Self {
        Body {
            kind: BodyKind::Once(bytes.into()),
        }
    }

    /// Create an empty `Body`.
    pub fn empty() -> Self {
        Body {
            kind: BodyKind::Empty,
        }
    }

    /// Returns `true` if the body is held in memory.
    pub fn is_buffered(&self) -> bool {
        matches!(self.kind, BodyKind::Once(_) | BodyKind::Empty)
    }

    /// Clone the body if it is held in memory.
    ///
    /// Returns `None` for streamed bodies.
    pub fn try_clone(&self) -> Option<Body> {
        let kind = match self.kind {
            BodyKind::Stream(_) | BodyKind::Shared(_) => return None,
            BodyKind::Once(ref bytes) => BodyKind::Once(bytes.clone()),
            BodyKind::Empty => BodyKind::Empty,
        };

        Some(Body { kind })
    }

    /// Read the next chunk of the body.
    pub async fn chunk(&mut self) -> Option<Result<Bytes, BoxError>> {
        self.next().await
    }

    /// Split off a second reader of this body.
    ///
    /// Buffered bodies are cloned. A streamed body is not read here:
    /// both bodies pull from the same stream as they are polled, and a
    /// chunk is kept only until both have read it. Each body yields every
    /// chunk of the original, whichever is read first. An error from the
    /// stream reaches both readers, the second one as a copy of its
    /// message.
    pub fn tee(&mut self) -> Body {
        if let Some(body) = self.try_clone() {
            return body;
        }

        let stream: BoxStream<'static, _> = match mem::take(&mut self.kind) {
            BodyKind::Stream(stream) => stream,
            kind => Box::pin(Body { kind }),
        };

        let (first, second) = tee::split(stream);
        self.kind = BodyKind::Shared(first);

        Body {
            kind: BodyKind::Shared(second),
        }
    }
}

impl Default for BodyKind {
    fn default() -> Self {
        BodyKind::Empty
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        match &mut this.kind {
            BodyKind::Stream(stream) => stream.as_mut().poll_next(cx),
            BodyKind::Shared(half) => half.poll_chunk(cx),
            BodyKind::Once(bytes) => {
                let bytes = mem::take(bytes);
                this.kind = BodyKind::Empty;
                Some(Ok(bytes)).into()
            }
            BodyKind::Empty => None.into(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.kind {
            BodyKind::Stream(stream) => stream.size_hint(),
            BodyKind::Shared(half) => half.size_hint(),
            BodyKind::Once(bytes) => (bytes.len(), Some(bytes.len())),
            BodyKind::Empty => (0, Some(0)),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            BodyKind::Stream(_) => "Stream",
            BodyKind::Shared(_) => "Shared",
            BodyKind::Once(_) => "Once",
            BodyKind::Empty => "Empty",
        };

        f.debug_struct("Body").field("kind", &kind).finish()
    }
}

macro_rules! from_bytes {
    ($($ty:ty),*) => ($(
        impl From<$ty> for Body {
            fn from(bytes: $ty) -> Self {
                Body::once(bytes)
            }
        }
    )*)
}

from_bytes! {
    Bytes, Vec<u8>, String, &'static [u8], &'static str
}
