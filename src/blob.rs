//! Immutable binary blobs and the helpers used to upload them in pieces.

use crate::http::Body;
use crate::Error;

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use bytes::{Bytes, BytesMut};

/// An immutable sequence of bytes with a known size.
///
/// Cloning and slicing a `Blob` is cheap: slices share the underlying
/// buffer and never copy.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob {
    bytes: Bytes,
}

impl Blob {
    /// Create a `Blob` from bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The size of the blob in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a new blob covering `range` of this blob.
    ///
    /// Bounds past the end of the blob are clamped to its size, so
    /// `slice(start..start + n)` near the end yields the remainder.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Blob {
        let size = self.size();

        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(size);

        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => size,
        }
        .clamp(start, size);

        Blob {
            bytes: self.bytes.slice(start..end),
        }
    }

    /// Returns an iterator over `chunk_size` sized slices of the blob.
    ///
    /// The last chunk holds the remainder and may be shorter. An empty
    /// blob yields no chunks.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0.
    pub fn chunks(&self, chunk_size: usize) -> Chunks {
        assert!(chunk_size != 0, "chunk size must be non-zero");

        Chunks {
            blob: self.clone(),
            start: 0,
            chunk_size,
        }
    }

    /// Join blobs and buffers into a single blob.
    pub fn concat<I>(parts: I) -> Blob
    where
        I: IntoIterator,
        I::Item: Into<Part>,
    {
        let parts = parts.into_iter().map(Into::into).collect::<Vec<Part>>();
        let mut buf = BytesMut::with_capacity(total_size(&parts));

        for part in &parts {
            buf.extend_from_slice(part.as_bytes());
        }

        Blob::new(buf.freeze())
    }

    /// Read a body into a blob.
    ///
    /// Fails if the body is larger than the limit set in [`BlobConfig`].
    pub async fn read(mut body: Body, config: BlobConfig) -> Result<Blob, Error> {
        let limit = config.limit;

        if futures_core::Stream::size_hint(&body).0 > limit {
            return Err(Error::overflow(limit));
        }

        let mut buf = BytesMut::new();

        while let Some(chunk) = body.chunk().await {
            let chunk = chunk.map_err(Error::body)?;

            if buf.len() + chunk.len() > limit {
                return Err(Error::overflow(limit));
            }

            buf.extend_from_slice(&chunk);
        }

        Ok(Blob::new(buf.freeze()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob").field("size", &self.size()).finish()
    }
}

macro_rules! from_bytes {
    ($($ty:ty),*) => ($(
        impl From<$ty> for Blob {
            fn from(bytes: $ty) -> Self {
                Blob::new(bytes)
            }
        }
    )*)
}

from_bytes! {
    Bytes, Vec<u8>, String, &'static [u8], &'static str
}

impl From<Blob> for Bytes {
    fn from(blob: Blob) -> Self {
        blob.bytes
    }
}

impl From<Blob> for Body {
    fn from(blob: Blob) -> Self {
        Body::once(blob.bytes)
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// An iterator over the chunks of a [`Blob`].
///
/// Created by [`Blob::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks {
    blob: Blob,
    start: usize,
    chunk_size: usize,
}

impl Iterator for Chunks {
    type Item = Blob;

    fn next(&mut self) -> Option<Blob> {
        if self.start >= self.blob.size() {
            return None;
        }

        let end = self.start.saturating_add(self.chunk_size);
        let chunk = self.blob.slice(self.start..end);
        self.start = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.blob.size().saturating_sub(self.start);
        let chunks = remaining / self.chunk_size + usize::from(remaining % self.chunk_size != 0);
        (chunks, Some(chunks))
    }
}

impl ExactSizeIterator for Chunks {}

impl FusedIterator for Chunks {}

/// Split `blob` into chunks of `chunk_size` bytes.
///
/// Produces `ceil(blob.size() / chunk_size)` chunks whose concatenation is
/// the original blob.
///
/// ```
/// use ferry::blob::{to_chunks, Blob};
///
/// let chunks = to_chunks(&Blob::from("abcdefg"), 3);
/// assert_eq!(chunks, ["abc", "def", "g"].map(Blob::from));
/// ```
///
/// # Panics
///
/// Panics if `chunk_size` is 0.
pub fn to_chunks(blob: &Blob, chunk_size: usize) -> Vec<Blob> {
    let chunks = blob.chunks(chunk_size).collect::<Vec<_>>();
    log::trace!(
        "split {} bytes into {} chunks of {} bytes",
        blob.size(),
        chunks.len(),
        chunk_size
    );
    chunks
}

/// Something whose size counts towards an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Blob(Blob),
    Buffer(Vec<u8>),
}

impl Part {
    /// The size of this part in bytes.
    pub fn size(&self) -> usize {
        match self {
            Part::Blob(blob) => blob.size(),
            Part::Buffer(buffer) => buffer.len(),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Part::Blob(blob) => blob.as_bytes(),
            Part::Buffer(buffer) => buffer,
        }
    }
}

impl From<Blob> for Part {
    fn from(blob: Blob) -> Self {
        Part::Blob(blob)
    }
}

impl From<Vec<u8>> for Part {
    fn from(buffer: Vec<u8>) -> Self {
        Part::Buffer(buffer)
    }
}

/// The combined size of blobs and raw buffers.
pub fn total_size<'a, I>(parts: I) -> usize
where
    I: IntoIterator<Item = &'a Part>,
{
    parts.into_iter().map(Part::size).sum()
}

/// Configuration for [`Blob::read`].
#[derive(Debug, Clone)]
pub struct BlobConfig {
    limit: usize,
}

impl BlobConfig {
    /// Create a [`BlobConfig`] instance.
    pub fn new() -> Self {
        Self {
            limit: 262_144, // (~256kB)
        }
    }

    /// Set maximum number of bytes that can be read.
    ///
    /// By default the limit is 256kB.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self::new()
    }
}
