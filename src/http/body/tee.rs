use crate::bounded::{BoxError, BoxStream};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use bytes::Bytes;

type Chunk = Result<Bytes, BoxError>;

/// One of two readers sharing a single underlying stream.
///
/// Chunks are pulled from the stream on demand. A chunk read by one half
/// is queued for the other until it reads it, so only the distance
/// between the two readers is held in memory.
pub(super) struct Half {
    shared: Arc<Mutex<Shared>>,
    side: usize,
}

struct Shared {
    stream: BoxStream<'static, Chunk>,
    queues: [VecDeque<Chunk>; 2],
    wakers: [Option<Waker>; 2],
    alive: [bool; 2],
    done: bool,
}

pub(super) fn split(stream: BoxStream<'static, Chunk>) -> (Half, Half) {
    let shared = Arc::new(Mutex::new(Shared {
        stream,
        queues: [VecDeque::new(), VecDeque::new()],
        wakers: [None, None],
        alive: [true, true],
        done: false,
    }));

    (
        Half {
            shared: shared.clone(),
            side: 0,
        },
        Half { shared, side: 1 },
    )
}

impl Half {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        // a panic while polling the stream leaves the queues intact
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn poll_chunk(&self, cx: &mut Context<'_>) -> Poll<Option<Chunk>> {
        let mut shared = self.lock();
        let other = 1 - self.side;

        if let Some(chunk) = shared.queues[self.side].pop_front() {
            return Poll::Ready(Some(chunk));
        }

        if shared.done {
            return Poll::Ready(None);
        }

        let chunk = match shared.stream.as_mut().poll_next(cx) {
            Poll::Ready(chunk) => chunk,
            Poll::Pending => {
                // the stream only keeps the latest waker, so the other half
                // is woken when this one makes progress
                shared.wakers[self.side] = Some(cx.waker().clone());
                return Poll::Pending;
            }
        };

        match &chunk {
            Some(chunk) if shared.alive[other] => {
                let copy = match chunk {
                    Ok(bytes) => Ok(bytes.clone()),
                    Err(err) => Err(err.to_string().into()),
                };
                shared.queues[other].push_back(copy);
            }
            Some(_) => {}
            None => shared.done = true,
        }

        let waker = shared.wakers[other].take();
        drop(shared);

        if let Some(waker) = waker {
            waker.wake();
        }

        Poll::Ready(chunk)
    }

    pub(super) fn size_hint(&self) -> (usize, Option<usize>) {
        let shared = self.lock();

        let queued = shared.queues[self.side]
            .iter()
            .map(|chunk| chunk.as_ref().map_or(0, Bytes::len))
            .sum();

        if shared.done {
            (queued, Some(queued))
        } else {
            (queued, None)
        }
    }
}

impl Drop for Half {
    fn drop(&mut self) {
        let mut shared = self.lock();
        let other = 1 - self.side;

        shared.alive[self.side] = false;
        shared.queues[self.side].clear();
        shared.wakers[self.side] = None;

        // the stream may be holding this half's waker
        let waker = shared.wakers[other].take();
        drop(shared);

        if let Some(waker) = waker {
            waker.wake();
        }
    }
}
