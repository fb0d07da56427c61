use std::io;

use ferry::blob::{Blob, BlobConfig};
use ferry::http::{Body, Bytes};
use futures_core::Stream;
use futures_util::{stream, StreamExt};

fn chunked(chunks: &[&'static str]) -> Body {
    let chunks: Vec<_> = chunks
        .iter()
        .map(|chunk| Ok::<_, io::Error>(Bytes::from(*chunk)))
        .collect();

    Body::stream(stream::iter(chunks))
}

async fn read(body: Body) -> Bytes {
    Blob::read(body, BlobConfig::new()).await.unwrap().into_bytes()
}

#[tokio::test]
async fn tee_buffered() {
    let mut body = Body::from("hello");
    let copy = body.tee();

    assert!(body.is_buffered());
    assert!(copy.is_buffered());
    assert_eq!(read(copy).await, "hello");
    assert_eq!(read(body).await, "hello");
}

#[tokio::test]
async fn tee_reads_nothing_up_front() {
    let mut body = chunked(&["a", "b"]);
    let copy = body.tee();

    assert!(!body.is_buffered());
    assert_eq!(body.size_hint(), (0, None));
    assert_eq!(copy.size_hint(), (0, None));
}

#[tokio::test]
async fn tee_either_order() {
    let mut body = chunked(&["one ", "two ", "three"]);
    let copy = body.tee();

    assert_eq!(read(copy).await, "one two three");
    assert_eq!(read(body).await, "one two three");

    let mut body = chunked(&["one ", "two ", "three"]);
    let copy = body.tee();

    assert_eq!(read(body).await, "one two three");
    assert_eq!(read(copy).await, "one two three");
}

#[tokio::test]
async fn tee_interleaved() {
    let mut body = chunked(&["a", "b", "c"]);
    let mut copy = body.tee();

    assert_eq!(body.chunk().await.unwrap().unwrap(), "a");
    assert_eq!(copy.chunk().await.unwrap().unwrap(), "a");
    assert_eq!(copy.chunk().await.unwrap().unwrap(), "b");
    assert_eq!(copy.chunk().await.unwrap().unwrap(), "c");
    assert!(copy.chunk().await.is_none());
    assert_eq!(body.chunk().await.unwrap().unwrap(), "b");
    assert_eq!(body.chunk().await.unwrap().unwrap(), "c");
    assert!(body.chunk().await.is_none());
}

#[tokio::test]
async fn tee_concurrent_readers() {
    let chunks = ["x", "y", "z"].map(|chunk| Ok::<_, io::Error>(Bytes::from(chunk)));
    let slow = stream::iter(chunks).then(|chunk| async move {
        tokio::task::yield_now().await;
        chunk
    });

    let mut body = Body::stream(slow);
    let copy = body.tee();

    let (body, copy) = tokio::join!(read(body), read(copy));
    assert_eq!(body, "xyz");
    assert_eq!(copy, "xyz");
}

#[tokio::test]
async fn dropped_copy_keeps_nothing() {
    let mut body = chunked(&["a", "b"]);
    let mut copy = body.tee();

    assert_eq!(copy.chunk().await.unwrap().unwrap(), "a");
    drop(copy);

    assert_eq!(read(body).await, "ab");
}

#[tokio::test]
async fn size_hint_after_copy_is_read() {
    let mut body = chunked(&["abc", "de"]);
    let copy = body.tee();

    assert_eq!(read(copy).await, "abcde");
    assert_eq!(body.size_hint(), (5, Some(5)));
    assert_eq!(read(body).await, "abcde");
}

#[tokio::test]
async fn tee_stream_errors() {
    let chunks = vec![
        Ok(Bytes::from("a")),
        Err(io::Error::new(io::ErrorKind::Other, "reset")),
    ];

    let mut body = Body::stream(stream::iter(chunks));
    let mut copy = body.tee();

    assert_eq!(body.chunk().await.unwrap().unwrap(), "a");
    assert_eq!(body.chunk().await.unwrap().unwrap_err().to_string(), "reset");

    assert_eq!(copy.chunk().await.unwrap().unwrap(), "a");
    assert_eq!(copy.chunk().await.unwrap().unwrap_err().to_string(), "reset");
}
