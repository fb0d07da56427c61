use std::io;

use ferry::blob::{to_chunks, total_size, Blob, BlobConfig, Part};
use ferry::http::{Body, Bytes};
use futures_util::stream;

fn bytes(len: usize) -> Blob {
    Blob::from((0..len).map(|i| i as u8).collect::<Vec<u8>>())
}

fn join(chunks: &[Blob]) -> Vec<u8> {
    chunks.iter().flat_map(|chunk| chunk.as_bytes().to_vec()).collect()
}

#[test]
fn chunk_count_and_contents() {
    for (len, chunk_size) in [(1, 1), (10, 3), (10, 5), (10, 10), (10, 64), (1000, 7)] {
        let blob = bytes(len);
        let chunks = to_chunks(&blob, chunk_size);

        let expected = (len + chunk_size - 1) / chunk_size;
        assert_eq!(chunks.len(), expected, "{} / {}", len, chunk_size);
        assert_eq!(join(&chunks), blob.as_bytes());

        let (last, rest) = chunks.split_last().unwrap();
        assert!(rest.iter().all(|chunk| chunk.size() == chunk_size));
        assert_eq!(last.size(), len - rest.len() * chunk_size);
    }
}

#[test]
fn empty_blob_has_no_chunks() {
    assert!(to_chunks(&Blob::default(), 4).is_empty());
    assert_eq!(Blob::default().chunks(1).len(), 0);
}

#[test]
#[should_panic(expected = "chunk size must be non-zero")]
fn zero_chunk_size() {
    to_chunks(&bytes(3), 0);
}

#[test]
fn chunks_iterator_is_exact() {
    let mut chunks = bytes(10).chunks(4);
    assert_eq!(chunks.len(), 3);

    chunks.next();
    assert_eq!(chunks.len(), 2);

    assert_eq!(chunks.next().unwrap().as_bytes(), [4, 5, 6, 7]);
    assert_eq!(chunks.next().unwrap().as_bytes(), [8, 9]);
    assert!(chunks.next().is_none());
    assert!(chunks.next().is_none());
}

#[test]
fn slice_clamps_to_size() {
    let blob = Blob::from("abcdef");

    assert_eq!(blob.slice(2..4).as_bytes(), b"cd");
    assert_eq!(blob.slice(4..100).as_bytes(), b"ef");
    assert_eq!(blob.slice(..=1).as_bytes(), b"ab");
    assert!(blob.slice(10..).is_empty());
    assert!(blob.slice(4..2).is_empty());

    // the original is untouched
    assert_eq!(blob.as_bytes(), b"abcdef");
}

#[test]
fn total_size_dispatches_by_kind() {
    let b1 = bytes(10);
    let buf1 = vec![0u8; 7];
    let b2 = bytes(3);

    let parts = [
        Part::from(b1.clone()),
        Part::from(buf1.clone()),
        Part::from(b2.clone()),
    ];

    assert_eq!(total_size(&parts), b1.size() + buf1.len() + b2.size());
    assert_eq!(total_size(&[]), 0);
}

#[test]
fn concat_reverses_chunking() {
    let blob = bytes(100);
    let chunks = to_chunks(&blob, 33);

    assert_eq!(Blob::concat(chunks), blob);
    assert_eq!(
        Blob::concat([Part::from(Blob::from("ab")), Part::from(b"cd".to_vec())]),
        Blob::from("abcd")
    );
}

#[tokio::test]
async fn read_streamed_body() {
    let chunks = ["ab", "cd", "e"].map(|chunk| Ok::<_, io::Error>(Bytes::from(chunk)));
    let body = Body::stream(stream::iter(chunks));

    let blob = Blob::read(body, BlobConfig::new()).await.unwrap();
    assert_eq!(blob, Blob::from("abcde"));
}

#[tokio::test]
async fn read_enforces_limit() {
    let err = Blob::read(Body::from("abcdef"), BlobConfig::new().limit(5))
        .await
        .unwrap_err();
    assert!(err.is_overflow());

    let chunks = ["abc", "def"].map(|chunk| Ok::<_, io::Error>(Bytes::from(chunk)));
    let err = Blob::read(Body::stream(stream::iter(chunks)), BlobConfig::new().limit(5))
        .await
        .unwrap_err();
    assert!(err.is_overflow());
}

#[tokio::test]
async fn read_fails_on_stream_error() {
    let chunks = vec![
        Ok(Bytes::from("ab")),
        Err(io::Error::new(io::ErrorKind::Other, "reset")),
    ];

    let err = Blob::read(Body::stream(stream::iter(chunks)), BlobConfig::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("reset"));
}
