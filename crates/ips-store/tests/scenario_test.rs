//! Storage lifecycle scenarios against the in-memory control API.
//!
//! Where backend_test.rs pins down the wire exchanges, these tests exercise
//! the storage semantics end to end: content-derived addressing, pin
//! protection, advisory deletion, and what becomes visible when the daemon
//! garbage-collects.

use std::io::Write;
use std::sync::Arc;

use bytes::Bytes;
use ips_rpc::MemoryControlClient;
use ips_store::{ContentSource, IpfsStorage, StorageBackend, StorageError, DEFAULT_GATEWAY_URL};

fn memory_storage() -> (Arc<MemoryControlClient>, IpfsStorage) {
    let client = Arc::new(MemoryControlClient::new());
    let storage = IpfsStorage::with_client(client.clone(), DEFAULT_GATEWAY_URL);
    (client, storage)
}

#[tokio::test]
async fn hello_lifecycle() {
    let (client, storage) = memory_storage();

    // Save, then read back under the returned address.
    let address = storage.save(ContentSource::from(&b"hello"[..])).await.unwrap();
    let file = storage.open(address.as_str()).await.unwrap();
    assert_eq!(file.as_ref(), b"hello");
    assert_eq!(file.address(), &address);

    // Size comes from the daemon's accounting.
    assert_eq!(storage.size(address.as_str()).await.unwrap(), 5);

    // Delete releases the pin. The content is still readable until the
    // daemon collects it.
    storage.delete(address.as_str()).await.unwrap();
    assert!(storage.open(address.as_str()).await.is_ok());
    assert!(storage.size(address.as_str()).await.is_ok());

    // After garbage collection the address no longer resolves.
    client.collect_garbage().await;
    let err = storage.open(address.as_str()).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    let err = storage.size(address.as_str()).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn save_pins_what_it_stores() {
    let (client, storage) = memory_storage();
    let address = storage.save(ContentSource::from(&b"keep me"[..])).await.unwrap();

    assert!(client.is_pinned(&address).await);

    // Pinned content survives collection.
    client.collect_garbage().await;
    assert_eq!(
        storage.open(address.as_str()).await.unwrap().as_ref(),
        b"keep me"
    );
}

#[tokio::test]
async fn identical_bytes_land_on_the_same_address() {
    let (_client, storage) = memory_storage();

    let first = storage.save(ContentSource::from(&b"same bytes"[..])).await.unwrap();
    let second = storage.save(ContentSource::from(&b"same bytes"[..])).await.unwrap();
    let different = storage.save(ContentSource::from(&b"other bytes"[..])).await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, different);
}

#[tokio::test]
async fn chunked_sources_stream_through() {
    let (_client, storage) = memory_storage();

    let chunks = vec![
        Ok(Bytes::from_static(b"spread ")),
        Ok(Bytes::from_static(b"across ")),
        Ok(Bytes::from_static(b"chunks")),
    ];
    let source = ContentSource::from_stream(futures_util::stream::iter(chunks));
    let address = storage.save(source).await.unwrap();

    let file = storage.open(address.as_str()).await.unwrap();
    assert_eq!(file.as_ref(), b"spread across chunks");
}

#[tokio::test]
async fn file_backed_sources_stream_through() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(b"bytes on disk").unwrap();
    tmp.flush().unwrap();

    let (_client, storage) = memory_storage();
    let file = tokio::fs::File::open(tmp.path()).await.unwrap();
    let address = storage.save(ContentSource::from_reader(file)).await.unwrap();

    let stored = storage.open(address.as_str()).await.unwrap();
    assert_eq!(stored.as_ref(), b"bytes on disk");
}

#[tokio::test]
async fn empty_content_is_storable() {
    let (_client, storage) = memory_storage();
    let address = storage.save(ContentSource::from_bytes(Bytes::new())).await.unwrap();
    let file = storage.open(address.as_str()).await.unwrap();
    assert!(file.is_empty());
    assert_eq!(storage.size(address.as_str()).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_pin_leaves_content_reachable_but_unprotected() {
    let client = Arc::new(MemoryControlClient::with_pin_failures());
    let storage = IpfsStorage::with_client(client.clone(), DEFAULT_GATEWAY_URL);

    let err = storage.save(ContentSource::from(&b"at risk"[..])).await.unwrap_err();
    let address = match &err {
        StorageError::PinFailure { address, .. } => address.clone(),
        other => panic!("expected PinFailure, got: {other:?}"),
    };
    assert!(err.is_transient());

    // The add went through: the bytes are there, just unpinned.
    assert_eq!(storage.open(&address).await.unwrap().as_ref(), b"at risk");
    let address = ips_store::ContentAddress::from(address.as_str());
    assert!(!client.is_pinned(&address).await);
}

#[tokio::test]
async fn resaving_after_delete_restores_protection() {
    let (client, storage) = memory_storage();

    let address = storage.save(ContentSource::from(&b"come back"[..])).await.unwrap();
    storage.delete(address.as_str()).await.unwrap();
    client.collect_garbage().await;
    assert!(storage.open(address.as_str()).await.is_err());

    // Same bytes, same address, pinned again.
    let again = storage.save(ContentSource::from(&b"come back"[..])).await.unwrap();
    assert_eq!(again, address);
    assert!(client.is_pinned(&again).await);
}

#[tokio::test]
async fn deleting_what_was_never_saved_is_not_found() {
    let (_client, storage) = memory_storage();
    let err = storage.delete("never-saved").await.unwrap_err();
    match err {
        StorageError::NotFound { address } => assert_eq!(address, "never-saved"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        /// Whatever bytes go in, the same bytes come back out.
        #[test]
        fn roundtrip_preserves_arbitrary_bytes(
            payload in proptest::collection::vec(any::<u8>(), 0..2048)
        ) {
            let stored = run(async {
                let (_client, storage) = memory_storage();
                let address = storage
                    .save(ContentSource::from(payload.clone()))
                    .await
                    .unwrap();
                storage.open(address.as_str()).await.unwrap().into_bytes()
            });
            prop_assert_eq!(stored.as_ref(), &payload[..]);
        }

        /// Saving is deterministic: one payload, one address.
        #[test]
        fn identical_payloads_share_an_address(
            payload in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            let (first, second) = run(async {
                let (_client, storage) = memory_storage();
                let first = storage
                    .save(ContentSource::from(payload.clone()))
                    .await
                    .unwrap();
                let second = storage
                    .save(ContentSource::from(payload.clone()))
                    .await
                    .unwrap();
                (first, second)
            });
            prop_assert_eq!(first, second);
        }

        /// Names are never rewritten and URLs are plain concatenation,
        /// whatever the string.
        #[test]
        fn name_hooks_and_urls_pass_any_string_through(name in ".*") {
            let (_client, storage) = memory_storage();
            prop_assert_eq!(storage.valid_name(&name), name.clone());
            prop_assert_eq!(storage.available_name(&name, None), name.clone());
            prop_assert_eq!(storage.available_name(&name, Some(3)), name.clone());
            prop_assert_eq!(storage.url(&name), format!("{DEFAULT_GATEWAY_URL}{name}"));
        }
    }
}
