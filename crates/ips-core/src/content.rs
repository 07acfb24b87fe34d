//! # Content Handles
//!
//! The two sides of a storage exchange:
//!
//! - [`ContentSource`] carries bytes **into** the backend. It is a stream of
//!   chunks consumed exactly once, so large payloads never need to be held
//!   in memory whole.
//! - [`ContentFile`] carries bytes **out** of the backend: the raw payload
//!   exactly as retrieved, tagged with the address it was retrieved under.
//!   It is read-only.

use std::io;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::address::ContentAddress;

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

/// A byte stream to be stored, consumed exactly once.
///
/// Sources built from in-memory bytes carry an exact length hint; sources
/// built from readers or streams do not, and are uploaded with chunked
/// framing instead.
pub struct ContentSource {
    stream: BoxStream<'static, io::Result<Bytes>>,
    len_hint: Option<u64>,
}

impl ContentSource {
    /// Build a single-chunk source from bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        Self {
            stream: stream::once(async move { Ok::<Bytes, io::Error>(bytes) }).boxed(),
            len_hint: Some(len),
        }
    }

    /// Build a source that reads chunks from an async reader.
    pub fn from_reader(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            stream: ReaderStream::new(reader).boxed(),
            len_hint: None,
        }
    }

    /// Build a source from an existing chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            stream: stream.boxed(),
            len_hint: None,
        }
    }

    /// Total length in bytes, when known up front.
    pub fn len_hint(&self) -> Option<u64> {
        self.len_hint
    }

    /// Consume the source, yielding the underlying chunk stream.
    pub fn into_stream(self) -> BoxStream<'static, io::Result<Bytes>> {
        self.stream
    }

    /// Drain the source into a single buffer.
    ///
    /// # Errors
    ///
    /// Propagates the first read error the underlying stream yields.
    pub async fn read_to_end(self) -> io::Result<Bytes> {
        let mut stream = self.stream;
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl From<Bytes> for ContentSource {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for ContentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static [u8]> for ContentSource {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_bytes(Bytes::from_static(bytes))
    }
}

impl From<String> for ContentSource {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&'static str> for ContentSource {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(Bytes::from_static(text.as_bytes()))
    }
}

impl std::fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSource")
            .field("len_hint", &self.len_hint)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

/// Retrieved content: the raw bytes exactly as the daemon returned them,
/// tagged with the address they were opened under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    address: ContentAddress,
    data: Bytes,
}

impl ContentFile {
    /// Tag retrieved bytes with the address they came from.
    pub fn new(address: impl Into<ContentAddress>, data: impl Into<Bytes>) -> Self {
        Self {
            address: address.into(),
            data: data.into(),
        }
    }

    /// The address this content was opened under.
    pub fn address(&self) -> &ContentAddress {
        &self.address
    }

    /// The retrieved bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Length of the retrieved payload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the handle, keeping only the bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// A `std::io::Read` view over the payload, for byte-oriented consumers.
    pub fn reader(&self) -> impl io::Read {
        io::Cursor::new(self.data.clone())
    }
}

impl AsRef<[u8]> for ContentFile {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
