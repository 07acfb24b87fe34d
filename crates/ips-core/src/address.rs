//! # Content Addresses
//!
//! The identifier a storage daemon assigns to content when it is added: a
//! multihash or CID in textual form, e.g. `QmXoypiz…` or `bafybeigdyr…`.
//!
//! ## Opacity
//!
//! Addresses are opaque to this workspace. [`ContentAddress`] wraps the
//! daemon's string verbatim at construction and yields it back verbatim;
//! there is no parsing, validation, base conversion, or case folding
//! anywhere. The daemon is the sole authority on what an address means.

use serde::{Deserialize, Serialize};

/// A daemon-issued identifier for stored content.
///
/// Two addresses are equal exactly when their underlying strings are
/// byte-equal. Construction never fails: any string round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Wrap a daemon-issued address string verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the address string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ContentAddress {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContentAddress {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for ContentAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_strings_through_verbatim() {
        let cases = [
            "QmXoypizjW3WknFiJnKLwHCnL72vedxjQkDDP1mXWo6uco",
            "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
            "",
            "not a cid at all / with ~ strange % chars",
            "QMUPPERCASE",
        ];
        for case in cases {
            let address = ContentAddress::from(case);
            assert_eq!(address.as_str(), case);
            assert_eq!(address.into_string(), case);
        }
    }

    #[test]
    fn equality_is_byte_equality() {
        // No normalization: differing case means differing addresses.
        let lower = ContentAddress::from("qmabc");
        let upper = ContentAddress::from("QMABC");
        assert_ne!(lower, upper);
        assert_eq!(lower, ContentAddress::new(String::from("qmabc")));
    }

    #[test]
    fn serializes_transparently() {
        let address = ContentAddress::from("QmXYZ");
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"QmXYZ\"");

        let back: ContentAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn displays_as_the_raw_string() {
        let address = ContentAddress::from("QmXYZ");
        assert_eq!(address.to_string(), "QmXYZ");
        assert_eq!(format!("{address}"), "QmXYZ");
    }
}
