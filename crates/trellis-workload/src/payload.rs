//! Frozen byte payloads for resource templates
//!
//! A payload captures the exact serialized form of a rendered resource once,
//! at construction time, and is never re-derived. Later mutation of the
//! original value cannot change a payload that was already captured, and
//! serializing the payload embeds the stored bytes verbatim.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// An immutable snapshot of a serialized resource.
///
/// Serializes as the embedded JSON document itself (not as an encoded
/// string), so a template carrying a Deployment payload reads as a nested
/// Deployment object in the aggregate's JSON form.
#[derive(Clone, PartialEq)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    /// Freeze the given bytes as a payload.
    ///
    /// The bytes must be a valid JSON document; this is not checked here,
    /// but serialization of a payload holding invalid JSON fails.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The frozen bytes, exactly as captured
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the payload, returning the frozen bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl std::fmt::Debug for RawPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RawPayload")
            .field(&String::from_utf8_lossy(&self.0))
            .finish()
    }
}

impl Serialize for RawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw: &RawValue = serde_json::from_slice(&self.0).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
        if raw.get().is_empty() {
            return Err(D::Error::custom("empty payload"));
        }
        Ok(Self(raw.get().as_bytes().to_vec()))
    }
}
