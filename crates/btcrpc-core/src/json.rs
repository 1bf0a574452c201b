//! JSON encode/decode with diagnostics that point at the offending value.
//!
//! `serde_json` reports *that* a value could not be serialized, not *where*.
//! When encoding fails, [`encode_json`] walks the value through serde's data
//! model and names every map key or sequence index whose value fails on its
//! own, recursing into nested containers:
//!
//! ```text
//! map had unencodable value at keys: {"params": because (sequence had unencodable value at index: [1: because (...)])}
//! ```

use std::fmt;

use serde::ser::{self, Serialize};
use serde_json::error::Category;
use serde_json::Value;

use crate::error::{CoreError, ParseError};

/// Serialize `value` to a JSON string.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value).map_err(|err| CoreError::Encoding(explain(value, &err)))
}

/// Serialize `value` to a [`Value`] tree.
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|err| CoreError::Encoding(explain(value, &err)))
}

/// Parse `text` as JSON, keeping the document and error position on failure.
pub fn decode_json(text: &str) -> Result<Value, CoreError> {
    serde_json::from_str(text).map_err(|err| {
        CoreError::Parse(ParseError {
            document: text.to_owned(),
            reason: err.to_string(),
            line: err.line(),
            column: err.column(),
            offset: char_offset(text, &err),
        })
    })
}

// serde_json reports a 1-based line and byte column. For syntax errors the
// column points at the offending byte; at end of input it points past the
// last byte consumed.
fn char_offset(text: &str, err: &serde_json::Error) -> usize {
    let line = err.line();
    if line == 0 {
        return 0;
    }
    let column = match err.classify() {
        Category::Eof => err.column(),
        _ => err.column().saturating_sub(1),
    };
    let mut offset = 0;
    for (index, content) in text.split('\n').enumerate() {
        if index + 1 == line {
            let prefix = content
                .char_indices()
                .take_while(|(byte, _)| *byte < column)
                .count();
            return offset + prefix;
        }
        offset += content.chars().count() + 1;
    }
    text.chars().count()
}

// ==============================================================================
// Failure Diagnostics
// ==============================================================================

fn explain<T: Serialize + ?Sized>(value: &T, err: &serde_json::Error) -> String {
    match value.serialize(Probe) {
        Ok(Some(details)) => details,
        // Scalars, or containers whose own Serialize impl failed.
        _ => err.to_string(),
    }
}

fn child_failure<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(_) => None,
        Err(err) => Some(explain(value, &err)),
    }
}

fn key_label<K: Serialize + ?Sized>(key: &K) -> String {
    match serde_json::to_value(key) {
        Ok(Value::String(s)) => format!("{s:?}"),
        Ok(other) => other.to_string(),
        Err(_) => "<unrepresentable key>".to_owned(),
    }
}

/// A one-entry map, used to check whether `K` is acceptable as a JSON object key.
struct SingleKey<'a, K: ?Sized>(&'a K);

impl<K: Serialize + ?Sized> Serialize for SingleKey<'_, K> {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &())?;
        map.end()
    }
}

#[derive(Debug)]
struct ProbeError(String);

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ProbeError {}

impl ser::Error for ProbeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Serializer that mirrors the structure of a value and reports which
/// children fail to encode. Yields `None` when it found nothing to blame.
struct Probe;

#[derive(Default)]
struct IndexProbe {
    failures: Vec<String>,
    next: usize,
}

impl IndexProbe {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) {
        if let Some(reason) = child_failure(value) {
            self.failures
                .push(format!("{}: because ({reason})", self.next));
        }
        self.next += 1;
    }

    fn finish(self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "sequence had unencodable value at index: [{}]",
            self.failures.join("; ")
        ))
    }
}

#[derive(Default)]
struct KeyProbe {
    failures: Vec<String>,
    pending_key: Option<String>,
}

impl KeyProbe {
    fn entry<T: Serialize + ?Sized>(&mut self, label: String, value: &T) {
        if let Some(reason) = child_failure(value) {
            self.failures.push(format!("{label}: because ({reason})"));
        }
    }

    fn finish(self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "map had unencodable value at keys: {{{}}}",
            self.failures.join("; ")
        ))
    }
}

macro_rules! probe_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<Self::Ok, Self::Error> {
                Ok(None)
            }
        )*
    };
}

impl ser::Serializer for Probe {
    type Ok = Option<String>;
    type Error = ProbeError;
    type SerializeSeq = IndexProbe;
    type SerializeTuple = IndexProbe;
    type SerializeTupleStruct = IndexProbe;
    type SerializeTupleVariant = IndexProbe;
    type SerializeMap = KeyProbe;
    type SerializeStruct = KeyProbe;
    type SerializeStructVariant = KeyProbe;

    probe_scalars!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    );

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    // serde_json writes newtype variants as `{"Variant": value}`.
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        let mut probe = KeyProbe::default();
        probe.entry(format!("{variant:?}"), value);
        Ok(probe.finish())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(IndexProbe::default())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(IndexProbe::default())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(IndexProbe::default())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(IndexProbe::default())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(KeyProbe::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(KeyProbe::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(KeyProbe::default())
    }
}

impl ser::SerializeSeq for IndexProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProbeError> {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for IndexProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProbeError> {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for IndexProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProbeError> {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for IndexProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProbeError> {
        self.element(value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for KeyProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ProbeError> {
        let label = key_label(key);
        if let Err(err) = serde_json::to_string(&SingleKey(key)) {
            self.failures.push(format!("{label}: because ({err})"));
        }
        self.pending_key = Some(label);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ProbeError> {
        let label = self
            .pending_key
            .take()
            .unwrap_or_else(|| "<missing key>".to_owned());
        self.entry(label, value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for KeyProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ProbeError> {
        self.entry(format!("{key:?}"), value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for KeyProbe {
    type Ok = Option<String>;
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ProbeError> {
        self.entry(format!("{key:?}"), value);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, ProbeError> {
        Ok(self.finish())
    }
}
