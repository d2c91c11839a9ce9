use crate::protocol::error::ProtocolError;
use chrono::NaiveDateTime;
use std::any::type_name;
use std::marker::PhantomData;

/// Wire format of Open Protocol timestamps, e.g. `2001-12-01:20:12:45`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d:%H:%M:%S";

/// Stateless two-way converter between canonical field text and a typed
/// value.
///
/// Converters never pad and never know a width: the same converter is
/// reused across fields of differing widths, and the layout engine applies
/// the descriptor's fill rule around the encoded text.
pub trait FieldCodec {
    type Value;

    /// Decode canonical (fill-stripped) field text.
    fn decode(&self, text: &str) -> Result<Self::Value, ProtocolError>;

    /// Encode a value to its shortest text form. Total for any value of the
    /// declared type; range policing belongs to the owning entity.
    fn encode(&self, value: &Self::Value) -> String;
}

/// Unsigned decimal integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl FieldCodec for IntCodec {
    type Value = u32;

    fn decode(&self, text: &str) -> Result<u32, ProtocolError> {
        text.parse().map_err(|_| ProtocolError::Conversion {
            text: text.to_string(),
            target: "u32",
        })
    }

    fn encode(&self, value: &u32) -> String {
        value.to_string()
    }
}

/// Single-character booleans, `0` or `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl FieldCodec for BoolCodec {
    type Value = bool;

    fn decode(&self, text: &str) -> Result<bool, ProtocolError> {
        match text {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(ProtocolError::Conversion {
                text: text.to_string(),
                target: "bool",
            }),
        }
    }

    fn encode(&self, value: &bool) -> String {
        if *value { "1" } else { "0" }.to_string()
    }
}

/// Plain text, passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl FieldCodec for TextCodec {
    type Value = String;

    fn decode(&self, text: &str) -> Result<String, ProtocolError> {
        Ok(text.to_string())
    }

    fn encode(&self, value: &String) -> String {
        value.clone()
    }
}

/// 19-character timestamps in [`TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampCodec;

impl FieldCodec for TimestampCodec {
    type Value = NaiveDateTime;

    fn decode(&self, text: &str) -> Result<NaiveDateTime, ProtocolError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| {
            ProtocolError::Conversion {
                text: text.to_string(),
                target: "timestamp",
            }
        })
    }

    fn encode(&self, value: &NaiveDateTime) -> String {
        value.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Enum-backed numeric code carried in a field.
///
/// Implemented by catalog enums whose wire value is a small decimal code;
/// `from_code` may keep a catch-all variant for vendor-specific codes the
/// way unknown device codes are usually preserved rather than rejected.
pub trait FieldCode: Sized {
    fn from_code(code: u32) -> Option<Self>;
    fn code(&self) -> u32;
}

/// Converter for [`FieldCode`] enums.
#[derive(Debug, Clone, Copy)]
pub struct CodeCodec<T>(PhantomData<T>);

impl<T> CodeCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for CodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FieldCode> FieldCodec for CodeCodec<T> {
    type Value = T;

    fn decode(&self, text: &str) -> Result<T, ProtocolError> {
        let code = IntCodec.decode(text)?;
        T::from_code(code).ok_or_else(|| ProtocolError::Conversion {
            text: text.to_string(),
            target: type_name::<T>(),
        })
    }

    fn encode(&self, value: &T) -> String {
        value.code().to_string()
    }
}
