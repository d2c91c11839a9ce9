// Open Protocol codec library entry.
//
// This crate implements the shared message framework for "Open Protocol",
// the fixed-width ASCII protocol spoken by industrial tightening
// controllers. It provides the header codec, the per-revision field layout
// engine, the value converters and the MID dispatch table; concrete MID
// catalog entries are thin declarations against this framework.

pub mod mids;
pub mod protocol;

pub use protocol::codec::OpenProtocolCodec;
pub use protocol::dispatch::{MidCatalog, MidFactory};
pub use protocol::error::ProtocolError;
pub use protocol::frame::{
    BoolCodec, CodeCodec, FieldCode, FieldCodec, FieldDescriptor, FieldValues, IntCodec, Mid,
    MidHeader, MidSchema, Padding, TextCodec, TimestampCodec, HEADER_LEN,
};
