//! Open Protocol message primitives.
//!
//! This module groups the low-level protocol machinery shared by every MID
//! type: the fixed-offset header codec, the revision-aware field layout
//! engine, value converters, the dispatch table and the TCP framing codec.

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod frame;
