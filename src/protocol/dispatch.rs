//! MID dispatch table.
//!
//! Incoming traffic is heterogeneous: the MID number in the header decides
//! which concrete type owns a raw message. Each type claims exactly one
//! MID number at registration time, duplicate claims are rejected there,
//! and lookup is a plain map access — registration order can never change
//! which type parses a message.

use crate::protocol::error::ProtocolError;
use crate::protocol::frame::{Mid, MidHeader};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Constructor for a blank entity of one concrete MID type.
pub type MidFactory = fn() -> Box<dyn Mid>;

/// Registry mapping MID numbers to message-type factories.
///
/// Populate once at startup, then share freely: `parse` takes `&self` and
/// the table is never mutated afterwards, so one catalog can serve many
/// concurrent parse calls.
#[derive(Debug, Default)]
pub struct MidCatalog {
    factories: HashMap<u16, MidFactory>,
}

impl MidCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message type under the MID number it reports.
    pub fn register<M: Mid + Default>(&mut self) -> Result<(), ProtocolError> {
        let mid = M::default().mid();
        self.register_factory(mid, blank::<M>)
    }

    /// Register an explicit factory, for types without a useful `Default`.
    pub fn register_factory(&mut self, mid: u16, factory: MidFactory) -> Result<(), ProtocolError> {
        if self.factories.contains_key(&mid) {
            return Err(ProtocolError::DuplicateMid { mid });
        }
        trace!(mid, "registered message type");
        self.factories.insert(mid, factory);
        Ok(())
    }

    pub fn is_registered(&self, mid: u16) -> bool {
        self.factories.contains_key(&mid)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Identify and parse a raw message.
    ///
    /// Header errors surface as `MalformedHeader`; a MID number no
    /// registered type claims is the non-fatal `UnknownMid` outcome; body
    /// errors from the owning type come back unchanged. Exactly one type
    /// parses the message or none does — there is no partial consumption.
    pub fn parse(&self, raw: &str) -> Result<Box<dyn Mid>, ProtocolError> {
        let header = MidHeader::parse(raw)?;
        let factory = self
            .factories
            .get(&header.mid)
            .ok_or(ProtocolError::UnknownMid { mid: header.mid })?;
        let mut message = factory();
        message.parse_raw(raw)?;
        debug!(
            mid = header.mid,
            revision = header.layout_revision(),
            length = header.length,
            "parsed message"
        );
        Ok(message)
    }

    /// Parse a raw message the caller already knows the type of.
    pub fn parse_as<M: Mid + Default>(&self, raw: &str) -> Result<M, ProtocolError> {
        let message = self.parse(raw)?;
        let actual = message.mid();
        message
            .into_any()
            .downcast::<M>()
            .map(|message| *message)
            .map_err(|_| ProtocolError::MidMismatch {
                expected: M::default().mid(),
                actual,
            })
    }
}

fn blank<M: Mid + Default>() -> Box<dyn Mid> {
    Box::new(M::default())
}
