use crate::protocol::error::ProtocolError;
use crate::protocol::frame::convert::FieldCodec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which side of a field receives the fill characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Padding {
    /// Fill characters precede the content (content is right-aligned).
    Left,
    /// Content precedes the fill characters (content is left-aligned).
    Right,
}

/// Positional layout rule for one field of one MID revision.
///
/// Descriptors are declared in body order; each field occupies the columns
/// immediately after its predecessor, so offsets are implied by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Logical key identifying the field within its message type.
    pub key: &'static str,
    /// Character count on the wire.
    pub width: usize,
    /// Fill character.
    pub pad: char,
    /// Fill orientation.
    pub padding: Padding,
    /// A trailing optional field may be omitted from the body entirely.
    pub optional: bool,
}

impl FieldDescriptor {
    /// Zero-left-padded numeric field, the protocol's default for numbers.
    pub const fn numeric(key: &'static str, width: usize) -> Self {
        Self {
            key,
            width,
            pad: '0',
            padding: Padding::Left,
            optional: false,
        }
    }

    /// Space-right-padded text field.
    pub const fn text(key: &'static str, width: usize) -> Self {
        Self {
            key,
            width,
            pad: ' ',
            padding: Padding::Right,
            optional: false,
        }
    }

    /// Override the fill character and orientation.
    pub const fn padded(mut self, pad: char, padding: Padding) -> Self {
        self.pad = pad;
        self.padding = padding;
        self
    }

    /// Mark the field as omissible when the body ends before it.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Strip fill characters from a width-exact slice, keeping the
    /// canonical content. A numeric field of all zero-fills canonicalizes
    /// to `"0"` rather than the empty string.
    pub(crate) fn strip<'a>(&self, raw: &'a str) -> &'a str {
        match self.padding {
            Padding::Left => {
                let stripped = raw.trim_start_matches(self.pad);
                if stripped.is_empty() && !raw.is_empty() && self.pad == '0' {
                    "0"
                } else {
                    stripped
                }
            }
            Padding::Right => raw.trim_end_matches(self.pad),
        }
    }
}

/// Per-revision field layout of one MID type.
///
/// The revision map is sparse: a lookup falls back to the nearest defined
/// lower revision, so a type whose layout never changes declares it once
/// and a type that resizes a field (e.g. a job id growing from two to four
/// digits at revision 2) declares only the revisions where the shape moves.
#[derive(Debug, Clone)]
pub struct MidSchema {
    mid: u16,
    revisions: BTreeMap<u16, Vec<FieldDescriptor>>,
}

impl MidSchema {
    /// Start an empty schema for the given MID number. The number only
    /// identifies the owner in errors; dispatch stays the catalog's job.
    pub fn new(mid: u16) -> Self {
        Self {
            mid,
            revisions: BTreeMap::new(),
        }
    }

    /// Declare the field list that takes effect at `revision`.
    pub fn revision(mut self, revision: u16, fields: Vec<FieldDescriptor>) -> Self {
        self.revisions.insert(revision, fields);
        self
    }

    /// Layout applicable to `revision`, falling back to the nearest defined
    /// lower revision. `None` when the revision predates every declaration.
    pub fn fields_for(&self, revision: u16) -> Option<&[FieldDescriptor]> {
        self.revisions
            .range(..=revision)
            .next_back()
            .map(|(_, fields)| fields.as_slice())
    }

    /// Slice a body into per-field raw values for the given revision.
    ///
    /// The body must match the declared widths exactly: a mandatory field
    /// cut short is `TruncatedBody`, characters after the last field are
    /// `TrailingBody`. A trailing optional field may be omitted outright.
    pub fn resolve(&self, body: &str, revision: u16) -> Result<FieldValues, ProtocolError> {
        let descriptors = self
            .fields_for(revision)
            .ok_or(ProtocolError::UnsupportedRevision {
                mid: self.mid,
                revision,
            })?;

        let mut values = FieldValues::default();
        let mut rest = body;
        for descriptor in descriptors {
            if rest.is_empty() && descriptor.optional {
                continue;
            }
            if rest.len() < descriptor.width {
                return Err(ProtocolError::TruncatedBody {
                    field: descriptor.key.to_string(),
                    missing: descriptor.width - rest.len(),
                });
            }
            let (chunk, tail) = rest.split_at(descriptor.width);
            rest = tail;
            let stripped = descriptor.strip(chunk);
            if !stripped.is_empty() {
                values.set_raw_unchecked(descriptor.key, stripped.to_string());
            }
        }
        if !rest.is_empty() {
            return Err(ProtocolError::TrailingBody(rest.len()));
        }
        Ok(values)
    }

    /// Render stored values into a column-exact body for the given revision.
    ///
    /// An unset mandatory field renders as pure fill characters; an unset
    /// optional field contributes nothing. Width overflow here means a value
    /// bypassed the checked setters and is reported, never truncated.
    pub fn render(&self, values: &FieldValues, revision: u16) -> Result<String, ProtocolError> {
        let descriptors = self
            .fields_for(revision)
            .ok_or(ProtocolError::UnsupportedRevision {
                mid: self.mid,
                revision,
            })?;

        let capacity: usize = descriptors.iter().map(|d| d.width).sum();
        let mut out = String::with_capacity(capacity);
        for descriptor in descriptors {
            let raw = values.raw(descriptor.key);
            if raw.is_none() && descriptor.optional {
                continue;
            }
            let raw = raw.unwrap_or("");
            if raw.len() > descriptor.width {
                return Err(ProtocolError::FieldOverflow {
                    field: descriptor.key.to_string(),
                    value: raw.to_string(),
                    width: descriptor.width,
                });
            }
            let fill = descriptor.width - raw.len();
            match descriptor.padding {
                Padding::Left => {
                    for _ in 0..fill {
                        out.push(descriptor.pad);
                    }
                    out.push_str(raw);
                }
                Padding::Right => {
                    out.push_str(raw);
                    for _ in 0..fill {
                        out.push(descriptor.pad);
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Raw value storage of one message instance.
///
/// Values are kept as canonical (fill-stripped) text keyed by the field's
/// logical name; typed access goes through a [`FieldCodec`]. The checked
/// setters enforce the width limit at assignment time so an unpackable
/// entity cannot be built through the typed path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<&'static str, String>,
}

impl FieldValues {
    /// Canonical raw text of a field, if set.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store raw text after checking it against the descriptor's width.
    pub fn set_raw(
        &mut self,
        descriptor: &FieldDescriptor,
        raw: String,
    ) -> Result<(), ProtocolError> {
        if raw.len() > descriptor.width {
            return Err(ProtocolError::FieldOverflow {
                field: descriptor.key.to_string(),
                value: raw,
                width: descriptor.width,
            });
        }
        let canonical = descriptor.strip(&raw).to_string();
        self.values.insert(descriptor.key, canonical);
        Ok(())
    }

    /// Store raw text without a width check.
    ///
    /// This is the deferred-validation path: some producers build messages
    /// with out-of-range values and only check them via `Mid::validate`
    /// before transmission. Rendering still refuses to truncate.
    pub fn set_raw_unchecked(&mut self, key: &'static str, raw: String) {
        self.values.insert(key, raw);
    }

    /// Decode a field through a converter. `Ok(None)` when unset.
    pub fn get<C: FieldCodec>(
        &self,
        codec: &C,
        key: &str,
    ) -> Result<Option<C::Value>, ProtocolError> {
        match self.values.get(key) {
            Some(raw) => codec.decode(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Encode a typed value through a converter and store it, subject to
    /// the assignment-time width check.
    pub fn set<C: FieldCodec>(
        &mut self,
        codec: &C,
        descriptor: &FieldDescriptor,
        value: &C::Value,
    ) -> Result<(), ProtocolError> {
        self.set_raw(descriptor, codec.encode(value))
    }

    /// Remove a stored value.
    pub fn clear(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
