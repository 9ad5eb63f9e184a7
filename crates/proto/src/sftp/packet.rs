//! SFTP packet construction and decoding.
//!
//! # Packet Format
//!
//! ```text
//! uint32    length
//! byte      type
//! byte[n]   payload
//! ```
//!
//! A [`Packet`] holds the body (type byte plus payload) of one SFTP
//! message; the length prefix belongs to the framing layer. All
//! multi-byte integers are big-endian. Strings are length-prefixed byte
//! arrays whose wire length field is signed: a length below zero or
//! beyond the remaining bytes is a decode failure.
//!
//! The cursor does double duty: during encode it marks the open string
//! whose length prefix is patched on each payload append, during decode
//! it is the read position. One packet instance is only ever used in
//! one of the two roles.

use bytes::{BufMut, BytesMut};

use super::types::{AttrFlags, FileAttributes, PacketType};

/// Extra capacity reserved beyond the immediate need when the buffer
/// grows, to keep append sequences from reallocating on every call.
const GROW_SLACK: usize = 256;

/// One SFTP packet body, with encode and decode cursors.
#[derive(Debug)]
pub struct Packet {
    data: BytesMut,
    pos: usize,
    ptype: u8,
}

impl Packet {
    /// Creates an outbound packet of the given type.
    ///
    /// The type byte is placed at body offset 0; payload fields are
    /// appended after it.
    pub fn new(ptype: PacketType) -> Self {
        let mut pkt = Packet {
            data: BytesMut::new(),
            pos: 0,
            ptype: ptype as u8,
        };
        pkt.add_byte(ptype as u8);
        pkt
    }

    /// Lifts a received frame body into a packet.
    ///
    /// Byte 0 is the packet type; the read cursor is positioned at
    /// byte 1. Returns `None` on an empty body.
    pub fn from_body(body: Vec<u8>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let ptype = body[0];
        Some(Packet {
            data: BytesMut::from(&body[..]),
            pos: 1,
            ptype,
        })
    }

    /// The packet type byte.
    pub fn packet_type(&self) -> u8 {
        self.ptype
    }

    /// Whether this packet is of the given type.
    pub fn is_type(&self, ptype: PacketType) -> bool {
        self.ptype == ptype as u8
    }

    /// Body length in bytes (type byte included).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The body bytes (type byte included), as framed on the wire.
    pub fn body(&self) -> &[u8] {
        &self.data
    }

    /// Bytes left between the read cursor and the end of the body.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn ensure(&mut self, needed: usize) {
        if self.data.capacity() < needed {
            self.data.reserve(needed + GROW_SLACK - self.data.len());
        }
    }

    fn add_data(&mut self, bytes: &[u8]) {
        self.ensure(self.data.len() + bytes.len());
        self.data.put_slice(bytes);
    }

    /// Appends a single byte.
    pub fn add_byte(&mut self, value: u8) {
        self.add_data(&[value]);
    }

    /// Appends a big-endian u32.
    pub fn add_u32(&mut self, value: u32) {
        self.add_data(&value.to_be_bytes());
    }

    /// Appends a big-endian u64.
    pub fn add_u64(&mut self, value: u64) {
        self.add_data(&value.to_be_bytes());
    }

    /// Opens a string field: writes a zero length prefix and marks it
    /// so later [`add_string_payload`](Self::add_string_payload) calls
    /// patch it.
    pub fn add_string_begin(&mut self) {
        self.add_u32(0);
        self.pos = self.data.len();
    }

    /// Appends payload to the string opened by the last
    /// [`add_string_begin`](Self::add_string_begin) and patches its
    /// length prefix.
    pub fn add_string_payload(&mut self, bytes: &[u8]) {
        self.add_data(bytes);
        let total = (self.data.len() - self.pos) as u32;
        self.data[self.pos - 4..self.pos].copy_from_slice(&total.to_be_bytes());
    }

    /// Appends a complete length-prefixed string.
    pub fn add_string(&mut self, bytes: &[u8]) {
        self.add_string_begin();
        self.add_string_payload(bytes);
    }

    /// Appends an attribute record: the derived flag word, then each
    /// present field in wire order. Extended attributes are never
    /// emitted.
    pub fn add_attrs(&mut self, attrs: &FileAttributes) {
        self.add_u32(attrs.flags());
        if let Some(size) = attrs.size {
            self.add_u64(size);
        }
        if let (Some(uid), Some(gid)) = (attrs.uid, attrs.gid) {
            self.add_u32(uid);
            self.add_u32(gid);
        }
        if let Some(permissions) = attrs.permissions {
            self.add_u32(permissions);
        }
        if let (Some(atime), Some(mtime)) = (attrs.atime, attrs.mtime) {
            self.add_u32(atime);
            self.add_u32(mtime);
        }
    }

    /// Reads one byte, or `None` past the end of the body.
    pub fn get_byte(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let value = self.data[self.pos];
        self.pos += 1;
        Some(value)
    }

    /// Reads a big-endian u32.
    pub fn get_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let b = &self.data[self.pos..self.pos + 4];
        self.pos += 4;
        Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a big-endian u64.
    pub fn get_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let b = &self.data[self.pos..self.pos + 8];
        self.pos += 8;
        Some(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Reads a length-prefixed string as a borrowed view.
    ///
    /// The wire length field is signed; a negative length, or one
    /// larger than the bytes remaining, yields `None`.
    pub fn get_string(&mut self) -> Option<&[u8]> {
        let length = self.get_u32()?;
        if (length as i32) < 0 {
            return None;
        }
        let length = length as usize;
        if self.remaining() < length {
            return None;
        }
        let s = &self.data[self.pos..self.pos + length];
        self.pos += length;
        Some(s)
    }

    /// Reads an attribute record: only the fields the flag word
    /// selects. Extended attribute pairs are consumed and discarded.
    pub fn get_attrs(&mut self) -> Option<FileAttributes> {
        let flags = self.get_u32()?;
        let mut attrs = FileAttributes::new();
        if flags & AttrFlags::SIZE != 0 {
            attrs.size = Some(self.get_u64()?);
        }
        if flags & AttrFlags::UIDGID != 0 {
            attrs.uid = Some(self.get_u32()?);
            attrs.gid = Some(self.get_u32()?);
        }
        if flags & AttrFlags::PERMISSIONS != 0 {
            attrs.permissions = Some(self.get_u32()?);
        }
        if flags & AttrFlags::ACMODTIME != 0 {
            attrs.atime = Some(self.get_u32()?);
            attrs.mtime = Some(self.get_u32()?);
        }
        if flags & AttrFlags::EXTENDED != 0 {
            let count = self.get_u32()?;
            for _ in 0..count {
                self.get_string()?;
                self.get_string()?;
            }
        }
        Some(attrs)
    }
}
