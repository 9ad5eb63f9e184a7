//! Protocol implementations for the Skiff file-transfer ecosystem.
//!
//! This crate currently provides:
//!
//! - **SFTP** (SSH File Transfer Protocol) - client side of v3, per
//!   `draft-ietf-secsh-filexfer-02`
//!
//! # Features
//!
//! - `sftp` (default) - SFTP client support
//!
//! # Example
//!
//! ```rust
//! use skiff_proto::sftp::{Packet, PacketType};
//!
//! // Build an SSH_FXP_OPEN packet body.
//! let mut packet = Packet::new(PacketType::Open);
//! packet.add_u32(256);
//! packet.add_string(b"/etc/motd");
//!
//! // Re-parse it as if it had arrived off the wire.
//! let mut parsed = Packet::from_body(packet.body().to_vec()).unwrap();
//! assert_eq!(parsed.get_u32(), Some(256));
//! assert_eq!(parsed.get_string(), Some(&b"/etc/motd"[..]));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

#[cfg(feature = "sftp")]
pub mod sftp;
