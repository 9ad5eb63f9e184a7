//! SFTP (SSH File Transfer Protocol) client implementation.
//!
//! This module implements the client side of SFTP v3, the most widely
//! supported version, over an externally supplied byte stream
//! (conventionally an SSH channel running the `sftp` subsystem).
//!
//! # Architecture
//!
//! Requests carry client-chosen 32-bit IDs and responses may arrive in
//! any order, so the session keeps a table of outstanding requests and
//! correlates each inbound packet by ID. On top of the per-operation
//! send/recv pairs, a windowed transfer engine keeps many READ or
//! WRITE requests in flight to saturate high-latency links while still
//! delivering data in order.
//!
//! # Protocol Flow
//!
//! ```text
//! Client                          Server
//!   |                               |
//!   |-- SSH_FXP_INIT -------------->|
//!   |<- SSH_FXP_VERSION ------------|
//!   |                               |
//!   |-- SSH_FXP_OPEN -------------->|
//!   |<- SSH_FXP_HANDLE -------------|
//!   |                               |
//!   |-- SSH_FXP_READ (id 256) ----->|
//!   |-- SSH_FXP_READ (id 257) ----->|
//!   |-- SSH_FXP_READ (id 258) ----->|
//!   |<- SSH_FXP_DATA (id 257) ------|
//!   |<- SSH_FXP_DATA (id 256) ------|
//!   |<- SSH_FXP_DATA (id 258) ------|
//!   |                               |
//!   |-- SSH_FXP_CLOSE ------------->|
//!   |<- SSH_FXP_STATUS -------------|
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use skiff_proto::sftp::{OpenFlags, SftpClient};
//!
//! # async fn example<S>(stream: S) -> Result<(), Box<dyn std::error::Error>>
//! # where S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin {
//! let mut sftp = SftpClient::new(stream);
//! sftp.init().await?;
//!
//! let home = sftp.realpath(".").await?;
//! let handle = sftp.open(&home, OpenFlags::READ).await?;
//! let attrs = sftp.fstat(&handle).await?;
//! println!("{} is {:?} bytes", home, attrs.size);
//! sftp.close(handle).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - [SFTP Draft v3](https://datatracker.ietf.org/doc/html/draft-ietf-secsh-filexfer-02)

pub mod client;
pub mod packet;
pub mod request;
pub mod transport;
pub mod types;
pub mod xfer;

pub use client::SftpClient;
pub use packet::Packet;
pub use request::{Request, RequestTable, REQUEST_ID_OFFSET};
pub use types::{
    AttrFlags, FileAttributes, FileHandle, Name, OpenFlags, PacketType, StatusCode,
    SFTP_PROTO_VERSION,
};
pub use xfer::{PacketOutcome, Transfer, TransferConfig};
