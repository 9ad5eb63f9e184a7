//! Length-prefixed framing over a byte stream.
//!
//! Each SFTP packet travels as a 4-byte big-endian body length followed
//! by the body itself; byte 0 of the body is the packet type. The
//! framing layer does no further interpretation. The stream is
//! conventionally an SSH channel, but any `AsyncRead + AsyncWrite`
//! transport that delivers bytes reliably and in order will do; once a
//! read or write fails the session is dead.

use skiff_platform::{SkiffError, SkiffResult};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::packet::Packet;

/// Upper bound on an inbound frame body.
///
/// Well-formed v3 traffic stays far below this (data blocks are 32 KiB
/// and name batches are modest); a peer claiming more is lying and must
/// not be able to choose our allocation size.
pub const MAX_SFTP_PACKET: usize = 256 * 1024;

/// Frames and sends one packet.
pub async fn send_packet<S>(stream: &mut S, pkt: &Packet) -> SkiffResult<()>
where
    S: AsyncWrite + Unpin,
{
    let length = pkt.len() as u32;
    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(pkt.body()).await?;
    stream.flush().await?;
    Ok(())
}

/// Receives one framed packet.
///
/// Reads the length prefix, then exactly that many body bytes. A
/// truncated stream surfaces as [`SkiffError::Io`]; a zero or
/// over-limit length as [`SkiffError::Protocol`].
pub async fn recv_packet<S>(stream: &mut S) -> SkiffResult<Packet>
where
    S: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    stream.read_exact(&mut prefix).await?;
    let length = u32::from_be_bytes(prefix) as usize;

    if length == 0 || length > MAX_SFTP_PACKET {
        return Err(SkiffError::Protocol(format!(
            "SFTP packet length {} out of range",
            length
        )));
    }

    let mut body = vec![0u8; length];
    stream.read_exact(&mut body).await?;

    Packet::from_body(body)
        .ok_or_else(|| SkiffError::Protocol("empty SFTP packet body".to_string()))
}
