//! Pipelined read/write transfers.
//!
//! A single READ round trip per block leaves a high-latency link mostly
//! idle, so [`Transfer`] keeps a whole window of requests in flight:
//! it queues fixed-size reads (or caller-fed writes) until the
//! outstanding byte total reaches the window budget, correlates each
//! response back to its block through the request table, and hands
//! download data to the caller strictly in submission order however the
//! responses interleave.
//!
//! The caller owns the event loop: queue requests, receive a packet,
//! feed it to [`download_gotpkt`](Transfer::download_gotpkt) or
//! [`upload_gotpkt`](Transfer::upload_gotpkt), drain
//! [`download_data`](Transfer::download_data), repeat until
//! [`done`](Transfer::done).

use std::collections::VecDeque;

use skiff_platform::SkiffResult;
use tokio::io::AsyncWrite;
use tracing::{debug, warn};

use super::client::SftpClient;
use super::packet::Packet;
use super::request::Request;
use super::types::{FileHandle, StatusCode};

/// Transfer tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct TransferConfig {
    /// Maximum total bytes in outstanding sub-requests.
    pub window: usize,
    /// Bytes requested per READ sub-request.
    pub block: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            window: 1_048_576,
            block: 32_768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkState {
    Pending,
    Done,
    Failed,
}

/// One in-flight sub-request.
#[derive(Debug)]
struct Chunk {
    seq: u64,
    offset: u64,
    len: u32,
    buffer: Vec<u8>,
    retlen: usize,
    state: ChunkState,
}

/// What became of a packet fed to the transfer engine.
#[derive(Debug)]
pub enum PacketOutcome {
    /// The packet answered one of this transfer's sub-requests.
    Claimed,
    /// The packet matched an outstanding request that does not belong
    /// to this transfer; the packet and its request record are handed
    /// back for the caller to dispatch.
    NotOurs(Packet, Request),
}

/// A windowed transfer over one open file handle.
///
/// Downloads start with [`Transfer::download`] and are driven by
/// [`queue_reads`](Self::queue_reads); uploads start with
/// [`Transfer::upload`], begin life at EOF (the caller knows when its
/// data runs out) and are fed through
/// [`upload_data`](Self::upload_data).
#[derive(Debug)]
pub struct Transfer {
    handle: FileHandle,
    queue: VecDeque<Chunk>,
    next_seq: u64,
    offset: u64,
    furthest_data: u64,
    filesize: u64,
    in_flight: usize,
    window: usize,
    block: u32,
    eof: bool,
    err: bool,
}

impl Transfer {
    fn new(handle: FileHandle, offset: u64, config: TransferConfig, eof: bool) -> Self {
        Self {
            handle,
            queue: VecDeque::new(),
            next_seq: 0,
            offset,
            furthest_data: 0,
            filesize: u64::MAX,
            in_flight: 0,
            window: config.window,
            block: config.block,
            eof,
            err: false,
        }
    }

    /// Starts a download at `offset` with default tuning.
    pub fn download(handle: FileHandle, offset: u64) -> Self {
        Self::download_with(TransferConfig::default(), handle, offset)
    }

    /// Starts a download at `offset`.
    pub fn download_with(config: TransferConfig, handle: FileHandle, offset: u64) -> Self {
        Self::new(handle, offset, config, false)
    }

    /// Starts an upload at `offset` with default tuning.
    pub fn upload(handle: FileHandle, offset: u64) -> Self {
        Self::upload_with(TransferConfig::default(), handle, offset)
    }

    /// Starts an upload at `offset`.
    pub fn upload_with(config: TransferConfig, handle: FileHandle, offset: u64) -> Self {
        Self::new(handle, offset, config, true)
    }

    /// The handle being transferred.
    pub fn handle(&self) -> &FileHandle {
        &self.handle
    }

    /// Total bytes in outstanding sub-requests.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether the transfer has finished: EOF seen (or an error
    /// recorded) and no sub-request still queued.
    pub fn done(&self) -> bool {
        (self.eof || self.err) && self.queue.is_empty()
    }

    /// Records a caller-observed failure so [`done`](Self::done) can
    /// become true once the queue drains.
    pub fn set_error(&mut self) {
        self.err = true;
    }

    /// Releases every queued sub-request and its buffer. Call when
    /// abandoning a transfer; outstanding request-table entries are the
    /// session's to clean up.
    pub fn cleanup(&mut self) {
        self.queue.clear();
        self.in_flight = 0;
    }

    /// Keeps the read pipeline full: queues fixed-size READs until the
    /// window is full, EOF has been seen, or an error is recorded.
    pub async fn queue_reads<S>(&mut self, client: &mut SftpClient<S>) -> SkiffResult<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.in_flight < self.window && !self.eof && !self.err {
            let seq = self.next_seq;
            self.next_seq += 1;

            let id = client.read_send(&self.handle, self.offset, self.block).await?;
            client.register(id);
            client.set_request_tag(id, seq);
            debug!("Queueing read request {} at offset {}", seq, self.offset);

            self.queue.push_back(Chunk {
                seq,
                offset: self.offset,
                len: self.block,
                buffer: vec![0u8; self.block as usize],
                retlen: 0,
                state: ChunkState::Pending,
            });
            self.offset += u64::from(self.block);
            self.in_flight += self.block as usize;
        }
        Ok(())
    }

    /// Feeds a received packet to a download.
    ///
    /// The packet is correlated through the request table; a response
    /// to some other caller's request comes back as
    /// [`PacketOutcome::NotOurs`]. EOF (either convention: a status
    /// with code 1, or a zero-length block) marks the block failed and
    /// stops further queueing; any other read failure poisons the
    /// transfer. A block shorter than requested lowers the inferred
    /// file size, and a block acknowledged beyond that inferred size is
    /// a protocol anomaly.
    pub fn download_gotpkt<S>(
        &mut self,
        client: &mut SftpClient<S>,
        mut pktin: Packet,
    ) -> SkiffResult<PacketOutcome> {
        let req = client.find_request(&mut pktin)?;
        let Some(seq) = req.tag() else {
            return Ok(PacketOutcome::NotOurs(pktin, req));
        };
        let Some(index) = self.queue.iter().position(|c| c.seq == seq) else {
            return Err(client.internal_error("request ID mismatch"));
        };

        let mut buffer = std::mem::take(&mut self.queue[index].buffer);
        let result = client.read_recv(pktin, req, &mut buffer);
        self.queue[index].buffer = buffer;

        let (offset, len) = (self.queue[index].offset, self.queue[index].len);
        match result {
            Ok(0) => {
                debug!("Read request {} returned end of file", seq);
                self.queue[index].state = ChunkState::Failed;
                self.eof = true;
            }
            Ok(retlen) => {
                debug!("Read request {} has returned {} bytes", seq, retlen);
                self.queue[index].retlen = retlen;
                self.queue[index].state = ChunkState::Done;

                if offset > self.furthest_data {
                    self.furthest_data = offset;
                }
                if (retlen as u32) < len {
                    let candidate = offset + retlen as u64;
                    if self.filesize > candidate {
                        debug!("Short block, lowering file size estimate to {}", candidate);
                        self.filesize = candidate;
                    }
                }
                if self.furthest_data > self.filesize {
                    warn!(
                        "Block acknowledged at offset {} beyond inferred file size {}",
                        self.furthest_data, self.filesize
                    );
                    self.err = true;
                    return Err(client
                        .internal_error("received a short buffer from FXP_READ, but not at EOF"));
                }
            }
            Err(_) if client.error_type() == StatusCode::Eof as i32 => {
                debug!("Read request {} returned end of file", seq);
                self.queue[index].state = ChunkState::Failed;
                self.eof = true;
            }
            Err(err) => {
                self.queue[index].state = ChunkState::Failed;
                self.err = true;
                return Err(err);
            }
        }

        Ok(PacketOutcome::Claimed)
    }

    /// Hands back the next downloaded block in submission order, or
    /// `None` while the head of the queue is still pending (or the
    /// queue is empty). Failed and EOF blocks at the head are
    /// discarded along the way. The caller owns the returned buffer.
    pub fn download_data(&mut self) -> Option<Vec<u8>> {
        loop {
            match self.queue.front() {
                Some(head) if head.state != ChunkState::Pending => {}
                _ => return None,
            }
            let Some(mut chunk) = self.queue.pop_front() else {
                return None;
            };
            self.in_flight -= chunk.len as usize;
            if chunk.state == ChunkState::Done {
                debug!("Handing back data from read request {}", chunk.seq);
                chunk.buffer.truncate(chunk.retlen);
                return Some(chunk.buffer);
            }
            debug!("Skipping failed read request {}", chunk.seq);
        }
    }

    /// Whether the window has room for another outbound block.
    pub fn upload_ready(&self) -> bool {
        self.in_flight < self.window
    }

    /// Queues one WRITE of `data` at the transfer's current offset.
    /// The data lives in the outbound packet only; no copy is retained.
    pub async fn upload_data<S>(
        &mut self,
        client: &mut SftpClient<S>,
        data: &[u8],
    ) -> SkiffResult<()>
    where
        S: AsyncWrite + Unpin,
    {
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = client.write_send(&self.handle, self.offset, data).await?;
        client.register(id);
        client.set_request_tag(id, seq);
        debug!(
            "Queueing write request {} at offset {} [len {}]",
            seq,
            self.offset,
            data.len()
        );

        self.queue.push_back(Chunk {
            seq,
            offset: self.offset,
            len: data.len() as u32,
            buffer: Vec::new(),
            retlen: 0,
            state: ChunkState::Pending,
        });
        self.offset += data.len() as u64;
        self.in_flight += data.len();
        Ok(())
    }

    /// Feeds a received packet to an upload. The acknowledged
    /// sub-request is removed whatever the outcome; a failed write
    /// poisons the transfer and surfaces the error.
    pub fn upload_gotpkt<S>(
        &mut self,
        client: &mut SftpClient<S>,
        mut pktin: Packet,
    ) -> SkiffResult<PacketOutcome> {
        let req = client.find_request(&mut pktin)?;
        let Some(seq) = req.tag() else {
            return Ok(PacketOutcome::NotOurs(pktin, req));
        };
        let Some(index) = self.queue.iter().position(|c| c.seq == seq) else {
            return Err(client.internal_error("request ID mismatch"));
        };

        let Some(chunk) = self.queue.remove(index) else {
            return Err(client.internal_error("request ID mismatch"));
        };
        self.in_flight -= chunk.len as usize;

        match client.write_recv(pktin, req) {
            Ok(()) => {
                debug!("Write request {} acknowledged", seq);
                Ok(PacketOutcome::Claimed)
            }
            Err(err) => {
                self.err = true;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handle() -> FileHandle {
        FileHandle::new(vec![1, 2, 3, 4])
    }

    #[test]
    fn test_download_starts_unfinished() {
        let xfer = Transfer::download(test_handle(), 0);
        assert!(!xfer.done());
        assert_eq!(xfer.in_flight(), 0);
    }

    #[test]
    fn test_upload_with_empty_queue_is_done() {
        // An upload starts at EOF; with nothing queued it is already
        // complete.
        let xfer = Transfer::upload(test_handle(), 0);
        assert!(xfer.done());
        assert!(xfer.upload_ready());
    }

    #[test]
    fn test_set_error_finishes_once_drained() {
        let mut xfer = Transfer::download(test_handle(), 0);
        assert!(!xfer.done());
        xfer.set_error();
        assert!(xfer.done());
    }

    #[test]
    fn test_cleanup_resets_in_flight() {
        let mut xfer = Transfer::download(test_handle(), 0);
        xfer.queue.push_back(Chunk {
            seq: 0,
            offset: 0,
            len: 32_768,
            buffer: vec![0u8; 32_768],
            retlen: 0,
            state: ChunkState::Pending,
        });
        xfer.in_flight = 32_768;

        xfer.cleanup();
        assert_eq!(xfer.in_flight(), 0);
        assert!(xfer.queue.is_empty());
    }

    #[test]
    fn test_download_data_in_order_with_failed_heads() {
        let mut xfer = Transfer::download(test_handle(), 0);
        for (seq, state, retlen) in [
            (0u64, ChunkState::Failed, 0usize),
            (1, ChunkState::Done, 5),
            (2, ChunkState::Pending, 0),
        ] {
            xfer.queue.push_back(Chunk {
                seq,
                offset: seq * 8,
                len: 8,
                buffer: vec![seq as u8; 8],
                retlen,
                state,
            });
            xfer.in_flight += 8;
        }

        // Failed head is discarded, the done block comes back truncated
        // to its returned length, the pending block stops delivery.
        let block = xfer.download_data().unwrap();
        assert_eq!(block, vec![1u8; 5]);
        assert!(xfer.download_data().is_none());
        assert_eq!(xfer.in_flight(), 8);
    }

    #[test]
    fn test_default_config() {
        let config = TransferConfig::default();
        assert_eq!(config.window, 1_048_576);
        assert_eq!(config.block, 32_768);
    }
}
