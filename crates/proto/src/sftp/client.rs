//! SFTP client session and protocol primitives.
//!
//! [`SftpClient`] owns the transport stream, the table of outstanding
//! requests, and the session's last-error record. Every protocol
//! operation comes as a send/recv pair: the `*_send` method allocates a
//! request ID, builds the packet and dispatches it; the matching
//! `*_recv` method parses a correlated response into a typed result.
//! Between the two, [`register`](SftpClient::register) publishes the ID
//! to response correlation.
//!
//! Callers that only ever have one request outstanding can use the
//! combined methods ([`realpath`](SftpClient::realpath),
//! [`open`](SftpClient::open), ...), which drive the full round trip.
//! Pipelined transfers are the business of
//! [`Transfer`](super::xfer::Transfer), which drives the split pairs
//! directly.

use skiff_platform::{SkiffError, SkiffResult};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use super::packet::Packet;
use super::request::{Request, RequestTable};
use super::transport;
use super::types::{
    FileAttributes, FileHandle, Name, PacketType, StatusCode, SFTP_PROTO_VERSION,
};

/// Minimum wire size of one name triple in an SSH_FXP_NAME packet: an
/// empty filename, an empty longname, and a bare attribute flag word.
const NAME_ENTRY_MIN: usize = 12;

/// Interpretation of an SSH_FXP_STATUS packet.
enum Status {
    Ok,
    Eof,
    Other,
}

/// The session's last-error record: an integer kind (−1 for protocol
/// errors, otherwise the server's status code) and a fixed phrase.
/// Overwrites are lossy; only the most recent error is retained.
struct LastError {
    kind: i32,
    message: &'static str,
}

/// An SFTP v3 client session over a byte stream.
///
/// The stream is conventionally an SSH channel running the `sftp`
/// subsystem. A session is single-task: it has no internal locking and
/// is driven by issuing sends and feeding received packets back in.
pub struct SftpClient<S> {
    stream: S,
    requests: RequestTable,
    last_error: LastError,
}

impl<S> SftpClient<S> {
    /// Creates a session over an established stream.
    ///
    /// The protocol is not spoken until [`init`](Self::init) runs.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            requests: RequestTable::new(),
            last_error: LastError {
                kind: 0,
                message: "",
            },
        }
    }

    /// The message of the most recent error.
    pub fn error(&self) -> &str {
        self.last_error.message
    }

    /// The kind of the most recent error: −1 for protocol errors,
    /// otherwise an SSH_FX status code.
    pub fn error_type(&self) -> i32 {
        self.last_error.kind
    }

    /// Number of requests awaiting a response.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// Marks a request as recognisable to response correlation. Call
    /// once the send that published the ID has completed.
    pub fn register(&mut self, id: u32) {
        self.requests.register(id);
    }

    /// Attaches a tag to an outstanding request; it comes back on the
    /// [`Request`] that [`find_request`](Self::find_request) yields.
    pub fn set_request_tag(&mut self, id: u32, tag: u64) {
        self.requests.set_tag(id, tag);
    }

    /// Drops all outstanding requests, e.g. when abandoning a session
    /// with responses still in flight.
    pub fn cleanup_requests(&mut self) {
        self.requests.clear();
    }

    /// Correlates an inbound packet with its outstanding request.
    ///
    /// Reads the request ID (the four bytes after the type), removes
    /// the matching record and hands it over; the record must exist and
    /// be registered. On a miss the packet is unusable and the error
    /// state reads "request ID mismatch".
    pub fn find_request(&mut self, pktin: &mut Packet) -> SkiffResult<Request> {
        let Some(id) = pktin.get_u32() else {
            return Err(self.internal_error("did not receive a valid SFTP packet"));
        };
        if !self.requests.get(id).map_or(false, Request::is_registered) {
            warn!("Response carries unknown or unregistered request ID {}", id);
            return Err(self.internal_error("request ID mismatch"));
        }
        let Some(req) = self.requests.remove(id) else {
            return Err(self.internal_error("request ID mismatch"));
        };
        Ok(req)
    }

    pub(crate) fn internal_error(&mut self, message: &'static str) -> SkiffError {
        self.last_error = LastError { kind: -1, message };
        SkiffError::Protocol(message.to_string())
    }

    fn status_err(&self) -> SkiffError {
        SkiffError::Protocol(self.last_error.message.to_string())
    }

    /// Digests an SSH_FXP_STATUS packet into the error state and an
    /// Ok/Eof/other classification. A packet of any other type records
    /// a protocol error.
    fn got_status(&mut self, pktin: &mut Packet) -> Status {
        if !pktin.is_type(PacketType::Status) {
            self.last_error = LastError {
                kind: -1,
                message: "expected FXP_STATUS packet",
            };
            return Status::Other;
        }
        let Some(code) = pktin.get_u32() else {
            self.last_error = LastError {
                kind: -1,
                message: "malformed FXP_STATUS packet",
            };
            return Status::Other;
        };
        let known = StatusCode::from_u32(code);
        self.last_error = LastError {
            kind: code as i32,
            message: known.map_or("unknown error code", |code| code.message()),
        };
        match known {
            Some(StatusCode::Ok) => Status::Ok,
            Some(StatusCode::Eof) => Status::Eof,
            _ => Status::Other,
        }
    }

    /// Consumes a response that should be a plain OK status.
    fn status_recv(&mut self, mut pktin: Packet, req: Request) -> SkiffResult<()> {
        drop(req);
        match self.got_status(&mut pktin) {
            Status::Ok => Ok(()),
            _ => Err(self.status_err()),
        }
    }

    /// Parses an SSH_FXP_HANDLE response into an opaque file handle.
    fn handle_recv(
        &mut self,
        mut pktin: Packet,
        req: Request,
        malformed: &'static str,
    ) -> SkiffResult<FileHandle> {
        drop(req);
        if pktin.is_type(PacketType::Handle) {
            let Some(bytes) = pktin.get_string().map(<[u8]>::to_vec) else {
                return Err(self.internal_error(malformed));
            };
            Ok(FileHandle::new(bytes))
        } else {
            self.got_status(&mut pktin);
            Err(self.status_err())
        }
    }

    /// Parses an SSH_FXP_ATTRS response.
    fn attrs_recv(&mut self, mut pktin: Packet, req: Request) -> SkiffResult<FileAttributes> {
        drop(req);
        if pktin.is_type(PacketType::Attrs) {
            let Some(attrs) = pktin.get_attrs() else {
                return Err(self.internal_error("malformed SSH_FXP_ATTRS packet"));
            };
            Ok(attrs)
        } else {
            self.got_status(&mut pktin);
            Err(self.status_err())
        }
    }
}

impl<S> SftpClient<S>
where
    S: AsyncWrite + Unpin,
{
    /// Frames and sends a packet.
    pub async fn send_packet(&mut self, pkt: Packet) -> SkiffResult<()> {
        transport::send_packet(&mut self.stream, &pkt).await
    }

    async fn send_request(&mut self, pkt: Packet, id: u32) -> SkiffResult<u32> {
        self.send_packet(pkt).await?;
        Ok(id)
    }

    /// Sends SSH_FXP_REALPATH for a path to canonicalise.
    pub async fn realpath_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::RealPath);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_OPEN. `pflags` is the SSH_FXF_* word, forwarded
    /// verbatim; the attribute record sent along is empty.
    pub async fn open_send(&mut self, path: &str, pflags: u32) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Open);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        pkt.add_u32(pflags);
        pkt.add_u32(0); // empty ATTRS structure
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_OPENDIR.
    pub async fn opendir_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::OpenDir);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_CLOSE, returning the handle to the server.
    pub async fn close_send(&mut self, handle: FileHandle) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Close);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_MKDIR with an empty attribute record.
    pub async fn mkdir_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::MkDir);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        pkt.add_u32(0); // empty ATTRS structure
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_RMDIR.
    pub async fn rmdir_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::RmDir);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_REMOVE.
    pub async fn remove_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Remove);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_RENAME.
    pub async fn rename_send(&mut self, src: &str, dst: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Rename);
        pkt.add_u32(id);
        pkt.add_string(src.as_bytes());
        pkt.add_string(dst.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_STAT for a path.
    pub async fn stat_send(&mut self, path: &str) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Stat);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_FSTAT for an open handle.
    pub async fn fstat_send(&mut self, handle: &FileHandle) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::FStat);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_SETSTAT for a path.
    pub async fn setstat_send(&mut self, path: &str, attrs: &FileAttributes) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::SetStat);
        pkt.add_u32(id);
        pkt.add_string(path.as_bytes());
        pkt.add_attrs(attrs);
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_FSETSTAT for an open handle.
    pub async fn fsetstat_send(
        &mut self,
        handle: &FileHandle,
        attrs: &FileAttributes,
    ) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::FSetStat);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        pkt.add_attrs(attrs);
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_READ for up to `len` bytes at `offset`.
    pub async fn read_send(
        &mut self,
        handle: &FileHandle,
        offset: u64,
        len: u32,
    ) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Read);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        pkt.add_u64(offset);
        pkt.add_u32(len);
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_READDIR for one batch of entries.
    pub async fn readdir_send(&mut self, handle: &FileHandle) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::ReadDir);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        self.send_request(pkt, id).await
    }

    /// Sends SSH_FXP_WRITE of `data` at `offset`. The data is copied
    /// into the outbound packet; nothing is retained.
    pub async fn write_send(
        &mut self,
        handle: &FileHandle,
        offset: u64,
        data: &[u8],
    ) -> SkiffResult<u32> {
        let id = self.requests.alloc();
        let mut pkt = Packet::new(PacketType::Write);
        pkt.add_u32(id);
        pkt.add_string(handle.as_bytes());
        pkt.add_u64(offset);
        pkt.add_string(data);
        self.send_request(pkt, id).await
    }
}

impl<S> SftpClient<S>
where
    S: AsyncRead + Unpin,
{
    /// Receives one framed packet, whatever it is.
    pub async fn recv_packet(&mut self) -> SkiffResult<Packet> {
        transport::recv_packet(&mut self.stream).await
    }
}

impl<S> SftpClient<S> {
    /// Parses the SSH_FXP_NAME response to a REALPATH; exactly one
    /// name must come back.
    pub fn realpath_recv(&mut self, mut pktin: Packet, req: Request) -> SkiffResult<String> {
        drop(req);
        if pktin.is_type(PacketType::Name) {
            if pktin.get_u32() != Some(1) {
                return Err(self.internal_error("REALPATH did not return name count of 1"));
            }
            let Some(path) = pktin.get_string() else {
                return Err(self.internal_error("REALPATH returned malformed FXP_NAME"));
            };
            Ok(String::from_utf8_lossy(path).into_owned())
        } else {
            self.got_status(&mut pktin);
            Err(self.status_err())
        }
    }

    /// Parses the handle from an OPEN response.
    pub fn open_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<FileHandle> {
        self.handle_recv(pktin, req, "OPEN returned malformed FXP_HANDLE")
    }

    /// Parses the handle from an OPENDIR response.
    pub fn opendir_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<FileHandle> {
        self.handle_recv(pktin, req, "OPENDIR returned malformed FXP_HANDLE")
    }

    /// Consumes the status response to a CLOSE.
    pub fn close_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Consumes the status response to a MKDIR.
    pub fn mkdir_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Consumes the status response to a RMDIR.
    pub fn rmdir_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Consumes the status response to a REMOVE.
    pub fn remove_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Consumes the status response to a RENAME.
    pub fn rename_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Parses the attributes from a STAT response.
    pub fn stat_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<FileAttributes> {
        self.attrs_recv(pktin, req)
    }

    /// Parses the attributes from an FSTAT response.
    pub fn fstat_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<FileAttributes> {
        self.attrs_recv(pktin, req)
    }

    /// Consumes the status response to a SETSTAT.
    pub fn setstat_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Consumes the status response to an FSETSTAT.
    pub fn fsetstat_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }

    /// Parses a READ response, copying at most `buf.len()` bytes into
    /// `buf` and returning the count.
    ///
    /// End of file surfaces as an error with
    /// [`error_type`](Self::error_type) == 1; some servers signal it
    /// with a zero-length DATA block instead, which comes back as
    /// `Ok(0)`. Callers must treat both as EOF. A server returning more
    /// bytes than requested is a protocol error.
    pub fn read_recv(
        &mut self,
        mut pktin: Packet,
        req: Request,
        buf: &mut [u8],
    ) -> SkiffResult<usize> {
        drop(req);
        if pktin.is_type(PacketType::Data) {
            let Some(data) = pktin.get_string() else {
                return Err(self.internal_error("READ returned malformed SSH_FXP_DATA packet"));
            };
            if data.len() > buf.len() {
                return Err(self.internal_error("READ returned more bytes than requested"));
            }
            let count = data.len();
            buf[..count].copy_from_slice(data);
            Ok(count)
        } else {
            self.got_status(&mut pktin);
            Err(self.status_err())
        }
    }

    /// Parses one batch of directory entries from a READDIR response.
    ///
    /// The advertised entry count is validated against the bytes
    /// actually present (a well-formed name triple takes at least 12
    /// bytes) before anything is allocated, so a lying count cannot
    /// drive allocation.
    pub fn readdir_recv(&mut self, mut pktin: Packet, req: Request) -> SkiffResult<Vec<Name>> {
        drop(req);
        if pktin.is_type(PacketType::Name) {
            let count = match pktin.get_u32() {
                Some(count) if count as usize <= pktin.remaining() / NAME_ENTRY_MIN => {
                    count as usize
                }
                _ => return Err(self.internal_error("malformed FXP_NAME packet")),
            };

            let mut names = Vec::with_capacity(count);
            for _ in 0..count {
                let Some(filename) = pktin.get_string().map(|s| String::from_utf8_lossy(s).into_owned())
                else {
                    return Err(self.internal_error("malformed FXP_NAME packet"));
                };
                let Some(longname) = pktin.get_string().map(|s| String::from_utf8_lossy(s).into_owned())
                else {
                    return Err(self.internal_error("malformed FXP_NAME packet"));
                };
                let Some(attrs) = pktin.get_attrs() else {
                    return Err(self.internal_error("malformed FXP_NAME packet"));
                };
                names.push(Name {
                    filename,
                    longname,
                    attrs,
                });
            }
            Ok(names)
        } else {
            self.got_status(&mut pktin);
            Err(self.status_err())
        }
    }

    /// Consumes the status response to a WRITE.
    pub fn write_recv(&mut self, pktin: Packet, req: Request) -> SkiffResult<()> {
        self.status_recv(pktin, req)
    }
}

impl<S> SftpClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Performs the INIT/VERSION exchange, returning the server's
    /// protocol version. A server speaking a later protocol than v3 is
    /// rejected unless it advertises v3 or below.
    pub async fn init(&mut self) -> SkiffResult<u32> {
        debug!("Initializing SFTP protocol");

        let mut pkt = Packet::new(PacketType::Init);
        pkt.add_u32(SFTP_PROTO_VERSION);
        self.send_packet(pkt).await?;

        let mut pktin = match self.recv_packet().await {
            Ok(pktin) => pktin,
            Err(err) => {
                self.internal_error("could not connect");
                return Err(err);
            }
        };
        if !pktin.is_type(PacketType::Version) {
            return Err(self.internal_error("did not receive FXP_VERSION"));
        }
        let Some(version) = pktin.get_u32() else {
            return Err(self.internal_error("malformed FXP_VERSION packet"));
        };
        if version > SFTP_PROTO_VERSION {
            return Err(self.internal_error("remote protocol is more advanced than we support"));
        }
        // The VERSION packet may also carry extension name/data pairs;
        // none are recognised, so they are left unread.

        info!("SFTP protocol initialized (server version: {})", version);
        Ok(version)
    }

    /// Runs one single-request round trip: register the ID, then
    /// receive, correlate and hand back the response packet.
    async fn expect_reply(&mut self, id: u32) -> SkiffResult<(Packet, Request)> {
        self.register(id);
        let mut pktin = self.recv_packet().await?;
        let req = self.find_request(&mut pktin)?;
        debug_assert_eq!(req.id(), id);
        Ok((pktin, req))
    }

    /// Canonicalises a path.
    pub async fn realpath(&mut self, path: &str) -> SkiffResult<String> {
        let id = self.realpath_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.realpath_recv(pktin, req)
    }

    /// Opens a file. `pflags` is the SSH_FXF_* word.
    pub async fn open(&mut self, path: &str, pflags: u32) -> SkiffResult<FileHandle> {
        debug!("Opening {}", path);
        let id = self.open_send(path, pflags).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.open_recv(pktin, req)
    }

    /// Opens a directory for reading.
    pub async fn opendir(&mut self, path: &str) -> SkiffResult<FileHandle> {
        let id = self.opendir_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.opendir_recv(pktin, req)
    }

    /// Closes a file or directory handle.
    pub async fn close(&mut self, handle: FileHandle) -> SkiffResult<()> {
        let id = self.close_send(handle).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.close_recv(pktin, req)
    }

    /// Creates a directory.
    pub async fn mkdir(&mut self, path: &str) -> SkiffResult<()> {
        let id = self.mkdir_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.mkdir_recv(pktin, req)
    }

    /// Removes a directory.
    pub async fn rmdir(&mut self, path: &str) -> SkiffResult<()> {
        let id = self.rmdir_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.rmdir_recv(pktin, req)
    }

    /// Removes a file.
    pub async fn remove(&mut self, path: &str) -> SkiffResult<()> {
        let id = self.remove_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.remove_recv(pktin, req)
    }

    /// Renames a file or directory.
    pub async fn rename(&mut self, src: &str, dst: &str) -> SkiffResult<()> {
        let id = self.rename_send(src, dst).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.rename_recv(pktin, req)
    }

    /// Retrieves the attributes of a path.
    pub async fn stat(&mut self, path: &str) -> SkiffResult<FileAttributes> {
        let id = self.stat_send(path).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.stat_recv(pktin, req)
    }

    /// Retrieves the attributes of an open handle.
    pub async fn fstat(&mut self, handle: &FileHandle) -> SkiffResult<FileAttributes> {
        let id = self.fstat_send(handle).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.fstat_recv(pktin, req)
    }

    /// Sets attributes on a path.
    pub async fn setstat(&mut self, path: &str, attrs: &FileAttributes) -> SkiffResult<()> {
        let id = self.setstat_send(path, attrs).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.setstat_recv(pktin, req)
    }

    /// Sets attributes on an open handle.
    pub async fn fsetstat(
        &mut self,
        handle: &FileHandle,
        attrs: &FileAttributes,
    ) -> SkiffResult<()> {
        let id = self.fsetstat_send(handle, attrs).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.fsetstat_recv(pktin, req)
    }

    /// Reads one batch of directory entries. An empty directory-read
    /// sequence ends with an error whose
    /// [`error_type`](Self::error_type) is 1 (end of file).
    pub async fn readdir(&mut self, handle: &FileHandle) -> SkiffResult<Vec<Name>> {
        let id = self.readdir_send(handle).await?;
        let (pktin, req) = self.expect_reply(id).await?;
        self.readdir_recv(pktin, req)
    }
}
