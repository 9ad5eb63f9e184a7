//! Integration tests for the SFTP client against an in-process peer.
//!
//! These tests validate the complete protocol flow including:
//! - INIT/VERSION exchange
//! - Request ID allocation and response correlation
//! - Error surfacing from server-reported status
//! - Windowed, out-of-order downloads and uploads

use skiff_proto::sftp::{
    FileHandle, OpenFlags, PacketOutcome, SftpClient, Transfer, TransferConfig,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

// --- Wire helpers for the server side of the duplex pipe -------------

async fn read_frame(stream: &mut DuplexStream) -> Vec<u8> {
    let mut prefix = [0u8; 4];
    stream.read_exact(&mut prefix).await.unwrap();
    let mut body = vec![0u8; u32::from_be_bytes(prefix) as usize];
    stream.read_exact(&mut body).await.unwrap();
    body
}

async fn write_frame(stream: &mut DuplexStream, body: &[u8]) {
    stream
        .write_all(&(body.len() as u32).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(body).await.unwrap();
}

fn u32_at(body: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([body[at], body[at + 1], body[at + 2], body[at + 3]])
}

fn u64_at(body: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&body[at..at + 8]);
    u64::from_be_bytes(bytes)
}

fn string_at(body: &[u8], at: usize) -> (Vec<u8>, usize) {
    let len = u32_at(body, at) as usize;
    (body[at + 4..at + 4 + len].to_vec(), at + 4 + len)
}

fn put_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn status_body(id: u32, code: u32) -> Vec<u8> {
    let mut body = vec![101];
    body.extend_from_slice(&id.to_be_bytes());
    body.extend_from_slice(&code.to_be_bytes());
    put_string(&mut body, b"status message");
    put_string(&mut body, b"en");
    body
}

fn handle_body(id: u32, handle: &[u8]) -> Vec<u8> {
    let mut body = vec![102];
    body.extend_from_slice(&id.to_be_bytes());
    put_string(&mut body, handle);
    body
}

fn data_body(id: u32, payload: &[u8]) -> Vec<u8> {
    let mut body = vec![103];
    body.extend_from_slice(&id.to_be_bytes());
    put_string(&mut body, payload);
    body
}

/// `(id, offset, len)` of an SSH_FXP_READ request.
fn parse_read(body: &[u8]) -> (u32, u64, u32) {
    assert_eq!(body[0], 5);
    let id = u32_at(body, 1);
    let (_handle, next) = string_at(body, 5);
    (id, u64_at(body, next), u32_at(body, next + 8))
}

/// `(id, offset, data)` of an SSH_FXP_WRITE request.
fn parse_write(body: &[u8]) -> (u32, u64, Vec<u8>) {
    assert_eq!(body[0], 6);
    let id = u32_at(body, 1);
    let (_handle, next) = string_at(body, 5);
    let offset = u64_at(body, next);
    let (data, _) = string_at(body, next + 8);
    (id, offset, data)
}

/// Deterministic file content so delivery order and gaps are checkable.
fn pattern(offset: u64, len: usize) -> Vec<u8> {
    (0..len).map(|i| ((offset + i as u64) % 251) as u8).collect()
}

/// Opens a file through the split send/recv API, with this test acting
/// as the server issuing `handle`.
async fn open_file(
    sftp: &mut SftpClient<DuplexStream>,
    server: &mut DuplexStream,
    handle: &[u8],
) -> FileHandle {
    let id = sftp.open_send("/remote/file", OpenFlags::READ).await.unwrap();
    sftp.register(id);

    let body = read_frame(server).await;
    assert_eq!(body[0], 3);
    assert_eq!(u32_at(&body, 1), id);
    write_frame(server, &handle_body(id, handle)).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    let req = sftp.find_request(&mut pkt).unwrap();
    sftp.open_recv(pkt, req).unwrap()
}

// --- Session setup ---------------------------------------------------

#[tokio::test]
async fn test_init_exchange_is_byte_exact() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let mut raw = [0u8; 9];
        server_end.read_exact(&mut raw).await.unwrap();
        assert_eq!(raw, [0, 0, 0, 5, 1, 0, 0, 0, 3]);
        server_end
            .write_all(&[0, 0, 0, 5, 2, 0, 0, 0, 3])
            .await
            .unwrap();
    };

    let (version, ()) = tokio::join!(sftp.init(), server);
    assert_eq!(version.unwrap(), 3);
}

#[tokio::test]
async fn test_init_rejects_newer_protocol() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        read_frame(&mut server_end).await;
        write_frame(&mut server_end, &[2, 0, 0, 0, 4]).await;
    };

    let (result, ()) = tokio::join!(sftp.init(), server);
    assert!(result.is_err());
    assert_eq!(sftp.error(), "remote protocol is more advanced than we support");
    assert_eq!(sftp.error_type(), -1);
}

#[tokio::test]
async fn test_realpath_returns_single_name() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 16);
        // First request ID ever issued.
        let id = u32_at(&body, 1);
        assert_eq!(id, 256);
        let (path, _) = string_at(&body, 5);
        assert_eq!(path, b".");

        let mut reply = vec![104];
        reply.extend_from_slice(&id.to_be_bytes());
        reply.extend_from_slice(&1u32.to_be_bytes());
        put_string(&mut reply, b"/home/user");
        put_string(&mut reply, b"drwxr-xr-x   4 user user 4096 Jan  1 00:00 user");
        reply.extend_from_slice(&0u32.to_be_bytes()); // no attrs
        write_frame(&mut server_end, &reply).await;
    };

    let (path, ()) = tokio::join!(sftp.realpath("."), server);
    assert_eq!(path.unwrap(), "/home/user");
}

#[tokio::test]
async fn test_realpath_rejects_wrong_name_count() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let body = read_frame(&mut server_end).await;
        let id = u32_at(&body, 1);
        let mut reply = vec![104];
        reply.extend_from_slice(&id.to_be_bytes());
        reply.extend_from_slice(&2u32.to_be_bytes());
        write_frame(&mut server_end, &reply).await;
    };

    let (result, ()) = tokio::join!(sftp.realpath("."), server);
    assert!(result.is_err());
    assert_eq!(sftp.error(), "REALPATH did not return name count of 1");
}

// --- Server-reported errors ------------------------------------------

#[tokio::test]
async fn test_open_missing_file_surfaces_status() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 3);
        let id = u32_at(&body, 1);
        write_frame(&mut server_end, &status_body(id, 2)).await;
    };

    let (result, ()) = tokio::join!(sftp.open("/no/such/file", OpenFlags::READ), server);
    assert!(result.is_err());
    assert_eq!(sftp.error_type(), 2);
    assert_eq!(sftp.error(), "no such file or directory");
}

#[tokio::test]
async fn test_read_past_eof() {
    let (client_end, mut server_end) = tokio::io::duplex(64 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-0").await;

    let id = sftp.read_send(&handle, 1024, 32_768).await.unwrap();
    sftp.register(id);

    let body = read_frame(&mut server_end).await;
    let (req_id, offset, len) = parse_read(&body);
    assert_eq!(req_id, id);
    assert_eq!(offset, 1024);
    assert_eq!(len, 32_768);
    write_frame(&mut server_end, &status_body(id, 1)).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    let req = sftp.find_request(&mut pkt).unwrap();
    let mut buf = vec![0u8; 32_768];
    assert!(sftp.read_recv(pkt, req, &mut buf).is_err());
    assert_eq!(sftp.error_type(), 1);
    assert_eq!(sftp.error(), "end of file");
}

#[tokio::test]
async fn test_read_longer_than_requested_rejected() {
    let (client_end, mut server_end) = tokio::io::duplex(64 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-0").await;

    let id = sftp.read_send(&handle, 0, 16).await.unwrap();
    sftp.register(id);
    read_frame(&mut server_end).await;
    write_frame(&mut server_end, &data_body(id, &[0u8; 64])).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    let req = sftp.find_request(&mut pkt).unwrap();
    let mut buf = vec![0u8; 16];
    assert!(sftp.read_recv(pkt, req, &mut buf).is_err());
    assert_eq!(sftp.error(), "READ returned more bytes than requested");
    assert_eq!(sftp.error_type(), -1);
}

#[tokio::test]
async fn test_readdir_hostile_count_allocates_nothing() {
    let (client_end, mut server_end) = tokio::io::duplex(64 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"dir-0").await;

    let id = sftp.readdir_send(&handle).await.unwrap();
    sftp.register(id);
    read_frame(&mut server_end).await;

    // A NAME packet declaring a million entries in a 40-byte body.
    let mut reply = vec![104];
    reply.extend_from_slice(&id.to_be_bytes());
    reply.extend_from_slice(&1_000_000u32.to_be_bytes());
    reply.extend_from_slice(&[0u8; 31]);
    assert_eq!(reply.len(), 40);
    write_frame(&mut server_end, &reply).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    let req = sftp.find_request(&mut pkt).unwrap();
    assert!(sftp.readdir_recv(pkt, req).is_err());
    assert_eq!(sftp.error(), "malformed FXP_NAME packet");
}

#[tokio::test]
async fn test_readdir_parses_entries() {
    let (client_end, mut server_end) = tokio::io::duplex(64 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"dir-0").await;

    let id = sftp.readdir_send(&handle).await.unwrap();
    sftp.register(id);
    read_frame(&mut server_end).await;

    let mut reply = vec![104];
    reply.extend_from_slice(&id.to_be_bytes());
    reply.extend_from_slice(&2u32.to_be_bytes());
    put_string(&mut reply, b"notes.txt");
    put_string(&mut reply, b"-rw-r--r--   1 user user  120 Jan  1 00:00 notes.txt");
    reply.extend_from_slice(&1u32.to_be_bytes()); // ATTR_SIZE
    reply.extend_from_slice(&120u64.to_be_bytes());
    put_string(&mut reply, b"src");
    put_string(&mut reply, b"drwxr-xr-x   2 user user 4096 Jan  1 00:00 src");
    reply.extend_from_slice(&0u32.to_be_bytes());
    write_frame(&mut server_end, &reply).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    let req = sftp.find_request(&mut pkt).unwrap();
    let names = sftp.readdir_recv(pkt, req).unwrap();
    assert_eq!(names.len(), 2);
    assert_eq!(names[0].filename, "notes.txt");
    assert_eq!(names[0].attrs.size, Some(120));
    assert_eq!(names[1].filename, "src");
    assert!(names[1].longname.starts_with("drwx"));
}

// --- Correlation -----------------------------------------------------

#[tokio::test]
async fn test_unknown_response_id_is_mismatch() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let id = sftp.realpath_send("/tmp").await.unwrap();
    sftp.register(id);
    read_frame(&mut server_end).await;
    write_frame(&mut server_end, &status_body(9999, 0)).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    assert!(sftp.find_request(&mut pkt).is_err());
    assert_eq!(sftp.error(), "request ID mismatch");
    // The table is not corrupted: our request is still outstanding.
    assert_eq!(sftp.pending_requests(), 1);
}

#[tokio::test]
async fn test_unregistered_response_id_is_mismatch() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    // The send happened, but the ID was never registered.
    let id = sftp.realpath_send("/tmp").await.unwrap();
    read_frame(&mut server_end).await;
    write_frame(&mut server_end, &status_body(id, 0)).await;

    let mut pkt = sftp.recv_packet().await.unwrap();
    assert!(sftp.find_request(&mut pkt).is_err());
    assert_eq!(sftp.error(), "request ID mismatch");
    assert_eq!(sftp.pending_requests(), 1);
}

// --- Housekeeping operations -----------------------------------------

#[tokio::test]
async fn test_mkdir_rename_close_round_trips() {
    let (client_end, mut server_end) = tokio::io::duplex(64 * 1024);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 14);
        write_frame(&mut server_end, &status_body(u32_at(&body, 1), 0)).await;
    };
    let (result, ()) = tokio::join!(sftp.mkdir("/new/dir"), server);
    result.unwrap();

    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 18);
        let (src, next) = string_at(&body, 5);
        let (dst, _) = string_at(&body, next);
        assert_eq!(src, b"/a");
        assert_eq!(dst, b"/b");
        write_frame(&mut server_end, &status_body(u32_at(&body, 1), 0)).await;
    };
    let (result, ()) = tokio::join!(sftp.rename("/a", "/b"), server);
    result.unwrap();

    let handle = open_file(&mut sftp, &mut server_end, b"fh-close").await;
    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 4);
        let (bytes, _) = string_at(&body, 5);
        assert_eq!(bytes, b"fh-close");
        write_frame(&mut server_end, &status_body(u32_at(&body, 1), 0)).await;
    };
    let (result, ()) = tokio::join!(sftp.close(handle), server);
    result.unwrap();
}

#[tokio::test]
async fn test_stat_parses_attributes() {
    let (client_end, mut server_end) = tokio::io::duplex(4096);
    let mut sftp = SftpClient::new(client_end);

    let server = async {
        let body = read_frame(&mut server_end).await;
        assert_eq!(body[0], 7);
        let id = u32_at(&body, 1);
        let mut reply = vec![105];
        reply.extend_from_slice(&id.to_be_bytes());
        reply.extend_from_slice(&0x0000_0005u32.to_be_bytes()); // SIZE | PERMISSIONS
        reply.extend_from_slice(&8192u64.to_be_bytes());
        reply.extend_from_slice(&0o644u32.to_be_bytes());
        write_frame(&mut server_end, &reply).await;
    };

    let (attrs, ()) = tokio::join!(sftp.stat("/etc/motd"), server);
    let attrs = attrs.unwrap();
    assert_eq!(attrs.size, Some(8192));
    assert_eq!(attrs.permissions, Some(0o644));
    assert_eq!(attrs.uid, None);
}

// --- Windowed download -----------------------------------------------

#[tokio::test]
async fn test_pipelined_download_reversed_responses() {
    const FILE_SIZE: u64 = 1_048_576;

    let (client_end, mut server_end) = tokio::io::duplex(16 * 1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-dl").await;

    let mut xfer = Transfer::download(handle, 0);
    xfer.queue_reads(&mut sftp).await.unwrap();

    // Default window over default block size: 32 requests in flight.
    assert_eq!(sftp.pending_requests(), 32);
    assert_eq!(xfer.in_flight(), 1_048_576);

    let mut requests = Vec::new();
    for _ in 0..32 {
        requests.push(parse_read(&read_frame(&mut server_end).await));
    }
    for &(id, offset, len) in requests.iter().rev() {
        write_frame(
            &mut server_end,
            &data_body(id, &pattern(offset, len as usize)),
        )
        .await;
    }

    // Nothing is deliverable until the block at the head of the queue
    // has arrived, which with reversed responses is the last one.
    for i in 0..32 {
        if i == 31 {
            assert!(xfer.download_data().is_none());
        }
        let pkt = sftp.recv_packet().await.unwrap();
        assert!(matches!(
            xfer.download_gotpkt(&mut sftp, pkt).unwrap(),
            PacketOutcome::Claimed
        ));
    }

    let mut delivered = Vec::new();
    while let Some(block) = xfer.download_data() {
        delivered.extend_from_slice(&block);
    }
    assert_eq!(delivered.len() as u64, FILE_SIZE);
    assert_eq!(delivered, pattern(0, FILE_SIZE as usize));
    assert!(!xfer.done());

    // Second round past the end of the file: every read answers EOF.
    xfer.queue_reads(&mut sftp).await.unwrap();
    let mut requests = Vec::new();
    for _ in 0..32 {
        requests.push(parse_read(&read_frame(&mut server_end).await));
    }
    for &(id, offset, _len) in &requests {
        assert!(offset >= FILE_SIZE);
        write_frame(&mut server_end, &status_body(id, 1)).await;
    }
    for _ in 0..32 {
        let pkt = sftp.recv_packet().await.unwrap();
        assert!(matches!(
            xfer.download_gotpkt(&mut sftp, pkt).unwrap(),
            PacketOutcome::Claimed
        ));
    }

    assert!(xfer.download_data().is_none());
    assert!(xfer.done());
    assert_eq!(sftp.pending_requests(), 0);
}

#[tokio::test]
async fn test_short_read_at_eof_is_benign() {
    let config = TransferConfig {
        window: 4096,
        block: 1024,
    };
    let (client_end, mut server_end) = tokio::io::duplex(1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-short").await;

    // A 1536-byte file: one full block, one short block, then EOF.
    let mut xfer = Transfer::download_with(config, handle, 0);
    xfer.queue_reads(&mut sftp).await.unwrap();

    let mut requests = Vec::new();
    for _ in 0..4 {
        requests.push(parse_read(&read_frame(&mut server_end).await));
    }
    for &(id, offset, _len) in &requests {
        match offset {
            0 => write_frame(&mut server_end, &data_body(id, &pattern(0, 1024))).await,
            1024 => write_frame(&mut server_end, &data_body(id, &pattern(1024, 512))).await,
            _ => write_frame(&mut server_end, &status_body(id, 1)).await,
        }
    }

    for _ in 0..4 {
        let pkt = sftp.recv_packet().await.unwrap();
        assert!(matches!(
            xfer.download_gotpkt(&mut sftp, pkt).unwrap(),
            PacketOutcome::Claimed
        ));
    }

    let mut delivered = Vec::new();
    while let Some(block) = xfer.download_data() {
        delivered.extend_from_slice(&block);
    }
    assert_eq!(delivered, pattern(0, 1536));
    assert!(xfer.done());
}

#[tokio::test]
async fn test_short_read_before_eof_is_anomaly() {
    let config = TransferConfig {
        window: 4096,
        block: 1024,
    };
    let (client_end, mut server_end) = tokio::io::duplex(1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-anomaly").await;

    let mut xfer = Transfer::download_with(config, handle, 0);
    xfer.queue_reads(&mut sftp).await.unwrap();

    let mut requests = Vec::new();
    for _ in 0..4 {
        requests.push(parse_read(&read_frame(&mut server_end).await));
    }
    // A short block mid-file implies the file ends at 1536 bytes, yet a
    // later block completes beyond that point.
    for &(id, offset, _len) in requests.iter().take(3) {
        match offset {
            0 => write_frame(&mut server_end, &data_body(id, &pattern(0, 1024))).await,
            1024 => write_frame(&mut server_end, &data_body(id, &pattern(1024, 512))).await,
            2048 => write_frame(&mut server_end, &data_body(id, &pattern(2048, 1024))).await,
            _ => unreachable!(),
        }
    }

    let mut outcome = Ok(());
    for _ in 0..3 {
        let pkt = sftp.recv_packet().await.unwrap();
        match xfer.download_gotpkt(&mut sftp, pkt) {
            Ok(PacketOutcome::Claimed) => {}
            Ok(PacketOutcome::NotOurs(..)) => panic!("packet not claimed"),
            Err(err) => {
                outcome = Err(err);
                break;
            }
        }
    }

    assert!(outcome.is_err());
    assert_eq!(
        sftp.error(),
        "received a short buffer from FXP_READ, but not at EOF"
    );
    assert_eq!(sftp.error_type(), -1);
}

// --- Windowed upload -------------------------------------------------

#[tokio::test]
async fn test_upload_window_and_out_of_order_acks() {
    let config = TransferConfig {
        window: 4096,
        block: 1024,
    };
    let (client_end, mut server_end) = tokio::io::duplex(1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-up").await;

    let mut xfer = Transfer::upload_with(config, handle, 0);
    assert!(xfer.done(), "an upload with nothing queued is complete");

    for i in 0..4u64 {
        assert!(xfer.upload_ready());
        xfer.upload_data(&mut sftp, &pattern(i * 1024, 1024))
            .await
            .unwrap();
    }
    assert!(!xfer.upload_ready());
    assert!(!xfer.done());

    let mut requests = Vec::new();
    for i in 0..4u64 {
        let (id, offset, data) = parse_write(&read_frame(&mut server_end).await);
        assert_eq!(offset, i * 1024);
        assert_eq!(data, pattern(offset, 1024));
        requests.push(id);
    }
    for &id in requests.iter().rev() {
        write_frame(&mut server_end, &status_body(id, 0)).await;
    }

    for _ in 0..4 {
        let pkt = sftp.recv_packet().await.unwrap();
        assert!(matches!(
            xfer.upload_gotpkt(&mut sftp, pkt).unwrap(),
            PacketOutcome::Claimed
        ));
    }
    assert!(xfer.upload_ready());
    assert!(xfer.done());
}

#[tokio::test]
async fn test_upload_write_failure_poisons_transfer() {
    let (client_end, mut server_end) = tokio::io::duplex(1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-upfail").await;

    let mut xfer = Transfer::upload(handle, 0);
    xfer.upload_data(&mut sftp, &pattern(0, 1024)).await.unwrap();

    let (id, _, _) = parse_write(&read_frame(&mut server_end).await);
    write_frame(&mut server_end, &status_body(id, 3)).await;

    let pkt = sftp.recv_packet().await.unwrap();
    assert!(xfer.upload_gotpkt(&mut sftp, pkt).is_err());
    assert_eq!(sftp.error_type(), 3);
    assert_eq!(sftp.error(), "permission denied");
    assert!(xfer.done());
}

// --- Mixed traffic ---------------------------------------------------

#[tokio::test]
async fn test_unrelated_response_is_not_ours() {
    let (client_end, mut server_end) = tokio::io::duplex(1024 * 1024);
    let mut sftp = SftpClient::new(client_end);
    let handle = open_file(&mut sftp, &mut server_end, b"fh-mixed").await;

    let mut xfer = Transfer::download_with(
        TransferConfig {
            window: 1024,
            block: 1024,
        },
        handle,
        0,
    );
    xfer.queue_reads(&mut sftp).await.unwrap();
    let (read_id, _, _) = parse_read(&read_frame(&mut server_end).await);

    // An fstat issued alongside the download; its response arrives
    // before any read data.
    let other = open_file(&mut sftp, &mut server_end, b"fh-other").await;
    let stat_id = sftp.fstat_send(&other).await.unwrap();
    sftp.register(stat_id);
    read_frame(&mut server_end).await;

    let mut reply = vec![105];
    reply.extend_from_slice(&stat_id.to_be_bytes());
    reply.extend_from_slice(&1u32.to_be_bytes()); // ATTR_SIZE
    reply.extend_from_slice(&4096u64.to_be_bytes());
    write_frame(&mut server_end, &reply).await;

    let pkt = sftp.recv_packet().await.unwrap();
    let (pkt, req) = match xfer.download_gotpkt(&mut sftp, pkt).unwrap() {
        PacketOutcome::NotOurs(pkt, req) => (pkt, req),
        PacketOutcome::Claimed => panic!("stat response claimed by the transfer"),
    };
    let attrs = sftp.fstat_recv(pkt, req).unwrap();
    assert_eq!(attrs.size, Some(4096));

    // The download itself is unaffected.
    write_frame(&mut server_end, &data_body(read_id, &pattern(0, 512))).await;
    let pkt = sftp.recv_packet().await.unwrap();
    assert!(matches!(
        xfer.download_gotpkt(&mut sftp, pkt).unwrap(),
        PacketOutcome::Claimed
    ));
    assert_eq!(xfer.download_data().unwrap(), pattern(0, 512));
}
