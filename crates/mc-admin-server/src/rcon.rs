//! RCON (Remote Console) server.
//!
//! Source RCON protocol over TCP. Authenticated clients submit command lines
//! that the main loop runs with the RCON source; the rendered feedback goes
//! back as the response body.

use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// RCON packet types.
const PACKET_TYPE_COMMAND: i32 = 2;
const PACKET_TYPE_LOGIN: i32 = 3;
const PACKET_TYPE_RESPONSE: i32 = 0;
const PACKET_TYPE_LOGIN_SUCCESS: i32 = 2;

/// Largest value of the length field, in either direction.
const MAX_PACKET_LENGTH: i32 = 4096;
/// Longer responses are split across packets.
const MAX_RESPONSE_BODY: usize = MAX_PACKET_LENGTH as usize - 10;

/// A command received via RCON, with a channel to send the response back.
pub struct RconCommand {
    pub command: String,
    pub response_tx: oneshot::Sender<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RconPacket {
    request_id: i32,
    packet_type: i32,
    body: String,
}

/// Bind the RCON listener and serve it in the background.
pub async fn start(
    port: u16,
    password: String,
    cmd_tx: mpsc::Sender<RconCommand>,
) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    let addr = listener.local_addr()?;
    info!("RCON server listening on {addr}");
    tokio::spawn(serve(listener, password, cmd_tx));
    Ok(addr)
}

async fn serve(listener: TcpListener, password: String, cmd_tx: mpsc::Sender<RconCommand>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!("RCON connection from {peer}");
                let pw = password.clone();
                let tx = cmd_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_rcon_connection(stream, &pw, &tx).await {
                        debug!("RCON connection {peer} closed: {e}");
                    }
                });
            }
            Err(e) => {
                warn!("RCON accept error: {e}");
            }
        }
    }
}

async fn handle_rcon_connection(
    mut stream: TcpStream,
    password: &str,
    cmd_tx: &mpsc::Sender<RconCommand>,
) -> Result<(), BoxError> {
    let mut authenticated = false;

    while let Some(packet) = read_packet(&mut stream).await? {
        match packet.packet_type {
            PACKET_TYPE_LOGIN => {
                if !password.is_empty() && packet.body == password {
                    authenticated = true;
                    write_packet(&mut stream, packet.request_id, PACKET_TYPE_LOGIN_SUCCESS, "")
                        .await?;
                    debug!("RCON client authenticated");
                } else {
                    warn!("RCON login rejected");
                    write_packet(&mut stream, -1, PACKET_TYPE_LOGIN_SUCCESS, "").await?;
                    return Ok(());
                }
            }
            PACKET_TYPE_COMMAND if authenticated => {
                let (response_tx, response_rx) = oneshot::channel();
                let cmd = RconCommand {
                    command: packet.body,
                    response_tx,
                };
                if cmd_tx.send(cmd).await.is_err() {
                    return Err("server shutting down".into());
                }
                let response = response_rx.await.unwrap_or_default();
                write_response(&mut stream, packet.request_id, &response).await?;
            }
            PACKET_TYPE_COMMAND => {
                write_packet(&mut stream, -1, PACKET_TYPE_RESPONSE, "").await?;
                return Ok(());
            }
            other => {
                write_packet(
                    &mut stream,
                    packet.request_id,
                    PACKET_TYPE_RESPONSE,
                    &format!("Unknown request {other:x}"),
                )
                .await?;
            }
        }
    }
    Ok(())
}

/// Read one packet: i32_le(length) + i32_le(request_id) + i32_le(type) + body + \0\0.
/// Returns `None` on a clean end of stream.
async fn read_packet<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<RconPacket>, BoxError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let length = i32::from_le_bytes(len_buf);
    if !(10..=MAX_PACKET_LENGTH).contains(&length) {
        return Err(format!("invalid RCON packet length {length}").into());
    }

    let request_id = reader.read_i32_le().await?;
    let packet_type = reader.read_i32_le().await?;
    let mut body = vec![0u8; (length - 10) as usize];
    reader.read_exact(&mut body).await?;
    let mut term = [0u8; 2];
    reader.read_exact(&mut term).await?;

    Ok(Some(RconPacket {
        request_id,
        packet_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

async fn write_packet<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request_id: i32,
    packet_type: i32,
    body: &str,
) -> Result<(), BoxError> {
    let body_bytes = body.as_bytes();
    let length = 10 + body_bytes.len() as i32;
    writer.write_all(&length.to_le_bytes()).await?;
    writer.write_all(&request_id.to_le_bytes()).await?;
    writer.write_all(&packet_type.to_le_bytes()).await?;
    writer.write_all(body_bytes).await?;
    writer.write_all(&[0, 0]).await?;
    writer.flush().await?;
    Ok(())
}

/// Send a command response, split across packets at character boundaries.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request_id: i32,
    response: &str,
) -> Result<(), BoxError> {
    let mut rest = response;
    loop {
        let mut cut = rest.len().min(MAX_RESPONSE_BODY);
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (chunk, tail) = rest.split_at(cut);
        write_packet(writer, request_id, PACKET_TYPE_RESPONSE, chunk).await?;
        if tail.is_empty() {
            return Ok(());
        }
        rest = tail;
    }
}
