// src/core/test_server.rs
//! One-shot local HTTP server for exercising the reqwest-based clients.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    )
}

/// Answer a single request with `response` verbatim and return the server's base URL.
/// With `hold_open`, the connection stays open that long after writing.
pub async fn serve_once(response: impl Into<String>, hold_open: Option<Duration>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = response.into();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        if let Some(hold) = hold_open {
            tokio::time::sleep(hold).await;
        }
    });

    format!("http://{}", addr)
}

// Drain headers and body so closing the socket doesn't reset the connection
async fn read_request(stream: &mut TcpStream) {
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        received.extend_from_slice(&buf[..n]);

        let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&received[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if received.len() >= header_end + 4 + content_length {
            return;
        }
    }
}
