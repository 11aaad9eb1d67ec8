//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body to every GET, either with Content-Length,
//! chunked, cut short after a number of bytes, or as an error status. Records
//! the request targets it saw.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Mode {
    /// `Content-Length` and the full body.
    Full,
    /// `Transfer-Encoding: chunked`, body split into `chunk_size` pieces.
    Chunked { chunk_size: usize },
    /// Advertise the full length, send only `sent` bytes, then close.
    Truncated { sent: usize },
    /// Respond with this status and a short text body.
    Status(u16),
}

pub struct BodyServer {
    pub port: u16,
    targets: Arc<Mutex<Vec<String>>>,
}

impl BodyServer {
    /// URL for `path` on this server, e.g. `http://127.0.0.1:4242/file.bin`.
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Request targets received so far, in order.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(body: Vec<u8>, mode: Mode) -> BodyServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let targets = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&targets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &body, mode, &seen));
        }
    });
    BodyServer { port, targets }
}

/// A port nothing is listening on (best effort: bound then released).
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

fn handle(mut stream: TcpStream, body: &[u8], mode: Mode, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let mut request_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("");
    let target = request_line.next().unwrap_or("").to_string();
    seen.lock().unwrap().push(target);

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    match mode {
        Mode::Full => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        Mode::Chunked { chunk_size } => {
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
            );
            for piece in body.chunks(chunk_size.max(1)) {
                let _ = stream.write_all(format!("{:x}\r\n", piece.len()).as_bytes());
                let _ = stream.write_all(piece);
                let _ = stream.write_all(b"\r\n");
            }
            let _ = stream.write_all(b"0\r\n\r\n");
        }
        Mode::Truncated { sent } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body[..sent.min(body.len())]);
            let _ = stream.flush();
        }
        Mode::Status(code) => {
            let text = format!("status {}", code);
            let head = format!(
                "HTTP/1.1 {} Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                code,
                text.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(text.as_bytes());
        }
    }
}
