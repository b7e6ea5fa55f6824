//! Local HTTP servers for wire-level tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Build a complete response with a `Content-Length` header.
pub(crate) fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!("HTTP/1.1 {status}\r\n");
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    response
}

/// Route table bound to a local port, not yet accepting.
pub(crate) struct TestServer {
    listener: TcpListener,
    addr: SocketAddr,
    routes: HashMap<String, String>,
}

/// Handle to a running server.
pub(crate) struct RunningServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub(crate) async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        Self { listener, addr, routes: HashMap::new() }
    }

    /// Serve `response` verbatim for requests to `path` (path includes the query).
    pub(crate) fn route(mut self, path: &str, response: String) -> Self {
        self.routes.insert(path.to_string(), response);
        self
    }

    pub(crate) fn start(self) -> RunningServer {
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);
        let listener = self.listener;

        let server_hits = hits.clone();
        let server_requests = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                server_hits.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(handle(socket, routes.clone(), server_requests.clone()));
            }
        });

        RunningServer { addr: self.addr, hits, requests }
    }
}

impl RunningServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of connections accepted so far.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(mut socket: TcpStream, routes: Arc<HashMap<String, String>>, requests: Arc<Mutex<Vec<String>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let request = String::from_utf8_lossy(&buf).into_owned();
    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    requests.lock().unwrap().push(request);

    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| http_response("404 Not Found", &[("Content-Type", "text/plain")], "not found"));

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// A server that accepts connections and never answers.
pub(crate) async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
        tokio::time::sleep(Duration::from_secs(3600)).await;
    });

    addr
}
