//! Socket transport: one connection per request, plaintext or TLS.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use go2web_core::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::{ClientConfig, RootCertStore, pki_types::ServerName};

use super::url::{Scheme, Target};

/// Read buffer size per socket read.
const READ_CHUNK: usize = 8 * 1024;

/// Opens a connection, writes one request, and reads until the peer closes.
pub struct Transport {
    tls: TlsConnector,
    timeout: Duration,
    max_bytes: usize,
}

impl Transport {
    /// Create a transport trusting the bundled webpki root certificates.
    pub fn new(timeout: Duration, max_bytes: usize) -> Self {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        Self::with_tls_config(Arc::new(config), timeout, max_bytes)
    }

    /// Create a transport with a caller-supplied TLS client configuration.
    pub fn with_tls_config(config: Arc<ClientConfig>, timeout: Duration, max_bytes: usize) -> Self {
        Self { tls: TlsConnector::from(config), timeout, max_bytes }
    }

    /// Send `request` to `target` and return every byte of the response.
    ///
    /// `timeout` bounds the connect, the TLS handshake, the write, and each
    /// individual read. A server that keeps sending is never cut off.
    pub async fn roundtrip(&self, target: &Target, request: &[u8]) -> Result<Vec<u8>, Error> {
        let endpoint = format!("{}:{}", target.hostname, target.port);

        let tcp = timeout(self.timeout, TcpStream::connect((target.hostname.as_str(), target.port)))
            .await
            .map_err(|_| Error::FetchTimeout(format!("connect to {endpoint} timed out")))?
            .map_err(|e| Error::ConnectFailed(format!("{endpoint}: {e}")))?;

        tracing::debug!("connected to {} ({})", endpoint, target.scheme.as_str());

        match target.scheme {
            Scheme::Http => self.exchange(tcp, &endpoint, request).await,
            Scheme::Https => {
                let server_name = ServerName::try_from(target.hostname.as_str())
                    .map_err(|e| Error::Tls(format!("invalid server name {}: {e}", target.hostname)))?
                    .to_owned();

                let tls = timeout(self.timeout, self.tls.connect(server_name, tcp))
                    .await
                    .map_err(|_| Error::FetchTimeout(format!("TLS handshake with {endpoint} timed out")))?
                    .map_err(|e| Error::Tls(format!("{endpoint}: {e}")))?;

                self.exchange(tls, &endpoint, request).await
            }
        }
    }

    async fn exchange<S>(&self, mut stream: S, endpoint: &str, request: &[u8]) -> Result<Vec<u8>, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        timeout(self.timeout, async {
            stream.write_all(request).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| Error::FetchTimeout(format!("write to {endpoint} timed out")))?
        .map_err(|e| Error::HttpError(format!("write to {endpoint} failed: {e}")))?;

        read_capped(&mut stream, endpoint, self.timeout, self.max_bytes).await
    }
}

/// Read until EOF, failing once more than `max_bytes` arrive or a single
/// read waits longer than `idle`.
async fn read_capped<S: AsyncRead + Unpin>(
    stream: &mut S, endpoint: &str, idle: Duration, max_bytes: usize,
) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let read = timeout(idle, stream.read(&mut chunk)).await.map_err(|_| {
            Error::FetchTimeout(format!("no data from {endpoint} for {}ms", idle.as_millis()))
        })?;

        let n = match read {
            Ok(n) => n,
            // TLS peers that close without close_notify
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !buf.is_empty() => 0,
            Err(e) => return Err(Error::HttpError(format!("read from {endpoint} failed: {e}"))),
        };

        if n == 0 {
            break;
        }

        if buf.len() + n > max_bytes {
            return Err(Error::FetchTooLarge(format!("response exceeds {max_bytes} bytes")));
        }

        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(buf)
}
