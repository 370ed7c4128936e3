use std::fmt::Write as _;
use std::io;
use std::net::UdpSocket;

use crate::error::Error;

/// The narrow contract the reporter emits through. One call per output
/// point; implementations own the wire encoding entirely.
pub trait Transport: Send + Sync {
    /// Submit a count delta for a series.
    fn count(&self, name: &str, delta: i64, tags: &[String], sample_rate: f64) -> io::Result<()>;

    /// Submit a point-in-time gauge value for a series.
    fn gauge(&self, name: &str, value: f64, tags: &[String], sample_rate: f64) -> io::Result<()>;
}

/// A dogstatsd client over a connected UDP socket, one datagram per point:
/// `{namespace}{name}:{value}|{c|g}[|@{rate}][|#{tag,tag}]`.
///
/// UDP is fire-and-forget; a send either leaves the socket or fails with an
/// `io::Error` immediately, so no timeouts live here.
pub struct DogstatsdClient {
    socket: UdpSocket,
    namespace: String,
}

impl DogstatsdClient {
    /// Connect to a dogstatsd endpoint, e.g. `"127.0.0.1:8125"`.
    pub fn new(addr: &str) -> Result<Self, Error> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(Error::TransportUnavailable)?;
        socket.connect(addr).map_err(Error::TransportUnavailable)?;
        Ok(Self {
            socket,
            namespace: String::new(),
        })
    }

    /// Prefix every emitted series name, e.g. `"myservice."`. The prefix is
    /// used verbatim; include the trailing separator.
    pub fn namespace(mut self, prefix: impl Into<String>) -> Self {
        self.namespace = prefix.into();
        self
    }

    fn emit(
        &self,
        name: &str,
        value: impl std::fmt::Display,
        kind: &str,
        tags: &[String],
        sample_rate: f64,
    ) -> io::Result<()> {
        let mut datagram = String::with_capacity(64);
        // Infallible writes: fmt::Write on String never errors.
        let _ = write!(datagram, "{}{}:{}|{}", self.namespace, name, value, kind);
        if sample_rate < 1.0 {
            let _ = write!(datagram, "|@{sample_rate}");
        }
        if !tags.is_empty() {
            let _ = write!(datagram, "|#{}", tags.join(","));
        }
        self.socket.send(datagram.as_bytes()).map(|_| ())
    }
}

impl Transport for DogstatsdClient {
    fn count(&self, name: &str, delta: i64, tags: &[String], sample_rate: f64) -> io::Result<()> {
        self.emit(name, delta, "c", tags, sample_rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], sample_rate: f64) -> io::Result<()> {
        self.emit(name, value, "g", tags, sample_rate)
    }
}
