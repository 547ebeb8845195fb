//! Network sinks.
//!
//! Both units flatten their input with [`traverse`] and send every leaf as
//! raw bytes over a fresh TCP connection. [`netcat`] then reads the reply
//! lazily; [`netwrite`] only writes.
//!
//! Reads block without a timeout. A peer that never closes its side stalls
//! the pipeline pulling from a [`NetcatStream`].

use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

use tracing::{debug, trace};

use crate::combinator::traverse;
use crate::error::PipeResult;
use crate::unit::{PipeUnit, Pipeable};
use crate::value::Value;

/// Size of the buffer each read from the peer fills at most.
pub const CHUNK_SIZE: usize = 4096;

fn connect_and_send(host: &str, port: u16, payload: Value) -> PipeResult<TcpStream> {
    let mut connection = TcpStream::connect((host, port))?;
    debug!(host, port, "connected");
    for leaf in payload.pipe(traverse()) {
        let bytes = leaf.to_bytes();
        connection.write_all(&bytes)?;
        trace!(host, port, bytes = bytes.len(), "sent chunk");
    }
    connection.flush()?;
    Ok(connection)
}

// =============================================================================
// netcat
// =============================================================================

/// Sends the input and reads the reply. See [`netcat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Netcat {
    host: String,
    port: u16,
}

/// Sends the input to `host:port` and yields the reply in chunks of at most
/// [`CHUNK_SIZE`] bytes, until the peer closes the connection.
///
/// Nothing happens until the first item is pulled: that pull connects and
/// sends the whole payload. A connection, send or read failure is yielded
/// once as an `Err` and ends the stream. The socket is closed when the
/// stream ends or is dropped.
///
/// # Examples
///
/// ```no_run
/// use pipette::prelude::*;
///
/// let reply = "HEAD / HTTP/1.0\r\nHost: example.com\r\n\r\n"
///     .pipe(netcat("example.com", 80))
///     .collect::<Result<Vec<_>, _>>()?
///     .concat();
/// println!("{}", String::from_utf8_lossy(&reply));
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub fn netcat(host: impl Into<String>, port: u16) -> Netcat {
    Netcat {
        host: host.into(),
        port,
    }
}

impl<T: Into<Value>> PipeUnit<T> for Netcat {
    type Output = NetcatStream;

    fn apply(&self, input: T) -> NetcatStream {
        NetcatStream {
            host: self.host.clone(),
            port: self.port,
            payload: Some(input.into()),
            connection: None,
            finished: false,
        }
    }
}

/// Lazy reply of a [`netcat`] exchange.
#[derive(Debug)]
pub struct NetcatStream {
    host: String,
    port: u16,
    payload: Option<Value>,
    connection: Option<TcpStream>,
    finished: bool,
}

impl NetcatStream {
    fn pull(&mut self) -> PipeResult<Option<Vec<u8>>> {
        if let Some(payload) = self.payload.take() {
            self.connection = Some(connect_and_send(&self.host, self.port, payload)?);
        }
        let Some(connection) = self.connection.as_mut() else {
            return Ok(None);
        };

        let mut buffer = vec![0; CHUNK_SIZE];
        let received = loop {
            match connection.read(&mut buffer) {
                Err(error) if error.kind() == ErrorKind::Interrupted => {}
                result => break result?,
            }
        };
        if received == 0 {
            debug!(host = %self.host, port = self.port, "peer closed connection");
            return Ok(None);
        }
        trace!(host = %self.host, port = self.port, bytes = received, "received chunk");
        buffer.truncate(received);
        Ok(Some(buffer))
    }

    fn finish(&mut self) {
        self.finished = true;
        self.payload = None;
        self.connection = None;
    }
}

impl Iterator for NetcatStream {
    type Item = PipeResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.pull() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(error) => {
                self.finish();
                Some(Err(error))
            }
        }
    }
}

// =============================================================================
// netwrite
// =============================================================================

/// Sends the input without reading a reply. See [`netwrite`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Netwrite {
    host: String,
    port: u16,
}

/// Connects to `host:port`, sends the input and closes the connection.
///
/// Unlike [`netcat`] this runs immediately.
///
/// # Errors
///
/// Returns [`PipeError::Io`](crate::PipeError::Io) when connecting or
/// sending fails.
///
/// # Examples
///
/// ```no_run
/// use pipette::prelude::*;
/// use pipette::value;
///
/// value!["metric ", 1, "\n"].pipe(netwrite("localhost", 2003))?;
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub fn netwrite(host: impl Into<String>, port: u16) -> Netwrite {
    Netwrite {
        host: host.into(),
        port,
    }
}

impl<T: Into<Value>> PipeUnit<T> for Netwrite {
    type Output = PipeResult<()>;

    fn apply(&self, input: T) -> Self::Output {
        connect_and_send(&self.host, self.port, input.into())?;
        debug!(host = %self.host, port = self.port, "closed connection");
        Ok(())
    }
}
