//! Transport layer for MCP JSON-RPC communication.
//!
//! MCP uses newline-delimited JSON over stdin/stdout. Stdout carries protocol
//! frames only; diagnostics go through `tracing`.

use std::io::{self, BufRead, Write};

use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

/// Message that can be received from the client.
#[derive(Debug)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    /// A non-blank line that is not a JSON-RPC message. Carries the decode error.
    Malformed(String),
}

/// Transport for reading/writing JSON-RPC messages.
pub struct StdioTransport {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
}

impl StdioTransport {
    /// Create a transport using stdin/stdout.
    pub fn stdio() -> Self {
        Self {
            reader: Box::new(io::BufReader::new(io::stdin())),
            writer: Box::new(io::stdout()),
        }
    }

    /// Create a transport with custom reader/writer.
    pub fn new(reader: Box<dyn BufRead + Send>, writer: Box<dyn Write + Send>) -> Self {
        Self { reader, writer }
    }

    /// Read the next message from the transport.
    ///
    /// Blank lines are skipped. Returns `Ok(None)` at end of input.
    pub fn read_message(&mut self) -> io::Result<Option<IncomingMessage>> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => return Ok(Some(IncomingMessage::Malformed(e.to_string()))),
            };

            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);
            return Ok(Some(decode_line(line)));
        }
    }

    /// Write a JSON-RPC response to the transport.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Serialization error: {}", e))
        })?;

        tracing::debug!("Sending: {}", json);

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }
}

fn decode_line(line: &str) -> IncomingMessage {
    match serde_json::from_str::<JsonRpcRequest>(line) {
        Ok(request) if request.is_notification() => {
            IncomingMessage::Notification(JsonRpcNotification {
                jsonrpc: request.jsonrpc,
                method: request.method,
                params: request.params,
            })
        }
        Ok(request) => IncomingMessage::Request(request),
        Err(e) => IncomingMessage::Malformed(e.to_string()),
    }
}
