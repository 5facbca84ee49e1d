use crate::message::Message;
use crate::packet::{self, PacketError};
use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid log filter: {0}")]
    Filter(#[from] regex::Error),
}

const PASSWORD_PATTERN: &str = r"^(#AP\w+:SERVER:\d+:)[^:]+(:\d+:\d+:\d+:.+)$";

/// Line oriented FSD transport over any async byte stream
pub struct Connection<S> {
    stream: BufReader<S>,
    /// Bytes of the line being read, kept across cancelled `recv` calls
    buffer: Vec<u8>,
    password_filter: Regex,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Result<Self, ConnectionError> {
        Ok(Self {
            stream: BufReader::new(stream),
            buffer: Vec::new(),
            password_filter: Regex::new(PASSWORD_PATTERN)?,
        })
    }

    /// Next decodable message, or `None` once the peer closed the stream
    ///
    /// Lines that fail to decode are logged and skipped. Bytes that are not
    /// valid UTF-8 are replaced rather than failing the read. Cancel safe: a
    /// partially read line stays buffered for the next call.
    pub async fn recv(&mut self) -> Result<Option<Message>, ConnectionError> {
        loop {
            let bytes_read = self.stream.read_until(b'\n', &mut self.buffer).await?;
            if bytes_read == 0 && self.buffer.is_empty() {
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();

            let raw = line.trim_end_matches(['\r', '\n']);
            log::trace!("FSD received=>{}", self.masked(raw));

            match packet::decode(raw) {
                Ok(message) => return Ok(Some(message)),
                Err(PacketError::Empty) => continue,
                Err(e) => log::debug!("Skipping packet '{}': {}", self.masked(raw), e),
            }
        }
    }

    /// Write one message followed by `\r\n`
    ///
    /// Invalid (null) messages are dropped with a warning.
    pub async fn send(&mut self, message: &Message) -> Result<(), ConnectionError> {
        if !message.is_valid() {
            log::warn!("Dropping invalid {} message", message.pdu());
            return Ok(());
        }

        let formatted = message.format();
        log::trace!("FSD sent=>{}", self.masked(formatted.trim_end()));
        self.stream.write_all(formatted.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Raw line with the login password replaced
    pub fn masked<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.password_filter.replace(line, "${1}<password>${2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{FsdMessage, Ping, PlaneInformation};
    use tokio::io::{duplex, AsyncReadExt};

    #[tokio::test]
    async fn test_recv_skips_bad_lines() {
        let (client, mut server) = duplex(1024);
        let mut connection = Connection::new(client).unwrap();

        server
            .write_all(b"\r\n$QQnonsense\r\n$PIABCD\r\n$PISERVER:ABCD:85275222\r\n")
            .await
            .unwrap();
        drop(server);

        match connection.recv().await.unwrap() {
            Some(Message::Ping(ping)) => {
                assert_eq!(ping.sender(), "SERVER");
                assert_eq!(ping.timestamp, "85275222");
            }
            other => panic!("Expected Ping, got {:?}", other),
        }
        assert!(connection.recv().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recv_survives_invalid_utf8() {
        let (client, mut server) = duplex(1024);
        let mut connection = Connection::new(client).unwrap();

        server
            .write_all(b"#TMSERVER:ABCD:Gr\xfc\xdfe\r\n$PISERVER:ABCD:1\r\n")
            .await
            .unwrap();
        drop(server);

        match connection.recv().await.unwrap() {
            Some(Message::TextMessage(text)) => {
                assert_eq!(text.message, "Gr\u{fffd}\u{fffd}e");
            }
            other => panic!("Expected TextMessage, got {:?}", other),
        }
        assert!(matches!(
            connection.recv().await.unwrap(),
            Some(Message::Ping(_))
        ));
        assert!(connection.recv().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recv_resumes_after_cancel() {
        let (client, mut server) = duplex(1024);
        let mut connection = Connection::new(client).unwrap();

        server.write_all(b"$PISERVER:AB").await.unwrap();
        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            connection.recv(),
        )
        .await;
        assert!(cancelled.is_err());

        server.write_all(b"CD:42\r\n").await.unwrap();
        match connection.recv().await.unwrap() {
            Some(Message::Ping(ping)) => {
                assert_eq!(ping.receiver(), "ABCD");
                assert_eq!(ping.timestamp, "42");
            }
            other => panic!("Expected Ping, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recv_keeps_unterminated_last_line() {
        let (client, mut server) = duplex(1024);
        let mut connection = Connection::new(client).unwrap();

        server.write_all(b"$PISERVER:ABCD:1").await.unwrap();
        drop(server);

        assert!(matches!(
            connection.recv().await.unwrap(),
            Some(Message::Ping(_))
        ));
        assert!(connection.recv().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_writes_terminated_line() {
        let (client, mut server) = duplex(1024);
        let mut connection = Connection::new(client).unwrap();

        connection
            .send(&Ping::new("ABCD", "SERVER", "85275222").into())
            .await
            .unwrap();
        connection
            .send(&PlaneInformation::default().into())
            .await
            .unwrap();
        drop(connection);

        let mut received = String::new();
        server.read_to_string(&mut received).await.unwrap();
        assert_eq!(received, "$PIABCD:SERVER:85275222\r\n");
    }

    #[test]
    fn test_password_is_masked() {
        let (client, _server) = duplex(64);
        let connection = Connection::new(client).unwrap();

        let line = "#APABCD:SERVER:1234567:hunter2:1:100:1:Jon Doe";
        assert_eq!(
            connection.masked(line),
            "#APABCD:SERVER:1234567:<password>:1:100:1:Jon Doe"
        );
        assert_eq!(connection.masked("$PIABCD:SERVER:1"), "$PIABCD:SERVER:1");
    }
}
