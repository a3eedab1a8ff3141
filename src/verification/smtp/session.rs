//! Minimal SMTP client session: enough of the wire protocol to ask a server
//! whether it would accept a recipient, and nothing more.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::core::error::{AppError, Result};

/// A single SMTP server reply, with multi-line replies collapsed.
#[derive(Debug, Clone)]
pub(crate) struct SmtpReply {
    pub(crate) code: u16,
    pub(crate) message: String,
}

impl SmtpReply {
    pub(crate) fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub(crate) fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub(crate) fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

impl std::fmt::Display for SmtpReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// One connection to a mail server. Every read and write is individually
/// bounded by the command timeout so a stalled server cannot hang a probe.
pub(crate) struct SmtpSession<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    command_timeout: Duration,
}

impl SmtpSession<TcpStream> {
    pub(crate) async fn connect(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> Result<Self> {
        let stream = timeout(connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| AppError::SmtpTimeout(format!("connect to {}:{} timed out", host, port)))??;
        Ok(Self::new(stream, command_timeout))
    }
}

impl<S: AsyncRead + AsyncWrite> SmtpSession<S> {
    pub(crate) fn new(stream: S, command_timeout: Duration) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(reader),
            writer,
            command_timeout,
        }
    }

    /// Reads one (possibly multi-line) reply.
    pub(crate) async fn read_reply(&mut self) -> Result<SmtpReply> {
        let mut code: Option<u16> = None;
        let mut message = String::new();

        loop {
            let mut line = String::new();
            let read = timeout(self.command_timeout, self.reader.read_line(&mut line))
                .await
                .map_err(|_| AppError::SmtpTimeout("reply read timed out".to_string()))??;
            if read == 0 {
                return Err(AppError::SmtpProtocol(
                    "connection closed mid-reply".to_string(),
                ));
            }

            let line = line.trim_end_matches(['\r', '\n']);
            let code_part = line.get(..3).ok_or_else(|| {
                AppError::SmtpProtocol(format!("malformed reply line '{}'", line))
            })?;
            let parsed: u16 = code_part.parse().map_err(|_| {
                AppError::SmtpProtocol(format!("malformed reply code in '{}'", line))
            })?;
            match code {
                None => code = Some(parsed),
                Some(first) if first != parsed => {
                    return Err(AppError::SmtpProtocol(format!(
                        "inconsistent codes in multi-line reply ({} then {})",
                        first, parsed
                    )));
                }
                Some(_) => {}
            }

            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(line.get(4..).unwrap_or("").trim());

            if line.as_bytes().get(3) != Some(&b'-') {
                break;
            }
        }

        // The loop always ran at least once, so `code` is set.
        let code = code.unwrap_or_default();
        Ok(SmtpReply { code, message })
    }

    /// Sends one command line and returns the server's reply.
    pub(crate) async fn command(&mut self, line: &str) -> Result<SmtpReply> {
        let mut wire = String::with_capacity(line.len() + 2);
        wire.push_str(line);
        wire.push_str("\r\n");
        timeout(self.command_timeout, self.writer.write_all(wire.as_bytes()))
            .await
            .map_err(|_| AppError::SmtpTimeout(format!("write of '{}' timed out", line)))??;
        self.read_reply().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_over(
        buf: tokio::io::DuplexStream,
    ) -> SmtpSession<tokio::io::DuplexStream> {
        SmtpSession::new(buf, Duration::from_secs(1))
    }

    #[test]
    fn reply_code_classes() {
        let ok = SmtpReply { code: 250, message: String::new() };
        let temp = SmtpReply { code: 451, message: String::new() };
        let perm = SmtpReply { code: 550, message: String::new() };
        assert!(ok.is_positive_completion());
        assert!(temp.is_transient_failure());
        assert!(perm.is_permanent_failure());
        assert!(!ok.is_permanent_failure());
        assert!(!perm.is_positive_completion());
    }

    #[tokio::test]
    async fn parses_single_line_reply() {
        let (client, mut server) = tokio::io::duplex(1024);
        server.write_all(b"220 mail.example ESMTP\r\n").await.unwrap();
        let mut session = session_over(client);
        let reply = session.read_reply().await.unwrap();
        assert_eq!(reply.code, 220);
        assert_eq!(reply.message, "mail.example ESMTP");
    }

    #[tokio::test]
    async fn parses_multi_line_reply() {
        let (client, mut server) = tokio::io::duplex(1024);
        server
            .write_all(b"250-mail.example\r\n250-SIZE 35882577\r\n250 STARTTLS\r\n")
            .await
            .unwrap();
        let mut session = session_over(client);
        let reply = session.read_reply().await.unwrap();
        assert_eq!(reply.code, 250);
        assert_eq!(reply.message, "mail.example SIZE 35882577 STARTTLS");
    }

    #[tokio::test]
    async fn bare_code_reply_is_accepted() {
        let (client, mut server) = tokio::io::duplex(1024);
        server.write_all(b"250\r\n").await.unwrap();
        let mut session = session_over(client);
        let reply = session.read_reply().await.unwrap();
        assert_eq!(reply.code, 250);
        assert_eq!(reply.message, "");
    }

    #[tokio::test]
    async fn garbage_reply_is_a_protocol_error() {
        let (client, mut server) = tokio::io::duplex(1024);
        server.write_all(b"hi\r\n").await.unwrap();
        let mut session = session_over(client);
        assert!(matches!(
            session.read_reply().await,
            Err(AppError::SmtpProtocol(_))
        ));
    }

    #[tokio::test]
    async fn closed_connection_is_a_protocol_error() {
        let (client, server) = tokio::io::duplex(1024);
        drop(server);
        let mut session = session_over(client);
        assert!(matches!(
            session.read_reply().await,
            Err(AppError::SmtpProtocol(_))
        ));
    }

    #[tokio::test]
    async fn stalled_reply_times_out() {
        let (client, _server) = tokio::io::duplex(1024);
        let mut session = SmtpSession::new(client, Duration::from_millis(50));
        assert!(matches!(
            session.read_reply().await,
            Err(AppError::SmtpTimeout(_))
        ));
    }

    #[tokio::test]
    async fn command_writes_crlf_terminated_line() {
        let (client, mut server) = tokio::io::duplex(1024);
        server.write_all(b"250 Ok\r\n").await.unwrap();
        let mut session = session_over(client);
        let reply = session.command("EHLO triage.test").await.unwrap();
        assert_eq!(reply.code, 250);

        let mut buf = vec![0u8; 64];
        let n = tokio::io::AsyncReadExt::read(&mut server, &mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"EHLO triage.test\r\n");
    }
}
