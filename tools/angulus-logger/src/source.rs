//! Where console lines come from
//!
//! The firmware prints one `Angle:` line per frame on its UART. The lines
//! arrive either over a USB serial adapter or, when a network bridge forwards
//! the console, as UDP datagrams.

use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Console baud rate of the firmware
pub const DEFAULT_BAUD: u32 = 115_200;

/// Listen address for forwarded console lines
pub const DEFAULT_UDP_BIND: &str = "0.0.0.0:12345";

/// Largest datagram accepted
pub const DATAGRAM_SIZE: usize = 1024;

/// Read timeout of the serial port; reads simply retry after it
const SERIAL_TIMEOUT: Duration = Duration::from_secs(1);

/// Line source selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `serial <port> [baud]`
    Serial { port: String, baud: u32 },
    /// `udp [bind address]`
    Udp { bind: SocketAddr },
}

impl Source {
    /// Parse the arguments after the program name
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mode = args.next().context("missing mode: expected `serial` or `udp`")?;

        let source = match mode.as_str() {
            "serial" => {
                let port = args.next().context("serial mode needs a port name")?;
                let baud = match args.next() {
                    Some(baud) => baud
                        .parse()
                        .with_context(|| format!("invalid baud rate `{}`", baud))?,
                    None => DEFAULT_BAUD,
                };
                Source::Serial { port, baud }
            }
            "udp" => {
                let bind = args.next();
                let bind = bind.as_deref().unwrap_or(DEFAULT_UDP_BIND);
                let bind = bind
                    .parse()
                    .with_context(|| format!("invalid bind address `{}`", bind))?;
                Source::Udp { bind }
            }
            other => bail!("unknown mode `{}`: expected `serial` or `udp`", other),
        };

        if let Some(extra) = args.next() {
            bail!("unexpected argument `{}`", extra);
        }
        Ok(source)
    }

    /// Default CSV file name for this source
    pub fn default_output(&self) -> &'static str {
        match self {
            Source::Serial { .. } => "angle_log.csv",
            Source::Udp { .. } => "wifi_angle_log.csv",
        }
    }
}

/// Newline-terminated lines from a byte stream
///
/// Read timeouts are retried without losing the partial line.
pub struct LineReader<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buf: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) if self.buf.is_empty() => return None,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf).trim().to_owned();
                    self.buf.clear();
                    return Some(Ok(line));
                }
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                    continue
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Open a serial port as a line stream
pub fn open_serial(port: &str, baud: u32) -> Result<LineReader<Box<dyn serialport::SerialPort>>> {
    let serial = serialport::new(port, baud)
        .timeout(SERIAL_TIMEOUT)
        .open()
        .with_context(|| format!("could not open serial port {}", port))?;
    Ok(LineReader::new(serial))
}

/// Datagrams from a bound UDP socket, one line each
pub struct Datagrams {
    socket: UdpSocket,
    buf: [u8; DATAGRAM_SIZE],
}

impl Datagrams {
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let socket =
            UdpSocket::bind(addr).with_context(|| format!("could not bind UDP {}", addr))?;
        Ok(Self {
            socket,
            buf: [0; DATAGRAM_SIZE],
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl Iterator for Datagrams {
    type Item = io::Result<(String, SocketAddr)>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.socket.recv_from(&mut self.buf).map(|(len, from)| {
            let line = String::from_utf8_lossy(&self.buf[..len]).trim().to_owned();
            (line, from)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_serial_defaults_to_console_baud() {
        let source = Source::from_args(args(&["serial", "/dev/ttyACM0"])).unwrap();
        assert_eq!(
            source,
            Source::Serial {
                port: "/dev/ttyACM0".into(),
                baud: 115_200
            }
        );
        assert_eq!(source.default_output(), "angle_log.csv");

        let source = Source::from_args(args(&["serial", "COM6", "9600"])).unwrap();
        assert_eq!(
            source,
            Source::Serial {
                port: "COM6".into(),
                baud: 9600
            }
        );
    }

    #[test]
    fn test_udp_defaults_to_port_12345() {
        let source = Source::from_args(args(&["udp"])).unwrap();
        assert_eq!(
            source,
            Source::Udp {
                bind: "0.0.0.0:12345".parse().unwrap()
            }
        );
        assert_eq!(source.default_output(), "wifi_angle_log.csv");
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(Source::from_args(args(&[])).is_err());
        assert!(Source::from_args(args(&["serial"])).is_err());
        assert!(Source::from_args(args(&["serial", "COM6", "fast"])).is_err());
        assert!(Source::from_args(args(&["udp", "nowhere"])).is_err());
        assert!(Source::from_args(args(&["udp", "0.0.0.0:1", "x"])).is_err());
        assert!(Source::from_args(args(&["tcp"])).is_err());
    }

    /// Reader that times out once between two halves of a line
    struct Stuttering {
        chunks: Vec<io::Result<&'static [u8]>>,
    }

    impl Read for Stuttering {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0)?;
            out[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_timeout_keeps_partial_line() {
        let reader = Stuttering {
            chunks: vec![
                Ok(b"Angle: 12."),
                Err(io::Error::new(ErrorKind::TimedOut, "idle")),
                Ok(b"50\r\nAngle: -3.00\r\n"),
            ],
        };

        let lines: Vec<String> = LineReader::new(reader).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["Angle: 12.50", "Angle: -3.00"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines: Vec<String> = LineReader::new(&b"Angle: 1.00\nAngle: 2.00"[..])
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, ["Angle: 1.00", "Angle: 2.00"]);
    }

    #[test]
    fn test_datagram_loopback() {
        let mut datagrams = Datagrams::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let target = datagrams.local_addr().unwrap();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(b"Angle: 45.00\r\n", target).unwrap();

        let (line, from) = datagrams.next().unwrap().unwrap();
        assert_eq!(line, "Angle: 45.00");
        assert_eq!(from, sender.local_addr().unwrap());
    }
}
