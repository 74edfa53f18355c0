//! Angulus console logger
//!
//! Records the firmware's `Angle:` lines to CSV with a timestamp relative to
//! the start of logging.
//!
//! ```text
//! angulus-logger serial <port> [baud]
//! angulus-logger udp [bind address]
//! ```
//!
//! The output file defaults to `angle_log.csv` (serial) or
//! `wifi_angle_log.csv` (UDP) and can be set with `ANGULUS_LOG_FILE`.
//! Verbosity follows `RUST_LOG` and defaults to `info`.

use std::env;
use std::fs::File;
use std::io::Write;
use std::net::SocketAddr;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

mod record;
mod source;

use record::AngleLog;
use source::{Datagrams, Source};

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let source = Source::from_args(env::args().skip(1))?;
    let path = env::var("ANGULUS_LOG_FILE").unwrap_or_else(|_| source.default_output().into());
    let file = File::create(&path).with_context(|| format!("could not create {}", path))?;
    let mut log = AngleLog::new(file)?;
    info!("Logging to {}", path);

    match source {
        Source::Serial { port, baud } => {
            let lines = source::open_serial(&port, baud)?;
            info!("Reading {} at {} baud", port, baud);
            let lines = lines.map(|line| line.map(|line| (line, None)));
            run(lines, &mut log)?;
        }
        Source::Udp { bind } => {
            let datagrams = Datagrams::bind(bind)?;
            info!("Listening on UDP {}", datagrams.local_addr()?);
            let lines = datagrams.map(|datagram| datagram.map(|(line, from)| (line, Some(from))));
            run(lines, &mut log)?;
        }
    }

    info!("Source closed after {} rows", log.rows());
    Ok(())
}

fn run<I, W>(lines: I, log: &mut AngleLog<W>) -> Result<()>
where
    I: Iterator<Item = std::io::Result<(String, Option<SocketAddr>)>>,
    W: Write,
{
    let start = Instant::now();
    for line in lines {
        let (line, from) = line.context("read failed")?;
        let elapsed = start.elapsed();
        match log.record(&line, elapsed)? {
            Some(angle) => match from {
                Some(from) => info!(
                    "{:.2}s -> {:.2}° from {}",
                    elapsed.as_secs_f64(),
                    angle.degrees(),
                    from.ip()
                ),
                None => info!("{:.4}s -> {}°", elapsed.as_secs_f64(), angle.degrees()),
            },
            None => debug!("ignored: {:?}", line),
        }
    }
    Ok(())
}
