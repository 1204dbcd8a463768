//=========================================================================
// Async Logger
//=========================================================================
//
// `log::Log` backend that never blocks the caller.
//
// Architecture:
//   log::info!(..) ──format──► try_send ──► bounded channel ──► worker
//                                  │                               ↓
//                          full → dropped += 1                   W: Write
//
// The worker owns the writer and flushes it whenever the backlog is
// empty. `LogGuard` sends `Shutdown` (carrying the
// dropped-record count), then joins the worker so every accepted record
// is flushed before the process exits.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{LevelFilter, Log, Metadata, Record};

//=== Message =============================================================

enum Message {
    Line(String),
    Shutdown { dropped: u64 },
}

//=== AsyncLogger =========================================================

/// Formats records on the calling thread and hands them to a worker.
pub struct AsyncLogger {
    level: LevelFilter,
    start: Instant,
    sender: Sender<Message>,
    dropped: Arc<AtomicU64>,
}

impl AsyncLogger {
    /// Spawns the worker thread writing to `writer`.
    ///
    /// `capacity` bounds the number of formatted records in flight; records
    /// emitted while the queue is full are counted and discarded.
    pub fn spawn<W>(level: LevelFilter, capacity: usize, writer: W) -> io::Result<(Self, LogGuard)>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = bounded(capacity.max(1));
        let dropped = Arc::new(AtomicU64::new(0));

        let worker = thread::Builder::new()
            .name("log-worker".into())
            .spawn(move || run_worker(receiver, writer))?;

        let logger = Self {
            level,
            start: Instant::now(),
            sender: sender.clone(),
            dropped: Arc::clone(&dropped),
        };
        let guard = LogGuard {
            sender,
            dropped,
            worker: Some(worker),
        };
        Ok((logger, guard))
    }

    /// Number of records discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn format(&self, record: &Record) -> String {
        format!(
            "{:>10.3} {:<5} {}:{} {} - {}",
            self.start.elapsed().as_secs_f64(),
            record.level(),
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            record.target(),
            record.args()
        )
    }
}

impl Log for AsyncLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match self.sender.try_send(Message::Line(self.format(record))) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            // Worker already shut down; nothing left to write to.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }

    fn flush(&self) {}
}

//=== LogGuard ============================================================

/// Keeps the log worker alive. Dropping it drains and joins the worker.
pub struct LogGuard {
    sender: Sender<Message>,
    dropped: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        let dropped = self.dropped.load(Ordering::Relaxed);
        // Blocking send: shutdown must not be lost to a full queue.
        let _ = self.sender.send(Message::Shutdown { dropped });

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

//=== Worker ==============================================================

fn run_worker<W: Write>(receiver: Receiver<Message>, mut out: W) {
    for message in receiver.iter() {
        match message {
            Message::Line(line) => {
                let _ = writeln!(out, "{}", line);
                if receiver.is_empty() {
                    let _ = out.flush();
                }
            }
            Message::Shutdown { dropped } => {
                if dropped > 0 {
                    let _ = writeln!(out, "{} log records dropped (queue full)", dropped);
                }
                break;
            }
        }
    }

    let _ = out.flush();
}

//=========================================================================
// Unit Tests
//=========================================================================
