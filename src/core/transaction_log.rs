//! Serialized, human-readable transaction log
//!
//! Every deposit and withdraw emits one line such as `Account 1: Deposited 50`.
//! Lines from different accounts must never interleave mid-line, so they are
//! funnelled through a single channel drained by one dedicated writer thread.
//! Accounts only enqueue a small [`LogEntry`]; formatting and I/O happen on the
//! writer thread, outside of any account lock.
//!
//! # Architecture
//!
//! ```text
//! Account ──┐
//! Account ──┼──► TransactionLog (UnboundedSender) ──► writer thread ──► W: Write
//! Account ──┘
//! ```
//!
//! Ordering across accounts matches the order in which entries reached the
//! channel, which is not necessarily real-time order. Per account, entries
//! follow the order of that account's critical sections because they are
//! enqueued while the lock is held.

use crate::types::{AccountId, Amount, BankError};
use std::fmt;
use std::io::Write;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// What happened to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    /// A deposit was applied
    Deposited(Amount),
    /// A withdrawal was applied
    Withdrew(Amount),
    /// A withdrawal was skipped for lack of funds
    WithdrawFailed(Amount),
}

/// One line of the transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    /// Account the event belongs to
    pub account: AccountId,
    /// The event itself
    pub event: LogEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            LogEvent::Deposited(amount) => write!(f, "Account {}: Deposited {}", self.account, amount),
            LogEvent::Withdrew(amount) => write!(f, "Account {}: Withdraw {}", self.account, amount),
            LogEvent::WithdrawFailed(amount) => write!(
                f,
                "Account {}: Failed to withdraw {} due to insufficient funds",
                self.account, amount
            ),
        }
    }
}

enum LogMessage {
    Entry(LogEntry),
    Close,
}

/// Cloneable handle used by accounts to emit log entries
///
/// Sending never blocks, so emitting from inside a critical section only costs
/// a queue push. A disabled log drops every entry.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    sender: Option<UnboundedSender<LogMessage>>,
}

impl fmt::Debug for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::Entry(entry) => write!(f, "Entry({})", entry),
            LogMessage::Close => f.write_str("Close"),
        }
    }
}

impl TransactionLog {
    /// A log that discards every entry
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Start a writer thread that appends each entry as a line to `output`
    ///
    /// Returns the handle accounts emit through and the [`LogWriter`] that
    /// must be finished to flush and recover the output.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Runtime` if the writer thread cannot be spawned.
    pub fn spawn<W>(output: W) -> Result<(Self, LogWriter<W>), BankError>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();

        let handle = thread::Builder::new()
            .name("transaction-log".to_string())
            .spawn(move || drain(receiver, output))
            .map_err(|e| BankError::runtime(format!("Failed to spawn log writer: {}", e)))?;

        let writer = LogWriter {
            sender: sender.clone(),
            handle,
        };

        Ok((
            Self {
                sender: Some(sender),
            },
            writer,
        ))
    }

    /// Whether entries are actually written anywhere
    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Enqueue an entry
    ///
    /// Entries sent after the writer was finished are dropped.
    pub fn record(&self, account: AccountId, event: LogEvent) {
        if let Some(sender) = &self.sender {
            let entry = LogEntry { account, event };
            if sender.send(LogMessage::Entry(entry)).is_err() {
                debug!("Transaction log closed, dropping entry: {}", entry);
            }
        }
    }
}

/// Owner of the writer thread
pub struct LogWriter<W> {
    sender: UnboundedSender<LogMessage>,
    handle: JoinHandle<std::io::Result<W>>,
}

impl<W> LogWriter<W> {
    /// Write every entry enqueued so far, stop the writer thread and return
    /// the output
    ///
    /// # Errors
    ///
    /// Returns `BankError::Io` if writing failed and `BankError::Runtime` if the
    /// writer thread panicked.
    pub fn finish(self) -> Result<W, BankError> {
        // Close is queued behind everything already sent.
        let _ = self.sender.send(LogMessage::Close);

        match self.handle.join() {
            Ok(result) => result.map_err(BankError::from),
            Err(_) => Err(BankError::runtime("Transaction log writer panicked")),
        }
    }
}

fn drain<W: Write>(mut receiver: UnboundedReceiver<LogMessage>, mut output: W) -> std::io::Result<W> {
    while let Some(message) = receiver.blocking_recv() {
        match message {
            LogMessage::Entry(entry) => writeln!(output, "{}", entry)?,
            LogMessage::Close => break,
        }
    }
    output.flush()?;
    Ok(output)
}
