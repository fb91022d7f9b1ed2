//! # Input Multiplexer
//!
//! Three producers feed the navigation loop, each through its own bounded
//! queue:
//!
//! ```text
//! ┌──────────────────────┐   keys (Key / Closed)
//! │ stdin-reader thread  │──────────────────────┐
//! │ read 1 byte, block   │                      │
//! └──────────────────────┘                      ▼
//! ┌──────────────────────┐   resizes     ┌───────────────────┐
//! │ SIGWINCH task        │──────────────▶│ InputMultiplexer  │──▶ one InputEvent
//! └──────────────────────┘               │   select! on all  │    per next()
//! ┌──────────────────────┐ terminations  └───────────────────┘
//! │ SIGINT/TERM/HUP task │──────────────────────▲
//! │ + Ctrl-C byte        │
//! └──────────────────────┘
//! ```
//!
//! The consumer waits on whichever queue is ready first. Events are never
//! batched or dropped. Within a queue, order is arrival order; across queues
//! there is no ordering beyond "first ready wins".
//!
//! A termination also runs the teardown hook straight from its producer,
//! so it takes effect even while the consumer is busy.
//!
//! stdin is read on a plain OS thread because a blocking read cannot be
//! cancelled; the thread lives until EOF or process exit.

use std::future::Future;
use std::io::{self, Read};

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::sync::mpsc;

/// Raw-mode Ctrl-C.
const INTERRUPT_BYTE: u8 = 0x03;

const KEY_QUEUE_CAPACITY: usize = 64;
const SIGNAL_QUEUE_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// One byte from the keyboard.
    Key(u8),
    /// The terminal window changed size.
    Resized,
    /// Interrupt, terminate or hangup. The caller restores the terminal and exits.
    Terminated,
    /// stdin reached EOF or failed. No more keys will arrive.
    Closed,
}

/// Producer ends of the three queues.
#[derive(Clone)]
pub struct InputSenders {
    pub keys: mpsc::Sender<InputEvent>,
    pub resizes: mpsc::Sender<()>,
    pub terminations: mpsc::Sender<()>,
    /// Teardown run by a producer the moment it sees a termination.
    pub on_terminate: fn(),
}

pub struct InputMultiplexer {
    keys: mpsc::Receiver<InputEvent>,
    resizes: mpsc::Receiver<()>,
    terminations: mpsc::Receiver<()>,
}

impl InputMultiplexer {
    /// Creates the queues without starting any producer. Terminations are
    /// only queued.
    pub fn channel() -> (InputSenders, Self) {
        let (keys_tx, keys) = mpsc::channel(KEY_QUEUE_CAPACITY);
        let (resizes_tx, resizes) = mpsc::channel(SIGNAL_QUEUE_CAPACITY);
        let (terminations_tx, terminations) = mpsc::channel(SIGNAL_QUEUE_CAPACITY);
        (
            InputSenders {
                keys: keys_tx,
                resizes: resizes_tx,
                terminations: terminations_tx,
                on_terminate: ignore_termination,
            },
            Self {
                keys,
                resizes,
                terminations,
            },
        )
    }

    /// Starts the stdin reader thread and the two signal listeners.
    ///
    /// `on_terminate` runs on the listener (or the stdin thread, for the
    /// Ctrl-C byte) as soon as a termination arrives, whatever the
    /// foreground loop is doing. The termination is queued as well.
    ///
    /// Must be called from inside a tokio runtime. Fails only if a signal
    /// handler cannot be installed or the reader thread cannot be spawned.
    pub fn start(on_terminate: fn()) -> io::Result<Self> {
        let (mut senders, multiplexer) = Self::channel();
        senders.on_terminate = on_terminate;

        let mut window_change = signal(SignalKind::window_change())?;
        let signals = OsSignals {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        };

        let resizes = senders.resizes.clone();
        tokio::spawn(async move {
            while window_change.recv().await.is_some() {
                if resizes.send(()).await.is_err() {
                    break;
                }
            }
        });

        tokio::spawn(watch_terminations(
            signals,
            senders.terminations.clone(),
            on_terminate,
        ));

        std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || read_stdin(io::stdin().lock(), senders))?;

        info!("Input multiplexer started");
        Ok(multiplexer)
    }

    /// Waits for the next event from whichever source is ready first.
    pub async fn next(&mut self) -> InputEvent {
        tokio::select! {
            Some(()) = self.terminations.recv() => InputEvent::Terminated,
            Some(()) = self.resizes.recv() => InputEvent::Resized,
            event = self.keys.recv() => event.unwrap_or(InputEvent::Closed),
        }
    }

    /// Runs `work` to completion unless a termination arrives first, in
    /// which case `None` is returned and `work` is dropped.
    pub async fn or_terminated<F: Future>(&mut self, work: F) -> Option<F::Output> {
        tokio::select! {
            output = work => Some(output),
            Some(()) = self.terminations.recv() => None,
        }
    }
}

fn ignore_termination() {}

/// Where termination signals come from.
#[async_trait]
pub trait TerminationSignals: Send {
    /// The name of the next signal, or `None` once no more can arrive.
    async fn recv(&mut self) -> Option<&'static str>;
}

struct OsSignals {
    interrupt: Signal,
    terminate: Signal,
    hangup: Signal,
}

#[async_trait]
impl TerminationSignals for OsSignals {
    async fn recv(&mut self) -> Option<&'static str> {
        tokio::select! {
            Some(()) = self.interrupt.recv() => Some("SIGINT"),
            Some(()) = self.terminate.recv() => Some("SIGTERM"),
            Some(()) = self.hangup.recv() => Some("SIGHUP"),
            else => None,
        }
    }
}

/// Queues every termination and runs `on_terminate` for it, until the
/// signal source ends.
pub async fn watch_terminations(
    mut signals: impl TerminationSignals,
    terminations: mpsc::Sender<()>,
    on_terminate: fn(),
) {
    while let Some(name) = signals.recv().await {
        info!("Received {}", name);
        let _ = terminations.try_send(());
        on_terminate();
    }
}

/// Reads one byte at a time until EOF, a read error, or the consumer goes away.
fn read_stdin(mut reader: impl Read, senders: InputSenders) {
    let mut byte = [0u8; 1];
    loop {
        let event = match reader.read(&mut byte) {
            Ok(0) => {
                info!("stdin closed");
                InputEvent::Closed
            }
            Ok(_) if byte[0] == INTERRUPT_BYTE => {
                debug!("Ctrl-C on stdin");
                let _ = senders.terminations.try_send(());
                (senders.on_terminate)();
                continue;
            }
            Ok(_) => InputEvent::Key(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("stdin read failed: {}", e);
                InputEvent::Closed
            }
        };

        let closed = event == InputEvent::Closed;
        if senders.keys.blocking_send(event).is_err() || closed {
            break;
        }
    }
}
