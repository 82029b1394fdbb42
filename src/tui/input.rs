//! Input subscription.
//!
//! A prompt reads raw chunks from an [`InputSource`] between `subscribe` and
//! `unsubscribe`. The [`Subscription`] guard ties that window to a scope, so
//! every exit path (confirm, cancel, error) releases the source.
//!
//! ```text
//! stdin ──► reader thread ──► unbounded channel ──► StdinInput ──► Subscription
//!           (one per process,                      (taken while subscribed)
//!            reads only while subscribed)
//! ```

use std::io;
#[cfg(unix)]
use std::os::fd::RawFd;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A source of raw terminal input chunks.
#[async_trait]
pub trait InputSource: Send {
    /// Start delivering chunks.
    fn subscribe(&mut self) -> io::Result<()>;

    /// Next chunk, or `None` once the stream has closed.
    async fn next_chunk(&mut self) -> Option<String>;

    /// Stop delivering chunks. Safe to call more than once.
    fn unsubscribe(&mut self);
}

// ============================================================================
// Channel Input
// ============================================================================

/// Chunks pushed through an in-process channel.
///
/// Useful for embedding a prompt behind another event loop, and for tests.
pub struct ChannelInput {
    rx: UnboundedReceiver<String>,
    subscribed: bool,
}

impl ChannelInput {
    pub fn new() -> (UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                rx,
                subscribed: false,
            },
        )
    }
}

#[async_trait]
impl InputSource for ChannelInput {
    fn subscribe(&mut self) -> io::Result<()> {
        self.subscribed = true;
        Ok(())
    }

    async fn next_chunk(&mut self) -> Option<String> {
        if !self.subscribed {
            return None;
        }
        self.rx.recv().await
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

// ============================================================================
// Stdin Input
// ============================================================================

/// How long the reader waits for stdin before rechecking the gate.
#[cfg(unix)]
const POLL_INTERVAL_MS: i32 = 50;

/// Open while a prompt is subscribed. The reader only reads through an open gate.
#[derive(Debug, Default)]
struct ReadGate {
    open: Mutex<bool>,
    changed: Condvar,
}

impl ReadGate {
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until an in-flight read finishes.
    fn set(&self, open: bool) {
        *self.lock() = open;
        self.changed.notify_all();
    }

    fn wait_open(&self) {
        let guard = self.lock();
        let _open = self
            .changed
            .wait_while(guard, |open| !*open)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Process-wide reader state. `chunks` is `None` while a prompt holds it.
struct StdinShared {
    chunks: Mutex<Option<UnboundedReceiver<String>>>,
    gate: Arc<ReadGate>,
}

static STDIN: OnceLock<StdinShared> = OnceLock::new();

/// Process standard input.
///
/// Stdin has a single reader thread for the life of the process. It reads
/// only while a `StdinInput` is subscribed; between prompts the bytes stay
/// in the file descriptor for whoever reads stdin next. Only one
/// `StdinInput` can be subscribed at a time.
#[derive(Default)]
pub struct StdinInput {
    rx: Option<UnboundedReceiver<String>>,
}

impl StdinInput {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stdin_shared() -> io::Result<&'static StdinShared> {
    if let Some(shared) = STDIN.get() {
        return Ok(shared);
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let gate = Arc::new(ReadGate::default());
    let shared = StdinShared {
        chunks: Mutex::new(Some(rx)),
        gate: Arc::clone(&gate),
    };
    // Losing the race means another thread just installed the reader
    if STDIN.set(shared).is_ok() {
        thread::Builder::new()
            .name("pick-stdin".to_string())
            .spawn(move || read_stdin(gate, tx))?;
        info!("Stdin reader thread started");
    }

    STDIN
        .get()
        .ok_or_else(|| io::Error::other("stdin reader failed to initialize"))
}

#[cfg(unix)]
fn read_stdin(gate: Arc<ReadGate>, tx: UnboundedSender<String>) {
    read_loop(libc::STDIN_FILENO, gate, tx);
}

/// Wait for the gate, wait for data, then read while holding the gate so an
/// unsubscribe can never land between the check and the read.
#[cfg(unix)]
fn read_loop(fd: RawFd, gate: Arc<ReadGate>, tx: UnboundedSender<String>) {
    let mut buf = [0u8; 1024];

    loop {
        gate.wait_open();

        match poll_readable(fd, POLL_INTERVAL_MS) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Stdin poll failed: {}", e);
                break;
            }
        }

        let open = gate.lock();
        if !*open {
            continue;
        }
        match read_fd(fd, &mut buf) {
            Ok(0) => {
                debug!("Stdin reached EOF");
                break;
            }
            Ok(n) => {
                if !forward(&tx, &buf[..n]) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Stdin read failed: {}", e);
                break;
            }
        }
        drop(open);
    }
    // Dropping `tx` closes the channel; subscribers see `None`.
}

#[cfg(unix)]
fn poll_readable(fd: RawFd, timeout_ms: i32) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let ready = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if ready < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ready > 0)
}

/// Straight from the descriptor, bypassing std's buffered `Stdin`, so
/// nothing is held back from the host once the gate closes.
#[cfg(unix)]
fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(n as usize)
}

// Without poll(2) a blocking read can't be abandoned, so one read may
// already be pending when the gate closes.
#[cfg(not(unix))]
fn read_stdin(gate: Arc<ReadGate>, tx: UnboundedSender<String>) {
    use std::io::Read;

    let stdin = io::stdin();
    let mut buf = [0u8; 256];

    loop {
        gate.wait_open();
        match stdin.lock().read(&mut buf) {
            Ok(0) => {
                debug!("Stdin reached EOF");
                break;
            }
            Ok(n) => {
                if !forward(&tx, &buf[..n]) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Stdin read failed: {}", e);
                break;
            }
        }
    }
}

fn forward(tx: &UnboundedSender<String>, bytes: &[u8]) -> bool {
    tx.send(String::from_utf8_lossy(bytes).into_owned()).is_ok()
}

#[async_trait]
impl InputSource for StdinInput {
    fn subscribe(&mut self) -> io::Result<()> {
        if self.rx.is_some() {
            return Ok(());
        }

        let shared = stdin_shared()?;
        let mut slot = shared
            .chunks
            .lock()
            .map_err(|_| io::Error::other("stdin subscription lock poisoned"))?;
        let mut rx = slot.take().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::ResourceBusy,
                "stdin is already subscribed by another prompt",
            )
        })?;

        // Left over from the tail of an earlier prompt's read
        let mut stale = 0usize;
        while rx.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            debug!("Discarded {} stale stdin chunks", stale);
        }

        shared.gate.set(true);
        self.rx = Some(rx);
        Ok(())
    }

    async fn next_chunk(&mut self) -> Option<String> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    fn unsubscribe(&mut self) {
        let Some(rx) = self.rx.take() else {
            return;
        };
        if let Some(shared) = STDIN.get() {
            shared.gate.set(false);
            match shared.chunks.lock() {
                Ok(mut slot) => *slot = Some(rx),
                Err(poisoned) => *poisoned.into_inner() = Some(rx),
            }
        }
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

// ============================================================================
// Scoped Subscription
// ============================================================================

/// Holds a source subscribed for the lifetime of the guard.
pub struct Subscription<'a, I: InputSource + ?Sized> {
    source: &'a mut I,
    active: bool,
}

impl<'a, I: InputSource + ?Sized> Subscription<'a, I> {
    pub fn acquire(source: &'a mut I) -> io::Result<Self> {
        source.subscribe()?;
        Ok(Self {
            source,
            active: true,
        })
    }

    /// Next chunk; `None` after release or once the source closes.
    pub async fn next_chunk(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }
        self.source.next_chunk().await
    }

    pub fn release(&mut self) {
        if self.active {
            self.active = false;
            self.source.unsubscribe();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<I: InputSource + ?Sized> Drop for Subscription<'_, I> {
    fn drop(&mut self) {
        self.release();
    }
}
