//! Bounded queue plus one background worker per async logger.
//!
//! Producers enqueue records; the worker dequeues in FIFO order and forwards
//! them to the sink chain. Flush is a queue barrier, and shutdown joins the
//! worker unconditionally, so no worker outlives its owning logger.

use crate::error::Error;
use crate::internal;
use crate::level::Level;
use crate::sink::{LogRecord, Sink};
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError, bounded, select};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// Queue depth used by the crate-root constructors.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// What `enqueue` does when the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Suspend the producer until the worker frees a slot. Lossless.
    #[default]
    Block,
    /// Discard the oldest pending record and enqueue the new one. `enqueue`
    /// always succeeds while the worker is alive.
    DropOldest,
}

/// Called on the worker thread for sink errors it would otherwise discard.
pub type ErrorHandler = Box<dyn Fn(&Error) + Send + Sync>;

/// Control messages ride a separate unbounded channel so a full record queue
/// can never wedge flush or shutdown.
enum Control {
    Flush(Sender<Result<(), Error>>),
    Terminate,
}

pub struct AsyncDispatch {
    records: Sender<LogRecord>,
    /// The record channel is MPMC; producers pop from it to implement
    /// `DropOldest` without a side lock.
    records_rx: Receiver<LogRecord>,
    control: Sender<Control>,
    policy: OverflowPolicy,
    worker: Mutex<Option<JoinHandle<()>>>,
    error_handler: Arc<Mutex<Option<ErrorHandler>>>,
}

impl AsyncDispatch {
    /// Spawns the worker thread that owns the consumer side of the queue.
    ///
    /// `flush_level` is shared with the owning logger; records at or above it
    /// trigger a sink flush on the worker after they are written.
    ///
    /// # Errors
    /// `Error::Io` when the worker thread cannot be spawned.
    pub fn spawn(
        name: &str,
        sinks: Vec<Arc<dyn Sink>>,
        flush_level: Arc<AtomicU8>,
        capacity: usize,
        policy: OverflowPolicy,
        flush_on_shutdown: bool,
    ) -> Result<Self, Error> {
        let (records, records_rx) = bounded(capacity.max(1));
        let (control, control_rx) = crossbeam_channel::unbounded();
        let error_handler: Arc<Mutex<Option<ErrorHandler>>> = Arc::new(Mutex::new(None));

        let worker = Worker {
            records: records_rx.clone(),
            control: control_rx,
            sinks,
            flush_level,
            flush_on_shutdown,
            error_handler: Arc::clone(&error_handler),
        };
        let handle = thread::Builder::new()
            .name(format!("rotolog-{name}"))
            .spawn(move || worker.run())?;
        internal::debug("DISPATCH", &format!("worker started for '{name}'"));

        Ok(Self {
            records,
            records_rx,
            control,
            policy,
            worker: Mutex::new(Some(handle)),
            error_handler,
        })
    }

    /// Hands one record to the worker, honoring the overflow policy.
    ///
    /// # Errors
    /// `Error::Shutdown` when the worker is gone.
    pub fn enqueue(&self, record: LogRecord) -> Result<(), Error> {
        match self.policy {
            OverflowPolicy::Block => self
                .records
                .send(record)
                .map_err(|_| Error::Shutdown),
            OverflowPolicy::DropOldest => {
                let mut pending = record;
                loop {
                    match self.records.try_send(pending) {
                        Ok(()) => return Ok(()),
                        Err(TrySendError::Full(r)) => {
                            pending = r;
                            if self.records_rx.try_recv().is_ok() {
                                internal::debug("DISPATCH", "dropped oldest pending record");
                            }
                        }
                        Err(TrySendError::Disconnected(_)) => return Err(Error::Shutdown),
                    }
                }
            }
        }
    }

    /// Non-blocking enqueue, independent of the overflow policy.
    ///
    /// # Errors
    /// `Error::QueueFull` when no slot is free, `Error::Shutdown` when the
    /// worker is gone.
    pub fn try_enqueue(&self, record: LogRecord) -> Result<(), Error> {
        match self.records.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(Error::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(Error::Shutdown),
        }
    }

    /// Queue barrier: every record enqueued before this call is written to
    /// the sinks, and the sinks flushed, before it returns.
    ///
    /// # Errors
    /// `Error::Shutdown` when the worker is gone, otherwise the first sink
    /// flush error observed by the worker.
    pub fn flush(&self) -> Result<(), Error> {
        let (ack, ack_rx) = bounded(1);
        self.control
            .send(Control::Flush(ack))
            .map_err(|_| Error::Shutdown)?;
        ack_rx.recv().map_err(|_| Error::Shutdown)?
    }

    /// Replaces the worker-side error callback.
    pub fn set_error_handler(&self, handler: ErrorHandler) {
        let mut guard = self
            .error_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(handler);
    }
}

impl Drop for AsyncDispatch {
    fn drop(&mut self) {
        let _ = self.control.send(Control::Terminate);
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
            internal::debug("DISPATCH", "worker joined");
        }
    }
}

/// Consumer side; owns the sink chain for the lifetime of the thread.
struct Worker {
    records: Receiver<LogRecord>,
    control: Receiver<Control>,
    sinks: Vec<Arc<dyn Sink>>,
    flush_level: Arc<AtomicU8>,
    flush_on_shutdown: bool,
    error_handler: Arc<Mutex<Option<ErrorHandler>>>,
}

impl Worker {
    fn run(self) {
        loop {
            select! {
                recv(self.records) -> msg => match msg {
                    Ok(record) => self.sink_record(&record),
                    Err(_) => break,
                },
                recv(self.control) -> msg => match msg {
                    Ok(Control::Flush(ack)) => {
                        self.drain();
                        let _ = ack.send(self.flush_sinks());
                    }
                    Ok(Control::Terminate) | Err(_) => {
                        if self.flush_on_shutdown {
                            self.drain();
                            let _ = self.flush_sinks();
                        }
                        break;
                    }
                },
            }
        }
    }

    /// Empties the record queue so a barrier covers everything enqueued
    /// before it.
    fn drain(&self) {
        loop {
            match self.records.try_recv() {
                Ok(record) => self.sink_record(&record),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    fn sink_record(&self, record: &LogRecord) {
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                self.report(&e);
            }
        }
        if record.level >= Level::from_repr(self.flush_level.load(Ordering::Relaxed)) {
            let _ = self.flush_sinks();
        }
    }

    fn flush_sinks(&self) -> Result<(), Error> {
        let mut result = Ok(());
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                self.report(&e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    /// Worker failures never crash the thread; they go to the attached
    /// handler, or to internal diagnostics when none is set.
    fn report(&self, error: &Error) {
        let guard = self
            .error_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(handler) => handler(error),
            None => internal::error("DISPATCH", &format!("sink error: {error}")),
        }
    }
}
