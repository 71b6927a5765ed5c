//! Module focusing on the way lines and records are moved between worker threads
//!
//! Every stage is a pool of scoped threads reading from one bounded channel and writing
//! to another. All workers of a stage share the sender of the output channel, so the
//! channel closes exactly when the last worker of the stage exits. Every blocking
//! send/receive also waits on the run's cancellation signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::Scope;

use crossbeam_channel::{Receiver, Sender, bounded, select};
use tracing::{debug, warn};

use crate::Error;
use crate::input::{Line, Source, read_lines};

/// "First error wins" cancellation group shared by every worker of a run.
#[derive(Debug)]
pub(crate) struct RunGroup {
    first_error: Mutex<Option<Error>>,
    cancelled: AtomicBool,
    // Never sends anything; dropping it disconnects `cancel_rx`, which wakes every select.
    cancel_tx: Mutex<Option<Sender<()>>>,
    cancel_rx: Receiver<()>,
}

impl RunGroup {
    pub(crate) fn new() -> Self {
        let (cancel_tx, cancel_rx) = bounded(0);
        Self {
            first_error: Mutex::new(None),
            cancelled: AtomicBool::new(false),
            cancel_tx: Mutex::new(Some(cancel_tx)),
            cancel_rx,
        }
    }

    /// Records `err` if it is the first failure of the run and cancels every stage.
    pub(crate) fn fail(&self, err: Error) {
        {
            let mut slot = self.first_error.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                warn!(error = %err, "run failed, cancelling");
                *slot = Some(err);
            } else {
                debug!(error = %err, "dropping error raised after cancellation");
            }
        }
        self.cancel();
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.cancel_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// The outcome of the run once every worker has been joined.
    pub(crate) fn finish(self) -> Result<(), Error> {
        match self
            .first_error
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Blocks until an item arrives or the run is cancelled. `None` once the input is
    /// drained or the run was cancelled.
    fn recv<T>(&self, input: &Receiver<T>) -> Option<T> {
        if self.is_cancelled() {
            return None;
        }
        select! {
            recv(input) -> msg => msg.ok(),
            recv(self.cancel_rx) -> _ => None,
        }
    }

    /// Blocks until `item` is accepted downstream. `false` when the run was cancelled or
    /// nobody is listening anymore.
    fn send<T>(&self, output: &Sender<T>, item: T) -> bool {
        if self.is_cancelled() {
            return false;
        }
        select! {
            send(output, item) -> res => res.is_ok(),
            recv(self.cancel_rx) -> _ => false,
        }
    }
}

/// Spawns one reader thread per source, all feeding the same line channel.
pub(crate) fn spawn_readers<'scope>(
    s: &'scope Scope<'scope, '_>,
    group: &'scope RunGroup,
    sources: Vec<Source>,
    capacity: usize,
) -> Receiver<Line> {
    let (lines_tx, lines_rx) = bounded(capacity);

    for Source { name, reader } in sources {
        let lines_tx = lines_tx.clone();
        s.spawn(move || {
            let source_name: Arc<str> = Arc::from(name);
            debug!(source = %source_name, "reader started");
            for result in read_lines(Arc::clone(&source_name), reader) {
                match result {
                    Ok(line) => {
                        if !group.send(&lines_tx, line) {
                            break;
                        }
                    }
                    Err(cause) => {
                        group.fail(crate::error::io_error(source_name.as_ref(), cause));
                        break;
                    }
                }
            }
            debug!(source = %source_name, "reader finished");
            // The reader (file or response body) is dropped, and thereby closed, here.
        });
    }

    lines_rx
}

/// Spawns `workers` threads applying `transform` to every item of `input`.
/// `Ok(None)` drops the item; an error fails the whole run.
pub(crate) fn spawn_stage<'scope, In, Out, F>(
    s: &'scope Scope<'scope, '_>,
    group: &'scope RunGroup,
    stage: &'static str,
    workers: usize,
    capacity: usize,
    input: Receiver<In>,
    transform: F,
) -> Receiver<Out>
where
    In: Send + 'scope,
    Out: Send + 'scope,
    F: Fn(In) -> Result<Option<Out>, Error> + Send + Sync + 'scope,
{
    let (output_tx, output_rx) = bounded(capacity);
    let transform = Arc::new(transform);

    for worker in 0..workers.max(1) {
        let input = input.clone();
        let output_tx = output_tx.clone();
        let transform = Arc::clone(&transform);
        s.spawn(move || {
            debug!(stage, worker, "worker started");
            while let Some(item) = group.recv(&input) {
                match transform(item) {
                    Ok(Some(out)) => {
                        if !group.send(&output_tx, out) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        group.fail(err);
                        break;
                    }
                }
            }
            debug!(stage, worker, "worker finished");
        });
    }

    output_rx
}

/// Spawns `workers` threads handing every item of `input` to `consume`. Terminal stage.
pub(crate) fn spawn_sink<'scope, In, F>(
    s: &'scope Scope<'scope, '_>,
    group: &'scope RunGroup,
    stage: &'static str,
    workers: usize,
    input: Receiver<In>,
    consume: F,
) where
    In: Send + 'scope,
    F: Fn(In) + Send + Sync + 'scope,
{
    let consume = Arc::new(consume);

    for worker in 0..workers.max(1) {
        let input = input.clone();
        let consume = Arc::clone(&consume);
        s.spawn(move || {
            debug!(stage, worker, "worker started");
            while let Some(item) = group.recv(&input) {
                consume(item);
            }
            debug!(stage, worker, "worker finished");
        });
    }
}
