//! Recurring timer that drives the grid.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::ClockError;
use crate::grid::BlockGrid;
use crate::sink::CellSink;
use crate::time::TimeSampler;

/// Interval between ticks of a running clock.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Callback invoked on every timer firing.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Trait for recurring timer implementations.
///
/// `start` hands back a handle that is the only way to stop the timer;
/// `stop` consumes it so a stopped timer cannot be stopped twice.
pub trait ClockDriver {
    /// Identity of a running timer.
    type Handle;

    /// Invoke `callback` every `interval` until the returned handle is stopped.
    fn start(&mut self, interval: Duration, callback: TickCallback)
    -> Result<Self::Handle, ClockError>;

    /// Stop the timer identified by `handle`.
    ///
    /// No callback runs after this returns.
    fn stop(&mut self, handle: Self::Handle);
}

/// Runs each timer on its own named thread.
///
/// Firings are sequential, so a callback always finishes before the next one
/// starts.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use binclock_core::{BlockGrid, CellChange, ClockDriver, LocalClock, ThreadDriver, TICK_INTERVAL};
///
/// let mut grid = BlockGrid::new(LocalClock::new());
/// let mut driver = ThreadDriver::new();
/// let handle = driver.start(
///     TICK_INTERVAL,
///     Box::new(move || {
///         let _ = grid.tick(&mut |change: CellChange| println!("{:?}", change));
///     }),
/// )?;
///
/// std::thread::sleep(Duration::from_secs(5));
/// driver.stop(handle);
/// # Ok::<(), binclock_core::ClockError>(())
/// ```
#[derive(Debug, Default)]
pub struct ThreadDriver {
    started: usize,
}

impl ThreadDriver {
    /// Create a driver.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A running [`ThreadDriver`] timer.
#[derive(Debug)]
pub struct TimerHandle {
    id: usize,
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl TimerHandle {
    /// Identifier of this timer, unique per driver.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl ClockDriver for ThreadDriver {
    type Handle = TimerHandle;

    fn start(
        &mut self,
        interval: Duration,
        mut callback: TickCallback,
    ) -> Result<TimerHandle, ClockError> {
        self.started += 1;
        let id = self.started;
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name(format!("binclock-tick-{id}"))
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => callback(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("timer {} exited", id);
            })?;

        info!("timer {} started ({:?} interval)", id, interval);
        Ok(TimerHandle {
            id,
            stop_tx,
            thread,
        })
    }

    fn stop(&mut self, handle: TimerHandle) {
        let TimerHandle {
            id,
            stop_tx,
            thread,
        } = handle;

        let _ = stop_tx.send(());
        if thread.join().is_err() {
            warn!("timer {} panicked while ticking", id);
        }
        info!("timer {} stopped", id);
    }
}

/// Reset `grid` and start `driver` ticking it into `sink`.
///
/// The first firing after every start is a full repaint, so a clock that was
/// stopped earlier never resumes from stale blocks.
///
/// # Errors
/// Returns whatever `driver.start` returns.
pub fn start_grid<D, T, K>(
    driver: &mut D,
    grid: &Arc<Mutex<BlockGrid<T>>>,
    interval: Duration,
    mut sink: K,
) -> Result<D::Handle, ClockError>
where
    D: ClockDriver + ?Sized,
    T: TimeSampler + Send + 'static,
    K: CellSink + Send + 'static,
{
    grid.lock().unwrap_or_else(PoisonError::into_inner).reset();

    let ticking = Arc::clone(grid);
    driver.start(
        interval,
        Box::new(move || {
            let mut grid = ticking.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = grid.tick(&mut sink) {
                warn!("tick failed: {}", e);
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ManualClock;
    use crate::sink::CellChange;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[test]
    fn test_thread_driver_fires_until_stopped() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let mut driver = ThreadDriver::new();
        let handle = driver
            .start(
                Duration::from_millis(5),
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        driver.stop(handle);

        let after_stop = fired.load(Ordering::SeqCst);
        assert!(after_stop > 0);

        thread::sleep(Duration::from_millis(30));
        assert_eq!(fired.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_thread_driver_handles_are_distinct() {
        let mut driver = ThreadDriver::new();
        let first = driver.start(TICK_INTERVAL, Box::new(|| {})).unwrap();
        let second = driver.start(TICK_INTERVAL, Box::new(|| {})).unwrap();
        assert_ne!(first.id(), second.id());

        let stopping = Instant::now();
        driver.stop(first);
        assert!(stopping.elapsed() < TICK_INTERVAL / 2);
        driver.stop(second);
    }

    #[test]
    fn test_start_grid_repaints_after_every_restart() {
        let clock = ManualClock::at(10, 20, 30).unwrap();
        let grid = Arc::new(Mutex::new(BlockGrid::new(clock)));
        let emitted = Arc::new(AtomicUsize::new(0));
        let interval = Duration::from_millis(5);
        let mut driver = ThreadDriver::new();

        let counter = Arc::clone(&emitted);
        let handle = start_grid(&mut driver, &grid, interval, move |_: CellChange| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(100));
        driver.stop(handle);
        // Frozen clock: only the first firing emits anything.
        assert_eq!(emitted.load(Ordering::SeqCst), 18);

        let counter = Arc::clone(&emitted);
        let handle = start_grid(&mut driver, &grid, interval, move |_: CellChange| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        thread::sleep(Duration::from_millis(100));
        driver.stop(handle);
        assert_eq!(emitted.load(Ordering::SeqCst), 36);
        assert!(!grid.lock().unwrap().needs_full_repaint());
    }
}
