//! Timer-Based Decorators
//!
//! `delay` and `throttle` defer or rate-limit a function on the tokio runtime the
//! caller is already running on. Neither decorator spins up a runtime of its own;
//! using them outside one is reported as [`FpError::NoRuntime`].
//!
//! Key behaviour:
//! - `delay` never runs the function synchronously, and never before `wait` elapsed
//! - delays fire in deadline order; equal deadlines fire in the order they were armed
//! - `throttle` re-opens its window from a repeating check, not a one-shot timer
//! - `throttle` replays the arguments it was built with on every successful call
//! - durations too large for the timer behave as "never"

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};

use crate::error::{FpError, FpResult};

/// Stand-in deadline for waits that overflow `Instant`, matching tokio's own cap.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Timer configuration shared by the timing decorators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Period of the throttle re-arm check; also the amount of elapsed time it credits
    pub tick: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(25),
        }
    }
}

impl TimerConfig {
    /// Smallest tick accepted; shorter ticks are raised to this value.
    pub const MIN_TICK: Duration = Duration::from_millis(1);

    /// Returns a copy of this configuration using `tick` as the check period.
    ///
    /// # Examples
    ///
    /// ```
    /// let cfg = TimerConfig::default().with_tick(Duration::from_millis(10));
    /// assert_eq!(cfg.tick, Duration::from_millis(10));
    /// ```
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    fn effective_tick(&self) -> Duration {
        self.tick.max(Self::MIN_TICK)
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn deadline_after(wait: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(wait).unwrap_or_else(|| now + FAR_FUTURE)
}

type PendingDelays = BTreeMap<(Instant, u64), watch::Receiver<()>>;

/// Armed delays that have not fired yet, keyed by deadline then arming order.
static PENDING: Mutex<PendingDelays> = Mutex::new(BTreeMap::new());
static NEXT_TICKET: AtomicU64 = AtomicU64::new(0);

fn pending() -> MutexGuard<'static, PendingDelays> {
    PENDING.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A delay's place in the firing order.
///
/// Dropping the ticket (after firing, or when the task is aborted) releases every
/// delay queued behind it.
struct Ticket {
    key: (Instant, u64),
    _done: watch::Sender<()>,
}

impl Ticket {
    fn issue(deadline: Instant) -> Self {
        let key = (deadline, NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        let (done, receiver) = watch::channel(());
        pending().insert(key, receiver);
        Ticket { key, _done: done }
    }

    /// Waits until every delay ordered before this one has fired or been cancelled.
    async fn wait_turn(&self) {
        loop {
            let ahead = pending()
                .range(..self.key)
                .next_back()
                .map(|(_, receiver)| receiver.clone());

            match ahead {
                // Err once the sender is gone, which is the signal we wait for
                Some(mut receiver) => {
                    let _ = receiver.changed().await;
                }
                None => return,
            }
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        pending().remove(&self.key);
    }
}

/// Schedules `func(args)` to run once, no earlier than `wait` from now.
///
/// The call returns immediately; the invocation happens on the current tokio runtime.
/// The returned handle can be awaited for the result or aborted to cancel.
///
/// Delays fire in deadline order, and delays sharing a deadline fire in the order
/// they were armed, on both the current-thread and the multi-thread runtime. The
/// order is kept process-wide, so a delay waits for every earlier-due delay to run
/// or be cancelled first. A `wait` beyond the timer's range never fires.
///
/// # Errors
///
/// Returns [`FpError::NoRuntime`] when called outside a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// let handle = delay(|(a, b): (&str, &str)| format!("{a}{b}"), Duration::from_millis(500), ("a", "b"))?;
/// assert_eq!(handle.await?, "ab");
/// ```
pub fn delay<A, R, F>(func: F, wait: Duration, args: A) -> FpResult<JoinHandle<R>>
where
    F: FnOnce(A) -> R + Send + 'static,
    A: Send + 'static,
    R: Send + 'static,
{
    let handle = Handle::try_current()?;
    let deadline = deadline_after(wait);
    let ticket = Ticket::issue(deadline);
    log::debug!("delay: scheduled invocation in {:?}", wait);

    Ok(handle.spawn(async move {
        sleep_until(deadline).await;
        ticket.wait_turn().await;
        log::debug!("delay: firing after {:?}", wait);
        let result = func(args);
        drop(ticket);
        result
    }))
}

/// A rate-limited function: at most one invocation per `wait` window.
///
/// Created by [`throttle`] or [`throttle_with`]. The background re-arm check is
/// aborted when the value is dropped.
pub struct Throttle<A, F> {
    func: F,
    args: A,
    wait_ms: u64,
    elapsed_ms: Arc<AtomicU64>,
    rearm: JoinHandle<()>,
}

impl<A, F> Throttle<A, F> {
    /// Returns `true` if the next call would invoke the wrapped function.
    pub fn is_open(&self) -> bool {
        self.elapsed_ms.load(Ordering::Acquire) >= self.wait_ms
    }

    /// Invokes the wrapped function if the window is open, then closes the window.
    ///
    /// Returns `None` without invoking anything while the window is closed. The
    /// arguments bound at construction are used for every invocation.
    pub fn call<R>(&mut self) -> Option<R>
    where
        F: FnMut(A) -> R,
        A: Clone,
    {
        if !self.is_open() {
            log::trace!("throttle: window closed, call suppressed");
            return None;
        }

        self.elapsed_ms.store(0, Ordering::Release);
        Some((self.func)(self.args.clone()))
    }
}

impl<A, F> Drop for Throttle<A, F> {
    fn drop(&mut self) {
        self.rearm.abort();
    }
}

impl<A: fmt::Debug, F> fmt::Debug for Throttle<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("args", &self.args)
            .field("wait_ms", &self.wait_ms)
            .field("elapsed_ms", &self.elapsed_ms.load(Ordering::Relaxed))
            .finish()
    }
}

/// Throttles `func` to one invocation per `wait`, replaying `args` on every call.
///
/// Uses the default [`TimerConfig`] (25ms re-arm tick).
///
/// # Errors
///
/// Returns [`FpError::NoRuntime`] when called outside a tokio runtime.
pub fn throttle<A, R, F>(func: F, wait: Duration, args: A) -> FpResult<Throttle<A, F>>
where
    F: FnMut(A) -> R,
    A: Clone,
{
    throttle_with(func, wait, args, TimerConfig::default())
}

/// [`throttle`] with an explicit timer configuration.
///
/// The window starts open. After a successful call a repeating check credits one
/// `config.tick` of elapsed time per period until `wait` is reached, at which point
/// the next call goes through again. A tick beyond the timer's range never credits,
/// so the window stays closed after the first call.
pub fn throttle_with<A, R, F>(
    func: F,
    wait: Duration,
    args: A,
    config: TimerConfig,
) -> FpResult<Throttle<A, F>>
where
    F: FnMut(A) -> R,
    A: Clone,
{
    let handle = Handle::try_current()?;
    let tick = config.effective_tick();
    let tick_ms = as_millis(tick);
    let wait_ms = as_millis(wait);
    let elapsed_ms = Arc::new(AtomicU64::new(wait_ms));

    let counter = Arc::clone(&elapsed_ms);
    let rearm = handle.spawn(async move {
        loop {
            sleep(tick).await;
            let advanced = counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < wait_ms).then(|| current.saturating_add(tick_ms))
            });
            if let Ok(previous) = advanced {
                if previous.saturating_add(tick_ms) >= wait_ms {
                    log::debug!("throttle: window re-opened after {}ms", wait_ms);
                }
            }
        }
    });

    Ok(Throttle {
        func,
        args,
        wait_ms,
        elapsed_ms,
        rearm,
    })
}
