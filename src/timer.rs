use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Countdown owned by a quiz session. It holds no thread and reads no time:
/// each call to `tick` accounts for exactly one elapsed second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    total: u64,
    remaining: u64,
    expired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// One second elapsed; carries the seconds left.
    Tick(u64),
    /// The countdown just reached zero. Reported once.
    Expired,
    /// The countdown already expired earlier.
    Stopped,
}

impl SessionClock {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total: total_secs,
            remaining: total_secs,
            expired: false,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn tick(&mut self) -> ClockEvent {
        if self.expired {
            return ClockEvent::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            ClockEvent::Expired
        } else {
            ClockEvent::Tick(self.remaining)
        }
    }
}

/// `mm:ss`, minutes keep counting past 59.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
}

const TICK: Duration = Duration::from_secs(1);
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Background thread emitting one `TimerEvent::Tick` per second.
///
/// Deadlines advance by a fixed second from the previous deadline, so a slow
/// receiver never makes the clock drift. Stopping (or dropping) the ticker
/// joins the thread; the thread also ends on its own once the receiver is gone.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn() -> (Ticker, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut deadline = Instant::now() + TICK;
            loop {
                loop {
                    if flag.load(Ordering::Relaxed) {
                        return;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    thread::sleep((deadline - now).min(POLL_SLICE));
                }
                if tx.send(TimerEvent::Tick).is_err() {
                    return;
                }
                deadline += TICK;
            }
        });

        (
            Ticker {
                stop,
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("timer thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_clock_expires_on_first_tick() {
        let mut clock = SessionClock::new(0);
        assert_eq!(clock.tick(), ClockEvent::Expired);
        assert_eq!(clock.tick(), ClockEvent::Stopped);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
    }
}
