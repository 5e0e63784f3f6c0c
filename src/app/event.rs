//! Terminal event abstraction and the frame clock.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel so the main loop stays non-blocking.
//! A [`FrameClock`] owns the simulation cadence: `Frame` events fire on
//! schedule even while input is streaming in, because a drag gesture is a
//! continuous burst of mouse events and the physics must keep stepping
//! underneath it. Dropping the receiver is the cancellation token: the
//! task's next send fails and it exits, so no frame loop outlives the UI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One display frame elapsed — advance the simulation.
    Frame,
}

/// Fixed-cadence frame schedule.
///
/// Late frames are skipped, not burst: if the loop stalls past several
/// deadlines the clock re-anchors to `now` instead of emitting a
/// catch-up flurry that would fast-forward the physics.
struct FrameClock {
    next: Instant,
    interval: Duration,
}

impl FrameClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            next: now + interval,
            interval,
        }
    }

    /// How long the event poll may block without missing the deadline.
    fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// True when a frame is due; schedules the following one.
    fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            // Stalled past at least one whole frame — drop the backlog.
            self.next = now + self.interval;
        }
        true
    }
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel, interleaving `Frame` events at
/// `frame_interval` cadence.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut clock = FrameClock::new(frame_interval, Instant::now());
        loop {
            // Block at most until the next frame deadline, so a quiet
            // terminal and one mid-drag tick at the same rate.
            let has_event = event::poll(clock.timeout(Instant::now())).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped — shell torn down
                    }
                }
            }
            if clock.due(Instant::now()) && tx.send(AppEvent::Frame).is_err() {
                break;
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_fire_on_cadence() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(16), t0);

        assert!(!clock.due(t0));
        assert!(!clock.due(t0 + Duration::from_millis(15)));
        assert!(clock.due(t0 + Duration::from_millis(16)));
        // Next deadline is one interval later, not immediately.
        assert!(!clock.due(t0 + Duration::from_millis(17)));
        assert!(clock.due(t0 + Duration::from_millis(32)));
    }

    #[test]
    fn a_stall_yields_one_frame_not_a_burst() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(16), t0);

        // The loop went away for ten frames' worth of time.
        let late = t0 + Duration::from_millis(160);
        assert!(clock.due(late));
        // The backlog is dropped: nothing more is due until a fresh
        // interval has passed.
        assert!(!clock.due(late));
        assert!(!clock.due(late + Duration::from_millis(15)));
        assert!(clock.due(late + Duration::from_millis(16)));
    }

    #[test]
    fn poll_timeout_never_overshoots_the_deadline() {
        let t0 = Instant::now();
        let clock = FrameClock::new(Duration::from_millis(16), t0);

        assert_eq!(clock.timeout(t0), Duration::from_millis(16));
        assert_eq!(
            clock.timeout(t0 + Duration::from_millis(10)),
            Duration::from_millis(6)
        );
        // Past the deadline the poll must not block at all.
        assert_eq!(clock.timeout(t0 + Duration::from_millis(30)), Duration::ZERO);
    }
}
