//! Edge-hold navigation timer.
#![allow(dead_code)]
//!
//! While dragging a card, holding it near a page edge for a fixed delay
//! turns the page. This is the one timing-sensitive piece of navigation,
//! kept as an explicit little state machine: at most one armed deadline,
//! re-armed on zone change, always disarmed by `cancel` and by firing.
//! Callers drive it with their own clock (`Instant`s from the event loop),
//! so nothing here sleeps or spawns.
//!
//! Unlike the pager, this piece belongs to the interactive drag layer, not
//! the HTTP handlers: drag timing happens wherever the pointer events are
//! (the binder UI), which holds an `EdgeNavigator` next to its `Pager` and
//! feeds the fired zone into `next`/`prev`. The server never sees a drag
//! in flight, only the resulting card move.

use std::time::{Duration, Instant};

/// How long a dragged card must hover in an edge zone before the page turns.
pub const EDGE_HOLD_DELAY: Duration = Duration::from_millis(500);

/// Which edge the dragged card is hovering over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeZone {
    /// Left edge: turn back one page.
    Prev,
    /// Right edge: turn forward one page.
    Next,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    zone: EdgeZone,
    deadline: Instant,
}

/// Single-deadline edge-hold state machine.
#[derive(Debug, Clone)]
pub struct EdgeNavigator {
    delay: Duration,
    armed: Option<Armed>,
}

impl EdgeNavigator {
    pub fn new(delay: Duration) -> Self {
        EdgeNavigator { delay, armed: None }
    }

    /// Enters (or stays in) an edge zone at time `now`.
    ///
    /// Arming is idempotent per zone: repeated `start` calls for the zone
    /// already armed keep the original deadline, so event-loop jitter does
    /// not push the page turn out forever. Switching zones re-arms.
    pub fn start(&mut self, zone: EdgeZone, now: Instant) {
        match self.armed {
            Some(armed) if armed.zone == zone => {}
            _ => {
                self.armed = Some(Armed {
                    zone,
                    deadline: now + self.delay,
                });
            }
        }
    }

    /// Leaves the edge zone / ends the drag. Always disarms.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Checks the deadline. Fires at most once per arming: a fired timer
    /// disarms itself, so the page cannot keep turning while the card sits
    /// in the zone without a fresh `start`.
    pub fn poll(&mut self, now: Instant) -> Option<EdgeZone> {
        let armed = self.armed?;
        if now >= armed.deadline {
            self.armed = None;
            Some(armed.zone)
        } else {
            None
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Default for EdgeNavigator {
    fn default() -> Self {
        EdgeNavigator::new(EDGE_HOLD_DELAY)
    }
}
