//! Generation-guarded step queue.

use serde::{Deserialize, Serialize};

use super::Generation;

/// Handle for a scheduled step.
///
/// Hosts that run their own timers keep the ticket and check it with
/// [`AnimationDriver::is_current`] before acting on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub generation: Generation,
    pub due_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Scheduled<S> {
    ticket: Ticket,
    step: S,
}

/// Queue of delayed steps on a logical millisecond clock.
///
/// Steps come due in order of due time, then scheduling order. Time only
/// moves forward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationDriver<S> {
    now_ms: u64,
    generation: Generation,
    queue: Vec<Scheduled<S>>,
    next_id: u64,
}

impl<S> Default for AnimationDriver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AnimationDriver<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            generation: Generation::default(),
            queue: Vec::new(),
            next_id: 0,
        }
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Queue `step` to come due `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, step: S) -> Ticket {
        let ticket = Ticket {
            id: self.next_id,
            generation: self.generation,
            due_ms: self.now_ms.saturating_add(delay_ms),
        };
        self.next_id += 1;
        self.queue.push(Scheduled { ticket, step });
        ticket
    }

    /// Whether a ticket belongs to the running game.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Start a new generation. Pending steps from the old one will be dropped.
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        tracing::debug!(generation = %self.generation, pending = self.queue.len(), "driver reset");
    }

    /// True while a step of the current generation is pending.
    ///
    /// Sessions refuse conflicting input while busy.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.queue.iter().any(|s| self.is_current(&s.ticket))
    }

    /// Pending steps of the current generation.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|s| self.is_current(&s.ticket)).count()
    }

    /// When the next current-generation step comes due.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue
            .iter()
            .filter(|s| self.is_current(&s.ticket))
            .map(|s| s.ticket.due_ms)
            .min()
    }

    /// Drop every pending step of the current generation.
    pub fn cancel_all(&mut self) {
        let generation = self.generation;
        self.queue.retain(|s| s.ticket.generation != generation);
    }

    /// Move the clock to `now_ms` and return the steps that came due, oldest
    /// first. Stale steps are discarded.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<S> {
        self.now_ms = self.now_ms.max(now_ms);

        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|s| s.ticket.due_ms <= self.now_ms);
        self.queue = waiting;

        let mut due = due;
        due.sort_by_key(|s| (s.ticket.due_ms, s.ticket.id));

        let generation = self.generation;
        due.into_iter()
            .filter_map(|s| {
                if s.ticket.generation == generation {
                    Some(s.step)
                } else {
                    tracing::debug!(
                        step = s.ticket.id,
                        stale = %s.ticket.generation,
                        current = %generation,
                        "dropping stale step"
                    );
                    None
                }
            })
            .collect()
    }

    /// Advance the clock by `delta_ms`.
    pub fn advance_by(&mut self, delta_ms: u64) -> Vec<S> {
        self.advance_to(self.now_ms.saturating_add(delta_ms))
    }

    /// Run the clock towards `target_ms` one step at a time.
    ///
    /// Returns the earliest step due by `target_ms` and moves the clock to
    /// its due time, so anything it schedules is timed from there. Once no
    /// step is due the clock settles on `target_ms` and `None` comes back.
    /// Stale steps are discarded on the way.
    pub fn pop_until(&mut self, target_ms: u64) -> Option<S> {
        loop {
            let next = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, s)| s.ticket.due_ms <= target_ms)
                .min_by_key(|(_, s)| (s.ticket.due_ms, s.ticket.id))
                .map(|(i, _)| i);

            let Some(index) = next else {
                self.now_ms = self.now_ms.max(target_ms);
                return None;
            };

            let scheduled = self.queue.swap_remove(index);
            self.now_ms = self.now_ms.max(scheduled.ticket.due_ms);
            if self.is_current(&scheduled.ticket) {
                return Some(scheduled.step);
            }
            tracing::debug!(
                step = scheduled.ticket.id,
                stale = %scheduled.ticket.generation,
                "dropping stale step"
            );
        }
    }
}
