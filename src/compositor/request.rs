//! Request bookkeeping: at most one active slide request or prefetch, plus one queued target
//! waiting out the debounce delay.

use crate::foundation::core::Millis;
use crate::model::presentation::SlideIdentity;

/// Caller token returned through [`SlideReady`] once the slide is available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReadyTicket(pub u64);

/// Ready notification: yielded exactly once per ticket that was not superseded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideReady {
    /// Ticket passed to `request_slide`.
    pub ticket: ReadyTicket,
    /// Slide that is now cached.
    pub identity: SlideIdentity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pending {
    pub(crate) identity: SlideIdentity,
    pub(crate) prefetch: bool,
    pub(crate) tickets: Vec<ReadyTicket>,
}

impl Pending {
    pub(crate) fn new(
        identity: SlideIdentity,
        ticket: Option<ReadyTicket>,
        prefetch: bool,
    ) -> Self {
        Self {
            identity,
            prefetch,
            tickets: ticket.into_iter().collect(),
        }
    }

    fn join(&mut self, ticket: Option<ReadyTicket>, prefetch: bool) {
        self.tickets.extend(ticket);
        if !prefetch {
            self.prefetch = false;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Queued {
    pub(crate) pending: Pending,
    pub(crate) due: Millis,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum RequestState {
    #[default]
    Idle,
    Requesting(Pending),
    Prefetching(Pending),
    Debounced {
        active: Option<Pending>,
        next: Queued,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EnqueueOutcome {
    Queued,
    /// The previously queued target was replaced; its tickets are dropped.
    Superseded(Pending),
    /// A prefetch never displaces a queued request.
    Ignored,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TimerOutcome {
    NotDue,
    Fire(Pending),
    /// The queued request replaced a stalled active one.
    Preempt { fire: Pending, dropped: Pending },
}

impl RequestState {
    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub(crate) fn active(&self) -> Option<&Pending> {
        match self {
            Self::Idle => None,
            Self::Requesting(p) | Self::Prefetching(p) => Some(p),
            Self::Debounced { active, .. } => active.as_ref(),
        }
    }

    pub(crate) fn queued(&self) -> Option<&Queued> {
        match self {
            Self::Debounced { next, .. } => Some(next),
            _ => None,
        }
    }

    /// Join an in-flight or queued request for the same slide. Returns `false` when no
    /// outstanding entry targets `identity`.
    pub(crate) fn attach(
        &mut self,
        identity: &SlideIdentity,
        ticket: Option<ReadyTicket>,
        prefetch: bool,
    ) -> bool {
        match std::mem::take(self) {
            Self::Requesting(mut p) if &p.identity == identity => {
                p.join(ticket, prefetch);
                *self = Self::Requesting(p);
                true
            }
            Self::Prefetching(mut p) if &p.identity == identity => {
                p.join(ticket, prefetch);
                *self = if p.prefetch {
                    Self::Prefetching(p)
                } else {
                    Self::Requesting(p)
                };
                true
            }
            Self::Debounced {
                mut active,
                mut next,
            } => {
                let mut attached = false;
                if let Some(a) = active.as_mut()
                    && &a.identity == identity
                {
                    a.join(ticket, prefetch);
                    attached = true;
                } else if &next.pending.identity == identity {
                    next.pending.join(ticket, prefetch);
                    attached = true;
                }
                *self = Self::Debounced { active, next };
                attached
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Queue `pending` to be issued once its debounce delay has passed.
    pub(crate) fn enqueue(&mut self, pending: Pending, due: Millis) -> EnqueueOutcome {
        match std::mem::take(self) {
            Self::Idle => {
                *self = Self::Debounced {
                    active: None,
                    next: Queued { pending, due },
                };
                EnqueueOutcome::Queued
            }
            Self::Requesting(a) | Self::Prefetching(a) => {
                *self = Self::Debounced {
                    active: Some(a),
                    next: Queued { pending, due },
                };
                EnqueueOutcome::Queued
            }
            Self::Debounced { active, next } => {
                if pending.prefetch && !next.pending.prefetch {
                    *self = Self::Debounced { active, next };
                    return EnqueueOutcome::Ignored;
                }
                *self = Self::Debounced {
                    active,
                    next: Queued { pending, due },
                };
                EnqueueOutcome::Superseded(next.pending)
            }
        }
    }

    /// Make `pending` the active entry, keeping any queued target. Returns a displaced active
    /// entry, if there was one.
    pub(crate) fn activate(&mut self, pending: Pending) -> Option<Pending> {
        let wrap = |p: Pending| {
            if p.prefetch {
                Self::Prefetching(p)
            } else {
                Self::Requesting(p)
            }
        };
        match std::mem::take(self) {
            Self::Idle => {
                *self = wrap(pending);
                None
            }
            Self::Requesting(old) | Self::Prefetching(old) => {
                *self = wrap(pending);
                Some(old)
            }
            Self::Debounced { active, next } => {
                *self = Self::Debounced {
                    active: Some(pending),
                    next,
                };
                active
            }
        }
    }

    /// Remove the active entry if it targets `identity`.
    pub(crate) fn complete(&mut self, identity: &SlideIdentity) -> Option<Pending> {
        if self.active().map(|p| &p.identity) != Some(identity) {
            return None;
        }
        match std::mem::take(self) {
            Self::Requesting(p) | Self::Prefetching(p) => Some(p),
            Self::Debounced { active, next } => {
                *self = Self::Debounced { active: None, next };
                active
            }
            Self::Idle => None,
        }
    }

    /// Forget the queued target, keeping the active entry.
    pub(crate) fn drop_queued(&mut self) -> Option<Pending> {
        match std::mem::take(self) {
            Self::Debounced { active, next } => {
                *self = match active {
                    None => Self::Idle,
                    Some(p) if p.prefetch => Self::Prefetching(p),
                    Some(p) => Self::Requesting(p),
                };
                Some(next.pending)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Advance the debounce timer to `now`.
    pub(crate) fn poll_timer(&mut self, now: Millis, debounce_ms: u64) -> TimerOutcome {
        match std::mem::take(self) {
            Self::Debounced { active, mut next } if next.due <= now => match active {
                None => TimerOutcome::Fire(next.pending),
                Some(a) if next.pending.prefetch => {
                    next.due = now.after(debounce_ms);
                    *self = Self::Debounced {
                        active: Some(a),
                        next,
                    };
                    TimerOutcome::NotDue
                }
                Some(a) => TimerOutcome::Preempt {
                    fire: next.pending,
                    dropped: a,
                },
            },
            other => {
                *self = other;
                TimerOutcome::NotDue
            }
        }
    }

    /// Drop everything outstanding.
    pub(crate) fn clear(&mut self) -> Vec<Pending> {
        match std::mem::take(self) {
            Self::Idle => Vec::new(),
            Self::Requesting(p) | Self::Prefetching(p) => vec![p],
            Self::Debounced { active, next } => {
                active.into_iter().chain(Some(next.pending)).collect()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/request.rs"]
mod tests;
