//! Playback state machine over `(current slide, effect cursor)`.
//!
//! The navigator never shows a slide on its own: it asks the [`SlideSource`] for it and
//! commits the switch only when the matching ready notification comes back.

use tracing::{debug, info, warn};

use crate::compositor::request::ReadyTicket;
use crate::config::NavigatorOpts;
use crate::foundation::core::{Millis, Point, Size};
use crate::foundation::error::SlideShowResult;
use crate::model::presentation::ClickAction;
use crate::navigator::input::{MouseButton, NavAction, SwipeDirection, key_action, swipe_action};
use crate::navigator::sequencer::{EffectSequencer, RewindOutcome, SlideSource};

/// Where playback stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigatorState {
    /// No slide shown yet.
    NotStarted,
    /// Slide at this index is shown.
    Showing(usize),
    /// Moved one past the last slide; the host shows its end screen.
    Ended,
    /// The show was closed; every further request is ignored.
    Quit,
}

/// Pointer shape the host should display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    /// Regular pointer.
    #[default]
    Default,
    /// Hovering an interactive region.
    Pointer,
}

/// Notification for the host, drained with [`Navigator::take_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorEvent {
    /// A new slide was committed.
    SlideChanged {
        /// Slide shown before, if any.
        previous: Option<usize>,
        /// Slide shown now.
        current: usize,
    },
    /// Playback moved past the last slide.
    PresentationEnded,
    /// The show should close.
    QuitRequested,
    /// The pointer entered or left an interactive region.
    CursorChanged(CursorHint),
}

#[derive(Clone, Copy, Debug)]
struct PendingDisplay {
    index: usize,
    ticket: ReadyTicket,
    skip_transition: bool,
}

/// Routes user intent to the effect sequencer and the slide source.
#[derive(Debug)]
pub struct Navigator<S: SlideSource, E: EffectSequencer> {
    opts: NavigatorOpts,
    source: S,
    sequencer: E,
    state: NavigatorState,
    previous: Option<usize>,
    pending: Option<PendingDisplay>,
    next_ticket: u64,
    rewinding: bool,
    enabled: bool,
    view: Size,
    cursor: CursorHint,
    advance_armed: bool,
    advance_due: Option<Millis>,
    now: Millis,
    events: Vec<NavigatorEvent>,
}

impl<S: SlideSource, E: EffectSequencer> Navigator<S, E> {
    /// Navigator over `source` and `sequencer`; the view starts at the slide size.
    pub fn new(source: S, sequencer: E, opts: NavigatorOpts) -> Self {
        let view = source.presentation().slide_size();
        Self {
            opts,
            source,
            sequencer,
            state: NavigatorState::NotStarted,
            previous: None,
            pending: None,
            next_ticket: 0,
            rewinding: false,
            enabled: true,
            view,
            cursor: CursorHint::Default,
            advance_armed: false,
            advance_due: None,
            now: Millis::ZERO,
            events: Vec::new(),
        }
    }

    /// Slide provider.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable slide provider, for feeding backend data.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Effect sequencer.
    pub fn sequencer(&self) -> &E {
        &self.sequencer
    }

    /// Current state.
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    /// Index of the shown slide.
    pub fn current_slide(&self) -> Option<usize> {
        match self.state {
            NavigatorState::Showing(i) => Some(i),
            _ => None,
        }
    }

    /// Slide shown before the last commit.
    pub fn previous_slide(&self) -> Option<usize> {
        self.previous
    }

    /// Index of a requested slide that has not been committed yet.
    pub fn pending_slide(&self) -> Option<usize> {
        self.pending.map(|p| p.index)
    }

    /// Return `true` while input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accept input again.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Ignore every input except quit.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Device size clicks are reported in. Non-positive sizes are ignored.
    pub fn set_view_size(&mut self, view: Size) {
        if view.width > 0.0 && view.height > 0.0 {
            self.view = view;
        }
    }

    /// Drain pending host notifications.
    pub fn take_events(&mut self) -> Vec<NavigatorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Show slide `index` with its transition.
    pub fn start(&mut self, index: usize) -> SlideShowResult<()> {
        self.display_slide(index as isize, false)
    }

    /// Move to slide `n`.
    ///
    /// Negative targets are rejected. `n == slide_count` ends the presentation and anything
    /// further quits. Hidden slides are skipped in the direction of travel.
    pub fn display_slide(&mut self, n: isize, skip_transition: bool) -> SlideShowResult<()> {
        self.rewinding = false;
        self.go_to(n, skip_transition)?;
        Ok(())
    }

    /// Move `delta` slides from the current position.
    pub fn switch_slide(&mut self, delta: isize, skip_transition: bool) -> SlideShowResult<()> {
        self.display_slide(self.position() + delta, skip_transition)
    }

    /// Show the first slide.
    pub fn go_to_first_slide(&mut self) -> SlideShowResult<()> {
        self.display_slide(0, true)
    }

    /// Show the last slide.
    pub fn go_to_last_slide(&mut self) -> SlideShowResult<()> {
        let count = self.source.presentation().slide_count() as isize;
        self.display_slide(count - 1, true)
    }

    /// Show the next slide with its transition.
    pub fn go_to_next_slide(&mut self) -> SlideShowResult<()> {
        self.switch_slide(1, false)
    }

    /// Show the previous slide.
    pub fn go_to_previous_slide(&mut self) -> SlideShowResult<()> {
        self.switch_slide(-1, true)
    }

    /// Show the first slide named `name`.
    pub fn go_to_bookmark(&mut self, name: &str) -> SlideShowResult<()> {
        match self.source.presentation().find_bookmark(name) {
            Some(index) => self.display_slide(index as isize, true),
            None => {
                warn!(bookmark = name, "no slide with this name");
                Ok(())
            }
        }
    }

    /// Play the next effect, or advance when none is left.
    pub fn dispatch_effect(&mut self) -> SlideShowResult<()> {
        match self.state {
            NavigatorState::Showing(_) => {
                if !self.sequencer.next_effect()? {
                    self.switch_slide(1, false)?;
                }
            }
            NavigatorState::Ended => self.switch_slide(1, false)?,
            NavigatorState::NotStarted | NavigatorState::Quit => {}
        }
        Ok(())
    }

    /// Jump the playing or next effect to its end state, or advance when none is left.
    pub fn skip_effect(&mut self) -> SlideShowResult<()> {
        match self.state {
            NavigatorState::Showing(_) => {
                if !self.sequencer.skip_playing_or_next_effect()? {
                    self.switch_slide(1, true)?;
                }
            }
            NavigatorState::Ended => self.switch_slide(1, true)?,
            NavigatorState::NotStarted | NavigatorState::Quit => {}
        }
        Ok(())
    }

    /// Settle every effect of the slide, or advance when none is left.
    pub fn skip_all_effects(&mut self) -> SlideShowResult<()> {
        match self.state {
            NavigatorState::Showing(_) => {
                if !self.sequencer.skip_all_effects()? {
                    self.switch_slide(1, true)?;
                }
            }
            NavigatorState::Ended => self.switch_slide(1, true)?,
            NavigatorState::NotStarted | NavigatorState::Quit => {}
        }
        Ok(())
    }

    /// Undo the last effect; with nothing to undo, show the previous slide settled.
    pub fn rewind_effect(&mut self) -> SlideShowResult<()> {
        match self.state {
            NavigatorState::Ended => self.rewind_from_end(),
            NavigatorState::Showing(_) => {
                self.cancel_auto_advance();
                if self.sequencer.rewind_effect()? == RewindOutcome::ToPreviousSlide {
                    self.rewind_to_previous_slide()?;
                }
                Ok(())
            }
            NavigatorState::NotStarted | NavigatorState::Quit => Ok(()),
        }
    }

    /// Undo every effect of the slide; with nothing to undo, show the previous slide settled.
    pub fn rewind_all_effects(&mut self) -> SlideShowResult<()> {
        match self.state {
            NavigatorState::Ended => self.rewind_from_end(),
            NavigatorState::Showing(_) => {
                self.cancel_auto_advance();
                if self.sequencer.rewind_all_effects()? == RewindOutcome::ToPreviousSlide {
                    self.rewind_to_previous_slide()?;
                }
                Ok(())
            }
            NavigatorState::NotStarted | NavigatorState::Quit => Ok(()),
        }
    }

    /// End the show.
    pub fn quit(&mut self) {
        if self.state == NavigatorState::Quit {
            return;
        }
        info!("presentation quit");
        self.state = NavigatorState::Quit;
        self.pending = None;
        self.cancel_auto_advance();
        self.events.push(NavigatorEvent::QuitRequested);
    }

    /// Run the action bound to a key code. Returns `true` when the key was handled.
    pub fn on_key_down(&mut self, code: &str) -> SlideShowResult<bool> {
        match key_action(code) {
            Some(action) => self.perform(action),
            None => Ok(false),
        }
    }

    /// Run the action bound to a swipe. Returns `true` when it was handled.
    pub fn on_swipe(&mut self, direction: SwipeDirection) -> SlideShowResult<bool> {
        self.perform(swipe_action(direction))
    }

    /// Run `action` unless input is disabled. Quit always runs.
    pub fn perform(&mut self, action: NavAction) -> SlideShowResult<bool> {
        if !self.enabled && action != NavAction::Quit {
            debug!(?action, "input ignored while disabled");
            return Ok(false);
        }
        match action {
            NavAction::DispatchEffect => self.dispatch_effect()?,
            NavAction::SkipEffect => self.skip_effect()?,
            NavAction::SkipAllEffects => self.skip_all_effects()?,
            NavAction::RewindEffect => self.rewind_effect()?,
            NavAction::RewindAllEffects => self.rewind_all_effects()?,
            NavAction::FirstSlide => self.go_to_first_slide()?,
            NavAction::LastSlide => self.go_to_last_slide()?,
            NavAction::Quit => self.quit(),
        }
        Ok(true)
    }

    /// Handle a click at `point`, in view coordinates.
    ///
    /// The secondary button goes back one slide. Otherwise the first interactive region
    /// containing the point runs its action, and a click outside every region plays the next
    /// effect.
    pub fn on_click(&mut self, point: Point, button: MouseButton) -> SlideShowResult<()> {
        if !self.enabled {
            return Ok(());
        }
        if button == MouseButton::Secondary {
            return self.switch_slide(-1, true);
        }
        match self.hit_test(point) {
            Some(action) => self.run_click_action(action),
            None => self.dispatch_effect(),
        }
    }

    /// Report whether `point` hovers an interactive region.
    pub fn on_mouse_move(&mut self, point: Point) -> CursorHint {
        let hint = if self.hit_test(point).is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        };
        if hint != self.cursor {
            self.cursor = hint;
            self.events.push(NavigatorEvent::CursorChanged(hint));
        }
        hint
    }

    /// Advance animations and auto-advance timers to `now`, then commit ready slides.
    pub fn tick(&mut self, now: Millis) -> SlideShowResult<()> {
        self.now = now;
        self.sequencer.tick(now)?;
        self.poll_ready()?;
        self.update_auto_advance()
    }

    /// Commit the pending slide if the source reported it ready.
    pub fn poll_ready(&mut self) -> SlideShowResult<()> {
        for ready in self.source.take_ready() {
            match self.pending {
                Some(pending) if pending.ticket == ready.ticket => {
                    self.pending = None;
                    self.commit(pending)?;
                }
                _ => debug!(
                    ticket = ready.ticket.0,
                    slide = %ready.identity.hash,
                    "stale ready notification"
                ),
            }
        }
        Ok(())
    }

    fn position(&self) -> isize {
        match self.state {
            NavigatorState::NotStarted => -1,
            NavigatorState::Showing(i) => i as isize,
            NavigatorState::Ended | NavigatorState::Quit => {
                self.source.presentation().slide_count() as isize
            }
        }
    }

    /// Resolve `n` and request it. Returns `true` when a slide was requested.
    #[tracing::instrument(skip(self))]
    fn go_to(&mut self, n: isize, skip_transition: bool) -> SlideShowResult<bool> {
        if self.state == NavigatorState::Quit {
            return Ok(false);
        }
        let count = self.source.presentation().slide_count() as isize;
        let direction = (n - self.position()).signum();
        let mut n = n;
        loop {
            if n < 0 {
                warn!(slide = n, "rejected slide index");
                return Ok(false);
            }
            if n == count {
                self.end_presentation();
                return Ok(false);
            }
            if n > count {
                self.quit();
                return Ok(false);
            }
            match self.source.presentation().slide(n as usize) {
                Some(slide) if !slide.hidden => break,
                Some(_) => debug!(slide = n, "skipping hidden slide"),
                None => warn!(slide = n, "slide metadata is missing"),
            }
            if direction == 0 {
                warn!(slide = n, "slide is unavailable");
                return Ok(false);
            }
            n += direction;
        }

        let index = n as usize;
        let ticket = ReadyTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(PendingDisplay {
            index,
            ticket,
            skip_transition,
        });
        self.advance_due = None;
        debug!(slide = index, "slide requested");
        self.source.request_slide(index, ticket)?;
        self.poll_ready()?;
        Ok(true)
    }

    fn commit(&mut self, pending: PendingDisplay) -> SlideShowResult<()> {
        let previous = self.current_slide();
        let Some(slide) = self.source.presentation().slide(pending.index) else {
            warn!(slide = pending.index, "slide metadata is missing");
            return Ok(());
        };
        let shapes = self.source.animated_shapes(pending.index);
        let size = self.source.presentation().slide_size();
        self.sequencer
            .start_slide(slide, &shapes, size, !pending.skip_transition)?;

        self.previous = previous;
        self.state = NavigatorState::Showing(pending.index);
        self.advance_armed = false;
        self.advance_due = None;
        if previous != Some(pending.index) {
            info!(slide = pending.index, ?previous, "slide changed");
            self.events.push(NavigatorEvent::SlideChanged {
                previous,
                current: pending.index,
            });
        }
        if std::mem::take(&mut self.rewinding) {
            self.sequencer.skip_all_effects()?;
        }
        Ok(())
    }

    fn end_presentation(&mut self) {
        if self.state == NavigatorState::Ended {
            return;
        }
        info!("presentation ended");
        self.previous = self.current_slide();
        self.state = NavigatorState::Ended;
        self.pending = None;
        self.cancel_auto_advance();
        self.events.push(NavigatorEvent::PresentationEnded);
    }

    fn rewind_from_end(&mut self) -> SlideShowResult<()> {
        let count = self.source.presentation().slide_count() as isize;
        self.rewinding = true;
        if !self.go_to(count - 1, true)? {
            self.rewinding = false;
        }
        Ok(())
    }

    fn rewind_to_previous_slide(&mut self) -> SlideShowResult<()> {
        let Some(current) = self.current_slide() else {
            return Ok(());
        };
        if current == 0 {
            debug!("already at the first slide");
            return Ok(());
        }
        self.rewinding = true;
        if !self.go_to(current as isize - 1, true)? {
            self.rewinding = false;
        }
        Ok(())
    }

    fn cancel_auto_advance(&mut self) {
        self.advance_armed = false;
        self.advance_due = None;
    }

    fn update_auto_advance(&mut self) -> SlideShowResult<()> {
        let NavigatorState::Showing(index) = self.state else {
            return Ok(());
        };
        if !self.opts.auto_advance || self.pending.is_some() {
            return Ok(());
        }
        if !self.advance_armed && self.sequencer.effects_done() {
            self.advance_armed = true;
            let duration = self
                .source
                .presentation()
                .slide(index)
                .and_then(|s| s.next_slide_duration)
                .filter(|ms| *ms > 0);
            if let Some(ms) = duration {
                self.advance_due = Some(self.now.after(ms));
                debug!(slide = index, ms, "auto-advance scheduled");
            }
        }
        if let Some(due) = self.advance_due
            && self.now >= due
        {
            self.advance_due = None;
            info!(slide = index, "auto-advancing");
            self.switch_slide(1, false)?;
        }
        Ok(())
    }

    fn hit_test(&self, point: Point) -> Option<ClickAction> {
        let NavigatorState::Showing(index) = self.state else {
            return None;
        };
        let info = self.source.presentation();
        let slide = info.slide(index)?;
        let size = info.slide_size();
        let p = Point::new(
            point.x * size.width / self.view.width,
            point.y * size.height / self.view.height,
        );
        slide
            .interactions
            .iter()
            .find(|i| i.bounds.contains(p))
            .map(|i| i.action.clone())
    }

    fn run_click_action(&mut self, action: ClickAction) -> SlideShowResult<()> {
        debug!(?action, "click action");
        match action {
            ClickAction::PrevPage => self.go_to_previous_slide(),
            ClickAction::NextPage => self.go_to_next_slide(),
            ClickAction::FirstPage => self.go_to_first_slide(),
            ClickAction::LastPage => self.go_to_last_slide(),
            ClickAction::Bookmark(name) => self.go_to_bookmark(&name),
            ClickAction::StopPresentation => {
                self.quit();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigator/playback.rs"]
mod tests;
