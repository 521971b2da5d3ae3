//! Seams between the navigator and its two collaborators.

use crate::compositor::fetch::FetchSink;
use crate::compositor::request::{ReadyTicket, SlideReady};
use crate::compositor::slide_compositor::SlideCompositor;
use crate::foundation::core::{Millis, Size};
use crate::foundation::error::SlideShowResult;
use crate::model::layer::AnimatedShapeInfo;
use crate::model::presentation::{PresentationInfo, SlideInfo};

/// Result of asking the sequencer to rewind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewindOutcome {
    /// Something on the current slide was rewound.
    Rewound,
    /// Nothing has played on this slide; the previous slide should be shown instead.
    ToPreviousSlide,
}

/// Plays the main effect sequence of the current slide.
pub trait EffectSequencer {
    /// Load `slide` and its animated shapes. When `play_transition` is set the slide's
    /// transition runs before any automatic effect.
    fn start_slide(
        &mut self,
        slide: &SlideInfo,
        shapes: &[AnimatedShapeInfo],
        slide_size: Size,
        play_transition: bool,
    ) -> SlideShowResult<()>;

    /// Skip whatever plays, or start the next effect. `false` when nothing was left to do.
    fn next_effect(&mut self) -> SlideShowResult<bool>;

    /// Skip whatever plays, or jump the next effect to its end state. `false` when nothing
    /// was left to do.
    fn skip_playing_or_next_effect(&mut self) -> SlideShowResult<bool>;

    /// Settle every remaining effect. `false` when nothing was left to do.
    fn skip_all_effects(&mut self) -> SlideShowResult<bool>;

    /// Undo the last started effect.
    fn rewind_effect(&mut self) -> SlideShowResult<RewindOutcome>;

    /// Undo every started effect.
    fn rewind_all_effects(&mut self) -> SlideShowResult<RewindOutcome>;

    /// Return `true` while a slide transition runs.
    fn is_transition_playing(&self) -> bool;

    /// Return `true` once the transition and every effect have finished.
    fn effects_done(&self) -> bool;

    /// Advance timers and running animations to `now`.
    fn tick(&mut self, now: Millis) -> SlideShowResult<()>;
}

/// Materializes slides for the navigator.
pub trait SlideSource {
    /// Deck metadata.
    fn presentation(&self) -> &PresentationInfo;

    /// Ask for slide `index`; a [`SlideReady`] carrying `ticket` follows once it is composed.
    fn request_slide(&mut self, index: usize, ticket: ReadyTicket) -> SlideShowResult<()>;

    /// Drain slides that became ready.
    fn take_ready(&mut self) -> Vec<SlideReady>;

    /// Animated shapes of slide `index`, known once it is composed.
    fn animated_shapes(&self, index: usize) -> Vec<AnimatedShapeInfo>;
}

impl<F: FetchSink> SlideSource for SlideCompositor<F> {
    fn presentation(&self) -> &PresentationInfo {
        SlideCompositor::presentation(self)
    }

    fn request_slide(&mut self, index: usize, ticket: ReadyTicket) -> SlideShowResult<()> {
        SlideCompositor::request_slide(self, index, ticket)
    }

    fn take_ready(&mut self) -> Vec<SlideReady> {
        SlideCompositor::take_ready(self)
    }

    fn animated_shapes(&self, index: usize) -> Vec<AnimatedShapeInfo> {
        SlideCompositor::animated_shapes(self, index)
    }
}
