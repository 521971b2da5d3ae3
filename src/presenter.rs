//! Facade wiring the compositor, the animation engine and the navigator together.

use std::sync::Arc;

use crate::animation::engine::AnimationEngine;
use crate::assets::bitmap::Bitmap;
use crate::compositor::fetch::FetchSink;
use crate::compositor::slide_compositor::SlideCompositor;
use crate::config::SlideShowOpts;
use crate::foundation::core::{Millis, PixelSize, Size};
use crate::foundation::error::SlideShowResult;
use crate::model::layer::LayerMessage;
use crate::model::presentation::{PresentationInfo, SlideHash};
use crate::navigator::playback::{Navigator, NavigatorEvent};
use crate::render::surface::SlideImage;

/// Everything a slideshow host talks to.
///
/// Backend data goes in through [`Presenter::on_layer`] and
/// [`Presenter::on_rendering_complete`]; user input goes to [`Presenter::navigator_mut`];
/// the host calls [`Presenter::tick`] once per frame.
#[derive(Debug)]
pub struct Presenter<F: FetchSink> {
    navigator: Navigator<SlideCompositor<F>, AnimationEngine>,
}

impl<F: FetchSink> Presenter<F> {
    /// Build a presenter for `presentation` shown in a `view`-sized viewport.
    pub fn new(
        presentation: PresentationInfo,
        view: PixelSize,
        opts: SlideShowOpts,
        sink: F,
    ) -> SlideShowResult<Self> {
        opts.validate()?;
        presentation.validate()?;
        let compositor = SlideCompositor::new(Arc::new(presentation), view, opts.compositor, sink)?;
        let engine = AnimationEngine::new(opts.engine);
        let mut navigator = Navigator::new(compositor, engine, opts.navigator);
        navigator.set_view_size(view_size(view));
        Ok(Self { navigator })
    }

    /// Navigation entry points.
    pub fn navigator(&self) -> &Navigator<SlideCompositor<F>, AnimationEngine> {
        &self.navigator
    }

    /// Mutable navigation entry points.
    pub fn navigator_mut(&mut self) -> &mut Navigator<SlideCompositor<F>, AnimationEngine> {
        &mut self.navigator
    }

    /// The layer compositor.
    pub fn compositor(&self) -> &SlideCompositor<F> {
        self.navigator.source()
    }

    /// The animation engine.
    pub fn engine(&self) -> &AnimationEngine {
        self.navigator.sequencer()
    }

    /// Show slide `index`.
    pub fn start(&mut self, index: usize) -> SlideShowResult<()> {
        self.navigator.start(index)
    }

    /// Advance the debounce timer, animations and auto-advance to `now`.
    pub fn tick(&mut self, now: Millis) -> SlideShowResult<()> {
        self.navigator.source_mut().tick(now)?;
        self.navigator.tick(now)
    }

    /// Forward a backend layer to the compositor.
    pub fn on_layer(&mut self, msg: &LayerMessage, image: Option<Bitmap>) -> SlideShowResult<()> {
        self.navigator.source_mut().on_layer(msg, image)?;
        self.navigator.poll_ready()
    }

    /// Forward the backend's end-of-slide marker to the compositor.
    pub fn on_rendering_complete(&mut self, slide: &SlideHash) -> SlideShowResult<()> {
        self.navigator.source_mut().on_rendering_complete(slide)?;
        self.navigator.poll_ready()
    }

    /// Replace slide metadata and resize for a `view`-sized viewport.
    pub fn on_update_presentation_info(
        &mut self,
        presentation: PresentationInfo,
        view: PixelSize,
    ) -> SlideShowResult<()> {
        self.navigator
            .source_mut()
            .on_update_presentation_info(Arc::new(presentation), view)?;
        self.navigator.set_view_size(view_size(view));
        Ok(())
    }

    /// Composited image of the shown slide, if it is cached.
    pub fn current_image(&self) -> Option<&SlideImage> {
        let index = self.navigator.current_slide()?;
        self.compositor().slide_image(index)
    }

    /// Drain navigator notifications.
    pub fn take_events(&mut self) -> Vec<NavigatorEvent> {
        self.navigator.take_events()
    }
}

fn view_size(view: PixelSize) -> Size {
    Size::new(f64::from(view.width), f64::from(view.height))
}
