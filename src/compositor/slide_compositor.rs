use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::assets::bitmap::Bitmap;
use crate::compositor::cache::{AppendOutcome, LayerCache};
use crate::compositor::fetch::{FetchSink, SlideFetchRequest};
use crate::compositor::request::{
    EnqueueOutcome, Pending, ReadyTicket, RequestState, SlideReady, TimerOutcome,
};
use crate::compositor::resolution::{fit_canvas, pick_resolution};
use crate::config::CompositorOpts;
use crate::foundation::core::{Millis, PixelSize};
use crate::foundation::error::{SlideShowError, SlideShowResult};
use crate::model::layer::{
    AnimatedShapeInfo, ImageInfo, ImageKind, LayerContent, LayerEntry, LayerGroup, LayerMessage,
    ShapeContentKind,
};
use crate::model::presentation::{PresentationInfo, SlideHash, SlideInfo};
use crate::render::surface::{SlideImage, Surface};

/// Which composition stages had all the data they needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageReadiness {
    /// Background fill or bitmap was drawn (or none is needed).
    pub background: bool,
    /// Master page layers were drawn (or are hidden).
    pub master_page: bool,
    /// Draw page layers were drawn (or the slide is empty).
    pub draw_page: bool,
}

impl StageReadiness {
    /// All three stages drew.
    pub fn complete(self) -> bool {
        self.background && self.master_page && self.draw_page
    }
}

/// Assembles slide images from cached layers and schedules backend fetches for missing ones.
///
/// Each [`ReadyTicket`] handed to [`SlideCompositor::request_slide`] comes back through
/// [`SlideCompositor::take_ready`] exactly once, unless a newer navigation target supersedes it.
#[derive(Debug)]
pub struct SlideCompositor<F: FetchSink> {
    opts: CompositorOpts,
    presentation: Arc<PresentationInfo>,
    sink: F,
    cache: LayerCache,
    surface: Surface,
    resolution: PixelSize,
    state: RequestState,
    ready: Vec<SlideReady>,
    now: Millis,
}

impl<F: FetchSink> SlideCompositor<F> {
    /// Create a compositor for `presentation` shown in a viewport of `view` pixels.
    pub fn new(
        presentation: Arc<PresentationInfo>,
        view: PixelSize,
        opts: CompositorOpts,
        sink: F,
    ) -> SlideShowResult<Self> {
        let resolution = pick_resolution(&opts.resolutions, view)
            .ok_or_else(|| SlideShowError::validation("empty resolution ladder"))?;
        let canvas = fit_canvas(resolution, presentation.slide_size());
        debug!(%resolution, %canvas, "compositor canvas");
        Ok(Self {
            opts,
            presentation,
            sink,
            cache: LayerCache::default(),
            surface: Surface::new(canvas),
            resolution,
            state: RequestState::Idle,
            ready: Vec::new(),
            now: Millis::ZERO,
        })
    }

    /// Canvas size layers are rendered at.
    pub fn canvas_size(&self) -> PixelSize {
        self.surface.size()
    }

    /// Resolution ladder entry chosen for the current viewport.
    pub fn resolution(&self) -> PixelSize {
        self.resolution
    }

    /// Current slide metadata.
    pub fn presentation(&self) -> &Arc<PresentationInfo> {
        &self.presentation
    }

    /// Borrow the fetch sink.
    pub fn sink(&self) -> &F {
        &self.sink
    }

    /// Mutably borrow the fetch sink.
    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }

    /// Return `true` when no request or prefetch is outstanding.
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Cached image for slide `index`, if composited.
    pub fn slide_image(&self, index: usize) -> Option<&SlideImage> {
        let slide = self.presentation.slide(index)?;
        self.cache.slide_image(&slide.hash)
    }

    /// Number of composited slides held in the cache.
    pub fn cached_slide_count(&self) -> usize {
        self.cache.slide_image_count()
    }

    /// Backing bitmap of an animated shape, if received.
    pub fn shape_image(&self, shape: &AnimatedShapeInfo) -> Option<&Bitmap> {
        self.cache.image(shape.image_key())
    }

    /// Animated shapes on slide `index`'s draw page, in layer order.
    pub fn animated_shapes(&self, index: usize) -> Vec<AnimatedShapeInfo> {
        let Some(slide) = self.presentation.slide(index) else {
            return Vec::new();
        };
        self.cache
            .layers(LayerGroup::DrawPage, &slide.hash)
            .map(|list| {
                list.entries()
                    .iter()
                    .filter_map(|e| match e {
                        LayerEntry::Animated(shape) => Some(shape.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ask for slide `index`; `ticket` is yielded from [`Self::take_ready`] once it is cached.
    #[tracing::instrument(skip(self))]
    pub fn request_slide(&mut self, index: usize, ticket: ReadyTicket) -> SlideShowResult<()> {
        self.request(index, Some(ticket), false)
    }

    /// Best-effort fetch of slide `index` with no caller waiting on it.
    pub fn prefetch_slide(&mut self, index: usize) -> SlideShowResult<()> {
        self.request(index, None, true)
    }

    /// Drain ready notifications in completion order.
    pub fn take_ready(&mut self) -> Vec<SlideReady> {
        std::mem::take(&mut self.ready)
    }

    /// Drop every cached slide and layer, and forget outstanding requests.
    pub fn invalidate_all(&mut self) {
        for dropped in self.state.clear() {
            debug!(
                slide = %dropped.identity.hash,
                waiters = dropped.tickets.len(),
                "dropping outstanding request on invalidation"
            );
        }
        self.cache.clear();
        info!("slide cache invalidated");
    }

    /// Replace slide metadata and recompute the render resolution for a `view`-sized viewport.
    ///
    /// Caches are dropped when the canvas size or the metadata changed.
    pub fn on_update_presentation_info(
        &mut self,
        presentation: Arc<PresentationInfo>,
        view: PixelSize,
    ) -> SlideShowResult<()> {
        presentation.validate()?;
        let resolution = pick_resolution(&self.opts.resolutions, view)
            .ok_or_else(|| SlideShowError::validation("empty resolution ladder"))?;
        let canvas = fit_canvas(resolution, presentation.slide_size());
        let changed = canvas != self.surface.size() || *presentation != *self.presentation;

        self.presentation = presentation;
        self.resolution = resolution;
        if changed {
            debug!(%resolution, %canvas, "presentation info updated");
            self.surface.resize(canvas);
            self.invalidate_all();
        }
        Ok(())
    }

    /// Advance the debounce timer.
    pub fn tick(&mut self, now: Millis) -> SlideShowResult<()> {
        self.now = now;
        match self.state.poll_timer(now, self.opts.debounce_ms) {
            TimerOutcome::NotDue => Ok(()),
            TimerOutcome::Fire(pending) => self.issue(pending),
            TimerOutcome::Preempt { fire, dropped } => {
                debug!(
                    slide = %dropped.identity.hash,
                    next = %fire.identity.hash,
                    "queued request preempts stalled one"
                );
                self.issue(fire)
            }
        }
    }

    /// Store one backend layer. `image` is the decoded payload when the layer carries one.
    #[tracing::instrument(
        skip(self, msg, image),
        fields(slide = %msg.slide_hash, group = ?msg.group, index = ?msg.index)
    )]
    pub fn on_layer(&mut self, msg: &LayerMessage, image: Option<Bitmap>) -> SlideShowResult<()> {
        let presentation = Arc::clone(&self.presentation);
        let Some(slide) = presentation.slide_by_hash(&msg.slide_hash) else {
            debug!("no slide info for layer");
            return Ok(());
        };
        let content = msg.decode_content()?;

        match (msg.group, content) {
            (LayerGroup::Background, LayerContent::Bitmap(info)) => {
                if slide.background.is_none() {
                    debug!("slide declares no background; ignoring layer");
                    return Ok(());
                }
                if self.attach_image(&info, image) {
                    self.cache
                        .set_background(slide.background_key().clone(), info.checksum);
                }
            }
            (LayerGroup::MasterPage, content) => {
                if !slide.master_page_objects_visible() {
                    debug!("master page objects hidden; ignoring layer");
                    return Ok(());
                }
                let page = slide.master_page.clone();
                let entry = match content {
                    LayerContent::Bitmap(info) => {
                        if !self.attach_image(&info, image) {
                            return Ok(());
                        }
                        LayerEntry::Bitmap(info)
                    }
                    LayerContent::Placeholder(p) => LayerEntry::Placeholder { field: p.field },
                    LayerContent::Empty => {
                        self.cache.touch_layers(LayerGroup::MasterPage, page);
                        return Ok(());
                    }
                    other => return Err(unexpected_layer(msg.group, &other)),
                };
                self.append(LayerGroup::MasterPage, page, msg.index, entry);
            }
            (LayerGroup::DrawPage, content) => {
                let page = slide.hash.clone();
                let entry = match content {
                    LayerContent::Bitmap(info) => {
                        if !self.attach_image(&info, image) {
                            return Ok(());
                        }
                        LayerEntry::Bitmap(info)
                    }
                    LayerContent::Animated(shape) => {
                        match image {
                            Some(bitmap) => self.cache.insert_image(shape.image_key(), bitmap),
                            None if shape.kind == ShapeContentKind::Bitmap
                                && !self.cache.has_image(shape.image_key()) =>
                            {
                                debug!(
                                    shape = %shape.hash,
                                    "no bitmap available for animated shape"
                                );
                                return Ok(());
                            }
                            None => {}
                        }
                        LayerEntry::Animated(shape)
                    }
                    LayerContent::Empty => {
                        self.cache.touch_layers(LayerGroup::DrawPage, page);
                        return Ok(());
                    }
                    other => return Err(unexpected_layer(msg.group, &other)),
                };
                self.append(LayerGroup::DrawPage, page, msg.index, entry);
            }
            (LayerGroup::TextFields, LayerContent::TextField(field)) => {
                if self.attach_image(&field.content, image) {
                    self.cache.set_text_field(
                        slide.hash.clone(),
                        field.field,
                        field.content.checksum,
                    );
                }
            }
            (group, other) => return Err(unexpected_layer(group, &other)),
        }
        Ok(())
    }

    /// Backend signalled that every layer for `slide` has been sent.
    ///
    /// Composites the active target with whatever is cached; stages still missing are logged
    /// and left blank.
    #[tracing::instrument(skip(self))]
    pub fn on_rendering_complete(&mut self, slide: &SlideHash) -> SlideShowResult<()> {
        let Some(active) = self.state.active() else {
            debug!("rendering complete with no active request");
            return Ok(());
        };
        if &active.identity.hash != slide {
            debug!(active = %active.identity.hash, "rendering complete for inactive slide");
            return Ok(());
        }
        let identity = active.identity.clone();

        let presentation = Arc::clone(&self.presentation);
        let Some(info) = presentation.slide(identity.index) else {
            return Ok(());
        };
        let stages = self.compose(info);
        if !stages.complete() {
            warn!(?stages, "slide completed with missing layers; drawing what is available");
        }
        match self.state.complete(&identity) {
            Some(pending) => self.finish(pending, stages.complete()),
            None => Ok(()),
        }
    }

    fn request(
        &mut self,
        index: usize,
        ticket: Option<ReadyTicket>,
        prefetch: bool,
    ) -> SlideShowResult<()> {
        let presentation = Arc::clone(&self.presentation);
        let Some(slide) = presentation.slide(index) else {
            debug!(index, "no info for requested slide");
            return Ok(());
        };
        let identity = slide.identity();

        if self.cache.complete_slide_image(&identity.hash).is_some() {
            if let Some(ticket) = ticket {
                self.ready.push(SlideReady { ticket, identity });
            }
            if !prefetch {
                if let Some(dropped) = self.state.drop_queued() {
                    debug!(
                        dropped = %dropped.identity.hash,
                        waiters = dropped.tickets.len(),
                        "queued request dropped for cached slide"
                    );
                }
                self.schedule_prefetch(index)?;
            }
            return Ok(());
        }

        if self.state.attach(&identity, ticket, prefetch) {
            debug!(slide = %identity.hash, prefetch, "joined outstanding request");
            return Ok(());
        }

        let pending = Pending::new(identity, ticket, prefetch);
        if self.state.is_idle() {
            return self.start(pending);
        }

        let due = self.now.after(self.opts.debounce_ms);
        match self.state.enqueue(pending, due) {
            EnqueueOutcome::Queued => {
                debug!(index, prefetch, "request queued behind busy compositor")
            }
            EnqueueOutcome::Superseded(old) => debug!(
                index,
                superseded = %old.identity.hash,
                waiters = old.tickets.len(),
                "queued request superseded"
            ),
            EnqueueOutcome::Ignored => debug!(index, "prefetch ignored; request already queued"),
        }
        Ok(())
    }

    fn issue(&mut self, pending: Pending) -> SlideShowResult<()> {
        if self.cache.complete_slide_image(&pending.identity.hash).is_some() {
            return self.finish(pending, true);
        }
        self.start(pending)
    }

    fn start(&mut self, pending: Pending) -> SlideShowResult<()> {
        let presentation = Arc::clone(&self.presentation);
        let Some(slide) = presentation.slide(pending.identity.index) else {
            return Ok(());
        };

        let stages = self.compose(slide);
        if stages.complete() {
            debug!(slide = %slide.hash, "slide composed from cache");
            return self.finish(pending, true);
        }

        let canvas = self.surface.size();
        let req = SlideFetchRequest {
            part: slide.index,
            width: canvas.width,
            height: canvas.height,
            render_background: !stages.background,
            render_master_page: !stages.master_page,
        };
        if let Some(old) = self.state.activate(pending) {
            debug!(slide = %old.identity.hash, "replaced active request");
        }
        info!(%req, "requesting slide layers");
        self.sink.send_fetch(&req)
    }

    fn finish(&mut self, pending: Pending, complete: bool) -> SlideShowResult<()> {
        self.cache.insert_slide_image(SlideImage {
            identity: pending.identity.clone(),
            bitmap: self.surface.snapshot(),
            complete,
        });
        self.ready.extend(pending.tickets.iter().map(|&ticket| SlideReady {
            ticket,
            identity: pending.identity.clone(),
        }));
        if pending.prefetch {
            return Ok(());
        }
        self.schedule_prefetch(pending.identity.index)
    }

    fn schedule_prefetch(&mut self, index: usize) -> SlideShowResult<()> {
        if !self.opts.prefetch || self.state.queued().is_some() {
            return Ok(());
        }
        let next = index + 1;
        let Some(slide) = self.presentation.slide(next) else {
            return Ok(());
        };
        if self.cache.complete_slide_image(&slide.hash).is_some() {
            return Ok(());
        }
        self.request(next, None, true)
    }

    fn attach_image(&mut self, info: &ImageInfo, image: Option<Bitmap>) -> bool {
        match image {
            Some(bitmap) => {
                self.cache.insert_image(&info.checksum, bitmap);
                true
            }
            None if self.cache.has_image(&info.checksum) => true,
            None if info.kind == ImageKind::Zstd => true,
            None => {
                debug!(checksum = %info.checksum, "no bitmap available for layer");
                false
            }
        }
    }

    fn append(
        &mut self,
        group: LayerGroup,
        page: SlideHash,
        index: Option<usize>,
        entry: LayerEntry,
    ) {
        if let AppendOutcome::OutOfOrder { expected, got } =
            self.cache.append_layer(group, page.clone(), index, entry)
        {
            warn!(?group, %page, expected, got, "layer index out of order; missed any layers?");
        }
    }

    /// Draw Background, MasterPage and DrawPage onto the surface, in that order.
    fn compose(&mut self, slide: &SlideInfo) -> StageReadiness {
        self.surface.clear();
        let background = self.draw_background(slide);
        let master_page = self.draw_layers(slide, LayerGroup::MasterPage);
        let draw_page = self.draw_layers(slide, LayerGroup::DrawPage);
        StageReadiness {
            background,
            master_page,
            draw_page,
        }
    }

    fn draw_background(&mut self, slide: &SlideInfo) -> bool {
        let Some(bg) = &slide.background else {
            return true;
        };
        if let Some(color) = bg.fill_color {
            self.surface.fill(color);
            return true;
        }
        let Some(checksum) = self.cache.background_checksum(slide.background_key()) else {
            return false;
        };
        let Some(bitmap) = self.cache.image(checksum) else {
            debug!(slide = %slide.hash, "no cached background");
            return false;
        };
        self.surface.draw_bitmap(bitmap);
        true
    }

    fn draw_layers(&mut self, slide: &SlideInfo, group: LayerGroup) -> bool {
        let page = match group {
            LayerGroup::MasterPage if !slide.master_page_objects_visible() => return true,
            LayerGroup::MasterPage => &slide.master_page,
            LayerGroup::DrawPage if slide.empty => return true,
            LayerGroup::DrawPage => &slide.hash,
            LayerGroup::Background | LayerGroup::TextFields => return true,
        };
        let Some(list) = self.cache.layers(group, page) else {
            debug!(?group, %page, "no layers cached");
            return false;
        };
        for entry in list.entries() {
            draw_entry(&self.cache, &mut self.surface, slide, entry);
        }
        true
    }
}

fn draw_entry(cache: &LayerCache, surface: &mut Surface, slide: &SlideInfo, entry: &LayerEntry) {
    match entry {
        LayerEntry::Bitmap(info) => draw_image(cache, surface, info),
        LayerEntry::Placeholder { field } => match cache.text_field(&slide.hash, *field) {
            Some(checksum) => match cache.image(checksum) {
                Some(bitmap) => surface.draw_bitmap(bitmap),
                None => debug!(?field, "text field image missing"),
            },
            None => debug!(?field, "no content found for text field placeholder"),
        },
        LayerEntry::Animated(shape) => {
            if !shape.init_visible {
                return;
            }
            match cache.image(shape.image_key()) {
                Some(bitmap) => surface.draw_bitmap(bitmap),
                None => debug!(shape = %shape.hash, "animated shape has no bitmap"),
            }
        }
    }
}

fn draw_image(cache: &LayerCache, surface: &mut Surface, info: &ImageInfo) {
    if info.kind != ImageKind::Png {
        debug!(checksum = %info.checksum, kind = ?info.kind, "skipping undrawable image");
        return;
    }
    match cache.image(&info.checksum) {
        Some(bitmap) => surface.draw_bitmap(bitmap),
        None => debug!(checksum = %info.checksum, "no image"),
    }
}

fn unexpected_layer(group: LayerGroup, content: &LayerContent) -> SlideShowError {
    let kind = match content {
        LayerContent::Bitmap(_) => "bitmap",
        LayerContent::Placeholder(_) => "placeholder",
        LayerContent::Animated(_) => "animated",
        LayerContent::TextField(_) => "text field",
        LayerContent::Empty => "empty",
    };
    SlideShowError::protocol(format!("{kind} layer is not valid in group {group:?}"))
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/slide_compositor.rs"]
mod tests;
