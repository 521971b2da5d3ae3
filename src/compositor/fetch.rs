use std::fmt;

use crate::foundation::error::SlideShowResult;

/// Outbound request asking the backend to render a slide's layers.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideFetchRequest {
    /// Slide index.
    pub part: usize,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background bitmap is missing and must be rendered.
    pub render_background: bool,
    /// Master page layers are missing and must be rendered.
    pub render_master_page: bool,
}

impl fmt::Display for SlideFetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "getslide part={} width={} height={} renderBackground={} renderMasterPage={}",
            self.part,
            self.width,
            self.height,
            u8::from(self.render_background),
            u8::from(self.render_master_page)
        )
    }
}

/// Transport seam the compositor sends fetch requests through.
pub trait FetchSink {
    /// Hand one request to the transport.
    fn send_fetch(&mut self, req: &SlideFetchRequest) -> SlideShowResult<()>;
}

/// In-memory sink for tests and offline replay.
#[derive(Debug, Default)]
pub struct InMemoryFetchSink {
    /// Requests in send order.
    pub(crate) sent: Vec<SlideFetchRequest>,
}

impl InMemoryFetchSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the requests sent so far.
    pub fn sent(&self) -> &[SlideFetchRequest] {
        &self.sent
    }

    /// Take and clear the recorded requests.
    pub fn drain(&mut self) -> Vec<SlideFetchRequest> {
        std::mem::take(&mut self.sent)
    }
}

impl FetchSink for InMemoryFetchSink {
    fn send_fetch(&mut self, req: &SlideFetchRequest) -> SlideShowResult<()> {
        self.sent.push(req.clone());
        Ok(())
    }
}

impl<S: FetchSink + ?Sized> FetchSink for Box<S> {
    fn send_fetch(&mut self, req: &SlideFetchRequest) -> SlideShowResult<()> {
        (**self).send_fetch(req)
    }
}
