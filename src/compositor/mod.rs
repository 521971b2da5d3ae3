pub(crate) mod cache;
pub(crate) mod fetch;
pub(crate) mod request;
pub(crate) mod resolution;
pub(crate) mod slide_compositor;
