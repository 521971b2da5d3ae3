pub(crate) mod effect;
pub(crate) mod layer;
pub(crate) mod presentation;
