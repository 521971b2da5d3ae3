pub(crate) mod input;
pub(crate) mod playback;
pub(crate) mod sequencer;
