pub(crate) mod activity;
pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod engine;
pub(crate) mod property;
pub(crate) mod shape;
pub mod transitions;
pub(crate) mod value;
