//! Playback core of a browser-style presentation viewer.
//!
//! The crate owns three cooperating pieces, all driven by explicit host time:
//!
//! - A [`SlideCompositor`] that stacks backend-rendered layers into cached slide images and
//!   schedules debounced fetches and one-ahead prefetches
//! - An [`AnimationEngine`] playing each slide's transition and main effect sequence
//! - A [`Navigator`] mapping clicks, keys and swipes to slide and effect navigation
//!
//! [`Presenter`] wires them together for hosts that do not need to swap a collaborator.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
/// Runtime options.
pub mod config;
pub(crate) mod compositor;
pub(crate) mod model;
pub(crate) mod navigator;
/// Facade over compositor, engine and navigator.
pub mod presenter;
pub(crate) mod render;

pub use crate::foundation::color::{ClockDirection, ColorSpace, HslColor, RgbColor};
pub use crate::foundation::core::{
    Affine, BezPath, Millis, PixelSize, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{SlideShowError, SlideShowResult};
pub use crate::foundation::queue::{PriorityEntry, PriorityQueue};

pub use crate::animation::activity::{Activity, ActivityState};
pub use crate::animation::anim::{
    Animation, PropertyAnimation, TransitionFilterAnimation, TupleAnimation,
};
pub use crate::animation::ease::Ease;
pub use crate::animation::engine::AnimationEngine;
pub use crate::animation::property::{Modifier, PropertyDescriptor, property};
pub use crate::animation::shape::{AnimatedShape, SLIDE_SHAPE_ID, ShapeState};
pub use crate::animation::transitions::clip::clip_contains;
pub use crate::animation::transitions::table::{
    ReverseMethod, TransitionClass, TransitionInfo, transition_info,
};
pub use crate::animation::value::{PropertyValue, Tuple, ValueType};
pub use crate::assets::bitmap::Bitmap;
pub use crate::assets::decode::{decode_png, rasterize_svg};
pub use crate::compositor::fetch::{FetchSink, InMemoryFetchSink, SlideFetchRequest};
pub use crate::compositor::request::{ReadyTicket, SlideReady};
pub use crate::compositor::slide_compositor::{SlideCompositor, StageReadiness};
pub use crate::config::{CompositorOpts, EngineOpts, NavigatorOpts, SlideShowOpts};
pub use crate::model::effect::{
    AnimationKind, AnimationSpec, EffectSpec, EffectTrigger, SlideTransition,
    TransitionFilterInfo, TransitionMode, TransitionSubType, TransitionType,
};
pub use crate::model::layer::{
    AnimatedShapeInfo, ImageInfo, ImageKind, LayerContent, LayerEntry, LayerGroup, LayerKind,
    LayerMessage, PlaceholderInfo, ShapeContentKind, TextFieldInfo, TextFieldType,
};
pub use crate::model::presentation::{
    BackgroundInfo, Bounds, ClickAction, Interaction, PresentationInfo, SlideHash, SlideIdentity,
    SlideInfo,
};
pub use crate::navigator::input::{MouseButton, NavAction, SwipeDirection, key_action, swipe_action};
pub use crate::navigator::playback::{CursorHint, Navigator, NavigatorEvent, NavigatorState};
pub use crate::navigator::sequencer::{EffectSequencer, RewindOutcome, SlideSource};
pub use crate::presenter::Presenter;
pub use crate::render::surface::SlideImage;
