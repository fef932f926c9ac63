//! Choreo drives a looping, multi-element motion show on one shared timeline clock.
//!
//! Rectangular panels and text overlays move, resize, rotate and recolour in a choreographed,
//! repeating sequence. The crate is organised around a few pieces:
//!
//! - A [`Timeline`] of eagerly resolved [`Tween`]s and labels, placed with [`TimeAnchor`]s
//! - A [`PanelChoreographer`] and [`TextRevealComposer`] that derive the whole show from a
//!   [`ShowConfig`] and the current [`ViewportMetrics`]
//! - A [`ShowSession`] that owns the single live timeline and rebuilds it on resize
//!
//! Hosts plug in through [`Stage`] (viewport and element lookup) and [`PropertySink`] (property
//! writes on every tick).
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod choreography;
pub(crate) mod preview;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod timeline;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8, Size, Vec2, Viewport};
pub use crate::foundation::error::{ChoreoError, ChoreoResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::property::Property;
pub use crate::animation::tween::{Channel, PropTween, Target, Tween, TweenSpec};
pub use crate::choreography::config::{IntroTiming, PacingParams, RestTextTiming, ShowConfig};
pub use crate::choreography::metrics::ViewportMetrics;
pub use crate::choreography::pacing::{FALLBACK_STEP, MIN_LEGIBLE_STEP, overruns, pace};
pub use crate::choreography::panels::{
    LabelDecl, PanelChoreographer, Phase, PhaseKind, SPLIT_LABEL, rest_label,
};
pub use crate::choreography::show::{BuiltShow, build_show};
pub use crate::choreography::text::{IntroComposer, TextPlan, TextRevealComposer};
pub use crate::preview::raster::{PreviewOpts, render_panels};
pub use crate::scene::entity::{EntityId, REST_CYCLES, TextGroupId};
pub use crate::scene::stage::{
    PropertySink, PropertyWrite, RegistrySink, Stage, StageDef, StaticStage, TargetRegistry,
    TextGroup,
};
pub use crate::scene::state::{
    FrameSnapshot, Gradient, GradientStop, PanelState, SampledFrame, TextState,
};
pub use crate::session::controller::{SessionState, ShowSession};
pub use crate::timeline::anchor::{Span, TimeAnchor};
pub use crate::timeline::schedule::{BaseValue, Schedule, ScheduledLabel};
pub use crate::timeline::timeline::{Repeat, Timeline, TimelineId};
