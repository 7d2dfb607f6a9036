//! duo-slider is a dual-thumb range slider: two draggable thumbs select a
//! `[min, max]` sub-interval of a numeric domain.
//!
//! # Overview
//!
//! The crate is headless. It owns the values, the pointer and keyboard state
//! machines and the accessibility semantics, and draws through a host-supplied
//! [`SliderSurface`]. [`HeadlessSurface`] keeps everything in memory and is
//! what tests and server-side hosts use.
//!
//! ```
//! use duo_slider::{
//!     HeadlessSurface, PointerEvent, PointerId, PointerPosition, PointerTarget, SliderConfig,
//!     Thumb, TrackBounds,
//! };
//!
//! let surface = HeadlessSurface::new(TrackBounds::new(0.0, 0.0, 400.0, 24.0));
//! let config = SliderConfig::default()
//!     .max(1000.0)
//!     .step(10.0)
//!     .min_value(200.0)
//!     .max_value(800.0)
//!     .label_prefix("$");
//! let mut slider = duo_slider::create(surface, config)?;
//! slider.on_change(|range| println!("{} - {}", range.min, range.max));
//!
//! let mouse = PointerId(0);
//! let at = |x| PointerPosition::new(x, 12.0);
//! slider.handle_pointer(PointerEvent::pressed(mouse, at(80.0), PointerTarget::Thumb(Thumb::Min)));
//! slider.handle_pointer(PointerEvent::moved(mouse, at(120.0)));
//! slider.handle_pointer(PointerEvent::released(mouse, at(120.0)));
//!
//! assert_eq!(slider.values().min, 300.0);
//! assert_eq!(slider.visuals().thumb(Thumb::Min).label, "$300");
//! # Ok::<(), duo_slider::ConfigError>(())
//! ```
//!
//! # Auto-discovery
//!
//! Hosts with attribute-carrying containers can build sliders in bulk with
//! [`AutoDiscovery`]; see the [`discovery`] module.

pub mod accessibility;
pub mod callback;
pub mod config;
pub mod discovery;
pub mod error;
pub mod headless;
pub mod interaction;
pub mod mapper;
pub mod notify;
pub mod render;
pub mod slider;
pub mod value;

pub use accesskit;
pub use winit;

pub use winit::keyboard::{Key, NamedKey};

pub use crate::{
    accessibility::{ThumbSemantics, build_tree_update},
    callback::Callback,
    config::SliderConfig,
    discovery::{
        AutoDiscovery, CallbackRegistry, ContainerElement, Discovered, DiscoveryFailure,
        MARKER_ATTRIBUTE,
    },
    error::ConfigError,
    headless::{ChangeRecorder, HeadlessSurface, SurfaceCall},
    interaction::{
        DragState, InputResponse, InteractionController, KeyOutcome, PointerEvent,
        PointerEventContent, PointerId, PointerTarget,
    },
    mapper::{PointerPosition, TrackBounds, percent_to_value, pointer_to_value, value_to_percent},
    notify::{ChangeNotifier, ListenerId, RANGE_CHANGE_EVENT, RangeChangeEvent},
    render::{FillVisual, LabelFormat, SliderSurface, SliderVisuals, ThumbVisual},
    slider::RangeSlider,
    value::{Domain, RangeSnapshot, RangeValue, Thumb},
};

/// Creates a slider on `surface`. Shorthand for [`RangeSlider::create`].
pub fn create<S: SliderSurface>(
    surface: S,
    config: SliderConfig,
) -> Result<RangeSlider<S>, ConfigError> {
    RangeSlider::create(surface, config)
}
