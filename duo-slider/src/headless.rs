//! A surface with no display attached.
//!
//! [`HeadlessSurface`] keeps the latest presentation state in memory and logs
//! every request it receives. It serves server-side hosts, snapshot output,
//! and tests of the interaction logic.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use winit::window::CursorIcon;

use crate::{
    accessibility::ThumbSemantics,
    callback::Callback,
    discovery::ContainerElement,
    interaction::PointerId,
    mapper::TrackBounds,
    notify::RangeChangeEvent,
    render::{SliderSurface, SliderVisuals},
    value::{RangeSnapshot, Thumb},
};

/// Character cells used by [`HeadlessSurface::render_text`].
const TEXT_TRACK_CELLS: usize = 41;

/// A request received by a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// Static attributes were installed.
    Mounted,
    /// Visuals were applied.
    Applied(RangeSnapshot),
    /// A thumb's active flag changed.
    ThumbActive(Thumb, bool),
    /// A pointer was captured.
    Captured(Thumb, PointerId),
    /// A pointer capture was released.
    Released(Thumb, PointerId),
    /// A cursor was requested.
    Cursor(CursorIcon),
    /// Focus moved.
    Focus(Option<Thumb>),
    /// A change event was dispatched.
    Dispatched(RangeChangeEvent),
}

/// In-memory slider surface.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    track: TrackBounds,
    attributes: HashMap<String, String>,
    semantics: Option<[ThumbSemantics; 2]>,
    visuals: Option<SliderVisuals>,
    active: [bool; 2],
    captures: [Option<PointerId>; 2],
    cursor: CursorIcon,
    focused: Option<Thumb>,
    calls: Vec<SurfaceCall>,
}

impl HeadlessSurface {
    /// Creates a surface whose track occupies `track`.
    pub fn new(track: TrackBounds) -> Self {
        Self {
            track,
            attributes: HashMap::new(),
            semantics: None,
            visuals: None,
            active: [false; 2],
            captures: [None; 2],
            cursor: CursorIcon::Default,
            focused: None,
            calls: Vec::new(),
        }
    }

    /// Adds a host attribute, as read by auto-discovery.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Moves or resizes the track.
    pub fn set_track_bounds(&mut self, track: TrackBounds) {
        self.track = track;
    }

    /// Static semantics installed at mount time.
    pub fn semantics(&self) -> Option<&[ThumbSemantics; 2]> {
        self.semantics.as_ref()
    }

    /// Most recently applied visuals.
    pub fn visuals(&self) -> Option<&SliderVisuals> {
        self.visuals.as_ref()
    }

    /// Whether `thumb` is marked active.
    pub fn is_active(&self, thumb: Thumb) -> bool {
        self.active[thumb.index()]
    }

    /// Pointer currently captured by `thumb`.
    pub fn capture(&self, thumb: Thumb) -> Option<PointerId> {
        self.captures[thumb.index()]
    }

    /// Last requested cursor.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Thumb holding focus.
    pub fn focused(&self) -> Option<Thumb> {
        self.focused
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Change events dispatched to this surface, oldest first.
    pub fn dispatched(&self) -> impl Iterator<Item = &RangeChangeEvent> {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::Dispatched(event) => Some(event),
            _ => None,
        })
    }

    /// Forgets the request log, keeping the current state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// One-line text rendition of the current visuals, e.g.
    /// `----------O====================O---------- 25 .. 75`.
    pub fn render_text(&self) -> String {
        let Some(visuals) = self.visuals.as_ref() else {
            return String::new();
        };
        let cell = |percent: f64| {
            let last = (TEXT_TRACK_CELLS - 1) as f64;
            (percent.clamp(0.0, 100.0) / 100.0 * last).round() as usize
        };
        let start = cell(visuals.thumb(Thumb::Min).offset_percent);
        let end = cell(visuals.thumb(Thumb::Max).offset_percent);

        let track: String = (0..TEXT_TRACK_CELLS)
            .map(|i| {
                if i == start || i == end {
                    'O'
                } else if i > start && i < end {
                    '='
                } else {
                    '-'
                }
            })
            .collect();
        format!(
            "{track} {} .. {}",
            visuals.thumb(Thumb::Min).label,
            visuals.thumb(Thumb::Max).label
        )
    }
}

impl SliderSurface for HeadlessSurface {
    fn track_bounds(&self) -> TrackBounds {
        self.track
    }

    fn mount(&mut self, semantics: &[ThumbSemantics; 2]) {
        self.semantics = Some(semantics.clone());
        self.calls.push(SurfaceCall::Mounted);
    }

    fn apply(&mut self, visuals: &SliderVisuals) {
        let snapshot = RangeSnapshot {
            min: visuals.thumb(Thumb::Min).value,
            max: visuals.thumb(Thumb::Max).value,
        };
        self.visuals = Some(visuals.clone());
        self.calls.push(SurfaceCall::Applied(snapshot));
    }

    fn set_thumb_active(&mut self, thumb: Thumb, active: bool) {
        self.active[thumb.index()] = active;
        self.calls.push(SurfaceCall::ThumbActive(thumb, active));
    }

    fn capture_pointer(&mut self, thumb: Thumb, pointer: PointerId) {
        self.captures[thumb.index()] = Some(pointer);
        self.calls.push(SurfaceCall::Captured(thumb, pointer));
    }

    fn release_pointer(&mut self, thumb: Thumb, pointer: PointerId) {
        if self.captures[thumb.index()] == Some(pointer) {
            self.captures[thumb.index()] = None;
        }
        self.calls.push(SurfaceCall::Released(thumb, pointer));
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        self.cursor = icon;
        self.calls.push(SurfaceCall::Cursor(icon));
    }

    fn set_focus(&mut self, thumb: Option<Thumb>) {
        self.focused = thumb;
        self.calls.push(SurfaceCall::Focus(thumb));
    }

    fn dispatch(&mut self, event: &RangeChangeEvent) {
        self.calls.push(SurfaceCall::Dispatched(*event));
    }
}

impl ContainerElement for HeadlessSurface {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// Collects committed snapshots from change listeners.
///
/// Clones share one log, so a clone can be handed to a slider while the
/// original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    entries: Arc<Mutex<Vec<RangeSnapshot>>>,
}

impl ChangeRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener appending every snapshot it receives.
    pub fn callback(&self) -> Callback<RangeSnapshot> {
        let entries = Arc::clone(&self.entries);
        Callback::new(move |snapshot| entries.lock().push(snapshot))
    }

    /// All recorded snapshots, oldest first.
    pub fn entries(&self) -> Vec<RangeSnapshot> {
        self.entries.lock().clone()
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<RangeSnapshot> {
        self.entries.lock().last().copied()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
