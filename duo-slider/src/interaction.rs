//! Pointer, keyboard and assistive-technology input handling.
//!
//! Each thumb runs its own small state machine:
//!
//! ```text
//! Idle --pressed--> Dragging { pointer } --released--> Idle
//! ```
//!
//! A pointer is captured by the thumb it pressed, so its moves and release
//! are only ever routed to that thumb. Keyboard input acts on the focused
//! thumb regardless of drag state.

use accesskit::Action;
use tracing::{debug, trace};
use winit::{
    keyboard::{Key, NamedKey},
    window::CursorIcon,
};

use crate::{
    accessibility::PAGE_STEPS,
    mapper::{PointerPosition, pointer_to_value, quantize, value_to_percent},
    render::SliderSurface,
    value::{RangeValue, Thumb},
};

/// Identifies one pointer (mouse, pen or touch contact) across its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// One of the thumbs.
    Thumb(Thumb),
    /// The bare track, outside both thumbs.
    Track,
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventContent {
    /// The pointer went down on `PointerTarget`.
    Pressed(PointerTarget),
    /// The pointer moved.
    Moved,
    /// The pointer went up, anywhere.
    Released,
}

/// A pointer event in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer that produced the event.
    pub pointer: PointerId,
    /// Pointer position at the time of the event.
    pub position: PointerPosition,
    /// What happened.
    pub content: PointerEventContent,
}

impl PointerEvent {
    /// A press on `target`.
    pub fn pressed(pointer: PointerId, position: PointerPosition, target: PointerTarget) -> Self {
        Self {
            pointer,
            position,
            content: PointerEventContent::Pressed(target),
        }
    }

    /// A move.
    pub fn moved(pointer: PointerId, position: PointerPosition) -> Self {
        Self {
            pointer,
            position,
            content: PointerEventContent::Moved,
        }
    }

    /// A release.
    pub fn released(pointer: PointerId, position: PointerPosition) -> Self {
        Self {
            pointer,
            position,
            content: PointerEventContent::Released,
        }
    }
}

/// Drag state of one thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Not being dragged.
    #[default]
    Idle,
    /// Being dragged by the captured `pointer`.
    Dragging {
        /// The captured pointer.
        pointer: PointerId,
    },
}

impl DragState {
    /// Whether `pointer` holds this thumb's capture.
    pub fn is_captured_by(&self, pointer: PointerId) -> bool {
        matches!(self, DragState::Dragging { pointer: captured } if *captured == pointer)
    }

    /// Whether the thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Whether a key press was consumed by the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key adjusted the focused thumb; hosts should stop propagation.
    Handled,
    /// The key means nothing to the slider, or no thumb is focused.
    Ignored,
}

/// Follow-up work requested by the controller after processing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Values changed; presentation must be refreshed.
    pub redraw: bool,
    /// An interaction finished; a change notification must be emitted.
    pub commit: bool,
}

impl InputResponse {
    const NONE: Self = Self {
        redraw: false,
        commit: false,
    };
    const COMMIT: Self = Self {
        redraw: true,
        commit: true,
    };
}

enum KeyAdjustment {
    Steps(f64),
    ToMin,
    ToMax,
}

fn key_adjustment(key: &Key) -> Option<KeyAdjustment> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(KeyAdjustment::Steps(-1.0)),
        Key::Named(NamedKey::ArrowRight) => Some(KeyAdjustment::Steps(1.0)),
        Key::Named(NamedKey::PageDown) => Some(KeyAdjustment::Steps(-PAGE_STEPS)),
        Key::Named(NamedKey::PageUp) => Some(KeyAdjustment::Steps(PAGE_STEPS)),
        Key::Named(NamedKey::Home) => Some(KeyAdjustment::ToMin),
        Key::Named(NamedKey::End) => Some(KeyAdjustment::ToMax),
        _ => None,
    }
}

/// Interaction state for both thumbs.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    drags: [DragState; 2],
    focused: Option<Thumb>,
    hovered: bool,
}

impl InteractionController {
    /// A controller with both thumbs idle and nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag state of `thumb`.
    pub fn drag_state(&self, thumb: Thumb) -> DragState {
        self.drags[thumb.index()]
    }

    /// The thumb holding keyboard focus.
    pub fn focused(&self) -> Option<Thumb> {
        self.focused
    }

    /// Whether the pointer is over the track.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Moves keyboard focus, telling the surface when it changes.
    pub fn set_focus(&mut self, thumb: Option<Thumb>, surface: &mut impl SliderSurface) {
        if self.focused != thumb {
            self.focused = thumb;
            surface.set_focus(thumb);
        }
    }

    /// Processes one pointer event.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        model: &mut RangeValue,
        surface: &mut impl SliderSurface,
    ) -> InputResponse {
        match event.content {
            PointerEventContent::Pressed(target) => self.on_pressed(event, target, model, surface),
            PointerEventContent::Moved => self.on_moved(event, model, surface),
            PointerEventContent::Released => self.on_released(event, surface),
        }
    }

    fn on_pressed(
        &mut self,
        event: PointerEvent,
        target: PointerTarget,
        model: &mut RangeValue,
        surface: &mut impl SliderSurface,
    ) -> InputResponse {
        let thumb = match target {
            PointerTarget::Thumb(thumb) => thumb,
            PointerTarget::Track => {
                let nearest = nearest_thumb(model, surface, event.position.x);
                if self.drags[nearest.index()].is_dragging() {
                    nearest.other()
                } else {
                    nearest
                }
            }
        };
        if self.drags[thumb.index()].is_dragging() {
            debug!(?thumb, pointer = ?event.pointer, "thumb already captured; press ignored");
            return InputResponse::NONE;
        }

        self.drags[thumb.index()] = DragState::Dragging {
            pointer: event.pointer,
        };
        surface.capture_pointer(thumb, event.pointer);
        surface.set_thumb_active(thumb, true);
        surface.set_cursor(CursorIcon::Grabbing);
        self.set_focus(Some(thumb), surface);
        debug!(?thumb, pointer = ?event.pointer, "drag started");

        if target == PointerTarget::Track {
            let candidate =
                pointer_to_value(model.domain(), &surface.track_bounds(), event.position.x);
            model.set(thumb, candidate);
            return InputResponse {
                redraw: true,
                commit: false,
            };
        }
        InputResponse::NONE
    }

    fn on_moved(
        &mut self,
        event: PointerEvent,
        model: &mut RangeValue,
        surface: &mut impl SliderSurface,
    ) -> InputResponse {
        let track = surface.track_bounds();
        let mut response = InputResponse::NONE;

        for thumb in Thumb::ALL {
            if !self.drags[thumb.index()].is_captured_by(event.pointer) {
                continue;
            }
            let candidate = pointer_to_value(model.domain(), &track, event.position.x);
            let applied = model.set(thumb, candidate);
            trace!(?thumb, candidate, applied, "drag moved");
            response.redraw = true;
        }

        if !response.redraw {
            let hovered = track.contains(event.position);
            if hovered != self.hovered {
                self.hovered = hovered;
                if !self.any_dragging() {
                    surface.set_cursor(idle_cursor(hovered));
                }
            }
        }
        response
    }

    fn on_released(
        &mut self,
        event: PointerEvent,
        surface: &mut impl SliderSurface,
    ) -> InputResponse {
        let mut response = InputResponse::NONE;
        for thumb in Thumb::ALL {
            if !self.drags[thumb.index()].is_captured_by(event.pointer) {
                continue;
            }
            self.drags[thumb.index()] = DragState::Idle;
            surface.release_pointer(thumb, event.pointer);
            surface.set_thumb_active(thumb, false);
            debug!(?thumb, pointer = ?event.pointer, "drag finished");
            response = InputResponse::COMMIT;
        }

        if response.commit {
            self.hovered = surface.track_bounds().contains(event.position);
            if !self.any_dragging() {
                surface.set_cursor(idle_cursor(self.hovered));
            }
        }
        response
    }

    /// Processes a key press on the focused thumb.
    pub fn handle_key(&mut self, key: &Key, model: &mut RangeValue) -> (KeyOutcome, InputResponse) {
        let Some(thumb) = self.focused else {
            return (KeyOutcome::Ignored, InputResponse::NONE);
        };
        let Some(adjustment) = key_adjustment(key) else {
            return (KeyOutcome::Ignored, InputResponse::NONE);
        };

        let domain = *model.domain();
        let candidate = match adjustment {
            KeyAdjustment::Steps(steps) => model.get(thumb) + steps * domain.step(),
            KeyAdjustment::ToMin => domain.min(),
            KeyAdjustment::ToMax => domain.max(),
        };
        let applied = model.set(thumb, domain.clamp(quantize(&domain, candidate)));
        debug!(?thumb, ?key, applied, "keyboard adjustment");
        (KeyOutcome::Handled, InputResponse::COMMIT)
    }

    /// Processes an assistive-technology action addressed to `thumb`.
    ///
    /// Returns `None` for actions the slider does not support.
    pub fn handle_action(
        &mut self,
        thumb: Thumb,
        action: Action,
        model: &mut RangeValue,
        surface: &mut impl SliderSurface,
    ) -> Option<InputResponse> {
        let steps = match action {
            Action::Focus => {
                self.set_focus(Some(thumb), surface);
                return Some(InputResponse::NONE);
            }
            Action::Increment => 1.0,
            Action::Decrement => -1.0,
            _ => return None,
        };
        let domain = *model.domain();
        let candidate = quantize(&domain, model.get(thumb) + steps * domain.step());
        let applied = model.set(thumb, domain.clamp(candidate));
        debug!(?thumb, ?action, applied, "accessibility action");
        Some(InputResponse::COMMIT)
    }

    fn any_dragging(&self) -> bool {
        self.drags.iter().any(DragState::is_dragging)
    }
}

fn idle_cursor(hovered: bool) -> CursorIcon {
    if hovered {
        CursorIcon::Pointer
    } else {
        CursorIcon::Default
    }
}

/// Picks the thumb closest to `x`.
///
/// When both are equally close (they overlap), the press goes to the max
/// thumb if it lies to the right of them, so it can actually move. A thumb
/// already held by another pointer hands the press to its sibling; when both
/// are held the press is ignored.
fn nearest_thumb(model: &RangeValue, surface: &impl SliderSurface, x: f64) -> Thumb {
    let track = surface.track_bounds();
    let center = |thumb: Thumb| track.x_at_percent(value_to_percent(model.domain(), model.get(thumb)));
    let min_center = center(Thumb::Min);
    let max_center = center(Thumb::Max);
    let dist_min = (x - min_center).abs();
    let dist_max = (x - max_center).abs();

    if dist_min < dist_max || (dist_min == dist_max && x <= min_center) {
        Thumb::Min
    } else {
        Thumb::Max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        headless::{HeadlessSurface, SurfaceCall},
        mapper::TrackBounds,
        value::Domain,
    };

    const TOUCH: PointerId = PointerId(7);

    fn setup() -> (InteractionController, RangeValue, HeadlessSurface) {
        let domain = Domain::new(0.0, 100.0, 1.0, None).unwrap();
        let surface = HeadlessSurface::new(TrackBounds::new(0.0, 0.0, 200.0, 20.0));
        (
            InteractionController::new(),
            RangeValue::new(domain, 25.0, 75.0),
            surface,
        )
    }

    fn at(x: f64) -> PointerPosition {
        PointerPosition::new(x, 10.0)
    }

    #[test]
    fn drag_captures_moves_and_commits_once() {
        let (mut controller, mut model, mut surface) = setup();

        let pressed = controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );
        assert_eq!(pressed, InputResponse::NONE);
        assert_eq!(
            controller.drag_state(Thumb::Min),
            DragState::Dragging { pointer: TOUCH }
        );
        assert_eq!(controller.focused(), Some(Thumb::Min));
        assert_eq!(surface.capture(Thumb::Min), Some(TOUCH));
        assert!(surface.is_active(Thumb::Min));

        for x in [60.0, 80.0, 100.0] {
            let moved = controller.handle_pointer(
                PointerEvent::moved(TOUCH, at(x)),
                &mut model,
                &mut surface,
            );
            assert!(moved.redraw);
            assert!(!moved.commit);
        }
        assert_eq!(model.get(Thumb::Min), 50.0);

        let released = controller.handle_pointer(
            PointerEvent::released(TOUCH, at(500.0)),
            &mut model,
            &mut surface,
        );
        assert_eq!(released, InputResponse::COMMIT);
        assert_eq!(controller.drag_state(Thumb::Min), DragState::Idle);
        assert_eq!(surface.capture(Thumb::Min), None);
        assert!(!surface.is_active(Thumb::Min));
        assert_eq!(surface.cursor(), CursorIcon::Default);
    }

    #[test]
    fn dragging_min_past_max_stops_one_step_short() {
        let (mut controller, mut model, mut surface) = setup();
        controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );
        controller.handle_pointer(PointerEvent::moved(TOUCH, at(190.0)), &mut model, &mut surface);
        assert_eq!(model.get(Thumb::Min), 74.0);
        assert_eq!(model.get(Thumb::Max), 75.0);
    }

    #[test]
    fn uncaptured_pointer_only_hovers() {
        let (mut controller, mut model, mut surface) = setup();
        let moved = controller.handle_pointer(
            PointerEvent::moved(PointerId(1), at(20.0)),
            &mut model,
            &mut surface,
        );
        assert_eq!(moved, InputResponse::NONE);
        assert!(controller.is_hovered());
        assert_eq!(surface.cursor(), CursorIcon::Pointer);
        assert_eq!(model.snapshot().min, 25.0);

        let released = controller.handle_pointer(
            PointerEvent::released(PointerId(1), at(20.0)),
            &mut model,
            &mut surface,
        );
        assert_eq!(released, InputResponse::NONE);
    }

    #[test]
    fn second_pointer_on_other_thumb_is_independent() {
        let (mut controller, mut model, mut surface) = setup();
        let other = PointerId(8);
        controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );
        controller.handle_pointer(
            PointerEvent::pressed(other, at(150.0), PointerTarget::Thumb(Thumb::Max)),
            &mut model,
            &mut surface,
        );
        controller.handle_pointer(PointerEvent::moved(other, at(180.0)), &mut model, &mut surface);
        assert_eq!(model.get(Thumb::Max), 90.0);
        assert_eq!(model.get(Thumb::Min), 25.0);

        let released = controller.handle_pointer(
            PointerEvent::released(other, at(180.0)),
            &mut model,
            &mut surface,
        );
        assert!(released.commit);
        assert!(controller.drag_state(Thumb::Min).is_dragging());
        assert_eq!(surface.cursor(), CursorIcon::Grabbing);
    }

    #[test]
    fn press_on_captured_thumb_is_ignored() {
        let (mut controller, mut model, mut surface) = setup();
        controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );
        let response = controller.handle_pointer(
            PointerEvent::pressed(PointerId(9), at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );
        assert_eq!(response, InputResponse::NONE);
        assert!(controller.drag_state(Thumb::Min).is_captured_by(TOUCH));
    }

    #[test]
    fn track_press_moves_nearest_thumb() {
        let (mut controller, mut model, mut surface) = setup();
        let response = controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(170.0), PointerTarget::Track),
            &mut model,
            &mut surface,
        );
        assert_eq!(
            response,
            InputResponse {
                redraw: true,
                commit: false
            }
        );
        assert_eq!(model.get(Thumb::Max), 85.0);
        assert!(controller.drag_state(Thumb::Max).is_captured_by(TOUCH));

        let (mut controller, mut model, mut surface) = setup();
        controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(10.0), PointerTarget::Track),
            &mut model,
            &mut surface,
        );
        assert_eq!(model.get(Thumb::Min), 5.0);
    }

    #[test]
    fn track_press_near_held_thumb_takes_the_sibling() {
        let (mut controller, mut model, mut surface) = setup();
        controller.handle_pointer(
            PointerEvent::pressed(TOUCH, at(50.0), PointerTarget::Thumb(Thumb::Min)),
            &mut model,
            &mut surface,
        );

        let other = PointerId(8);
        let response = controller.handle_pointer(
            PointerEvent::pressed(other, at(60.0), PointerTarget::Track),
            &mut model,
            &mut surface,
        );
        assert!(response.redraw);
        assert!(controller.drag_state(Thumb::Max).is_captured_by(other));
        assert!(controller.drag_state(Thumb::Min).is_captured_by(TOUCH));
        assert_eq!(model.get(Thumb::Max), 30.0);
        assert_eq!(model.get(Thumb::Min), 25.0);

        let third = controller.handle_pointer(
            PointerEvent::pressed(PointerId(9), at(100.0), PointerTarget::Track),
            &mut model,
            &mut surface,
        );
        assert_eq!(third, InputResponse::NONE);
    }

    #[test]
    fn fractional_steps_stay_free_of_float_noise() {
        let domain = Domain::new(0.0, 1.0, 0.1, None).unwrap();
        let mut model = RangeValue::new(domain, 0.0, 1.0);
        let mut surface = HeadlessSurface::new(TrackBounds::new(0.0, 0.0, 100.0, 10.0));
        let mut controller = InteractionController::new();
        controller.set_focus(Some(Thumb::Min), &mut surface);

        for _ in 0..3 {
            controller.handle_key(&Key::Named(NamedKey::ArrowRight), &mut model);
        }
        assert_eq!(model.get(Thumb::Min), 0.3);

        controller.handle_action(Thumb::Max, Action::Decrement, &mut model, &mut surface);
        controller.handle_action(Thumb::Max, Action::Decrement, &mut model, &mut surface);
        controller.handle_action(Thumb::Max, Action::Decrement, &mut model, &mut surface);
        assert_eq!(model.get(Thumb::Max), 0.7);
    }

    #[test]
    fn overlapping_thumbs_split_track_presses_by_side() {
        let domain = Domain::new(0.0, 100.0, 1.0, Some(0.0)).unwrap();
        let mut model = RangeValue::new(domain, 50.0, 50.0);
        let surface = HeadlessSurface::new(TrackBounds::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(nearest_thumb(&model, &surface, 50.0), Thumb::Min);
        assert_eq!(nearest_thumb(&model, &surface, 40.0), Thumb::Min);
        assert_eq!(nearest_thumb(&model, &surface, 60.0), Thumb::Max);
        model.set(Thumb::Max, 60.0);
        assert_eq!(nearest_thumb(&model, &surface, 56.0), Thumb::Max);
    }

    #[test]
    fn keys_step_page_and_jump() {
        let (mut controller, mut model, mut surface) = setup();
        controller.set_focus(Some(Thumb::Max), &mut surface);

        let (outcome, response) =
            controller.handle_key(&Key::Named(NamedKey::ArrowRight), &mut model);
        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(response, InputResponse::COMMIT);
        assert_eq!(model.snapshot().max, 76.0);

        controller.handle_key(&Key::Named(NamedKey::PageDown), &mut model);
        assert_eq!(model.snapshot().max, 66.0);
        controller.handle_key(&Key::Named(NamedKey::End), &mut model);
        assert_eq!(model.snapshot().max, 100.0);
        controller.handle_key(&Key::Named(NamedKey::PageUp), &mut model);
        assert_eq!(model.snapshot().max, 100.0);
        controller.handle_key(&Key::Named(NamedKey::Home), &mut model);
        assert_eq!(model.snapshot().max, 26.0);

        controller.set_focus(Some(Thumb::Min), &mut surface);
        controller.handle_key(&Key::Named(NamedKey::Home), &mut model);
        assert_eq!(model.snapshot().min, 0.0);
        controller.handle_key(&Key::Named(NamedKey::ArrowLeft), &mut model);
        assert_eq!(model.snapshot().min, 0.0);
    }

    #[test]
    fn unrelated_keys_and_unfocused_slider_are_ignored() {
        let (mut controller, mut model, mut surface) = setup();
        let (outcome, _) = controller.handle_key(&Key::Named(NamedKey::ArrowRight), &mut model);
        assert_eq!(outcome, KeyOutcome::Ignored);

        controller.set_focus(Some(Thumb::Min), &mut surface);
        let (outcome, response) = controller.handle_key(&Key::Character("a".into()), &mut model);
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(response, InputResponse::NONE);
        let (outcome, _) = controller.handle_key(&Key::Named(NamedKey::ArrowUp), &mut model);
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(model.snapshot().min, 25.0);
    }

    #[test]
    fn accessibility_actions_step_and_focus() {
        let (mut controller, mut model, mut surface) = setup();
        let response =
            controller.handle_action(Thumb::Min, Action::Increment, &mut model, &mut surface);
        assert_eq!(response, Some(InputResponse::COMMIT));
        assert_eq!(model.get(Thumb::Min), 26.0);

        controller.handle_action(Thumb::Max, Action::Focus, &mut model, &mut surface);
        assert_eq!(controller.focused(), Some(Thumb::Max));
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::Focus(Some(Thumb::Max))));

        assert_eq!(
            controller.handle_action(Thumb::Max, Action::Click, &mut model, &mut surface),
            None
        );
    }
}
