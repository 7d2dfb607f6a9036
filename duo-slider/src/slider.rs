//! The range slider widget: value model, controller, notifier and surface
//! wired together.

use accesskit::{Action, NodeId, TreeUpdate};
use tracing::debug;
use winit::keyboard::Key;

use crate::{
    accessibility::{ThumbSemantics, build_tree_update, thumb_for_node},
    callback::Callback,
    config::SliderConfig,
    error::ConfigError,
    interaction::{DragState, InputResponse, InteractionController, KeyOutcome, PointerEvent},
    notify::{ChangeNotifier, ListenerId},
    render::{LabelFormat, SliderSurface, SliderVisuals},
    value::{Domain, RangeSnapshot, RangeValue, Thumb},
};

/// A dual-thumb slider drawing through the surface `S`.
///
/// The slider owns its values. Callers read them with
/// [`values`](Self::values) and observe commits with
/// [`on_change`](Self::on_change); only input routed through the `handle_*`
/// methods changes them.
///
/// ```
/// use duo_slider::{
///     HeadlessSurface, Key, NamedKey, RangeSlider, RangeSnapshot, SliderConfig, Thumb,
///     TrackBounds,
/// };
///
/// let surface = HeadlessSurface::new(TrackBounds::new(0.0, 0.0, 200.0, 24.0));
/// let mut slider = RangeSlider::create(surface, SliderConfig::default())?;
/// assert_eq!(slider.values(), RangeSnapshot { min: 25.0, max: 75.0 });
///
/// slider.focus(Thumb::Max);
/// slider.handle_key(&Key::Named(NamedKey::ArrowRight));
/// assert_eq!(slider.values().max, 76.0);
/// # Ok::<(), duo_slider::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct RangeSlider<S: SliderSurface> {
    surface: S,
    model: RangeValue,
    labels: LabelFormat,
    accessibility_label: Option<String>,
    semantics: [ThumbSemantics; 2],
    controller: InteractionController,
    notifier: ChangeNotifier,
}

impl<S: SliderSurface> RangeSlider<S> {
    /// Validates `config`, mounts the slider on `surface` and draws it.
    ///
    /// Fails without touching the surface when the configuration is invalid.
    pub fn create(surface: S, config: SliderConfig) -> Result<Self, ConfigError> {
        let domain = config.validate()?;
        Ok(Self::mount_validated(surface, &config, domain))
    }

    /// Mounts a slider for a configuration already validated into `domain`.
    pub(crate) fn mount_validated(mut surface: S, config: &SliderConfig, domain: Domain) -> Self {
        let model = RangeValue::new(domain, config.min_value, config.max_value);
        let accessibility_label = config.accessibility_label.clone();
        let semantics = Thumb::ALL
            .map(|thumb| ThumbSemantics::for_domain(thumb, &domain, accessibility_label.as_deref()));

        let mut notifier = ChangeNotifier::new();
        if let Some(on_change) = config.on_change.clone() {
            notifier.subscribe(on_change);
        }

        surface.mount(&semantics);
        let mut slider = Self {
            surface,
            model,
            labels: config.label_format(),
            accessibility_label,
            semantics,
            controller: InteractionController::new(),
            notifier,
        };
        slider.render();
        debug!(
            min = domain.min(),
            max = domain.max(),
            step = domain.step(),
            values = ?slider.values(),
            "range slider created"
        );
        slider
    }

    /// Current values.
    pub fn values(&self) -> RangeSnapshot {
        self.model.snapshot()
    }

    /// The domain the slider operates over.
    pub fn domain(&self) -> &Domain {
        self.model.domain()
    }

    /// The visual element the slider draws on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the visual element, e.g. to attach host listeners.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tears the slider down, handing back its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Registers a change listener.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(RangeSnapshot) + Send + Sync + 'static,
    {
        self.notifier.subscribe(Callback::new(listener))
    }

    /// Registers a shared change listener.
    pub fn on_change_shared(
        &mut self,
        listener: impl Into<Callback<RangeSnapshot>>,
    ) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Detaches a listener. Returns `false` if it was not attached.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Presentation state for the current values.
    pub fn visuals(&self) -> SliderVisuals {
        SliderVisuals::compute(self.model.domain(), self.model.snapshot(), &self.labels)
    }

    /// Static accessibility attributes of `thumb`.
    pub fn semantics(&self, thumb: Thumb) -> &ThumbSemantics {
        &self.semantics[thumb.index()]
    }

    /// Accessibility subtree for the current state.
    pub fn accessibility_tree(&self) -> TreeUpdate {
        build_tree_update(
            &self.semantics,
            &self.visuals(),
            self.controller.focused(),
            self.accessibility_label.as_deref(),
        )
    }

    /// Drag state of `thumb`.
    pub fn drag_state(&self, thumb: Thumb) -> DragState {
        self.controller.drag_state(thumb)
    }

    /// Thumb holding keyboard focus.
    pub fn focused_thumb(&self) -> Option<Thumb> {
        self.controller.focused()
    }

    /// Gives keyboard focus to `thumb`.
    pub fn focus(&mut self, thumb: Thumb) {
        self.controller.set_focus(Some(thumb), &mut self.surface);
    }

    /// Removes keyboard focus from both thumbs.
    pub fn blur(&mut self) {
        self.controller.set_focus(None, &mut self.surface);
    }

    /// Routes a pointer event through the drag state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> InputResponse {
        let response = self
            .controller
            .handle_pointer(event, &mut self.model, &mut self.surface);
        self.finish(response);
        response
    }

    /// Routes a key press to the focused thumb.
    pub fn handle_key(&mut self, key: &Key) -> KeyOutcome {
        let (outcome, response) = self.controller.handle_key(key, &mut self.model);
        self.finish(response);
        outcome
    }

    /// Routes an assistive-technology action. Returns `false` when the
    /// target is not a thumb or the action is unsupported.
    pub fn handle_accessibility_action(&mut self, target: NodeId, action: Action) -> bool {
        let Some(thumb) = thumb_for_node(target) else {
            return false;
        };
        match self
            .controller
            .handle_action(thumb, action, &mut self.model, &mut self.surface)
        {
            Some(response) => {
                self.finish(response);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, response: InputResponse) {
        if response.redraw {
            self.render();
        }
        if response.commit {
            self.commit();
        }
    }

    fn render(&mut self) {
        let visuals = self.visuals();
        self.surface.apply(&visuals);
    }

    fn commit(&mut self) {
        let event = self.notifier.emit(self.model.snapshot());
        self.surface.dispatch(&event);
    }
}
