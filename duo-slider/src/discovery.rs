//! Construction of sliders from attribute-encoded host containers.
//!
//! A host hands [`AutoDiscovery::scan`] every container it found once its
//! document is ready. Containers carrying [`MARKER_ATTRIBUTE`] become
//! sliders configured from their `data-*` attributes:
//!
//! | attribute             | field            | default |
//! |-----------------------|------------------|---------|
//! | `data-min`            | `min`            | `0`     |
//! | `data-max`            | `max`            | `100`   |
//! | `data-step`           | `step`           | `1`     |
//! | `data-min-value`      | `min_value`      | `25`    |
//! | `data-max-value`      | `max_value`      | `75`    |
//! | `data-label-prefix`   | `label_prefix`   | `""`    |
//! | `data-label-suffix`   | `label_suffix`   | `""`    |
//! | `data-min-separation` | `min_separation` | step    |
//! | `data-on-change`      | `on_change`      | none    |
//!
//! `data-on-change` names a callback previously registered in a
//! [`CallbackRegistry`].

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::{
    callback::Callback,
    config::SliderConfig,
    error::ConfigError,
    render::SliderSurface,
    slider::RangeSlider,
    value::RangeSnapshot,
};

/// Attribute marking a container for auto-discovery.
pub const MARKER_ATTRIBUTE: &str = "data-range-slider";
/// Domain lower bound.
pub const MIN_ATTRIBUTE: &str = "data-min";
/// Domain upper bound.
pub const MAX_ATTRIBUTE: &str = "data-max";
/// Step.
pub const STEP_ATTRIBUTE: &str = "data-step";
/// Initial min thumb value.
pub const MIN_VALUE_ATTRIBUTE: &str = "data-min-value";
/// Initial max thumb value.
pub const MAX_VALUE_ATTRIBUTE: &str = "data-max-value";
/// Label prefix.
pub const LABEL_PREFIX_ATTRIBUTE: &str = "data-label-prefix";
/// Label suffix.
pub const LABEL_SUFFIX_ATTRIBUTE: &str = "data-label-suffix";
/// Minimum thumb separation.
pub const MIN_SEPARATION_ATTRIBUTE: &str = "data-min-separation";
/// Name of a registered change callback.
pub const ON_CHANGE_ATTRIBUTE: &str = "data-on-change";

/// A host container that can be turned into a slider.
pub trait ContainerElement: SliderSurface {
    /// Value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether the attribute `name` is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Change callbacks addressable by name from container attributes.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, Callback<RangeSnapshot>>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: impl Into<Callback<RangeSnapshot>>,
    ) -> &mut Self {
        self.callbacks.insert(name.into(), callback.into());
        self
    }

    /// Looks up the callback registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<Callback<RangeSnapshot>> {
        self.callbacks.get(name).cloned()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Parses the longest leading decimal number of `text`, ignoring leading
/// whitespace and any trailing garbage (`"12px"` is `12`).
///
/// Returns `None` when no finite number starts the text.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }
    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

fn float_attribute(element: &impl ContainerElement, name: &str, default: f64) -> f64 {
    let Some(raw) = element.attribute(name) else {
        return default;
    };
    match parse_leading_float(&raw) {
        Some(value) => value,
        None => {
            warn!(attribute = name, value = %raw, default, "unparsable attribute; using default");
            default
        }
    }
}

/// Reads a slider configuration from `element`'s attributes.
pub fn config_from_attributes(
    element: &impl ContainerElement,
    registry: &CallbackRegistry,
) -> SliderConfig {
    let defaults = SliderConfig::default();
    let mut config = SliderConfig {
        min: float_attribute(element, MIN_ATTRIBUTE, defaults.min),
        max: float_attribute(element, MAX_ATTRIBUTE, defaults.max),
        step: float_attribute(element, STEP_ATTRIBUTE, defaults.step),
        min_value: float_attribute(element, MIN_VALUE_ATTRIBUTE, defaults.min_value),
        max_value: float_attribute(element, MAX_VALUE_ATTRIBUTE, defaults.max_value),
        label_prefix: element
            .attribute(LABEL_PREFIX_ATTRIBUTE)
            .unwrap_or(defaults.label_prefix),
        label_suffix: element
            .attribute(LABEL_SUFFIX_ATTRIBUTE)
            .unwrap_or(defaults.label_suffix),
        ..SliderConfig::default()
    };

    if let Some(raw) = element.attribute(MIN_SEPARATION_ATTRIBUTE) {
        match parse_leading_float(&raw) {
            Some(separation) => config.min_separation = Some(separation),
            None => warn!(
                attribute = MIN_SEPARATION_ATTRIBUTE,
                value = %raw,
                "unparsable attribute; using one step"
            ),
        }
    }

    if let Some(name) = element.attribute(ON_CHANGE_ATTRIBUTE) {
        match registry.resolve(&name) {
            Some(callback) => config.on_change = Some(callback),
            None => warn!(callback = %name, "change callback is not registered; skipping"),
        }
    }
    config
}

/// A marked container that could not be turned into a slider.
#[derive(Debug)]
pub struct DiscoveryFailure<C> {
    /// Position of the container in the scanned sequence.
    pub index: usize,
    /// Why construction failed.
    pub error: ConfigError,
    /// The container, untouched.
    pub container: C,
}

/// Outcome of a discovery scan.
#[derive(Debug)]
pub struct Discovered<C: ContainerElement> {
    /// Sliders built from marked containers, in document order.
    pub sliders: Vec<RangeSlider<C>>,
    /// Containers without the marker, returned untouched.
    pub unmarked: Vec<C>,
    /// Marked containers whose configuration was rejected.
    pub failures: Vec<DiscoveryFailure<C>>,
}

impl<C: ContainerElement> Default for Discovered<C> {
    fn default() -> Self {
        Self {
            sliders: Vec::new(),
            unmarked: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// One-shot scanner turning marked containers into sliders.
#[derive(Debug, Clone, Default)]
pub struct AutoDiscovery {
    scanned: bool,
}

impl AutoDiscovery {
    /// A scanner that has not run yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`scan`](Self::scan) already ran.
    pub fn has_scanned(&self) -> bool {
        self.scanned
    }

    /// Builds a slider for every marked container.
    ///
    /// Containers are never dropped: each ends up in exactly one of
    /// `sliders`, `unmarked` or `failures`. Only the first call does any work; later calls hand every container
    /// back as unmarked.
    pub fn scan<C, I>(&mut self, containers: I, registry: &CallbackRegistry) -> Discovered<C>
    where
        C: ContainerElement,
        I: IntoIterator<Item = C>,
    {
        let mut discovered = Discovered::default();
        if self.scanned {
            debug!("auto-discovery already ran; skipping scan");
            discovered.unmarked.extend(containers);
            return discovered;
        }
        self.scanned = true;

        for (index, container) in containers.into_iter().enumerate() {
            if !container.has_attribute(MARKER_ATTRIBUTE) {
                discovered.unmarked.push(container);
                continue;
            }
            let config = config_from_attributes(&container, registry);
            match config.validate() {
                Ok(domain) => discovered
                    .sliders
                    .push(RangeSlider::mount_validated(container, &config, domain)),
                Err(error) => {
                    error!(index, %error, "failed to construct discovered range slider");
                    discovered.failures.push(DiscoveryFailure {
                        index,
                        error,
                        container,
                    });
                }
            }
        }
        debug!(
            sliders = discovered.sliders.len(),
            failures = discovered.failures.len(),
            "auto-discovery finished"
        );
        discovered
    }
}
