//! Slider construction options.

use derive_setters::Setters;

use crate::{
    callback::Callback,
    error::ConfigError,
    render::LabelFormat,
    value::{Domain, RangeSnapshot, ensure_finite},
};

/// Options for [`RangeSlider::create`](crate::RangeSlider::create).
///
/// ```
/// use duo_slider::SliderConfig;
///
/// let config = SliderConfig::default()
///     .min(0.0)
///     .max(1000.0)
///     .step(10.0)
///     .min_value(200.0)
///     .max_value(800.0)
///     .label_prefix("$")
///     .on_change(|range| println!("{} - {}", range.min, range.max));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Lower bound of the domain.
    pub min: f64,
    /// Upper bound of the domain.
    pub max: f64,
    /// Quantization step; also the keyboard increment.
    pub step: f64,
    /// Initial value of the min thumb.
    pub min_value: f64,
    /// Initial value of the max thumb.
    pub max_value: f64,
    /// Text placed before each label's number.
    #[setters(into)]
    pub label_prefix: String,
    /// Text placed after each label's number.
    #[setters(into)]
    pub label_suffix: String,
    /// Smallest distance kept between the thumbs. `None` means one step.
    #[setters(strip_option)]
    pub min_separation: Option<f64>,
    /// Accessible name of the whole slider.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Listener attached before the first commit.
    #[setters(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_change: Option<Callback<RangeSnapshot>>,
}

impl SliderConfig {
    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(RangeSnapshot) + Send + Sync + 'static,
    {
        self.on_change = Some(Callback::new(on_change));
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<Callback<RangeSnapshot>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }

    /// Checks the configuration and returns the domain it describes.
    pub fn validate(&self) -> Result<Domain, ConfigError> {
        let domain = Domain::new(self.min, self.max, self.step, self.min_separation)?;
        ensure_finite("min_value", self.min_value)?;
        ensure_finite("max_value", self.max_value)?;
        Ok(domain)
    }

    /// Label prefix and suffix.
    pub fn label_format(&self) -> LabelFormat {
        LabelFormat::new(self.label_prefix.clone(), self.label_suffix.clone())
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            min_value: 25.0,
            max_value: 75.0,
            label_prefix: String::new(),
            label_suffix: String::new(),
            min_separation: None,
            accessibility_label: None,
            on_change: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_percent_slider() {
        let config = SliderConfig::default();
        let domain = config.validate().unwrap();
        assert_eq!((domain.min(), domain.max(), domain.step()), (0.0, 100.0, 1.0));
        assert_eq!((config.min_value, config.max_value), (25.0, 75.0));
        assert_eq!(config.label_format(), LabelFormat::default());
    }

    #[test]
    fn setters_chain() {
        let config = SliderConfig::default()
            .min(-10.0)
            .max(10.0)
            .step(0.5)
            .min_separation(2.0)
            .label_suffix("°C")
            .accessibility_label("Temperature");
        assert_eq!(config.min, -10.0);
        assert_eq!(config.min_separation, Some(2.0));
        assert_eq!(config.label_format().suffix, "°C");
        assert_eq!(config.accessibility_label.as_deref(), Some("Temperature"));
        assert_eq!(config.validate().unwrap().min_separation(), 2.0);
    }

    #[test]
    fn invalid_domains_are_reported() {
        assert_eq!(
            SliderConfig::default().min(10.0).max(5.0).validate(),
            Err(ConfigError::EmptyDomain {
                min: 10.0,
                max: 5.0
            })
        );
        assert!(matches!(
            SliderConfig::default().step(0.0).validate(),
            Err(ConfigError::NonPositiveStep { .. })
        ));
        assert!(matches!(
            SliderConfig::default().min_value(f64::NAN).validate(),
            Err(ConfigError::NonFinite {
                field: "min_value",
                ..
            })
        ));
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let shared = Callback::new(|_: RangeSnapshot| {});
        let a = SliderConfig::default().on_change_shared(shared.clone());
        let b = SliderConfig::default().on_change_shared(shared);
        assert!(a == b);
        assert!(a != SliderConfig::default().on_change(|_| {}));
    }
}
