//! The value model: an immutable [`Domain`] and the mutable pair of thumb
//! values living inside it.

use crate::error::ConfigError;

/// One of the two thumbs of a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Thumb {
    /// The thumb holding the lower bound of the selection.
    Min,
    /// The thumb holding the upper bound of the selection.
    Max,
}

impl Thumb {
    /// Both thumbs, lower first.
    pub const ALL: [Thumb; 2] = [Thumb::Min, Thumb::Max];

    /// The sibling thumb.
    pub fn other(self) -> Self {
        match self {
            Thumb::Min => Thumb::Max,
            Thumb::Max => Thumb::Min,
        }
    }

    /// Name of the hidden form field mirroring this thumb's value.
    pub fn form_field(self) -> &'static str {
        match self {
            Thumb::Min => "min-value",
            Thumb::Max => "max-value",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Thumb::Min => 0,
            Thumb::Max => 1,
        }
    }
}

/// The fixed interval and step grid a slider operates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
    step: f64,
    min_separation: f64,
}

impl Domain {
    /// Validates and builds a domain.
    ///
    /// `min_separation` defaults to one `step` when `None`.
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        min_separation: Option<f64>,
    ) -> Result<Self, ConfigError> {
        ensure_finite("min", min)?;
        ensure_finite("max", max)?;
        ensure_finite("step", step)?;
        if min >= max {
            return Err(ConfigError::EmptyDomain { min, max });
        }
        if step <= 0.0 {
            return Err(ConfigError::NonPositiveStep { step });
        }

        let separation = match min_separation {
            Some(separation) => {
                ensure_finite("min_separation", separation)?;
                if separation < 0.0 {
                    return Err(ConfigError::NegativeSeparation { separation });
                }
                separation
            }
            None => step,
        };
        let span = max - min;
        if separation > span {
            return Err(ConfigError::SeparationExceedsDomain { separation, span });
        }

        Ok(Self {
            min,
            max,
            step,
            min_separation: separation,
        })
    }

    /// Lower bound of the domain.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the domain.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Quantization step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Smallest allowed distance between the two thumbs.
    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// `max - min`, always positive.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamps `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Immutable copy of the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSnapshot {
    /// Value of the min thumb.
    pub min: f64,
    /// Value of the max thumb.
    pub max: f64,
}

impl RangeSnapshot {
    /// Value held by `thumb`.
    pub fn get(&self, thumb: Thumb) -> f64 {
        match thumb {
            Thumb::Min => self.min,
            Thumb::Max => self.max,
        }
    }
}

/// Current thumb values, kept ordered and separated inside their domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    domain: Domain,
    current_min: f64,
    current_max: f64,
}

impl RangeValue {
    /// Places the initial values inside `domain`.
    ///
    /// Values are clamped to the domain and swapped when inverted. If they
    /// sit closer than the minimum separation, the max value is pushed up,
    /// and the min value pulled down once the max value hits the domain end.
    pub fn new(domain: Domain, min_value: f64, max_value: f64) -> Self {
        let (low, high) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        let mut current_min = domain.clamp(low);
        let mut current_max = domain.clamp(high);

        let separation = domain.min_separation();
        if current_max - current_min < separation {
            current_max = (current_min + separation).min(domain.max());
            current_min = current_min.min(current_max - separation);
        }

        Self {
            domain,
            current_min,
            current_max,
        }
    }

    /// The domain these values live in.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Value currently held by `thumb`.
    pub fn get(&self, thumb: Thumb) -> f64 {
        match thumb {
            Thumb::Min => self.current_min,
            Thumb::Max => self.current_max,
        }
    }

    /// Immutable copy of both values.
    pub fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot {
            min: self.current_min,
            max: self.current_max,
        }
    }

    /// Applies a candidate value to one thumb and returns the value stored.
    ///
    /// The candidate is clamped to the domain first, then bounded by the
    /// sibling thumb minus (or plus) the minimum separation. Non-finite
    /// candidates leave the thumb where it is.
    pub(crate) fn set(&mut self, thumb: Thumb, candidate: f64) -> f64 {
        if !candidate.is_finite() {
            return self.get(thumb);
        }
        let separation = self.domain.min_separation();
        let clamped = self.domain.clamp(candidate);
        match thumb {
            Thumb::Min => {
                self.current_min = clamped.min(self.current_max - separation);
                self.current_min
            }
            Thumb::Max => {
                self.current_max = clamped.max(self.current_min + separation);
                self.current_max
            }
        }
    }
}
