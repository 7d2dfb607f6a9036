//! Projection of the value model onto presentation state, and the trait a
//! host implements to display it.

use winit::window::CursorIcon;

use crate::{
    accessibility::ThumbSemantics,
    interaction::PointerId,
    mapper::{TrackBounds, value_to_percent},
    notify::RangeChangeEvent,
    value::{Domain, RangeSnapshot, Thumb},
};

/// Text placed around each thumb's value in its label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelFormat {
    /// Text before the number.
    pub prefix: String,
    /// Text after the number.
    pub suffix: String,
}

impl LabelFormat {
    /// Creates a label format.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Formats `value` as `prefix + value + suffix`.
    pub fn format(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, format_value(value), self.suffix)
    }
}

/// Shortest decimal rendering of a value, without a trailing `.0` and with
/// negative zero shown as `0`.
pub fn format_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}

/// Presentation state of one thumb and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbVisual {
    /// Which thumb this describes.
    pub thumb: Thumb,
    /// The thumb's value; also its accessibility `current value`.
    pub value: f64,
    /// Horizontal offset of the thumb and its label, in percent of the track.
    pub offset_percent: f64,
    /// Label text.
    pub label: String,
}

/// Geometry of the fill bar spanning the two thumbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillVisual {
    /// Left edge, in percent of the track.
    pub left_percent: f64,
    /// Width, in percent of the track.
    pub width_percent: f64,
}

/// Everything a host needs to draw the slider for one value snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderVisuals {
    /// Per-thumb state, indexed min then max.
    pub thumbs: [ThumbVisual; 2],
    /// Fill bar between the thumbs.
    pub fill: FillVisual,
    /// Hidden form fields as `(name, value)` pairs.
    pub form_fields: [(&'static str, String); 2],
}

impl SliderVisuals {
    /// Computes visuals for `snapshot`.
    pub fn compute(domain: &Domain, snapshot: RangeSnapshot, labels: &LabelFormat) -> Self {
        let thumbs = Thumb::ALL.map(|thumb| {
            let value = snapshot.get(thumb);
            ThumbVisual {
                thumb,
                value,
                offset_percent: value_to_percent(domain, value),
                label: labels.format(value),
            }
        });
        let left_percent = thumbs[0].offset_percent;
        let fill = FillVisual {
            left_percent,
            width_percent: thumbs[1].offset_percent - left_percent,
        };
        let form_fields =
            Thumb::ALL.map(|thumb| (thumb.form_field(), format_value(snapshot.get(thumb))));

        Self {
            thumbs,
            fill,
            form_fields,
        }
    }

    /// Visual state of `thumb`.
    pub fn thumb(&self, thumb: Thumb) -> &ThumbVisual {
        &self.thumbs[thumb.index()]
    }

    /// Value of the hidden form field called `name`.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form_fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The rendering capability a slider draws through.
///
/// Implementations own the visual elements (track, fill, thumbs, labels,
/// hidden form fields). They never change slider values; they only reflect
/// what the slider tells them.
pub trait SliderSurface {
    /// Current bounding box of the track, used to map pointer positions.
    fn track_bounds(&self) -> TrackBounds;

    /// Called once at construction with the static accessibility
    /// attributes of both thumbs.
    fn mount(&mut self, semantics: &[ThumbSemantics; 2]);

    /// Applies a full visual update.
    fn apply(&mut self, visuals: &SliderVisuals);

    /// Marks a thumb as visually active while it is dragged.
    fn set_thumb_active(&mut self, thumb: Thumb, active: bool);

    /// Routes all further events of `pointer` to `thumb`.
    fn capture_pointer(&mut self, thumb: Thumb, pointer: PointerId);

    /// Ends a capture started by [`SliderSurface::capture_pointer`].
    fn release_pointer(&mut self, thumb: Thumb, pointer: PointerId);

    /// Requests a cursor shape over the slider.
    fn set_cursor(&mut self, _icon: CursorIcon) {}

    /// Moves input focus to a thumb, or away from the slider.
    fn set_focus(&mut self, _thumb: Option<Thumb>) {}

    /// Delivers a change event to listeners attached on the host side.
    fn dispatch(&mut self, _event: &RangeChangeEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visuals_follow_the_snapshot() {
        let domain = Domain::new(0.0, 200.0, 1.0, None).unwrap();
        let labels = LabelFormat::new("$", " USD");
        let visuals =
            SliderVisuals::compute(&domain, RangeSnapshot { min: 50.0, max: 150.0 }, &labels);

        let min = visuals.thumb(Thumb::Min);
        assert_eq!(min.offset_percent, 25.0);
        assert_eq!(min.label, "$50 USD");
        let max = visuals.thumb(Thumb::Max);
        assert_eq!(max.offset_percent, 75.0);
        assert_eq!(max.value, 150.0);

        assert_eq!(visuals.fill.left_percent, 25.0);
        assert_eq!(visuals.fill.width_percent, 50.0);
        assert_eq!(visuals.form_field("min-value"), Some("50"));
        assert_eq!(visuals.form_field("max-value"), Some("150"));
        assert_eq!(visuals.form_field("other"), None);
    }

    #[test]
    fn values_render_without_trailing_zeroes() {
        assert_eq!(format_value(25.0), "25");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(LabelFormat::default().format(-3.25), "-3.25");
    }
}
