//! Conversions between track pixels, percentages and domain values.
//!
//! Everything here is pure. Clamping against the sibling thumb is the value
//! model's job, not the mapper's.

use crate::value::Domain;

/// Upper limit for the decimal places taken from a step.
const MAX_STEP_PRECISION: usize = 12;

/// A pointer position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl PointerPosition {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the slider track in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackBounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent. Zero or negative widths map everything to the
    /// domain minimum.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl TrackBounds {
    /// Creates track bounds.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether `position` falls inside the box.
    pub fn contains(&self, position: PointerPosition) -> bool {
        let within_x = position.x >= self.left && position.x < self.left + self.width;
        let within_y = position.y >= self.top && position.y < self.top + self.height;
        within_x && within_y
    }

    /// Horizontal pixel coordinate of a percentage along the track.
    pub fn x_at_percent(&self, percent: f64) -> f64 {
        self.left + self.width.max(0.0) * percent / 100.0
    }
}

/// Position of `value` along the domain, in percent.
pub fn value_to_percent(domain: &Domain, value: f64) -> f64 {
    (value - domain.min()) / domain.span() * 100.0
}

/// Inverse of [`value_to_percent`], without snapping or clamping.
pub fn percent_to_value(domain: &Domain, percent: f64) -> f64 {
    percent.mul_add(domain.span() / 100.0, domain.min())
}

/// Snaps `value` to the nearest point of the step grid anchored at the domain
/// minimum, then clamps it into the domain.
///
/// Ties round away from the minimum. The result is rounded to the decimal
/// precision of the step so labels do not show floating-point noise.
pub fn snap_to_step(domain: &Domain, value: f64) -> f64 {
    let steps = ((value - domain.min()) / domain.step()).round();
    let snapped = steps.mul_add(domain.step(), domain.min());
    domain.clamp(quantize(domain, snapped))
}

/// Rounds `value` to the decimal precision of the domain's step and minimum,
/// dropping floating-point noise such as `0.30000000000000004`.
///
/// Does not move `value` onto the step grid; see [`snap_to_step`] for that.
pub fn quantize(domain: &Domain, value: f64) -> f64 {
    let decimals = step_precision(domain.step()).max(step_precision(domain.min()));
    round_to(value, decimals)
}

/// Maps a pointer's horizontal coordinate to a snapped domain value.
pub fn pointer_to_value(domain: &Domain, track: &TrackBounds, pointer_x: f64) -> f64 {
    if track.width <= 0.0 || !pointer_x.is_finite() {
        return domain.min();
    }
    let offset = (pointer_x - track.left).clamp(0.0, track.width);
    let percent = offset / track.width * 100.0;
    snap_to_step(domain, percent_to_value(domain, percent))
}

/// Number of decimal places in the shortest representation of `value`.
pub fn step_precision(value: f64) -> usize {
    let text = value.abs().to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
        .min(MAX_STEP_PRECISION)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(min: f64, max: f64, step: f64) -> Domain {
        Domain::new(min, max, step, None).unwrap()
    }

    #[test]
    fn percent_of_bounds_and_midpoint() {
        let d = domain(-50.0, 50.0, 1.0);
        assert_eq!(value_to_percent(&d, -50.0), 0.0);
        assert_eq!(value_to_percent(&d, 0.0), 50.0);
        assert_eq!(value_to_percent(&d, 50.0), 100.0);
    }

    #[test]
    fn percent_round_trip() {
        let d = domain(3.0, 17.5, 0.5);
        for value in [3.0, 4.25, 9.999, 17.5] {
            let back = percent_to_value(&d, value_to_percent(&d, value));
            assert!((back - value).abs() < 1e-9, "{value} came back as {back}");
        }
    }

    #[test]
    fn snaps_to_grid_anchored_at_min() {
        let d = domain(3.0, 23.0, 5.0);
        assert_eq!(snap_to_step(&d, 4.0), 3.0);
        assert_eq!(snap_to_step(&d, 6.0), 8.0);
        assert_eq!(snap_to_step(&d, 22.0), 23.0);
    }

    #[test]
    fn snap_ties_round_up() {
        let d = domain(0.0, 10.0, 1.0);
        assert_eq!(snap_to_step(&d, 2.5), 3.0);
        assert_eq!(snap_to_step(&d, 7.5), 8.0);
    }

    #[test]
    fn snap_removes_float_noise() {
        let d = domain(0.0, 1.0, 0.1);
        assert_eq!(snap_to_step(&d, 0.31), 0.3);
        assert_eq!(snap_to_step(&d, 0.7), 0.7);
    }

    #[test]
    fn quantize_keeps_off_grid_values() {
        let d = domain(0.0, 1.0, 0.1);
        assert_eq!(quantize(&d, 0.1 + 0.2), 0.3);
        let d = domain(0.0, 1.0, 0.25);
        assert_eq!(quantize(&d, 0.1 + 0.2), 0.3);
        let d = domain(0.5, 10.0, 1.0);
        assert_eq!(quantize(&d, 2.0 + 1e-12), 2.0);
        assert_eq!(quantize(&d, 2.5), 2.5);
    }

    #[test]
    fn pointer_is_clamped_to_track() {
        let d = domain(0.0, 100.0, 1.0);
        let track = TrackBounds::new(100.0, 0.0, 200.0, 20.0);
        assert_eq!(pointer_to_value(&d, &track, 0.0), 0.0);
        assert_eq!(pointer_to_value(&d, &track, 150.0), 25.0);
        assert_eq!(pointer_to_value(&d, &track, 201.2), 51.0);
        assert_eq!(pointer_to_value(&d, &track, 1000.0), 100.0);
    }

    #[test]
    fn degenerate_track_maps_to_min() {
        let d = domain(10.0, 20.0, 1.0);
        let track = TrackBounds::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(pointer_to_value(&d, &track, 50.0), 10.0);
    }

    #[test]
    fn step_precision_counts_decimals() {
        assert_eq!(step_precision(1.0), 0);
        assert_eq!(step_precision(0.25), 2);
        assert_eq!(step_precision(0.001), 3);
    }

    #[test]
    fn track_hit_testing() {
        let track = TrackBounds::new(10.0, 10.0, 100.0, 20.0);
        assert!(track.contains(PointerPosition::new(10.0, 10.0)));
        assert!(!track.contains(PointerPosition::new(110.0, 15.0)));
        assert!(!track.contains(PointerPosition::new(50.0, 40.0)));
        assert_eq!(track.x_at_percent(50.0), 60.0);
    }
}
