//! Discovers sliders in an in-memory document, scripts some input and prints
//! what a host would draw.
//!
//! Run with `RUST_LOG=duo_slider=trace` to follow every drag update.

use duo_slider::{
    AutoDiscovery, CallbackRegistry, ContainerElement, HeadlessSurface, Key, MARKER_ATTRIBUTE,
    NamedKey, PointerEvent, PointerId, PointerPosition, PointerTarget, RangeSlider, RangeSnapshot,
    Thumb, TrackBounds,
};
use tracing::info;

const TRACK: TrackBounds = TrackBounds::new(20.0, 40.0, 400.0, 24.0);

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,example=info,duo_slider=debug")
        {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("warn"),
        },
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn document() -> Vec<HeadlessSurface> {
    vec![
        HeadlessSurface::new(TRACK)
            .with_attribute("id", "price")
            .with_attribute(MARKER_ATTRIBUTE, "")
            .with_attribute("data-min", "0")
            .with_attribute("data-max", "1000")
            .with_attribute("data-step", "10")
            .with_attribute("data-min-value", "200")
            .with_attribute("data-max-value", "800")
            .with_attribute("data-label-prefix", "$")
            .with_attribute("data-on-change", "priceChanged"),
        HeadlessSurface::new(TRACK).with_attribute("id", "sidebar"),
        HeadlessSurface::new(TRACK)
            .with_attribute("id", "temperature")
            .with_attribute(MARKER_ATTRIBUTE, "")
            .with_attribute("data-min", "-20")
            .with_attribute("data-max", "40")
            .with_attribute("data-step", "0.5")
            .with_attribute("data-min-value", "18")
            .with_attribute("data-max-value", "24")
            .with_attribute("data-label-suffix", "°C")
            .with_attribute("data-min-separation", "2")
            .with_attribute("data-on-change", "missingHandler"),
        HeadlessSurface::new(TRACK)
            .with_attribute("id", "broken")
            .with_attribute(MARKER_ATTRIBUTE, "")
            .with_attribute("data-min", "10")
            .with_attribute("data-max", "5"),
    ]
}

fn print_slider(slider: &RangeSlider<HeadlessSurface>) {
    let id = slider.surface().attribute("id").unwrap_or_default();
    println!("{id:>12} {}", slider.surface().render_text());
}

fn drag(slider: &mut RangeSlider<HeadlessSurface>, target: PointerTarget, from: f64, to: f64) {
    let mouse = PointerId(0);
    let y = TRACK.top + TRACK.height / 2.0;
    slider.handle_pointer(PointerEvent::pressed(
        mouse,
        PointerPosition::new(from, y),
        target,
    ));
    for step in 1..=4 {
        let x = from + (to - from) * f64::from(step) / 4.0;
        slider.handle_pointer(PointerEvent::moved(mouse, PointerPosition::new(x, y)));
    }
    slider.handle_pointer(PointerEvent::released(mouse, PointerPosition::new(to, y)));
}

fn main() {
    init_tracing();

    let mut registry = CallbackRegistry::new();
    registry.register("priceChanged", |range: RangeSnapshot| {
        info!(min = range.min, max = range.max, "price range changed");
    });

    let mut discovery = AutoDiscovery::new();
    let mut discovered = discovery.scan(document(), &registry);
    for failure in &discovered.failures {
        let id = failure.container.attribute("id").unwrap_or_default();
        println!("container #{} ({id}) rejected: {}", failure.index, failure.error);
    }

    println!("initial");
    discovered.sliders.iter().for_each(print_slider);

    if let Some(price) = discovered.sliders.first_mut() {
        drag(price, PointerTarget::Thumb(Thumb::Min), 100.0, 260.0);
        drag(price, PointerTarget::Track, 400.0, 380.0);
        price.focus(Thumb::Max);
        price.handle_key(&Key::Named(NamedKey::PageDown));
    }
    if let Some(temperature) = discovered.sliders.get_mut(1) {
        temperature.on_change(|range| {
            info!(min = range.min, max = range.max, "temperature range changed");
        });
        temperature.focus(Thumb::Min);
        for _ in 0..12 {
            temperature.handle_key(&Key::Named(NamedKey::ArrowRight));
        }
    }

    println!("after input");
    discovered.sliders.iter().for_each(print_slider);
}
