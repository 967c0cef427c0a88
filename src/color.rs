use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// Resolve a CSS/SVG colour name (`"blue"`, `"orange"`, ...) or a `#rrggbb` hex code.
pub fn parse_color(name: &str) -> Option<Color32> {
    let name = name.trim();
    let rgb: Srgb<u8> = match name.strip_prefix('#') {
        Some(hex) => hex.parse().ok()?,
        None => palette::named::from_str(&name.to_ascii_lowercase())?,
    };
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}
