use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
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
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging map for correlation heatmaps
// ---------------------------------------------------------------------------

/// Cool-warm colour for a coefficient in `[-1, 1]`: blue for negative, light
/// grey at zero, red for positive. Undefined coefficients are a darker grey.
pub fn correlation_color(r: Option<f64>) -> Color32 {
    let Some(r) = r.filter(|r| r.is_finite()) else {
        return Color32::GRAY;
    };
    let cool = Srgb::new(0.23_f32, 0.30, 0.75).into_linear();
    let warm = Srgb::new(0.71_f32, 0.02, 0.15).into_linear();
    let neutral = Srgb::new(0.87_f32, 0.87, 0.87).into_linear();

    let t = r.clamp(-1.0, 1.0).abs() as f32;
    let end = if r < 0.0 { cool } else { warm };
    let mixed: LinSrgb = neutral.mix(end, t);
    to_color32(Srgb::from_linear(mixed))
}

/// Text colour that stays readable on top of `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(10);
        assert_eq!(colors.len(), 10);
        assert_ne!(colors[0], colors[5]);
    }

    #[test]
    fn test_correlation_color_ends() {
        assert_eq!(correlation_color(None), Color32::GRAY);
        let pos = correlation_color(Some(1.0));
        let neg = correlation_color(Some(-1.0));
        assert!(pos.r() > pos.b());
        assert!(neg.b() > neg.r());
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
    }
}
