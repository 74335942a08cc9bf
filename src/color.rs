use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Bar palettes
// ---------------------------------------------------------------------------

/// A ramp between two HSL anchors. Hue is interpolated linearly in degrees,
/// so the direction of travel round the wheel is set by the anchor values.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    from: (f32, f32, f32),
    to: (f32, f32, f32),
}

impl Gradient {
    /// Blue for good weather through to red for bad.
    pub const COOL_WARM: Gradient = Gradient {
        from: (225.0, 0.65, 0.55),
        to: (375.0, 0.70, 0.50),
    };

    /// Dark purple through teal to yellow, one colour per weekday.
    pub const VIRIDIS: Gradient = Gradient {
        from: (285.0, 0.55, 0.30),
        to: (55.0, 0.85, 0.55),
    };

    fn at(&self, t: f32) -> Color32 {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        let hue = lerp(self.from.0, self.to.0).rem_euclid(360.0);
        let hsl = Hsl::new(hue, lerp(self.from.1, self.to.1), lerp(self.from.2, self.to.2));
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Sample `n` evenly spaced colours, both ends included.
    pub fn sample(&self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n)
                .map(|i| self.at(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}

/// Colours for a fixed set of category codes; codes outside the set get
/// the fallback.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    first_code: u8,
    colors: Vec<Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(gradient: Gradient, first_code: u8, n: usize) -> Self {
        CategoryColors {
            first_code,
            colors: gradient.sample(n),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, code: u8) -> Color32 {
        code.checked_sub(self.first_code)
            .and_then(|i| self.colors.get(i as usize))
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_requested_count() {
        assert!(Gradient::VIRIDIS.sample(0).is_empty());
        assert_eq!(Gradient::VIRIDIS.sample(1).len(), 1);
        let seven = Gradient::VIRIDIS.sample(7);
        assert_eq!(seven.len(), 7);
        assert_ne!(seven[0], seven[6]);
    }

    #[test]
    fn cool_warm_runs_blue_to_red() {
        let ends = Gradient::COOL_WARM.sample(2);
        assert!(ends[0].b() > ends[0].r());
        assert!(ends[1].r() > ends[1].b());
    }

    #[test]
    fn codes_outside_range_fall_back() {
        let colors = CategoryColors::new(Gradient::COOL_WARM, 1, 4);
        assert_ne!(colors.color_for(1), Color32::GRAY);
        assert_ne!(colors.color_for(4), Color32::GRAY);
        assert_eq!(colors.color_for(0), Color32::GRAY);
        assert_eq!(colors.color_for(5), Color32::GRAY);
    }
}
