//! Elevation-based vertex coloring.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGBA, each channel in [0, 1].
pub type Rgba = [f32; 4];

/// Maps a normalized height in [0, 1] to a color.
pub trait Gradient {
    fn evaluate(&self, t: f32) -> Rgba;
}

impl<F> Gradient for F
where
    F: Fn(f32) -> Rgba,
{
    fn evaluate(&self, t: f32) -> Rgba {
        self(t)
    }
}

/// Linear blend of two colors.
pub fn blend_colors(a: &Rgba, b: &Rgba, t: f32) -> Rgba {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// A color key at a position along the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

#[derive(Deserialize)]
struct RawGradient {
    stops: Vec<GradientStop>,
}

impl From<RawGradient> for ColorGradient {
    fn from(raw: RawGradient) -> Self {
        Self::new(raw.stops)
    }
}

/// Piecewise-linear gradient through sorted color stops.
///
/// Below the first stop and above the last the end colors hold. An empty
/// gradient evaluates to opaque white.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGradient")]
pub struct ColorGradient {
    stops: Vec<GradientStop>,
}

impl ColorGradient {
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// `low` at 0 fading to `high` at 1.
    pub fn two_stop(low: Rgba, high: Rgba) -> Self {
        Self::new(vec![GradientStop::new(0.0, low), GradientStop::new(1.0, high)])
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

impl Default for ColorGradient {
    /// Lowland grass through rock to snow caps.
    fn default() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, [0.12, 0.22, 0.06, 1.0]),
            GradientStop::new(0.35, [0.28, 0.42, 0.15, 1.0]),
            GradientStop::new(0.6, [0.24, 0.18, 0.12, 1.0]),
            GradientStop::new(0.8, [0.48, 0.45, 0.42, 1.0]),
            GradientStop::new(1.0, [0.95, 0.95, 0.97, 1.0]),
        ])
    }
}

impl Gradient for ColorGradient {
    fn evaluate(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [1.0; 4];
        };
        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        let upper = self.stops.partition_point(|stop| stop.position < t);
        let (a, b) = (&self.stops[upper - 1], &self.stops[upper]);
        let span = b.position - a.position;
        if span <= 0.0 {
            return b.color;
        }
        blend_colors(&a.color, &b.color, (t - a.position) / span)
    }
}

/// Colors vertices by their elevation relative to the whole mesh.
#[derive(Debug, Clone, Copy)]
pub struct ColorMapper<'a, G: ?Sized> {
    gradient: &'a G,
}

impl<'a, G: Gradient + ?Sized> ColorMapper<'a, G> {
    pub fn new(gradient: &'a G) -> Self {
        Self { gradient }
    }

    /// Normalizes each vertex height by the global min/max and looks it up
    /// in the gradient. A perfectly flat mesh maps every vertex to t = 0.
    pub fn map(&self, positions: &[Vec3]) -> Vec<Rgba> {
        let (min, max) = positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        let range = max - min;

        positions
            .iter()
            .map(|p| {
                let t = if range > 0.0 {
                    ((p.y - min) / range).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                self.gradient.evaluate(t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
    const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

    fn grey(t: f32) -> Rgba {
        [t, t, t, 1.0]
    }

    #[test]
    fn test_two_stop_interpolation() {
        let gradient = ColorGradient::two_stop(BLACK, WHITE);
        assert_eq!(gradient.evaluate(0.0), BLACK);
        assert_eq!(gradient.evaluate(1.0), WHITE);
        assert_eq!(gradient.evaluate(0.25), [0.25, 0.25, 0.25, 1.0]);
    }

    #[test]
    fn test_multi_stop_segments() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let gradient = ColorGradient::new(vec![
            GradientStop::new(1.0, WHITE),
            GradientStop::new(0.0, BLACK),
            GradientStop::new(0.5, red),
        ]);
        assert_eq!(gradient.evaluate(0.5), red);
        assert_eq!(gradient.evaluate(0.75), [1.0, 0.5, 0.5, 1.0]);
        assert_eq!(gradient.evaluate(0.25), [0.5, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_holds_end_colors() {
        let gradient = ColorGradient::new(vec![
            GradientStop::new(0.2, BLACK),
            GradientStop::new(0.8, WHITE),
        ]);
        assert_eq!(gradient.evaluate(0.0), BLACK);
        assert_eq!(gradient.evaluate(0.9), WHITE);
        assert_eq!(gradient.evaluate(f32::NAN), BLACK);
    }

    #[test]
    fn test_empty_gradient_is_white() {
        assert_eq!(ColorGradient::new(Vec::new()).evaluate(0.3), WHITE);
    }

    #[test]
    fn test_mapper_normalizes_by_min_max() {
        let positions = [
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(1.0, 20.0, 0.0),
            Vec3::new(2.0, 15.0, 0.0),
        ];
        let colors = ColorMapper::new(&grey).map(&positions);
        assert_eq!(colors, vec![grey(0.0), grey(1.0), grey(0.5)]);
    }

    #[test]
    fn test_flat_mesh_maps_to_zero() {
        let positions = vec![Vec3::new(0.0, 4.0, 0.0); 5];
        let colors = ColorMapper::new(&grey).map(&positions);
        assert!(colors.iter().all(|c| *c == grey(0.0)));
    }

    #[test]
    fn test_mapper_with_color_gradient() {
        let gradient = ColorGradient::two_stop(BLACK, WHITE);
        let positions = [Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let colors = ColorMapper::new(&gradient).map(&positions);
        assert_eq!(colors, vec![BLACK, WHITE]);
    }

    #[test]
    fn test_gradient_json_is_sorted_on_load() {
        let gradient: ColorGradient = serde_json::from_str(
            r#"{ "stops": [
                { "position": 1.0, "color": [1.0, 1.0, 1.0, 1.0] },
                { "position": 0.0, "color": [0.0, 0.0, 0.0, 1.0] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(gradient, ColorGradient::two_stop(BLACK, WHITE));
    }
}
