use std::f64::consts::PI;

use crate::coords::{ColorRgba, Vec2};
use crate::error::{DrawError, Result};
use crate::gpu::{push_pop, Batch, BuiltinShader, GpuHost, PrimType, Shader, VertBuf, VertFormat};

/// Segment-count policy for circles drawn without an explicit count.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleConfig {
    /// Maximum distance between the polygon and the true circle, in
    /// model units before the radius scale.
    pub max_pixel_error: f32,
    pub min_segments: u32,
    pub max_segments: u32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            // TODO: scale by the display scale factor once hosts expose it.
            max_pixel_error: 0.25,
            min_segments: 8,
            max_segments: 1000,
        }
    }
}

/// Number of segments that keeps a circle of `radius` within
/// `config.max_pixel_error` of the true outline.
///
/// The result is always inside `[min_segments, max_segments]`. Radii for
/// which the formula has no finite answer (zero, negative, or smaller than
/// half the error) resolve to the lower bound.
pub fn auto_segments(radius: f32, config: &CircleConfig) -> u32 {
    let ratio = 1.0 - f64::from(config.max_pixel_error) / f64::from(radius);
    let segments = (PI / ratio.acos()).ceil();

    // `as` saturates: NaN becomes 0 and +inf becomes u32::MAX.
    (segments as u32).max(config.min_segments).min(config.max_segments)
}

/// Unit-circle outline with `segments` vertices, starting at (0, 1) and
/// running clockwise in a +Y-up frame.
///
/// The angular step is `2π / (segments - 1)`, so the last vertex lands back
/// on the first and closes the line strip. It is written as an exact copy of
/// the first. A single segment divides by zero and yields a non-finite vertex.
pub fn circle_vertices(segments: u32) -> Vec<[f32; 2]> {
    let n = segments as usize;
    let step = (1.0 / (f64::from(segments) - 1.0)) * (PI * 2.0);

    let mut verts: Vec<[f32; 2]> = (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            [angle.sin() as f32, angle.cos() as f32]
        })
        .collect();

    if n > 1 {
        verts[n - 1] = verts[0];
    }
    verts
}

/// Draws a circle outline with the default [`CircleConfig`].
///
/// `segments = None` derives the count from `radius`; an explicit count must
/// be positive.
pub fn draw_circle_2d<H: GpuHost + ?Sized>(
    host: &mut H,
    position: Vec2,
    color: ColorRgba,
    radius: f32,
    segments: Option<i32>,
) -> Result<()> {
    draw_circle_2d_with(host, &CircleConfig::default(), position, color, radius, segments)
}

/// Draws a circle outline using `config` for derived segment counts.
pub fn draw_circle_2d_with<H: GpuHost + ?Sized>(
    host: &mut H,
    config: &CircleConfig,
    position: Vec2,
    color: ColorRgba,
    radius: f32,
    segments: Option<i32>,
) -> Result<()> {
    let segments = match segments {
        None => {
            let n = auto_segments(radius, config);
            log::trace!("circle radius {radius}: {n} segments");
            n
        }
        Some(n) if n <= 0 => {
            return Err(DrawError::InvalidArgument(format!(
                "segment count must be greater than 0, got {n}"
            )));
        }
        Some(n) => n as u32,
    };

    let mut scope = push_pop(host);
    scope.translate(position);
    scope.scale_uniform(radius);

    let verts = circle_vertices(segments);

    let mut format = VertFormat::new();
    let pos = format.attr_add("pos", 2)?;
    let mut vbo = VertBuf::new(format, verts.len());
    vbo.attr_fill(pos, &verts)?;
    let batch = Batch::new(PrimType::LineStrip, vbo);

    let mut shader = Shader::from_builtin(BuiltinShader::UniformColor);
    shader.uniform_float("color", color.to_array())?;

    scope.draw(&batch, &shader)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::testing::{Event, RecordingHost};
    use crate::gpu::MatrixStack;

    const WHITE: ColorRgba = ColorRgba::white();

    #[test]
    fn derived_count_for_radius_two() {
        // ceil(π / acos(0.875)) = 7, raised to the minimum of 8.
        assert_eq!(auto_segments(2.0, &CircleConfig::default()), 8);
    }

    #[test]
    fn derived_count_grows_with_radius() {
        let cfg = CircleConfig::default();
        assert_eq!(auto_segments(50.0, &cfg), 32);
        assert!(auto_segments(200.0, &cfg) > auto_segments(50.0, &cfg));
    }

    #[test]
    fn derived_count_stays_in_bounds() {
        let cfg = CircleConfig::default();
        let radii = [
            1e-6, 0.1, 0.125, 0.13, 0.5, 1.0, 2.0, 10.0, 100.0, 1e4, 1e6, 1e9, 0.0, -1.0, -50.0,
            f32::NAN, f32::INFINITY,
        ];
        for r in radii {
            let n = auto_segments(r, &cfg);
            assert!((8..=1000).contains(&n), "radius {r} gave {n}");
        }
    }

    #[test]
    fn huge_radius_hits_upper_bound() {
        assert_eq!(auto_segments(1e9, &CircleConfig::default()), 1000);
    }

    #[test]
    fn smaller_error_never_reduces_segments() {
        let errors = [1.0, 0.5, 0.25, 0.1, 0.05, 0.01];
        for radius in [1.0f32, 3.0, 17.0, 250.0, 4000.0] {
            let counts: Vec<u32> = errors
                .iter()
                .map(|&e| auto_segments(radius, &CircleConfig { max_pixel_error: e, ..Default::default() }))
                .collect();
            assert!(counts.windows(2).all(|w| w[0] <= w[1]), "radius {radius}: {counts:?}");
        }
    }

    #[test]
    fn vertices_close_the_loop() {
        for n in [2u32, 3, 8, 45, 1000] {
            let v = circle_vertices(n);
            assert_eq!(v.len(), n as usize);
            assert_eq!(v[0], [0.0, 1.0]);
            assert_eq!(v[0], v[n as usize - 1]);
        }
    }

    #[test]
    fn vertices_lie_on_unit_circle() {
        for [x, y] in circle_vertices(64) {
            assert!(((x * x + y * y) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn single_segment_yields_non_finite_vertex() {
        let v = circle_vertices(1);
        assert_eq!(v.len(), 1);
        assert!(!v[0][0].is_finite());
    }

    #[test]
    fn draw_issues_one_line_strip() {
        let mut host = RecordingHost::new();
        let color = ColorRgba::new(1.0, 0.0, 0.5, 1.0);
        draw_circle_2d(&mut host, Vec2::new(10.0, 20.0), color, 2.0, None).unwrap();

        let draws = host.draws();
        assert_eq!(draws.len(), 1);
        let d = draws[0];
        assert_eq!(d.shader, BuiltinShader::UniformColor);
        assert_eq!(d.prim, PrimType::LineStrip);
        assert_eq!(d.element_count, 8);
        assert_eq!(d.indices, None);
        assert_eq!(d.color, Some([1.0, 0.0, 0.5, 1.0]));
        assert_eq!(d.depth, 1);

        // Unit vertex (0, 1) lands one radius below the center in model space.
        assert_eq!(d.model.transform_point(Vec2::new(0.0, 1.0)), Vec2::new(10.0, 22.0));
        let p = d.positions();
        assert_eq!(p.first(), p.last());
    }

    #[test]
    fn transform_is_translate_then_uniform_scale() {
        let mut host = RecordingHost::new();
        draw_circle_2d(&mut host, Vec2::new(3.0, 4.0), WHITE, 5.0, Some(16)).unwrap();

        assert_eq!(
            host.events[..3],
            [Event::Push, Event::Translate(Vec2::new(3.0, 4.0)), Event::Scale(Vec2::splat(5.0))]
        );
        assert_eq!(host.events.last(), Some(&Event::Pop));
        assert_eq!(host.draws()[0].element_count, 16);
    }

    #[test]
    fn explicit_count_is_not_clamped() {
        for n in [1, 3, 5000] {
            let mut host = RecordingHost::new();
            draw_circle_2d(&mut host, Vec2::zero(), WHITE, 2.0, Some(n)).unwrap();
            assert_eq!(host.draws()[0].element_count, n as usize);
        }
    }

    #[test]
    fn non_positive_explicit_count_is_rejected() {
        for n in [0, -1, i32::MIN] {
            let mut host = RecordingHost::new();
            let err = draw_circle_2d(&mut host, Vec2::zero(), WHITE, 2.0, Some(n)).unwrap_err();
            assert!(matches!(err, DrawError::InvalidArgument(_)));
            assert!(host.events.is_empty());
            assert_eq!(host.depth(), 0);
        }
    }

    #[test]
    fn derived_count_never_fails() {
        for r in [0.0, -3.0, 0.01, 1e7] {
            let mut host = RecordingHost::new();
            draw_circle_2d(&mut host, Vec2::zero(), WHITE, r, None).unwrap();
            assert_eq!(host.draws().len(), 1);
        }
    }

    #[test]
    fn custom_config_changes_derived_count() {
        let mut host = RecordingHost::new();
        let cfg = CircleConfig { min_segments: 32, ..Default::default() };
        draw_circle_2d_with(&mut host, &cfg, Vec2::zero(), WHITE, 2.0, None).unwrap();
        assert_eq!(host.draws()[0].element_count, 32);
    }

    #[test]
    fn host_failure_propagates_and_restores_stack() {
        let mut host = RecordingHost::failing();
        host.push();
        let err = draw_circle_2d(&mut host, Vec2::zero(), WHITE, 2.0, None).unwrap_err();

        assert!(matches!(&err, DrawError::Host(e) if e.to_string() == "device lost"));
        assert_eq!(host.depth(), 1);
    }
}
