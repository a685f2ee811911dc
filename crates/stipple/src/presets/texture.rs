use crate::coords::Vec2;
use crate::error::Result;
use crate::gpu::{batch_for_shader, push_pop, BuiltinShader, GpuHost, PrimType, Shader};

/// Unit quad corners, used for both positions and texture coordinates.
pub const QUAD_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

pub const QUAD_INDICES: [[u32; 3]; 2] = [[0, 1, 2], [2, 3, 0]];

/// Draws `texture` stretched over the rectangle with corner `position` and
/// size `width` x `height`.
///
/// Sizes are not validated: zero or negative extents produce a degenerate or
/// mirrored quad, which is left to the host rasterizer.
pub fn draw_texture_2d<H: GpuHost + ?Sized>(
    host: &mut H,
    texture: &H::Texture,
    position: Vec2,
    width: f32,
    height: f32,
) -> Result<()> {
    let batch = batch_for_shader(
        BuiltinShader::Image,
        PrimType::Tris,
        &[("pos", &QUAD_COORDS[..]), ("texCoord", &QUAD_COORDS[..])],
        Some(&QUAD_INDICES[..]),
    )?;

    let mut scope = push_pop(host);
    scope.translate(position);
    scope.scale(Vec2::new(width, height));

    let mut shader = Shader::from_builtin(BuiltinShader::Image);
    shader.uniform_sampler("image", texture)?;

    scope.draw(&batch, &shader)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrawError;
    use crate::gpu::testing::{Event, RecordingHost};
    use crate::gpu::MatrixStack;

    #[test]
    fn draws_two_indexed_triangles() {
        let mut host = RecordingHost::new();
        draw_texture_2d(&mut host, &42, Vec2::new(5.0, 6.0), 100.0, 50.0).unwrap();

        let draws = host.draws();
        assert_eq!(draws.len(), 1);
        let d = draws[0];
        assert_eq!(d.shader, BuiltinShader::Image);
        assert_eq!(d.prim, PrimType::Tris);
        assert_eq!(d.element_count, 6);
        assert_eq!(d.indices.as_deref(), Some(&[0, 1, 2, 2, 3, 0][..]));
        assert_eq!(d.image, Some(42));
        assert_eq!(d.color, None);
    }

    #[test]
    fn uv_matches_position() {
        let mut host = RecordingHost::new();
        draw_texture_2d(&mut host, &1, Vec2::zero(), 8.0, 8.0).unwrap();

        let d = host.draws()[0];
        assert_eq!(d.stride, 4);
        for v in d.vertices.chunks_exact(4) {
            assert_eq!(v[..2], v[2..]);
        }
    }

    #[test]
    fn quad_maps_onto_requested_rect() {
        let mut host = RecordingHost::new();
        draw_texture_2d(&mut host, &1, Vec2::new(5.0, 6.0), 100.0, 50.0).unwrap();

        assert_eq!(
            host.events[..3],
            [Event::Push, Event::Translate(Vec2::new(5.0, 6.0)), Event::Scale(Vec2::new(100.0, 50.0))]
        );
        let m = host.draws()[0].model;
        assert_eq!(m.transform_point(Vec2::new(0.0, 0.0)), Vec2::new(5.0, 6.0));
        assert_eq!(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(105.0, 56.0));
        assert_eq!(host.depth(), 0);
    }

    #[test]
    fn negative_and_zero_sizes_still_draw_six_indices() {
        for (w, h) in [(-10.0, 20.0), (0.0, 0.0), (-1.0, -1.0)] {
            let mut host = RecordingHost::new();
            draw_texture_2d(&mut host, &3, Vec2::zero(), w, h).unwrap();
            assert_eq!(host.draws()[0].element_count, 6);
            assert_eq!(host.depth(), 0);
        }
    }

    #[test]
    fn host_failure_propagates_and_restores_stack() {
        let mut host = RecordingHost::failing();
        let err = draw_texture_2d(&mut host, &3, Vec2::zero(), 1.0, 1.0).unwrap_err();
        assert!(matches!(err, DrawError::Host(_)));
        assert_eq!(host.depth(), 0);
        assert_eq!(host.events.last(), Some(&Event::Pop));
    }
}
