use std::path::PathBuf;

use anyhow::{Context, Result};
use stipple::coords::{ColorRgba, Vec2};
use stipple::device::{GpuInit, HeadlessGpu, OffscreenTarget};
use stipple::logging::{init_logging, LoggingConfig};
use stipple::presets::{draw_circle_2d, draw_texture_2d};
use stipple::render::{GpuTexture, PresetRenderer, RenderCtx, RenderTarget};

const SIZE: u32 = 512;
const CHECKER: u32 = 64;
const CHECKER_CELL: u32 = 8;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("stipple-demo.png"));

    let gpu = HeadlessGpu::new_blocking(GpuInit::default())?;
    let info = gpu.adapter_info();
    log::info!("rendering on {} ({:?})", info.name, info.backend);

    let target = OffscreenTarget::new(&gpu, SIZE, SIZE)?;
    target.clear(&gpu, ColorRgba::from_u8(20, 20, 26, 255));

    let checker = checkerboard(CHECKER, CHECKER_CELL);
    let texture = GpuTexture::from_rgba8(gpu.device(), gpu.queue(), CHECKER, CHECKER, &checker)
        .context("failed to upload checkerboard texture")?;

    let mut renderer = PresetRenderer::new();
    let mut encoder = gpu.create_encoder();
    {
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), target.format(), target.viewport());
        let mut host = renderer.begin(ctx, RenderTarget::new(&mut encoder, target.view()));

        draw_texture_2d(&mut host, &texture, Vec2::new(32.0, 32.0), 192.0, 192.0)?;
        draw_texture_2d(&mut host, &texture, Vec2::new(480.0, 32.0), -96.0, 96.0)?;

        let center = Vec2::new(SIZE as f32 / 2.0, SIZE as f32 / 2.0);
        for (i, radius) in [4.0f32, 16.0, 48.0, 120.0, 230.0].into_iter().enumerate() {
            let t = i as f32 / 4.0;
            let color = ColorRgba::new(1.0 - t, 0.4 + 0.6 * t, 0.9, 1.0);
            draw_circle_2d(&mut host, center, color, radius, None)?;
        }
        draw_circle_2d(&mut host, Vec2::new(400.0, 400.0), ColorRgba::white(), 60.0, Some(6))?;

        log::info!("issued {} draw calls", host.draw_calls());
    }
    gpu.submit(encoder);

    let pixels = target.read_rgba8(&gpu)?;
    let (w, h) = target.size();
    image::RgbaImage::from_raw(w, h, pixels)
        .context("readback size does not match the target")?
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    log::info!("wrote {}", output.display());
    Ok(())
}

/// Two-tone RGBA8 checkerboard, `size` x `size` pixels.
fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if light { 230 } else { 40 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let px = checkerboard(4, 2);
        assert_eq!(px.len(), 4 * 4 * 4);
        assert_eq!(px[0], 230);
        // (2, 0) is in the next cell.
        assert_eq!(px[2 * 4], 40);
        // (2, 2) is back on a light cell.
        assert_eq!(px[(2 * 4 + 2) * 4], 230);
    }
}
