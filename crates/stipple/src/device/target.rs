use anyhow::{Context, Result};

use crate::coords::{ColorRgba, Viewport};

use super::HeadlessGpu;

/// RGBA8 texture that can be rendered into and copied back to the CPU.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(gpu: &HeadlessGpu, width: u32, height: u32) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "offscreen target has zero size");

        let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("stipple offscreen target"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self { texture, view, width, height })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        Self::FORMAT
    }

    /// Size in pixels; the offscreen target treats logical and physical pixels as equal.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fills the whole target with `color`.
    pub fn clear(&self, gpu: &HeadlessGpu, color: ColorRgba) {
        let mut encoder = gpu.create_encoder();
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stipple clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        gpu.submit(encoder);
    }

    /// Copies the target back to the CPU as tightly packed RGBA8 rows.
    pub fn read_rgba8(&self, gpu: &HeadlessGpu) -> Result<Vec<u8>> {
        let unpadded = self.width * 4;
        let padded = padded_bytes_per_row(self.width);

        let buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("stipple readback buffer"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = gpu.create_encoder();
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 },
        );
        gpu.submit(encoder);

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gpu.device()
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed to wait for readback")?;
        rx.recv()
            .context("readback callback was dropped")?
            .context("failed to map readback buffer")?;

        let pixels = {
            let data = slice.get_mapped_range();
            strip_row_padding(&data, unpadded as usize, padded as usize, self.height as usize)
        };
        buffer.unmap();

        Ok(pixels)
    }
}

/// Row pitch for texture-to-buffer copies.
fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

fn strip_row_padding(data: &[u8], unpadded: usize, padded: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(unpadded * rows);
    for row in data.chunks(padded).take(rows) {
        out.extend_from_slice(&row[..unpadded]);
    }
    out
}
