use winit::dpi::PhysicalSize;

use crate::coords::{ColorRgba, Viewport};
use crate::core::Scene;
use crate::device::GpuFrame;

use super::{FrameCmd, FrameCommands};

/// Counters for one encoded frame.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub(crate) struct EncodeStats {
    pub draws: u32,
    pub skipped: u32,
}

/// Records `cmds` into the frame's encoder as a single render pass.
///
/// Object ids are resolved through the scene. A draw whose program has no
/// pipeline or whose vertex array has no live buffer is skipped, as is every
/// draw when the viewport does not fit the target.
pub(crate) fn encode_frame(
    frame: &mut GpuFrame,
    target: PhysicalSize<u32>,
    viewport: Viewport,
    cmds: &FrameCommands,
    scene: &dyn Scene,
) -> EncodeStats {
    let clear = cmds.clear_color().unwrap_or(ColorRgba::black());
    let mut stats = EncodeStats::default();

    let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("kiln frame"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    let drawable = !viewport.is_empty() && viewport.fits_within(target.width, target.height);
    if drawable {
        pass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
    }

    let mut program_bound = false;
    let mut vertices_bound = false;

    for cmd in cmds.as_slice() {
        match *cmd {
            FrameCmd::Clear(_) | FrameCmd::Present => {}

            FrameCmd::UseProgram(id) => {
                program_bound = match scene.program(id).and_then(|p| p.pipeline()) {
                    Some(pipeline) => {
                        pass.set_pipeline(pipeline);
                        true
                    }
                    None => false,
                };
            }

            FrameCmd::BindVertexArray(id) => {
                let buffer = scene
                    .vertex_array(id)
                    .and_then(|va| va.bound_buffer())
                    .and_then(|b| scene.buffer(b));
                vertices_bound = match buffer {
                    Some(buffer) => {
                        pass.set_vertex_buffer(0, buffer.buffer().slice(..));
                        true
                    }
                    None => false,
                };
            }

            FrameCmd::DrawArrays { first, count, .. } => {
                if drawable && program_bound && vertices_bound {
                    pass.draw(first..first + count, 0..1);
                    stats.draws += 1;
                } else {
                    stats.skipped += 1;
                }
            }
        }
    }

    stats
}
