use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use mapwalk_common::{Color, Segment};
use mapwalk_render::Canvas;

use crate::gpu::Gpu;
use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    screen_to_clip: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
    color: [f32; 4],
}

/// Two triangles covering the quad of a stroked segment.
fn line_vertices(segment: Segment, width: f32, color: Color) -> [Vertex; 6] {
    let dir = (segment.b - segment.a).normalize_or_zero();
    let normal = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad_vertices(
        segment.a + normal,
        segment.b + normal,
        segment.b - normal,
        segment.a - normal,
        color,
    )
}

/// Two triangles covering a filled axis-aligned rectangle.
fn rect_vertices(x: f32, y: f32, w: f32, h: f32, color: Color) -> [Vertex; 6] {
    quad_vertices(
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
        color,
    )
}

/// A rectangle outline as four stroked edges.
fn rect_outline_vertices(x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) -> Vec<Vertex> {
    let corners = [
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ];
    let mut verts = Vec::with_capacity(24);
    for i in 0..4 {
        let edge = Segment::new(corners[i], corners[(i + 1) % 4]);
        verts.extend_from_slice(&line_vertices(edge, width, color));
    }
    verts
}

fn quad_vertices(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) -> [Vertex; 6] {
    let color = color.to_array();
    let v = |p: Vec2| Vertex {
        position: [p.x, p.y],
        color,
    };
    [v(a), v(b), v(c), v(c), v(d), v(a)]
}

/// A [`Canvas`] that batches calls into one triangle list and draws it in a
/// single render pass.
pub struct WgpuCanvas {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    max_vertices: u32,
    clear_color: Color,
    vertices: Vec<Vertex>,
}

impl WgpuCanvas {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        use wgpu::util::DeviceExt;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("canvas_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                screen_to_clip: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("canvas_uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("canvas_uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("canvas_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("canvas_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CANVAS_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("canvas_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Plenty for a frame: six walls plus the marker need well under a
        // hundred vertices.
        let max_vertices = 4096u32;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("canvas_vertex_buffer"),
            size: (max_vertices as u64) * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            max_vertices,
            clear_color: Color::BACKGROUND,
            vertices: Vec::new(),
        }
    }

    /// Submit the batched frame to the given surface texture view.
    pub fn render(&mut self, gpu: &Gpu, view: &wgpu::TextureView) {
        let (width, height) = gpu.surface_size();
        let screen_to_clip =
            Mat4::orthographic_rh(0.0, width as f32, height as f32, 0.0, -1.0, 1.0);
        gpu.queue().write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                screen_to_clip: screen_to_clip.to_cols_array_2d(),
            }),
        );

        self.vertices.truncate(self.max_vertices as usize);
        if !self.vertices.is_empty() {
            gpu.queue()
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }

        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("canvas_encoder"),
            });

        {
            let clear = self.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("canvas_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..self.vertices.len() as u32, 0..1);
            }
        }

        gpu.queue().submit(std::iter::once(encoder.finish()));
        self.vertices.clear();
    }
}

impl Canvas for WgpuCanvas {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn stroke_line(&mut self, segment: Segment, width: f32, color: Color) {
        self.vertices
            .extend_from_slice(&line_vertices(segment, width, color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.vertices
            .extend_from_slice(&rect_vertices(x, y, w, h, color));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        self.vertices
            .extend(rect_outline_vertices(x, y, w, h, width, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_quad_spans_the_stroke_width() {
        let segment = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let verts = line_vertices(segment, 4.0, Color::WALL_GRAY);
        assert_eq!(verts.len(), 6);
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        let min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min, -2.0);
        assert_eq!(max, 2.0);
    }

    #[test]
    fn degenerate_line_collapses_without_nan() {
        let segment = Segment::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        let verts = line_vertices(segment, 4.0, Color::WALL_GRAY);
        for v in verts {
            assert!(v.position[0].is_finite());
            assert!(v.position[1].is_finite());
        }
    }

    #[test]
    fn rect_fill_covers_the_corners() {
        let verts = rect_vertices(1.0, 2.0, 3.0, 4.0, Color::MARKER_FILL);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&1.0) && xs.contains(&4.0));
        assert!(ys.contains(&2.0) && ys.contains(&6.0));
    }

    #[test]
    fn rect_outline_strokes_four_edges() {
        let verts = rect_outline_vertices(0.0, 0.0, 10.0, 10.0, 1.0, Color::MARKER_OUTLINE);
        assert_eq!(verts.len(), 24);
    }

    #[test]
    fn vertices_carry_the_requested_color() {
        let verts = rect_vertices(0.0, 0.0, 1.0, 1.0, Color::WALL_GRAY);
        for v in verts {
            assert_eq!(v.color, Color::WALL_GRAY.to_array());
        }
    }
}
