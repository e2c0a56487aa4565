use super::helpers::{create_uniform_buffer, create_vertex_buffer};
use dragkit_core::{DrawItem, MAX_MARKERS};
use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerUniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
}

impl MarkerUniforms {
    /// Billboard axes come from the camera's world matrix (inverse view).
    pub fn new(view_proj: Mat4, view: Mat4) -> Self {
        let world = view.inverse();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_right: world.x_axis.truncate().normalize_or_zero().extend(0.0).to_array(),
            camera_up: world.y_axis.truncate().normalize_or_zero().extend(0.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MarkerInstance {
    center: [f32; 3],
    size: f32,
    color: [f32; 4],
}

impl From<&DrawItem> for MarkerInstance {
    fn from(item: &DrawItem) -> Self {
        Self {
            center: item.center.to_array(),
            size: item.size,
            color: item.color.to_array(),
        }
    }
}

/// Per-target buffers. Each render target gets its own so writes queued for
/// one pass never clobber another pass in the same submission.
pub(crate) struct MarkerBindings {
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

impl MarkerBindings {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let uniform_buffer = create_uniform_buffer(
            device,
            label,
            &MarkerUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY),
        );
        let instance_buffer = create_vertex_buffer(
            device,
            label,
            (MAX_MARKERS * std::mem::size_of::<MarkerInstance>()) as u64,
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            uniform_buffer,
            instance_buffer,
            bind_group,
            count: 0,
        }
    }

    pub fn upload(&mut self, queue: &wgpu::Queue, uniforms: &MarkerUniforms, items: &[DrawItem]) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let instances: Vec<MarkerInstance> =
            items.iter().take(MAX_MARKERS).map(MarkerInstance::from).collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.count = instances.len() as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}

pub(crate) fn marker_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("markers_bgl"),
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
    })
}

pub(crate) fn make_marker_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("markers_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
