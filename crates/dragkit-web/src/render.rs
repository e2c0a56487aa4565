pub mod helpers;
pub(crate) mod markers;

use crate::reflector::ReflectorTarget;
use dragkit_core::{draw_list, Camera, ObjectId, ReflectionView, Reflector, Scene, CLEAR_ALPHA};
use helpers::{begin_clear_pass, create_color_texture};
use markers::{make_marker_pipeline, marker_bind_group_layout, MarkerBindings, MarkerUniforms};
use web_sys as web;

const REFLECTION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    marker_bgl: wgpu::BindGroupLayout,
    surface_pipeline: wgpu::RenderPipeline,
    reflection_pipeline: wgpu::RenderPipeline,
    bindings: MarkerBindings,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Transparent clear only shows through with a premultiplied surface
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("markers_shader"),
            source: wgpu::ShaderSource::Wgsl(dragkit_core::MARKERS_WGSL.into()),
        });
        let marker_bgl = marker_bind_group_layout(&device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("markers_pl"),
            bind_group_layouts: &[&marker_bgl],
            push_constant_ranges: &[],
        });
        let surface_pipeline = make_marker_pipeline(&device, &layout, &shader, format);
        let reflection_pipeline = make_marker_pipeline(&device, &layout, &shader, REFLECTION_FORMAT);
        let bindings = MarkerBindings::new(&device, &marker_bgl, "markers_main");

        log::info!("[gpu] surface {}x{} format {:?} alpha {:?}", width, height, format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            marker_bgl,
            surface_pipeline,
            reflection_pipeline,
            bindings,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: CLEAR_ALPHA,
            },
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn create_reflector_target(&self, reflector: &Reflector) -> ReflectorTarget {
        let (width, height) = reflector.texture_size();
        let (texture, view) = create_color_texture(
            &self.device,
            "reflector_tex",
            width,
            height,
            REFLECTION_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let bindings = MarkerBindings::new(&self.device, &self.marker_bgl, "markers_reflector");
        ReflectorTarget::new(texture, view, bindings, (width, height))
    }

    /// Draw the scene as seen by a mirrored camera into `target`, leaving out
    /// the mirror itself.
    pub fn render_reflection(
        &self,
        target: &mut ReflectorTarget,
        scene: &Scene,
        view: &ReflectionView,
        skip: ObjectId,
    ) {
        let items = draw_list(scene, view.eye, Some(skip));
        let uniforms = MarkerUniforms::new(view.view_projection(), view.view);
        target.bindings.upload(&self.queue, &uniforms, &items);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("reflection_encoder"),
            });
        {
            let mut rpass = begin_clear_pass(
                &mut encoder,
                "reflection_pass",
                target.view(),
                wgpu::Color::TRANSPARENT,
            );
            target.bindings.draw(&mut rpass, &self.reflection_pipeline);
        }
        self.queue.submit(Some(encoder.finish()));
    }

    pub fn render<C: Camera + ?Sized>(
        &mut self,
        scene: &Scene,
        camera: &C,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let items = draw_list(scene, camera.world_position(), None);
        let uniforms = MarkerUniforms::new(camera.view_projection(), camera.view_matrix());
        self.bindings.upload(&self.queue, &uniforms, &items);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = begin_clear_pass(&mut encoder, "scene_pass", &view, self.clear_color);
            self.bindings.draw(&mut rpass, &self.surface_pipeline);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
