use std::borrow::Cow;

use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::{GpuContext, PassDesc, PipelineSpec, ShaderSource};

use super::surface;
use super::{GpuFrame, GpuInit, InitError, SurfaceErrorAction};

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - requests an adapter, then creates and stores Instance/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
pub struct Gpu<'w> {
    /// Kept alive for the surface's sake.
    _instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// The window must outlive the `Gpu`; the runtime stores both together.
    surface: wgpu::Surface<'w>,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

/// Shader module plus the (empty) pipeline layout both pipelines share.
pub struct GpuProgram {
    module: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. Any failure here
    /// means the environment cannot render at all.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, InitError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(InitError::ZeroSize);
        }

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            power_preference,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(InitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(InitError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(InitError::NoDevice)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb)
            .ok_or(InitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&surface_caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!("surface configured: {}x{} {:?}", size.width, size.height, format);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Acquires the next surface texture and opens an encoder for it.
    ///
    /// The returned frame owns the surface texture until `submit` presents it.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Maps a `SurfaceError` to an action, reconfiguring when the surface
    /// was lost or went stale.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::surface_error_action(&err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

impl<'w> GpuContext for Gpu<'w> {
    type Program = GpuProgram;
    type Pipeline = wgpu::RenderPipeline;
    type Frame = GpuFrame;

    fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    fn create_program(&self, source: &ShaderSource) -> GpuProgram {
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&*source.label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&*source.code)),
        });

        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("trigon pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        GpuProgram { module, layout }
    }

    fn create_pipeline(&self, program: &GpuProgram, spec: &PipelineSpec<'_>) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(spec.label),
            layout: Some(&program.layout),

            vertex: wgpu::VertexState {
                module: &program.module,
                entry_point: Some(spec.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &program.module,
                entry_point: Some(spec.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: spec.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: spec.primitive,
            depth_stencil: None,
            multisample: spec.multisample,
            multiview_mask: None,
            cache: None,
        })
    }

    fn acquire_frame(&mut self) -> Option<GpuFrame> {
        let err = match self.begin_frame() {
            Ok(frame) => return Some(frame),
            Err(err) => err,
        };

        match self.handle_surface_error(err) {
            SurfaceErrorAction::OutOfMemory => log::warn!("surface out of memory; frame skipped"),
            action => log::trace!("surface unavailable ({action:?}); frame skipped"),
        }
        None
    }

    fn record_pass(&self, frame: &mut GpuFrame, pass: &PassDesc<'_, wgpu::RenderPipeline>) {
        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(pass.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pass.pipeline);
        rpass.draw(pass.draw.vertices.clone(), pass.draw.instances.clone());
    }

    fn submit(&mut self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Reconfigures the surface after a resize.
    ///
    /// A 0x0 size (minimized window) only updates the recorded size.
    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if surface::apply_resize(&mut self.config, new_size) {
            self.surface.configure(&self.device, &self.config);
        }
    }
}
