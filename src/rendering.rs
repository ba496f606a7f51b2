//! Rendering system with wgpu pipelines, GPU meshes and per-object uniforms.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use log::{debug, info};
use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::lighting::{LightingUniform, SceneLights};
use crate::mesh::{MeshData, Vertex};
use crate::params::{DrawMode, RenderConfig};
use crate::scene::{Material, Scene};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Per-frame uniforms shared by every pipeline (group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position, w = seconds since start
    pub view_pos: [f32; 4],
    pub lighting: LightingUniform,
    /// (wavelength, peak, dir.x, dir.z)
    pub wave: [f32; 4],
}

impl FrameUniforms {
    pub fn new(
        view_proj: Mat4,
        camera_pos: Vec3,
        time_s: f32,
        lights: &SceneLights,
        wave: [f32; 4],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            view_pos: camera_pos.extend(time_s).to_array(),
            lighting: lights.to_uniform(),
            wave,
        }
    }
}

/// Per-object uniforms (group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// (shininess, _, _, _)
    pub material: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(translation: Vec3, material: &Material) -> Self {
        let (color, shininess) = match *material {
            Material::Lit { color, shininess } => ([color[0], color[1], color[2], 1.0], shininess),
            Material::Flat { color } | Material::Water { color } => (color, 0.0),
        };
        Self {
            model: Mat4::from_translation(translation).to_cols_array_2d(),
            color,
            material: [shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// Vertex and index buffers for one mesh, uploaded once
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    draw_mode: DrawMode,
}

impl GpuMesh {
    /// Upload `mesh`; in [`DrawMode::Lines`] the triangle indices are
    /// expanded to a line list of their edges.
    pub fn new(device: &wgpu::Device, mesh: &MeshData, draw_mode: DrawMode, label: &str) -> Self {
        let line_indices;
        let indices: &[u32] = match draw_mode {
            DrawMode::Triangles => &mesh.indices,
            DrawMode::Lines => {
                line_indices = mesh.line_indices();
                &line_indices
            }
        };

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            draw_mode,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// One pipeline per primitive topology
struct PipelineSet {
    triangles: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
}

impl PipelineSet {
    fn get(&self, draw_mode: DrawMode) -> &wgpu::RenderPipeline {
        match draw_mode {
            DrawMode::Triangles => &self.triangles,
            DrawMode::Lines => &self.lines,
        }
    }
}

/// Shader entry points and blend state for one material kind
struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
}

struct ObjectBinding {
    mesh: usize,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    lit_pipelines: PipelineSet,
    flat_pipelines: PipelineSet,
    water_pipelines: PipelineSet,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    objects: Vec<ObjectBinding>,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create new rendering system and upload every mesh in `scene`
    pub async fn new(
        window: std::sync::Arc<winit::window::Window>,
        scene: &Scene,
        render_config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Window must have 'static lifetime via Arc
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("water.wgsl").into()),
        });

        // Group 0: per-frame camera, lights and wave
        let frame_bind_group_layout = uniform_layout(&device, "Frame Bind Group Layout");
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Group 1: per-object transform and material
        let object_bind_group_layout = uniform_layout(&device, "Object Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let build = |desc: PipelineDesc| PipelineSet {
            triangles: create_pipeline(
                &device,
                &pipeline_layout,
                &desc,
                config.format,
                wgpu::PrimitiveTopology::TriangleList,
            ),
            lines: create_pipeline(
                &device,
                &pipeline_layout,
                &desc,
                config.format,
                wgpu::PrimitiveTopology::LineList,
            ),
        };

        let lit_pipelines = build(PipelineDesc {
            label: "Lit",
            module: &shader,
            vs_entry: "vs_main",
            fs_entry: "fs_lit",
            blend: Some(wgpu::BlendState::REPLACE),
            depth_write: true,
        });
        let flat_pipelines = build(PipelineDesc {
            label: "Flat",
            module: &shader,
            vs_entry: "vs_main",
            fs_entry: "fs_flat",
            blend: Some(wgpu::BlendState::REPLACE),
            depth_write: true,
        });
        let water_pipelines = build(PipelineDesc {
            label: "Water",
            module: &water_shader,
            vs_entry: "vs_water",
            fs_entry: "fs_water",
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_write: false,
        });

        let meshes: Vec<GpuMesh> = scene
            .meshes
            .iter()
            .map(|m| GpuMesh::new(&device, &m.data, m.draw_mode, m.label))
            .collect();

        let objects = scene
            .objects
            .iter()
            .map(|object| {
                let uniforms = ObjectUniforms::new(object.translation, &object.material);
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Uniform Buffer", object.name)),
                    contents: bytemuck::cast_slice(&[uniforms]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{} Bind Group", object.name)),
                    layout: &object_bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                ObjectBinding {
                    mesh: object.mesh.0,
                    buffer,
                    bind_group,
                }
            })
            .collect();

        debug!(
            "Uploaded {} meshes ({} indices) for {} objects",
            meshes.len(),
            meshes.iter().map(|m| m.index_count() as usize).sum::<usize>(),
            scene.objects.len()
        );

        let [r, g, b] = render_config.clear_color;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            lit_pipelines,
            flat_pipelines,
            water_pipelines,
            frame_buffer,
            frame_bind_group,
            meshes,
            objects,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Reconfigure the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
        debug!("Surface resized to {}x{}", width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn update_frame(&self, uniforms: &FrameUniforms) {
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Rewrite every object's transform and material from the scene
    pub fn update_objects(&self, scene: &Scene) {
        for (binding, object) in self.objects.iter().zip(&scene.objects) {
            let uniforms = ObjectUniforms::new(object.translation, &object.material);
            self.queue
                .write_buffer(&binding.buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }
    }

    /// Draw every object in scene order
    pub fn render(&self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for (binding, object) in self.objects.iter().zip(&scene.objects) {
                let mesh = &self.meshes[binding.mesh];
                let pipelines = match object.material {
                    Material::Lit { .. } => &self.lit_pipelines,
                    Material::Flat { .. } => &self.flat_pipelines,
                    Material::Water { .. } => &self.water_pipelines,
                };
                render_pass.set_pipeline(pipelines.get(mesh.draw_mode()));
                render_pass.set_bind_group(1, &binding.bind_group, &[]);
                mesh.draw(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    desc: &PipelineDesc,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} {:?} Pipeline", desc.label, topology)),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some(desc.vs_entry),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some(desc.fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Terrain and water are seen from below too
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
}
