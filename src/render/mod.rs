// -- std includes
use std::mem::size_of;

// -- crate includes
use anyhow::{anyhow, bail, Context};
use log::{debug, error, info, trace};

use crate::config::SRenderConfig;
use crate::math::{self, SCamera, STransform};
use crate::niced3d12 as n12;
use crate::texture::STextureData;
use crate::typeyd3d12 as t12;
use crate::typeyd3d12::TBackend;

pub const SRV_HEAP_CAPACITY: usize = 128;
pub const OVERLAY_SRV_SLOT: usize = 0;
pub const TEXTURE_SRV_SLOT: usize = 1;

pub const BACKBUFFER_RTV_FORMAT: t12::EDXGIFormat = t12::EDXGIFormat::R8G8B8A8UNormSRGB;
pub const DEPTH_FORMAT: t12::EDXGIFormat = t12::EDXGIFormat::D24UNormS8UInt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SVertex {
    pub position: [f32; 4],
    pub texcoord: [f32; 2],
}

pub const MESH_VERTICES: [SVertex; 6] = [
    SVertex { position: [-0.5, -0.5, 0.0, 1.0], texcoord: [0.0, 1.0] },
    SVertex { position: [0.0, 0.5, 0.0, 1.0], texcoord: [0.5, 0.0] },
    SVertex { position: [0.5, -0.5, 0.0, 1.0], texcoord: [1.0, 1.0] },
    SVertex { position: [-0.5, -0.5, 0.5, 1.0], texcoord: [0.0, 1.0] },
    SVertex { position: [0.0, 0.0, 0.0, 1.0], texcoord: [0.5, 0.0] },
    SVertex { position: [0.5, -0.5, -0.5, 1.0], texcoord: [1.0, 1.0] },
];

const MATERIAL_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// -- Hooks for whatever draws on top of the mesh (UI) and whatever drives it (game logic).
// -- The overlay owns slot 0 of the shader visible heap.
pub trait TFrameOverlay<B: TBackend> {
    fn attach(
        &mut self,
        _device: &n12::SDevice<B>,
        _srv_slot: &n12::SDescriptorAllocation,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn update(&mut self, _frame: u64) -> anyhow::Result<()> {
        Ok(())
    }

    // -- called with the back buffer bound as a render target, after the mesh draw
    fn draw(&mut self, _list: &mut n12::SCommandList<B>) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct SNoOverlay;

impl<B: TBackend> TFrameOverlay<B> for SNoOverlay {}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EFrameState {
    Idle,
    Recording,
    Submitted,
    Presented,
}

pub struct SRender<B: TBackend> {
    state: EFrameState,
    framecount: u64,
    isshutdown: bool,

    clear_colour: [f32; 4],
    aspect: f32,
    viewport: t12::SViewport,
    scissorrect: t12::SRect,

    camera: SCamera,
    mesh_transform: STransform,

    overlay: Box<dyn TFrameOverlay<B>>,

    pipeline: n12::SPipeline<B>,

    _vertex_buffer: n12::SResource<B>,
    vertex_buffer_view: t12::SVertexBufferView,
    material_buffer: n12::SResource<B>,
    wvp_buffer: n12::SResource<B>,
    texture: n12::SResource<B>,
    _depth_texture: n12::SResource<B>,

    rtvs: Vec<n12::SDescriptorAllocation>,
    dsv: n12::SDescriptorAllocation,
    texture_srv: n12::SDescriptorAllocation,

    srv_heap: n12::SDescriptorHeap<B>,
    _rtv_heap: n12::SDescriptorHeap<B>,
    _dsv_heap: n12::SDescriptorHeap<B>,

    swap_chain: n12::SSwapChain<B>,

    command_list: n12::SCommandList<B>,
    command_allocator: n12::SCommandAllocator<B>,
    fence: n12::SFence<B>,
    direct_command_queue: n12::SCommandQueue<B>,

    // -- everything above is created from the device, so it drops last
    device: n12::SDevice<B>,
}

impl<B: TBackend> SRender<B> {
    pub fn new(
        factory: &n12::SFactory<B>,
        window: &B::Window,
        config: &SRenderConfig,
        vertex_shader: Vec<u8>,
        pixel_shader: Vec<u8>,
        texture_data: &STextureData,
        mut overlay: Box<dyn TFrameOverlay<B>>,
    ) -> anyhow::Result<Self> {
        let adapter = factory.create_best_adapter()?;
        let device = adapter.create_device(config.d3d_debug)?;

        let direct_command_queue = device.create_command_queue(t12::ECommandListType::Direct)?;
        let swap_chain =
            factory.create_swap_chain(window, &direct_command_queue, config.width, config.height)?;

        // -- descriptor heaps
        let mut rtv_heap = device.create_descriptor_heap(
            t12::EDescriptorHeapType::RenderTarget,
            swap_chain.buffer_count(),
            false,
        )?;
        let mut srv_heap = device.create_descriptor_heap(
            t12::EDescriptorHeapType::ConstantBufferShaderResourceUnorderedAccess,
            SRV_HEAP_CAPACITY,
            true,
        )?;
        let mut dsv_heap =
            device.create_descriptor_heap(t12::EDescriptorHeapType::DepthStencil, 1, false)?;

        let overlay_srv = srv_heap.alloc()?;
        if overlay_srv.index != OVERLAY_SRV_SLOT {
            bail!("Overlay SRV landed in slot {}, expected {}", overlay_srv.index, OVERLAY_SRV_SLOT);
        }
        overlay
            .attach(&device, &overlay_srv)
            .context("Attaching frame overlay")?;

        let mut rtvs = Vec::with_capacity(swap_chain.buffer_count());
        for idx in 0..swap_chain.buffer_count() {
            let rtv = rtv_heap.alloc()?;
            device.create_render_target_view(
                swap_chain.backbuffer(idx),
                BACKBUFFER_RTV_FORMAT,
                rtv.cpu,
            );
            rtvs.push(rtv);
        }

        let depth_texture = device.create_committed_resource(
            t12::EHeapType::Default,
            &t12::SResourceDesc::create_texture_2d(
                config.width,
                config.height,
                1,
                DEPTH_FORMAT,
                t12::SResourceFlags::ALLOW_DEPTH_STENCIL,
            ),
            t12::EResourceStates::DepthWrite,
            Some(&t12::SDepthClearValue {
                format: DEPTH_FORMAT,
                depth: 1.0,
                stencil: 0,
            }),
            n12::EResourceMetadata::Texture2DResource {
                width: config.width,
                height: config.height,
                mip_levels: 1,
                format: DEPTH_FORMAT,
            },
        )?;
        let dsv = dsv_heap.alloc()?;
        device.create_depth_stencil_view(&depth_texture, dsv.cpu)?;

        // -- submission objects
        let mut command_allocator =
            device.create_command_allocator(t12::ECommandListType::Direct)?;
        let mut command_list = device.create_command_list(&command_allocator)?;
        let mut fence = device.create_fence()?;

        let pipeline = n12::SPipeline::new(&device, vertex_shader, pixel_shader)?;

        // -- persistent buffers
        let vertex_buffer = n12::create_upload_buffer(&device, &MESH_VERTICES[..])
            .context("Creating vertex buffer")?;
        let vertex_buffer_view = vertex_buffer.create_vertex_buffer_view()?;
        let material_buffer = n12::create_upload_buffer(&device, &MATERIAL_COLOUR[..])
            .context("Creating material buffer")?;
        let wvp_buffer =
            n12::create_upload_buffer(&device, &math::constant_data(&glm::Mat4::identity())[..])
                .context("Creating WVP buffer")?;

        // -- one shot texture upload, waited on before the first frame
        let mut texture = texture_data.create_resource(&device)?;
        let mut staging = n12::upload_texture(
            &device,
            &mut command_list,
            &mut texture,
            &texture_data.mip_slices(),
        )?;
        let texture_srv = srv_heap.alloc()?;
        if texture_srv.index != TEXTURE_SRV_SLOT {
            bail!("Texture SRV landed in slot {}, expected {}", texture_srv.index, TEXTURE_SRV_SLOT);
        }
        device.create_shader_resource_view(&texture, texture_srv.cpu)?;

        let uploaded = staging
            .submit(&mut command_list, &direct_command_queue, &mut fence)
            .and_then(|ticket| {
                command_allocator.mark_in_flight(ticket)?;
                fence.wait_for_value(ticket)
            });
        let completion = match uploaded {
            Ok(completion) => completion,
            Err(e) => {
                // -- the copy may already be on the GPU, the texture and list can't drop before it
                // -- finishes
                if let Err(flusherr) = fence.flush_blocking(&direct_command_queue) {
                    error!("Failed to wait for the GPU after a failed upload: {:?}", flusherr);
                }
                return Err(e.context("Submitting texture upload"));
            }
        };
        staging.release(&completion)?;
        command_allocator.reset(&completion)?;
        command_list.reset(&command_allocator)?;
        info!(
            "Uploaded {}x{} texture through {} byte staging buffer",
            texture_data.width,
            texture_data.height,
            staging.size_in_bytes()
        );

        Ok(Self {
            state: EFrameState::Idle,
            framecount: 0,
            isshutdown: false,

            clear_colour: config.clear_colour,
            aspect: config.aspect_ratio(),
            viewport: t12::SViewport::new(
                0.0,
                0.0,
                config.width as f32,
                config.height as f32,
                None,
                None,
            ),
            scissorrect: t12::SRect {
                left: 0,
                right: config.width as i32,
                top: 0,
                bottom: config.height as i32,
            },

            camera: SCamera::default(),
            mesh_transform: STransform::default(),

            overlay: overlay,

            pipeline: pipeline,

            _vertex_buffer: vertex_buffer,
            vertex_buffer_view: vertex_buffer_view,
            material_buffer: material_buffer,
            wvp_buffer: wvp_buffer,
            texture: texture,
            _depth_texture: depth_texture,

            rtvs: rtvs,
            dsv: dsv,
            texture_srv: texture_srv,

            srv_heap: srv_heap,
            _rtv_heap: rtv_heap,
            _dsv_heap: dsv_heap,

            swap_chain: swap_chain,

            command_list: command_list,
            command_allocator: command_allocator,
            fence: fence,
            direct_command_queue: direct_command_queue,

            device: device,
        })
    }

    pub fn state(&self) -> EFrameState {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.framecount
    }

    fn update_constants(&mut self) -> anyhow::Result<()> {
        let wvp = math::world_view_projection(&self.mesh_transform, &self.camera, self.aspect);
        let data = math::constant_data(&wvp);
        self.wvp_buffer.write_bytes(0, crate::utils::as_bytes(&data[..]))
    }

    fn record(&mut self) -> anyhow::Result<()> {
        self.state = EFrameState::Recording;

        let backbufferidx = self.swap_chain.current_backbuffer_index();
        let rtv = self.rtvs[backbufferidx].cpu;
        let dsv = self.dsv.cpu;
        let texture_table = self
            .texture_srv
            .gpu
            .ok_or_else(|| anyhow!("Texture SRV is not in a shader visible heap"))?;

        let list = &mut self.command_list;

        list.transition_resource(
            self.swap_chain.backbuffer_mut(backbufferidx),
            t12::EResourceStates::Present,
            t12::EResourceStates::RenderTarget,
        )?;

        list.om_set_render_targets(self.swap_chain.backbuffer(backbufferidx), rtv, dsv)?;
        list.clear_render_target_view(rtv, &self.clear_colour)?;
        list.clear_depth_stencil_view(dsv, 1.0)?;

        list.set_descriptor_heaps(&[&self.srv_heap])?;
        list.rs_set_viewports(&self.viewport)?;
        list.rs_set_scissor_rects(&self.scissorrect)?;
        list.set_graphics_root_signature(self.pipeline.root_signature())?;
        list.set_pipeline_state(self.pipeline.pipeline_state())?;
        list.ia_set_vertex_buffers(&self.vertex_buffer_view)?;
        list.ia_set_primitive_topology(t12::EPrimitiveTopology::TriangleList)?;

        list.set_graphics_root_constant_buffer_view(
            n12::ROOT_PARAM_MATERIAL,
            &self.material_buffer,
        )?;
        list.set_graphics_root_constant_buffer_view(n12::ROOT_PARAM_WVP, &self.wvp_buffer)?;
        list.set_graphics_root_descriptor_table(n12::ROOT_PARAM_TEXTURE, texture_table)?;

        list.draw_instanced(MESH_VERTICES.len() as u32, 1, 0, 0)?;

        self.overlay.draw(list).context("Drawing frame overlay")?;

        list.transition_resource(
            self.swap_chain.backbuffer_mut(backbufferidx),
            t12::EResourceStates::RenderTarget,
            t12::EResourceStates::Present,
        )?;

        Ok(())
    }

    // -- one full record, submit, present, wait cycle. Returns with the list open and the
    // -- GPU idle.
    pub fn render_frame(&mut self) -> anyhow::Result<()> {
        if self.isshutdown {
            return Err(anyhow!("Rendering after shutdown"));
        }
        if self.state != EFrameState::Idle {
            bail!("Frame started while the last one is {:?}", self.state);
        }

        self.overlay.update(self.framecount)?;
        self.update_constants()?;

        self.record()?;

        self.command_list.close()?;
        self.direct_command_queue
            .execute_command_list(&mut self.command_list)?;
        self.state = EFrameState::Submitted;

        self.swap_chain.present(1, 0)?;
        self.state = EFrameState::Presented;

        let ticket = self.fence.signal(&self.direct_command_queue)?;
        self.command_allocator.mark_in_flight(ticket)?;
        let completion = self.fence.wait_for_value(ticket)?;
        self.command_allocator.reset(&completion)?;
        self.command_list.reset(&self.command_allocator)?;
        self.state = EFrameState::Idle;

        trace!("Frame {} done on ticket {}", self.framecount, ticket);
        self.framecount += 1;
        Ok(())
    }

    // -- renders until keep_running says stop, shutting down on the way out either way
    pub fn run<F: FnMut() -> bool>(&mut self, mut keep_running: F) -> anyhow::Result<()> {
        let result = self.render_until(&mut keep_running);
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    fn render_until<F: FnMut() -> bool>(&mut self, keep_running: &mut F) -> anyhow::Result<()> {
        while keep_running() {
            self.render_frame()?;
        }
        Ok(())
    }

    // -- waits out everything submitted so far, after which dropping the resources is safe
    pub fn shutdown(&mut self) -> anyhow::Result<()> {
        if self.isshutdown {
            return Ok(());
        }
        self.isshutdown = true;

        let completion = self.fence.flush_blocking(&self.direct_command_queue)?;
        info!(
            "Render shut down after {} frames, GPU idle at fence value {} (feature level {})",
            self.framecount,
            completion.value(),
            self.device.feature_level().name()
        );
        Ok(())
    }
}

impl<B: TBackend> Drop for SRender<B> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("Failed to wait for the GPU during shutdown: {:?}", e);
        }
        debug!(
            "Releasing render resources ({} byte vertex buffer)",
            MESH_VERTICES.len() * size_of::<SVertex>()
        );
    }
}
