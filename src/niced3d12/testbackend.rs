// -- A backend that records every call instead of talking to a GPU. The simulated GPU only
// -- makes progress when somebody waits on the fence event, at which point everything
// -- signalled so far completes, so tests see exactly what the CPU side waited for.

use super::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum ETestEvent {
    CreateDevice {
        level: t12::EFeatureLevel,
        ok: bool,
    },
    InfoQueueFilter,
    CreateResource {
        resource: u32,
        heaptype: t12::EHeapType,
        width: u64,
        state: t12::EResourceStates,
    },
    WriteBytes {
        resource: u32,
        offset: usize,
        len: usize,
    },
    Release {
        resource: u32,
    },
    CreateView {
        kind: &'static str,
        resource: u32,
        handle: usize,
    },
    ExecuteCommandLists {
        count: usize,
    },
    Signal {
        value: u64,
    },
    SetEventOnCompletion {
        value: u64,
    },
    EventWait {
        completed: u64,
    },
    AllocatorReset {
        completed: u64,
    },
    ListReset,
    ListClose,
    Barrier {
        resource: u32,
        before: t12::EResourceStates,
        after: t12::EResourceStates,
    },
    ClearRenderTarget {
        colour: [f32; 4],
    },
    ClearDepth {
        depth: f32,
    },
    SetRenderTargets,
    SetDescriptorHeaps {
        count: usize,
    },
    SetViewport,
    SetScissor,
    SetRootSignature,
    SetPipelineState,
    SetVertexBuffer {
        size_in_bytes: u32,
        stride_in_bytes: u32,
    },
    SetTopology,
    SetRootConstantBuffer {
        index: u32,
        address: u64,
    },
    SetRootTable {
        index: u32,
        handle: u64,
    },
    Draw {
        vertex_count: u32,
        instance_count: u32,
    },
    CopyTextureRegion {
        destination: u32,
        subresource: u32,
        source: u32,
        offset: u64,
    },
    Present {
        sync_interval: u32,
        flags: u32,
    },
}

#[derive(Clone, Debug)]
pub struct STestAdapterConfig {
    pub description: String,
    pub software: bool,
    pub max_level: Option<t12::EFeatureLevel>,
}

impl STestAdapterConfig {
    pub fn software(description: &str) -> Self {
        Self {
            description: description.to_string(),
            software: true,
            max_level: Some(t12::EFeatureLevel::Level12_2),
        }
    }

    pub fn hardware(description: &str, max_level: Option<t12::EFeatureLevel>) -> Self {
        Self {
            description: description.to_string(),
            software: false,
            max_level: max_level,
        }
    }
}

struct STestState {
    events: Vec<ETestEvent>,
    adapters: Vec<STestAdapterConfig>,
    nextid: u32,

    signalled: u64,
    completed: u64,
    eventarmed: bool,
    failnextsignal: bool,

    backbufferindex: usize,
    buffercount: usize,

    resourcebytes: HashMap<u32, Vec<u8>>,
}

#[derive(Clone)]
pub struct STestLog {
    state: Rc<RefCell<STestState>>,
}

impl STestLog {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(STestState {
                events: Vec::new(),
                adapters: vec![STestAdapterConfig::hardware(
                    "Test GPU",
                    Some(t12::EFeatureLevel::Level12_2),
                )],
                nextid: 1,
                signalled: 0,
                completed: 0,
                eventarmed: false,
                failnextsignal: false,
                backbufferindex: 0,
                buffercount: 0,
                resourcebytes: HashMap::new(),
            })),
        }
    }

    pub fn set_adapters(&self, adapters: Vec<STestAdapterConfig>) {
        self.state.borrow_mut().adapters = adapters;
    }

    // -- the next queue signal errors without reaching the GPU
    pub fn fail_next_signal(&self) {
        self.state.borrow_mut().failnextsignal = true;
    }

    fn push(&self, event: ETestEvent) {
        self.state.borrow_mut().events.push(event);
    }

    fn next_id(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let result = state.nextid;
        state.nextid += 1;
        result
    }

    pub fn events(&self) -> Vec<ETestEvent> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    pub fn count<F: Fn(&ETestEvent) -> bool>(&self, pred: F) -> usize {
        self.state.borrow().events.iter().filter(|e| pred(e)).count()
    }

    pub fn position<F: Fn(&ETestEvent) -> bool>(&self, pred: F) -> Option<usize> {
        self.state.borrow().events.iter().position(|e| pred(e))
    }

    pub fn rposition<F: Fn(&ETestEvent) -> bool>(&self, pred: F) -> Option<usize> {
        self.state.borrow().events.iter().rposition(|e| pred(e))
    }

    pub fn fence_signals(&self) -> Vec<u64> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                ETestEvent::Signal { value } => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn device_attempts(&self) -> Vec<t12::EFeatureLevel> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                ETestEvent::CreateDevice { level, .. } => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn barriers_for(&self, resource: u32) -> Vec<(t12::EResourceStates, t12::EResourceStates)> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                ETestEvent::Barrier {
                    resource: r,
                    before,
                    after,
                } if *r == resource => Some((*before, *after)),
                _ => None,
            })
            .collect()
    }

    pub fn last_created_buffer_of_size(&self, width: u64) -> Option<u32> {
        self.state
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                ETestEvent::CreateResource {
                    resource,
                    heaptype: t12::EHeapType::Upload,
                    width: w,
                    ..
                } if *w == width => Some(*resource),
                _ => None,
            })
    }

    pub fn resource_bytes(&self, resource: u32) -> Vec<u8> {
        self.state
            .borrow()
            .resourcebytes
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn was_released(&self, resource: u32) -> bool {
        self.position(|e| *e == ETestEvent::Release { resource }).is_some()
    }

    pub fn index_of_release(&self, resource: u32) -> usize {
        self.position(|e| *e == ETestEvent::Release { resource })
            .expect("resource was never released")
    }

    // -- last wait that brought the simulated GPU to at least ticket
    pub fn index_of_last_wait_for(&self, ticket: u64) -> usize {
        self.rposition(|e| match e {
            ETestEvent::EventWait { completed } => *completed >= ticket,
            _ => false,
        })
        .expect("ticket was never waited on")
    }

    pub fn completed_value(&self) -> u64 {
        self.state.borrow().completed
    }
}

pub struct STestBackend;

impl TBackend for STestBackend {
    type Factory = STestFactory;
    type Adapter = STestAdapter;
    type Device = STestDevice;
    type CommandQueue = STestCommandQueue;
    type CommandAllocator = STestCommandAllocator;
    type CommandList = STestCommandList;
    type Fence = STestFence;
    type Event = STestEvent;
    type DescriptorHeap = STestDescriptorHeap;
    type Resource = STestResource;
    type SwapChain = STestSwapChain;
    type RootSignature = STestRootSignature;
    type PipelineState = STestPipelineState;
    type Window = STestWindow;
}

pub struct STestWindow;

pub struct STestFactory {
    log: STestLog,
}

impl STestFactory {
    pub fn new(log: &STestLog) -> Self {
        Self { log: log.clone() }
    }
}

impl TRawFactory<STestBackend> for STestFactory {
    fn enumadapterbygpupreference(&self, adapteridx: u32) -> Option<STestAdapter> {
        let config = self
            .log
            .state
            .borrow()
            .adapters
            .get(adapteridx as usize)
            .cloned()?;

        Some(STestAdapter {
            log: self.log.clone(),
            config: config,
        })
    }

    fn createswapchainforwindow(
        &self,
        _window: &STestWindow,
        _commandqueue: &STestCommandQueue,
        desc: &t12::SSwapChainDesc,
    ) -> anyhow::Result<STestSwapChain> {
        let mut state = self.log.state.borrow_mut();
        state.buffercount = desc.buffer_count as usize;
        state.backbufferindex = 0;

        Ok(STestSwapChain {
            log: self.log.clone(),
        })
    }
}

pub struct STestAdapter {
    log: STestLog,
    config: STestAdapterConfig,
}

impl TRawAdapter<STestBackend> for STestAdapter {
    fn getdesc(&self) -> anyhow::Result<t12::SAdapterDesc> {
        Ok(t12::SAdapterDesc {
            description: self.config.description.clone(),
            dedicated_video_memory: 256 * 1024 * 1024,
            software: self.config.software,
        })
    }

    fn d3d12createdevice(&self, level: t12::EFeatureLevel) -> anyhow::Result<STestDevice> {
        let ok = self.config.max_level.map_or(false, |max| level <= max);
        self.log.push(ETestEvent::CreateDevice { level, ok });

        if !ok {
            bail!("feature level {} unsupported", level.name());
        }

        Ok(STestDevice {
            log: self.log.clone(),
        })
    }
}

pub struct STestDevice {
    log: STestLog,
}

impl TRawDevice<STestBackend> for STestDevice {
    fn install_info_queue_filter(&self) -> anyhow::Result<()> {
        self.log.push(ETestEvent::InfoQueueFilter);
        Ok(())
    }

    fn createcommandqueue(&self, _type_: t12::ECommandListType) -> anyhow::Result<STestCommandQueue> {
        Ok(STestCommandQueue {
            log: self.log.clone(),
        })
    }

    fn createcommandallocator(
        &self,
        _type_: t12::ECommandListType,
    ) -> anyhow::Result<STestCommandAllocator> {
        Ok(STestCommandAllocator {
            log: self.log.clone(),
        })
    }

    fn createcommandlist(
        &self,
        _allocator: &STestCommandAllocator,
    ) -> anyhow::Result<STestCommandList> {
        Ok(STestCommandList {
            log: self.log.clone(),
        })
    }

    fn createfence(&self, initialvalue: u64) -> anyhow::Result<STestFence> {
        let mut state = self.log.state.borrow_mut();
        state.signalled = initialvalue;
        state.completed = initialvalue;

        Ok(STestFence {
            log: self.log.clone(),
        })
    }

    fn createfenceevent(&self) -> anyhow::Result<STestEvent> {
        Ok(STestEvent {
            log: self.log.clone(),
        })
    }

    fn create_descriptor_heap(
        &self,
        _desc: &t12::SDescriptorHeapDesc,
    ) -> anyhow::Result<STestDescriptorHeap> {
        let id = self.log.next_id() as usize;
        Ok(STestDescriptorHeap {
            base: id * 0x10_0000,
        })
    }

    fn getdescriptorhandleincrementsize(&self, type_: t12::EDescriptorHeapType) -> usize {
        match type_ {
            t12::EDescriptorHeapType::ConstantBufferShaderResourceUnorderedAccess => 32,
            t12::EDescriptorHeapType::RenderTarget => 64,
            t12::EDescriptorHeapType::DepthStencil => 64,
        }
    }

    fn createcommittedresource(
        &self,
        heaptype: t12::EHeapType,
        desc: &t12::SResourceDesc,
        initialstate: t12::EResourceStates,
        _clearvalue: Option<&t12::SDepthClearValue>,
    ) -> anyhow::Result<STestResource> {
        let id = self.log.next_id();
        self.log.push(ETestEvent::CreateResource {
            resource: id,
            heaptype: heaptype,
            width: desc.width,
            state: initialstate,
        });

        if heaptype == t12::EHeapType::Upload {
            self.log
                .state
                .borrow_mut()
                .resourcebytes
                .insert(id, vec![0; desc.width as usize]);
        }

        Ok(STestResource {
            id: id,
            log: self.log.clone(),
        })
    }

    fn createrendertargetview(
        &self,
        resource: &STestResource,
        _format: t12::EDXGIFormat,
        destdescriptor: t12::SCPUDescriptorHandle,
    ) {
        self.log.push(ETestEvent::CreateView {
            kind: "rtv",
            resource: resource.id,
            handle: destdescriptor.ptr,
        });
    }

    fn create_depth_stencil_view(
        &self,
        resource: &STestResource,
        _format: t12::EDXGIFormat,
        destdescriptor: t12::SCPUDescriptorHandle,
    ) {
        self.log.push(ETestEvent::CreateView {
            kind: "dsv",
            resource: resource.id,
            handle: destdescriptor.ptr,
        });
    }

    fn create_shader_resource_view(
        &self,
        resource: &STestResource,
        _desc: &t12::SShaderResourceViewDesc,
        destdescriptor: t12::SCPUDescriptorHandle,
    ) {
        self.log.push(ETestEvent::CreateView {
            kind: "srv",
            resource: resource.id,
            handle: destdescriptor.ptr,
        });
    }

    fn create_root_signature(
        &self,
        desc: &t12::SRootSignatureDesc,
    ) -> anyhow::Result<STestRootSignature> {
        Ok(STestRootSignature { desc: desc.clone() })
    }

    fn create_graphics_pipeline_state(
        &self,
        _root_signature: &STestRootSignature,
        desc: &t12::SGraphicsPipelineStateDesc,
    ) -> anyhow::Result<STestPipelineState> {
        Ok(STestPipelineState { desc: desc.clone() })
    }
}

pub struct STestCommandQueue {
    log: STestLog,
}

impl TRawCommandQueue<STestBackend> for STestCommandQueue {
    fn executecommandlists(&self, lists: &[&STestCommandList]) {
        self.log
            .push(ETestEvent::ExecuteCommandLists { count: lists.len() });
    }

    fn signal(&self, _fence: &STestFence, val: u64) -> anyhow::Result<u64> {
        {
            let mut state = self.log.state.borrow_mut();
            if state.failnextsignal {
                state.failnextsignal = false;
                bail!("signal of {} failed", val);
            }
        }
        self.log.state.borrow_mut().signalled = val;
        self.log.push(ETestEvent::Signal { value: val });
        Ok(val)
    }
}

pub struct STestCommandAllocator {
    log: STestLog,
}

impl TRawCommandAllocator for STestCommandAllocator {
    fn reset(&self) -> anyhow::Result<()> {
        let completed = self.log.completed_value();
        self.log.push(ETestEvent::AllocatorReset { completed });
        Ok(())
    }
}

pub struct STestCommandList {
    log: STestLog,
}

impl TRawCommandList<STestBackend> for STestCommandList {
    fn reset(&self, _commandallocator: &STestCommandAllocator) -> anyhow::Result<()> {
        self.log.push(ETestEvent::ListReset);
        Ok(())
    }

    fn close(&self) -> anyhow::Result<()> {
        self.log.push(ETestEvent::ListClose);
        Ok(())
    }

    fn resourcebarrier(
        &self,
        resource: &STestResource,
        beforestate: t12::EResourceStates,
        afterstate: t12::EResourceStates,
    ) {
        self.log.push(ETestEvent::Barrier {
            resource: resource.id,
            before: beforestate,
            after: afterstate,
        });
    }

    fn clearrendertargetview(&self, _descriptor: t12::SCPUDescriptorHandle, colour: &[f32; 4]) {
        self.log
            .push(ETestEvent::ClearRenderTarget { colour: *colour });
    }

    fn clear_depth_stencil_view(&self, _descriptor: t12::SCPUDescriptorHandle, depth: f32) {
        self.log.push(ETestEvent::ClearDepth { depth });
    }

    fn om_set_render_targets(
        &self,
        _render_target: t12::SCPUDescriptorHandle,
        _depth_target: t12::SCPUDescriptorHandle,
    ) {
        self.log.push(ETestEvent::SetRenderTargets);
    }

    fn set_descriptor_heaps(&self, heaps: &[&STestDescriptorHeap]) {
        self.log
            .push(ETestEvent::SetDescriptorHeaps { count: heaps.len() });
    }

    fn rs_set_viewports(&self, _viewport: &t12::SViewport) {
        self.log.push(ETestEvent::SetViewport);
    }

    fn rs_set_scissor_rects(&self, _rect: &t12::SRect) {
        self.log.push(ETestEvent::SetScissor);
    }

    fn set_graphics_root_signature(&self, _root_signature: &STestRootSignature) {
        self.log.push(ETestEvent::SetRootSignature);
    }

    fn set_pipeline_state(&self, _pipeline_state: &STestPipelineState) {
        self.log.push(ETestEvent::SetPipelineState);
    }

    fn ia_set_vertex_buffers(&self, vertex_buffer: &t12::SVertexBufferView) {
        self.log.push(ETestEvent::SetVertexBuffer {
            size_in_bytes: vertex_buffer.size_in_bytes,
            stride_in_bytes: vertex_buffer.stride_in_bytes,
        });
    }

    fn ia_set_primitive_topology(&self, _primitive_topology: t12::EPrimitiveTopology) {
        self.log.push(ETestEvent::SetTopology);
    }

    fn set_graphics_root_constant_buffer_view(
        &self,
        root_parameter_index: u32,
        buffer_location: t12::SGPUVirtualAddress,
    ) {
        self.log.push(ETestEvent::SetRootConstantBuffer {
            index: root_parameter_index,
            address: buffer_location.raw,
        });
    }

    fn set_graphics_root_descriptor_table(
        &self,
        root_parameter_index: u32,
        base_descriptor: t12::SGPUDescriptorHandle,
    ) {
        self.log.push(ETestEvent::SetRootTable {
            index: root_parameter_index,
            handle: base_descriptor.ptr,
        });
    }

    fn draw_instanced(
        &self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        _base_vertex_location: u32,
        _start_instance_location: u32,
    ) {
        self.log.push(ETestEvent::Draw {
            vertex_count: vertex_count_per_instance,
            instance_count: instance_count,
        });
    }

    fn copy_buffer_to_texture(
        &self,
        destination: &STestResource,
        subresource: u32,
        source: &STestResource,
        footprint: &t12::SPlacedSubresourceFootprint,
    ) {
        self.log.push(ETestEvent::CopyTextureRegion {
            destination: destination.id,
            subresource: subresource,
            source: source.id,
            offset: footprint.offset,
        });
    }
}

pub struct STestFence {
    log: STestLog,
}

impl TRawFence<STestBackend> for STestFence {
    fn getcompletedvalue(&self) -> u64 {
        self.log.completed_value()
    }

    fn seteventoncompletion(&self, val: u64, _event: &STestEvent) -> anyhow::Result<()> {
        self.log.state.borrow_mut().eventarmed = true;
        self.log.push(ETestEvent::SetEventOnCompletion { value: val });
        Ok(())
    }
}

pub struct STestEvent {
    log: STestLog,
}

impl TRawEvent for STestEvent {
    fn waitforsingleobject(&self, _duration: u32) {
        let completed = {
            let mut state = self.log.state.borrow_mut();
            if state.eventarmed {
                state.completed = state.signalled;
                state.eventarmed = false;
            }
            state.completed
        };
        self.log.push(ETestEvent::EventWait { completed });
    }
}

pub struct STestDescriptorHeap {
    base: usize,
}

impl TRawDescriptorHeap for STestDescriptorHeap {
    fn getcpudescriptorhandleforheapstart(&self) -> t12::SCPUDescriptorHandle {
        t12::SCPUDescriptorHandle { ptr: self.base }
    }

    fn getgpudescriptorhandleforheapstart(&self) -> t12::SGPUDescriptorHandle {
        t12::SGPUDescriptorHandle {
            ptr: 0x1_0000_0000 + self.base as u64,
        }
    }
}

pub struct STestResource {
    id: u32,
    log: STestLog,
}

impl STestResource {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl TRawResource for STestResource {
    fn getgpuvirtualaddress(&self) -> t12::SGPUVirtualAddress {
        t12::SGPUVirtualAddress {
            raw: 0x2000_0000 + self.id as u64 * 0x1_0000,
        }
    }

    fn write_bytes(&self, offset: usize, data: &[u8]) -> anyhow::Result<()> {
        {
            let mut state = self.log.state.borrow_mut();
            let bytes = match state.resourcebytes.get_mut(&self.id) {
                Some(b) => b,
                None => bail!("resource {} is not CPU visible", self.id),
            };
            if offset + data.len() > bytes.len() {
                bail!("write past the end of resource {}", self.id);
            }
            bytes[offset..offset + data.len()].copy_from_slice(data);
        }

        self.log.push(ETestEvent::WriteBytes {
            resource: self.id,
            offset: offset,
            len: data.len(),
        });
        Ok(())
    }
}

impl Drop for STestResource {
    fn drop(&mut self) {
        self.log.push(ETestEvent::Release { resource: self.id });
    }
}

pub struct STestSwapChain {
    log: STestLog,
}

impl TRawSwapChain<STestBackend> for STestSwapChain {
    fn present(&self, syncinterval: u32, flags: u32) -> anyhow::Result<()> {
        self.log.push(ETestEvent::Present {
            sync_interval: syncinterval,
            flags: flags,
        });

        let mut state = self.log.state.borrow_mut();
        state.backbufferindex = (state.backbufferindex + 1) % state.buffercount.max(1);
        Ok(())
    }

    fn currentbackbufferindex(&self) -> usize {
        self.log.state.borrow().backbufferindex
    }

    fn getbuffer(&self, _idx: usize) -> anyhow::Result<STestResource> {
        let id = self.log.next_id();
        self.log.push(ETestEvent::CreateResource {
            resource: id,
            heaptype: t12::EHeapType::Default,
            width: 0,
            state: t12::EResourceStates::Present,
        });

        Ok(STestResource {
            id: id,
            log: self.log.clone(),
        })
    }
}

pub struct STestRootSignature {
    pub desc: t12::SRootSignatureDesc,
}

pub struct STestPipelineState {
    pub desc: t12::SGraphicsPipelineStateDesc,
}

// -- a device and a direct queue on the default test adapter
pub struct STestContext {
    pub log: STestLog,
    pub factory: SFactory<STestBackend>,
    pub device: SDevice<STestBackend>,
    pub queue: SCommandQueue<STestBackend>,
}

impl STestContext {
    pub fn new() -> Self {
        let log = STestLog::new();
        let factory = SFactory::new_from_raw(STestFactory::new(&log));
        let device = factory
            .create_best_adapter()
            .and_then(|adapter| adapter.create_device(false))
            .expect("test device");
        let queue = device
            .create_command_queue(t12::ECommandListType::Direct)
            .expect("test queue");

        Self {
            log: log,
            factory: factory,
            device: device,
            queue: queue,
        }
    }
}
