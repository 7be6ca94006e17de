use super::*;

// -- The raw API surface the nice layer is written against. Every object type of one API
// -- implementation is bound together by TBackend so a device can only be fed its own queues,
// -- lists and resources. D3D12 is the implementation that ships; tests drive the same code
// -- through a recording implementation.
pub trait TBackend: Sized + 'static {
    type Factory: TRawFactory<Self>;
    type Adapter: TRawAdapter<Self>;
    type Device: TRawDevice<Self>;
    type CommandQueue: TRawCommandQueue<Self>;
    type CommandAllocator: TRawCommandAllocator;
    type CommandList: TRawCommandList<Self>;
    type Fence: TRawFence<Self>;
    type Event: TRawEvent;
    type DescriptorHeap: TRawDescriptorHeap;
    type Resource: TRawResource;
    type SwapChain: TRawSwapChain<Self>;
    type RootSignature;
    type PipelineState;
    type Window;
}

pub trait TRawFactory<B: TBackend> {
    // -- ordered by the high performance preference, None past the last adapter
    fn enumadapterbygpupreference(&self, adapteridx: u32) -> Option<B::Adapter>;

    fn createswapchainforwindow(
        &self,
        window: &B::Window,
        commandqueue: &B::CommandQueue,
        desc: &SSwapChainDesc,
    ) -> anyhow::Result<B::SwapChain>;
}

pub trait TRawAdapter<B: TBackend> {
    fn getdesc(&self) -> anyhow::Result<SAdapterDesc>;
    fn d3d12createdevice(&self, level: EFeatureLevel) -> anyhow::Result<B::Device>;
}

pub trait TRawDevice<B: TBackend> {
    fn install_info_queue_filter(&self) -> anyhow::Result<()>;

    fn createcommandqueue(&self, type_: ECommandListType) -> anyhow::Result<B::CommandQueue>;
    fn createcommandallocator(
        &self,
        type_: ECommandListType,
    ) -> anyhow::Result<B::CommandAllocator>;
    fn createcommandlist(
        &self,
        allocator: &B::CommandAllocator,
    ) -> anyhow::Result<B::CommandList>;
    fn createfence(&self, initialvalue: u64) -> anyhow::Result<B::Fence>;
    fn createfenceevent(&self) -> anyhow::Result<B::Event>;

    fn create_descriptor_heap(
        &self,
        desc: &SDescriptorHeapDesc,
    ) -> anyhow::Result<B::DescriptorHeap>;
    fn getdescriptorhandleincrementsize(&self, type_: EDescriptorHeapType) -> usize;

    fn createcommittedresource(
        &self,
        heaptype: EHeapType,
        desc: &SResourceDesc,
        initialstate: EResourceStates,
        clearvalue: Option<&SDepthClearValue>,
    ) -> anyhow::Result<B::Resource>;

    fn createrendertargetview(
        &self,
        resource: &B::Resource,
        format: EDXGIFormat,
        destdescriptor: SCPUDescriptorHandle,
    );
    fn create_depth_stencil_view(
        &self,
        resource: &B::Resource,
        format: EDXGIFormat,
        destdescriptor: SCPUDescriptorHandle,
    );
    fn create_shader_resource_view(
        &self,
        resource: &B::Resource,
        desc: &SShaderResourceViewDesc,
        destdescriptor: SCPUDescriptorHandle,
    );

    fn create_root_signature(
        &self,
        desc: &SRootSignatureDesc,
    ) -> anyhow::Result<B::RootSignature>;
    fn create_graphics_pipeline_state(
        &self,
        root_signature: &B::RootSignature,
        desc: &SGraphicsPipelineStateDesc,
    ) -> anyhow::Result<B::PipelineState>;
}

pub trait TRawCommandQueue<B: TBackend> {
    fn executecommandlists(&self, lists: &[&B::CommandList]);
    fn signal(&self, fence: &B::Fence, val: u64) -> anyhow::Result<u64>;
}

pub trait TRawCommandAllocator {
    fn reset(&self) -> anyhow::Result<()>;
}

pub trait TRawCommandList<B: TBackend> {
    fn reset(&self, commandallocator: &B::CommandAllocator) -> anyhow::Result<()>;
    fn close(&self) -> anyhow::Result<()>;

    fn resourcebarrier(
        &self,
        resource: &B::Resource,
        beforestate: EResourceStates,
        afterstate: EResourceStates,
    );

    fn clearrendertargetview(&self, descriptor: SCPUDescriptorHandle, colour: &[f32; 4]);
    fn clear_depth_stencil_view(&self, descriptor: SCPUDescriptorHandle, depth: f32);
    fn om_set_render_targets(
        &self,
        render_target: SCPUDescriptorHandle,
        depth_target: SCPUDescriptorHandle,
    );
    fn set_descriptor_heaps(&self, heaps: &[&B::DescriptorHeap]);
    fn rs_set_viewports(&self, viewport: &SViewport);
    fn rs_set_scissor_rects(&self, rect: &SRect);
    fn set_graphics_root_signature(&self, root_signature: &B::RootSignature);
    fn set_pipeline_state(&self, pipeline_state: &B::PipelineState);
    fn ia_set_vertex_buffers(&self, vertex_buffer: &SVertexBufferView);
    fn ia_set_primitive_topology(&self, primitive_topology: EPrimitiveTopology);
    fn set_graphics_root_constant_buffer_view(
        &self,
        root_parameter_index: u32,
        buffer_location: SGPUVirtualAddress,
    );
    fn set_graphics_root_descriptor_table(
        &self,
        root_parameter_index: u32,
        base_descriptor: SGPUDescriptorHandle,
    );
    fn draw_instanced(
        &self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        base_vertex_location: u32,
        start_instance_location: u32,
    );
    fn copy_buffer_to_texture(
        &self,
        destination: &B::Resource,
        subresource: u32,
        source: &B::Resource,
        footprint: &SPlacedSubresourceFootprint,
    );
}

pub trait TRawFence<B: TBackend> {
    fn getcompletedvalue(&self) -> u64;
    fn seteventoncompletion(&self, val: u64, event: &B::Event) -> anyhow::Result<()>;
}

pub trait TRawEvent {
    // -- duration in milliseconds, u32::MAX waits forever
    fn waitforsingleobject(&self, duration: u32);
}

pub trait TRawDescriptorHeap {
    fn getcpudescriptorhandleforheapstart(&self) -> SCPUDescriptorHandle;
    fn getgpudescriptorhandleforheapstart(&self) -> SGPUDescriptorHandle;
}

pub trait TRawResource {
    fn getgpuvirtualaddress(&self) -> SGPUVirtualAddress;
    fn write_bytes(&self, offset: usize, data: &[u8]) -> anyhow::Result<()>;
}

pub trait TRawSwapChain<B: TBackend> {
    fn present(&self, syncinterval: u32, flags: u32) -> anyhow::Result<()>;
    fn currentbackbufferindex(&self) -> usize;
    fn getbuffer(&self, idx: usize) -> anyhow::Result<B::Resource>;
}
