use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ECommandListType {
    Direct,
}

impl ECommandListType {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_COMMAND_LIST_TYPE {
        match self {
            ECommandListType::Direct => D3D12_COMMAND_LIST_TYPE_DIRECT,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EPrimitiveTopology {
    TriangleList,
}

impl EPrimitiveTopology {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D_PRIMITIVE_TOPOLOGY {
        match self {
            Self::TriangleList => D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST,
        }
    }
}

#[cfg(windows)]
pub struct SCommandList {
    commandlist: ComPtr<ID3D12GraphicsCommandList>,
}

// -- almost everything in here is unsafe in spirit because D3D12 needs exclusive access to the
// -- list, the nice layer guarantees that by owning it
#[cfg(windows)]
impl SCommandList {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12GraphicsCommandList>) -> Self {
        Self { commandlist: raw }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12GraphicsCommandList> {
        &self.commandlist
    }
}

#[cfg(windows)]
impl TRawCommandList<SD3D12Backend> for SCommandList {
    fn reset(&self, commandallocator: &SCommandAllocator) -> anyhow::Result<()> {
        let hn = unsafe {
            self.commandlist
                .Reset(commandallocator.raw().as_raw(), ptr::null_mut())
        };
        returnerrifwinerror!(hn, "Could not reset command list");
        Ok(())
    }

    fn close(&self) -> anyhow::Result<()> {
        let hn = unsafe { self.commandlist.Close() };
        returnerrifwinerror!(hn, "Could not close command list");
        Ok(())
    }

    fn resourcebarrier(
        &self,
        resource: &SResource,
        beforestate: EResourceStates,
        afterstate: EResourceStates,
    ) {
        let barrier = create_transition_barrier(resource, beforestate, afterstate);
        unsafe { self.commandlist.ResourceBarrier(1, &barrier) };
    }

    fn clearrendertargetview(&self, descriptor: SCPUDescriptorHandle, colour: &[f32; 4]) {
        unsafe {
            self.commandlist
                .ClearRenderTargetView(descriptor.d3dtype(), colour, 0, ptr::null())
        };
    }

    fn clear_depth_stencil_view(&self, descriptor: SCPUDescriptorHandle, depth: f32) {
        unsafe {
            self.commandlist.ClearDepthStencilView(
                descriptor.d3dtype(),
                D3D12_CLEAR_FLAG_DEPTH,
                depth,
                0,
                0,
                ptr::null(),
            )
        };
    }

    fn om_set_render_targets(
        &self,
        render_target: SCPUDescriptorHandle,
        depth_target: SCPUDescriptorHandle,
    ) {
        let rtv = render_target.d3dtype();
        let dsv = depth_target.d3dtype();
        unsafe { self.commandlist.OMSetRenderTargets(1, &rtv, FALSE, &dsv) };
    }

    fn set_descriptor_heaps(&self, heaps: &[&SDescriptorHeap]) {
        if heaps.len() > 0 {
            let mut raw_heaps = [ptr::null_mut(); 4]; // only 4 heap types
            for (i, heap) in heaps.iter().enumerate() {
                raw_heaps[i] = unsafe { heap.raw().as_raw() };
            }

            unsafe {
                self.commandlist
                    .SetDescriptorHeaps(heaps.len() as u32, raw_heaps.as_mut_ptr())
            };
        }
    }

    fn rs_set_viewports(&self, viewport: &SViewport) {
        let d3dviewport = viewport.d3dtype();
        unsafe { self.commandlist.RSSetViewports(1, &d3dviewport) };
    }

    fn rs_set_scissor_rects(&self, rect: &SRect) {
        let d3drect = rect.d3dtype();
        unsafe { self.commandlist.RSSetScissorRects(1, &d3drect) };
    }

    fn set_graphics_root_signature(&self, root_signature: &SRootSignature) {
        unsafe {
            self.commandlist
                .SetGraphicsRootSignature(root_signature.raw().as_raw())
        };
    }

    fn set_pipeline_state(&self, pipeline_state: &SPipelineState) {
        unsafe {
            self.commandlist
                .SetPipelineState(pipeline_state.raw().as_raw())
        };
    }

    fn ia_set_vertex_buffers(&self, vertex_buffer: &SVertexBufferView) {
        let view = vertex_buffer.d3dtype();
        unsafe { self.commandlist.IASetVertexBuffers(0, 1, &view) };
    }

    fn ia_set_primitive_topology(&self, primitive_topology: EPrimitiveTopology) {
        unsafe {
            self.commandlist
                .IASetPrimitiveTopology(primitive_topology.d3dtype())
        };
    }

    fn set_graphics_root_constant_buffer_view(
        &self,
        root_parameter_index: u32,
        buffer_location: SGPUVirtualAddress,
    ) {
        unsafe {
            self.commandlist
                .SetGraphicsRootConstantBufferView(root_parameter_index, buffer_location.raw)
        };
    }

    fn set_graphics_root_descriptor_table(
        &self,
        root_parameter_index: u32,
        base_descriptor: SGPUDescriptorHandle,
    ) {
        unsafe {
            self.commandlist
                .SetGraphicsRootDescriptorTable(root_parameter_index, base_descriptor.d3dtype())
        };
    }

    fn draw_instanced(
        &self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        base_vertex_location: u32,
        start_instance_location: u32,
    ) {
        unsafe {
            self.commandlist.DrawInstanced(
                vertex_count_per_instance,
                instance_count,
                base_vertex_location,
                start_instance_location,
            )
        };
    }

    fn copy_buffer_to_texture(
        &self,
        destination: &SResource,
        subresource: u32,
        source: &SResource,
        footprint: &SPlacedSubresourceFootprint,
    ) {
        let mut dst: D3D12_TEXTURE_COPY_LOCATION = unsafe { mem::zeroed() };
        dst.pResource = unsafe { destination.raw().as_raw() };
        dst.Type = D3D12_TEXTURE_COPY_TYPE_SUBRESOURCE_INDEX;
        *unsafe { dst.u.SubresourceIndex_mut() } = subresource;

        let mut src: D3D12_TEXTURE_COPY_LOCATION = unsafe { mem::zeroed() };
        src.pResource = unsafe { source.raw().as_raw() };
        src.Type = D3D12_TEXTURE_COPY_TYPE_PLACED_FOOTPRINT;
        *unsafe { src.u.PlacedFootprint_mut() } = footprint.d3dtype();

        unsafe {
            self.commandlist
                .CopyTextureRegion(&dst, 0, 0, 0, &src, ptr::null())
        };
    }
}
