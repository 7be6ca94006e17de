use super::*;

use arrayvec::ArrayVec;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ECommandListState {
    Recording,
    Closed,
    Submitted,
}

pub struct SCommandList<B: TBackend> {
    raw: B::CommandList,
    state: ECommandListState,
}

impl<B: TBackend> SCommandList<B> {
    pub fn new_from_raw(raw: B::CommandList) -> Self {
        Self {
            raw: raw,
            state: ECommandListState::Recording,
        }
    }

    pub fn raw(&self) -> &B::CommandList {
        &self.raw
    }

    pub fn state(&self) -> ECommandListState {
        self.state
    }

    pub(super) fn mark_submitted(&mut self) {
        self.state = ECommandListState::Submitted;
    }

    fn ensure_recording(&self) -> anyhow::Result<()> {
        if self.state != ECommandListState::Recording {
            bail!("Recording into a command list that is {:?}", self.state);
        }
        Ok(())
    }

    // -- allocator must already be reset, which needs the fence to have passed its work
    pub fn reset(&mut self, allocator: &SCommandAllocator<B>) -> anyhow::Result<()> {
        if self.state == ECommandListState::Recording {
            bail!("Command list reset while still recording");
        }
        if let Some(ticket) = allocator.in_flight_ticket() {
            bail!(
                "Command list reset onto an allocator whose ticket {} was not waited on",
                ticket
            );
        }

        self.raw.reset(allocator.raw())?;
        self.state = ECommandListState::Recording;
        Ok(())
    }

    pub fn close(&mut self) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.close()?;
        self.state = ECommandListState::Closed;
        Ok(())
    }

    // -- beforestate has to be the state the resource is tracked in
    pub fn transition_resource(
        &mut self,
        resource: &mut SResource<B>,
        beforestate: t12::EResourceStates,
        afterstate: t12::EResourceStates,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;

        debug_assert_eq!(resource.state(), beforestate);
        if resource.state() != beforestate {
            bail!(
                "Barrier from {:?} but resource is in {:?}",
                beforestate,
                resource.state()
            );
        }

        self.raw.resourcebarrier(resource.raw(), beforestate, afterstate);
        resource.set_state(afterstate);
        Ok(())
    }

    pub fn clear_render_target_view(
        &mut self,
        rtvdescriptor: t12::SCPUDescriptorHandle,
        colour: &[f32; 4],
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.clearrendertargetview(rtvdescriptor, colour);
        Ok(())
    }

    pub fn clear_depth_stencil_view(
        &mut self,
        dsv_descriptor: t12::SCPUDescriptorHandle,
        depth: f32,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.clear_depth_stencil_view(dsv_descriptor, depth);
        Ok(())
    }

    // -- render_target is the resource behind rtv, it must already be a render target
    pub fn om_set_render_targets(
        &mut self,
        render_target: &SResource<B>,
        rtv: t12::SCPUDescriptorHandle,
        dsv: t12::SCPUDescriptorHandle,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        if render_target.state() != t12::EResourceStates::RenderTarget {
            bail!(
                "Binding a render target that is in {:?}",
                render_target.state()
            );
        }

        self.raw.om_set_render_targets(rtv, dsv);
        Ok(())
    }

    pub fn set_descriptor_heaps(&mut self, heaps: &[&SDescriptorHeap<B>]) -> anyhow::Result<()> {
        self.ensure_recording()?;

        let mut raw_heaps = ArrayVec::<[&B::DescriptorHeap; 4]>::new();
        for heap in heaps {
            raw_heaps
                .try_push(heap.raw())
                .map_err(|_| anyhow!("At most 4 descriptor heaps can be bound"))?;
        }

        self.raw.set_descriptor_heaps(&raw_heaps[..]);
        Ok(())
    }

    pub fn rs_set_viewports(&mut self, viewport: &t12::SViewport) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.rs_set_viewports(viewport);
        Ok(())
    }

    pub fn rs_set_scissor_rects(&mut self, rect: &t12::SRect) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.rs_set_scissor_rects(rect);
        Ok(())
    }

    pub fn set_graphics_root_signature(
        &mut self,
        root_signature: &B::RootSignature,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.set_graphics_root_signature(root_signature);
        Ok(())
    }

    pub fn set_pipeline_state(&mut self, pipeline_state: &B::PipelineState) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.set_pipeline_state(pipeline_state);
        Ok(())
    }

    pub fn ia_set_vertex_buffers(
        &mut self,
        vertex_buffer: &t12::SVertexBufferView,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.ia_set_vertex_buffers(vertex_buffer);
        Ok(())
    }

    pub fn ia_set_primitive_topology(
        &mut self,
        primitive_topology: t12::EPrimitiveTopology,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.ia_set_primitive_topology(primitive_topology);
        Ok(())
    }

    pub fn set_graphics_root_constant_buffer_view(
        &mut self,
        root_parameter_index: u32,
        constant_buffer: &SResource<B>,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.set_graphics_root_constant_buffer_view(
            root_parameter_index,
            constant_buffer.gpu_virtual_address(),
        );
        Ok(())
    }

    pub fn set_graphics_root_descriptor_table(
        &mut self,
        root_parameter_index: u32,
        base_descriptor: t12::SGPUDescriptorHandle,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw
            .set_graphics_root_descriptor_table(root_parameter_index, base_descriptor);
        Ok(())
    }

    pub fn draw_instanced(
        &mut self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        base_vertex_location: u32,
        start_instance_location: u32,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        self.raw.draw_instanced(
            vertex_count_per_instance,
            instance_count,
            base_vertex_location,
            start_instance_location,
        );
        Ok(())
    }

    pub fn copy_buffer_to_texture(
        &mut self,
        destination: &SResource<B>,
        subresource: u32,
        source: &SResource<B>,
        footprint: &t12::SPlacedSubresourceFootprint,
    ) -> anyhow::Result<()> {
        self.ensure_recording()?;
        if destination.state() != t12::EResourceStates::CopyDest {
            bail!(
                "Copy destination must be in CopyDest, it is in {:?}",
                destination.state()
            );
        }

        self.raw
            .copy_buffer_to_texture(destination.raw(), subresource, source.raw(), footprint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::niced3d12::testbackend::*;

    fn create_target(ctx: &STestContext) -> SResource<STestBackend> {
        ctx.device
            .create_committed_resource(
                t12::EHeapType::Default,
                &t12::SResourceDesc::create_texture_2d(
                    8,
                    8,
                    1,
                    t12::EDXGIFormat::R8G8B8A8UNorm,
                    t12::SResourceFlags::ALLOW_RENDER_TARGET,
                ),
                t12::EResourceStates::Present,
                None,
                EResourceMetadata::SwapChainResource,
            )
            .unwrap()
    }

    #[test]
    fn test_recording_into_closed_list_fails() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();

        assert_eq!(list.state(), ECommandListState::Recording);
        list.close().unwrap();
        assert_eq!(list.state(), ECommandListState::Closed);

        assert!(list.draw_instanced(6, 1, 0, 0).is_err());
        assert!(list.close().is_err());
        assert_eq!(ctx.log.count(|e| matches!(e, ETestEvent::Draw { .. })), 0);
    }

    #[test]
    fn test_transition_tracks_state() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();
        let mut target = create_target(&ctx);

        list.transition_resource(
            &mut target,
            t12::EResourceStates::Present,
            t12::EResourceStates::RenderTarget,
        )
        .unwrap();
        assert_eq!(target.state(), t12::EResourceStates::RenderTarget);

        list.transition_resource(
            &mut target,
            t12::EResourceStates::RenderTarget,
            t12::EResourceStates::Present,
        )
        .unwrap();
        assert_eq!(target.state(), t12::EResourceStates::Present);
        assert_eq!(ctx.log.count(|e| matches!(e, ETestEvent::Barrier { .. })), 2);
    }

    // -- the mismatch also trips debug_assert, so only check the error path in release
    #[cfg(not(debug_assertions))]
    #[test]
    fn test_transition_from_wrong_state_fails() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();
        let mut target = create_target(&ctx);

        assert!(list
            .transition_resource(
                &mut target,
                t12::EResourceStates::RenderTarget,
                t12::EResourceStates::Present,
            )
            .is_err());
        assert_eq!(target.state(), t12::EResourceStates::Present);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn test_transition_from_wrong_state_asserts() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();
        let mut target = create_target(&ctx);

        let _ = list.transition_resource(
            &mut target,
            t12::EResourceStates::RenderTarget,
            t12::EResourceStates::Present,
        );
    }

    #[test]
    fn test_binding_present_target_fails() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();
        let target = create_target(&ctx);

        let handle = t12::SCPUDescriptorHandle { ptr: 0 };
        assert!(list.om_set_render_targets(&target, handle, handle).is_err());
    }

    #[test]
    fn test_reset_requires_waited_allocator() {
        let ctx = STestContext::new();
        let mut fence = ctx.device.create_fence().unwrap();
        let mut allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();

        list.close().unwrap();
        ctx.queue.execute_command_list(&mut list).unwrap();
        assert_eq!(list.state(), ECommandListState::Submitted);

        let ticket = fence.signal(&ctx.queue).unwrap();
        allocator.mark_in_flight(ticket).unwrap();
        assert!(list.reset(&allocator).is_err());

        let completion = fence.wait_for_value(ticket).unwrap();
        allocator.reset(&completion).unwrap();
        list.reset(&allocator).unwrap();
        assert_eq!(list.state(), ECommandListState::Recording);
    }

    #[test]
    fn test_allocator_rejects_stale_completion() {
        let ctx = STestContext::new();
        let mut fence = ctx.device.create_fence().unwrap();
        let mut allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();

        let first = fence.signal(&ctx.queue).unwrap();
        let stale = fence.wait_for_value(first).unwrap();

        let second = fence.signal(&ctx.queue).unwrap();
        allocator.mark_in_flight(second).unwrap();
        assert!(allocator.reset(&stale).is_err());
        assert_eq!(
            ctx.log.count(|e| matches!(e, ETestEvent::AllocatorReset { .. })),
            0
        );

        let completion = fence.wait_for_value(second).unwrap();
        allocator.reset(&completion).unwrap();
    }

    #[test]
    fn test_execute_requires_closed_list() {
        let ctx = STestContext::new();
        let allocator = ctx
            .device
            .create_command_allocator(t12::ECommandListType::Direct)
            .unwrap();
        let mut list = ctx.device.create_command_list(&allocator).unwrap();

        assert!(ctx.queue.execute_command_list(&mut list).is_err());
        assert_eq!(
            ctx.log.count(|e| matches!(e, ETestEvent::ExecuteCommandLists { .. })),
            0
        );
    }
}
