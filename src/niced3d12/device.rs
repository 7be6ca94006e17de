use super::*;

pub struct SDevice<B: TBackend> {
    raw: B::Device,
    featurelevel: t12::EFeatureLevel,
}

impl<B: TBackend> SDevice<B> {
    pub fn new_from_raw(raw: B::Device, featurelevel: t12::EFeatureLevel) -> Self {
        Self {
            raw: raw,
            featurelevel: featurelevel,
        }
    }

    pub fn raw(&self) -> &B::Device {
        &self.raw
    }

    pub fn feature_level(&self) -> t12::EFeatureLevel {
        self.featurelevel
    }

    pub fn create_command_queue(
        &self,
        type_: t12::ECommandListType,
    ) -> anyhow::Result<SCommandQueue<B>> {
        let raw = self
            .raw
            .createcommandqueue(type_)
            .context("Creating command queue")?;
        Ok(SCommandQueue::new_from_raw(raw, type_))
    }

    pub fn create_command_allocator(
        &self,
        type_: t12::ECommandListType,
    ) -> anyhow::Result<SCommandAllocator<B>> {
        let raw = self
            .raw
            .createcommandallocator(type_)
            .context("Creating command allocator")?;
        Ok(SCommandAllocator::new_from_raw(raw, type_))
    }

    // -- the list starts out recording into allocator
    pub fn create_command_list(
        &self,
        allocator: &SCommandAllocator<B>,
    ) -> anyhow::Result<SCommandList<B>> {
        if allocator.in_flight_ticket().is_some() {
            bail!("Cannot bind a new command list to an allocator with work in flight");
        }

        let raw = self
            .raw
            .createcommandlist(allocator.raw())
            .context("Creating command list")?;
        Ok(SCommandList::new_from_raw(raw))
    }

    pub fn create_fence(&self) -> anyhow::Result<SFence<B>> {
        let fence = self.raw.createfence(0).context("Creating fence")?;
        let event = self.raw.createfenceevent().context("Creating fence event")?;
        Ok(SFence::new_from_raw(fence, event))
    }

    pub fn create_descriptor_heap(
        &self,
        type_: t12::EDescriptorHeapType,
        num_descriptors: usize,
        shader_visible: bool,
    ) -> anyhow::Result<SDescriptorHeap<B>> {
        let desc = t12::SDescriptorHeapDesc {
            type_: type_,
            num_descriptors: num_descriptors,
            flags: if shader_visible {
                t12::SDescriptorHeapFlags::SHADER_VISIBLE
            } else {
                t12::SDescriptorHeapFlags::NONE
            },
        };

        let raw = self
            .raw
            .create_descriptor_heap(&desc)
            .with_context(|| format!("Creating {:?} descriptor heap", type_))?;
        let descriptorsize = self.raw.getdescriptorhandleincrementsize(type_);

        debug!(
            "Created {:?} descriptor heap, {} descriptors of {} bytes, shader visible: {}",
            type_, num_descriptors, descriptorsize, shader_visible
        );

        Ok(SDescriptorHeap::new_from_raw(raw, &desc, descriptorsize))
    }

    pub fn create_committed_resource(
        &self,
        heaptype: t12::EHeapType,
        desc: &t12::SResourceDesc,
        initialstate: t12::EResourceStates,
        clearvalue: Option<&t12::SDepthClearValue>,
        metadata: EResourceMetadata,
    ) -> anyhow::Result<SResource<B>> {
        let raw = self
            .raw
            .createcommittedresource(heaptype, desc, initialstate, clearvalue)
            .with_context(|| format!("Creating {:?} resource in {:?} heap", desc.dimension, heaptype))?;

        Ok(SResource::new_from_raw(raw, heaptype, initialstate, metadata))
    }

    pub fn create_render_target_view(
        &self,
        render_target_resource: &SResource<B>,
        format: t12::EDXGIFormat,
        dest_descriptor: t12::SCPUDescriptorHandle,
    ) {
        self.raw
            .createrendertargetview(render_target_resource.raw(), format, dest_descriptor);
    }

    pub fn create_depth_stencil_view(
        &self,
        depth_texture_resource: &SResource<B>,
        dest_descriptor: t12::SCPUDescriptorHandle,
    ) -> anyhow::Result<()> {
        match depth_texture_resource.metadata() {
            EResourceMetadata::Texture2DResource { format, .. } => {
                self.raw
                    .create_depth_stencil_view(depth_texture_resource.raw(), *format, dest_descriptor);
                Ok(())
            }
            _ => Err(anyhow!("Depth stencil view needs a texture resource")),
        }
    }

    // -- views every mip of a 2D texture
    pub fn create_shader_resource_view(
        &self,
        texture_resource: &SResource<B>,
        dest_descriptor: t12::SCPUDescriptorHandle,
    ) -> anyhow::Result<()> {
        match texture_resource.metadata() {
            EResourceMetadata::Texture2DResource {
                format, mip_levels, ..
            } => {
                let desc = t12::SShaderResourceViewDesc {
                    format: *format,
                    mip_levels: *mip_levels as u32,
                };
                self.raw
                    .create_shader_resource_view(texture_resource.raw(), &desc, dest_descriptor);
                Ok(())
            }
            _ => Err(anyhow!("Shader resource view needs a texture resource")),
        }
    }

    pub fn create_root_signature(
        &self,
        desc: &t12::SRootSignatureDesc,
    ) -> anyhow::Result<B::RootSignature> {
        self.raw.create_root_signature(desc)
    }

    pub fn create_graphics_pipeline_state(
        &self,
        root_signature: &B::RootSignature,
        desc: &t12::SGraphicsPipelineStateDesc,
    ) -> anyhow::Result<B::PipelineState> {
        self.raw.create_graphics_pipeline_state(root_signature, desc)
    }
}
