use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EResourceMetadata {
    SwapChainResource,
    BufferResource {
        count: usize,
        sizeofentry: usize,
    },
    Texture2DResource {
        width: u32,
        height: u32,
        mip_levels: u16,
        format: t12::EDXGIFormat,
    },
}

// -- A GPU resource plus the usage state it is in as far as recorded commands are concerned.
// -- Only SCommandList::transition_resource moves the state.
pub struct SResource<B: TBackend> {
    raw: B::Resource,

    heaptype: t12::EHeapType,
    state: t12::EResourceStates,
    metadata: EResourceMetadata,
}

impl<B: TBackend> SResource<B> {
    pub fn new_from_raw(
        raw: B::Resource,
        heaptype: t12::EHeapType,
        state: t12::EResourceStates,
        metadata: EResourceMetadata,
    ) -> Self {
        Self {
            raw: raw,
            heaptype: heaptype,
            state: state,
            metadata: metadata,
        }
    }

    pub fn raw(&self) -> &B::Resource {
        &self.raw
    }

    pub fn state(&self) -> t12::EResourceStates {
        self.state
    }

    pub(super) fn set_state(&mut self, state: t12::EResourceStates) {
        self.state = state;
    }

    pub fn metadata(&self) -> &EResourceMetadata {
        &self.metadata
    }

    pub fn heap_type(&self) -> t12::EHeapType {
        self.heaptype
    }

    pub fn gpu_virtual_address(&self) -> t12::SGPUVirtualAddress {
        self.raw.getgpuvirtualaddress()
    }

    pub fn create_vertex_buffer_view(&self) -> anyhow::Result<t12::SVertexBufferView> {
        if let EResourceMetadata::BufferResource { count, sizeofentry } = self.metadata {
            Ok(t12::SVertexBufferView {
                buffer_location: self.gpu_virtual_address(),
                size_in_bytes: (count * sizeofentry) as u32,
                stride_in_bytes: sizeofentry as u32,
            })
        } else {
            Err(anyhow!("Trying to create vertexbufferview for non-buffer resource"))
        }
    }

    pub fn write_bytes(&self, offset: usize, data: &[u8]) -> anyhow::Result<()> {
        if !self.heaptype.cpu_writable() {
            bail!("Resource in {:?} heap is not CPU writable", self.heaptype);
        }

        if let EResourceMetadata::BufferResource { count, sizeofentry } = self.metadata {
            if offset + data.len() > count * sizeofentry {
                bail!(
                    "Write of {} bytes at {} overruns {} byte buffer",
                    data.len(),
                    offset,
                    count * sizeofentry
                );
            }
        }

        self.raw.write_bytes(offset, data)
    }
}
