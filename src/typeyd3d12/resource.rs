use super::*;

use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EResourceStates {
    RenderTarget,
    DepthWrite,
    CopyDest,
    GenericRead,
    Present,
}

impl EResourceStates {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_RESOURCE_STATES {
        match self {
            EResourceStates::RenderTarget => D3D12_RESOURCE_STATE_RENDER_TARGET,
            EResourceStates::DepthWrite => D3D12_RESOURCE_STATE_DEPTH_WRITE,
            EResourceStates::CopyDest => D3D12_RESOURCE_STATE_COPY_DEST,
            EResourceStates::GenericRead => D3D12_RESOURCE_STATE_GENERIC_READ,
            EResourceStates::Present => D3D12_RESOURCE_STATE_PRESENT,
        }
    }
}

bitflags! {
    pub struct SResourceFlags: u32 {
        const NONE = 0;
        const ALLOW_RENDER_TARGET = 0x1;
        const ALLOW_DEPTH_STENCIL = 0x2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EResourceDimension {
    Buffer,
    Texture2D,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SResourceDesc {
    pub dimension: EResourceDimension,
    pub width: u64,
    pub height: u32,
    pub mip_levels: u16,
    pub format: EDXGIFormat,
    pub flags: SResourceFlags,
}

impl SResourceDesc {
    pub fn create_buffer(size_in_bytes: usize) -> Self {
        Self {
            dimension: EResourceDimension::Buffer,
            width: size_in_bytes as u64,
            height: 1,
            mip_levels: 1,
            format: EDXGIFormat::Unknown,
            flags: SResourceFlags::NONE,
        }
    }

    pub fn create_texture_2d(
        width: u32,
        height: u32,
        mip_levels: u16,
        format: EDXGIFormat,
        flags: SResourceFlags,
    ) -> Self {
        Self {
            dimension: EResourceDimension::Texture2D,
            width: width as u64,
            height,
            mip_levels,
            format,
            flags,
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_RESOURCE_DESC {
        let mut flags = D3D12_RESOURCE_FLAG_NONE;
        if self.flags.contains(SResourceFlags::ALLOW_RENDER_TARGET) {
            flags |= D3D12_RESOURCE_FLAG_ALLOW_RENDER_TARGET;
        }
        if self.flags.contains(SResourceFlags::ALLOW_DEPTH_STENCIL) {
            flags |= D3D12_RESOURCE_FLAG_ALLOW_DEPTH_STENCIL;
        }

        let (dimension, layout) = match self.dimension {
            EResourceDimension::Buffer => (
                D3D12_RESOURCE_DIMENSION_BUFFER,
                D3D12_TEXTURE_LAYOUT_ROW_MAJOR,
            ),
            EResourceDimension::Texture2D => (
                D3D12_RESOURCE_DIMENSION_TEXTURE2D,
                D3D12_TEXTURE_LAYOUT_UNKNOWN,
            ),
        };

        D3D12_RESOURCE_DESC {
            Dimension: dimension,
            Alignment: 0,
            Width: self.width,
            Height: self.height,
            DepthOrArraySize: 1,
            MipLevels: self.mip_levels,
            Format: self.format.d3dtype(),
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Layout: layout,
            Flags: flags,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SDepthClearValue {
    pub format: EDXGIFormat,
    pub depth: f32,
    pub stencil: u8,
}

impl SDepthClearValue {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_CLEAR_VALUE {
        let mut result: D3D12_CLEAR_VALUE = unsafe { mem::zeroed() };
        result.Format = self.format.d3dtype();
        *unsafe { result.u.DepthStencil_mut() } = D3D12_DEPTH_STENCIL_VALUE {
            Depth: self.depth,
            Stencil: self.stencil,
        };
        result
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SVertexBufferView {
    pub buffer_location: SGPUVirtualAddress,
    pub size_in_bytes: u32,
    pub stride_in_bytes: u32,
}

impl SVertexBufferView {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_VERTEX_BUFFER_VIEW {
        D3D12_VERTEX_BUFFER_VIEW {
            BufferLocation: self.buffer_location.raw,
            SizeInBytes: self.size_in_bytes,
            StrideInBytes: self.stride_in_bytes,
        }
    }
}

// -- texture2d SRV over all mips
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SShaderResourceViewDesc {
    pub format: EDXGIFormat,
    pub mip_levels: u32,
}

#[cfg(windows)]
const D3D12_DEFAULT_SHADER_4_COMPONENT_MAPPING: u32 = 0x1688;

impl SShaderResourceViewDesc {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_SHADER_RESOURCE_VIEW_DESC {
        let mut result: D3D12_SHADER_RESOURCE_VIEW_DESC = unsafe { mem::zeroed() };
        result.Format = self.format.d3dtype();
        result.ViewDimension = D3D12_SRV_DIMENSION_TEXTURE2D;
        result.Shader4ComponentMapping = D3D12_DEFAULT_SHADER_4_COMPONENT_MAPPING;
        *unsafe { result.u.Texture2D_mut() } = D3D12_TEX2D_SRV {
            MostDetailedMip: 0,
            MipLevels: self.mip_levels,
            PlaneSlice: 0,
            ResourceMinLODClamp: 0.0,
        };
        result
    }
}

// -- where one subresource lives inside a linear staging buffer
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SPlacedSubresourceFootprint {
    pub offset: u64,
    pub format: EDXGIFormat,
    pub width: u32,
    pub height: u32,
    pub row_pitch: u32,
    pub num_rows: u32,
    pub row_size_in_bytes: u64,
}

impl SPlacedSubresourceFootprint {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_PLACED_SUBRESOURCE_FOOTPRINT {
        D3D12_PLACED_SUBRESOURCE_FOOTPRINT {
            Offset: self.offset,
            Footprint: D3D12_SUBRESOURCE_FOOTPRINT {
                Format: self.format.d3dtype(),
                Width: self.width,
                Height: self.height,
                Depth: 1,
                RowPitch: self.row_pitch,
            },
        }
    }
}

#[cfg(windows)]
pub struct SResource {
    resource: ComPtr<ID3D12Resource>,
}

#[cfg(windows)]
impl SResource {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12Resource>) -> Self {
        Self { resource: raw }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12Resource> {
        &self.resource
    }
}

#[cfg(windows)]
impl TRawResource for SResource {
    fn getgpuvirtualaddress(&self) -> SGPUVirtualAddress {
        SGPUVirtualAddress {
            raw: unsafe { self.resource.GetGPUVirtualAddress() },
        }
    }

    // -- Map, copy, Unmap. Only valid for upload heap buffers.
    fn write_bytes(&self, offset: usize, data: &[u8]) -> anyhow::Result<()> {
        let norange = D3D12_RANGE { Begin: 0, End: 0 };
        let mut mapped: *mut c_void = ptr::null_mut();
        let hn = unsafe { self.resource.Map(0, &norange, &mut mapped) };
        returnerrifwinerror!(hn, "Could not map resource");

        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), (mapped as *mut u8).add(offset), data.len());

            let written = D3D12_RANGE {
                Begin: offset,
                End: offset + data.len(),
            };
            self.resource.Unmap(0, &written);
        }

        Ok(())
    }
}

#[cfg(windows)]
pub fn create_transition_barrier(
    resource: &SResource,
    beforestate: EResourceStates,
    afterstate: EResourceStates,
) -> D3D12_RESOURCE_BARRIER {
    let mut barrier = D3D12_RESOURCE_BARRIER {
        Type: D3D12_RESOURCE_BARRIER_TYPE_TRANSITION,
        Flags: D3D12_RESOURCE_BARRIER_FLAG_NONE,
        u: unsafe { mem::zeroed() },
    };

    *unsafe { barrier.u.Transition_mut() } = D3D12_RESOURCE_TRANSITION_BARRIER {
        pResource: resource.resource.as_raw(),
        Subresource: D3D12_RESOURCE_BARRIER_ALL_SUBRESOURCES,
        StateBefore: beforestate.d3dtype(),
        StateAfter: afterstate.d3dtype(),
    };

    barrier
}
