#[cfg(windows)]
use super::*;

use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EDescriptorHeapType {
    ConstantBufferShaderResourceUnorderedAccess,
    RenderTarget,
    DepthStencil,
}

impl EDescriptorHeapType {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_DESCRIPTOR_HEAP_TYPE {
        match self {
            EDescriptorHeapType::ConstantBufferShaderResourceUnorderedAccess => {
                D3D12_DESCRIPTOR_HEAP_TYPE_CBV_SRV_UAV
            }
            EDescriptorHeapType::RenderTarget => D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
            EDescriptorHeapType::DepthStencil => D3D12_DESCRIPTOR_HEAP_TYPE_DSV,
        }
    }
}

bitflags! {
    pub struct SDescriptorHeapFlags: u32 {
        const NONE = 0;
        const SHADER_VISIBLE = 0x1;
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SDescriptorHeapDesc {
    pub type_: EDescriptorHeapType,
    pub num_descriptors: usize,
    pub flags: SDescriptorHeapFlags,
}

impl SDescriptorHeapDesc {
    pub fn shader_visible(&self) -> bool {
        self.flags.contains(SDescriptorHeapFlags::SHADER_VISIBLE)
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_DESCRIPTOR_HEAP_DESC {
        D3D12_DESCRIPTOR_HEAP_DESC {
            Type: self.type_.d3dtype(),
            NumDescriptors: self.num_descriptors as u32,
            Flags: self.flags.bits(),
            NodeMask: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SCPUDescriptorHandle {
    pub ptr: usize,
}

impl SCPUDescriptorHandle {
    pub fn offset(&self, bytes: usize) -> SCPUDescriptorHandle {
        SCPUDescriptorHandle {
            ptr: self.ptr + bytes,
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        D3D12_CPU_DESCRIPTOR_HANDLE { ptr: self.ptr }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SGPUDescriptorHandle {
    pub ptr: u64,
}

impl SGPUDescriptorHandle {
    pub fn offset(&self, bytes: usize) -> SGPUDescriptorHandle {
        SGPUDescriptorHandle {
            ptr: self.ptr + bytes as u64,
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_GPU_DESCRIPTOR_HANDLE {
        D3D12_GPU_DESCRIPTOR_HANDLE { ptr: self.ptr }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EDescriptorRangeType {
    SRV,
}

impl EDescriptorRangeType {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_DESCRIPTOR_RANGE_TYPE {
        match self {
            Self::SRV => D3D12_DESCRIPTOR_RANGE_TYPE_SRV,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EDescriptorRangeOffset {
    Append,
}

impl EDescriptorRangeOffset {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> u32 {
        match self {
            Self::Append => D3D12_DESCRIPTOR_RANGE_OFFSET_APPEND,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SDescriptorRange {
    pub range_type: EDescriptorRangeType,
    pub num_descriptors: u32,
    pub base_shader_register: u32,
    pub register_space: u32,
    pub offset_in_descriptors_from_table_start: EDescriptorRangeOffset,
}

impl SDescriptorRange {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_DESCRIPTOR_RANGE {
        D3D12_DESCRIPTOR_RANGE {
            RangeType: self.range_type.d3dtype(),
            NumDescriptors: self.num_descriptors,
            BaseShaderRegister: self.base_shader_register,
            RegisterSpace: self.register_space,
            OffsetInDescriptorsFromTableStart: self
                .offset_in_descriptors_from_table_start
                .d3dtype(),
        }
    }
}

#[cfg(windows)]
pub struct SDescriptorHeap {
    pub type_: EDescriptorHeapType,
    heap: ComPtr<ID3D12DescriptorHeap>,
}

#[cfg(windows)]
impl SDescriptorHeap {
    pub unsafe fn new_from_raw(type_: EDescriptorHeapType, raw: ComPtr<ID3D12DescriptorHeap>) -> Self {
        Self {
            type_: type_,
            heap: raw,
        }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12DescriptorHeap> {
        &self.heap
    }
}

#[cfg(windows)]
impl TRawDescriptorHeap for SDescriptorHeap {
    fn getcpudescriptorhandleforheapstart(&self) -> SCPUDescriptorHandle {
        let start = unsafe { self.heap.GetCPUDescriptorHandleForHeapStart() };
        SCPUDescriptorHandle { ptr: start.ptr }
    }

    fn getgpudescriptorhandleforheapstart(&self) -> SGPUDescriptorHandle {
        let start = unsafe { self.heap.GetGPUDescriptorHandleForHeapStart() };
        SGPUDescriptorHandle { ptr: start.ptr }
    }
}
