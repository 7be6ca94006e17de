#[cfg(windows)]
use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EHeapType {
    Default,
    Upload,
}

impl EHeapType {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_HEAP_TYPE {
        match self {
            EHeapType::Default => D3D12_HEAP_TYPE_DEFAULT,
            EHeapType::Upload => D3D12_HEAP_TYPE_UPLOAD,
        }
    }

    pub fn cpu_writable(&self) -> bool {
        *self == EHeapType::Upload
    }
}

#[cfg(windows)]
pub struct SHeapProperties {
    raw: D3D12_HEAP_PROPERTIES,
}

#[cfg(windows)]
impl SHeapProperties {
    pub unsafe fn raw(&self) -> &D3D12_HEAP_PROPERTIES {
        &self.raw
    }

    pub fn create(type_: EHeapType) -> Self {
        Self {
            raw: D3D12_HEAP_PROPERTIES {
                Type: type_.d3dtype(),
                CPUPageProperty: D3D12_CPU_PAGE_PROPERTY_UNKNOWN,
                MemoryPoolPreference: D3D12_MEMORY_POOL_UNKNOWN,
                CreationNodeMask: 1,
                VisibleNodeMask: 1,
            },
        }
    }
}
