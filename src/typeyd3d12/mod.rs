// -- typed descriptions of D3D12 objects. The plain enums and descs are usable on any
// -- platform so the nice layer can be driven by a test backend. The COM wrappers only
// -- exist on windows.

#[cfg(windows)]
macro_rules! returnerrifwinerror {
    ($hn:expr, $err:expr) => {
        if !winerror::SUCCEEDED($hn) {
            return Err(anyhow::anyhow!("{} (hresult {:#010x})", $err, $hn as u32));
        }
    };
}

mod adapter;
mod backend;
mod commandlist;
mod descriptor;
mod heap;
mod pipelinestate;
mod resource;
mod rootsignature;
mod sampler;
mod swapchain;

#[cfg(windows)]
mod commandallocator;
#[cfg(windows)]
mod commandqueue;
#[cfg(windows)]
mod d3d12backend;
#[cfg(windows)]
mod debuginterface;
#[cfg(windows)]
mod device;
#[cfg(windows)]
mod factory;
#[cfg(windows)]
mod fence;
#[cfg(windows)]
mod infoqueue;

#[cfg(windows)]
use crate::win::*;
#[cfg(windows)]
use std::{mem, ptr};

pub use self::adapter::*;
pub use self::backend::*;
pub use self::commandlist::*;
pub use self::descriptor::*;
pub use self::heap::*;
pub use self::pipelinestate::*;
pub use self::resource::*;
pub use self::rootsignature::*;
pub use self::sampler::*;
pub use self::swapchain::*;

#[cfg(windows)]
pub use self::d3d12backend::SD3D12Backend;
#[cfg(windows)]
pub use self::commandallocator::SCommandAllocator;
#[cfg(windows)]
pub use self::commandqueue::SCommandQueue;
#[cfg(windows)]
pub use self::debuginterface::SDebugInterface;
#[cfg(windows)]
pub use self::device::SDevice;
#[cfg(windows)]
pub use self::factory::SFactory;
#[cfg(windows)]
pub use self::fence::SFence;
#[cfg(windows)]
pub use self::infoqueue::SInfoQueue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EFeatureLevel {
    Level12_0,
    Level12_1,
    Level12_2,
}

impl EFeatureLevel {
    // -- highest first
    pub const DESCENDING: [EFeatureLevel; 3] = [
        EFeatureLevel::Level12_2,
        EFeatureLevel::Level12_1,
        EFeatureLevel::Level12_0,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Level12_0 => "12.0",
            Self::Level12_1 => "12.1",
            Self::Level12_2 => "12.2",
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D_FEATURE_LEVEL {
        match self {
            Self::Level12_0 => D3D_FEATURE_LEVEL_12_0,
            Self::Level12_1 => D3D_FEATURE_LEVEL_12_1,
            Self::Level12_2 => D3D_FEATURE_LEVEL_12_2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EDXGIFormat {
    Unknown,
    R32G32B32A32Float,
    R32G32Float,
    R8G8B8A8UNorm,
    R8G8B8A8UNormSRGB,
    D24UNormS8UInt,
}

impl EDXGIFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::R32G32B32A32Float => 16,
            Self::R32G32Float => 8,
            Self::R8G8B8A8UNorm | Self::R8G8B8A8UNormSRGB | Self::D24UNormS8UInt => 4,
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> DXGI_FORMAT {
        match self {
            Self::Unknown => DXGI_FORMAT_UNKNOWN,
            Self::R32G32B32A32Float => DXGI_FORMAT_R32G32B32A32_FLOAT,
            Self::R32G32Float => DXGI_FORMAT_R32G32_FLOAT,
            Self::R8G8B8A8UNorm => DXGI_FORMAT_R8G8B8A8_UNORM,
            Self::R8G8B8A8UNormSRGB => DXGI_FORMAT_R8G8B8A8_UNORM_SRGB,
            Self::D24UNormS8UInt => DXGI_FORMAT_D24_UNORM_S8_UINT,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SViewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl SViewport {
    pub fn new(
        topleftx: f32,
        toplefty: f32,
        width: f32,
        height: f32,
        mindepth: Option<f32>,
        maxdepth: Option<f32>,
    ) -> Self {
        SViewport {
            top_left_x: topleftx,
            top_left_y: toplefty,
            width,
            height,
            min_depth: mindepth.unwrap_or(0.0),
            max_depth: maxdepth.unwrap_or(1.0),
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_VIEWPORT {
        D3D12_VIEWPORT {
            TopLeftX: self.top_left_x,
            TopLeftY: self.top_left_y,
            Width: self.width,
            Height: self.height,
            MinDepth: self.min_depth,
            MaxDepth: self.max_depth,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SRect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl SRect {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_RECT {
        D3D12_RECT {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SGPUVirtualAddress {
    pub raw: u64,
}

impl SGPUVirtualAddress {
    pub fn add(&self, offset: usize) -> SGPUVirtualAddress {
        SGPUVirtualAddress {
            raw: self.raw + (offset as u64),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EDepthWriteMask {
    All,
}

impl EDepthWriteMask {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_DEPTH_WRITE_MASK {
        match self {
            Self::All => D3D12_DEPTH_WRITE_MASK_ALL,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EComparisonFunc {
    Never,
    LessEqual,
}

impl EComparisonFunc {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_COMPARISON_FUNC {
        match self {
            Self::Never => D3D12_COMPARISON_FUNC_NEVER,
            Self::LessEqual => D3D12_COMPARISON_FUNC_LESS_EQUAL,
        }
    }
}

// -- owned bytes of a compiled shader or serialized root signature
#[cfg(windows)]
pub struct SBlob {
    raw: ComPtr<ID3DBlob>,
}

#[cfg(windows)]
impl SBlob {
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.raw.GetBufferPointer() as *const u8,
                self.raw.GetBufferSize(),
            )
        }
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(self.as_bytes())
            .trim_end_matches('\0')
            .to_string()
    }
}
