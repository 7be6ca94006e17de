// -- the nice layer: ownership, state tracking and fence discipline on top of the raw
// -- backend traits. Everything here is generic over t12::TBackend so the same code drives
// -- D3D12 in the binary and the recording backend in tests.

mod adapter;
mod commandallocator;
mod commandlist;
mod commandqueue;
mod descriptorallocator;
mod device;
mod factory;
mod fence;
mod pipelinestate;
mod resource;
mod swapchain;
mod upload;

#[cfg(test)]
pub mod testbackend;

use crate::typeyd3d12 as t12;
use crate::typeyd3d12::{
    TBackend, TRawAdapter, TRawCommandAllocator, TRawCommandList, TRawCommandQueue,
    TRawDescriptorHeap, TRawDevice, TRawEvent, TRawFactory, TRawFence, TRawResource,
    TRawSwapChain,
};

use anyhow::{anyhow, bail, Context};
use log::{debug, error, info, trace};

pub use self::adapter::*;
pub use self::commandallocator::*;
pub use self::commandlist::*;
pub use self::commandqueue::*;
pub use self::descriptorallocator::*;
pub use self::device::*;
pub use self::factory::*;
pub use self::fence::*;
pub use self::pipelinestate::*;
pub use self::resource::*;
pub use self::swapchain::*;
pub use self::upload::*;
