use super::*;

use crate::safewindows;

pub struct SD3D12Backend;

impl TBackend for SD3D12Backend {
    type Factory = SFactory;
    type Adapter = SAdapter;
    type Device = SDevice;
    type CommandQueue = SCommandQueue;
    type CommandAllocator = SCommandAllocator;
    type CommandList = SCommandList;
    type Fence = SFence;
    type Event = safewindows::SEventHandle;
    type DescriptorHeap = SDescriptorHeap;
    type Resource = SResource;
    type SwapChain = SSwapChain;
    type RootSignature = SRootSignature;
    type PipelineState = SPipelineState;
    type Window = safewindows::SWindow;
}

impl TRawEvent for safewindows::SEventHandle {
    fn waitforsingleobject(&self, duration: u32) {
        safewindows::SEventHandle::waitforsingleobject(self, duration);
    }
}
