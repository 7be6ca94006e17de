use super::*;

use arrayvec::ArrayVec;

pub struct SSwapChain<B: TBackend> {
    raw: B::SwapChain,

    buffercount: usize,
    backbuffers: ArrayVec<[SResource<B>; 4]>,
}

impl<B: TBackend> SSwapChain<B> {
    // -- pulls every back buffer out of the raw swap chain, they start in Present
    pub fn new_from_raw(raw: B::SwapChain, buffercount: usize) -> anyhow::Result<Self> {
        if buffercount > 4 {
            bail!("At most 4 back buffers, asked for {}", buffercount);
        }

        let mut backbuffers = ArrayVec::new();
        for idx in 0..buffercount {
            let buffer = raw
                .getbuffer(idx)
                .with_context(|| format!("Getting back buffer {}", idx))?;
            backbuffers.push(SResource::new_from_raw(
                buffer,
                t12::EHeapType::Default,
                t12::EResourceStates::Present,
                EResourceMetadata::SwapChainResource,
            ));
        }

        Ok(Self {
            raw: raw,
            buffercount: buffercount,
            backbuffers: backbuffers,
        })
    }

    pub fn raw(&self) -> &B::SwapChain {
        &self.raw
    }

    pub fn buffer_count(&self) -> usize {
        self.buffercount
    }

    pub fn current_backbuffer_index(&self) -> usize {
        self.raw.currentbackbufferindex()
    }

    pub fn backbuffer(&self, idx: usize) -> &SResource<B> {
        &self.backbuffers[idx]
    }

    pub fn backbuffer_mut(&mut self, idx: usize) -> &mut SResource<B> {
        &mut self.backbuffers[idx]
    }

    pub fn present(&mut self, sync_interval: u32, flags: u32) -> anyhow::Result<()> {
        let current = self.current_backbuffer_index();
        let state = self.backbuffers[current].state();
        if state != t12::EResourceStates::Present {
            bail!("Presenting back buffer {} while it is in {:?}", current, state);
        }

        self.raw.present(sync_interval, flags)
    }
}
