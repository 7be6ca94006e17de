use super::*;

pub struct SFactory<B: TBackend> {
    raw: B::Factory,
}

impl<B: TBackend> SFactory<B> {
    pub fn new_from_raw(raw: B::Factory) -> Self {
        Self { raw: raw }
    }

    pub fn raw(&self) -> &B::Factory {
        &self.raw
    }

    // -- first adapter in high performance order that isn't a software rasterizer
    pub fn create_best_adapter(&self) -> anyhow::Result<SAdapter<B>> {
        let mut adapteridx = 0;
        while let Some(adapter) = self.raw.enumadapterbygpupreference(adapteridx) {
            let desc = adapter.getdesc()?;
            if desc.software {
                debug!("Skipping software adapter '{}'", desc.description);
            } else {
                info!(
                    "Using adapter '{}' ({} MB dedicated video memory)",
                    desc.description,
                    desc.dedicated_video_memory / (1024 * 1024)
                );
                return Ok(SAdapter::new_from_raw(adapter, desc));
            }

            adapteridx += 1;
        }

        bail!("No hardware adapter found")
    }

    pub fn create_swap_chain(
        &self,
        window: &B::Window,
        commandqueue: &SCommandQueue<B>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<SSwapChain<B>> {
        let desc = t12::SSwapChainDesc {
            width: width,
            height: height,
            format: t12::EDXGIFormat::R8G8B8A8UNorm,
            buffer_count: 2,
        };

        let raw = self
            .raw
            .createswapchainforwindow(window, commandqueue.raw(), &desc)
            .context("Creating swap chain")?;
        SSwapChain::new_from_raw(raw, desc.buffer_count as usize)
    }
}
