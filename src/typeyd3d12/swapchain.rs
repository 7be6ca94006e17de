use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SSwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: EDXGIFormat,
    pub buffer_count: u32,
}

impl SSwapChainDesc {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> DXGI_SWAP_CHAIN_DESC1 {
        DXGI_SWAP_CHAIN_DESC1 {
            Width: self.width,
            Height: self.height,
            Format: self.format.d3dtype(),
            Stereo: FALSE,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: self.buffer_count,
            Scaling: DXGI_SCALING_STRETCH,
            SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
            AlphaMode: DXGI_ALPHA_MODE_UNSPECIFIED,
            Flags: 0,
        }
    }
}

#[cfg(windows)]
pub struct SSwapChain {
    swapchain: ComPtr<IDXGISwapChain4>,
}

#[cfg(windows)]
impl SSwapChain {
    pub unsafe fn new_from_raw(raw: ComPtr<IDXGISwapChain4>) -> Self {
        Self { swapchain: raw }
    }
}

#[cfg(windows)]
impl TRawSwapChain<SD3D12Backend> for SSwapChain {
    fn present(&self, syncinterval: u32, flags: u32) -> anyhow::Result<()> {
        let hr = unsafe { self.swapchain.Present(syncinterval, flags) };
        returnerrifwinerror!(hr, "Couldn't present to swap chain");
        Ok(())
    }

    fn currentbackbufferindex(&self) -> usize {
        unsafe { self.swapchain.GetCurrentBackBufferIndex() as usize }
    }

    fn getbuffer(&self, idx: usize) -> anyhow::Result<SResource> {
        let mut rawbuf: *mut ID3D12Resource = ptr::null_mut();
        let hn = unsafe {
            self.swapchain.GetBuffer(
                idx as u32,
                &ID3D12Resource::uuidof(),
                &mut rawbuf as *mut *mut _ as *mut *mut c_void,
            )
        };

        returnerrifwinerror!(
            hn,
            "Couldn't get ID3D12Resource for backbuffer from swapchain"
        );

        Ok(unsafe { SResource::new_from_raw(ComPtr::from_raw(rawbuf)) })
    }
}
