use super::*;

use crate::safewindows;

pub struct SFactory {
    factory: ComPtr<IDXGIFactory6>,
}

impl SFactory {
    pub fn new(debug: bool) -> anyhow::Result<Self> {
        let flags = if debug { DXGI_CREATE_FACTORY_DEBUG } else { 0 };

        let mut rawfactory: *mut IDXGIFactory6 = ptr::null_mut();
        let hn = unsafe {
            CreateDXGIFactory2(
                flags,
                &IDXGIFactory6::uuidof(),
                &mut rawfactory as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hn, "Couldn't get DXGI factory");

        Ok(Self {
            factory: unsafe { ComPtr::from_raw(rawfactory) },
        })
    }
}

impl TRawFactory<SD3D12Backend> for SFactory {
    // -- None once the index runs past the last adapter
    fn enumadapterbygpupreference(&self, adapteridx: u32) -> Option<SAdapter> {
        let mut rawadapter: *mut IDXGIAdapter4 = ptr::null_mut();

        let hn = unsafe {
            self.factory.EnumAdapterByGpuPreference(
                adapteridx,
                DXGI_GPU_PREFERENCE_HIGH_PERFORMANCE,
                &IDXGIAdapter4::uuidof(),
                &mut rawadapter as *mut *mut _ as *mut *mut c_void,
            )
        };

        if hn == winerror::DXGI_ERROR_NOT_FOUND || !winerror::SUCCEEDED(hn) {
            return None;
        }

        Some(unsafe { SAdapter::new_from_raw(ComPtr::from_raw(rawadapter)) })
    }

    fn createswapchainforwindow(
        &self,
        window: &safewindows::SWindow,
        commandqueue: &SCommandQueue,
        desc: &SSwapChainDesc,
    ) -> anyhow::Result<SSwapChain> {
        let d3ddesc = desc.d3dtype();
        let mut rawswapchain: *mut IDXGISwapChain1 = ptr::null_mut();

        let hr = unsafe {
            self.factory.CreateSwapChainForHwnd(
                commandqueue.raw().as_raw() as *mut IUnknown,
                window.raw(),
                &d3ddesc,
                ptr::null(),
                ptr::null_mut(),
                &mut rawswapchain,
            )
        };

        returnerrifwinerror!(hr, "Failed to create swap chain");

        let swapchain = unsafe { ComPtr::from_raw(rawswapchain) };

        match swapchain.cast::<IDXGISwapChain4>() {
            Ok(sc4) => Ok(unsafe { SSwapChain::new_from_raw(sc4) }),
            _ => Err(anyhow::anyhow!("Swap chain could not be cast to SwapChain4")),
        }
    }
}
