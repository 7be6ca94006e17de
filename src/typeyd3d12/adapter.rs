use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct SAdapterDesc {
    pub description: String,
    pub dedicated_video_memory: usize,
    pub software: bool,
}

#[cfg(windows)]
pub struct SAdapter {
    adapter: ComPtr<IDXGIAdapter4>,
}

#[cfg(windows)]
impl SAdapter {
    pub unsafe fn new_from_raw(raw: ComPtr<IDXGIAdapter4>) -> Self {
        Self { adapter: raw }
    }
}

#[cfg(windows)]
impl TRawAdapter<SD3D12Backend> for SAdapter {
    fn getdesc(&self) -> anyhow::Result<SAdapterDesc> {
        let mut desc: DXGI_ADAPTER_DESC3 = unsafe { mem::zeroed() };
        let hn = unsafe { self.adapter.GetDesc3(&mut desc) };
        returnerrifwinerror!(hn, "Could not get adapter desc");

        let namelen = desc
            .Description
            .iter()
            .position(|c| *c == 0)
            .unwrap_or(desc.Description.len());

        Ok(SAdapterDesc {
            description: String::from_utf16_lossy(&desc.Description[..namelen]),
            dedicated_video_memory: desc.DedicatedVideoMemory,
            software: (desc.Flags & DXGI_ADAPTER_FLAG3_SOFTWARE) != 0,
        })
    }

    fn d3d12createdevice(&self, level: EFeatureLevel) -> anyhow::Result<SDevice> {
        let mut rawdevice: *mut ID3D12Device = ptr::null_mut();
        let hn = unsafe {
            D3D12CreateDevice(
                self.adapter.as_raw() as *mut IUnknown,
                level.d3dtype(),
                &ID3D12Device::uuidof(),
                &mut rawdevice as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hn, "Could not create device on adapter");

        Ok(unsafe { SDevice::new_from_raw(ComPtr::from_raw(rawdevice)) })
    }
}
