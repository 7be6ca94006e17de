use super::*;

pub struct SDebugInterface {
    debuginterface: ComPtr<ID3D12Debug>,
}

impl SDebugInterface {
    pub fn new() -> anyhow::Result<Self> {
        let mut rawdebug: *mut ID3D12Debug = ptr::null_mut();
        let hn = unsafe {
            D3D12GetDebugInterface(
                &ID3D12Debug::uuidof(),
                &mut rawdebug as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hn, "D3D12GetDebugInterface gave an error");

        Ok(Self {
            debuginterface: unsafe { ComPtr::from_raw(rawdebug) },
        })
    }

    pub fn enabledebuglayer(&self) {
        unsafe {
            self.debuginterface.EnableDebugLayer();
        }
    }
}
