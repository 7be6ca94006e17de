use super::*;

pub struct SInfoQueue {
    infoqueue: ComPtr<ID3D12InfoQueue>,
}

impl SInfoQueue {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12InfoQueue>) -> Self {
        Self { infoqueue: raw }
    }

    pub fn setbreakonseverity(&self, severity: D3D12_MESSAGE_SEVERITY, val: bool) {
        unsafe {
            self.infoqueue.SetBreakOnSeverity(severity, val as BOOL);
        }
    }

    // -- drop info messages and the known noisy ids from storage
    pub fn pushstoragefilter(
        &self,
        denyseverities: &mut [D3D12_MESSAGE_SEVERITY],
        denyids: &mut [D3D12_MESSAGE_ID],
    ) -> anyhow::Result<()> {
        let mut filter: D3D12_INFO_QUEUE_FILTER = unsafe { mem::zeroed() };
        filter.DenyList.NumSeverities = denyseverities.len() as u32;
        filter.DenyList.pSeverityList = denyseverities.as_mut_ptr();
        filter.DenyList.NumIDs = denyids.len() as u32;
        filter.DenyList.pIDList = denyids.as_mut_ptr();

        let hn = unsafe { self.infoqueue.PushStorageFilter(&mut filter) };
        returnerrifwinerror!(hn, "Could not push storage filter on infoqueue");
        Ok(())
    }
}
