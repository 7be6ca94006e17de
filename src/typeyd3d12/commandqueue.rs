use super::*;

use arrayvec::ArrayVec;

pub struct SCommandQueue {
    queue: ComPtr<ID3D12CommandQueue>,
}

impl SCommandQueue {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12CommandQueue>) -> Self {
        Self { queue: raw }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12CommandQueue> {
        &self.queue
    }
}

impl TRawCommandQueue<SD3D12Backend> for SCommandQueue {
    fn signal(&self, fence: &SFence, val: u64) -> anyhow::Result<u64> {
        let hn = unsafe { self.queue.Signal(fence.raw().as_raw(), val) };
        returnerrifwinerror!(hn, "Could not push signal");
        Ok(val)
    }

    fn executecommandlists(&self, lists: &[&SCommandList]) {
        let mut rawlists: ArrayVec<[*mut ID3D12CommandList; 16]> = ArrayVec::new();
        for list in lists {
            rawlists.push(unsafe { list.raw().as_raw() } as *mut ID3D12CommandList);
        }

        unsafe {
            self.queue
                .ExecuteCommandLists(rawlists.len() as u32, rawlists.as_ptr())
        };
    }
}
