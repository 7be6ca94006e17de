use super::*;

use crate::safewindows;

pub struct SDevice {
    device: ComPtr<ID3D12Device>,
}

impl SDevice {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12Device>) -> Self {
        Self { device: raw }
    }

    pub fn castinfoqueue(&self) -> Option<SInfoQueue> {
        match self.device.cast::<ID3D12InfoQueue>() {
            Ok(a) => Some(unsafe { SInfoQueue::new_from_raw(a) }),
            Err(_) => None,
        }
    }
}

impl TRawDevice<SD3D12Backend> for SDevice {
    // -- break on anything worse than info, drop info severity and the known noisy clear
    // -- value mismatch from storage
    fn install_info_queue_filter(&self) -> anyhow::Result<()> {
        let infoqueue = self
            .castinfoqueue()
            .ok_or_else(|| anyhow::anyhow!("Device has no info queue, is the debug layer on?"))?;

        infoqueue.setbreakonseverity(D3D12_MESSAGE_SEVERITY_CORRUPTION, true);
        infoqueue.setbreakonseverity(D3D12_MESSAGE_SEVERITY_ERROR, true);
        infoqueue.setbreakonseverity(D3D12_MESSAGE_SEVERITY_WARNING, true);

        let mut severities = [D3D12_MESSAGE_SEVERITY_INFO];
        let mut denyids = [D3D12_MESSAGE_ID_CLEARRENDERTARGETVIEW_MISMATCHINGCLEARVALUE];
        infoqueue.pushstoragefilter(&mut severities, &mut denyids)
    }

    fn createcommandqueue(&self, type_: ECommandListType) -> anyhow::Result<SCommandQueue> {
        let desc = D3D12_COMMAND_QUEUE_DESC {
            Type: type_.d3dtype(),
            Priority: D3D12_COMMAND_QUEUE_PRIORITY_NORMAL as i32,
            Flags: D3D12_COMMAND_QUEUE_FLAG_NONE,
            NodeMask: 0,
        };

        let mut rawqueue: *mut ID3D12CommandQueue = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateCommandQueue(
                &desc,
                &ID3D12CommandQueue::uuidof(),
                &mut rawqueue as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Could not create command queue");

        Ok(unsafe { SCommandQueue::new_from_raw(ComPtr::from_raw(rawqueue)) })
    }

    fn createcommandallocator(
        &self,
        type_: ECommandListType,
    ) -> anyhow::Result<SCommandAllocator> {
        let mut rawca: *mut ID3D12CommandAllocator = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateCommandAllocator(
                type_.d3dtype(),
                &ID3D12CommandAllocator::uuidof(),
                &mut rawca as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Could not create command allocator");

        Ok(unsafe { SCommandAllocator::new_from_raw(type_, ComPtr::from_raw(rawca)) })
    }

    // -- the list comes back open, recording into allocator
    fn createcommandlist(&self, allocator: &SCommandAllocator) -> anyhow::Result<SCommandList> {
        let mut rawcl: *mut ID3D12GraphicsCommandList = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateCommandList(
                0,
                allocator.type_().d3dtype(),
                allocator.raw().as_raw(),
                ptr::null_mut(),
                &ID3D12GraphicsCommandList::uuidof(),
                &mut rawcl as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Could not create command list");

        Ok(unsafe { SCommandList::new_from_raw(ComPtr::from_raw(rawcl)) })
    }

    fn createfence(&self, initialvalue: u64) -> anyhow::Result<SFence> {
        let mut rawfence: *mut ID3D12Fence = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateFence(
                initialvalue,
                D3D12_FENCE_FLAG_NONE,
                &ID3D12Fence::uuidof(),
                &mut rawfence as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Could not create fence");

        Ok(unsafe { SFence::new_from_raw(ComPtr::from_raw(rawfence)) })
    }

    fn createfenceevent(&self) -> anyhow::Result<safewindows::SEventHandle> {
        safewindows::SEventHandle::new()
    }

    fn create_descriptor_heap(
        &self,
        desc: &SDescriptorHeapDesc,
    ) -> anyhow::Result<SDescriptorHeap> {
        let d3ddesc = desc.d3dtype();

        let mut rawheap: *mut ID3D12DescriptorHeap = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateDescriptorHeap(
                &d3ddesc,
                &ID3D12DescriptorHeap::uuidof(),
                &mut rawheap as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Failed to create descriptor heap");

        Ok(unsafe { SDescriptorHeap::new_from_raw(desc.type_, ComPtr::from_raw(rawheap)) })
    }

    fn getdescriptorhandleincrementsize(&self, type_: EDescriptorHeapType) -> usize {
        unsafe {
            self.device
                .GetDescriptorHandleIncrementSize(type_.d3dtype()) as usize
        }
    }

    fn createcommittedresource(
        &self,
        heaptype: EHeapType,
        desc: &SResourceDesc,
        initialstate: EResourceStates,
        clearvalue: Option<&SDepthClearValue>,
    ) -> anyhow::Result<SResource> {
        let heapproperties = SHeapProperties::create(heaptype);
        let d3ddesc = desc.d3dtype();
        let d3dclearvalue = clearvalue.map(|cv| cv.d3dtype());
        let clearvalueptr = match &d3dclearvalue {
            Some(cv) => cv as *const D3D12_CLEAR_VALUE,
            None => ptr::null(),
        };

        let mut rawresource: *mut ID3D12Resource = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateCommittedResource(
                heapproperties.raw(),
                D3D12_HEAP_FLAG_NONE,
                &d3ddesc,
                initialstate.d3dtype(),
                clearvalueptr,
                &ID3D12Resource::uuidof(),
                &mut rawresource as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Could not create committed resource");

        Ok(unsafe { SResource::new_from_raw(ComPtr::from_raw(rawresource)) })
    }

    fn createrendertargetview(
        &self,
        resource: &SResource,
        format: EDXGIFormat,
        destdescriptor: SCPUDescriptorHandle,
    ) {
        let mut desc: D3D12_RENDER_TARGET_VIEW_DESC = unsafe { mem::zeroed() };
        desc.Format = format.d3dtype();
        desc.ViewDimension = D3D12_RTV_DIMENSION_TEXTURE2D;

        unsafe {
            self.device
                .CreateRenderTargetView(resource.raw().as_raw(), &desc, destdescriptor.d3dtype());
        }
    }

    fn create_depth_stencil_view(
        &self,
        resource: &SResource,
        format: EDXGIFormat,
        destdescriptor: SCPUDescriptorHandle,
    ) {
        let mut desc: D3D12_DEPTH_STENCIL_VIEW_DESC = unsafe { mem::zeroed() };
        desc.Format = format.d3dtype();
        desc.ViewDimension = D3D12_DSV_DIMENSION_TEXTURE2D;

        unsafe {
            self.device
                .CreateDepthStencilView(resource.raw().as_raw(), &desc, destdescriptor.d3dtype());
        }
    }

    fn create_shader_resource_view(
        &self,
        resource: &SResource,
        desc: &SShaderResourceViewDesc,
        destdescriptor: SCPUDescriptorHandle,
    ) {
        let d3ddesc = desc.d3dtype();
        unsafe {
            self.device.CreateShaderResourceView(
                resource.raw().as_raw(),
                &d3ddesc,
                destdescriptor.d3dtype(),
            );
        }
    }

    fn create_root_signature(
        &self,
        desc: &SRootSignatureDesc,
    ) -> anyhow::Result<SRootSignature> {
        let blob = serialize_root_signature(desc)
            .map_err(|errtext| anyhow::anyhow!("Failed to serialize root signature: {}", errtext))?;
        let bytes = blob.as_bytes();

        let mut rawrootsig: *mut ID3D12RootSignature = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateRootSignature(
                0,
                bytes.as_ptr() as *const c_void,
                bytes.len(),
                &ID3D12RootSignature::uuidof(),
                &mut rawrootsig as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Failed to create root signature");

        Ok(unsafe { SRootSignature::new_from_raw(ComPtr::from_raw(rawrootsig)) })
    }

    fn create_graphics_pipeline_state(
        &self,
        root_signature: &SRootSignature,
        desc: &SGraphicsPipelineStateDesc,
    ) -> anyhow::Result<SPipelineState> {
        let d3ddesc = desc.d3dtype(root_signature)?;

        let mut rawpso: *mut ID3D12PipelineState = ptr::null_mut();
        let hr = unsafe {
            self.device.CreateGraphicsPipelineState(
                &d3ddesc.raw,
                &ID3D12PipelineState::uuidof(),
                &mut rawpso as *mut *mut _ as *mut *mut c_void,
            )
        };
        returnerrifwinerror!(hr, "Failed to create graphics pipeline state");

        Ok(unsafe { SPipelineState::new_from_raw(ComPtr::from_raw(rawpso)) })
    }
}
