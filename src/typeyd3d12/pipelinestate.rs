use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EInputClassification {
    PerVertexData,
}

impl EInputClassification {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_INPUT_CLASSIFICATION {
        match self {
            Self::PerVertexData => D3D12_INPUT_CLASSIFICATION_PER_VERTEX_DATA,
        }
    }
}

pub const APPEND_ALIGNED_ELEMENT: u32 = 0xffffffff;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SInputElementDesc {
    pub semantic_name: &'static str,
    pub semantic_index: u32,
    pub format: EDXGIFormat,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
    pub input_slot_class: EInputClassification,
    pub instance_data_step_rate: u32,
}

impl SInputElementDesc {
    pub fn create(
        semantic_name: &'static str,
        semantic_index: u32,
        format: EDXGIFormat,
        input_slot: u32,
        aligned_byte_offset: u32,
        input_slot_class: EInputClassification,
        instance_data_step_rate: u32,
    ) -> Self {
        Self {
            semantic_name,
            semantic_index,
            format,
            input_slot,
            aligned_byte_offset,
            input_slot_class,
            instance_data_step_rate,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ECullMode {
    Back,
}

impl ECullMode {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_CULL_MODE {
        match self {
            Self::Back => D3D12_CULL_MODE_BACK,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EFillMode {
    Solid,
}

impl EFillMode {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_FILL_MODE {
        match self {
            Self::Solid => D3D12_FILL_MODE_SOLID,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SRasterizerDesc {
    pub fill_mode: EFillMode,
    pub cull_mode: ECullMode,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SDepthStencilDesc {
    pub depth_enable: bool,
    pub write_mask: EDepthWriteMask,
    pub depth_func: EComparisonFunc,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EPrimitiveTopologyType {
    Triangle,
}

impl EPrimitiveTopologyType {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_PRIMITIVE_TOPOLOGY_TYPE {
        match self {
            Self::Triangle => D3D12_PRIMITIVE_TOPOLOGY_TYPE_TRIANGLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SGraphicsPipelineStateDesc {
    pub input_layout: Vec<SInputElementDesc>,
    pub vertex_shader: Vec<u8>,
    pub pixel_shader: Vec<u8>,
    // -- blending is always disabled, this is the per-target write mask
    pub render_target_write_mask: u8,
    pub rasterizer: SRasterizerDesc,
    pub depth_stencil: SDepthStencilDesc,
    pub primitive_topology_type: EPrimitiveTopologyType,
    pub rtv_formats: Vec<EDXGIFormat>,
    pub dsv_format: EDXGIFormat,
    pub sample_count: u32,
}

pub const COLOR_WRITE_ENABLE_ALL: u8 = 0xf;

#[cfg(windows)]
pub struct SPipelineState {
    raw: ComPtr<ID3D12PipelineState>,
}

#[cfg(windows)]
impl SPipelineState {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12PipelineState>) -> Self {
        Self { raw: raw }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12PipelineState> {
        &self.raw
    }
}

// -- keeps the storage the raw desc points into alive
#[cfg(windows)]
pub struct SD3DGraphicsPipelineStateDesc {
    _semantic_names: Vec<std::ffi::CString>,
    _input_elements: Vec<D3D12_INPUT_ELEMENT_DESC>,
    pub raw: D3D12_GRAPHICS_PIPELINE_STATE_DESC,
}

#[cfg(windows)]
impl SGraphicsPipelineStateDesc {
    pub fn d3dtype(
        &self,
        root_signature: &SRootSignature,
    ) -> anyhow::Result<SD3DGraphicsPipelineStateDesc> {
        let mut semantic_names = Vec::with_capacity(self.input_layout.len());
        for element in &self.input_layout {
            semantic_names.push(std::ffi::CString::new(element.semantic_name)?);
        }

        let input_elements: Vec<D3D12_INPUT_ELEMENT_DESC> = self
            .input_layout
            .iter()
            .zip(semantic_names.iter())
            .map(|(element, name)| D3D12_INPUT_ELEMENT_DESC {
                SemanticName: name.as_ptr(),
                SemanticIndex: element.semantic_index,
                Format: element.format.d3dtype(),
                InputSlot: element.input_slot,
                AlignedByteOffset: element.aligned_byte_offset,
                InputSlotClass: element.input_slot_class.d3dtype(),
                InstanceDataStepRate: element.instance_data_step_rate,
            })
            .collect();

        if self.rtv_formats.len() > 8 {
            anyhow::bail!("At most 8 render targets, got {}", self.rtv_formats.len());
        }

        let mut raw: D3D12_GRAPHICS_PIPELINE_STATE_DESC = unsafe { mem::zeroed() };
        raw.pRootSignature = unsafe { root_signature.raw().as_raw() };
        raw.VS = D3D12_SHADER_BYTECODE {
            pShaderBytecode: self.vertex_shader.as_ptr() as *const c_void,
            BytecodeLength: self.vertex_shader.len(),
        };
        raw.PS = D3D12_SHADER_BYTECODE {
            pShaderBytecode: self.pixel_shader.as_ptr() as *const c_void,
            BytecodeLength: self.pixel_shader.len(),
        };

        raw.BlendState.RenderTarget[0].RenderTargetWriteMask = self.render_target_write_mask;

        raw.RasterizerState.FillMode = self.rasterizer.fill_mode.d3dtype();
        raw.RasterizerState.CullMode = self.rasterizer.cull_mode.d3dtype();
        raw.RasterizerState.DepthClipEnable = TRUE;

        raw.DepthStencilState.DepthEnable = self.depth_stencil.depth_enable as BOOL;
        raw.DepthStencilState.DepthWriteMask = self.depth_stencil.write_mask.d3dtype();
        raw.DepthStencilState.DepthFunc = self.depth_stencil.depth_func.d3dtype();

        raw.InputLayout = D3D12_INPUT_LAYOUT_DESC {
            pInputElementDescs: input_elements.as_ptr(),
            NumElements: input_elements.len() as u32,
        };
        raw.PrimitiveTopologyType = self.primitive_topology_type.d3dtype();
        raw.NumRenderTargets = self.rtv_formats.len() as u32;
        for (i, format) in self.rtv_formats.iter().enumerate() {
            raw.RTVFormats[i] = format.d3dtype();
        }
        raw.DSVFormat = self.dsv_format.d3dtype();
        raw.SampleDesc = DXGI_SAMPLE_DESC {
            Count: self.sample_count,
            Quality: 0,
        };
        raw.SampleMask = <u32>::max_value();

        Ok(SD3DGraphicsPipelineStateDesc {
            _semantic_names: semantic_names,
            _input_elements: input_elements,
            raw,
        })
    }
}
