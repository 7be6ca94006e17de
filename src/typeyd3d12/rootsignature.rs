use super::*;

use arrayvec::ArrayVec;
use bitflags::bitflags;

bitflags! {
    pub struct SRootSignatureFlags: u32 {
        const NONE = 0;
        const ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT = 0x1;
        const DENY_VERTEX_SHADER_ROOT_ACCESS = 0x2;
        const DENY_HULL_SHADER_ROOT_ACCESS = 0x4;
        const DENY_DOMAIN_SHADER_ROOT_ACCESS = 0x8;
        const DENY_GEOMETRY_SHADER_ROOT_ACCESS = 0x10;
        const DENY_PIXEL_SHADER_ROOT_ACCESS = 0x20;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EShaderVisibility {
    Vertex,
    Pixel,
}

impl EShaderVisibility {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_SHADER_VISIBILITY {
        match self {
            Self::Vertex => D3D12_SHADER_VISIBILITY_VERTEX,
            Self::Pixel => D3D12_SHADER_VISIBILITY_PIXEL,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SRootDescriptor {
    pub shader_register: u32,
    pub register_space: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SRootDescriptorTable {
    pub descriptor_ranges: ArrayVec<[SDescriptorRange; 16]>,
}

impl SRootDescriptorTable {
    pub fn new() -> Self {
        Self {
            descriptor_ranges: ArrayVec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ERootParameterTypeData {
    DescriptorTable { table: SRootDescriptorTable },
    CBV { descriptor: SRootDescriptor },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SRootParameter {
    pub type_data: ERootParameterTypeData,
    pub shader_visibility: EShaderVisibility,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SRootSignatureDesc {
    pub parameters: Vec<SRootParameter>,
    pub static_samplers: Vec<SStaticSamplerDesc>,
    pub flags: SRootSignatureFlags,
}

impl SRootSignatureDesc {
    pub fn new(flags: SRootSignatureFlags) -> Self {
        Self {
            parameters: Vec::new(),
            static_samplers: Vec::new(),
            flags: flags,
        }
    }
}

#[cfg(windows)]
pub struct SRootSignature {
    raw: ComPtr<ID3D12RootSignature>,
}

#[cfg(windows)]
impl SRootSignature {
    pub unsafe fn new_from_raw(raw: ComPtr<ID3D12RootSignature>) -> Self {
        Self { raw: raw }
    }

    pub unsafe fn raw(&self) -> &ComPtr<ID3D12RootSignature> {
        &self.raw
    }
}

// -- Ok holds the serialized signature, Err holds the error blob text
#[cfg(windows)]
pub fn serialize_root_signature(root_signature: &SRootSignatureDesc) -> Result<SBlob, String> {
    // -- ranges must stay put while the d3d parameters point at them
    let d3d_ranges: Vec<Vec<D3D12_DESCRIPTOR_RANGE>> = root_signature
        .parameters
        .iter()
        .map(|parameter| match &parameter.type_data {
            ERootParameterTypeData::DescriptorTable { table } => {
                table.descriptor_ranges.iter().map(|r| r.d3dtype()).collect()
            }
            _ => Vec::new(),
        })
        .collect();

    let mut d3d_parameters: Vec<D3D12_ROOT_PARAMETER> = Vec::new();
    for (parameter, ranges) in root_signature.parameters.iter().zip(d3d_ranges.iter()) {
        unsafe {
            let mut result = mem::MaybeUninit::<D3D12_ROOT_PARAMETER>::zeroed();
            match &parameter.type_data {
                ERootParameterTypeData::DescriptorTable { .. } => {
                    (*result.as_mut_ptr()).ParameterType = D3D12_ROOT_PARAMETER_TYPE_DESCRIPTOR_TABLE;
                    *(*result.as_mut_ptr()).u.DescriptorTable_mut() = D3D12_ROOT_DESCRIPTOR_TABLE {
                        NumDescriptorRanges: ranges.len() as u32,
                        pDescriptorRanges: ranges.as_ptr(),
                    };
                }
                ERootParameterTypeData::CBV { descriptor } => {
                    (*result.as_mut_ptr()).ParameterType = D3D12_ROOT_PARAMETER_TYPE_CBV;
                    *(*result.as_mut_ptr()).u.Descriptor_mut() = D3D12_ROOT_DESCRIPTOR {
                        ShaderRegister: descriptor.shader_register,
                        RegisterSpace: descriptor.register_space,
                    };
                }
            }
            (*result.as_mut_ptr()).ShaderVisibility = parameter.shader_visibility.d3dtype();
            d3d_parameters.push(result.assume_init());
        }
    }

    let d3d_static_samplers: Vec<D3D12_STATIC_SAMPLER_DESC> = root_signature
        .static_samplers
        .iter()
        .map(|s| s.d3dtype())
        .collect();

    let d3d_signature = D3D12_ROOT_SIGNATURE_DESC {
        NumParameters: d3d_parameters.len() as u32,
        pParameters: d3d_parameters.as_ptr(),
        NumStaticSamplers: d3d_static_samplers.len() as u32,
        pStaticSamplers: d3d_static_samplers.as_ptr(),
        Flags: root_signature.flags.bits(),
    };

    let mut raw_result_blob: *mut ID3DBlob = ptr::null_mut();
    let mut raw_err_blob: *mut ID3DBlob = ptr::null_mut();

    let hr = unsafe {
        D3D12SerializeRootSignature(
            &d3d_signature,
            D3D_ROOT_SIGNATURE_VERSION_1,
            &mut raw_result_blob,
            &mut raw_err_blob,
        )
    };

    if winerror::SUCCEEDED(hr) {
        Ok(SBlob {
            raw: unsafe { ComPtr::from_raw(raw_result_blob) },
        })
    } else if raw_err_blob.is_null() {
        Err(format!("D3D12SerializeRootSignature failed (hresult {:#010x})", hr as u32))
    } else {
        let errblob = SBlob {
            raw: unsafe { ComPtr::from_raw(raw_err_blob) },
        };
        Err(errblob.as_string())
    }
}
