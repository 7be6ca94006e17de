use super::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EFilter {
    MinMagMipLinear,
}

impl EFilter {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_FILTER {
        match self {
            Self::MinMagMipLinear => D3D12_FILTER_MIN_MAG_MIP_LINEAR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ETextureAddressMode {
    Wrap,
}

impl ETextureAddressMode {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_TEXTURE_ADDRESS_MODE {
        match self {
            Self::Wrap => D3D12_TEXTURE_ADDRESS_MODE_WRAP,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EStaticBorderColor {
    TransparentBlack,
}

impl EStaticBorderColor {
    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_STATIC_BORDER_COLOR {
        match self {
            Self::TransparentBlack => D3D12_STATIC_BORDER_COLOR_TRANSPARENT_BLACK,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SStaticSamplerDesc {
    pub filter: EFilter,
    pub address_u: ETextureAddressMode,
    pub address_v: ETextureAddressMode,
    pub address_w: ETextureAddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: EComparisonFunc,
    pub border_color: EStaticBorderColor,
    pub min_lod: f32,
    pub max_lod: f32,
    pub shader_register: u32,
    pub register_space: u32,
    pub shader_visibility: EShaderVisibility,
}

impl SStaticSamplerDesc {
    // -- linear filtering, wrapped on every axis, all mips
    pub fn linear_wrap(shader_register: u32, shader_visibility: EShaderVisibility) -> Self {
        Self {
            filter: EFilter::MinMagMipLinear,
            address_u: ETextureAddressMode::Wrap,
            address_v: ETextureAddressMode::Wrap,
            address_w: ETextureAddressMode::Wrap,
            mip_lod_bias: 0.0,
            max_anisotropy: 0,
            comparison_func: EComparisonFunc::Never,
            border_color: EStaticBorderColor::TransparentBlack,
            min_lod: 0.0,
            max_lod: std::f32::MAX,
            shader_register,
            register_space: 0,
            shader_visibility,
        }
    }

    #[cfg(windows)]
    pub fn d3dtype(&self) -> D3D12_STATIC_SAMPLER_DESC {
        D3D12_STATIC_SAMPLER_DESC {
            Filter: self.filter.d3dtype(),
            AddressU: self.address_u.d3dtype(),
            AddressV: self.address_v.d3dtype(),
            AddressW: self.address_w.d3dtype(),
            MipLODBias: self.mip_lod_bias,
            MaxAnisotropy: self.max_anisotropy,
            ComparisonFunc: self.comparison_func.d3dtype(),
            BorderColor: self.border_color.d3dtype(),
            MinLOD: self.min_lod,
            MaxLOD: self.max_lod,
            ShaderRegister: self.shader_register,
            RegisterSpace: self.register_space,
            ShaderVisibility: self.shader_visibility.d3dtype(),
        }
    }
}
