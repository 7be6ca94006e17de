use super::*;

// -- root parameter slots of the textured object pipeline
pub const ROOT_PARAM_MATERIAL: u32 = 0;
pub const ROOT_PARAM_WVP: u32 = 1;
pub const ROOT_PARAM_TEXTURE: u32 = 2;

pub fn object3d_root_signature_desc() -> t12::SRootSignatureDesc {
    let mut desc = t12::SRootSignatureDesc::new(
        t12::SRootSignatureFlags::ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT,
    );

    desc.parameters.push(t12::SRootParameter {
        type_data: t12::ERootParameterTypeData::CBV {
            descriptor: t12::SRootDescriptor {
                shader_register: 0,
                register_space: 0,
            },
        },
        shader_visibility: t12::EShaderVisibility::Pixel,
    });

    desc.parameters.push(t12::SRootParameter {
        type_data: t12::ERootParameterTypeData::CBV {
            descriptor: t12::SRootDescriptor {
                shader_register: 0,
                register_space: 0,
            },
        },
        shader_visibility: t12::EShaderVisibility::Vertex,
    });

    let mut table = t12::SRootDescriptorTable::new();
    table.descriptor_ranges.push(t12::SDescriptorRange {
        range_type: t12::EDescriptorRangeType::SRV,
        num_descriptors: 1,
        base_shader_register: 0,
        register_space: 0,
        offset_in_descriptors_from_table_start: t12::EDescriptorRangeOffset::Append,
    });
    desc.parameters.push(t12::SRootParameter {
        type_data: t12::ERootParameterTypeData::DescriptorTable { table },
        shader_visibility: t12::EShaderVisibility::Pixel,
    });

    desc.static_samplers.push(t12::SStaticSamplerDesc::linear_wrap(
        0,
        t12::EShaderVisibility::Pixel,
    ));

    desc
}

pub fn object3d_input_layout() -> Vec<t12::SInputElementDesc> {
    vec![
        t12::SInputElementDesc::create(
            "POSITION",
            0,
            t12::EDXGIFormat::R32G32B32A32Float,
            0,
            t12::APPEND_ALIGNED_ELEMENT,
            t12::EInputClassification::PerVertexData,
            0,
        ),
        t12::SInputElementDesc::create(
            "TEXCOORD",
            0,
            t12::EDXGIFormat::R32G32Float,
            0,
            t12::APPEND_ALIGNED_ELEMENT,
            t12::EInputClassification::PerVertexData,
            0,
        ),
    ]
}

pub fn object3d_pipeline_state_desc(
    vertex_shader: Vec<u8>,
    pixel_shader: Vec<u8>,
) -> t12::SGraphicsPipelineStateDesc {
    t12::SGraphicsPipelineStateDesc {
        input_layout: object3d_input_layout(),
        vertex_shader: vertex_shader,
        pixel_shader: pixel_shader,
        render_target_write_mask: t12::COLOR_WRITE_ENABLE_ALL,
        rasterizer: t12::SRasterizerDesc {
            fill_mode: t12::EFillMode::Solid,
            cull_mode: t12::ECullMode::Back,
        },
        depth_stencil: t12::SDepthStencilDesc {
            depth_enable: true,
            write_mask: t12::EDepthWriteMask::All,
            depth_func: t12::EComparisonFunc::LessEqual,
        },
        primitive_topology_type: t12::EPrimitiveTopologyType::Triangle,
        rtv_formats: vec![t12::EDXGIFormat::R8G8B8A8UNormSRGB],
        dsv_format: t12::EDXGIFormat::D24UNormS8UInt,
        sample_count: 1,
    }
}

// -- root signature plus the one immutable PSO built against it
pub struct SPipeline<B: TBackend> {
    root_signature: B::RootSignature,
    pipeline_state: B::PipelineState,
}

impl<B: TBackend> SPipeline<B> {
    pub fn new(
        device: &SDevice<B>,
        vertex_shader: Vec<u8>,
        pixel_shader: Vec<u8>,
    ) -> anyhow::Result<Self> {
        let root_signature = device
            .create_root_signature(&object3d_root_signature_desc())
            .context("Building root signature")?;

        let pipeline_state = device
            .create_graphics_pipeline_state(
                &root_signature,
                &object3d_pipeline_state_desc(vertex_shader, pixel_shader),
            )
            .context("Building pipeline state")?;

        info!("Built pipeline state");

        Ok(Self {
            root_signature: root_signature,
            pipeline_state: pipeline_state,
        })
    }

    pub fn root_signature(&self) -> &B::RootSignature {
        &self.root_signature
    }

    pub fn pipeline_state(&self) -> &B::PipelineState {
        &self.pipeline_state
    }
}
