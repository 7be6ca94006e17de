use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SShaderConfig {
    pub name: String,
    pub src_path: String,
    pub profile: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SRenderConfig {
    pub window_title: String,
    pub width: u32,
    pub height: u32,

    pub vertex_shader: SShaderConfig,
    pub pixel_shader: SShaderConfig,
    pub dxc_path: String,
    pub built_shader_dir: String,

    pub texture_path: String,
    pub clear_colour: [f32; 4],

    pub d3d_debug: bool,
}

impl Default for SRenderConfig {
    fn default() -> Self {
        Self {
            window_title: "rusframe".to_string(),
            width: 1280,
            height: 720,

            vertex_shader: SShaderConfig {
                name: "Object3D.VS".to_string(),
                src_path: "shaders/Object3D.VS.hlsl".to_string(),
                profile: "vs_6_0".to_string(),
            },
            pixel_shader: SShaderConfig {
                name: "Object3D.PS".to_string(),
                src_path: "shaders/Object3D.PS.hlsl".to_string(),
                profile: "ps_6_0".to_string(),
            },
            dxc_path: "dxc".to_string(),
            built_shader_dir: "shaders_built".to_string(),

            texture_path: "resources/uvChecker.png".to_string(),
            clear_colour: [0.1, 0.25, 0.5, 1.0],

            d3d_debug: cfg!(debug_assertions),
        }
    }
}

impl SRenderConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("Parsing render config")?;
        config.validate()?;
        Ok(config)
    }

    // -- a missing file means defaults, a malformed one is fatal
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Client area must be non-empty, got {}x{}", self.width, self.height);
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SRenderConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.vertex_shader.profile, "vs_6_0");
        assert_eq!(config.pixel_shader.profile, "ps_6_0");
        assert_eq!(config.clear_colour, [0.1, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SRenderConfig::from_json(r#"{ "width": 800, "d3d_debug": true }"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 720);
        assert!(config.d3d_debug);
        assert_eq!(config.texture_path, "resources/uvChecker.png");
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(SRenderConfig::from_json(r#"{ "height": 0 }"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(SRenderConfig::from_json("{ width: ").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = SRenderConfig::load(Path::new("does/not/exist/config.json")).unwrap();
        assert_eq!(config, SRenderConfig::default());
    }
}
