use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{bail, Context};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{SRenderConfig, SShaderConfig};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SBuiltShaderMetadata {
    src_write_time: SystemTime,
}

pub struct SShaderPaths {
    pub src: PathBuf,
    pub built: PathBuf,
    pub metadata: PathBuf,
}

impl SShaderPaths {
    pub fn new(built_dir: &str, shader: &SShaderConfig) -> Self {
        let built_dir = Path::new(built_dir);
        Self {
            src: PathBuf::from(&shader.src_path),
            built: built_dir.join(format!("{}.cso", shader.name)),
            metadata: built_dir.join(format!("{}.shader_build_metadata", shader.name)),
        }
    }
}

pub fn dxc_arguments(profile: &str, src: &Path, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push(src.into());
    for arg in &["-E", "main", "-T", profile, "-Zi", "-Qembed_debug", "-Od", "-Zpr", "-Fo"] {
        args.push(arg.into());
    }
    args.push(out.into());
    args
}

// -- dxc prints warnings to stderr and still exits 0, warnings are treated as failures too
pub fn check_compiler_output(
    shader_name: &str,
    success: bool,
    stderr: &[u8],
) -> anyhow::Result<()> {
    let diagnostics = String::from_utf8_lossy(stderr);
    let diagnostics = diagnostics.trim();

    if !success {
        bail!("Compiling shader {} failed:\n{}", shader_name, diagnostics);
    }
    if !diagnostics.is_empty() {
        bail!("Compiling shader {} produced diagnostics:\n{}", shader_name, diagnostics);
    }
    Ok(())
}

fn src_write_time(src: &Path) -> anyhow::Result<SystemTime> {
    let metadata = std::fs::metadata(src)
        .with_context(|| format!("Reading shader source {}", src.display()))?;
    Ok(metadata.modified()?)
}

fn needs_build(paths: &SShaderPaths) -> anyhow::Result<bool> {
    if !paths.built.exists() || !paths.metadata.exists() {
        return Ok(true);
    }

    let json = std::fs::read_to_string(&paths.metadata)?;
    let built: SBuiltShaderMetadata = match serde_json::from_str(&json) {
        Ok(m) => m,
        Err(_) => return Ok(true),
    };

    Ok(built.src_write_time != src_write_time(&paths.src)?)
}

fn write_metadata(paths: &SShaderPaths) -> anyhow::Result<()> {
    let metadata = SBuiltShaderMetadata {
        src_write_time: src_write_time(&paths.src)?,
    };
    let json = serde_json::to_string(&metadata)?;

    let mut file = std::fs::File::create(&paths.metadata)
        .with_context(|| format!("Writing {}", paths.metadata.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

// -- compiles through dxc unless the cached binary is newer than its source, then returns the
// -- binary
pub fn compile_shader_if_changed(
    config: &SRenderConfig,
    shader: &SShaderConfig,
) -> anyhow::Result<Vec<u8>> {
    let paths = SShaderPaths::new(&config.built_shader_dir, shader);

    if needs_build(&paths)? {
        info!("Compiling shader {}...", shader.name);
        std::fs::create_dir_all(&config.built_shader_dir)
            .with_context(|| format!("Creating {}", config.built_shader_dir))?;

        let mut command = std::process::Command::new(&config.dxc_path);
        command.args(dxc_arguments(&shader.profile, &paths.src, &paths.built));
        debug!("   command: {:?}", command);

        let output = command
            .output()
            .with_context(|| format!("Launching shader compiler {}", config.dxc_path))?;
        check_compiler_output(&shader.name, output.status.success(), &output.stderr)?;

        write_metadata(&paths)?;
        info!("Compiled shader {}", shader.name);
    } else {
        debug!("Shader {} is up to date", shader.name);
    }

    let bytes = std::fs::read(&paths.built)
        .with_context(|| format!("Reading compiled shader {}", paths.built.display()))?;
    if bytes.is_empty() {
        bail!("Compiled shader {} is empty", paths.built.display());
    }
    Ok(bytes)
}
