// -- only the windows build drives the renderer, elsewhere it is exercised by tests alone
#![cfg_attr(not(windows), allow(dead_code))]

extern crate nalgebra_glm as glm;

mod config;
mod math;
mod niced3d12;
mod render;
mod shadercompile;
mod texture;
mod typeyd3d12;
mod utils;

#[cfg(windows)]
mod safewindows;
#[cfg(windows)]
mod win;

use std::path::Path;

use log::error;

use config::SRenderConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = SRenderConfig::load(Path::new("config.json"))?;
    run_with_config(&config)
}

#[cfg(windows)]
fn run_with_config(config: &SRenderConfig) -> anyhow::Result<()> {
    use niced3d12 as n12;
    use typeyd3d12 as t12;

    let vertex_shader = shadercompile::compile_shader_if_changed(config, &config.vertex_shader)?;
    let pixel_shader = shadercompile::compile_shader_if_changed(config, &config.pixel_shader)?;
    let texture = texture::STextureData::load(Path::new(&config.texture_path))?;

    let winapi = safewindows::initwinapi()?;
    let windowclass = winapi.registerclassex("rusframe")?;
    let window = windowclass.createwindow(&config.window_title, config.width, config.height)?;

    // -- debug layer has to be on before the device exists
    if config.d3d_debug {
        let debuginterface = t12::SDebugInterface::new()?;
        debuginterface.enabledebuglayer();
        log::info!("D3D12 debug layer enabled");
    }

    let factory = n12::SFactory::<t12::SD3D12Backend>::new_from_raw(t12::SFactory::new(
        config.d3d_debug,
    )?);
    let mut render = render::SRender::new(
        &factory,
        &window,
        config,
        vertex_shader,
        pixel_shader,
        &texture,
        Box::new(render::SNoOverlay),
    )?;

    window.show();
    render.run(|| safewindows::pumpmessages() == safewindows::EPumpResult::Continue)
}

#[cfg(not(windows))]
fn run_with_config(_config: &SRenderConfig) -> anyhow::Result<()> {
    anyhow::bail!("rusframe renders through Direct3D 12 and only runs on windows")
}
