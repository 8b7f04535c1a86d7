//! Yggdrasil bootstrap application
//!
//! Opens the main window, brings up the Vulkan device and runs an input loop
//! until the window is closed or Escape is pressed.

use thiserror::Error;
use yggdrasil_engine::config::ConfigError;
use yggdrasil_engine::foundation::logging;
use yggdrasil_engine::platform::WindowError;
use yggdrasil_engine::prelude::*;

/// Configuration file read from the working directory
const CONFIG_PATH: &str = "yggdrasil.toml";

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Renderer error: {0}")]
    Renderer(#[from] VulkanError),
}

fn run() -> Result<(), AppError> {
    let config = match ApplicationConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            return Err(e.into());
        }
    };
    logging::init_with_level(&config.engine.log_level);
    config.validate()?;

    log::info!("Starting {}", config.renderer.application_name);

    let mut platform = PlatformContext::init()?;
    let mut window = Window::create(
        &mut platform,
        &config.window.title,
        config.window.width,
        config.window.height,
        config.window.mode,
    )?;

    let mut lifecycle = RendererLifecycle::load(config.renderer.clone())?;
    let mut renderer = Renderer::default();
    if let Err(e) = lifecycle.create(&window.native(), &mut renderer) {
        log::error!("Renderer bootstrap failed: {}", e);
        lifecycle.destroy(renderer);
        return Err(e.into());
    }

    loop {
        window.update_input(&mut platform);
        let input = window.input();
        if input.closed_window || input.key_down(Key::Escape) {
            break;
        }
    }

    log::info!("Shutting down");
    lifecycle.destroy(renderer);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().inspect_err(|e| log::error!("{}", e))?;
    Ok(())
}
