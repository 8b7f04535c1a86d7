// Vulkan device bootstrap components

pub mod api;
pub mod ash_api;
pub mod device_selector;
pub mod error;
pub mod instance;
pub mod logical_device;
pub mod platform;
pub mod renderer;
pub mod surface;

#[cfg(test)]
mod mock;

pub use api::*;
pub use ash_api::AshApi;
pub use device_selector::*;
pub use error::*;
pub use instance::*;
pub use logical_device::*;
pub use platform::{ActivePlatform, SurfacePlatform};
pub use renderer::*;
pub use surface::*;
