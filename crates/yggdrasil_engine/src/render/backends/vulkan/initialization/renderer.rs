//! Renderer bootstrap and teardown
//!
//! [`RendererLifecycle::create`] runs instance, surface, device selection and
//! logical device creation strictly in that order and stops at the first
//! failure. Nothing is rolled back on failure: whatever was created stays in
//! the [`Renderer`] and is released by [`RendererLifecycle::destroy`], which
//! treats handles that were never created as no-ops.

use ash::vk;

use super::api::GraphicsApi;
use super::ash_api::AshApi;
use super::device_selector::{DeviceSelector, QueueFamilyIndices};
use super::error::VulkanResult;
use super::instance::InstanceFactory;
use super::logical_device::LogicalDeviceFactory;
use super::surface::SurfaceFactory;
use crate::core::config::{BuildMode, RendererConfig};
use crate::platform::NativeWindow;

/// Handles for the stages after device bootstrap
///
/// Left null by the bootstrap; later stages own populating them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameResources {
    /// Presentation swapchain
    pub swapchain: vk::SwapchainKHR,
    /// Main render pass
    pub render_pass: vk::RenderPass,
    /// Main graphics pipeline
    pub graphics_pipeline: vk::Pipeline,
    /// Command pool on the graphics family
    pub command_pool: vk::CommandPool,
    /// Primary command buffer
    pub command_buffer: vk::CommandBuffer,
    /// Swapchain framebuffer
    pub framebuffer: vk::Framebuffer,
}

/// Device-level Vulkan objects of one renderer
///
/// Either fully populated by a successful [`RendererLifecycle::create`] or
/// holding only the handles created before a failure, the rest null. The
/// default value is the never-built state.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Renderer {
    instance: vk::Instance,
    surface: vk::SurfaceKHR,
    physical_device: vk::PhysicalDevice,
    device: vk::Device,
    queue_families: QueueFamilyIndices,
    graphics_queue: vk::Queue,
    transfer_queue: vk::Queue,
    /// Later-stage handles, not built by the bootstrap
    pub frame: FrameResources,
}

impl Renderer {
    /// Vulkan instance
    pub fn instance(&self) -> vk::Instance {
        self.instance
    }

    /// Window surface
    pub fn surface(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// Selected physical device
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// Logical device
    pub fn device(&self) -> vk::Device {
        self.device
    }

    /// Resolved queue families
    pub fn queue_families(&self) -> QueueFamilyIndices {
        self.queue_families
    }

    /// Graphics queue family index, if resolved
    pub fn graphics_queue_family_index(&self) -> Option<u32> {
        self.queue_families.graphics
    }

    /// Transfer queue family index, if resolved
    pub fn transfer_queue_family_index(&self) -> Option<u32> {
        self.queue_families.transfer
    }

    /// Graphics and present queue
    pub fn graphics_queue(&self) -> vk::Queue {
        self.graphics_queue
    }

    /// Transfer queue; the graphics queue when the families coincide
    pub fn transfer_queue(&self) -> vk::Queue {
        self.transfer_queue
    }

    /// Whether every bootstrap field is populated
    pub fn is_complete(&self) -> bool {
        self.instance != vk::Instance::null()
            && self.surface != vk::SurfaceKHR::null()
            && self.physical_device != vk::PhysicalDevice::null()
            && self.device != vk::Device::null()
            && self.queue_families.is_complete()
            && self.graphics_queue != vk::Queue::null()
            && self.transfer_queue != vk::Queue::null()
    }
}

/// Creates and destroys [`Renderer`]s against one [`GraphicsApi`]
pub struct RendererLifecycle<A: GraphicsApi> {
    api: A,
    config: RendererConfig,
    build_mode: BuildMode,
}

impl RendererLifecycle<AshApi> {
    /// Load the system Vulkan loader and configure for the current build
    pub fn load(config: RendererConfig) -> VulkanResult<Self> {
        Ok(Self::new(AshApi::load()?, config, BuildMode::current()))
    }
}

impl<A: GraphicsApi> RendererLifecycle<A> {
    /// Wrap an API implementation
    pub fn new(api: A, config: RendererConfig, build_mode: BuildMode) -> Self {
        Self {
            api,
            config,
            build_mode,
        }
    }

    /// The underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Bootstrap `renderer` for `window`
    ///
    /// `renderer` is reset first. On error it keeps whatever handles were
    /// created before the failing step; pass it to [`Self::destroy`] to
    /// release them.
    pub fn create(&mut self, window: &NativeWindow, renderer: &mut Renderer) -> VulkanResult<()> {
        *renderer = Renderer::default();

        renderer.instance = InstanceFactory::new(&self.config, self.build_mode).create(&mut self.api)?;
        renderer.surface = SurfaceFactory::create(&mut self.api, renderer.instance, window)?;

        let selected = DeviceSelector::new(&self.api).select(renderer.instance, renderer.surface)?;
        renderer.physical_device = selected.device;
        renderer.queue_families = selected.queue_families;

        let logical = LogicalDeviceFactory::create(&mut self.api, selected.device, selected.queue_families)?;
        renderer.device = logical.device;
        renderer.graphics_queue = logical.graphics_queue;
        renderer.transfer_queue = logical.transfer_queue;

        log::info!("Renderer bootstrap complete");
        Ok(())
    }

    /// Release the surface, then the device, then the instance
    pub fn destroy(&mut self, renderer: Renderer) {
        log::debug!("Destroying renderer");
        self.api.destroy_surface(renderer.instance, renderer.surface);
        self.api.destroy_device(renderer.device);
        self.api.destroy_instance(renderer.instance);
    }
}
