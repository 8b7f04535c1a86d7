//! Capability interface over the Vulkan calls the bootstrap makes
//!
//! The factories in this module tree only talk to Vulkan through
//! [`GraphicsApi`]. [`super::AshApi`] is the production implementation; tests
//! drive an in-memory one.

use ash::prelude::VkResult;
use ash::vk;
use std::ffi::{CStr, CString};

use crate::platform::NativeWindow;

/// Everything `vkCreateInstance` needs, as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRequest {
    /// Application name reported to the driver
    pub application_name: CString,
    /// Packed application version
    pub application_version: u32,
    /// Engine name reported to the driver
    pub engine_name: CString,
    /// Packed engine version
    pub engine_version: u32,
    /// Requested API version
    pub api_version: u32,
    /// Instance extensions to enable
    pub extensions: Vec<&'static CStr>,
    /// Instance layers to enable
    pub layers: Vec<&'static CStr>,
    /// Install a messenger forwarding validation output to the log
    pub debug_messenger: bool,
}

/// One `VkDeviceQueueCreateInfo`
#[derive(Debug, Clone, PartialEq)]
pub struct QueueRequest {
    /// Queue family to create queues from
    pub family_index: u32,
    /// One priority per queue
    pub priorities: Vec<f32>,
}

/// Everything `vkCreateDevice` needs, as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRequest {
    /// Queue families and queue counts; each family appears at most once
    pub queues: Vec<QueueRequest>,
    /// Device extensions to enable
    pub extensions: Vec<&'static CStr>,
}

/// The subset of `VkPhysicalDeviceProperties` used for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDeviceProperties {
    /// Driver-reported device name
    pub name: String,
    /// Discrete, integrated, virtual, CPU or other
    pub device_type: vk::PhysicalDeviceType,
}

/// Vulkan entry points used by the renderer bootstrap
///
/// Handles are plain `vk` handles. Destroy calls given a null handle do nothing.
pub trait GraphicsApi {
    /// `vkCreateInstance`
    fn create_instance(&mut self, request: &InstanceRequest) -> VkResult<vk::Instance>;

    /// Platform surface creation for `window`
    fn create_surface(&mut self, instance: vk::Instance, window: &NativeWindow) -> VkResult<vk::SurfaceKHR>;

    /// `vkEnumeratePhysicalDevices`
    fn enumerate_physical_devices(&self, instance: vk::Instance) -> VkResult<Vec<vk::PhysicalDevice>>;

    /// `vkGetPhysicalDeviceProperties`
    fn device_properties(&self, device: vk::PhysicalDevice) -> PhysicalDeviceProperties;

    /// `vkEnumerateDeviceExtensionProperties`, names only
    fn device_extensions(&self, device: vk::PhysicalDevice) -> VkResult<Vec<CString>>;

    /// `vkGetPhysicalDeviceQueueFamilyProperties`
    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties>;

    /// `vkGetPhysicalDeviceSurfaceSupportKHR`
    fn surface_support(
        &self,
        device: vk::PhysicalDevice,
        family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VkResult<bool>;

    /// `vkCreateDevice`
    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VkResult<vk::Device>;

    /// `vkGetDeviceQueue`
    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> vk::Queue;

    /// `vkDestroySurfaceKHR`
    fn destroy_surface(&mut self, instance: vk::Instance, surface: vk::SurfaceKHR);

    /// `vkDestroyDevice`
    fn destroy_device(&mut self, device: vk::Device);

    /// `vkDestroyInstance`
    fn destroy_instance(&mut self, instance: vk::Instance);
}
