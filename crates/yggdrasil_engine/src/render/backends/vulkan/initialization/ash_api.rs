//! [`GraphicsApi`] backed by the system Vulkan loader through ash

use ash::extensions::{ext::DebugUtils, khr};
use ash::prelude::VkResult;
use ash::{vk, Device, Entry, Instance};
use std::ffi::{c_char, CStr, CString};

use super::api::{DeviceRequest, GraphicsApi, InstanceRequest, PhysicalDeviceProperties};
use super::error::{VulkanError, VulkanResult};
use super::platform::{ActivePlatform, SurfacePlatform};
use crate::platform::NativeWindow;

/// Live ash loaders for one instance and at most one device
///
/// Owns the function tables only; handle lifetimes are driven through
/// [`GraphicsApi`] by the renderer lifecycle.
pub struct AshApi {
    entry: Entry,
    instance: Option<Instance>,
    debug: Option<(DebugUtils, vk::DebugUtilsMessengerEXT)>,
    surface_loader: Option<khr::Surface>,
    device: Option<Device>,
}

impl AshApi {
    /// Load the Vulkan loader library
    pub fn load() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| {
            log::error!("Failed to load Vulkan: {}", e);
            VulkanError::LoaderUnavailable(e.to_string())
        })?;

        Ok(Self {
            entry,
            instance: None,
            debug: None,
            surface_loader: None,
            device: None,
        })
    }

    fn instance_for(&self, handle: vk::Instance) -> VkResult<&Instance> {
        match &self.instance {
            Some(instance) if instance.handle() == handle => Ok(instance),
            _ => Err(vk::Result::ERROR_INITIALIZATION_FAILED),
        }
    }

    fn current_instance(&self) -> VkResult<&Instance> {
        self.instance.as_ref().ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)
    }

    fn setup_debug_messenger(&mut self, instance: &Instance) {
        let debug_utils = DebugUtils::new(&self.entry, instance);
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                    | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
                    | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        match unsafe { debug_utils.create_debug_utils_messenger(&create_info, None) } {
            Ok(messenger) => self.debug = Some((debug_utils, messenger)),
            // Layers fall back to their default output
            Err(result) => log::warn!("Failed to install debug messenger: {:?}", result),
        }
    }
}

impl GraphicsApi for AshApi {
    fn create_instance(&mut self, request: &InstanceRequest) -> VkResult<vk::Instance> {
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&request.application_name)
            .application_version(request.application_version)
            .engine_name(&request.engine_name)
            .engine_version(request.engine_version)
            .api_version(request.api_version);

        let extensions: Vec<*const c_char> = request.extensions.iter().map(|ext| ext.as_ptr()).collect();
        let layers: Vec<*const c_char> = request.layers.iter().map(|layer| layer.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layers);

        let instance = unsafe { self.entry.create_instance(&create_info, None)? };
        log::info!("Vulkan instance created");

        if request.debug_messenger {
            self.setup_debug_messenger(&instance);
        }

        self.surface_loader = Some(khr::Surface::new(&self.entry, &instance));
        let handle = instance.handle();
        self.instance = Some(instance);
        Ok(handle)
    }

    fn create_surface(&mut self, instance: vk::Instance, window: &NativeWindow) -> VkResult<vk::SurfaceKHR> {
        let instance = self.instance_for(instance)?;
        unsafe { ActivePlatform::create_surface(&self.entry, instance, window) }
    }

    fn enumerate_physical_devices(&self, instance: vk::Instance) -> VkResult<Vec<vk::PhysicalDevice>> {
        let instance = self.instance_for(instance)?;
        unsafe { instance.enumerate_physical_devices() }
    }

    fn device_properties(&self, device: vk::PhysicalDevice) -> PhysicalDeviceProperties {
        let Ok(instance) = self.current_instance() else {
            return PhysicalDeviceProperties {
                name: String::new(),
                device_type: vk::PhysicalDeviceType::OTHER,
            };
        };

        let properties = unsafe { instance.get_physical_device_properties(device) };
        let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
            .to_string_lossy()
            .into_owned();

        PhysicalDeviceProperties {
            name,
            device_type: properties.device_type,
        }
    }

    fn device_extensions(&self, device: vk::PhysicalDevice) -> VkResult<Vec<CString>> {
        let instance = self.current_instance()?;
        let extensions = unsafe { instance.enumerate_device_extension_properties(device)? };

        Ok(extensions
            .iter()
            .map(|ext| unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) }.to_owned())
            .collect())
    }

    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        match self.current_instance() {
            Ok(instance) => unsafe { instance.get_physical_device_queue_family_properties(device) },
            Err(_) => Vec::new(),
        }
    }

    fn surface_support(
        &self,
        device: vk::PhysicalDevice,
        family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VkResult<bool> {
        let surface_loader = self
            .surface_loader
            .as_ref()
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;
        unsafe { surface_loader.get_physical_device_surface_support(device, family_index, surface) }
    }

    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VkResult<vk::Device> {
        let instance = self.current_instance()?;

        let queue_infos: Vec<vk::DeviceQueueCreateInfo> = request
            .queues
            .iter()
            .map(|queue| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(queue.family_index)
                    .queue_priorities(&queue.priorities)
                    .build()
            })
            .collect();
        let extensions: Vec<*const c_char> = request.extensions.iter().map(|ext| ext.as_ptr()).collect();
        let features = vk::PhysicalDeviceFeatures::default();

        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&extensions)
            .enabled_features(&features);

        let device = unsafe { instance.create_device(physical_device, &create_info, None)? };
        let handle = device.handle();
        self.device = Some(device);
        Ok(handle)
    }

    fn device_queue(&self, device: vk::Device, family_index: u32, queue_index: u32) -> vk::Queue {
        match &self.device {
            Some(live) if live.handle() == device => unsafe { live.get_device_queue(family_index, queue_index) },
            _ => vk::Queue::null(),
        }
    }

    fn destroy_surface(&mut self, instance: vk::Instance, surface: vk::SurfaceKHR) {
        if surface == vk::SurfaceKHR::null() || instance == vk::Instance::null() {
            return;
        }
        if let Some(surface_loader) = &self.surface_loader {
            unsafe { surface_loader.destroy_surface(surface, None) };
            log::debug!("Surface destroyed");
        }
    }

    fn destroy_device(&mut self, device: vk::Device) {
        if device == vk::Device::null() {
            return;
        }
        if self.device.as_ref().map(Device::handle) != Some(device) {
            log::warn!("Ignoring destroy of unknown device {:?}", device);
            return;
        }
        let Some(live) = self.device.take() else {
            return;
        };

        unsafe {
            if let Err(result) = live.device_wait_idle() {
                log::warn!("Device wait idle failed before destroy: {:?}", result);
            }
            live.destroy_device(None);
        }
        log::debug!("Logical device destroyed");
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        if instance == vk::Instance::null() {
            return;
        }
        if self.instance.as_ref().map(Instance::handle) != Some(instance) {
            log::warn!("Ignoring destroy of unknown instance {:?}", instance);
            return;
        }
        let Some(live) = self.instance.take() else {
            return;
        };

        unsafe {
            if let Some((debug_utils, messenger)) = self.debug.take() {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            }
            self.surface_loader = None;
            live.destroy_instance(None);
        }
        log::debug!("Vulkan instance destroyed");
    }
}

/// Forward validation messages to the log
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    if callback_data.is_null() || (*callback_data).p_message.is_null() {
        return vk::FALSE;
    }
    let message = CStr::from_ptr((*callback_data).p_message).to_string_lossy();

    log::log!(log_level(message_severity), "[Vulkan] {:?} - {}", message_type, message);

    vk::FALSE
}

/// Log level a validation message is forwarded at
fn log_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> log::Level {
    if severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::Level::Error
    } else if severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::Level::Warn
    } else if severity >= vk::DebugUtilsMessageSeverityFlagsEXT::INFO {
        log::Level::Debug
    } else {
        log::Level::Trace
    }
}
