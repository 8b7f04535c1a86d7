//! Recording in-memory [`GraphicsApi`] for tests

use ash::prelude::VkResult;
use ash::vk::{self, Handle};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};
use std::cell::RefCell;
use std::ffi::{c_void, CStr, CString};
use std::ptr::NonNull;

use super::api::{DeviceRequest, GraphicsApi, InstanceRequest, PhysicalDeviceProperties};
use super::device_selector::required_device_extensions;
use crate::platform::NativeWindow;

pub fn instance_handle() -> vk::Instance {
    vk::Instance::from_raw(0x1000)
}

pub fn surface_handle() -> vk::SurfaceKHR {
    vk::SurfaceKHR::from_raw(0x2000)
}

pub fn device_handle() -> vk::Device {
    vk::Device::from_raw(0x3000)
}

const PHYSICAL_DEVICE_BASE: u64 = 0x100;
const QUEUE_BASE: u64 = 0x4000;

/// Handle of the `index`th mock device in enumeration order
pub fn physical_device(index: usize) -> vk::PhysicalDevice {
    vk::PhysicalDevice::from_raw(PHYSICAL_DEVICE_BASE + index as u64)
}

/// Non-null Xlib handles; the mock never dereferences them
pub fn test_window() -> NativeWindow {
    let mut display = XlibDisplayHandle::empty();
    display.display = NonNull::<c_void>::dangling().as_ptr();
    let mut window = XlibWindowHandle::empty();
    window.window = 0x5000;

    NativeWindow::new(RawDisplayHandle::Xlib(display), RawWindowHandle::Xlib(window))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateInstance,
    CreateSurface,
    EnumeratePhysicalDevices,
    DeviceProperties(vk::PhysicalDevice),
    DeviceExtensions(vk::PhysicalDevice),
    QueueFamilies(vk::PhysicalDevice),
    CreateDevice(vk::PhysicalDevice),
    DeviceQueue(u32, u32),
    DestroySurface(vk::SurfaceKHR),
    DestroyDevice(vk::Device),
    DestroyInstance(vk::Instance),
}

#[derive(Debug, Clone)]
pub struct MockFamily {
    pub flags: vk::QueueFlags,
    pub present: bool,
}

pub fn family(flags: vk::QueueFlags, present: bool) -> MockFamily {
    MockFamily { flags, present }
}

#[derive(Debug, Clone)]
pub struct MockDevice {
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
    pub extensions: Vec<CString>,
    pub families: Vec<MockFamily>,
}

impl MockDevice {
    /// Swapchain-capable device with one graphics+transfer family that presents
    pub fn new(name: &str, device_type: vk::PhysicalDeviceType) -> Self {
        Self {
            name: name.to_string(),
            device_type,
            extensions: required_device_extensions().iter().map(|&name| name.to_owned()).collect(),
            families: vec![family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER, true)],
        }
    }

    pub fn without_extensions(mut self) -> Self {
        self.extensions.clear();
        self
    }

    pub fn with_extensions(mut self, extensions: &[&CStr]) -> Self {
        self.extensions = extensions.iter().map(|&name| name.to_owned()).collect();
        self
    }

    pub fn with_families(mut self, families: Vec<MockFamily>) -> Self {
        self.families = families;
        self
    }
}

#[derive(Debug, Default)]
pub struct MockApi {
    pub devices: Vec<MockDevice>,
    pub fail_instance: Option<vk::Result>,
    pub fail_surface: Option<vk::Result>,
    pub fail_device: Option<vk::Result>,
    pub fail_enumerate: Option<vk::Result>,
    pub fail_surface_support: Option<vk::Result>,
    calls: RefCell<Vec<Call>>,
    instance_requests: Vec<InstanceRequest>,
    device_requests: Vec<DeviceRequest>,
    live_instances: Vec<vk::Instance>,
    live_surfaces: Vec<vk::SurfaceKHR>,
    live_devices: Vec<vk::Device>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn instance_requests(&self) -> &[InstanceRequest] {
        &self.instance_requests
    }

    pub fn device_requests(&self) -> &[DeviceRequest] {
        &self.device_requests
    }

    pub fn live_instances(&self) -> &[vk::Instance] {
        &self.live_instances
    }

    pub fn live_surfaces(&self) -> &[vk::SurfaceKHR] {
        &self.live_surfaces
    }

    pub fn live_devices(&self) -> &[vk::Device] {
        &self.live_devices
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn device(&self, handle: vk::PhysicalDevice) -> &MockDevice {
        let index = (handle.as_raw() - PHYSICAL_DEVICE_BASE) as usize;
        &self.devices[index]
    }
}

impl GraphicsApi for MockApi {
    fn create_instance(&mut self, request: &InstanceRequest) -> VkResult<vk::Instance> {
        self.record(Call::CreateInstance);
        self.instance_requests.push(request.clone());
        if let Some(result) = self.fail_instance {
            return Err(result);
        }
        self.live_instances.push(instance_handle());
        Ok(instance_handle())
    }

    fn create_surface(&mut self, _instance: vk::Instance, _window: &NativeWindow) -> VkResult<vk::SurfaceKHR> {
        self.record(Call::CreateSurface);
        if let Some(result) = self.fail_surface {
            return Err(result);
        }
        self.live_surfaces.push(surface_handle());
        Ok(surface_handle())
    }

    fn enumerate_physical_devices(&self, _instance: vk::Instance) -> VkResult<Vec<vk::PhysicalDevice>> {
        self.record(Call::EnumeratePhysicalDevices);
        if let Some(result) = self.fail_enumerate {
            return Err(result);
        }
        Ok((0..self.devices.len()).map(physical_device).collect())
    }

    fn device_properties(&self, device: vk::PhysicalDevice) -> PhysicalDeviceProperties {
        self.record(Call::DeviceProperties(device));
        let mock = self.device(device);
        PhysicalDeviceProperties {
            name: mock.name.clone(),
            device_type: mock.device_type,
        }
    }

    fn device_extensions(&self, device: vk::PhysicalDevice) -> VkResult<Vec<CString>> {
        self.record(Call::DeviceExtensions(device));
        Ok(self.device(device).extensions.clone())
    }

    fn queue_families(&self, device: vk::PhysicalDevice) -> Vec<vk::QueueFamilyProperties> {
        self.record(Call::QueueFamilies(device));
        self.device(device)
            .families
            .iter()
            .map(|family| vk::QueueFamilyProperties {
                queue_flags: family.flags,
                queue_count: 1,
                ..Default::default()
            })
            .collect()
    }

    fn surface_support(
        &self,
        device: vk::PhysicalDevice,
        family_index: u32,
        _surface: vk::SurfaceKHR,
    ) -> VkResult<bool> {
        if let Some(result) = self.fail_surface_support {
            return Err(result);
        }
        Ok(self
            .device(device)
            .families
            .get(family_index as usize)
            .is_some_and(|family| family.present))
    }

    fn create_device(
        &mut self,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest,
    ) -> VkResult<vk::Device> {
        self.record(Call::CreateDevice(physical_device));
        if let Some(result) = self.fail_device {
            return Err(result);
        }
        self.device_requests.push(request.clone());
        self.live_devices.push(device_handle());
        Ok(device_handle())
    }

    fn device_queue(&self, _device: vk::Device, family_index: u32, queue_index: u32) -> vk::Queue {
        self.record(Call::DeviceQueue(family_index, queue_index));
        vk::Queue::from_raw(QUEUE_BASE + family_index as u64)
    }

    fn destroy_surface(&mut self, _instance: vk::Instance, surface: vk::SurfaceKHR) {
        self.record(Call::DestroySurface(surface));
        self.live_surfaces.retain(|&live| live != surface);
    }

    fn destroy_device(&mut self, device: vk::Device) {
        self.record(Call::DestroyDevice(device));
        self.live_devices.retain(|&live| live != device);
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        self.record(Call::DestroyInstance(instance));
        self.live_instances.retain(|&live| live != instance);
    }
}
