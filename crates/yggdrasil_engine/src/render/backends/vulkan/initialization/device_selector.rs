//! Physical device selection
//!
//! A device qualifies when it exposes every extension in
//! [`required_device_extensions`] and has a queue family that supports both
//! graphics and presentation to the target surface. Among qualifying devices
//! the first discrete GPU wins outright and stops the scan; otherwise the
//! best of integrated > virtual > CPU > other is kept, first seen on ties.

use ash::extensions::khr;
use ash::vk;
use std::ffi::CStr;

use super::api::{GraphicsApi, PhysicalDeviceProperties};
use super::error::{VulkanError, VulkanResult};

/// Device extensions every candidate must expose and the logical device enables
pub fn required_device_extensions() -> Vec<&'static CStr> {
    vec![khr::Swapchain::name()]
}

/// Queue families the renderer uses; `None` means unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    /// Family supporting graphics and presentation to the surface
    pub graphics: Option<u32>,
    /// Family used for transfers; falls back to the graphics family
    pub transfer: Option<u32>,
}

impl QueueFamilyIndices {
    /// Both families are set
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.transfer.is_some()
    }

    /// Graphics and transfer resolve to the same family
    pub fn is_shared(&self) -> bool {
        self.is_complete() && self.graphics == self.transfer
    }
}

/// How a device type ranks during selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePreference {
    /// Taken immediately; later devices are not examined
    Discrete,
    /// Compared by score, higher wins, first seen keeps ties
    Ranked(u32),
}

impl DevicePreference {
    /// Classify a device type
    pub fn of(device_type: vk::PhysicalDeviceType) -> Self {
        match device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => Self::Discrete,
            vk::PhysicalDeviceType::INTEGRATED_GPU => Self::Ranked(3),
            vk::PhysicalDeviceType::VIRTUAL_GPU => Self::Ranked(2),
            vk::PhysicalDeviceType::CPU => Self::Ranked(1),
            _ => Self::Ranked(0),
        }
    }

    /// Numeric score, discrete above every ranked tier
    pub fn score(self) -> u32 {
        match self {
            Self::Discrete => 4,
            Self::Ranked(score) => score,
        }
    }
}

/// A device that passed filtering, with its resolved families
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalDeviceCandidate {
    /// Physical device handle
    pub device: vk::PhysicalDevice,
    /// Name and type
    pub properties: PhysicalDeviceProperties,
    /// Resolved graphics and transfer families, both set
    pub queue_families: QueueFamilyIndices,
    /// Preference tier of the device type
    pub preference: DevicePreference,
}

/// Reduce qualifying candidates, in enumeration order, to the selected one
///
/// Stops pulling from `candidates` at the first discrete GPU.
pub fn pick_best<I>(candidates: I) -> Option<PhysicalDeviceCandidate>
where
    I: IntoIterator<Item = PhysicalDeviceCandidate>,
{
    let mut best: Option<PhysicalDeviceCandidate> = None;

    for candidate in candidates {
        match candidate.preference {
            DevicePreference::Discrete => return Some(candidate),
            DevicePreference::Ranked(score) => {
                let better = best
                    .as_ref()
                    .map_or(true, |current| score > current.preference.score());
                if better {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

/// Enumerates, filters and ranks physical devices
pub struct DeviceSelector<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: GraphicsApi + ?Sized> DeviceSelector<'a, A> {
    /// Create a selector over `api`
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Select the physical device to render with
    ///
    /// # Panics
    /// Null `instance` or `surface` handles are caller bugs.
    pub fn select(
        &self,
        instance: vk::Instance,
        surface: vk::SurfaceKHR,
    ) -> VulkanResult<PhysicalDeviceCandidate> {
        assert!(instance != vk::Instance::null(), "Vulkan instance is null");
        assert!(surface != vk::SurfaceKHR::null(), "Window surface is null");

        let devices = self.api.enumerate_physical_devices(instance).map_err(|result| {
            log::error!("Failed to enumerate physical devices: {:?}", result);
            VulkanError::NoQualifyingDevice(format!("enumeration failed: {:?}", result))
        })?;

        if devices.is_empty() {
            log::error!("No Vulkan-compatible devices found");
            return Err(VulkanError::NoQualifyingDevice(
                "no Vulkan-compatible devices found".to_string(),
            ));
        }
        log::debug!("Evaluating {} physical device(s)", devices.len());

        let candidates = devices
            .into_iter()
            .filter_map(|device| self.evaluate_device(device, surface));

        match pick_best(candidates) {
            Some(selected) => {
                log::info!(
                    "Selected GPU: {} ({:?})",
                    selected.properties.name,
                    selected.properties.device_type
                );
                Ok(selected)
            }
            None => {
                log::error!("No suitable Vulkan physical device found");
                Err(VulkanError::NoQualifyingDevice(
                    "no device has the required extensions and a graphics+present queue family"
                        .to_string(),
                ))
            }
        }
    }

    /// Whether every required extension is exposed by `device`
    pub fn has_required_extensions(&self, device: vk::PhysicalDevice) -> bool {
        let available = match self.api.device_extensions(device) {
            Ok(available) => available,
            Err(result) => {
                log::warn!("Skipping device {:?}: extension query failed: {:?}", device, result);
                return false;
            }
        };

        required_device_extensions()
            .iter()
            .all(|required| available.iter().any(|name| name.as_c_str() == *required))
    }

    /// Resolve graphics and transfer families in a single scan
    ///
    /// The first family with graphics and present support becomes the graphics
    /// family; the first family with transfer support becomes the transfer
    /// family, whether or not it also matched graphics. Without a transfer
    /// family the graphics family is reused. Returns `None` when no family can
    /// both draw and present.
    pub fn resolve_queue_families(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> Option<QueueFamilyIndices> {
        let families = self.api.queue_families(device);

        let mut graphics = None;
        let mut transfer = None;

        for (index, family) in families.iter().enumerate() {
            let index = index as u32;

            if graphics.is_none()
                && family.queue_flags.contains(vk::QueueFlags::GRAPHICS)
                && self.supports_present(device, index, surface)
            {
                graphics = Some(index);
            }

            if transfer.is_none() && family.queue_flags.contains(vk::QueueFlags::TRANSFER) {
                transfer = Some(index);
            }
        }

        let graphics = graphics?;
        Some(QueueFamilyIndices {
            graphics: Some(graphics),
            transfer: Some(transfer.unwrap_or(graphics)),
        })
    }

    fn supports_present(&self, device: vk::PhysicalDevice, index: u32, surface: vk::SurfaceKHR) -> bool {
        self.api
            .surface_support(device, index, surface)
            .unwrap_or_else(|result| {
                log::warn!("Surface support query failed for family {}: {:?}", index, result);
                false
            })
    }

    fn evaluate_device(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> Option<PhysicalDeviceCandidate> {
        if !self.has_required_extensions(device) {
            log::debug!("Device {:?} lacks required extensions", device);
            return None;
        }

        let Some(queue_families) = self.resolve_queue_families(device, surface) else {
            log::debug!("Device {:?} has no graphics+present queue family", device);
            return None;
        };

        let properties = self.api.device_properties(device);
        let preference = DevicePreference::of(properties.device_type);
        log::debug!(
            "Candidate {} ({:?}): graphics family {:?}, transfer family {:?}",
            properties.name,
            properties.device_type,
            queue_families.graphics,
            queue_families.transfer
        );

        Some(PhysicalDeviceCandidate {
            device,
            properties,
            queue_families,
            preference,
        })
    }
}
