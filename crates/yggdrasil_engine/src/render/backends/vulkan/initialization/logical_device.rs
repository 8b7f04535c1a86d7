//! Logical device creation and queue retrieval

use ash::vk;

use super::api::{DeviceRequest, GraphicsApi, QueueRequest};
use super::device_selector::{required_device_extensions, QueueFamilyIndices};
use super::error::{VulkanError, VulkanResult};

/// Priority given to every requested queue
pub const QUEUE_PRIORITY: f32 = 1.0;

/// A created logical device and the queues taken from it
///
/// The queues are views into `device` and die with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalDevice {
    /// Logical device handle
    pub device: vk::Device,
    /// Queue 0 of the graphics family
    pub graphics_queue: vk::Queue,
    /// Queue 0 of the transfer family; equals `graphics_queue` when the families coincide
    pub transfer_queue: vk::Queue,
}

/// Builds the logical device for a selected physical device
pub struct LogicalDeviceFactory;

impl LogicalDeviceFactory {
    /// The request handed to `vkCreateDevice`
    ///
    /// One queue from the graphics family, plus one from the transfer family
    /// only when it is a different family.
    pub fn request(graphics_family: u32, transfer_family: u32) -> DeviceRequest {
        let mut queues = vec![QueueRequest {
            family_index: graphics_family,
            priorities: vec![QUEUE_PRIORITY],
        }];

        if transfer_family != graphics_family {
            queues.push(QueueRequest {
                family_index: transfer_family,
                priorities: vec![QUEUE_PRIORITY],
            });
        }

        DeviceRequest {
            queues,
            extensions: required_device_extensions(),
        }
    }

    /// Create the logical device and fetch its queues
    pub fn create<A: GraphicsApi + ?Sized>(
        api: &mut A,
        physical_device: vk::PhysicalDevice,
        families: QueueFamilyIndices,
    ) -> VulkanResult<LogicalDevice> {
        assert!(physical_device != vk::PhysicalDevice::null(), "Physical device is null");

        let Some(graphics_family) = families.graphics else {
            return Err(VulkanError::NoQualifyingDevice(
                "no graphics queue family resolved".to_string(),
            ));
        };
        let transfer_family = families.transfer.unwrap_or(graphics_family);

        let request = Self::request(graphics_family, transfer_family);
        log::debug!(
            "Creating logical device with {} queue famil{}",
            request.queues.len(),
            if request.queues.len() == 1 { "y" } else { "ies" }
        );

        let device = api.create_device(physical_device, &request).map_err(|result| {
            log::error!("Failed to create Vulkan logical device: {:?}", result);
            VulkanError::LogicalDeviceCreationFailed(result)
        })?;

        let graphics_queue = api.device_queue(device, graphics_family, 0);
        let transfer_queue = if transfer_family == graphics_family {
            graphics_queue
        } else {
            api.device_queue(device, transfer_family, 0)
        };

        log::info!(
            "Logical device created (graphics family {}, transfer family {})",
            graphics_family,
            transfer_family
        );

        Ok(LogicalDevice {
            device,
            graphics_queue,
            transfer_queue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::vulkan::initialization::mock::{physical_device, Call, MockApi, MockDevice};
    use ash::vk::PhysicalDeviceType;

    fn families(graphics: u32, transfer: u32) -> QueueFamilyIndices {
        QueueFamilyIndices {
            graphics: Some(graphics),
            transfer: Some(transfer),
        }
    }

    fn api_with_device() -> MockApi {
        let mut api = MockApi::new();
        api.devices.push(MockDevice::new("Gpu", PhysicalDeviceType::DISCRETE_GPU));
        api
    }

    #[test]
    fn test_shared_family_requests_one_queue_family() {
        let mut api = api_with_device();
        let logical = LogicalDeviceFactory::create(&mut api, physical_device(0), families(0, 0)).unwrap();

        let requests = api.device_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].queues.len(), 1);
        assert_eq!(requests[0].queues[0].family_index, 0);
        assert_eq!(requests[0].queues[0].priorities, vec![1.0]);
        assert_eq!(logical.graphics_queue, logical.transfer_queue);
    }

    #[test]
    fn test_distinct_families_request_two_queue_families() {
        let mut api = api_with_device();
        let logical = LogicalDeviceFactory::create(&mut api, physical_device(0), families(0, 2)).unwrap();

        let request = &api.device_requests()[0];
        let indices: Vec<u32> = request.queues.iter().map(|q| q.family_index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_ne!(logical.graphics_queue, logical.transfer_queue);
        assert_ne!(logical.graphics_queue, vk::Queue::null());
    }

    #[test]
    fn test_required_extensions_enabled() {
        let mut api = api_with_device();
        LogicalDeviceFactory::create(&mut api, physical_device(0), families(0, 0)).unwrap();

        assert_eq!(api.device_requests()[0].extensions, required_device_extensions());
    }

    #[test]
    fn test_device_failure_produces_no_queues() {
        let mut api = api_with_device();
        api.fail_device = Some(vk::Result::ERROR_FEATURE_NOT_PRESENT);

        let result = LogicalDeviceFactory::create(&mut api, physical_device(0), families(0, 1));
        assert_eq!(
            result,
            Err(VulkanError::LogicalDeviceCreationFailed(vk::Result::ERROR_FEATURE_NOT_PRESENT))
        );
        assert!(!api.calls().iter().any(|call| matches!(call, Call::DeviceQueue(..))));
    }

    #[test]
    fn test_unset_transfer_uses_graphics() {
        let mut api = api_with_device();
        let partial = QueueFamilyIndices {
            graphics: Some(1),
            transfer: None,
        };
        let logical = LogicalDeviceFactory::create(&mut api, physical_device(0), partial).unwrap();

        assert_eq!(api.device_requests()[0].queues.len(), 1);
        assert_eq!(logical.graphics_queue, logical.transfer_queue);
    }

    #[test]
    fn test_unset_graphics_is_rejected() {
        let mut api = api_with_device();
        let result = LogicalDeviceFactory::create(&mut api, physical_device(0), QueueFamilyIndices::default());

        assert!(matches!(result, Err(VulkanError::NoQualifyingDevice(_))));
        assert!(api.device_requests().is_empty());
    }
}
