//! Result codes, recommendations and startup flags exposed to callers
//!
//! Raw values match the native library's enums so they can cross the binding
//! boundary unchanged.

use crate::error::VkQualityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of starting vkquality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    /// Initialization was successful
    Success,
    /// Unspecified initialization failure, or already started
    ErrorInitializationFailure,
    /// Vulkan is not available or couldn't be initialized
    ErrorNoVulkan,
    /// Quality data file is an incompatible version
    ErrorInvalidDataVersion,
    /// Quality data file is invalid
    ErrorInvalidDataFile,
    /// Quality data file was not found in assets or storage
    ErrorMissingDataFile,
}

impl ResultCode {
    /// Raw value as used by the native library
    pub fn as_raw(self) -> i32 {
        match self {
            ResultCode::Success => 0,
            ResultCode::ErrorInitializationFailure => -1,
            ResultCode::ErrorNoVulkan => -2,
            ResultCode::ErrorInvalidDataVersion => -3,
            ResultCode::ErrorInvalidDataFile => -4,
            ResultCode::ErrorMissingDataFile => -5,
        }
    }

    /// Whether this is [`ResultCode::Success`]
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl TryFrom<i32> for ResultCode {
    type Error = VkQualityError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ResultCode::Success),
            -1 => Ok(ResultCode::ErrorInitializationFailure),
            -2 => Ok(ResultCode::ErrorNoVulkan),
            -3 => Ok(ResultCode::ErrorInvalidDataVersion),
            -4 => Ok(ResultCode::ErrorInvalidDataFile),
            -5 => Ok(ResultCode::ErrorMissingDataFile),
            other => Err(VkQualityError::InvalidResultCode(other)),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::Success => write!(f, "success"),
            ResultCode::ErrorInitializationFailure => write!(f, "initialization failure"),
            ResultCode::ErrorNoVulkan => write!(f, "no Vulkan"),
            ResultCode::ErrorInvalidDataVersion => write!(f, "invalid data version"),
            ResultCode::ErrorInvalidDataFile => write!(f, "invalid data file"),
            ResultCode::ErrorMissingDataFile => write!(f, "missing data file"),
        }
    }
}

/// Graphics API recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Not ready yet, ask again later
    NotReady,
    /// Not started, or start failed
    ErrorNotInitialized,
    /// Vulkan: device found in the allow list
    VulkanBecauseDeviceMatch,
    /// Vulkan: GPU/driver found in the predicted quality allow list
    VulkanBecausePredictionMatch,
    /// Vulkan: Android version newer than the quality data covers
    VulkanBecauseFutureAndroid,
    /// GLES: Android older than 10 or Vulkan 1.0 only
    GlesBecauseOldDevice,
    /// GLES: device matched but its driver is too old
    GlesBecauseOldDriver,
    /// GLES: no match in any list
    GlesBecauseNoDeviceMatch,
    /// GLES: GPU/driver found in the predicted quality deny list
    GlesBecausePredictionMatch,
    /// Vulkan: startup mitigation active, patch level allows Vulkan
    VulkanBecauseStartupMitigation,
    /// GLES: startup mitigation active
    GlesBecauseStartupMitigation,
}

impl Recommendation {
    /// Raw value as used by the native library
    pub fn as_raw(self) -> i32 {
        match self {
            Recommendation::NotReady => -2,
            Recommendation::ErrorNotInitialized => -1,
            Recommendation::VulkanBecauseDeviceMatch => 0,
            Recommendation::VulkanBecausePredictionMatch => 1,
            Recommendation::VulkanBecauseFutureAndroid => 2,
            Recommendation::GlesBecauseOldDevice => 3,
            Recommendation::GlesBecauseOldDriver => 4,
            Recommendation::GlesBecauseNoDeviceMatch => 5,
            Recommendation::GlesBecausePredictionMatch => 6,
            Recommendation::VulkanBecauseStartupMitigation => 7,
            Recommendation::GlesBecauseStartupMitigation => 8,
        }
    }

    /// Whether this recommends Vulkan
    pub fn is_vulkan(self) -> bool {
        matches!(
            self,
            Recommendation::VulkanBecauseDeviceMatch
                | Recommendation::VulkanBecausePredictionMatch
                | Recommendation::VulkanBecauseFutureAndroid
                | Recommendation::VulkanBecauseStartupMitigation
        )
    }

    /// Whether this recommends OpenGL ES
    pub fn is_gles(self) -> bool {
        self.as_raw() >= 0 && !self.is_vulkan()
    }
}

impl TryFrom<i32> for Recommendation {
    type Error = VkQualityError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        let recommendation = match raw {
            -2 => Recommendation::NotReady,
            -1 => Recommendation::ErrorNotInitialized,
            0 => Recommendation::VulkanBecauseDeviceMatch,
            1 => Recommendation::VulkanBecausePredictionMatch,
            2 => Recommendation::VulkanBecauseFutureAndroid,
            3 => Recommendation::GlesBecauseOldDevice,
            4 => Recommendation::GlesBecauseOldDriver,
            5 => Recommendation::GlesBecauseNoDeviceMatch,
            6 => Recommendation::GlesBecausePredictionMatch,
            7 => Recommendation::VulkanBecauseStartupMitigation,
            8 => Recommendation::GlesBecauseStartupMitigation,
            other => return Err(VkQualityError::InvalidRecommendation(other)),
        };
        Ok(recommendation)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Recommendation::NotReady => "not ready",
            Recommendation::ErrorNotInitialized => "not initialized",
            Recommendation::VulkanBecauseDeviceMatch => "Vulkan (device match)",
            Recommendation::VulkanBecausePredictionMatch => "Vulkan (prediction match)",
            Recommendation::VulkanBecauseFutureAndroid => "Vulkan (future Android)",
            Recommendation::GlesBecauseOldDevice => "GLES (old device)",
            Recommendation::GlesBecauseOldDriver => "GLES (old driver)",
            Recommendation::GlesBecauseNoDeviceMatch => "GLES (no device match)",
            Recommendation::GlesBecausePredictionMatch => "GLES (prediction match)",
            Recommendation::VulkanBecauseStartupMitigation => "Vulkan (startup mitigation)",
            Recommendation::GlesBecauseStartupMitigation => "GLES (startup mitigation)",
        };
        f.write_str(text)
    }
}

bitflags::bitflags! {
    /// Bitfield of flags accepted by `start_with_flags`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StartupFlags: i32 {
        /// Skip the mitigation table and always start the quality engine
        const SKIP_STARTUP_MITIGATION = 1 << 0;
        /// Recommend GLES on mitigated devices even if their patch level allows Vulkan
        const GLES_ONLY_ON_MITIGATED_DEVICES = 1 << 1;
    }
}

impl StartupFlags {
    /// No flags
    pub const NONE: Self = Self::empty();
}
