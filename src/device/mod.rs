//! Device identity snapshots and where they come from

#[cfg(all(feature = "android", target_os = "android"))]
mod android;

#[cfg(all(feature = "android", target_os = "android"))]
pub use android::AndroidProperties;

use crate::error::Result;
use crate::mitigation::PatchDate;
use serde::{Deserialize, Serialize};

/// First API level exposing `ro.soc.model` (Android 12)
pub const MIN_SOC_API_LEVEL: i32 = 31;

/// First API level exposing the security patch (Android 6)
pub const MIN_SECURITY_PATCH_API_LEVEL: i32 = 23;

/// Patch date assumed when the platform can't report one
pub const FALLBACK_SECURITY_PATCH: &str = "2021-01-01";

/// Value the platform reports for an unset build property
pub const UNKNOWN_PROPERTY: &str = "unknown";

/// Identity of the running device, captured once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Platform API level
    pub api_level: i32,
    /// Manufacturer brand
    pub brand: String,
    /// Device codename
    pub device: String,
    /// Chipset model, empty when unavailable
    pub soc: String,
    /// Security patch level
    pub security_patch: PatchDate,
}

impl DeviceSnapshot {
    /// Create a snapshot from already normalized values
    pub fn new(
        api_level: i32,
        brand: impl Into<String>,
        device: impl Into<String>,
        soc: impl Into<String>,
        security_patch: PatchDate,
    ) -> Self {
        Self {
            api_level,
            brand: brand.into(),
            device: device.into(),
            soc: soc.into(),
            security_patch,
        }
    }

    /// Create a snapshot from raw platform values
    ///
    /// The chipset is dropped below [`MIN_SOC_API_LEVEL`] and the patch level
    /// falls back to [`FALLBACK_SECURITY_PATCH`] below
    /// [`MIN_SECURITY_PATCH_API_LEVEL`] or when missing.
    pub fn from_raw(
        api_level: i32,
        brand: &str,
        device: &str,
        soc: Option<&str>,
        security_patch: Option<&str>,
    ) -> Self {
        let soc = if api_level >= MIN_SOC_API_LEVEL {
            soc.unwrap_or_default()
        } else {
            ""
        };

        let security_patch = match security_patch {
            Some(patch) if api_level >= MIN_SECURITY_PATCH_API_LEVEL => PatchDate::parse(patch),
            _ => PatchDate::parse(FALLBACK_SECURITY_PATCH),
        };

        Self::new(api_level, brand, device, soc, security_patch)
    }

    /// Create a snapshot from build properties that may be unset
    ///
    /// Missing or empty brand, device and (from [`MIN_SOC_API_LEVEL`]) chipset
    /// read as [`UNKNOWN_PROPERTY`], the way the platform's `Build` fields do.
    pub fn from_build_properties(
        api_level: i32,
        brand: Option<&str>,
        device: Option<&str>,
        soc: Option<&str>,
        security_patch: Option<&str>,
    ) -> Self {
        let or_unknown = |value: Option<&str>| match value {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => UNKNOWN_PROPERTY.to_string(),
        };

        let brand = or_unknown(brand);
        let device = or_unknown(device);
        let soc = or_unknown(soc);

        Self::from_raw(api_level, &brand, &device, Some(soc.as_str()), security_patch)
    }
}

/// Source of the running device's identity
pub trait DeviceIdentitySource {
    /// Capture the identity of the device
    fn snapshot(&self) -> Result<DeviceSnapshot>;
}

/// Identity source returning a fixed snapshot
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    snapshot: DeviceSnapshot,
}

impl StaticIdentity {
    /// Wrap a snapshot
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        Self { snapshot }
    }
}

impl DeviceIdentitySource for StaticIdentity {
    fn snapshot(&self) -> Result<DeviceSnapshot> {
        Ok(self.snapshot.clone())
    }
}

impl<T: DeviceIdentitySource + ?Sized> DeviceIdentitySource for &T {
    fn snapshot(&self) -> Result<DeviceSnapshot> {
        (**self).snapshot()
    }
}
