//! Device identity from Android system properties

use super::{DeviceIdentitySource, DeviceSnapshot};
use crate::error::{Result, VkQualityError};
use std::ffi::{CStr, CString};

const PROP_SDK: &str = "ro.build.version.sdk";
const PROP_BRAND: &str = "ro.product.brand";
const PROP_DEVICE: &str = "ro.product.device";
const PROP_SOC: &str = "ro.soc.model";
const PROP_SECURITY_PATCH: &str = "ro.build.version.security_patch";

/// Reads the running device's identity through `__system_property_get`
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidProperties;

impl AndroidProperties {
    /// Create a new property reader
    pub fn new() -> Self {
        Self
    }
}

/// Read a system property, `None` if unset or empty
fn read_property(name: &str) -> Option<String> {
    let key = CString::new(name).ok()?;
    let mut buffer = [0 as libc::c_char; libc::PROP_VALUE_MAX as usize];

    let len = unsafe { libc::__system_property_get(key.as_ptr(), buffer.as_mut_ptr()) };
    if len <= 0 {
        return None;
    }

    let value = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    Some(value.to_string_lossy().into_owned())
}

fn required_property(name: &str) -> Result<String> {
    read_property(name).ok_or_else(|| VkQualityError::Property(format!("{} is not set", name)))
}

impl DeviceIdentitySource for AndroidProperties {
    fn snapshot(&self) -> Result<DeviceSnapshot> {
        let sdk = required_property(PROP_SDK)?;
        let api_level: i32 = sdk
            .trim()
            .parse()
            .map_err(|_| VkQualityError::Property(format!("{} is not a number: {:?}", PROP_SDK, sdk)))?;

        let brand = read_property(PROP_BRAND);
        let device = read_property(PROP_DEVICE);
        let soc = read_property(PROP_SOC);
        let security_patch = read_property(PROP_SECURITY_PATCH);

        Ok(DeviceSnapshot::from_build_properties(
            api_level,
            brand.as_deref(),
            device.as_deref(),
            soc.as_deref(),
            security_patch.as_deref(),
        ))
    }
}
