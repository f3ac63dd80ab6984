//! Mitigation rule tables
//!
//! Rules are plain data. The embedded table lives in [`standard_rules`] and the
//! same literal format can be loaded from JSON to replace it.

mod samsung;

pub use samsung::standard_rules;

use crate::error::{Result, VkQualityError};
use crate::mitigation::{DeviceRecord, MitigationRule, PatchDate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Patch date that no device will reach, used for "never fixed"
pub const UNREACHABLE_PATCH_DATE: &str = "2099-12-31";

/// API level that no device will reach, used for "never fixed"
pub const UNREACHABLE_API_LEVEL: i32 = 99;

/// Declarative form of a [`MitigationRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Brand pattern, empty for any brand
    #[serde(default)]
    pub brand: String,
    /// Device codename pattern, empty to match on chipset
    #[serde(default)]
    pub device: String,
    /// Chipset substring pattern
    #[serde(default)]
    pub soc: String,
    /// Highest API level that can be fixed by a security patch
    pub affected_api_max: i32,
    /// First API level that ships with the fix
    pub fixed_api_min: i32,
    /// Fixing security patch, `YYYY-MM-DD`
    pub fixed_patch_date: String,
    /// Security patch from which Vulkan is still recommended, `YYYY-MM-DD`
    pub vulkan_patch_date: String,
}

impl RuleSpec {
    /// Chipset rule
    pub fn soc(
        brand: &str,
        soc: &str,
        affected_api_max: i32,
        fixed_api_min: i32,
        fixed_patch_date: &str,
        vulkan_patch_date: &str,
    ) -> Self {
        Self {
            brand: brand.to_string(),
            device: String::new(),
            soc: soc.to_string(),
            affected_api_max,
            fixed_api_min,
            fixed_patch_date: fixed_patch_date.to_string(),
            vulkan_patch_date: vulkan_patch_date.to_string(),
        }
    }

    /// Device codename rule
    pub fn device(
        brand: &str,
        device: &str,
        affected_api_max: i32,
        fixed_api_min: i32,
        fixed_patch_date: &str,
        vulkan_patch_date: &str,
    ) -> Self {
        Self {
            brand: brand.to_string(),
            device: device.to_string(),
            soc: String::new(),
            affected_api_max,
            fixed_api_min,
            fixed_patch_date: fixed_patch_date.to_string(),
            vulkan_patch_date: vulkan_patch_date.to_string(),
        }
    }

    /// Turn the literal into an evaluable rule
    ///
    /// Malformed dates become [`PatchDate::ZERO`], like any other patch date.
    pub fn to_rule(&self) -> MitigationRule {
        MitigationRule::new(
            DeviceRecord::new(self.brand.as_str(), self.device.as_str(), self.soc.as_str()),
            self.affected_api_max,
            self.fixed_api_min,
            PatchDate::parse(&self.fixed_patch_date),
            PatchDate::parse(&self.vulkan_patch_date),
        )
    }
}

/// Parse a JSON array of rule literals
pub fn parse_rules(json: &str) -> Result<Vec<RuleSpec>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(VkQualityError::RuleTable("expected a JSON array of rules".to_string()));
    }

    let specs: Vec<RuleSpec> = serde_json::from_value(value)?;
    for spec in &specs {
        for date in [&spec.fixed_patch_date, &spec.vulkan_patch_date] {
            if PatchDate::parse(date).is_zero() {
                warn!("rule {}/{}/{} has unparsable date {:?}", spec.brand, spec.device, spec.soc, date);
            }
        }
    }
    Ok(specs)
}

/// Load a JSON rule file
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<Vec<RuleSpec>> {
    let json = fs::read_to_string(path)?;
    parse_rules(&json)
}
