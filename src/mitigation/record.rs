//! Device identity patterns and the mitigation rules built on top of them

use super::PatchDate;
use serde::{Deserialize, Serialize};

/// Identity pattern for a device
///
/// Any field may be empty, which makes it a wildcard for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Manufacturer brand (`ro.product.brand`)
    pub brand: String,
    /// Device codename (`ro.product.device`)
    pub device: String,
    /// Chipset model (`ro.soc.model`), matched as a substring
    pub soc: String,
}

impl DeviceRecord {
    /// Create a new pattern
    pub fn new(brand: impl Into<String>, device: impl Into<String>, soc: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            device: device.into(),
            soc: soc.into(),
        }
    }

    /// Check a device identity against this pattern
    ///
    /// When both sides carry a device codename the codename decides and the
    /// chipset is not looked at. Otherwise the chipset pattern must be
    /// contained in the reported chipset, since some builds report
    /// `QTI SM8650` where others report `SM8650`. An empty brand in the
    /// pattern matches any brand.
    pub fn matches(&self, brand: &str, device: &str, soc: &str) -> bool {
        if !device.is_empty() && !self.device.is_empty() {
            if self.brand.is_empty() {
                return device == self.device;
            }
            return brand == self.brand && device == self.device;
        }

        if self.brand.is_empty() {
            return soc.contains(self.soc.as_str());
        }
        brand == self.brand && soc.contains(self.soc.as_str())
    }
}

/// Outcome of checking a matched device against a rule's fix thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// Device is known to hit the driver problem
    Affected,
    /// Device has a fixed platform or patch level
    Unaffected,
}

/// A single entry of the mitigation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitigationRule {
    /// Identity the rule applies to
    pub record: DeviceRecord,
    /// Highest API level that can be fixed by a security patch
    pub affected_api_max: i32,
    /// First API level that ships with the fix
    pub fixed_api_min: i32,
    /// Security patch carrying the fix for affected API levels
    pub fixed_patch_date: PatchDate,
    /// Security patch from which Vulkan is still recommended on affected devices
    pub vulkan_patch_date: PatchDate,
}

impl MitigationRule {
    /// Create a new rule
    pub fn new(
        record: DeviceRecord,
        affected_api_max: i32,
        fixed_api_min: i32,
        fixed_patch_date: PatchDate,
        vulkan_patch_date: PatchDate,
    ) -> Self {
        Self {
            record,
            affected_api_max,
            fixed_api_min,
            fixed_patch_date,
            vulkan_patch_date,
        }
    }

    /// Identity match, see [`DeviceRecord::matches`]
    pub fn matches(&self, brand: &str, device: &str, soc: &str) -> bool {
        self.record.matches(brand, device, soc)
    }

    /// Decide whether a matched device is still affected
    ///
    /// API levels above `affected_api_max` but below `fixed_api_min` are never
    /// patch checked and stay affected.
    pub fn is_device_affected(&self, api_level: i32, patch: &PatchDate) -> DeviceStatus {
        if api_level >= self.fixed_api_min {
            return DeviceStatus::Unaffected;
        }
        if api_level <= self.affected_api_max && patch.is_equal_or_later_than(&self.fixed_patch_date) {
            return DeviceStatus::Unaffected;
        }
        DeviceStatus::Affected
    }

    /// Whether Vulkan can still be recommended on an affected device
    pub fn recommend_affected_vulkan(&self, patch: &PatchDate) -> bool {
        patch.is_equal_or_later_than(&self.vulkan_patch_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BRAND: &str = "f0nebrand";
    const DEVICE: &str = "f0nedevice";
    const SOC: &str = "f0neSoC";

    fn unfixed() -> PatchDate {
        PatchDate::parse("2099-12-31")
    }

    fn vulkan_date() -> PatchDate {
        PatchDate::parse("2024-06-01")
    }

    fn full_rule(fixed_api_min: i32, fixed_patch: PatchDate) -> MitigationRule {
        MitigationRule::new(DeviceRecord::new(BRAND, DEVICE, SOC), 34, fixed_api_min, fixed_patch, vulkan_date())
    }

    #[rstest]
    #[case(DEVICE, SOC)]
    #[case(DEVICE, "")]
    #[case("", SOC)]
    fn test_full_pattern_matches(#[case] device: &str, #[case] soc: &str) {
        let rule = full_rule(99, unfixed());
        assert!(rule.matches(BRAND, device, soc));
    }

    #[test]
    fn test_soc_substring_match() {
        let record = DeviceRecord::new("samsung", "", "SM8650");
        assert!(record.matches("samsung", "", "QTI SM8650"));
        assert!(record.matches("samsung", "", "SM8650"));
        assert!(!record.matches("other", "", "SM8650"));
        assert!(!record.matches("samsung", "", "SM8550"));
    }

    #[test]
    fn test_soc_pattern_used_when_query_has_device() {
        // Pattern has no device, so the chipset branch applies
        let record = DeviceRecord::new("samsung", "", "SM8650");
        assert!(record.matches("samsung", "e3q", "SM8650"));
        assert!(!record.matches("samsung", "e3q", ""));
    }

    #[test]
    fn test_device_wildcard_brand() {
        let record = DeviceRecord::new("", "e3q", "");
        assert!(record.matches("samsung", "e3q", ""));
        assert!(record.matches("anything", "e3q", "SM0000"));
        assert!(!record.matches("samsung", "b0q", ""));
    }

    #[test]
    fn test_device_branch_ignores_soc() {
        let record = DeviceRecord::new("samsung", "a23xq", "SM6225");
        assert!(record.matches("samsung", "a23xq", "unrelated"));
        assert!(!record.matches("google", "a23xq", "SM6225"));
    }

    #[test]
    fn test_empty_soc_pattern_matches_everything() {
        let record = DeviceRecord::new("", "", "");
        assert!(record.matches("x", "", "whatever"));
        assert!(record.matches("", "", ""));

        // Device-only pattern falls through to an empty soc when the query has no device
        let record = DeviceRecord::new("samsung", "a23xq", "");
        assert!(record.matches("samsung", "", "SM8650"));
    }

    #[test]
    fn test_affected_with_vulkan() {
        let rule = full_rule(99, unfixed());
        let patch = PatchDate::parse("2024-07-01");
        assert!(rule.recommend_affected_vulkan(&patch));
        assert_eq!(rule.is_device_affected(34, &patch), DeviceStatus::Affected);
    }

    #[test]
    fn test_affected_with_gles() {
        let rule = full_rule(99, unfixed());
        let patch = PatchDate::parse("2024-03-01");
        assert!(!rule.recommend_affected_vulkan(&patch));
        assert_eq!(rule.is_device_affected(34, &patch), DeviceStatus::Affected);
    }

    #[test]
    fn test_unaffected_by_api_level() {
        let rule = full_rule(35, unfixed());
        let patch = PatchDate::parse("2024-09-01");
        assert_eq!(rule.is_device_affected(36, &patch), DeviceStatus::Unaffected);
        assert_eq!(rule.is_device_affected(35, &PatchDate::ZERO), DeviceStatus::Unaffected);
    }

    #[test]
    fn test_unaffected_by_patch_date() {
        let rule = full_rule(35, PatchDate::parse("2024-07-01"));
        assert_eq!(
            rule.is_device_affected(34, &PatchDate::parse("2024-09-01")),
            DeviceStatus::Unaffected
        );
        assert_eq!(
            rule.is_device_affected(34, &PatchDate::parse("2024-07-01")),
            DeviceStatus::Unaffected
        );
        assert_eq!(
            rule.is_device_affected(34, &PatchDate::parse("2024-06-30")),
            DeviceStatus::Affected
        );
    }

    #[test]
    fn test_api_gap_is_never_patch_checked() {
        let rule = MitigationRule::new(
            DeviceRecord::new(BRAND, DEVICE, SOC),
            32,
            35,
            PatchDate::parse("2024-01-01"),
            vulkan_date(),
        );
        let patched = PatchDate::parse("2025-01-01");
        assert_eq!(rule.is_device_affected(32, &patched), DeviceStatus::Unaffected);
        assert_eq!(rule.is_device_affected(33, &patched), DeviceStatus::Affected);
        assert_eq!(rule.is_device_affected(34, &patched), DeviceStatus::Affected);
    }

    #[test]
    fn test_unreachable_vulkan_date() {
        let rule = MitigationRule::new(DeviceRecord::new(BRAND, DEVICE, ""), 34, 99, unfixed(), unfixed());
        assert!(!rule.recommend_affected_vulkan(&PatchDate::parse("2024-07-01")));
    }
}
