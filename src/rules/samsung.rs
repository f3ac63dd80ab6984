//! Embedded mitigation table
//!
//! Chipset entries only work on API 31+ where `ro.soc.model` exists, so known
//! affected models are also listed by device codename.

use super::{RuleSpec, UNREACHABLE_API_LEVEL, UNREACHABLE_PATCH_DATE};

const BRAND: &str = "samsung";
const AFFECTED_API_MAX: i32 = 34;
const VULKAN_PATCH_DATE: &str = "2024-06-01";

/// Chipsets that may still get Vulkan once patched past [`VULKAN_PATCH_DATE`]
const VULKAN_SOCS: &[&str] = &["SM8650", "SM8550", "SM8475", "SM8450"];

/// Chipsets that never get Vulkan
const GLES_SOCS: &[&str] = &["SM6375"];

/// Device codenames that may still get Vulkan once patched
const VULKAN_DEVICES: &[&str] = &[
    "e3q", "b0q", "dm3q", "r0q", "e2q", "g0q", "dm1q", "q4q", "e1q", "dm2q", "q5q", "r11q", "b4q", "b5q",
    "gts8wifi", "SC-51C", "gts8p",
];

/// Device codenames that never get Vulkan
const GLES_DEVICES: &[&str] = &["a23xq", "gta9pwifi"];

/// The embedded rule table, in evaluation order
pub fn standard_rules() -> Vec<RuleSpec> {
    let mut rules = Vec::new();

    for soc in VULKAN_SOCS {
        rules.push(soc_rule(soc, VULKAN_PATCH_DATE));
    }
    for soc in GLES_SOCS {
        rules.push(soc_rule(soc, UNREACHABLE_PATCH_DATE));
    }
    for device in VULKAN_DEVICES {
        rules.push(device_rule(device, VULKAN_PATCH_DATE));
    }
    for device in GLES_DEVICES {
        rules.push(device_rule(device, UNREACHABLE_PATCH_DATE));
    }

    rules
}

fn soc_rule(soc: &str, vulkan_patch_date: &str) -> RuleSpec {
    RuleSpec::soc(
        BRAND,
        soc,
        AFFECTED_API_MAX,
        UNREACHABLE_API_LEVEL,
        UNREACHABLE_PATCH_DATE,
        vulkan_patch_date,
    )
}

fn device_rule(device: &str, vulkan_patch_date: &str) -> RuleSpec {
    RuleSpec::device(
        BRAND,
        device,
        AFFECTED_API_MAX,
        UNREACHABLE_API_LEVEL,
        UNREACHABLE_PATCH_DATE,
        vulkan_patch_date,
    )
}
