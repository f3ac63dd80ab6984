//! # vkquality - Startup mitigation for Vulkan quality recommendations
//!
//! Some device/driver combinations crash or misbehave when the Vulkan driver
//! is queried during startup. This library checks the running device against
//! a small table of known affected brands, device codenames and chipsets
//! before the quality engine is allowed to touch the driver, and hands out a
//! fixed recommendation for affected devices instead.
//!
//! ## Features
//!
//! - **Rule table** of (brand, device, chipset) patterns with API level and
//!   security patch thresholds
//! - **First-match lookup** with wildcard and chipset substring matching
//! - **Data driven**: the embedded table can be replaced by a JSON rule file
//! - **Engine seam**: the quality engine is a trait, only started when the
//!   device is unaffected
//! - **Android properties** as the identity source on device
//!
//! ## Quick Start
//!
//! ```rust
//! use vkquality::{evaluate, DeviceSnapshot, PatchDate, StartupDecision, StartupFlags};
//!
//! let snapshot = DeviceSnapshot::new(34, "samsung", "", "SM8650", PatchDate::parse("2024-07-01"));
//! let evaluation = evaluate(&snapshot, StartupFlags::NONE);
//! assert!(evaluation.verdict.affected);
//! assert!(matches!(evaluation.decision, StartupDecision::Mitigated(_)));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod codes;
pub mod device;
pub mod error;
pub mod mitigation;
pub mod rules;

// Re-export main API for easy access
pub use api::{
    evaluate, evaluate_with, AssetSource, Evaluation, MitigationState, QualityEngine, StartupDecision, VkQuality,
    DEFAULT_QUALITY_FILE,
};
pub use codes::{Recommendation, ResultCode, StartupFlags};
pub use device::{DeviceIdentitySource, DeviceSnapshot, StaticIdentity};
pub use error::{Result, VkQualityError};
pub use mitigation::{DeviceRecord, DeviceStatus, MitigationDatabase, MitigationRule, MitigationVerdict, PatchDate};
pub use rules::{standard_rules, RuleSpec};

#[cfg(all(feature = "android", target_os = "android"))]
pub use device::AndroidProperties;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
///
/// # Example
///
/// ```
/// println!("Using vkquality v{}", vkquality::version());
/// ```
pub fn version() -> &'static str {
    VERSION
}

/// Check a device against the embedded table without creating an engine
///
/// Returns `true` if the device would be mitigated.
///
/// # Example
///
/// ```
/// use vkquality::{DeviceSnapshot, PatchDate};
///
/// let snapshot = DeviceSnapshot::new(34, "google", "husky", "Tensor G3", PatchDate::parse("2024-07-01"));
/// assert!(!vkquality::is_mitigated(&snapshot));
/// ```
pub fn is_mitigated(snapshot: &DeviceSnapshot) -> bool {
    MitigationDatabase::standard().lookup(snapshot).affected
}


/// Prelude module for convenient imports
///
/// # Example
///
/// ```
/// use vkquality::prelude::*;
///
/// let db = MitigationDatabase::standard();
/// assert!(!db.is_empty());
/// ```
pub mod prelude {
    pub use crate::api::{evaluate, QualityEngine, StartupDecision, VkQuality};
    pub use crate::codes::{Recommendation, ResultCode, StartupFlags};
    pub use crate::device::{DeviceIdentitySource, DeviceSnapshot};
    pub use crate::mitigation::{MitigationDatabase, PatchDate};
    pub use crate::{is_mitigated, version};
}
