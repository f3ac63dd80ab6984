//! Startup mitigation matching engine
//!
//! Holds the ordered rule table and evaluates a device snapshot against it.
//! The first rule whose identity pattern matches decides the verdict.

mod patch_date;
mod record;

pub use patch_date::PatchDate;
pub use record::{DeviceRecord, DeviceStatus, MitigationRule};

use crate::device::DeviceSnapshot;
use crate::error::Result;
use crate::rules::{self, RuleSpec};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Diagnostic reported before any lookup has been made
pub const DIAGNOSTIC_NOT_RUN: &str = "StartupMitigation not yet run";

const DIAGNOSTIC_UNAFFECTED: &str = "Startup mitigation: Device found in mitigation list, unaffected";
const DIAGNOSTIC_NOT_FOUND: &str = "Startup mitigation: Device not found in mitigation list, unaffected";

/// Result of a mitigation lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitigationVerdict {
    /// Device matched a rule and is still affected
    pub affected: bool,
    /// Vulkan may be recommended even though the device is affected
    pub recommend_vulkan: bool,
    /// Human readable status, for logging only
    pub diagnostic: String,
}

impl MitigationVerdict {
    fn not_found() -> Self {
        Self {
            affected: false,
            recommend_vulkan: false,
            diagnostic: DIAGNOSTIC_NOT_FOUND.to_string(),
        }
    }
}

/// Ordered list of mitigation rules
#[derive(Debug, Clone, Default)]
pub struct MitigationDatabase {
    rules: Vec<MitigationRule>,
}

impl MitigationDatabase {
    /// Database without any rule, every device is unaffected
    pub fn empty() -> Self {
        Self::default()
    }

    /// Database built from the embedded rule table
    pub fn standard() -> Self {
        Self::from_specs(&rules::standard_rules())
    }

    /// Build a database from declarative rule literals, keeping their order
    pub fn from_specs(specs: &[RuleSpec]) -> Self {
        Self {
            rules: specs.iter().map(RuleSpec::to_rule).collect(),
        }
    }

    /// Build a database from a JSON array of rule literals
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_specs(&rules::parse_rules(json)?))
    }

    /// Build a database from a JSON rule file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_specs(&rules::load_rules(path)?))
    }

    /// Append a rule at the end of the table
    pub fn push(&mut self, rule: MitigationRule) {
        self.rules.push(rule);
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[MitigationRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching the identity, if any
    pub fn find_rule(&self, brand: &str, device: &str, soc: &str) -> Option<&MitigationRule> {
        self.rules.iter().find(|rule| rule.matches(brand, device, soc))
    }

    /// Evaluate a device against the table
    pub fn lookup(&self, snapshot: &DeviceSnapshot) -> MitigationVerdict {
        let Some(rule) = self.find_rule(&snapshot.brand, &snapshot.device, &snapshot.soc) else {
            debug!("no mitigation rule for {}/{}/{}", snapshot.brand, snapshot.device, snapshot.soc);
            return MitigationVerdict::not_found();
        };

        debug!("mitigation rule matched: {:?}", rule.record);
        let recommend_vulkan = rule.recommend_affected_vulkan(&snapshot.security_patch);

        match rule.is_device_affected(snapshot.api_level, &snapshot.security_patch) {
            DeviceStatus::Affected => MitigationVerdict {
                affected: true,
                recommend_vulkan,
                diagnostic: format!(
                    "Startup mitigation: Device found in mitigation list, affected brand: {} device: {} SoC: {} useVulkan: {}",
                    snapshot.brand, snapshot.device, snapshot.soc, recommend_vulkan
                ),
            },
            DeviceStatus::Unaffected => MitigationVerdict {
                affected: false,
                recommend_vulkan,
                diagnostic: DIAGNOSTIC_UNAFFECTED.to_string(),
            },
        }
    }
}
