//! High-level API: startup mitigation in front of the quality engine

use crate::codes::{Recommendation, ResultCode, StartupFlags};
use crate::device::{DeviceIdentitySource, DeviceSnapshot};
use crate::mitigation::{MitigationDatabase, MitigationVerdict, DIAGNOSTIC_NOT_RUN};
use crate::rules::{standard_rules, RuleSpec};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality data file used when the caller passes an empty name
pub const DEFAULT_QUALITY_FILE: &str = "vkqualitydata.vkq";

const DIAGNOSTIC_SKIPPED: &str = "Startup mitigation: skipped by flag";

/// Where the quality engine looks for its data file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSource {
    /// Bundled asset directory, searched after `storage_path`
    pub asset_dir: Option<PathBuf>,
    /// Writable app storage directory, also used for the engine's cache
    pub storage_path: PathBuf,
}

impl AssetSource {
    /// Create an asset source
    pub fn new(asset_dir: Option<PathBuf>, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir,
            storage_path: storage_path.into(),
        }
    }
}

/// The native quality prediction engine
///
/// Querying it touches the Vulkan driver, which is exactly what startup
/// mitigation avoids on affected devices.
#[cfg_attr(test, mockall::automock)]
pub trait QualityEngine {
    /// Initialize the engine and compute a recommendation
    fn start(&mut self, assets: &AssetSource, data_filename: &str) -> ResultCode;

    /// Release engine resources
    fn stop(&mut self);

    /// Current recommendation
    fn query(&self) -> Recommendation;
}

/// What the caller should do after the mitigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartupDecision {
    /// Device is affected, use this recommendation and leave the driver alone
    Mitigated(Recommendation),
    /// Device is unaffected (or the check was skipped), start the engine
    RunEngine,
}

/// Mitigation verdict together with the resulting decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Lookup result
    pub verdict: MitigationVerdict,
    /// Resulting decision
    pub decision: StartupDecision,
}

impl Evaluation {
    fn skipped() -> Self {
        Self {
            verdict: MitigationVerdict {
                affected: false,
                recommend_vulkan: false,
                diagnostic: DIAGNOSTIC_SKIPPED.to_string(),
            },
            decision: StartupDecision::RunEngine,
        }
    }
}

/// Evaluate a device against the embedded rule table
pub fn evaluate(snapshot: &DeviceSnapshot, flags: StartupFlags) -> Evaluation {
    evaluate_with(&MitigationDatabase::standard(), snapshot, flags)
}

/// Evaluate a device against a given rule table
pub fn evaluate_with(database: &MitigationDatabase, snapshot: &DeviceSnapshot, flags: StartupFlags) -> Evaluation {
    if flags.contains(StartupFlags::SKIP_STARTUP_MITIGATION) {
        return Evaluation::skipped();
    }

    let verdict = database.lookup(snapshot);
    let decision = if verdict.affected {
        let gles_only = flags.contains(StartupFlags::GLES_ONLY_ON_MITIGATED_DEVICES);
        if verdict.recommend_vulkan && !gles_only {
            StartupDecision::Mitigated(Recommendation::VulkanBecauseStartupMitigation)
        } else {
            StartupDecision::Mitigated(Recommendation::GlesBecauseStartupMitigation)
        }
    } else {
        StartupDecision::RunEngine
    };

    Evaluation { verdict, decision }
}

/// Lifecycle of a [`VkQuality`] instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MitigationState {
    /// Not started, or stopped
    NotRun,
    /// Device affected, engine not started
    MitigationActive,
    /// Device unaffected, engine started
    MitigationInactive,
}

/// Caller facing entry point
///
/// Runs the mitigation check on start and only hands control to the quality
/// engine when the device is not affected.
pub struct VkQuality<E, S> {
    engine: E,
    identity: S,
    assets: AssetSource,
    rules: Vec<RuleSpec>,
    state: MitigationState,
    mitigated: Option<Recommendation>,
    engine_started: bool,
    diagnostic: String,
}

impl<E: QualityEngine, S: DeviceIdentitySource> VkQuality<E, S> {
    /// Create an instance using the embedded rule table
    pub fn new(engine: E, identity: S, assets: AssetSource) -> Self {
        Self::with_rules(engine, identity, assets, standard_rules())
    }

    /// Create an instance using a custom rule table
    pub fn with_rules(engine: E, identity: S, assets: AssetSource, rules: Vec<RuleSpec>) -> Self {
        Self {
            engine,
            identity,
            assets,
            rules,
            state: MitigationState::NotRun,
            mitigated: None,
            engine_started: false,
            diagnostic: DIAGNOSTIC_NOT_RUN.to_string(),
        }
    }

    /// Start without flags
    pub fn start(&mut self, data_filename: &str) -> ResultCode {
        self.start_with_flags(data_filename, StartupFlags::NONE)
    }

    /// Run the mitigation check, then start the engine unless mitigated
    ///
    /// Returns [`ResultCode::ErrorInitializationFailure`] if already started.
    pub fn start_with_flags(&mut self, data_filename: &str, flags: StartupFlags) -> ResultCode {
        if self.state != MitigationState::NotRun {
            warn!("vkquality already started");
            return ResultCode::ErrorInitializationFailure;
        }

        let data_filename = if data_filename.is_empty() {
            DEFAULT_QUALITY_FILE
        } else {
            data_filename
        };

        let evaluation = if flags.contains(StartupFlags::SKIP_STARTUP_MITIGATION) {
            Evaluation::skipped()
        } else {
            let snapshot = match self.identity.snapshot() {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("failed to read device identity: {}", e);
                    return ResultCode::ErrorInitializationFailure;
                }
            };
            debug!("device snapshot: {:?}", snapshot);
            let database = MitigationDatabase::from_specs(&self.rules);
            evaluate_with(&database, &snapshot, flags)
        };

        info!("{}", evaluation.verdict.diagnostic);
        self.diagnostic = evaluation.verdict.diagnostic;

        match evaluation.decision {
            StartupDecision::Mitigated(recommendation) => {
                self.mitigated = Some(recommendation);
                self.state = MitigationState::MitigationActive;
                ResultCode::Success
            }
            StartupDecision::RunEngine => self.start_engine(data_filename),
        }
    }

    fn start_engine(&mut self, data_filename: &str) -> ResultCode {
        debug!("starting quality engine with {}", data_filename);
        let result = self.engine.start(&self.assets, data_filename);
        if result.is_success() {
            self.engine_started = true;
            self.state = MitigationState::MitigationInactive;
        } else {
            warn!("quality engine failed to start: {}", result);
        }
        result
    }

    /// Stop the engine if it was started and reset to [`MitigationState::NotRun`]
    pub fn stop(&mut self) {
        if self.engine_started {
            debug!("stopping quality engine");
            self.engine.stop();
            self.engine_started = false;
        }
        self.mitigated = None;
        self.state = MitigationState::NotRun;
    }

    /// Current recommendation
    pub fn get_recommendation(&self) -> Recommendation {
        match self.state {
            MitigationState::NotRun => Recommendation::ErrorNotInitialized,
            MitigationState::MitigationActive => self.mitigated.unwrap_or(Recommendation::ErrorNotInitialized),
            MitigationState::MitigationInactive => self.engine.query(),
        }
    }

    /// Whether the last start was mitigated
    pub fn mitigation_active(&self) -> bool {
        self.state == MitigationState::MitigationActive
    }

    /// Lifecycle state
    pub fn state(&self) -> MitigationState {
        self.state
    }

    /// Diagnostic of the last mitigation check
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    /// Underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }
}
