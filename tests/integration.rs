#[cfg(test)]
mod integration_tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::Cell;
    use std::io::Write;
    use vkquality::prelude::*;
    use vkquality::{AssetSource, MitigationState, RuleSpec, StaticIdentity};

    /// Engine that records how it was used
    #[derive(Default)]
    struct RecordingEngine {
        starts: u32,
        stops: u32,
        queries: Cell<u32>,
    }

    impl QualityEngine for RecordingEngine {
        fn start(&mut self, _assets: &AssetSource, _data_filename: &str) -> ResultCode {
            self.starts += 1;
            ResultCode::Success
        }

        fn stop(&mut self) {
            self.stops += 1;
        }

        fn query(&self) -> Recommendation {
            self.queries.set(self.queries.get() + 1);
            Recommendation::GlesBecauseNoDeviceMatch
        }
    }

    fn snapshot(brand: &str, device: &str, soc: &str, api_level: i32, patch: &str) -> DeviceSnapshot {
        DeviceSnapshot::new(api_level, brand, device, soc, PatchDate::parse(patch))
    }

    #[test]
    fn test_library_version() {
        assert!(!vkquality::version().is_empty());
    }

    #[rstest]
    #[case::sm8650_patched("samsung", "", "SM8650", "2024-07-01", true, true)]
    #[case::sm8650_prefixed("samsung", "", "QTI SM8650", "2024-07-01", true, true)]
    #[case::sm8550_unpatched("samsung", "", "SM8550", "2024-05-01", true, false)]
    #[case::sm6375("samsung", "", "SM6375", "2024-07-01", true, false)]
    #[case::device_e3q("samsung", "e3q", "", "2024-06-01", true, true)]
    #[case::device_sc51c("samsung", "SC-51C", "", "2024-06-01", true, true)]
    #[case::device_a23xq("samsung", "a23xq", "", "2024-07-01", true, false)]
    #[case::device_gta9pwifi("samsung", "gta9pwifi", "", "2030-01-01", true, false)]
    #[case::other_brand("google", "", "SM8650", "2024-07-01", false, false)]
    #[case::unknown_samsung("samsung", "x1q", "Exynos 990", "2024-07-01", false, false)]
    fn test_standard_table(
        #[case] brand: &str,
        #[case] device: &str,
        #[case] soc: &str,
        #[case] patch: &str,
        #[case] affected: bool,
        #[case] recommend_vulkan: bool,
    ) {
        let verdict = MitigationDatabase::standard().lookup(&snapshot(brand, device, soc, 34, patch));
        assert_eq!(verdict.affected, affected);
        if affected {
            assert_eq!(verdict.recommend_vulkan, recommend_vulkan);
        }
    }

    #[test]
    fn test_empty_device_on_old_platform_matches_widely() {
        // No codename and no chipset: every chipset rule fails, but the first
        // device rule falls back to its empty chipset pattern
        let verdict = MitigationDatabase::standard().lookup(&snapshot("samsung", "", "", 30, "2021-01-01"));
        assert!(verdict.affected);
    }

    #[test]
    fn test_mitigated_device_skips_engine() {
        let identity = StaticIdentity::new(snapshot("samsung", "", "SM8650", 34, "2024-07-01"));
        let mut vkq = VkQuality::new(RecordingEngine::default(), identity, AssetSource::default());

        assert_eq!(vkq.start(""), ResultCode::Success);
        assert_eq!(vkq.state(), MitigationState::MitigationActive);
        assert_eq!(vkq.get_recommendation(), Recommendation::VulkanBecauseStartupMitigation);
        vkq.stop();

        assert_eq!(vkq.engine().starts, 0);
        assert_eq!(vkq.engine().stops, 0);
        assert_eq!(vkq.engine().queries.get(), 0);
    }

    #[test]
    fn test_gles_only_flag_on_mitigated_device() {
        let identity = StaticIdentity::new(snapshot("samsung", "e3q", "", 34, "2024-07-01"));
        let mut vkq = VkQuality::new(RecordingEngine::default(), identity, AssetSource::default());

        let result = vkq.start_with_flags("", StartupFlags::GLES_ONLY_ON_MITIGATED_DEVICES);
        assert_eq!(result, ResultCode::Success);
        assert_eq!(vkq.get_recommendation(), Recommendation::GlesBecauseStartupMitigation);
        assert_eq!(vkq.engine().starts, 0);
    }

    #[test]
    fn test_unaffected_device_runs_engine_once() {
        let identity = StaticIdentity::new(snapshot("google", "husky", "Tensor G3", 34, "2024-07-01"));
        let mut vkq = VkQuality::new(RecordingEngine::default(), identity, AssetSource::default());

        assert_eq!(vkq.start("data.vkq"), ResultCode::Success);
        assert!(!vkq.mitigation_active());
        assert_eq!(vkq.get_recommendation(), Recommendation::GlesBecauseNoDeviceMatch);
        vkq.stop();
        vkq.stop();

        assert_eq!(vkq.engine().starts, 1);
        assert_eq!(vkq.engine().stops, 1);
        assert_eq!(vkq.engine().queries.get(), 1);
    }

    #[test]
    fn test_skip_flag_starts_engine() {
        let identity = StaticIdentity::new(snapshot("samsung", "a23xq", "", 34, "2024-07-01"));
        let mut vkq = VkQuality::new(RecordingEngine::default(), identity, AssetSource::default());

        assert_eq!(vkq.start_with_flags("", StartupFlags::SKIP_STARTUP_MITIGATION), ResultCode::Success);
        assert!(!vkq.mitigation_active());
        assert_eq!(vkq.engine().starts, 1);
    }

    #[test]
    fn test_rule_table_from_json_file() {
        let rules = vec![RuleSpec::device("", "husky", 34, 35, "2024-09-01", "2024-01-01")];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&rules).unwrap().as_bytes()).unwrap();

        let db = MitigationDatabase::from_json_file(file.path()).unwrap();
        assert_eq!(db.len(), 1);

        let unpatched = db.lookup(&snapshot("google", "husky", "", 34, "2024-08-01"));
        assert!(unpatched.affected);
        assert!(unpatched.recommend_vulkan);

        let patched = db.lookup(&snapshot("google", "husky", "", 34, "2024-09-01"));
        assert!(!patched.affected);

        let fixed_platform = db.lookup(&snapshot("google", "husky", "", 35, "2020-01-01"));
        assert!(!fixed_platform.affected);
    }
}
