/*!
Microsoft Defender state reported by managed Windows devices.

None of the malware enums in this module define an `unknownFutureValue`
member, so a member added by the service after this client reads as absent.
*/

use chrono::{DateTime, FixedOffset};

use super::{Entity, Entityable};

graph_flags! {
    /// Health of a device as seen by the anti-malware engine
    pub struct WindowsDeviceHealthState: u32 {
        const CLEAN = 1 << 0 => "clean";
        const FULL_SCAN_PENDING = 1 << 1 => "fullScanPending";
        const REBOOT_PENDING = 1 << 2 => "rebootPending";
        const MANUAL_STEPS_PENDING = 1 << 3 => "manualStepsPending";
        const OFFLINE_SCAN_PENDING = 1 << 4 => "offlineScanPending";
        const CRITICAL = 1 << 5 => "critical";
    }
}

graph_flags! {
    /// Status flags of the Defender product
    pub struct WindowsDefenderProductStatus: u32 {
        const NO_STATUS = 1 << 0 => "noStatus";
        const SERVICE_NOT_RUNNING = 1 << 1 => "serviceNotRunning";
        const SERVICE_STARTED_WITHOUT_MALWARE_PROTECTION = 1 << 2 => "serviceStartedWithoutMalwareProtection";
        const PENDING_FULL_SCAN_DUE_TO_THREAT_ACTION = 1 << 3 => "pendingFullScanDueToThreatAction";
        const PENDING_REBOOT_DUE_TO_THREAT_ACTION = 1 << 4 => "pendingRebootDueToThreatAction";
        const PENDING_MANUAL_STEPS_DUE_TO_THREAT_ACTION = 1 << 5 => "pendingManualStepsDueToThreatAction";
        const AV_SIGNATURES_OUT_OF_DATE = 1 << 6 => "avSignaturesOutOfDate";
        const AS_SIGNATURES_OUT_OF_DATE = 1 << 7 => "asSignaturesOutOfDate";
        const NO_QUICK_SCAN_HAPPENED_FOR_SPECIFIED_PERIOD = 1 << 8 => "noQuickScanHappenedForSpecifiedPeriod";
        const NO_FULL_SCAN_HAPPENED_FOR_SPECIFIED_PERIOD = 1 << 9 => "noFullScanHappenedForSpecifiedPeriod";
        const SYSTEM_INITIATED_SCAN_IN_PROGRESS = 1 << 10 => "systemInitiatedScanInProgress";
        const SYSTEM_INITIATED_CLEAN_IN_PROGRESS = 1 << 11 => "systemInitiatedCleanInProgress";
        const SAMPLES_PENDING_SUBMISSION = 1 << 12 => "samplesPendingSubmission";
        const PRODUCT_RUNNING_IN_EVALUATION_MODE = 1 << 13 => "productRunningInEvaluationMode";
        const PRODUCT_RUNNING_IN_NON_GENUINE_MODE = 1 << 14 => "productRunningInNonGenuineMode";
        const PRODUCT_EXPIRED = 1 << 15 => "productExpired";
        const OFFLINE_SCAN_REQUIRED = 1 << 16 => "offlineScanRequired";
        const SERVICE_SHUTDOWN_AS_PART_OF_SYSTEM_SHUTDOWN = 1 << 17 => "serviceShutdownAsPartOfSystemShutdown";
        const THREAT_REMEDIATION_FAILED_CRITICALLY = 1 << 18 => "threatRemediationFailedCritically";
        const THREAT_REMEDIATION_FAILED_NON_CRITICALLY = 1 << 19 => "threatRemediationFailedNonCritically";
        const NO_STATUS_FLAGS_SET = 1 << 20 => "noStatusFlagsSet";
        const PLATFORM_OUT_OF_DATE = 1 << 21 => "platformOutOfDate";
        const PLATFORM_UPDATE_IN_PROGRESS = 1 << 22 => "platformUpdateInProgress";
        const PLATFORM_ABOUT_TO_BE_OUTDATED = 1 << 23 => "platformAboutToBeOutdated";
        const SIGNATURE_OR_PLATFORM_END_OF_LIFE_IS_PAST_OR_IS_IMPENDING = 1 << 24 => "signatureOrPlatformEndOfLifeIsPastOrIsImpending";
        const WINDOWS_S_MODE_SIGNATURES_IN_USE_ON_NON_WIN10_S_INSTALL = 1 << 25 => "windowsSModeSignaturesInUseOnNonWin10SInstall";
    }
}

graph_enum! {
    pub enum WindowsMalwareSeverity {
        Unknown = "unknown",
        Low = "low",
        Moderate = "moderate",
        High = "high",
        Severe = "severe",
    }
}

graph_enum! {
    pub enum WindowsMalwareCategory {
        Invalid = "invalid",
        Adware = "adware",
        Spyware = "spyware",
        PasswordStealer = "passwordStealer",
        TrojanDownloader = "trojanDownloader",
        Worm = "worm",
        Backdoor = "backdoor",
        RemoteAccessTrojan = "remoteAccessTrojan",
        Trojan = "trojan",
        EmailFlooder = "emailFlooder",
        Keylogger = "keylogger",
        Dialer = "dialer",
        MonitoringSoftware = "monitoringSoftware",
        BrowserModifier = "browserModifier",
        Cookie = "cookie",
        BrowserPlugin = "browserPlugin",
        AolExploit = "aolExploit",
        Nuker = "nuker",
        SecurityDisabler = "securityDisabler",
        JokeProgram = "jokeProgram",
        HostileActiveXControl = "hostileActiveXControl",
        SoftwareBundler = "softwareBundler",
        StealthNotifier = "stealthNotifier",
        SettingsModifier = "settingsModifier",
        ToolBar = "toolBar",
        RemoteControlSoftware = "remoteControlSoftware",
        TrojanFtp = "trojanFtp",
        PotentialUnwantedSoftware = "potentialUnwantedSoftware",
        IcqExploit = "icqExploit",
        TrojanTelnet = "trojanTelnet",
        Exploit = "exploit",
        FilesharingProgram = "filesharingProgram",
        MalwareCreationTool = "malwareCreationTool",
        /// Alternate spelling of [WindowsMalwareCategory::RemoteControlSoftware]
        /// sent by some service versions
        RemoteControlSoftwareAlternate = "remote_Control_Software",
        Tool = "tool",
        TrojanDenialOfService = "trojanDenialOfService",
        TrojanDropper = "trojanDropper",
        TrojanMassMailer = "trojanMassMailer",
        TrojanMonitoringSoftware = "trojanMonitoringSoftware",
        TrojanProxyServer = "trojanProxyServer",
        Virus = "virus",
        Known = "known",
        Unknown = "unknown",
        Spp = "spp",
        Behavior = "behavior",
        Vulnerability = "vulnerability",
        Policy = "policy",
        EnterpriseUnwantedSoftware = "enterpriseUnwantedSoftware",
        Ransom = "ransom",
        HipsRule = "hipsRule",
    }
}

graph_enum! {
    pub enum WindowsMalwareExecutionState {
        Unknown = "unknown",
        Blocked = "blocked",
        Allowed = "allowed",
        Running = "running",
        NotRunning = "notRunning",
    }
}

graph_enum! {
    pub enum WindowsMalwareState {
        Unknown = "unknown",
        Detected = "detected",
        Cleaned = "cleaned",
        Quarantined = "quarantined",
        Removed = "removed",
        Allowed = "allowed",
        Blocked = "blocked",
        CleanFailed = "cleanFailed",
        QuarantineFailed = "quarantineFailed",
        RemoveFailed = "removeFailed",
        AllowFailed = "allowFailed",
        Abandoned = "abandoned",
        BlockFailed = "blockFailed",
    }
}

graph_enum! {
    pub enum WindowsMalwareThreatState {
        Active = "active",
        ActionFailed = "actionFailed",
        ManualStepsRequired = "manualStepsRequired",
        FullScanRequired = "fullScanRequired",
        RebootRequired = "rebootRequired",
        RemediatedWithNonCriticalFailures = "remediatedWithNonCriticalFailures",
        Quarantined = "quarantined",
        Removed = "removed",
        Cleaned = "cleaned",
        Allowed = "allowed",
        NoStatusCleared = "noStatusCleared",
    }
}

graph_model! {
    /// Defender protection state of a managed device
    pub struct WindowsProtectionState: Entity {
        properties {
            anti_malware_version: String = "antiMalwareVersion",
            /// Malware detected on the device
            detected_malware_state: Vec<WindowsDeviceMalwareState> = "detectedMalwareState",
            device_state: WindowsDeviceHealthState = "deviceState",
            engine_version: String = "engineVersion",
            full_scan_overdue: bool = "fullScanOverdue",
            full_scan_required: bool = "fullScanRequired",
            is_virtual_machine: bool = "isVirtualMachine",
            last_full_scan_date_time: DateTime<FixedOffset> = "lastFullScanDateTime",
            last_full_scan_signature_version: String = "lastFullScanSignatureVersion",
            last_quick_scan_date_time: DateTime<FixedOffset> = "lastQuickScanDateTime",
            last_quick_scan_signature_version: String = "lastQuickScanSignatureVersion",
            last_reported_date_time: DateTime<FixedOffset> = "lastReportedDateTime",
            malware_protection_enabled: bool = "malwareProtectionEnabled",
            network_inspection_system_enabled: bool = "networkInspectionSystemEnabled",
            product_status: WindowsDefenderProductStatus = "productStatus",
            quick_scan_overdue: bool = "quickScanOverdue",
            real_time_protection_enabled: bool = "realTimeProtectionEnabled",
            reboot_required: bool = "rebootRequired",
            signature_update_overdue: bool = "signatureUpdateOverdue",
            signature_version: String = "signatureVersion",
            tamper_protection_enabled: bool = "tamperProtectionEnabled",
        }
    }
}

graph_model! {
    /// A malware detection on a device
    pub struct WindowsDeviceMalwareState: Entity {
        properties {
            additional_information_url: String = "additionalInformationUrl",
            category: WindowsMalwareCategory = "category",
            /// Number of times the malware was detected
            detection_count: i32 = "detectionCount",
            display_name: String = "displayName",
            execution_state: WindowsMalwareExecutionState = "executionState",
            initial_detection_date_time: DateTime<FixedOffset> = "initialDetectionDateTime",
            last_state_change_date_time: DateTime<FixedOffset> = "lastStateChangeDateTime",
            severity: WindowsMalwareSeverity = "severity",
            state: WindowsMalwareState = "state",
            threat_state: WindowsMalwareThreatState = "threatState",
        }
    }
}

#[cfg(test)]
mod tests {
    use msgraph_rust_abstractions::{config::from_json, enums::GraphEnum};

    use super::*;

    #[test]
    fn flags_from_wire() {
        let state: WindowsProtectionState = from_json(
            r#"{
                "deviceState": "rebootPending,critical",
                "productStatus": "",
                "detectedMalwareState": [
                    {"category": "remote_Control_Software", "severity": "severe", "detectionCount": 2},
                    {"category": "ransom", "threatState": "quarantined"}
                ]
            }"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            state.device_state().unwrap(),
            Some(WindowsDeviceHealthState::REBOOT_PENDING | WindowsDeviceHealthState::CRITICAL)
        );
        assert_eq!(
            state.product_status().unwrap(),
            Some(WindowsDefenderProductStatus::empty())
        );

        let malware = state.detected_malware_state().unwrap().unwrap();
        assert_eq!(
            malware[0].category().unwrap(),
            Some(WindowsMalwareCategory::RemoteControlSoftwareAlternate)
        );
        assert_eq!(malware[0].detection_count().unwrap(), Some(2));
        assert_eq!(
            malware[1].threat_state().unwrap(),
            Some(WindowsMalwareThreatState::Quarantined)
        );
    }

    #[test]
    fn unknown_flag_member_is_absent() {
        assert_eq!(WindowsDeviceHealthState::parse("clean,compromised"), None);
        let state: WindowsProtectionState =
            from_json(r#"{"deviceState": "clean,compromised", "rebootRequired": true}"#)
                .unwrap()
                .unwrap();
        assert_eq!(state.device_state().unwrap(), None);
        assert_eq!(state.reboot_required().unwrap(), Some(true));
    }

    #[test]
    fn wrong_wire_type_is_an_error() {
        assert!(from_json::<WindowsProtectionState>(r#"{"rebootRequired": "yes"}"#).is_err());
    }
}
