/*!
Installation schedules of Windows Update for Business configurations.
*/

use chrono::NaiveTime;

graph_enum! {
    /// Day on which scheduled updates install
    ///
    /// There is no `unknownFutureValue` member, a day added by the service
    /// reads as absent.
    pub enum WeeklySchedule {
        UserDefined = "userDefined",
        Everyday = "everyday",
        Sunday = "sunday",
        Monday = "monday",
        Tuesday = "tuesday",
        Wednesday = "wednesday",
        Thursday = "thursday",
        Friday = "friday",
        Saturday = "saturday",
        NoScheduledScan = "noScheduledScan",
    }
}

graph_flags! {
    /// Weeks of the month in which updates install
    pub struct WindowsUpdateForBusinessUpdateWeeks: u32 {
        const USER_DEFINED = 1 << 0 => "userDefined";
        const FIRST_WEEK = 1 << 1 => "firstWeek";
        const SECOND_WEEK = 1 << 2 => "secondWeek";
        const THIRD_WEEK = 1 << 3 => "thirdWeek";
        const FOURTH_WEEK = 1 << 4 => "fourthWeek";
        const EVERY_WEEK = 1 << 5 => "everyWeek";
        const UNKNOWN_FUTURE_VALUE = 1 << 6 => "unknownFutureValue";
    }
}

graph_model! {
    /// When a device may install updates
    pub struct WindowsUpdateInstallScheduleType {
        subtypes AnyWindowsUpdateInstallScheduleType {
            "#microsoft.graph.windowsUpdateActiveHoursInstall" => WindowsUpdateActiveHoursInstall,
            "#microsoft.graph.windowsUpdateScheduledInstall" => WindowsUpdateScheduledInstall,
        }
        properties {
            odata_type: String = "@odata.type",
        }
    }
}

graph_model! {
    /// Install outside of the active hours of the device
    pub struct WindowsUpdateActiveHoursInstall: WindowsUpdateInstallScheduleType {
        discriminator = "#microsoft.graph.windowsUpdateActiveHoursInstall";
        properties {
            active_hours_end: NaiveTime = "activeHoursEnd",
            active_hours_start: NaiveTime = "activeHoursStart",
        }
    }
}

graph_model! {
    /// Install on a fixed day and time
    pub struct WindowsUpdateScheduledInstall: WindowsUpdateInstallScheduleType {
        discriminator = "#microsoft.graph.windowsUpdateScheduledInstall";
        properties {
            scheduled_install_day: WeeklySchedule = "scheduledInstallDay",
            scheduled_install_time: NaiveTime = "scheduledInstallTime",
        }
    }
}

#[cfg(test)]
mod tests {
    use msgraph_rust_abstractions::{
        config::{from_json, to_json},
        enums::GraphEnum,
    };

    use super::*;

    #[test]
    fn update_weeks_in_declaration_order() {
        let weeks = WindowsUpdateForBusinessUpdateWeeks::THIRD_WEEK
            | WindowsUpdateForBusinessUpdateWeeks::FIRST_WEEK;
        assert_eq!(weeks.to_string(), "firstWeek,thirdWeek");
        assert_eq!(
            WindowsUpdateForBusinessUpdateWeeks::parse("thirdWeek,firstWeek"),
            Some(weeks)
        );
        assert_eq!(WindowsUpdateForBusinessUpdateWeeks::parse("lastWeek"), None);
    }

    #[test]
    fn scheduled_install_times() {
        let schedule: WindowsUpdateInstallScheduleType = from_json(
            r##"{"@odata.type": "#microsoft.graph.windowsUpdateInstallScheduleType"}"##,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            schedule.odata_type().unwrap().as_deref(),
            Some("#microsoft.graph.windowsUpdateInstallScheduleType")
        );

        let mut install = WindowsUpdateScheduledInstall::new();
        install
            .set_scheduled_install_day(Some(WeeklySchedule::Saturday))
            .unwrap();
        install
            .set_scheduled_install_time(NaiveTime::from_hms_opt(3, 30, 0))
            .unwrap();
        let json = to_json(&install).unwrap();
        let output: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            output,
            serde_json::json!({
                "@odata.type": "#microsoft.graph.windowsUpdateScheduledInstall",
                "scheduledInstallDay": "saturday",
                "scheduledInstallTime": "03:30:00"
            })
        );

        let parsed: WindowsUpdateScheduledInstall = from_json(&json).unwrap().unwrap();
        assert_eq!(
            parsed.scheduled_install_time().unwrap(),
            NaiveTime::from_hms_opt(3, 30, 0)
        );
    }
}
