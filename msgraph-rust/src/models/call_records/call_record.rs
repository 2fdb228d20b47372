use chrono::{DateTime, FixedOffset};

use crate::models::{Entity, Entityable};

graph_enum! {
    pub enum CallType {
        Unknown = "unknown",
        GroupCall = "groupCall",
        PeerToPeer = "peerToPeer",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    /// Media used in a call
    pub enum Modality {
        Audio = "audio",
        Video = "video",
        VideoBasedScreenSharing = "videoBasedScreenSharing",
        Data = "data",
        ScreenSharing = "screenSharing",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_model! {
    /// A single peer-to-peer call or a group call between participants
    pub struct CallRecord: Entity {
        discriminator = "#microsoft.graph.callRecords.callRecord";
        properties {
            /// UTC time when the last participant left
            end_date_time: DateTime<FixedOffset> = "endDateTime",
            /// Meeting URL, for online meetings only
            join_web_url: String = "joinWebUrl",
            last_modified_date_time: DateTime<FixedOffset> = "lastModifiedDateTime",
            /// Every modality used by any participant
            modalities: Vec<Modality> = "modalities",
            start_date_time: DateTime<FixedOffset> = "startDateTime",
            call_type: CallType = "type",
            /// Incremented whenever the record changes
            version: i64 = "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use msgraph_rust_abstractions::config::{from_json, to_json};

    use super::*;

    #[test]
    fn modalities_drop_unknown_members() {
        let record: CallRecord = from_json(
            r#"{
                "id": "e523d2ed-2966-4b6b-925b-754a88034cc5",
                "version": 1,
                "type": "groupCall",
                "modalities": ["audio", "holographic", "screenSharing"],
                "startDateTime": "2020-02-25T18:52:21.216Z"
            }"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.call_type().unwrap(), Some(CallType::GroupCall));
        assert_eq!(
            record.modalities().unwrap(),
            Some(vec![Modality::Audio, Modality::ScreenSharing])
        );
        assert_eq!(record.version().unwrap(), Some(1));

        let output: serde_json::Value = serde_json::from_str(&to_json(&record).unwrap()).unwrap();
        assert_eq!(output["type"], "groupCall");
        assert_eq!(output["modalities"], serde_json::json!(["audio", "screenSharing"]));
        assert_eq!(output["startDateTime"], "2020-02-25T18:52:21.216Z");
    }
}
