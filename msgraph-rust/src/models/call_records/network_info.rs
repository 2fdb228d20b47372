use msgraph_rust_abstractions::duration::IsoDuration;

graph_enum! {
    pub enum NetworkConnectionType {
        Unknown = "unknown",
        Wired = "wired",
        Wifi = "wifi",
        Mobile = "mobile",
        Tunnel = "tunnel",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum NetworkTransportProtocol {
        Unknown = "unknown",
        Udp = "udp",
        Tcp = "tcp",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum WifiBand {
        Unknown = "unknown",
        Frequency24GHz = "frequency24GHz",
        Frequency50GHz = "frequency50GHz",
        Frequency60GHz = "frequency60GHz",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_enum! {
    pub enum WifiRadioType {
        Unknown = "unknown",
        Wifi80211a = "wifi80211a",
        Wifi80211b = "wifi80211b",
        Wifi80211g = "wifi80211g",
        Wifi80211n = "wifi80211n",
        Wifi80211ac = "wifi80211ac",
        Wifi80211ax = "wifi80211ax",
        UnknownFutureValue = "unknownFutureValue",
    }
}

graph_model! {
    /// Network of one endpoint of a media stream
    pub struct NetworkInfo {
        properties {
            /// Fraction of the call that the endpoint had too little bandwidth
            bandwidth_low_event_ratio: f32 = "bandwidthLowEventRatio",
            /// MAC address of the wireless access point
            basic_service_set_identifier: String = "basicServiceSetIdentifier",
            connection_type: NetworkConnectionType = "connectionType",
            delay_event_ratio: f32 = "delayEventRatio",
            dns_suffix: String = "dnsSuffix",
            ip_address: String = "ipAddress",
            /// Link speed in bits per second
            link_speed: i64 = "linkSpeed",
            mac_address: String = "macAddress",
            network_transport_protocol: NetworkTransportProtocol = "networkTransportProtocol",
            odata_type: String = "@odata.type",
            port: i32 = "port",
            received_quality_event_ratio: f32 = "receivedQualityEventRatio",
            /// Address seen by the media relay
            reflexive_ip_address: String = "reflexiveIPAddress",
            relay_ip_address: String = "relayIPAddress",
            relay_port: i32 = "relayPort",
            sent_quality_event_ratio: f32 = "sentQualityEventRatio",
            subnet: String = "subnet",
            /// Hops from the endpoint to the relay
            trace_route_hops: Vec<TraceRouteHop> = "traceRouteHops",
            wifi_band: WifiBand = "wifiBand",
            /// Battery charge in percent
            wifi_battery_charge: i32 = "wifiBatteryCharge",
            wifi_channel: i32 = "wifiChannel",
            wifi_microsoft_driver: String = "wifiMicrosoftDriver",
            wifi_microsoft_driver_version: String = "wifiMicrosoftDriverVersion",
            wifi_radio_type: WifiRadioType = "wifiRadioType",
            /// Signal strength in percent
            wifi_signal_strength: i32 = "wifiSignalStrength",
            wifi_vendor_driver: String = "wifiVendorDriver",
            wifi_vendor_driver_version: String = "wifiVendorDriverVersion",
        }
    }
}

graph_model! {
    /// One hop of a traceroute
    pub struct TraceRouteHop {
        properties {
            /// Hops from the endpoint, reported for each hop as it is reached
            hop_count: i32 = "hopCount",
            /// Address of the hop, absent if it did not reply
            ip_address: String = "ipAddress",
            odata_type: String = "@odata.type",
            round_trip_time: IsoDuration = "roundTripTime",
        }
    }
}
