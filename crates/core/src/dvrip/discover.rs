//! Discovery announcement messages.
//!
//! Discovery runs over UDP broadcast; the probe is a bare packet of type
//! 1530 with no payload, so only the announcement has a message type here.

use super::convert::{fixed_member, HexIpv4, Netmask};
use super::message::{Message, Reply, Session};
use super::model::*;
use super::monitor::TcpTransport;
use super::status::Status;
use serde::{Deserialize, Serialize};

fixed_member!(
    /// Device class announced by every known firmware.
    DeviceKind,
    1
);

fixed_member!(
    /// Transfer plan announced by every known firmware.
    AutoAdaptPlan,
    "AutoAdapt"
);

fixed_member!(
    /// High speed download flag announced by every known firmware.
    NoHsDownload,
    false
);

/// One announced device.
///
/// The address members use the little endian hex encoding, so the digits
/// read byte reversed relative to the dotted quads they stand for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Host {
    #[allow(missing_docs)]
    #[serde(rename = "DeviceType")]
    pub kind: DeviceKind,
    /// Serial number.
    #[serde(rename = "SN")]
    pub serial: String,
    /// Hardware address.
    #[serde(rename = "MAC")]
    pub mac: String,
    /// Default gateway.
    #[serde(rename = "GateWay")]
    pub router: HexIpv4,
    /// The device's own address; checked against the datagram source.
    #[serde(rename = "HostIP")]
    pub host: HexIpv4,
    /// Network prefix length.
    #[serde(rename = "Submask")]
    pub mask: Netmask,
    /// Hostname.
    #[serde(rename = "HostName")]
    pub name: String,
    /// Control port.
    #[serde(rename = "TCPPort")]
    pub tcp_port: u16,
    /// Discovery port.
    #[serde(rename = "UDPPort")]
    pub udp_port: u16,
    /// Web interface port.
    #[serde(rename = "HttpPort")]
    pub http_port: u16,
    /// TLS web interface port.
    #[serde(rename = "SSLPort")]
    pub https_port: u16,
    /// Number of camera channels.
    #[serde(rename = "ChannelNum")]
    pub channels: u32,
    /// Connection limit.
    #[serde(rename = "TCPMaxConn")]
    pub max_connections: u32,
    #[allow(missing_docs)]
    #[serde(rename = "MonMode")]
    pub transport: TcpTransport,
    /// Advertised bandwidth cap.
    #[serde(rename = "MaxBps")]
    pub max_bps: u32,
    #[allow(missing_docs)]
    #[serde(rename = "TransferPlan")]
    pub plan: AutoAdaptPlan,
    #[allow(missing_docs)]
    #[serde(rename = "UseHSDownLoad")]
    pub hs_download: NoHsDownload,
    #[allow(missing_docs)]
    #[serde(rename = "NetConnectState")]
    pub connect_state: u32,
    #[allow(missing_docs)]
    #[serde(rename = "OtherFunction")]
    pub other: String,
}

/// A device announcing itself in answer to a discovery probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverReply {
    /// Result code.
    #[serde(rename = "Ret")]
    pub status: Status,
    /// Always the zero session; nobody is logged in over broadcast.
    #[serde(rename = "SessionID")]
    pub session: Session,
    /// The announced device.
    #[serde(rename = "NetWork.NetCommon")]
    pub host: Host,
}

impl Message for DiscoverReply {
    const TYPE: u16 = MSG_ID_DISCOVER_REPLY;
}

impl Reply for DiscoverReply {
    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    pub(crate) fn sample() -> serde_json::Value {
        serde_json::json!({
            "Ret": 100,
            "SessionID": "0x00000000",
            "NetWork.NetCommon": {
                "DeviceType": 1,
                "SN": "a166379674d3b447",
                "MAC": "00:12:34:56:78:9a",
                "GateWay": "0x0101A8C0",
                "HostIP": "0x0A01A8C0",
                "Submask": "0x00FFFFFF",
                "HostName": "LocalHost",
                "TCPPort": 34567,
                "UDPPort": 34568,
                "HttpPort": 80,
                "SSLPort": 8443,
                "ChannelNum": 4,
                "TCPMaxConn": 10,
                "MonMode": "TCP",
                "MaxBps": 0,
                "TransferPlan": "AutoAdapt",
                "UseHSDownLoad": false,
                "NetConnectState": 0,
                "OtherFunction": "",
            },
        })
    }

    #[test]
    fn test_announcement_roundtrip() {
        let json = sample();
        let reply: DiscoverReply = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(reply.host.host, HexIpv4(Ipv4Addr::new(192, 168, 1, 10)));
        assert_eq!(reply.host.router, HexIpv4(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(reply.host.mask, Netmask(24));
        assert_eq!(reply.host.tcp_port, 34567);
        assert_eq!(serde_json::to_value(&reply).unwrap(), json);
    }
}
