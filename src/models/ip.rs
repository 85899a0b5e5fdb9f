use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortProtocol {
    Tcp,
    Udp,
}

impl PortProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PortState {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "closed")]
    Closed,
    #[serde(rename = "filtered")]
    Filtered,
    #[serde(rename = "unfiltered")]
    Unfiltered,
    #[serde(rename = "open|filtered")]
    OpenFiltered,
    #[serde(rename = "closed|filtered")]
    ClosedFiltered,
}

impl PortState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Filtered => "filtered",
            Self::Unfiltered => "unfiltered",
            Self::OpenFiltered => "open|filtered",
            Self::ClosedFiltered => "closed|filtered",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub number: u16,
    pub protocol: PortProtocol,
    pub state: PortState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servicefp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: String,
}

/// An address in a project's inventory with its discovered ports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ip {
    pub ip: String,
    #[serde(rename = "asnName", default, deserialize_with = "null_as_default")]
    pub asn_name: String,
    #[serde(rename = "orgName", default, deserialize_with = "null_as_default")]
    pub org_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub endtime: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostnames: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<Port>,
}

/// Format of a downloaded IP report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    #[default]
    Xml,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_null_fields_normalized() {
        let ip: Ip = serde_json::from_str(
            r#"{"ip":"10.0.0.1","hostnames":null,"os":null,"ports":[
                {"number":22,"protocol":"tcp","state":"open|filtered","banner":null}
            ]}"#,
        ).unwrap();
        assert!(ip.hostnames.is_empty());
        assert_eq!(ip.os, "");
        assert_eq!(ip.ports[0].state, PortState::OpenFiltered);
        assert_eq!(ip.ports[0].banner, "");
    }

    #[test]
    fn test_ip_camel_case_fields() {
        let ip: Ip = serde_json::from_str(r#"{"ip":"1.1.1.1","asnName":"CLOUDFLARENET","orgName":"Cloudflare"}"#).unwrap();
        assert_eq!(ip.asn_name, "CLOUDFLARENET");
        assert_eq!(ip.org_name, "Cloudflare");
    }

    #[test]
    fn test_port_state_as_str() {
        assert_eq!(PortState::ClosedFiltered.as_str(), "closed|filtered");
        assert_eq!(PortProtocol::Udp.as_str(), "udp");
    }
}
