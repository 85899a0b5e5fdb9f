use serde::Serialize;

use super::types::{DnsResolution, ProbeOptions, ScanOptions, ScanRequest, ServiceOptions, TransportProtocol};

/// Literal command lines for both scan phases, as the workers would run them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NmapCommands {
    pub open_ports_command: String,
    pub service_command: String,
}

impl ProbeOptions {
    /// Flags in fixed order: host discovery, DNS mode, protocol, retries,
    /// RTT bounds (min, max, initial), rate bounds (min, max).
    pub fn to_nmap_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.skip_host_discovery {
            args.push("-Pn".to_string());
        }

        match self.dns_resolution {
            DnsResolution::Force => args.push("-R".to_string()),
            DnsResolution::Skip => args.push("-n".to_string()),
            DnsResolution::Default => {}
        }

        if self.transport_protocol == TransportProtocol::Udp {
            args.push("-sU".to_string());
        }

        if let Some(retries) = self.max_retries {
            args.push(format!("--max-retries {}", retries));
        }

        if let Some(ms) = self.min_rtt_timeout_ms {
            args.push(format!("--min-rtt-timeout {}ms", ms));
        }
        if let Some(ms) = self.max_rtt_timeout_ms {
            args.push(format!("--max-rtt-timeout {}ms", ms));
        }
        if let Some(ms) = self.initial_rtt_timeout_ms {
            args.push(format!("--initial-rtt-timeout {}ms", ms));
        }

        if let Some(rate) = self.min_rate {
            args.push(format!("--min-rate {}", rate));
        }
        if let Some(rate) = self.max_rate {
            args.push(format!("--max-rate {}", rate));
        }

        args
    }
}

impl ScanOptions {
    pub fn to_nmap_args(&self) -> Vec<String> {
        let mut args = self.probe.to_nmap_args();
        if let Some(ports) = self.ports.as_ref().filter(|p| !p.is_empty()) {
            args.push(format!("-p {}", ports.join(",")));
        }
        args
    }
}

impl ServiceOptions {
    pub fn to_nmap_args(&self) -> Vec<String> {
        let mut args = self.probe.to_nmap_args();

        if self.aggressive_scan {
            args.push("-A".to_string());
        }
        if self.default_scripts {
            args.push("-sC".to_string());
        }
        if self.os_detection {
            args.push("-O".to_string());
        }
        if self.traceroute {
            args.push("--traceroute".to_string());
        }
        if self.force_service_version {
            args.push("-sV".to_string());
        }

        args
    }
}

impl ScanRequest {
    pub fn to_nmap_commands(&self) -> NmapCommands {
        NmapCommands {
            open_ports_command: render_command(&self.open_ports_opts.to_nmap_args(), &self.hosts),
            service_command: render_command(&self.service_opts.to_nmap_args(), &self.hosts),
        }
    }
}

fn render_command(args: &[String], hosts: &[String]) -> String {
    std::iter::once("nmap")
        .chain(args.iter().map(String::as_str))
        .chain(hosts.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_probe() -> ProbeOptions {
        ProbeOptions {
            skip_host_discovery: true,
            dns_resolution: DnsResolution::Skip,
            transport_protocol: TransportProtocol::Udp,
            max_retries: Some(2),
            min_rtt_timeout_ms: Some(100),
            max_rtt_timeout_ms: Some(2000),
            initial_rtt_timeout_ms: Some(500),
            min_rate: Some(100),
            max_rate: Some(1000),
        }
    }

    #[test]
    fn test_default_open_ports_args() {
        assert_eq!(ScanOptions::default().to_nmap_args(), vec!["-Pn"]);
    }

    #[test]
    fn test_default_service_args() {
        assert_eq!(ServiceOptions::default().to_nmap_args(), vec!["-Pn", "-sV"]);
    }

    #[test]
    fn test_open_ports_flag_order() {
        let opts = ScanOptions {
            probe: full_probe(),
            ports: Some(vec!["22".into(), "80".into(), "1000-2000".into()]),
        };
        assert_eq!(
            opts.to_nmap_args().join(" "),
            "-Pn -n -sU --max-retries 2 --min-rtt-timeout 100ms --max-rtt-timeout 2000ms \
             --initial-rtt-timeout 500ms --min-rate 100 --max-rate 1000 -p 22,80,1000-2000"
        );
    }

    #[test]
    fn test_service_flag_order() {
        let opts = ServiceOptions {
            probe: ProbeOptions {
                dns_resolution: DnsResolution::Force,
                ..Default::default()
            },
            aggressive_scan: true,
            default_scripts: true,
            os_detection: true,
            traceroute: true,
            ..Default::default()
        };
        assert_eq!(
            opts.to_nmap_args(),
            vec!["-Pn", "-R", "-A", "-sC", "-O", "--traceroute", "-sV"]
        );
    }

    #[test]
    fn test_unset_values_emit_nothing() {
        let opts = ScanOptions {
            probe: ProbeOptions {
                skip_host_discovery: false,
                ..Default::default()
            },
            ports: Some(Vec::new()),
        };
        assert!(opts.to_nmap_args().is_empty());
    }

    #[test]
    fn test_commands_append_hosts() {
        let req = ScanRequest {
            hosts: vec!["10.0.0.1".into(), "scanme.example".into()],
            ..Default::default()
        };
        let cmds = req.to_nmap_commands();
        assert_eq!(cmds.open_ports_command, "nmap -Pn 10.0.0.1 scanme.example");
        assert_eq!(cmds.service_command, "nmap -Pn -sV 10.0.0.1 scanme.example");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let req = ScanRequest {
            hosts: vec!["a".into()],
            open_ports_opts: ScanOptions { probe: full_probe(), ports: Some(vec!["443".into()]) },
            ..Default::default()
        };
        let first = req.to_nmap_commands();
        for _ in 0..5 {
            assert_eq!(req.to_nmap_commands(), first);
        }
    }
}
