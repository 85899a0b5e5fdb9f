pub mod builder;
pub mod credentials;
pub mod nmap;
pub mod options;
pub mod parser;
pub mod schema;
pub mod targets;
pub mod types;

pub use builder::{assemble, build_scan_request, preview_commands};
pub use nmap::NmapCommands;
pub use options::{open_ports_option_docs, service_option_docs, OptionDoc};
pub use parser::{load_scan_config, parse_scan_config};
pub use targets::{resolve_targets, TargetSource, TargetSources};
pub use types::*;
