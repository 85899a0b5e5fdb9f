use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ImportMode;
use crate::models::ReportFormat;
use crate::status::poller::DEFAULT_REFRESH_SECS;

#[derive(Parser)]
#[command(name = "falcoria", version, about = "Command-line client for the Falcoria ScanLedger and Tasker services")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding profiles, scan configs and reports
    #[arg(long, global = true, value_name = "PATH", env = "FALCORIA_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Use this profile instead of the active one
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start, track and stop Nmap scans
    #[command(subcommand)]
    Scan(ScanCommand),
    /// Manage ScanLedger projects and their IPs
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage local connection profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Inspect scan workers
    #[command(subcommand)]
    Workers(WorkersCommand),
}

#[derive(Subcommand)]
pub enum ScanCommand {
    /// Start a scan using a YAML config and a target source
    Start(ScanStartArgs),
    /// Show scan task status for a project
    Status(ScanStatusArgs),
    /// Stop all active and queued scan tasks of a project
    Stop(ProjectIdArgs),
    /// Print the Nmap commands a config would produce
    Preview(ScanPreviewArgs),
    /// List available scan options with descriptions and defaults
    Options,
}

#[derive(Args, Clone)]
pub struct ScanStartArgs {
    /// Path to scan configuration YAML file [default: <data-dir>/scan_configs/default.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File with one target host per line (overrides hosts from config)
    #[arg(long)]
    pub targets_file: Option<PathBuf>,

    /// Comma-separated hosts to scan (overrides all other sources)
    #[arg(long)]
    pub hosts: Option<String>,

    /// Use the hosts listed in the YAML config
    #[arg(long)]
    pub from_config: bool,

    /// Project to scan into (default: current project of the profile)
    #[arg(long)]
    pub project_id: Option<String>,

    /// How results merge into the project's IP inventory
    #[arg(long, value_enum)]
    pub mode: Option<ImportMode>,
}

#[derive(Args, Clone)]
pub struct ScanStatusArgs {
    /// Project to check (default: current project of the profile)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Track progress live until the queue drains
    #[arg(short, long)]
    pub interactive: bool,

    /// Seconds between status queries in interactive mode
    #[arg(long, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_time: u64,
}

#[derive(Args, Clone)]
pub struct ScanPreviewArgs {
    /// Path to scan configuration YAML file [default: <data-dir>/scan_configs/default.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct ProjectIdArgs {
    /// Project ID (default: current project of the profile)
    #[arg(long)]
    pub project_id: Option<String>,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List all projects
    List,
    /// Create a new project
    Create {
        name: String,
    },
    /// Show project details
    Get {
        /// Project ID (default: current project of the profile)
        project_id: Option<String>,
    },
    /// Delete a project
    Delete {
        project_id: String,
    },
    /// Make a project the current one for the active profile
    SetActive {
        project_id: String,
    },
    /// Manage IPs of a project
    #[command(subcommand)]
    Ips(IpsCommand),
}

#[derive(Subcommand)]
pub enum IpsCommand {
    /// List IPs with their ports
    List(IpsListArgs),
    /// Add IPs to a project
    Add(IpsAddArgs),
    /// Import IPs from an Nmap report file
    Import(IpsImportArgs),
    /// Download the project's IPs as a report file
    Download(IpsDownloadArgs),
    /// Show one IP, or all IPs when none is given
    Get(IpArgs),
    /// Delete one IP, or all IPs when none is given
    Delete(IpArgs),
}

#[derive(Args, Clone)]
pub struct IpsListArgs {
    #[command(flatten)]
    pub project: ProjectIdArgs,

    /// Number of records to skip
    #[arg(long)]
    pub skip: Option<u32>,

    /// Maximum number of records
    #[arg(long)]
    pub limit: Option<u32>,

    /// Include IPs without open ports
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Clone)]
pub struct IpsAddArgs {
    #[command(flatten)]
    pub project: ProjectIdArgs,

    /// IP address or hostname to add (repeatable)
    #[arg(long = "ip", required = true)]
    pub ips: Vec<String>,

    #[arg(long, value_enum, default_value_t = ImportMode::Insert)]
    pub mode: ImportMode,
}

#[derive(Args, Clone)]
pub struct IpsImportArgs {
    #[command(flatten)]
    pub project: ProjectIdArgs,

    /// Report file to upload
    #[arg(short, long)]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = ImportMode::Insert)]
    pub mode: ImportMode,
}

#[derive(Args, Clone)]
pub struct IpsDownloadArgs {
    #[command(flatten)]
    pub project: ProjectIdArgs,

    #[arg(long, value_enum, default_value_t = ReportFormat::Xml)]
    pub format: ReportFormat,

    /// Output path [default: <data-dir>/reports/<project-id>_ips.<format>]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Include IPs without open ports
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Clone)]
pub struct IpArgs {
    #[command(flatten)]
    pub project: ProjectIdArgs,

    /// IP address
    pub ip: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// List available profiles
    List,
    /// Show a profile (default: the active one)
    Show {
        name: Option<String>,
    },
    /// Create a new profile
    Create {
        name: String,
        scanledger_base_url: String,
        tasker_base_url: String,
        /// API token, or $ENV_VAR to read it from the environment
        token: String,
    },
    /// Delete a profile
    Delete {
        name: String,
    },
    /// Make a profile the active one
    SetActive {
        name: String,
    },
    /// Show the active profile name
    ShowActive,
    /// Set one field of a profile
    Set {
        name: String,
        field: String,
        value: String,
    },
    /// Check a profile file for missing required fields
    Validate {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum WorkersCommand {
    /// List external IP addresses of active workers
    Ips,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_start() {
        let cli = Cli::try_parse_from([
            "falcoria", "-vv", "scan", "start", "--hosts", "10.0.0.1,10.0.0.2",
            "--project-id", "p1", "--mode", "append",
        ]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scan(ScanCommand::Start(args)) => {
                assert_eq!(args.hosts.as_deref(), Some("10.0.0.1,10.0.0.2"));
                assert_eq!(args.mode, Some(ImportMode::Append));
                assert!(!args.from_config);
            }
            _ => panic!("expected scan start"),
        }
    }

    #[test]
    fn test_parse_interactive_status() {
        let cli = Cli::try_parse_from(["falcoria", "scan", "status", "-i", "--refresh-time", "2"]).unwrap();
        match cli.command {
            Commands::Scan(ScanCommand::Status(args)) => {
                assert!(args.interactive);
                assert_eq!(args.refresh_time, 2);
            }
            _ => panic!("expected scan status"),
        }
    }

    #[test]
    fn test_zero_refresh_rejected() {
        assert!(Cli::try_parse_from(["falcoria", "scan", "status", "--refresh-time", "0"]).is_err());
    }

    #[test]
    fn test_data_dir_from_environment() {
        std::env::set_var("FALCORIA_HOME", "/srv/falcoria");
        let from_env = Cli::try_parse_from(["falcoria", "workers", "ips"]).unwrap();
        let from_flag = Cli::try_parse_from(["falcoria", "--data-dir", "/tmp/fc", "workers", "ips"]).unwrap();
        std::env::remove_var("FALCORIA_HOME");

        assert_eq!(from_env.data_dir, Some(PathBuf::from("/srv/falcoria")));
        assert_eq!(from_flag.data_dir, Some(PathBuf::from("/tmp/fc")));
    }

    #[test]
    fn test_parse_nested_ips() {
        let cli = Cli::try_parse_from([
            "falcoria", "--profile", "lab", "project", "ips", "add", "--ip", "1.1.1.1", "--ip", "8.8.8.8",
        ]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("lab"));
        match cli.command {
            Commands::Project(ProjectCommand::Ips(IpsCommand::Add(args))) => {
                assert_eq!(args.ips, vec!["1.1.1.1", "8.8.8.8"]);
                assert_eq!(args.mode, ImportMode::Insert);
            }
            _ => panic!("expected ips add"),
        }
    }
}
