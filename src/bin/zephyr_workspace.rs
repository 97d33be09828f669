//! CLI for bootstrapping and validating Zephyr west workspaces.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use zephyr_workspace::{
    parse_env, ProcessWestRunner, WestInvocation, WorkspaceInitializer, WorkspaceValidator,
};

#[derive(Parser)]
#[command(name = "zephyr-workspace")]
#[command(about = "Bootstrap and validate Zephyr RTOS west workspaces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a workspace against its recorded fingerprint
    Check {
        /// Path to the Zephyr RTOS source tree
        #[arg(long)]
        rtos_dir: PathBuf,
        /// Path to the workspace
        #[arg(long)]
        working_dir: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Initialize (or repair) a workspace, running west update
    Init {
        /// Path to the Zephyr RTOS source tree
        #[arg(long)]
        rtos_dir: PathBuf,
        /// Path to the workspace
        #[arg(long)]
        working_dir: PathBuf,
        /// Path to the west tool script
        #[arg(long)]
        west_path: PathBuf,
        /// Space-separated KEY=VALUE environment for west
        #[arg(long)]
        west_env: String,
        /// Interpreter used to execute the west script
        #[arg(long, default_value = "python3")]
        python: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            rtos_dir,
            working_dir,
            format,
        } => check(working_dir, rtos_dir, &format),
        Commands::Init {
            rtos_dir,
            working_dir,
            west_path,
            west_env,
            python,
        } => init(working_dir, rtos_dir, west_path, &west_env, python),
    }
}

fn check(working_dir: PathBuf, rtos_dir: PathBuf, format: &str) -> ExitCode {
    let validator = WorkspaceValidator::new(working_dir, rtos_dir);
    match validator.check() {
        Ok(report) => {
            if format == "json" {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{} {}", "Error:".red().bold(), e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                report.print();
            }
            ExitCode::from(report.outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init(
    working_dir: PathBuf,
    rtos_dir: PathBuf,
    west_path: PathBuf,
    west_env: &str,
    python: PathBuf,
) -> ExitCode {
    let env = match parse_env(west_env) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    let invocation = WestInvocation {
        interpreter: python,
        script: west_path,
        env,
    };

    let initializer = WorkspaceInitializer::new(working_dir, rtos_dir);
    match initializer.init(&invocation, &ProcessWestRunner) {
        Ok(report) => {
            report.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
