use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use vessel_rs::PartialSpec;

use crate::logging::{LogFormat, LogLevel};
use crate::runner::RunConfig;

#[derive(Parser)]
#[command(name = "vessel")]
#[command(version, about = "Run containers with your working directory and repository mounted", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Run a command in an Ubuntu container
    vessel --image ubuntu:latest -- echo \"Hello World\"

    # Skip repository discovery
    vessel run --image node:22 --no-git -- npm test

    # Extra bind mounts
    vessel --image postgres:16 --volume ./data:/var/lib/postgresql/data

    # Execute a launch script (or use `#!/usr/bin/env vessel` as its first line)
    vessel job.vsl arg1 arg2

    # Check the container engine
    vessel check
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Launch script, or command to run in the container
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a container (same as the direct form)
    Run {
        /// Launch script, or command to run in the container
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Check that the container engine is reachable
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Image to run
    #[arg(short, long, global = true, env = "VSL_RUN_IMAGE")]
    pub image: Option<String>,

    /// Disable repository discovery and mounting
    #[arg(long, visible_alias = "ng", global = true, env = "VSL_RUN_NO_GIT")]
    pub no_git: bool,

    /// Run with a TTY and stdin attached
    #[arg(
        long,
        visible_alias = "it",
        global = true,
        env = "VSL_RUN_INTERACTIVE",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub interactive: bool,

    /// Working directory inside the container
    #[arg(short, long, value_name = "PATH", global = true, env = "VSL_RUN_WORKING_DIR")]
    pub working_dir: Option<PathBuf>,

    /// User to run as (uid:gid or username)
    #[arg(short, long, global = true, env = "VSL_RUN_USER")]
    pub user: Option<String>,

    /// Environment variable (KEY=VALUE), repeatable
    #[arg(
        short,
        long,
        value_name = "KEY=VALUE",
        global = true,
        env = "VSL_RUN_ENV",
        value_delimiter = ','
    )]
    pub env: Vec<String>,

    /// Bind mount (SOURCE:TARGET[:ro]), repeatable
    #[arg(
        short,
        long,
        value_name = "SPEC",
        global = true,
        env = "VSL_RUN_VOLUME",
        value_delimiter = ','
    )]
    pub volume: Vec<String>,

    /// Override the image entrypoint, repeatable
    #[arg(long, global = true, env = "VSL_RUN_ENTRYPOINT", value_delimiter = ',')]
    pub entrypoint: Vec<String>,

    /// Network mode (bridge, host, none, container:NAME)
    #[arg(long, global = true, env = "VSL_RUN_NETWORK_MODE")]
    pub network_mode: Option<String>,

    /// Give extended privileges to the container
    #[arg(long, global = true, env = "VSL_RUN_PRIVILEGED")]
    pub privileged: bool,

    /// Launch script to run; load errors are fatal
    #[arg(long, value_name = "PATH", global = true)]
    pub script: Option<PathBuf>,

    /// Write the result document here instead of stdout
    #[arg(short, long, value_name = "PATH", global = true, env = "VSL_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    /// Freeze the parsed flags into a run configuration
    pub fn into_config(self, positional: Vec<String>) -> RunConfig {
        let flags = PartialSpec {
            image: self.image,
            command: Vec::new(),
            entrypoint: self.entrypoint,
            working_dir: self.working_dir,
            environment: self.env,
            volumes: self.volume,
            user: self.user,
            network_mode: self.network_mode,
            interactive: self.interactive,
            privileged: self.privileged,
        };
        RunConfig {
            flags,
            positional,
            script: self.script,
            no_git: self.no_git,
            output: self.output,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log level
    #[arg(long, value_enum, global = true, env = "VSL_LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, global = true, env = "VSL_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Show debug output
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl LogArgs {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug.max(self.log_level.filter())
        } else {
            self.log_level.filter()
        }
    }
}
