// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robofixture CLI
//!
//! Writes deterministic MCAP fixtures, one subcommand per codec.
//!
//! ## Usage
//!
//! ```sh
//! # 10000 messages per topic under /ros2msg
//! robofixture ros2msg ros2msg.mcap
//!
//! # Small file with a custom prefix
//! robofixture protobuf out.mcap --num-msgs 3 --topic-prefix /t
//!
//! # All four codecs into one directory
//! robofixture all fixtures/ --num-msgs 100
//! ```

mod cmd;
mod common;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
use cmd::{AllCmd, GenerateCmd};
use common::{init_logging, GlobalOpts, Result};
use robofixture::Codec;

/// Robofixture - deterministic MCAP fixtures
///
/// Writes the same log, pose and laser scan messages through OMG IDL,
/// Protobuf, ROS 1 or ROS 2 encodings.
#[derive(Parser, Clone)]
#[command(name = "robofixture")]
#[command(about = "Deterministic MCAP fixture generator", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print run summaries as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// OMG IDL schemas, CDR messages
    Omgidl(GenerateCmd),

    /// Protobuf schemas and messages
    Protobuf(GenerateCmd),

    /// ROS 1 message definitions and serialization
    Ros1msg(GenerateCmd),

    /// ROS 2 message definitions, CDR messages
    Ros2msg(GenerateCmd),

    /// Write <OUTDIR>/<codec>.mcap for every codec
    All(AllCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = GlobalOpts {
        quiet: cli.quiet,
        json: cli.json,
    };

    match cli.command {
        Commands::Omgidl(cmd) => cmd.run(Codec::OmgIdl, opts),
        Commands::Protobuf(cmd) => cmd.run(Codec::Protobuf, opts),
        Commands::Ros1msg(cmd) => cmd.run(Codec::Ros1, opts),
        Commands::Ros2msg(cmd) => cmd.run(Codec::Ros2, opts),
        Commands::All(cmd) => cmd.run(opts),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
