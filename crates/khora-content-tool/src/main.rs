// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Command line tool for khora content files.
// Run with: khora-content <command> <paths>...

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Checks and formats khora content files")]
struct Cli {
    /// Settings file. Without one, unknown types are accepted.
    #[arg(long, global = true, default_value = "content.toml")]
    settings: PathBuf,
    /// Fail on type names and enum members that are not built in, even if
    /// the settings file allows them.
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every file and report the ones that fail
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Rewrite files with one field per line
    Format {
        /// Overwrite the files instead of printing them
        #[arg(long)]
        write: bool,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Rewrite files on a single line
    Minify {
        /// Overwrite the files instead of printing them
        #[arg(long)]
        write: bool,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut settings = helpers::load_settings(&cli.settings, cli.strict)?;

    match cli.cmd {
        Command::Check { paths } => commands::check::run(&paths, settings),
        Command::Format { write, paths } => {
            settings.minify = false;
            commands::format::run(&paths, settings, write)
        }
        Command::Minify { write, paths } => {
            settings.minify = true;
            commands::format::run(&paths, settings, write)
        }
    }
}
