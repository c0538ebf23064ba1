pub mod global;
pub mod mods;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cvmods", version, about = "Lists, toggles, installs, uninstalls and packs ChurnVector mods")]
pub struct Cli {
    /// Use this mods folder instead of the configured one
    #[arg(long, global = true)]
    pub root: Option<Utf8PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List installed mods
    List {
        #[arg(long)]
        json: bool,
    },
    /// Enable a disabled mod (folder name or list index)
    Enable { selector: String },
    /// Disable an enabled mod (folder name or list index)
    Disable { selector: String },
    /// Flip a mod between enabled and disabled
    Toggle { selector: String },
    /// Install a packed .zip or an unpacked mod folder containing info.json
    Install { path: Utf8PathBuf },
    /// Delete a mod from the mods folder
    Uninstall {
        selector: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Pack a mod into <folder>.zip for distribution
    Pack {
        selector: String,
        /// Directory the archive is written to
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Print the mods folder
    Path {
        #[arg(long)]
        create: bool,
    },
    /// Print the configuration
    Config {
        /// Store this folder as the mods folder override
        #[arg(long)]
        set_root: Option<Utf8PathBuf>,
    },
}
