//! Developer tasks: man page and shell completion generation.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for tag-extractor")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => {
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            let cmd = tag_extractor::command();
            let path = out_dir.join("tag-extractor.1");
            let mut buf = Vec::new();
            clap_mangen::Man::new(cmd).render(&mut buf)?;
            fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        Task::Completions { out_dir } => {
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
                let mut cmd = tag_extractor::command();
                let path =
                    clap_complete::generate_to(shell, &mut cmd, "tag-extractor", &out_dir)?;
                println!("wrote {}", path.display());
            }
        }
    }
    Ok(())
}
