use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::warn;
use retrofat_fat12::{listing, DirEntry, Fat12Reader};

#[derive(Debug, Parser)]
#[command(name = "retrofat")]
#[command(about = "List and extract files from raw FAT12 disk images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the root directory of an image
    Dir {
        /// Path to the raw FAT12 disk image
        image: PathBuf,
    },
    /// Extract every root directory file from an image
    Extract {
        /// Path to the raw FAT12 disk image
        image: PathBuf,
        /// Directory the extracted files are written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Usage errors exit with 1; --help and --version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    match cli.command {
        Commands::Dir { image } => list_directory(&image),
        Commands::Extract { image, output } => extract_files(&image, &output),
    }
}

fn list_directory(image: &Path) -> anyhow::Result<()> {
    let mut reader = Fat12Reader::open(image)?;

    println!("{}", listing::volume_header(&reader.volume_label(), reader.volume_serial()));
    println!();

    let entries = valid_entries(&mut reader)?;

    let mut count = 0usize;
    let mut total_bytes = 0u64;
    for entry in &entries {
        println!("{}", listing::entry_line(entry));
        count += 1;
        total_bytes += entry.file_size as u64;
    }

    println!("{}", listing::summary_line(count, total_bytes));
    println!();
    Ok(())
}

fn extract_files(image: &Path, output: &Path) -> anyhow::Result<()> {
    let mut reader = Fat12Reader::open(image)?;

    for entry in valid_entries(&mut reader)? {
        let name = entry.file_name();
        println!("{}", name);

        let target = output.join(&name);
        if target.exists() {
            warn!("overwriting existing file {}", target.display());
        }

        let content = reader.extract(&entry)?;
        fs::write(&target, content)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    Ok(())
}

fn valid_entries<R: Read + Seek>(
    reader: &mut Fat12Reader<R>,
) -> anyhow::Result<Vec<DirEntry>> {
    let entries = reader
        .root_entries()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read root directory")?;
    Ok(entries.into_iter().filter(DirEntry::is_valid).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_subcommand_is_a_usage_error() {
        let err = Cli::try_parse_from(["retrofat"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn missing_image_argument_is_a_usage_error() {
        let err = Cli::try_parse_from(["retrofat", "dir"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn help_is_not_a_usage_error() {
        let err = Cli::try_parse_from(["retrofat", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
