//! rnc-cli - Command-line interface for the RNC1 packer
//!
//! Packs files in place (or to a named output), unpacks them and prints
//! header information.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rnc::{crc16, pack_verified, unpack_with_leeway, PackStats, RncHeader, HEADER_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rnc-cli")]
#[command(about = "A CLI tool for Rob Northen RNC1 packing and unpacking")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack files with RNC1, replacing them unless --output is given
    Pack {
        /// Files to pack
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the packed file here instead of in place (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Unpack an RNC1 file
    Unpack {
        /// Input packed file
        input: PathBuf,

        /// Output unpacked file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the header of an RNC1 file
    Info {
        /// Packed file to analyze
        input: PathBuf,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack { files, output } => {
            pack_files(&files, output.as_deref(), cli.verbose, cli.quiet)
        }
        Commands::Unpack {
            input,
            output,
            force,
        } => unpack_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Pack every file, carrying on past failures
fn pack_files(
    files: &[PathBuf],
    output: Option<&Path>,
    verbose: bool,
    quiet: bool,
) -> CliResult<()> {
    if output.is_some() && files.len() != 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let progress = if !quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let report = |line: String| match &progress {
        Some(pb) => pb.println(line),
        None => println!("{}", line),
    };

    let mut failed = 0usize;
    for input in files {
        if let Some(pb) = &progress {
            pb.set_message(input.display().to_string());
        }

        let target = output.unwrap_or(input.as_path());
        let start_time = Instant::now();
        match pack_file(input, target) {
            Ok(stats) => {
                if verbose {
                    report(format!(
                        "{}: {} -> {} bytes ({:.1}%), {} chunks, leeway {}, {} matches, {:.2?}",
                        input.display(),
                        stats.unpacked_len,
                        stats.packed_len,
                        stats.ratio() * 100.0,
                        stats.chunks,
                        stats.leeway,
                        stats.match_count,
                        start_time.elapsed()
                    ));
                } else if !quiet {
                    report(format!(
                        "{}: {} -> {} bytes",
                        input.display(),
                        stats.unpacked_len,
                        stats.packed_len
                    ));
                }
            }
            Err(e) => {
                failed += 1;
                match &progress {
                    Some(pb) => pb.suspend(|| eprintln!("{}: {}", input.display(), e)),
                    None => eprintln!("{}: {}", input.display(), e),
                }
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_with_message("done");
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, files.len()).into());
    }
    Ok(())
}

/// Pack `input` and write the verified result to `output`
fn pack_file(input: &Path, output: &Path) -> CliResult<PackStats> {
    let data = fs::read(input)?;
    let packed = pack_verified(&data)?;
    fs::write(output, &packed.data)?;
    Ok(packed.stats)
}

fn unpack_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> CliResult<()> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    let start_time = Instant::now();
    let packed = fs::read(input)?;
    let (unpacked, leeway) =
        unpack_with_leeway(&packed).map_err(|e| format!("Unpacking failed: {}", e))?;
    fs::write(output, &unpacked)?;

    if verbose {
        println!("Unpacked '{}' to '{}'", input.display(), output.display());
        println!("  Input:  {} bytes", packed.len());
        println!("  Output: {} bytes", unpacked.len());
        println!("  Leeway: {}", leeway);
        println!("  Time:   {:.2?}", start_time.elapsed());
    } else if !quiet {
        println!(
            "{}: {} -> {} bytes",
            input.display(),
            packed.len(),
            unpacked.len()
        );
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> CliResult<()> {
    let data = fs::read(input)?;
    let header = RncHeader::parse(&data)?;

    println!("RNC1 File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Unpacked Length: {} bytes", header.unpacked_len);
    println!("  Packed Length: {} bytes", header.packed_len);
    println!("  Unpacked CRC: {:04X}", header.unpacked_crc);
    println!("  Packed CRC: {:04X}", header.packed_crc);
    println!("  Leeway: {}", header.leeway);
    println!("  Chunks: {}", header.chunks);

    if verbose {
        let header_bytes: Vec<String> = data[..HEADER_SIZE]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        println!("  Header bytes: {}", header_bytes.join(" "));
    }

    let body_end = HEADER_SIZE + header.packed_len as usize;
    if body_end <= data.len() {
        let actual = crc16(&data[HEADER_SIZE..body_end]);
        if actual == header.packed_crc {
            println!("  Packed CRC check: ok");
        } else {
            println!("  Packed CRC check: failed (computed {:04X})", actual);
        }
    } else {
        println!("  Packed CRC check: body truncated");
    }

    match unpack_with_leeway(&data) {
        Ok((unpacked, leeway)) => {
            println!("  Decoded Size: {} bytes", unpacked.len());
            println!("  Measured Leeway: {}", leeway);
            println!("  Status: valid RNC1 file");
        }
        Err(e) => {
            println!("  Status: invalid or corrupted RNC1 file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
