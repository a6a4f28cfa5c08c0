//! lzwd-cli - Command-line interface for LZWd
//!
//! A command-line tool for compressing files into `.lzwd` streams and
//! inspecting existing streams.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record};
use lzwd::encode::Symbols;
use lzwd::{
    compress_stream_with, inspect_stream, BlockReader, DictionarySize, EncoderOptions,
    TraceLevel, BLOCK_SIZE_DEFAULT, FIRST_PATTERN_CODE,
};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEBUG_TXT: &str = "\x1b[33m";
const RESET_TXT: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "lzwd-cli")]
#[command(about = "A CLI tool for LZWd dictionary compression")]
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
    /// Compress a file into an LZWd stream
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output file (defaults to the input with a .lzwd extension)
        output: Option<PathBuf>,

        /// Block size in bytes
        #[arg(short = 's', long, default_value_t = BLOCK_SIZE_DEFAULT)]
        block_size: usize,

        /// Dictionary size
        #[arg(short = 'D', long, value_enum, default_value_t = CliDictionarySize::Size4K)]
        dict_size: CliDictionarySize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,

        /// Print every block's input bytes and output codes
        #[arg(short, long)]
        text: bool,

        /// Trace every lookahead step of the encoder
        #[arg(short, long)]
        debug: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliDictionarySize {
    /// 1K slots (10-bit codes)
    #[value(name = "size1k")]
    Size1K,
    /// 2K slots (11-bit codes)
    #[value(name = "size2k")]
    Size2K,
    /// 4K slots (12-bit codes) - Default
    #[value(name = "size4k")]
    Size4K,
}

impl From<CliDictionarySize> for DictionarySize {
    fn from(size: CliDictionarySize) -> Self {
        match size {
            CliDictionarySize::Size1K => DictionarySize::Size1K,
            CliDictionarySize::Size2K => DictionarySize::Size2K,
            CliDictionarySize::Size4K => DictionarySize::Size4K,
        }
    }
}

/// Writes log records to stderr, highlighted like the debug mode text
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{DEBUG_TXT}{}{RESET_TXT}", record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level: LevelFilter) {
    if level != LevelFilter::Off && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            block_size,
            dict_size,
            force,
            text,
            debug,
        } => {
            let trace = if debug {
                TraceLevel::Patterns
            } else if cli.verbose {
                TraceLevel::Blocks
            } else {
                TraceLevel::Off
            };
            init_logging(match trace {
                TraceLevel::Patterns => LevelFilter::Trace,
                TraceLevel::Blocks => LevelFilter::Debug,
                TraceLevel::Off => LevelFilter::Off,
            });

            let options = EncoderOptions::new(dict_size.into())
                .with_block_size(block_size)
                .with_trace(trace);
            let output = output.unwrap_or_else(|| default_output_path(&input));
            compress_file(&input, &output, options, force, text, cli.verbose, cli.quiet)
        }
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(lzwd::common::LZWD_EXTENSION)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether both paths name the same existing file
fn same_file(input: &Path, output: &Path) -> std::io::Result<bool> {
    if !output.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(input)? == fs::canonicalize(output)?)
}

/// Text mode and debug mode both dump every block
fn dumps_blocks(text: bool, options: &EncoderOptions) -> bool {
    text || options.trace == TraceLevel::Patterns
}

fn compress_file(
    input: &Path,
    output: &Path,
    options: EncoderOptions,
    force: bool,
    text: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if same_file(input, output)? {
        return Err(format!("Output file '{}' is the input file", output.display()).into());
    }

    // Check if output file exists and force flag
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    options.validate()?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Dictionary: {} slots, Block size: {} bytes",
            options.dict_size.slots(),
            options.block_size
        );
    }

    let start_time = Instant::now();
    let input_size = fs::metadata(input)?.len();

    // Show progress bar for large files
    let progress = if !quiet && input_size > 1024 * 1024 {
        let pb = ProgressBar::new(input_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("Compressing...");
        Some(pb)
    } else {
        None
    };

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    let dump = dumps_blocks(text, &options);
    let mut block_count = 0usize;
    let stats = compress_stream_with(reader, writer, options, |block, codes, block_stats| {
        block_count += 1;
        if dump {
            println!("processing block {}. Input:", block_count);
            println!("{}", Symbols(block));
            println!("Output block {}:", block_count);
            let codes: Vec<String> = codes.iter().map(|code| code.to_string()).collect();
            println!("{}", codes.join(" "));
        }
        if verbose && block_stats.resets > 0 {
            println!(
                "  block {}: {} dictionary resets",
                block_count, block_stats.resets
            );
        }
        if let Some(ref pb) = progress {
            pb.inc(block.len() as u64);
        }
    })
    .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.finish_with_message("Compression complete");
    }

    let duration = start_time.elapsed();

    if !quiet {
        println!("✓ Compression successful!");
        println!(
            "  Source:      {} with {} bytes",
            file_name(input),
            stats.input_bytes
        );
        println!(
            "  Compressed:  {} with {} bytes",
            file_name(output),
            stats.output_bytes
        );
        println!("  Compression: {:.2} %", stats.space_savings());
        println!(
            "  Blocks processed: {} || Block size: {} || Last block: {}",
            stats.blocks, options.block_size, stats.last_block_size
        );
        println!("  Duration:    {:.2?}", duration);

        if verbose {
            println!("  Codes:       {}", stats.codes);
            println!("  Resets:      {}", stats.resets);
            println!("  Longest pattern: {} bytes", stats.longest_pattern);
        }

        if stats.output_bytes > stats.input_bytes {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let file_size = fs::metadata(input)?.len();
    let summary = inspect_stream(BufReader::new(File::open(input)?))?;
    let header = summary.header;

    println!("LZWd File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!(
        "  Dictionary Size: {} slots ({} bits)",
        header.dict_size.slots(),
        header.dict_size.bits()
    );
    println!("  Block Size: {} bytes", header.block_size);
    println!("  Blocks: {}", summary.blocks);
    println!("  Codes: {}", summary.codes);
    println!("  Original Size: {} bytes", summary.source_bytes);
    if summary.source_bytes > 0 {
        let savings = (1.0 - file_size as f64 / summary.source_bytes as f64) * 100.0;
        println!("  Compression: {:.2} %", savings);
    }

    if verbose {
        let blocks = BlockReader::new(BufReader::new(File::open(input)?))?;
        for (i, block) in blocks.enumerate() {
            let (block, codes) = block?;
            let multi = codes.iter().filter(|&&c| c >= FIRST_PATTERN_CODE).count();
            println!(
                "  Block {}: {} bytes, {} codes ({} multi-symbol)",
                i + 1,
                block.source_len,
                block.code_count,
                multi
            );
        }
    }

    if summary.stream_bytes == file_size {
        println!("  Status: ✓ Valid LZWd file");
    } else {
        println!(
            "  Status: ✗ {} trailing bytes",
            file_size.saturating_sub(summary.stream_bytes)
        );
    }

    Ok(())
}
