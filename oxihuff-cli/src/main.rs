//! OxiHuff CLI - per-file Huffman compression
//!
//! Compresses and decompresses single files in the self-describing `.hf`
//! tree-header format.

use clap::{Parser, Subcommand};
use oxihuff::{BitReader, CodeTable, MAGIC, header};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "Pure Rust per-file Huffman compression (.hf format)"
)]
#[command(long_about = "
OxiHuff compresses a single file with a Huffman code trained on that file
alone. The prefix tree travels in the stream header, so decompression needs
nothing but the .hf file itself.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o backup.hf
  oxihuff decompress notes.txt.hf
  oxihuff decompress backup.hf -o restored.txt
  oxihuff info notes.txt.hf
  oxihuff info notes.txt.hf --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output path (defaults to <input>.hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// Print sizes and compression ratio
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a .hf file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output path (defaults to <input> with the .hf suffix removed)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// Print sizes after decompressing
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show tree-header information for a .hf file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
            verbose,
        } => cmd_compress(&input, output.as_deref(), force, verbose),
        Commands::Decompress {
            input,
            output,
            force,
            verbose,
        } => cmd_decompress(&input, output.as_deref(), force, verbose),
        Commands::Info { file, json } => cmd_info(&file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn check_overwrite(output: &Path, force: bool) -> CmdResult {
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn cmd_compress(input: &Path, output: Option<&Path>, force: bool, verbose: bool) -> CmdResult {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let mut name = input.as_os_str().to_owned();
            name.push(".hf");
            PathBuf::from(name)
        }
    };
    check_overwrite(&output, force)?;

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(&output)?);
    oxihuff::compress_stream(reader, writer)?;

    if verbose {
        let in_size = std::fs::metadata(input)?.len();
        let out_size = std::fs::metadata(&output)?.len();
        let ratio = if in_size > 0 {
            out_size as f64 / in_size as f64 * 100.0
        } else {
            100.0
        };
        println!("{} -> {}", input.display(), output.display());
        println!("{} bytes -> {} bytes ({:.1}%)", in_size, out_size, ratio);
    }

    Ok(())
}

fn cmd_decompress(input: &Path, output: Option<&Path>, force: bool, verbose: bool) -> CmdResult {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => match input.extension() {
            Some(ext) if ext == "hf" => input.with_extension(""),
            _ => {
                return Err(format!(
                    "{} has no .hf suffix; specify an output with -o",
                    input.display()
                )
                .into());
            }
        },
    };
    check_overwrite(&output, force)?;

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(&output)?);
    oxihuff::decompress_stream(reader, writer)?;

    if verbose {
        let in_size = std::fs::metadata(input)?.len();
        let out_size = std::fs::metadata(&output)?.len();
        println!("{} -> {}", input.display(), output.display());
        println!("{} bytes -> {} bytes", in_size, out_size);
    }

    Ok(())
}

#[derive(Serialize)]
struct HeaderInfo {
    file: String,
    file_size: u64,
    magic: u32,
    header_bits: u64,
    symbols: usize,
    min_code_bits: usize,
    max_code_bits: usize,
}

fn cmd_info(file: &Path, json: bool) -> CmdResult {
    let metadata = std::fs::metadata(file)?;
    let mut reader = BitReader::new(BufReader::new(File::open(file)?));

    header::check_magic(&mut reader)?;
    let tree = header::read_tree(&mut reader)?;
    let codes = CodeTable::from_tree(&tree);

    let info = HeaderInfo {
        file: file.display().to_string(),
        file_size: metadata.len(),
        magic: MAGIC,
        header_bits: reader.bit_position() - 32,
        symbols: tree.leaf_count(),
        min_code_bits: codes.min_code_len().unwrap_or(0),
        max_code_bits: codes.max_code_len().unwrap_or(0),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Huffman Stream Information");
        println!("==========================");
        println!("File: {}", info.file);
        println!("Size: {} bytes", info.file_size);
        println!("Magic: {:#010x}", info.magic);
        println!("Tree header: {} bits", info.header_bits);
        println!("Symbols in tree: {}", info.symbols);
        println!(
            "Code lengths: {}..{} bits",
            info.min_code_bits, info.max_code_bits
        );
    }

    Ok(())
}
