//! # JcodeDetect CLI - Charset Detection for Unknown Text
//!
//! Command-line interface for guessing the character encoding of files or
//! piped data, covering the legacy Japanese encodings next to ASCII and
//! the Unicode transformation formats.

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;

#[cfg(feature = "cli")]
use jcode_detect::{Encoding, EncodingDetector, Score};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// JcodeDetect: structural charset detection for unknown text
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "jcode-detect")]
#[command(version, about, long_about = None)]
#[command(author = "JcodeDetect Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Detect the encoding of input data
    Detect(DetectArgs),

    /// List all supported encodings
    List(ListArgs),

    /// Check input data against one claimed encoding
    Validate(ValidateArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct DetectArgs {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Show all candidate scores, not just the winner
    #[arg(long)]
    confidence: bool,

    /// Read at most this many bytes (default: whole input). Cutting inside
    /// a multi-byte sequence lowers that encoding's score to zero.
    #[arg(long)]
    max_bytes: Option<usize>,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ListArgs {
    /// Show only ASCII-compatible encodings
    #[arg(long)]
    ascii_compatible: bool,

    /// Show only multibyte encodings
    #[arg(long)]
    multibyte: bool,

    /// Show encoding details
    #[arg(long)]
    details: bool,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ValidateArgs {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Claimed encoding
    #[arg(short, long)]
    encoding: EncodingArg,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug)]
struct EncodingArg(Encoding);

#[cfg(feature = "cli")]
impl std::str::FromStr for EncodingArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let encoding = match s.to_uppercase().as_str() {
            "ASCII" | "US-ASCII" => Encoding::ASCII,
            "JIS" | "ISO-2022-JP" | "ISO2022JP" => Encoding::JIS,
            "UTF8" | "UTF-8" => Encoding::UTF8,
            "UTF8-BOM" | "UTF-8-BOM" | "UTF8N" => Encoding::UTF8_BOM,
            "UTF16LE" | "UTF-16LE" | "UTF16" | "UTF-16" => Encoding::UTF16LE,
            "UTF16BE" | "UTF-16BE" => Encoding::UTF16BE,
            "UTF32LE" | "UTF-32LE" | "UTF32" | "UTF-32" => Encoding::UTF32LE,
            "UTF32BE" | "UTF-32BE" => Encoding::UTF32BE,
            "SJIS" | "SHIFTJIS" | "SHIFT-JIS" | "SHIFT_JIS" => Encoding::SHIFT_JIS,
            "EUCJP" | "EUC-JP" | "EUC_JP" => Encoding::EUC_JP,
            _ => anyhow::bail!("Unknown encoding: {}", s),
        };

        Ok(EncodingArg(encoding))
    }
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ValidationReport {
    encoding: String,
    score: Score,
    valid: bool,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(ref args) => detect_command(args, &cli)?,
        Commands::List(ref args) => list_command(args, &cli)?,
        Commands::Validate(ref args) => validate_command(args, &cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn read_input(input: &Option<PathBuf>, max_bytes: Option<usize>) -> Result<Vec<u8>> {
    let mut data = if let Some(path) = input {
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
    } else {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    if let Some(limit) = max_bytes {
        data.truncate(limit);
    }

    Ok(data)
}

#[cfg(feature = "cli")]
fn detect_command(args: &DetectArgs, cli: &Cli) -> Result<()> {
    let data = read_input(&args.input, args.max_bytes)?;

    if cli.verbose {
        eprintln!("Scanning {} bytes", data.len());
    }

    let result = EncodingDetector::new().detect(&data);

    match cli.format {
        OutputFormat::Json => {
            let mut candidates_json = Vec::new();
            for (encoding, score) in &result.candidates {
                candidates_json.push(serde_json::json!({
                    "encoding": encoding.name(),
                    "score": score
                }));
            }

            let report = serde_json::json!({
                "detected_encoding": result.encoding.name(),
                "confidence": result.confidence,
                "bom_detected": result.bom_detected,
                "input_size": data.len(),
                "candidates": candidates_json
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Detected encoding: {}", result.encoding.name());
            println!("Confidence: {:.1}", result.confidence);

            if result.bom_detected {
                println!("BOM detected: Yes");
            }

            println!("Input size: {} bytes", data.len());

            if args.confidence {
                println!("\nAll candidates:");
                for (encoding, score) in &result.candidates {
                    println!("  {:12} {:.1}", encoding.name(), score);
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn list_command(args: &ListArgs, cli: &Cli) -> Result<()> {
    let all_encodings = [
        (Encoding::ASCII, "US-ASCII (7-bit)"),
        (Encoding::JIS, "ISO-2022-JP with escape-sequence shifts"),
        (Encoding::UTF8, "UTF-8 Unicode"),
        (Encoding::UTF8_BOM, "UTF-8 Unicode with signature"),
        (Encoding::UTF16LE, "UTF-16 Little Endian"),
        (Encoding::UTF16BE, "UTF-16 Big Endian"),
        (Encoding::UTF32LE, "UTF-32 Little Endian"),
        (Encoding::UTF32BE, "UTF-32 Big Endian"),
        (Encoding::SHIFT_JIS, "Shift-JIS (Japanese)"),
        (Encoding::EUC_JP, "EUC-JP (Japanese)"),
    ];

    let filtered: Vec<_> = all_encodings
        .iter()
        .filter(|(encoding, _)| {
            if args.ascii_compatible && !encoding.is_ascii_compatible() {
                return false;
            }
            if args.multibyte && !encoding.is_multibyte() {
                return false;
            }
            true
        })
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let encodings_info: Vec<_> = filtered
                .iter()
                .map(|(encoding, description)| {
                    serde_json::json!({
                        "name": encoding.name(),
                        "description": description,
                        "ascii_compatible": encoding.is_ascii_compatible(),
                        "multibyte": encoding.is_multibyte(),
                        "has_bom": encoding.bom().is_some()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&encodings_info)?);
        }
        OutputFormat::Text => {
            println!("Supported Encodings ({} total):", filtered.len());
            println!();

            for (encoding, description) in filtered {
                println!("{:12} {}", encoding.name(), description);

                if args.details {
                    println!(
                        "             ASCII Compatible: {}",
                        if encoding.is_ascii_compatible() {
                            "Yes"
                        } else {
                            "No"
                        }
                    );
                    if let Some(bom) = encoding.bom() {
                        println!("             BOM: {:02X?}", bom);
                    }
                    println!();
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn validate_command(args: &ValidateArgs, cli: &Cli) -> Result<()> {
    let EncodingArg(encoding) = &args.encoding;
    let data = read_input(&args.input, None)?;

    let score = score_for(*encoding, &data);
    let valid = score > 0.0;

    match cli.format {
        OutputFormat::Json => {
            let report = ValidationReport {
                encoding: encoding.name().to_string(),
                score,
                valid,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if valid {
                println!(
                    "✓ Input is structurally valid {} (score {:.1})",
                    encoding.name(),
                    score
                );
            } else {
                println!("✗ Input is not valid {}", encoding.name());
            }
        }
    }

    if !valid {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn score_for(encoding: Encoding, data: &[u8]) -> Score {
    match encoding {
        Encoding::ASCII => jcode_detect::is_ascii(data),
        Encoding::JIS => jcode_detect::is_jis(data),
        Encoding::UTF8 => jcode_detect::is_utf8(data),
        Encoding::UTF8_BOM => jcode_detect::is_utf8_signed(data),
        Encoding::UTF16LE | Encoding::UTF16BE => jcode_detect::is_utf16(data),
        Encoding::UTF32LE | Encoding::UTF32BE => jcode_detect::is_utf32(data),
        Encoding::SHIFT_JIS => jcode_detect::is_shift_jis(data),
        Encoding::EUC_JP => jcode_detect::is_euc_jp(data),
        Encoding::UNDETERMINED => 0.0,
    }
}
