//! Pixveil - Hide encrypted payloads in pixel noise
//!
//! CLI for embedding a text payload in an image's pixel LSBs, sealed for a
//! single receiver with hybrid P-256 + AES-128-GCM encryption.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use pixveil::crypto::keys::{generate_key_pair, load_key, save_key_pair};
use pixveil::stego::CoverImage;
use pixveil::{hide, reveal};

/// Pixveil - Hide encrypted payloads in pixel noise
///
/// Hides a message in the least significant bits of an image so that only the
/// holder of the matching private key can locate and recover it.
#[derive(Parser)]
#[command(name = "pixveil")]
#[command(version)]
#[command(about = "Hide encrypted payloads in the pixel noise of lossless images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a P-256 key pair (creates .key and .pub PEM files)
    Keygen {
        /// Output base path for the key files
        #[arg(short, long, default_value = "pixveil")]
        output: PathBuf,
    },

    /// Hide a message in an image for a receiver
    Hide {
        /// Path to the receiver's public key (PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Text to hide (mutually exclusive with --text-file)
        #[arg(short, long, conflicts_with = "text_file")]
        text: Option<String>,

        /// File whose contents to hide (mutually exclusive with --text)
        #[arg(short = 'f', long, conflicts_with = "text")]
        text_file: Option<PathBuf>,

        /// Path to the input image (lossless format)
        #[arg(short, long)]
        image: PathBuf,

        /// Path for the output image
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },

    /// Recover a hidden message from an image
    Reveal {
        /// Path to your private key (PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Path to the image carrying hidden data
        #[arg(short, long)]
        image: PathBuf,

        /// Write the recovered payload to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { output } => keygen_cmd(&output),
        Commands::Hide {
            key,
            text,
            text_file,
            image,
            output,
        } => hide_cmd(&key, text, text_file.as_deref(), &image, &output),
        Commands::Reveal { key, image, output } => reveal_cmd(&key, &image, output.as_deref()),
    }
}

fn keygen_cmd(output: &PathBuf) -> Result<()> {
    let (secret, public) = generate_key_pair();
    save_key_pair(&secret, &public, output).context("Could not save key pair")?;

    println!("Private key: {}", output.with_extension("key").display());
    println!("Public key:  {}", output.with_extension("pub").display());
    Ok(())
}

fn hide_cmd(
    key: &PathBuf,
    text: Option<String>,
    text_file: Option<&std::path::Path>,
    image_path: &PathBuf,
    output: &PathBuf,
) -> Result<()> {
    let payload = match (text, text_file) {
        (Some(text), None) => text.into_bytes(),
        (None, Some(path)) => {
            fs::read(path).with_context(|| format!("Could not read {}", path.display()))?
        }
        _ => bail!("Provide the payload with either --text or --text-file"),
    };

    let mut image = CoverImage::from_file(image_path)
        .with_context(|| format!("Could not load image {}", image_path.display()))?;

    let receiver_public = load_key(key)
        .with_context(|| format!("Could not load key {}", key.display()))?
        .into_public()
        .context("Hiding requires the receiver's PUBLIC key")?;

    hide(&mut image, &receiver_public, &payload).context("Hide failed")?;

    image
        .save(output)
        .with_context(|| format!("Could not save {}", output.display()))?;

    println!("Hidden {} payload bytes in {}", payload.len(), output.display());
    Ok(())
}

fn reveal_cmd(key: &PathBuf, image_path: &PathBuf, output: Option<&std::path::Path>) -> Result<()> {
    let image = CoverImage::from_file(image_path)
        .with_context(|| format!("Could not load image {}", image_path.display()))?;

    let receiver_secret = load_key(key)
        .with_context(|| format!("Could not load key {}", key.display()))?
        .into_private()
        .context("Revealing requires YOUR PRIVATE key")?;

    let payload = reveal(&image, &receiver_secret).context("Reveal failed")?;

    match output {
        Some(path) => {
            fs::write(path, &payload)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("Wrote {} payload bytes to {}", payload.len(), path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&payload)),
    }

    Ok(())
}
