use chromagrid::detector::marker::MarkerDetector;
use chromagrid::encoder::render_symbol;
use chromagrid::models::grid::CANONICAL_PADDING;
use chromagrid::tools::{load_rgb, marker_mask_stats, save_rgb};
use chromagrid::{Decoder, DecoderConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chromagrid", version, about = "Color grid barcode tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the symbol in an image
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Skip marker detection; the symbol must be axis-aligned
        #[arg(long)]
        aligned: bool,
    },
    /// Render text as a symbol image
    Render {
        #[arg(long)]
        text: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 10)]
        cell_px: u32,
    },
    /// Print marker mask coverage and detected markers for an image
    Detect {
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DecoderConfig::from_env();

    let result = match cli.command {
        Command::Decode { image, aligned } => decode_cmd(&image, aligned, config),
        Command::Render { text, out, cell_px } => render_cmd(&text, &out, cell_px),
        Command::Detect { image } => detect_cmd(&image, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("!! {}", message);
            ExitCode::FAILURE
        }
    }
}

fn decode_cmd(image: &Path, aligned: bool, config: DecoderConfig) -> Result<(), String> {
    let rgb = load_rgb(image).map_err(|e| format!("could not open {}: {}", image.display(), e))?;
    let decoder = Decoder::with_config(config);
    let result = if aligned {
        decoder.decode_aligned(&rgb)
    } else {
        decoder.decode(&rgb)
    };
    let decoded = result.map_err(|e| format!("could not decode {}: {}", image.display(), e))?;

    println!("{}", decoded.trim_end());
    Ok(())
}

fn render_cmd(text: &str, out: &Path, cell_px: u32) -> Result<(), String> {
    let padding = CANONICAL_PADDING * cell_px.max(1) / 10;
    let symbol = render_symbol(text, cell_px, padding).map_err(|e| e.to_string())?;
    save_rgb(&symbol, out).map_err(|e| format!("could not write {}: {}", out.display(), e))?;
    println!(
        "Wrote {} ({}x{})",
        out.display(),
        symbol.width(),
        symbol.height()
    );
    Ok(())
}

fn detect_cmd(image: &Path, config: &DecoderConfig) -> Result<(), String> {
    let rgb = load_rgb(image).map_err(|e| format!("could not open {}: {}", image.display(), e))?;
    println!("Image: {} ({}x{})", image.display(), rgb.width(), rgb.height());

    let stats = marker_mask_stats(&rgb, &config.marker);
    println!(
        "Marker mask: {} of {} pixels ({:.2}%)",
        stats.marker_pixels,
        stats.total_pixels,
        stats.marker_ratio * 100.0
    );

    let markers = MarkerDetector::detect(&rgb, &config.marker);
    println!("Found {} markers", markers.len());
    for (i, m) in markers.iter().enumerate() {
        println!(
            "  Marker {}: center=({:.1}, {:.1}), radius={:.1}",
            i, m.center.x, m.center.y, m.radius
        );
    }
    Ok(())
}
