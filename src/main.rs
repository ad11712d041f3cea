use anyhow::{ensure, Context, Result};
use chromakey::composite;
use chromakey::input::{FileSource, ImageSource};
use chromakey::keying::{self, Mask, MaskStrategy, SquareImage};
use chromakey::output::{FileSink, OutputSink};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chroma-key an image against a background using two masking methods", long_about = None)]
struct Args {
    /// Input image whose border color is keyed out
    input: PathBuf,

    /// Image substituted wherever the input is classified as background
    background: PathBuf,

    /// Distance from the key color above which a pixel is kept (fixed method)
    #[arg(allow_negative_numbers = true)]
    threshold: f64,

    /// Output of the fixed-threshold method
    output_fixed: PathBuf,

    /// Output of the automatic-threshold method
    output_auto: PathBuf,

    /// Side length both input images must have
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Also write each mask as a black and white image into this directory
    #[arg(long)]
    mask_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Chroma key starting");
    tracing::info!("Expected size: {}x{}", args.size, args.size);
    tracing::info!("Fixed threshold: {}", args.threshold);

    let mut foreground_source = FileSource::new(&args.input, args.size);
    let mut background_source = FileSource::new(&args.background, args.size);
    let strategies = keying::create_strategies(args.threshold);
    let mut sinks: Vec<Box<dyn OutputSink>> = vec![
        Box::new(FileSink::new(&args.output_fixed)),
        Box::new(FileSink::new(&args.output_auto)),
    ];

    run(
        &mut foreground_source,
        &mut background_source,
        &strategies,
        &mut sinks,
        args.mask_dir.as_deref(),
    )?;

    tracing::info!("Done");
    Ok(())
}

/// Decode both images, then run each strategy against its sink in order.
/// Stops at the first failure; later strategies are never run.
fn run(
    foreground_source: &mut dyn ImageSource,
    background_source: &mut dyn ImageSource,
    strategies: &[Box<dyn MaskStrategy>],
    sinks: &mut [Box<dyn OutputSink>],
    mask_dir: Option<&Path>,
) -> Result<()> {
    ensure!(
        strategies.len() == sinks.len(),
        "{} strategies but {} outputs",
        strategies.len(),
        sinks.len()
    );

    let foreground = foreground_source.load()?;
    let background = background_source.load()?;

    for (strategy, sink) in strategies.iter().zip(sinks.iter_mut()) {
        run_strategy(
            &**strategy,
            &foreground,
            &background,
            &mut **sink,
            mask_dir,
        )?;
    }

    Ok(())
}

fn run_strategy<O>(
    strategy: &dyn MaskStrategy,
    foreground: &SquareImage,
    background: &SquareImage,
    output: &mut O,
    mask_dir: Option<&Path>,
) -> Result<()>
where
    O: OutputSink + ?Sized,
{
    let mask_start = Instant::now();
    let mask = strategy.generate(foreground);
    let mask_time = mask_start.elapsed();

    let replace_start = Instant::now();
    let composited = composite::replace(&mask, foreground, background);
    let replace_time = replace_start.elapsed();

    let total = mask.side() as usize * mask.side() as usize;
    tracing::info!(
        "{}: {} of {} pixels foreground, mask={:.1}ms, replace={:.1}ms",
        strategy.name(),
        mask.foreground_count(),
        total,
        mask_time.as_secs_f64() * 1000.0,
        replace_time.as_secs_f64() * 1000.0
    );

    if let Some(dir) = mask_dir {
        save_mask(&mask, dir, strategy.name())?;
    }

    output
        .write_image(&composited)
        .with_context(|| format!("Failed to write {} result", strategy.name()))?;

    Ok(())
}

fn save_mask(mask: &Mask, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(format!("{name}-mask.png"));
    tracing::debug!("Saving mask to {}", path.display());

    mask.to_rgb()
        .save(&path)
        .with_context(|| format!("Failed to save mask to {}", path.display()))?;

    Ok(())
}
