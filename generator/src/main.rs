use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::VisualizationModel;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::TableConfig;
use workflow::runner::Runner;

mod emitter;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Sine LUT generation driver for DAC firmware tables")]
struct Args {
    /// Load a table config from YAML instead of the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Samples per period
    #[arg(long, default_value_t = 1024)]
    length: usize,
    /// Sine amplitude in volts
    #[arg(long, default_value_t = 0.9)]
    amplitude: f64,
    /// DC offset in volts
    #[arg(long, default_value_t = 1.0)]
    dc_offset: f64,
    /// Starting phase in radians
    #[arg(long, default_value_t = 0.0)]
    phase: f64,
    /// DAC full-scale reference voltage
    #[arg(long, default_value_t = 2.5)]
    full_scale: f64,
    /// DAC resolution in bits
    #[arg(long, default_value_t = 12)]
    resolution_bits: u8,
    /// Where the generated C source lands
    #[arg(long, default_value = "sin_lut.txt")]
    output: PathBuf,
    /// Treat validation findings as errors instead of warnings
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Keep the GUI bridge alive for the visualizer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table_config = if let Some(path) = args.config {
        TableConfig::load(path)?
    } else {
        TableConfig::from_args(
            args.length,
            args.amplitude,
            args.dc_offset,
            args.phase,
            args.full_scale,
            args.resolution_bits,
        )
    };

    let runner = Runner::new(table_config, args.strict);
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    let artifact = runner.execute()?;
    emitter::c_source::write_source(&args.output, &artifact.spec, &artifact.trace.codes)?;

    println!(
        "Rendered {} codes ({} bytes) -> {}",
        artifact.trace.codes.len(),
        artifact.width.bytes() * artifact.trace.codes.len(),
        args.output.display()
    );
    for note in &artifact.notes {
        println!("note: {}", note);
    }

    gui_bridge.publish(&VisualizationModel::from_artifact(&artifact))?;
    gui_bridge.publish_status("LUT ready.");

    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
