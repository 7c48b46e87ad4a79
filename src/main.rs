mod device;
mod engine;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::device::framebuffer::FrameBuffer;
use crate::device::trigger::{Immediate, LineTrigger, wait_for_trigger};
use crate::engine::InferenceEngine;
use crate::engine::dense::DenseNetwork;
use crate::input::load_input;
use crate::model::layout::{DebouncePolicy, DiagnosticPolicy, RenderLayout};
use crate::model::shape::EvalShape;
use crate::pipeline::stage3_evaluate::{Stage3Inputs, check_preconditions, run_stage3};
use crate::pipeline::stage4_render::{render_confusion, show_trigger_prompt};
use crate::pipeline::stage5_report::{Stage5Input, build_summary, write_reports};
use crate::report::text::render_report_text;

const TOOL_NAME: &str = "tinyml-evalqc";

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    if let Err(err) = logging::init_logging(config.verbose) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    if let Err(err) = run(&config) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tinyml-evalqc",
    version,
    about = "Evaluate a multi-class classifier over a labeled dataset and render its confusion matrix"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full evaluation and render the result.
    Run(RunArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TriggerMode {
    /// Start as soon as the model is ready.
    Immediate,
    /// Wait for Enter on stdin.
    Enter,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Dataset CSV (features then label per row), optionally .gz.
    #[arg(long)]
    dataset: PathBuf,
    /// JSON table with per-feature `mean` and `std`.
    #[arg(long)]
    normalization: PathBuf,
    /// JSON dense-network weights.
    #[arg(long)]
    model: PathBuf,
    /// Directory for summary.json, report.txt and display.pbm.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    features: Option<usize>,
    #[arg(long)]
    classes: Option<usize>,
    /// Abort unless the dataset has exactly this many samples.
    #[arg(long)]
    expect_samples: Option<usize>,

    #[arg(long, value_enum, default_value_t = TriggerMode::Immediate)]
    trigger: TriggerMode,
    #[arg(long)]
    debounce_ms: Option<u64>,
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Number of leading samples logged with their raw scores.
    #[arg(long)]
    diag_samples: Option<usize>,

    #[arg(long)]
    cell_w: Option<i32>,
    #[arg(long)]
    cell_h: Option<i32>,
    #[arg(long)]
    origin_x: Option<i32>,
    #[arg(long)]
    origin_y: Option<i32>,
    /// Pixels the closing bottom border is pulled up by.
    #[arg(long)]
    bottom_inset: Option<i32>,
    #[arg(long)]
    canvas_width: Option<u32>,
    #[arg(long)]
    canvas_height: Option<u32>,

    /// Print the final display frame as ASCII art after the report.
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    dataset_path: PathBuf,
    normalization_path: PathBuf,
    model_path: PathBuf,
    out_dir: Option<PathBuf>,
    shape: EvalShape,
    layout: RenderLayout,
    diagnostics: DiagnosticPolicy,
    debounce: DebouncePolicy,
    trigger: TriggerMode,
    ascii: bool,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<RunConfig, clap::Error> {
    let cli = Cli::try_parse_from(std::iter::once(TOOL_NAME.to_string()).chain(args.iter().cloned()))?;
    let Command::Run(run_args) = cli.command;

    let base_shape = EvalShape::wine_v1();
    let shape = EvalShape {
        n_features: run_args.features.unwrap_or(base_shape.n_features),
        n_classes: run_args.classes.unwrap_or(base_shape.n_classes),
        expect_samples: run_args.expect_samples.or(base_shape.expect_samples),
    };

    let base_layout = RenderLayout::ssd1306_v1();
    let layout = RenderLayout {
        canvas_width: run_args.canvas_width.unwrap_or(base_layout.canvas_width),
        canvas_height: run_args.canvas_height.unwrap_or(base_layout.canvas_height),
        cell_w: run_args.cell_w.unwrap_or(base_layout.cell_w),
        cell_h: run_args.cell_h.unwrap_or(base_layout.cell_h),
        origin_x: run_args.origin_x.unwrap_or(base_layout.origin_x),
        origin_y: run_args.origin_y.unwrap_or(base_layout.origin_y),
        bottom_inset: run_args.bottom_inset.unwrap_or(base_layout.bottom_inset),
        ..base_layout
    };

    let base_debounce = DebouncePolicy::default_v1();
    let debounce = DebouncePolicy {
        poll_interval: run_args
            .poll_ms
            .map(Duration::from_millis)
            .unwrap_or(base_debounce.poll_interval),
        debounce: run_args
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(base_debounce.debounce),
    };

    let diagnostics = DiagnosticPolicy {
        sample_lines: run_args
            .diag_samples
            .unwrap_or(DiagnosticPolicy::default_v1().sample_lines),
    };

    Ok(RunConfig {
        dataset_path: run_args.dataset,
        normalization_path: run_args.normalization,
        model_path: run_args.model,
        out_dir: run_args.out,
        shape,
        layout,
        diagnostics,
        debounce,
        trigger: run_args.trigger,
        ascii: run_args.ascii,
        verbose: cli.verbose,
    })
}

fn display_sink_path(out_dir: Option<&Path>) -> Option<PathBuf> {
    out_dir.map(|dir| dir.join("display.pbm"))
}

fn run(config: &RunConfig) -> Result<(), String> {
    tracing::info!("=== {} {} - confusion matrix ===", TOOL_NAME, env!("CARGO_PKG_VERSION"));

    config
        .layout
        .validate(config.shape.n_classes)
        .map_err(|e| format!("invalid display layout: {e}"))?;

    if let Some(out) = &config.out_dir {
        std::fs::create_dir_all(out)
            .map_err(|e| format!("cannot create output directory {}: {e}", out.display()))?;
    }

    let bundle = load_input(
        &config.dataset_path,
        &config.normalization_path,
        &config.model_path,
        &config.shape,
    )
    .map_err(|e| e.to_string())?;

    let mut engine = DenseNetwork::load(&config.model_path).map_err(|e| e.to_string())?;
    engine
        .initialize()
        .map_err(|e| e.to_string())?;

    let inputs = Stage3Inputs {
        dataset: &bundle.dataset,
        normalization: &bundle.normalization,
        shape: &config.shape,
        diagnostics: config.diagnostics,
    };
    check_preconditions(&inputs, &engine).map_err(|e| e.to_string())?;

    let mut display = FrameBuffer::new(config.layout.canvas_width, config.layout.canvas_height);
    if let Some(path) = display_sink_path(config.out_dir.as_deref()) {
        display = display.with_sink(&path);
    }

    show_trigger_prompt(&mut display).map_err(|e| e.to_string())?;
    let polls = match config.trigger {
        TriggerMode::Immediate => wait_for_trigger(&mut Immediate, &config.debounce),
        TriggerMode::Enter => {
            eprintln!("Press Enter to start inference");
            let mut trigger = LineTrigger::new(io::stdin().lock());
            wait_for_trigger(&mut trigger, &config.debounce)
        }
    };
    tracing::debug!(polls, "trigger released evaluation");

    tracing::info!(
        inputs = engine.input_width(),
        outputs = engine.output_width(),
        "model initialized"
    );
    tracing::info!(
        samples = bundle.dataset.len(),
        dataset = %bundle.dataset_path.display(),
        normalization = %bundle.normalization_path.display(),
        "running inference over dataset"
    );

    let stage3 = run_stage3(&inputs, &mut engine).map_err(|e| e.to_string())?;

    render_confusion(&mut display, &stage3.matrix, &config.layout).map_err(|e| e.to_string())?;

    let summary = build_summary(&Stage5Input {
        eval: &stage3,
        shape: &config.shape,
        n_samples: bundle.dataset.len(),
        fingerprints: Some(bundle.fingerprints),
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    });

    print!("{}", render_report_text(&summary));
    if config.ascii {
        println!();
        print!("{}", display.to_ascii());
    }

    if let Some(out) = &config.out_dir {
        write_reports(&summary, out).map_err(|e| e.to_string())?;
    }

    let (lit_pixels, frames) = (display.lit_pixels(), display.flush_count());
    tracing::debug!(lit_pixels, "final frame");
    tracing::info!(frames, "end of inference");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
