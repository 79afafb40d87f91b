mod driver;
mod error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use driver::{Script, drive};
use error::{CliError, CliResult};
use osc_core::{ParamName, Parameters, Real, Variant};
use osc_plot::{PlotConfig, PlotScene, legend_label, palette_color};
use osc_sim::{AutoFinalize, EngineConfig, SimulationEngine};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "osc-cli")]
#[command(about = "Oscillation lab - headless driver for the oscillation engine", long_about = None)]
struct Cli {
    /// Engine configuration YAML (defaults apply to missing fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print amplitude and period for a parameter set
    Info {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Run one simulation and export its samples
    Run {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        frames: FrameArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the same variant several times with one parameter swept
    Compare {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        frames: FrameArgs,
        /// Parameter to sweep (density_ratio, length, size)
        #[arg(long)]
        sweep: ParamName,
        /// Comma-separated values for the swept parameter
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<Real>,
        /// Plot canvas width used to report visible vertices
        #[arg(long, default_value_t = 800.0)]
        plot_width: Real,
    },
    /// Print the effective engine configuration as YAML
    Config,
}

#[derive(Args, Clone)]
struct ParamArgs {
    /// Experiment variant (cylinder, cubic_block)
    #[arg(long, default_value = "cylinder")]
    variant: Variant,
    /// Cylinder density over liquid density, in [0, 1)
    #[arg(long)]
    density_ratio: Option<Real>,
    /// Cylinder length
    #[arg(long)]
    length: Option<Real>,
    /// Cube size
    #[arg(long)]
    size: Option<Real>,
}

impl ParamArgs {
    fn overrides(&self) -> Vec<(ParamName, Real)> {
        [
            (ParamName::DensityRatio, self.density_ratio),
            (ParamName::Length, self.length),
            (ParamName::Size, self.size),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    fn apply(&self, engine: &mut SimulationEngine) -> CliResult<()> {
        engine.select_variant(self.variant)?;
        for (name, value) in self.overrides() {
            engine.set_parameter(name, value)?;
        }
        Ok(())
    }
}

#[derive(Args, Clone)]
struct FrameArgs {
    /// Number of clock-advancing ticks
    #[arg(long, default_value_t = 100)]
    ticks: usize,
    /// Simulated frame duration in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Pause after this many ticks
    #[arg(long)]
    pause_at: Option<usize>,
    /// Frames to stay paused
    #[arg(long, default_value_t = 0)]
    pause_frames: usize,
}

impl FrameArgs {
    fn script(&self) -> CliResult<Script> {
        if self.ticks == 0 {
            return Err(CliError::InvalidArg("--ticks must be at least 1".to_string()));
        }
        Ok(Script {
            ticks: self.ticks,
            frame: Duration::from_millis(self.frame_ms),
            pause_at: self.pause_at,
            pause_frames: self.pause_frames,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { params } => cmd_info(config, &params),
        Commands::Run {
            params,
            frames,
            format,
            output,
        } => cmd_run(config, &params, &frames, format, output.as_deref()),
        Commands::Compare {
            params,
            frames,
            sweep,
            values,
            plot_width,
        } => cmd_compare(config, &params, &frames, sweep, &values, plot_width),
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(EngineConfig::from_yaml_str(&text)?)
}

fn cmd_info(config: EngineConfig, params: &ParamArgs) -> CliResult<()> {
    let mut engine = SimulationEngine::new(config)?;
    params.apply(&mut engine)?;
    let osc = engine.oscillation();

    println!("Variant:    {}", engine.variant());
    println!("Parameters: {}", engine.parameters());
    println!("Amplitude:  {:.3}", osc.amplitude);
    println!("Period:     {:.3}", osc.period);
    println!("Step size:  {}", engine.config().step_size());
    Ok(())
}

#[derive(Serialize)]
struct RunExport<'a> {
    variant: Variant,
    parameters: &'a Parameters,
    amplitude: Real,
    period: Real,
    samples: &'a [osc_sim::WavePoint],
}

fn cmd_run(
    config: EngineConfig,
    params: &ParamArgs,
    frames: &FrameArgs,
    format: Format,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut timeout = AutoFinalize::from_config(&config);
    let mut engine = SimulationEngine::new(config)?;
    params.apply(&mut engine)?;

    let report = drive(&mut engine, &frames.script()?, timeout.as_mut())?;
    let run = match report.auto_finalized {
        Some(_) => engine.history().latest().cloned(),
        None => {
            engine.finalize();
            engine.history().latest().cloned()
        }
    };
    let Some(run) = run else {
        return Err(CliError::InvalidArg(
            "run recorded no samples; increase --ticks".to_string(),
        ));
    };

    let osc = engine.oscillation();
    let text = match format {
        Format::Csv => {
            let mut csv = String::from("time,displacement\n");
            for p in run.points() {
                csv.push_str(&format!("{},{}\n", p.time, p.displacement));
            }
            csv
        }
        Format::Json => {
            let export = RunExport {
                variant: run.variant(),
                parameters: run.parameters(),
                amplitude: osc.amplitude,
                period: osc.period,
                samples: run.points(),
            };
            let mut json = serde_json::to_string_pretty(&export)?;
            json.push('\n');
            json
        }
    };

    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!(
            "✓ Exported {} samples to {}",
            run.points().len(),
            path.display()
        );
    } else {
        print!("{}", text);
    }
    Ok(())
}

#[derive(Serialize)]
struct CompareRow {
    label: String,
    color: String,
    samples: usize,
    visible_vertices: usize,
    period: Real,
}

fn cmd_compare(
    config: EngineConfig,
    params: &ParamArgs,
    frames: &FrameArgs,
    sweep: ParamName,
    values: &[Real],
    plot_width: Real,
) -> CliResult<()> {
    if !params.variant.parameter_names().contains(&sweep) {
        return Err(CliError::InvalidArg(format!(
            "{sweep} is not a parameter of {}",
            params.variant
        )));
    }

    let plot = plot_config(plot_width)?;
    let mut timeout = AutoFinalize::from_config(&config);
    let mut engine = SimulationEngine::new(config)?;
    params.apply(&mut engine)?;

    let script = frames.script()?;
    let mut periods = Vec::with_capacity(values.len());
    for &value in values {
        engine.set_parameter(sweep, value)?;
        let period = engine.oscillation().period;
        let report = drive(&mut engine, &script, timeout.as_mut())?;
        let outcome = match report.auto_finalized {
            Some(outcome) => outcome,
            None => engine.finalize(),
        };
        if outcome.archived() {
            periods.push(period);
        }
    }

    let scene = PlotScene::build(&engine.frame(), &plot);

    // History keeps only the newest runs; align periods from the end.
    let kept = engine.history().len();
    let rows: Vec<CompareRow> = engine
        .history()
        .iter()
        .zip(scene.overlays.iter())
        .zip(periods.iter().skip(periods.len().saturating_sub(kept)))
        .map(|((run, trace), period)| CompareRow {
            label: legend_label(run.parameters()),
            color: palette_color(run.color_index()).to_hex(),
            samples: run.points().len(),
            visible_vertices: trace.vertices.len(),
            period: *period,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn plot_config(width: Real) -> CliResult<PlotConfig> {
    let plot = PlotConfig {
        width,
        ..PlotConfig::default()
    };
    plot.validate()?;
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_width_must_be_positive() {
        assert_eq!(plot_config(640.0).unwrap().width, 640.0);
        for width in [0.0, -200.0, Real::NAN, Real::INFINITY] {
            let err = plot_config(width).unwrap_err();
            assert!(matches!(
                err,
                CliError::Plot(osc_plot::PlotError::InvalidValue { field: "width", .. })
            ));
        }
    }

    #[test]
    fn parses_compare_sweep() {
        let cli = Cli::try_parse_from([
            "osc-cli",
            "compare",
            "--variant",
            "cylinder",
            "--sweep",
            "density_ratio",
            "--values",
            "0.2,0.5,0.8",
            "--ticks",
            "40",
        ])
        .unwrap();
        match cli.command {
            Commands::Compare {
                params,
                frames,
                sweep,
                values,
                ..
            } => {
                assert_eq!(params.variant, Variant::Cylinder);
                assert_eq!(sweep, ParamName::DensityRatio);
                assert_eq!(values, vec![0.2, 0.5, 0.8]);
                assert_eq!(frames.ticks, 40);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn param_overrides_apply_to_engine() {
        let params = ParamArgs {
            variant: Variant::CubicBlock,
            density_ratio: None,
            length: None,
            size: Some(20.0),
        };
        let mut engine = SimulationEngine::default();
        params.apply(&mut engine).unwrap();
        assert_eq!(engine.variant(), Variant::CubicBlock);
        assert_eq!(engine.oscillation().amplitude, 5.0);
    }

    #[test]
    fn foreign_override_rejected() {
        let params = ParamArgs {
            variant: Variant::CubicBlock,
            density_ratio: Some(0.3),
            length: None,
            size: None,
        };
        let mut engine = SimulationEngine::default();
        assert!(matches!(
            params.apply(&mut engine),
            Err(CliError::Engine(_))
        ));
    }

    #[test]
    fn zero_ticks_rejected() {
        let frames = FrameArgs {
            ticks: 0,
            frame_ms: 16,
            pause_at: None,
            pause_frames: 0,
        };
        assert!(frames.script().is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
        assert!(matches!(
            load_config(Some(Path::new("/nonexistent/osc.yaml"))),
            Err(CliError::ConfigRead { .. })
        ));
    }
}
