use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};

use algotrace::benchmark::{self, group_series};
use algotrace::complexity::{self, Complexity};
use algotrace::config::{
    DEFAULT_ARRAY_SIZE, DEFAULT_BENCH_INITIAL_SIZE, DEFAULT_BENCH_RUNS,
    DEFAULT_BENCH_SIZE_INCREMENT, DEFAULT_SECONDS_PER_STEP, DEFAULT_SEED,
};
use algotrace::ingest;
use algotrace::render::TerminalRenderer;
use algotrace::{
    record, Algorithm, BenchmarkConfig, PivotStrategy, PlaybackCommand, PlaybackController,
    Trace, TraceConfig,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Record, replay and benchmark traces of sorting and searching algorithms.
#[derive(Parser)]
#[command(name = "algotrace", version)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TraceArgs {
    /// merge, quick or binary.
    #[arg(short, long, default_value = "merge")]
    algorithm: Algorithm,

    /// Length of the random input array.
    #[arg(short = 'n', long, default_value_t = DEFAULT_ARRAY_SIZE)]
    size: usize,

    #[arg(long, env = "ALGOTRACE_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Comma-separated input instead of a random array.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Option<Vec<i64>>,

    /// Search target (default: an element of the input).
    #[arg(short, long, allow_hyphen_values = true)]
    target: Option<i64>,

    /// Pick quick sort pivots at random (seeded) instead of the last element.
    #[arg(long)]
    random_pivot: bool,
}

impl TraceArgs {
    fn config(&self) -> TraceConfig {
        TraceConfig {
            algorithm: self.algorithm,
            size: self.size,
            seed: self.seed,
            pivot: if self.random_pivot {
                PivotStrategy::Random { seed: self.seed }
            } else {
                PivotStrategy::Last
            },
            target: self.target,
        }
    }

    fn record(&self) -> Result<Trace, Box<dyn Error>> {
        let mut config = self.config();
        let input = match &self.values {
            Some(values) => values.clone(),
            None => config.input(),
        };
        config.size = input.len();
        if config.algorithm.is_search() && config.target.is_none() {
            config.target = input.get(input.len() / 3).copied();
        }
        info!("input: {input:?}");
        Ok(record(&config, &input)?)
    }
}

#[derive(Args)]
struct ViewArgs {
    /// Seconds per step during playback.
    #[arg(short, long, default_value_t = DEFAULT_SECONDS_PER_STEP)]
    rate: f64,

    #[arg(long)]
    no_color: bool,

    #[arg(long)]
    no_pseudocode: bool,
}

impl ViewArgs {
    fn renderer(&self) -> TerminalRenderer {
        TerminalRenderer {
            color: !self.no_color,
            pseudocode: !self.no_pseudocode,
            ..TerminalRenderer::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record a trace and play it back at a fixed rate.
    Animate {
        #[command(flatten)]
        trace: TraceArgs,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Record a trace and navigate it from stdin (n, b, seek <i>, rate <s>, p, q).
    Step {
        #[command(flatten)]
        trace: TraceArgs,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Record a trace and write it as JSON.
    Export {
        #[command(flatten)]
        trace: TraceArgs,
        #[arg(short, long, default_value = "trace.json")]
        output: PathBuf,
    },
    /// Play back a trace previously written by `export`.
    Replay {
        input: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Time every algorithm on best, average and worst inputs.
    Bench {
        #[arg(long, default_value_t = DEFAULT_BENCH_RUNS)]
        runs: usize,
        #[arg(long, default_value_t = DEFAULT_BENCH_INITIAL_SIZE)]
        initial_size: usize,
        #[arg(long, default_value_t = DEFAULT_BENCH_SIZE_INCREMENT)]
        increment: usize,
        #[arg(long, env = "ALGOTRACE_SEED", default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// .json (trace events) or .csv
        #[arg(short, long, default_value = "results.json")]
        output: PathBuf,
    },
    /// Flatten trace-event JSON into CSV.
    Convert { input: PathBuf, output: PathBuf },
    /// Compare benchmark results against theoretical growth curves.
    Report { input: PathBuf },
    /// Print f(n) for the common complexity classes.
    Growth {
        #[arg(long, default_value_t = 20)]
        max_n: usize,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Animate { trace, view } => {
            let mut controller = controller_for(trace.record()?, &view)?;
            autoplay(&mut controller, &view.renderer())?;
        }
        Commands::Step { trace, view } => {
            let mut controller = controller_for(trace.record()?, &view)?;
            interactive(&mut controller, &view.renderer())?;
        }
        Commands::Export { trace, output } => {
            let trace = trace.record()?;
            let mut writer = BufWriter::new(File::create(&output)?);
            serde_json::to_writer_pretty(&mut writer, &trace)?;
            writer.flush()?;
            println!("wrote {} steps to {}", trace.len(), output.display());
        }
        Commands::Replay { input, view } => {
            let trace: Trace = serde_json::from_reader(BufReader::new(File::open(&input)?))?;
            let mut controller = controller_for(trace, &view)?;
            autoplay(&mut controller, &view.renderer())?;
        }
        Commands::Bench {
            runs,
            initial_size,
            increment,
            seed,
            output,
        } => {
            let config = BenchmarkConfig {
                runs,
                initial_size,
                size_increment: increment,
                seed,
            };
            let records = benchmark::run(&config);
            ingest::save(&output, &records)?;
            println!("wrote {} results to {}", records.len(), output.display());
        }
        Commands::Convert { input, output } => {
            let rows = ingest::convert(&input, &output)?;
            println!("CSV file '{}' has been created ({rows} rows).", output.display());
        }
        Commands::Report { input } => report(&input)?,
        Commands::Growth { max_n } => growth(max_n),
    }
    Ok(())
}

fn controller_for(trace: Trace, view: &ViewArgs) -> Result<PlaybackController, Box<dyn Error>> {
    let mut controller = PlaybackController::new(trace);
    controller.apply(PlaybackCommand::SetRate(view.rate))?;
    Ok(controller)
}

fn draw(controller: &PlaybackController, renderer: &TerminalRenderer) {
    let trace = controller.trace();
    match controller.current() {
        Some(step) => {
            let frame = renderer.render(trace.algorithm(), step, controller.position(), trace.len());
            if renderer.color {
                print!("{CLEAR_SCREEN}");
            }
            print!("{frame}");
        }
        None => println!("{}: the trace is empty", trace.algorithm()),
    }
}

/// The external scheduler: draw, wait one interval, tick, until playback stops.
fn autoplay(controller: &mut PlaybackController, renderer: &TerminalRenderer) -> io::Result<()> {
    controller.play();
    loop {
        draw(controller, renderer);
        io::stdout().flush()?;
        if !controller.is_playing() {
            break;
        }
        thread::sleep(controller.interval());
        controller.tick();
    }
    Ok(())
}

fn interactive(controller: &mut PlaybackController, renderer: &TerminalRenderer) -> io::Result<()> {
    draw(controller, renderer);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == "q" || line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match line.parse::<PlaybackCommand>() {
            Ok(command) => {
                if let Err(err) = controller.apply(command) {
                    eprintln!("{err}");
                    continue;
                }
            }
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        }
        if controller.is_playing() {
            autoplay(controller, renderer)?;
        } else {
            draw(controller, renderer);
        }
    }
    Ok(())
}

fn report(input: &Path) -> Result<(), Box<dyn Error>> {
    let records = ingest::load(input)?;
    if records.is_empty() {
        warn!("{} holds no benchmark results", input.display());
        return Ok(());
    }
    for ((algorithm, case), points) in group_series(&records) {
        println!("{algorithm} ({case}): {} sizes", points.len());
        if let Some(best) = complexity::best_fit(&points) {
            println!(
                "  best fit  {:<14} scale {:.3e}  error {:.3}",
                best.complexity.to_string(),
                best.scale,
                best.relative_error
            );
        }
        let expected = algorithm
            .parse::<Algorithm>()
            .ok()
            .map(|a| a.expected_complexity(case));
        if let Some(fit) = expected.and_then(|c| complexity::fit(&points, c)) {
            println!(
                "  expected  {:<14} scale {:.3e}  error {:.3}",
                fit.complexity.to_string(),
                fit.scale,
                fit.relative_error
            );
        }
        for (size, duration) in points {
            println!("  {size:>10} {duration:>14.1} us");
        }
    }
    Ok(())
}

fn growth(max_n: usize) {
    print!("{:>4}", "n");
    for class in Complexity::ALL {
        print!(" {:>12}", class.label());
    }
    println!();
    for (n, values) in complexity::growth_table(max_n) {
        print!("{n:>4}");
        for value in values {
            print!(" {value:>12.4e}");
        }
        println!();
    }
}
