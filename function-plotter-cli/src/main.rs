use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use function_plotter::integration::area;
use function_plotter::interpreter::function::Function;
use function_plotter::interpreter::parser::{Chaining, ParseOptions};
use function_plotter::sampling::SampleGrid;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Calculates the area under a function of x, and samples it for plotting
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, e.g. "sin(x) + 3*x". Asked for when left out
    expression: Option<String>,

    /// Lower limit of the area
    #[clap(long, allow_hyphen_values = true)]
    lower: Option<f64>,

    /// Upper limit of the area
    #[clap(long, allow_hyphen_values = true)]
    upper: Option<f64>,

    /// Number of rectangles the area is approximated with
    #[clap(long)]
    divisions: Option<u32>,

    /// Fold chained operators such as "1 + 2 + 3" instead of reading only the first one
    #[clap(long)]
    left_associative: bool,

    /// Print the parsed expression tree
    #[clap(long)]
    tree: bool,

    /// Print the points of the graph as "x,y" lines
    #[clap(long)]
    samples: bool,

    /// Number of points sampled for the graph
    #[clap(long, default_value_t = 9000)]
    points: usize,

    /// Distance between sampled points
    #[clap(long, default_value_t = 0.1)]
    interval: f64,

    #[clap(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut input = io::stdin().lock();
    let expression = match args.expression {
        Some(expression) => expression,
        None => prompt(&mut input, "y = ")?,
    };

    let options = ParseOptions {
        chaining: if args.left_associative {
            Chaining::LeftAssociative
        } else {
            Chaining::SingleOperator
        },
    };
    let function = Function::new(&expression, options);
    for warning in function.warnings() {
        warn!("{}", warning);
    }
    info!("understood as {}", function.infix()?);
    if args.tree {
        println!("{}", function.tree());
    }

    println!("For f(x) = {}:", expression);
    let lower = value_or_prompt(args.lower, &mut input, "Lower limit: ")?;
    let upper = value_or_prompt(args.upper, &mut input, "Upper limit: ")?;
    let divisions = value_or_prompt(args.divisions, &mut input, "Number of divisions: ")?;
    let area = area(divisions, lower, upper, |x| function.evaluate(x))
        .with_context(|| format!("Could not calculate the area of {}", expression))?;
    println!("Area (rectangle method): {}", area);

    if args.samples {
        let grid = SampleGrid {
            points: args.points,
            interval: args.interval,
        };
        print_samples(&grid, &function).context("Failed to write the sampled points")?;
    }
    Ok(())
}

fn print_samples(grid: &SampleGrid, function: &Function) -> io::Result<()> {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    for point in grid.sample(|x| function.evaluate(x)) {
        writeln!(output, "{},{}", point.x, point.y)?;
    }
    output.flush()
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("Failed to write the prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("Failed to read an answer to '{}'", message.trim()))?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn value_or_prompt<T>(value: Option<T>, input: &mut impl BufRead, message: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(value) = value {
        return Ok(value);
    }
    let answer = prompt(input, message)?;
    answer
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid answer to '{}'", answer, message.trim()))
}
