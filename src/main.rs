use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use env_logger::Env;
use log::{debug, LevelFilter};
use polyeq::utils::collect_expressions;
use polyeq::{parse, Comparison, PolyError, DEFAULT_EPSILON};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
  ArgGroup::new("comparison").args(["epsilon", "decimal", "exact"])
))]
struct Cli {
  /// First expression (read from the file or stdin when missing)
  first: Option<String>,

  /// Second expression
  second: Option<String>,

  /// Largest coefficient difference still counted as equal
  #[arg(short, long, value_name = "EPS")]
  epsilon: Option<f64>,

  /// Compare up to N decimal digits (epsilon = 10^-N)
  #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
  decimal: Option<i32>,

  /// Require coefficients to match exactly
  #[arg(short = 'm', long = "match")]
  exact: bool,

  /// Print why an expression was rejected
  #[arg(short, long)]
  specific: bool,

  /// Read expressions from FILE, one per line
  #[arg(short, long, value_name = "FILE")]
  file: Option<PathBuf>,

  /// Log every compilation stage
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn comparison(&self) -> Comparison {
    if self.exact {
      Comparison::Exact
    } else if let Some(digits) = self.decimal {
      Comparison::from_decimal_digits(digits)
    } else {
      Comparison::Epsilon(self.epsilon.unwrap_or(DEFAULT_EPSILON))
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let mut logger =
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
  if cli.verbose {
    logger.filter_level(LevelFilter::Debug);
  }
  logger.init();

  match run(&cli) {
    Ok(code) => code,
    Err(error) => {
      eprintln!("Error: {error:#}");
      ExitCode::from(1)
    }
  }
}

/// Exit code for a rejected expression: 3/4 for the first, 5/6 for the
/// second, syntax before value.
fn rejected(ordinal: usize, error: &PolyError, specific: bool) -> ExitCode {
  let (name, base) = if ordinal == 0 {
    ("first", 3)
  } else {
    ("second", 5)
  };
  eprintln!("Error in {name} expression.");
  if specific {
    eprintln!("{error}");
  }
  ExitCode::from(base + u8::from(error.is_value()))
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
  let mut expressions: Vec<String> =
    [&cli.first, &cli.second].into_iter().flatten().cloned().collect();

  if expressions.len() < 2 {
    if let Some(path) = &cli.file {
      let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
      collect_expressions(BufReader::new(file), &mut expressions, 2)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    }
  }
  if expressions.len() < 2 {
    collect_expressions(io::stdin().lock(), &mut expressions, 2)
      .context("Failed to read standard input")?;
  }

  match expressions.len() {
    0 => {
      eprintln!("There are no expressions to compare.");
      return Ok(ExitCode::from(1));
    }
    1 => {
      eprintln!("There is no second expression to compare with.");
      return Ok(ExitCode::from(1));
    }
    _ => {}
  }

  let mut polynomials = Vec::with_capacity(2);
  for (ordinal, expression) in expressions.iter().enumerate() {
    match parse(expression) {
      Ok(polynomial) => {
        debug!("expression {}: {}", ordinal + 1, polynomial);
        polynomials.push(polynomial);
      }
      Err(error) => return Ok(rejected(ordinal, &error, cli.specific)),
    }
  }

  let comparison = cli.comparison();
  debug!("comparing with {:?}", comparison);
  if polynomials[0].compare(&polynomials[1], comparison) {
    println!("Polynomials are equal.");
    Ok(ExitCode::SUCCESS)
  } else {
    println!("Polynomials are not equal.");
    Ok(ExitCode::from(1))
  }
}
