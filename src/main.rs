use clap::{Parser, Subcommand};
use serde_json::json;
use symcalc::{Bounds, DynamicScalar, bounds_of, evaluate_at, interpret};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Read numeric literals as exact fractions
  #[arg(long, global = true)]
  exact: bool,

  /// Print results as JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Simplify an expression and print the result
  Simplify {
    /// The expression to simplify
    expression: String,
  },
  /// Evaluate an expression at a value of x
  Eval {
    /// The expression to evaluate
    expression: String,
    /// Value substituted for x
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    at: f64,
  },
  /// Print the interval an expression's value is known to lie in
  Bounds {
    /// The expression to bound
    expression: String,
  },
}

fn value_json(value: &DynamicScalar) -> serde_json::Value {
  json!({ "kind": value.kind().to_string(), "value": value.to_string() })
}

fn bounds_json(bounds: &Bounds) -> serde_json::Value {
  json!({ "min": value_json(&bounds.min), "max": value_json(&bounds.max) })
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  match cli.command {
    Commands::Simplify { expression } => {
      let result = interpret(&expression, cli.exact)?;
      if cli.json {
        println!("{}", json!({ "input": expression, "result": result }));
      } else {
        println!("{result}");
      }
    }
    Commands::Eval { expression, at } => {
      let value = evaluate_at(&expression, cli.exact, at)?;
      if cli.json {
        println!(
          "{}",
          json!({ "input": expression, "at": at, "result": value_json(&value) })
        );
      } else {
        println!("{value}");
      }
    }
    Commands::Bounds { expression } => {
      let bounds = bounds_of(&expression, cli.exact)?;
      if cli.json {
        println!(
          "{}",
          json!({ "input": expression, "bounds": bounds_json(&bounds) })
        );
      } else {
        println!("[{}, {}]", bounds.min, bounds.max);
      }
    }
  }

  Ok(())
}
