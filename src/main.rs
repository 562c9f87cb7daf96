use std::{
    collections::HashMap,
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use expreval::{
    interpreter::{
        engine::{Collection, Engine},
        variable::Variable,
    },
    shell::{
        console::{Console, ShellConfig},
        line_reader::LineInput,
        terminal::Terminal,
    },
    util::num::format_significant,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// expreval evaluates arithmetic expressions with single letter variables.
///
/// Without `--expression` it starts an interactive shell that asks for an
/// expression and then for variable values, any number of times.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates this expression once and exits.
    #[arg(short, long)]
    expression: Option<String>,

    /// Assigns a variable for `--expression`, as `NAME=VALUE`. Variables
    /// without an assignment are 0.
    #[arg(short = 'D', long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    vars: Vec<(char, f64)>,

    /// Significant digits of printed results.
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=17))]
    precision: u8,

    /// Skips the banner of the interactive shell.
    #[arg(short, long)]
    quiet: bool,

    /// Logs more; repeat for trace output. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let precision = usize::from(args.precision);
    match args.expression {
        Some(expression) => evaluate_once(&expression, &args.vars, precision),
        None => {
            let config = ShellConfig { precision,
                                       banner: !args.quiet };
            let result = if io::stdin().is_terminal() {
                Terminal::new().and_then(|terminal| run_shell(terminal, config))
            } else {
                run_shell(io::stdin().lock(), config)
            };
            if let Err(e) = result {
                eprintln!("I/O error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        },
    }
}

fn run_shell<I: LineInput>(input: I, config: ShellConfig) -> io::Result<()> {
    Console::new(input, io::stdout().lock(), config).run()
}

fn evaluate_once(expression: &str, vars: &[(char, f64)], precision: usize) -> ExitCode {
    let mut engine = Engine::new();
    if let Err(e) = engine.load(expression) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    for (name, _) in vars {
        if engine.variable(*name).is_none() {
            warn!(variable = %name, "assigned variable is not used by the expression");
        }
    }

    let mut values: HashMap<char, f64> = vars.iter().copied().collect();
    if engine.collect_variables(&mut values) == Collection::Cancelled {
        return ExitCode::FAILURE;
    }

    match engine.evaluate() {
        Ok(value) => {
            println!("{}", format_significant(value, precision));
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Parses a `NAME=VALUE` assignment.
fn parse_assignment(text: &str) -> Result<(char, f64), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected NAME=VALUE, found '{text}'"))?;

    let mut chars = name.trim().chars();
    let (Some(name), None) = (chars.next(), chars.next()) else {
        return Err(format!("'{name}' is not a single letter variable name"));
    };

    let mut variable = Variable::new(name).map_err(|e| e.to_string())?;
    variable.parse_value(value)
            .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((variable.name(), variable.value()))
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(true)
                             .with_writer(io::stderr)
                             .init();
}
