use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use pick::tui::input::StdinInput;
use pick::tui::terminal::AnsiTerminal;
use pick::{OptionsInput, PromptDefaults, Select, SelectConfig};
use serde_json::Value;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "pick", about = "Choose one option with the arrow keys")]
struct Args {
    /// Question shown above the options
    prompt: String,

    /// Options to choose from; prints the chosen option's position
    #[arg(required_unless_present = "json")]
    options: Vec<String>,

    /// JSON object of label → value (or array of labels) instead of positional options
    #[arg(long, conflicts_with = "options")]
    json: Option<String>,

    /// Glyph shown before each option
    #[arg(short, long)]
    pointer: Option<String>,

    /// Highlight color: yellow, blue, green, cyan, red, magenta
    #[arg(short, long)]
    color: Option<String>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // The terminal is in raw mode while the prompt is up, so logs only go to a file
    if let Some(path) = &args.log_file {
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        match File::create(path) {
            Ok(log_file) => {
                let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
            }
            Err(e) => eprintln!("pick: cannot open log file {}: {e}", path.display()),
        }
    }

    let defaults = PromptDefaults::resolve(args.pointer.as_deref(), args.color.as_deref());

    let options = match &args.json {
        Some(text) => match OptionsInput::from_json(text) {
            Ok(options) => options,
            Err(e) => return fail(e),
        },
        None => OptionsInput::Labels(args.options.clone()),
    };

    let prompt = match Select::new(SelectConfig::new(args.prompt.clone(), options).with_defaults(&defaults)) {
        Ok(prompt) => prompt,
        Err(e) => return fail(e),
    };

    // Draw on stderr so the answer can be captured from stdout
    let mut term = AnsiTerminal::stderr();
    let mut input = StdinInput::new();
    match prompt.run(&mut term, &mut input).await {
        Ok(Some(value)) => {
            info!("Selected {}", value);
            match emit(&mut std::io::stdout().lock(), &value) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Failed to print selection: {}", e);
                    fail(format_args!("cannot print selection: {e}"))
                }
            }
        }
        Ok(None) => {
            info!("Selection cancelled");
            ExitCode::from(1)
        }
        Err(e) => fail(e),
    }
}

/// Print the chosen value and flush, so a closed stdout is reported.
fn emit(out: &mut impl Write, value: &Value) -> std::io::Result<()> {
    writeln!(out, "{}", display_value(value))?;
    out.flush()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fail(e: impl std::fmt::Display) -> ExitCode {
    eprintln!("pick: {e}");
    ExitCode::from(2)
}
