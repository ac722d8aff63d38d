use anyhow::Context;
use clap::Parser;
use gcodeview::report::{format_table, pick, CheckOutput, Summary};
use gcodeview::{
    format_gcode, init_logging, read_program, render_svg, session_config, Config, EditorSession,
    ScreenPoint, BUILD_DATE, VERSION,
};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gcodeview",
    version,
    about = "Inspect G-code motion: nodes, overlap clusters, duplicates and motion rows",
    long_about = "Reads a G-code program, tracks every absolute G0/G1 move and projects the \
                  resulting nodes to a 2D canvas. Without options a short summary is printed."
)]
struct Cli {
    /// G-code program to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Configuration file (.toml or .json); defaults to the user config directory
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report moves that revisit an earlier position
    #[arg(long)]
    check: bool,

    /// Print the motion rows
    #[arg(long)]
    table: bool,

    /// Print the normalised program
    #[arg(long)]
    format: bool,

    /// Write the projected scene as SVG
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Resolve a click at a canvas point and print the selected line
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pick: Option<Vec<f64>>,
}

fn emit<T: Serialize + Display>(value: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!("gcodeview {} (built {})", VERSION, BUILD_DATE);

    let config = Config::load_or_default(cli.config.as_deref()).context("Loading configuration")?;
    let text = read_program(&cli.file)?;
    let mut session = EditorSession::with_text(session_config(&config), &text);

    let mut printed = false;

    if cli.check {
        emit(&CheckOutput::from(session.check()), cli.json)?;
        printed = true;
    }

    if cli.table {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(session.table().rows())?);
        } else {
            println!("{}", format_table(session.table().rows()));
        }
        printed = true;
    }

    if cli.format {
        let formatted = format_gcode(&text);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&formatted)?);
        } else {
            println!("{}", formatted);
        }
        printed = true;
    }

    if let Some(&[x, y]) = cli.pick.as_deref() {
        emit(&pick(&mut session, ScreenPoint::new(x, y)), cli.json)?;
        printed = true;
    }

    if let Some(path) = &cli.svg {
        let view = &config.view;
        let svg = render_svg(
            &session.analysis().projection,
            view.canvas_width,
            view.canvas_height,
        );
        std::fs::write(path, svg).with_context(|| format!("Writing {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    if !printed {
        let summary = Summary::of(session.analysis(), session.buffer().len_lines());
        emit(&summary, cli.json)?;
    }

    Ok(())
}
