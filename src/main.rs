//! Command-line entry point: render a category JSON file as a diagram.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use inbox_diagram::{
    build_tree, read_records, read_records_file, render_diagram, render_plain_tree,
    CategoryRecord, Direction, RenderOptions, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Mermaid flowchart
    Mermaid,
    /// Indented plain-text tree
    Plain,
    /// Diagram, blank line, then plain tree
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "inbox-diagram")]
#[command(about = "Render email category hierarchies as Mermaid diagrams")]
#[command(
    long_about = "Reads a JSON array of categories (or an object with a 'categories' array) \
and prints the hierarchy as a Mermaid flowchart or an indented text tree.\n\n\
Each category needs an id and a name; parent_id links it under another category \
and email_count (or item_count) is the number of emails filed under it.\n\n\
Environment Variables:\n\
  RUST_LOG    Log filter, overrides --log-level"
)]
struct Args {
    /// JSON file with categories; reads stdin when omitted or '-'
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Mermaid)]
    format: Format,

    /// Diagram direction: top-down or left-right
    #[arg(short, long, default_value = "top-down")]
    direction: Direction,

    /// Leave email counts out of diagram labels
    #[arg(long)]
    no_counts: bool,

    /// Collapse categories deeper than this level into a summary node
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<usize>,

    /// Show totals including subcategories
    #[arg(long)]
    cumulative: bool,

    /// Hang all root categories under an Inbox node
    #[arg(long)]
    inbox: bool,

    /// Wrap the diagram in a ```mermaid code fence
    #[arg(long)]
    fence: bool,

    /// Spaces per level in the plain tree
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            direction: self.direction,
            include_counts: !self.no_counts,
            max_depth: self.max_depth,
            cumulative_counts: self.cumulative,
            inbox_root: self.inbox,
            fenced: self.fence,
            indent: self.indent,
        }
    }

    fn load_records(&self) -> Result<Vec<CategoryRecord>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => read_records_file(path),
            _ => read_records(io::stdin().lock()),
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let records = args.load_records()?;
    debug!(count = records.len(), "loaded categories");

    let options = args.render_options();
    let roots = build_tree(&records)?;

    let output = match args.format {
        Format::Mermaid => render_diagram(&roots, &options),
        Format::Plain => render_plain_tree(&roots, &options),
        Format::Both => format!(
            "{}\n\n{}",
            render_diagram(&roots, &options),
            render_plain_tree(&roots, &options)
        ),
    };
    Ok(output)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the rendered output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.category_id() {
                Some(id) => error!(category = id, "invalid category data: {}", e),
                None => error!("{}", e),
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
