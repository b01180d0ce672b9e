//! msgextract CLI - write each CSV message to its own file, per category
//!
//! ```bash
//! msgextract extract inbox.csv      # Preview, then extract next to inbox.csv
//! msgextract extract                # Ask for the CSV path on the terminal
//! msgextract preview inbox.csv      # Load and validate only
//! ```

use clap::{Args, Parser, Subcommand};
use msgextract::{
    extract_csv, load_csv, logs::LOG_BROADCASTER, render_table, CategoryPolicy, ExtractOptions,
    PreviewOptions,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "msgextract")]
#[command(about = "Extract CSV messages into one text file per message, grouped by category", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only print results, not progress
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV, show it, and write every message to Extracted_Messages/<category>/
    Extract {
        /// Input CSV file (prompted for if omitted)
        input: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,

        /// Don't print the table before extracting
        #[arg(long)]
        no_preview: bool,

        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Load and validate a CSV without writing anything
    Preview {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        options: OptionArgs,

        /// Print the normalized table as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// JSON options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Output directory name, created next to the input file
    #[arg(long)]
    output_dir_name: Option<String>,

    /// Make category folder names filesystem-safe
    #[arg(long)]
    sanitize: bool,

    /// Number of rows shown in the preview
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Preview column width in characters
    #[arg(long)]
    column_width: Option<usize>,
}

impl OptionArgs {
    /// Defaults, then the config file, then flags.
    fn resolve(self) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
        let mut options = match self.config {
            Some(ref path) => ExtractOptions::from_json_file(path)?,
            None => ExtractOptions::default(),
        };

        if let Some(d) = self.delimiter {
            options.delimiter = Some(d);
        }
        if let Some(name) = self.output_dir_name {
            options.output_dir_name = name;
        }
        if self.sanitize {
            options.category_policy = CategoryPolicy::Sanitize;
        }
        if let Some(rows) = self.preview_rows {
            options.preview_rows = rows;
        }
        if let Some(width) = self.column_width {
            options.column_width = width;
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    LOG_BROADCASTER.set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Extract {
            input,
            options,
            no_preview,
            json,
        } => options
            .resolve()
            .and_then(|opts| cmd_extract(input, &opts, no_preview, json)),

        Commands::Preview { input, options, json } => options
            .resolve()
            .and_then(|opts| cmd_preview(&input, &opts, json)),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: Option<PathBuf>,
    options: &ExtractOptions,
    no_preview: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match input {
        Some(path) => path,
        None => match prompt_for_path(&mut io::stdin().lock())? {
            Some(path) => path,
            None => {
                eprintln!("No file selected.");
                return Ok(());
            }
        },
    };

    let preview = preview_options(options);
    let show_preview = !no_preview && !json;

    let result = extract_csv(&input, options, |table| {
        if show_preview {
            println!("{}", render_table(table, preview));
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.extraction)?);
    } else {
        println!("✅ {} messages extracted!", result.extraction.count);
        println!("📁 Saved in: {}", result.extraction.root.display());
    }

    Ok(())
}

fn cmd_preview(input: &Path, options: &ExtractOptions, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_csv(input, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.table)?);
    } else {
        println!("{}", render_table(&loaded.table, preview_options(options)));
    }

    Ok(())
}

fn preview_options(options: &ExtractOptions) -> PreviewOptions {
    PreviewOptions {
        max_rows: options.preview_rows,
        column_width: options.column_width,
    }
}

/// Ask for a CSV path. A blank answer or end of input means "cancelled".
fn prompt_for_path<R: BufRead>(input: &mut R) -> io::Result<Option<PathBuf>> {
    eprint!("Select CSV File: ");
    io::stderr().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    // terminals often quote dropped paths
    let answer = line.trim().trim_matches(|c: char| c == '"' || c == '\'');
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(answer)))
    }
}
