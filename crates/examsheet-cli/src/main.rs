//! examsheet CLI — validate, render and grade multiple-choice exams.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "examsheet", version, about = "Multiple-choice exam grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate exam data files
    Validate {
        /// Exam file, page, URL, or directory of exam files
        #[arg(long)]
        exam: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade an answer sheet
    Grade {
        /// Exam file (.json/.toml), page (.html) or URL
        #[arg(long)]
        exam: String,

        /// Test-taker's name
        #[arg(long, default_value = "")]
        name: String,

        /// Comma-separated answers in question order, e.g. "A,C,,B"
        #[arg(long)]
        answers: String,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the graded sheet as HTML
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a blank exam sheet as HTML
    Render {
        /// Exam file (.json/.toml), page (.html) or URL
        #[arg(long)]
        exam: String,

        /// Output HTML file
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert an exam between JSON and TOML
    Convert {
        /// Source exam
        #[arg(long)]
        input: String,

        /// Destination file; the extension picks the format
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example exam
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examsheet=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { exam, config } => commands::validate::execute(exam, config).await,
        Commands::Grade {
            exam,
            name,
            answers,
            format,
            html,
            config,
        } => commands::grade::execute(exam, name, answers, format, html, config).await,
        Commands::Render {
            exam,
            output,
            config,
        } => commands::render::execute(exam, output, config).await,
        Commands::Convert {
            input,
            output,
            config,
        } => commands::convert::execute(input, output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
