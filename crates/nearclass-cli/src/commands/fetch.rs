use std::path::PathBuf;

use clap::Args;
use nearclass_core::{CatalogClient, SearchOptions, Term};

#[derive(Args)]
pub struct FetchArgs {
    /// Term, e.g. "2025 Fall"
    #[arg(long, conflicts_with = "current")]
    term: Option<String>,
    /// Use the current quarter
    #[arg(long)]
    current: bool,
    /// Department code, e.g. "I&C SCI"
    #[arg(long)]
    dept: Option<String>,
    /// GE code, e.g. "GE-2"
    #[arg(long)]
    ge: Option<String>,
    /// Instructor last name
    #[arg(long)]
    instructor: Option<String>,
    /// Course number or range
    #[arg(long)]
    course: Option<String>,
    /// Max sessions to output
    #[arg(long)]
    limit: Option<usize>,
    /// Write raw session JSON to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: FetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let term = if args.current {
        Term::current()
    } else if let Some(raw) = &args.term {
        raw.parse()?
    } else {
        return Err("pass --term \"2025 Fall\" or --current".into());
    };

    let options = SearchOptions {
        department: args.dept,
        ge: args.ge,
        instructor_name: args.instructor,
        course_number: args.course,
        ..SearchOptions::default()
    };

    let client = CatalogClient::new()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let mut sessions = runtime.block_on(client.fetch_sessions(term, &options))?;

    if let Some(limit) = args.limit {
        sessions.truncate(limit);
    }

    let json = serde_json::to_string_pretty(&sessions)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("wrote {} sessions to {}", sessions.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
