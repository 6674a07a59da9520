use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use nearclass_core::storage::csv_io;
use nearclass_core::{normalize_sessions, sessions_from_json, MeetingDb};

#[derive(Args)]
pub struct BuildArgs {
    /// Raw session JSON, as produced by `fetch`
    input: PathBuf,
    /// Write the normalized meeting table to this CSV file
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Import the normalized meetings into the SQLite store
    #[arg(long)]
    store: bool,
}

pub fn run(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.input)?;
    let sessions = sessions_from_json(&text)?;
    let outcome = normalize_sessions(&sessions);

    if let Some(path) = &args.output {
        csv_io::write_meetings_csv(path, &outcome.meetings)?;
        println!("wrote {} meeting rows to {}", outcome.meetings.len(), path.display());
    }

    if args.store {
        let mut db = MeetingDb::open()?;
        let terms: BTreeSet<&str> = outcome.meetings.iter().map(|m| m.term.as_str()).collect();
        for term in terms {
            let for_term: Vec<_> = outcome
                .meetings
                .iter()
                .filter(|m| m.term == term)
                .cloned()
                .collect();
            db.replace_term(term, &for_term)?;
            println!("stored {} meetings for {}", for_term.len(), term);
        }
    }

    if args.output.is_none() && !args.store {
        println!("normalized {} meetings (dry run; pass --output or --store)", outcome.meetings.len());
    }

    println!("total input entries: {}", sessions.len());
    println!("skipped:");
    let c = outcome.counts;
    println!("  missing_course: {}", c.missing_course);
    println!("  tba_or_online:  {}", c.tba_or_online);
    println!("  missing_days:   {}", c.missing_days);
    println!("  bad_time:       {}", c.bad_time);
    println!("  bad_location:   {}", c.bad_location);
    Ok(())
}
