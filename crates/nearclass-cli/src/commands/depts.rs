use clap::Args;
use nearclass_core::{CatalogClient, Term};

#[derive(Args)]
pub struct DeptsArgs {
    /// Only departments offered since this term, e.g. "2024 Fall"
    #[arg(long)]
    since: Option<String>,
}

pub fn run(args: DeptsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let since: Term = match &args.since {
        Some(raw) => raw.parse()?,
        None => Term::current(),
    };

    let client = CatalogClient::new()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let depts = runtime.block_on(client.fetch_departments(since))?;

    for dept in &depts {
        println!("{dept}");
    }
    eprintln!("{} departments since {}", depts.len(), since);
    Ok(())
}
