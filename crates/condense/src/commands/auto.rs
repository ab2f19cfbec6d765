use condense_engine::StatsEngine;
use condense_history::LedgerStats;
use condense_session::Session;

pub fn run(file: &str, json: bool) -> anyhow::Result<()> {
    let dataset = crate::ingest::load_csv(file)?;
    let name = crate::ingest::dataset_name(file);

    let mut session = Session::with_executor(Box::new(StatsEngine::new()));
    session.load(dataset, &name);
    let reports = session.auto_analyze()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}", report.stdout);
        if let Some(err) = &report.error {
            eprintln!("[{}] Error: {err}", report.tool);
        }
    }

    let stats: LedgerStats = session.ledger().stats();
    println!(
        "Ran {} analyses ({} tokens used, {} saved): {}",
        stats.total_steps,
        stats.total_tokens_used,
        stats.total_tokens_saved,
        stats.actions_performed.join(", ")
    );
    Ok(())
}
