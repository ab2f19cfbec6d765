use condense_engine::StatsEngine;
use condense_session::Session;

pub fn run(file: &str, query: &str, json: bool) -> anyhow::Result<()> {
    let dataset = crate::ingest::load_csv(file)?;
    let name = crate::ingest::dataset_name(file);

    let mut session = Session::with_executor(Box::new(StatsEngine::new()));
    session.load(dataset, &name);
    let report = session.analyze(query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.stdout);
    if let Some(err) = &report.error {
        eprintln!("Error: {err}");
    }
    println!(
        "[{}] tokens: {} | compression saved: {:.1}%",
        report.tool, report.tokens_used, report.compression_savings
    );
    Ok(())
}
