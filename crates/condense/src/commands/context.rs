use condense_engine::StatsEngine;
use condense_session::Session;

/// Runs the automated pass, then prints the assembled context and nothing
/// else so the output can be piped straight into a prompt.
pub fn run(file: &str) -> anyhow::Result<()> {
    let dataset = crate::ingest::load_csv(file)?;
    let name = crate::ingest::dataset_name(file);

    let mut session = Session::with_executor(Box::new(StatsEngine::new()));
    session.load(dataset, &name);
    session.auto_analyze()?;

    println!("{}", session.assemble_context());
    Ok(())
}
