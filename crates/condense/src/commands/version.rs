pub fn run() -> anyhow::Result<()> {
    println!("condense {}", env!("CARGO_PKG_VERSION"));
    println!("Context compression for tabular data analysis");
    Ok(())
}
