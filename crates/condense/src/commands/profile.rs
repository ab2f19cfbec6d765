use condense_schema::{full_render, SchemaCompressor};

pub fn run(file: &str, name: Option<&str>, full: bool) -> anyhow::Result<()> {
    let dataset = crate::ingest::load_csv(file)?;
    let name = match name {
        Some(n) => n.to_string(),
        None => crate::ingest::dataset_name(file),
    };

    let compressor = SchemaCompressor::new();
    let schema = compressor.compress(&dataset, &name);
    let comparison = compressor.compare_full_vs_compressed(&dataset);

    println!("{}", schema.compact_string);
    println!();
    println!(
        "Schema tokens: {} full -> {} compact ({:.1}% saved, {:.1}x)",
        comparison.full_tokens,
        comparison.compressed_tokens,
        comparison.savings_pct,
        comparison.compression_ratio
    );

    if full {
        println!();
        println!("{}", full_render(&dataset));
    }

    Ok(())
}
