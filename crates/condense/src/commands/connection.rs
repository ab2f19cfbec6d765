use condense_compress::CompressionClient;

pub fn run() -> anyhow::Result<()> {
    let mut client = CompressionClient::new();
    let report = client.test_connection();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
