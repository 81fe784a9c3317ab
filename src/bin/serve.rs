#[tokio::main]
pub async fn main() -> Result<(), anyhow::Error> {
    dai_market::start_server().await?;
    Ok(())
}
