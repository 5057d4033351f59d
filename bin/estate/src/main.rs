use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    estate::run().await
}
