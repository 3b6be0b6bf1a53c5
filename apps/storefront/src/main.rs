//! Binary entry point for the storefront server.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    matera_storefront::run().await
}
