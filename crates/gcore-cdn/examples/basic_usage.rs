//! Basic usage of the G-Core CDN client
//!
//! Reads credentials from `GCORE_USERNAME` and `GCORE_PASSWORD`, lists the
//! CDN resources of the account and purges one path of the first resource.
//!
//! ```sh
//! GCORE_USERNAME=user@example.com GCORE_PASSWORD=secret \
//!     RUST_LOG=gcore_cdn=debug cargo run --example basic_usage
//! ```

use gcore_cdn::{AuthOptions, ClientConfig, CommonClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let username = std::env::var("GCORE_USERNAME")?;
    let password = std::env::var("GCORE_PASSWORD")?;

    let cdn = CommonClient::new(ClientConfig::from_env()?)?;
    cdn.authenticate(&AuthOptions::new(username, password)).await?;

    let account = cdn.account().details().await?;
    println!("Account {} ({} users)", account.id, account.users.len());

    let resources = cdn.resources().list().await?;
    for resource in resources.iter() {
        println!("  {:>6}  {:<40} {}", resource.id, resource.cname, resource.status);
    }

    if let Some(first) = resources.first() {
        let paths = vec!["/index.html".to_string()];
        let response = cdn.resources().purge(first.id, &paths).await?;
        println!("Purge of {} answered {}", first.cname, response.status());
    }

    Ok(())
}
