//! Log in on the event-driven transport and print the user's contacts.
//!
//! cargo run --example async_contacts -- <token> <secret> [base_url]

use anyhow::{bail, Context, Result};
use loginradius::{ClientConfig, Credentials, TransportMode, UserProfile};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("loginradius=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(token), Some(secret)) = (args.next(), args.next()) else {
        bail!("usage: async_contacts <token> <secret> [base_url]");
    };

    let mut config = ClientConfig::new(TransportMode::EventDriven);
    if let Some(base_url) = args.next() {
        config = config.with_base_url(base_url);
    }

    let credentials = Credentials::new(token, secret).context("bad credentials")?;
    let mut profile = UserProfile::with_config(credentials, config)?;

    if !profile.login_async().await.context("login failed")? {
        bail!("LoginRadius did not return a profile id");
    }
    info!(
        "Logged in as {} via {}",
        profile.id().unwrap_or("-"),
        profile.provider().unwrap_or("-")
    );

    let contacts = profile.contacts_async().await.context("fetching contacts")?;
    println!("{}", serde_json::to_string_pretty(&contacts)?);
    Ok(())
}
