//! Example: log in and print the current user and their homes
//!
//! Settings come from `./tado.toml` / `./tado.json` and `TADO_*` environment
//! variables. Without `TADO_USERNAME` and `TADO_PASSWORD` the device flow is
//! used and a login link is printed.
//!
//! ```bash
//! RUST_LOG=tado=debug cargo run -p tado --example whoami
//! ```

use tado::{config, Client, Context};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client: Client = config::load()?.into_builder().build()?;
    let ctx = Context::background();

    let me = client.user().get(&ctx).await?;
    println!("Logged in as {} <{}>", me.name, me.email);

    for bare in &me.homes {
        let state = client.home().state(&ctx, bare.id).await?;
        let presence = state.presence.map_or("unknown", |p| p.as_str());
        println!("  {} (#{}): {presence}", bare.name, bare.id);
    }

    Ok(())
}
