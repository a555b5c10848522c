//! Probe binary for permission backends.
//!
//! Usage: permission-probe [auto|prompting|always-granted]

use std::env;
use std::time::Instant;

use mictoggle_permission::{Capability, PermissionModel, PermissionPrompt, authority_for};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let model = match args.get(1).map(|s| s.as_str()) {
        None | Some("auto") => PermissionModel::Auto,
        Some("prompting") => PermissionModel::Prompting,
        Some("always-granted") => PermissionModel::AlwaysGranted,
        Some(other) => {
            eprintln!("Unknown permission model: {}", other);
            eprintln!("Usage: {} [auto|prompting|always-granted]", args[0]);
            std::process::exit(1);
        }
    };

    let authority = authority_for(model);
    println!("Using authority: {}", authority.name());

    let capability = Capability::Microphone;
    let state = authority.check(capability).await?;
    println!("Check {}: {}", capability, state);

    println!("Requesting {}...", capability);
    let start = Instant::now();
    let outcome = authority
        .request(capability, &PermissionPrompt::microphone())
        .await?;
    println!(
        "Request answered in {:.2}s: {:?}",
        start.elapsed().as_secs_f64(),
        outcome
    );

    if !outcome.is_granted() {
        println!("{} was not granted", capability);
    }

    let state = authority.check(capability).await?;
    println!("Check {}: {}", capability, state);

    Ok(())
}
