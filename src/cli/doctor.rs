//! Environment readiness check.

use crate::config::{EngineConfig, DEFAULT_PORT};
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability and port bindability.
pub async fn run() -> Result<()> {
    println!("Stayscout Doctor");
    println!("================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    // Chromium
    let config = EngineConfig::from_env();
    let chromium = find_chromium(&config);
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Google Chrome or set STAYSCOUT_CHROMIUM_PATH."
        ),
    }

    // Port
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT);
    match std::net::TcpListener::bind(("127.0.0.1", port)) {
        Ok(_) => println!("[OK] Port {port} is free"),
        Err(e) => println!("[!!] Port {port} is not bindable: {e}"),
    }

    println!();
    if chromium.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
