// Licensed under the Apache-2.0 license

//! Trust M Demo Binary
//!
//! Command-line front end for the demo flow against the simulated chip.

use anyhow::Result;
use clap::Parser;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use trustm_demo::{run_demo, DemoConfig};

#[derive(Parser)]
#[command(name = "trustm-demo")]
#[command(about = "Open, identify and authenticate a Trust M secure element, then provision its credentials")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Path to TOML configuration file (defaults to demo-config.toml)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(short, long, help = "Log level: error, warn, info, debug or trace")]
    log_level: Option<String>,

    /// Directory for the provisioned credentials
    #[arg(short, long, help = "Write provisioned credentials to this directory")]
    output_dir: Option<PathBuf>,

    /// Skip the credential hand-off
    #[arg(long, help = "Do not provision the chip credentials")]
    no_provision: bool,

    /// Start immediately instead of waiting for the start timer
    #[arg(long, help = "Release the chip task without the start-up delay")]
    no_start_delay: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::load_default()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(dir) = args.output_dir {
        config.provisioning.output_dir = dir;
    }
    if args.no_provision {
        config.provisioning.enabled = false;
    }
    if args.no_start_delay {
        config.startup.release_delay_ms = 0;
    }

    let _ = SimpleLogger::new()
        .with_level(config.logging.level_filter()?)
        .init();

    println!("Trust M Demo");
    println!("============\n");

    let report = run_demo(&config)?;

    println!("Firmware:     {}", report.firmware_version);
    println!("Certificate:  {} bytes, chip authenticated", report.certificate_len);
    for example in &report.examples {
        let status = if example.passed { "passed" } else { "FAILED" };
        println!("Example {:<24} {}", example.name, status);
    }
    if let Some(dir) = &report.provisioned {
        println!("Credentials:  {:?}", dir);
    }

    if report.all_examples_passed() {
        println!("\n✓ Demo completed");
        Ok(())
    } else {
        println!("\n✗ Some examples failed");
        std::process::exit(1);
    }
}
