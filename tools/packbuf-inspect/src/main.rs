// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! packbuf-inspect - Print layouts of known payloads and decode dumps
//!
//! Knows every payload registered by `packbuf-applet`.

use clap::{Parser, Subcommand};
use colored::*;
use packbuf::{ByteOrder, TypeRegistry};
use std::fs;
use std::path::PathBuf;

/// Inspect packed native payloads
#[derive(Parser, Debug)]
#[command(name = "packbuf-inspect")]
#[command(version)]
#[command(about = "Print packbuf layouts and decode binary payload dumps")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered payload types
    List,

    /// Print the field layout of a type
    Layout {
        /// Schema name, e.g. KeyboardConfigVB
        type_name: String,
    },

    /// Decode a binary dump as a type
    Decode {
        /// Schema name, e.g. MotionSensorInput
        type_name: String,

        /// File holding the raw payload
        file: PathBuf,

        /// Byte order: native, little, big
        #[arg(short, long, default_value = "native")]
        order: ByteOrder,

        /// Accept files longer than the layout
        #[arg(long)]
        allow_trailing: bool,
    },
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let registry = TypeRegistry::new();
    packbuf_applet::register_all(&registry);
    log::debug!("[packbuf-inspect] {} types registered", registry.len());

    match &args.command {
        Command::List => print_list(&registry)?,
        Command::Layout { type_name } => {
            let layout = registry.layout_by_name(type_name)?;
            print!("{}", layout);
        }
        Command::Decode {
            type_name,
            file,
            order,
            allow_trailing,
        } => {
            let bytes = fs::read(file)?;
            let value = registry.decode_by_name_with(type_name, &bytes, *order, *allow_trailing)?;
            println!(
                "{} {} ({} bytes, {} order)",
                "Decoded".green().bold(),
                type_name.bold(),
                bytes.len(),
                order
            );
            println!("{:#?}", value);
        }
    }

    Ok(())
}

fn print_list(registry: &TypeRegistry) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Registered types".bold());
    for name in registry.names() {
        let layout = registry.layout_by_name(name)?;
        println!(
            "  {:<24} {:>6} bytes  {:>3} fields",
            name.cyan(),
            layout.total_size(),
            layout.fields().len()
        );
    }
    Ok(())
}
