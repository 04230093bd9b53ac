//! CLI driver for `jitter-core`.
//!
//! Not a daemon: no forking, no signal handling, no PID file, no kernel
//! entropy pool polling. It drives the collector's external interface the
//! way a daemon eventually would — `init`, `alloc`, repeated `read`,
//! `free` — as a minimal, inspectable host.

use std::io::Write as _;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jitter_core::{CollectorFlags, EntropyCollector, JitterError};

#[derive(Parser)]
#[command(name = "jitter-cli")]
#[command(about = "Driver for the jitter-core entropy collector")]
#[command(version = jitter_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the startup health test against the real platform timer and report the result.
    Init,

    /// Allocate a collector and read bytes from it.
    Read {
        /// Number of bytes to read.
        #[arg(long, default_value = "32")]
        bytes: usize,

        /// Oversampling ratio passed to `alloc`.
        #[arg(long, default_value = "1")]
        osr: u32,

        /// Skip the memory-access noise source.
        #[arg(long)]
        disable_memory_access: bool,

        /// Skip the stir step.
        #[arg(long)]
        disable_stir: bool,

        /// Skip von Neumann unbiasing.
        #[arg(long)]
        disable_unbias: bool,

        /// Print raw bytes instead of hex.
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => run_init(),
        Commands::Read {
            bytes,
            osr,
            disable_memory_access,
            disable_stir,
            disable_unbias,
            raw,
        } => run_read(
            bytes,
            osr,
            CollectorFlags {
                disable_memory_access,
                disable_stir,
                disable_unbias,
            },
            raw,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_init() -> Result<(), JitterError> {
    let report = jitter_core::init()?;
    println!(
        "startup health test passed: time_backwards={} count_mod={} count_var={} delta_sum={}",
        report.time_backwards, report.count_mod, report.count_var, report.delta_sum
    );
    Ok(())
}

fn run_read(bytes: usize, osr: u32, flags: CollectorFlags, raw: bool) -> Result<(), JitterError> {
    jitter_core::init()?;
    let mut collector = EntropyCollector::alloc(osr, flags)?;

    let mut buf = vec![0u8; bytes];
    collector.read(&mut buf)?;

    if raw {
        std::io::stdout()
            .write_all(&buf)
            .expect("writing raw bytes to stdout failed");
    } else {
        for b in &buf {
            print!("{b:02x}");
        }
        println!();
    }

    collector.free();
    Ok(())
}
