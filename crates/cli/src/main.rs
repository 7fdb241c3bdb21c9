// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use par_bench_core::{ExecPolicy, SuiteRunner};
use tracing::info;

/// par-bench – wall-clock benchmarks for sequence algorithms under an
/// execution policy chosen at the prompt
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable verbose logging (diagnostics go to stderr, never stdout)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Result rows own stdout; everything diagnostic goes to stderr.
    let log_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "par_bench={log_level},par_bench_core={log_level}"
        ))
        .with_writer(io::stderr)
        .init();

    info!("par-bench v{} starting", env!("CARGO_PKG_VERSION"));
    info!("rayon pool width: {} logical cpus", num_cpus::get());

    print!(
        "Choose execution policy: \n\
         1. Sequential\n\
         2. Parallel\n\
         3. Parallel Unsequenced\n\
         Enter choice (1/2/3): "
    );
    io::stdout().flush()?;

    let choice = read_choice(&mut io::stdin().lock());
    match choice.and_then(ExecPolicy::from_menu_choice) {
        Some(policy) => {
            println!("Running with {}", policy.name());
            SuiteRunner::new(policy).run();
        }
        // Unrecognized, empty, or unreadable input all terminate normally.
        None => println!("Exiting program."),
    }

    Ok(())
}

/// First non-whitespace character of the next input line. EOF and read
/// errors yield `None`, the clean-exit path.
fn read_choice<R: BufRead>(input: &mut R) -> Option<char> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => line.trim().chars().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_choice_takes_the_first_character() {
        assert_eq!(read_choice(&mut "2\n".as_bytes()), Some('2'));
        assert_eq!(read_choice(&mut "  3  \n".as_bytes()), Some('3'));
        assert_eq!(read_choice(&mut "17\n".as_bytes()), Some('1'));
    }

    #[test]
    fn read_choice_treats_eof_and_blank_lines_as_exit() {
        assert_eq!(read_choice(&mut "".as_bytes()), None);
        assert_eq!(read_choice(&mut "\n".as_bytes()), None);
        assert_eq!(read_choice(&mut "   \n".as_bytes()), None);
    }
}
