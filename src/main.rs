use std::io;

use clap::Parser;
use popover_place::cli::{self, Cli};

fn main() -> io::Result<()> {
    let args = Cli::parse();
    let report =
        cli::run(&args).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    if let Some(report) = report {
        println!("{report}");
    }
    Ok(())
}
