//! Grooso CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _written = writeln!(io::stderr().lock(), "{error}");

            ExitCode::FAILURE
        }
    }
}
