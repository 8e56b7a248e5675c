mod cli;
mod command;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use clap::Parser;
use fat_sim::FatFileSystem;

pub use self::cli::Cli;
use self::command::Command;

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let interactive = cli.script.is_none();
    let mut input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    println!("fat-shell — in-memory FAT allocation simulator\n");
    command::print_help();

    let mut fs = FatFileSystem::new();
    let mut line = String::new();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        log::debug!("input={:?}", line.trim_end());

        match Command::parse(&line) {
            Ok(Some(cmd)) => {
                if !command::run(&mut fs, cmd) {
                    break;
                }
            }
            Ok(None) => {}
            Err(msg) => println!("{msg}"),
        }
    }

    Ok(())
}
