//! # veininfo
//!
//! Lists the vein types a configuration registers, or describes one.
//!
//! ```bash
//! veininfo all
//! veininfo iron
//! veininfo --config data/veins.toml --config extra.toml all
//! veininfo --complete co        # names starting with "co"
//! ```

use std::process::ExitCode;

use oreveins::{Options, VeinHost};
use oreveins_procedural::{BlockPalette, WorldSeed};

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };

    let mut host = VeinHost::new(BlockPalette::vanilla(), WorldSeed::new(options.seed));
    if let Err(error) = host.load_paths(&options.configs) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    for rejected in host.rejected() {
        eprintln!("warning: skipped vein '{}': {}", rejected.name, rejected.error);
    }

    let command = host.command();

    if options.args.first().map(String::as_str) == Some("--complete") {
        for name in command.complete(&options.args[1..]) {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match command.execute(&options.args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(2)
        }
    }
}
