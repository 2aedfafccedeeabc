//! minish: an interactive shell.
//!
//! Reads from a raw-mode line editor when stdin is a terminal, or line by
//! line otherwise. Exits with the status given to `exit`, or 0 on Ctrl-D.
//!
//! Flags:
//!   --version      print the version and exit
//!   --dump-config  print the merged configuration as TOML and exit

use minish::Shell;
use minish::config::Config;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::load();

    for arg in &args {
        match arg.as_str() {
            "--version" => {
                println!("minish {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--dump-config" => match config.to_toml() {
                Ok(text) => {
                    print!("{text}");
                    return;
                }
                Err(e) => {
                    eprintln!("minish: cannot render config: {e}");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("minish: unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }

    minish::logging::init(config.log_level());
    log::info!("minish {} starting", env!("CARGO_PKG_VERSION"));

    let code = Shell::new(config).run();
    log::info!("exiting with status {code}");
    std::process::exit(code);
}
