use clap::{Parser, Subcommand};
use detour_core::conf::DetourConfig;
use detour_core::logging::init_logging;
use detour_core::server;

const DEFAULT_CONFIG: &str = "config/detour.toml";

#[derive(Parser, Debug)]
#[command(
    name = "detour",
    version,
    about = "Detour: Pingora-based redirect and rewrite gateway"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the Detour gateway (default)
    Run {
        /// Path to the Detour config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },

    /// Validate a config file and compile its rules without starting the server
    Check {
        /// Path to the Detour config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check { config }) => check(&config),

        Some(Command::Run { config }) => run(&config),

        None => run(DEFAULT_CONFIG),
    }
}

fn run(path: &str) {
    init_logging();

    let cfg = DetourConfig::from_file(path).expect("Failed to load Detour config");

    server::run(cfg).expect("Failed to start Detour server");
}

fn check(path: &str) {
    let cfg = match DetourConfig::from_file(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(1);
        }
    };

    match server::build_devices(&cfg) {
        Ok(devices) => {
            println!("✔ Config loaded successfully");
            println!("✔ listen {}", cfg.server.listen);
            println!("✔ upstream {}", cfg.upstream.addr);
            println!("✔ {} redirect rules compiled", cfg.redirect.rules.len());
            println!("✔ {} devices enabled", devices.all().len());
        }
        Err(err) => {
            eprintln!("config error: {err:#}");
            std::process::exit(1);
        }
    }
}
