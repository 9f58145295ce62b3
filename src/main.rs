//! Flicker CLI - play animations in the terminal.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use flicker::{
    animations, backends,
    config::RunConfig,
    engine::{AnimationHost, Console, Player},
    filters,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = RunConfig::default();
    let mut config_path: Option<PathBuf> = None;

    // Flags override whatever the config file sets, so collect the file
    // path first and apply the rest afterwards.
    let mut overrides = RunConfig::default();
    let mut set_animation = false;
    let mut set_backend = false;
    let mut set_console = false;
    let mut set_cols = false;
    let mut set_rows = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-a" | "--animation" => {
                overrides.animation = take_value(&args, &mut i);
                set_animation = true;
            }
            "-b" | "--backend" => {
                overrides.backend = take_value(&args, &mut i);
                set_backend = true;
            }
            "-f" | "--filter" => {
                overrides.filter = Some(take_value(&args, &mut i));
            }
            "--fps" => {
                overrides.fps = Some(parse_value(&args, &mut i));
            }
            "-c" | "--console-lines" => {
                overrides.console_lines = parse_value(&args, &mut i);
                set_console = true;
            }
            "--cols" => {
                overrides.cols = parse_value(&args, &mut i);
                set_cols = true;
            }
            "--rows" => {
                overrides.rows = parse_value(&args, &mut i);
                set_rows = true;
            }
            "--config" => {
                config_path = Some(PathBuf::from(take_value(&args, &mut i)));
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Some(path) = &config_path {
        config = RunConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        });
    }

    if set_animation {
        config.animation = overrides.animation;
    }
    if set_backend {
        config.backend = overrides.backend;
    }
    if overrides.filter.is_some() {
        config.filter = overrides.filter;
    }
    if overrides.fps.is_some() {
        config.fps = overrides.fps;
    }
    if set_console {
        config.console_lines = overrides.console_lines;
    }
    if set_cols {
        config.cols = overrides.cols;
    }
    if set_rows {
        config.rows = overrides.rows;
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    run(&config).unwrap_or_else(|e| {
        eprintln!("Playback error: {}", e);
        std::process::exit(1);
    });
}

fn run(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    // validate() already vetted the registry names.
    let animation = animations::create(&config.animation)
        .ok_or_else(|| format!("unknown animation '{}'", config.animation))?;
    let backend = backends::create(&config.backend, config.cols, config.rows)
        .ok_or_else(|| format!("unknown backend '{}'", config.backend))?;

    let host = AnimationHost::new(animation);
    let console = Console::new(config.console_lines);

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))?;

    let mut player = Player::new(host, console, backend).with_stop_flag(stop);

    if let Some(name) = &config.filter {
        let filter =
            filters::create(name).ok_or_else(|| format!("unknown filter '{}'", name))?;
        player = player.with_filter(filter);
    }
    if let Some(fps) = config.fps {
        player.set_fps(fps);
    }

    player.screen_initialize()?;
    let result = player.play();
    player.screen_finish();
    result?;
    Ok(())
}

fn take_value(args: &[String], i: &mut usize) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Option {} requires a value", args[*i - 1]);
            std::process::exit(1);
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let raw = take_value(args, i);
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {}: {}", args[*i - 1], raw);
        std::process::exit(1);
    })
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Play a character-cell animation.");
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  -a, --animation <name>   Animation to play: {} (default: life)",
        animations::NAMES.join(", ")
    );
    eprintln!(
        "  -b, --backend <name>     Output backend: {} (default: term)",
        backends::NAMES.join(", ")
    );
    eprintln!(
        "  -f, --filter <name>      Frame filter: {}",
        filters::NAMES.join(", ")
    );
    eprintln!("      --fps <rate>         Frame rate; negative plays backward");
    eprintln!("  -c, --console-lines <n>  Console overlay height (default: 4)");
    eprintln!("      --cols <n>           Headless grid width (default: 80)");
    eprintln!("      --rows <n>           Headless grid height (default: 24)");
    eprintln!("      --config <file>      JSON configuration file");
    eprintln!("  -h, --help               Show this help");
}
