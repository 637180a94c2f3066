//! OrbitOS console entry point.
//!
//! A line-based front-end over the terminal core: reads whole input lines,
//! submits them to the dispatcher, and sleeps the deferred-task queue dry
//! between prompts so boot sequences and update checks reveal themselves in
//! real time.

mod render;

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use orbit_platform::{LcgRandom, LoggingLinkOpener, SystemClock};
use orbit_terminal::{CommandRegistry, Services, Terminal, register_builtins};
use orbit_types::config::TerminalConfig;

/// Optional config file next to the binary's working directory.
const CONFIG_PATH: &str = "orbit.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = load_config();
    log::info!("Starting {} {}", config.os_name, config.os_version);

    let clock = SystemClock::new();
    let rng = LcgRandom::new();
    let links = LoggingLinkOpener;
    let svc = Services {
        clock: &clock,
        rng: &rng,
        links: Some(&links),
    };

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    let mut terminal = Terminal::new(config, registry, &svc);

    let mut rendered = 0;
    drain(&mut terminal, &svc, &mut rendered);

    let stdin = io::stdin();
    loop {
        print!("{}", terminal.prompt());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF (Ctrl-D)
        }
        terminal.submit(&line, &svc);
        drain(&mut terminal, &svc, &mut rendered);
    }

    log::info!("terminal session ended");
    Ok(())
}

/// Load `orbit.toml` if present, defaults otherwise. A malformed file is
/// reported and ignored rather than aborting the session.
fn load_config() -> TerminalConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(text) => match TerminalConfig::from_toml_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {CONFIG_PATH}: {e}");
                TerminalConfig::default()
            },
        },
        Err(_) => TerminalConfig::default(),
    }
}

/// Render pending output, then sleep-and-tick until no deferred task
/// remains. The core never blocks; this front-end chooses to wait out
/// deferrals between prompts.
fn drain(terminal: &mut Terminal, svc: &Services<'_>, rendered: &mut usize) {
    render::flush_new(terminal.output(), rendered);
    while let Some(due) = terminal.next_due_ms() {
        let now = svc.clock.monotonic_ms();
        if due > now {
            thread::sleep(Duration::from_millis(due - now));
        }
        terminal.tick(svc);
        render::flush_new(terminal.output(), rendered);
    }
}
