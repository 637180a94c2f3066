//! Command trait, registry, and result types.
//!
//! The terminal is a registry-based dispatch system: commands implement the
//! [`Command`] trait and are registered by name. The dispatcher resolves
//! the command token case-insensitively and reconciles the returned
//! [`CommandResult`] into the transcript.

use std::collections::HashMap;

use orbit_platform::{Clock, LinkOpener, RandomSource};
use orbit_types::config::TerminalConfig;
use orbit_types::error::Result;
use orbit_types::output::TextSegment;

use crate::session::SessionState;

/// What happens after a deferred placeholder: the second half of a
/// two-stage command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Append the update-check report.
    SoftwareUpdate,
    /// Clear the transcript and rerun the boot sequence.
    Reboot,
}

/// Outcome of one handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// One response block, appended immediately. May be empty (`clear`).
    Immediate(Vec<TextSegment>),
    /// A placeholder block appended now plus an action scheduled to run
    /// after the configured delay.
    Deferred {
        placeholder: Vec<TextSegment>,
        action: DeferredAction,
    },
}

/// Mutable environment passed to every command. Session state and the
/// collaborator services are threaded through explicitly; nothing is
/// ambient.
pub struct Environment<'a> {
    /// The running session.
    pub session: &'a mut SessionState,
    /// Identity and timing configuration.
    pub config: &'a TerminalConfig,
    /// Wall clock and monotonic time.
    pub clock: &'a dyn Clock,
    /// Uniform random draws.
    pub rng: &'a dyn RandomSource,
    /// External URL opener, if the host provides one.
    pub links: Option<&'a dyn LinkOpener>,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "calc \[expr\]").
    fn usage(&self) -> &str;

    /// Command category for grouping.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute with the raw argument remainder. `args` is everything after
    /// the first whitespace run of the input line, verbatim.
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandResult>;
}

/// Registry of available commands with case-insensitive dispatch.
///
/// `help` is intercepted here so the catalog listing always reflects what
/// is actually registered. There is no default entry: unknown tokens are
/// the dispatcher's problem.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_ascii_lowercase(), cmd);
    }

    /// Whether a command name is registered (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_ascii_lowercase())
    }

    /// Resolve and execute a command token. Returns `None` for unknown
    /// tokens.
    pub fn execute(
        &self,
        token: &str,
        args: &str,
        env: &mut Environment<'_>,
    ) -> Option<Result<CommandResult>> {
        let name = token.to_ascii_lowercase();
        if name == "help" {
            return Some(Ok(CommandResult::Immediate(self.render_help())));
        }
        self.commands.get(&name).map(|cmd| cmd.execute(args, env))
    }

    /// The `help` catalog: one line per registered command.
    fn render_help(&self) -> Vec<TextSegment> {
        let mut segs = vec![TextSegment::highlight("Available Commands:")];
        for (_, usage, desc) in self.list_commands() {
            segs.push(TextSegment::plain(format!("{usage:<14} - {desc}")));
        }
        segs
    }

    /// Sorted list of (name, usage, description) for every command.
    pub fn list_commands(&self) -> Vec<(&str, &str, &str)> {
        let mut cmds: Vec<(&str, &str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.usage(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _, _)| *name);
        cmds
    }

    /// Return completions for a partial command name.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = partial.to_ascii_lowercase();
        let mut names: Vec<String> = self
            .commands
            .keys()
            .filter(|name| name.starts_with(&lower))
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DeviceProfile;
    use orbit_platform::{LcgRandom, SystemClock};

    struct UpperCmd;
    impl Command for UpperCmd {
        fn name(&self) -> &str {
            "upper"
        }
        fn description(&self) -> &str {
            "Uppercase the argument"
        }
        fn usage(&self) -> &str {
            "upper [text]"
        }
        fn execute(&self, args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
            Ok(CommandResult::Immediate(vec![TextSegment::plain(
                args.to_ascii_uppercase(),
            )]))
        }
    }

    fn run(reg: &CommandRegistry, token: &str, args: &str) -> Option<Result<CommandResult>> {
        let clock = SystemClock::new();
        let rng = LcgRandom::with_seed(1);
        let config = TerminalConfig::default();
        let mut session = SessionState::new(10, 0, DeviceProfile::generate(&rng));
        let mut env = Environment {
            session: &mut session,
            config: &config,
            clock: &clock,
            rng: &rng,
            links: None,
        };
        reg.execute(token, args, &mut env)
    }

    #[test]
    fn register_and_execute() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(UpperCmd));
        match run(&reg, "upper", "hi  there").unwrap().unwrap() {
            CommandResult::Immediate(segs) => assert_eq!(segs[0].text, "HI  THERE"),
            _ => panic!("expected immediate"),
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(UpperCmd));
        assert!(run(&reg, "UPPER", "x").is_some());
        assert!(run(&reg, "Upper", "x").is_some());
        assert!(reg.contains("uPPeR"));
    }

    #[test]
    fn unknown_token_returns_none() {
        let reg = CommandRegistry::new();
        assert!(run(&reg, "nonexistent", "").is_none());
    }

    #[test]
    fn help_is_intercepted() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(UpperCmd));
        match run(&reg, "help", "").unwrap().unwrap() {
            CommandResult::Immediate(segs) => {
                assert_eq!(segs[0].text, "Available Commands:");
                assert!(segs.iter().any(|s| s.text.contains("upper [text]")));
            },
            _ => panic!("expected immediate"),
        }
    }

    #[test]
    fn register_replaces_existing_command() {
        struct OtherUpper;
        impl Command for OtherUpper {
            fn name(&self) -> &str {
                "upper"
            }
            fn description(&self) -> &str {
                "replacement"
            }
            fn usage(&self) -> &str {
                "upper"
            }
            fn execute(&self, _: &str, _: &mut Environment<'_>) -> Result<CommandResult> {
                Ok(CommandResult::Immediate(vec![]))
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(UpperCmd));
        reg.register(Box::new(OtherUpper));
        let cmds = reg.list_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].2, "replacement");
    }

    #[test]
    fn list_commands_sorted() {
        struct Named(&'static str);
        impl Command for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn description(&self) -> &str {
                "desc"
            }
            fn usage(&self) -> &str {
                self.0
            }
            fn execute(&self, _: &str, _: &mut Environment<'_>) -> Result<CommandResult> {
                Ok(CommandResult::Immediate(vec![]))
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("zeta")));
        reg.register(Box::new(Named("alpha")));
        reg.register(Box::new(Named("mid")));
        let names: Vec<&str> = reg.list_commands().iter().map(|(n, _, _)| *n).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn completions_filter_by_prefix() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(UpperCmd));
        assert_eq!(reg.completions("up"), ["upper"]);
        assert!(reg.completions("zz").is_empty());
    }
}
