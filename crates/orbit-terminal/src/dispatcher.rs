//! Input dispatch and deferred-task driving.
//!
//! [`Terminal`] owns the session, the command registry, and the task
//! scheduler. The host feeds it whole input lines via [`Terminal::submit`]
//! and drives time via [`Terminal::tick`]; everything else (boot sequence,
//! deferred continuations, halted gating) happens in here.

use orbit_platform::{Clock, LinkOpener, RandomSource};
use orbit_types::config::TerminalConfig;
use orbit_types::error::OrbitError;
use orbit_types::output::{OutputLine, TextSegment};

use crate::boot;
use crate::interpreter::{CommandRegistry, CommandResult, DeferredAction, Environment};
use crate::sched::{Scheduler, Task};
use crate::session::{DeviceProfile, SessionState};

/// The collaborator services, threaded through every call instead of being
/// held by the terminal: the host decides what a "clock" is.
pub struct Services<'a> {
    pub clock: &'a dyn Clock,
    pub rng: &'a dyn RandomSource,
    pub links: Option<&'a dyn LinkOpener>,
}

/// A running terminal session: dispatcher state machine plus scheduler.
pub struct Terminal {
    config: TerminalConfig,
    registry: CommandRegistry,
    session: SessionState,
    sched: Scheduler,
    /// Bumped on every boot; deferred tasks from an older epoch are stale.
    epoch: u64,
}

impl Terminal {
    /// Create a terminal and start its first boot sequence. The session is
    /// halted until the boot completes (drive it with [`Terminal::tick`]).
    pub fn new(config: TerminalConfig, registry: CommandRegistry, svc: &Services<'_>) -> Self {
        let device = DeviceProfile::generate(svc.rng);
        let session = SessionState::new(config.max_history, svc.clock.monotonic_ms(), device);
        let mut terminal = Self {
            config,
            registry,
            session,
            sched: Scheduler::new(),
            epoch: 0,
        };
        terminal.begin_boot(svc);
        terminal
    }

    /// The session state (transcript, history, font).
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session access for the input box (history navigation).
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// The output transcript.
    pub fn output(&self) -> &[OutputLine] {
        &self.session.output
    }

    /// The prompt string.
    pub fn prompt(&self) -> String {
        self.config.prompt()
    }

    /// Whether input is currently rejected (boot in progress).
    pub fn is_halted(&self) -> bool {
        self.session.halted
    }

    /// Number of pending deferred tasks.
    pub fn pending_tasks(&self) -> usize {
        self.sched.len()
    }

    /// Monotonic due time of the next pending task, if any.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.sched.next_due()
    }

    /// Submit one input line.
    pub fn submit(&mut self, raw: &str, svc: &Services<'_>) {
        let trimmed = raw.trim();
        let token = trimmed.split_whitespace().next().unwrap_or("");

        // A halted session accepts nothing but the reboot trigger, which
        // must stay reachable or the session could never recover.
        if self.session.halted && !token.eq_ignore_ascii_case("reboot") {
            self.session.push_response(vec![TextSegment::error(
                "System halted. Please reboot.",
            )]);
            return;
        }

        let prompt = self.config.prompt();
        if trimmed.is_empty() {
            self.session.push_line(OutputLine::CommandEcho(prompt));
            return;
        }

        self.session
            .push_line(OutputLine::CommandEcho(format!("{prompt}{trimmed}")));
        self.session.record_history(trimmed);

        let (token, rest) = split_command(trimmed);
        let result = {
            let mut env = Environment {
                session: &mut self.session,
                config: &self.config,
                clock: svc.clock,
                rng: svc.rng,
                links: svc.links,
            };
            self.registry.execute(token, rest, &mut env)
        };

        match result {
            None => {
                self.session.push_response(vec![TextSegment::error(format!(
                    "Command not found: {token}"
                ))]);
            },
            Some(Ok(CommandResult::Immediate(segs))) => {
                // An empty block appends nothing (clear already mutated the
                // transcript directly).
                if !segs.is_empty() {
                    self.session.push_response(segs);
                }
            },
            Some(Ok(CommandResult::Deferred {
                placeholder,
                action,
            })) => {
                self.session.push_response(placeholder);
                let (delay, task) = match action {
                    DeferredAction::SoftwareUpdate => {
                        (self.config.software_delay_ms, Task::SoftwareReport)
                    },
                    DeferredAction::Reboot => (self.config.reboot_delay_ms, Task::Reboot),
                };
                self.sched
                    .schedule(svc.clock.monotonic_ms() + delay, self.epoch, task);
            },
            Some(Err(e)) => {
                self.session.push_response(vec![error_segment(&e)]);
            },
        }
    }

    /// Run every task that is due. Returns how many ran.
    pub fn tick(&mut self, svc: &Services<'_>) -> usize {
        let now = svc.clock.monotonic_ms();
        let mut ran = 0;
        while let Some((epoch, task)) = self.sched.pop_due(now) {
            if epoch != self.epoch {
                // Scheduled before the most recent reboot; its output would
                // land in a transcript that no longer exists.
                log::debug!("dropping stale task {task:?} (epoch {epoch} != {})", self.epoch);
                continue;
            }
            self.run_task(task, svc);
            ran += 1;
        }
        ran
    }

    fn run_task(&mut self, task: Task, svc: &Services<'_>) {
        match task {
            Task::BootMilestone(index) => {
                self.session.push_response(vec![boot::milestone_segment(index)]);
            },
            Task::BootComplete => {
                for block in boot::welcome_blocks(&self.config) {
                    self.session.push_response(block);
                }
                self.session.halted = false;
                log::info!("boot completed (epoch {})", self.epoch);
            },
            Task::SoftwareReport => {
                self.session
                    .push_response(crate::system_commands::software_report(&self.config));
            },
            Task::Reboot => {
                self.begin_boot(svc);
            },
        }
    }

    /// Clear the transcript, regenerate device figures, and schedule a
    /// fresh boot sequence under a new epoch.
    fn begin_boot(&mut self, svc: &Services<'_>) {
        self.epoch += 1;
        let now = svc.clock.monotonic_ms();
        self.session
            .reset_for_boot(now, DeviceProfile::generate(svc.rng));
        boot::schedule_boot(&mut self.sched, now, self.config.boot_step_ms, self.epoch);
        log::info!("boot sequence started (epoch {})", self.epoch);
    }
}

/// Split an input line into its command token and the raw argument
/// remainder: only the first whitespace run separates, the rest is verbatim.
fn split_command(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(idx) => {
            let (token, rest) = line.split_at(idx);
            (token, rest.trim_start())
        },
        None => (line, ""),
    }
}

/// Render an error as a single error-emphasized transcript line.
fn error_segment(e: &OrbitError) -> TextSegment {
    match e {
        OrbitError::Usage(usage) => TextSegment::error(format!("Usage: {usage}")),
        OrbitError::Expr(msg) => TextSegment::error(format!("Error: {msg}")),
        other => TextSegment::error(format!("Error: {other}")),
    }
}
