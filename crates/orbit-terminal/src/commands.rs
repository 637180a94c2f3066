//! Core built-in commands for the OrbitOS terminal.

use orbit_types::error::{OrbitError, Result};
use orbit_types::output::TextSegment;

use crate::expr;
use crate::interpreter::{Command, CommandRegistry, CommandResult, Environment};

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(CalcCmd));
    crate::register_system_commands(reg);
    crate::register_fun_commands(reg);
    crate::register_ui_commands(reg);
    crate::register_net_commands(reg);
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Shows this help message"
    }
    fn usage(&self) -> &str {
        "help"
    }
    fn execute(&self, _args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        // The registry intercepts `help` and renders the catalog; this body
        // only exists so the command appears in its own listing.
        Ok(CommandResult::Immediate(vec![TextSegment::plain(
            "Type 'help' for a list of commands",
        )]))
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Prints the specified text"
    }
    fn usage(&self) -> &str {
        "echo [text]"
    }
    fn execute(&self, args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        let text = if args.is_empty() {
            "Nothing to echo."
        } else {
            args
        };
        Ok(CommandResult::Immediate(vec![TextSegment::plain(text)]))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clears the terminal screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        env.session.clear_output();
        Ok(CommandResult::Immediate(vec![]))
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Shows command history"
    }
    fn usage(&self) -> &str {
        "history"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let history = env.session.history();
        if history.is_empty() {
            return Ok(CommandResult::Immediate(vec![TextSegment::plain(
                "No command history yet.",
            )]));
        }
        let segs = history
            .iter()
            .enumerate()
            .map(|(i, cmd)| TextSegment::plain(format!("{}. {cmd}", i + 1)))
            .collect();
        Ok(CommandResult::Immediate(segs))
    }
}

// ---------------------------------------------------------------------------
// calc
// ---------------------------------------------------------------------------

struct CalcCmd;
impl Command for CalcCmd {
    fn name(&self) -> &str {
        "calc"
    }
    fn description(&self) -> &str {
        "Calculate mathematical expression"
    }
    fn usage(&self) -> &str {
        "calc [expr]"
    }
    fn execute(&self, args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        let args = args.trim();
        if args.is_empty() {
            return Err(OrbitError::Usage("calc [expression]".to_string()));
        }
        let safe = expr::sanitize(args);
        if safe.is_empty() {
            return Err(OrbitError::Expr(
                "Invalid characters in expression".to_string(),
            ));
        }
        let value = expr::evaluate(&safe)?;
        Ok(CommandResult::Immediate(vec![TextSegment::plain(format!(
            "Result: {value}"
        ))]))
    }
}
