//! Presentation commands: fonts.

use orbit_types::error::Result;
use orbit_types::output::TextSegment;

use crate::interpreter::{Command, CommandResult, Environment};
use crate::session::Font;

// ---------------------------------------------------------------------------
// fonts
// ---------------------------------------------------------------------------

struct FontsCmd;
impl Command for FontsCmd {
    fn name(&self) -> &str {
        "fonts"
    }
    fn description(&self) -> &str {
        "Change the terminal font"
    }
    fn usage(&self) -> &str {
        "fonts [number]"
    }
    fn category(&self) -> &str {
        "ui"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        match Font::from_token(args.trim()) {
            Some(font) => {
                env.session.font = font;
                Ok(CommandResult::Immediate(vec![TextSegment::plain(
                    "Font updated successfully.",
                )]))
            },
            // Any other argument, including none: list the options without
            // touching the session.
            None => Ok(CommandResult::Immediate(vec![
                TextSegment::plain("Available fonts:"),
                TextSegment::plain("1. Default Monospace"),
                TextSegment::plain("2. System Monospace"),
                TextSegment::plain("3. System Sans-Serif"),
                TextSegment::plain("Usage: fonts [number]"),
            ])),
        }
    }
}

/// Register UI commands.
pub fn register_ui_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(FontsCmd));
}
