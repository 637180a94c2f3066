//! Outward-facing commands: browser.

use orbit_types::error::{OrbitError, Result};
use orbit_types::output::TextSegment;

use crate::interpreter::{Command, CommandResult, Environment};

// ---------------------------------------------------------------------------
// browser
// ---------------------------------------------------------------------------

struct BrowserCmd;
impl Command for BrowserCmd {
    fn name(&self) -> &str {
        "browser"
    }
    fn description(&self) -> &str {
        "Opens a URL in the device browser"
    }
    fn usage(&self) -> &str {
        "browser [url]"
    }
    fn category(&self) -> &str {
        "net"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let url = args.trim();
        if url.is_empty() {
            return Err(OrbitError::Usage("browser [url]".to_string()));
        }
        let full_url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{url}")
        };
        // The open attempt is fire-and-forget: failure goes to the operator
        // log, never into the transcript.
        match env.links {
            Some(links) => {
                if let Err(e) = links.open(&full_url) {
                    log::warn!("couldn't open {full_url}: {e}");
                }
            },
            None => log::warn!("no link opener available for {full_url}"),
        }
        Ok(CommandResult::Immediate(vec![TextSegment::plain(format!(
            "Opening {full_url} in your device's browser..."
        ))]))
    }
}

/// Register outward-facing commands.
pub fn register_net_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(BrowserCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DeviceProfile, SessionState};
    use orbit_platform::{LcgRandom, LinkOpener, SystemClock};
    use orbit_types::config::TerminalConfig;
    use std::cell::RefCell;

    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl RecordingOpener {
        fn new(fail: bool) -> Self {
            Self {
                opened: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> orbit_types::error::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(OrbitError::Platform("viewer unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn exec(args: &str, opener: &RecordingOpener) -> Result<CommandResult> {
        let clock = SystemClock::new();
        let rng = LcgRandom::with_seed(1);
        let config = TerminalConfig::default();
        let mut session = SessionState::new(100, 0, DeviceProfile::generate(&rng));
        let mut env = Environment {
            session: &mut session,
            config: &config,
            clock: &clock,
            rng: &rng,
            links: Some(opener),
        };
        BrowserCmd.execute(args, &mut env)
    }

    #[test]
    fn bare_host_gets_https_prefix() {
        let opener = RecordingOpener::new(false);
        match exec("example.com", &opener).unwrap() {
            CommandResult::Immediate(segs) => {
                assert_eq!(
                    segs[0].text,
                    "Opening https://example.com in your device's browser..."
                );
            },
            _ => panic!("expected immediate"),
        }
        assert_eq!(opener.opened.borrow().as_slice(), ["https://example.com"]);
    }

    #[test]
    fn existing_scheme_is_preserved() {
        let opener = RecordingOpener::new(false);
        exec("http://example.com/page", &opener).unwrap();
        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["http://example.com/page"]
        );
    }

    #[test]
    fn empty_url_is_usage_error() {
        let opener = RecordingOpener::new(false);
        match exec("   ", &opener) {
            Err(OrbitError::Usage(u)) => assert!(u.contains("browser")),
            other => panic!("expected usage error, got {other:?}"),
        }
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn opener_failure_still_confirms() {
        let opener = RecordingOpener::new(true);
        match exec("example.com", &opener).unwrap() {
            CommandResult::Immediate(segs) => {
                assert!(segs[0].text.starts_with("Opening"));
                assert_eq!(segs[0].emphasis, orbit_types::output::Emphasis::Normal);
            },
            _ => panic!("expected immediate"),
        }
    }
}
