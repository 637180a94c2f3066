//! System commands: date, whoami, neofetch, processes, battery, software,
//! reboot.

use orbit_types::error::Result;
use orbit_types::output::TextSegment;

use crate::interpreter::{Command, CommandResult, DeferredAction, Environment};

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Shows current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let now = env.clock.now()?;
        Ok(CommandResult::Immediate(vec![TextSegment::plain(
            now.to_string(),
        )]))
    }
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Shows current user"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Immediate(vec![TextSegment::highlight(
            env.config.identity(),
        )]))
    }
}

// ---------------------------------------------------------------------------
// neofetch
// ---------------------------------------------------------------------------

const NEOFETCH_ART: &str = r"        /\
       /  \
      /    \
     /      \
    /   ◢◤   \
   /    ||    \
  /     ||     \
 /      ||      \
/________________\";

struct NeofetchCmd;
impl Command for NeofetchCmd {
    fn name(&self) -> &str {
        "neofetch"
    }
    fn description(&self) -> &str {
        "Displays system information"
    }
    fn usage(&self) -> &str {
        "neofetch"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let cfg = env.config;
        let dev = env.session.device;
        let elapsed = env
            .clock
            .monotonic_ms()
            .saturating_sub(env.session.boot_time_ms);
        Ok(CommandResult::Immediate(vec![
            TextSegment::highlight(NEOFETCH_ART).preformatted(),
            TextSegment::highlight(format!("{}@{}", cfg.os_name, cfg.username)),
            TextSegment::plain("-----------------"),
            TextSegment::plain(format!("OS: {} {}", cfg.os_name, cfg.os_version)),
            TextSegment::plain(format!("Kernel: {}", cfg.kernel)),
            TextSegment::plain(format!("Architecture: {}", cfg.architecture)),
            TextSegment::plain(format!(
                "Total Disk: {:.2} GB ({:.2} GB free)",
                dev.total_disk_gb as f64, dev.free_disk_gb as f64,
            )),
            TextSegment::plain(format!(
                "Total RAM: {:.2} GB ({:.2} GB free)",
                dev.total_ram_gb as f64, dev.free_ram_gb as f64,
            )),
            TextSegment::plain(format!("Uptime: {}", format_uptime(elapsed))),
        ]))
    }
}

/// Format elapsed milliseconds as `{days}d {hours}h {minutes}m`, omitting
/// zero-valued leading units.
pub(crate) fn format_uptime(elapsed_ms: u64) -> String {
    let minutes = elapsed_ms / 60_000;
    let hours = minutes / 60;
    let days = hours / 24;
    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}d "));
    }
    if hours > 0 {
        out.push_str(&format!("{}h ", hours % 24));
    }
    out.push_str(&format!("{}m", minutes % 60));
    out
}

// ---------------------------------------------------------------------------
// processes
// ---------------------------------------------------------------------------

struct ProcessesCmd;
impl Command for ProcessesCmd {
    fn name(&self) -> &str {
        "processes"
    }
    fn description(&self) -> &str {
        "Lists running processes"
    }
    fn usage(&self) -> &str {
        "processes"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Immediate(vec![
            TextSegment::highlight("Running Processes:"),
            TextSegment::plain("1. system_core    (PID: 1)"),
            TextSegment::plain("2. terminal_app   (PID: 245)"),
            TextSegment::plain("3. user_session   (PID: 892)"),
        ]))
    }
}

// ---------------------------------------------------------------------------
// battery
// ---------------------------------------------------------------------------

struct BatteryCmd;
impl Command for BatteryCmd {
    fn name(&self) -> &str {
        "battery"
    }
    fn description(&self) -> &str {
        "Shows battery status"
    }
    fn usage(&self) -> &str {
        "battery"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let dev = env.session.device;
        let p = dev.battery_percent as u64;
        let estimate = if dev.charging {
            if p == 100 {
                "Time to full: Fully Charged".to_string()
            } else {
                // Charging at roughly 1.5 minutes per percent.
                let mins = (100 - p) * 3 / 2;
                format!("Time to full: {}h {}m", mins / 60, mins % 60)
            }
        } else {
            // Draining at roughly 8 minutes per percent.
            let mins = p * 8;
            format!("Time remaining: {}h {}m", mins / 60, mins % 60)
        };
        let status = if dev.charging {
            "Charging"
        } else {
            "Discharging"
        };
        Ok(CommandResult::Immediate(vec![
            TextSegment::plain("Battery Status:"),
            TextSegment::plain(format!("Charge: {p}%")),
            TextSegment::plain(format!("Status: {status}")),
            TextSegment::plain(estimate),
        ]))
    }
}

// ---------------------------------------------------------------------------
// software
// ---------------------------------------------------------------------------

struct SoftwareCmd;
impl Command for SoftwareCmd {
    fn name(&self) -> &str {
        "software"
    }
    fn description(&self) -> &str {
        "Shows system changelog"
    }
    fn usage(&self) -> &str {
        "software"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Deferred {
            placeholder: vec![TextSegment::success("Checking for updates...")],
            action: DeferredAction::SoftwareUpdate,
        })
    }
}

/// The update-check report appended after the `software` delay.
pub(crate) fn software_report(config: &orbit_types::config::TerminalConfig) -> Vec<TextSegment> {
    vec![
        TextSegment::error("No new updates found."),
        TextSegment::plain("Last successful update: September 23, 2025"),
        TextSegment::plain(format!("Version {}", config.os_version)),
        TextSegment::plain(format!("{} mobile upgrade:", config.os_name)),
        TextSegment::plain(" - Now running on native Android!"),
        TextSegment::plain(" - Added mobile-friendly history navigation."),
    ]
}

// ---------------------------------------------------------------------------
// reboot
// ---------------------------------------------------------------------------

struct RebootCmd;
impl Command for RebootCmd {
    fn name(&self) -> &str {
        "reboot"
    }
    fn description(&self) -> &str {
        "Reboots OrbitOS"
    }
    fn usage(&self) -> &str {
        "reboot"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Deferred {
            placeholder: vec![TextSegment::plain("Rebooting system...")],
            action: DeferredAction::Reboot,
        })
    }
}

/// Register system commands.
pub fn register_system_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(NeofetchCmd));
    reg.register(Box::new(ProcessesCmd));
    reg.register(Box::new(BatteryCmd));
    reg.register(Box::new(SoftwareCmd));
    reg.register(Box::new(RebootCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DeviceProfile, SessionState};
    use orbit_platform::{Clock, LcgRandom, WallTime};
    use orbit_types::config::TerminalConfig;
    use std::cell::Cell;

    struct FixedClock {
        ms: Cell<u64>,
    }

    impl FixedClock {
        fn at(ms: u64) -> Self {
            Self { ms: Cell::new(ms) }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> orbit_types::error::Result<WallTime> {
            Ok(WallTime {
                year: 2026,
                month: 8,
                day: 6,
                hour: 14,
                minute: 30,
                second: 45,
            })
        }
        fn monotonic_ms(&self) -> u64 {
            self.ms.get()
        }
    }

    fn device(battery_percent: u8, charging: bool) -> DeviceProfile {
        DeviceProfile {
            battery_percent,
            charging,
            total_disk_gb: 256,
            free_disk_gb: 100,
            total_ram_gb: 16,
            free_ram_gb: 2,
        }
    }

    fn exec_with(
        cmd: &dyn Command,
        clock: &FixedClock,
        dev: DeviceProfile,
        boot_time_ms: u64,
    ) -> Vec<TextSegment> {
        let rng = LcgRandom::with_seed(1);
        let config = TerminalConfig::default();
        let mut session = SessionState::new(100, boot_time_ms, dev);
        let mut env = Environment {
            session: &mut session,
            config: &config,
            clock,
            rng: &rng,
            links: None,
        };
        match cmd.execute("", &mut env).unwrap() {
            CommandResult::Immediate(segs) => segs,
            CommandResult::Deferred { .. } => panic!("expected immediate"),
        }
    }

    #[test]
    fn date_uses_the_clock() {
        let clock = FixedClock::at(0);
        let segs = exec_with(&DateCmd, &clock, device(50, false), 0);
        assert_eq!(segs[0].text, "2026-08-06 14:30:45");
    }

    #[test]
    fn whoami_reports_identity() {
        let clock = FixedClock::at(0);
        let segs = exec_with(&WhoamiCmd, &clock, device(50, false), 0);
        assert_eq!(segs[0].text, "root@orbit");
        assert_eq!(segs[0].emphasis, orbit_types::output::Emphasis::Highlight);
    }

    #[test]
    fn neofetch_reports_device_and_uptime() {
        // Booted at 60s, asked at 37 minutes.
        let clock = FixedClock::at(37 * 60_000);
        let segs = exec_with(&NeofetchCmd, &clock, device(50, false), 60_000);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert!(segs[0].preformatted);
        assert!(texts.contains(&"OS: OrbitOS 3.5.1 - mobile"));
        assert!(texts.contains(&"Kernel: 5.4.2-1070-gki"));
        assert!(texts.contains(&"Total Disk: 256.00 GB (100.00 GB free)"));
        assert!(texts.contains(&"Total RAM: 16.00 GB (2.00 GB free)"));
        assert!(texts.contains(&"Uptime: 36m"));
    }

    #[test]
    fn uptime_format_omits_leading_zero_units() {
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(59_000), "0m");
        assert_eq!(format_uptime(61 * 60_000), "1h 1m");
        assert_eq!(format_uptime(25 * 3_600_000), "1d 1h 0m");
        assert_eq!(format_uptime(24 * 3_600_000), "1d 0h 0m");
        assert_eq!(format_uptime(45 * 60_000), "45m");
    }

    #[test]
    fn processes_lists_three_entries() {
        let clock = FixedClock::at(0);
        let segs = exec_with(&ProcessesCmd, &clock, device(50, false), 0);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].text, "Running Processes:");
        assert!(segs[1].text.contains("PID: 1"));
    }

    #[test]
    fn battery_discharging_estimate() {
        let clock = FixedClock::at(0);
        // 50% at 8 minutes per percent: 400 minutes = 6h 40m.
        let segs = exec_with(&BatteryCmd, &clock, device(50, false), 0);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"Charge: 50%"));
        assert!(texts.contains(&"Status: Discharging"));
        assert!(texts.contains(&"Time remaining: 6h 40m"));
    }

    #[test]
    fn battery_charging_estimate() {
        let clock = FixedClock::at(0);
        // 80% charging: 20 * 1.5 = 30 minutes to full.
        let segs = exec_with(&BatteryCmd, &clock, device(80, true), 0);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"Status: Charging"));
        assert!(texts.contains(&"Time to full: 0h 30m"));
    }

    #[test]
    fn battery_full_and_charging() {
        let clock = FixedClock::at(0);
        let segs = exec_with(&BatteryCmd, &clock, device(100, true), 0);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"Time to full: Fully Charged"));
    }

    #[test]
    fn software_defers_with_checking_placeholder() {
        let clock = FixedClock::at(0);
        let rng = LcgRandom::with_seed(1);
        let config = TerminalConfig::default();
        let mut session = SessionState::new(100, 0, device(50, false));
        let mut env = Environment {
            session: &mut session,
            config: &config,
            clock: &clock,
            rng: &rng,
            links: None,
        };
        match SoftwareCmd.execute("", &mut env).unwrap() {
            CommandResult::Deferred {
                placeholder,
                action,
            } => {
                assert_eq!(placeholder[0].text, "Checking for updates...");
                assert_eq!(
                    placeholder[0].emphasis,
                    orbit_types::output::Emphasis::Success
                );
                assert_eq!(action, DeferredAction::SoftwareUpdate);
            },
            _ => panic!("expected deferred"),
        }
    }

    #[test]
    fn software_report_shape() {
        let report = software_report(&TerminalConfig::default());
        assert_eq!(report[0].text, "No new updates found.");
        assert_eq!(report[0].emphasis, orbit_types::output::Emphasis::Error);
        assert!(report.iter().any(|s| s.text.contains("history navigation")));
    }

    #[test]
    fn reboot_defers_with_rebooting_placeholder() {
        let clock = FixedClock::at(0);
        let rng = LcgRandom::with_seed(1);
        let config = TerminalConfig::default();
        let mut session = SessionState::new(100, 0, device(50, false));
        let mut env = Environment {
            session: &mut session,
            config: &config,
            clock: &clock,
            rng: &rng,
            links: None,
        };
        match RebootCmd.execute("", &mut env).unwrap() {
            CommandResult::Deferred {
                placeholder,
                action,
            } => {
                assert_eq!(placeholder[0].text, "Rebooting system...");
                assert_eq!(action, DeferredAction::Reboot);
            },
            _ => panic!("expected deferred"),
        }
    }
}
