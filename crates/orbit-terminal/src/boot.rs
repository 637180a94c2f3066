//! Boot sequencer: milestone schedule and welcome block.

use orbit_types::config::TerminalConfig;
use orbit_types::output::TextSegment;

use crate::sched::{Scheduler, Task};

/// Boot milestones, revealed one per boot step.
pub const BOOT_MILESTONES: [&str; 6] = [
    "Starting system...",
    "Loading kernel modules...",
    "Mounting /system...",
    "Starting services...",
    "Starting zygote...",
    "Boot completed.",
];

/// Schedule a full boot sequence starting at `now_ms`: milestone `i` at
/// `now + step * (i + 1)`, completion one extra step after the last
/// milestone.
pub fn schedule_boot(sched: &mut Scheduler, now_ms: u64, step_ms: u64, epoch: u64) {
    for i in 0..BOOT_MILESTONES.len() {
        sched.schedule(now_ms + step_ms * (i as u64 + 1), epoch, Task::BootMilestone(i));
    }
    let complete_at = now_ms + step_ms * (BOOT_MILESTONES.len() as u64 + 2);
    sched.schedule(complete_at, epoch, Task::BootComplete);
}

/// The `[i/N] message` milestone line.
pub fn milestone_segment(index: usize) -> TextSegment {
    TextSegment::highlight(format!(
        "[{}/{}] {}",
        index + 1,
        BOOT_MILESTONES.len(),
        BOOT_MILESTONES[index],
    ))
}

/// The welcome block appended when boot completes: three response blocks,
/// in fixed order.
pub fn welcome_blocks(config: &TerminalConfig) -> Vec<Vec<TextSegment>> {
    vec![
        vec![TextSegment::highlight(format!(
            "Welcome to {}",
            config.os_name
        ))],
        vec![TextSegment::plain("Type 'help' for a list of commands")],
        vec![TextSegment::error(
            "WARNING: You are running a BETA version!",
        )],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_are_prefixed_and_highlighted() {
        let seg = milestone_segment(0);
        assert_eq!(seg.text, "[1/6] Starting system...");
        assert_eq!(seg.emphasis, orbit_types::output::Emphasis::Highlight);
        let last = milestone_segment(BOOT_MILESTONES.len() - 1);
        assert_eq!(last.text, "[6/6] Boot completed.");
    }

    #[test]
    fn schedule_boot_spaces_milestones_one_step_apart() {
        let mut sched = Scheduler::new();
        schedule_boot(&mut sched, 1000, 200, 1);
        // 6 milestones + completion.
        assert_eq!(sched.len(), 7);
        assert_eq!(sched.next_due(), Some(1200));
        for i in 0..BOOT_MILESTONES.len() {
            let (_, task) = sched.pop_due(1000 + 200 * (i as u64 + 1)).unwrap();
            assert_eq!(task, Task::BootMilestone(i));
        }
        // Completion fires one extra step after the last milestone.
        assert!(sched.pop_due(2400).is_none());
        assert_eq!(sched.pop_due(2600), Some((1, Task::BootComplete)));
    }

    #[test]
    fn welcome_blocks_fixed_order() {
        let config = TerminalConfig::default();
        let blocks = welcome_blocks(&config);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0][0].text, "Welcome to OrbitOS");
        assert!(blocks[1][0].text.contains("help"));
        assert!(blocks[2][0].text.contains("BETA"));
        assert_eq!(blocks[2][0].emphasis, orbit_types::output::Emphasis::Error);
    }
}
