//! Session state: transcript, history, font, and per-boot device figures.

use orbit_platform::{RandomExt, RandomSource};
use orbit_types::output::{OutputLine, TextSegment};

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// Terminal display font selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// The default monospace face.
    #[default]
    DefaultMono,
    /// The platform's alternative monospace face.
    SystemMono,
    /// The platform's sans-serif face.
    SystemSans,
}

impl Font {
    /// Map a `fonts` argument token to a font. Only `1`, `2`, and `3` are
    /// valid.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::DefaultMono),
            "2" => Some(Self::SystemMono),
            "3" => Some(Self::SystemSans),
            _ => None,
        }
    }

    /// Font family name for the renderer.
    pub fn family(&self) -> &'static str {
        match self {
            Self::DefaultMono => "monospace",
            Self::SystemMono => "sans-serif-monospace",
            Self::SystemSans => "sans-serif",
        }
    }
}

// ---------------------------------------------------------------------------
// Device profile
// ---------------------------------------------------------------------------

/// RAM sizes the simulated device can report.
const RAM_OPTIONS: [u32; 4] = [8, 12, 16, 32];

/// Simulated hardware figures, randomized once per boot and stable until
/// the next reboot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Battery charge percentage, 1-100.
    pub battery_percent: u8,
    /// Whether the charger is connected.
    pub charging: bool,
    /// Total disk capacity in GB.
    pub total_disk_gb: u32,
    /// Free disk space in GB.
    pub free_disk_gb: u32,
    /// Total RAM in GB.
    pub total_ram_gb: u32,
    /// Free RAM in GB.
    pub free_ram_gb: u32,
}

impl DeviceProfile {
    /// Draw a fresh profile from the random source.
    pub fn generate(rng: &dyn RandomSource) -> Self {
        Self {
            battery_percent: rng.range_i64(1, 100) as u8,
            charging: rng.coin(),
            total_disk_gb: rng.range_i64(100, 500) as u32,
            free_disk_gb: rng.range_i64(50, 250) as u32,
            total_ram_gb: *rng.pick(&RAM_OPTIONS),
            free_ram_gb: rng.range_i64(1, 4) as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// All transient state of one terminal session. Created at process start,
/// mutated only by the dispatcher and handlers, never persisted.
pub struct SessionState {
    /// Append-only output transcript.
    pub output: Vec<OutputLine>,
    /// The in-progress input line (history navigation edits this).
    pub input_buffer: String,
    /// Recorded submissions, unique by adjacency, oldest first.
    history: Vec<String>,
    /// History navigation cursor, always in `[-1, history.len()]`.
    /// `-1` before anything is recorded, `len` when past the newest entry.
    history_cursor: isize,
    /// When true, only `reboot` is accepted.
    pub halted: bool,
    /// Current display font.
    pub font: Font,
    /// Monotonic timestamp of the last boot, for uptime computation.
    pub boot_time_ms: u64,
    /// Randomized-at-boot hardware figures.
    pub device: DeviceProfile,
    max_history: usize,
}

impl SessionState {
    /// A halted session ready to be booted.
    pub fn new(max_history: usize, boot_time_ms: u64, device: DeviceProfile) -> Self {
        Self {
            output: Vec::new(),
            input_buffer: String::new(),
            history: Vec::new(),
            history_cursor: -1,
            halted: true,
            font: Font::default(),
            boot_time_ms,
            device,
            max_history,
        }
    }

    /// Append a line to the transcript.
    pub fn push_line(&mut self, line: OutputLine) {
        self.output.push(line);
    }

    /// Append a response block to the transcript.
    pub fn push_response(&mut self, segments: Vec<TextSegment>) {
        self.output.push(OutputLine::Response(segments));
    }

    /// Empty the transcript (the `clear` command).
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Reset for a (re)boot: transcript and input cleared, fresh device
    /// figures, uptime restarted, input rejected until boot completes.
    /// History and font survive reboots.
    pub fn reset_for_boot(&mut self, boot_time_ms: u64, device: DeviceProfile) {
        self.output.clear();
        self.input_buffer.clear();
        self.halted = true;
        self.boot_time_ms = boot_time_ms;
        self.device = device;
    }

    // -- History --

    /// Recorded history, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current history cursor.
    pub fn history_cursor(&self) -> isize {
        self.history_cursor
    }

    /// Record a submission. A command equal to the immediately preceding
    /// entry is not re-recorded; the cursor always resets to one past the
    /// newest entry.
    pub fn record_history(&mut self, line: &str) {
        if self.history.last().is_none_or(|last| last != line) {
            self.history.push(line.to_string());
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
        self.history_cursor = self.history.len() as isize;
    }

    /// Step back through history into the input buffer.
    pub fn history_prev(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        self.history_cursor = (self.history_cursor - 1).max(0);
        self.input_buffer = self.history[self.history_cursor as usize].clone();
        Some(self.input_buffer.as_str())
    }

    /// Step forward through history. Stepping past the newest entry clears
    /// the input buffer.
    pub fn history_next(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let len = self.history.len() as isize;
        if self.history_cursor >= len - 1 {
            self.history_cursor = len;
            self.input_buffer.clear();
            return None;
        }
        self.history_cursor += 1;
        self.input_buffer = self.history[self.history_cursor as usize].clone();
        Some(self.input_buffer.as_str())
    }
}
