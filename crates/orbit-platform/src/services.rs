//! Collaborator service traits and their desktop implementations.
//!
//! The terminal core never touches `std::time` or ambient randomness
//! directly; everything comes in through these traits so tests can
//! substitute fixed clocks and seeded draws.

use std::cell::Cell;
use std::time::Instant;

use orbit_types::error::Result;

// ---------------------------------------------------------------------------
// Clock service
// ---------------------------------------------------------------------------

/// A simple wall-clock timestamp.
#[derive(Debug, Clone, Copy)]
pub struct WallTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl std::fmt::Display for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

/// Abstraction over time: wall clock for `date`, monotonic milliseconds for
/// uptime computation and task scheduling.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> Result<WallTime>;

    /// Milliseconds since the clock was created. Monotonic, never wall.
    fn monotonic_ms(&self) -> u64;
}

/// `Clock` backed by `std::time`.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<WallTime> {
        use std::time::SystemTime as StdTime;
        let dur = StdTime::now()
            .duration_since(StdTime::UNIX_EPOCH)
            .unwrap_or_default();
        let secs = dur.as_secs();

        // Simple UTC breakdown (no TZ handling -- good enough for a
        // simulated OS).
        let time_of_day = secs % 86400;
        let hour = (time_of_day / 3600) as u8;
        let minute = ((time_of_day % 3600) / 60) as u8;
        let second = (time_of_day % 60) as u8;

        let (year, month, day) = days_to_ymd(secs / 86400);

        Ok(WallTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    fn monotonic_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Uniform pseudo-random draws. Implementations use interior mutability so
/// a shared reference can be threaded through command execution.
pub trait RandomSource {
    /// Next raw draw.
    fn next_u64(&self) -> u64;

    /// Uniform integer in `lo..=hi`.
    fn range_i64(&self, lo: i64, hi: i64) -> i64 {
        debug_assert!(lo <= hi);
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i64
    }

    /// Fair coin flip.
    fn coin(&self) -> bool {
        self.next_u64() & 1 == 1
    }
}

/// Extension methods for [`RandomSource`] that use generics and therefore
/// cannot live on the object-safe base trait. Provided via a blanket impl so
/// `pick` is callable on both concrete and `dyn RandomSource` receivers.
pub trait RandomExt: RandomSource {
    /// Uniform pick from a non-empty slice.
    fn pick<'a, T>(&self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() as usize) % items.len()]
    }
}

impl<R: RandomSource + ?Sized> RandomExt for R {}

/// Time-seeded linear congruential generator.
pub struct LcgRandom {
    state: Cell<u64>,
}

impl LcgRandom {
    /// Seed from the current time.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::with_seed(seed)
    }

    /// Fixed seed (deterministic sequences for tests).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Cell::new(seed | 1),
        }
    }
}

impl Default for LcgRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for LcgRandom {
    fn next_u64(&self) -> u64 {
        let next = self
            .state
            .get()
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        self.state.set(next);
        next >> 33
    }
}

// ---------------------------------------------------------------------------
// Link opener
// ---------------------------------------------------------------------------

/// Opens a URL in an external viewer. Failure is non-fatal to the session.
pub trait LinkOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Desktop stand-in for the device browser: logs the URL and succeeds.
pub struct LoggingLinkOpener;

impl LinkOpener for LoggingLinkOpener {
    fn open(&self, url: &str) -> Result<()> {
        log::info!("opening {url} in system browser");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Date helper
// ---------------------------------------------------------------------------

/// Convert days since Unix epoch to (year, month, day).
pub(crate) fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let leap = is_leap(year);
    let month_days: [u64; 12] = [
        31,
        if leap { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 0u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    if month == 0 {
        month = 12;
    }
    (year, month, (days + 1) as u8)
}

pub(crate) fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}
