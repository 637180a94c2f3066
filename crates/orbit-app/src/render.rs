//! ANSI rendering of the transcript.
//!
//! The core only classifies segments (`Emphasis`); mapping that to actual
//! styling is this front-end's job. Command echoes are skipped during live
//! rendering because the interactive console already shows what was typed.

use orbit_types::output::{Emphasis, OutputLine, TextSegment};

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// ANSI prefix for an emphasis class.
fn color(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Normal => "",
        Emphasis::Highlight => "\x1b[1;36m",
        Emphasis::Error => "\x1b[31m",
        Emphasis::Success => "\x1b[32m",
    }
}

/// One styled segment as a printable string.
pub fn styled(seg: &TextSegment) -> String {
    let prefix = color(seg.emphasis);
    if prefix.is_empty() {
        seg.text.clone()
    } else {
        format!("{prefix}{}{RESET}", seg.text)
    }
}

/// Print every transcript line appended since the last call, advancing
/// `rendered`. A shrunken transcript means `clear` or a reboot ran: the
/// screen is wiped and rendering restarts from the top.
pub fn flush_new(output: &[OutputLine], rendered: &mut usize) {
    if output.len() < *rendered {
        print!("{CLEAR_SCREEN}");
        *rendered = 0;
    }
    for line in &output[*rendered..] {
        if let OutputLine::Response(segs) = line {
            for seg in segs {
                println!("{}", styled(seg));
            }
        }
    }
    *rendered = output.len();
}
