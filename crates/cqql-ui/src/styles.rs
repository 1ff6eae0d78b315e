//! Ayu color theme and styling functions for `cq` output.
//!
//! Uses the Ayu Dark color palette. Color source:
//! <https://github.com/ayu-theme/ayu-colors>
//!
//! Only scores and stage headers get color; formulas are printed as plain
//! text so they can be copied back into a query.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_FAIL: &str = "\u{2716}";

const SEPARATOR_CHAR: char = '\u{2500}';

const BAR_FULL: char = '\u{2588}';
const BAR_EMPTY: char = '\u{2591}';

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders a pipeline stage header, e.g. `NORMALIZED`, in accent bold.
pub fn render_stage(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

/// Renders a light separator line of `width` columns in muted color.
pub fn render_separator(width: usize) -> String {
    render_muted(&SEPARATOR_CHAR.to_string().repeat(width))
}

/// Renders a crisp truth value as a colored check or cross.
pub fn render_truth(value: bool) -> String {
    if value {
        render_pass(&format!("{} true", ICON_PASS))
    } else {
        render_fail(&format!("{} false", ICON_FAIL))
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Qualitative band of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Partial,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 0.75 {
            Self::Strong
        } else if score >= 0.4 {
            Self::Partial
        } else {
            Self::Weak
        }
    }
}

/// Formats a score with four decimals.
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// A fixed-width bar proportional to `score` (clamped to `[0,1]`).
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = (score.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(BAR_FULL, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

/// Renders a score colored by its [`ScoreBand`].
pub fn render_score(score: f64) -> String {
    let text = format_score(score);
    match ScoreBand::of(score) {
        ScoreBand::Strong => render_pass(&text),
        ScoreBand::Partial => render_warn(&text),
        ScoreBand::Weak => render_fail(&text),
    }
}

/// Renders a score bar in muted color.
pub fn render_score_bar(score: f64, width: usize) -> String {
    render_muted(&score_bar(score, width))
}
