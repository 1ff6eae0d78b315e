//! Terminal detection for `cq` output.

use std::env;

/// Whether ANSI colors were requested, refused or left to TTY detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Never,
    Always,
    Auto,
}

impl ColorChoice {
    /// Decide from the usual variables, looked up through `var`.
    ///
    /// `NO_COLOR` (<https://no-color.org/>), `CLICOLOR=0` and `TERM=dumb`
    /// disable color; `CLICOLOR_FORCE` enables it even without a TTY.
    pub fn from_env<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if var("NO_COLOR").is_some() {
            return Self::Never;
        }
        if var("CLICOLOR").as_deref() == Some("0") || var("TERM").as_deref() == Some("dumb") {
            return Self::Never;
        }
        if var("CLICOLOR_FORCE").is_some() {
            return Self::Always;
        }
        Self::Auto
    }
}

/// Returns `true` if stdout is a TTY.
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Terminal width in columns, 80 when it cannot be detected.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _rows)| cols as usize)
        .unwrap_or(80)
}

/// Determines if ANSI color codes should be used.
pub fn supports_color() -> bool {
    match ColorChoice::from_env(|key| env::var(key).ok()) {
        ColorChoice::Never => false,
        ColorChoice::Always => true,
        ColorChoice::Auto => is_tty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn choice(vars: &[(&str, &str)]) -> ColorChoice {
        ColorChoice::from_env(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    #[test]
    fn no_color_wins() {
        assert_eq!(choice(&[("NO_COLOR", ""), ("CLICOLOR_FORCE", "1")]), ColorChoice::Never);
    }

    #[test]
    fn dumb_terminal_and_clicolor_zero_disable() {
        assert_eq!(choice(&[("TERM", "dumb")]), ColorChoice::Never);
        assert_eq!(choice(&[("CLICOLOR", "0")]), ColorChoice::Never);
        assert_eq!(choice(&[("CLICOLOR", "1")]), ColorChoice::Auto);
    }

    #[test]
    fn force_without_tty() {
        assert_eq!(choice(&[("CLICOLOR_FORCE", "1")]), ColorChoice::Always);
        assert_eq!(choice(&[]), ColorChoice::Auto);
    }

    #[test]
    fn terminal_width_has_a_fallback() {
        assert!(terminal_width() > 0);
    }
}
