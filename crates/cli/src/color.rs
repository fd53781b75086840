// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default: color only if stdout is a TTY

use std::io::IsTerminal;
use termcolor::ColorChoice;

/// Resolve the color choice for search output.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` set to any value
/// (including empty string) disables color. The `COLOR` env var follows a
/// similar convention for forcing color output.
pub fn resolve_color(force: bool, disable: bool) -> ColorChoice {
    if disable {
        return ColorChoice::Never;
    }
    if force {
        return ColorChoice::Always;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for match lines.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow byte offset.
    pub fn offset() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }

    /// Bold red matched text.
    pub fn matched() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Green pattern id.
    pub fn id() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green));
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
