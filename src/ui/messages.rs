//! Console feedback for CLI commands.

use crate::core::checkin::CheckInOutcome;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => ("\x1b[34m", "ℹ️"),
            Tone::Success => ("\x1b[32m", "✅"),
            Tone::Warning => ("\x1b[33m", "⚠️"),
            Tone::Error => ("\x1b[31m", "❌"),
        }
    }
}

fn emit<T: fmt::Display>(tone: Tone, msg: T) {
    let (color, icon) = tone.style();
    let line = format!("{color}{BOLD}{icon}{RESET} {msg}");
    match tone {
        Tone::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Tone::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Tone::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Tone::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Tone::Error, msg);
}

/// Print a check-in outcome: toggles as success, refusals as warnings.
pub fn outcome(o: &CheckInOutcome) {
    if o.is_toggle() {
        success(o.message());
    } else {
        warning(o.message());
    }
}
