//! Nicely formatted `GtoGrid` output.

use std::fmt;

use log;

const GTOGRID_BANNER_LENGTH: usize = 103;

/// Logs an error to the `gtogrid-output` logger.
macro_rules! gtogrid_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "gtogrid-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `gtogrid-output` logger.
macro_rules! gtogrid_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "gtogrid-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `gtogrid-output` logger.
macro_rules! gtogrid_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "gtogrid-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {gtogrid_error, gtogrid_output, gtogrid_warn};

/// Logs a nicely formatted section title to the `gtogrid-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(GTOGRID_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    gtogrid_output!("┌──{bar}──┐");
    gtogrid_output!("│§ {title:^length$} §│");
    gtogrid_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `gtogrid-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    gtogrid_output!("{}", subtitle);
    gtogrid_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `gtogrid-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = GTOGRID_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    gtogrid_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `gtogrid-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = GTOGRID_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    gtogrid_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging `GtoGrid` outputs nicely.
pub(crate) trait GtoGridOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            gtogrid_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> GtoGridOutput for T where T: fmt::Debug + fmt::Display {}
