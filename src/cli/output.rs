//! Terminal output for the chart commands.
//!
//! Charts and config go to stdout, diagnostics to stderr. `colored` honours
//! NO_COLOR and CLICOLOR.

use colored::Colorize;

/// Failure message on stderr.
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Degraded-but-continuing notice on stderr, e.g. no global config location.
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Validation verdict line of `check`.
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// One `simulate` effect, stamped with the virtual clock.
pub fn event(at_ms: u128, label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{:>6}ms {}: {}", at_ms, label.green(), msg);
}

pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Indented statistic or summary line under a header.
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Uncoloured payload: printed trees and TOML, safe to pipe.
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
