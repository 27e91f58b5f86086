//! Command: print version information.

/// The build version: `DOTLINK_VERSION` from the build, else the crate version.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("DOTLINK_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Print the dotlink version to stdout.
pub fn run() {
    println!("dotlink {}", version());
}
