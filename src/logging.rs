//! Browser console logging through the `log` facade.

use log::Level;

/// Debug output in dev builds, info and up in release.
fn max_level(debug_build: bool) -> Level {
    if debug_build {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Route `log` records to the browser console. Later calls are ignored.
pub fn init() {
    if console_log::init_with_level(max_level(cfg!(debug_assertions))).is_err() {
        log::debug!("console logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_level_by_build() {
        assert_eq!(max_level(true), Level::Debug);
        assert_eq!(max_level(false), Level::Info);
    }
}
