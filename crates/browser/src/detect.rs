//! Chrome/Chromium discovery and install guidance.

use std::path::PathBuf;

/// Executable names searched on PATH. Any CDP-capable Chromium build works.
const EXECUTABLE_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "msedge",
    "microsoft-edge-stable",
    "brave-browser",
];

#[cfg(target_os = "macos")]
const MACOS_APP_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
];

#[cfg(target_os = "windows")]
const WINDOWS_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

/// Find a Chromium-based browser binary.
///
/// Order: explicit path from config, then the `CHROME` environment variable,
/// then platform install paths, then PATH lookup. Platform paths are checked
/// before PATH because PATH can hold broken wrapper scripts.
pub fn find_chrome(custom_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Some(p);
        }
    }

    #[cfg(target_os = "macos")]
    for path in MACOS_APP_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    #[cfg(target_os = "windows")]
    for path in WINDOWS_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }

    EXECUTABLE_NAMES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Platform-specific install instructions, embedded in launch failures.
pub fn install_hint() -> String {
    let instructions = if cfg!(target_os = "macos") {
        "  brew install --cask google-chrome"
    } else if cfg!(target_os = "linux") {
        "  Debian/Ubuntu: sudo apt install chromium-browser\n  \
         Fedora:         sudo dnf install chromium\n  \
         Arch:           sudo pacman -S chromium"
    } else if cfg!(target_os = "windows") {
        "  winget install Google.Chrome"
    } else {
        "  Download from https://www.google.com/chrome/"
    };

    format!(
        "No Chromium-based browser found. Install one:\n\n{instructions}\n\n\
         Or point at an existing binary with --chrome-path or the CHROME \
         environment variable."
    )
}

/// Log browser availability at startup. Returns whether one was found.
pub fn check_and_warn(custom_path: Option<&str>) -> bool {
    match find_chrome(custom_path) {
        Some(path) => {
            tracing::info!(path = %path.display(), "browser detected");
            true
        },
        None => {
            tracing::warn!("no Chrome/Chromium found; audit requests will fail\n{}", install_hint());
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_hint_mentions_a_package_manager() {
        let hint = install_hint();
        assert!(!hint.is_empty());
        #[cfg(target_os = "linux")]
        assert!(hint.contains("apt") || hint.contains("dnf") || hint.contains("pacman"));
        #[cfg(target_os = "macos")]
        assert!(hint.contains("brew"));
    }

    #[test]
    fn custom_path_takes_precedence_when_it_exists() {
        let dir = std::env::temp_dir();
        let fake = dir.join("pharos-fake-chrome");
        std::fs::write(&fake, "fake").unwrap();

        let found = find_chrome(fake.to_str());
        assert_eq!(found.as_deref(), Some(fake.as_path()));

        std::fs::remove_file(&fake).unwrap();
    }

    #[test]
    fn missing_custom_path_falls_through() {
        // Whether anything is found then depends on the host; it just must
        // not return the bogus path.
        let found = find_chrome(Some("/nonexistent/pharos-chrome"));
        assert_ne!(
            found.as_deref().and_then(|p| p.to_str()),
            Some("/nonexistent/pharos-chrome")
        );
    }

    #[test]
    fn executable_name_list_not_empty() {
        assert!(EXECUTABLE_NAMES.contains(&"chromium"));
        assert!(EXECUTABLE_NAMES.contains(&"google-chrome"));
    }
}
