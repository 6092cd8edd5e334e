//! # Device Fingerprint Reader
//!
//! Classifies a user-agent string into a device type and a human-readable
//! model string such as `"Android 13 - Chrome"` or `"Windows 10/11 - Edge"`.
//!
//! ## Rules
//!
//! Platform and browser are resolved independently, each by an ordered rule
//! table evaluated first-match-wins against the lower-cased agent string:
//!
//! | Platform rule | Type | Model |
//! |---|---|---|
//! | `android` | Phone | `Android <version>` |
//! | `iphone` / `ipad` / `ipod` | Tablet for `ipad`, else Phone | `iOS <version>` |
//! | `windows` | Computer | `Windows 10/11`, `8.1`, `8`, or `NT` |
//! | `mac os x` / `macintosh` | Computer | `macOS <version>` |
//! | `linux` | Computer | `Linux` |
//! | anything else | Computer | `Unknown` |
//!
//! Order matters: Android agents also say `Linux`, and iOS agents say
//! `like Mac OS X`.
//!
//! Classification is total. Empty, truncated, or spoofed strings fall through
//! to the defaults, and a pattern that fails to compile behaves as a
//! non-match.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Phone,
    Tablet,
    Computer,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::Computer => "Computer",
        };
        f.write_str(s)
    }
}

/// Device summary attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// `"<platform> - <browser>"`.
    pub model: String,
}

impl DeviceDescriptor {
    pub fn new(device_type: DeviceType, model: impl Into<String>) -> Self {
        Self {
            device_type,
            model: model.into(),
        }
    }
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self::new(DeviceType::Computer, format!("{UNKNOWN_PLATFORM} - {OTHER_BROWSER}"))
    }
}

const UNKNOWN_PLATFORM: &str = "Unknown";
const OTHER_BROWSER: &str = "Other Browser";

struct PlatformRule {
    matches: fn(&str) -> bool,
    classify: fn(&str) -> (DeviceType, String),
}

struct BrowserRule {
    label: &'static str,
    matches: fn(&str) -> bool,
}

// Predicates receive the lower-cased agent; classifiers receive the raw one.
static PLATFORM_RULES: &[PlatformRule] = &[
    PlatformRule {
        matches: |ua| ua.contains("android"),
        classify: |raw| {
            let model = match version(&ANDROID_VERSION, r"(?i)android\s+(\d+(?:\.\d+)?)", raw) {
                Some(v) => format!("Android {v}"),
                None => "Android".to_string(),
            };
            (DeviceType::Phone, model)
        },
    },
    PlatformRule {
        matches: |ua| ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod"),
        classify: |raw| {
            let device_type = if raw.to_lowercase().contains("ipad") {
                DeviceType::Tablet
            } else {
                DeviceType::Phone
            };
            let model = match version(&IOS_VERSION, r"(?i)\bOS\s+(\d+(?:_\d+)*)", raw) {
                Some(v) => format!("iOS {}", v.replace('_', ".")),
                None => "iOS".to_string(),
            };
            (device_type, model)
        },
    },
    PlatformRule {
        matches: |ua| ua.contains("windows"),
        classify: |raw| {
            let release = match version(&WINDOWS_NT, r"(?i)windows nt\s+(\d+\.\d+)", raw).as_deref()
            {
                Some("10.0") => "10/11",
                Some("6.3") => "8.1",
                Some("6.2") => "8",
                _ => "NT",
            };
            (DeviceType::Computer, format!("Windows {release}"))
        },
    },
    PlatformRule {
        matches: |ua| ua.contains("mac os x") || ua.contains("macintosh"),
        classify: |raw| {
            let model = match version(&MACOS_VERSION, r"(?i)mac os x\s+(\d+(?:[_.]\d+)*)", raw) {
                Some(v) => format!("macOS {}", v.replace('_', ".")),
                None => "macOS".to_string(),
            };
            (DeviceType::Computer, model)
        },
    },
    PlatformRule {
        matches: |ua| ua.contains("linux"),
        classify: |_| (DeviceType::Computer, "Linux".to_string()),
    },
];

static BROWSER_RULES: &[BrowserRule] = &[
    BrowserRule {
        label: "Chrome",
        matches: |ua| ua.contains("chrome") && !ua.contains("chromium") && !ua.contains("edg"),
    },
    BrowserRule {
        label: "Safari",
        matches: |ua| ua.contains("safari") && !ua.contains("chrome"),
    },
    BrowserRule {
        label: "Firefox",
        matches: |ua| ua.contains("firefox"),
    },
    BrowserRule {
        label: "Edge",
        matches: |ua| ua.contains("edg"),
    },
    BrowserRule {
        label: "Internet Explorer",
        matches: |ua| ua.contains("trident") || ua.contains("msie"),
    },
];

static ANDROID_VERSION: OnceLock<Option<Regex>> = OnceLock::new();
static IOS_VERSION: OnceLock<Option<Regex>> = OnceLock::new();
static WINDOWS_NT: OnceLock<Option<Regex>> = OnceLock::new();
static MACOS_VERSION: OnceLock<Option<Regex>> = OnceLock::new();

fn version(cell: &'static OnceLock<Option<Regex>>, pattern: &str, raw: &str) -> Option<String> {
    let regex = cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()?;
    let captures = regex.captures(raw)?;
    captures.get(1).map(|m| m.as_str().to_string())
}

/// Classify `user_agent` into a device descriptor.
pub fn describe(user_agent: &str) -> DeviceDescriptor {
    let lowered = user_agent.to_lowercase();

    let (device_type, platform) = PLATFORM_RULES
        .iter()
        .find(|rule| (rule.matches)(&lowered))
        .map(|rule| (rule.classify)(user_agent))
        .unwrap_or((DeviceType::Computer, UNKNOWN_PLATFORM.to_string()));

    DeviceDescriptor::new(device_type, format!("{platform} - {}", browser(&lowered)))
}

/// Browser family of an already lower-cased agent string.
fn browser(lowered: &str) -> &'static str {
    BROWSER_RULES
        .iter()
        .find(|rule| (rule.matches)(lowered))
        .map_or(OTHER_BROWSER, |rule| rule.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PIXEL_7: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 \
                           (KHTML, like Gecko) Chrome/115.0.0.0 Mobile Safari/537.36";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_5 like Mac OS X) \
                          AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Mobile/15E148 Safari/604.1";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 15_6_1 like Mac OS X) AppleWebKit/605.1.15 \
                        (KHTML, like Gecko) Version/15.6 Mobile/15E148 Safari/604.1";
    const WIN_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                            (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36 Edg/118.0.2088.46";
    const WIN7_FIREFOX: &str =
        "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";
    const MAC_SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                              (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
    const IE11: &str = "Mozilla/5.0 (Windows NT 6.3; Trident/7.0; rv:11.0) like Gecko";

    fn model(ua: &str) -> String {
        describe(ua).model
    }

    #[test]
    fn android_chrome_phone() {
        assert_eq!(
            describe(PIXEL_7),
            DeviceDescriptor::new(DeviceType::Phone, "Android 13 - Chrome")
        );
    }

    #[test]
    fn iphone_is_phone_with_dotted_version() {
        let d = describe(IPHONE);
        assert_eq!(d.device_type, DeviceType::Phone);
        assert_eq!(d.model, "iOS 16.5 - Safari");
    }

    #[test]
    fn ipad_is_tablet() {
        let d = describe(IPAD);
        assert_eq!(d.device_type, DeviceType::Tablet);
        assert_eq!(d.model, "iOS 15.6.1 - Safari");
    }

    #[test]
    fn windows_build_table() {
        assert_eq!(model(WIN_EDGE), "Windows 10/11 - Edge");
        assert_eq!(model(IE11), "Windows 8.1 - Internet Explorer");
        assert_eq!(model("Mozilla/5.0 (Windows NT 6.2) Firefox/50.0"), "Windows 8 - Firefox");
        assert_eq!(model(WIN7_FIREFOX), "Windows NT - Firefox");
    }

    #[test]
    fn mac_safari() {
        assert_eq!(
            describe(MAC_SAFARI),
            DeviceDescriptor::new(DeviceType::Computer, "macOS 10.15.7 - Safari")
        );
    }

    #[test]
    fn desktop_linux_firefox() {
        assert_eq!(
            model("Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/118.0"),
            "Linux - Firefox"
        );
    }

    #[test]
    fn chromium_is_not_chrome() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Chromium/118.0 Chrome/118.0 Safari/537.36";
        assert_eq!(model(ua), "Linux - Other Browser");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(model("ANDROID 12; FIREFOX"), "Android 12 - Firefox");
    }

    #[test]
    fn unknown_agent_uses_defaults() {
        assert_eq!(describe(""), DeviceDescriptor::default());
        assert_eq!(
            describe("curl/8.4.0"),
            DeviceDescriptor::new(DeviceType::Computer, "Unknown - Other Browser")
        );
    }

    #[test]
    fn missing_versions_degrade_to_platform_name() {
        assert_eq!(model("android"), "Android - Other Browser");
        assert_eq!(model("iphone"), "iOS - Other Browser");
        assert_eq!(model("Macintosh"), "macOS - Other Browser");
    }

    #[test]
    fn serializes_type_key() {
        let json = serde_json::to_value(describe(PIXEL_7)).unwrap();
        assert_eq!(json["type"], "Phone");
        assert_eq!(json["model"], "Android 13 - Chrome");
    }

    proptest! {
        #[test]
        fn describe_is_total(ua in ".*") {
            let d = describe(&ua);
            prop_assert!(d.model.contains(" - "));
        }

        #[test]
        fn noise_around_android_still_classifies(prefix in "[a-z ;]{0,20}", suffix in "[a-z ;]{0,20}") {
            let ua = format!("{prefix} Android 11 {suffix}");
            prop_assert_eq!(describe(&ua).device_type, DeviceType::Phone);
        }
    }
}
