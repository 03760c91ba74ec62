//! Export format detection and per-format line recognizers.
//!
//! KakaoTalk produces five distinct export syntaxes depending on where the
//! export was made. Three are line-oriented text logs:
//!
//! - **Android**: `2023년 1월 5일 오전 10:28, 철수 : 안녕하세요`
//!   with bare `2023년 1월 5일 오전 10:28` date-header lines
//! - **Windows desktop**: `[철수] [오전 10:28] 안녕하세요`
//!   with `--------------- 2023년 1월 5일 목요일 ---------------` date headers
//! - **Tablet (iPad)**: `2023. 1. 5. 오전 10:28, 철수 : 안녕하세요`
//!   with `2023년 1월 5일 목요일` date headers
//!
//! and two are CSV with one row per message:
//!
//! - **macOS desktop**: `2023-01-05 10:28:30,철수,안녕하세요` (with seconds)
//! - **Generic imported**: `2023-01-05 10:28,철수,안녕하세요` (no seconds)
//!
//! [`detect_format`] classifies a file from a bounded prefix; [`LineRules`]
//! supplies the three compiled recognizers each line-syntax format needs.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KakaopackError, Result};

/// The meridiem token KakaoTalk uses for afternoon times. The morning token
/// is `오전`; anything that is not the PM marker is treated as AM.
pub const PM_MARKER: &str = "오후";

/// How many bytes of the file prefix format detection inspects.
pub const DETECT_PREFIX_BYTES: usize = 4096;

/// One of the five recognized KakaoTalk export syntaxes.
///
/// Chosen once per file by [`detect_format`], never re-evaluated mid-stream.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use kakaopack::format::ExportFormat;
///
/// let fmt = ExportFormat::from_str("android").unwrap();
/// assert_eq!(fmt, ExportFormat::Android);
/// assert!(!fmt.is_tabular());
/// assert!(ExportFormat::DesktopMac.is_tabular());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// Android app "export chat" text file.
    Android,

    /// Windows desktop client text file.
    #[serde(rename = "windows")]
    DesktopWindows,

    /// iPad/tablet app text file.
    Tablet,

    /// macOS desktop client CSV (timestamps carry seconds).
    #[serde(rename = "mac")]
    DesktopMac,

    /// Re-imported or third-party CSV (timestamps without seconds).
    #[serde(rename = "imported")]
    GenericImported,
}

impl ExportFormat {
    /// All formats in detection priority order.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Android,
            ExportFormat::DesktopWindows,
            ExportFormat::Tablet,
            ExportFormat::DesktopMac,
            ExportFormat::GenericImported,
        ]
    }

    /// Returns `true` for the record-oriented CSV formats handled by the
    /// tabular import engine.
    pub fn is_tabular(self) -> bool {
        matches!(
            self,
            ExportFormat::DesktopMac | ExportFormat::GenericImported
        )
    }

    /// The fixed timestamp template this format's CSV rows use, or `None`
    /// when the template is caller-configurable (the generic imported
    /// format) or the format is not tabular.
    pub fn timestamp_format(self) -> Option<&'static str> {
        match self {
            ExportFormat::DesktopMac => Some("%Y-%m-%d %H:%M:%S"),
            _ => None,
        }
    }

    /// Unanchored probe pattern used by format detection; matches anywhere
    /// in the file prefix.
    fn probe_pattern(self) -> &'static str {
        match self {
            ExportFormat::Android => {
                r"\d{4}년 \d{1,2}월 \d{1,2}일 .. \d{1,2}:\d{2}, .+? : .+"
            }
            ExportFormat::DesktopWindows => r"\[.+?\] \[.. \d{1,2}:\d{2}\] .+",
            ExportFormat::Tablet => {
                r"\d{4}\. \d{1,2}\. \d{1,2}\. .. \d{1,2}:\d{1,2}, .+? : .+"
            }
            ExportFormat::DesktopMac => {
                r"\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{1,2}:\d{1,2},.+,.+"
            }
            ExportFormat::GenericImported => {
                r"\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{1,2},.+,.+"
            }
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Android => "Android",
            ExportFormat::DesktopWindows => "Windows",
            ExportFormat::Tablet => "Tablet",
            ExportFormat::DesktopMac => "Mac",
            ExportFormat::GenericImported => "Imported",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(ExportFormat::Android),
            "windows" | "pc" => Ok(ExportFormat::DesktopWindows),
            "tablet" | "ipad" => Ok(ExportFormat::Tablet),
            "mac" | "macos" => Ok(ExportFormat::DesktopMac),
            "imported" | "csv" => Ok(ExportFormat::GenericImported),
            _ => Err(format!(
                "unknown export format: '{s}'. Expected one of: android, windows, tablet, mac, imported"
            )),
        }
    }
}

/// Classifies a file prefix into one of the five export formats.
///
/// Tests the prefix against the five probe patterns in priority order
/// (Android, Windows, Tablet, Mac, Imported) and returns the first match.
/// The Mac probe must run before the Imported probe: a seconds-bearing
/// timestamp also contains a minutes-only one.
///
/// # Errors
///
/// [`KakaopackError::FormatUnrecognized`] when no pattern matches.
pub fn detect_format(prefix: &str) -> Result<ExportFormat> {
    for &format in ExportFormat::all() {
        let probe = Regex::new(format.probe_pattern()).expect("probe pattern is valid");
        if probe.is_match(prefix) {
            return Ok(format);
        }
    }
    Err(KakaopackError::format_unrecognized())
}

/// The three line recognizers for one line-syntax format.
///
/// Per-line priority is fixed: `date_header` first, then `message_start`,
/// then, only if a pending message exists and `noise` does not match, the
/// line is continuation text.
#[derive(Debug)]
pub struct LineRules {
    /// Matches a line introducing a new calendar date; captures
    /// `year`/`month`/`day`, no time-of-day is taken from it.
    pub date_header: Regex,

    /// Matches a line beginning a new message; captures `name` (sender),
    /// `afm` (meridiem marker), `hour` (1–12), `min`, and `con` (remainder
    /// of the line).
    pub message_start: Regex,

    /// Matches known non-message system lines (join/leave/invite notices,
    /// malformed date-ish lines) that must not be absorbed as continuation
    /// text.
    pub noise: Regex,
}

impl LineRules {
    /// Builds the recognizer set for a line-syntax format. Returns `None`
    /// for the tabular formats, which have no line grammar.
    pub fn for_format(format: ExportFormat) -> Option<Self> {
        let (date, message, noise) = match format {
            ExportFormat::Android => (
                r"^(?P<year>\d{4})년 (?P<month>\d{1,2})월 (?P<day>\d{1,2})일 .. \d{1,2}:\d{2}$",
                r"^\d{4}년 \d{1,2}월 \d{1,2}일 (?P<afm>..) (?P<hour>\d{1,2}):(?P<min>\d{2}), (?P<name>.+?) : (?P<con>.+)",
                r"^\d{4}년 \d{1,2}월 \d{1,2}일 .. \d{1,2}:\d{1,2}, .+",
            ),
            ExportFormat::DesktopWindows => (
                r"^-+ (?P<year>\d{4})년 (?P<month>\d{1,2})월 (?P<day>\d{1,2})일 .요일 -+$",
                r"^\[(?P<name>.+?)\] \[(?P<afm>..) (?P<hour>\d{1,2}):(?P<min>\d{2})\] (?P<con>.+)",
                r"^.+님이 나갔습니다\.|^.+님이 .+님을 초대하였습니다\.|^.+님이 들어왔습니다\.",
            ),
            ExportFormat::Tablet => (
                r"^(?P<year>\d{4})년 (?P<month>\d{1,2})월 (?P<day>\d{1,2})일 .요일$",
                r"^(?P<year>\d{4})\. (?P<month>\d{1,2})\. (?P<day>\d{1,2})\. (?P<afm>..) (?P<hour>\d{1,2}):(?P<min>\d{1,2}), (?P<name>.+?) : (?P<con>.+?)$",
                r"^\d{4}\. \d{1,2}\. \d{1,2}\. .. \d{1,2}:\d{1,2}: .+",
            ),
            ExportFormat::DesktopMac | ExportFormat::GenericImported => return None,
        };

        Some(Self {
            date_header: Regex::new(date).expect("date pattern is valid"),
            message_start: Regex::new(message).expect("message pattern is valid"),
            noise: Regex::new(noise).expect("noise pattern is valid"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_detect_android() {
        let prefix = "철수 님과 카카오톡 대화\n저장한 날짜 : 2023-01-05 10:28\n\n2023년 1월 5일 오전 10:28\n2023년 1월 5일 오전 10:28, 철수 : 안녕하세요";
        assert_eq!(detect_format(prefix).unwrap(), ExportFormat::Android);
    }

    #[test]
    fn test_detect_windows() {
        let prefix = "철수 님과 카카오톡 대화\n저장한 날짜 : 2023년 1월 5일\n\n--------------- 2023년 1월 5일 목요일 ---------------\n[철수] [오전 10:28] 안녕하세요";
        assert_eq!(detect_format(prefix).unwrap(), ExportFormat::DesktopWindows);
    }

    #[test]
    fn test_detect_tablet() {
        let prefix = "스터디 그룹\n2023년 1월 5일 목요일\n2023. 1. 5. 오전 10:28, 철수 : 안녕하세요";
        assert_eq!(detect_format(prefix).unwrap(), ExportFormat::Tablet);
    }

    #[test]
    fn test_detect_mac_before_imported() {
        // A seconds-bearing timestamp also matches the minutes-only probe,
        // so the Mac pattern must win on priority.
        let prefix = "Date,User,Message\n2023-01-05 10:28:30,철수,안녕하세요";
        assert_eq!(detect_format(prefix).unwrap(), ExportFormat::DesktopMac);
    }

    #[test]
    fn test_detect_imported() {
        let prefix = "Date,User,Message\n2023-01-05 10:28,철수,안녕하세요";
        assert_eq!(detect_format(prefix).unwrap(), ExportFormat::GenericImported);
    }

    #[test]
    fn test_detect_unrecognized() {
        let err = detect_format("just some random text\nwith no chat lines").unwrap_err();
        assert!(err.is_format_unrecognized());
    }

    #[test]
    fn test_android_rules() {
        let rules = LineRules::for_format(ExportFormat::Android).unwrap();

        let caps = rules
            .date_header
            .captures("2023년 1월 5일 오전 10:28")
            .unwrap();
        assert_eq!(&caps["year"], "2023");
        assert_eq!(&caps["month"], "1");
        assert_eq!(&caps["day"], "5");

        let caps = rules
            .message_start
            .captures("2023년 1월 5일 오후 3:07, 철수 : 점심 뭐 먹었어?")
            .unwrap();
        assert_eq!(&caps["afm"], "오후");
        assert_eq!(&caps["hour"], "3");
        assert_eq!(&caps["min"], "07");
        assert_eq!(&caps["name"], "철수");
        assert_eq!(&caps["con"], "점심 뭐 먹었어?");

        // System notice lacks the " : " separator: not a message, but noise.
        let notice = "2023년 1월 5일 오전 10:29, 영희님이 들어왔습니다.";
        assert!(!rules.message_start.is_match(notice));
        assert!(rules.noise.is_match(notice));
    }

    #[test]
    fn test_windows_rules() {
        let rules = LineRules::for_format(ExportFormat::DesktopWindows).unwrap();

        let caps = rules
            .date_header
            .captures("--------------- 2023년 1월 5일 목요일 ---------------")
            .unwrap();
        assert_eq!(&caps["year"], "2023");

        let caps = rules.message_start.captures("[철수] [오전 10:28] 안녕").unwrap();
        assert_eq!(&caps["name"], "철수");
        assert_eq!(&caps["con"], "안녕");

        assert!(rules.noise.is_match("영희님이 나갔습니다."));
        assert!(rules.noise.is_match("철수님이 영희님을 초대하였습니다."));
        assert!(rules.noise.is_match("영희님이 들어왔습니다."));
        assert!(!rules.noise.is_match("그냥 이어지는 말"));
    }

    #[test]
    fn test_tablet_rules() {
        let rules = LineRules::for_format(ExportFormat::Tablet).unwrap();

        assert!(rules.date_header.is_match("2023년 1월 5일 목요일"));

        let caps = rules
            .message_start
            .captures("2023. 1. 5. 오전 10:28, 철수 : 안녕하세요")
            .unwrap();
        assert_eq!(&caps["name"], "철수");
        assert_eq!(&caps["con"], "안녕하세요");

        // Colon after the time instead of a comma marks a system line.
        assert!(rules.noise.is_match("2023. 1. 5. 오전 10:30: 영희님이 들어왔습니다."));
    }

    #[test]
    fn test_tabular_formats_have_no_rules() {
        assert!(LineRules::for_format(ExportFormat::DesktopMac).is_none());
        assert!(LineRules::for_format(ExportFormat::GenericImported).is_none());
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!(ExportFormat::from_str("ANDROID").unwrap(), ExportFormat::Android);
        assert_eq!(ExportFormat::from_str("ipad").unwrap(), ExportFormat::Tablet);
        assert_eq!(ExportFormat::from_str("macos").unwrap(), ExportFormat::DesktopMac);
        assert!(ExportFormat::from_str("discord").is_err());

        assert_eq!(ExportFormat::DesktopWindows.to_string(), "Windows");
        assert_eq!(ExportFormat::GenericImported.to_string(), "Imported");
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(
            ExportFormat::DesktopMac.timestamp_format(),
            Some("%Y-%m-%d %H:%M:%S")
        );
        assert_eq!(ExportFormat::GenericImported.timestamp_format(), None);
        assert_eq!(ExportFormat::Android.timestamp_format(), None);
    }
}
