use regex::Regex;
use std::sync::OnceLock;

/// The two top-level views, derived from the location string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    SurahList,
    SurahDetail(u16),
}

fn chapter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#/chapter/(\d+)$").expect("pattern is valid"))
}

/// Decode a location string into a view. `#/chapter/<digits>` opens that
/// surah; everything else (empty, `#/`, trailing garbage, non-numeric ids)
/// falls back to the surah list. Range checking happens when the detail view
/// actually requests data, not here.
pub fn decode(location: &str) -> ViewState {
    if let Some(caps) = chapter_pattern().captures(location) {
        if let Ok(number) = caps[1].parse::<u16>() {
            return ViewState::SurahDetail(number);
        }
    }
    ViewState::SurahList
}

pub fn encode(view: ViewState) -> String {
    match view {
        ViewState::SurahList => "#/".to_string(),
        ViewState::SurahDetail(number) => format!("#/chapter/{}", number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_chapter_location() {
        assert_eq!(decode("#/chapter/7"), ViewState::SurahDetail(7));
        assert_eq!(decode("#/chapter/114"), ViewState::SurahDetail(114));
    }

    #[test]
    fn test_decode_falls_back_to_list() {
        assert_eq!(decode(""), ViewState::SurahList);
        assert_eq!(decode("#/"), ViewState::SurahList);
        assert_eq!(decode("#/bogus"), ViewState::SurahList);
        assert_eq!(decode("#/chapter/"), ViewState::SurahList);
        assert_eq!(decode("#/chapter/abc"), ViewState::SurahList);
        assert_eq!(decode("#/chapter/7/extra"), ViewState::SurahList);
        assert_eq!(decode("#/chapter/7abc"), ViewState::SurahList);
    }

    #[test]
    fn test_decode_overflowing_number_falls_back() {
        assert_eq!(decode("#/chapter/99999999999"), ViewState::SurahList);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(ViewState::SurahList), "#/");
        assert_eq!(encode(ViewState::SurahDetail(36)), "#/chapter/36");
    }

    #[test]
    fn test_round_trip_for_all_surahs() {
        for number in 1..=114 {
            let view = ViewState::SurahDetail(number);
            assert_eq!(decode(&encode(view)), view);
        }
    }
}
