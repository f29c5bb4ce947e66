use crate::api::SurahSummary;

/// Filter surahs by a case-insensitive substring match on the transliterated
/// name. An empty query keeps every surah in its original order.
pub fn filter_surahs<'a>(surahs: &'a [SurahSummary], query: &str) -> Vec<&'a SurahSummary> {
    if query.is_empty() {
        return surahs.iter().collect();
    }

    let query_lower = query.to_lowercase();

    surahs
        .iter()
        .filter(|surah| surah.name_latin.to_lowercase().contains(&query_lower))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RevelationPlace;

    fn summary(number: u16, name_latin: &str) -> SurahSummary {
        SurahSummary {
            number,
            name: String::new(),
            name_latin: name_latin.to_string(),
            meaning: String::new(),
            revelation: RevelationPlace::Mecca,
            verse_count: 7,
        }
    }

    fn fixture() -> Vec<SurahSummary> {
        vec![
            summary(1, "Al-Fatihah"),
            summary(2, "Al-Baqarah"),
            summary(36, "Yasin"),
            summary(112, "Al-Ikhlas"),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let surahs = fixture();
        let result = filter_surahs(&surahs, "");
        let numbers: Vec<u16> = result.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 36, 112]);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let surahs = fixture();
        let result = filter_surahs(&surahs, "yAsIn");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].number, 36);
    }

    #[test]
    fn test_matches_substring_anywhere() {
        let surahs = fixture();
        let result = filter_surahs(&surahs, "qara");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name_latin, "Al-Baqarah");
    }

    #[test]
    fn test_every_result_contains_query() {
        let surahs = fixture();
        for surah in filter_surahs(&surahs, "al") {
            assert!(surah.name_latin.to_lowercase().contains("al"));
        }
    }

    #[test]
    fn test_no_match_returns_empty() {
        let surahs = fixture();
        assert!(filter_surahs(&surahs, "zzz").is_empty());
    }
}
