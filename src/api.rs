use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://equran.id/api/v2";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("surah {0} not found")]
    NotFound(u16),
    #[error("malformed response body: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RevelationPlace {
    #[serde(rename = "Mekah")]
    Mecca,
    #[serde(rename = "Madinah")]
    Medina,
}

impl RevelationPlace {
    /// Reader-facing label, rather than the raw API code.
    pub fn label(&self) -> &'static str {
        match self {
            RevelationPlace::Mecca => "Makkah",
            RevelationPlace::Medina => "Madinah",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurahSummary {
    #[serde(rename = "nomor")]
    pub number: u16,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "namaLatin")]
    pub name_latin: String,
    #[serde(rename = "arti")]
    pub meaning: String,
    #[serde(rename = "tempatTurun")]
    pub revelation: RevelationPlace,
    #[serde(rename = "jumlahAyat")]
    pub verse_count: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verse {
    #[serde(rename = "nomorAyat")]
    pub number: u16,
    #[serde(rename = "teksArab")]
    pub text_arabic: String,
    #[serde(rename = "teksLatin")]
    pub text_latin: String,
    #[serde(rename = "teksIndonesia")]
    pub text_translation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurahDetail {
    #[serde(flatten)]
    pub summary: SurahSummary,
    #[serde(rename = "ayat")]
    pub verses: Vec<Verse>,
}

/// The equran.id v2 API wraps every payload in a status envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

fn parse_list_body(body: &str) -> Result<Vec<SurahSummary>, ApiError> {
    let envelope: Envelope<Vec<SurahSummary>> =
        serde_json::from_str(body).map_err(|err| ApiError::Parse(err.to_string()))?;
    Ok(envelope.data)
}

fn parse_detail_body(body: &str) -> Result<SurahDetail, ApiError> {
    let envelope: Envelope<SurahDetail> =
        serde_json::from_str(body).map_err(|err| ApiError::Parse(err.to_string()))?;
    let detail = envelope.data;

    // The verse sequence must cover exactly 1..=verse_count.
    if detail.verses.len() != detail.summary.verse_count as usize {
        return Err(ApiError::Parse(format!(
            "surah {} reports {} ayat but the body carries {}",
            detail.summary.number,
            detail.summary.verse_count,
            detail.verses.len()
        )));
    }

    Ok(detail)
}

/// Read-only client for the equran.id surah endpoints. Cheap to clone; clones
/// share the underlying connection pool.
#[derive(Clone)]
pub struct SurahClient {
    client: Client,
    base_url: String,
}

impl SurahClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch summaries for all 114 surahs, ordered by number.
    pub async fn fetch_surah_list(&self) -> Result<Vec<SurahSummary>, ApiError> {
        let url = format!("{}/surat", self.base_url);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        parse_list_body(&body)
    }

    /// Fetch one surah with its full verse sequence.
    pub async fn fetch_surah_detail(&self, number: u16) -> Result<SurahDetail, ApiError> {
        let url = format!("{}/surat/{}", self.base_url, number);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(number));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;

        parse_detail_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"{
        "code": 200,
        "message": "OK",
        "data": [
            {
                "nomor": 1,
                "nama": "الفاتحة",
                "namaLatin": "Al-Fatihah",
                "jumlahAyat": 7,
                "tempatTurun": "Mekah",
                "arti": "Pembukaan"
            },
            {
                "nomor": 2,
                "nama": "البقرة",
                "namaLatin": "Al-Baqarah",
                "jumlahAyat": 286,
                "tempatTurun": "Madinah",
                "arti": "Sapi Betina"
            }
        ]
    }"#;

    const DETAIL_BODY: &str = r#"{
        "code": 200,
        "message": "OK",
        "data": {
            "nomor": 112,
            "nama": "الإخلاص",
            "namaLatin": "Al-Ikhlas",
            "jumlahAyat": 2,
            "tempatTurun": "Mekah",
            "arti": "Ikhlas",
            "ayat": [
                {
                    "nomorAyat": 1,
                    "teksArab": "قُلْ هُوَ اللّٰهُ اَحَدٌۚ",
                    "teksLatin": "qul huwallāhu aḥad",
                    "teksIndonesia": "Katakanlah (Nabi Muhammad), Dialah Allah Yang Maha Esa."
                },
                {
                    "nomorAyat": 2,
                    "teksArab": "اَللّٰهُ الصَّمَدُۚ",
                    "teksLatin": "allāhuṣ-ṣamad",
                    "teksIndonesia": "Allah tempat meminta segala sesuatu."
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_list_body() {
        let surahs = parse_list_body(LIST_BODY).unwrap();
        assert_eq!(surahs.len(), 2);

        assert_eq!(surahs[0].number, 1);
        assert_eq!(surahs[0].name_latin, "Al-Fatihah");
        assert_eq!(surahs[0].meaning, "Pembukaan");
        assert_eq!(surahs[0].revelation, RevelationPlace::Mecca);
        assert_eq!(surahs[0].verse_count, 7);

        assert_eq!(surahs[1].number, 2);
        assert_eq!(surahs[1].revelation, RevelationPlace::Medina);
        assert_eq!(surahs[1].verse_count, 286);
    }

    #[test]
    fn test_parse_detail_body() {
        let detail = parse_detail_body(DETAIL_BODY).unwrap();
        assert_eq!(detail.summary.number, 112);
        assert_eq!(detail.summary.name_latin, "Al-Ikhlas");
        assert_eq!(detail.verses.len(), 2);
        assert_eq!(detail.verses[0].number, 1);
        assert_eq!(detail.verses[1].text_latin, "allāhuṣ-ṣamad");
    }

    #[test]
    fn test_detail_verse_count_mismatch_is_parse_error() {
        let body = DETAIL_BODY.replace("\"jumlahAyat\": 2", "\"jumlahAyat\": 3");
        let err = parse_detail_body(&body).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        assert!(matches!(
            parse_list_body("not json at all"),
            Err(ApiError::Parse(_))
        ));
        assert!(matches!(
            parse_detail_body(r#"{"data": {"nomor": 1}}"#),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_revelation_place_is_parse_error() {
        let body = LIST_BODY.replace("Mekah", "Atlantis");
        assert!(matches!(parse_list_body(&body), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_revelation_place_labels() {
        assert_eq!(RevelationPlace::Mecca.label(), "Makkah");
        assert_eq!(RevelationPlace::Medina.label(), "Madinah");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SurahClient::new("https://example.org/api/v2/");
        assert_eq!(client.base_url, "https://example.org/api/v2");
    }
}
