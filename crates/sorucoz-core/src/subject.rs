//! Canonical school subjects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical school subject.
///
/// The set is closed: every free-text guess the platform sees is normalized
/// onto exactly one of these variants, with [`Subject::Bilinmeyen`] as the
/// fallback when nothing matches. The label string is what gets persisted
/// and displayed, so the serde representation is the label itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Matematik,
    Fizik,
    Kimya,
    Biyoloji,
    #[serde(rename = "Türkçe")]
    Turkce,
    Tarih,
    #[serde(rename = "Coğrafya")]
    Cografya,
    Felsefe,
    #[serde(rename = "Din Kültürü")]
    DinKulturu,
    #[serde(rename = "İngilizce")]
    Ingilizce,
    #[serde(rename = "Fen Bilgisi")]
    FenBilgisi,
    /// Sentinel for guesses no rule matched.
    Bilinmeyen,
}

impl Subject {
    /// All real subjects, in declaration order.
    ///
    /// Declaration order doubles as the tie-break order for classification:
    /// the first subject that matches wins. `Bilinmeyen` is not listed; it
    /// is the fallback, never a match target.
    pub const ALL: [Subject; 11] = [
        Subject::Matematik,
        Subject::Fizik,
        Subject::Kimya,
        Subject::Biyoloji,
        Subject::Turkce,
        Subject::Tarih,
        Subject::Cografya,
        Subject::Felsefe,
        Subject::DinKulturu,
        Subject::Ingilizce,
        Subject::FenBilgisi,
    ];

    /// The canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Matematik => "Matematik",
            Subject::Fizik => "Fizik",
            Subject::Kimya => "Kimya",
            Subject::Biyoloji => "Biyoloji",
            Subject::Turkce => "Türkçe",
            Subject::Tarih => "Tarih",
            Subject::Cografya => "Coğrafya",
            Subject::Felsefe => "Felsefe",
            Subject::DinKulturu => "Din Kültürü",
            Subject::Ingilizce => "İngilizce",
            Subject::FenBilgisi => "Fen Bilgisi",
            Subject::Bilinmeyen => "Bilinmeyen",
        }
    }

    /// Look up a subject by its exact canonical label.
    ///
    /// This is the inverse of [`Subject::label`] and is used to rehydrate
    /// persisted records. Free text goes through `classify` instead.
    pub fn from_label(label: &str) -> Option<Subject> {
        if label == "Bilinmeyen" {
            return Some(Subject::Bilinmeyen);
        }
        Subject::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Whether this is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Subject::Bilinmeyen)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for subject in Subject::ALL {
            assert_eq!(Subject::from_label(subject.label()), Some(subject));
        }
        assert_eq!(Subject::from_label("Bilinmeyen"), Some(Subject::Bilinmeyen));
    }

    #[test]
    fn test_from_label_rejects_free_text() {
        assert_eq!(Subject::from_label("matematik"), None);
        assert_eq!(Subject::from_label("Mathematics"), None);
        assert_eq!(Subject::from_label(""), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Subject::DinKulturu).unwrap();
        assert_eq!(json, "\"Din Kültürü\"");

        let back: Subject = serde_json::from_str("\"İngilizce\"").unwrap();
        assert_eq!(back, Subject::Ingilizce);
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Subject::Cografya.to_string(), "Coğrafya");
        assert_eq!(Subject::Bilinmeyen.to_string(), "Bilinmeyen");
    }
}
