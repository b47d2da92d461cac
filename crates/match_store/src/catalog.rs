//! Reference data the candidate generator draws from.

use entities::ANONYMOUS_DISPLAY_NAME;

use crate::{MatchStoreError, MatchStoreResult};

const NAMES: &[&str] = &[
    ANONYMOUS_DISPLAY_NAME,
    "Alex K.",
    "Elif Y.",
    "Mert S.",
    "Zeynep A.",
    "Can B.",
    "Ayşe D.",
    "Emre T.",
    "Selin Ö.",
    "Burak C.",
];

const INTEREST_PAIRS: &[[&str; 2]] = &[
    ["Coffee Lover", "Study Breaks"],
    ["Music", "Gaming"],
    ["Reading", "Movies"],
    ["Sports", "Fitness"],
    ["Art", "Photography"],
    ["Food", "Cooking"],
    ["Tech", "Coding"],
    ["Travel", "Languages"],
];

const DEPARTMENTS: &[&str] = &[
    // Faculty of Architecture
    "Mimarlık",
    "Şehir ve Bölge Planlama",
    "Endüstriyel Tasarım",
    // Faculty of Arts and Sciences
    "Biyolojik Bilimler",
    "Kimya",
    "Tarih",
    "Matematik",
    "Felsefe",
    "Fizik",
    "Psikoloji",
    "Sosyoloji",
    "İstatistik",
    // Faculty of Economic and Administrative Sciences
    "İşletme",
    "İktisat",
    "Uluslararası İlişkiler",
    "Siyaset Bilimi ve Kamu Yönetimi",
    // Faculty of Education
    "Bilgisayar ve Öğretim Teknolojileri Eğitimi",
    "Eğitim Bilimleri",
    "Temel Eğitim",
    "Yabancı Diller Eğitimi",
    "Beden Eğitimi ve Spor",
    "Matematik ve Fen Bilimleri Eğitimi",
    // Faculty of Engineering
    "Havacılık ve Uzay Mühendisliği",
    "Kimya Mühendisliği",
    "İnşaat Mühendisliği",
    "Bilgisayar Mühendisliği",
    "Elektrik ve Elektronik Mühendisliği",
    "Mühendislik Bilimleri",
    "Çevre Mühendisliği",
    "Gıda Mühendisliği",
    "Jeoloji Mühendisliği",
    "Endüstri Mühendisliği",
    "Makina Mühendisliği",
    "Metalurji ve Malzeme Mühendisliği",
    "Maden Mühendisliği",
    "Petrol ve Doğal Gaz Mühendisliği",
    // Graduate schools
    "Uygulamalı Matematik",
    "Enformatik",
    "Deniz Bilimleri",
    "Fen Bilimleri",
    "Sosyal Bilimler",
    // Vocational school
    "Elektrik Programı",
    "Elektronik Teknolojisi",
    "Endüstriyel Elektronik",
    "Endüstriyel Otomasyon",
    "Gıda Teknolojisi",
    "Kaynak Teknolojisi",
    "Teknik Programlar",
    // School of Foreign Languages
    "Temel İngilizce",
    "Modern Diller",
    "Yabancı Diller",
    "Akademik Yazı Merkezi",
    // Departments under the rectorate
    "Türk Dili",
    "Müzik ve Güzel Sanatlar",
];

const BIOS: &[&str] = &[
    "Chill vibes only ☕",
    "Always hungry, never on time 🍕",
    "Coffee addict, chaos coordinator",
    "Looking for study buddies and snacks",
    "Foodie at heart, broke in wallet",
    "New here, let's grab döner!",
    "Surviving on caffeine and hope",
    "Will talk about cats forever 🐱",
    "Midterm season = stress eating",
    "Send memes, not lectures",
    "Pro napper, amateur student",
    "Here for the free wifi honestly",
    "Netflix breaks between classes 📺",
    "Existential crisis but make it fun",
    "Just vibing through finals week",
    "Tea over coffee, fight me",
    "Bookworm seeking lunch buddy",
    "Gym? I thought you said çay 🍵",
    "Deadline? What deadline?",
    "Living for Friday vibes only",
];

/// Names, interests, departments and bios used to build synthetic buddies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Display names. May include the anonymous sentinel.
    pub names: Vec<String>,
    /// Interest tag groups; one group is drawn per candidate.
    pub interests: Vec<Vec<String>>,
    /// Department names.
    pub departments: Vec<String>,
    /// Short bios.
    pub bios: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            names: NAMES.iter().map(|s| s.to_string()).collect(),
            interests: INTEREST_PAIRS
                .iter()
                .map(|pair| pair.iter().map(|s| s.to_string()).collect())
                .collect(),
            departments: DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
            bios: BIOS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Names eligible for a draw.
    ///
    /// With `exclude_sentinel` set, the anonymous sentinel is left out.
    pub fn drawable_names(&self, exclude_sentinel: bool) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !exclude_sentinel || *name != ANONYMOUS_DISPLAY_NAME)
            .collect()
    }

    /// Checks that every list has something to draw from.
    pub fn validate(&self, exclude_sentinel: bool) -> MatchStoreResult<()> {
        if self.drawable_names(exclude_sentinel).is_empty() {
            return Err(MatchStoreError::empty_catalog("names"));
        }
        if self.interests.is_empty() {
            return Err(MatchStoreError::empty_catalog("interests"));
        }
        if self.departments.is_empty() {
            return Err(MatchStoreError::empty_catalog("departments"));
        }
        if self.bios.is_empty() {
            return Err(MatchStoreError::empty_catalog("bios"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sizes() {
        let catalog = Catalog::default();

        assert_eq!(catalog.names.len(), 10);
        assert_eq!(catalog.interests.len(), 8);
        assert!(catalog.interests.iter().all(|pair| pair.len() == 2));
        assert_eq!(catalog.departments.len(), 54);
        assert_eq!(catalog.bios.len(), 20);
        assert!(catalog.validate(true).is_ok());
    }

    #[test]
    fn test_drawable_names_skip_sentinel() {
        let catalog = Catalog::default();

        let names = catalog.drawable_names(true);
        assert_eq!(names.len(), 9);
        assert!(!names.contains(&ANONYMOUS_DISPLAY_NAME));

        assert_eq!(catalog.drawable_names(false).len(), 10);
    }

    #[test]
    fn test_validate_rejects_sentinel_only_names() {
        let catalog = Catalog {
            names: vec![ANONYMOUS_DISPLAY_NAME.to_string()],
            ..Catalog::default()
        };

        assert!(matches!(
            catalog.validate(true),
            Err(MatchStoreError::EmptyCatalog { catalog: "names" })
        ));
        assert!(catalog.validate(false).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_bios() {
        let catalog = Catalog {
            bios: Vec::new(),
            ..Catalog::default()
        };

        assert!(matches!(
            catalog.validate(true),
            Err(MatchStoreError::EmptyCatalog { catalog: "bios" })
        ));
    }
}
