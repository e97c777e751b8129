use log::warn;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Words understood in place of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Today,
    Yesterday,
    Tomorrow,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub struct Keywords;

impl Keywords {
    /// Returns the global keyword registry (lowercased input → keyword).
    ///
    /// Seeded with every canonical keyword mapped to itself; user synonyms are
    /// added through [`extend`](Self::extend).
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let m = Keyword::iter()
                .map(|keyword| (keyword.as_ref().to_string(), keyword))
                .collect();
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the registry with `(alias, target)` synonyms, e.g. `("hier", "yesterday")`.
    ///
    /// A pair is ignored when `target` is not already known, or when `alias` is
    /// itself a canonical keyword.
    pub fn extend(synonyms: &[(String, String)]) {
        extend_registry(Self::registry(), synonyms);
    }

    /// Returns `true` if `word` is a canonical keyword (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Resolves `input` (case-insensitive) to a keyword, through synonyms if needed.
    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = Self::registry().read().ok()?;
        reg.get(&input.trim().to_ascii_lowercase()).copied()
    }

    /// Returns `true` if `input` is `keyword` or one of its synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input) == Some(keyword)
    }
}

/// Returns `false` when the registry lock is poisoned and nothing was added.
fn extend_registry(registry: &RwLock<HashMap<String, Keyword>>, synonyms: &[(String, String)]) -> bool {
    let Ok(mut reg) = registry.write() else {
        warn!(
            "event=synonyms_dropped reason=registry_poisoned count={}",
            synonyms.len()
        );
        return false;
    };
    for (alias, target) in synonyms {
        if Keywords::is_canonical(&alias.to_ascii_lowercase()) {
            continue;
        }
        if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
            reg.insert(alias.to_ascii_lowercase(), canonical);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_words_match_themselves() {
        assert!(Keywords::matches(Keyword::Today, "today"));
        assert!(Keywords::matches(Keyword::Yesterday, "YESTERDAY"));
        assert_eq!(Keywords::lookup("friday"), Some(Keyword::Friday));
    }

    #[test]
    fn synonyms_extend() {
        Keywords::extend(&[
            ("hier".into(), "yesterday".into()),
            ("Demain".into(), "tomorrow".into()),
            ("lundi".into(), "monday".into()),
        ]);
        assert!(Keywords::matches(Keyword::Yesterday, "hier"));
        assert!(Keywords::matches(Keyword::Tomorrow, "demain"));
        assert!(Keywords::matches(Keyword::Monday, "Lundi"));
    }

    #[test]
    fn synonyms_cannot_shadow_canonical_words() {
        Keywords::extend(&[("today".into(), "yesterday".into())]);
        assert!(Keywords::matches(Keyword::Today, "today"));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        Keywords::extend(&[("someday".into(), "never".into())]);
        assert_eq!(Keywords::lookup("someday"), None);
    }

    #[test]
    fn poisoned_registry_drops_synonyms() {
        let registry = RwLock::new(HashMap::from([("yesterday".to_string(), Keyword::Yesterday)]));
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = registry.write().unwrap();
            panic!("writer died holding the lock");
        }));
        assert!(registry.is_poisoned());

        assert!(!extend_registry(&registry, &[("hier".into(), "yesterday".into())]));

        let fresh = RwLock::new(HashMap::from([("yesterday".to_string(), Keyword::Yesterday)]));
        assert!(extend_registry(&fresh, &[("hier".into(), "yesterday".into())]));
        assert_eq!(fresh.read().unwrap().get("hier"), Some(&Keyword::Yesterday));
    }
}
