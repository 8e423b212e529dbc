//! Name-to-identifier resolution over filtered list results.

use crate::error::{WxcError, WxcResult};

/// Outcome of looking a name up in a list of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Found(T),
    NotFound,
    Ambiguous(usize),
}

impl<T> Resolution<T> {
    /// Classify candidates returned by a server-side filter.
    ///
    /// A single candidate is taken as-is. With several, an exact match on
    /// `name` wins only when it is unique, since the server may prefix-match.
    pub fn from_candidates<F>(candidates: Vec<T>, name: &str, key: F) -> Self
    where
        F: Fn(&T) -> Option<&str>,
    {
        let count = candidates.len();
        if count <= 1 {
            return candidates
                .into_iter()
                .next()
                .map_or(Resolution::NotFound, Resolution::Found);
        }

        let mut exact: Vec<T> = candidates
            .into_iter()
            .filter(|c| key(c) == Some(name))
            .collect();
        if exact.len() == 1 {
            Resolution::Found(exact.remove(0))
        } else {
            Resolution::Ambiguous(count)
        }
    }

    pub fn into_result(self, kind: &'static str, name: &str) -> WxcResult<T> {
        match self {
            Resolution::Found(value) => Ok(value),
            Resolution::NotFound => Err(WxcError::not_found(kind, name)),
            Resolution::Ambiguous(count) => Err(WxcError::Ambiguous {
                kind,
                name: name.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_is_not_found() {
        let res = Resolution::from_candidates(names(&[]), "HQ", |s| Some(s.as_str()));
        assert_eq!(res, Resolution::NotFound);

        let err = res.into_result("Location", "HQ").unwrap_err();
        assert!(matches!(err, WxcError::NotFound { kind: "Location", .. }));
        assert_eq!(err.to_string(), "Location 'HQ' not found");
    }

    #[test]
    fn test_single_candidate_is_found() {
        let res = Resolution::from_candidates(names(&["HQ East"]), "HQ", |s| Some(s.as_str()));
        assert_eq!(res, Resolution::Found("HQ East".to_string()));
    }

    #[test]
    fn test_unique_exact_match_wins() {
        let res = Resolution::from_candidates(names(&["HQ", "HQ East"]), "HQ", |s| {
            Some(s.as_str())
        });
        assert_eq!(res, Resolution::Found("HQ".to_string()));
    }

    #[test]
    fn test_several_without_exact_match_is_ambiguous() {
        let res = Resolution::from_candidates(names(&["HQ East", "HQ West"]), "HQ", |s| {
            Some(s.as_str())
        });
        assert_eq!(res, Resolution::Ambiguous(2));

        let err = res.into_result("Location", "HQ").unwrap_err();
        assert!(matches!(err, WxcError::Ambiguous { count: 2, .. }));
    }

    #[test]
    fn test_duplicate_exact_matches_are_ambiguous() {
        let res = Resolution::from_candidates(names(&["HQ", "HQ", "HQ East"]), "HQ", |s| {
            Some(s.as_str())
        });
        assert_eq!(res, Resolution::Ambiguous(3));
    }
}
