//! Locating the investigation file that anchors an ISA dataset.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAB_INVESTIGATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^i_[A-Za-z0-9_]+\.txt$").expect("investigation pattern is valid")
});

/// Serialization flavor of an ISA dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Tab-delimited files, anchored by an `i_*.txt` investigation file.
    Tab,
    /// A single JSON document.
    Json,
}

impl DatasetKind {
    /// Order in which kinds are tried when nothing is known up front.
    pub const INFERENCE_ORDER: [DatasetKind; 2] = [DatasetKind::Tab, DatasetKind::Json];

    pub fn matches_investigation_rule(self, name: &str) -> bool {
        match self {
            Self::Tab => TAB_INVESTIGATION.is_match(name),
            Self::Json => !name.contains('/') && name.ends_with(".json"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tab => "ISA-Tab",
            Self::Json => "ISA-JSON",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvestigationMatch {
    Found(String),
    NotFound,
    /// More than one candidate; the dataset cannot be anchored.
    Ambiguous(Vec<String>),
}

impl InvestigationMatch {
    pub fn found(self) -> Option<String> {
        match self {
            Self::Found(name) => Some(name),
            Self::NotFound | Self::Ambiguous(_) => None,
        }
    }
}

pub fn locate_investigation<S: AsRef<str>>(names: &[S], kind: DatasetKind) -> InvestigationMatch {
    let mut candidates: Vec<String> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| kind.matches_investigation_rule(name))
        .map(str::to_owned)
        .collect();

    match candidates.len() {
        0 => InvestigationMatch::NotFound,
        1 => InvestigationMatch::Found(candidates.remove(0)),
        _ => InvestigationMatch::Ambiguous(candidates),
    }
}

/// The single investigation file among `names` for `kind`.
///
/// Several candidates are reported as a warning and treated like none; use
/// [`locate_investigation`] to tell the two apart.
pub fn find_investigation<S: AsRef<str>>(names: &[S], kind: DatasetKind) -> Option<String> {
    match locate_investigation(names, kind) {
        InvestigationMatch::Found(name) => {
            tracing::debug!(%kind, investigation = %name, "found investigation file");
            Some(name)
        }
        InvestigationMatch::NotFound => {
            tracing::debug!(%kind, "no investigation file");
            None
        }
        InvestigationMatch::Ambiguous(candidates) => {
            tracing::warn!(
                %kind,
                ?candidates,
                "more than one file matches the investigation file rule"
            );
            None
        }
    }
}

/// Find the investigation file when the kind may not be known yet.
///
/// With a `hint` only that kind's rule applies. Without one, Tab is tried
/// before JSON. The kind that matched is returned so callers can pass it as
/// the hint next time and keep interpreting the dataset the same way.
pub fn infer_investigation<S: AsRef<str>>(
    names: &[S],
    hint: Option<DatasetKind>,
) -> Option<(DatasetKind, String)> {
    match hint {
        Some(kind) => find_investigation(names, kind).map(|name| (kind, name)),
        None => DatasetKind::INFERENCE_ORDER
            .into_iter()
            .find_map(|kind| find_investigation(names, kind).map(|name| (kind, name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_rule() {
        let kind = DatasetKind::Tab;
        assert!(kind.matches_investigation_rule("i_investigation.txt"));
        assert!(kind.matches_investigation_rule("I_Inv_2.TXT"));
        assert!(!kind.matches_investigation_rule("s_study.txt"));
        assert!(!kind.matches_investigation_rule("i_.txt"));
        assert!(!kind.matches_investigation_rule("i_inv-1.txt"));
        assert!(!kind.matches_investigation_rule("xi_inv.txt"));
        assert!(!kind.matches_investigation_rule("sub/i_inv.txt"));
        assert!(!kind.matches_investigation_rule("i_inv.txt.bak"));
    }

    #[test]
    fn json_rule() {
        let kind = DatasetKind::Json;
        assert!(kind.matches_investigation_rule("study.json"));
        assert!(!kind.matches_investigation_rule("study.JSON"));
        assert!(!kind.matches_investigation_rule("study.json.gz"));
        assert!(!kind.matches_investigation_rule("assays/meta.json"));
    }

    #[test]
    fn tab_single_match() {
        let names = ["i_inv.txt", "s_study.txt", "readme.md"];
        assert_eq!(
            find_investigation(&names, DatasetKind::Tab),
            Some("i_inv.txt".to_string())
        );
    }

    #[test]
    fn tab_ambiguity_degrades_to_absent() {
        let names = ["i_inv.txt", "i_other.txt"];
        assert_eq!(find_investigation(&names, DatasetKind::Tab), None);
        assert_eq!(
            locate_investigation(&names, DatasetKind::Tab),
            InvestigationMatch::Ambiguous(vec!["i_inv.txt".into(), "i_other.txt".into()])
        );
    }

    #[test]
    fn json_single_and_empty() {
        assert_eq!(
            find_investigation(&["study.json"], DatasetKind::Json),
            Some("study.json".to_string())
        );
        let empty: [&str; 0] = [];
        assert_eq!(find_investigation(&empty, DatasetKind::Json), None);
        assert_eq!(
            locate_investigation(&empty, DatasetKind::Json),
            InvestigationMatch::NotFound
        );
    }

    #[test]
    fn infer_prefers_tab() {
        let names = ["i_inv.txt", "isa.json"];
        assert_eq!(
            infer_investigation(&names, None),
            Some((DatasetKind::Tab, "i_inv.txt".to_string()))
        );
    }

    #[test]
    fn infer_falls_back_to_json() {
        let names = ["i_a.txt", "i_b.txt", "isa.json"];
        assert_eq!(
            infer_investigation(&names, None),
            Some((DatasetKind::Json, "isa.json".to_string()))
        );
    }

    #[test]
    fn nested_json_does_not_compete_with_top_level() {
        let names = ["isa.json", "assays/meta.json"];
        assert_eq!(
            infer_investigation(&names, None),
            Some((DatasetKind::Json, "isa.json".to_string()))
        );
    }

    #[test]
    fn infer_respects_hint() {
        let names = ["i_inv.txt", "isa.json"];
        assert_eq!(
            infer_investigation(&names, Some(DatasetKind::Json)),
            Some((DatasetKind::Json, "isa.json".to_string()))
        );
        assert_eq!(infer_investigation(&["isa.json"], Some(DatasetKind::Tab)), None);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DatasetKind::Tab).unwrap(), "\"tab\"");
        assert_eq!(DatasetKind::Json.to_string(), "ISA-JSON");
    }
}
