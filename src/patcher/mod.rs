//! Anchored text splicing for a known source file.
//!
//! A [`PatchPlan`] is an ordered list of [`Splice`]s. Each splice locates an
//! exact anchor substring and inserts text right before or right after it.
//! Everything else in the document is left byte-identical.

pub mod search;

use crate::{digest_hex, AnchorPolicy, Error, PatcherConfig, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use search::search_plan;

/// Where a splice puts its text relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    After,
    Before,
}

/// One anchored insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splice {
    /// Short label used in reports and errors
    pub name: String,
    /// Exact substring that marks the insertion point
    pub anchor: String,
    /// Text to insert
    pub insertion: String,
    #[serde(default)]
    pub placement: Placement,
    /// Text whose presence means the splice went in earlier, possibly from
    /// an older revision of `insertion`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_marker: Option<String>,
}

impl Splice {
    pub fn new(
        name: impl Into<String>,
        anchor: impl Into<String>,
        insertion: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            name: name.into(),
            anchor: anchor.into(),
            insertion: insertion.into(),
            placement,
            applied_marker: None,
        }
    }

    pub fn with_applied_marker(mut self, marker: impl Into<String>) -> Self {
        self.applied_marker = Some(marker.into());
        self
    }

    /// Whether `document` already carries this splice
    pub fn is_applied(&self, document: &str) -> bool {
        document.contains(&self.post_image())
            || self
                .applied_marker
                .as_deref()
                .is_some_and(|marker| document.contains(marker))
    }

    /// The anchor together with its insertion, as it reads once applied.
    pub fn post_image(&self) -> String {
        match self.placement {
            Placement::After => format!("{}{}", self.anchor, self.insertion),
            Placement::Before => format!("{}{}", self.insertion, self.anchor),
        }
    }
}

/// Ordered list of splices applied one after another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPlan {
    pub splices: Vec<Splice>,
}

impl PatchPlan {
    /// Parse a plan from JSON, e.g.
    /// `{"splices": [{"name": "x", "anchor": "a", "insertion": "b", "placement": "before"}]}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let plan: PatchPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Reject plans that could never resolve an insertion point.
    pub fn validate(&self) -> Result<()> {
        if self.splices.is_empty() {
            return Err(Error::ConfigError("patch plan has no splices".into()));
        }
        for s in &self.splices {
            if s.anchor.is_empty() {
                return Err(Error::ConfigError(format!("splice `{}` has an empty anchor", s.name)));
            }
            if s.insertion.is_empty() {
                return Err(Error::ConfigError(format!(
                    "splice `{}` has nothing to insert",
                    s.name
                )));
            }
            if s.applied_marker.as_deref() == Some("") {
                return Err(Error::ConfigError(format!(
                    "splice `{}` has an empty applied marker",
                    s.name
                )));
            }
        }
        Ok(())
    }
}

/// What happened to one splice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// Text was inserted at this byte offset
    Applied { offset: usize },
    /// The post-image or applied marker was already in the document; nothing inserted
    AlreadyApplied,
    /// Anchor missing under the lenient policy; nothing inserted
    Skipped,
}

/// Document text after a plan has been applied in memory
#[derive(Debug, Clone)]
pub struct Patched {
    pub content: String,
    pub outcomes: Vec<(String, SpliceOutcome)>,
}

impl Patched {
    pub fn changed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, o)| matches!(o, SpliceOutcome::Applied { .. }))
    }
}

/// Apply `plan` to `document` in order, each splice seeing the previous ones' output.
///
/// Under [`AnchorPolicy::Strict`] an anchor must occur exactly once; the first
/// failing splice aborts the whole plan. Under [`AnchorPolicy::Lenient`] a
/// missing anchor is skipped and an ambiguous one is spliced at its first match.
pub fn apply(document: &str, plan: &PatchPlan, policy: AnchorPolicy) -> Result<Patched> {
    plan.validate()?;
    let mut content = document.to_string();
    let mut outcomes = Vec::with_capacity(plan.splices.len());

    for splice in &plan.splices {
        let outcome = apply_one(&mut content, splice, policy)?;
        debug!("splice `{}`: {:?}", splice.name, outcome);
        outcomes.push((splice.name.clone(), outcome));
    }

    Ok(Patched { content, outcomes })
}

fn apply_one(content: &mut String, splice: &Splice, policy: AnchorPolicy) -> Result<SpliceOutcome> {
    if splice.is_applied(content) {
        return Ok(SpliceOutcome::AlreadyApplied);
    }

    let matches: Vec<usize> = content.match_indices(&splice.anchor).map(|(i, _)| i).collect();
    let at = match (matches.as_slice(), policy) {
        ([], AnchorPolicy::Strict) => {
            return Err(Error::AnchorNotFound {
                splice: splice.name.clone(),
                anchor: splice.anchor.clone(),
            })
        }
        ([], AnchorPolicy::Lenient) => {
            warn!("anchor for splice `{}` not found, skipping", splice.name);
            return Ok(SpliceOutcome::Skipped);
        }
        ([only], _) => *only,
        (many, AnchorPolicy::Strict) => {
            return Err(Error::AnchorAmbiguous {
                splice: splice.name.clone(),
                anchor: splice.anchor.clone(),
                count: many.len(),
            })
        }
        ([first, ..], AnchorPolicy::Lenient) => {
            warn!(
                "anchor for splice `{}` found {} times, using the first",
                splice.name,
                matches.len()
            );
            *first
        }
    };

    let offset = match splice.placement {
        Placement::After => at + splice.anchor.len(),
        Placement::Before => at,
    };
    content.insert_str(offset, &splice.insertion);
    Ok(SpliceOutcome::Applied { offset })
}

/// Summary of a patch run against a file
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub target: PathBuf,
    pub outcomes: Vec<(String, SpliceOutcome)>,
    /// Whether any splice inserted text
    pub changed: bool,
    /// Whether the target file was rewritten
    pub written: bool,
    /// SHA-256 of the resulting document, hex encoded
    pub digest: String,
}

/// Reads the target file, applies a plan and writes the result back in place.
pub struct Patcher {
    config: PatcherConfig,
    plan: PatchPlan,
}

impl Patcher {
    /// Patcher using the built-in search plan
    pub fn new(config: PatcherConfig) -> Self {
        Self::with_plan(config, search_plan())
    }

    pub fn with_plan(config: PatcherConfig, plan: PatchPlan) -> Self {
        Self { config, plan }
    }

    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    pub fn plan(&self) -> &PatchPlan {
        &self.plan
    }

    /// Run the plan. The file is rewritten only when every splice resolved
    /// and at least one of them inserted text.
    pub fn run(&self) -> Result<PatchReport> {
        let target = &self.config.target_path;
        let original = fs::read_to_string(target).map_err(|e| Error::io(target, e))?;
        debug!("read {} bytes from {}", original.len(), target.display());

        let patched = apply(&original, &self.plan, self.config.policy)?;
        let changed = patched.changed();
        let written = changed && !self.config.dry_run;
        if written {
            fs::write(target, &patched.content).map_err(|e| Error::io(target, e))?;
        }

        let digest = digest_hex(patched.content.as_bytes());
        info!(
            "patched {} (changed: {}, written: {}, sha256: {})",
            target.display(),
            changed,
            written,
            digest
        );

        Ok(PatchReport {
            target: target.clone(),
            outcomes: patched.outcomes,
            changed,
            written,
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(anchor: &str, insertion: &str, placement: Placement) -> PatchPlan {
        PatchPlan {
            splices: vec![Splice::new("t", anchor, insertion, placement)],
        }
    }

    #[test]
    fn after_and_before_placement() {
        let p = plan("B", "x", Placement::After);
        assert_eq!(apply("ABC", &p, AnchorPolicy::Strict).unwrap().content, "ABxC");
        let p = plan("B", "x", Placement::Before);
        assert_eq!(apply("ABC", &p, AnchorPolicy::Strict).unwrap().content, "AxBC");
    }

    #[test]
    fn strict_reports_missing_anchor() {
        let p = plan("zzz", "x", Placement::After);
        let err = apply("abc", &p, AnchorPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::AnchorNotFound { ref splice, .. } if splice == "t"));
    }

    #[test]
    fn strict_rejects_repeated_anchor() {
        let p = plan("a", "x", Placement::Before);
        let err = apply("a-a-a", &p, AnchorPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::AnchorAmbiguous { count: 3, .. }));
    }

    #[test]
    fn lenient_uses_first_match_and_skips_missing() {
        let p = plan("a", "x", Placement::Before);
        let out = apply("a-a", &p, AnchorPolicy::Lenient).unwrap();
        assert_eq!(out.content, "xa-a");

        let p = plan("zzz", "x", Placement::After);
        let out = apply("abc", &p, AnchorPolicy::Lenient).unwrap();
        assert_eq!(out.content, "abc");
        assert_eq!(out.outcomes[0].1, SpliceOutcome::Skipped);
        assert!(!out.changed());
    }

    #[test]
    fn second_application_is_a_noop() {
        let p = plan("B", "x", Placement::After);
        let once = apply("ABC", &p, AnchorPolicy::Strict).unwrap();
        let twice = apply(&once.content, &p, AnchorPolicy::Strict).unwrap();
        assert_eq!(twice.content, once.content);
        assert_eq!(twice.outcomes[0].1, SpliceOutcome::AlreadyApplied);
    }

    #[test]
    fn marker_detects_an_older_insertion() {
        let p = PatchPlan {
            splices: vec![Splice::new("t", "B", "// new v2\n", Placement::After)
                .with_applied_marker("// new")],
        };
        let out = apply("AB// new v1\nC", &p, AnchorPolicy::Strict).unwrap();
        assert_eq!(out.content, "AB// new v1\nC");
        assert_eq!(out.outcomes[0].1, SpliceOutcome::AlreadyApplied);
        assert!(!out.changed());
    }

    #[test]
    fn offsets_follow_earlier_splices() {
        let p = PatchPlan {
            splices: vec![
                Splice::new("one", "A", "11", Placement::After),
                Splice::new("two", "C", "22", Placement::Before),
            ],
        };
        let out = apply("ABC", &p, AnchorPolicy::Strict).unwrap();
        assert_eq!(out.content, "A11B22C");
        assert_eq!(out.outcomes[1].1, SpliceOutcome::Applied { offset: 4 });
    }

    #[test]
    fn plan_from_json_defaults_to_after() {
        let p = PatchPlan::from_json_str(r#"{"splices":[{"name":"n","anchor":"a","insertion":"b"}]}"#)
            .unwrap();
        assert_eq!(p.splices[0].placement, Placement::After);

        let err = PatchPlan::from_json_str(r#"{"splices":[{"name":"n","anchor":"","insertion":"b"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(PatchPlan::from_json_str("not json").is_err());

        let p = PatchPlan::from_json_str(
            r#"{"splices":[{"name":"n","anchor":"a","insertion":"b","applied_marker":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(p.splices[0].applied_marker.as_deref(), Some("x"));
    }
}
