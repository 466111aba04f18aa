use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::color::ColorChoice;
use crate::error::{Result, TintError};
use crate::helper::resolve_against;

/// A batch of tint jobs, read from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// File stem of the outputs.
    pub name: String,
    pub mask: PathBuf,
    #[serde(default)]
    pub base: Option<PathBuf>,
    #[serde(default)]
    pub color: ColorChoice,
}

impl Job {
    /// File stems this job writes under the output folder.
    pub fn output_stems(&self) -> Vec<String> {
        let mut stems = vec![format!("{}_mask", self.name)];
        if self.base.is_some() {
            stems.push(self.name.clone());
        }
        stems
    }
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("Output")
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read a manifest and anchor its relative paths at the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut manifest: Manifest = serde_json::from_reader(BufReader::new(file))?;
        manifest.validate()?;

        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        manifest.resolve_paths(root);
        debug!(path = %path.display(), jobs = manifest.jobs.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Check that every job writes its own files inside `output_folder`.
    ///
    /// Names must be plain file stems, and no two jobs may produce the same
    /// output file (`a` and `a_mask` with a base both write `a_mask.png`).
    pub fn validate(&self) -> Result<()> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        for job in &self.jobs {
            let invalid = |reason: String| TintError::InvalidJob {
                name: job.name.clone(),
                reason,
            };

            if job.name.is_empty() || job.name == "." || job.name == ".." {
                return Err(invalid("name must be a plain file stem".to_string()));
            }
            if job.name.contains(['/', '\\']) {
                return Err(invalid("name must not contain path separators".to_string()));
            }

            for stem in job.output_stems() {
                if let Some(other) = owners.insert(stem.clone(), &job.name) {
                    return Err(invalid(format!("{stem}.png is also written by job '{other}'")));
                }
            }
        }
        Ok(())
    }

    pub fn resolve_paths(&mut self, root: &Path) {
        self.output_folder = resolve_against(root, &self.output_folder);
        for job in &mut self.jobs {
            job.mask = resolve_against(root, &job.mask);
            job.base = job.base.as_deref().map(|b| resolve_against(root, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let manifest = Manifest::from_json(r#"{ "jobs": [ { "name": "a", "mask": "a.png" } ] }"#)
            .unwrap();
        assert_eq!(manifest.output_folder, PathBuf::from("Output"));
        let job = &manifest.jobs[0];
        assert_eq!(job.color, ColorChoice::MIDPOINT);
        assert!(job.base.is_none());
    }

    #[test]
    fn colors_accept_every_textual_form() {
        let manifest = Manifest::from_json(
            r##"{
                "output_folder": "out",
                "jobs": [
                    { "name": "a", "mask": "m.png", "color": "#102030" },
                    { "name": "b", "mask": "m.png", "color": [1, 2, 3] },
                    { "name": "c", "mask": "m.png", "color": "cyan" },
                    { "name": "d", "mask": "m.png", "base": "b.png", "color": "4,5,6" }
                ]
            }"##,
        )
        .unwrap();
        let colors: Vec<_> = manifest.jobs.iter().map(|j| j.color).collect();
        assert_eq!(
            colors,
            vec![
                ColorChoice::rgb(16, 32, 48),
                ColorChoice::rgb(1, 2, 3),
                ColorChoice::rgb(0, 255, 255),
                ColorChoice::rgb(4, 5, 6),
            ]
        );
    }

    #[test]
    fn out_of_range_color_fails_to_parse() {
        let err = Manifest::from_json(
            r#"{ "jobs": [ { "name": "a", "mask": "m.png", "color": [0, 0, 300] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TintError::Manifest(_)));
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Manifest::from_json(
            r#"{ "jobs": [
                { "name": "a", "mask": "m.png", "color": "red" },
                { "name": "a", "mask": "m.png", "color": "blue" }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TintError::InvalidJob { ref name, .. } if name == "a"));
        assert!(err.to_string().contains("a_mask.png"));
    }

    #[test]
    fn colliding_output_stems_are_rejected() {
        let err = Manifest::from_json(
            r#"{ "jobs": [
                { "name": "a", "mask": "m.png" },
                { "name": "a_mask", "mask": "m.png", "base": "b.png" }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TintError::InvalidJob { ref name, .. } if name == "a_mask"));

        // without a base, `a_mask` only writes `a_mask_mask.png`
        Manifest::from_json(
            r#"{ "jobs": [
                { "name": "a", "mask": "m.png" },
                { "name": "a_mask", "mask": "m.png" }
            ] }"#,
        )
        .unwrap();
    }

    #[test]
    fn names_cannot_leave_the_output_folder() {
        for name in ["../up", "sub/a", "sub\\\\a", "..", ".", ""] {
            let json = format!(r#"{{ "jobs": [ {{ "name": "{name}", "mask": "m.png" }} ] }}"#);
            assert!(
                matches!(Manifest::from_json(&json), Err(TintError::InvalidJob { .. })),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Manifest::from_json(r#"{ "jobs": [], "threshold": 3 }"#).is_err());
    }

    #[test]
    fn paths_resolve_against_root() {
        let mut manifest = Manifest::from_json(
            r#"{ "output_folder": "out", "jobs": [ { "name": "a", "mask": "m.png", "base": "/abs/b.png" } ] }"#,
        )
        .unwrap();
        manifest.resolve_paths(Path::new("/jobs"));
        assert_eq!(manifest.output_folder, PathBuf::from("/jobs/out"));
        assert_eq!(manifest.jobs[0].mask, PathBuf::from("/jobs/m.png"));
        assert_eq!(manifest.jobs[0].base, Some(PathBuf::from("/abs/b.png")));
    }
}
