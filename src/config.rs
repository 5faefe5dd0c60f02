use crate::finder::FinderConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// TOML job file holding an ordered list of finders:
///
/// ```toml
/// [[finder]]
/// regexp = "ERROR"
/// file_set = "logs/**/*.log"
/// unstable_if_found = true
///
/// [[finder]]
/// regexp = "deploy ok"
/// also_check_console = true
/// succeed_if_found = true
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default, rename = "finder")]
    pub finders: Vec<FinderConfig>,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;
        let job: JobFile = toml::from_str(&content).with_context(|| "Failed to parse job file")?;
        if job.finders.is_empty() {
            anyhow::bail!(
                "Job file '{}' declares no [[finder]] entries",
                path.display()
            );
        }
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_finder_list() {
        let job: JobFile = toml::from_str(
            r#"
            [[finder]]
            regexp = "ERROR"
            unstable_if_found = true

            [[finder]]
            regexp = "deploy ok"
            also_check_console = true
            succeed_if_found = true
            "#,
        )
        .unwrap();
        assert_eq!(job.finders.len(), 2);
        assert_eq!(job.finders[0].regexp, "ERROR");
        assert!(job.finders[0].unstable_if_found);
        assert!(job.finders[1].also_check_console);
        assert!(job.finders[1].succeed_if_found);
        assert!(job.finders[1].file_set.is_none());
    }
}
