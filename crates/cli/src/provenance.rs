use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the subcommand and its parameters.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }
}

/// The provenance document shared by `report` and the `--out` sidecars.
pub fn block(payload: &Payload, outputs: &[String]) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "library_version": arnoux_yoccoz::VERSION,
        "command": payload.command,
        "params": payload.params,
        "outputs": outputs,
    })
}

/// Write `<artifact>.provenance.json` next to `artifact`, tagged with the caller's location.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    let callsite = Location::caller();
    let mut doc = block(payload, &[artifact.to_string_lossy().into_owned()]);
    doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_build = option_env!("GIT_COMMIT").map(str::to_string);
    let from_env = std::env::var("GIT_COMMIT").ok();
    from_build
        .into_iter()
        .chain(from_env)
        .find(|rev| !rev.is_empty())
        .or_else(|| {
            let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout)
                .ok()
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        let derived = provenance_path(Path::new("/tmp/runs/curves.json"));
        assert_eq!(derived, Path::new("/tmp/runs/curves.provenance.json"));
    }

    #[test]
    fn sidecar_records_command_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("search.json");
        fs::write(&artifact, "[]").unwrap();
        let payload = Payload::new("search", json!({ "depth": 50 }));
        let path = write_sidecar(&artifact, &payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["command"], "search");
        assert_eq!(parsed["params"]["depth"], 50);
        assert_eq!(parsed["library_version"], arnoux_yoccoz::VERSION);
        assert!(parsed["callsite"]["line"].as_u64().is_some());
    }
}
