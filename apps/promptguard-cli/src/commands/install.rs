// install.rs - Register promptguard as a UserPromptSubmit hook.
//
// Adds an entry to `<project>/.claude/settings.json`:
//
//   { "hooks": { "UserPromptSubmit": [
//       { "hooks": [ { "type": "command", "command": "promptguard" } ] } ] } }
//
// Existing settings are preserved. If a promptguard command is already
// registered, nothing is written.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use promptguard_hook::HOOK_EVENT_NAME;
use serde_json::{json, Map, Value};

/// Where the hook gets registered and what command it runs.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// The Claude settings file to update.
    pub settings_path: PathBuf,
    /// Command the host runs for each prompt.
    pub command: String,
}

impl InstallConfig {
    /// Standard `.claude/settings.json` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        Self {
            settings_path: project_root.as_ref().join(".claude").join("settings.json"),
            command: "promptguard".to_string(),
        }
    }
}

pub fn execute(project_root: &Path) -> anyhow::Result<()> {
    let config = InstallConfig::for_project(project_root);
    if install(&config)? {
        println!(
            "  Registered {} hook in {}",
            HOOK_EVENT_NAME,
            config.settings_path.display()
        );
    } else {
        println!(
            "  {} already registers promptguard, skipping",
            config.settings_path.display()
        );
    }
    Ok(())
}

/// Register the hook. Returns `false` when it was already registered.
fn install(config: &InstallConfig) -> anyhow::Result<bool> {
    let mut settings = if config.settings_path.exists() {
        let raw = fs::read_to_string(&config.settings_path)
            .with_context(|| format!("failed to read {}", config.settings_path.display()))?;
        serde_json::from_str::<Value>(&raw)
            .with_context(|| format!("{} is not valid JSON", config.settings_path.display()))?
    } else {
        json!({})
    };

    let root = settings
        .as_object_mut()
        .with_context(|| format!("{} is not a JSON object", config.settings_path.display()))?;
    let entries = event_entries(root)?;

    if entries.iter().any(|entry| registers(entry, &config.command)) {
        return Ok(false);
    }

    entries.push(json!({
        "hooks": [{ "type": "command", "command": config.command }]
    }));

    if let Some(parent) = config.settings_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(
        &config.settings_path,
        serde_json::to_string_pretty(&settings)? + "\n",
    )?;
    tracing::debug!(path = %config.settings_path.display(), "hook registered");
    Ok(true)
}

/// The `hooks.UserPromptSubmit` array, created if missing.
fn event_entries(root: &mut Map<String, Value>) -> anyhow::Result<&mut Vec<Value>> {
    let hooks = root
        .entry("hooks")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .context("'hooks' in settings is not an object")?;
    hooks
        .entry(HOOK_EVENT_NAME)
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .with_context(|| format!("'hooks.{}' in settings is not an array", HOOK_EVENT_NAME))
}

/// True when one of the entry's hooks runs `command`, by bare name or path,
/// with or without arguments.
fn registers(entry: &Value, command: &str) -> bool {
    entry["hooks"].as_array().is_some_and(|hooks| {
        hooks
            .iter()
            .filter_map(|hook| hook["command"].as_str())
            .filter_map(|registered| registered.split_whitespace().next())
            .any(|program| Path::new(program).file_name() == Some(OsStr::new(command)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_settings(dir: &TempDir) -> Value {
        let raw = fs::read_to_string(dir.path().join(".claude/settings.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn install_creates_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = InstallConfig::for_project(dir.path());

        assert!(install(&config).unwrap());

        let settings = read_settings(&dir);
        let hook = &settings["hooks"]["UserPromptSubmit"][0]["hooks"][0];
        assert_eq!(hook["type"], "command");
        assert_eq!(hook["command"], "promptguard");
    }

    #[test]
    fn install_preserves_existing_settings() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".claude")).unwrap();
        fs::write(
            dir.path().join(".claude/settings.json"),
            r#"{
                "permissions": { "allow": ["Bash(ls:*)"] },
                "hooks": {
                    "PreToolUse": [{ "matcher": "Bash", "hooks": [{ "type": "command", "command": "guard" }] }],
                    "UserPromptSubmit": [{ "hooks": [{ "type": "command", "command": "other-hook" }] }]
                }
            }"#,
        )
        .unwrap();

        assert!(install(&InstallConfig::for_project(dir.path())).unwrap());

        let settings = read_settings(&dir);
        assert_eq!(settings["permissions"]["allow"][0], "Bash(ls:*)");
        assert_eq!(settings["hooks"]["PreToolUse"][0]["matcher"], "Bash");
        let entries = settings["hooks"]["UserPromptSubmit"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["hooks"][0]["command"], "other-hook");
        assert_eq!(entries[1]["hooks"][0]["command"], "promptguard");
    }

    #[test]
    fn install_twice_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let config = InstallConfig::for_project(dir.path());

        assert!(install(&config).unwrap());
        let first = fs::read_to_string(&config.settings_path).unwrap();
        assert!(!install(&config).unwrap());
        let second = fs::read_to_string(&config.settings_path).unwrap();
        assert_eq!(first, second);
    }

    fn write_settings(dir: &TempDir, command: &str) {
        fs::create_dir_all(dir.path().join(".claude")).unwrap();
        let settings = json!({
            "hooks": { "UserPromptSubmit": [{ "hooks": [{ "type": "command", "command": command }] }] }
        });
        fs::write(
            dir.path().join(".claude/settings.json"),
            settings.to_string(),
        )
        .unwrap();
    }

    #[test]
    fn similarly_named_command_is_not_a_registration() {
        let dir = TempDir::new().unwrap();
        write_settings(&dir, "promptguard-legacy --strict");

        assert!(install(&InstallConfig::for_project(dir.path())).unwrap());

        let settings = read_settings(&dir);
        let entries = settings["hooks"]["UserPromptSubmit"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["hooks"][0]["command"], "promptguard");
    }

    #[test]
    fn command_by_path_with_args_counts_as_registered() {
        let dir = TempDir::new().unwrap();
        write_settings(&dir, "/usr/local/bin/promptguard hook");

        assert!(!install(&InstallConfig::for_project(dir.path())).unwrap());
        let entries = read_settings(&dir)["hooks"]["UserPromptSubmit"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(entries, 1);
    }

    #[test]
    fn install_rejects_malformed_settings() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".claude")).unwrap();
        fs::write(dir.path().join(".claude/settings.json"), "not json").unwrap();

        assert!(install(&InstallConfig::for_project(dir.path())).is_err());
        // Should not overwrite.
        let content = fs::read_to_string(dir.path().join(".claude/settings.json")).unwrap();
        assert_eq!(content, "not json");
    }

    #[test]
    fn install_rejects_non_array_event_entry() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".claude")).unwrap();
        fs::write(
            dir.path().join(".claude/settings.json"),
            r#"{"hooks": {"UserPromptSubmit": "promptguard"}}"#,
        )
        .unwrap();

        assert!(install(&InstallConfig::for_project(dir.path())).is_err());
    }
}
