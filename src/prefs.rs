use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::i18n::Lang;

const PREFS_DIR: &str = "playoff_scenarios";
const PREFS_FILE: &str = "prefs.json";
pub const LANG_KEY: &str = "lang";

// Flat string -> string store, one file per user.
type PrefsFile = BTreeMap<String, String>;

pub fn prefs_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(PREFS_DIR).join(PREFS_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(PREFS_DIR)
            .join(PREFS_FILE),
    )
}

pub fn load_pref(path: &Path, key: &str) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let prefs = serde_json::from_str::<PrefsFile>(&raw).ok()?;
    prefs.get(key).cloned()
}

pub fn save_pref(path: &Path, key: &str, value: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    // Keep whatever else is stored; a corrupt file is replaced.
    let mut prefs = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<PrefsFile>(&raw).ok())
        .unwrap_or_default();
    prefs.insert(key.to_string(), value.to_string());

    let json = serde_json::to_string_pretty(&prefs).context("encode prefs")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

pub fn load_lang(path: &Path) -> Option<Lang> {
    load_pref(path, LANG_KEY).and_then(|code| Lang::parse(&code))
}

pub fn save_lang(path: &Path, lang: Lang) -> Result<()> {
    save_pref(path, LANG_KEY, lang.code())
}
