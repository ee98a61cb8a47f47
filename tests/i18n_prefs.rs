use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use playoff_scenarios::config::{AppConfig, DEFAULT_SOURCE};
use playoff_scenarios::i18n::{Key, Lang, t};
use playoff_scenarios::prefs::{load_lang, load_pref, save_lang, save_pref};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn every_key_has_text_in_every_language() {
    for lang in Lang::ALL {
        for key in Key::ALL {
            assert!(!t(lang, key).trim().is_empty(), "{:?}/{}", lang, key.name());
        }
    }
    assert_ne!(t(Lang::En, Key::Clear), t(Lang::Ja, Key::Clear));
    assert_ne!(t(Lang::Ja, Key::Title), t(Lang::Zh, Key::Title));
}

#[test]
fn key_names_round_trip() {
    for key in Key::ALL {
        assert_eq!(Key::from_name(key.name()), Some(key));
    }
    assert_eq!(Key::from_name("callout-apina"), Some(Key::CalloutApina));
    assert_eq!(Key::from_name("noteGiGO"), Some(Key::NoteGigo));
    assert_eq!(Key::from_name("nope"), None);
}

#[test]
fn lang_parsing_and_locale_detection() {
    assert_eq!(Lang::parse("ja"), Some(Lang::Ja));
    assert_eq!(Lang::parse(" ZH-Hant "), Some(Lang::Zh));
    assert_eq!(Lang::parse("en_US.UTF-8"), Some(Lang::En));
    assert_eq!(Lang::parse("fr"), None);

    assert_eq!(Lang::from_locale(Some("ja_JP.UTF-8")), Lang::Ja);
    assert_eq!(Lang::from_locale(Some("zh_CN")), Lang::Zh);
    assert_eq!(Lang::from_locale(Some("de_DE")), Lang::En);
    assert_eq!(Lang::from_locale(None), Lang::En);

    assert_eq!(Lang::En.next(), Lang::Ja);
    assert_eq!(Lang::Zh.next(), Lang::En);
}

#[test]
fn config_defaults_and_overrides() {
    let cfg = AppConfig::from_lookup(lookup_from(&[]));
    assert_eq!(cfg.source, DEFAULT_SOURCE);
    assert_eq!(cfg.forced_lang, None);
    assert_eq!(cfg.tick, Duration::from_millis(50));
    assert_eq!(cfg.http_timeout, Duration::from_secs(10));

    let cfg = AppConfig::from_lookup(lookup_from(&[
        ("SCENARIOS_SOURCE", " https://example.org/data.json "),
        ("SCENARIOS_LANG", "zh"),
        ("SCENARIOS_TICK_MS", "1"),
        ("SCENARIOS_HTTP_TIMEOUT_SECS", "abc"),
    ]));
    assert_eq!(cfg.source, "https://example.org/data.json");
    assert_eq!(cfg.forced_lang, Some(Lang::Zh));
    assert_eq!(cfg.tick, Duration::from_millis(10));
    assert_eq!(cfg.http_timeout, Duration::from_secs(10));
}

#[test]
fn initial_lang_precedence() {
    let plain = AppConfig::from_lookup(lookup_from(&[]));
    assert_eq!(plain.initial_lang(None, Some("ja_JP")), Lang::Ja);
    assert_eq!(plain.initial_lang(Some(Lang::Zh), Some("ja_JP")), Lang::Zh);
    assert_eq!(plain.initial_lang(None, None), Lang::En);

    let forced = AppConfig::from_lookup(lookup_from(&[("SCENARIOS_LANG", "en")]));
    assert_eq!(forced.initial_lang(Some(Lang::Zh), Some("ja_JP")), Lang::En);
}

#[test]
fn lang_preference_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("prefs.json");

    assert_eq!(load_lang(&path), None);
    save_lang(&path, Lang::Ja).expect("save");
    assert_eq!(load_lang(&path), Some(Lang::Ja));

    save_lang(&path, Lang::Zh).expect("save again");
    assert_eq!(load_lang(&path), Some(Lang::Zh));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn saving_keeps_other_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");

    save_pref(&path, "theme", "dark").expect("save theme");
    save_lang(&path, Lang::En).expect("save lang");
    assert_eq!(load_pref(&path, "theme").as_deref(), Some("dark"));
    assert_eq!(load_lang(&path), Some(Lang::En));
}

#[test]
fn corrupt_or_unknown_values_fall_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");

    fs::write(&path, "{not json").unwrap();
    assert_eq!(load_lang(&path), None);
    save_lang(&path, Lang::Zh).expect("corrupt file is replaced");
    assert_eq!(load_lang(&path), Some(Lang::Zh));

    save_pref(&path, "lang", "klingon").unwrap();
    assert_eq!(load_lang(&path), None);
}
