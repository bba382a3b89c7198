use super::load::{default_catalog_path, default_config_path, resolve_config_path};
use super::schema::*;
use crate::catalog::SortKey;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_hark_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HARK_CONFIG_PATH", "/tmp/hark-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/hark-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("hark")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("hark")
            .join("config.toml")
    );
}

#[test]
fn default_catalog_path_prefers_xdg_data_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_catalog_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-data-home")
            .join("hark")
            .join("catalog.json")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_sort_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
path = "/tmp/shows.json"

[playback]
switch_delay_ms = 120

[controls]
scrub_seconds = 30

[ui]
theme = "light"
header_text = "hello"
page_size = 6
sort = "date-asc"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HARK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("HARK__PLAYBACK__SWITCH_DELAY_MS");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.catalog.path,
        Some(std::path::PathBuf::from("/tmp/shows.json"))
    );
    assert_eq!(s.playback.switch_delay_ms, 120);
    assert_eq!(s.controls.scrub_seconds, 30);
    assert!(matches!(s.ui.theme, ThemeSetting::Light));
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.page_size, 6);
    assert_eq!(s.ui.sort, SortKey::Oldest);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
switch_delay_ms = 50
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HARK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("HARK__PLAYBACK__SWITCH_DELAY_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.switch_delay_ms, 0);
}

#[test]
fn validate_rejects_zero_page_size() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());
    s.ui.page_size = 0;
    assert!(s.validate().is_err());
}
