use super::{apply_env_overrides, load_settings_from, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn default_base_is_relative_api_path_on_local_origin() {
    let settings = Settings::default();
    assert_eq!(settings.api_base, "/api");
    assert_eq!(
        settings.api_base_url().expect("base").as_str(),
        "http://127.0.0.1:8000/api"
    );
}

#[test]
fn absolute_base_is_kept_and_trailing_slash_dropped() {
    let settings = Settings {
        api_base: "https://art.example.org/v1/".into(),
        ..Settings::default()
    };
    assert_eq!(
        settings.api_base_url().expect("base").as_str(),
        "https://art.example.org/v1"
    );
}

#[test]
fn relative_base_resolves_against_configured_origin() {
    let settings = Settings {
        api_base: "/backend".into(),
        origin: "http://gallery.local:9000".into(),
        ..Settings::default()
    };
    assert_eq!(
        settings.api_base_url().expect("base").as_str(),
        "http://gallery.local:9000/backend"
    );
}

#[test]
fn invalid_origin_is_reported() {
    let settings = Settings {
        origin: "not a url".into(),
        ..Settings::default()
    };
    let err = settings.api_base_url().expect_err("must fail");
    assert!(err.to_string().contains("not a url"), "unexpected: {err}");
}

#[test]
fn env_overrides_apply_and_empty_values_fall_back() {
    let vars = env_of(&[
        ("ARTBASE_API_URL", ""),
        ("ARTBASE_ARTWORKS_PATH", "/artworks/all"),
        ("ARTBASE_REQUEST_TIMEOUT_SECS", "15"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| vars.get(name).cloned());

    assert_eq!(settings.api_base, "/api");
    assert_eq!(settings.artworks_path(), "/artworks/all");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn app_prefixed_api_url_wins_over_plain_one() {
    let vars = env_of(&[
        ("ARTBASE_API_URL", "http://a.example/api"),
        ("APP__API_URL", "http://b.example/api"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| vars.get(name).cloned());
    assert_eq!(settings.api_base, "http://b.example/api");
}

#[test]
fn unparsable_timeout_is_ignored() {
    let vars = env_of(&[("ARTBASE_REQUEST_TIMEOUT_SECS", "soon")]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| vars.get(name).cloned());
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn artworks_path_gets_leading_slash() {
    let settings = Settings {
        artworks_path: "artworks/all/".into(),
        ..Settings::default()
    };
    assert_eq!(settings.artworks_path(), "/artworks/all");
}

#[test]
fn reads_settings_file_when_present() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("artbase_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("mkdir");
    let path = temp_root.join("artbase.toml");
    fs::write(
        &path,
        "api_base = \"https://museum.example/api\"\nartworks_path = \"/artworks/all\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path);
    assert_eq!(settings.artworks_path, "/artworks/all");
    assert_eq!(settings.origin, Settings::default().origin);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_settings_file_uses_defaults() {
    let path = env::temp_dir().join("artbase_config_test_missing").join("artbase.toml");
    let settings = load_settings_from(&path);
    assert_eq!(settings.origin, Settings::default().origin);
}

#[test]
fn blank_file_values_fall_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("artbase_config_blank_{suffix}"));
    fs::create_dir_all(&temp_root).expect("mkdir");
    let path = temp_root.join("artbase.toml");
    fs::write(&path, "api_base = \"\"\norigin = \"  \"\n").expect("write settings");

    let settings = load_settings_from(&path);
    if env::var("ARTBASE_API_URL").is_err() && env::var("APP__API_URL").is_err() {
        assert_eq!(settings.api_base, "/api");
    }
    if env::var("ARTBASE_ORIGIN").is_err() {
        assert_eq!(settings.origin, Settings::default().origin);
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}
