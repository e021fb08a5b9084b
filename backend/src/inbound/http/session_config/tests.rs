//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

/// Key file removed again on drop.
#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write temporary key file");
        Self { path }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn release_key() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release configuration should have been rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_configuration(release_key: TempKeyFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&release_key)), BuildMode::Release)
        .expect("complete configuration");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(release_key: TempKeyFile, #[case] name: &'static str) {
    let mut vars = release_vars(&release_key);
    vars.remove(name);
    let error = release_error(vars);
    assert!(
        matches!(error, SessionConfigError::MissingEnv { name: missing } if missing == name),
        "{error}"
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_malformed_toggles(
    release_key: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&release_key);
    vars.insert(name, value.to_owned());
    let error = release_error(vars);
    assert!(
        matches!(error, SessionConfigError::InvalidEnv { name: invalid, .. } if invalid == name),
        "{error}"
    );
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: TempKeyFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_key: TempKeyFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
    let error = release_error(release_vars(&short));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file(release_key: TempKeyFile) {
    let mut vars = release_vars(&release_key);
    vars.insert(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("absent-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    );
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_falls_back_for_everything_missing() {
    let vars = HashMap::from([(
        KEY_FILE_ENV,
        std::env::temp_dir()
            .join(format!("absent-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
    )]);
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug is lenient");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_accepts_keys_release_would_reject() {
    let key = TempKeyFile::new(SESSION_KEY_DERIVE_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.insert(SAMESITE_ENV, "none".to_owned());
    vars.insert(COOKIE_SECURE_ENV, "false".to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug is lenient");
    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::None);
    assert_eq!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_DERIVE_MIN_LEN]))
    );
}

#[rstest]
fn debug_replaces_underivable_keys_with_ephemeral_ones() {
    let key = TempKeyFile::new(SESSION_KEY_DERIVE_MIN_LEN - 1);
    let settings = session_settings_from_env(&mock_env(release_vars(&key)), BuildMode::Debug)
        .expect("debug is lenient");
    assert_ne!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_DERIVE_MIN_LEN]))
    );
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case(" n ", Some(false))]
#[case("FALSE", Some(false))]
#[case("2", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
