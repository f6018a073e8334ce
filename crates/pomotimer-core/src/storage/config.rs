//! TOML-based timer configuration.
//!
//! Stores the four durations that drive the Pomodoro cycle:
//! - Work session length (minutes)
//! - Short break length (minutes)
//! - Long break length (minutes)
//! - How many work sessions pass between long breaks
//!
//! The default file lives at `~/.config/pomotimer/config.toml`. Stores are
//! injected through [`ConfigStore`], so callers never touch a global path.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::data_dir;
use crate::error::{ConfigLoadError, ConfigSaveError, ConfigValidationError, CoreError};
use crate::timer::Phase;

/// The persisted timer configuration.
///
/// Every field is required and must be positive; anything else is rejected
/// at load time and replaced with [`Configuration::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Work session length in minutes.
    pub work_duration: u32,
    /// Short break length in minutes.
    pub short_break: u32,
    /// Long break length in minutes.
    pub long_break: u32,
    /// Work sessions per long break.
    pub long_break_every: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break: 5,
            long_break: 15,
            long_break_every: 4,
        }
    }
}

impl Configuration {
    /// Length of `phase` in seconds.
    ///
    /// `Idle` reports the work duration, which is what the display previews
    /// before the next session starts.
    pub fn duration_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Idle | Phase::Work => self.work_duration,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        };
        u64::from(minutes).saturating_mul(60)
    }

    /// Value of a single field.
    pub fn get(&self, field: ConfigField) -> u32 {
        match field {
            ConfigField::WorkDuration => self.work_duration,
            ConfigField::ShortBreak => self.short_break,
            ConfigField::LongBreak => self.long_break,
            ConfigField::LongBreakEvery => self.long_break_every,
        }
    }

    /// Reject zero values, which deserialization alone lets through.
    pub fn check(&self) -> Result<(), ConfigValidationError> {
        for field in ConfigField::ALL {
            let value = self.get(field);
            if value == 0 {
                return Err(ConfigValidationError::NotPositive {
                    field,
                    value: i64::from(value),
                });
            }
        }
        Ok(())
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigLoadError> {
        let cfg: Configuration =
            toml::from_str(content).map_err(|source| ConfigLoadError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.check().map_err(|source| ConfigLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }
}

/// One of the four configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    WorkDuration,
    ShortBreak,
    LongBreak,
    LongBreakEvery,
}

impl ConfigField {
    /// All fields, in record order.
    pub const ALL: [ConfigField; 4] = [
        ConfigField::WorkDuration,
        ConfigField::ShortBreak,
        ConfigField::LongBreak,
        ConfigField::LongBreakEvery,
    ];

    /// Key used in the persisted record.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::WorkDuration => "work_duration",
            ConfigField::ShortBreak => "short_break",
            ConfigField::LongBreak => "long_break",
            ConfigField::LongBreakEvery => "long_break_every",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown config key: {s}"))
    }
}

/// Unparsed field values as typed into the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfiguration {
    pub work_duration: String,
    pub short_break: String,
    pub long_break: String,
    pub long_break_every: String,
}

impl RawConfiguration {
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::WorkDuration => &self.work_duration,
            ConfigField::ShortBreak => &self.short_break,
            ConfigField::LongBreak => &self.long_break,
            ConfigField::LongBreakEvery => &self.long_break_every,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) {
        let slot = match field {
            ConfigField::WorkDuration => &mut self.work_duration,
            ConfigField::ShortBreak => &mut self.short_break,
            ConfigField::LongBreak => &mut self.long_break,
            ConfigField::LongBreakEvery => &mut self.long_break_every,
        };
        *slot = value.into();
    }
}

impl From<&Configuration> for RawConfiguration {
    fn from(cfg: &Configuration) -> Self {
        Self {
            work_duration: cfg.work_duration.to_string(),
            short_break: cfg.short_break.to_string(),
            long_break: cfg.long_break.to_string(),
            long_break_every: cfg.long_break_every.to_string(),
        }
    }
}

/// Parse and check all four raw fields.
///
/// Fields are checked in record order and the first failure is returned.
///
/// # Errors
///
/// Returns [`ConfigValidationError`] naming the first field that is not an
/// integer, not positive, or too large.
pub fn validate(raw: &RawConfiguration) -> Result<Configuration, ConfigValidationError> {
    let mut values = [0u32; 4];
    for (slot, field) in values.iter_mut().zip(ConfigField::ALL) {
        *slot = parse_field(field, raw.get(field))?;
    }
    let [work_duration, short_break, long_break, long_break_every] = values;
    Ok(Configuration {
        work_duration,
        short_break,
        long_break,
        long_break_every,
    })
}

fn parse_field(field: ConfigField, input: &str) -> Result<u32, ConfigValidationError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ConfigValidationError::NotAnInteger {
            field,
            value: input.to_string(),
        })?;
    if value <= 0 {
        return Err(ConfigValidationError::NotPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ConfigValidationError::OutOfRange { field, value })
}

/// What a store produced on load.
///
/// `warning` is set when a record existed but could not be used; `config`
/// then holds the defaults.
#[derive(Debug)]
pub struct LoadOutcome {
    pub config: Configuration,
    pub warning: Option<ConfigLoadError>,
}

impl LoadOutcome {
    fn loaded(config: Configuration) -> Self {
        Self {
            config,
            warning: None,
        }
    }

    fn fallback(warning: ConfigLoadError) -> Self {
        tracing::warn!(error = %warning, "using default configuration");
        Self {
            config: Configuration::default(),
            warning: Some(warning),
        }
    }
}

/// Persistence for [`Configuration`].
pub trait ConfigStore {
    /// Load the record, substituting defaults when it is absent or unusable.
    fn load(&self) -> LoadOutcome;

    /// Persist all four fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSaveError`] if the record cannot be written.
    fn save(&self, config: &Configuration) -> Result<(), ConfigSaveError>;

    /// Validate edited fields and persist them on success.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigValidation`] when a field is rejected (nothing
    /// is written) or [`CoreError::ConfigSave`] when the write fails.
    fn save_raw(&self, raw: &RawConfiguration) -> Result<Configuration, CoreError> {
        let config = validate(raw)?;
        self.save(&config)?;
        Ok(config)
    }
}

/// Configuration stored as a TOML file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Store backed by an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/config.toml`.
    pub fn open_default() -> Self {
        Self::new(data_dir().join("config.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> LoadOutcome {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match Configuration::from_toml(&content, &self.path) {
                Ok(cfg) => LoadOutcome::loaded(cfg),
                Err(e) => LoadOutcome::fallback(e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no configuration file, using defaults");
                LoadOutcome::loaded(Configuration::default())
            }
            Err(source) => LoadOutcome::fallback(ConfigLoadError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, config: &Configuration) -> Result<(), ConfigSaveError> {
        let content = toml::to_string_pretty(config)?;
        let write_failed = |source| ConfigSaveError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        std::fs::write(&self.path, content).map_err(write_failed)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

/// In-memory store holding the record as TOML text.
///
/// Used as a test double; it parses exactly like [`FileConfigStore`].
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    contents: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `contents` as its record.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            fail_saves: Cell::new(false),
        }
    }

    /// Make subsequent saves fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// The record as last written.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> LoadOutcome {
        match self.contents.borrow().as_deref() {
            Some(content) => match Configuration::from_toml(content, Path::new("<memory>")) {
                Ok(cfg) => LoadOutcome::loaded(cfg),
                Err(e) => LoadOutcome::fallback(e),
            },
            None => LoadOutcome::loaded(Configuration::default()),
        }
    }

    fn save(&self, config: &Configuration) -> Result<(), ConfigSaveError> {
        if self.fail_saves.get() {
            return Err(ConfigSaveError::Rejected("store is read-only".into()));
        }
        let content = toml::to_string_pretty(config)?;
        *self.contents.borrow_mut() = Some(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(work: &str, short: &str, long: &str, every: &str) -> RawConfiguration {
        RawConfiguration {
            work_duration: work.into(),
            short_break: short.into(),
            long_break: long.into(),
            long_break_every: every.into(),
        }
    }

    #[test]
    fn default_values() {
        let cfg = Configuration::default();
        assert_eq!(cfg.work_duration, 25);
        assert_eq!(cfg.short_break, 5);
        assert_eq!(cfg.long_break, 15);
        assert_eq!(cfg.long_break_every, 4);
    }

    #[test]
    fn toml_record_has_exactly_four_keys() {
        let toml_str = toml::to_string_pretty(&Configuration::default()).unwrap();
        let table: toml::Table = toml::from_str(&toml_str).unwrap();
        let mut keys: Vec<_> = table.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["long_break", "long_break_every", "short_break", "work_duration"]
        );
    }

    #[test]
    fn duration_secs_per_phase() {
        let cfg = Configuration::default();
        assert_eq!(cfg.duration_secs(Phase::Work), 1500);
        assert_eq!(cfg.duration_secs(Phase::Idle), 1500);
        assert_eq!(cfg.duration_secs(Phase::ShortBreak), 300);
        assert_eq!(cfg.duration_secs(Phase::LongBreak), 900);
    }

    #[test]
    fn validate_accepts_trimmed_integers() {
        let cfg = validate(&raw(" 50", "10 ", "20", "3")).unwrap();
        assert_eq!(
            cfg,
            Configuration {
                work_duration: 50,
                short_break: 10,
                long_break: 20,
                long_break_every: 3,
            }
        );
    }

    #[test]
    fn validate_names_non_integer_field() {
        let err = validate(&raw("25", "5", "fifteen", "4")).unwrap_err();
        assert_eq!(
            err,
            ConfigValidationError::NotAnInteger {
                field: ConfigField::LongBreak,
                value: "fifteen".into(),
            }
        );
    }

    #[test]
    fn validate_rejects_zero_cadence() {
        let err = validate(&raw("25", "5", "15", "0")).unwrap_err();
        assert_eq!(err.field(), ConfigField::LongBreakEvery);
        assert!(matches!(err, ConfigValidationError::NotPositive { value: 0, .. }));
    }

    #[test]
    fn validate_rejects_negative_and_fractional() {
        assert!(matches!(
            validate(&raw("-5", "5", "15", "4")),
            Err(ConfigValidationError::NotPositive { field: ConfigField::WorkDuration, value: -5 })
        ));
        assert!(matches!(
            validate(&raw("25", "2.5", "15", "4")),
            Err(ConfigValidationError::NotAnInteger { field: ConfigField::ShortBreak, .. })
        ));
    }

    #[test]
    fn validate_reports_first_bad_field() {
        let err = validate(&raw("x", "y", "15", "4")).unwrap_err();
        assert_eq!(err.field(), ConfigField::WorkDuration);
    }

    #[test]
    fn validate_rejects_overflow() {
        let err = validate(&raw("25", "5", "15", "99999999999")).unwrap_err();
        assert!(matches!(err, ConfigValidationError::OutOfRange { .. }));
    }

    #[test]
    fn config_field_parses_record_keys() {
        for field in ConfigField::ALL {
            assert_eq!(field.as_str().parse::<ConfigField>().unwrap(), field);
        }
        assert!("volume".parse::<ConfigField>().is_err());
    }

    #[test]
    fn raw_roundtrips_configuration() {
        let cfg = Configuration::default();
        let mut form = RawConfiguration::from(&cfg);
        assert_eq!(form.get(ConfigField::LongBreakEvery), "4");
        form.set(ConfigField::ShortBreak, "7");
        assert_eq!(validate(&form).unwrap().short_break, 7);
    }

    #[test]
    fn memory_store_missing_record_is_silent_default() {
        let store = MemoryConfigStore::new();
        let outcome = store.load();
        assert_eq!(outcome.config, Configuration::default());
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn memory_store_corrupt_record_warns() {
        let store = MemoryConfigStore::with_contents("{ this is not toml");
        let outcome = store.load();
        assert_eq!(outcome.config, Configuration::default());
        assert!(matches!(outcome.warning, Some(ConfigLoadError::ParseFailed { .. })));
    }

    #[test]
    fn memory_store_missing_field_warns() {
        let store = MemoryConfigStore::with_contents("work_duration = 30\nshort_break = 5\n");
        let outcome = store.load();
        assert_eq!(outcome.config, Configuration::default());
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn memory_store_zero_field_warns() {
        let store = MemoryConfigStore::with_contents(
            "work_duration = 30\nshort_break = 5\nlong_break = 15\nlong_break_every = 0\n",
        );
        let outcome = store.load();
        assert_eq!(outcome.config, Configuration::default());
        assert!(matches!(outcome.warning, Some(ConfigLoadError::Invalid { .. })));
    }

    #[test]
    fn save_raw_rejects_without_writing() {
        let store = MemoryConfigStore::new();
        let result = store.save_raw(&raw("25", "5", "15", "0"));
        assert!(matches!(result, Err(CoreError::ConfigValidation(_))));
        assert!(store.contents().is_none());
    }

    #[test]
    fn save_raw_persists_valid_edit() {
        let store = MemoryConfigStore::new();
        let cfg = store.save_raw(&raw("45", "5", "15", "4")).unwrap();
        assert_eq!(cfg.work_duration, 45);
        assert_eq!(store.load().config.work_duration, 45);
    }

    #[test]
    fn failing_store_reports_save_error() {
        let store = MemoryConfigStore::new();
        store.set_fail_saves(true);
        let result = store.save(&Configuration::default());
        assert!(matches!(result, Err(ConfigSaveError::Rejected(_))));
    }
}
