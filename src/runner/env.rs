//! Environment snapshot handed to every step

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Separator between `PATH` entries
#[cfg(windows)]
pub const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_SEPARATOR: &str = ":";

/// Mapping of variable names to values passed to each spawned step
///
/// Initialized once from the host process and then mutated only by log
/// commands. Variables are kept as OS strings so host values that are not
/// valid UTF-8 reach the children untouched. Names are case-insensitive on
/// Windows, where the host's `Path` is the `PATH` log commands refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Snapshot the current process environment
    pub fn from_host() -> Self {
        std::env::vars_os().collect()
    }

    /// Get a variable
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = self.key_for(name.as_ref());
        self.vars.get(&key).map(OsString::as_os_str)
    }

    /// Set a variable, overwriting any previous value
    pub fn set(&mut self, name: impl Into<OsString>, value: impl Into<OsString>) {
        let name: OsString = name.into();
        let key = self.key_for(&name);
        self.vars.insert(key, value.into());
    }

    /// The stored spelling of `name`, or `name` itself if it is not set
    fn key_for(&self, name: &OsStr) -> OsString {
        #[cfg(windows)]
        let existing = self
            .vars
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned();
        #[cfg(not(windows))]
        let existing: Option<OsString> = None;

        existing.unwrap_or_else(|| name.to_os_string())
    }

    /// Put `fragment` in front of `PATH`
    ///
    /// The fragment is used verbatim, even when empty. If `PATH` is not set
    /// it becomes just the fragment.
    pub fn prepend_path(&mut self, fragment: &str) {
        let key = self.key_for(OsStr::new("PATH"));
        let path = match self.vars.remove(&key) {
            Some(old) => {
                let mut path = OsString::from(fragment);
                path.push(PATH_SEPARATOR);
                path.push(old);
                path
            }
            None => OsString::from(fragment),
        };
        self.vars.insert(key, path);
    }

    /// Iterate over all variables
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
