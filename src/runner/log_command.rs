//! Log command tokenizer
//!
//! Scripts written for the CI agent talk back to it through specially
//! formatted lines on stdout:
//!
//! ```text
//! ##vso[task.prependpath]/opt/tool/bin
//! ##vso[task.setvariable variable=NAME]value
//! ```
//!
//! Only these two commands are understood. Any other line starting with the
//! `##vso[` sentinel is reported as [`LogLine::Unsupported`].

/// Prefix shared by every log command
pub const SENTINEL: &str = "##vso[";

const PREPEND_PATH: &str = "##vso[task.prependpath]";
const SET_VARIABLE: &str = "##vso[task.setvariable variable=";

/// Classification of a single line of script output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLine<'a> {
    /// Prepend a fragment to `PATH`
    AddPath(&'a str),
    /// Set an environment variable
    SetVariable { name: &'a str, value: &'a str },
    /// Starts with the sentinel but is not a command we understand
    Unsupported(&'a str),
    /// Ordinary output
    Plain(&'a str),
}

impl<'a> LogLine<'a> {
    /// Classify one line of output, without its line terminator
    pub fn parse(line: &'a str) -> Self {
        if !line.starts_with(SENTINEL) {
            return Self::Plain(line);
        }

        if let Some(path) = line.strip_prefix(PREPEND_PATH) {
            return Self::AddPath(path);
        }

        if let Some((name, value)) = line
            .strip_prefix(SET_VARIABLE)
            .and_then(|rest| rest.split_once(']'))
        {
            if is_variable_name(name) {
                return Self::SetVariable { name, value };
            }
        }

        Self::Unsupported(line)
    }
}

/// `[0-9A-Za-z_]+`
fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
