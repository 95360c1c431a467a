//! Command-line source
//!
//! Every active param gets one flag: `--` followed by its scope path and name
//! joined with `-`, e.g. a param `addr` on scope `http/server` is
//! `--http-server-addr`. Sub-command segments are not part of the flag.
//!
//! Accepted forms:
//!
//! - `--flag=value` and `--flag value` for non-boolean params
//! - `--flag` (sets true) and `--flag=true|false` for boolean params; a
//!   separate token after a bare boolean flag is not its value
//! - leading positional tokens naming sub-commands
//! - `-h` to print a help page and exit, unless help is disabled
//!
//! String-like values are passed through as JSON strings unless they already
//! start with a quote; everything else is handed over as JSON text as-is.

use crate::error::ConfigError;
use crate::param::{Param, ParamValue};
use crate::populate::Selection;
use crate::scope::Scope;
use crate::source::{help, Source};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing::{debug, trace};

const FLAG_PREFIX: &str = "--";
const FLAG_JOIN: &str = "-";
const VALUE_SEP: char = '=';
const HELP_ARG: &str = "-h";

/// Source reading params from command-line arguments
#[derive(Debug, Clone, Default)]
pub struct CliSource {
    args: Option<Vec<String>>,
    program: Option<String>,
    disable_help: bool,
}

impl CliSource {
    /// Read the live process arguments, skipping the program name
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Read an explicit argument list (not including the program name)
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CliSource {
            args: Some(args.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Program name shown on the help page
    pub fn program(mut self, name: &str) -> Self {
        self.program = Some(name.to_string());
        self
    }

    /// Treat `-h` like any other argument
    pub fn disable_help(mut self) -> Self {
        self.disable_help = true;
        self
    }

    fn args(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args().skip(1).collect(),
        }
    }

    fn program_name(&self) -> String {
        if let Some(program) = &self.program {
            return program.clone();
        }
        std::env::args()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "program".to_string())
    }

    fn print_help_and_exit(&self, selection: &Selection, flags: &BTreeMap<String, &Param>) -> ! {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let level = help_level(selection);
        let _ = help::render(
            &mut out,
            &self.program_name(),
            &selection.named(),
            &level.subcommands(),
            flags,
        );
        let _ = out.flush();
        process::exit(1);
    }
}

/// CLI flag for a param
pub fn cli_flag(param: &Param) -> String {
    let mut flag = String::from(FLAG_PREFIX);
    if !param.cli_path().is_empty() {
        flag.push_str(&param.cli_path().join(FLAG_JOIN));
        flag.push_str(FLAG_JOIN);
    }
    flag.push_str(param.name());
    flag
}

/// Map every param to its CLI flag
///
/// # Panics
///
/// If two params map to the same flag.
pub fn cli_flags(params: &[Param]) -> BTreeMap<String, &Param> {
    let mut flags = BTreeMap::new();
    for param in params {
        let flag = cli_flag(param);
        if let Some(other) = flags.insert(flag.clone(), param) {
            panic!(
                "multiple params use the same CLI arg {:?}: {} and {}",
                flag,
                other.full_name(),
                param.full_name()
            );
        }
    }
    flags
}

/// Scope whose sub-commands the help page lists: the last one reached by
/// an explicit sub-command argument, ignoring defaults selected after it
fn help_level(selection: &Selection) -> Scope {
    selection
        .levels()
        .into_iter()
        .zip(std::iter::once(false).chain(selection.branches().iter().map(|b| b.is_default())))
        .filter(|(_, is_default)| !is_default)
        .map(|(scope, _)| scope)
        .last()
        .unwrap_or_else(|| selection.innermost().root())
}

fn raw_value(param: &Param, value: &str) -> String {
    if param.is_string() && !value.starts_with('"') {
        serde_json::Value::String(value.to_string()).to_string()
    } else {
        value.to_string()
    }
}

impl Source for CliSource {
    fn select(&self, root: &Scope) -> Selection {
        let args = self.args();
        let mut rest = args.as_slice();
        let mut selection = Selection::root(root);

        loop {
            let named = rest
                .first()
                .filter(|arg| !arg.is_empty() && !arg.starts_with('-'))
                .and_then(|arg| {
                    selection
                        .innermost()
                        .subcommands()
                        .into_iter()
                        .find(|sub| !sub.is_default() && sub.name() == arg.as_str())
                });
            if let Some(sub) = named {
                selection.push(sub);
                rest = &rest[1..];
                continue;
            }
            if !selection.select_default() {
                break;
            }
        }

        debug!(selected = ?selection.named(), branches = selection.branches().len(), "Resolved sub-commands");
        selection
    }

    fn parse(
        &self,
        params: &[Param],
        selection: &Selection,
    ) -> Result<Vec<ParamValue>, ConfigError> {
        let args = self.args();
        let args = &args[selection.consumed_args().min(args.len())..];
        let flags = cli_flags(params);
        let tail = selection
            .levels()
            .iter()
            .rev()
            .find_map(Scope::cli_tail);

        let mut values = Vec::with_capacity(args.len());
        let mut pending: Option<(&str, &Param)> = None;
        let mut bare_bool: Option<&str> = None;

        for (i, arg) in args.iter().enumerate() {
            if let Some((flag, param)) = pending.take() {
                trace!(flag, value = %arg, "Accepted flag value");
                values.push(ParamValue::for_param(param, raw_value(param, arg)));
                continue;
            }

            let after_bool = bare_bool.take();

            if !self.disable_help && arg == HELP_ARG {
                self.print_help_and_exit(selection, &flags);
            }

            let (key, inline) = match arg.split_once(VALUE_SEP) {
                Some((key, value)) => (key, Some(value)),
                None => (arg.as_str(), None),
            };

            let Some(&param) = flags.get(key) else {
                if let Some(tail) = &tail {
                    debug!(tail_len = args.len() - i, "Capturing CLI tail");
                    tail.set(args[i..].to_vec());
                    return Ok(values);
                }
                if let Some(flag) = after_bool {
                    return Err(ConfigError::BoolWithValue {
                        flag: flag.to_string(),
                        value: arg.clone(),
                    });
                }
                return Err(ConfigError::UnexpectedArg(arg.clone()));
            };

            match inline {
                Some(value) if param.is_bool() => {
                    if value != "true" && value != "false" {
                        return Err(ConfigError::BoolWithValue {
                            flag: key.to_string(),
                            value: value.to_string(),
                        });
                    }
                    values.push(ParamValue::for_param(param, value.to_string()));
                }
                Some(value) => values.push(ParamValue::for_param(param, raw_value(param, value))),
                None if param.is_bool() => {
                    values.push(ParamValue::for_param(param, "true".to_string()));
                    bare_bool = Some(key);
                }
                None => {
                    pending = Some((key, param));
                    continue;
                }
            }
            trace!(flag = key, "Accepted flag");
        }

        if let Some((flag, _)) = pending {
            return Err(ConfigError::MissingValue(flag.to_string()));
        }
        if let Some(tail) = tail {
            tail.set(Vec::new());
        }
        Ok(values)
    }
}
