//! Help page rendering for the command-line source

use crate::param::Param;
use crate::scope::SubCommand;
use std::collections::BTreeMap;
use std::io::{self, Write};

fn format_usage(usage: &str) -> String {
    let mut usage = usage.trim().to_string();
    if !usage.is_empty() && !usage.ends_with(&['.', '!', '?'][..]) {
        usage.push('.');
    }
    usage
}

/// Write the help page
///
/// `prefix` holds the sub-command names already given, `subcommands` the
/// branches available at that point, and `flags` the active params by flag.
/// Sub-commands are listed by name with the default branch as `<None>`.
/// Options list required params first, then the rest, each group by flag.
pub fn render<W: Write>(
    w: &mut W,
    program: &str,
    prefix: &[String],
    subcommands: &[SubCommand],
    flags: &BTreeMap<String, &Param>,
) -> io::Result<()> {
    write!(w, "Usage: {}", program)?;
    for name in prefix {
        write!(w, " {}", name)?;
    }
    if !subcommands.is_empty() {
        if subcommands.iter().any(SubCommand::is_default) {
            write!(w, " [sub-command]")?;
        } else {
            write!(w, " <sub-command>")?;
        }
    }
    if !flags.is_empty() {
        write!(w, " [options]")?;
    }
    writeln!(w)?;
    writeln!(w)?;

    if !subcommands.is_empty() {
        let mut subcommands = subcommands.to_vec();
        subcommands.sort_by(|a, b| a.name().cmp(b.name()));

        writeln!(w, "Sub-commands:")?;
        writeln!(w)?;
        for sub in &subcommands {
            let name = if sub.is_default() { "<None>" } else { sub.name() };
            writeln!(w, "\t{}\t{}", name, sub.description())?;
        }
        writeln!(w)?;
    }

    if !flags.is_empty() {
        let mut entries: Vec<(&String, &&Param)> = flags.iter().collect();
        entries.sort_by(|a, b| (!a.1.is_required(), a.0).cmp(&(!b.1.is_required(), b.0)));

        writeln!(w, "Options:")?;
        writeln!(w)?;
        for (flag, param) in entries {
            write!(w, "\t{}", flag)?;
            if param.is_required() {
                write!(w, " (Required)")?;
            } else if param.is_bool() {
                write!(w, " (Flag)")?;
            } else if let Some(default) = param.default_display() {
                write!(w, " (Default: {})", default)?;
            }
            writeln!(w)?;

            let usage = format_usage(param.usage());
            if !usage.is_empty() {
                writeln!(w, "\t\t{}", usage)?;
            }
            writeln!(w)?;
        }
    }

    Ok(())
}
