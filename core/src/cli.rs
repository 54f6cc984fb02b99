//! Flag stripping for the sweep token list.
//!
//! Flags are recognized strictly before the first non-flag token; anything
//! `--`-prefixed after that point is treated as a removal-target clause and
//! will fail name resolution on its own.

use crate::error::{SweepError, SweepResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Compute everything, persist nothing.
    pub dry_run: bool,
    /// Discard all removal targets and only repair data inconsistencies.
    pub clean_only: bool,
}

impl RunFlags {
    /// Split `tokens` into run flags and the remaining target clauses.
    ///
    /// An entirely empty token list is a configuration error, as is an empty
    /// target list without `--clean`: pure-cleanup mode has to be requested
    /// explicitly.
    pub fn parse(tokens: &[String]) -> SweepResult<(RunFlags, Vec<String>)> {
        if tokens.is_empty() {
            return Err(SweepError::NoTargets);
        }

        let mut flags = RunFlags::default();
        let mut rest = tokens;

        while let Some(token) = rest.first() {
            let Some(name) = token.strip_prefix("--") else {
                break;
            };
            match name {
                "dry" | "dry-run" => flags.dry_run = true,
                "clean" | "clean-only" => flags.clean_only = true,
                _ => {
                    return Err(SweepError::UnknownFlag {
                        flag: token.clone(),
                    })
                }
            }
            rest = &rest[1..];
        }

        let targets = if flags.clean_only {
            Vec::new()
        } else if rest.is_empty() {
            return Err(SweepError::NoTargets);
        } else {
            rest.to_vec()
        };

        Ok((flags, targets))
    }
}
