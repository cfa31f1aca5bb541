use crate::artifacts::core::error::VcError;
use crate::artifacts::core::slash_path;
use crate::artifacts::ignore::ignore_list::IgnoreList;
use crate::artifacts::ignore::pattern::IgnorePattern;
use crate::artifacts::scan::file_entry::FileEntry;
use crate::artifacts::triage::disposition::{Disposition, LEGEND, PROMPT_CHOICES, Response};
use crate::artifacts::triage::operator::Operator;
use colored::Colorize;
use log::{debug, warn};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Side effects of applying a disposition.
pub trait TriageTarget {
    /// Start tracking `path`.
    fn track(&mut self, path: &Path) -> anyhow::Result<()>;

    /// Durably record a new ignore pattern.
    fn persist(&mut self, pattern: &IgnorePattern) -> anyhow::Result<()>;

    /// Remove `path` from disk.
    fn delete(&mut self, path: &Path) -> Result<(), VcError>;
}

/// What one triage run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriageReport {
    /// The ignore list including every pattern added during the run
    pub ignore_list: IgnoreList,
    pub added: Vec<PathBuf>,
    pub ignored: Vec<IgnorePattern>,
    pub deleted: Vec<PathBuf>,
    pub passed: Vec<PathBuf>,
    /// Files dropped from the queue by an extension or folder pattern chosen for another file
    pub suppressed: Vec<PathBuf>,
}

impl TriageReport {
    /// Whether the run left the ignore list, the tracked set and the disk untouched.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.ignored.is_empty() && self.deleted.is_empty()
    }
}

/// Interactive resolution of unmanaged files.
///
/// Each unmanaged file is offered exactly once, in scan order. Choosing an
/// extension or folder pattern removes every other queued file it matches.
#[derive(Debug)]
pub struct TriageEngine {
    ignore_list: IgnoreList,
}

impl TriageEngine {
    pub fn new(ignore_list: IgnoreList) -> Self {
        TriageEngine { ignore_list }
    }

    pub fn run<O, T>(
        mut self,
        entries: impl IntoIterator<Item = FileEntry>,
        operator: &mut O,
        target: &mut T,
    ) -> anyhow::Result<TriageReport>
    where
        O: Operator + ?Sized,
        T: TriageTarget + ?Sized,
    {
        let mut report = TriageReport::default();
        let mut queue = entries
            .into_iter()
            .filter(|entry| entry.is_unmanaged() && !self.ignore_list.matches(&entry.path))
            .collect::<VecDeque<_>>();

        debug!("triage queue holds {} unmanaged files", queue.len());
        if !queue.is_empty() {
            operator.tell("Found unmanaged files. Specify what to do:")?;
        }

        while let Some(entry) = queue.pop_front() {
            let disposition = self.resolve(&entry, operator)?;
            let narrowed = self.apply(entry, disposition, operator, target, &mut report)?;

            if narrowed {
                let ignore_list = &self.ignore_list;
                let mut dropped = Vec::new();
                queue.retain(|pending| {
                    let keep = !ignore_list.matches(&pending.path);
                    if !keep {
                        dropped.push(pending.path.clone());
                    }
                    keep
                });

                for path in dropped {
                    operator.tell(&format!("  {}: now ignored", slash_path(&path)))?;
                    report.suppressed.push(path);
                }
            }
        }

        report.ignore_list = self.ignore_list;
        Ok(report)
    }

    /// Prompt until the operator picks an applicable disposition.
    fn resolve<O: Operator + ?Sized>(
        &self,
        entry: &FileEntry,
        operator: &mut O,
    ) -> anyhow::Result<Disposition> {
        let path = slash_path(&entry.path);
        let prompt = format!("  {}: {} ", path.bold(), PROMPT_CHOICES);

        loop {
            let answer = operator.ask(&prompt)?;

            match Response::parse(&answer) {
                Response::Help => operator.tell(LEGEND)?,
                Response::Invalid(input) => {
                    debug!("{}", VcError::InvalidInput(input.clone()));
                    operator.tell(&format!("Unrecognized response {input:?}, type ? for help"))?;
                }
                Response::Choose(Disposition::IgnoreExtension) if entry.extension.is_none() => {
                    operator.tell("This file has no extension, try again")?;
                }
                Response::Choose(Disposition::IgnoreAncestor(_))
                    if IgnorePattern::for_ancestor(&entry.path, 1).is_none() =>
                {
                    operator.tell("This file is not inside a folder, try again")?;
                }
                Response::Choose(Disposition::Delete) => {
                    let action = format!("delete {path}");
                    if operator.confirm(&action)? {
                        return Ok(Disposition::Delete);
                    }

                    debug!("{}", VcError::ConfirmationDeclined(action));
                    operator.tell("Not deleted.")?;
                    return Ok(Disposition::Pass);
                }
                Response::Choose(disposition) => return Ok(disposition),
            }
        }
    }

    /// Apply `disposition`; returns whether the ignore list grew.
    fn apply<O, T>(
        &mut self,
        entry: FileEntry,
        disposition: Disposition,
        operator: &mut O,
        target: &mut T,
        report: &mut TriageReport,
    ) -> anyhow::Result<bool>
    where
        O: Operator + ?Sized,
        T: TriageTarget + ?Sized,
    {
        let pattern = match disposition {
            Disposition::Add => {
                target.track(&entry.path)?;
                report.added.push(entry.path);
                return Ok(false);
            }
            Disposition::Pass => {
                report.passed.push(entry.path);
                return Ok(false);
            }
            Disposition::Delete => {
                match target.delete(&entry.path) {
                    Ok(()) => {
                        operator.tell(&format!("Deleted {}.", slash_path(&entry.path)))?;
                        report.deleted.push(entry.path);
                    }
                    Err(error) => {
                        warn!("delete failed: {error}");
                        operator.tell(&format!("{} {error}; skipping it", "error:".red()))?;
                        report.passed.push(entry.path);
                    }
                }
                return Ok(false);
            }
            Disposition::IgnorePath => Some(IgnorePattern::for_path(&entry.path)),
            Disposition::IgnoreExtension => IgnorePattern::for_extension(&entry.path),
            Disposition::IgnoreAncestor(depth) => IgnorePattern::for_ancestor(&entry.path, depth),
        };

        let pattern = pattern.ok_or_else(|| {
            anyhow::anyhow!("no ignore pattern applies to {}", entry.path.display())
        })?;

        // new by construction: a listed pattern would have matched this entry
        self.ignore_list.insert(pattern.clone());
        target.persist(&pattern)?;
        operator.tell(&format!("Added \"{pattern}\" to the ignore list."))?;
        report.ignored.push(pattern);

        Ok(true)
    }
}
