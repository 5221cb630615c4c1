//! Inspection and diff of decoded command collections
//!
//! [`diff`] is keyed on the reference collection: a header that only exists in
//! `other` is not reported. Run it both ways to see both sides.

use std::fmt;

use crate::command::Command;
use crate::header::CommandHeader;
use crate::scanner::CommandCollection;

/// Outcome of comparing one reference command against the other collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome<'a> {
    /// Header absent from the other collection
    Missing,
    /// Present but parameter bytes differ
    Differing(&'a Command),
    /// Present and byte-identical
    Equal,
}

/// One line of a diff report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry<'a> {
    pub header: CommandHeader,
    pub reference: &'a Command,
    pub outcome: DiffOutcome<'a>,
}

impl DiffEntry<'_> {
    pub fn is_equal(&self) -> bool {
        matches!(self.outcome, DiffOutcome::Equal)
    }
}

impl fmt::Display for DiffEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.reference.description();
        match &self.outcome {
            DiffOutcome::Missing => write!(
                f,
                "{} is not in commands dict\n{}",
                description, self.reference
            ),
            DiffOutcome::Differing(other) => write!(
                f,
                "Arguments differ for {}:\n{}\n{}",
                description, self.reference, other
            ),
            DiffOutcome::Equal => write!(
                f,
                "Arguments for {} are equal\n{}",
                description, self.reference
            ),
        }
    }
}

/// Compare every command of `reference` against `other`
pub fn diff<'a>(
    reference: &'a CommandCollection,
    other: &'a CommandCollection,
) -> Vec<DiffEntry<'a>> {
    reference
        .iter()
        .map(|(header, cmd)| {
            let outcome = match other.get(&header) {
                None => DiffOutcome::Missing,
                Some(theirs) if theirs != cmd => DiffOutcome::Differing(theirs),
                Some(_) => DiffOutcome::Equal,
            };
            DiffEntry {
                header,
                reference: cmd,
                outcome,
            }
        })
        .collect()
}

/// Render every command of a collection, one per paragraph
pub fn describe(collection: &CommandCollection) -> String {
    let mut out = String::new();
    for (_, cmd) in collection.iter() {
        out.push_str(&cmd.to_string());
        out.push_str("\n\n");
    }
    out
}

/// Scan a buffer and render its commands
pub fn describe_buffer(buffer: &[u8]) -> String {
    describe(&CommandCollection::from_bytes(buffer))
}

/// Both directions of a diff between two collections
#[derive(Debug, Clone)]
pub struct DiffReport<'a> {
    pub forward: Vec<DiffEntry<'a>>,
    pub backward: Vec<DiffEntry<'a>>,
}

impl<'a> DiffReport<'a> {
    pub fn new(reference: &'a CommandCollection, other: &'a CommandCollection) -> Self {
        Self {
            forward: diff(reference, other),
            backward: diff(other, reference),
        }
    }

    /// True when neither direction reports a missing or differing command
    pub fn is_identical(&self) -> bool {
        self.forward.iter().chain(&self.backward).all(DiffEntry::is_equal)
    }
}

impl fmt::Display for DiffReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reference vs. Other")?;
        for entry in &self.forward {
            writeln!(f, "\n{}", entry)?;
        }
        writeln!(f, "\nOther vs. Reference")?;
        for entry in &self.backward {
            writeln!(f, "\n{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{fields, CommandKind, KnownCommand};
    use crate::EncodeCommand;

    fn collection(cmds: &[KnownCommand]) -> CommandCollection {
        let bytes: Vec<u8> = cmds.iter().flat_map(|c| c.encode()).collect();
        CommandCollection::from_bytes(&bytes)
    }

    #[test]
    fn test_diff_outcomes() {
        let page = KnownCommand::new(CommandKind::PageNum);
        let chku = KnownCommand::new(CommandKind::CheckPrintSetting);
        let chku_on = chku
            .clone()
            .with(fields::NON_CHECK_PRINT_MODE, 1)
            .unwrap();

        let a = collection(&[page.clone(), chku]);
        let b = collection(&[page, chku_on]);
        let entries = diff(&a, &b);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].outcome, DiffOutcome::Equal);
        assert!(matches!(entries[1].outcome, DiffOutcome::Differing(_)));
    }

    #[test]
    fn test_diff_is_asymmetric() {
        let a = collection(&[
            KnownCommand::new(CommandKind::PageNum),
            KnownCommand::new(CommandKind::PageStart),
        ]);
        let b = collection(&[KnownCommand::new(CommandKind::PageNum)
            .with(fields::NEXT_PAGE, 1)
            .unwrap()]);

        let forward = diff(&a, &b);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[1].header, CommandKind::PageStart.header());
        assert_eq!(forward[1].outcome, DiffOutcome::Missing);

        let backward = diff(&b, &a);
        assert_eq!(backward.len(), 1);
        assert!(backward
            .iter()
            .all(|e| e.header != CommandKind::PageStart.header()));
    }

    #[test]
    fn test_report_identical() {
        let a = collection(&[KnownCommand::new(CommandKind::PageNum)]);
        let b = a.clone();
        assert!(DiffReport::new(&a, &b).is_identical());
    }

    #[test]
    fn test_describe_buffer() {
        let bytes = KnownCommand::new(CommandKind::PageNum).encode();
        assert_eq!(
            describe_buffer(&bytes),
            "p-setn (PageNum): { NextPage=0 (0x0) }\n\n"
        );
    }

    #[test]
    fn test_entry_display() {
        let a = collection(&[KnownCommand::new(CommandKind::PageStart)]);
        let b = CommandCollection::new();
        let entries = diff(&a, &b);
        assert_eq!(
            entries[0].to_string(),
            "p-sttp (PageStart) is not in commands dict\np-sttp (PageStart): { }"
        );
    }
}
