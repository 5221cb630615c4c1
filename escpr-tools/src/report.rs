//! Report rendering for the `decode` and `patch` subcommands

use escpr_patch::PatchSummary;
use escpr_protocol::inspect::{describe, DiffReport};
use escpr_protocol::CommandCollection;

/// Every command of one capture
pub fn single(collection: &CommandCollection) -> String {
    describe(collection)
}

/// Both captures followed by the diff in each direction
pub fn comparison(reference: &CommandCollection, other: &CommandCollection) -> String {
    let mut out = String::from("Reference:\n");
    out.push_str(&describe(reference));
    out.push_str("Other:\n");
    out.push_str(&describe(other));
    out.push_str(&DiffReport::new(reference, other).to_string());
    out
}

/// Patch summary as pretty JSON
pub fn summary(summary: &PatchSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use escpr_protocol::{fields, CommandKind, EncodeCommand, KnownCommand};

    fn collection(next_page: i64) -> CommandCollection {
        let bytes = KnownCommand::new(CommandKind::PageNum)
            .with(fields::NEXT_PAGE, next_page)
            .unwrap()
            .encode();
        CommandCollection::from_bytes(&bytes)
    }

    #[test]
    fn test_single() {
        assert_eq!(
            single(&collection(1)),
            "p-setn (PageNum): { NextPage=1 (0x1) }\n\n"
        );
    }

    #[test]
    fn test_comparison_sections() {
        let out = comparison(&collection(1), &collection(2));
        let reference = out.find("Reference:").unwrap();
        let other = out.find("Other:").unwrap();
        let forward = out.find("Reference vs. Other").unwrap();
        let backward = out.find("Other vs. Reference").unwrap();
        assert!(reference < other && other < forward && forward < backward);
        assert_eq!(out.matches("Arguments differ for p-setn (PageNum)").count(), 2);
    }
}
