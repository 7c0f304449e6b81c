//! Diagnostic text rendering.
//!
//! The output format is fixed for compatibility with existing tooling that
//! parses these summaries; it carries no algorithmic weight. Rendering is a
//! pure function of a record snapshot plus the resolved identity, so it runs
//! under the registry's read lock.

use std::fmt::Write as _;

use crate::identity::ClassId;
use crate::record::OverrideRecord;

fn join_or_none(ids: &[ClassId]) -> String {
    if ids.is_empty() {
        "None".to_string()
    } else {
        ids.iter()
            .map(ClassId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Appends the summary header and the global disable line.
pub(crate) fn render_header(global_disables: &[ClassId], out: &mut String) {
    let _ = writeln!(out, "********************************");
    let _ = writeln!(out, " Factory Overrides");
    let _ = writeln!(out, "********************************");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Global Factory Override Disables: {}",
        join_or_none(global_disables)
    );
    let _ = writeln!(out);
}

/// Appends the fixed-format block for one record.
pub(crate) fn render_record(record: &OverrideRecord, resolved: &ClassId, out: &mut String) {
    let parent = record
        .parent()
        .map_or_else(|| "Not in Factory".to_string(), ToString::to_string);

    let _ = writeln!(out, "Factory Class: {}", record.class_id());
    let _ = writeln!(out, "  Parent:                   {parent}");
    let _ = writeln!(
        out,
        "  Sub-class Overrides:      {}",
        join_or_none(record.inherited_candidates())
    );
    let _ = writeln!(
        out,
        "  Manual Overrides:         {}",
        join_or_none(record.manual_overrides())
    );
    let _ = writeln!(
        out,
        "  Manual Override Disables: {}",
        join_or_none(record.local_disables())
    );
    let _ = writeln!(out, "  Factory Override:         {resolved}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_or_none() {
        assert_eq!(join_or_none(&[]), "None");
        assert_eq!(
            join_or_none(&[ClassId::new("C1"), ClassId::new("C2")]),
            "C1, C2"
        );
    }

    #[test]
    fn test_render_record_block() {
        let mut record = OverrideRecord::new(ClassId::new("C1"));
        record.set_parent(ClassId::new("Base")).unwrap();
        record.add_inherited_candidate(ClassId::new("C3"));
        record.add_inherited_candidate(ClassId::new("C5"));
        record.enable_override(&ClassId::new("C3"));

        let resolved = record.resolve_with(&[]);
        let mut out = String::new();
        render_record(&record, &resolved, &mut out);

        assert_eq!(
            out,
            "Factory Class: C1\n\
             \x20 Parent:                   Base\n\
             \x20 Sub-class Overrides:      C3, C5\n\
             \x20 Manual Overrides:         C3\n\
             \x20 Manual Override Disables: None\n\
             \x20 Factory Override:         C3\n"
        );
    }

    #[test]
    fn test_render_header_with_disables() {
        let mut out = String::new();
        render_header(&[ClassId::new("C4")], &mut out);
        assert_eq!(
            out,
            "********************************\n\
             \x20Factory Overrides\n\
             ********************************\n\
             \n\
             Global Factory Override Disables: C4\n\
             \n"
        );
    }

    #[test]
    fn test_render_header_empty() {
        let mut out = String::new();
        render_header(&[], &mut out);
        assert!(out.contains("Global Factory Override Disables: None\n"));
    }
}
