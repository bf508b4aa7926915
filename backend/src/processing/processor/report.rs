use crate::model::{ExportToggles, RunSummary};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// End of run summary of one library pass. Only enabled artifact kinds are listed.
pub fn format_report(summary: &RunSummary, exports: &ExportToggles) -> String {
    let finish = summary.finish.map_or_else(|| "-".to_string(), |t| t.format(TIME_FORMAT).to_string());
    let mut lines = vec![
        String::new(),
        format!("============================ {} PROCESSING SUMMARY ============================", summary.name.to_uppercase()),
        String::new(),
        format!("Start       : {}", summary.start.format(TIME_FORMAT)),
        format!("Finished    : {finish}"),
    ];
    for kind in exports.enabled() {
        let counters = summary.get(kind);
        let unit = kind.unit();
        lines.push(String::new());
        lines.push(kind.report_title().to_string());
        lines.push(format!("  - Added     : {} {unit}", counters.new));
        lines.push(format!("  - Updated   : {} {unit}", counters.updated));
        lines.push(format!("  - Skipped   : {} {unit}", counters.skipped));
        lines.push(format!("  - Failed    : {} {unit}", counters.failed));
    }
    lines.join("\n")
}

pub fn print_summaries(summaries: &[RunSummary], exports: &ExportToggles) {
    for summary in summaries {
        println!("{}", format_report(summary, exports));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactKind, ExportOutcome};

    #[test]
    fn test_only_enabled_kinds_reported() {
        let mut summary = RunSummary::new("Movies".to_string());
        summary.record_outcome(ArtifactKind::Nfo, ExportOutcome::Created);
        summary.record_outcome(ArtifactKind::Nfo, ExportOutcome::Failure);
        summary.finish();
        let exports = ExportToggles { nfo: true, fanart: true, ..ExportToggles::default() };
        let report = format_report(&summary, &exports);

        assert!(report.contains("==== MOVIES PROCESSING SUMMARY ===="));
        assert!(report.contains("NFO Files\n  - Added     : 1 NFO(s)\n  - Updated   : 0 NFO(s)"));
        assert!(report.contains("  - Failed    : 1 NFO(s)"));
        assert!(report.contains("Art Images\n  - Added     : 0 art(s)"));
        assert!(!report.contains("Poster Images"));
        assert!(!report.contains("Episode NFO Files"));
        let nfo = report.find("NFO Files").unwrap();
        let art = report.find("Art Images").unwrap();
        assert!(nfo < art);
    }
}
