use chrono::{DateTime, Local};
use indexmap::IndexMap;
use shared::model::LibraryKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Nfo,
    EpisodeNfo,
    Poster,
    Fanart,
    SeasonPoster,
}

impl ArtifactKind {
    /// Report order.
    pub const ALL: [ArtifactKind; 5] = [Self::Nfo, Self::Poster, Self::Fanart, Self::SeasonPoster, Self::EpisodeNfo];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nfo => "NFO",
            Self::EpisodeNfo => "Episode NFO",
            Self::Poster => "Poster",
            Self::Fanart => "Art",
            Self::SeasonPoster => "Season Poster",
        }
    }

    pub const fn report_title(self) -> &'static str {
        match self {
            Self::Nfo => "NFO Files",
            Self::EpisodeNfo => "Episode NFO Files",
            Self::Poster => "Poster Images",
            Self::Fanart => "Art Images",
            Self::SeasonPoster => "Season Poster Images",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Nfo => "NFO(s)",
            Self::EpisodeNfo => "episode NFO(s)",
            Self::Poster => "poster(s)",
            Self::Fanart => "art(s)",
            Self::SeasonPoster => "season poster(s)",
        }
    }

    /// Season posters and episode NFOs only exist for shows.
    pub const fn applies_to(self, kind: LibraryKind) -> bool {
        match self {
            Self::Nfo | Self::Poster | Self::Fanart => true,
            Self::EpisodeNfo | Self::SeasonPoster => matches!(kind, LibraryKind::Show),
        }
    }
}

/// Result of one artifact attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NotExistTargetDir,
    DryRun,
    Created,
    Updated,
    Skipped,
    Failure,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ArtifactCounters {
    pub new: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Counters of one library pass.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub name: String,
    pub start: DateTime<Local>,
    pub finish: Option<DateTime<Local>>,
    counters: IndexMap<ArtifactKind, ArtifactCounters>,
}

impl RunSummary {
    pub fn new(name: String) -> Self {
        Self {
            name,
            start: Local::now(),
            finish: None,
            counters: ArtifactKind::ALL.iter().map(|k| (*k, ArtifactCounters::default())).collect(),
        }
    }

    pub fn record_outcome(&mut self, kind: ArtifactKind, outcome: ExportOutcome) {
        let counters = self.counters.entry(kind).or_default();
        match outcome {
            ExportOutcome::Created => counters.new += 1,
            ExportOutcome::Updated => counters.updated += 1,
            ExportOutcome::Skipped => counters.skipped += 1,
            ExportOutcome::NotExistTargetDir | ExportOutcome::Failure => counters.failed += 1,
            ExportOutcome::DryRun => {}
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> ArtifactCounters {
        self.counters.get(&kind).copied().unwrap_or_default()
    }

    pub fn finish(&mut self) {
        self.finish = Some(Local::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        let mut summary = RunSummary::new("Movies".to_string());
        summary.record_outcome(ArtifactKind::Nfo, ExportOutcome::Created);
        summary.record_outcome(ArtifactKind::Nfo, ExportOutcome::Created);
        summary.record_outcome(ArtifactKind::Nfo, ExportOutcome::Skipped);
        summary.record_outcome(ArtifactKind::Poster, ExportOutcome::NotExistTargetDir);
        summary.record_outcome(ArtifactKind::Poster, ExportOutcome::Failure);
        summary.record_outcome(ArtifactKind::Fanart, ExportOutcome::Updated);
        summary.record_outcome(ArtifactKind::Fanart, ExportOutcome::DryRun);
        assert_eq!(summary.get(ArtifactKind::Nfo), ArtifactCounters { new: 2, updated: 0, skipped: 1, failed: 0 });
        assert_eq!(summary.get(ArtifactKind::Poster).failed, 2);
        assert_eq!(summary.get(ArtifactKind::Fanart), ArtifactCounters { new: 0, updated: 1, skipped: 0, failed: 0 });
        assert_eq!(summary.get(ArtifactKind::EpisodeNfo), ArtifactCounters::default());
    }

    #[test]
    fn test_applies_to() {
        assert!(ArtifactKind::SeasonPoster.applies_to(LibraryKind::Show));
        assert!(!ArtifactKind::EpisodeNfo.applies_to(LibraryKind::Movie));
        assert!(ArtifactKind::Poster.applies_to(LibraryKind::Albums));
    }
}
