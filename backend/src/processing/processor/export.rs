use crate::model::{ArtifactKind, ExportConfig, ExportOutcome, ItemRef, LibraryDescriptor, MediaRecord,
                   NfoDocument, RunSummary, SeasonEntry, ATTR_ART, ATTR_RATING_KEY, ATTR_THUMB};
use crate::processing::{decide, episode_nfo_path, locate_media, project_episode, project_record, resolve_libraries,
                        resolve_target_paths, season_cover_name, FreshnessDecision, LocalFileState, MediaLocation};
use crate::repository::{save_image, write_nfo};
use crate::utils::{debug_if_enabled, PlexApi};
use log::{debug, info};
use shared::error::{artifact_err, ExportError};
use shared::model::{LibraryKind, XML_ELEMENT_DIRECTORY, XML_ELEMENT_VIDEO};
use std::path::{Path, PathBuf};

const PROGRESS_STEP: usize = 100;

enum ArtifactSource<'a> {
    Document(NfoDocument),
    Image(Option<&'a str>),
}

/// One file to create or refresh.
struct ArtifactTask<'a> {
    kind: ArtifactKind,
    title: &'a str,
    path: PathBuf,
    /// Remote `updatedAt` the local file is compared against.
    updated_at: i64,
    source: ArtifactSource<'a>,
}

async fn write_artifact<A: PlexApi>(api: &A, task: &ArtifactTask<'_>) -> Result<(), ExportError> {
    match &task.source {
        ArtifactSource::Document(doc) => write_nfo(&task.path, doc).await,
        ArtifactSource::Image(Some(url)) => {
            let bytes = api.fetch_image(url).await?;
            save_image(&task.path, &bytes).await
        }
        ArtifactSource::Image(None) => Err(artifact_err!("no image available")),
    }
}

async fn process_artifact<A: PlexApi>(api: &A, config: &ExportConfig, task: &ArtifactTask<'_>) -> ExportOutcome {
    let label = task.kind.label();
    let title = task.title;
    let path = task.path.display();
    let state = LocalFileState::inspect(&task.path).await;
    match decide(&state, task.updated_at, config.dry_run, config.force_overwrite) {
        FreshnessDecision::NotExistTargetDir => {
            let dir = task.path.parent().unwrap_or_else(|| Path::new(""));
            debug!("[FAILURE] {label} for {title} skipped because {} is not exist", dir.display());
            ExportOutcome::NotExistTargetDir
        }
        FreshnessDecision::DryRun { file_exists } => {
            if file_exists {
                info!("[DRY RUN] {label} for {title} will be checked and rewritten");
            } else {
                info!("[DRY RUN] {label} for {title} will be saved to {path}");
            }
            ExportOutcome::DryRun
        }
        FreshnessDecision::Skip => {
            debug!("[SKIPPED] {label} for {title} skipped because file is not older than last updated metadata");
            ExportOutcome::Skipped
        }
        decision @ (FreshnessDecision::Create | FreshnessDecision::Overwrite) => {
            match write_artifact(api, task).await {
                Ok(()) if decision == FreshnessDecision::Create => {
                    debug!("[ADDED] {label} for {title} successfully saved to {path}");
                    ExportOutcome::Created
                }
                Ok(()) => {
                    debug!("[UPDATED] {label} for {title} successfully saved to {path}");
                    ExportOutcome::Updated
                }
                Err(err) => {
                    debug!("[FAILURE] {label} for {title} failed: {err}");
                    ExportOutcome::Failure
                }
            }
        }
    }
}

async fn export_artifact<A: PlexApi>(api: &A, config: &ExportConfig, summary: &mut RunSummary, task: ArtifactTask<'_>) {
    let outcome = process_artifact(api, config, &task).await;
    summary.record_outcome(task.kind, outcome);
}

async fn export_episode_nfos<A: PlexApi>(api: &A, config: &ExportConfig, summary: &mut RunSummary,
                                         show_key: &str, title: &str) -> Result<(), ExportError> {
    let seasons = api.fetch_children(show_key, XML_ELEMENT_DIRECTORY).await?;
    for season in seasons.iter().map(SeasonEntry::from) {
        let Some(season_key) = season.rating_key.as_deref() else { continue };
        let episodes = match api.fetch_children(season_key, XML_ELEMENT_VIDEO).await {
            Ok(episodes) => episodes,
            Err(err) => {
                debug!("[FAILURE] Episode NFOs of {title} season {season_key} skipped: {err}");
                summary.record_outcome(ArtifactKind::EpisodeNfo, ExportOutcome::Failure);
                continue;
            }
        };
        for episode_key in episodes.iter().filter_map(|e| e.attr(ATTR_RATING_KEY)) {
            let episode = api.fetch_detail(episode_key, XML_ELEMENT_VIDEO).await?;
            let media_file = episode.first_part_file()
                .ok_or_else(|| artifact_err!("episode {episode_key} has no media file"))?;
            let path = episode_nfo_path(media_file, &config.path_mapping);
            export_artifact(api, config, summary, ArtifactTask {
                kind: ArtifactKind::EpisodeNfo,
                title,
                path,
                updated_at: episode.updated_at(),
                source: ArtifactSource::Document(project_episode(&episode)),
            }).await;
        }
    }
    Ok(())
}

async fn export_season_posters<A: PlexApi>(api: &A, config: &ExportConfig, summary: &mut RunSummary,
                                           show: &MediaRecord, show_key: &str, title: &str, media_dir: &str) -> Result<(), ExportError> {
    let seasons = api.fetch_children(show_key, XML_ELEMENT_DIRECTORY).await?;
    for season in seasons.iter().map(SeasonEntry::from) {
        let Some(cover) = season_cover_name(season.title.as_deref()) else { continue };
        export_artifact(api, config, summary, ArtifactTask {
            kind: ArtifactKind::SeasonPoster,
            title,
            path: Path::new(media_dir).join(cover),
            updated_at: show.updated_at(),
            source: ArtifactSource::Image(season.thumb.as_deref()),
        }).await;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn export_location<A: PlexApi>(api: &A, config: &ExportConfig, summary: &mut RunSummary, kind: LibraryKind,
                                     rating_key: &str, record: &MediaRecord, title: &str, location: &MediaLocation) {
    debug_if_enabled!("media_path: {}", location.dir);
    let targets = resolve_target_paths(kind, config.movie_nfo_name_type, config.movie_image_name_type,
                                       &location.dir, title, location.media_file.as_deref());
    let updated_at = record.updated_at();
    let exports = config.exports;

    if exports.nfo {
        export_artifact(api, config, summary, ArtifactTask {
            kind: ArtifactKind::Nfo,
            title,
            path: targets.nfo,
            updated_at,
            source: ArtifactSource::Document(project_record(&config.nfo_fields, kind, record)),
        }).await;
    }

    if exports.episode_nfo && ArtifactKind::EpisodeNfo.applies_to(kind) {
        if let Err(err) = export_episode_nfos(api, config, summary, rating_key, title).await {
            debug!("[FAILURE] Episode NFO for {title} failed: {err}");
            summary.record_outcome(ArtifactKind::EpisodeNfo, ExportOutcome::Failure);
        }
    }

    if exports.poster {
        export_artifact(api, config, summary, ArtifactTask {
            kind: ArtifactKind::Poster,
            title,
            path: targets.poster,
            updated_at,
            source: ArtifactSource::Image(record.attr(ATTR_THUMB)),
        }).await;
    }

    if exports.fanart {
        export_artifact(api, config, summary, ArtifactTask {
            kind: ArtifactKind::Fanart,
            title,
            path: targets.fanart,
            updated_at,
            source: ArtifactSource::Image(record.attr(ATTR_ART)),
        }).await;
    }

    if exports.season_poster && ArtifactKind::SeasonPoster.applies_to(kind) {
        if let Err(err) = export_season_posters(api, config, summary, record, rating_key, title, &location.dir).await {
            info!("[FAILURE] Season poster for {title} failed: {err}");
            summary.record_outcome(ArtifactKind::SeasonPoster, ExportOutcome::Failure);
        }
    }
}

/// Exports every enabled artifact of one item. Item errors are returned, artifact errors are recorded.
async fn export_item<A: PlexApi>(api: &A, config: &ExportConfig, library: &LibraryDescriptor,
                                 item: &ItemRef, summary: &mut RunSummary) -> Result<(), ExportError> {
    if item.title.is_some() && !config.accepts_title(item.title.as_deref()) {
        return Ok(());
    }
    let record = api.fetch_detail(&item.rating_key, library.kind.item_element()).await?;
    if item.title.is_none() && !config.accepts_title(record.title()) {
        return Ok(());
    }
    let title = record.title().or(item.title.as_deref()).unwrap_or(&item.rating_key).to_string();

    let locations = match locate_media(api, library.kind, &item.rating_key, &record, &config.path_mapping).await {
        Ok(locations) => locations,
        Err(err) => {
            debug!("[FAILURE] {title} skipped: {err}");
            for kind in config.exports.enabled().filter(|k| k.applies_to(library.kind)) {
                summary.record_outcome(kind, ExportOutcome::NotExistTargetDir);
            }
            return Ok(());
        }
    };

    for location in &locations {
        export_location(api, config, summary, library.kind, &item.rating_key, &record, &title, location).await;
    }
    Ok(())
}

async fn export_library<A: PlexApi>(api: &A, config: &ExportConfig, library: &LibraryDescriptor) -> Result<RunSummary, ExportError> {
    let mut summary = RunSummary::new(library.to_string());
    info!("Processing library {library}");
    let items = api.list_items(library).await?;
    let total = items.len();
    for (idx, item) in items.iter().enumerate() {
        if let Err(err) = export_item(api, config, library, item, &mut summary).await {
            if err.is_fatal() {
                return Err(err);
            }
            debug!("Skipping item {}: {err}", item.title.as_deref().unwrap_or(&item.rating_key));
        }
        let done = idx + 1;
        if done % PROGRESS_STEP == 0 && done < total {
            info!("{library}: {done}/{total}");
        }
    }
    info!("{library}: {total}/{total}");
    summary.finish();
    Ok(summary)
}

/// Runs one export over every configured library. Returns one summary per library pass.
pub async fn run_export<A: PlexApi>(api: &A, config: &ExportConfig) -> Result<Vec<RunSummary>, ExportError> {
    let sections = api.list_sections().await?;
    let libraries = resolve_libraries(&sections, &config.libraries, &config.library_blacklist)?;
    let mut summaries = Vec::with_capacity(libraries.len());
    for library in &libraries {
        summaries.push(export_library(api, config, library).await?);
    }
    Ok(summaries)
}
