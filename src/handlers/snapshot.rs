// src/handlers/snapshot.rs
use std::collections::HashMap;
use std::path::Path;
use log::{debug, error, info};
use crate::models::dimension::{self, Dimension};
use crate::models::{MarkerRecord, ServerSnapshot};
use crate::mojang::SkinService;
use crate::storage::markers::export_markers;
use crate::storage::portraits::PortraitCache;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub exported: Vec<(Dimension, usize)>,
    pub dropped: usize,
    pub failed_exports: usize,
}

/// Turns one status snapshot into the three marker files.
///
/// A player whose portrait cannot be resolved or whose dimension is unknown is
/// logged and left out; everyone else lands in their dimension's bucket in
/// snapshot order. Every dimension is exported, empty or not.
pub async fn process_snapshot<S: SkinService>(
    snapshot: &ServerSnapshot,
    portraits: &PortraitCache<S>,
    unmined_folder: &Path,
) -> TickSummary {
    let mut buckets: HashMap<Dimension, Vec<MarkerRecord>> = HashMap::new();
    let mut summary = TickSummary::default();

    for player in &snapshot.players {
        if let Err(e) = portraits.ensure_portrait(&player.uuid, &player.name).await {
            error!("Failed to get player's [{}] portrait: {}", player.name, e);
            summary.dropped += 1;
            continue;
        }

        let marker = MarkerRecord::from(player);

        let dim = match dimension::classify(&player.dimension) {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to get player's [{}] dimension [{}]: {}", player.name, player.dimension, e);
                summary.dropped += 1;
                continue;
            }
        };

        debug!(
            "Player [{}] in {} at ({}, {}), health {}",
            player.name, dim, player.x, player.z, player.health
        );
        buckets.entry(dim).or_default().push(marker);
    }

    for dim in Dimension::ALL {
        let records = buckets.remove(&dim).unwrap_or_default();
        match export_markers(&records, dim, unmined_folder).await {
            Ok(()) => summary.exported.push((dim, records.len())),
            Err(e) => {
                error!("Failed to write markers for dimension [{}]: {}", dim, e);
                summary.failed_exports += 1;
            }
        }
    }

    info!(
        "Processed {} players: {}, dropped {}, failed exports {}",
        snapshot.players.len(),
        summary
            .exported
            .iter()
            .map(|(d, n)| format!("{}={}", d, n))
            .collect::<Vec<_>>()
            .join(" "),
        summary.dropped,
        summary.failed_exports
    );

    summary
}
