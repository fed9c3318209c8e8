use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use eframe::egui::Color32;
use log::{info, warn};
use serde::Deserialize;

use super::{Actor, ActorId, ActorKind, Network, Relation};

#[derive(Debug, Deserialize)]
struct RawNetwork {
    #[serde(default)]
    actors: Vec<RawActor>,
    #[serde(default)]
    relations: Vec<RawRelation>,
}

#[derive(Debug, Deserialize)]
struct RawActor {
    id: ActorId,
    name: String,
    kind: ActorKind,
    #[serde(default)]
    color: Option<[u8; 3]>,
}

#[derive(Debug, Deserialize)]
struct RawRelation {
    from: ActorId,
    to: ActorId,
    value: f32,
}

pub fn load_network(path: &Path) -> Result<Network> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read network file {}", path.display()))?;
    Network::from_json(&raw).with_context(|| format!("failed to parse network file {}", path.display()))
}

impl Network {
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: RawNetwork = serde_json::from_str(raw).context("invalid network JSON")?;

        let mut seen = HashSet::with_capacity(parsed.actors.len());
        let mut actors = Vec::with_capacity(parsed.actors.len());
        for raw_actor in parsed.actors {
            if !seen.insert(raw_actor.id) {
                bail!("duplicate actor id {}", raw_actor.id);
            }
            let color = raw_actor
                .color
                .map(|[r, g, b]| Color32::from_rgb(r, g, b))
                .unwrap_or(Color32::LIGHT_GRAY);
            actors.push(Actor {
                id: raw_actor.id,
                name: raw_actor.name,
                kind: raw_actor.kind,
                color,
            });
        }

        let mut pairs = HashSet::with_capacity(parsed.relations.len());
        let mut relations = Vec::with_capacity(parsed.relations.len());
        for raw_relation in parsed.relations {
            if !seen.contains(&raw_relation.from) || !seen.contains(&raw_relation.to) {
                warn!(
                    "skipping relation {} -> {}: unknown actor",
                    raw_relation.from, raw_relation.to
                );
                continue;
            }
            if raw_relation.from == raw_relation.to {
                warn!("skipping relation of {} with itself", raw_relation.from);
                continue;
            }
            if !raw_relation.value.is_finite() {
                warn!(
                    "skipping relation {} -> {}: opinion is not a number",
                    raw_relation.from, raw_relation.to
                );
                continue;
            }
            if !pairs.insert((raw_relation.from, raw_relation.to)) {
                warn!(
                    "skipping relation {} -> {}: already recorded",
                    raw_relation.from, raw_relation.to
                );
                continue;
            }
            relations.push(Relation {
                from: raw_relation.from,
                to: raw_relation.to,
                value: raw_relation.value.clamp(-100.0, 100.0),
            });
        }

        info!(
            "loaded network with {} actors and {} relations",
            actors.len(),
            relations.len()
        );
        Ok(Self::from_parts(actors, relations))
    }
}
