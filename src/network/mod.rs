mod parse;
mod sample;

use std::collections::HashMap;
use std::fmt;

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

pub use parse::load_network;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Person,
    Faction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub color: Color32,
}

impl Actor {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relation {
    pub from: ActorId,
    pub to: ActorId,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub negative: f32,
    pub positive: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            negative: -50.0,
            positive: 50.0,
        }
    }
}

const SELECTED_OPINION_FLOOR: f32 = 5.0;

pub const NEUTRAL_COLOR: Color32 = Color32::GRAY;
pub const FRIEND_COLOR: Color32 = Color32::GREEN;
pub const ENEMY_COLOR: Color32 = Color32::RED;

#[derive(Clone, Debug, Default)]
pub struct Network {
    actors: Vec<Actor>,
    index_by_id: HashMap<ActorId, usize>,
    opinions: HashMap<(ActorId, ActorId), f32>,
    relations: Vec<Relation>,
}

impl Network {
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.index_by_id.get(&id).map(|&index| &self.actors[index])
    }

    pub fn actors_of(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.iter().filter(move |actor| actor.kind == kind)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn opinion(&self, from: ActorId, to: ActorId) -> f32 {
        self.opinions.get(&(from, to)).copied().unwrap_or(0.0)
    }

    pub fn goodwill(&self, a: ActorId, b: ActorId) -> f32 {
        let forward = self.opinion(a, b);
        let backward = self.opinion(b, a);
        if forward.abs() >= backward.abs() {
            forward
        } else {
            backward
        }
    }

    pub fn attraction(&self, from: ActorId, to: ActorId) -> Option<f32> {
        self.opinions.get(&(from, to)).copied()
    }

    pub fn relations_from(&self, id: ActorId) -> impl Iterator<Item = &Relation> + '_ {
        self.relations.iter().filter(move |relation| relation.from == id)
    }

    pub fn relations_to(&self, id: ActorId) -> impl Iterator<Item = &Relation> + '_ {
        self.relations.iter().filter(move |relation| relation.to == id)
    }

    /// Candidates related to `actor`: the larger of the two opinions exceeds the positive
    /// threshold or the smaller falls below the negative one. A selected actor is also
    /// related to anyone it shares a non-trivial opinion with.
    pub fn related(
        &self,
        actor: ActorId,
        candidates: impl IntoIterator<Item = ActorId>,
        selected: bool,
        thresholds: Thresholds,
    ) -> Vec<ActorId> {
        let mut related = Vec::new();
        for other in candidates {
            if other == actor || related.contains(&other) {
                continue;
            }
            let forward = self.opinion(actor, other);
            let backward = self.opinion(other, actor);
            let max = forward.max(backward);
            let min = forward.min(backward);

            let notable = selected && (max > SELECTED_OPINION_FLOOR || min < -SELECTED_OPINION_FLOOR);
            if notable || max > thresholds.positive || min < thresholds.negative {
                related.push(other);
            }
        }
        related
    }

    pub(crate) fn from_parts(actors: Vec<Actor>, relations: Vec<Relation>) -> Self {
        let index_by_id = actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (actor.id, index))
            .collect();
        let opinions = relations
            .iter()
            .map(|relation| ((relation.from, relation.to), relation.value))
            .collect();
        Self {
            actors,
            index_by_id,
            opinions,
            relations,
        }
    }
}

pub fn relation_color(opinion: f32) -> Color32 {
    let amount = (opinion.abs() / 100.0).clamp(0.0, 1.0);
    if opinion > 0.0 {
        NEUTRAL_COLOR.lerp_to_gamma(FRIEND_COLOR, amount)
    } else if opinion < 0.0 {
        NEUTRAL_COLOR.lerp_to_gamma(ENEMY_COLOR, amount)
    } else {
        NEUTRAL_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: u32, kind: ActorKind) -> Actor {
        Actor {
            id: ActorId(id),
            name: format!("Actor {id}"),
            kind,
            color: Color32::WHITE,
        }
    }

    fn relation(from: u32, to: u32, value: f32) -> Relation {
        Relation {
            from: ActorId(from),
            to: ActorId(to),
            value,
        }
    }

    fn network() -> Network {
        Network::from_parts(
            (1..=5).map(|id| actor(id, ActorKind::Person)).collect(),
            vec![
                relation(1, 2, 80.0),
                relation(2, 1, 10.0),
                relation(1, 3, 7.0),
                relation(4, 1, -60.0),
                relation(1, 5, 3.0),
            ],
        )
    }

    fn candidates(network: &Network) -> Vec<ActorId> {
        network.actors().iter().map(|actor| actor.id).collect()
    }

    #[test]
    fn unrecorded_opinion_is_neutral() {
        let network = network();
        assert_eq!(network.opinion(ActorId(1), ActorId(2)), 80.0);
        assert_eq!(network.opinion(ActorId(3), ActorId(1)), 0.0);
        assert_eq!(network.attraction(ActorId(3), ActorId(1)), None);
        assert_eq!(network.attraction(ActorId(2), ActorId(1)), Some(10.0));
    }

    #[test]
    fn goodwill_is_symmetric() {
        let network = network();
        assert_eq!(network.goodwill(ActorId(1), ActorId(4)), -60.0);
        assert_eq!(network.goodwill(ActorId(4), ActorId(1)), -60.0);
    }

    #[test]
    fn strong_opinions_relate_unselected_actors() {
        let network = network();
        let related = network.related(ActorId(1), candidates(&network), false, Thresholds::default());
        assert_eq!(related, vec![ActorId(2), ActorId(4)]);
    }

    #[test]
    fn selected_actor_relates_to_mild_opinions() {
        let network = network();
        let related = network.related(ActorId(1), candidates(&network), true, Thresholds::default());
        assert_eq!(related, vec![ActorId(2), ActorId(3), ActorId(4)]);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let network = network();
        let thresholds = Thresholds {
            negative: -60.0,
            positive: 80.0,
        };
        assert!(network.related(ActorId(1), candidates(&network), false, thresholds).is_empty());
    }

    #[test]
    fn relation_color_blends_by_magnitude() {
        assert_eq!(relation_color(0.0), NEUTRAL_COLOR);
        assert_eq!(relation_color(100.0), FRIEND_COLOR);
        assert_eq!(relation_color(-100.0), ENEMY_COLOR);
        assert_eq!(relation_color(250.0), FRIEND_COLOR);

        let mild = relation_color(-30.0);
        assert_ne!(mild, NEUTRAL_COLOR);
        assert_ne!(mild, ENEMY_COLOR);
    }

    #[test]
    fn initials_take_first_letters() {
        let mut person = actor(1, ActorKind::Person);
        person.name = "ada lovelace byron".to_owned();
        assert_eq!(person.initials(), "AL");
    }
}
