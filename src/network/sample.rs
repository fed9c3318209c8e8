use eframe::egui::Color32;

use super::{Actor, ActorId, ActorKind, Network, Relation};

const PEOPLE: [(u32, &str); 10] = [
    (1, "Mara Voss"),
    (2, "Tobin Hale"),
    (3, "Ilse Brandt"),
    (4, "Quen Arlo"),
    (5, "Dorian Pike"),
    (6, "Sable Ortiz"),
    (7, "Niko Farrow"),
    (8, "Juno Reyes"),
    (9, "Wren Castell"),
    (10, "Eli Marsh"),
];

const FACTIONS: [(u32, &str, [u8; 3]); 4] = [
    (100, "Iron Covenant", [180, 70, 60]),
    (101, "Free Traders", [210, 170, 60]),
    (102, "Ashen Tribe", [110, 110, 120]),
    (103, "Verdant Union", [70, 160, 90]),
];

const OPINIONS: [(u32, u32, f32); 26] = [
    (1, 2, 72.0),
    (2, 1, 65.0),
    (1, 3, -58.0),
    (3, 1, -40.0),
    (2, 4, 12.0),
    (4, 2, 30.0),
    (3, 5, 88.0),
    (5, 3, 91.0),
    (4, 6, -75.0),
    (6, 4, -20.0),
    (5, 7, 8.0),
    (7, 5, -9.0),
    (6, 8, 55.0),
    (8, 6, 18.0),
    (7, 9, 100.0),
    (9, 7, 97.0),
    (8, 10, -66.0),
    (10, 8, -71.0),
    (9, 1, 22.0),
    (10, 2, 51.0),
    (100, 101, 45.0),
    (100, 102, -80.0),
    (101, 103, 20.0),
    (102, 103, -35.0),
    (103, 100, -10.0),
    (102, 101, 60.0),
];

impl Network {
    pub fn sample() -> Self {
        let people = PEOPLE.iter().map(|&(id, name)| Actor {
            id: ActorId(id),
            name: name.to_owned(),
            kind: ActorKind::Person,
            color: Color32::LIGHT_GRAY,
        });
        let factions = FACTIONS.iter().map(|&(id, name, [r, g, b])| Actor {
            id: ActorId(id),
            name: name.to_owned(),
            kind: ActorKind::Faction,
            color: Color32::from_rgb(r, g, b),
        });
        let relations = OPINIONS
            .iter()
            .map(|&(from, to, value)| Relation {
                from: ActorId(from),
                to: ActorId(to),
                value,
            })
            .collect();

        Self::from_parts(people.chain(factions).collect(), relations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_relations_name_known_actors() {
        let network = Network::sample();
        assert_eq!(network.actors_of(ActorKind::Person).count(), PEOPLE.len());
        assert_eq!(network.actors_of(ActorKind::Faction).count(), FACTIONS.len());
        for relation in network.relations() {
            assert!(network.actor(relation.from).is_some());
            assert!(network.actor(relation.to).is_some());
            assert_ne!(relation.from, relation.to);
        }
    }
}
