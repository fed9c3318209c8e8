use eframe::egui::{Pos2, Vec2};

use super::math::{direction_to, rotated};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    #[default]
    Plain,
    Mutual,
    Directed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Undirected,
    Forward,
    Backward,
    Both,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    pub flow: Flow,
    pub start: Pos2,
    pub end: Pos2,
    pub heads: Vec<[Pos2; 2]>,
}

const HEAD_LENGTH: f32 = 6.0;
const HEAD_ANGLES: [f32; 2] = [145.0, 215.0];
const ARROW_START_GAP: f32 = 40.0;
const ARROW_END_GAP: f32 = 30.0;
const MUTUAL_GAP: f32 = 35.0;
const PARALLEL_OFFSET: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(a: usize, b: usize, kind: EdgeKind) -> Self {
        Self { a, b, kind }
    }

    pub fn connectors(&self, a: Pos2, b: Pos2) -> Vec<Connector> {
        match self.kind {
            EdgeKind::Plain => vec![Connector {
                flow: Flow::Undirected,
                start: a,
                end: b,
                heads: Vec::new(),
            }],
            EdgeKind::Mutual => vec![mutual_arrow(a, b)],
            EdgeKind::Directed => vec![
                offset_arrow(a, b, Flow::Forward),
                offset_arrow(b, a, Flow::Backward),
            ],
        }
    }
}

fn arrow_heads(tip: Pos2, direction: Vec2) -> [[Pos2; 2]; 2] {
    HEAD_ANGLES.map(|angle| [tip, tip + rotated(direction, angle) * HEAD_LENGTH])
}

fn offset_arrow(from: Pos2, to: Pos2, flow: Flow) -> Connector {
    let direction = direction_to(from.to_vec2(), to.to_vec2());
    let offset = rotated(direction, 90.0) * PARALLEL_OFFSET;
    let start = from + direction * ARROW_START_GAP + offset;
    let end = to - direction * ARROW_END_GAP + offset;

    Connector {
        flow,
        start,
        end,
        heads: arrow_heads(end, direction).to_vec(),
    }
}

fn mutual_arrow(from: Pos2, to: Pos2) -> Connector {
    let direction = direction_to(from.to_vec2(), to.to_vec2());
    let start = from + direction * MUTUAL_GAP;
    let end = to - direction * MUTUAL_GAP;

    let mut heads = arrow_heads(end, direction).to_vec();
    heads.extend(arrow_heads(start, -direction));

    Connector {
        flow: Flow::Both,
        start,
        end,
        heads,
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn plain_edge_is_one_bare_line() {
        let edge = Edge::new(0, 1, EdgeKind::Plain);
        let connectors = edge.connectors(pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].flow, Flow::Undirected);
        assert!(connectors[0].heads.is_empty());
    }

    #[test]
    fn directed_edge_draws_two_distinct_parallel_arrows() {
        let edge = Edge::new(0, 1, EdgeKind::Directed);
        let connectors = edge.connectors(pos2(0.0, 0.0), pos2(200.0, 0.0));
        assert_eq!(connectors.len(), 2);

        let forward = &connectors[0];
        let backward = &connectors[1];
        assert_eq!(forward.flow, Flow::Forward);
        assert_eq!(backward.flow, Flow::Backward);

        // both run horizontally, on opposite sides of the centre line
        assert!((forward.start.y - forward.end.y).abs() < 1e-4);
        assert!((backward.start.y - backward.end.y).abs() < 1e-4);
        assert!((forward.start.y - backward.start.y).abs() > 3.0);
        assert!(forward.end.x > forward.start.x);
        assert!(backward.end.x < backward.start.x);

        assert!((forward.start.x - 40.0).abs() < 1e-3);
        assert!((forward.end.x - 170.0).abs() < 1e-3);
        assert_eq!(forward.heads.len(), 2);
        assert!(forward.heads.iter().all(|[tip, _]| *tip == forward.end));
    }

    #[test]
    fn mutual_edge_has_heads_at_both_ends() {
        let edge = Edge::new(0, 1, EdgeKind::Mutual);
        let connectors = edge.connectors(pos2(0.0, 0.0), pos2(0.0, 100.0));
        assert_eq!(connectors.len(), 1);

        let arrow = &connectors[0];
        assert_eq!(arrow.flow, Flow::Both);
        assert!((arrow.start.y - 35.0).abs() < 1e-3);
        assert!((arrow.end.y - 65.0).abs() < 1e-3);
        assert_eq!(arrow.heads.len(), 4);
        assert!(arrow.heads.iter().any(|[tip, _]| *tip == arrow.start));
        assert!(arrow.heads.iter().any(|[tip, _]| *tip == arrow.end));
    }

    #[test]
    fn heads_point_back_along_the_line() {
        let edge = Edge::new(0, 1, EdgeKind::Directed);
        let forward = edge.connectors(pos2(0.0, 0.0), pos2(200.0, 0.0)).remove(0);
        for [tip, tail] in forward.heads {
            assert!(tail.x < tip.x);
            assert!(((tail - tip).length() - HEAD_LENGTH).abs() < 1e-3);
        }
    }
}
