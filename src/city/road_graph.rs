//! Road graph built from a city map, for routing vehicles between points
//!
//! Segment vertices become nodes (merged when closer than
//! [`ENDPOINT_EPSILON`]) and every straight run becomes an undirected edge
//! weighted by its length.

use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::city_map::CityMap;
use super::types::{Point, ENDPOINT_EPSILON};

/// One step of a planned route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Point,
    /// Unit vector towards the next waypoint, zero on the last one
    pub direction: Point,
    pub dist_to_next: f64,
}

/// Undirected junction graph over a [`CityMap`]
#[derive(Debug, Default, Clone)]
pub struct RoadGraph {
    graph: UnGraph<Point, f64>,
}

impl RoadGraph {
    pub fn from_city_map(map: &CityMap) -> Self {
        let mut road_graph = Self::default();
        for segment in map.segments() {
            for (from, to) in segment.runs() {
                let a = road_graph.find_or_add(from);
                let b = road_graph.find_or_add(to);
                if a != b {
                    road_graph.graph.add_edge(a, b, from.distance(&to));
                }
            }
        }
        road_graph
    }

    fn find_or_add(&mut self, point: Point) -> NodeIndex {
        let existing = self
            .graph
            .node_indices()
            .find(|&index| self.graph[index].distance(&point) < ENDPOINT_EPSILON);
        existing.unwrap_or_else(|| self.graph.add_node(point))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_position(&self, node: NodeIndex) -> Option<Point> {
        self.graph.node_weight(node).copied()
    }

    /// Junction closest to `point`
    pub fn nearest_node(&self, point: &Point) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .min_by_key(|&index| OrderedFloat(self.graph[index].distance(point)))
    }

    /// Shortest route between the junctions nearest to `start` and `dest`
    ///
    /// Returns `None` when the ends are disconnected or snap to the same junction.
    pub fn plan_route(&self, start: &Point, dest: &Point) -> Option<Vec<Waypoint>> {
        let start_node = self.nearest_node(start)?;
        let goal_node = self.nearest_node(dest)?;
        let goal = self.graph[goal_node];

        let (_, node_path) = astar(
            &self.graph,
            start_node,
            |node| node == goal_node,
            |edge| *edge.weight(),
            |node| self.graph[node].distance(&goal),
        )?;

        if node_path.len() < 2 {
            return None;
        }

        let mut waypoints: Vec<Waypoint> = node_path
            .windows(2)
            .map(|pair| {
                let a = self.graph[pair[0]];
                let b = self.graph[pair[1]];
                let distance = a.distance(&b);
                Waypoint {
                    position: a,
                    direction: Point::new((b.x - a.x) / distance, (b.y - a.y) / distance),
                    dist_to_next: distance,
                }
            })
            .collect();

        waypoints.push(Waypoint {
            position: goal,
            direction: Point::default(),
            dist_to_next: 0.0,
        });
        Some(waypoints)
    }
}
