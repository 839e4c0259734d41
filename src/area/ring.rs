//! Polygon rings built vertex by vertex.

use super::error::AreaError;

/// Integer pixel position on the reference image (origin top-left, Y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels
    pub fn distance(&self, other: Vertex) -> f64 {
        let dx = (self.x as f64) - (other.x as f64);
        let dy = (self.y as f64) - (other.y as f64);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Vertex {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Segment between two consecutive ring vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

/// Ordered vertex list for one area. Edges are derived from adjacent
/// vertices, so `edges[i]` always joins `vertices[i]` and `vertices[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolygonRing {
    vertices: Vec<Vertex>,
}

impl PolygonRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<Vertex> {
        self.vertices.last().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices.windows(2).map(|pair| Edge {
            start: pair[0],
            end: pair[1],
        })
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Removes the vertex at `index`. A ring left with a single vertex is
    /// cleared entirely.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Vertex, AreaError> {
        if index >= self.vertices.len() {
            return Err(AreaError::InvalidIndex {
                index,
                len: self.vertices.len(),
            });
        }

        let removed = self.vertices.remove(index);
        if self.vertices.len() == 1 {
            self.vertices.clear();
        }
        Ok(removed)
    }

    /// Index of and distance to the vertex closest to `point`. Ties keep the
    /// lowest index.
    pub fn nearest(&self, point: Vertex) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, vertex) in self.vertices.iter().enumerate() {
            let distance = vertex.distance(point);
            if best.is_none_or(|(_, smallest)| distance < smallest) {
                best = Some((index, distance));
            }
        }
        best
    }

    /// Removes the vertex closest to `point` if it lies within `max_distance`.
    pub fn remove_nearest(&mut self, point: Vertex, max_distance: f64) -> Option<Vertex> {
        let (index, distance) = self.nearest(point)?;
        if distance > max_distance {
            return None;
        }
        self.remove_vertex(index).ok()
    }

    /// True once the last vertex returns exactly onto the first.
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 2 && self.vertices.first() == self.vertices.last()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub(crate) fn pop_vertex(&mut self) -> Option<Vertex> {
        self.vertices.pop()
    }
}

impl FromIterator<Vertex> for PolygonRing {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        let mut ring = PolygonRing::new();
        for vertex in iter {
            ring.add_vertex(vertex);
        }
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(points: &[(i32, i32)]) -> PolygonRing {
        points.iter().copied().map(Vertex::from).collect()
    }

    #[test]
    fn test_vertex_and_edge_counts() {
        for n in 0..8 {
            let ring: PolygonRing = (0..n).map(|i| Vertex::new(i * 10, i)).collect();
            assert_eq!(ring.len(), n as usize);
            assert_eq!(ring.edge_count(), (n as usize).saturating_sub(1));
            assert_eq!(ring.edges().count(), ring.edge_count());
        }
    }

    #[test]
    fn test_edges_join_adjacent_vertices() {
        let ring = ring_of(&[(0, 0), (5, 0), (5, 5)]);
        let edges: Vec<Edge> = ring.edges().collect();
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.start, ring.vertices()[i]);
            assert_eq!(edge.end, ring.vertices()[i + 1]);
        }
    }

    #[test]
    fn test_is_closed() {
        assert!(ring_of(&[(10, 10), (20, 10), (20, 20), (10, 10)]).is_closed());
        assert!(!ring_of(&[(10, 10), (20, 10), (20, 20)]).is_closed());
        assert!(!ring_of(&[(10, 10)]).is_closed());
        assert!(!PolygonRing::new().is_closed());
    }

    #[test]
    fn test_remove_middle_vertex_merges_edges() {
        let mut ring = ring_of(&[(0, 0), (5, 5), (10, 10)]);
        let removed = ring.remove_nearest(Vertex::new(6, 5), f64::INFINITY);
        assert_eq!(removed, Some(Vertex::new(5, 5)));
        assert_eq!(ring.vertices(), &[Vertex::new(0, 0), Vertex::new(10, 10)]);
        assert_eq!(ring.edge_count(), 1);
    }

    #[test]
    fn test_single_leftover_vertex_collapses_ring() {
        let mut ring = ring_of(&[(0, 0), (5, 5), (10, 10)]);
        ring.remove_vertex(1).unwrap();
        ring.remove_vertex(0).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.edge_count(), 0);
    }

    #[test]
    fn test_remove_first_vertex() {
        let mut ring = ring_of(&[(0, 0), (5, 5), (10, 10)]);
        assert_eq!(ring.remove_vertex(0).unwrap(), Vertex::new(0, 0));
        assert_eq!(ring.vertices(), &[Vertex::new(5, 5), Vertex::new(10, 10)]);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut ring = ring_of(&[(0, 0), (5, 5)]);
        let err = ring.remove_vertex(2).unwrap_err();
        assert!(matches!(err, AreaError::InvalidIndex { index: 2, len: 2 }));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_remove_nearest_respects_max_distance() {
        let mut ring = ring_of(&[(0, 0), (50, 50)]);
        assert_eq!(ring.remove_nearest(Vertex::new(20, 20), 5.0), None);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_remove_nearest_on_empty_ring() {
        let mut ring = PolygonRing::new();
        assert_eq!(ring.remove_nearest(Vertex::new(0, 0), f64::INFINITY), None);
    }

    #[test]
    fn test_nearest_tie_keeps_lowest_index() {
        let ring = ring_of(&[(0, 0), (10, 0), (20, 0)]);
        let (index, distance) = ring.nearest(Vertex::new(5, 0)).unwrap();
        assert_eq!(index, 0);
        assert_eq!(distance, 5.0);
    }

    #[test]
    fn test_vertex_distance() {
        let d = Vertex::new(100, 100).distance(Vertex::new(103, 102));
        assert!((d - 13f64.sqrt()).abs() < 1e-9);
    }
}
