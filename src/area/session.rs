//! Editing session: every traced ring plus the one currently being drawn.
//!
//! Rings live in an arena and the session tracks the ring under construction
//! by [`RingId`]. Only that ring is ever mutated; every other ring is
//! history. A click that closes the current ring hands it to an
//! [`AreaSink`] and, if the sink accepts it, immediately starts a fresh
//! current ring, so no caller ever observes a closed ring that is still
//! current.

use tracing::{debug, info};

use super::error::AreaError;
use super::ring::{PolygonRing, Vertex};

/// Snap distance in pixels used when none is configured.
pub const DEFAULT_LATCH_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingId(usize);

impl RingId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Receives a ring the moment it closes.
pub trait AreaSink {
    fn export(&mut self, ring: &PolygonRing) -> Result<(), AreaError>;
}

impl<F> AreaSink for F
where
    F: FnMut(&PolygonRing) -> Result<(), AreaError>,
{
    fn export(&mut self, ring: &PolygonRing) -> Result<(), AreaError> {
        self(ring)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The vertex was appended to the current ring.
    Added { vertex: Vertex, latched: bool },
    /// The click closed `closed`, it was exported, and `current` is the
    /// new empty ring.
    Closed { closed: RingId, current: RingId },
    /// The click would have closed the ring but export was abandoned. The
    /// ring is unchanged and stays current.
    Abandoned,
}

/// What a click at some position would do, without doing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPreview {
    pub vertex: Vertex,
    pub latched: bool,
    pub closes_ring: bool,
}

/// Read-only view handed to rendering.
#[derive(Debug)]
pub struct SessionSnapshot<'a> {
    pub completed: Vec<&'a PolygonRing>,
    pub current: &'a PolygonRing,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    rings: Vec<PolygonRing>,
    current: RingId,
    latch_radius: f64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(DEFAULT_LATCH_RADIUS)
    }
}

impl EditorSession {
    pub fn new(latch_radius: f64) -> Self {
        Self {
            rings: vec![PolygonRing::new()],
            current: RingId(0),
            latch_radius,
        }
    }

    /// Like [`EditorSession::new`], but rejects a negative or non-finite
    /// radius instead of silently disabling latching.
    pub fn with_latch_radius(latch_radius: f64) -> Result<Self, AreaError> {
        if !latch_radius.is_finite() || latch_radius < 0.0 {
            return Err(AreaError::InvalidLatchRadius {
                radius: latch_radius,
            });
        }
        Ok(Self::new(latch_radius))
    }

    pub fn latch_radius(&self) -> f64 {
        self.latch_radius
    }

    pub fn current_id(&self) -> RingId {
        self.current
    }

    pub fn current(&self) -> &PolygonRing {
        &self.rings[self.current.0]
    }

    fn current_mut(&mut self) -> &mut PolygonRing {
        &mut self.rings[self.current.0]
    }

    pub fn ring(&self, id: RingId) -> Option<&PolygonRing> {
        self.rings.get(id.0)
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> impl Iterator<Item = (RingId, &PolygonRing)> {
        self.rings
            .iter()
            .enumerate()
            .map(|(index, ring)| (RingId(index), ring))
    }

    /// Rings other than the current one that have at least one vertex.
    pub fn completed(&self) -> impl Iterator<Item = (RingId, &PolygonRing)> {
        let current = self.current;
        self.rings()
            .filter(move |(id, ring)| *id != current && !ring.is_empty())
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            completed: self.completed().map(|(_, ring)| ring).collect(),
            current: self.current(),
        }
    }

    /// Nearest existing vertex, across every ring, within the latch radius.
    pub fn latch(&self, point: Vertex) -> Option<Vertex> {
        let mut closest: Option<(Vertex, f64)> = None;
        for vertex in self.rings.iter().flat_map(|ring| ring.vertices()) {
            let distance = vertex.distance(point);
            if distance <= self.latch_radius
                && closest.is_none_or(|(_, smallest)| distance < smallest)
            {
                closest = Some((*vertex, distance));
            }
        }
        closest.map(|(vertex, _)| vertex)
    }

    fn resolve(&self, point: Vertex) -> (Vertex, bool) {
        match self.latch(point) {
            Some(vertex) => (vertex, true),
            None => (point, false),
        }
    }

    pub fn preview(&self, point: Vertex) -> ClickPreview {
        let (vertex, latched) = self.resolve(point);
        let current = self.current();
        let closes_ring = !current.is_empty() && current.first() == Some(vertex);
        ClickPreview {
            vertex,
            latched,
            closes_ring,
        }
    }

    /// Adds a vertex at `point` (after latching) to the current ring. If that
    /// closes the ring, it is exported through `sink` and a new ring becomes
    /// current. A failed export leaves the ring exactly as it was.
    pub fn click(
        &mut self,
        point: Vertex,
        sink: &mut impl AreaSink,
    ) -> Result<ClickOutcome, AreaError> {
        let (vertex, latched) = self.resolve(point);
        if latched {
            debug!("Latched ({}, {}) onto ({}, {})", point.x, point.y, vertex.x, vertex.y);
        }

        self.current_mut().add_vertex(vertex);
        if !self.current().is_closed() {
            return Ok(ClickOutcome::Added { vertex, latched });
        }

        match sink.export(self.current()) {
            Ok(()) => {
                let closed = self.current;
                let current = self.create_new_ring();
                info!(
                    "Closed ring {} with {} vertices",
                    closed.0,
                    self.rings[closed.0].len()
                );
                Ok(ClickOutcome::Closed { closed, current })
            }
            Err(e) => {
                self.current_mut().pop_vertex();
                if e.is_abandonment() {
                    info!("No area name provided, ring left open");
                    Ok(ClickOutcome::Abandoned)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Removes the current ring's vertex closest to `point`, however far.
    pub fn right_click(&mut self, point: Vertex) -> Option<Vertex> {
        let removed = self.current_mut().remove_nearest(point, f64::INFINITY);
        if let Some(vertex) = removed {
            debug!("Removed vertex ({}, {})", vertex.x, vertex.y);
        }
        removed
    }

    /// Starts a new empty ring and makes it current. The previous current
    /// ring becomes history.
    pub fn create_new_ring(&mut self) -> RingId {
        self.rings.push(PolygonRing::new());
        self.current = RingId(self.rings.len() - 1);
        self.current
    }

    /// Drops every vertex of the ring under construction.
    pub fn clear_current(&mut self) {
        self.current_mut().clear();
    }

    /// Adds a fully built ring as history. The current ring is untouched.
    pub fn import_ring(&mut self, ring: PolygonRing) -> RingId {
        self.rings.push(ring);
        RingId(self.rings.len() - 1)
    }
}
