//! Gizmo rendering of traced rings.

use bevy::prelude::*;

use crate::area::PolygonRing;
use crate::constants::VERTEX_MARKER_RADIUS;

use super::backdrop::{pixel_to_world, AreaEditor};
use super::input::CursorPixel;

const COMPLETED_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const CURRENT_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const LATCH_COLOR: Color = Color::srgb(1.0, 0.85, 0.0);

fn draw_ring(
    gizmos: &mut Gizmos,
    ring: &PolygonRing,
    extent: (u32, u32),
    color: Color,
    close: bool,
) {
    for edge in ring.edges() {
        gizmos.line_2d(
            pixel_to_world(edge.start, extent),
            pixel_to_world(edge.end, extent),
            color,
        );
    }

    // Rings imported from files may not repeat their first vertex
    if close
        && !ring.is_closed()
        && let (Some(first), Some(last)) = (ring.first(), ring.last())
        && ring.len() > 2
    {
        gizmos.line_2d(
            pixel_to_world(last, extent),
            pixel_to_world(first, extent),
            color,
        );
    }

    for vertex in ring.vertices() {
        gizmos.circle_2d(pixel_to_world(*vertex, extent), VERTEX_MARKER_RADIUS, color);
    }
}

pub fn render_rings(mut gizmos: Gizmos, editor: Res<AreaEditor>) {
    let Some(extent) = editor.extent() else {
        return;
    };

    let snapshot = editor.session.snapshot();
    for ring in snapshot.completed {
        draw_ring(&mut gizmos, ring, extent, COMPLETED_COLOR, true);
    }
    draw_ring(&mut gizmos, snapshot.current, extent, CURRENT_COLOR, false);
}

/// Highlights the vertex a left click at the cursor would snap onto
pub fn render_latch_preview(
    mut gizmos: Gizmos,
    editor: Res<AreaEditor>,
    cursor: Res<CursorPixel>,
) {
    let (Some(extent), Some(pixel)) = (editor.extent(), cursor.pixel) else {
        return;
    };

    let preview = editor.session.preview(pixel);
    if !preview.latched {
        return;
    }

    let center = pixel_to_world(preview.vertex, extent);
    gizmos.circle_2d(center, editor.session.latch_radius() as f32, LATCH_COLOR);
    if preview.closes_ring {
        gizmos.circle_2d(center, VERTEX_MARKER_RADIUS * 2.0, LATCH_COLOR);
    }
}
