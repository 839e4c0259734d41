//! Centralized constants used across the application.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Reference image shown when the config names none
pub const DEFAULT_REFERENCE_IMAGE: &str = "assets/game_map.png";

/// Directory area files are written to
pub const DEFAULT_EXPORTS_DIR: &str = "exports";

/// Radius of the vertex markers drawn on rings, in image pixels
pub const VERTEX_MARKER_RADIUS: f32 = 2.5;

/// Zoom limits for the editor camera (orthographic scale)
pub const MIN_ZOOM_SCALE: f32 = 0.1;
pub const MAX_ZOOM_SCALE: f32 = 10.0;
