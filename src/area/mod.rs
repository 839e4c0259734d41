//! Area-editing core: ring construction, vertex latching, ring closure and
//! the pixel <-> game coordinate transform.
//!
//! Nothing in here knows about windows, input devices or rendering. The
//! editor plugin feeds pixel positions into an [`EditorSession`] and reads
//! back a [`SessionSnapshot`] to draw.
//!
//! ## Module Structure
//!
//! - [`transform`] - Calibration, [`CoordinateTransform`] and [`GameCoordinate`]
//! - [`ring`] - [`Vertex`], [`Edge`] and [`PolygonRing`]
//! - [`session`] - [`EditorSession`] state machine
//! - [`codec`] - Area document export/import and file I/O
//! - [`error`] - [`AreaError`]

pub mod codec;
pub mod error;
pub mod ring;
pub mod session;
pub mod transform;


pub use codec::{
    area_file_path, export, import, read_area_file, sanitize_area_name, write_area_file,
    AreaMetadata, AreaRecord, AreaValues, ExportedArea, AREA_FILE_EXTENSION,
};
pub use error::AreaError;
pub use ring::{Edge, PolygonRing, Vertex};
pub use session::{
    AreaSink, ClickOutcome, ClickPreview, EditorSession, RingId, SessionSnapshot,
    DEFAULT_LATCH_RADIUS,
};
pub use transform::{CalibrationCorners, CoordinateTransform, GameCoordinate, TILE_GRID_SIZE};
