//! Mapping between reference-image pixels and game tile coordinates.
//!
//! The game addresses the world in 64x64 map squares. An absolute coordinate
//! splits into a square index (`abs >> 6`) and a tile offset inside that
//! square (`abs & 63`). The reference image covers the rectangle described by
//! [`CalibrationCorners`]; image X grows with game X while image Y grows
//! *against* game Z (the top row of the image is `max_z`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AreaError;
use super::ring::Vertex;

/// Width of a map square in tiles.
pub const TILE_GRID_SIZE: i64 = 64;
const TILE_SHIFT: u32 = 6;
const TILE_MASK: i64 = TILE_GRID_SIZE - 1;

/// Game-space extent covered by the reference image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCorners {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for CalibrationCorners {
    fn default() -> Self {
        Self {
            min_x: 1024.0,
            max_x: 1471.0,
            min_z: 1600.0,
            max_z: 2111.0,
        }
    }
}

impl CalibrationCorners {
    pub fn validate(&self) -> Result<(), AreaError> {
        if !is_ordered(self.min_x, self.max_x) {
            return Err(AreaError::InvalidCalibration {
                axis: 'x',
                min: self.min_x,
                max: self.max_x,
            });
        }
        if !is_ordered(self.min_z, self.max_z) {
            return Err(AreaError::InvalidCalibration {
                axis: 'z',
                min: self.min_z,
                max: self.max_z,
            });
        }
        Ok(())
    }

    fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn span_z(&self) -> f64 {
        self.max_z - self.min_z
    }
}

/// Strictly increasing and NaN-free.
fn is_ordered(min: f64, max: f64) -> bool {
    matches!(min.partial_cmp(&max), Some(std::cmp::Ordering::Less))
}

/// A tile address in the `0_<squareX>_<squareZ>_<tileX>_<tileZ>` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameCoordinate {
    pub plane: i64,
    pub square_x: i64,
    pub square_z: i64,
    pub tile_x: i64,
    pub tile_z: i64,
}

impl GameCoordinate {
    /// Encodes an absolute tile position on the ground plane.
    pub fn from_absolute(abs_x: i64, abs_z: i64) -> Self {
        Self {
            plane: 0,
            square_x: abs_x >> TILE_SHIFT,
            square_z: abs_z >> TILE_SHIFT,
            tile_x: abs_x & TILE_MASK,
            tile_z: abs_z & TILE_MASK,
        }
    }

    /// Absolute `(x, z)` tile position, or `None` if it does not fit in an `i64`.
    pub fn absolute(&self) -> Option<(i64, i64)> {
        let axis =
            |square: i64, tile: i64| square.checked_mul(TILE_GRID_SIZE)?.checked_add(tile);
        Some((
            axis(self.square_x, self.tile_x)?,
            axis(self.square_z, self.tile_z)?,
        ))
    }
}

impl fmt::Display for GameCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.plane, self.square_x, self.square_z, self.tile_x, self.tile_z
        )
    }
}

impl FromStr for GameCoordinate {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 5 {
            return Err(AreaError::malformed(
                s,
                format!("expected 5 '_'-separated fields, found {}", parts.len()),
            ));
        }

        let mut fields = [0i64; 5];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|e| AreaError::malformed(s, format!("field {part:?}: {e}")))?;
        }

        let [plane, square_x, square_z, tile_x, tile_z] = fields;
        let coord = Self {
            plane,
            square_x,
            square_z,
            tile_x,
            tile_z,
        };
        if coord.absolute().is_none() {
            return Err(AreaError::malformed(s, "absolute position out of range"));
        }
        Ok(coord)
    }
}

/// Bidirectional pixel <-> game coordinate mapping for one reference image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    corners: CalibrationCorners,
    width: u32,
    height: u32,
}

impl CoordinateTransform {
    pub fn new(corners: CalibrationCorners, width: u32, height: u32) -> Result<Self, AreaError> {
        corners.validate()?;
        if width == 0 || height == 0 {
            return Err(AreaError::InvalidExtent { width, height });
        }
        Ok(Self {
            corners,
            width,
            height,
        })
    }

    pub fn corners(&self) -> CalibrationCorners {
        self.corners
    }

    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel lies on the reference image.
    pub fn contains(&self, pixel: Vertex) -> bool {
        pixel.x >= 0
            && pixel.y >= 0
            && (pixel.x as i64) < self.width as i64
            && (pixel.y as i64) < self.height as i64
    }

    /// Absolute game position of a pixel, rounded half away from zero.
    pub fn to_absolute(&self, pixel: Vertex) -> (i64, i64) {
        let c = &self.corners;
        let x_ratio = pixel.x as f64 / self.width as f64;
        let z_ratio = pixel.y as f64 / self.height as f64;

        let abs_x = (c.min_x + c.span_x() * x_ratio).round() as i64;
        let abs_z = (c.max_z - c.span_z() * z_ratio).round() as i64;
        (abs_x, abs_z)
    }

    pub fn to_game_coordinate(&self, pixel: Vertex) -> GameCoordinate {
        let (abs_x, abs_z) = self.to_absolute(pixel);
        GameCoordinate::from_absolute(abs_x, abs_z)
    }

    pub fn to_pixel(&self, coord: &GameCoordinate) -> Result<Vertex, AreaError> {
        let c = &self.corners;
        let (abs_x, abs_z) = coord.absolute().ok_or_else(|| {
            AreaError::malformed(&coord.to_string(), "absolute position out of range")
        })?;

        let x_ratio = (abs_x as f64 - c.min_x) / c.span_x();
        let y_ratio = (abs_z as f64 - c.max_z) / (c.min_z - c.max_z);

        Ok(Vertex::new(
            (x_ratio * self.width as f64).round() as i32,
            (y_ratio * self.height as f64).round() as i32,
        ))
    }

    /// Parses and decodes a coordinate string in one step.
    pub fn parse_pixel(&self, coord: &str) -> Result<Vertex, AreaError> {
        let coord: GameCoordinate = coord.parse()?;
        self.to_pixel(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_transform() -> CoordinateTransform {
        CoordinateTransform::new(CalibrationCorners::default(), 512, 512).unwrap()
    }

    #[test]
    fn test_top_left_pixel_encodes_max_z() {
        let t = example_transform();
        assert_eq!(t.to_absolute(Vertex::new(0, 0)), (1024, 2111));
        assert_eq!(t.to_game_coordinate(Vertex::new(0, 0)).to_string(), "0_16_32_0_63");
    }

    #[test]
    fn test_bottom_right_pixel_encodes_near_min_z() {
        let t = example_transform();
        assert_eq!(t.to_absolute(Vertex::new(511, 511)), (1470, 1601));
        assert_eq!(
            t.to_game_coordinate(Vertex::new(511, 511)).to_string(),
            "0_22_25_62_1"
        );
    }

    #[test]
    fn test_round_trip_within_one_pixel_on_both_axes() {
        let t = example_transform();
        for p in 0..512 {
            let horizontal = Vertex::new(p, 256);
            let back = t.to_pixel(&t.to_game_coordinate(horizontal)).unwrap();
            assert!((back.x - horizontal.x).abs() <= 1, "x drifted at {p}: {back:?}");
            assert!((back.y - horizontal.y).abs() <= 1, "y drifted at {p}: {back:?}");

            let vertical = Vertex::new(256, p);
            let back = t.to_pixel(&t.to_game_coordinate(vertical)).unwrap();
            assert!((back.x - vertical.x).abs() <= 1, "x drifted at {p}: {back:?}");
            assert!((back.y - vertical.y).abs() <= 1, "y drifted at {p}: {back:?}");
        }
    }

    #[test]
    fn test_x_is_monotonic_and_z_is_inverted() {
        // A larger calibration span than the image keeps every step strict
        let corners = CalibrationCorners {
            min_x: 0.0,
            max_x: 4096.0,
            min_z: 0.0,
            max_z: 4096.0,
        };
        let t = CoordinateTransform::new(corners, 512, 512).unwrap();
        for p in 1..512 {
            let (x_prev, _) = t.to_absolute(Vertex::new(p - 1, 0));
            let (x_next, _) = t.to_absolute(Vertex::new(p, 0));
            assert!(x_next > x_prev, "x not increasing at {p}");

            let (_, z_prev) = t.to_absolute(Vertex::new(0, p - 1));
            let (_, z_next) = t.to_absolute(Vertex::new(0, p));
            assert!(z_next < z_prev, "z not decreasing at {p}");
        }
    }

    #[test]
    fn test_game_coordinate_parse_and_display() {
        let coord: GameCoordinate = "0_16_32_0_63".parse().unwrap();
        assert_eq!(coord.absolute(), Some((1024, 2111)));
        assert_eq!(coord.to_string(), "0_16_32_0_63");
    }

    #[test]
    fn test_negative_absolute_uses_arithmetic_shift() {
        let coord = GameCoordinate::from_absolute(-1, -65);
        assert_eq!((coord.square_x, coord.tile_x), (-1, 63));
        assert_eq!((coord.square_z, coord.tile_z), (-2, 63));
        assert_eq!(coord.absolute(), Some((-1, -65)));
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        for input in ["0_16_32_0", "0_16_32_0_63_1", "", "garbage"] {
            let err = input.parse::<GameCoordinate>().unwrap_err();
            assert!(
                matches!(err, AreaError::MalformedCoordinate { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let err = example_transform().parse_pixel("0_16_x_0_63").unwrap_err();
        assert!(matches!(err, AreaError::MalformedCoordinate { .. }));
    }

    #[test]
    fn test_overflowing_coordinate_is_malformed() {
        let t = example_transform();
        for input in [
            "0_1_0_9223372036854775807_0",
            "0_0_144115188075855872_0_0",
            "0_-144115188075855873_0_0_0",
        ] {
            let err = t.parse_pixel(input).unwrap_err();
            assert!(
                matches!(err, AreaError::MalformedCoordinate { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_to_pixel_rejects_out_of_range_coordinate() {
        let coord = GameCoordinate {
            plane: 0,
            square_x: i64::MAX,
            square_z: 0,
            tile_x: 0,
            tile_z: 0,
        };
        assert!(coord.absolute().is_none());
        let err = example_transform().to_pixel(&coord).unwrap_err();
        assert!(matches!(err, AreaError::MalformedCoordinate { .. }));
    }

    #[test]
    fn test_invalid_calibration_rejected() {
        let corners = CalibrationCorners {
            min_x: 10.0,
            max_x: 10.0,
            ..CalibrationCorners::default()
        };
        let err = CoordinateTransform::new(corners, 512, 512).unwrap_err();
        assert!(matches!(err, AreaError::InvalidCalibration { axis: 'x', .. }));

        let corners = CalibrationCorners {
            min_z: 3000.0,
            ..CalibrationCorners::default()
        };
        let err = CoordinateTransform::new(corners, 512, 512).unwrap_err();
        assert!(matches!(err, AreaError::InvalidCalibration { axis: 'z', .. }));
    }

    #[test]
    fn test_zero_extent_rejected() {
        let err = CoordinateTransform::new(CalibrationCorners::default(), 0, 512).unwrap_err();
        assert!(matches!(err, AreaError::InvalidExtent { width: 0, height: 512 }));
    }

    #[test]
    fn test_contains() {
        let t = example_transform();
        assert!(t.contains(Vertex::new(0, 0)));
        assert!(t.contains(Vertex::new(511, 511)));
        assert!(!t.contains(Vertex::new(512, 0)));
        assert!(!t.contains(Vertex::new(-1, 10)));
    }
}
