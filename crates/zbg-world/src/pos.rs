//! Continuous and discrete world coordinates.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn length_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn distance(&self, other: &Vec3) -> f32 {
        (*self - *other).length()
    }

    pub fn distance_sq(&self, other: &Vec3) -> f32 {
        (*self - *other).length_sq()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalize(&self) -> Option<Vec3> {
        let len = self.length();
        if len <= f32::EPSILON {
            return None;
        }
        Some(*self * (1.0 / len))
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// BlockPos (i32 x, y, z)
// ---------------------------------------------------------------------------

/// One block slot in the world. Ordered x, then y, then z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert a floating-point position to the block containing it (floor).
    pub fn from_vec3(v: &Vec3) -> Self {
        Self {
            x: v.x.floor() as i32,
            y: v.y.floor() as i32,
            z: v.z.floor() as i32,
        }
    }

    /// Chunk column coordinates `(cx, cz)` containing this block.
    pub fn chunk_coords(&self) -> (i32, i32) {
        (self.x >> 4, self.z >> 4)
    }

    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn up(&self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The block's minimum corner.
    pub fn corner(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Geometric centre of the block.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    /// Centre of the block's bottom face (where an entity would stand).
    pub fn bottom_center(&self) -> Vec3 {
        Vec3::new(self.x as f32 + 0.5, self.y as f32, self.z as f32 + 0.5)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given width/height standing with its bottom centre at `feet`.
    pub fn from_feet(feet: Vec3, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self {
            min: Vec3::new(feet.x - half, feet.y, feet.z - half),
            max: Vec3::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        let d = Vec3::new(amount, amount, amount);
        Self {
            min: self.min - d,
            max: self.max + d,
        }
    }

    /// Whether the two boxes overlap (touching faces do not count).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Iterate all block positions that intersect this box.
    ///
    /// A small epsilon is subtracted from the max bounds so that a box resting
    /// exactly on a block edge does not reach into the neighbouring block.
    pub fn intersecting_blocks(&self) -> impl Iterator<Item = BlockPos> {
        const EPS: f32 = 0.001;
        let bx_min = self.min.x.floor() as i32;
        let bx_max = (self.max.x - EPS).floor() as i32;
        let by_min = self.min.y.floor() as i32;
        let by_max = (self.max.y - EPS).floor() as i32;
        let bz_min = self.min.z.floor() as i32;
        let bz_max = (self.max.z - EPS).floor() as i32;

        (bx_min..=bx_max).flat_map(move |x| {
            (by_min..=by_max).flat_map(move |y| (bz_min..=bz_max).map(move |z| BlockPos::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_vec3_floors_negative() {
        let p = BlockPos::from_vec3(&Vec3::new(-0.5, 4.99, 1.0));
        assert_eq!(p, BlockPos::new(-1, 4, 1));
    }

    #[test]
    fn block_pos_keys_do_not_collide() {
        // Naive "xyz" string concatenation would map these to the same key.
        let a = BlockPos::new(1, 23, 4);
        let b = BlockPos::new(12, 3, 4);
        let c = BlockPos::new(-1, 2, 34);
        let d = BlockPos::new(-12, 3, 4);
        let set: HashSet<BlockPos> = [a, b, c, d, a].into_iter().collect();
        assert_eq!(set.len(), 4);
        assert_ne!(a, b);
    }

    #[test]
    fn center_and_up() {
        let p = BlockPos::new(3, 5, -2);
        assert_eq!(p.center(), Vec3::new(3.5, 5.5, -1.5));
        assert_eq!(p.up(), BlockPos::new(3, 6, -2));
        assert_eq!(p.bottom_center(), Vec3::new(3.5, 5.0, -1.5));
        assert_eq!(p.corner(), Vec3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn chunk_coords_negative() {
        assert_eq!(BlockPos::new(-1, 0, 17).chunk_coords(), (-1, 1));
    }

    #[test]
    fn default_vec3_is_zero() {
        assert_eq!(Vec3::default(), Vec3::ZERO);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(Vec3::ZERO.normalize().is_none());
        let n = Vec3::new(3.0, 0.0, 4.0).normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_inflate_intersects() {
        let zombie = Aabb::from_feet(Vec3::new(0.0, 4.0, 0.0), 0.6, 1.95);
        let near = Aabb::from_feet(Vec3::new(10.0, 4.0, 0.0), 0.6, 1.8);
        let far = Aabb::from_feet(Vec3::new(20.0, 4.0, 0.0), 0.6, 1.8);
        let search = zombie.inflate(16.0);
        assert!(search.intersects(&near));
        assert!(!search.intersects(&far));
        assert!(!zombie.intersects(&near));
    }

    #[test]
    fn intersecting_blocks_centered() {
        // Feet at y=4.0, head at 5.95 → blocks y=4 and y=5
        let aabb = Aabb::from_feet(Vec3::new(0.5, 4.0, 0.5), 0.6, 1.95);
        let blocks: Vec<_> = aabb.intersecting_blocks().collect();
        assert_eq!(blocks, vec![BlockPos::new(0, 4, 0), BlockPos::new(0, 5, 0)]);
    }

    #[test]
    fn intersecting_blocks_straddling_x() {
        let aabb = Aabb::from_feet(Vec3::new(1.0, 4.0, 0.5), 0.6, 1.0);
        let xs: HashSet<i32> = aabb.intersecting_blocks().map(|b| b.x).collect();
        assert!(xs.contains(&0));
        assert!(xs.contains(&1));
    }
}
