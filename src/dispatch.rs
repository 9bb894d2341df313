//! Dispatch geometry and per-invocation identity.
//!
//! A pass is launched as a grid of fixed-size work groups that generally
//! overhangs the result rectangle. Every work item carries its dispatch id
//! and decides on its own whether it has anything to do.

use crate::error::{PassError, PassResult};
use crate::params::ResultRect;
use crate::{MAX_THREADS_PER_GROUP, NUMTHREADS_X, NUMTHREADS_Y};

/// Threads per work group along each axis. `z` is always 1.
///
/// Only [`GroupShape::new`] and [`Default`] build one, so every shape in
/// circulation has non-empty axes and fits the thread budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupShape {
    x: u32,
    y: u32,
    z: u32,
}

impl GroupShape {
    /// Rejects empty shapes, `z != 1`, and shapes above the per-group
    /// thread budget.
    pub fn new(x: u32, y: u32, z: u32) -> PassResult<Self> {
        if x == 0 || y == 0 || z == 0 {
            return Err(PassError::InvalidGroupShape(format!(
                "{x}x{y}x{z} has an empty axis"
            )));
        }
        if z != 1 {
            return Err(PassError::InvalidGroupShape(format!(
                "{x}x{y}x{z}: z must be 1"
            )));
        }
        let threads = x as u64 * y as u64 * z as u64;
        if threads > MAX_THREADS_PER_GROUP as u64 {
            return Err(PassError::InvalidGroupShape(format!(
                "{x}x{y}x{z} = {threads} threads exceeds {MAX_THREADS_PER_GROUP}"
            )));
        }
        Ok(Self { x, y, z })
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    #[inline]
    pub fn threads(&self) -> u32 {
        self.x * self.y * self.z
    }
}

impl Default for GroupShape {
    fn default() -> Self {
        Self {
            x: NUMTHREADS_X,
            y: NUMTHREADS_Y,
            z: 1,
        }
    }
}

/// Number of groups per axis plus the group shape. The z extent is always a
/// single group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchGeometry {
    groups: [u32; 3],
    shape: GroupShape,
}

impl DispatchGeometry {
    /// `ceil(width / shape.x)` x `ceil(height / shape.y)` x 1 groups.
    ///
    /// ```
    /// # use gpu_dft_pass::dispatch::{DispatchGeometry, GroupShape};
    /// let geometry = DispatchGeometry::for_size(50, 24, GroupShape::default());
    /// assert_eq!(geometry.groups(), [3, 1, 1]);
    /// assert_eq!(geometry.grid_size(), [72, 24]);
    /// ```
    pub fn for_size(width: u32, height: u32, shape: GroupShape) -> Self {
        let groups_x = (width + shape.x - 1) / shape.x;
        let groups_y = (height + shape.y - 1) / shape.y;
        Self {
            groups: [groups_x, groups_y, 1],
            shape,
        }
    }

    pub fn for_rect(rect: &ResultRect, shape: GroupShape) -> PassResult<Self> {
        let (width, height) = rect.validate()?;
        Ok(Self::for_size(width, height, shape))
    }

    #[inline]
    pub fn groups(&self) -> [u32; 3] {
        self.groups
    }

    #[inline]
    pub fn shape(&self) -> GroupShape {
        self.shape
    }

    /// True when the grid reaches every cell of a `width` x `height` region.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        let [gx, gy] = self.grid_size();
        gx >= width && gy >= height
    }

    /// Total threads along x and y, including the overhang.
    pub fn grid_size(&self) -> [u32; 2] {
        [
            self.groups[0] * self.shape.x,
            self.groups[1] * self.shape.y,
        ]
    }

    /// Total number of work items launched.
    pub fn invocations(&self) -> usize {
        let [gx, gy] = self.grid_size();
        gx as usize * gy as usize * (self.groups[2] * self.shape.z) as usize
    }

    /// Group ids in row-major order.
    pub fn group_ids(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let [gx, gy, gz] = self.groups;
        (0..gz).flat_map(move |z| (0..gy).flat_map(move |y| (0..gx).map(move |x| [x, y, z])))
    }

    /// Work items of one group, in thread order.
    pub fn items_in_group(&self, group_id: [u32; 3]) -> impl Iterator<Item = WorkItem> + '_ {
        let shape = self.shape;
        (0..shape.y).flat_map(move |ty| {
            (0..shape.x).map(move |tx| WorkItem::new(group_id, [tx, ty, 0], shape))
        })
    }
}

/// Identity of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub dispatch_id: [u32; 3],
}

impl WorkItem {
    /// `dispatch_id = group_id * shape + thread_id` per axis.
    pub fn new(group_id: [u32; 3], thread_id: [u32; 3], shape: GroupShape) -> Self {
        Self {
            dispatch_id: [
                group_id[0] * shape.x + thread_id[0],
                group_id[1] * shape.y + thread_id[1],
                group_id[2] * shape.z + thread_id[2],
            ],
        }
    }

    /// Item at logical position `(x, y)`.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            dispatch_id: [x, y, 0],
        }
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.dispatch_id[0]
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.dispatch_id[1]
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.dispatch_id[2]
    }

    /// Bounds guard: false for items outside the `width` x `height` x 1
    /// region, which must return without writing.
    #[inline]
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x() < width && self.y() < height && self.z() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape_fits_budget() {
        let shape = GroupShape::default();
        assert_eq!(shape.threads(), 576);
        assert_eq!(GroupShape::new(24, 24, 1), Ok(shape));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(GroupShape::new(32, 32, 1).is_ok());
        assert!(matches!(
            GroupShape::new(64, 32, 1),
            Err(PassError::InvalidGroupShape(_))
        ));
        assert!(matches!(
            GroupShape::new(8, 8, 2),
            Err(PassError::InvalidGroupShape(_))
        ));
        assert!(matches!(
            GroupShape::new(0, 8, 1),
            Err(PassError::InvalidGroupShape(_))
        ));
    }

    #[test]
    fn geometry_rounds_up() {
        let shape = GroupShape::new(8, 4, 1).unwrap();
        let geometry = DispatchGeometry::for_size(17, 4, shape);
        assert_eq!(geometry.groups(), [3, 1, 1]);
        assert!(geometry.covers(17, 4));
        assert!(!geometry.covers(25, 4));
        assert_eq!(geometry.invocations(), 24 * 4);
        assert_eq!(geometry.group_ids().count(), 3);
        assert_eq!(geometry.items_in_group([2, 0, 0]).count(), 32);
    }

    #[test]
    fn dispatch_id_and_guard() {
        let shape = GroupShape::new(8, 4, 1).unwrap();
        let item = WorkItem::new([2, 1, 0], [3, 2, 0], shape);
        assert_eq!(item.dispatch_id, [19, 6, 0]);
        assert!(item.in_bounds(20, 7));
        assert!(!item.in_bounds(19, 7));
        assert!(!item.in_bounds(20, 6));

        let deep = WorkItem::new([0, 0, 1], [0, 0, 0], shape);
        assert_eq!(deep.dispatch_id, [0, 0, 1]);
        assert!(!deep.in_bounds(20, 7));
    }
}
