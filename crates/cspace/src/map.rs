//! Geometric map: walls, doors, polygonal obstacles, bounding box and mission hints.
//!
//! Entities are stored in insertion order and addressed by `EntityId`, which is
//! also the obstacle-buffer cache key. Handles stay valid until the map is cleared.

use crate::geom::{Point, Polygon, Rect, Segment};

/// Stable handle for a buffered entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityId {
    Wall(usize),
    Obstacle(usize),
}

#[derive(Clone, Debug, Default)]
pub struct GeometricMap {
    walls: Vec<Segment>,
    doors: Vec<Segment>,
    obstacles: Vec<Polygon>,
    bounds: Option<Rect>,
    mission_begin: Option<Point>,
    mission_end: Option<Point>,
}

impl GeometricMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wall and grows the bounding box over both endpoints.
    pub fn add_wall(&mut self, wall: Segment) -> EntityId {
        self.extend_bounds(wall.src);
        self.extend_bounds(wall.tgt);
        self.walls.push(wall);
        EntityId::Wall(self.walls.len() - 1)
    }

    /// Doors are kept for completeness; no builder treats them as obstacles.
    pub fn add_door(&mut self, door: Segment) {
        self.extend_bounds(door.src);
        self.extend_bounds(door.tgt);
        self.doors.push(door);
    }

    pub fn add_obstacle(&mut self, obstacle: Polygon) -> EntityId {
        for v in obstacle.vertices() {
            self.extend_bounds(*v);
        }
        self.obstacles.push(obstacle);
        EntityId::Obstacle(self.obstacles.len() - 1)
    }

    /// Mission hints also grow the bounding box, like any parsed point.
    pub fn set_mission_begin(&mut self, p: Point) {
        self.extend_bounds(p);
        self.mission_begin = Some(p);
    }

    pub fn set_mission_end(&mut self, p: Point) {
        self.extend_bounds(p);
        self.mission_end = Some(p);
    }

    pub fn extend_bounds(&mut self, p: Point) {
        match &mut self.bounds {
            Some(r) => r.expand_to_include(p),
            None => self.bounds = Some(Rect::new(p, p)),
        }
    }

    #[inline]
    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    #[inline]
    pub fn doors(&self) -> &[Segment] {
        &self.doors
    }

    #[inline]
    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    #[inline]
    pub fn mission_begin(&self) -> Option<Point> {
        self.mission_begin
    }

    #[inline]
    pub fn mission_end(&self) -> Option<Point> {
        self.mission_end
    }

    /// All buffered entities: walls first, then obstacles.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.walls.len())
            .map(EntityId::Wall)
            .chain((0..self.obstacles.len()).map(EntityId::Obstacle))
    }

    /// Raw geometry of an entity as a polygon (walls become 2-vertex polygons).
    pub fn entity_polygon(&self, id: EntityId) -> Option<Polygon> {
        match id {
            EntityId::Wall(i) => self.walls.get(i).map(|w| Polygon::from(*w)),
            EntityId::Obstacle(i) => self.obstacles.get(i).cloned(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn width(&self) -> f64 {
        self.bounds.map_or(0.0, |r| r.width())
    }

    pub fn height(&self) -> f64 {
        self.bounds.map_or(0.0, |r| r.height())
    }

    /// Segment properly crosses some raw wall.
    pub fn segment_crosses_wall(&self, s: &Segment) -> bool {
        self.walls.iter().any(|w| w.intersects_properly_with(s))
    }

    /// No walls and no obstacles (doors and hints alone do not count).
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn bounds_cover_every_point() {
        let mut map = GeometricMap::new();
        assert!(map.bounds().is_none());
        assert_eq!(map.width(), 0.0);
        map.add_wall(Segment::new(p(1.0, 1.0), p(4.0, 1.0)));
        map.add_obstacle(Polygon::from_vertices(vec![p(2.0, 2.0), p(3.0, 2.0), p(2.5, 5.0)]));
        map.set_mission_begin(p(-1.0, 0.0));
        map.add_door(Segment::new(p(6.0, 0.0), p(6.0, 1.0)));
        let r = map.bounds().unwrap();
        assert_eq!(r.min, p(-1.0, 0.0));
        assert_eq!(r.max, p(6.0, 5.0));
        assert_eq!(map.width(), 7.0);
        assert_eq!(map.height(), 5.0);
    }

    #[test]
    fn entities_list_walls_then_obstacles() {
        let mut map = GeometricMap::new();
        let o = map.add_obstacle(Polygon::from_vertices(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]));
        let w0 = map.add_wall(Segment::new(p(0.0, 2.0), p(1.0, 2.0)));
        let w1 = map.add_wall(Segment::new(p(0.0, 3.0), p(1.0, 3.0)));
        assert_eq!(o, EntityId::Obstacle(0));
        let ids: Vec<_> = map.entities().collect();
        assert_eq!(ids, vec![w0, w1, o]);
        assert_eq!(map.entity_polygon(w1).unwrap().len(), 2);
        assert!(map.entity_polygon(EntityId::Obstacle(3)).is_none());
    }

    #[test]
    fn wall_crossing_and_clear() {
        let mut map = GeometricMap::new();
        map.add_wall(Segment::new(p(0.0, 0.0), p(0.0, 2.0)));
        assert!(map.segment_crosses_wall(&Segment::new(p(-1.0, 1.0), p(1.0, 1.0))));
        assert!(!map.segment_crosses_wall(&Segment::new(p(1.0, 1.0), p(2.0, 1.0))));
        assert!(!map.is_empty());
        map.clear();
        assert!(map.is_empty());
        assert!(map.bounds().is_none());
    }
}
