//! A map together with the obstacle buffer that indexes it.

use std::rc::Rc;

use crate::buffer::{BufferCfg, ObstacleBuffer};
use crate::geom::Polygon;
use crate::map::{EntityId, GeometricMap};

/// Unit handed to the builders. The buffer cache is valid for exactly the
/// current map: replacing or clearing the map goes through `&mut self` and
/// empties the cache.
#[derive(Debug, Default)]
pub struct Workspace {
    map: GeometricMap,
    buffer: ObstacleBuffer,
}

impl Workspace {
    pub fn new(map: GeometricMap) -> Self {
        Self::with_buffer_cfg(map, BufferCfg::default())
    }

    pub fn with_buffer_cfg(map: GeometricMap, cfg: BufferCfg) -> Self {
        Self {
            map,
            buffer: ObstacleBuffer::new(cfg),
        }
    }

    #[inline]
    pub fn map(&self) -> &GeometricMap {
        &self.map
    }

    #[inline]
    pub fn buffer(&self) -> &ObstacleBuffer {
        &self.buffer
    }

    /// Extended polygon of `entity` at `radius`; `None` for an unknown handle.
    pub fn extended(&self, entity: EntityId, radius: f64) -> Option<Rc<Polygon>> {
        self.buffer.get_extended(&self.map, entity, radius)
    }

    /// Extended polygons of every entity, walls first.
    pub fn extended_all(&self, radius: f64) -> Vec<Rc<Polygon>> {
        self.map
            .entities()
            .filter_map(|id| self.extended(id, radius))
            .collect()
    }

    /// Swaps in a new map and returns the old one; the cache is dropped.
    pub fn replace_map(&mut self, map: GeometricMap) -> GeometricMap {
        self.buffer.clear();
        std::mem::replace(&mut self.map, map)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Segment};

    fn sample_map() -> GeometricMap {
        let mut map = GeometricMap::new();
        map.add_wall(Segment::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0)));
        map.add_obstacle(Polygon::from_vertices(vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(2.0, 2.0),
        ]));
        map
    }

    #[test]
    fn extended_is_shared_while_map_unchanged() {
        let ws = Workspace::new(sample_map());
        let a = ws.extended(EntityId::Obstacle(0), 0.1).unwrap();
        let b = ws.extended(EntityId::Obstacle(0), 0.1).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        let all = ws.extended_all(0.1);
        assert_eq!(all.len(), 2);
        assert!(Rc::ptr_eq(&all[1], &a));
        assert_eq!(ws.buffer().len(), 2);
    }

    #[test]
    fn replacing_map_clears_cache() {
        let mut ws = Workspace::new(sample_map());
        ws.extended_all(0.1);
        assert!(!ws.buffer().is_empty());
        let old = ws.replace_map(GeometricMap::new());
        assert_eq!(old.walls().len(), 1);
        assert!(ws.buffer().is_empty());
        assert!(ws.extended(EntityId::Wall(0), 0.1).is_none());

        let mut ws = Workspace::new(sample_map());
        ws.extended_all(0.2);
        ws.clear();
        assert!(ws.buffer().is_empty());
        assert!(ws.map().is_empty());
    }
}
