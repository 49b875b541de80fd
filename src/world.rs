//! Static world layout: walls block, doors link out, signs show text.
//!
//! Regions are supplied by the host page (or a test) and never change during
//! a session. Order matters: when several regions of one kind overlap the
//! actor, the first one in caller order wins.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Wall,
    Door,
    Sign,
}

/// A rectangle with a role and an optional payload (door link or sign text).
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub rect: Rect,
    pub kind: RegionKind,
    pub link: Option<String>,
    pub content: Option<String>,
}

impl Region {
    pub fn wall(rect: Rect) -> Self {
        Self { rect, kind: RegionKind::Wall, link: None, content: None }
    }

    pub fn door(rect: Rect, link: Option<&str>) -> Self {
        Self { rect, kind: RegionKind::Door, link: link.map(str::to_owned), content: None }
    }

    pub fn sign(rect: Rect, content: Option<&str>) -> Self {
        Self { rect, kind: RegionKind::Sign, link: None, content: content.map(str::to_owned) }
    }

    /// Door link, with an empty attribute treated the same as a missing one.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty())
    }

    /// Sign text, with an empty attribute treated the same as a missing one.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Regions split by role, each list kept in caller order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub walls: Vec<Region>,
    pub doors: Vec<Region>,
    pub signs: Vec<Region>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions<I: IntoIterator<Item = Region>>(regions: I) -> Self {
        let mut world = Self::new();
        for r in regions {
            world.push(r);
        }
        world
    }

    pub fn push(&mut self, region: Region) {
        match region.kind {
            RegionKind::Wall => self.walls.push(region),
            RegionKind::Door => self.doors.push(region),
            RegionKind::Sign => self.signs.push(region),
        }
    }

    pub fn regions(&self, kind: RegionKind) -> &[Region] {
        match kind {
            RegionKind::Wall => &self.walls,
            RegionKind::Door => &self.doors,
            RegionKind::Sign => &self.signs,
        }
    }

    pub fn len(&self) -> usize {
        self.walls.len() + self.doors.len() + self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First region (in slice order) overlapping `rect`, with its index.
pub fn first_overlap<'a>(rect: &Rect, regions: &'a [Region]) -> Option<(usize, &'a Region)> {
    regions.iter().enumerate().find(|(_, r)| rect.overlaps(&r.rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_regions_splits_by_kind_in_order() {
        let w = World::from_regions(vec![
            Region::door(Rect::new(0.0, 0.0, 1.0, 1.0), Some("a")),
            Region::wall(Rect::new(5.0, 5.0, 1.0, 1.0)),
            Region::door(Rect::new(2.0, 2.0, 1.0, 1.0), Some("b")),
            Region::sign(Rect::new(9.0, 9.0, 1.0, 1.0), None),
        ]);
        assert_eq!(w.walls.len(), 1);
        assert_eq!(w.signs.len(), 1);
        assert_eq!(w.doors[0].link(), Some("a"));
        assert_eq!(w.doors[1].link(), Some("b"));
        assert_eq!(w.regions(RegionKind::Door).len(), 2);
        assert_eq!(w.len(), 4);
        assert!(World::new().is_empty());
    }

    #[test]
    fn test_first_overlap_takes_first_match() {
        let doors = vec![
            Region::door(Rect::new(0.0, 0.0, 50.0, 50.0), Some("first")),
            Region::door(Rect::new(10.0, 10.0, 50.0, 50.0), Some("second")),
        ];
        let probe = Rect::new(20.0, 20.0, 5.0, 5.0);
        let (idx, hit) = first_overlap(&probe, &doors).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(hit.link(), Some("first"));
    }

    #[test]
    fn test_first_overlap_none() {
        let walls = vec![Region::wall(Rect::new(100.0, 100.0, 10.0, 10.0))];
        assert!(first_overlap(&Rect::new(0.0, 0.0, 5.0, 5.0), &walls).is_none());
    }

    #[test]
    fn test_empty_payloads_read_as_missing() {
        let d = Region::door(Rect::default(), Some(""));
        let s = Region::sign(Rect::default(), Some(""));
        assert_eq!(d.link(), None);
        assert_eq!(s.content(), None);
    }
}
