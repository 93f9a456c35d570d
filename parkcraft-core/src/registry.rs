use crate::catalog::{Catalog, KindId, UnknownKind};
use crate::footprint::{Anchor, Footprint, Rotation};

/// An object committed to the grid, identified by its anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedObject {
    pub kind: KindId,
    pub anchor: Anchor,
    /// Elevation copied from the catalog when the object was placed.
    pub elevation: i32,
    pub rotation: Rotation,
}

impl PlacedObject {
    /// Footprint computed from the stored kind and rotation.
    pub fn footprint(&self, catalog: &Catalog) -> Result<Footprint, UnknownKind> {
        catalog.footprint(&self.kind, self.rotation, self.anchor)
    }
}

/// Placed objects keyed by anchor, in placement order.
///
/// At most one entry exists per anchor. Replacing an entry moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CenterRegistry {
    entries: Vec<PlacedObject>,
}

impl CenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `placed`, returning the entry it replaced at the same anchor.
    pub fn upsert(&mut self, placed: PlacedObject) -> Option<PlacedObject> {
        let previous = self.remove(placed.anchor);
        self.entries.push(placed);
        previous
    }

    pub fn get(&self, anchor: Anchor) -> Option<&PlacedObject> {
        self.entries.iter().find(|p| p.anchor == anchor)
    }

    pub fn contains(&self, anchor: Anchor) -> bool {
        self.get(anchor).is_some()
    }

    /// First entry, in registry order, whose footprint contains `(x, y)`.
    ///
    /// Entries whose kind is missing from `catalog` only match at their anchor.
    pub fn find_by_hit(&self, catalog: &Catalog, x: i32, y: i32) -> Option<&PlacedObject> {
        self.entries.iter().find(|p| match p.footprint(catalog) {
            Ok(footprint) => footprint.contains(x, y),
            Err(_) => p.anchor == Anchor::new(x, y),
        })
    }

    /// Removes the entry at `anchor`. The caller vacates its cells first.
    pub fn remove(&mut self, anchor: Anchor) -> Option<PlacedObject> {
        let pos = self.entries.iter().position(|p| p.anchor == anchor)?;
        Some(self.entries.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedObject> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CenterRegistry {
    type Item = &'a PlacedObject;
    type IntoIter = std::slice::Iter<'a, PlacedObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
