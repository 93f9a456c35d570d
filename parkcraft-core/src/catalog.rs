use indexmap::IndexMap;
use thiserror::Error;

use crate::footprint::{Anchor, Footprint, Rotation};

/// Stable identifier of an object kind.
pub type KindId = String;

/// (id, display name, width, height) of the attractions shipped with the editor.
const BUILTIN_KINDS: &[(&str, &str, u32, u32)] = &[
    ("ferriswheel", "観覧車", 3, 9),
    ("merrygoround", "メリーゴーランド", 2, 2),
    ("coaster", "コースター", 3, 13),
    ("freefall", "フリーフォール", 1, 1),
    ("coffeecup", "コーヒーカップ", 3, 3),
    ("ghosthouse", "お化け屋敷", 3, 5),
    ("viking", "バイキング", 3, 7),
];

/// A placeable kind: base size in cells, elevation and export identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKind {
    pub id: KindId,
    pub width: u32,
    pub height: u32,
    pub elevation: i32,
    /// Name written to the export file.
    pub file_id: String,
    pub display_name: String,
}

impl ObjectKind {
    /// Creates a kind at elevation 0 whose file-id and display name equal its id.
    pub fn new(id: impl Into<KindId>, width: u32, height: u32) -> Self {
        let id = id.into();
        ObjectKind {
            file_id: id.clone(),
            display_name: id.clone(),
            id,
            width,
            height,
            elevation: 0,
        }
    }

    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = file_id.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Effective `(width, height)` at the given rotation.
    pub fn oriented_size(&self, rotation: Rotation) -> (u32, u32) {
        rotation.oriented(self.width, self.height)
    }

    /// Footprint of this kind centered on `anchor`.
    pub fn footprint(&self, rotation: Rotation, anchor: Anchor) -> Footprint {
        let (width, height) = self.oriented_size(rotation);
        Footprint::centered(anchor, width, height)
    }
}

/// A kind that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind: {0}")]
pub struct UnknownKind(pub KindId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no kinds")]
    Empty,
    #[error("duplicate kind: {0}")]
    DuplicateKind(KindId),
    #[error("kind {id} has zero size ({width}x{height})")]
    ZeroSize { id: KindId, width: u32, height: u32 },
}

/// The set of kinds available to a layout, in presentation order.
///
/// Loaded once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kinds: IndexMap<KindId, ObjectKind>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty input, duplicate ids and zero sizes.
    pub fn new(kinds: impl IntoIterator<Item = ObjectKind>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::new();
        for kind in kinds {
            if kind.width == 0 || kind.height == 0 {
                return Err(CatalogError::ZeroSize {
                    id: kind.id,
                    width: kind.width,
                    height: kind.height,
                });
            }
            if map.contains_key(&kind.id) {
                return Err(CatalogError::DuplicateKind(kind.id));
            }
            map.insert(kind.id.clone(), kind);
        }
        if map.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Catalog { kinds: map })
    }

    /// The seven attractions of the park editor.
    pub fn builtin() -> Self {
        let kinds = BUILTIN_KINDS
            .iter()
            .map(|&(id, name, width, height)| {
                let kind = ObjectKind::new(id, width, height).with_display_name(name);
                (kind.id.clone(), kind)
            })
            .collect();
        Catalog { kinds }
    }

    pub fn get(&self, id: &str) -> Option<&ObjectKind> {
        self.kinds.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kinds.contains_key(id)
    }

    /// Kind at a presentation index.
    pub fn get_index(&self, index: usize) -> Option<&ObjectKind> {
        self.kinds.get_index(index).map(|(_, kind)| kind)
    }

    /// Presentation index of a kind.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.kinds.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Export file-id of a kind.
    pub fn file_id(&self, id: &str) -> Option<&str> {
        self.get(id).map(|kind| kind.file_id.as_str())
    }

    /// Footprint of kind `id` at `rotation`, centered on `anchor`.
    pub fn footprint(
        &self,
        id: &str,
        rotation: Rotation,
        anchor: Anchor,
    ) -> Result<Footprint, UnknownKind> {
        self.get(id)
            .map(|kind| kind.footprint(rotation, anchor))
            .ok_or_else(|| UnknownKind(id.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_seven_attractions() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.get_index(0).unwrap().id, "ferriswheel");

        let wheel = catalog.get("ferriswheel").unwrap();
        assert_eq!((wheel.width, wheel.height), (3, 9));
        assert_eq!(wheel.elevation, 0);
        assert_eq!(wheel.file_id, "ferriswheel");
        assert_eq!(wheel.display_name, "観覧車");

        let coaster = catalog.get("coaster").unwrap();
        assert_eq!((coaster.width, coaster.height), (3, 13));
    }

    #[test]
    fn builtin_kinds_are_valid() {
        let kinds: Vec<_> = Catalog::builtin().iter().cloned().collect();
        let rebuilt = Catalog::new(kinds).unwrap();
        assert_eq!(rebuilt, Catalog::builtin());
    }

    #[test]
    fn rejects_zero_size() {
        let err = Catalog::new([ObjectKind::new("flat", 0, 3)]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ZeroSize {
                id: "flat".to_string(),
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let err = Catalog::new([ObjectKind::new("a", 1, 1), ObjectKind::new("a", 2, 2)])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKind("a".to_string()));

        assert_eq!(
            Catalog::new(Vec::<ObjectKind>::new()).unwrap_err(),
            CatalogError::Empty
        );
    }

    #[test]
    fn footprint_of_unknown_kind_fails() {
        let catalog = Catalog::builtin();
        let err = catalog
            .footprint("dragon", Rotation::Deg0, Anchor::new(1, 1))
            .unwrap_err();
        assert_eq!(err, UnknownKind("dragon".to_string()));
    }

    #[test]
    fn footprint_follows_rotation() {
        let catalog = Catalog::builtin();
        let fp = catalog
            .footprint("ghosthouse", Rotation::Deg270, Anchor::new(6, 5))
            .unwrap();
        // 3x5 turned to 5x3
        assert_eq!((fp.min_x, fp.max_x, fp.min_y, fp.max_y), (4, 8, 4, 6));
    }

    #[test]
    fn builder_overrides() {
        let kind = ObjectKind::new("tower", 1, 1)
            .with_elevation(4)
            .with_file_id("tower_v2")
            .with_display_name("Tower");
        assert_eq!(kind.elevation, 4);
        assert_eq!(kind.file_id, "tower_v2");
        assert_eq!(kind.display_name, "Tower");

        let catalog = Catalog::new([kind]).unwrap();
        assert_eq!(catalog.file_id("tower"), Some("tower_v2"));
        assert_eq!(catalog.file_id("missing"), None);
        assert_eq!(catalog.position("tower"), Some(0));
    }
}
