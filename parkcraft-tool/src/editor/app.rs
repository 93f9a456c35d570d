use std::path::{Path, PathBuf};

use parkcraft_core::{
    Anchor, ExportOptions, FileTarget, Footprint, Layout, ObjectKind, PlacedObject,
    PlacementError, Rotation, TargetError, export_to,
};
use rand::rngs::StdRng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Edit,
    PickKind,
}

/// Where exports are written and how the handle is kept.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub path: PathBuf,
    pub options: ExportOptions,
    pub reuse_handle: bool,
}

pub struct EditorApp {
    pub mode: AppMode,
    pub should_quit: bool,
    pub layout: Layout,
    pub cursor: (i32, i32),
    pub kind_index: usize,
    pub rotation: Rotation,
    pub selected: Option<Anchor>,
    pub export: ExportSettings,
    /// Acquired on first export, then kept for the session.
    target: Option<FileTarget>,
    rng: StdRng,
    pub last_error: Option<String>,
    pub last_message: Option<String>,

    // Popup state
    pub popup_selected: usize,
}

impl EditorApp {
    pub fn new(layout: Layout, export: ExportSettings, rng: StdRng) -> Self {
        let cursor = (
            layout.grid().cols() as i32 / 2,
            layout.grid().rows() as i32 / 2,
        );
        Self {
            mode: AppMode::Edit,
            should_quit: false,
            layout,
            cursor,
            kind_index: 0,
            rotation: Rotation::Deg0,
            selected: None,
            export,
            target: None,
            rng,
            last_error: None,
            last_message: None,
            popup_selected: 0,
        }
    }

    pub fn current_kind(&self) -> Option<&ObjectKind> {
        self.layout.catalog().get_index(self.kind_index)
    }

    pub fn cursor_anchor(&self) -> Anchor {
        Anchor::new(self.cursor.0, self.cursor.1)
    }

    pub fn selected_object(&self) -> Option<&PlacedObject> {
        self.selected
            .and_then(|anchor| self.layout.registry().get(anchor))
    }

    /// Footprint of the current kind at the cursor, and whether it would fit.
    pub fn preview(&self) -> Option<(Footprint, bool)> {
        let kind = self.current_kind()?;
        let footprint = kind.footprint(self.rotation, self.cursor_anchor());
        let fits = self
            .layout
            .can_place(self.cursor_anchor(), &kind.id, self.rotation)
            .is_ok();
        Some((footprint, fits))
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let max_x = self.layout.grid().cols() as i32 - 1;
        let max_y = self.layout.grid().rows() as i32 - 1;
        self.cursor.0 = (self.cursor.0 + dx).clamp(0, max_x);
        self.cursor.1 = (self.cursor.1 + dy).clamp(0, max_y);
    }

    pub fn rotate(&mut self) {
        self.rotation = self.rotation.clockwise();
    }

    pub fn place(&mut self) {
        let Some(kind) = self.current_kind().map(|k| k.id.clone()) else {
            return;
        };
        self.clear_status();
        let anchor = self.cursor_anchor();
        match self.layout.try_place(anchor, &kind, self.rotation) {
            Ok(placed) => {
                self.last_message = Some(format!(
                    "Placed {} at {} ({}°)",
                    kind, placed.anchor, placed.rotation
                ));
            }
            Err(PlacementError::UnknownKind(err)) => {
                debug!(%err, "ignoring placement of unknown kind");
            }
            Err(PlacementError::Rejected(rejection)) => {
                self.last_error = Some(format!("Cannot place {kind}: {rejection}"));
            }
        }
        if self.selected.is_some_and(|a| !self.layout.registry().contains(a)) {
            self.selected = None;
        }
    }

    pub fn select_at_cursor(&mut self) {
        let (x, y) = self.cursor;
        self.selected = self.layout.select(x, y).map(|p| p.anchor);
        self.clear_status();
        if let Some(placed) = self.selected_object() {
            self.last_message = Some(format!("Selected {} at {}", placed.kind, placed.anchor));
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(anchor) = self.selected.take() else {
            return;
        };
        self.clear_status();
        if let Some(removed) = self.layout.delete(anchor) {
            self.last_message = Some(format!("Deleted {} at {}", removed.kind, removed.anchor));
        }
    }

    /// Saves the layout to the configured file. Failures are reported in the
    /// status line and leave the layout as it was.
    pub fn export(&mut self) {
        self.clear_status();
        match self.try_export() {
            Ok(path) => {
                info!(path = %path.display(), "layout exported");
                self.last_message = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                self.last_error = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn try_export(&mut self) -> Result<PathBuf, TargetError> {
        let target = match &mut self.target {
            Some(target) => target,
            slot => slot.insert(acquire_target(&self.export)?),
        };
        let receipt = export_to(&self.layout, &self.export.options, &mut self.rng, target)?;
        Ok(receipt.path.unwrap_or_else(|| self.export.path.clone()))
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn open_kind_picker(&mut self) {
        self.popup_selected = self.kind_index;
        self.mode = AppMode::PickKind;
    }

    pub fn close_popup(&mut self) {
        self.mode = AppMode::Edit;
    }

    pub fn popup_up(&mut self) {
        if self.popup_selected > 0 {
            self.popup_selected -= 1;
        }
    }

    pub fn popup_down(&mut self) {
        let max = self.layout.catalog().len().saturating_sub(1);
        if self.popup_selected < max {
            self.popup_selected += 1;
        }
    }

    pub fn popup_select(&mut self) {
        self.kind_index = self.popup_selected;
        self.close_popup();
    }

    fn clear_status(&mut self) {
        self.last_error = None;
        self.last_message = None;
    }
}

fn acquire_target(settings: &ExportSettings) -> Result<FileTarget, TargetError> {
    if settings.reuse_handle {
        return FileTarget::reusable(&settings.path);
    }
    let dir = settings
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = settings
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            TargetError::Unavailable(format!("{} is not a file path", settings.path.display()))
        })?;
    FileTarget::one_shot(dir, &file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkcraft_core::Catalog;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn app_with(path: PathBuf, reuse_handle: bool) -> EditorApp {
        EditorApp::new(
            Layout::new(Catalog::builtin(), 11, 18),
            ExportSettings {
                path,
                options: ExportOptions::default(),
                reuse_handle,
            },
            StdRng::seed_from_u64(0),
        )
    }

    fn app() -> EditorApp {
        app_with(PathBuf::from("unused.txt"), true)
    }

    #[test]
    fn cursor_stays_on_grid() {
        let mut app = app();
        assert_eq!(app.cursor, (9, 5));
        app.move_cursor(-100, 100);
        assert_eq!(app.cursor, (0, 10));
        app.move_cursor(100, -100);
        assert_eq!(app.cursor, (17, 0));
    }

    #[test]
    fn place_select_and_delete() {
        let mut app = app();
        app.place();
        assert!(app.last_error.is_none());
        // ferriswheel is first in the catalog
        assert_eq!(app.layout.registry().len(), 1);

        app.move_cursor(1, 3);
        app.select_at_cursor();
        assert_eq!(app.selected, Some(Anchor::new(9, 5)));

        app.delete_selected();
        assert!(app.selected.is_none());
        assert!(app.layout.registry().is_empty());
        assert_eq!(app.layout.grid().occupied_count(), 0);
    }

    #[test]
    fn rejection_is_reported_not_applied() {
        let mut app = app();
        app.place();
        let before = app.layout.clone();

        app.move_cursor(2, 0);
        app.place();
        assert!(app.last_error.as_deref().unwrap().contains("Cannot place"));
        assert_eq!(app.layout, before);
    }

    #[test]
    fn preview_tracks_rotation_and_fit() {
        let mut app = app();
        let (footprint, fits) = app.preview().unwrap();
        assert_eq!((footprint.width(), footprint.height()), (3, 9));
        assert!(fits);

        app.rotate();
        assert_eq!(app.rotation, Rotation::Deg90);
        let (footprint, _) = app.preview().unwrap();
        assert_eq!((footprint.width(), footprint.height()), (9, 3));

        app.move_cursor(0, -5);
        let (_, fits) = app.preview().unwrap();
        assert!(!fits);
    }

    #[test]
    fn kind_picker_changes_current_kind() {
        let mut app = app();
        app.open_kind_picker();
        assert_eq!(app.mode, AppMode::PickKind);
        app.popup_up();
        app.popup_down();
        app.popup_down();
        app.popup_select();
        assert_eq!(app.mode, AppMode::Edit);
        assert_eq!(app.current_kind().unwrap().id, "coaster");

        app.open_kind_picker();
        for _ in 0..20 {
            app.popup_down();
        }
        assert_eq!(app.popup_selected, 6);
        app.close_popup();
        assert_eq!(app.current_kind().unwrap().id, "coaster");
    }

    #[test]
    fn export_reuses_one_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blender_command.txt");
        let mut app = app_with(path.clone(), true);
        app.place();

        app.export();
        assert!(app.last_error.is_none());
        assert!(app.has_target());
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.starts_with("ferriswheel,9,-5,0,0\n"));

        app.selected = Some(Anchor::new(9, 5));
        app.delete_selected();
        app.export();
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(second.starts_with("# random_empty_cells\n"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn one_shot_export_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(dir.path().join("blender_command.txt"), false);

        app.export();
        app.export();
        assert!(app.last_error.is_none());
        assert!(dir.path().join("blender_command.txt").exists());
        assert!(dir.path().join("blender_command (1).txt").exists());
    }

    #[test]
    fn unavailable_target_keeps_layout() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(dir.path().join("missing").join("out.txt"), true);
        app.place();
        let before = app.layout.clone();

        app.export();
        assert!(app.last_error.as_deref().unwrap().starts_with("Export failed"));
        assert!(!app.has_target());
        assert_eq!(app.layout, before);
    }
}
