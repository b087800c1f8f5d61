use ratatui::prelude::Rect;
use tracing::trace;

/// Receives completed drops. Mouse drags and keyboard grabs both end in a
/// single `on_drop` call naming the dragged item and the target container.
pub trait DropHandler {
    /// Returns whether the drop changed anything.
    fn on_drop(&mut self, item_id: &str, target_container_id: &str) -> bool;
}

/// Screen regions recorded while drawing, used to hit-test pointer positions.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    containers: Vec<(Rect, String)>,
    items: Vec<(Rect, String)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.containers.clear();
        self.items.clear();
    }

    pub fn add_container(&mut self, area: Rect, id: impl Into<String>) {
        self.containers.push((area, id.into()));
    }

    pub fn add_item(&mut self, area: Rect, id: impl Into<String>) {
        self.items.push((area, id.into()));
    }

    pub fn container_at(&self, column: u16, row: u16) -> Option<&str> {
        self.containers
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, id)| id.as_str())
    }

    #[cfg(test)]
    pub fn item_area(&self, id: &str) -> Option<Rect> {
        self.items.iter().find(|(_, i)| i == id).map(|(area, _)| *area)
    }

    #[cfg(test)]
    pub fn container_area(&self, id: &str) -> Option<Rect> {
        self.containers
            .iter()
            .find(|(_, i)| i == id)
            .map(|(area, _)| *area)
    }

    pub fn item_at(&self, column: u16, row: u16) -> Option<&str> {
        self.items
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, id)| id.as_str())
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// A drag in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    pub item_id: String,
    pub origin: Option<String>,
    pub over: Option<String>,
}

/// Tracks one pointer drag from press to release.
#[derive(Debug, Default)]
pub struct PointerDrag {
    active: Option<Drag>,
}

impl PointerDrag {
    pub fn active(&self) -> Option<&Drag> {
        self.active.as_ref()
    }

    /// Starts a drag if the press landed on an item. Returns the item id.
    /// Any earlier drag is dropped first, whether or not a new one starts.
    pub fn press(&mut self, hits: &HitMap, column: u16, row: u16) -> Option<String> {
        self.active = None;
        let item_id = hits.item_at(column, row)?.to_string();
        trace!(item_id = %item_id, "drag started");
        let origin = hits.container_at(column, row).map(str::to_string);
        self.active = Some(Drag {
            item_id: item_id.clone(),
            over: origin.clone(),
            origin,
        });
        Some(item_id)
    }

    pub fn motion(&mut self, hits: &HitMap, column: u16, row: u16) {
        if let Some(drag) = self.active.as_mut() {
            drag.over = hits.container_at(column, row).map(str::to_string);
        }
    }

    /// Ends the drag. Releasing over a different container calls `on_drop`;
    /// releasing over the starting container or outside any container
    /// cancels. Returns the destination when a drop happened.
    pub fn release<H: DropHandler>(
        &mut self,
        hits: &HitMap,
        column: u16,
        row: u16,
        handler: &mut H,
    ) -> Option<String> {
        let drag = self.active.take()?;
        let target = hits.container_at(column, row)?.to_string();
        if drag.origin.as_deref() == Some(target.as_str()) {
            return None;
        }
        if handler.on_drop(&drag.item_id, &target) {
            Some(target)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Keyboard stand-in for a drag: a grabbed note and the section it would
/// land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grab {
    pub item_id: String,
    pub origin: usize,
    pub target: usize,
}

impl Grab {
    pub fn new(item_id: impl Into<String>, origin: usize) -> Self {
        Grab {
            item_id: item_id.into(),
            origin,
            target: origin,
        }
    }

    pub fn shift(&mut self, delta: isize, container_count: usize) {
        if container_count == 0 {
            return;
        }
        let max = container_count as isize - 1;
        self.target = (self.target as isize + delta).clamp(0, max) as usize;
    }

    /// Dropping back on the starting container is a cancel.
    pub fn drop_on<H: DropHandler>(&self, container_ids: &[String], handler: &mut H) -> bool {
        if self.target == self.origin {
            return false;
        }
        match container_ids.get(self.target) {
            Some(target) => handler.on_drop(&self.item_id, target),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        drops: Vec<(String, String)>,
    }

    impl DropHandler for Recorder {
        fn on_drop(&mut self, item_id: &str, target_container_id: &str) -> bool {
            self.drops
                .push((item_id.to_string(), target_container_id.to_string()));
            true
        }
    }

    fn two_columns() -> HitMap {
        let mut hits = HitMap::default();
        hits.add_container(Rect::new(0, 0, 20, 10), "section-0");
        hits.add_container(Rect::new(20, 0, 20, 10), "section-1");
        hits.add_item(Rect::new(1, 1, 18, 3), "note-1");
        hits
    }

    #[test]
    fn test_hit_testing_respects_edges() {
        let hits = two_columns();
        assert_eq!(hits.container_at(19, 9), Some("section-0"));
        assert_eq!(hits.container_at(20, 0), Some("section-1"));
        assert_eq!(hits.container_at(40, 0), None);
        assert_eq!(hits.item_at(1, 1), Some("note-1"));
        assert_eq!(hits.item_at(1, 4), None);
    }

    #[test]
    fn test_pointer_drag_drops_on_release() {
        let hits = two_columns();
        let mut drag = PointerDrag::default();
        let mut recorder = Recorder::default();
        assert_eq!(drag.press(&hits, 2, 2), Some("note-1".to_string()));
        drag.motion(&hits, 25, 5);
        assert_eq!(drag.active().unwrap().over.as_deref(), Some("section-1"));
        let dest = drag.release(&hits, 25, 5, &mut recorder);
        assert_eq!(dest.as_deref(), Some("section-1"));
        assert_eq!(
            recorder.drops,
            vec![("note-1".to_string(), "section-1".to_string())]
        );
        assert!(drag.active().is_none());
    }

    #[test]
    fn test_release_outside_cancels() {
        let hits = two_columns();
        let mut drag = PointerDrag::default();
        let mut recorder = Recorder::default();
        drag.press(&hits, 2, 2);
        assert!(drag.release(&hits, 50, 50, &mut recorder).is_none());
        assert!(recorder.drops.is_empty());
        assert!(drag.active().is_none());
    }

    #[test]
    fn test_release_in_origin_container_is_a_click() {
        let hits = two_columns();
        let mut drag = PointerDrag::default();
        let mut recorder = Recorder::default();
        drag.press(&hits, 2, 2);
        assert!(drag.release(&hits, 5, 8, &mut recorder).is_none());
        assert!(recorder.drops.is_empty());
    }

    #[test]
    fn test_press_on_empty_space_does_not_start() {
        let hits = two_columns();
        let mut drag = PointerDrag::default();
        assert!(drag.press(&hits, 30, 8).is_none());
        assert!(drag.active().is_none());
    }

    #[test]
    fn test_press_on_empty_space_clears_previous_drag() {
        let hits = two_columns();
        let mut drag = PointerDrag::default();
        let mut recorder = Recorder::default();
        drag.press(&hits, 2, 2);
        assert!(drag.press(&hits, 30, 8).is_none());
        assert!(drag.active().is_none());
        assert!(drag.release(&hits, 30, 8, &mut recorder).is_none());
        assert!(recorder.drops.is_empty());
    }

    #[test]
    fn test_grab_shift_clamps() {
        let mut grab = Grab::new("note-1", 1);
        grab.shift(5, 3);
        assert_eq!(grab.target, 2);
        grab.shift(-10, 3);
        assert_eq!(grab.target, 0);
    }

    #[test]
    fn test_grab_drop_calls_handler() {
        let ids = vec!["section-0".to_string(), "section-1".to_string()];
        let mut grab = Grab::new("note-9", 0);
        grab.shift(1, ids.len());
        let mut recorder = Recorder::default();
        assert!(grab.drop_on(&ids, &mut recorder));
        assert_eq!(recorder.drops[0].1, "section-1");
    }

    #[test]
    fn test_grab_drop_on_origin_is_not_a_move() {
        let ids = vec!["section-0".to_string(), "section-1".to_string()];
        let mut grab = Grab::new("note-9", 1);
        let mut recorder = Recorder::default();
        assert!(!grab.drop_on(&ids, &mut recorder));
        grab.shift(-1, ids.len());
        grab.shift(1, ids.len());
        assert!(!grab.drop_on(&ids, &mut recorder));
        assert!(recorder.drops.is_empty());
    }
}
