//! Collision Detection
//!
//! Closest-center target resolution over measured droppable rectangles.

use crate::DropTarget;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Client-space rectangle (as from `getBoundingClientRect`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.left + self.width && p.y >= self.top && p.y <= self.top + self.height
    }
}

/// A measured draggable card
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRect {
    pub id: String,
    /// Container the card is rendered in, if any
    pub container: Option<String>,
    pub rect: Rect,
}

/// A measured container (a board body)
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerRect {
    pub id: String,
    pub rect: Rect,
}

/// Key whose rect center is nearest to `point`; first wins on ties
pub fn closest_center<'a, K: 'a>(point: Point, candidates: impl IntoIterator<Item = (K, &'a Rect)>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, rect) in candidates {
        let d = point.distance_to(rect.center());
        if best.as_ref().map_or(true, |(_, bd)| d < *bd) {
            best = Some((key, d));
        }
    }
    best.map(|(key, _)| key)
}

/// Resolve the drop target under `point`.
///
/// Inside a container, only that container's cards compete; an empty
/// container is itself the target. Outside every container the nearest card
/// wins, falling back to the nearest container when no cards exist.
pub fn resolve_target(point: Point, containers: &[ContainerRect], items: &[ItemRect]) -> Option<DropTarget> {
    if let Some(container) = containers.iter().find(|c| c.rect.contains(point)) {
        let inside = items
            .iter()
            .filter(|i| i.container.as_deref() == Some(container.id.as_str()))
            .map(|i| (i.id.as_str(), &i.rect));
        return Some(match closest_center(point, inside) {
            Some(id) => DropTarget::Item(id.to_string()),
            None => DropTarget::Container(container.id.clone()),
        });
    }

    closest_center(point, items.iter().map(|i| (i.id.as_str(), &i.rect)))
        .map(|id| DropTarget::Item(id.to_string()))
        .or_else(|| {
            closest_center(point, containers.iter().map(|c| (c.id.as_str(), &c.rect)))
                .map(|id| DropTarget::Container(id.to_string()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, container: Option<&str>, top: f64) -> ItemRect {
        ItemRect {
            id: id.to_string(),
            container: container.map(str::to_string),
            rect: Rect::new(0.0, top, 100.0, 40.0),
        }
    }

    #[test]
    fn test_closest_center_picks_nearest() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 100.0, 10.0, 10.0);
        assert_eq!(closest_center(Point::new(5.0, 80.0), [("a", &a), ("b", &b)]), Some("b"));
        assert_eq!(closest_center(Point::new(5.0, 20.0), [("a", &a), ("b", &b)]), Some("a"));
    }

    #[test]
    fn test_closest_center_tie_keeps_first() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert_eq!(closest_center(Point::new(5.0, 15.0), [("a", &a), ("b", &b)]), Some("a"));
    }

    #[test]
    fn test_closest_center_empty() {
        let none: Vec<(&str, &Rect)> = Vec::new();
        assert_eq!(closest_center(Point::default(), none), None);
    }

    #[test]
    fn test_resolve_flat_list_without_containers() {
        let items = vec![card("a", None, 0.0), card("b", None, 50.0), card("c", None, 100.0)];
        let target = resolve_target(Point::new(50.0, 400.0), &[], &items);
        assert_eq!(target, Some(DropTarget::Item("c".to_string())));
    }

    #[test]
    fn test_resolve_empty_container_is_target() {
        let containers = vec![
            ContainerRect { id: "board-1".to_string(), rect: Rect::new(0.0, 0.0, 100.0, 300.0) },
            ContainerRect { id: "board-2".to_string(), rect: Rect::new(200.0, 0.0, 100.0, 300.0) },
        ];
        let items = vec![card("a", Some("board-1"), 0.0)];
        let target = resolve_target(Point::new(250.0, 150.0), &containers, &items);
        assert_eq!(target, Some(DropTarget::Container("board-2".to_string())));
    }

    #[test]
    fn test_resolve_inside_container_ignores_other_cards() {
        let containers = vec![
            ContainerRect { id: "left".to_string(), rect: Rect::new(0.0, 0.0, 100.0, 300.0) },
            ContainerRect { id: "right".to_string(), rect: Rect::new(101.0, 0.0, 100.0, 300.0) },
        ];
        let items = vec![
            card("a", Some("left"), 0.0),
            ItemRect { id: "b".to_string(), container: Some("right".to_string()), rect: Rect::new(101.0, 200.0, 100.0, 40.0) },
        ];
        // Closer to "a" by center, but the pointer is inside "right"
        let target = resolve_target(Point::new(105.0, 30.0), &containers, &items);
        assert_eq!(target, Some(DropTarget::Item("b".to_string())));
    }

    #[test]
    fn test_resolve_nothing_measured() {
        assert_eq!(resolve_target(Point::new(1.0, 1.0), &[], &[]), None);
    }
}
