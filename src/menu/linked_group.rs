//! Linked groups of popups that behave as one unit for vanishing.
//!
//! A group forms when a sub-menu opens its first child: the host popup is the
//! root member and every child opened below it joins the same group. The
//! pointer distance of any member is the distance to the nearest member, so
//! moving from a parent into its child never fades either of them.
//!
//! Membership lives in a thread-local [`GroupRegistry`] keyed by [`PopupId`];
//! the free functions of this module operate on it.

use std::cell::RefCell;
use std::collections::HashMap;

use egui::{Pos2, Rect};
use log::{debug, trace};

use super::popup::PopupId;

/// Margin added around every member rect before measuring pointer distance.
pub const RECT_MARGIN: f32 = 5.0;

/// Ordered members of one group. Index 0 is the root popup.
#[derive(Debug, Clone, Default)]
pub struct LinkedMenuGroup {
    members: Vec<(PopupId, Option<Rect>)>,
    cache: Option<(Pos2, f32)>,
}

impl LinkedMenuGroup {
    pub fn members(&self) -> impl Iterator<Item = PopupId> + '_ {
        self.members.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn root(&self) -> Option<PopupId> {
        self.members.first().map(|(id, _)| *id)
    }

    fn index_of(&self, id: PopupId) -> Option<usize> {
        self.members.iter().position(|(member, _)| *member == id)
    }

    /// Distance from `pointer` to the nearest expanded member rect, cached
    /// until the pointer moves or a rect changes.
    pub fn min_distance(&mut self, pointer: Pos2) -> Option<f32> {
        if let Some((cached_at, distance)) = self.cache
            && cached_at == pointer
        {
            return Some(distance);
        }

        let distance = self
            .members
            .iter()
            .filter_map(|(_, rect)| *rect)
            .map(|rect| rect.distance_to_pos(pointer))
            .reduce(f32::min)?;
        self.cache = Some((pointer, distance));
        Some(distance)
    }
}

/// All live groups, by group number.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: HashMap<u64, LinkedMenuGroup>,
    index: HashMap<PopupId, u64>,
    next_group: u64,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `child` in the group of `host`, creating the group with `host` as
    /// root when there is none yet.
    pub fn join(&mut self, host: PopupId, child: PopupId) {
        let group_key = match self.index.get(&host) {
            Some(key) => *key,
            None => {
                let key = self.next_group;
                self.next_group += 1;
                self.groups.insert(
                    key,
                    LinkedMenuGroup {
                        members: vec![(host, None)],
                        cache: None,
                    },
                );
                self.index.insert(host, key);
                debug!("formed linked group {key} rooted at popup {host}");
                key
            }
        };

        if self.index.get(&child) == Some(&group_key) {
            return;
        }
        if self.index.contains_key(&child) {
            self.leave(child);
        }
        if let Some(group) = self.groups.get_mut(&group_key) {
            group.members.push((child, None));
            group.cache = None;
            self.index.insert(child, group_key);
            trace!("popup {child} joined linked group {group_key}");
        }
    }

    /// Remove `id` from its group. The group dissolves when the root leaves or
    /// when only the root would be left.
    pub fn leave(&mut self, id: PopupId) {
        let Some(group_key) = self.index.get(&id).copied() else {
            return;
        };
        let Some(group) = self.groups.get_mut(&group_key) else {
            self.index.remove(&id);
            return;
        };

        match group.index_of(id) {
            Some(position) if position > 0 && group.len() > 2 => {
                group.members.remove(position);
                group.cache = None;
                self.index.remove(&id);
                trace!("popup {id} left linked group {group_key}");
            }
            _ => {
                if let Some(group) = self.groups.remove(&group_key) {
                    for member in group.members() {
                        self.index.remove(&member);
                    }
                }
                self.index.remove(&id);
                debug!("dissolved linked group {group_key}");
            }
        }
    }

    /// Record the on-screen rect of a member.
    pub fn set_rect(&mut self, id: PopupId, rect: Rect) {
        let Some(group) = self
            .index
            .get(&id)
            .and_then(|key| self.groups.get_mut(key))
        else {
            return;
        };
        let expanded = rect.expand(RECT_MARGIN);
        if let Some(slot) = group.members.iter_mut().find(|(member, _)| *member == id)
            && slot.1 != Some(expanded)
        {
            slot.1 = Some(expanded);
            group.cache = None;
        }
    }

    /// Distance from `pointer` to the nearest member of the group `id` is in,
    /// or `None` when `id` is not grouped or no member has a rect yet.
    pub fn min_distance(&mut self, id: PopupId, pointer: Pos2) -> Option<f32> {
        let key = self.index.get(&id)?;
        self.groups.get_mut(key)?.min_distance(pointer)
    }

    /// Members of the group `id` is in, root first.
    pub fn members(&self, id: PopupId) -> Vec<PopupId> {
        self.index
            .get(&id)
            .and_then(|key| self.groups.get(key))
            .map(|group| group.members().collect())
            .unwrap_or_default()
    }

    pub fn is_grouped(&self, id: PopupId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

thread_local! {
    static REGISTRY: RefCell<GroupRegistry> = RefCell::new(GroupRegistry::new());
}

pub fn join(host: PopupId, child: PopupId) {
    REGISTRY.with_borrow_mut(|registry| registry.join(host, child));
}

pub fn leave(id: PopupId) {
    REGISTRY.with_borrow_mut(|registry| registry.leave(id));
}

pub fn set_rect(id: PopupId, rect: Rect) {
    REGISTRY.with_borrow_mut(|registry| registry.set_rect(id, rect));
}

pub fn min_distance(id: PopupId, pointer: Pos2) -> Option<f32> {
    REGISTRY.with_borrow_mut(|registry| registry.min_distance(id, pointer))
}

pub fn members(id: PopupId) -> Vec<PopupId> {
    REGISTRY.with_borrow(|registry| registry.members(id))
}

pub fn is_grouped(id: PopupId) -> bool {
    REGISTRY.with_borrow(|registry| registry.is_grouped(id))
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;

    fn rect_at(x: f32, y: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(100.0, 100.0))
    }

    #[test]
    fn test_join_forms_group_with_host_as_root() {
        let mut registry = GroupRegistry::new();
        let (root, child) = (PopupId::next(), PopupId::next());
        registry.join(root, child);
        assert_eq!(registry.members(child), vec![root, child]);
        assert_eq!(registry.group_count(), 1);
    }

    #[test]
    fn test_leaving_child_keeps_group() {
        let mut registry = GroupRegistry::new();
        let (root, a, b) = (PopupId::next(), PopupId::next(), PopupId::next());
        registry.join(root, a);
        registry.join(a, b);
        registry.leave(b);
        assert_eq!(registry.members(root), vec![root, a]);
        assert!(!registry.is_grouped(b));
    }

    #[test]
    fn test_last_child_leaving_dissolves_group() {
        let mut registry = GroupRegistry::new();
        let (root, child) = (PopupId::next(), PopupId::next());
        registry.join(root, child);
        registry.leave(child);
        assert!(!registry.is_grouped(root));
        assert!(registry.members(root).is_empty());
        assert_eq!(registry.group_count(), 0);
    }

    #[test]
    fn test_sibling_leaving_then_root_leaving() {
        let mut registry = GroupRegistry::new();
        let (root, a, b) = (PopupId::next(), PopupId::next(), PopupId::next());
        registry.join(root, a);
        registry.join(root, b);

        registry.leave(a);
        assert_eq!(registry.members(root), vec![root, b]);

        registry.leave(root);
        assert!(!registry.is_grouped(b));
        assert_eq!(registry.group_count(), 0);
    }

    #[test]
    fn test_leaving_root_dissolves_group() {
        let mut registry = GroupRegistry::new();
        let (root, a, b) = (PopupId::next(), PopupId::next(), PopupId::next());
        registry.join(root, a);
        registry.join(a, b);
        registry.leave(root);
        assert_eq!(registry.group_count(), 0);
        assert!(!registry.is_grouped(a));
        assert!(!registry.is_grouped(b));
    }

    #[test]
    fn test_min_distance_uses_nearest_member() {
        let mut registry = GroupRegistry::new();
        let (root, child) = (PopupId::next(), PopupId::next());
        registry.join(root, child);
        registry.set_rect(root, rect_at(0.0, 0.0));
        registry.set_rect(child, rect_at(300.0, 0.0));

        // 10 px right of the child, which is expanded by the margin.
        let distance = registry.min_distance(root, pos2(410.0, 50.0));
        assert_eq!(distance, Some(10.0 - RECT_MARGIN));

        let inside = registry.min_distance(child, pos2(50.0, 50.0));
        assert_eq!(inside, Some(0.0));
    }

    #[test]
    fn test_min_distance_refreshes_after_rect_change() {
        let mut registry = GroupRegistry::new();
        let (root, child) = (PopupId::next(), PopupId::next());
        registry.join(root, child);
        registry.set_rect(root, rect_at(0.0, 0.0));
        let pointer = pos2(200.0, 50.0);
        assert_eq!(registry.min_distance(root, pointer), Some(100.0 - RECT_MARGIN));

        registry.set_rect(child, rect_at(150.0, 0.0));
        assert_eq!(registry.min_distance(root, pointer), Some(0.0));
    }

    #[test]
    fn test_ungrouped_popup_has_no_distance() {
        let mut registry = GroupRegistry::new();
        assert_eq!(registry.min_distance(PopupId::next(), pos2(0.0, 0.0)), None);
    }
}
