// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::types::{LocalView, ViewFlags, ViewId, ViewRole};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level view tree.
pub struct Tree {
    views: Vec<Option<View>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<ViewId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.views.len();
        let alive = self.views.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("views_total", &total)
            .field("views_alive", &alive)
            .field("free_list", &free)
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched view.
    pub view: ViewId,
    /// Path from root to view (inclusive).
    pub path: Vec<ViewId>,
    /// The query point in the matched view's local coordinates.
    pub local_point: Point,
}

#[derive(Clone, Debug)]
struct View {
    generation: u32,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    local: LocalView,
}

impl View {
    fn new(generation: u32, local: LocalView) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a new view as the topmost child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the view as a root.
    pub fn insert(&mut self, parent: Option<ViewId>, local: LocalView) -> ViewId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.views[idx] = Some(View::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.views.push(Some(View::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            ((self.views.len() - 1) as u32, generation)
        };
        let id = ViewId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove a view (and its subtree) from the tree.
    pub fn remove(&mut self, id: ViewId) {
        if !self.is_alive(id) {
            return;
        }
        self.unlink(id);
        self.free_subtree(id);
    }

    /// Reparent `id` under `new_parent` (or make it a root).
    ///
    /// Ignored when either id is stale or when `new_parent` lies inside the
    /// subtree of `id`.
    pub fn reparent(&mut self, id: ViewId, new_parent: Option<ViewId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.path_to_root(p).contains(&id))
        {
            return;
        }
        self.unlink(id);
        match new_parent {
            Some(p) => self.link_parent(id, p),
            None => self.roots.push(id),
        }
    }

    /// Update the frame of a view, in its parent's coordinates.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(v) = self.view_opt_mut(id) {
            v.local.frame = frame;
        }
    }

    /// Replace all flags of a view.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) {
        if let Some(v) = self.view_opt_mut(id) {
            v.local.flags = flags;
        }
    }

    /// Set or clear a single flag on a view.
    pub fn set_flag(&mut self, id: ViewId, flag: ViewFlags, on: bool) {
        if let Some(v) = self.view_opt_mut(id) {
            v.local.flags.set(flag, on);
        }
    }

    /// Change the role of a view.
    pub fn set_role(&mut self, id: ViewId, role: ViewRole) {
        if let Some(v) = self.view_opt_mut(id) {
            v.local.role = role;
        }
    }

    /// Returns `true` if `id` refers to a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.view_opt(id).is_some()
    }

    /// Flags of a live view.
    pub fn flags(&self, id: ViewId) -> Option<ViewFlags> {
        self.view_opt(id).map(|v| v.local.flags)
    }

    /// Role of a live view.
    pub fn role(&self, id: ViewId) -> Option<ViewRole> {
        self.view_opt(id).map(|v| v.local.role)
    }

    /// Frame of a live view, in its parent's coordinates.
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.view_opt(id).map(|v| v.local.frame)
    }

    /// Parent of a live view, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
        self.view_opt(id).and_then(|v| v.parent)
    }

    /// Children of a live view, bottom-most first.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.view_opt(id).map(|v| v.children.as_slice()).unwrap_or(&[])
    }

    /// Root views, bottom-most first.
    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    /// Origin of a view's local space in world coordinates.
    pub fn world_origin(&self, id: ViewId) -> Option<Point> {
        let mut offset = Vec2::ZERO;
        let mut cur = Some(id);
        while let Some(c) = cur {
            let v = self.view_opt(c)?;
            offset += v.local.frame.origin().to_vec2();
            cur = v.parent;
        }
        Some(Point::ZERO + offset)
    }

    /// Convert a world-space point into `id`'s local coordinates.
    pub fn to_local(&self, id: ViewId, world: Point) -> Option<Point> {
        let origin = self.world_origin(id)?;
        Some(world - origin.to_vec2())
    }

    /// Returns `true` if `local` lies within the bounds of `id`.
    ///
    /// Bounds are `(0, 0)` to the frame size; stale ids contain nothing.
    pub fn contains_local_point(&self, id: ViewId, local: Point) -> bool {
        self.view_opt(id)
            .map(|v| Rect::from_origin_size(Point::ZERO, v.local.frame.size()).contains(local))
            .unwrap_or(false)
    }

    /// Returns the deepest, topmost view at a world-space point.
    ///
    /// Only visible, interactive views whose bounds contain the point are
    /// considered, and a view's children are only searched when the view
    /// itself contains the point. Later siblings are on top.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        for &root in self.roots.iter().rev() {
            let Some(v) = self.view_opt(root) else {
                continue;
            };
            let local = pt - v.local.frame.origin().to_vec2();
            if let Some((view, local_point)) = self.hit_descend(root, local) {
                return Some(Hit {
                    view,
                    path: self.path_to_root(view),
                    local_point,
                });
            }
        }
        None
    }

    /// Path from the root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(v) = self.view_opt(c) else {
                break;
            };
            out.push(c);
            cur = v.parent;
        }
        out.reverse();
        out
    }

    // --- internals ---

    /// Walks down from `id` without recursion, so depth is bounded only by memory.
    ///
    /// A child that passes the visibility and bounds checks always yields a hit
    /// (itself, at worst), so the walk never backtracks.
    fn hit_descend(&self, id: ViewId, local: Point) -> Option<(ViewId, Point)> {
        let v = self.view_opt(id)?;
        if !Self::admits_hit(v, local) {
            return None;
        }
        let (mut cur, mut cur_local) = (v, local);
        let mut cur_id = id;
        'descend: loop {
            for &child in cur.children.iter().rev() {
                let Some(c) = self.view_opt(child) else {
                    continue;
                };
                let child_local = cur_local - c.local.frame.origin().to_vec2();
                if Self::admits_hit(c, child_local) {
                    (cur, cur_local, cur_id) = (c, child_local, child);
                    continue 'descend;
                }
            }
            return Some((cur_id, cur_local));
        }
    }

    fn admits_hit(v: &View, local: Point) -> bool {
        v.local
            .flags
            .contains(ViewFlags::VISIBLE | ViewFlags::INTERACTIVE)
            && Rect::from_origin_size(Point::ZERO, v.local.frame.size()).contains(local)
    }

    fn view_opt(&self, id: ViewId) -> Option<&View> {
        let v = self.views.get(id.idx())?.as_ref()?;
        (v.generation == id.generation()).then_some(v)
    }

    fn view_opt_mut(&mut self, id: ViewId) -> Option<&mut View> {
        let v = self.views.get_mut(id.idx())?.as_mut()?;
        if v.generation != id.generation() {
            return None;
        }
        Some(v)
    }

    fn link_parent(&mut self, id: ViewId, parent: ViewId) {
        if let Some(p) = self.view_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(v) = self.view_opt_mut(id) {
            v.parent = Some(parent);
        }
    }

    fn unlink(&mut self, id: ViewId) {
        match self.view_opt(id).and_then(|v| v.parent) {
            Some(parent) => {
                if let Some(p) = self.view_opt_mut(parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        if let Some(v) = self.view_opt_mut(id) {
            v.parent = None;
        }
    }

    fn free_subtree(&mut self, id: ViewId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if self.view_opt(cur).is_none() {
                continue;
            }
            let Some(v) = self.views[cur.idx()].take() else {
                continue;
            };
            stack.extend(v.children);
            self.free_list.push(cur.idx());
        }
    }
}
