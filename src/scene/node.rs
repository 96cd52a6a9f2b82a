use glam::{EulerRot, Mat4, Quat, Vec3};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::geometry::Geometry;
use super::tag::TagData;
use crate::math::AABB;

/// Upper bound on how far any walk (up or down the tree) will go.
pub const MAX_TREE_DEPTH: usize = 256;

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Position plus XYZ Euler angles in radians.
    pub fn from_position_euler(position: Vec3, euler: Vec3) -> Self {
        Self {
            translation: position,
            rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Stable identity of a live node, usable as a map key.
///
/// Derived from the allocation address, so it is only unique while the node is
/// alive; holders of a `NodeKey` must also keep the node itself alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

struct NodeData {
    name: String,
    visible: bool,
    transform: Transform,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<SceneNode>,
    tag: TagData,
    geometry: Option<Geometry>,
    cast_shadow: bool,
    receive_shadow: bool,
}

/// Shared handle to a node in the scene graph.
///
/// Parents own their children; children only keep a weak back-reference, so a
/// subtree is released as soon as its last owner drops it.
#[derive(Clone)]
pub struct SceneNode(Rc<RefCell<NodeData>>);

impl SceneNode {
    /// A node without geometry, used to group and place other nodes.
    pub fn group(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            name: name.into(),
            visible: true,
            transform: Transform::IDENTITY,
            parent: Weak::new(),
            children: Vec::new(),
            tag: TagData::Untagged,
            geometry: None,
            cast_shadow: false,
            receive_shadow: false,
        })))
    }

    /// A renderable node.
    pub fn surface(name: impl Into<String>, geometry: Geometry) -> Self {
        let node = Self::group(name);
        node.set_geometry(Some(geometry));
        node
    }

    pub fn key(&self) -> NodeKey {
        NodeKey(Rc::as_ptr(&self.0) as usize)
    }

    pub fn ptr_eq(&self, other: &SceneNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.0.borrow_mut().name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    /// Visible itself and through every ancestor.
    pub fn is_effectively_visible(&self) -> bool {
        self.ancestors_inclusive().iter().all(SceneNode::is_visible)
    }

    pub fn transform(&self) -> Transform {
        self.0.borrow().transform
    }

    pub fn set_transform(&self, transform: Transform) {
        self.0.borrow_mut().transform = transform;
    }

    pub fn set_position(&self, position: Vec3) {
        self.0.borrow_mut().transform.translation = position;
    }

    pub fn tag(&self) -> TagData {
        self.0.borrow().tag.clone()
    }

    pub fn set_tag(&self, tag: TagData) {
        self.0.borrow_mut().tag = tag;
    }

    pub fn is_surface(&self) -> bool {
        self.0.borrow().geometry.is_some()
    }

    pub fn is_plane(&self) -> bool {
        self.0
            .borrow()
            .geometry
            .as_ref()
            .is_some_and(Geometry::is_plane)
    }

    pub fn set_geometry(&self, geometry: Option<Geometry>) {
        self.0.borrow_mut().geometry = geometry;
    }

    pub fn with_geometry<R>(&self, f: impl FnOnce(Option<&Geometry>) -> R) -> R {
        f(self.0.borrow().geometry.as_ref())
    }

    pub fn set_shadows(&self, cast: bool, receive: bool) {
        let mut data = self.0.borrow_mut();
        data.cast_shadow = cast;
        data.receive_shadow = receive;
    }

    pub fn casts_shadow(&self) -> bool {
        self.0.borrow().cast_shadow
    }

    pub fn receives_shadow(&self) -> bool {
        self.0.borrow().receive_shadow
    }

    pub fn parent(&self) -> Option<SceneNode> {
        self.0.borrow().parent.upgrade().map(SceneNode)
    }

    pub fn children(&self) -> Vec<SceneNode> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Attaches `child`, detaching it from any previous parent first.
    /// Refuses (returns false) when `child` is this node or one of its ancestors.
    pub fn add_child(&self, child: &SceneNode) -> bool {
        if self.ancestors_inclusive().iter().any(|a| a.ptr_eq(child)) {
            log::warn!(
                "Refusing to attach '{}' under '{}': would create a cycle",
                child.name(),
                self.name()
            );
            return false;
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        true
    }

    pub fn remove_child(&self, child: &SceneNode) -> bool {
        let removed = {
            let mut data = self.0.borrow_mut();
            let before = data.children.len();
            data.children.retain(|c| !c.ptr_eq(child));
            data.children.len() != before
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Drops every child of this node.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    /// This node followed by its ancestors, nearest first, bounded by
    /// [`MAX_TREE_DEPTH`].
    pub fn ancestors_inclusive(&self) -> Vec<SceneNode> {
        let mut chain = vec![self.clone()];
        while chain.len() <= MAX_TREE_DEPTH {
            let next = chain.last().and_then(SceneNode::parent);
            match next {
                Some(parent) => chain.push(parent),
                None => break,
            }
        }
        chain
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.0.borrow().transform.matrix()
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.ancestors_inclusive()
            .iter()
            .rev()
            .fold(Mat4::IDENTITY, |acc, node| acc * node.local_matrix())
    }

    /// Depth-first pre-order visit of this node and its descendants.
    pub fn traverse(&self, f: &mut impl FnMut(&SceneNode)) {
        self.traverse_depth(0, f);
    }

    fn traverse_depth(&self, depth: usize, f: &mut impl FnMut(&SceneNode)) {
        f(self);
        if depth >= MAX_TREE_DEPTH {
            return;
        }
        for child in self.children() {
            child.traverse_depth(depth + 1, f);
        }
    }

    /// Pre-order visit passing each node's world matrix along.
    pub fn traverse_world(&self, f: &mut impl FnMut(&SceneNode, &Mat4)) {
        let parent_world = self
            .parent()
            .map_or(Mat4::IDENTITY, |parent| parent.world_matrix());
        self.traverse_world_from(parent_world, 0, f);
    }

    fn traverse_world_from(
        &self,
        parent_world: Mat4,
        depth: usize,
        f: &mut impl FnMut(&SceneNode, &Mat4),
    ) {
        let world = parent_world * self.local_matrix();
        f(self, &world);
        if depth >= MAX_TREE_DEPTH {
            return;
        }
        for child in self.children() {
            child.traverse_world_from(world, depth + 1, f);
        }
    }

    /// World-space bounds of every surface in this subtree, visible or not.
    pub fn world_bounds(&self) -> AABB {
        let mut bounds = AABB::EMPTY;
        self.traverse_world(&mut |node, world| {
            let local = node.with_geometry(|g| g.map(Geometry::local_bounds));
            if let Some(local) = local {
                bounds = bounds.union(&local.transformed(world));
            }
        });
        bounds
    }

    /// Every surface in this subtree, pre-order.
    pub fn surfaces(&self) -> Vec<SceneNode> {
        let mut out = Vec::new();
        self.traverse(&mut |node| {
            if node.is_surface() {
                out.push(node.clone());
            }
        });
        out
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("SceneNode")
            .field("name", &data.name)
            .field("visible", &data.visible)
            .field("surface", &data.geometry.is_some())
            .field("children", &data.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshGeometry;

    fn unit_box(name: &str) -> SceneNode {
        SceneNode::surface(name, Geometry::Mesh(MeshGeometry::cuboid(Vec3::ONE)))
    }

    #[test]
    fn test_parent_link_is_weak() {
        let parent = SceneNode::group("parent");
        let child = unit_box("child");
        assert!(parent.add_child(&child));
        assert!(child.parent().unwrap().ptr_eq(&parent));

        drop(parent);
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_add_child_reparents() {
        let a = SceneNode::group("a");
        let b = SceneNode::group("b");
        let child = unit_box("child");
        a.add_child(&child);
        b.add_child(&child);
        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let root = SceneNode::group("root");
        let mid = SceneNode::group("mid");
        root.add_child(&mid);
        assert!(!mid.add_child(&root));
        assert!(!root.add_child(&root));
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_traverse_is_pre_order() {
        let root = SceneNode::group("root");
        let a = SceneNode::group("a");
        let a1 = unit_box("a1");
        let b = unit_box("b");
        root.add_child(&a);
        a.add_child(&a1);
        root.add_child(&b);

        let mut names = Vec::new();
        root.traverse(&mut |n| names.push(n.name()));
        assert_eq!(names, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_world_bounds_follow_transforms() {
        let root = SceneNode::group("root");
        root.set_position(Vec3::new(10.0, 0.0, 0.0));
        let child = unit_box("child");
        child.set_position(Vec3::new(0.0, 2.0, 0.0));
        root.add_child(&child);

        let bounds = root.world_bounds();
        assert_eq!(bounds.min, Vec3::new(9.5, 1.5, -0.5));
        assert_eq!(bounds.max, Vec3::new(10.5, 2.5, 0.5));
    }

    #[test]
    fn test_world_bounds_ignores_visibility() {
        let root = SceneNode::group("root");
        let child = unit_box("child");
        root.add_child(&child);
        root.set_visible(false);
        assert!(!root.world_bounds().is_empty());
        assert!(!child.is_effectively_visible());
    }

    #[test]
    fn test_empty_group_has_empty_bounds() {
        assert!(SceneNode::group("empty").world_bounds().is_empty());
    }

    #[test]
    fn test_keys_distinguish_nodes() {
        let a = unit_box("same");
        let b = unit_box("same");
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), a.clone().key());
    }
}
