use super::node::SceneNode;

/// Root container handed to the renderer.
#[derive(Debug)]
pub struct Scene {
    root: SceneNode,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: SceneNode::group("scene"),
        }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn add(&self, node: &SceneNode) {
        self.root.add_child(node);
        log::debug!(
            "Added '{}' to scene ({} top-level objects)",
            node.name(),
            self.root.child_count()
        );
    }

    /// Detaches `node` from wherever it sits in the scene.
    pub fn remove(&self, node: &SceneNode) -> bool {
        match node.parent() {
            Some(parent) if self.contains(&parent) => parent.remove_child(node),
            _ => false,
        }
    }

    pub fn contains(&self, node: &SceneNode) -> bool {
        node.ancestors_inclusive()
            .iter()
            .any(|ancestor| ancestor.ptr_eq(&self.root))
    }

    pub fn traverse(&self, f: &mut impl FnMut(&SceneNode)) {
        self.root.traverse(f);
    }

    pub fn clear(&self) {
        self.root.clear_children();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
