use futures::future::LocalBoxFuture;

use crate::scene::SceneNode;

/// Asynchronous source of models.
///
/// Resolves to the root of a node tree whose surfaces carry names and local
/// transforms. Failures are reported, never panicked.
///
/// Every call must return a fresh tree. The registry refuses a tree that is
/// already installed for another shelf.
pub trait ModelLoader {
    fn load<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, anyhow::Result<SceneNode>>;
}
