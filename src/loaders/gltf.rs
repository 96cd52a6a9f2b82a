use anyhow::{Context, Result};
use futures::future::{FutureExt, LocalBoxFuture};
use glam::{Quat, Vec3};
use gltf::mesh::Mode;
use std::path::{Path, PathBuf};

use crate::scene::{Geometry, MeshGeometry, SceneNode, Transform};
use crate::traits::ModelLoader;

/// Loads glTF / GLB files into a node tree that mirrors the file's default scene.
#[derive(Debug, Clone, Default)]
pub struct GltfLoader {
    base_dir: Option<PathBuf>,
}

impl GltfLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative model paths are resolved against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) if Path::new(path).is_relative() => base.join(path),
            _ => PathBuf::from(path),
        }
    }

    /// Blocking import of one file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SceneNode> {
        let path = path.as_ref();
        log::info!("Loading glTF file: {:?}", path);

        let (document, buffers, _images) =
            gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .context(format!("glTF file has no scenes: {:?}", path))?;

        let root_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = SceneNode::group(root_name);
        for node in scene.nodes() {
            let child = build_node(&node, &buffers)
                .context(format!("Failed to read node {:?}", node.name()))?;
            root.add_child(&child);
        }

        log::debug!(
            "glTF {:?}: {} nodes, {} meshes, {} surfaces built",
            path,
            document.nodes().count(),
            document.meshes().count(),
            root.surfaces().len()
        );
        Ok(root)
    }
}

impl ModelLoader for GltfLoader {
    fn load<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<SceneNode>> {
        async move { self.load_file(self.resolve(path)) }.boxed_local()
    }
}

/// Recursively mirrors a glTF node and its children.
fn build_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> Result<SceneNode> {
    let name = node.name().unwrap_or_default().to_string();
    let out = SceneNode::group(name.clone());

    let (translation, rotation, scale) = node.transform().decomposed();
    out.set_transform(Transform {
        translation: Vec3::from_array(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from_array(scale),
    });

    if let Some(mesh) = node.mesh() {
        let mut geometries = read_mesh(&mesh, buffers)?;
        if geometries.len() == 1 {
            out.set_geometry(geometries.pop());
            out.set_shadows(true, true);
        } else {
            for (i, geometry) in geometries.into_iter().enumerate() {
                let part = SceneNode::surface(format!("{name}_{i}"), geometry);
                part.set_shadows(true, true);
                out.add_child(&part);
            }
        }
    }

    for child in node.children() {
        out.add_child(&build_node(&child, buffers)?);
    }

    Ok(out)
}

/// One geometry per triangle primitive; other topologies are skipped.
fn read_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<Vec<Geometry>> {
    let mut geometries = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            log::debug!("Skipping {:?} primitive in mesh {:?}", primitive.mode(), mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();

        let indices = reader
            .read_indices()
            .map(|indices| indices.into_u32().collect())
            .unwrap_or_default();

        geometries.push(Geometry::Mesh(MeshGeometry::new(positions, indices)));
    }

    Ok(geometries)
}
