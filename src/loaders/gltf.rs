use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::math::AABB;
use crate::sim::collision::ColliderBox;

/// Named animation and its length in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

/// Character model metadata the simulation cares about
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRig {
    pub clips: Vec<AnimationClip>,
    pub bounds: Option<AABB>,
}

/// Loads the static world and turns every mesh named in `blocked` into a collider.
/// A node matches by its own name or by its mesh's name.
pub fn load_world_colliders(path: impl AsRef<Path>, blocked: &[String]) -> Result<Vec<ColliderBox>> {
    let path = path.as_ref();
    log::info!("Loading world glTF: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path)
        .context(format!("Failed to load glTF file: {:?}", path))?;

    let blocked: HashSet<&str> = blocked.iter().map(String::as_str).collect();
    let mut colliders = Vec::new();

    for scene in gltf.scenes() {
        for node in scene.nodes() {
            collect_colliders(&node, &buffers, &Mat4::IDENTITY, &blocked, &mut colliders)?;
        }
    }

    if colliders.is_empty() {
        log::warn!("No blocked meshes found in {:?}; movement will be unobstructed", path);
    }
    log::info!("Extracted {} colliders from {:?}", colliders.len(), path);
    Ok(colliders)
}

/// Recursively walks glTF nodes, accumulating transforms
fn collect_colliders(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    blocked: &HashSet<&str>,
    colliders: &mut Vec<ColliderBox>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        let matched = node
            .name()
            .filter(|n| blocked.contains(n))
            .or_else(|| mesh.name().filter(|n| blocked.contains(n)));

        if let Some(name) = matched {
            let vertices = mesh_vertices(&mesh, buffers, &global_transform)?;
            match AABB::from_points(&vertices) {
                Some(bounds) => colliders.push(ColliderBox::new(name, bounds)),
                None => log::warn!("Blocked mesh {:?} has no vertices, skipped", name),
            }
        }
    }

    for child in node.children() {
        collect_colliders(&child, buffers, &global_transform, blocked, colliders)?;
    }

    Ok(())
}

/// World-space positions of every primitive in a mesh
fn mesh_vertices(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
) -> Result<Vec<Vec3>> {
    let mut vertices = Vec::new();
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d[..]));

        let positions = reader
            .read_positions()
            .context(format!("Mesh {:?} primitive has no positions", mesh.name()))?;

        vertices.extend(positions.map(|pos| transform.transform_point3(Vec3::from_array(pos))));
    }
    Ok(vertices)
}

/// Loads the character model's animation clips and overall bounds
pub fn load_character_rig(path: impl AsRef<Path>) -> Result<CharacterRig> {
    let path = path.as_ref();
    log::info!("Loading character glTF: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path)
        .context(format!("Failed to load glTF file: {:?}", path))?;

    let clips: Vec<AnimationClip> = gltf
        .animations()
        .enumerate()
        .map(|(i, animation)| AnimationClip {
            name: animation
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("clip_{i}")),
            duration: calculate_animation_duration(&animation, &buffers),
        })
        .collect();

    let mut vertices = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            collect_vertices(&node, &buffers, &Mat4::IDENTITY, &mut vertices)?;
        }
    }

    log::info!("Character has {} clips, {} vertices", clips.len(), vertices.len());
    Ok(CharacterRig {
        clips,
        bounds: AABB::from_points(&vertices),
    })
}

fn collect_vertices(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    vertices: &mut Vec<Vec3>,
) -> Result<()> {
    let global_transform = *parent_transform * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        vertices.extend(mesh_vertices(&mesh, buffers, &global_transform)?);
    }
    for child in node.children() {
        collect_vertices(&child, buffers, &global_transform, vertices)?;
    }
    Ok(())
}

/// Calculates animation duration
fn calculate_animation_duration(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> f32 {
    let mut max_time = 0.0f32;

    for channel in animation.channels() {
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|d| &d[..]));

        if let Some(inputs) = reader.read_inputs() {
            for time in inputs {
                max_time = max_time.max(time);
            }
        }
    }

    max_time
}
