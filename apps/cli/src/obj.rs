// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ export of a synthesized scene

use plan3d_viewer::Scene;
use std::io::{self, Write};

/// Write every scene node as its own OBJ object
///
/// The kernel works Z-up; OBJ viewers expect Y-up, so each vertex
/// (x, y, z) is written as (x, z, -y) and triangle winding is reversed to
/// keep faces pointing outwards after the flip.
pub fn write_obj<W: Write>(out: &mut W, scene: &Scene) -> io::Result<ObjStats> {
    writeln!(out, "# Generated by plan3d")?;
    writeln!(out, "# Coordinate system: Y-up (OBJ convention)")?;
    writeln!(out)?;

    let mut stats = ObjStats::default();
    let mut vertex_offset: u32 = 0;

    for node in &scene.nodes {
        let mesh = &node.mesh;
        writeln!(out, "o {}", node.id)?;

        for v in mesh.positions.chunks_exact(3) {
            writeln!(out, "v {:.6} {:.6} {:.6}", v[0], v[2], -v[1])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[2], -n[1])?;
        }
        for t in mesh.indices.chunks_exact(3) {
            let i0 = t[0] + vertex_offset + 1;
            let i1 = t[1] + vertex_offset + 1;
            let i2 = t[2] + vertex_offset + 1;
            writeln!(out, "f {}//{} {}//{} {}//{}", i0, i0, i2, i2, i1, i1)?;
        }

        let verts = mesh.vertex_count();
        vertex_offset += verts as u32;
        stats.objects += 1;
        stats.vertices += verts;
        stats.triangles += mesh.indices.len() / 3;
        writeln!(out)?;
    }

    Ok(stats)
}

/// Totals written by [`write_obj`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStats {
    pub objects: usize,
    pub vertices: usize,
    pub triangles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan3d_geometry::{box_at, Point3, Vector3};
    use plan3d_viewer::{SceneMaterial, SceneNode, SceneNodeId};

    fn scene() -> Scene {
        let node = |id, x: f64| SceneNode {
            id,
            mesh: box_at(Point3::new(x, 2.0, 0.5), Vector3::new(1.0, 1.0, 1.0), 0.0),
            material: SceneMaterial::WALL,
        };
        Scene {
            nodes: vec![node(SceneNodeId::Room(0), 0.0), node(SceneNodeId::Door(0), 5.0)],
            camera: None,
        }
    }

    #[test]
    fn test_objects_and_offsets() {
        let mut buf = Vec::new();
        let stats = write_obj(&mut buf, &scene()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(stats.objects, 2);
        assert_eq!(stats.vertices, 48);
        assert!(text.contains("o room1\n"));
        assert!(text.contains("o door1\n"));

        // Faces of the second object index past the first object's vertices
        let max_index = text
            .lines()
            .filter(|l| l.starts_with("f "))
            .flat_map(|l| l[2..].split(' '))
            .filter_map(|v| v.split("//").next()?.parse::<usize>().ok())
            .max()
            .unwrap();
        assert_eq!(max_index, 48);
    }

    #[test]
    fn test_z_up_becomes_y_up() {
        let mut buf = Vec::new();
        write_obj(&mut buf, &scene()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let first: Vec<f64> = text
            .lines()
            .find(|l| l.starts_with("v "))
            .unwrap()[2..]
            .split(' ')
            .map(|s| s.parse().unwrap())
            .collect();
        // Box spans z in [0, 1] and sits at plan y = 2
        assert!(first[1] >= -1e-6 && first[1] <= 1.0 + 1e-6);
        assert!(first[2] <= -1.5 && first[2] >= -2.5);

        let ys: Vec<f64> = text
            .lines()
            .filter(|l| l.starts_with("v "))
            .map(|l| l.split(' ').nth(2).unwrap().parse().unwrap())
            .collect();
        let top = ys.iter().cloned().fold(f64::MIN, f64::max);
        assert_relative_eq!(top, 1.0, epsilon = 1e-6);
    }
}
