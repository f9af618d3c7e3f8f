//! Static quad meshes for the room scene.
//!
//! Every mesh uses one interleaved layout: `vec3` position followed by
//! `vec2` texture coordinate, 5 floats per vertex.

pub const FLOATS_PER_VERTEX: usize = 5;

/// Immutable indexed quad, uploaded to the GPU once at startup.
pub struct QuadMesh {
    pub vertices: &'static [f32],
    pub indices: &'static [u32],
}

impl QuadMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn position(&self, vertex: usize) -> [f32; 3] {
        let base = vertex * FLOATS_PER_VERTEX;
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        ]
    }

    pub fn texcoord(&self, vertex: usize) -> [f32; 2] {
        let base = vertex * FLOATS_PER_VERTEX;
        [self.vertices[base + 3], self.vertices[base + 4]]
    }
}

/// 10x10 floor on the y=0 plane, centered at the origin.
#[rustfmt::skip]
pub const FLOOR: QuadMesh = QuadMesh {
    vertices: &[
        -5.0, 0.0,  5.0,   0.0, 1.0,
         5.0, 0.0,  5.0,   1.0, 1.0,
         5.0, 0.0, -5.0,   1.0, 0.0,
        -5.0, 0.0, -5.0,   0.0, 0.0,
    ],
    indices: &[0, 1, 2, 2, 3, 0],
};

/// 10x5 wall on the z=-5 plane, standing on the floor edge.
#[rustfmt::skip]
pub const WALL: QuadMesh = QuadMesh {
    vertices: &[
        -5.0, 0.0, -5.0,   0.0, 0.0,
         5.0, 0.0, -5.0,   1.0, 0.0,
         5.0, 5.0, -5.0,   1.0, 1.0,
        -5.0, 5.0, -5.0,   0.0, 1.0,
    ],
    indices: &[0, 1, 2, 2, 3, 0],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    /// Cross products of the two triangles of `mesh`, in index order.
    fn triangle_normals(mesh: &QuadMesh) -> Vec<[f32; 3]> {
        mesh.indices
            .chunks(3)
            .map(|tri| {
                let a = mesh.position(tri[0] as usize);
                let b = mesh.position(tri[1] as usize);
                let c = mesh.position(tri[2] as usize);
                cross(sub(b, a), sub(c, a))
            })
            .collect()
    }

    #[test]
    fn meshes_are_indexed_quads() {
        for mesh in [&FLOOR, &WALL] {
            assert_eq!(mesh.vertices.len() % FLOATS_PER_VERTEX, 0);
            assert_eq!(mesh.vertex_count(), 4);
            assert_eq!(mesh.indices, &[0, 1, 2, 2, 3, 0]);
        }
    }

    #[test]
    fn floor_is_a_10x10_rectangle_on_y0() {
        for i in 0..FLOOR.vertex_count() {
            let [x, y, z] = FLOOR.position(i);
            assert_eq!(y, 0.0);
            assert_eq!(x.abs(), 5.0);
            assert_eq!(z.abs(), 5.0);
        }

        // Both triangles face +y and together cover the full rectangle.
        let normals = triangle_normals(&FLOOR);
        assert_eq!(normals.len(), 2);

        let mut area = 0.0;
        for n in normals {
            assert!(n[1] > 0.0);
            assert_eq!(n[0], 0.0);
            assert_eq!(n[2], 0.0);
            area += length(n) / 2.0;
        }
        assert_eq!(area, 100.0);
    }

    #[test]
    fn wall_is_a_10x5_rectangle_on_z_minus5() {
        for i in 0..WALL.vertex_count() {
            let [x, y, z] = WALL.position(i);
            assert_eq!(z, -5.0);
            assert_eq!(x.abs(), 5.0);
            assert!(y == 0.0 || y == 5.0);
        }

        let normals = triangle_normals(&WALL);
        assert_eq!(normals.len(), 2);

        let mut area = 0.0;
        for n in normals {
            assert!(n[2] > 0.0);
            assert_eq!(n[0], 0.0);
            assert_eq!(n[1], 0.0);
            area += length(n) / 2.0;
        }
        assert_eq!(area, 50.0);
    }

    #[test]
    fn texcoords_cover_the_unit_square() {
        for mesh in [&FLOOR, &WALL] {
            let mut corners: Vec<[f32; 2]> =
                (0..mesh.vertex_count()).map(|i| mesh.texcoord(i)).collect();
            corners.sort_by(|a, b| a.partial_cmp(b).unwrap());

            assert_eq!(
                corners,
                vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]
            );
        }
    }
}
