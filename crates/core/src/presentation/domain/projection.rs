/// Column-major 4x4 matrix matching the WGSL `mat4x4<f32>` uniform layout
/// (64 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Projection {
    pub matrix: [[f32; 4]; 4],
}

impl Projection {
    /// Pixel-space orthographic projection for a framebuffer of the given
    /// size: origin at the top-left corner, y pointing down.
    ///
    /// Depth -1..1 is mapped onto wgpu's 0..1 clip range, near plane at 0.
    pub fn orthographic(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Self {
            matrix: [
                [2.0 / w, 0.0, 0.0, 0.0],
                [0.0, -2.0 / h, 0.0, 0.0],
                [0.0, 0.0, -0.5, 0.0],
                [-1.0, 1.0, 0.5, 1.0],
            ],
        }
    }

    /// Transforms a point, returning clip-space coordinates.
    #[cfg(test)]
    pub(crate) fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        let m = &self.matrix;
        let [x, y, z] = point;
        let mut out = [0.0f32; 3];
        for (row, value) in out.iter_mut().enumerate() {
            *value = m[0][row] * x + m[1][row] * y + m[2][row] * z + m[3][row];
        }
        out
    }
}

/// One corner of the frame quad: pixel position plus texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

/// Where the frame is drawn, in framebuffer pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl QuadLayout {
    /// A quad at `(x, y)` with the frame's own pixel dimensions.
    pub fn for_frame(x: f32, y: f32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            x,
            y,
            width: frame_width as f32,
            height: frame_height as f32,
        }
    }

    /// Two counter-clockwise triangles covering the quad. Texture
    /// coordinate (0, 0) is the top-left of the frame.
    pub fn vertices(&self) -> [QuadVertex; 6] {
        let (l, t) = (self.x, self.y);
        let (r, b) = (self.x + self.width, self.y + self.height);

        let top_left = QuadVertex {
            position: [l, t],
            tex_coords: [0.0, 0.0],
        };
        let top_right = QuadVertex {
            position: [r, t],
            tex_coords: [1.0, 0.0],
        };
        let bottom_right = QuadVertex {
            position: [r, b],
            tex_coords: [1.0, 1.0],
        };
        let bottom_left = QuadVertex {
            position: [l, b],
            tex_coords: [0.0, 1.0],
        };

        [
            top_left,
            bottom_left,
            bottom_right,
            top_left,
            bottom_right,
            top_right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn assert_point_eq(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-6);
        }
    }

    #[rstest]
    #[case::top_left([0.0, 0.0, 0.0], [-1.0, 1.0, 0.5])]
    #[case::top_right([640.0, 0.0, 0.0], [1.0, 1.0, 0.5])]
    #[case::bottom_left([0.0, 480.0, 0.0], [-1.0, -1.0, 0.5])]
    #[case::bottom_right([640.0, 480.0, 0.0], [1.0, -1.0, 0.5])]
    #[case::center([320.0, 240.0, 0.0], [0.0, 0.0, 0.5])]
    #[case::near_plane([0.0, 0.0, 1.0], [-1.0, 1.0, 0.0])]
    #[case::far_plane([0.0, 0.0, -1.0], [-1.0, 1.0, 1.0])]
    fn test_orthographic_maps_framebuffer_to_clip_space(
        #[case] point: [f32; 3],
        #[case] expected: [f32; 3],
    ) {
        let proj = Projection::orthographic(640, 480);
        assert_point_eq(proj.apply(point), expected);
    }

    #[test]
    fn test_orthographic_tracks_framebuffer_size() {
        let proj = Projection::orthographic(1280, 960);
        assert_point_eq(proj.apply([640.0, 480.0, 0.0]), [0.0, 0.0, 0.5]);
        assert_point_eq(proj.apply([1280.0, 960.0, 0.0]), [1.0, -1.0, 0.5]);
    }

    #[test]
    fn test_orthographic_zero_size_stays_finite() {
        let proj = Projection::orthographic(0, 0);
        assert!(proj.matrix.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_projection_is_64_bytes() {
        assert_eq!(std::mem::size_of::<Projection>(), 64);
        assert_eq!(bytemuck::bytes_of(&Projection::orthographic(1, 1)).len(), 64);
    }

    #[test]
    fn test_quad_sized_to_frame_at_offset() {
        let layout = QuadLayout::for_frame(200.0, 200.0, 1080, 1920);
        let verts = layout.vertices();

        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_relative_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 200.0);
        assert_relative_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1280.0);
        assert_relative_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 200.0);
        assert_relative_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 2120.0);
    }

    #[test]
    fn test_quad_texture_coordinates_follow_corners() {
        let verts = QuadLayout::for_frame(10.0, 20.0, 4, 2).vertices();
        for v in verts {
            let expected_u = if v.position[0] == 10.0 { 0.0 } else { 1.0 };
            let expected_v = if v.position[1] == 20.0 { 0.0 } else { 1.0 };
            assert_eq!(v.tex_coords, [expected_u, expected_v]);
        }
    }

    #[test]
    fn test_quad_triangles_are_counter_clockwise_on_screen() {
        let proj = Projection::orthographic(640, 480);
        let verts = QuadLayout::for_frame(200.0, 200.0, 100, 50).vertices();
        for tri in verts.chunks_exact(3) {
            let p: Vec<[f32; 3]> = tri
                .iter()
                .map(|v| proj.apply([v.position[0], v.position[1], 0.0]))
                .collect();
            let cross = (p[1][0] - p[0][0]) * (p[2][1] - p[0][1])
                - (p[1][1] - p[0][1]) * (p[2][0] - p[0][0]);
            assert!(cross > 0.0, "triangle {tri:?} is clockwise in clip space");
        }
    }
}
