use std::ffi::c_void;

use crate::geometry::Geometry;
use crate::program::Program;

/// Issues draws and framebuffer clears, skipping redundant program
/// binds.
pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn enable_depth_test(&self) {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
        }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    pub fn draw(&self, geometry: &Geometry) {
        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawElements(
                gl::TRIANGLES,
                geometry.index_count() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null::<c_void>(),
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
