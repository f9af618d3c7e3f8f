use std::ffi::c_void;
use std::mem::size_of;

use thiserror::Error;

/// Upload template for indexed meshes: one VAO, one vertex buffer, one
/// index buffer, attributes declared at consecutive locations.
pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: &'a [u32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            data,
            indices,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        validate(&self.attributes, self.data, self.indices)?;

        let vertex_floats: usize = self.attributes.iter().map(|a| a.size()).sum();
        let stride = (vertex_floats * size_of::<f32>()) as i32;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);
            gl::GenBuffers(1, (&mut ebo) as *mut u32);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (self.indices.len() * size_of::<u32>()) as isize,
                self.indices.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    (offset * size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
                offset += attr.size();
            }

            // The element buffer binding is part of the VAO state, so
            // only the VAO itself is unbound here.
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            index_count: self.indices.len(),
        })
    }
}

fn validate(
    attributes: &[VertexAttribute],
    data: &[f32],
    indices: &[u32],
) -> Result<(), GBError> {
    let vertex_floats: usize = attributes.iter().map(|a| a.size()).sum();

    if vertex_floats == 0 {
        return Err(GBError::NoAttributes);
    }

    if data.len() % vertex_floats != 0 {
        return Err(GBError::InvalidDataLength);
    }

    let vertices = (data.len() / vertex_floats) as u32;
    if let Some(&index) = indices.iter().find(|&&i| i >= vertices) {
        return Err(GBError::IndexOutOfRange { index, vertices });
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("invalid data length for given attributes")]
    InvalidDataLength,
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: u32 },
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: u32,
    index_count: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.ebo) as *const u32);
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_attribute_list() {
        assert!(matches!(
            validate(&[], &[0.0; 5], &[0]),
            Err(GBError::NoAttributes)
        ));
    }

    #[test]
    fn rejects_partial_vertex() {
        let attrs = [VertexAttribute::Vec3, VertexAttribute::Vec2];
        assert!(matches!(
            validate(&attrs, &[0.0; 12], &[0, 1]),
            Err(GBError::InvalidDataLength)
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let attrs = [VertexAttribute::Vec3, VertexAttribute::Vec2];
        let result = validate(&attrs, &[0.0; 20], &[0, 1, 2, 2, 4, 0]);
        assert!(matches!(
            result,
            Err(GBError::IndexOutOfRange {
                index: 4,
                vertices: 4
            })
        ));
    }

    #[test]
    fn accepts_two_quads_worth_of_data() {
        let attrs = [VertexAttribute::Vec3, VertexAttribute::Vec2];
        assert!(validate(&attrs, &[0.0; 20], &[0, 1, 2, 2, 3, 0]).is_ok());
    }
}
