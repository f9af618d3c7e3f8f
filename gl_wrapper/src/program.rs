use gl::types::{GLenum, GLuint};
use std::ffi::{c_char, CString};

use thiserror::Error;

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: CString::new(vert_src).unwrap(),
            frag: CString::new(frag_src).unwrap(),
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        unsafe {
            let vert = compile_shader(gl::VERTEX_SHADER, &self.vert)?;
            let frag = compile_shader(gl::FRAGMENT_SHADER, &self.frag)?;

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let buf = [0_u8; 1024];
                gl::GetProgramInfoLog(
                    program,
                    1024,
                    std::ptr::null_mut(),
                    (&buf).as_ptr() as *mut c_char,
                );

                return Err(PBError::Linking(info_log_to_string(&buf)));
            }

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            Ok(Program { id: program })
        }
    }
}

unsafe fn compile_shader(kind: GLenum, src: &CString) -> Result<GLuint, PBError> {
    let shader = gl::CreateShader(kind);

    gl::ShaderSource(
        shader,
        1,
        (&src.as_ptr()) as *const *const c_char,
        std::ptr::null(),
    );
    gl::CompileShader(shader);

    let mut success = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
    if success != 1 {
        let buf = [0_u8; 1024];
        gl::GetShaderInfoLog(
            shader,
            1024,
            std::ptr::null_mut(),
            (&buf).as_ptr() as *mut c_char,
        );

        return Err(PBError::Compilation(info_log_to_string(&buf)));
    }

    Ok(shader)
}

fn info_log_to_string(buf: &[u8; 1024]) -> String {
    let data = if buf.contains(&0) {
        buf.split(|a| *a == 0).next().unwrap()
    } else {
        &buf[..]
    };

    String::from_utf8_lossy(data).to_string()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    /// Uploads a column-major matrix. The program must be current.
    pub fn set_mat4(&self, name: &str, matrix: &[f32; 16]) {
        let name = CString::new(name).unwrap();

        unsafe {
            let location = gl::GetUniformLocation(self.id, name.as_ptr());
            gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr());
        }
    }

    /// Uploads an integer uniform, typically a sampler unit.
    pub fn set_int(&self, name: &str, value: i32) {
        let name = CString::new(name).unwrap();

        unsafe {
            let location = gl::GetUniformLocation(self.id, name.as_ptr());
            gl::Uniform1i(location, value);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
