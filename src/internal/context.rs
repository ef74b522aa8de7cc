use std::fmt::Debug;

use eframe::glow::{self, HasContext};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("gpu resource allocation failed: {0}")]
    ResourceAllocation(String),
}

/// The slice of the graphics API a mesh needs: buffer allocation and upload,
/// vertex attribute setup, texture unit binding and indexed drawing. Binding
/// slots (active texture unit, bound vertex array) are context-global state,
/// so everything goes through one context object instead of free functions.
pub trait GraphicsContext {
    type Buffer: Copy + Eq + Debug;
    type VertexArray: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;

    fn create_buffer(&self) -> Result<Self::Buffer, DeviceError>;
    fn create_vertex_array(&self) -> Result<Self::VertexArray, DeviceError>;

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    fn bind_element_buffer(&self, buffer: Option<Self::Buffer>);
    fn bind_vertex_array(&self, array: Option<Self::VertexArray>);

    /// Uploads into whichever buffer is currently bound to the array target,
    /// as static (write once, read many) data.
    fn upload_array_buffer(&self, bytes: &[u8]);
    fn upload_element_buffer(&self, bytes: &[u8]);

    /// Configures one float attribute slot against the bound vertex array.
    /// Stride and offset are in bytes.
    fn set_vertex_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32);

    fn set_active_texture_unit(&self, unit: u32);
    fn bind_texture_2d(&self, texture: Option<Self::Texture>);

    fn draw_indexed_triangles(&self, index_count: i32);

    fn delete_buffer(&self, buffer: Self::Buffer);
    fn delete_vertex_array(&self, array: Self::VertexArray);
}

/// What a mesh is allowed to do to the active shader program: set a named
/// integer (sampler) uniform. Unknown names are a no-op.
pub trait SetUniform {
    fn set_int(&self, name: &str, value: i32);
}

impl GraphicsContext for glow::Context {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Texture = glow::Texture;

    fn create_buffer(&self) -> Result<Self::Buffer, DeviceError> {
        unsafe { HasContext::create_buffer(self).map_err(DeviceError::ResourceAllocation) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, DeviceError> {
        unsafe { HasContext::create_vertex_array(self).map_err(DeviceError::ResourceAllocation) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn bind_element_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, buffer) }
    }

    fn bind_vertex_array(&self, array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, array) }
    }

    fn upload_array_buffer(&self, bytes: &[u8]) {
        unsafe { self.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::STATIC_DRAW) }
    }

    fn upload_element_buffer(&self, bytes: &[u8]) {
        unsafe { self.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytes, glow::STATIC_DRAW) }
    }

    fn set_vertex_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.enable_vertex_attrib_array(slot);
            self.vertex_attrib_pointer_f32(slot, components, glow::FLOAT, false, stride, offset);
        }
    }

    fn set_active_texture_unit(&self, unit: u32) {
        unsafe { self.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&self, texture: Option<Self::Texture>) {
        unsafe { self.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn draw_indexed_triangles(&self, index_count: i32) {
        unsafe { self.draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn delete_vertex_array(&self, array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, array) }
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{DeviceError, GraphicsContext, SetUniform};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Call {
        BindArrayBuffer(Option<u32>),
        BindElementBuffer(Option<u32>),
        BindVertexArray(Option<u32>),
        UploadArrayBuffer(Vec<u8>),
        UploadElementBuffer(Vec<u8>),
        SetVertexAttribute {
            slot: u32,
            components: i32,
            stride: i32,
            offset: i32,
        },
        SetActiveTextureUnit(u32),
        BindTexture2d(Option<u32>),
        SetUniform(String, i32),
        DrawIndexedTriangles(i32),
        DeleteBuffer(u32),
        DeleteVertexArray(u32),
    }

    /// Records every context call so tests can assert on the exact protocol,
    /// and tracks the binding state a real GL context would hold.
    pub struct RecordingContext {
        calls: Rc<RefCell<Vec<Call>>>,
        next_handle: Cell<u32>,
        pub fail_allocations: Cell<bool>,
        pub active_texture_unit: Cell<u32>,
        pub bound_vertex_array: Cell<Option<u32>>,
    }

    impl RecordingContext {
        pub fn new() -> Self {
            Self {
                calls: Rc::new(RefCell::new(Vec::new())),
                next_handle: Cell::new(1),
                fail_allocations: Cell::new(false),
                active_texture_unit: Cell::new(0),
                bound_vertex_array: Cell::new(None),
            }
        }

        pub fn log(&self) -> Rc<RefCell<Vec<Call>>> {
            self.calls.clone()
        }

        pub fn take_calls(&self) -> Vec<Call> {
            self.calls.borrow_mut().drain(..).collect()
        }

        fn allocate(&self) -> Result<u32, DeviceError> {
            if self.fail_allocations.get() {
                return Err(DeviceError::ResourceAllocation("out of handles".to_owned()));
            }
            let handle = self.next_handle.get();
            self.next_handle.set(handle + 1);
            Ok(handle)
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl GraphicsContext for RecordingContext {
        type Buffer = u32;
        type VertexArray = u32;
        type Texture = u32;

        fn create_buffer(&self) -> Result<u32, DeviceError> {
            self.allocate()
        }

        fn create_vertex_array(&self) -> Result<u32, DeviceError> {
            self.allocate()
        }

        fn bind_array_buffer(&self, buffer: Option<u32>) {
            self.record(Call::BindArrayBuffer(buffer));
        }

        fn bind_element_buffer(&self, buffer: Option<u32>) {
            self.record(Call::BindElementBuffer(buffer));
        }

        fn bind_vertex_array(&self, array: Option<u32>) {
            self.bound_vertex_array.set(array);
            self.record(Call::BindVertexArray(array));
        }

        fn upload_array_buffer(&self, bytes: &[u8]) {
            self.record(Call::UploadArrayBuffer(bytes.to_vec()));
        }

        fn upload_element_buffer(&self, bytes: &[u8]) {
            self.record(Call::UploadElementBuffer(bytes.to_vec()));
        }

        fn set_vertex_attribute(&self, slot: u32, components: i32, stride: i32, offset: i32) {
            self.record(Call::SetVertexAttribute {
                slot,
                components,
                stride,
                offset,
            });
        }

        fn set_active_texture_unit(&self, unit: u32) {
            self.active_texture_unit.set(unit);
            self.record(Call::SetActiveTextureUnit(unit));
        }

        fn bind_texture_2d(&self, texture: Option<u32>) {
            self.record(Call::BindTexture2d(texture));
        }

        fn draw_indexed_triangles(&self, index_count: i32) {
            self.record(Call::DrawIndexedTriangles(index_count));
        }

        fn delete_buffer(&self, buffer: u32) {
            self.record(Call::DeleteBuffer(buffer));
        }

        fn delete_vertex_array(&self, array: u32) {
            self.record(Call::DeleteVertexArray(array));
        }
    }

    /// Stand-in for the active shader program; pushes uniform sets into the
    /// same call log so tests see them interleaved with the binding calls.
    pub struct RecordingShader {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl RecordingShader {
        pub fn attached_to(context: &RecordingContext) -> Self {
            Self {
                calls: context.log(),
            }
        }
    }

    impl SetUniform for RecordingShader {
        fn set_int(&self, name: &str, value: i32) {
            self.calls
                .borrow_mut()
                .push(Call::SetUniform(name.to_owned(), value));
        }
    }
}
