use std::mem;

/// Per-vertex record, uploaded verbatim. Field order is load-bearing: the
/// shader reads position, normal and texture coordinate at attribute
/// locations 0, 1 and 2 with the byte offsets below.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

#[derive(Copy, Clone, Debug)]
pub struct VertexAttribute {
    pub slot: u32,
    pub components: i32,
    pub offset: usize,
}

/// Single source of truth for the attribute layout; offsets come from the
/// compiler so the table stays correct if the record ever changes.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        slot: 0,
        components: 3,
        offset: mem::offset_of!(ModelVertex, position),
    },
    VertexAttribute {
        slot: 1,
        components: 3,
        offset: mem::offset_of!(ModelVertex, normal),
    },
    VertexAttribute {
        slot: 2,
        components: 2,
        offset: mem::offset_of!(ModelVertex, tex_coords),
    },
];

pub const fn vertex_stride() -> usize {
    mem::size_of::<ModelVertex>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_shader_contract() {
        assert_eq!(vertex_stride(), 32);

        let [position, normal, tex_coords] = VERTEX_ATTRIBUTES;

        assert_eq!((position.slot, position.components, position.offset), (0, 3, 0));
        assert_eq!((normal.slot, normal.components, normal.offset), (1, 3, 12));
        assert_eq!((tex_coords.slot, tex_coords.components, tex_coords.offset), (2, 2, 24));
    }

    #[test]
    fn vertices_cast_to_tightly_packed_bytes() {
        let vertices = [ModelVertex {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 1.0, 0.0],
            tex_coords: [0.5, 0.25],
        }];

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertex_stride());

        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.5, 0.25]);
    }
}
