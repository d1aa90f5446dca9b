//! Built-in sample scene: two GLSL 330 core shaders and an indexed shape
//!
//! The geometry is five positions and nine indices (three triangles). The
//! third triangle (0, 4, 1) reaches the fifth vertex; the data is kept as is.

/// Pass-through vertex shader reading `aPos` from slot 0
pub const VERTEX_SHADER_SOURCE: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main()
{
   gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Constant orange fragment shader
pub const FRAGMENT_SHADER_SOURCE: &str = "#version 330 core
out vec4 FragColor;
void main()
{
   FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// Five xyz positions
#[rustfmt::skip]
pub const SAMPLE_VERTICES: [f32; 15] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
     1.5,  0.5, 0.0,
];

/// Three triangles
#[rustfmt::skip]
pub const SAMPLE_INDICES: [u32; 9] = [
    0, 1, 3,
    1, 2, 3,
    0, 4, 1,
];
