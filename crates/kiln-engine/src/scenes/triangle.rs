use crate::coords::ColorRgba;
use crate::core::{Scene, SetupCtx};
use crate::geometry::{GeometryBuffer, UsageHint, VertexArray, VertexLayout};
use crate::harness::{DeviceObjects, FrameCommands, HarnessError, ObjectId, ReleaseLog, Topology};
use crate::shader::{Program, ProgramSources};

/// Three positions, counter-clockwise, in normalized device coordinates.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

/// Color written by `TRIANGLE_FRAGMENT_SHADER`.
pub const TRIANGLE_COLOR: ColorRgba = ColorRgba::new(1.0, 0.5, 0.2, 1.0);

/// Passes attribute 0 through as the clip-space position with w = 1.
pub const TRIANGLE_VERTEX_SHADER: &str = "#version 450 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Writes the constant orange to color output 0.
pub const TRIANGLE_FRAGMENT_SHADER: &str = "#version 450 core
layout (location = 0) out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

type Objects = DeviceObjects<GeometryBuffer, VertexArray, Program>;

/// Triangle variant: one program, one vertex array, one buffer.
pub struct Triangle {
    objects: Objects,
}

impl Triangle {
    pub fn new() -> Self {
        Self {
            objects: Objects::new(),
        }
    }

    pub fn vertex_count() -> u32 {
        VertexLayout::position3().vertex_count(std::mem::size_of_val(&TRIANGLE_VERTICES) as u64)
    }

    /// Draws are recorded only while the program linked and the vertex array
    /// is live.
    fn drawable(&self) -> bool {
        let linked = self
            .objects
            .program
            .get(Objects::PROGRAM)
            .is_some_and(Program::is_linked);
        linked && self.objects.vertex_array.is_live()
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for Triangle {
    fn name(&self) -> &'static str {
        "hello-triangle"
    }

    fn setup(&mut self, ctx: &SetupCtx<'_>) -> Result<(), HarnessError> {
        let layout = VertexLayout::position3();

        let program = Program::build(
            ctx.program_target(),
            ProgramSources {
                vertex: TRIANGLE_VERTEX_SHADER,
                fragment: TRIANGLE_FRAGMENT_SHADER,
            },
            &layout,
            ctx.shader_policy,
        )?;
        if !program.is_linked() {
            log::warn!("triangle program unusable, frames will only clear");
        }
        self.objects.program.fill(program);

        let mut vertex_array = VertexArray::new(layout);
        let buffer = GeometryBuffer::upload(
            ctx.device,
            "triangle vertices",
            &TRIANGLE_VERTICES,
            UsageHint::Static,
        );
        vertex_array.bind_buffer(Objects::BUFFER);

        self.objects.buffer.fill(buffer);
        self.objects.vertex_array.fill(vertex_array);
        Ok(())
    }

    fn record(&self, frame: &mut FrameCommands) {
        if !self.drawable() {
            return;
        }
        frame.use_program(Objects::PROGRAM);
        frame.bind_vertex_array(Objects::VERTEX_ARRAY);
        frame.draw_arrays(Topology::Triangles, 0, Self::vertex_count());
    }

    fn program(&self, id: ObjectId) -> Option<&Program> {
        self.objects.program.get(id)
    }

    fn vertex_array(&self, id: ObjectId) -> Option<&VertexArray> {
        self.objects.vertex_array.get(id)
    }

    fn buffer(&self, id: ObjectId) -> Option<&GeometryBuffer> {
        self.objects.buffer.get(id)
    }

    fn release(&mut self, log: &mut ReleaseLog) {
        self.objects.release_all(log);
    }
}
