use std::fmt::Write as _;

use crate::geometry::VertexLayout;

use super::{CompiledStage, InfoLog, ShaderStage};

/// Entry point name every stage must define.
pub const ENTRY_POINT: &str = "main";

/// Located inputs and outputs of a stage entry point.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct StageInterface {
    /// `(location, components)`; components is `None` for non-vector types.
    pub inputs: Vec<(u32, Option<u32>)>,
    pub outputs: Vec<(u32, Option<u32>)>,
    pub writes_position: bool,
}

impl StageInterface {
    /// Reflects the interface of `stage`'s entry point. `None` if the module
    /// has no such entry point.
    pub fn reflect(module: &naga::Module, stage: ShaderStage) -> Option<Self> {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == ENTRY_POINT && ep.stage == stage.to_naga())?;

        let mut iface = StageInterface::default();
        let mut inputs = Vec::new();
        for arg in &ep.function.arguments {
            collect(module, arg.ty, arg.binding.as_ref(), &mut inputs, &mut false);
        }
        iface.inputs = inputs;

        if let Some(result) = &ep.function.result {
            let mut outputs = Vec::new();
            collect(
                module,
                result.ty,
                result.binding.as_ref(),
                &mut outputs,
                &mut iface.writes_position,
            );
            iface.outputs = outputs;
        }

        Some(iface)
    }

    fn output(&self, location: u32) -> Option<&(u32, Option<u32>)> {
        self.outputs.iter().find(|(l, _)| *l == location)
    }
}

fn collect(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<(u32, Option<u32>)>,
    position: &mut bool,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.push((*location, components(&module.types[ty].inner)));
        }
        Some(naga::Binding::BuiltIn(naga::BuiltIn::Position { .. })) => *position = true,
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect(module, m.ty, m.binding.as_ref(), out, position);
                }
            }
        }
    }
}

fn components(inner: &naga::TypeInner) -> Option<u32> {
    match inner {
        naga::TypeInner::Scalar(_) => Some(1),
        naga::TypeInner::Vector { size, .. } => Some(*size as u32),
        _ => None,
    }
}

/// Result of linking a vertex and a fragment stage.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LinkOutcome {
    linked: bool,
    info_log: InfoLog,
}

impl LinkOutcome {
    /// Link status flag.
    pub fn linked(&self) -> bool {
        self.linked
    }

    pub fn info_log(&self) -> &InfoLog {
        &self.info_log
    }
}

/// Checks that two compiled stages form a complete program fed by `layout`.
///
/// Linking fails when a stage did not compile, a stage kind is wrong, the
/// vertex inputs are not covered by the layout, or a fragment input has no
/// matching vertex output.
pub fn link(vertex: &CompiledStage, fragment: &CompiledStage, layout: &VertexLayout) -> LinkOutcome {
    let mut errors = Vec::new();

    for (stage, expected) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
        if stage.stage() != expected {
            errors.push(format!(
                "{} slot holds a {} shader",
                expected.name(),
                stage.stage().name()
            ));
        } else if !stage.compiled() {
            errors.push(format!("attached {} shader is not compiled", expected.name()));
        }
    }

    if errors.is_empty() {
        check_interfaces(vertex, fragment, layout, &mut errors);
    }

    if errors.is_empty() {
        log::debug!("program linked");
        return LinkOutcome {
            linked: true,
            info_log: InfoLog::empty(),
        };
    }

    let mut text = String::new();
    for e in &errors {
        let _ = writeln!(text, "error: {e}");
    }
    LinkOutcome {
        linked: false,
        info_log: InfoLog::bounded(text),
    }
}

fn check_interfaces(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    layout: &VertexLayout,
    errors: &mut Vec<String>,
) {
    let (Some(vm), Some(fm)) = (vertex.module(), fragment.module()) else {
        return;
    };

    let Some(vs) = StageInterface::reflect(vm, ShaderStage::Vertex) else {
        errors.push(format!("vertex shader has no `{ENTRY_POINT}` entry point"));
        return;
    };
    let Some(fs) = StageInterface::reflect(fm, ShaderStage::Fragment) else {
        errors.push(format!("fragment shader has no `{ENTRY_POINT}` entry point"));
        return;
    };

    if layout.wgpu_attributes().is_none() {
        errors.push("vertex layout has an attribute with no device format".to_string());
    }

    for &(location, comps) in &vs.inputs {
        match layout.attribute(location) {
            None => errors.push(format!(
                "vertex input at location {location} has no attribute in the vertex layout"
            )),
            Some(attr) if comps.is_some_and(|c| c != attr.components) => errors.push(format!(
                "vertex input at location {location} expects {} components, layout provides {}",
                comps.unwrap_or_default(),
                attr.components
            )),
            Some(_) => {}
        }
    }

    for &(location, comps) in &fs.inputs {
        match vs.output(location) {
            None => errors.push(format!(
                "fragment input at location {location} is not written by the vertex shader"
            )),
            Some(&(_, out)) if out != comps => errors.push(format!(
                "fragment input at location {location} does not match the vertex output type"
            )),
            Some(_) => {}
        }
    }

    if !fs.outputs.iter().any(|(l, _)| *l == 0) {
        errors.push("fragment shader writes no color output at location 0".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ContextHints;
    use crate::shader::compile_stage;

    const VERTEX: &str = "#version 450 core\n\
        layout (location = 0) in vec3 aPos;\n\
        void main() { gl_Position = vec4(aPos, 1.0); }\n";

    const FRAGMENT: &str = "#version 450 core\n\
        layout (location = 0) out vec4 FragColor;\n\
        void main() { FragColor = vec4(1.0, 0.5, 0.2, 1.0); }\n";

    fn compile(stage: ShaderStage, src: &str) -> CompiledStage {
        compile_stage(&ContextHints::core(4, 5), stage, src)
    }

    #[test]
    fn matching_stages_link() {
        let vs = compile(ShaderStage::Vertex, VERTEX);
        let fs = compile(ShaderStage::Fragment, FRAGMENT);
        let outcome = link(&vs, &fs, &VertexLayout::position3());
        assert!(outcome.linked(), "{}", outcome.info_log());
        assert!(outcome.info_log().is_empty());
    }

    #[test]
    fn vertex_interface_reflects_position_input() {
        let vs = compile(ShaderStage::Vertex, VERTEX);
        let iface = StageInterface::reflect(vs.module().unwrap(), ShaderStage::Vertex).unwrap();
        assert_eq!(iface.inputs, vec![(0, Some(3))]);
        assert!(iface.writes_position);
    }

    #[test]
    fn uncompiled_stage_fails_link() {
        let vs = compile(ShaderStage::Vertex, "#version 450 core\nvoid main( {\n");
        let fs = compile(ShaderStage::Fragment, FRAGMENT);
        let outcome = link(&vs, &fs, &VertexLayout::position3());
        assert!(!outcome.linked());
        assert!(outcome.info_log().as_str().contains("not compiled"));
    }

    #[test]
    fn swapped_stages_fail_link() {
        let vs = compile(ShaderStage::Vertex, VERTEX);
        let fs = compile(ShaderStage::Fragment, FRAGMENT);
        let outcome = link(&fs, &vs, &VertexLayout::position3());
        assert!(!outcome.linked());
    }

    #[test]
    fn input_outside_layout_fails_link() {
        let src = "#version 450 core\n\
            layout (location = 0) in vec3 aPos;\n\
            layout (location = 1) in vec2 aUv;\n\
            void main() { gl_Position = vec4(aPos.xy + aUv, aPos.z, 1.0); }\n";
        let vs = compile(ShaderStage::Vertex, src);
        assert!(vs.compiled(), "{}", vs.info_log());
        let fs = compile(ShaderStage::Fragment, FRAGMENT);

        let outcome = link(&vs, &fs, &VertexLayout::position3());
        assert!(!outcome.linked());
        assert!(outcome.info_log().as_str().contains("location 1"));
    }

    #[test]
    fn unfed_fragment_input_fails_link() {
        let src = "#version 450 core\n\
            layout (location = 0) in vec3 vColor;\n\
            layout (location = 0) out vec4 FragColor;\n\
            void main() { FragColor = vec4(vColor, 1.0); }\n";
        let vs = compile(ShaderStage::Vertex, VERTEX);
        let fs = compile(ShaderStage::Fragment, src);
        assert!(fs.compiled(), "{}", fs.info_log());

        let outcome = link(&vs, &fs, &VertexLayout::position3());
        assert!(!outcome.linked());
        assert!(outcome.info_log().as_str().contains("not written by the vertex shader"));
    }
}
