use std::fmt::Write as _;

use naga::front::glsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::device::ContextHints;

use super::InfoLog;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// Result of compiling one stage.
///
/// Holds the validated IR on success; the info log carries the diagnostic
/// otherwise.
#[derive(Debug)]
pub struct CompiledStage {
    stage: ShaderStage,
    module: Option<naga::Module>,
    info_log: InfoLog,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compile status flag.
    pub fn compiled(&self) -> bool {
        self.module.is_some()
    }

    pub fn info_log(&self) -> &InfoLog {
        &self.info_log
    }

    pub fn module(&self) -> Option<&naga::Module> {
        self.module.as_ref()
    }

    pub(crate) fn into_module(self) -> Option<naga::Module> {
        self.module
    }

    fn failed(stage: ShaderStage, diagnostic: String) -> Self {
        Self {
            stage,
            module: None,
            info_log: InfoLog::bounded(diagnostic),
        }
    }
}

/// `#version` directive of a GLSL source.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct VersionDirective {
    pub number: u32,
    pub profile: Option<String>,
}

/// Reads the `#version` directive, which must precede everything except
/// blank lines and comments.
pub(crate) fn parse_version(source: &str) -> Result<VersionDirective, String> {
    let line = source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("//"))
        .ok_or_else(|| "empty shader source".to_string())?;

    let Some(rest) = line.strip_prefix("#version") else {
        return Err("missing #version directive".to_string());
    };

    let mut tokens = rest.split_whitespace();
    let number = tokens
        .next()
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or_else(|| format!("malformed #version directive: `{line}`"))?;
    let profile = tokens.next().map(str::to_string);

    Ok(VersionDirective { number, profile })
}

fn check_version(hints: &ContextHints, directive: &VersionDirective) -> Result<(), String> {
    if directive.number > hints.glsl_version() {
        return Err(format!(
            "GLSL {} is not supported by a {}.{} {} context",
            directive.number,
            hints.major,
            hints.minor,
            ContextHints::PROFILE
        ));
    }

    match directive.profile.as_deref() {
        Some(p) if p != ContextHints::PROFILE => Err(format!(
            "profile `{p}` is not available in a core context"
        )),
        _ => Ok(()),
    }
}

/// Compiles one GLSL stage to validated IR.
///
/// Never panics on bad input; failures come back as a stage whose compile
/// status is `false` with a bounded diagnostic.
pub fn compile_stage(hints: &ContextHints, stage: ShaderStage, source: &str) -> CompiledStage {
    let directive = match parse_version(source) {
        Ok(d) => d,
        Err(msg) => return CompiledStage::failed(stage, format!("ERROR: 0:1: {msg}")),
    };
    if let Err(msg) = check_version(hints, &directive) {
        return CompiledStage::failed(stage, format!("ERROR: 0:1: {msg}"));
    }

    let mut frontend = glsl::Frontend::default();
    let module = match frontend.parse(&glsl::Options::from(stage.to_naga()), source) {
        Ok(m) => m,
        Err(errors) => {
            let mut diagnostic = String::new();
            for e in &errors.errors {
                let loc = e.meta.location(source);
                let _ = writeln!(diagnostic, "ERROR: 0:{}: {}", loc.line_number, e.kind);
            }
            if diagnostic.is_empty() {
                diagnostic.push_str("ERROR: compilation failed");
            }
            return CompiledStage::failed(stage, diagnostic);
        }
    };

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::empty());
    if let Err(e) = validator.validate(&module) {
        return CompiledStage::failed(stage, format!("ERROR: validation: {}", e.as_inner()));
    }

    log::debug!("{} stage compiled (GLSL {})", stage.name(), directive.number);
    CompiledStage {
        stage,
        module: Some(module),
        info_log: InfoLog::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "#version 450 core\n\
        layout (location = 0) in vec3 aPos;\n\
        void main() {\n\
            gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);\n\
        }\n";

    const FRAGMENT: &str = "#version 450 core\n\
        layout (location = 0) out vec4 FragColor;\n\
        void main() {\n\
            FragColor = vec4(1.0, 0.5, 0.2, 1.0);\n\
        }\n";

    fn hints() -> ContextHints {
        ContextHints::core(4, 5)
    }

    // ── success ───────────────────────────────────────────────────────────

    #[test]
    fn valid_stages_compile() {
        let vs = compile_stage(&hints(), ShaderStage::Vertex, VERTEX);
        assert!(vs.compiled(), "{}", vs.info_log());
        assert!(vs.info_log().is_empty());

        let fs = compile_stage(&hints(), ShaderStage::Fragment, FRAGMENT);
        assert!(fs.compiled(), "{}", fs.info_log());
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn syntax_error_fails_with_diagnostic() {
        let src = "#version 450 core\nvoid main() {\n gl_Position = vec4(\n";
        let vs = compile_stage(&hints(), ShaderStage::Vertex, src);
        assert!(!vs.compiled());
        assert!(!vs.info_log().is_empty());
        assert!(vs.module().is_none());
    }

    #[test]
    fn undeclared_identifier_fails() {
        let src = "#version 450 core\n\
            layout (location = 0) out vec4 FragColor;\n\
            void main() { FragColor = colour; }\n";
        let fs = compile_stage(&hints(), ShaderStage::Fragment, src);
        assert!(!fs.compiled());
        assert!(fs.info_log().as_str().starts_with("ERROR"));
    }

    #[test]
    fn version_above_context_is_rejected() {
        let src = VERTEX.replace("450", "460");
        let vs = compile_stage(&hints(), ShaderStage::Vertex, &src);
        assert!(!vs.compiled());
        assert!(vs.info_log().as_str().contains("GLSL 460"));
    }

    #[test]
    fn compatibility_profile_rejected_in_core_context() {
        let src = VERTEX.replace("core", "compatibility");
        let vs = compile_stage(&hints(), ShaderStage::Vertex, &src);
        assert!(!vs.compiled());
        assert!(vs.info_log().as_str().contains("compatibility"));
    }

    #[test]
    fn missing_version_is_rejected() {
        let vs = compile_stage(&hints(), ShaderStage::Vertex, "void main() {}\n");
        assert!(!vs.compiled());
        assert!(vs.info_log().as_str().contains("#version"));
    }

    // ── directive parsing ─────────────────────────────────────────────────

    #[test]
    fn parse_version_skips_leading_comments() {
        let d = parse_version("\n// vertex\n#version 330 core\n").unwrap();
        assert_eq!(d.number, 330);
        assert_eq!(d.profile.as_deref(), Some("core"));
    }

    #[test]
    fn parse_version_without_profile() {
        let d = parse_version("#version 450\n").unwrap();
        assert_eq!(d, VersionDirective { number: 450, profile: None });
    }

    #[test]
    fn parse_version_malformed_number() {
        assert!(parse_version("#version core\n").is_err());
        assert!(parse_version("").is_err());
    }
}
