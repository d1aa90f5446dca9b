//! Unit tests for the program linker and the checked build pipeline

use std::rc::Rc;

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::sample::{FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

fn mock_device() -> (Rc<MockGraphicsDevice>, Rc<dyn GraphicsDevice>) {
    let mock = Rc::new(MockGraphicsDevice::new());
    let device: Rc<dyn GraphicsDevice> = mock.clone();
    (mock, device)
}

fn vertex_unit(device: &Rc<dyn GraphicsDevice>) -> CompiledShader {
    CompiledShader::compile(device, &ShaderSource::vertex(VERTEX_SHADER_SOURCE)).unwrap()
}

fn fragment_unit(device: &Rc<dyn GraphicsDevice>) -> CompiledShader {
    CompiledShader::compile(device, &ShaderSource::fragment(FRAGMENT_SHADER_SOURCE)).unwrap()
}

// ============================================================================
// LinkedProgram::link
// ============================================================================

#[test]
fn test_link_vertex_and_fragment() {
    let (mock, device) = mock_device();
    let units = vec![vertex_unit(&device), fragment_unit(&device)];

    let program = LinkedProgram::link(&device, units).unwrap();

    assert!(program.is_linked());
    assert!(program.diagnostic().is_none());
    assert_eq!(program.stages(), &[ShaderStage::Vertex, ShaderStage::Fragment]);
    assert_eq!(mock.program(program.handle()).unwrap().linked_stages.len(), 2);
}

#[test]
fn test_link_releases_units_on_success() {
    let (mock, device) = mock_device();
    let units = vec![vertex_unit(&device), fragment_unit(&device)];
    assert_eq!(mock.live_shader_count(), 2);

    let program = LinkedProgram::link(&device, units).unwrap();

    assert_eq!(mock.live_shader_count(), 0);
    assert!(mock.program(program.handle()).unwrap().attached.is_empty());
    assert!(mock.errors().is_empty(), "{:?}", mock.errors());
}

#[test]
fn test_link_command_order() {
    let (mock, device) = mock_device();
    let units = vec![vertex_unit(&device), fragment_unit(&device)];
    mock.clear_commands();

    let _program = LinkedProgram::link(&device, units).unwrap();

    assert_eq!(
        mock.commands(),
        vec![
            "create_program",
            "attach_shader",
            "attach_shader",
            "link_program",
            "detach_shader",
            "detach_shader",
            "delete_shader",
            "delete_shader",
        ]
    );
}

#[test]
fn test_link_vertex_only_fails() {
    let (mock, device) = mock_device();
    let program = LinkedProgram::link(&device, vec![vertex_unit(&device)]).unwrap();

    assert!(!program.is_linked());
    assert!(program.diagnostic().unwrap().contains("fragment"));
    assert_eq!(mock.live_shader_count(), 0);
}

#[test]
fn test_link_fragment_only_fails() {
    let (mock, device) = mock_device();
    let program = LinkedProgram::link(&device, vec![fragment_unit(&device)]).unwrap();

    assert!(!program.is_linked());
    assert!(program.diagnostic().unwrap().contains("vertex"));
    assert_eq!(mock.live_shader_count(), 0);
}

#[test]
fn test_link_with_uncompiled_unit_fails_and_releases() {
    let (mock, device) = mock_device();
    let broken = CompiledShader::compile(&device, &ShaderSource::fragment("#version 330 core\n}")).unwrap();
    assert!(!broken.is_compiled());

    let program = LinkedProgram::link(&device, vec![vertex_unit(&device), broken]).unwrap();

    assert!(!program.is_linked());
    assert!(!program.diagnostic().unwrap().is_empty());
    assert_eq!(mock.live_shader_count(), 0);
}

#[test]
fn test_link_no_units_fails() {
    let (_mock, device) = mock_device();
    let program = LinkedProgram::link(&device, Vec::new()).unwrap();

    assert!(!program.is_linked());
    assert!(program.stages().is_empty());
}

#[test]
fn test_link_allocation_failure_releases_units() {
    let (mock, device) = mock_device();
    let units = vec![vertex_unit(&device), fragment_unit(&device)];
    mock.set_fail_allocations(true);

    let result = LinkedProgram::link(&device, units);

    assert!(result.is_err());
    assert_eq!(mock.live_shader_count(), 0);
}

#[test]
fn test_into_result_on_failed_link() {
    let (mock, device) = mock_device();
    let result = LinkedProgram::link(&device, vec![vertex_unit(&device)]).unwrap().into_result();

    match result {
        Err(Error::ProgramLinkFailed(log)) => assert!(log.contains("fragment")),
        other => panic!("Expected ProgramLinkFailed, got {:?}", other),
    }
    assert_eq!(mock.live_program_count(), 0);
}

#[test]
fn test_drop_deletes_program() {
    let (mock, device) = mock_device();
    let program = LinkedProgram::link(&device, vec![vertex_unit(&device), fragment_unit(&device)]).unwrap();
    assert_eq!(mock.live_program_count(), 1);

    drop(program);
    assert_eq!(mock.live_program_count(), 0);
}

// ============================================================================
// build_program
// ============================================================================

#[test]
fn test_build_program_default_sources() {
    let (mock, device) = mock_device();
    let program = build_program(&device, &ProgramSources::default()).unwrap();

    assert!(program.is_linked());
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.live_program_count(), 1);
}

#[test]
fn test_build_program_vertex_compile_failure() {
    let (mock, device) = mock_device();
    let sources = ProgramSources {
        vertex: ShaderSource::vertex("#version 330 core\nvoid main() {"),
        ..ProgramSources::default()
    };

    let result = build_program(&device, &sources);

    assert!(matches!(result, Err(Error::ShaderCompileFailed { stage: ShaderStage::Vertex, .. })));
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.live_program_count(), 0);
}

#[test]
fn test_build_program_fragment_compile_failure_releases_vertex() {
    let (mock, device) = mock_device();
    let sources = ProgramSources {
        fragment: ShaderSource::fragment("#version 330 core\nout vec4 FragColor;\n"),
        ..ProgramSources::default()
    };

    let result = build_program(&device, &sources);

    match result {
        Err(Error::ShaderCompileFailed { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(log.contains("main"));
        }
        other => panic!("Expected ShaderCompileFailed, got {:?}", other),
    }
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.live_program_count(), 0);
}

#[test]
fn test_build_program_link_failure() {
    let (mock, device) = mock_device();
    // Two vertex stages: both compile, the link has no fragment stage
    let sources = ProgramSources {
        vertex: ShaderSource::vertex(VERTEX_SHADER_SOURCE),
        fragment: ShaderSource::vertex(VERTEX_SHADER_SOURCE),
    };

    let result = build_program(&device, &sources);

    assert!(matches!(result, Err(Error::ProgramLinkFailed(_))));
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.live_program_count(), 0);
}

#[test]
fn test_build_program_compiles_both_stages_when_vertex_fails() {
    let (mock, device) = mock_device();
    let sources = ProgramSources {
        vertex: ShaderSource::vertex("#version 330 core\nvoid main() {"),
        fragment: ShaderSource::fragment("#version 330 core\nout vec4 FragColor;\n"),
    };

    let result = build_program(&device, &sources);

    // The vertex failure is reported, the fragment stage still ran
    assert!(matches!(result, Err(Error::ShaderCompileFailed { stage: ShaderStage::Vertex, .. })));
    let compiles = mock.commands().iter().filter(|c| *c == "compile_shader").count();
    assert_eq!(compiles, 2);
    assert!(!mock.commands().iter().any(|c| c == "create_program"));
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.live_program_count(), 0);
}
