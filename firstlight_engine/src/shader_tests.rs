//! Unit tests for the shader unit builder

use std::rc::Rc;

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::sample::{FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

fn mock_device() -> (Rc<MockGraphicsDevice>, Rc<dyn GraphicsDevice>) {
    let mock = Rc::new(MockGraphicsDevice::new());
    let device: Rc<dyn GraphicsDevice> = mock.clone();
    (mock, device)
}

// ============================================================================
// Info log bounding
// ============================================================================

#[test]
fn test_bounded_info_log_short_is_unchanged() {
    assert_eq!(bounded_info_log("0:1(1): error: oops"), "0:1(1): error: oops");
    assert_eq!(bounded_info_log(""), "");
}

#[test]
fn test_bounded_info_log_strips_trailing_nul_and_newline() {
    assert_eq!(bounded_info_log("error\n\0\0"), "error");
}

#[test]
fn test_bounded_info_log_truncates_to_capacity() {
    let long = "x".repeat(2000);
    assert_eq!(bounded_info_log(&long).len(), INFO_LOG_CAPACITY);
}

#[test]
fn test_bounded_info_log_respects_char_boundary() {
    // 'é' is two bytes; 511 ASCII bytes put it across the 512 limit
    let log = format!("{}é tail", "a".repeat(511));
    let bounded = bounded_info_log(&log);
    assert_eq!(bounded.len(), 511);
    assert!(bounded.chars().all(|c| c == 'a'));
}

#[test]
fn test_failure_diagnostic_is_never_empty() {
    assert!(!failure_diagnostic("").is_empty());
    assert!(!failure_diagnostic("\0\n").is_empty());
    assert_eq!(failure_diagnostic("bad"), "bad");
}

// ============================================================================
// ShaderSource
// ============================================================================

#[test]
fn test_shader_source_constructors() {
    let vertex = ShaderSource::vertex(VERTEX_SHADER_SOURCE);
    assert_eq!(vertex.stage(), ShaderStage::Vertex);
    assert_eq!(vertex.code(), VERTEX_SHADER_SOURCE);

    let fragment = ShaderSource::fragment(String::from("#version 330 core\nvoid main() {}"));
    assert_eq!(fragment.stage(), ShaderStage::Fragment);
    assert_eq!(ShaderSource::new(ShaderStage::Fragment, fragment.code().to_string()), fragment);
}

// ============================================================================
// Compile
// ============================================================================

#[test]
fn test_compile_sample_vertex_shader() {
    let (mock, device) = mock_device();
    let shader = CompiledShader::compile(&device, &ShaderSource::vertex(VERTEX_SHADER_SOURCE)).unwrap();

    assert!(shader.is_compiled());
    assert!(shader.diagnostic().is_none());
    assert_eq!(shader.stage(), ShaderStage::Vertex);
    assert_eq!(
        mock.commands(),
        vec!["create_shader(vertex)", "shader_source", "compile_shader"]
    );
    assert_eq!(mock.shader(shader.handle()).unwrap().source, VERTEX_SHADER_SOURCE);
}

#[test]
fn test_compile_sample_fragment_shader() {
    let (_mock, device) = mock_device();
    let shader = CompiledShader::compile(&device, &ShaderSource::fragment(FRAGMENT_SHADER_SOURCE)).unwrap();

    assert!(shader.is_compiled());
    assert_eq!(shader.stage(), ShaderStage::Fragment);
}

#[test]
fn test_compile_failure_carries_diagnostic() {
    let (_mock, device) = mock_device();
    let source = ShaderSource::vertex("#version 330 core\nvoid main() {\n   gl_Position = vec4(0.0);\n");
    let shader = CompiledShader::compile(&device, &source).unwrap();

    assert!(!shader.is_compiled());
    let diagnostic = shader.diagnostic().unwrap();
    assert!(!diagnostic.is_empty());
    assert!(diagnostic.len() <= INFO_LOG_CAPACITY);
    assert!(diagnostic.contains("unexpected end of file"));
}

#[test]
fn test_compile_empty_source_fails() {
    let (_mock, device) = mock_device();
    let shader = CompiledShader::compile(&device, &ShaderSource::fragment("")).unwrap();

    assert!(!shader.is_compiled());
    assert!(shader.diagnostic().is_some());
}

#[test]
fn test_compile_allocation_failure_is_error() {
    let (mock, device) = mock_device();
    mock.set_fail_allocations(true);

    let result = CompiledShader::compile(&device, &ShaderSource::vertex(VERTEX_SHADER_SOURCE));
    assert!(matches!(result, Err(Error::BackendError(_))));
}

#[test]
fn test_into_result_success_keeps_unit() {
    let (mock, device) = mock_device();
    let shader = CompiledShader::compile(&device, &ShaderSource::vertex(VERTEX_SHADER_SOURCE))
        .unwrap()
        .into_result()
        .unwrap();

    assert!(shader.is_compiled());
    assert_eq!(mock.live_shader_count(), 1);
}

#[test]
fn test_into_result_failure_releases_unit() {
    let (mock, device) = mock_device();
    let result = CompiledShader::compile(&device, &ShaderSource::fragment("void main() {}"))
        .unwrap()
        .into_result();

    match result {
        Err(Error::ShaderCompileFailed { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(log.contains("#version"));
        }
        other => panic!("Expected ShaderCompileFailed, got {:?}", other),
    }
    assert_eq!(mock.live_shader_count(), 0);
}

#[test]
fn test_drop_deletes_shader_object() {
    let (mock, device) = mock_device();
    let shader = CompiledShader::compile(&device, &ShaderSource::vertex(VERTEX_SHADER_SOURCE)).unwrap();
    assert_eq!(mock.live_shader_count(), 1);

    drop(shader);
    assert_eq!(mock.live_shader_count(), 0);
    assert_eq!(mock.commands().last().map(String::as_str), Some("delete_shader"));
}
