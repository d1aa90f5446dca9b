//! Unit tests for GeometryBufferSet and VertexLayout

use std::rc::Rc;

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::sample::{SAMPLE_INDICES, SAMPLE_VERTICES};

fn mock_device() -> (Rc<MockGraphicsDevice>, Rc<dyn GraphicsDevice>) {
    let mock = Rc::new(MockGraphicsDevice::new());
    let device: Rc<dyn GraphicsDevice> = mock.clone();
    (mock, device)
}

fn upload_sample(device: &Rc<dyn GraphicsDevice>) -> Result<GeometryBufferSet> {
    GeometryBufferSet::upload(
        device,
        &SAMPLE_VERTICES,
        &SAMPLE_INDICES,
        &VertexLayout::position_only(),
        BufferUsage::StaticDraw,
    )
}

// ============================================================================
// VertexLayout
// ============================================================================

#[test]
fn test_position_only_layout() {
    let layout = VertexLayout::position_only();
    assert_eq!(layout.stride, 12);
    assert_eq!(layout.attributes.len(), 1);
    assert_eq!(layout.attributes[0].location, 0);
    assert_eq!(layout.attributes[0].offset, 0);
    assert_eq!(layout.attributes[0].format, BufferFormat::R32G32B32_SFLOAT);
    assert!(!layout.attributes[0].normalized);
    assert_eq!(VertexLayout::default(), layout);
}

#[test]
fn test_layout_vertex_count() {
    let layout = VertexLayout::position_only();
    assert_eq!(layout.vertex_count(60), 5);
    assert_eq!(layout.vertex_count(64), 5);
    assert_eq!(layout.vertex_count(0), 0);
}

#[test]
fn test_layout_rejects_zero_stride() {
    let layout = VertexLayout { stride: 0, ..VertexLayout::position_only() };
    assert!(matches!(layout.validate(), Err(Error::InvalidResource(_))));
}

#[test]
fn test_layout_rejects_attribute_past_stride() {
    let mut layout = VertexLayout::position_only();
    layout.attributes[0].offset = 4;
    let err = layout.validate().unwrap_err();
    assert!(err.to_string().contains("past the stride"));
}

#[test]
fn test_layout_rejects_no_attributes() {
    let layout = VertexLayout { stride: 12, attributes: Vec::new() };
    assert!(layout.validate().is_err());
}

#[test]
fn test_interleaved_layout_is_valid() {
    let layout = VertexLayout {
        stride: 24,
        attributes: vec![
            VertexAttribute { location: 0, format: BufferFormat::R32G32B32_SFLOAT, normalized: false, offset: 0 },
            VertexAttribute { location: 1, format: BufferFormat::R32G32B32_SFLOAT, normalized: false, offset: 12 },
        ],
    };
    assert!(layout.validate().is_ok());
}

// ============================================================================
// validate_indices
// ============================================================================

#[test]
fn test_validate_indices_in_range() {
    assert!(validate_indices(&SAMPLE_INDICES, 5).is_ok());
    assert!(validate_indices(&[], 0).is_ok());
}

#[test]
fn test_validate_indices_reports_first_and_count() {
    let err = validate_indices(&[0, 1, 3, 1, 2, 3, 0, 4, 1], 4).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::InvalidResource(_)));
    assert!(message.contains("first: 4"), "{}", message);
    assert!(message.contains("1 index value(s)"), "{}", message);

    let err = validate_indices(&[7, 0, 9], 3).unwrap_err();
    assert!(err.to_string().contains("2 index value(s)"));
    assert!(err.to_string().contains("first: 7"));
}

// ============================================================================
// Upload
// ============================================================================

#[test]
fn test_upload_sample_sizes() {
    let (_mock, device) = mock_device();
    let geometry = upload_sample(&device).unwrap();

    assert_eq!(geometry.vertex_buffer_size(), 60);
    assert_eq!(geometry.index_buffer_size(), 36);
    assert_eq!(geometry.vertex_count(), 5);
    assert_eq!(geometry.index_count(), 9);
    assert_eq!(geometry.index_type(), IndexType::U32);
}

#[test]
fn test_upload_stores_bytes_and_usage() {
    let (mock, device) = mock_device();
    let geometry = upload_sample(&device).unwrap();

    let vertices = mock.buffer(geometry.vertex_buffer()).unwrap();
    assert_eq!(vertices.data, bytemuck::cast_slice::<f32, u8>(&SAMPLE_VERTICES));
    assert_eq!(vertices.usage, Some(BufferUsage::StaticDraw));

    let indices = mock.buffer(geometry.index_buffer()).unwrap();
    assert_eq!(indices.data, bytemuck::cast_slice::<u32, u8>(&SAMPLE_INDICES));
}

#[test]
fn test_upload_records_layout_in_vertex_array() {
    let (mock, device) = mock_device();
    let geometry = upload_sample(&device).unwrap();

    let vao = mock.vertex_array(geometry.vertex_array()).unwrap();
    assert_eq!(vao.element_buffer, Some(geometry.index_buffer()));
    assert_eq!(vao.enabled, vec![0]);

    let binding = vao.attributes.get(&0).unwrap();
    assert_eq!(binding.stride, 12);
    assert_eq!(binding.buffer, geometry.vertex_buffer());
    assert_eq!(binding.attribute.offset, 0);
}

#[test]
fn test_upload_binds_vertex_array_first_and_unbinds_after() {
    let (mock, device) = mock_device();
    let _geometry = upload_sample(&device).unwrap();

    let commands = mock.commands();
    let first_vao_bind = commands.iter().position(|c| c == "bind_vertex_array").unwrap();
    let first_buffer_bind = commands.iter().position(|c| c.starts_with("bind_buffer")).unwrap();
    assert!(first_vao_bind < first_buffer_bind);

    assert_eq!(mock.bound_vertex_array(), None);
    assert_eq!(mock.bound_array_buffer(), None);
    assert!(mock.errors().is_empty(), "{:?}", mock.errors());
}

#[test]
fn test_upload_dynamic_usage() {
    let (mock, device) = mock_device();
    let geometry = GeometryBufferSet::upload(
        &device,
        &SAMPLE_VERTICES,
        &SAMPLE_INDICES,
        &VertexLayout::position_only(),
        BufferUsage::DynamicDraw,
    )
    .unwrap();

    assert_eq!(mock.buffer(geometry.vertex_buffer()).unwrap().usage, Some(BufferUsage::DynamicDraw));
}

#[test]
fn test_upload_rejects_empty_vertices() {
    let (mock, device) = mock_device();
    let result = GeometryBufferSet::upload(
        &device,
        &[],
        &SAMPLE_INDICES,
        &VertexLayout::position_only(),
        BufferUsage::StaticDraw,
    );

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(mock.commands().is_empty());
}

#[test]
fn test_draw_index_count_limits() {
    assert_eq!(draw_index_count(9).unwrap(), 9);
    assert_eq!(draw_index_count(u32::MAX as usize).unwrap(), u32::MAX);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_draw_index_count_rejects_overflow() {
    let result = draw_index_count(u32::MAX as usize + 1);
    match result {
        Err(Error::InvalidResource(msg)) => assert!(msg.contains("4294967296 indices")),
        other => panic!("Expected InvalidResource, got {:?}", other),
    }
}

#[test]
fn test_upload_rejects_empty_indices() {
    let (_mock, device) = mock_device();
    let result = GeometryBufferSet::upload(
        &device,
        &SAMPLE_VERTICES,
        &[],
        &VertexLayout::position_only(),
        BufferUsage::StaticDraw,
    );
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_upload_accepts_out_of_range_indices() {
    let (_mock, device) = mock_device();
    let geometry = GeometryBufferSet::upload(
        &device,
        &SAMPLE_VERTICES[..12],
        &SAMPLE_INDICES,
        &VertexLayout::position_only(),
        BufferUsage::StaticDraw,
    )
    .unwrap();

    assert_eq!(geometry.vertex_count(), 4);
    assert_eq!(geometry.index_count(), 9);
}

#[test]
fn test_upload_allocation_failure() {
    let (mock, device) = mock_device();
    mock.set_fail_allocations(true);

    let result = upload_sample(&device);
    assert!(matches!(result, Err(Error::BackendError(_))));
    assert_eq!(mock.live_buffer_count(), 0);
    assert_eq!(mock.live_vertex_array_count(), 0);
}

#[test]
fn test_drop_releases_all_objects() {
    let (mock, device) = mock_device();
    let geometry = upload_sample(&device).unwrap();
    assert_eq!(mock.live_buffer_count(), 2);
    assert_eq!(mock.live_vertex_array_count(), 1);

    drop(geometry);
    assert_eq!(mock.live_buffer_count(), 0);
    assert_eq!(mock.live_vertex_array_count(), 0);
    assert!(mock.errors().is_empty(), "{:?}", mock.errors());
}
