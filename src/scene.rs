//! Host handoff contract.
//!
//! The engine never touches host state. It produces a flat element list
//! and hands it across this seam; the host creates one renderable object
//! per element, applies the glow color as a constant hue, and keyframes
//! the timeline as emission intensity.

use serde::Serialize;

use crate::intensity::IntensityTimeline;

/// One renderable LED element: where it sits, its glow color, and its
/// brightness curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedElement {
    /// Cell center, z always 0.
    pub position: [f32; 3],
    /// RGBA glow tuple, constant for the element's lifetime.
    pub color: [f32; 4],
    /// Keyframed emission intensity.
    pub timeline: IntensityTimeline,
}

/// Sink consuming the engine's output list.
pub trait SceneSink {
    fn accept(&mut self, elements: &[LedElement]);
}

/// In-memory sink for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryScene {
    elements: Vec<LedElement>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[LedElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl SceneSink for MemoryScene {
    fn accept(&mut self, elements: &[LedElement]) {
        self.elements.extend_from_slice(elements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_element(x: f32) -> LedElement {
        LedElement {
            position: [x, 0.0, 0.0],
            color: [1.0, 0.0, 0.0, 1.0],
            timeline: IntensityTimeline::default(),
        }
    }

    #[test]
    fn test_memory_scene_collects_elements() {
        let mut scene = MemoryScene::new();
        assert!(scene.is_empty());

        scene.accept(&[make_test_element(0.0), make_test_element(2.0)]);
        scene.accept(&[make_test_element(4.0)]);

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.elements()[2].position[0], 4.0);
    }

    #[test]
    fn test_element_serializes() {
        let json = serde_json::to_string(&make_test_element(1.0)).unwrap();
        assert!(json.contains("\"position\":[1.0,0.0,0.0]"));
    }
}
