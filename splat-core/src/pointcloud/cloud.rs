use std::collections::HashSet;

use crate::error::PointCloudError;
use crate::pointcloud::property::Property;

pub const VERTEX_ELEMENT: &str = "vertex";

/// A group of same-length columns. Property order is the column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    count: usize,
    properties: Vec<Property>,
}

impl Element {
    pub fn new(
        name: impl Into<String>,
        count: usize,
        properties: Vec<Property>,
    ) -> Result<Self, PointCloudError> {
        let name = name.into();
        let mut seen = HashSet::new();

        for property in &properties {
            if !seen.insert(property.name()) {
                return Err(PointCloudError::DuplicateProperty {
                    element: name,
                    property: property.name().to_string(),
                });
            }
            if property.len() != count {
                return Err(PointCloudError::LengthMismatch {
                    element: name,
                    property: property.name().to_string(),
                    expected: count,
                    actual: property.len(),
                });
            }
        }

        Ok(Element {
            name,
            count,
            properties,
        })
    }

    // Callers guarantee every property has `count` values and names are unique
    pub(crate) fn from_parts(name: String, count: usize, properties: Vec<Property>) -> Self {
        debug_assert!(properties.iter().all(|p| p.len() == count));
        Element {
            name,
            count,
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    elements: Vec<Element>,
}

impl PointCloud {
    pub fn new(elements: Vec<Element>) -> Result<Self, PointCloudError> {
        let mut seen = HashSet::new();
        for element in &elements {
            if !seen.insert(element.name()) {
                return Err(PointCloudError::DuplicateElement(element.name().to_string()));
            }
        }
        Ok(PointCloud { elements })
    }

    /// Builds a cloud with a single `vertex` element.
    pub fn from_vertex_properties(
        count: usize,
        properties: Vec<Property>,
    ) -> Result<Self, PointCloudError> {
        let vertex = Element::new(VERTEX_ELEMENT, count, properties)?;
        Ok(PointCloud {
            elements: vec![vertex],
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// The element holding per-point attributes: `vertex`, or the only element
    /// when there is exactly one.
    pub fn vertex(&self) -> Option<&Element> {
        self.vertex_position().map(|i| &self.elements[i])
    }

    pub(crate) fn vertex_position(&self) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.name() == VERTEX_ELEMENT)
            .or(if self.elements.len() == 1 { Some(0) } else { None })
    }

    pub fn point_count(&self) -> usize {
        self.vertex().map_or(0, Element::count)
    }

    pub(crate) fn replace_element(mut self, position: usize, element: Element) -> Self {
        self.elements[position] = element;
        self
    }
}
