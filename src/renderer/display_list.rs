//! CPU-side scene
//!
//! Holds the entities the match creates and turns the visible ones into a
//! triangle list each frame.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::scene::{EntityId, LineStyle, Scene, SpriteAsset, TextStyle};

#[derive(Debug, Clone)]
enum NodeKind {
    Sprite { size: Vec2 },
    Text { content: String, style: TextStyle },
    Lines { segments: Vec<(Vec2, Vec2)>, style: LineStyle },
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Anchor position (sprite center, text top center, line offset)
    pos: Vec2,
    visible: bool,
}

/// Retained list of scene entities
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    nodes: Vec<Node>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_visible(&self, id: EntityId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.nodes.get(id).map(|n| n.pos)
    }

    /// Content of a text entity
    pub fn text(&self, id: EntityId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Text { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }

    /// Triangles for every visible entity, in creation order
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for node in self.nodes.iter().filter(|n| n.visible) {
            match &node.kind {
                NodeKind::Sprite { size } => {
                    vertices.extend(shapes::centered_rect(node.pos, *size, colors::FOREGROUND));
                }
                NodeKind::Text { content, style } => {
                    vertices.extend(shapes::text(content, node.pos, style.size, style.color));
                }
                NodeKind::Lines { segments, style } => {
                    for (from, to) in segments {
                        vertices.extend(shapes::line(
                            *from + node.pos,
                            *to + node.pos,
                            style.width,
                            style.color,
                        ));
                    }
                }
            }
        }
        vertices
    }

    fn push(&mut self, kind: NodeKind, pos: Vec2) -> EntityId {
        self.nodes.push(Node {
            kind,
            pos,
            visible: true,
        });
        self.nodes.len() - 1
    }
}

impl Scene for DisplayList {
    fn add_sprite(&mut self, asset: &SpriteAsset, pos: Vec2) -> EntityId {
        log::debug!("Adding sprite '{}' at {:?}", asset.name, pos);
        self.push(NodeKind::Sprite { size: asset.size }, pos)
    }

    fn add_text(&mut self, pos: Vec2, content: &str, style: &TextStyle) -> EntityId {
        self.push(
            NodeKind::Text {
                content: content.to_string(),
                style: *style,
            },
            pos,
        )
    }

    fn add_lines(&mut self, segments: &[(Vec2, Vec2)], style: &LineStyle) -> EntityId {
        self.push(
            NodeKind::Lines {
                segments: segments.to_vec(),
                style: *style,
            },
            Vec2::ZERO,
        )
    }

    fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.pos = pos;
        }
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    fn set_text(&mut self, id: EntityId, content: &str) {
        if let Some(Node {
            kind: NodeKind::Text { content: current, .. },
            ..
        }) = self.nodes.get_mut(id)
        {
            if current != content {
                *current = content.to_string();
            }
        }
    }
}
