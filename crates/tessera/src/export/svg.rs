//! SVG document assembly.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use tessera_core::error::SceneError;

use crate::{
    TesseraError,
    export::SvgNode,
    scene::{Scene, SceneItem},
};

/// The phases of a render, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPhase {
    Collecting,
    Sorting,
    Emitting,
    Done,
}

impl RenderPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Sorting => "sorting",
            Self::Emitting => "emitting",
            Self::Done => "done",
        }
    }
}

/// SVG nodes tagged with the z-index they render at.
///
/// Nodes pushed at the same z-index are emitted in push order.
///
/// ```
/// # use tessera::export::svg::ZOrderedOutput;
/// # use svg::node::element::{Circle, Rectangle};
/// let mut output = ZOrderedOutput::new();
/// output.push(5, Box::new(Circle::new()));
/// output.push(-5, Box::new(Rectangle::new()));
///
/// let nodes = output.into_sorted();
/// assert!(nodes[0].to_string().starts_with("<rect"));
/// ```
#[derive(Debug, Default)]
pub struct ZOrderedOutput {
    items: Vec<(i32, SvgNode)>,
}

impl ZOrderedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, z_index: i32, node: SvgNode) {
        self.items.push((z_index, node));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the output, returning the nodes by ascending z-index.
    pub fn into_sorted(mut self) -> Vec<SvgNode> {
        // `sort_by_key` is stable.
        self.items.sort_by_key(|(z_index, _)| *z_index);
        self.items.into_iter().map(|(_, node)| node).collect()
    }
}

/// Renders `scene` to a complete document.
pub(crate) fn render_document(scene: &Scene) -> Result<Document, SceneError> {
    info!(
        entities = scene.entities().len(),
        connections = scene.connections().len();
        "Rendering scene"
    );

    let items = scene.items();
    debug!(phase = RenderPhase::Collecting.name(), items = items.len(); "Render phase");
    let mut output = ZOrderedOutput::with_capacity(items.len());
    for item in items {
        match *item {
            SceneItem::Entity(id) => {
                let entity = scene.entity(id)?;
                output.push(entity.z_index(), entity.render_to_svg());
            }
            SceneItem::Connection(id) => {
                let connection = scene.connection(id)?;
                output.push(connection.z_index(), connection.render_to_svg(scene)?);
            }
        }
    }

    debug!(phase = RenderPhase::Sorting.name(), items = output.len(); "Render phase");
    let nodes = output.into_sorted();

    debug!(phase = RenderPhase::Emitting.name(), items = nodes.len(); "Render phase");
    let (width, height) = (scene.width(), scene.height());
    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height));

    if let Some(background) = scene.background() {
        let rect = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", background.to_string())
            .set("fill-opacity", background.alpha());
        document = document.add(rect);
    }

    for node in nodes {
        document = document.add(node);
    }

    debug!(phase = RenderPhase::Done.name(); "Render phase");
    Ok(document)
}

/// Writes a rendered document to `path`.
pub(crate) fn write_document(path: &Path, document: &str) -> Result<(), TesseraError> {
    let file_name = path.display().to_string();
    info!(file_name; "Creating SVG file");

    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            error!(file_name, err:err; "Failed to create SVG file");
            return Err(TesseraError::Io(err));
        }
    };

    if let Err(err) = file.write_all(document.as_bytes()).and_then(|()| file.flush()) {
        error!(file_name, err:err; "Failed to write SVG content");
        return Err(TesseraError::Io(err));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::{Circle, Line};

    #[test]
    fn test_sort_is_stable_within_z_index() {
        let mut output = ZOrderedOutput::new();
        output.push(0, Box::new(Circle::new().set("id", "first")));
        output.push(0, Box::new(Circle::new().set("id", "second")));
        output.push(-1, Box::new(Line::new()));

        let nodes: Vec<String> = output.into_sorted().iter().map(|n| n.to_string()).collect();
        assert!(nodes[0].starts_with("<line"));
        assert!(nodes[1].contains("first"));
        assert!(nodes[2].contains("second"));
    }

    #[test]
    fn test_empty_output() {
        let output = ZOrderedOutput::new();
        assert!(output.is_empty());
        assert!(output.into_sorted().is_empty());
    }

    #[test]
    fn test_document_root_and_background() {
        use tessera_core::color::Color;

        let scene = Scene::new(40, 30)
            .unwrap()
            .with_background(Color::new("white").unwrap());
        let svg = render_document(&scene).unwrap().to_string();

        assert!(svg.contains("width=\"40\""));
        assert!(svg.contains("height=\"30\""));
        assert!(svg.contains("viewBox=\"0 0 40 30\""));
        assert!(svg.contains("fill=\"white\""));
    }

    #[test]
    fn test_phases_are_ordered() {
        assert!(RenderPhase::Collecting < RenderPhase::Sorting);
        assert!(RenderPhase::Emitting < RenderPhase::Done);
        assert_eq!(RenderPhase::Sorting.name(), "sorting");
    }
}
