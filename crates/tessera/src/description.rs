//! TOML scene descriptions.
//!
//! A description declares a canvas, then entities and connections in the
//! order they are added to the scene:
//!
//! ```toml
//! [canvas]
//! background = "white"
//!
//! [canvas.grid]
//! cols = 4
//! rows = 2
//! cell_size = 25
//!
//! [[entity]]
//! name = "a"
//! kind = "dot"
//! cell = [0, 0]
//! radius = 6
//!
//! [[entity]]
//! name = "b"
//! kind = "dot"
//! cell = [1, 3]
//! radius = 6
//!
//! [[connection]]
//! from = "a"
//! to = "b"
//! ```
//!
//! Positions are tables holding one of `absolute = [x, y]`,
//! `relative = [rx, ry]`, `anchor = "name"` or
//! `along = { entity = "name", t = 0.5 }`. When several are given the first
//! in that list wins. Entities are referred to by `name`; a name must be
//! declared before it is referenced.

use std::str::FromStr;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use tessera_core::{
    anchor::Anchor,
    color::Color,
    error::SceneError,
    geometry::Point,
    stroke::{StrokeCap, StrokeJoin, StrokeStyle},
};

use crate::{
    TesseraError,
    config::AppConfig,
    connection::{Connection, ConnectionStyle},
    entity::{
        BorderStyle, CurveControl, CurveStyle, DotStyle, FillStyle, LineStyle, PolygonStyle,
        TextAlign, TextStyle,
    },
    identifier::EntityId,
    position::Position,
    scene::Scene,
    surface::Surface,
};

/// A parsed scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    canvas: CanvasSpec,

    #[serde(default, rename = "entity")]
    entities: Vec<EntitySpec>,

    #[serde(default, rename = "connection")]
    connections: Vec<ConnectionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CanvasSpec {
    width: Option<u32>,
    height: Option<u32>,
    background: Option<String>,
    grid: Option<GridSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSpec {
    cols: usize,
    rows: usize,
    cell_size: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PositionSpec {
    absolute: Option<[f32; 2]>,
    relative: Option<[f32; 2]>,
    anchor: Option<String>,
    along: Option<AlongSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlongSpec {
    entity: String,
    t: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    Dot,
    Line,
    Curve,
    Polygon,
    Text,
    Border,
    Fill,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntitySpec {
    name: Option<String>,
    kind: KindSpec,
    cell: Option<[usize; 2]>,

    at: Option<PositionSpec>,
    start: Option<PositionSpec>,
    end: Option<PositionSpec>,
    control: Option<PositionSpec>,
    control2: Option<PositionSpec>,
    curvature: Option<f32>,
    vertices: Option<Vec<PositionSpec>>,
    content: Option<String>,

    color: Option<String>,
    fill: Option<String>,
    radius: Option<f32>,
    width: Option<f32>,
    stroke_color: Option<String>,
    stroke_width: Option<f32>,
    dash: Option<String>,
    cap: Option<String>,
    join: Option<String>,
    opacity: Option<f32>,
    font_size: Option<f32>,
    font_family: Option<String>,
    align: Option<String>,
    z_index: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectionSpec {
    from: String,
    to: String,
    start: Option<PositionSpec>,
    end: Option<PositionSpec>,
    color: Option<String>,
    width: Option<f32>,
    dash: Option<String>,
    cap: Option<String>,
    z_index: Option<i32>,
}

impl SceneDescription {
    /// Parses a description from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Description`] if the text is not valid TOML or
    /// does not match the description schema.
    pub fn from_toml(content: &str) -> Result<Self, TesseraError> {
        toml::from_str(content).map_err(|err| TesseraError::Description(err.to_string()))
    }

    /// Number of declared entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of declared connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Builds the described scene.
    ///
    /// Style values the description leaves unset come from `config`, as does
    /// the background when the canvas does not choose one.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Description`] for malformed values, and
    /// [`TesseraError::Scene`] for dimension, index, anchor or reference
    /// failures.
    pub fn build(&self, config: &AppConfig) -> Result<Scene, TesseraError> {
        let mut scene = self.canvas.build()?.with_defaults(config.style().defaults()?);

        let background = match &self.canvas.background {
            Some(color) => Some(parse_color("canvas background", color)?),
            None => config.style().background_color()?,
        };
        scene.set_background(background);

        let mut names: IndexMap<String, EntityId> = IndexMap::new();
        for (index, spec) in self.entities.iter().enumerate() {
            let label = spec.label(index);
            let id = spec.add_to(&mut scene, &names, &label)?;
            debug!(entity = label, id:% = id; "Built entity from description");

            if let Some(name) = &spec.name {
                if names.insert(name.clone(), id).is_some() {
                    return Err(TesseraError::Description(format!(
                        "entity name `{name}` is declared more than once"
                    )));
                }
            }
        }

        for spec in &self.connections {
            let source = lookup(&names, &spec.from)?;
            let target = lookup(&names, &spec.to)?;
            let label = format!("connection {} -> {}", spec.from, spec.to);

            let mut style = ConnectionStyle::new();
            if let Some(color) = &spec.color {
                style = style.color(parse_color(&label, color)?);
            }
            if let Some(width) = spec.width {
                style = style.width(width);
            }
            if let Some(dash) = &spec.dash {
                style = style.dash(parse_value::<StrokeStyle>(&label, dash)?);
            }
            if let Some(cap) = &spec.cap {
                style = style.cap(parse_value::<StrokeCap>(&label, cap)?);
            }
            if let Some(z_index) = spec.z_index {
                style = style.z_index(z_index);
            }

            let start = optional_position(spec.start.as_ref(), &names, &label)?;
            let end = optional_position(spec.end.as_ref(), &names, &label)?;
            scene.add_connection(Connection::new(source, target, start, end, &style))?;
        }

        info!(
            entities = scene.entities().len(),
            connections = scene.connections().len(),
            named = names.len();
            "Built scene from description"
        );
        Ok(scene)
    }
}

impl CanvasSpec {
    fn build(&self) -> Result<Scene, TesseraError> {
        match (&self.grid, self.width, self.height) {
            (Some(grid), None, None) => Ok(Scene::with_grid(grid.cols, grid.rows, grid.cell_size)?),
            (None, Some(width), Some(height)) => Ok(Scene::new(width, height)?),
            (Some(_), _, _) => Err(TesseraError::Description(
                "canvas takes either `grid` or `width` and `height`, not both".to_string(),
            )),
            (None, _, _) => Err(TesseraError::Description(
                "canvas needs `width` and `height`, or a `grid`".to_string(),
            )),
        }
    }
}

impl EntitySpec {
    fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("entity `{name}`"),
            None => format!("entity #{index}"),
        }
    }

    fn add_to(
        &self,
        scene: &mut Scene,
        names: &IndexMap<String, EntityId>,
        label: &str,
    ) -> Result<EntityId, TesseraError> {
        match self.cell {
            Some([row, col]) => self.add_on(&mut scene.cell_surface(row, col)?, names, label),
            None => self.add_on(scene, names, label),
        }
    }

    fn add_on<S: Surface>(
        &self,
        surface: &mut S,
        names: &IndexMap<String, EntityId>,
        label: &str,
    ) -> Result<EntityId, TesseraError> {
        let color = self.color.as_deref().map(|c| parse_color(label, c)).transpose()?;
        let dash = self
            .dash
            .as_deref()
            .map(|d| parse_value::<StrokeStyle>(label, d))
            .transpose()?;
        let cap = self
            .cap
            .as_deref()
            .map(|c| parse_value::<StrokeCap>(label, c))
            .transpose()?;
        let join = self
            .join
            .as_deref()
            .map(|j| parse_value::<StrokeJoin>(label, j))
            .transpose()?;

        let id = match self.kind {
            KindSpec::Dot => {
                let style = DotStyle {
                    radius: self.radius,
                    color,
                    stroke_color: self.parse_stroke_color(label)?,
                    stroke_width: self.stroke_width,
                    z_index: self.z_index,
                };
                let at = optional_position(self.at.as_ref(), names, label)?;
                surface.add_dot(at, &style)?
            }
            KindSpec::Line => {
                let style = LineStyle {
                    color,
                    width: self.width,
                    dash,
                    cap,
                    z_index: self.z_index,
                };
                let start = required_position(self.start.as_ref(), "start", names, label)?;
                let end = required_position(self.end.as_ref(), "end", names, label)?;
                surface.add_line(start, end, &style)?
            }
            KindSpec::Curve => {
                let style = CurveStyle {
                    color,
                    width: self.width,
                    dash,
                    cap,
                    z_index: self.z_index,
                };
                let start = required_position(self.start.as_ref(), "start", names, label)?;
                let end = required_position(self.end.as_ref(), "end", names, label)?;
                let control = self.curve_control(names, label)?;
                surface.add_curve(start, end, control, &style)?
            }
            KindSpec::Polygon => {
                let fill = match (&self.fill, color) {
                    (Some(fill), _) => Some(parse_color(label, fill)?),
                    (None, color) => color,
                };
                let style = PolygonStyle {
                    fill,
                    stroke_color: self.parse_stroke_color(label)?,
                    stroke_width: self.stroke_width,
                    join,
                    z_index: self.z_index,
                };
                let specs = self.vertices.as_deref().ok_or_else(|| missing(label, "vertices"))?;
                let vertices = specs
                    .iter()
                    .map(|spec| spec.to_position(names, label))
                    .collect::<Result<Vec<_>, _>>()?;
                surface.add_polygon(vertices, &style)?
            }
            KindSpec::Text => {
                let align = self
                    .align
                    .as_deref()
                    .map(|a| parse_value::<TextAlign>(label, a))
                    .transpose()?;
                let style = TextStyle {
                    font_size: self.font_size,
                    font_family: self.font_family.clone(),
                    color,
                    align,
                    z_index: self.z_index,
                };
                let content = self.content.clone().ok_or_else(|| missing(label, "content"))?;
                let at = optional_position(self.at.as_ref(), names, label)?;
                surface.add_text(content, at, &style)?
            }
            KindSpec::Border => {
                let style = BorderStyle {
                    color,
                    width: self.width,
                    dash,
                    join,
                    z_index: self.z_index,
                };
                surface.add_border(&style)?
            }
            KindSpec::Fill => {
                let style = FillStyle {
                    color,
                    opacity: self.opacity,
                    z_index: self.z_index,
                };
                surface.add_fill(&style)
            }
        };
        Ok(id)
    }

    fn parse_stroke_color(&self, label: &str) -> Result<Option<Color>, TesseraError> {
        self.stroke_color
            .as_deref()
            .map(|c| parse_color(label, c))
            .transpose()
    }

    fn curve_control(
        &self,
        names: &IndexMap<String, EntityId>,
        label: &str,
    ) -> Result<CurveControl, TesseraError> {
        match (&self.control, &self.control2, self.curvature) {
            (Some(c1), Some(c2), _) => Ok(CurveControl::Cubic(
                c1.to_position(names, label)?,
                c2.to_position(names, label)?,
            )),
            (Some(c), None, _) => Ok(CurveControl::Quadratic(c.to_position(names, label)?)),
            (None, Some(_), _) => Err(TesseraError::Description(format!(
                "{label}: `control2` requires `control`"
            ))),
            (None, None, Some(k)) => Ok(CurveControl::Curvature(k)),
            (None, None, None) => Ok(CurveControl::default()),
        }
    }
}

impl PositionSpec {
    fn to_position(
        &self,
        names: &IndexMap<String, EntityId>,
        label: &str,
    ) -> Result<Position, TesseraError> {
        if let Some([x, y]) = self.absolute {
            return Ok(Position::Absolute(Point::new(x, y)));
        }
        if let Some([rx, ry]) = self.relative {
            return Ok(Position::Relative(rx, ry));
        }
        if let Some(anchor) = &self.anchor {
            return Ok(Position::Anchor(Anchor::from_str(anchor)?));
        }
        if let Some(along) = &self.along {
            return Ok(Position::along(lookup(names, &along.entity)?, along.t));
        }
        Err(TesseraError::Description(format!(
            "{label}: a position needs one of `absolute`, `relative`, `anchor` or `along`"
        )))
    }
}

fn optional_position(
    spec: Option<&PositionSpec>,
    names: &IndexMap<String, EntityId>,
    label: &str,
) -> Result<Position, TesseraError> {
    spec.map_or(Ok(Position::default()), |spec| spec.to_position(names, label))
}

fn required_position(
    spec: Option<&PositionSpec>,
    field: &str,
    names: &IndexMap<String, EntityId>,
    label: &str,
) -> Result<Position, TesseraError> {
    spec.ok_or_else(|| missing(label, field))?
        .to_position(names, label)
}

fn lookup(names: &IndexMap<String, EntityId>, name: &str) -> Result<EntityId, SceneError> {
    names.get(name).copied().ok_or_else(|| {
        SceneError::invalid_reference(format!("no entity named `{name}` has been declared"))
    })
}

fn missing(label: &str, field: &str) -> TesseraError {
    TesseraError::Description(format!("{label} is missing `{field}`"))
}

fn parse_color(label: &str, value: &str) -> Result<Color, TesseraError> {
    Color::new(value).map_err(|err| TesseraError::Description(format!("{label}: {err}")))
}

fn parse_value<T>(label: &str, value: &str) -> Result<T, TesseraError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|err| TesseraError::Description(format!("{label}: {err}")))
}
