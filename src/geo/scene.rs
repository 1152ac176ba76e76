//! Retained drawing surface for the map.
//!
//! The renderer draws into a [`DrawSurface`]; the view keeps a
//! [`SceneBuffer`] that the canvas replays onto the egui painter each frame.

use eframe::egui::{
    self, epaint::Mesh, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2,
};

/// Minimal drawing operations the map renderer needs.
pub trait DrawSurface {
    /// Removes everything drawn so far.
    fn clear(&mut self);

    /// Fills a polygon given by its exterior ring and holes.
    fn fill_polygon(&mut self, exterior: Vec<Pos2>, holes: Vec<Vec<Pos2>>, color: Color32);

    /// Fills a circle, optionally labeled.
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, label: Option<&str>);
}

/// One retained drawing operation, in container-local coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Polygon {
        exterior: Vec<Pos2>,
        color: Color32,
        /// Triangulated fill including holes; empty if triangulation failed
        mesh: Mesh,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
        label: Option<String>,
    },
}

/// Scene buffer owned by the map view.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    commands: Vec<DrawCommand>,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Paints the scene into `rect`, whose top-left is the local origin.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let offset = rect.min.to_vec2();
        let painter = painter.with_clip_rect(rect);
        let label_color = Color32::from_rgb(230, 230, 240);

        for command in self.commands() {
            match command {
                DrawCommand::Polygon {
                    exterior,
                    color,
                    mesh,
                } => {
                    if mesh.is_empty() {
                        let points = exterior.iter().map(|p| *p + offset).collect();
                        painter.add(Shape::convex_polygon(points, *color, Stroke::NONE));
                    } else {
                        let mut mesh = mesh.clone();
                        mesh.translate(offset);
                        painter.add(Shape::mesh(mesh));
                    }
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    label,
                } => {
                    let pos = *center + offset;
                    painter.circle_filled(pos, *radius, *color);

                    if let Some(text) = label {
                        painter.text(
                            pos + Vec2::new(radius + 3.0, -2.0),
                            Align2::LEFT_CENTER,
                            text,
                            FontId::proportional(11.0),
                            label_color,
                        );
                    }
                }
            }
        }
    }
}

impl DrawSurface for SceneBuffer {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_polygon(&mut self, exterior: Vec<Pos2>, holes: Vec<Vec<Pos2>>, color: Color32) {
        let mesh = triangulate(&exterior, &holes, color);
        self.commands.push(DrawCommand::Polygon {
            exterior,
            color,
            mesh,
        });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, label: Option<&str>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            label: label.map(str::to_string),
        });
    }
}

/// Triangulates a (possibly concave) polygon with holes into a colored mesh.
///
/// egui only fills convex paths, so land outlines go through earcut.
fn triangulate(exterior: &[Pos2], holes: &[Vec<Pos2>], color: Color32) -> Mesh {
    let mut flat: Vec<f64> = Vec::with_capacity(
        (exterior.len() + holes.iter().map(Vec::len).sum::<usize>()) * 2,
    );
    let mut hole_indices = Vec::with_capacity(holes.len());

    for p in exterior {
        flat.extend([f64::from(p.x), f64::from(p.y)]);
    }
    for hole in holes {
        hole_indices.push(flat.len() / 2);
        for p in hole {
            flat.extend([f64::from(p.x), f64::from(p.y)]);
        }
    }

    let mut mesh = Mesh::default();
    let indices = match earcutr::earcut(&flat, &hole_indices, 2) {
        Ok(indices) => indices,
        Err(e) => {
            log::debug!("Polygon triangulation failed: {:?}", e);
            return mesh;
        }
    };

    for pair in flat.chunks_exact(2) {
        mesh.colored_vertex(egui::pos2(pair[0] as f32, pair[1] as f32), color);
    }
    for tri in indices.chunks_exact(3) {
        mesh.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }

    mesh
}
