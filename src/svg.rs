use crate::projection::ProjectedPoint;

const SIZE: f64 = 500.0;

pub struct SVG {
    min: ProjectedPoint,
    max: ProjectedPoint,
    padding: f64,
    elements: Vec<String>,
}

impl SVG {
    /// Viewport fitted around `points`.
    pub fn init(points: &[ProjectedPoint]) -> Self {
        let first = points.first().copied().unwrap_or(ProjectedPoint { x: 0.0, y: 0.0 });
        let (min, max) = points.iter().fold((first, first), |(min, max), p| {
            (
                ProjectedPoint {
                    x: min.x.min(p.x),
                    y: min.y.min(p.y),
                },
                ProjectedPoint {
                    x: max.x.max(p.x),
                    y: max.y.max(p.y),
                },
            )
        });
        Self {
            min,
            max,
            padding: 0.1,
            elements: Vec::new(),
        }
    }
    pub fn add_polygon(&mut self, points: &[ProjectedPoint], color: &str) {
        let s = points
            .iter()
            .map(|p| {
                let (x, y) = self.transform(p.x, p.y);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<String>>()
            .join(" ");
        let p = format!(
            r#"  <polygon points="{}" fill="{}" fill-opacity="0.35" stroke="{}" stroke-opacity="0.8" stroke-width="2"/>"#,
            s, color, color
        );
        self.elements.push(p);
    }
    pub fn add_markers(&mut self, points: &[ProjectedPoint]) {
        for (i, point) in points.iter().enumerate() {
            let (x, y) = self.transform(point.x, point.y);
            self.elements.push(format!(
                r#"  <circle cx="{:.2}" cy="{:.2}" r="4" fill="black"><title>{}</title></circle>"#,
                x,
                y,
                i + 1
            ));
        }
    }
    pub fn render(&self) -> String {
        let mut svg = format!(
            r#"<svg width="{0}" height="{0}" xmlns="http://www.w3.org/2000/svg">"#,
            SIZE
        );
        svg.push('\n');
        for e in &self.elements {
            svg.push_str(e);
            svg.push('\n');
        }
        svg.push_str("</svg>");
        svg
    }
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    pub fn scale(&self) -> f64 {
        let padded_width = self.width() * (1.0 + 2.0 * self.padding);
        let padded_height = self.height() * (1.0 + 2.0 * self.padding);
        let extent = padded_width.max(padded_height);
        if extent > 0.0 { SIZE / extent } else { 1.0 }
    }
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let svg_x = (x - self.min.x + self.width() * self.padding) * self.scale();
        let svg_y = SIZE - (y - self.min.y + self.height() * self.padding) * self.scale();
        (svg_x, svg_y)
    }
}
