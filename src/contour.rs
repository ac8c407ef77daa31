//! Polygons with holes, represented as collections of nested contours.

use kurbo::{BezPath, Rect};

use crate::geom::{signed_area, Point};

/// An index for a [`Contour`] within a [`ContourPolygon`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ContourIdx(pub usize);

/// A simple, closed polyline.
///
/// The last point is implicitly connected to the first, so the first point
/// is not repeated at the end.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    /// The vertices, in order.
    pub points: Vec<Point>,

    /// The contours directly nested inside this one.
    ///
    /// A hole of an outer contour is an inner contour. An "island" inside
    /// that hole is in turn listed as a hole of the hole.
    pub holes: Vec<ContourIdx>,

    /// Is this contour outside every other contour of its polygon?
    pub external: bool,
}

impl Default for Contour {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            holes: Vec::new(),
            external: true,
        }
    }
}

impl Contour {
    /// Creates an external contour with the given vertices.
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Contour {
            points: points.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// The signed area enclosed by this contour.
    ///
    /// This is positive for counter-clockwise contours.
    pub fn signed_area(&self) -> f64 {
        let Some(&first) = self.points.first() else {
            return 0.0;
        };
        // Fan triangulation around the first vertex.
        self.points
            .windows(2)
            .skip(1)
            .map(|w| signed_area(first, w[0], w[1]))
            .sum::<f64>()
            / 2.0
    }

    /// Do the vertices go around counter-clockwise?
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverses the orientation.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Iterates over the edges of this contour, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// A polygon with holes, possibly with several components.
///
/// Following Martínez et al., contours at even depth of nesting (the outer
/// boundaries, and islands inside holes) wind counter-clockwise, and
/// contours at odd depth (the holes) wind clockwise. This is what the
/// boolean operations produce, and what they expect as input when you want
/// the trivial cases (like disjoint inputs) to come back well-oriented.
/// The sweep itself only looks at the edges, so the orientation of the input
/// doesn't affect non-trivial results.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContourPolygon {
    /// All the contours, outer boundaries and holes alike.
    pub contours: Vec<Contour>,
}

impl ContourPolygon {
    /// Creates an empty polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon from a single simple closed polyline.
    ///
    /// The orientation of the input doesn't matter: the contour will be
    /// stored counter-clockwise.
    pub fn from_simple(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        let mut contour = Contour::new(points);
        if contour.signed_area() < 0.0 {
            contour.reverse();
        }
        ContourPolygon {
            contours: vec![contour],
        }
    }

    /// Creates a polygon from an outer boundary and some holes.
    ///
    /// The holes must lie inside the boundary and must not overlap one another.
    /// Orientations are fixed up as needed.
    pub fn with_holes(
        outer: impl IntoIterator<Item = impl Into<Point>>,
        holes: impl IntoIterator<Item = impl IntoIterator<Item = impl Into<Point>>>,
    ) -> Self {
        let mut ret = Self::from_simple(outer);
        for hole in holes {
            let mut contour = Contour::new(hole);
            contour.external = false;
            if contour.signed_area() > 0.0 {
                contour.reverse();
            }
            let idx = ret.push(contour);
            ret.contours[0].holes.push(idx);
        }
        ret
    }

    /// Creates a polygon from several simple polylines that don't overlap
    /// or contain one another.
    pub fn from_disjoint(
        polylines: impl IntoIterator<Item = impl IntoIterator<Item = impl Into<Point>>>,
    ) -> Self {
        let mut ret = ContourPolygon::new();
        for p in polylines {
            ret.join(&ContourPolygon::from_simple(p));
        }
        ret
    }

    /// Adds a contour, returning its index.
    pub fn push(&mut self, contour: Contour) -> ContourIdx {
        self.contours.push(contour);
        ContourIdx(self.contours.len() - 1)
    }

    /// The number of contours.
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// The total number of vertices in all contours.
    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(Contour::vertex_count).sum()
    }

    /// Is there nothing here?
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Iterates over all of the contours, with their indices.
    pub fn contours(&self) -> impl Iterator<Item = (ContourIdx, &Contour)> + '_ {
        self.contours
            .iter()
            .enumerate()
            .map(|(i, c)| (ContourIdx(i), c))
    }

    /// Iterates over all the vertices of all the contours.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.contours.iter().flat_map(|c| c.points.iter().copied())
    }

    /// The smallest axis-aligned rectangle containing all the vertices, or
    /// `None` if there are no vertices.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut points = self.points();
        let first = points.next()?;
        let rect = Rect::from_points(first.to_kurbo(), first.to_kurbo());
        Some(points.fold(rect, |r, p| r.union_pt(p.to_kurbo())))
    }

    /// The enclosed area.
    ///
    /// Holes wind clockwise, so they contribute negatively.
    pub fn area(&self) -> f64 {
        self.contours.iter().map(Contour::signed_area).sum()
    }

    /// Appends all of `other`'s contours to this one.
    ///
    /// The hole indices of the appended contours are shifted so that they
    /// still point at the right contours.
    pub fn join(&mut self, other: &ContourPolygon) {
        let offset = self.contours.len();
        self.contours.extend(other.contours.iter().map(|c| Contour {
            points: c.points.clone(),
            holes: c.holes.iter().map(|h| ContourIdx(h.0 + offset)).collect(),
            external: c.external,
        }));
    }

    /// Returns all of the contour indices, grouped by containment.
    ///
    /// For each of the inner vecs, the first element is an external contour.
    /// All of the other contours in that inner vec lie inside it.
    pub fn grouped(&self) -> Vec<Vec<ContourIdx>> {
        let mut ret = Vec::new();
        for (idx, contour) in self.contours() {
            if !contour.external {
                continue;
            }
            let mut group = Vec::new();
            let mut stack = vec![idx];
            while let Some(idx) = stack.pop() {
                group.push(idx);
                // Reversed, so that they come out of the stack in order.
                stack.extend(self[idx].holes.iter().rev().copied());
            }
            ret.push(group);
        }
        ret
    }

    /// Converts to a `kurbo` path, with one closed subpath per contour.
    pub fn to_bez_path(&self) -> BezPath {
        let mut ret = BezPath::new();
        for contour in &self.contours {
            let Some((first, rest)) = contour.points.split_first() else {
                continue;
            };
            ret.move_to(first.to_kurbo());
            for p in rest {
                ret.line_to(p.to_kurbo());
            }
            ret.close_path();
        }
        ret
    }

    /// Converts a `kurbo` path to a polygon, one contour per subpath.
    ///
    /// Curves are flattened to within `tolerance`. Every subpath is treated
    /// as closed, and no attempt is made to figure out which subpaths are
    /// holes: the boolean operations don't need to know.
    pub fn from_bez_path(path: &BezPath, tolerance: f64) -> Self {
        let mut ret = ContourPolygon::new();
        let mut current: Vec<Point> = Vec::new();
        let mut finish = |points: &mut Vec<Point>| {
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() >= 3 {
                ret.push(Contour::new(points.drain(..)));
            }
            points.clear();
        };

        kurbo::flatten(path, tolerance, |el| match el {
            kurbo::PathEl::MoveTo(p) => {
                finish(&mut current);
                current.push(p.into());
            }
            kurbo::PathEl::LineTo(p) => current.push(p.into()),
            kurbo::PathEl::ClosePath => finish(&mut current),
            // `flatten` only emits lines.
            kurbo::PathEl::QuadTo(..) | kurbo::PathEl::CurveTo(..) => {}
        });
        finish(&mut current);
        ret
    }

    /// Renders this polygon as TikZ drawing commands, one per contour.
    pub fn tikz(&self) -> String {
        let mut ret = String::new();
        for contour in &self.contours {
            ret.push_str("\\draw ");
            for p in &contour.points {
                ret.push_str(&format!("({:.2}, {:.2}) -- ", p.x, p.y));
            }
            ret.push_str("cycle;\n");
        }
        ret
    }

    /// Renders this polygon as a GeoJSON feature with a `MultiPolygon` geometry.
    ///
    /// Each external contour (and each island inside a hole) becomes one
    /// polygon, with the contours directly inside it as its holes. GeoJSON
    /// rings repeat their first point at the end.
    pub fn to_geojson(&self) -> serde_json::Value {
        let ring = |c: &Contour| {
            let mut ring: Vec<[f64; 2]> = c.points.iter().map(|p| [p.x, p.y]).collect();
            if let Some(&first) = ring.first() {
                ring.push(first);
            }
            ring
        };

        let mut shells: Vec<ContourIdx> = self
            .contours()
            .filter(|(_, c)| c.external)
            .map(|(idx, _)| idx)
            .collect();
        let mut polygons = Vec::new();
        let mut i = 0;
        while let Some(&idx) = shells.get(i) {
            let mut rings = vec![ring(&self[idx])];
            for &h in &self[idx].holes {
                rings.push(ring(&self[h]));
                shells.extend(self[h].holes.iter().copied());
            }
            polygons.push(rings);
            i += 1;
        }

        serde_json::json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": polygons,
            },
        })
    }

    /// Renders this polygon as an SVG document, one filled path per group
    /// of nested contours.
    #[cfg(feature = "debug-svg")]
    pub fn to_svg(&self) -> svg::Document {
        let colors = ["#005F73", "#0A9396", "#EE9B00", "#BB3E03", "#9B2226"];
        let bbox = self.bounding_box().unwrap_or(Rect::ZERO);
        let pad = 1.0 + bbox.width().max(bbox.height()) / 32.0;
        let stroke_width = bbox.width().max(bbox.height()).max(1.0) / 512.0;

        // SVG's y axis points down, ours points up.
        let mut doc = svg::Document::new().set(
            "viewBox",
            (
                bbox.x0 - pad,
                -bbox.y1 - pad,
                bbox.width() + 2.0 * pad,
                bbox.height() + 2.0 * pad,
            ),
        );

        for (group, color) in self.grouped().into_iter().zip(colors.iter().cycle()) {
            let mut data = svg::node::element::path::Data::new();
            for idx in group {
                let Some((first, rest)) = self[idx].points.split_first() else {
                    continue;
                };
                data = data.move_to((first.x, -first.y));
                for p in rest {
                    data = data.line_to((p.x, -p.y));
                }
                data = data.close();
            }
            let path = svg::node::element::Path::new()
                .set("d", data)
                .set("stroke", "black")
                .set("stroke-width", stroke_width)
                .set("stroke-linejoin", "round")
                .set("fill-rule", "evenodd")
                .set("fill", *color);
            doc = doc.add(path);
        }
        doc
    }
}

impl std::ops::Index<ContourIdx> for ContourPolygon {
    type Output = Contour;

    fn index(&self, index: ContourIdx) -> &Contour {
        &self.contours[index.0]
    }
}

impl std::ops::IndexMut<ContourIdx> for ContourPolygon {
    fn index_mut(&mut self, index: ContourIdx) -> &mut Contour {
        &mut self.contours[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<(f64, f64)> {
        vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ]
    }

    #[test]
    fn area_and_orientation() {
        let mut cw = square(0.0, 0.0, 10.0);
        cw.reverse();
        let poly = ContourPolygon::from_simple(cw);
        assert!(poly.contours[0].is_counter_clockwise());
        assert_eq!(poly.area(), 100.0);

        let poly = ContourPolygon::with_holes(square(0.0, 0.0, 10.0), [square(2.0, 2.0, 2.0)]);
        assert!(!poly.contours[1].is_counter_clockwise());
        assert!(!poly.contours[1].external);
        assert_eq!(poly.contours[0].holes, vec![ContourIdx(1)]);
        assert_eq!(poly.area(), 96.0);
        assert_eq!(poly.vertex_count(), 8);
    }

    #[test]
    fn bounding_box() {
        assert_eq!(ContourPolygon::new().bounding_box(), None);
        let poly = ContourPolygon::from_disjoint([square(0.0, 0.0, 1.0), square(5.0, -3.0, 1.0)]);
        assert_eq!(poly.bounding_box(), Some(Rect::new(0.0, -3.0, 6.0, 1.0)));
    }

    #[test]
    fn join_shifts_holes() {
        let mut a = ContourPolygon::with_holes(square(0.0, 0.0, 10.0), [square(2.0, 2.0, 2.0)]);
        let b = ContourPolygon::with_holes(square(20.0, 0.0, 10.0), [square(22.0, 2.0, 2.0)]);
        a.join(&b);
        assert_eq!(a.contour_count(), 4);
        assert_eq!(a.contours[2].holes, vec![ContourIdx(3)]);
        assert_eq!(
            a.grouped(),
            vec![
                vec![ContourIdx(0), ContourIdx(1)],
                vec![ContourIdx(2), ContourIdx(3)]
            ]
        );
        assert_eq!(a.area(), 192.0);
    }

    #[test]
    fn tikz() {
        let poly = ContourPolygon::from_simple([(0.0, 0.0), (1.0, 0.0), (0.0, 1.5)]);
        insta::assert_snapshot!(poly.tikz().trim_end(), @r"\draw (0.00, 0.00) -- (1.00, 0.00) -- (0.00, 1.50) -- cycle;");
    }

    #[test]
    fn geojson() {
        let poly = ContourPolygon::from_simple([(0.0, 0.0), (1.0, 0.0), (0.0, 1.5)]);
        insta::assert_snapshot!(poly.to_geojson().to_string(), @r#"{"geometry":{"coordinates":[[[[0.0,0.0],[1.0,0.0],[0.0,1.5],[0.0,0.0]]]],"type":"MultiPolygon"},"properties":{},"type":"Feature"}"#);

        // An island in a hole is a polygon of its own.
        let mut poly = ContourPolygon::with_holes(square(0.0, 0.0, 10.0), [square(2.0, 2.0, 6.0)]);
        poly.push(Contour::new(square(4.0, 4.0, 2.0)));
        poly.contours[2].external = false;
        poly.contours[1].holes.push(ContourIdx(2));
        let json = poly.to_geojson();
        let polygons = json["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].as_array().unwrap().len(), 2);
        assert_eq!(polygons[1].as_array().unwrap().len(), 1);
        assert_eq!(polygons[1][0][0], serde_json::json!([4.0, 4.0]));
    }

    #[test]
    fn bez_path() {
        let poly = ContourPolygon::from_simple(square(0.0, 0.0, 2.0));
        let path = poly.to_bez_path();
        assert_eq!(kurbo::Shape::area(&path).abs(), 4.0);
    }

    #[test]
    fn from_svg_path() {
        let path = BezPath::from_svg("M0,0 L4,0 L4,4 L0,4 Z M1,1 L1,2 L2,2 L2,1 L1,1 Z").unwrap();
        let poly = ContourPolygon::from_bez_path(&path, 0.1);
        assert_eq!(poly.contour_count(), 2);
        assert_eq!(poly.contours[1].vertex_count(), 4);
        assert_eq!(poly.area(), 15.0);
    }
}
