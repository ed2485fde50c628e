//! End-to-end export scenarios, checked by reading the SVG back.

use quick_xml::Reader;
use quick_xml::events::Event;
use svgtypes::{PathParser, PathSegment};

use tessera::{
    ArcPrimitive, CirclePrimitive, ExportOptions, LinePrimitive, PatternSize, Point, Project, Style, TileConfig,
    build_single_tile_svg, build_tiled_svg,
};

#[derive(Debug, Default)]
struct ElementCounts {
    paths: usize,
    circles: usize,
    lines: usize,
    rects: usize,
    path_data: Vec<String>,
}

fn count_elements(svg: &str) -> ElementCounts {
    let mut reader = Reader::from_str(svg);
    let mut counts = ElementCounts::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"path" => {
                    counts.paths += 1;
                    if let Ok(Some(d)) = e.try_get_attribute("d") {
                        counts.path_data.push(d.unescape_value().unwrap().into_owned());
                    }
                }
                b"circle" => counts.circles += 1,
                b"line" => counts.lines += 1,
                b"rect" => counts.rects += 1,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => panic!("malformed SVG at {}: {:?}\n{}", reader.buffer_position(), e, svg),
            _ => {}
        }
    }

    counts
}

fn arc_flags(d: &str) -> Vec<(bool, bool)> {
    PathParser::from(d)
        .filter_map(|segment| match segment.unwrap() {
            PathSegment::EllipticalArc { large_arc, sweep, .. } => Some((large_arc, sweep)),
            _ => None,
        })
        .collect()
}

fn square_project(size: f64) -> Project {
    Project::new(TileConfig::square(size))
}

#[test]
fn single_line_exports_as_one_path_without_clipping() {
    let project = Project::from_json(include_str!("../../../test_assets/single_line.json")).unwrap();
    let svg = build_tiled_svg(&project, &ExportOptions::default().with_pattern(project.pattern));

    assert!(!svg.contains("clipPath"), "export must not use clip paths");
    assert!(!svg.contains("clip-path"));

    let counts = count_elements(&svg);
    assert_eq!(counts.paths + counts.lines, 1, "{}", svg);
    assert_eq!(counts.path_data, vec!["M -20 0 L 20 0".to_string()]);
}

#[test]
fn circle_inside_stays_a_circle() {
    let mut project = square_project(50.0);
    project.primitives = vec![CirclePrimitive::new("c", Point::new(5.0, -5.0), 20.0, &Style::default()).into()];

    let counts = count_elements(&build_single_tile_svg(&project, None));
    assert_eq!(counts.circles, 1);
    assert_eq!(counts.paths, 0);
}

#[test]
fn circle_crossing_the_boundary_becomes_arcs() {
    let mut project = square_project(50.0);
    project.primitives = vec![CirclePrimitive::new("c", Point::new(40.0, 0.0), 20.0, &Style::default()).into()];

    let counts = count_elements(&build_single_tile_svg(&project, None));
    assert_eq!(counts.circles, 0);
    assert!(counts.paths >= 1);
    for d in &counts.path_data {
        assert!(!arc_flags(d).is_empty(), "expected arc commands in {}", d);
    }
}

#[test]
fn shared_edge_line_is_drawn_once() {
    let project = Project::from_json(include_str!("../../../test_assets/shared_edge.json")).unwrap();
    assert_eq!(project.pattern, PatternSize::new(2, 1));

    let svg = build_tiled_svg(&project, &ExportOptions::default().with_pattern(project.pattern));
    let counts = count_elements(&svg);
    // x = -50, 50 and 150; the middle edge is clipped by both cells
    assert_eq!(counts.paths, 3, "{}", svg);
}

#[test]
fn line_spanning_cells_is_rejoined() {
    let mut project = square_project(25.0);
    project.primitives =
        vec![LinePrimitive::new("h", Point::new(-25.0, 10.0), Point::new(25.0, 10.0), &Style::default()).into()];

    let svg = build_tiled_svg(&project, &ExportOptions::default().with_pattern(PatternSize::new(4, 1)));
    let counts = count_elements(&svg);
    assert_eq!(counts.paths, 1, "{}", svg);
    assert_eq!(counts.path_data[0], "M -25 10 L 25 10 L 75 10 L 125 10 L 175 10");
}

#[test]
fn arc_flags_follow_the_stored_sweep() {
    let style = Style::default();
    let mut project = square_project(50.0);
    project.primitives = vec![
        ArcPrimitive::new("minor", Point::ORIGIN, Point::new(10.0, 0.0), Point::new(0.0, 10.0), true, false, &style)
            .into(),
        ArcPrimitive::new("major", Point::ORIGIN, Point::new(20.0, 0.0), Point::new(0.0, 20.0), true, true, &style)
            .into(),
    ];

    let counts = count_elements(&build_single_tile_svg(&project, None));
    assert_eq!(counts.paths, 2);
    assert_eq!(arc_flags(&counts.path_data[0]), vec![(false, true)]);
    // the major sweep runs the other way around
    assert_eq!(arc_flags(&counts.path_data[1]), vec![(true, false)]);
}

#[test]
fn background_and_header() {
    let project = square_project(10.0);
    let svg = build_tiled_svg(
        &project,
        &ExportOptions::default().with_pattern(PatternSize::new(2, 3)).with_background("#fafafa"),
    );
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(svg.contains("width=\"40\" height=\"60\" viewBox=\"-10 -10 40 60\""), "{}", svg);
    assert_eq!(count_elements(&svg).rects, 1);
}

#[test]
fn hex_export_is_a_valid_document() {
    let project: Project = serde_json::from_value(serde_json::json!({
        "tile": { "shape": "hexPointy", "size": 40 },
        "pattern": { "columns": 3, "rows": 2 },
        "primitives": [
            { "type": "line", "id": "spoke", "a": {"x": 0, "y": -40}, "b": {"x": 0, "y": 40},
              "color": "#1d3557", "strokeWidth": 1.2 },
            { "type": "circle", "id": "rim", "center": {"x": 34.641, "y": 0}, "radius": 12,
              "color": "#e63946", "strokeWidth": 1 }
        ]
    }))
    .unwrap();
    project.validate().unwrap();

    let svg = build_tiled_svg(&project, &ExportOptions::default().with_pattern(project.pattern));
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).expect("export should parse");
    assert!(tree.size().width() > 0.0);

    let counts = count_elements(&svg);
    assert_eq!(counts.circles, 0, "the rim circle crosses the hex edge");
    assert!(counts.paths > 1);
}

#[test]
fn export_is_deterministic() {
    let project = Project::from_json(include_str!("../../../test_assets/shared_edge.json")).unwrap();
    let options = ExportOptions::default().with_pattern(PatternSize::new(3, 3));
    assert_eq!(build_tiled_svg(&project, &options), build_tiled_svg(&project, &options));
}
