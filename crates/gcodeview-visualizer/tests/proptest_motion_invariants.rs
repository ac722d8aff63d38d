//! Property-based invariant tests for interpretation, clustering and the
//! tabular round-trip over generated absolute-mode programs.
//!
//! 1. Table round-trip preserves the motion sequence.
//! 2. Node count equals the number of G0/G1 lines carrying an axis word.
//! 3. Unspecified axes carry forward.
//! 4. Cluster membership does not depend on visit order.
//! 5. Nothing is drawn past a G91 statement.

use gcodeview_visualizer::{
    from_rows, interpret, project, to_rows, MotionKind, PosKey, Projection, RenderTransform,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Move {
    rapid: bool,
    x: Option<i32>,
    y: Option<i32>,
    z: Option<i32>,
    feed: Option<u16>,
}

impl Move {
    fn has_axis(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    fn to_line(&self) -> String {
        let mut line = String::from(if self.rapid { "G0" } else { "G1" });
        for (letter, value) in [('X', self.x), ('Y', self.y), ('Z', self.z)] {
            if let Some(value) = value {
                line.push_str(&format!(" {}{}", letter, hundredths(value)));
            }
        }
        if let Some(feed) = self.feed {
            line.push_str(&format!(" F{}", feed));
        }
        line
    }
}

fn hundredths(value: i32) -> f64 {
    value as f64 / 100.0
}

#[derive(Debug, Clone)]
enum Line {
    Motion(Move),
    Inert(&'static str),
}

fn coordinate() -> impl Strategy<Value = i32> {
    -5000i32..=5000
}

fn move_strategy() -> impl Strategy<Value = Move> {
    (
        any::<bool>(),
        proptest::option::of(coordinate()),
        proptest::option::of(coordinate()),
        proptest::option::of(coordinate()),
        proptest::option::weighted(0.3, 1u16..=5000),
    )
        .prop_map(|(rapid, x, y, z, feed)| Move {
            rapid,
            x,
            y,
            z,
            feed,
        })
}

fn full_move_strategy() -> impl Strategy<Value = Move> {
    (any::<bool>(), coordinate(), coordinate(), coordinate()).prop_map(|(rapid, x, y, z)| Move {
        rapid,
        x: Some(x),
        y: Some(y),
        z: Some(z),
        feed: None,
    })
}

fn line_strategy() -> impl Strategy<Value = Line> {
    prop_oneof![
        6 => move_strategy().prop_map(Line::Motion),
        1 => prop_oneof![
            Just(""),
            Just("; comment"),
            Just("M3 S1000"),
            Just("G21"),
            Just("G4 P1 ; dwell"),
            Just("G90"),
        ]
        .prop_map(Line::Inert),
    ]
}

fn program(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| match line {
            Line::Motion(m) => m.to_line(),
            Line::Inert(text) => text.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn motion_sequence(text: &str) -> Vec<(MotionKind, Option<f64>, Option<f64>, Option<f64>, Option<f64>)> {
    to_rows(text)
        .into_iter()
        .map(|r| (r.command, r.x, r.y, r.z, r.feed))
        .collect()
}

fn cluster_groups(projection: &Projection, text: &str) -> BTreeSet<Vec<(i64, i64, i64)>> {
    let interpretation = interpret(text);
    projection
        .clusters
        .iter()
        .map(|cluster| {
            let mut members: Vec<(i64, i64, i64)> = cluster
                .members
                .iter()
                .filter_map(|&i| interpretation.node(i))
                .map(|node| {
                    let p = node.position;
                    (
                        (p.x * 100.0).round() as i64,
                        (p.y * 100.0).round() as i64,
                        (p.z * 100.0).round() as i64,
                    )
                })
                .collect();
            members.sort_unstable();
            members.dedup();
            members
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Table round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn table_round_trip_preserves_motion(lines in prop::collection::vec(line_strategy(), 0..40)) {
        let text = program(&lines);
        let rows = to_rows(&text);
        let regenerated = from_rows(&rows, &text);
        prop_assert_eq!(motion_sequence(&regenerated), motion_sequence(&text));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Node count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn node_count_matches_axis_lines(lines in prop::collection::vec(line_strategy(), 0..40)) {
        let text = program(&lines);
        let expected = lines
            .iter()
            .filter(|line| matches!(line, Line::Motion(m) if m.has_axis()))
            .count();
        prop_assert_eq!(interpret(&text).len(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Carry-forward
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unspecified_axes_carry_forward(moves in prop::collection::vec(move_strategy(), 1..30)) {
        let text = moves.iter().map(Move::to_line).collect::<Vec<_>>().join("\n");
        let result = interpret(&text);

        let mut current = (0.0, 0.0, 0.0);
        let mut expected = Vec::new();
        for m in moves.iter().filter(|m| m.has_axis()) {
            current = (
                m.x.map(hundredths).unwrap_or(current.0),
                m.y.map(hundredths).unwrap_or(current.1),
                m.z.map(hundredths).unwrap_or(current.2),
            );
            expected.push(current);
        }

        let actual: Vec<(f64, f64, f64)> = result
            .nodes
            .iter()
            .map(|n| (n.position.x, n.position.y, n.position.z))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Clustering is order independent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clusters_independent_of_visit_order(moves in prop::collection::vec(full_move_strategy(), 1..30)) {
        let transform = RenderTransform::centered(800.0, 600.0, 5.0);
        let forward = moves.iter().map(Move::to_line).collect::<Vec<_>>().join("\n");
        let backward = moves.iter().rev().map(Move::to_line).collect::<Vec<_>>().join("\n");

        let forward_projection = project(&interpret(&forward), &transform);
        let backward_projection = project(&interpret(&backward), &transform);

        for cluster in &forward_projection.clusters {
            for &member in &cluster.members {
                let point = forward_projection.points[member].screen;
                prop_assert_eq!(PosKey::from_screen(point), Some(cluster.key));
            }
        }
        prop_assert_eq!(
            cluster_groups(&forward_projection, &forward),
            cluster_groups(&backward_projection, &backward)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Relative mode aborts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nothing_drawn_after_relative_mode(
        before in prop::collection::vec(move_strategy(), 0..15),
        after in prop::collection::vec(move_strategy(), 0..15),
    ) {
        let mut lines: Vec<String> = before.iter().map(Move::to_line).collect();
        let g91_line = lines.len();
        lines.push("G91".to_string());
        lines.extend(after.iter().map(Move::to_line));
        let text = lines.join("\n");

        let interpretation = interpret(&text);
        let projection = project(&interpretation, &RenderTransform::default());

        prop_assert_eq!(projection.aborted.as_ref().map(|a| a.line), Some(g91_line));
        let drawn_before = before.iter().filter(|m| m.has_axis()).count();
        prop_assert_eq!(projection.segments.len(), drawn_before);
        for segment in &projection.segments {
            let line = interpretation.line_for_node(segment.node_index);
            prop_assert!(line.is_some_and(|l| l < g91_line));
        }
    }
}
