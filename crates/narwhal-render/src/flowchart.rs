use crate::model::{
    ChartBody, LinePrimitive, Primitive, RectPrimitive, Stroke, TextAnchor, TextPrimitive,
};
use crate::{EDGE_COLOR, Frame, MARGIN, baseline_for_center};
use narwhal_core::FlowNode;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 50.0;
pub const H_GAP: f64 = 40.0;
pub const V_GAP: f64 = 50.0;

const NODE_TEXT: &str = "#ffffff";
const LABEL_PADDING: f64 = 16.0;

/// BFS layer for each node, indexed like `nodes`.
///
/// Zero in-degree nodes start at layer 0. When every node has a predecessor, the first node
/// seeds the search instead. Nodes still unvisited afterwards (cycles with no entry) each seed
/// another search at layer 0, in input order.
pub fn assign_layers(nodes: &[FlowNode]) -> Vec<usize> {
    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let successors: Vec<Vec<usize>> = nodes
        .iter()
        .map(|n| {
            n.next
                .iter()
                .filter_map(|id| index.get(id.as_str()).copied())
                .collect()
        })
        .collect();

    let mut in_degree = vec![0usize; nodes.len()];
    for succ in &successors {
        for &v in succ {
            in_degree[v] += 1;
        }
    }

    let mut layer: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut queue = VecDeque::new();
    for (i, deg) in in_degree.iter().enumerate() {
        if *deg == 0 {
            layer[i] = Some(0);
            queue.push_back(i);
        }
    }
    if queue.is_empty() && !nodes.is_empty() {
        tracing::warn!(
            seed = %nodes[0].id,
            "flowchart has no entry node; starting from the first record"
        );
    }

    let mut seed = 0;
    loop {
        while let Some(u) = queue.pop_front() {
            let next_layer = layer[u].map_or(0, |l| l + 1);
            for &v in &successors[u] {
                if layer[v].is_none() {
                    layer[v] = Some(next_layer);
                    queue.push_back(v);
                }
            }
        }
        while seed < nodes.len() && layer[seed].is_some() {
            seed += 1;
        }
        if seed == nodes.len() {
            break;
        }
        layer[seed] = Some(0);
        queue.push_back(seed);
    }

    layer.into_iter().map(|l| l.unwrap_or(0)).collect()
}

pub(crate) fn layout_flowchart(nodes: &[FlowNode], frame: &Frame<'_>) -> ChartBody {
    let style = frame.style;
    let font_size = style.font_size;
    let layers = assign_layers(nodes);
    let layer_count = layers.iter().max().map_or(0, |m| m + 1);

    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (i, l) in layers.iter().enumerate() {
        rows[*l].push(i);
    }

    let widest = rows.iter().map(Vec::len).max().unwrap_or(0) as f64;
    let widest_row = widest * NODE_WIDTH + (widest - 1.0).max(0.0) * H_GAP;
    let width = style.width.max(widest_row + 2.0 * MARGIN);
    tracing::debug!(nodes = nodes.len(), layers = layer_count, width, "flowchart layout");

    let mut origin = vec![(0.0, 0.0); nodes.len()];
    for (l, row) in rows.iter().enumerate() {
        let k = row.len() as f64;
        let row_width = k * NODE_WIDTH + (k - 1.0).max(0.0) * H_GAP;
        let x0 = (width - row_width) / 2.0;
        let y = frame.top + l as f64 * (NODE_HEIGHT + V_GAP);
        for (pos, &i) in row.iter().enumerate() {
            origin[i] = (x0 + pos as f64 * (NODE_WIDTH + H_GAP), y);
        }
    }

    let mut out: Vec<Primitive> = Vec::with_capacity(nodes.len() * 3);
    for row in &rows {
        for &i in row {
            let (x, y) = origin[i];
            out.push(
                RectPrimitive::new("node", x, y, NODE_WIDTH, NODE_HEIGHT)
                    .fill(style.primary_color.clone())
                    .rounded(8.0)
                    .into(),
            );
            out.push(
                TextPrimitive::new(
                    "node-label",
                    x + NODE_WIDTH / 2.0,
                    baseline_for_center(y + NODE_HEIGHT / 2.0, font_size),
                    frame.fit(&nodes[i].label, font_size, NODE_WIDTH - LABEL_PADDING),
                    font_size,
                    NODE_TEXT,
                )
                .anchor(TextAnchor::Middle)
                .into(),
            );
        }
    }

    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    for (i, node) in nodes.iter().enumerate() {
        let (sx, sy) = origin[i];
        for target in &node.next {
            let Some(&j) = index.get(target.as_str()) else {
                continue;
            };
            let (tx, ty) = origin[j];
            out.push(
                LinePrimitive {
                    class: "edge",
                    x1: sx + NODE_WIDTH / 2.0,
                    y1: sy + NODE_HEIGHT,
                    x2: tx + NODE_WIDTH / 2.0,
                    y2: ty,
                    stroke: Stroke::new(EDGE_COLOR, 2.0),
                    arrow: true,
                }
                .into(),
            );
        }
    }

    let content =
        layer_count as f64 * NODE_HEIGHT + layer_count.saturating_sub(1) as f64 * V_GAP;
    ChartBody {
        width,
        height: frame.top + content + MARGIN,
        primitives: out,
    }
}
