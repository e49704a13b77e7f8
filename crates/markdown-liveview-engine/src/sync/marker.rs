use thiserror::Error;

/// A marker-bearing node as read from the rendered view.
///
/// `line` is the raw attribute text; it is only trusted once parsed into a
/// [`Marker`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerNode {
    pub line: String,
    pub offset_top: f64,
    pub height: f64,
}

impl MarkerNode {
    pub fn new(line: impl Into<String>, offset_top: f64, height: f64) -> Self {
        Self {
            line: line.into(),
            offset_top,
            height,
        }
    }
}

/// Anchor binding a source line to a rendered node's position and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub source_line: usize,
    pub offset_top: f64,
    pub height: f64,
}

impl Marker {
    pub fn bottom(&self) -> f64 {
        self.offset_top + self.height
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MarkerError {
    #[error("marker line attribute {value:?} is not a line number")]
    Malformed { value: String },
    #[error("marker for line {line} has non-finite geometry")]
    NonFiniteGeometry { line: usize },
}

impl TryFrom<&MarkerNode> for Marker {
    type Error = MarkerError;

    fn try_from(node: &MarkerNode) -> Result<Self, Self::Error> {
        let source_line =
            node.line
                .trim()
                .parse::<usize>()
                .map_err(|_| MarkerError::Malformed {
                    value: node.line.clone(),
                })?;
        if !node.offset_top.is_finite() || !node.height.is_finite() {
            return Err(MarkerError::NonFiniteGeometry { line: source_line });
        }
        Ok(Marker {
            source_line,
            offset_top: node.offset_top,
            height: node.height.max(0.0),
        })
    }
}

/// Parses every node, skipping (and logging) the ones that are malformed.
///
/// Node order is preserved.
pub fn collect_markers(nodes: &[MarkerNode]) -> Vec<Marker> {
    nodes
        .iter()
        .filter_map(|node| match Marker::try_from(node) {
            Ok(marker) => Some(marker),
            Err(e) => {
                log::debug!("skipping marker: {e}");
                None
            }
        })
        .collect()
}
