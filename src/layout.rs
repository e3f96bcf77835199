//! Layout builder: the static component tree served to the frontend.
//!
//! Built once from the distinct launch sites and the derived payload range.
//! Only the two chart placeholders change after construction, and those are
//! filled by the reactive binder, not by rebuilding the tree.

use serde::Serialize;

use crate::config::schema::SliderConfig;
use crate::filter::ALL_SITES;

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const PIE_CHART: &str = "success-pie-chart";
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

// ---------------------------------------------------------------------------
// Component tree
// ---------------------------------------------------------------------------

/// One node of the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Container {
        children: Vec<Component>,
    },
    Heading {
        text: String,
        align: String,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: String,
        placeholder: String,
        searchable: bool,
    },
    Graph {
        id: String,
    },
    Break,
    Paragraph {
        text: String,
    },
    RangeSlider {
        id: String,
        min: f64,
        max: f64,
        step: f64,
        marks: Vec<SliderMark>,
        value: [f64; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

/// Root of the dashboard layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub root: Component,
}

impl Layout {
    /// Depth-first lookup of a component by id.
    pub fn find(&self, id: &str) -> Option<&Component> {
        find_in(&self.root, id)
    }
}

fn find_in<'a>(node: &'a Component, id: &str) -> Option<&'a Component> {
    match node {
        Component::Container { children } => children.iter().find_map(|c| find_in(c, id)),
        Component::Dropdown { id: own, .. }
        | Component::Graph { id: own }
        | Component::RangeSlider { id: own, .. } => (own == id).then_some(node),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the dashboard layout.
///
/// `sites` must already be deduplicated in first-occurrence order.
/// `default_range` seeds the slider value; the slider's domain and marks come
/// from `slider`.
pub fn build_layout(sites: &[String], default_range: (f64, f64), slider: &SliderConfig) -> Layout {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(sites.iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }));

    let marks = slider
        .marks
        .iter()
        .map(|&m| SliderMark {
            value: m,
            label: format_mark(m),
        })
        .collect();

    let children = vec![
        Component::Heading {
            text: DASHBOARD_TITLE.to_string(),
            align: "center".to_string(),
        },
        Component::Dropdown {
            id: SITE_DROPDOWN.to_string(),
            options,
            value: ALL_SITES.to_string(),
            placeholder: "Select a Launch Site here".to_string(),
            searchable: true,
        },
        Component::Break,
        Component::Graph {
            id: PIE_CHART.to_string(),
        },
        Component::Break,
        Component::Paragraph {
            text: "Payload range (Kg):".to_string(),
        },
        Component::RangeSlider {
            id: PAYLOAD_SLIDER.to_string(),
            min: slider.min,
            max: slider.max,
            step: slider.step,
            marks,
            value: [default_range.0, default_range.1],
        },
        Component::Graph {
            id: SCATTER_CHART.to_string(),
        },
    ];

    Layout {
        root: Component::Container { children },
    }
}

/// Integral marks render without a fractional part.
fn format_mark(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
