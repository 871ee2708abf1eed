//! Badge rendering
//!
//! One [`AppRecord`] becomes one self-contained SVG: a fixed-size canvas with
//! a `foreignObject` holding the stylesheet and a single XHTML row (icon,
//! name, rating, optional install caption, store link).

pub mod assets;
pub mod markup;

use crate::domain::{AppRecord, Icon, display_name};
use crate::error::{FeedError, Result};

use assets::{BADGE_HEIGHT, BADGE_WIDTH, STYLESHEET, call_to_action};
use markup::Element;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Rating or install count shown when the marketplace reports none
const NOT_AVAILABLE: &str = "N/A";

/// Render the badge for one app
///
/// The icon must already be inlined.
pub fn render_badge(app: &AppRecord) -> Result<String> {
    let Icon::Inline(icon) = &app.icon else {
        return Err(FeedError::IconNotInlined { id: app.id.clone() });
    };

    let info = Element::new("div")
        .attr("class", "grid-item-info")
        .child(
            Element::new("p")
                .attr("class", "grid-item-title")
                .text(display_name(&app.name)),
        )
        .child(
            Element::new("p")
                .attr("class", "grid-item-rating")
                .text(format!("⭐️ {}", format_rating(app.rating))),
        )
        .child_opt(installs_caption(app));

    let link = Element::new("a")
        .attr("class", "grid-item-link")
        .attr("target", "_blank")
        .attr("xlink:href", app.url.as_str())
        .child(
            Element::new("img")
                .attr("height", "30px")
                .attr("src", call_to_action(app.source)),
        );

    let row = Element::new("div")
        .attr("xmlns", XHTML_NS)
        .attr("class", "grid-item")
        .child(
            Element::new("img")
                .attr("class", "grid-item-image")
                .attr("src", icon.as_str()),
        )
        .child(info)
        .child(link);

    let svg = Element::new("svg")
        .attr("width", BADGE_WIDTH.to_string())
        .attr("height", BADGE_HEIGHT.to_string())
        .attr("xmlns", SVG_NS)
        .attr("xmlns:xlink", XLINK_NS)
        .child(
            Element::new("foreignObject")
                .attr("width", "100%")
                .attr("height", "100%")
                .raw(STYLESHEET)
                .child(row),
        );

    Ok(svg.render())
}

/// Install-count caption, only for marketplaces that report installs
fn installs_caption(app: &AppRecord) -> Option<Element> {
    if !app.source.reports_installs() {
        return None;
    }
    let installs = app.installs.as_deref().unwrap_or(NOT_AVAILABLE);
    Some(
        Element::new("p")
            .attr("class", "grid-item-caption")
            .text(format!("{installs} installs")),
    )
}

/// Rating as reported, without rounding or range checks
fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string())
}
