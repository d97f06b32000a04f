use askama::Template;

use crate::aggregate::item_count;
use crate::constants::{NO_AVAILABLE_RESULTS_MESSAGE, NO_RESULTS_MESSAGE};
use crate::error::Result;
use crate::types::{BranchGroup, MediaRecord, MediaType};

// Templates are compiled into the binary, so a missing or broken template
// fails the build instead of a request.

#[derive(Template)]
#[template(path = "item-list-by-branch.html")]
pub struct ItemListByBranchTemplate<'a> {
    pub media_type: &'a str,
    pub branches: &'a [BranchGroup],
}

#[derive(Template)]
#[template(path = "item-list.html")]
pub struct ItemListTemplate<'a> {
    pub items: &'a [MediaRecord],
}

/// Renders search results grouped by branch, or the fixed no-results message
pub fn render_grouped(branches: &[BranchGroup], media_type: MediaType) -> Result<String> {
    if item_count(branches) == 0 {
        return Ok(NO_RESULTS_MESSAGE.to_string());
    }
    let template = ItemListByBranchTemplate {
        media_type: media_type.as_str(),
        branches,
    };
    Ok(template.render()?)
}

/// Renders a plain list of titles available at a single branch
pub fn render_flat(items: &[MediaRecord]) -> Result<String> {
    if items.is_empty() {
        return Ok(NO_AVAILABLE_RESULTS_MESSAGE.to_string());
    }
    Ok(ItemListTemplate { items }.render()?)
}
