/// Default data colours handed to nodes in creation order.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#01B8AA", "#374649", "#FD625E", "#F2C80F", "#5F6B6D", "#8AD4EB", "#FE9666", "#A66999",
    "#3599B8", "#DFBFBF",
];

/// Spreads `node_count` nodes evenly over the palette: node `i` takes entry
/// `floor(i * palette.len() / node_count)`.
pub fn spread_color<'a>(palette: &[&'a str], index: usize, node_count: usize) -> Option<&'a str> {
    if palette.is_empty() || node_count == 0 {
        return None;
    }
    let shift = palette.len() as f64 / node_count as f64;
    let slot = (index as f64 * shift).floor() as usize;
    palette.get(slot.min(palette.len() - 1)).copied()
}
