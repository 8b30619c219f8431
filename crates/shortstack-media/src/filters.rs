//! FFmpeg filter graph builders.

/// Build the vertical-stack filter graph for two inputs.
///
/// Each input is scaled to cover a `width`x`height` pane (preserving aspect
/// ratio), center-cropped to exactly that pane, normalized to square pixels,
/// then the panes are stacked top-above-bottom into a single `[v]` stream.
pub fn build_stack_filter(width: u32, height: u32) -> String {
    format!(
        "[0:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1[top];\
         [1:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1[bottom];\
         [top][bottom]vstack=inputs=2[v]",
        w = width,
        h = height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_filter_geometry() {
        let filter = build_stack_filter(720, 640);
        assert!(filter.contains("scale=720:640:force_original_aspect_ratio=increase"));
        assert!(filter.contains("crop=720:640"));
        assert!(filter.contains("setsar=1"));
        assert!(filter.contains("vstack=inputs=2[v]"));
        // Two panes, both labelled
        assert!(filter.contains("[top]"));
        assert!(filter.contains("[bottom]"));
    }
}
