//! Edge case tests for runweave-text
//!
//! Empty input, malformed text, clamping and font loading.

use std::sync::Arc;

use runweave_text::*;

fn font() -> Font {
    Font::new(Arc::new(MetricsBackend::new(2048)), FontDescription::new(12.0))
}

// ============================================================================
// EMPTY AND DEGENERATE INPUT
// ============================================================================

#[test]
fn test_empty_buffer() {
    let text = TextBuffer::from("");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert!(result.is_empty());
    assert_eq!(result.num_characters(), 0);
    assert_eq!(result.width(), 0.0);
    assert_eq!(result.snapped_width(), 0);
    assert!(result.runs().is_empty());
    assert_eq!(result.position_for_offset(0), 0.0);
    assert_eq!(result.offset_for_position(10.0, true), 0);
}

#[test]
fn test_empty_copy_into_empty_target() {
    let text = TextBuffer::from("abc");
    let source = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    let mut target = ShapeResult::new(TextDirection::LeftToRight, 0);
    source.copy_range(2, 2, &mut target);
    assert!(target.is_empty());
    assert_eq!(target.width(), 0.0);
}

#[test]
fn test_whitespace_only() {
    let text = TextBuffer::from("   \t ");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].script(), Script::Common);
    assert_eq!(result.bounds(), FloatRect::default());
    assert!(result.width() > 0.0);
}

#[test]
fn test_unpaired_surrogates_keep_offsets() {
    let text = TextBuffer::from(vec![0x61, 0xD800, 0x62, 0xDC00]);
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert_eq!(result.num_characters(), 4);
    assert_eq!(result.num_glyphs(), 4);
    assert_eq!(result.end_index_for_result(), 4);
}

#[test]
fn test_combining_mark_joins_cluster() {
    let text = TextBuffer::from("e\u{301}x");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert_eq!(result.num_glyphs(), 3);
    assert_eq!(result.safe_to_break_offsets(), vec![0, 2, 3]);
    assert_eq!(result.next_safe_to_break_offset(1), 2);
    assert_eq!(result.previous_safe_to_break_offset(1), 0);
}

#[test]
fn test_character_ranges_cover_width() {
    let text = TextBuffer::from("abc");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    let ranges = result.character_ranges();
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].start, 0.0);
    assert_eq!(ranges[2].end, result.width());
}

// ============================================================================
// CLAMPING
// ============================================================================

#[test]
fn test_copy_range_clamps_to_source() {
    let text = TextBuffer::from("Hello world");
    let shaper = TextShaper::new(&text);
    let source = shaper.shape_range(&font(), TextDirection::LeftToRight, 6, 11);
    let copy = source.sub_range(0, 100);
    assert_eq!(copy.start_index_for_result(), 6);
    assert_eq!(copy.num_characters(), 5);
    assert_eq!(copy.fixed_width(), source.fixed_width());
}

#[test]
fn test_offset_for_position_outside_result() {
    let text = TextBuffer::from("Hello");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert_eq!(result.offset_for_position(-50.0, false), 0);
    assert_eq!(result.offset_for_position(1.0e6, false), 5);
    assert_eq!(result.offset_for_position(f32::NAN, true), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn test_out_of_range_offset_asserts_in_debug() {
    let text = TextBuffer::from("Hello");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    result.position_for_offset(9);
}

#[test]
#[cfg(not(debug_assertions))]
fn test_out_of_range_offset_clamps_in_release() {
    let text = TextBuffer::from("Hello");
    let result = TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight);
    assert_eq!(result.position_for_offset(9), result.width());
    assert_eq!(result.next_safe_to_break_offset(9), 5);
}

// ============================================================================
// SPACING
// ============================================================================

#[test]
fn test_word_spacing_on_no_break_space() {
    let text = TextBuffer::from("a\u{A0}b");
    let mut shared = SharedShapeResult::new(TextShaper::new(&text).shape(&font(), TextDirection::LeftToRight));
    let before = shared.fixed_width();
    shared
        .acquire_mutable()
        .apply_spacing(&text, &Spacing::new().word_spacing(3.0));
    assert_eq!(shared.fixed_width(), before + Fixed::from_i32(3));
}

// ============================================================================
// FONTS
// ============================================================================

#[test]
fn test_font_description_builders() {
    let description = FontDescription::new(20.0)
        .orientation(FontOrientation::VerticalMixed)
        .kerning(false);
    assert_eq!(description.size, 20.0);
    assert!(description.orientation.is_vertical());
    assert!(!description.kerning);
    assert!(description.ligatures.common);

    let font = font();
    let resized = font.with_description(description);
    assert_eq!(resized.key(), font.key());
    assert_eq!(resized.backend().units_per_em(), 2048);
}

#[test]
fn test_system_font_shapes_latin() {
    let db = FontDatabase::with_system_fonts();
    if db.is_empty() {
        return;
    }
    let Ok(font) = db.load_font(&FontQuery::default(), FontDescription::new(16.0)) else {
        return;
    };
    let text = TextBuffer::from("Hello");
    let result = TextShaper::new(&text).shape(&font, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.num_characters(), 5);
    assert!(result.num_glyphs() >= 1);
}
