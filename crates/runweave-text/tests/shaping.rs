//! Shaping tests for runweave-text
//!
//! Segmentation, query laws and determinism against the table-driven backend.

use std::sync::Arc;

use runweave_text::*;

fn font() -> Font {
    let backend = MetricsBackend::new(1000)
        .with_advance('i', 230)
        .with_advance('l', 270)
        .with_advance('m', 833)
        .with_advance('W', 944)
        .with_advance(' ', 250)
        .with_kerning('A', 'V', -80)
        .with_kerning('T', 'o', -60);
    Font::new(Arc::new(backend), FontDescription::new(16.0))
}

fn shape(text: &TextBuffer, direction: TextDirection) -> ShapeResult {
    TextShaper::new(text).shape(&font(), direction)
}

// ============================================================================
// SEGMENTATION
// ============================================================================

#[test]
fn test_single_script_is_one_run() {
    let text = TextBuffer::from("Hello World");
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].start_index(), 0);
    assert_eq!(result.runs()[0].end_index(), 11);
    assert_eq!(result.num_characters(), 11);
}

#[test]
fn test_mixed_script_run_boundaries() {
    let text = TextBuffer::from(vec![0x628, 0x64A, 0x629, 0xE20, 0x65E5, 0x62]);
    let result = shape(&text, TextDirection::LeftToRight);
    let starts: Vec<u32> = result.runs().iter().map(|r| r.start_index()).collect();
    assert_eq!(starts, vec![0, 3, 4, 5]);

    let scripts: Vec<Script> = result.runs().iter().map(|r| r.script()).collect();
    assert_eq!(scripts, vec![Script::Arabic, Script::Thai, Script::Han, Script::Latin]);
}

#[test]
fn test_leading_common_characters() {
    let text = TextBuffer::from("  123 abc");
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].script(), Script::Latin);
}

#[test]
fn test_context_script_for_all_common_text() {
    let text = TextBuffer::from("123");
    let config = ShaperConfig::new().context_script(Script::Arabic);
    let result = TextShaper::with_config(&text, config).shape(&font(), TextDirection::RightToLeft);
    assert_eq!(result.runs()[0].script(), Script::Arabic);
}

#[test]
fn test_variation_selector_common() {
    let text = TextBuffer::from(vec![0x30, 0xFE0E]);
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].script(), Script::Common);
    assert_eq!(result.num_glyphs(), 2);
    assert_eq!(result.runs()[0].glyphs()[1].advance, Fixed::ZERO);
}

#[test]
fn test_variation_selector_han() {
    for units in [vec![0x4FAE, 0xFE00], vec![0x3402, 0xDB40, 0xDD00]] {
        let text = TextBuffer::from(units);
        let result = shape(&text, TextDirection::LeftToRight);
        assert_eq!(result.runs().len(), 1);
        assert_eq!(result.runs()[0].script(), Script::Han);
        assert_eq!(result.num_characters(), text.len());
    }
}

#[test]
fn test_variation_selector_latin() {
    let text = TextBuffer::from(vec![0x41, 0xDB40, 0xDDEF]);
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].script(), Script::Latin);
    assert_eq!(result.num_characters(), 3);
}

#[test]
fn test_missing_glyph_stays_in_run() {
    let text = TextBuffer::from("\u{FFF0}Hello");
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    assert_eq!(result.runs()[0].start_index(), 0);
    assert_eq!(result.runs()[0].end_index(), 6);
    assert_eq!(result.missing_glyph_count(), 1);
    assert!(result.width() > 0.0);
}

// ============================================================================
// WIDTHS AND POSITIONS
// ============================================================================

#[test]
fn test_sub_range_widths_sum_to_whole() {
    let text = TextBuffer::from("Will you summon the AVATAR today?");
    let font = font();
    let shaper = TextShaper::new(&text);
    let whole = shaper.shape(&font, TextDirection::LeftToRight);

    for cuts in [vec![0, 4, 33], vec![0, 10, 20, 33], vec![0, 1, 2, 3, 17, 33]] {
        let sum: f32 = cuts
            .windows(2)
            .map(|w| shaper.shape_range(&font, TextDirection::LeftToRight, w[0], w[1]).width())
            .sum();
        assert!((sum - whole.width()).abs() <= 1.0, "{cuts:?}: {sum} vs {}", whole.width());
    }
}

#[test]
fn test_direction_correct_endpoints() {
    let text = TextBuffer::from("Hello");
    let ltr = shape(&text, TextDirection::LeftToRight);
    assert_eq!(ltr.position_for_offset(0), 0.0);
    assert_eq!(ltr.position_for_offset(5), ltr.width());

    let text = TextBuffer::from("\u{5E9}\u{5DC}\u{5D5}\u{5DD}");
    let rtl = shape(&text, TextDirection::RightToLeft);
    assert!(rtl.is_rtl());
    assert_eq!(rtl.position_for_offset(0), rtl.width());
    assert_eq!(rtl.position_for_offset(4), 0.0);
}

#[test]
fn test_round_trip_ltr() {
    let text = TextBuffer::from("Tomorrow will be mild");
    let result = shape(&text, TextDirection::LeftToRight);
    assert_eq!(result.runs().len(), 1);
    for include_partial in [false, true] {
        for k in 0..=text.len() {
            let x = result.position_for_offset(k);
            assert_eq!(result.offset_for_position(x, include_partial), k, "k={k} partial={include_partial}");
        }
    }
}

#[test]
fn test_round_trip_rtl() {
    let text = TextBuffer::from("\u{627}\u{644}\u{633}\u{644}\u{627}\u{645} \u{639}\u{644}\u{64A}\u{643}\u{645}");
    let result = shape(&text, TextDirection::RightToLeft);
    assert_eq!(result.runs().len(), 1);
    for include_partial in [false, true] {
        for k in 0..=text.len() {
            let x = result.position_for_offset(k);
            assert_eq!(result.offset_for_position(x, include_partial), k, "k={k} partial={include_partial}");
        }
    }
}

#[test]
fn test_positions_are_monotonic() {
    let text = TextBuffer::from("Wimbledon");
    let ltr = shape(&text, TextDirection::LeftToRight);
    let positions: Vec<f32> = (0..=text.len()).map(|k| ltr.position_for_offset(k)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_bounds_close_to_width() {
    let text = TextBuffer::from("Hello \u{65E5}\u{672C}\u{8A9E} world");
    let result = shape(&text, TextDirection::LeftToRight);
    let bounds = result.bounds();
    assert!((bounds.width - result.width()).abs() <= result.width() * 0.1);
    assert!(bounds.y < 0.0 && bounds.max_y() > 0.0);
}

// ============================================================================
// DETERMINISM AND SHARING
// ============================================================================

#[test]
fn test_shaping_is_deterministic() {
    let text = TextBuffer::from("AVATAR \u{5E9}\u{5DC}\u{5D5}\u{5DD} \u{65E5}\u{672C}");
    let font = font();
    let shaper = TextShaper::new(&text);
    let first = shaper.shape(&font, TextDirection::LeftToRight);
    let second = shaper.shape(&font, TextDirection::LeftToRight);
    assert_eq!(first.runs().len(), second.runs().len());
    assert_eq!(first.num_glyphs(), second.num_glyphs());
    assert_eq!(first.fixed_width(), second.fixed_width());
    assert_eq!(first, second);
}

#[test]
fn test_acquire_mutable_sole_owner() {
    let text = TextBuffer::from("Hello");
    let mut shared = SharedShapeResult::new(shape(&text, TextDirection::LeftToRight));
    let before = shared.as_ptr();
    let after: *const ShapeResult = shared.acquire_mutable();
    assert_eq!(before, after);
    assert_eq!(shared.ref_count(), 1);
}

#[test]
fn test_acquire_mutable_shared() {
    let text = TextBuffer::from("a b c");
    let a = SharedShapeResult::new(shape(&text, TextDirection::LeftToRight));
    let b = a.clone();
    let mut c = a.clone();
    assert_eq!(a.ref_count(), 3);

    c.acquire_mutable()
        .apply_spacing(&text, &Spacing::new().letter_spacing(2.0));
    assert!(!c.ptr_eq(&a));
    assert_eq!(c.ref_count(), 1);
    assert_eq!(a.ref_count(), 2);
    assert!(a.ptr_eq(&b));
    assert_eq!(c.width(), a.width() + 10.0);
    assert_eq!(*a, *b);
}

// ============================================================================
// SAFE TO BREAK
// ============================================================================

fn abracadabra_font() -> Font {
    let backend = MetricsBackend::new(1000)
        .with_ligature("RA", 900, false)
        .with_ligature("CA", 950, true)
        .with_kerning('A', 'B', -40)
        .with_kerning('A', 'C', -30)
        .with_kerning('D', 'A', -20);
    let description = FontDescription::new(16.0).ligatures(LigatureSettings {
        common: true,
        discretionary: true,
    });
    Font::new(Arc::new(backend), description)
}

#[test]
fn test_safe_to_break_offsets() {
    let text = TextBuffer::from("ABRACADABRA");
    let result = TextShaper::new(&text).shape(&abracadabra_font(), TextDirection::LeftToRight);
    assert_eq!(result.safe_to_break_offsets(), vec![0, 2, 6, 9, 11]);
    assert_eq!(result.next_safe_to_break_offset(1), 2);
    assert_eq!(result.previous_safe_to_break_offset(5), 2);
    assert_eq!(result.next_safe_to_break_offset(7), 9);
    assert_eq!(result.previous_safe_to_break_offset(11), 11);
}

#[test]
fn test_safe_to_break_consistency() {
    let font = abracadabra_font();
    let text = TextBuffer::from("ABRACADABRA");
    let result = TextShaper::new(&text).shape(&font, TextDirection::LeftToRight);

    let safe = result.safe_to_break_offsets();
    let inserted: Vec<u32> = safe
        .iter()
        .copied()
        .filter(|&s| s > 0 && s < text.len())
        .collect();
    let mut units = Vec::new();
    for (i, unit) in text.as_slice().iter().enumerate() {
        if inserted.contains(&(i as u32)) {
            units.push(0x200B);
        }
        units.push(*unit);
    }
    let separated = TextBuffer::from(units);
    assert_eq!(separated.to_string_lossy(0..separated.len()), "AB\u{200B}RACA\u{200B}DAB\u{200B}RA");

    let reshaped = TextShaper::new(&separated).shape(&font, TextDirection::LeftToRight);
    assert_eq!(reshaped.fixed_width(), result.fixed_width());
    assert_eq!(reshaped.snapped_width(), result.snapped_width());
    assert_eq!(reshaped.bounds(), result.bounds());
    for k in 0..=text.len() {
        let shift = inserted.iter().filter(|&&s| s < k).count() as u32;
        assert_eq!(
            reshaped.position_for_offset(k + shift),
            result.position_for_offset(k),
            "offset {k}"
        );
    }
}

#[test]
fn test_safe_to_break_in_rtl_text() {
    let text = TextBuffer::from("\u{5E9}\u{5DC}\u{5D5}\u{5DD}");
    let result = shape(&text, TextDirection::RightToLeft);
    assert_eq!(result.safe_to_break_offsets(), vec![0, 1, 2, 3, 4]);
}
