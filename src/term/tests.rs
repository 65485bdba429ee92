// src/term/tests.rs

//! Integration tests driving the emulator through the full byte pipeline.

use crate::color::{Color, NamedColor};
use crate::config::Config;
use crate::glyph::{AttrFlags, Glyph, UnderlineStyle};
use crate::term::action::EmulatorAction;
use crate::term::selection::{SelectionKind, SnapMode};
use crate::term::snapshot::CursorShape;
use crate::Terminal;
use test_log::test;

fn create_terminal(cols: usize, rows: usize) -> Terminal {
    Terminal::new(Config {
        columns: cols,
        rows,
        scrollback_lines: 100,
        ..Config::default()
    })
}

fn create_terminal_with_scrollback(cols: usize, rows: usize, scrollback: usize) -> Terminal {
    Terminal::new(Config {
        columns: cols,
        rows,
        scrollback_lines: scrollback,
        ..Config::default()
    })
}

fn row_string(term: &Terminal, y: usize) -> String {
    term.emulator()
        .visible_row(y)
        .expect("row in bounds")
        .iter()
        .map(|g| if g.c == '\0' { ' ' } else { g.c })
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn glyph_at(term: &Terminal, x: usize, y: usize) -> Glyph {
    term.emulator().visible_row(y).expect("row in bounds")[x]
}

fn cursor_pos(term: &Terminal) -> (usize, usize) {
    let (x, y, _, _) = term.emulator().cursor_position();
    (x, y)
}

fn clean_all(term: &mut Terminal) {
    let (_, rows) = term.emulator().dimensions();
    for y in 0..rows {
        term.emulator_mut().clear_dirty(y);
    }
}

#[test]
fn printing_advances_the_cursor() {
    let mut term = create_terminal(10, 3);
    term.feed(b"abc");
    assert_eq!(row_string(&term, 0), "abc");
    assert_eq!(cursor_pos(&term), (3, 0));
}

#[test]
fn carriage_return_and_line_feed() {
    let mut term = create_terminal(10, 3);
    term.feed(b"ab\r\ncd");
    assert_eq!(row_string(&term, 0), "ab");
    assert_eq!(row_string(&term, 1), "cd");
    assert_eq!(cursor_pos(&term), (2, 1));
}

#[test]
fn attributes_apply_per_cell_and_only_touched_row_is_dirty() {
    let mut term = create_terminal(80, 24);
    clean_all(&mut term);
    term.feed(b"A\x1b[31mB\x1b[0mC");

    let a = glyph_at(&term, 0, 0);
    let b = glyph_at(&term, 1, 0);
    let c = glyph_at(&term, 2, 0);
    assert_eq!(a.c, 'A');
    assert_eq!(a.attr.fg, Color::Default);
    assert_eq!(b.c, 'B');
    assert_eq!(b.attr.fg, Color::Named(NamedColor::Red));
    assert_eq!(c.c, 'C');
    assert_eq!(c.attr.fg, Color::Default);

    assert!(term.emulator().dirty(0));
    for y in 1..24 {
        assert!(!term.emulator().dirty(y), "row {} should be clean", y);
    }
}

#[test]
fn truecolor_semicolon_and_colon_forms_produce_identical_cells() {
    let mut semicolon = create_terminal(10, 2);
    semicolon.feed(b"\x1b[38;2;10;20;30mA");
    let mut colon = create_terminal(10, 2);
    colon.feed(b"\x1b[38:2:10:20:30mA");

    let lhs = glyph_at(&semicolon, 0, 0);
    let rhs = glyph_at(&colon, 0, 0);
    assert_eq!(lhs.attr, rhs.attr);
    assert_eq!(lhs.attr.fg, Color::Rgb(10, 20, 30));
}

#[test]
fn underline_style_and_color_reach_the_cell() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b[4:3m\x1b[58:2:1:2:3mU");
    let cell = glyph_at(&term, 0, 0);
    assert_eq!(cell.attr.underline, UnderlineStyle::Curly);
    assert_eq!(cell.attr.underline_color, Some(Color::Rgb(1, 2, 3)));
}

#[test]
fn autowrap_wraps_and_flags_the_wrapped_row() {
    let mut term = create_terminal(5, 3);
    term.feed(b"abcdefg");
    assert_eq!(row_string(&term, 0), "abcde");
    assert_eq!(row_string(&term, 1), "fg");
    assert!(glyph_at(&term, 4, 0).attr.flags.contains(AttrFlags::WRAP));
    assert_eq!(cursor_pos(&term), (2, 1));
}

#[test]
fn autowrap_off_overwrites_the_last_column() {
    let mut term = create_terminal(5, 2);
    term.feed(b"\x1b[?7labcdefg");
    assert_eq!(row_string(&term, 0), "abcdg");
    assert_eq!(row_string(&term, 1), "");
}

#[test]
fn wide_char_occupies_two_cells() {
    let mut term = create_terminal(10, 2);
    term.feed("世x".as_bytes());
    let primary = glyph_at(&term, 0, 0);
    let spacer = glyph_at(&term, 1, 0);
    assert_eq!(primary.c, '世');
    assert!(primary.attr.flags.contains(AttrFlags::WIDE));
    assert_eq!(spacer.c, '\0');
    assert!(spacer.attr.flags.contains(AttrFlags::WIDE_CONTINUATION));
    assert_eq!(glyph_at(&term, 2, 0).c, 'x');
}

#[test]
fn wide_char_with_one_column_left_pads_and_wraps() {
    let mut term = create_terminal(4, 2);
    term.feed("abc世".as_bytes());
    // Column 3 is padded; the wide pair lands at the start of row 1.
    assert_eq!(glyph_at(&term, 3, 0).c, ' ');
    assert!(glyph_at(&term, 3, 0).attr.flags.contains(AttrFlags::WRAP));
    let primary = glyph_at(&term, 0, 1);
    assert_eq!(primary.c, '世');
    assert!(primary.attr.flags.contains(AttrFlags::WIDE));
    assert!(glyph_at(&term, 1, 1)
        .attr
        .flags
        .contains(AttrFlags::WIDE_CONTINUATION));
    assert_eq!(cursor_pos(&term), (2, 1));
}

#[test]
fn overwriting_half_a_wide_pair_clears_the_other_half() {
    let mut term = create_terminal(10, 2);
    term.feed("世".as_bytes());
    term.feed(b"\x1b[1;1Hx");
    assert_eq!(glyph_at(&term, 0, 0).c, 'x');
    let healed = glyph_at(&term, 1, 0);
    assert_eq!(healed.c, ' ');
    assert!(!healed.attr.flags.contains(AttrFlags::WIDE_CONTINUATION));
}

#[test]
fn erase_in_line_variants() {
    let mut term = create_terminal(10, 2);
    term.feed(b"abcdefghij\x1b[1;5H");
    term.feed(b"\x1b[K");
    assert_eq!(row_string(&term, 0), "abcd");
    term.feed(b"\x1b[1;3H\x1b[1K");
    assert_eq!(row_string(&term, 0), "   d");
}

#[test]
fn erase_in_display_all_and_scrollback() {
    let mut term = create_terminal_with_scrollback(5, 2, 10);
    term.feed(b"aa\r\nbb\r\ncc\r\ndd");
    assert!(term.emulator().scrollback_len() > 0);
    term.feed(b"\x1b[2J");
    assert_eq!(row_string(&term, 0), "");
    assert_eq!(row_string(&term, 1), "");
    // ED 2 leaves history alone; ED 3 clears it.
    assert!(term.emulator().scrollback_len() > 0);
    term.feed(b"\x1b[3J");
    assert_eq!(term.emulator().scrollback_len(), 0);
}

#[test]
fn scrollback_retains_exactly_capacity_rows() {
    let mut term = create_terminal_with_scrollback(5, 2, 3);
    // Eight newlines from the bottom row: each scroll-out feeds history.
    term.feed(b"r0");
    for i in 1..=8 {
        term.feed(format!("\r\nr{}", i).as_bytes());
    }
    assert_eq!(term.emulator().scrollback_len(), 3);
    // Oldest evicted first: the ring now starts at r4.
    let snapshot = {
        term.emulator_mut().scroll_viewport(3);
        term.emulator_mut().get_render_snapshot().unwrap()
    };
    let top: String = snapshot.lines[0]
        .cells
        .iter()
        .map(|g| g.c)
        .collect::<String>()
        .trim_end()
        .to_string();
    assert_eq!(top, "r4");
}

#[test]
fn scroll_region_confines_line_feeds() {
    let mut term = create_terminal(5, 5);
    for (y, text) in ["r0", "r1", "r2", "r3", "r4"].iter().enumerate() {
        term.feed(format!("\x1b[{};1H{}", y + 1, text).as_bytes());
    }
    // Region rows 2-4 (1-based); LF from the region bottom scrolls only it.
    term.feed(b"\x1b[2;4r\x1b[4;1H\n");
    assert_eq!(row_string(&term, 0), "r0");
    assert_eq!(row_string(&term, 1), "r2");
    assert_eq!(row_string(&term, 2), "r3");
    assert_eq!(row_string(&term, 3), "");
    assert_eq!(row_string(&term, 4), "r4");
}

#[test]
fn scroll_region_reverse_index_scrolls_down() {
    let mut term = create_terminal(5, 4);
    for (y, text) in ["r0", "r1", "r2", "r3"].iter().enumerate() {
        term.feed(format!("\x1b[{};1H{}", y + 1, text).as_bytes());
    }
    term.feed(b"\x1b[2;3r\x1b[2;1H\x1bM");
    assert_eq!(row_string(&term, 0), "r0");
    assert_eq!(row_string(&term, 1), "");
    assert_eq!(row_string(&term, 2), "r1");
    assert_eq!(row_string(&term, 3), "r3");
}

#[test]
fn insert_and_delete_lines_respect_the_region() {
    let mut term = create_terminal(5, 4);
    for (y, text) in ["r0", "r1", "r2", "r3"].iter().enumerate() {
        term.feed(format!("\x1b[{};1H{}", y + 1, text).as_bytes());
    }
    term.feed(b"\x1b[2;1H\x1b[L");
    assert_eq!(row_string(&term, 1), "");
    assert_eq!(row_string(&term, 2), "r1");
    assert_eq!(row_string(&term, 3), "r2");
    term.feed(b"\x1b[2;1H\x1b[M");
    assert_eq!(row_string(&term, 1), "r1");
    assert_eq!(row_string(&term, 2), "r2");
    assert_eq!(row_string(&term, 3), "");
}

#[test]
fn insert_and_delete_chars_shift_within_the_row() {
    let mut term = create_terminal(8, 2);
    term.feed(b"abcdef\x1b[1;2H\x1b[2@");
    assert_eq!(row_string(&term, 0), "a  bcdef");
    term.feed(b"\x1b[1;2H\x1b[2P");
    assert_eq!(row_string(&term, 0), "abcdef");
}

#[test]
fn insert_mode_shifts_at_the_cursor() {
    let mut term = create_terminal(8, 2);
    term.feed(b"abc\x1b[1;1H\x1b[4hX");
    assert_eq!(row_string(&term, 0), "Xabc");
    assert!(term.emulator().modes().insert);
    term.feed(b"\x1b[4l");
    assert!(!term.emulator().modes().insert);
}

#[test]
fn erase_chars_blanks_without_shifting() {
    let mut term = create_terminal(8, 2);
    term.feed(b"abcdef\x1b[1;2H\x1b[3X");
    assert_eq!(row_string(&term, 0), "a   ef");
    assert_eq!(glyph_at(&term, 1, 0).c, ' ');
    assert_eq!(glyph_at(&term, 3, 0).c, ' ');
    assert_eq!(glyph_at(&term, 4, 0).c, 'e');
}

#[test]
fn tabs_and_tab_stops() {
    let mut term = create_terminal(24, 2);
    term.feed(b"\tX");
    assert_eq!(glyph_at(&term, 8, 0).c, 'X');
    // TBC 3 clears everything; HT then lands on the last column.
    term.feed(b"\r\x1b[3g\t");
    assert_eq!(cursor_pos(&term).0, 23);
    // HTS plants a stop at the current column.
    term.feed(b"\x1b[1;5H\x1bH\r\t");
    assert_eq!(cursor_pos(&term).0, 4);
}

#[test]
fn origin_mode_homes_to_the_region_top() {
    let mut term = create_terminal(10, 6);
    term.feed(b"\x1b[3;5r\x1b[?6h\x1b[HX");
    assert_eq!(glyph_at(&term, 0, 2).c, 'X');
    // Addressing is clamped inside the region.
    term.feed(b"\x1b[99;1HY");
    assert_eq!(glyph_at(&term, 0, 4).c, 'Y');
    term.feed(b"\x1b[?6l");
    assert!(!term.emulator().modes().origin_mode);
}

#[test]
fn cursor_save_restore_keeps_attributes_and_position() {
    let mut term = create_terminal(10, 4);
    term.feed(b"\x1b[31m\x1b[2;3H\x1b7\x1b[0m\x1b[HA\x1b8B");
    // B is printed at the saved position with the saved red foreground.
    let b = glyph_at(&term, 2, 1);
    assert_eq!(b.c, 'B');
    assert_eq!(b.attr.fg, Color::Named(NamedColor::Red));
}

#[test]
fn saved_cursors_are_per_buffer() {
    let mut term = create_terminal(10, 4);
    term.feed(b"\x1b[2;3H\x1b7");
    // Mode 47 switches buffers without save/restore semantics.
    term.feed(b"\x1b[?47h");
    // The alternate buffer's slot is empty: restore goes to the defaults.
    term.feed(b"\x1b8");
    assert_eq!(cursor_pos(&term), (0, 0));
    term.feed(b"\x1b[?47l\x1b8");
    assert_eq!(cursor_pos(&term), (2, 1));
}

#[test]
fn alt_screen_1049_saves_and_restores() {
    let mut term = create_terminal(10, 3);
    term.feed(b"primary\x1b[?1049h");
    assert!(term.emulator().modes().alt_screen_active);
    assert_eq!(row_string(&term, 0), "");
    term.feed(b"alt");
    assert_eq!(row_string(&term, 0), "alt");
    term.feed(b"\x1b[?1049l");
    assert!(!term.emulator().modes().alt_screen_active);
    assert_eq!(row_string(&term, 0), "primary");
    assert_eq!(cursor_pos(&term), (7, 0));
}

#[test]
fn alt_screen_scrolling_skips_scrollback() {
    let mut term = create_terminal_with_scrollback(5, 2, 10);
    term.feed(b"\x1b[?1049h");
    for _ in 0..5 {
        term.feed(b"x\r\n");
    }
    assert_eq!(term.emulator().scrollback_len(), 0);
}

#[test]
fn decaln_fills_the_screen() {
    let mut term = create_terminal(4, 2);
    term.feed(b"\x1b#8");
    assert_eq!(row_string(&term, 0), "EEEE");
    assert_eq!(row_string(&term, 1), "EEEE");
}

#[test]
fn charset_line_drawing_remaps_at_write_time() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b(0qqx\x1b(B");
    assert_eq!(glyph_at(&term, 0, 0).c, '─');
    assert!(glyph_at(&term, 0, 0).attr.flags.contains(AttrFlags::BOX_DRAWING));
    assert_eq!(glyph_at(&term, 2, 0).c, '│');
    term.feed(b"q");
    assert_eq!(glyph_at(&term, 3, 0).c, 'q');
}

#[test]
fn single_shift_applies_to_exactly_one_character() {
    let mut term = create_terminal(10, 2);
    // Designate G2 as line drawing, single-shift into it for one char.
    term.feed(b"\x1b*0\x1bNqq");
    assert_eq!(glyph_at(&term, 0, 0).c, '─');
    assert_eq!(glyph_at(&term, 1, 0).c, 'q');
}

#[test]
fn shift_out_and_in_select_g1_and_g0() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b)0\x0eq\x0fq");
    assert_eq!(glyph_at(&term, 0, 0).c, '─');
    assert_eq!(glyph_at(&term, 1, 0).c, 'q');
}

#[test]
fn device_status_reports_synthesize_replies() {
    let mut term = create_terminal(10, 4);
    let actions = term.feed(b"\x1b[2;3H\x1b[6n");
    assert_eq!(
        actions,
        vec![EmulatorAction::WritePty(b"\x1b[2;3R".to_vec())]
    );
    let actions = term.feed(b"\x1b[5n");
    assert_eq!(actions, vec![EmulatorAction::WritePty(b"\x1b[0n".to_vec())]);
    let actions = term.feed(b"\x1b[c");
    assert_eq!(actions, vec![EmulatorAction::WritePty(b"\x1b[?6c".to_vec())]);
}

#[test]
fn cursor_position_report_is_origin_relative_in_origin_mode() {
    let mut term = create_terminal(10, 6);
    let actions = term.feed(b"\x1b[3;5r\x1b[?6h\x1b[2;2H\x1b[6n");
    assert_eq!(
        actions,
        vec![EmulatorAction::WritePty(b"\x1b[2;2R".to_vec())]
    );
}

#[test]
fn window_size_query_reports_dimensions() {
    let mut term = create_terminal(80, 24);
    let actions = term.feed(b"\x1b[18t");
    assert_eq!(
        actions,
        vec![EmulatorAction::WritePty(b"\x1b[8;24;80t".to_vec())]
    );
}

#[test]
fn osc_title_produces_action() {
    let mut term = create_terminal(10, 2);
    let actions = term.feed(b"\x1b]2;my title\x07");
    assert_eq!(actions, vec![EmulatorAction::SetTitle("my title".into())]);
}

#[test]
fn osc_palette_set_and_query() {
    let mut term = create_terminal(10, 2);
    let actions = term.feed(b"\x1b]4;1;#ff8000\x07");
    assert_eq!(actions, vec![EmulatorAction::PaletteChanged]);
    assert_eq!(term.emulator().palette().get(1), (0xff, 0x80, 0x00));

    let actions = term.feed(b"\x1b]4;1;?\x07");
    assert_eq!(
        actions,
        vec![EmulatorAction::WritePty(
            b"\x1b]4;1;rgb:ffff/8080/0000\x1b\\".to_vec()
        )]
    );
}

#[test]
fn osc_dynamic_colors_set_query_reset() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b]10;#102030\x07");
    assert_eq!(term.emulator().palette().foreground, (0x10, 0x20, 0x30));
    let actions = term.feed(b"\x1b]10;?\x07");
    assert_eq!(
        actions,
        vec![EmulatorAction::WritePty(
            b"\x1b]10;rgb:1010/2020/3030\x1b\\".to_vec()
        )]
    );
    term.feed(b"\x1b]110;\x07");
    assert_ne!(term.emulator().palette().foreground, (0x10, 0x20, 0x30));
}

#[test]
fn osc_hyperlink_tags_cells() {
    let mut term = create_terminal(20, 2);
    term.feed(b"\x1b]8;;https://example.com\x07hi\x1b]8;;\x07!");
    let h = glyph_at(&term, 0, 0);
    assert!(h.attr.flags.contains(AttrFlags::URL));
    assert_ne!(h.attr.link_id, 0);
    assert_eq!(
        term.emulator().hyperlink_uri(h.attr.link_id),
        Some("https://example.com")
    );
    // After the closing OSC 8 the association stops.
    let bang = glyph_at(&term, 2, 0);
    assert_eq!(bang.attr.link_id, 0);
    assert!(!bang.attr.flags.contains(AttrFlags::URL));
}

#[test]
fn osc_clipboard_set_and_query_are_delegated() {
    let mut term = create_terminal(10, 2);
    let actions = term.feed(b"\x1b]52;c;aGVsbG8=\x07");
    assert_eq!(
        actions,
        vec![EmulatorAction::CopyToClipboard {
            selection: 'c',
            payload: b"aGVsbG8=".to_vec()
        }]
    );
    let actions = term.feed(b"\x1b]52;p;?\x07");
    assert_eq!(actions, vec![EmulatorAction::QueryClipboard { selection: 'p' }]);
}

#[test]
fn mode_flags_toggle_via_decset() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b[?2004h\x1b[?1000;1006h\x1b[?1h");
    let modes = term.emulator().modes();
    assert!(modes.bracketed_paste);
    assert!(modes.mouse_vt200);
    assert!(modes.mouse_sgr);
    assert!(modes.cursor_keys_app);
    term.feed(b"\x1b[?2004l");
    assert!(!term.emulator().modes().bracketed_paste);
}

#[test]
fn keyboard_lock_and_local_echo_standard_modes() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b[2h");
    assert!(term.emulator().modes().keyboard_locked);
    // SRM reset enables local echo.
    term.feed(b"\x1b[12l");
    assert!(term.emulator().modes().local_echo);
    term.feed(b"\x1b[12h");
    assert!(!term.emulator().modes().local_echo);
}

#[test]
fn cursor_visibility_and_style() {
    let mut term = create_terminal(10, 2);
    let actions = term.feed(b"\x1b[?25l");
    assert_eq!(actions, vec![EmulatorAction::SetCursorVisibility(false)]);
    let (_, _, _, visible) = term.emulator().cursor_position();
    assert!(!visible);
    term.feed(b"\x1b[?25h\x1b[6 q");
    let (_, _, shape, visible) = term.emulator().cursor_position();
    assert!(visible);
    assert_eq!(shape, CursorShape::Bar);
}

#[test]
fn synchronized_update_withholds_snapshots() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b[?2026h");
    assert!(term.emulator_mut().get_render_snapshot().is_none());
    let actions = term.feed(b"\x1b[?2026l");
    assert!(actions.contains(&EmulatorAction::RequestRedraw));
    assert!(term.emulator_mut().get_render_snapshot().is_some());
}

#[test]
fn ris_resets_screen_modes_and_cursor() {
    let mut term = create_terminal(10, 3);
    term.feed(b"stuff\x1b[?6h\x1b[4h\x1b[31m\x1bc");
    assert_eq!(row_string(&term, 0), "");
    assert_eq!(cursor_pos(&term), (0, 0));
    let modes = term.emulator().modes();
    assert!(!modes.origin_mode);
    assert!(!modes.insert);
    term.feed(b"Z");
    assert_eq!(glyph_at(&term, 0, 0).attr.fg, Color::Default);
}

#[test]
fn soft_reset_restores_modes_but_keeps_content() {
    let mut term = create_terminal(10, 3);
    term.feed(b"keep\x1b[?6h\x1b[4h\x1b[!p");
    assert_eq!(row_string(&term, 0), "keep");
    let modes = term.emulator().modes();
    assert!(!modes.origin_mode);
    assert!(!modes.insert);
    assert!(modes.autowrap);
}

#[test]
fn resize_clamps_cursor_and_dirties_everything() {
    let mut term = create_terminal(10, 4);
    term.feed(b"\x1b[4;10H");
    term.resize(5, 2);
    let (x, y) = cursor_pos(&term);
    assert!(x < 5 && y < 2);
    assert_eq!(term.emulator().dimensions(), (5, 2));
    for y in 0..2 {
        assert!(term.emulator().dirty(y));
    }
}

#[test]
fn feed_spanning_reports_and_prints_preserves_order() {
    let mut term = create_terminal(10, 2);
    let actions = term.feed(b"a\x1b[6nb\x07");
    assert_eq!(
        actions,
        vec![
            EmulatorAction::WritePty(b"\x1b[1;2R".to_vec()),
            EmulatorAction::RingBell,
        ]
    );
    assert_eq!(row_string(&term, 0), "ab");
}

#[test]
fn selection_word_snap_through_the_facade() {
    let mut term = create_terminal(20, 2);
    term.feed(b"foo bar");
    term.selection_start(5, 0, SnapMode::Word);
    term.selection_extend(5, 0, SelectionKind::Linear, true);
    assert_eq!(term.selection_text(), Some("bar".to_string()));
    term.selection_clear();
    assert_eq!(term.selection_text(), None);
}

#[test]
fn selection_across_soft_wrap_joins_rows() {
    let mut term = create_terminal(5, 3);
    term.feed(b"abcdefg");
    term.selection_start(0, 0, SnapMode::None);
    term.selection_extend(4, 1, SelectionKind::Linear, true);
    assert_eq!(term.selection_text(), Some("abcdefg".to_string()));
}

#[test]
fn selection_survives_alt_screen_round_trip_by_default() {
    let mut term = create_terminal(10, 2);
    term.feed(b"hello");
    term.selection_start(0, 0, SnapMode::None);
    term.selection_extend(4, 0, SelectionKind::Linear, true);
    term.feed(b"\x1b[?1049h");
    // Not visible on the alternate buffer...
    assert!(!term.emulator().is_selected(0, 0));
    term.feed(b"\x1b[?1049l");
    // ...but intact after returning (reference behavior, configurable).
    assert!(term.emulator().is_selected(0, 0));
    assert_eq!(term.selection_text(), Some("hello".to_string()));
}

#[test]
fn selection_clears_on_alt_screen_when_configured() {
    let mut term = Terminal::new(Config {
        columns: 10,
        rows: 2,
        clear_selection_on_alt_screen: true,
        ..Config::default()
    });
    term.feed(b"hello");
    term.selection_start(0, 0, SnapMode::None);
    term.selection_extend(4, 0, SelectionKind::Linear, true);
    term.feed(b"\x1b[?1049h\x1b[?1049l");
    assert_eq!(term.selection_text(), None);
}

#[test]
fn rectangular_selection_through_the_facade() {
    let mut term = create_terminal(10, 3);
    term.feed(b"abcde\r\nfghij\r\nklmno");
    term.selection_start(1, 0, SnapMode::None);
    term.selection_extend(3, 2, SelectionKind::Rectangular, true);
    assert_eq!(term.selection_text(), Some("bcd\nghi\nlmn".to_string()));
}

#[test]
fn keypad_modes_follow_esc_equals_and_greater() {
    let mut term = create_terminal(10, 2);
    term.feed(b"\x1b=");
    assert!(term.emulator().modes().app_keypad);
    term.feed(b"\x1b>");
    assert!(!term.emulator().modes().app_keypad);
}

#[test]
fn reverse_video_marks_everything_dirty() {
    let mut term = create_terminal(10, 2);
    clean_all(&mut term);
    let actions = term.feed(b"\x1b[?5h");
    assert!(term.emulator().modes().reverse_video);
    assert!(actions.contains(&EmulatorAction::RequestRedraw));
    assert!(term.emulator().dirty(0) && term.emulator().dirty(1));
}

#[test]
fn focus_events_report_when_mode_1004_is_set() {
    let mut term = create_terminal(10, 2);
    assert_eq!(term.emulator_mut().set_focus(false), None);
    assert!(!term.emulator().modes().window_focused);
    term.feed(b"\x1b[?1004h");
    assert_eq!(
        term.emulator_mut().set_focus(true),
        Some(EmulatorAction::WritePty(b"\x1b[I".to_vec()))
    );
    assert_eq!(
        term.emulator_mut().set_focus(false),
        Some(EmulatorAction::WritePty(b"\x1b[O".to_vec()))
    );
}

#[test]
fn paste_bytes_respects_bracketed_paste_mode() {
    let mut term = create_terminal(10, 2);
    assert_eq!(term.emulator().paste_bytes("hi"), b"hi".to_vec());
    term.feed(b"\x1b[?2004h");
    assert_eq!(
        term.emulator().paste_bytes("hi"),
        b"\x1b[200~hi\x1b[201~".to_vec()
    );
}

#[test]
fn garbage_input_is_absorbed_without_desync() {
    let mut term = create_terminal(10, 2);
    term.feed(&[0x1b, b'[', 0xff, 0xfe, b'Q', 0x1b, b'Q']);
    // Whatever the garbage did, a normal print must land normally.
    term.feed(b"\rok");
    assert_eq!(glyph_at(&term, 0, 0).c, 'o');
    assert_eq!(glyph_at(&term, 1, 0).c, 'k');
}
