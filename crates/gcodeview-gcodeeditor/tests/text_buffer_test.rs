use gcodeview_gcodeeditor::{EditorError, TextBuffer};

#[test]
fn test_create_empty() {
    let buffer = TextBuffer::new();
    assert_eq!(buffer.len_chars(), 0);
    assert_eq!(buffer.len_lines(), 1);
    assert!(buffer.is_empty());
}

#[test]
fn test_create_from_str() {
    let buffer = TextBuffer::from("G90\nG1 X10");
    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.line(0), Some("G90".to_string()));
    assert_eq!(buffer.line(1), Some("G1 X10".to_string()));
    assert_eq!(buffer.line(2), None);
}

#[test]
fn test_trailing_newline_opens_empty_line() {
    let buffer = TextBuffer::from("G1 X1\n");
    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.line(1), Some(String::new()));
}

#[test]
fn test_only_newline_breaks_lines() {
    // A bare carriage return stays inside the line
    let buffer = TextBuffer::from("G1 X1\rG1 X2\nG0 Z5");
    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.line(0), Some("G1 X1\rG1 X2".to_string()));
}

#[test]
fn test_line_char_range() {
    let buffer = TextBuffer::from("G90\nG0 X0 Y0 Z5\nG1 Z0");
    assert_eq!(buffer.line_char_range(0), Ok(0..3));
    assert_eq!(buffer.line_char_range(1), Ok(4..15));
    assert_eq!(buffer.line_char_range(2), Ok(16..21));
    assert_eq!(
        buffer.line_char_range(3),
        Err(EditorError::LineOutOfBounds { line: 3, total: 3 })
    );
}

#[test]
fn test_replace() {
    let mut buffer = TextBuffer::from("G1 X10 Y20");
    buffer.replace(3..6, "X15");
    assert_eq!(buffer.to_string(), "G1 X15 Y20");

    buffer.replace(10..10, " F300");
    assert_eq!(buffer.to_string(), "G1 X15 Y20 F300");
}

#[test]
fn test_replace_clamps_out_of_range() {
    let mut buffer = TextBuffer::from("G1");
    buffer.replace(5..9, " X1");
    assert_eq!(buffer.to_string(), "G1 X1");
}

#[test]
fn test_unicode_comment_offsets() {
    let mut buffer = TextBuffer::from("; Fräse\nG1 X1");
    assert_eq!(buffer.line_char_range(1), Ok(8..13));
    buffer.replace(8..10, "G0");
    assert_eq!(buffer.to_string(), "; Fräse\nG0 X1");
}

#[test]
fn test_line_col_conversion() {
    let buffer = TextBuffer::from("Line 1\nLine 2\nLine 3");
    let (line, col) = buffer.char_to_line_col(7);
    assert_eq!(line, 1);
    assert_eq!(col, 0);

    let char_idx = buffer.line_col_to_char(1, 0);
    assert_eq!(char_idx, 7);
}

#[test]
fn test_set_text() {
    let mut buffer = TextBuffer::from("G1 X1");
    buffer.set_text("G0 Z5\nG1 Z0");
    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.to_string(), "G0 Z5\nG1 Z0");
}
