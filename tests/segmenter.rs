// tests/segmenter.rs

use crackwatch::exec::LineSegmenter;
use proptest::prelude::*;

#[test]
fn unterminated_fragment_is_held_until_finish() {
    let mut seg = LineSegmenter::new();
    assert!(seg.push(b"abc").is_empty());
    assert_eq!(seg.pending(), 3);
    assert_eq!(seg.finish(), Some("abc".to_string()));
    assert_eq!(seg.finish(), None);
}

#[test]
fn line_split_across_chunks() {
    let mut seg = LineSegmenter::new();
    assert!(seg.push(b"Status: Ru").is_empty());
    assert_eq!(seg.push(b"nning\nProg"), vec!["Status: Running".to_string()]);
    assert_eq!(seg.push(b"ress: 5%\n"), vec!["Progress: 5%".to_string()]);
    assert_eq!(seg.pending(), 0);
    assert_eq!(seg.finish(), None);
}

#[test]
fn crlf_line_endings_are_normalised() {
    let mut seg = LineSegmenter::new();
    let lines = seg.push(b"one\r\ntwo\r\n\r\n");
    assert_eq!(lines, vec!["one", "two", ""]);
}

#[test]
fn empty_lines_are_kept() {
    let mut seg = LineSegmenter::new();
    assert_eq!(seg.push(b"\n\na\n"), vec!["", "", "a"]);
}

#[test]
fn multibyte_character_split_between_reads() {
    let bytes = "pässword\n".as_bytes();
    // Split in the middle of the two-byte 'ä'.
    let mut seg = LineSegmenter::new();
    assert!(seg.push(&bytes[..2]).is_empty());
    assert_eq!(seg.push(&bytes[2..]), vec!["pässword".to_string()]);
}

#[test]
fn invalid_utf8_is_replaced() {
    let mut seg = LineSegmenter::new();
    let lines = seg.push(b"hash:\xff\xfe\n");
    assert_eq!(lines, vec!["hash:\u{FFFD}\u{FFFD}".to_string()]);
}

proptest! {
    #[test]
    fn chunking_does_not_change_lines(
        text in "[a-z:%\\r\\n ]{0,200}",
        cuts in prop::collection::vec(0usize..200, 0..10),
    ) {
        let bytes = text.as_bytes();

        let mut whole = LineSegmenter::new();
        let mut expected = whole.push(bytes);
        expected.extend(whole.finish());

        let mut points: Vec<usize> = cuts.into_iter().map(|c| c.min(bytes.len())).collect();
        points.sort_unstable();

        let mut chunked = LineSegmenter::new();
        let mut actual = Vec::new();
        let mut start = 0;
        for p in points {
            actual.extend(chunked.push(&bytes[start..p]));
            start = p;
        }
        actual.extend(chunked.push(&bytes[start..]));
        actual.extend(chunked.finish());

        prop_assert_eq!(actual, expected);
    }
}
