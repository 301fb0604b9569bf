//! Word-aware splitting of over-long messages into two frame texts.

use super::frame::PartIndex;

/// A user message cut into at most two frame texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMessage {
    pub first: String,
    /// Empty when the message fits in a single frame
    pub second: String,
}

impl SplitMessage {
    pub fn is_split(&self) -> bool {
        !self.second.is_empty()
    }

    /// Frame texts in transmission order with their part index
    pub fn parts(&self) -> Vec<(PartIndex, &str)> {
        if self.is_split() {
            vec![
                (PartIndex::First, self.first.as_str()),
                (PartIndex::Second, self.second.as_str()),
            ]
        } else {
            vec![(PartIndex::Single, self.first.as_str())]
        }
    }
}

/// Split `message` into two parts of at most `part_len` characters.
///
/// The cut prefers the space closest to the middle of the message among the
/// positions that keep both halves within `part_len`; at equal distance the
/// earlier space wins. A cut at a space drops that space. Without a usable
/// space the message is cut hard at the midpoint. Characters beyond
/// `part_len` in either half are dropped.
///
/// Lengths and positions are counted in characters, not bytes.
pub fn split_message(message: &str, part_len: usize) -> SplitMessage {
    let chars: Vec<char> = message.chars().collect();
    let len = chars.len();
    if len <= part_len {
        return SplitMessage {
            first: message.to_string(),
            second: String::new(),
        };
    }

    let mid = len / 2;
    let split_index = find_space_near(&chars, len - part_len, part_len, mid).unwrap_or(mid);

    let second_start = if chars[split_index] == ' ' {
        split_index + 1
    } else {
        split_index
    };

    SplitMessage {
        first: chars[..split_index].iter().take(part_len).collect(),
        second: chars[second_start..].iter().take(part_len).collect(),
    }
}

/// Scan outward from `mid`, lower candidate first, for a space in `min..=max`
fn find_space_near(chars: &[char], min: usize, max: usize, mid: usize) -> Option<usize> {
    if min > max {
        return None;
    }
    let is_candidate = |index: usize| (min..=max).contains(&index) && chars[index] == ' ';

    (0..=max - min).find_map(|offset| {
        let lower = mid.checked_sub(offset).filter(|&i| is_candidate(i));
        lower.or_else(|| Some(mid + offset).filter(|&i| is_candidate(i)))
    })
}

/// Keep at most `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MAX_PART_LEN;

    /// Build a message of `len` characters with spaces at the given positions
    fn message_with_spaces(len: usize, spaces: &[usize]) -> String {
        (0..len)
            .map(|i| if spaces.contains(&i) { ' ' } else { 'x' })
            .collect()
    }

    #[test]
    fn test_short_message_is_not_split() {
        // テスト項目: 40 文字以下のメッセージは分割されない
        // given (前提条件):
        let exact_fit = "a".repeat(MAX_PART_LEN);
        let messages = ["", "hi", exact_fit.as_str()];

        // when (操作) / then (期待する結果):
        for message in messages {
            let split = split_message(message, MAX_PART_LEN);
            assert_eq!(split.first, message);
            assert_eq!(split.second, "");
            assert_eq!(split.parts(), vec![(PartIndex::Single, message)]);
        }
    }

    #[test]
    fn test_split_at_space_nearest_midpoint() {
        // テスト項目: 中点に最も近い範囲内の空白で分割され、空白は捨てられる
        // given (前提条件): 45 文字、中点 22、許容範囲 [5, 40]、空白は 20 と 25
        let message = message_with_spaces(45, &[20, 25]);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first.chars().count(), 20);
        assert_eq!(split.second.chars().count(), 24);
        assert!(!split.first.contains(' '));
        assert!(split.second.contains(' '));
    }

    #[test]
    fn test_split_tie_prefers_lower_index() {
        // テスト項目: 中点から等距離の空白が 2 つある場合は前側が選ばれる
        // given (前提条件): 中点 22 の両側 21 と 23 に空白
        let message = message_with_spaces(45, &[21, 23]);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first.chars().count(), 21);
        assert_eq!(split.second, format!("x {}", "x".repeat(21)));
    }

    #[test]
    fn test_space_outside_valid_range_is_ignored() {
        // テスト項目: 許容範囲 [5, 40] の外にしか空白がない場合は中点で強制分割される
        // given (前提条件):
        let message = format!("AAAA {}", "B".repeat(40));
        assert_eq!(message.len(), 45);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first, format!("AAAA {}", "B".repeat(17)));
        assert_eq!(split.second, "B".repeat(23));
    }

    #[test]
    fn test_split_fallback_cuts_at_midpoint() {
        // テスト項目: 空白のない 45 文字は floor(45/2) = 22 で分割される
        // given (前提条件):
        let message = "y".repeat(45);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first.len(), 22);
        assert_eq!(split.second.len(), 23);
        assert_eq!(
            split.parts(),
            vec![
                (PartIndex::First, split.first.as_str()),
                (PartIndex::Second, split.second.as_str())
            ]
        );
    }

    #[test]
    fn test_overlong_message_parts_are_capped() {
        // テスト項目: 80 文字を超える場合、両パートとも 40 文字に切り詰められる
        // given (前提条件): 100 文字、空白なし
        let message: String = (0..100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first, message[..40]);
        assert_eq!(split.second, message[50..90]);
    }

    #[test]
    fn test_eighty_characters_split_without_loss() {
        // テスト項目: 80 文字ちょうどのメッセージは欠落なく 40 + 40 に分割される
        // given (前提条件):
        let message = "z".repeat(80);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first.len() + split.second.len(), 80);
    }

    #[test]
    fn test_sentence_splits_between_words() {
        // テスト項目: 通常の文章は単語の境界で分割される
        // given (前提条件):
        let message = "Hello there, this is a long test message that exceeds forty characters";

        // when (操作):
        let split = split_message(message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first, "Hello there, this is a long test");
        assert_eq!(split.second, "message that exceeds forty characters");
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        // テスト項目: マルチバイト文字の途中で分割されない
        // given (前提条件): 45 文字 (各 3 バイト)
        let message = "あ".repeat(45);

        // when (操作):
        let split = split_message(&message, MAX_PART_LEN);

        // then (期待する結果):
        assert_eq!(split.first.chars().count(), 22);
        assert_eq!(split.second.chars().count(), 23);
    }

    #[test]
    fn test_truncate_chars() {
        // テスト項目: 文字数で切り詰められ、短い文字列はそのまま返る
        // given (前提条件):
        let text = "héllo wörld";

        // when (操作) / then (期待する結果):
        assert_eq!(truncate_chars(text, 5), "héllo");
        assert_eq!(truncate_chars(text, 50), text);
        assert_eq!(truncate_chars(text, 0), "");
    }
}
