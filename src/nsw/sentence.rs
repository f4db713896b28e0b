//! 句子切分
//!
//! 长文本按 `।` `?` `!` 切块，每块独立规范化

/// 句末标点
fn is_terminator(ch: char) -> bool {
    matches!(ch, '।' | '?' | '!')
}

fn flush(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// 切分句子，句末标点保留在所属句子里
///
/// 连续的句末标点（`?!`、`।।`）归入前一句
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if !is_terminator(ch) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            current.push(next);
            chars.next();
        }
        flush(&mut sentences, &mut current);
    }
    flush(&mut sentences, &mut current);

    sentences
}
