use super::{FontSpec, TextMeasure};

/// Greedy word wrap.
///
/// The first word always starts the first line. Each following word joins
/// the current line only when the joined line measures strictly less than
/// `max_width`; otherwise the current line is flushed. A single word wider
/// than `max_width` is kept whole on its own line. Empty text yields one
/// empty line.
pub fn wrap<M>(text: &str, max_width: f32, font: &FontSpec, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut line = first.to_string();
    for word in words {
        let candidate = format!("{line} {word}");
        if measure.width(&candidate, font) < max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedAdvance;

    fn font() -> FontSpec {
        FontSpec::new("sans-serif", 10.0)
    }

    /// Each character is 10 px wide.
    fn measure() -> FixedAdvance {
        FixedAdvance::new(1.0)
    }

    #[test]
    fn ample_width_keeps_one_line() {
        let lines = wrap("Create Beautiful OG Images", 10_000.0, &font(), &measure());
        assert_eq!(lines, vec!["Create Beautiful OG Images"]);
    }

    #[test]
    fn breaks_before_overflowing_word() {
        // "aaa bbb" is 70 px, "aaa bbb ccc" is 110 px.
        let lines = wrap("aaa bbb ccc", 100.0, &font(), &measure());
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn exact_fit_is_not_allowed() {
        let lines = wrap("aaa bbb", 70.0, &font(), &measure());
        assert_eq!(lines, vec!["aaa", "bbb"]);
    }

    #[test]
    fn long_word_stays_whole() {
        let lines = wrap("a supercalifragilistic b", 50.0, &font(), &measure());
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", 100.0, &font(), &measure()), vec![String::new()]);
        assert_eq!(wrap("   ", 100.0, &font(), &measure()), vec![String::new()]);
    }

    #[test]
    fn never_drops_or_reorders_words() {
        let text = "the quick brown fox jumps over the lazy dog while seven wizards box";
        for max_width in [1.0, 35.0, 80.0, 150.0, 400.0] {
            let lines = wrap(text, max_width, &font(), &measure());
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rejoined, original, "max_width = {max_width}");
        }
    }
}
