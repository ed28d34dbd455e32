#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a two column table: a left column of names and a wrapped middle column of descriptions.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
pub(crate) const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        indent: usize,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < target_total_width {
            let calculated_middle =
                std::cmp::max(target_total_width - non_middle, MINIMUM_MIDDLE_WIDTH);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the target total {target_total_width}.  Selecting middle: {calculated_middle}.");
            }

            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the target total {target_total_width}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }

            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let left_column_width = self.left.0;
        assert!(left.chars().count() <= left_column_width);
        let middle_parts = chunk(middle, self.middle.0);

        if middle_parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        middle_parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let left = if i == 0 { left } else { "" };
                format!("{:indent$}{left:left_column_width$}{:padding$}{part}", "", "")
            })
            .collect()
    }
}

/// Break the paragraph into lines of at most `width` characters, hyphenating words which are too long.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let width = std::cmp::max(width, 2);
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// The destination for everything the application prints.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::application::interface::UserInterface;
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (String, String) {
            let InMemoryInterface { messages, errors } = self;
            (messages.take().join("\n"), errors.take().join("\n"))
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, "");
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn renderer(left: usize, middle: usize) -> ColumnRenderer {
        ColumnRenderer::new(
            PaddingWidth::new(4).unwrap(),
            LeftWidth::new(left).unwrap(),
            MiddleWidth::new(middle).unwrap(),
        )
    }

    #[test]
    fn widths() {
        assert!(PaddingWidth::new(0).is_err());
        assert!(LeftWidth::new(0).is_err());
        assert!(MiddleWidth::new(1).is_err());
        assert!(MiddleWidth::new(2).is_ok());
    }

    #[test]
    fn column_renderer_simple() {
        let cr = renderer(5, 23);

        assert_eq!(
            cr.render(0, "abc", "something"),
            vec!["abc      something".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "  something  "),
            vec!["abc      something".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc12", "something pieces full"),
            vec!["abc12    something pieces full".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "something pieces full more stuff"),
            vec![
                "abc      something pieces full".to_string(),
                "         more stuff".to_string(),
            ]
        );
        assert_eq!(
            cr.render(0, "abc", "something pieces fullest more stuff extra     "),
            vec![
                "abc      something pieces".to_string(),
                "         fullest more stuff".to_string(),
                "         extra".to_string(),
            ]
        );
    }

    #[test]
    fn column_renderer_middle_overflow() {
        let cr = renderer(5, 23);

        assert_eq!(
            cr.render(0, "abc", "somethingxpiecesxfuller"),
            vec!["abc      somethingxpiecesxfuller".to_string()]
        );
        assert_eq!(
            cr.render(0, "abc", "somethingxpiecesxfullerandthenwecontinueforalongtime"),
            vec![
                "abc      somethingxpiecesxfulle-".to_string(),
                "         randthenwecontinuefora-".to_string(),
                "         longtime".to_string(),
            ]
        );
        assert_eq!(
            cr.render(0, "abc", "something pieces fullerandthenwecontinueforalongtime"),
            vec![
                "abc      something pieces".to_string(),
                "         fullerandthenwecontinu-".to_string(),
                "         eforalongtime".to_string(),
            ]
        );
    }

    #[test]
    fn column_renderer_middle_empty() {
        let cr = renderer(5, 8);
        assert_eq!(cr.render(0, "abc", ""), vec!["abc".to_string()]);
        assert_eq!(cr.render(2, "abc", "   "), vec!["  abc".to_string()]);
    }

    #[test]
    fn column_renderer_indent() {
        let cr = renderer(5, 10);

        assert_eq!(
            cr.render(2, "abc", "something"),
            vec!["  abc      something".to_string()]
        );
        assert_eq!(
            cr.render(2, "abc", "something extra"),
            vec![
                "  abc      something".to_string(),
                "           extra".to_string(),
            ]
        );
    }

    #[test]
    #[should_panic]
    fn column_renderer_left_overflow() {
        let cr = renderer(5, 10);
        cr.render(0, "abcdef", "something");
    }

    #[rstest]
    #[case(7, MINIMUM_MIDDLE_WIDTH)]
    #[case(15, MINIMUM_MIDDLE_WIDTH)]
    #[case(30, 20)]
    #[case(41, 30)]
    #[case(100, 40)]
    fn column_renderer_guided(#[case] total: usize, #[case] expected: usize) {
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2).unwrap(),
            LeftWidth::new(5).unwrap(),
            MiddleWidth::new(40).unwrap(),
            1,
            TotalWidth(total),
        );
        assert_eq!(cr.middle.0, expected);
    }

    #[rstest]
    #[case("", 10, vec![])]
    #[case("one", 10, vec!["one"])]
    #[case("one two three", 9, vec!["one two", "three"])]
    #[case("abcdefghij", 4, vec!["abc-", "def-", "ghij"])]
    #[case("ab abcdefg", 5, vec!["ab", "abcd-", "efg"])]
    #[case("ünïcödé wörds", 7, vec!["ünïcödé", "wörds"])]
    #[case("ünïcödéwörds", 7, vec!["ünïcöd-", "éwörds"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }
}
