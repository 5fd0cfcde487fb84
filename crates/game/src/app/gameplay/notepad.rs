use crate::app::save::NOTE_PAD_PAGES;

/// The player's fixed-size note pad; copied back into the save record when
/// the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NotePad {
    pages: Vec<String>,
}

impl Default for NotePad {
    fn default() -> Self {
        Self {
            pages: vec![String::new(); NOTE_PAD_PAGES],
        }
    }
}

impl NotePad {
    /// Extra pages are dropped and missing ones are blank.
    pub(crate) fn from_pages(pages: &[String]) -> Self {
        let mut pages = pages
            .iter()
            .take(NOTE_PAD_PAGES)
            .cloned()
            .collect::<Vec<_>>();
        pages.resize(NOTE_PAD_PAGES, String::new());
        Self { pages }
    }

    /// Writes `line` onto the first blank page, or appends it to the last
    /// page once every page has text. Returns the page written.
    pub(crate) fn jot(&mut self, line: &str) -> usize {
        let last = self.pages.len().saturating_sub(1);
        let index = self
            .pages
            .iter()
            .position(|page| page.trim().is_empty())
            .unwrap_or(last);
        match self.pages.get_mut(index) {
            Some(page) if page.trim().is_empty() => *page = line.to_string(),
            Some(page) => {
                page.push('\n');
                page.push_str(line);
            }
            None => self.pages.push(line.to_string()),
        }
        index
    }

    pub(crate) fn mentions(&self, line: &str) -> bool {
        self.pages
            .iter()
            .any(|page| page.lines().any(|existing| existing == line))
    }

    pub(crate) fn filled_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| !page.trim().is_empty())
            .count()
    }

    pub(crate) fn pages(&self) -> &[String] {
        &self.pages
    }
}
